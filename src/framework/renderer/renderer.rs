use std::sync::Arc;

use slotmap::{SlotMap, new_key_type};
use winit::dpi::PhysicalSize;

use crate::{
    debug,
    framework::{gpu, camera::SceneWithCamera, Error, Result},
};

use super::{
    RenderPass,
    RenderModule,
    camera::Camera,
    RenderContext,
    SceneOutput,
};

new_key_type! { pub struct RenderModuleID; }
new_key_type! { pub struct RenderPassID; }

#[derive(Debug)]
struct RegisteredRenderPass {
    attachment: RenderPass,
    modules:    Vec<RenderModuleID>,
}

/// Renders a scene into its own output texture which the host composites into a surface.
#[derive(Debug)]
pub struct Renderer<S: SceneWithCamera> {
    context: RenderContext,
    output:  gpu::Texture,
    modules: SlotMap<RenderModuleID, Box<dyn RenderModule<S>>>,
    passes:  SlotMap<RenderPassID, RegisteredRenderPass>,
}

// Renderer construction methods
impl<S: SceneWithCamera> Renderer<S> {
    pub const OUTPUT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    #[profiler::function]
    pub fn new(gpu: Arc<gpu::Context>, size: PhysicalSize<u32>, scale_factor: f64, sample_count: u32) -> Self {
        let camera = Camera::new(&gpu);
        let output = Self::create_output(&gpu, &size);
        debug!("Renderer output created with size {}x{}", size.width, size.height);
        Self {
            context: RenderContext {
                gpu,
                format: Self::OUTPUT_FORMAT,
                size,
                scale_factor,
                sample_count,
                camera,
            },
            output,
            modules: SlotMap::with_key(),
            passes:  SlotMap::with_key(),
        }
    }

    fn create_output(gpu: &gpu::Context, size: &PhysicalSize<u32>) -> gpu::Texture {
        gpu::Texture::render_target(
            "Renderer output texture",
            &gpu.device,
            size,
            Self::OUTPUT_FORMAT,
            1,
            wgpu::TextureUsages::TEXTURE_BINDING,
        )
    }

    /// Adds a new render module to the renderer
    pub fn add_module<M, F>(&mut self, get_module: F) -> RenderModuleID
        where
            M: RenderModule<S> + 'static,
            F: FnOnce(&RenderContext) -> M,
    {
        let module = get_module(&self.context);
        self.modules.insert(Box::new(module))
    }

    /// Registers a pass executing given modules in order, all the modules has to be added beforehand
    pub fn register_render_pass<F>(&mut self, get_pass: F, modules: &[RenderModuleID]) -> Result<RenderPassID>
        where
            F: FnOnce(&RenderContext) -> RenderPass,
    {
        let pass = get_pass(&self.context);
        if modules.iter().any(|module| !self.modules.contains_key(*module)) {
            return Err(Error::UnregisteredRenderModule { pass: pass.label });
        }

        Ok(self.passes.insert(RegisteredRenderPass {
            attachment: pass,
            modules:    modules.to_vec(),
        }))
    }

    /// View of the texture holding the last rendered frame
    pub fn output_view(&self) -> &wgpu::TextureView {
        &self.output.view
    }
}

// renderer runtime methods
impl<S: SceneWithCamera> Renderer<S> {

    #[profiler::function]
    pub fn prepare(&mut self, scene: &S) {

        // update shared camera resource outside of individual render module scopes
        self.context.camera.update(&self.context.gpu, scene.get_camera_rig().camera());

        for module in self.modules.values_mut() {
            module.prepare(scene, &self.context);
        }
    }

    #[profiler::function]
    pub fn draw(&mut self) {
        let mut encoder = profiler::call!(
            self.context.gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder")
            })
        );

        { profiler::scope!("Render Passes");
            for pass in self.passes.values() {
                profiler::scope!("One Render Pass execute");
                let mut render_pass_context = pass.attachment.start(&mut encoder, &self.output.view);
                for module in pass.modules.iter().filter_map(|id| self.modules.get(*id)) {
                    profiler::scope!("One Module execute");
                    module.render(&self.context, &mut render_pass_context);
                }
            }
        }

        profiler::call!(self.context.gpu.queue.submit(Some(encoder.finish())));
    }

    #[profiler::function]
    pub fn finalize(&mut self) {
        for module in self.modules.values_mut() {
            module.finalize();
        }
    }
}

impl<S: SceneWithCamera> SceneOutput<S> for Renderer<S> {
    fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    #[profiler::function]
    fn resize(&mut self, size: &PhysicalSize<u32>, scale_factor: f64) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.context.size = *size;
        self.context.scale_factor = scale_factor;
        self.output = Self::create_output(&self.context.gpu, size);
        for pass in self.passes.values_mut() {
            pass.attachment.resize(&self.context);
        }
    }

    #[profiler::function]
    fn render(&mut self, scene: &S) {
        self.prepare(scene);
        self.draw();
        self.finalize();
    }
}
