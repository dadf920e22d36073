
use crate::framework::gpu;

use super::RenderContext;

/// Attachments of a render pass drawing color values into the renderer output, using depth buffer.
///  - with multisampling the pass draws into `msaa_texture` which is resolved into the output
#[derive(Debug)]
pub struct RenderPass {
    pub label: &'static str,
    pub clear_color: wgpu::Color,
    depth_texture: gpu::DepthStencilTexture,
    msaa_texture: Option<gpu::Texture>,
}

#[derive(Debug)]
pub struct RenderPassContext<'pass> {
    pub attachment:  &'pass RenderPass,
    pub render_pass: wgpu::RenderPass<'pass>,
}

// Construction
impl RenderPass {

    pub fn base(context: &RenderContext, clear_color: wgpu::Color) -> Self {
        Self {
            label: "Base Pass",
            clear_color,
            depth_texture: Self::create_depth_texture(context),
            msaa_texture: Self::create_msaa_texture(context),
        }
    }

    fn create_depth_texture(context: &RenderContext) -> gpu::DepthStencilTexture {
        gpu::DepthStencilTexture::new(
            "Base Pass Depth texture",
            &context.gpu.device,
            &context.size,
            context.sample_count,
        )
    }

    fn create_msaa_texture(context: &RenderContext) -> Option<gpu::Texture> {
        if context.sample_count <= 1 {
            return None;
        }
        Some(gpu::Texture::render_target(
            "Base Pass Multisampled color texture",
            &context.gpu.device,
            &context.size,
            context.format,
            context.sample_count,
            wgpu::TextureUsages::empty(),
        ))
    }
}

impl RenderPass {
    #[profiler::function]
    pub fn resize(&mut self, context: &RenderContext) {
        self.depth_texture = Self::create_depth_texture(context);
        self.msaa_texture = Self::create_msaa_texture(context);
    }

    pub fn start<'pass>(
        &'pass self,
        encoder: &'pass mut wgpu::CommandEncoder,
        view: &'pass wgpu::TextureView,
    ) -> RenderPassContext<'pass> {
        let (color_view, resolve_target) = match &self.msaa_texture {
            Some(msaa) => (&msaa.view, Some(view)),
            None => (view, None),
        };

        RenderPassContext {
            attachment: self,
            render_pass: encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(self.label),

                // Color frame buffer
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: true
                    }
                })],

                // Depth buffer to use in depth testing in this pass
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.texture().view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: false,
                    }),
                    stencil_ops: None,
                }),
            })
        }
    }
}
