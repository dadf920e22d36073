use std::sync::Arc;

use winit::dpi::PhysicalSize;

use crate::framework::{
    gpu,
    renderer::{Renderer, RenderPass},
    Result,
};

use super::{
    scene::Scene,
    params::SceneParams,
    modules::{
        mesh::MeshRenderModule,
        line::LineRenderModule,
    },
};

pub fn define_renderer(
    gpu: Arc<gpu::Context>,
    size: PhysicalSize<u32>,
    scale_factor: f64,
    params: &SceneParams,
) -> Result<Renderer<Scene>> {
    let mut renderer = Renderer::new(gpu, size, scale_factor, params.sample_count);

    // load modules
    let mesh_module = renderer.add_module(MeshRenderModule::new);
    let line_module = renderer.add_module(LineRenderModule::new);

    // modules are executed in order of the list
    let clear_color = params.clear_color.to_wgpu();
    renderer.register_render_pass(|context| RenderPass::base(context, clear_color), &[
        mesh_module,
        line_module,
    ])?;

    Ok(renderer)
}
