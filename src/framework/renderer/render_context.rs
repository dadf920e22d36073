
use std::sync::Arc;
use winit::dpi::PhysicalSize;

use crate::framework::gpu;

use super::Camera;

#[derive(Debug)]
pub struct RenderContext {

    /// A GPU context which is shared with whole application
    pub gpu: Arc<gpu::Context>,

    /// Format of the output texture all passes resolve into
    pub format: wgpu::TextureFormat,

    /// Size of the output texture in physical pixels
    pub size: PhysicalSize<u32>,

    pub scale_factor: f64,

    /// Multisampling of color and depth attachments, pipelines must be created with the same count
    pub sample_count: u32,

    /// A camera GPU resource shared by all render modules
    pub camera: Camera,

}

impl RenderContext {
    pub fn multisample_state(&self) -> wgpu::MultisampleState {
        wgpu::MultisampleState {
            count: self.sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        }
    }
}
