
use winit::dpi::PhysicalSize;

mod renderer;
pub use renderer::*;

mod render_context;
pub use render_context::*;

mod render_pass;
pub use render_pass::*;

mod render_module;
pub use render_module::*;

mod camera;
pub use camera::*;

/// Offscreen target a mounted scene is drawn into.
pub trait SceneOutput<S> {
    /// Current size of the output in physical pixels
    fn size(&self) -> PhysicalSize<u32>;

    fn resize(&mut self, size: &PhysicalSize<u32>, scale_factor: f64);

    /// Draws the scene synchronously, the output holds the finished frame when this returns
    fn render(&mut self, scene: &S);
}
