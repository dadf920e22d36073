use thiserror::Error;

/// Failures which prevent the application from starting or a scene from being mounted.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("Failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("No graphics adapter compatible with the window surface was found")]
    NoAdapter,

    #[error("Failed to acquire graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("Graphics device ran out of memory while presenting a frame")]
    OutOfMemory,

    #[error("Render pass '{pass}' references a render module which is not registered")]
    UnregisteredRenderModule { pass: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
