
pub mod gpu;
pub mod math;
pub mod camera;
pub mod application;
pub mod renderer;
pub mod updater;
pub mod host;
pub mod clock;
pub mod log;

mod error;
pub use error::*;

pub use application::{run, Application, Context, RunParams};
