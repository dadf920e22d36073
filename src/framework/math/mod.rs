
mod transform;
pub use transform::*;

mod color;
pub use color::*;
