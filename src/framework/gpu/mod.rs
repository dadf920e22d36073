pub mod vertices;

mod buffers;
mod context;
mod textures;

pub use buffers::*;
pub use context::*;
pub use textures::*;
