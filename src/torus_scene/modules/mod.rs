
pub mod mesh;
pub mod line;
