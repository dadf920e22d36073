
pub mod params;
pub mod scene;
pub mod components;
pub mod geometry;
pub mod modules;
pub mod mount;

mod define_renderer;
pub use define_renderer::define_renderer;

mod define_updater;
pub use define_updater::define_updater;

mod init_scene;
pub use init_scene::init_scene;

mod app;
pub use app::TorusApp;
