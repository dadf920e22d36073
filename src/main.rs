mod framework;
mod torus_scene;

use crate::{
    framework::RunParams,
    torus_scene::{params::SceneParams, TorusApp},
};

fn main() {
    env_logger::init();
    profiler::session_begin!("torus-viewer");

    let params = RunParams {
        window_name: "Torus Viewer",
        ..Default::default()
    };
    let result = pollster::block_on(framework::run(
        |context| TorusApp::new(context, SceneParams::default()),
        params,
    ));

    profiler::session_end!();

    if let Err(err) = result {
        crate::error!("{}", err);
        std::process::exit(1);
    }
}
