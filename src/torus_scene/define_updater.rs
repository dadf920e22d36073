use crate::framework::{
    camera::CameraUpdater,
    math::Transform,
    updater::{ResizeContext, UpdateContext, Updater, UpdaterModule},
};

use super::{components::LightHelper, scene::Scene};

pub fn define_updater() -> Updater<Scene> {
    Updater::new()
        .with_module(CameraUpdater)
        .with_module(LightHelperFollower)
}

/// Moves light helpers to the current position of their lights.
#[derive(Default)]
pub struct LightHelperFollower;

impl UpdaterModule<Scene> for LightHelperFollower {
    fn input(&mut self, _: &mut UpdateContext<Scene>) -> bool {
        false
    }

    #[profiler::function]
    fn update(&mut self, context: &mut UpdateContext<Scene>) {
        let world = &mut context.scene.world;
        let targets: Vec<_> = world.query::<&LightHelper>()
            .iter()
            .filter_map(|(helper, LightHelper { light })| {
                world.get::<&Transform>(*light).ok().map(|transform| (helper, transform.position))
            })
            .collect();

        for (helper, position) in targets {
            if let Ok(mut transform) = world.get::<&mut Transform>(helper) {
                transform.position = position;
            }
        }
    }

    fn resize(&mut self, _: &mut ResizeContext<Scene>) {}
}
