use crate::framework::updater::{ResizeContext, UpdateContext, UpdaterModule};

use super::{Camera, SceneWithCamera};

/// Drives the scene camera rig and keeps the projection aspect in sync with the output size.
#[derive(Default)]
pub struct CameraUpdater;

impl<S: SceneWithCamera> UpdaterModule<S> for CameraUpdater {
    #[profiler::function]
    fn input(&mut self, context: &mut UpdateContext<S>) -> bool {
        context.scene.get_camera_mut().on_input(context.input);
        false // do not prevent event propagation
    }

    #[profiler::function]
    fn update(&mut self, context: &mut UpdateContext<S>) {
        context.scene
            .get_camera_mut()
            .update(context.tick.delta.as_secs_f32());
    }

    #[profiler::function]
    fn resize(&mut self, context: &mut ResizeContext<S>) {
        if context.size.width == 0 || context.size.height == 0 {
            return;
        }
        let rig = context.scene.get_camera_mut();
        rig.set_camera(Camera {
            aspect_ratio: context.size.width as f32 / context.size.height as f32,
            ..*rig.camera()
        });
    }
}
