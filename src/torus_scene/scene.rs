use hecs::World;

use crate::framework::camera::{CameraRig, OrbitCameraRig, SceneWithCamera};

pub struct Scene {
    pub camera: OrbitCameraRig,
    pub world: World,
}

impl SceneWithCamera for Scene {
    fn get_camera_rig(&self) -> &dyn CameraRig {
        &self.camera
    }

    fn get_camera_mut(&mut self) -> &mut dyn CameraRig {
        &mut self.camera
    }
}
