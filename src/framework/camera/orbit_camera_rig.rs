use std::{f32::consts::FRAC_PI_2, marker::PhantomData};
use winit_input_helper::WinitInputHelper;

use dolly::{
    driver::RigDriver,
    prelude::{Handedness, Position, RightHanded, Smooth, YawPitch},
    rig::RigUpdateParams,
};

use super::{Camera, CameraRig};
use crate::framework::math::Transform;

/// Degrees of yaw per second of auto rotation at speed 1.0, one orbit per minute.
const AUTO_ROTATE_DEGREES_PER_SECOND: f32 = 6.0;

/// Orbits the camera around a target point.
///
/// Yaw and pitch follow the three.js convention: yaw is the azimuth measured from +Z towards +X,
/// the polar angle is measured from +Y, so `pitch = polar - 90°`.
pub struct OrbitCameraRig {
    rig: dolly::rig::CameraRig,
    camera: Camera,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    /// Degrees of rotation per pixel of mouse drag.
    pub rotate_speed: f32,
    /// Radians from the up axis.
    pub min_polar_angle: f32,
    /// Radians from the up axis.
    pub max_polar_angle: f32,
}

impl OrbitCameraRig {
    pub fn new(camera: Camera, target: glam::Vec3) -> Self {
        let offset = camera.position - target;
        let distance = offset.length().max(f32::EPSILON);

        let mut yaw_pitch = YawPitch::new();
        yaw_pitch.yaw_degrees = offset.x.atan2(offset.z).to_degrees();
        yaw_pitch.pitch_degrees = -(offset.y / distance).clamp(-1.0, 1.0).asin().to_degrees();

        let mut rig = dolly::rig::CameraRig::builder()
            .with(yaw_pitch)
            .with(Smooth::new_rotation(0.8))
            .with(Position::new(target))
            .with(SmoothZoom::new(distance, 0.8))
            .build();

        let res = rig.update(0.0);
        let camera = Camera {
            position: res.position.into(),
            rotation: res.rotation.into(),
            ..camera
        };

        Self {
            rig,
            camera,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            rotate_speed: 0.7,
            min_polar_angle: 0.0,
            max_polar_angle: std::f32::consts::PI,
        }
    }

    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.rig.driver_mut::<SmoothZoom<RightHanded>>().set_limits(min, max);
        self
    }

    pub fn target(&self) -> glam::Vec3 {
        self.rig.driver::<Position>().position.into()
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.rig.driver::<YawPitch>().yaw_degrees
    }

    pub fn pitch_degrees(&self) -> f32 {
        self.rig.driver::<YawPitch>().pitch_degrees
    }

    /// Target zoom distance, the camera approaches it smoothly.
    pub fn distance(&self) -> f32 {
        self.rig.driver::<SmoothZoom<RightHanded>>().distance()
    }

    /// Rotates the orbit by given angles in degrees, keeping the polar angle within limits.
    pub fn rotate(&mut self, yaw_degrees: f32, pitch_degrees: f32) {
        let (min_pitch, max_pitch) = self.pitch_limits();
        let yaw_pitch = self.rig.driver_mut::<YawPitch>();
        yaw_pitch.yaw_degrees = (yaw_pitch.yaw_degrees + yaw_degrees).rem_euclid(360.0);
        yaw_pitch.pitch_degrees = (yaw_pitch.pitch_degrees + pitch_degrees).clamp(min_pitch, max_pitch);
    }

    pub fn zoom(&mut self, amount: f32) {
        self.rig.driver_mut::<SmoothZoom<RightHanded>>().zoom(amount);
    }

    fn pitch_limits(&self) -> (f32, f32) {
        let min = (self.min_polar_angle - FRAC_PI_2).to_degrees();
        let max = (self.max_polar_angle - FRAC_PI_2).to_degrees();
        (min.min(max), max)
    }
}

impl CameraRig for OrbitCameraRig {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn set_camera(&mut self, camera: Camera) {
        self.camera.fov = camera.fov;
        self.camera.aspect_ratio = camera.aspect_ratio;
        self.camera.near = camera.near;
        self.camera.far = camera.far;
    }

    fn on_input(&mut self, input: &WinitInputHelper) {
        let (dx, dy) = input.mouse_diff();
        if (dx != 0.0 || dy != 0.0) && input.mouse_held(0) {
            self.rotate(-dx * self.rotate_speed, -dy * self.rotate_speed);
        }
        let scroll = input.scroll_diff();
        if scroll != 0.0 {
            self.zoom(-scroll);
        }
    }

    fn update(&mut self, delta_time_seconds: f32) -> Transform {
        if self.auto_rotate {
            let angle = AUTO_ROTATE_DEGREES_PER_SECOND * self.auto_rotate_speed * delta_time_seconds;
            self.rotate(-angle, 0.0);
        } else {
            // limits may have changed since the last input
            self.rotate(0.0, 0.0);
        }

        let res = self.rig.update(delta_time_seconds);
        self.camera.position = res.position.into();
        self.camera.rotation = res.rotation.into();
        self.camera.transform()
    }
}

/// This is a custom dolly rig driver that behaves similarly to Arm driver but uses just distance which can be smoothly changed.
/// Implementation based on example: https://github.com/h3r2tic/dolly/blob/main/examples/nested_driver.rs
#[derive(Debug)]
pub struct SmoothZoom<H: Handedness> {
    rig: dolly::rig::CameraRig<H>,
    min_distance: f32,
    max_distance: f32,
}

impl<H: Handedness> SmoothZoom<H> {
    pub fn new(distance: f32, smoothness: f32) -> Self {
        Self {
            rig: dolly::rig::CameraRig::builder()
                .with(Position::new(glam::vec3(0.0, 0.0, distance)))
                .with(Smooth::new_position(smoothness))
                .build(),
            min_distance: 0.1,
            max_distance: f32::INFINITY,
        }
    }

    pub fn set_limits(&mut self, min_distance: f32, max_distance: f32) {
        self.min_distance = min_distance;
        self.max_distance = max_distance.max(min_distance);
        let p = self.rig.driver_mut::<Position>();
        p.position.z = p.position.z.clamp(self.min_distance, self.max_distance);
    }

    pub fn distance(&self) -> f32 {
        self.rig.driver::<Position>().position.z
    }

    pub fn zoom(&mut self, zoom: f32) {
        let (min, max) = (self.min_distance, self.max_distance);
        let p = self.rig.driver_mut::<Position>();
        let scale = 1.0 + zoom * 0.3;
        p.position.z = (p.position.z * scale).clamp(min, max);
    }
}

impl<H: Handedness> RigDriver<H> for SmoothZoom<H> {
    fn update(&mut self, params: RigUpdateParams<H>) -> dolly::transform::Transform<H> {
        let t = self.rig.update(params.delta_time_seconds);

        let parent_position: glam::Vec3 = params.parent.position.into();
        let parent_rotation: glam::Quat = params.parent.rotation.into();
        let position: glam::Vec3 = t.position.into();

        let final_position = parent_position + parent_rotation * position;
        dolly::transform::Transform {
            rotation: params.parent.rotation,
            position: final_position.into(),
            phantom: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> OrbitCameraRig {
        let camera = Camera {
            position: glam::vec3(30.0, 10.0, 0.0),
            ..Default::default()
        };
        let mut rig = OrbitCameraRig::new(camera, glam::Vec3::ZERO);
        rig.max_polar_angle = FRAC_PI_2;
        rig
    }

    #[test]
    fn starts_at_camera_position() {
        let rig = rig();
        assert!((rig.yaw_degrees() - 90.0).abs() < 1e-4);
        assert!(rig.pitch_degrees() < 0.0);
        assert!((rig.distance() - 1000f32.sqrt()).abs() < 1e-4);
        assert!((rig.camera().position - glam::vec3(30.0, 10.0, 0.0)).length() < 1e-3);
        assert_eq!(rig.target(), glam::Vec3::ZERO);
    }

    #[test]
    fn auto_rotation_advances_yaw_by_speed() {
        let mut rig = rig();
        rig.auto_rotate = true;
        rig.auto_rotate_speed = 2.0;

        rig.update(1.0);
        assert!((rig.yaw_degrees() - 78.0).abs() < 1e-3);

        rig.update(0.5);
        assert!((rig.yaw_degrees() - 72.0).abs() < 1e-3);
    }

    #[test]
    fn auto_rotation_disabled_keeps_yaw() {
        let mut rig = rig();
        rig.update(1.0);
        assert!((rig.yaw_degrees() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn polar_limit_keeps_camera_above_horizon() {
        let mut rig = rig();
        rig.rotate(0.0, 80.0);
        assert_eq!(rig.pitch_degrees(), 0.0);

        for _ in 0..120 {
            rig.update(1.0 / 60.0);
        }
        assert!(rig.camera().position.y >= -1e-3, "{:?}", rig.camera().position);
    }

    #[test]
    fn orbiting_keeps_distance_to_target() {
        let mut rig = rig();
        rig.auto_rotate = true;
        for _ in 0..90 {
            rig.update(1.0 / 60.0);
        }
        let distance = rig.camera().position.distance(rig.target());
        assert!((distance - 1000f32.sqrt()).abs() < 1e-2, "{distance}");
    }

    #[test]
    fn zoom_respects_distance_limits() {
        let mut rig = rig().with_distance_limits(5.0, 40.0);
        for _ in 0..20 {
            rig.zoom(1.0);
        }
        assert_eq!(rig.distance(), 40.0);
        for _ in 0..40 {
            rig.zoom(-1.0);
        }
        assert_eq!(rig.distance(), 5.0);
    }
}
