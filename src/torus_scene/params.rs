use std::f32::consts::{FRAC_PI_2, PI};

use crate::framework::math::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: glam::Vec3,
    pub target: glam::Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusParams {
    pub radius: f32,
    pub tube: f32,
    pub radial_segments: u32,
    pub tubular_segments: u32,
    pub color: Color,
    pub position: glam::Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorParams {
    pub width: f32,
    pub height: f32,
    pub color: Color,
    /// Rotation about the X axis in radians, the plane is generated facing +Z
    pub rotation_x: f32,
    pub position: glam::Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightParams {
    pub color: Color,
    pub intensity: f32,
    /// Cutoff distance, zero means the light reaches infinitely far
    pub distance: f32,
    pub decay: f32,
    pub position: glam::Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlsParams {
    pub auto_rotate: bool,
    /// 2.0 is one orbit per 30 seconds
    pub auto_rotate_speed: f32,
    /// Degrees per pixel of mouse drag
    pub rotate_speed: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

/// Everything the torus scene is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneParams {
    pub camera: CameraParams,
    pub torus: TorusParams,
    pub floor: FloorParams,
    pub light: LightParams,
    pub axes_length: f32,
    pub light_helper_size: f32,
    pub controls: ControlsParams,
    pub clear_color: Color,
    pub sample_count: u32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            camera: CameraParams {
                fov: 75.0,
                near: 0.1,
                far: 1000.0,
                position: glam::vec3(30.0, 10.0, 0.0),
                target: glam::Vec3::ZERO,
            },
            torus: TorusParams {
                radius: 10.0,
                tube: 3.0,
                radial_segments: 16,
                tubular_segments: 100,
                color: Color::from_hex(0x11ff00),
                position: glam::Vec3::ZERO,
            },
            floor: FloorParams {
                width: 200.0,
                height: 200.0,
                color: Color::from_hex(0x808080),
                rotation_x: -FRAC_PI_2,
                position: glam::vec3(0.0, -12.0, 0.0),
            },
            light: LightParams {
                color: Color::WHITE,
                intensity: 2.5,
                distance: 0.0,
                decay: 0.7,
                position: glam::vec3(20.0, 10.0, 10.0),
            },
            axes_length: 5.0,
            light_helper_size: 1.0,
            controls: ControlsParams {
                auto_rotate: true,
                auto_rotate_speed: 2.0,
                rotate_speed: 0.7,
                min_polar_angle: 0.0,
                max_polar_angle: PI / 2.0,
                min_distance: 1.0,
                max_distance: 500.0,
            },
            clear_color: Color::BLACK,
            sample_count: 4,
        }
    }
}
