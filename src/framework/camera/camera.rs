
use crate::framework::math::Transform;

/// Perspective camera, `fov` is the vertical field of view in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub aspect_ratio: f32,
    pub fov:          f32,
    pub near:         f32,
    pub far:          f32,
    pub position:     glam::Vec3,
    pub rotation:     glam::Quat,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            fov:          50.0,
            near:         0.1,
            far:          2000.0,
            position:     glam::Vec3::ZERO,
            rotation:     glam::Quat::IDENTITY,
        }
    }
}

impl Camera {

    /// Rotates the camera so that its forward (-Z) axis points to `target`.
    pub fn look_at(mut self, target: glam::Vec3) -> Self {
        let view = glam::Mat4::look_at_rh(self.position, target, glam::Vec3::Y);
        self.rotation = glam::Quat::from_mat4(&view).inverse();
        self
    }

    pub fn view_matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn projection_matrix(&self) -> glam::Mat4 {
        glam::Mat4::perspective_rh(
            self.fov.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far
        )
    }

    pub fn view_projection_matrix(&self) -> glam::Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation,
            ..Default::default()
        }
    }

    pub fn forward(&self) -> glam::Vec3 {
        self.rotation * glam::Vec3::NEG_Z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_points_forward_axis_to_target() {
        let camera = Camera {
            position: glam::vec3(30.0, 10.0, 0.0),
            ..Default::default()
        }.look_at(glam::Vec3::ZERO);

        let expected = (glam::Vec3::ZERO - camera.position).normalize();
        assert!((camera.forward() - expected).length() < 1e-5);
    }

    #[test]
    fn target_projects_to_center_of_view() {
        let camera = Camera {
            aspect_ratio: 16.0 / 9.0,
            fov: 75.0,
            position: glam::vec3(30.0, 10.0, 0.0),
            ..Default::default()
        }.look_at(glam::Vec3::ZERO);

        let clip = camera.view_projection_matrix() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4, "{ndc:?}");
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn aspect_ratio_scales_horizontal_projection() {
        let wide = Camera { aspect_ratio: 2.0, ..Default::default() }.projection_matrix();
        let square = Camera { aspect_ratio: 1.0, ..Default::default() }.projection_matrix();
        assert!((square.x_axis.x / wide.x_axis.x - 2.0).abs() < 1e-5);
        assert_eq!(square.y_axis.y, wide.y_axis.y);
    }
}
