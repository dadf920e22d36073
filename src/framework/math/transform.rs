
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: glam::Vec3,
    pub rotation: glam::Quat,
    pub scale: glam::Vec3,
}

// Constants
impl Transform {
    pub const IDENTITY: Self = Self {
        position: glam::Vec3::ZERO,
        rotation: glam::Quat::IDENTITY,
        scale: glam::Vec3::ONE
    };
}

// Factories
impl Transform {
    pub fn from_position(position: glam::Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }
}

// Getters
impl Transform {
    #[inline]
    pub fn as_mat(&self) -> glam::Mat4 {
        glam::Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Matrix transforming normals, inverse transpose of the model matrix.
    #[inline]
    pub fn normal_mat(&self) -> glam::Mat4 {
        self.as_mat().inverse().transpose()
    }
}

// Builders
impl Transform {
    pub fn with_position(&self, position: glam::Vec3) -> Self {
        Self { position, ..*self }
    }
    pub fn with_rotation(&self, rotation: glam::Quat) -> Self {
        Self { rotation, ..*self }
    }
}

// Default
impl Default for Transform {
    fn default() -> Self { Self::IDENTITY }
}
