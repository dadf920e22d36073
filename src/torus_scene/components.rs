use hecs::Entity;

use crate::framework::{
    gpu::vertices::{ColorVertex, MeshVertex},
    math::Color,
};

/// Human readable name of an entity, used in logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Name(pub &'static str);

/// Indexed triangle list in model space.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Only faces with counter clockwise winding are drawn
    Front,
    /// Both faces are drawn and lit
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardMaterial {
    pub color: Color,
    pub side: Side,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    /// Zero disables the cutoff
    pub distance: f32,
    pub decay: f32,
}

/// Line list in model space, every two vertices form one segment.
#[derive(Debug, Clone, Default)]
pub struct LineMesh {
    pub vertices: Vec<ColorVertex>,
}

/// Marks the coordinate axes lines.
#[derive(Debug, Clone, Copy)]
pub struct AxesHelper;

/// Wire sphere displayed at the position of a light.
#[derive(Debug, Clone, Copy)]
pub struct LightHelper {
    pub light: Entity,
}
