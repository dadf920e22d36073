use std::mem::size_of;

use glam::Vec3;

/// A trait which each vertex type must implement.
pub trait Vertex: Copy + Clone + bytemuck::Pod + bytemuck::Zeroable {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute];

    /// Configuration of vertex puller for a buffer of this vertex type
    fn vertex_layout<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress, // <- width of one vertex in the buffer
            step_mode:    wgpu::VertexStepMode::Vertex,             // <- one vertex pulled per vertex, not per instance
            attributes:   Self::ATTRIBUTES,
        }
    }
}

/// Color Vertex
/// A vertex type which contains position and color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorVertex {
    pub position: Vec3,
    pub color: Vec3,
}
impl Vertex for ColorVertex {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // color
    ];
}

/// Mesh Vertex
/// A vertex of a lit surface, position and normal.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
}
impl Vertex for MeshVertex {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // normal
    ];
}
