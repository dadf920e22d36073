//! Procedural meshes, tessellated the way three.js builds its geometries so the scene looks the same.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::framework::gpu::vertices::{ColorVertex, MeshVertex};

use super::components::{LineMesh, TriangleMesh};

/// Torus centered at the origin, lying in the XY plane.
///  - `radius` from the center of the torus to the center of the tube
///  - `(radial_segments + 1) * (tubular_segments + 1)` vertices, seams are duplicated
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> TriangleMesh {
    let radial_segments = radial_segments.max(2);
    let tubular_segments = tubular_segments.max(3);

    let mut vertices = Vec::with_capacity(((radial_segments + 1) * (tubular_segments + 1)) as usize);
    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let position = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            vertices.push(MeshVertex {
                position,
                normal: (position - center).normalize(),
            });
        }
    }

    let row = tubular_segments + 1;
    let mut indices = Vec::with_capacity((6 * radial_segments * tubular_segments) as usize);
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    TriangleMesh { vertices, indices }
}

/// Single quad in the XY plane centered at the origin, facing +Z.
pub fn plane(width: f32, height: f32) -> TriangleMesh {
    let (hw, hh) = (width / 2.0, height / 2.0);
    let vertex = |x: f32, y: f32| MeshVertex {
        position: Vec3::new(x, y, 0.0),
        normal: Vec3::Z,
    };
    TriangleMesh {
        vertices: vec![vertex(-hw, hh), vertex(hw, hh), vertex(-hw, -hh), vertex(hw, -hh)],
        indices: vec![0, 2, 1, 2, 3, 1],
    }
}

/// Coordinate axes from the origin, X red, Y green and Z blue, each fading slightly towards its tip.
pub fn axes(length: f32) -> LineMesh {
    let line = |direction: Vec3, origin_color: Vec3, tip_color: Vec3| [
        ColorVertex { position: Vec3::ZERO, color: origin_color },
        ColorVertex { position: direction * length, color: tip_color },
    ];
    LineMesh {
        vertices: [
            line(Vec3::X, Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.6, 0.0)),
            line(Vec3::Y, Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.6, 1.0, 0.0)),
            line(Vec3::Z, Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.6, 1.0)),
        ].concat(),
    }
}

/// Wireframe of a UV sphere: rings at each inner latitude and meridians from pole to pole.
pub fn wire_sphere(radius: f32, width_segments: u32, height_segments: u32, color: Vec3) -> LineMesh {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);

    let point = |i: u32, j: u32| {
        let phi = i as f32 / width_segments as f32 * TAU;
        let theta = j as f32 / height_segments as f32 * PI;
        ColorVertex {
            position: Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            ),
            color,
        }
    };

    let mut vertices = vec![];
    for j in 1..height_segments {
        for i in 0..width_segments {
            vertices.extend_from_slice(&[point(i, j), point(i + 1, j)]);
        }
    }
    for i in 0..width_segments {
        for j in 0..height_segments {
            vertices.extend_from_slice(&[point(i, j), point(i, j + 1)]);
        }
    }

    LineMesh { vertices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn torus_tessellation_counts() {
        let mesh = torus(10.0, 3.0, 16, 100);
        assert_eq!(mesh.vertices.len(), 17 * 101);
        assert_eq!(mesh.indices.len(), 6 * 16 * 100);
        assert!(mesh.indices.iter().all(|i| (*i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn torus_vertices_lie_on_tube_with_unit_normals() {
        let mesh = torus(10.0, 3.0, 16, 100);
        for vertex in mesh.vertices.iter() {
            assert!((vertex.normal.length() - 1.0).abs() < 1e-4);
            let ring = Vec3::new(vertex.position.x, vertex.position.y, 0.0).normalize() * 10.0;
            assert!(((vertex.position - ring).length() - 3.0).abs() < 1e-3);
        }
    }

    #[test]
    fn torus_faces_wind_counter_clockwise_from_outside() {
        let mesh = torus(10.0, 3.0, 16, 100);
        for face in mesh.indices.chunks(3) {
            let [a, b, c] = [face[0], face[1], face[2]].map(|i| mesh.vertices[i as usize]);
            let face_normal = (b.position - a.position).cross(c.position - a.position);
            assert!(face_normal.dot(a.normal + b.normal + c.normal) > 0.0);
        }
    }

    #[test]
    fn plane_faces_up_its_normal() {
        let mesh = plane(200.0, 200.0);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        for face in mesh.indices.chunks(3) {
            let [a, b, c] = [face[0], face[1], face[2]].map(|i| mesh.vertices[i as usize].position);
            assert!((b - a).cross(c - a).z > 0.0);
        }
        assert_eq!(mesh.vertices[3].position, Vec3::new(100.0, -100.0, 0.0));
    }

    #[test]
    fn axes_have_requested_length() {
        let mesh = axes(5.0);
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.vertices[1].position, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(mesh.vertices[3].position, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(mesh.vertices[5].position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(mesh.vertices[0].color, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn light_helper_sphere_edges() {
        let mesh = wire_sphere(1.0, 4, 2, Vec3::ONE);
        // one ring of 4 edges plus 4 meridians of 2 edges
        assert_eq!(mesh.vertices.len(), 2 * 12);
        assert!(mesh.vertices.iter().all(|v| (v.position.length() - 1.0).abs() < 1e-5));
    }
}
