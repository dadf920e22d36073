//! Lit triangle meshes: entities with `TriangleMesh`, `StandardMaterial` and `Transform`,
//! lit by all entities with `PointLight` and `Transform`.

use std::collections::{HashMap, HashSet, hash_map::Entry};

use hecs::Entity;

use crate::{
    framework::{
        gpu::{self, vertices::MeshVertex},
        math::Transform,
        renderer::{RenderContext, RenderModule, RenderPassContext},
    },
    torus_scene::{
        components::{PointLight, Side, StandardMaterial, TriangleMesh},
        scene::Scene,
    },
};

mod pipeline;
pub use pipeline::*;

pub const MAX_LIGHTS: usize = 4;

// GPU data
// --------

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuPointLight {
    pub position: glam::Vec4,
    /// Linear color multiplied by intensity
    pub color: glam::Vec4,
    /// x: cutoff distance, y: decay
    pub params: glam::Vec4,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub lights: [GpuPointLight; MAX_LIGHTS],
    /// x: number of used lights
    pub count: glam::UVec4,
}

impl LightsUniform {
    /// Packs lights for the shader, lights over `MAX_LIGHTS` are ignored.
    pub fn from_lights<'a>(lights: impl IntoIterator<Item = (&'a PointLight, &'a Transform)>) -> Self {
        let mut uniform = Self {
            lights: [GpuPointLight::default(); MAX_LIGHTS],
            count: glam::UVec4::ZERO,
        };
        for (slot, (light, transform)) in uniform.lights.iter_mut().zip(lights) {
            *slot = GpuPointLight {
                position: transform.position.extend(1.0),
                color: (light.color.to_linear() * light.intensity).extend(1.0),
                params: glam::vec4(light.distance, light.decay, 0.0, 0.0),
            };
            uniform.count.x += 1;
        }
        uniform
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: glam::Mat4,
    pub normal: glam::Mat4,
    /// Linear albedo
    pub color: glam::Vec4,
}

impl ModelUniform {
    fn new(transform: &Transform, material: &StandardMaterial) -> Self {
        Self {
            model: transform.as_mat(),
            normal: transform.normal_mat(),
            color: material.color.to_linear().extend(1.0),
        }
    }
}

// MeshRenderResource
// ------------------

#[derive(Debug)]
struct MeshRenderResource {
    vertex_buffer: gpu::Buffer<MeshVertex>,
    index_buffer: gpu::Buffer<u32>,
    model: gpu::UniformBinding<ModelUniform>,
    side: Side,
}

impl MeshRenderResource {
    #[profiler::function]
    fn new(
        context: &gpu::Context,
        layout: &wgpu::BindGroupLayout,
        mesh: &TriangleMesh,
        material: &StandardMaterial,
        transform: &Transform,
    ) -> Self {
        Self {
            vertex_buffer: gpu::Buffer::new(context, Some("Mesh Vertex Buffer"), &mesh.vertices, wgpu::BufferUsages::VERTEX),
            index_buffer: gpu::Buffer::new(context, Some("Mesh Index Buffer"), &mesh.indices, wgpu::BufferUsages::INDEX),
            model: gpu::UniformBinding::new(context, "Mesh Model Uniform", layout, ModelUniform::new(transform, material)),
            side: material.side,
        }
    }
}

// MeshRenderModule
// ----------------

#[derive(Debug)]
pub struct MeshRenderModule {
    pipelines: [MeshPipeline; 2],
    lights: gpu::UniformBinding<LightsUniform>,
    model_layout: wgpu::BindGroupLayout,
    render_resources: HashMap<Entity, MeshRenderResource>,
}

impl MeshRenderModule {

    #[profiler::function]
    pub fn new(context: &RenderContext) -> Self {
        let shader = MeshPipeline::load_shader(context);
        let lights_layout = gpu::UniformBinding::<LightsUniform>::layout(
            &context.gpu.device,
            "Mesh Lights Bind Group Layout",
            wgpu::ShaderStages::FRAGMENT,
        );
        let model_layout = gpu::UniformBinding::<ModelUniform>::layout(
            &context.gpu.device,
            "Mesh Model Bind Group Layout",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );

        Self {
            pipelines: [
                MeshPipeline::new(context, &shader, &lights_layout, &model_layout, Side::Front),
                MeshPipeline::new(context, &shader, &lights_layout, &model_layout, Side::Double),
            ],
            lights: gpu::UniformBinding::new(
                &context.gpu,
                "Mesh Lights Uniform",
                &lights_layout,
                LightsUniform::from_lights(std::iter::empty()),
            ),
            model_layout,
            render_resources: HashMap::new(),
        }
    }
}

impl RenderModule<Scene> for MeshRenderModule {

    #[profiler::function]
    fn prepare(&mut self, scene: &Scene, context: &RenderContext) {
        let mut lights_query = scene.world.query::<(&PointLight, &Transform)>();
        self.lights.write(&context.gpu, LightsUniform::from_lights(lights_query.iter().map(|(_, light)| light)));

        // meshes are uploaded once, transforms and materials every frame
        let mut alive = HashSet::new();
        for (entity, (mesh, material, transform)) in scene.world.query::<(&TriangleMesh, &StandardMaterial, &Transform)>().iter() {
            alive.insert(entity);
            match self.render_resources.entry(entity) {
                Entry::Occupied(mut oe) => {
                    let resource = oe.get_mut();
                    resource.side = material.side;
                    resource.model.write(&context.gpu, ModelUniform::new(transform, material));
                },
                Entry::Vacant(ve) => {
                    ve.insert(MeshRenderResource::new(&context.gpu, &self.model_layout, mesh, material, transform));
                },
            }
        }

        // despawned entities
        self.render_resources.retain(|entity, _| alive.contains(entity));
    }

    #[profiler::function]
    fn render<'pass, 'a: 'pass>(
        &'a self,
        context: &'a RenderContext,
        render_pass_context: &mut RenderPassContext<'pass>,
    ) {
        let pass = &mut render_pass_context.render_pass;
        pass.set_bind_group(0, context.camera.bind_group(), &[]);
        pass.set_bind_group(1, &self.lights.bind_group, &[]);

        for pipeline in self.pipelines.iter() {
            pass.set_pipeline(&pipeline.pipeline);
            for resource in self.render_resources.values().filter(|r| r.side == pipeline.side) {
                profiler::scope!("Draw Mesh entity");
                pass.set_bind_group(2, &resource.model.bind_group, &[]);
                pass.set_vertex_buffer(0, resource.vertex_buffer.buffer.slice(..));
                pass.set_index_buffer(resource.index_buffer.buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..resource.index_buffer.size as u32, 0, 0..1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::framework::math::Color;

    use super::*;

    fn light(intensity: f32) -> PointLight {
        PointLight { color: Color::WHITE, intensity, distance: 0.0, decay: 0.7 }
    }

    #[test]
    fn lights_are_packed_with_intensity() {
        let light = light(2.5);
        let transform = Transform::from_position(glam::vec3(20.0, 10.0, 10.0));
        let uniform = LightsUniform::from_lights([(&light, &transform)]);

        assert_eq!(uniform.count.x, 1);
        assert_eq!(uniform.lights[0].position, glam::vec4(20.0, 10.0, 10.0, 1.0));
        assert!((uniform.lights[0].color.x - 2.5).abs() < 1e-5);
        assert_eq!(uniform.lights[0].params, glam::vec4(0.0, 0.7, 0.0, 0.0));
    }

    #[test]
    fn lights_over_limit_are_ignored() {
        let lights: Vec<_> = (0..6).map(|i| (light(i as f32), Transform::IDENTITY)).collect();
        let uniform = LightsUniform::from_lights(lights.iter().map(|(l, t)| (l, t)));
        assert_eq!(uniform.count.x, MAX_LIGHTS as u32);
        assert!((uniform.lights[3].color.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn uniform_layouts_match_shader() {
        assert_eq!(std::mem::size_of::<GpuPointLight>(), 48);
        assert_eq!(std::mem::size_of::<LightsUniform>(), 4 * 48 + 16);
        assert_eq!(std::mem::size_of::<ModelUniform>(), 144);
    }
}
