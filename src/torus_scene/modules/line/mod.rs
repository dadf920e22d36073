//! Helper lines: entities with `LineMesh` and `Transform`, drawn unlit in their vertex colors.

use std::{
    collections::{HashMap, HashSet, hash_map::Entry},
    borrow::Cow,
};

use hecs::Entity;

use crate::{
    framework::{
        gpu::{
            self,
            vertices::{ColorVertex, Vertex},
        },
        math::Transform,
        renderer::{
            RenderContext,
            RenderModule,
            RenderPassContext,
        },
    },
    torus_scene::{components::LineMesh, scene::Scene},
};

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LineModelUniform {
    model: glam::Mat4,
}

// LineRenderResource
// ------------------

#[derive(Debug)]
struct LineRenderResource {
    vertex_buffer: gpu::Buffer<ColorVertex>,
    model: gpu::UniformBinding<LineModelUniform>,
}

impl LineRenderResource {

    #[profiler::function]
    fn new(mesh: &LineMesh, transform: &Transform, layout: &wgpu::BindGroupLayout, context: &gpu::Context) -> Self {
        Self {
            vertex_buffer: gpu::Buffer::new(context, Some("Line Vertex Buffer"), &mesh.vertices, wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST),
            model: gpu::UniformBinding::new(context, "Line Model Uniform", layout, LineModelUniform { model: transform.as_mat() }),
        }
    }

    /// Uploads the current vertices and model matrix, the buffer grows when the mesh does.
    #[profiler::function]
    fn update(&mut self, mesh: &LineMesh, transform: &Transform, context: &gpu::Context) {
        self.vertex_buffer.queue_update(context, &mesh.vertices);
        self.model.write(context, LineModelUniform { model: transform.as_mat() });
    }
}

// LineRenderModule
// -----------------

#[derive(Debug)]
pub struct LineRenderModule {
    pipeline: wgpu::RenderPipeline,
    model_layout: wgpu::BindGroupLayout,
    render_resources: HashMap<Entity, LineRenderResource>,
}

impl LineRenderModule {

    #[profiler::function]
    pub fn new(context: &RenderContext) -> Self {

        // ⬇ load and compile wgsl shader code
        let shader = context.gpu.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Line Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!("_shader.wgsl"))),
        });

        let model_layout = gpu::UniformBinding::<LineModelUniform>::layout(
            &context.gpu.device,
            "Line Model Bind Group Layout",
            wgpu::ShaderStages::VERTEX,
        );

        // ⬇ define layout of buffers for out render pipeline
        let pipeline_layout = context.gpu.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Line Render Pipeline Layout"),
            bind_group_layouts: &[&context.camera.bind_group_layout, &model_layout],
            push_constant_ranges: &[],
        });

        // ⬇ Create render pipeline (think more flexible OpenGL program)
        let pipeline = context.gpu.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Line Render Pipeline"),
            layout: Some(&pipeline_layout),
            // ⬇ Vertex shader -> define an entry point in our shader
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[ColorVertex::vertex_layout()], // <- List of configurations where each item is a description of one vertex buffer (vertex puller configuration)
            },
            // ⬇ Fragment shader -> define an entry point in our shader
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                // ⬇ configure expected outputs from fragment shader
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.format,                        // <- format of the renderer output texture
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING), // <- how to bled colors (with alpha) previous frame
                    write_mask: wgpu::ColorWrites::ALL,            // <- which color component will be overridden by FS?
                })],
            }),
            // ⬇ How to interpret vertices in Vertex buffer and build primitives from them?
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList, // <- pairs of vertices are individual lines
                strip_index_format: None,                    // <- format of indices in index buffer when drawing indexed topology
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,                             // <- lines have no faces
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },

            // use depth buffer for depth testing
            depth_stencil: Some(gpu::DepthStencilTexture::stencil()),

            // ⬇ must match sample count of the pass attachments
            multisample: context.multisample_state(),
            multiview: None,
        });

        Self {
            pipeline,
            model_layout,
            render_resources: HashMap::new()
        }
    }

}

impl RenderModule<Scene> for LineRenderModule {

    #[profiler::function]
    fn prepare(&mut self, scene: &Scene, context: &RenderContext) {
        let mut alive = HashSet::new();

        // For each line entity in scene world, update render resources
        for (entity, (mesh, transform)) in scene.world.query::<(&LineMesh, &Transform)>().iter() {
            alive.insert(entity);
            match self.render_resources.entry(entity) {
                Entry::Occupied(mut oe) => {
                    oe.get_mut().update(mesh, transform, &context.gpu);
                },
                Entry::Vacant(ve) => {
                    // inserting new line entity data
                    ve.insert(LineRenderResource::new(mesh, transform, &self.model_layout, &context.gpu));
                },
            }
        }

        self.render_resources.retain(|entity, _| alive.contains(entity));
    }

    #[profiler::function]
    fn render<'pass, 'a: 'pass>(
        &'a self,
        context: &'a RenderContext,
        render_pass_context: &mut RenderPassContext<'pass>,
    ) {
        render_pass_context.render_pass.set_pipeline(&self.pipeline);
        render_pass_context.render_pass.set_bind_group(0, context.camera.bind_group(), &[]);

        for LineRenderResource { vertex_buffer, model } in self.render_resources.values() {
            profiler::scope!("Draw Line entity");
            render_pass_context.render_pass.set_bind_group(1, &model.bind_group, &[]);
            render_pass_context.render_pass.set_vertex_buffer(0, vertex_buffer.buffer.slice(..));
            render_pass_context.render_pass.draw(0..vertex_buffer.size as u32, 0..1);
        }
    }

}
