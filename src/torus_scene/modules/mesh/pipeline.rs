use std::borrow::Cow;

use crate::{
    framework::{
        gpu::{self, vertices::{MeshVertex, Vertex}},
        renderer::RenderContext,
    },
    torus_scene::components::Side,
};

/// Render pipeline of lit triangle meshes, one variant per material side.
#[derive(Debug)]
pub struct MeshPipeline {
    pub side: Side,
    pub pipeline: wgpu::RenderPipeline,
}

impl MeshPipeline {

    #[profiler::function]
    pub fn new(
        context: &RenderContext,
        shader: &wgpu::ShaderModule,
        lights_layout: &wgpu::BindGroupLayout,
        model_layout: &wgpu::BindGroupLayout,
        side: Side,
    ) -> Self {
        let label = match side {
            Side::Front => "Mesh Front Side Pipeline",
            Side::Double => "Mesh Double Side Pipeline",
        };

        let pipeline = context.gpu.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),

            // Specify layout of buffers used by this pipeline
            layout: Some(
                &context.gpu.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some(label),
                    // camera, lights and the drawn model
                    bind_group_layouts: &[
                        &context.camera.bind_group_layout,
                        lights_layout,
                        model_layout,
                    ],
                    push_constant_ranges: &[],
                })
            ),

            // Describe vertex stage
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: "vs_main",
                buffers: &[MeshVertex::vertex_layout()],
            },

            // Describe fragment stage
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: "fs_main",
                targets: &[
                    Some(wgpu::ColorTargetState {
                        format: context.format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })
                ],
            }),

            primitive: wgpu::PrimitiveState {
                topology:           wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face:         wgpu::FrontFace::Ccw, // Counter clockwise vertices are front-facing
                cull_mode:          match side {
                    Side::Front => Some(wgpu::Face::Back),
                    Side::Double => None,
                },
                unclipped_depth:    false,
                polygon_mode:       wgpu::PolygonMode::Fill,
                conservative:       false,
            },

            // use depth buffer for depth testing
            depth_stencil: Some(gpu::DepthStencilTexture::stencil()),

            multisample: context.multisample_state(),
            multiview: None,
        });

        Self { side, pipeline }
    }

    pub fn load_shader(context: &RenderContext) -> wgpu::ShaderModule {
        context.gpu.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!("_shader.wgsl"))),
        })
    }
}
