use std::{borrow::Cow, sync::Arc};

use winit::dpi::PhysicalSize;

use crate::{
    debug,
    framework::{gpu, math::Color},
};

use super::Rect;

/// A solid colored region of the window.
#[derive(Debug, Clone, Copy)]
pub struct Fill {
    pub rect: Rect,
    pub color: Color,
}

/// An output texture drawn stretched over a region of the window.
#[derive(Debug)]
pub struct Layer<'a> {
    pub rect: Rect,
    pub view: &'a wgpu::TextureView,
}

/// Owns the window swap chain and draws the page into it.
#[derive(Debug)]
pub struct Compositor {
    gpu: Arc<gpu::Context>,
    config: wgpu::SurfaceConfiguration,
    fill_pipeline: wgpu::RenderPipeline,
    blit_pipeline: wgpu::RenderPipeline,
    layer_bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl Compositor {
    #[profiler::function]
    pub fn new(gpu: Arc<gpu::Context>, size: PhysicalSize<u32>, vsync: bool) -> Self {
        let capabilities = gpu.surface.get_capabilities(&gpu.adapter);

        // prefer sRGB surface so colors written in linear space are encoded on store
        let format = capabilities.formats.iter()
            .copied()
            .find(|format| format.describe().srgb)
            .or_else(|| capabilities.formats.first().copied())
            .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb);

        let present_mode = if !vsync && capabilities.present_modes.contains(&wgpu::PresentMode::Immediate) {
            wgpu::PresentMode::Immediate
        } else {
            wgpu::PresentMode::Fifo // VSynch essentially - capping renders on display frame rate
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: capabilities.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        gpu.surface.configure(&gpu.device, &config);
        debug!("Swap chain configured: {:?} {:?}", config.format, config.present_mode);

        let shader = gpu.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Compositor Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!("_compositor.wgsl"))),
        });

        let layer_bind_group_layout = gpu.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Compositor Layer Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let fill_pipeline = Self::create_pipeline(
            &gpu.device,
            &shader,
            format,
            "Compositor Fill Pipeline",
            "fs_fill",
            &[],
            &[wgpu::PushConstantRange {
                stages: wgpu::ShaderStages::FRAGMENT,
                range: 0..std::mem::size_of::<[f32; 4]>() as u32,
            }],
        );

        let blit_pipeline = Self::create_pipeline(
            &gpu.device,
            &shader,
            format,
            "Compositor Blit Pipeline",
            "fs_blit",
            &[&layer_bind_group_layout],
            &[],
        );

        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Compositor Layer Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            gpu,
            config,
            fill_pipeline,
            blit_pipeline,
            layer_bind_group_layout,
            sampler,
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
        label: &'static str,
        fragment_entry_point: &'static str,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        push_constant_ranges: &[wgpu::PushConstantRange],
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(label),
                bind_group_layouts,
                push_constant_ranges,
            })),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: "vs_main",
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: fragment_entry_point,
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        })
    }
}

impl Compositor {
    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    /// Resizes the swap chain, ignored for a minimized window.
    #[profiler::function]
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.reconfigure();
    }

    /// Re-creates the swap chain after it was lost or became outdated.
    pub fn reconfigure(&mut self) {
        self.gpu.surface.configure(&self.gpu.device, &self.config);
    }

    /// Color components in the encoding expected by the swap chain format.
    fn surface_color(&self, color: Color) -> [f32; 4] {
        if self.config.format.describe().srgb {
            color.to_linear().extend(1.0).to_array()
        } else {
            [color.r, color.g, color.b, 1.0]
        }
    }

    /// Rect clipped to the swap chain, None when nothing of it is visible.
    fn viewport(&self, rect: Rect) -> Option<Rect> {
        let x = rect.x.min(self.config.width);
        let y = rect.y.min(self.config.height);
        let clipped = Rect::new(
            x,
            y,
            rect.width.min(self.config.width - x),
            rect.height.min(self.config.height - y),
        );
        (!clipped.is_empty()).then_some(clipped)
    }

    /// Draws one frame of the page: background, then fills, then layers in given order.
    #[profiler::function]
    pub fn present(&self, background: Color, fills: &[Fill], layers: &[Layer]) -> Result<(), wgpu::SurfaceError> {
        let frame = profiler::call!(self.gpu.surface.get_current_texture())?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let layer_bind_groups: Vec<(Rect, wgpu::BindGroup)> = layers.iter()
            .filter_map(|layer| self.viewport(layer.rect).map(|rect| (rect, layer)))
            .map(|(rect, layer)| {
                let bind_group = self.gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Compositor Layer Bind Group"),
                    layout: &self.layer_bind_group_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(layer.view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(&self.sampler),
                        },
                    ],
                });
                (rect, bind_group)
            })
            .collect();

        let fills: Vec<(Rect, [f32; 4])> = fills.iter()
            .filter_map(|fill| self.viewport(fill.rect).map(|rect| (rect, self.surface_color(fill.color))))
            .collect();

        let [r, g, b, a] = self.surface_color(background);
        let clear_color = wgpu::Color { r: r as f64, g: g as f64, b: b as f64, a: a as f64 };

        let mut encoder = self.gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Compositor Encoder")
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Compositor Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });

            pass.set_pipeline(&self.fill_pipeline);
            for (rect, color) in fills.iter() {
                set_viewport(&mut pass, *rect);
                pass.set_push_constants(wgpu::ShaderStages::FRAGMENT, 0, bytemuck::cast_slice(color));
                pass.draw(0..3, 0..1);
            }

            pass.set_pipeline(&self.blit_pipeline);
            for (rect, bind_group) in layer_bind_groups.iter() {
                set_viewport(&mut pass, *rect);
                pass.set_bind_group(0, bind_group, &[]);
                pass.draw(0..3, 0..1);
            }
        }

        profiler::call!(self.gpu.queue.submit(Some(encoder.finish())));
        profiler::call!(frame.present());
        Ok(())
    }
}

fn set_viewport(pass: &mut wgpu::RenderPass, rect: Rect) {
    pass.set_viewport(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
        0.0,
        1.0,
    );
}
