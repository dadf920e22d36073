
use std::{marker::PhantomData, fmt::Debug};

use wgpu::util::DeviceExt;

use crate::debug;

use super::Context;

/// Typed GPU buffer holding items of type `I`.
#[derive(Debug)]
pub struct Buffer<I: Debug + Copy + Clone + bytemuck::Pod + bytemuck::Zeroable> {
    /// Label of buffer on GPU.
    pub label: Option<&'static str>,
    /// The buffer on GPU.
    pub buffer: wgpu::Buffer,
    /// The number of items in the buffer.
    pub size: usize,
    /// Capacity of the buffer (how many items it can hold).
    pub capacity: usize,
    pub usage: wgpu::BufferUsages,
    _phantom: PhantomData<I>,
}

// Statics (Helpers, Constructors)
impl<I: Debug + Copy + Clone + bytemuck::Pod + bytemuck::Zeroable> Buffer<I> {
    /// Create a new buffer on the GPU.
    #[profiler::function]
    pub fn new(gpu: &Context, label: Option<&'static str>, data: &[I], usage: wgpu::BufferUsages) -> Buffer<I> {
        let size = data.len();
        let buffer = gpu.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor { label, usage, contents: bytemuck::cast_slice(data) }
        );

        Buffer { label, buffer, size, capacity: size, usage, _phantom: PhantomData }
    }
}

// Instance methods
impl<I: Debug + Copy + Clone + bytemuck::Pod + bytemuck::Zeroable> Buffer<I> {

    /// Update the buffer on the GPU using wgpu queue with the given data.
    /// - If the buffer is not large enough, it will be reallocated with the new size.
    /// - Returns true if the buffer was reallocated and thus the old bindings are invalid.
    #[profiler::function]
    pub fn queue_update(&mut self, gpu: &Context, new_data: &[I]) -> bool {
        self.size = new_data.len();
        if new_data.len() > self.capacity {
            profiler::scope!("Updating Buffer with reallocation");
            debug!("Reallocating buffer {:?}: {} -> {}", self.label, self.capacity, new_data.len());
            self.buffer = gpu.device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: self.label,
                    usage: self.usage,
                    contents: bytemuck::cast_slice(new_data),
                }
            );
            self.capacity = new_data.len();
            return true;
        }
        profiler::scope!("Updating Buffer without reallocation");
        gpu.queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(new_data));
        false
    }
}

/// Uniform buffer holding a single value of `U` with a bind group exposing it at binding 0.
#[derive(Debug)]
pub struct UniformBinding<U: Debug + Copy + Clone + bytemuck::Pod + bytemuck::Zeroable> {
    pub buffer: Buffer<U>,
    pub bind_group: wgpu::BindGroup,
}

impl<U: Debug + Copy + Clone + bytemuck::Pod + bytemuck::Zeroable> UniformBinding<U> {
    /// Layout of a bind group with one uniform buffer at binding 0.
    pub fn layout(device: &wgpu::Device, label: &'static str, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }

    #[profiler::function]
    pub fn new(gpu: &Context, label: &'static str, layout: &wgpu::BindGroupLayout, value: U) -> Self {
        let buffer = Buffer::new(
            gpu,
            Some(label),
            &[value],
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );
        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    /// Writes a new value, size of a uniform never changes so the bind group stays valid.
    pub fn write(&mut self, gpu: &Context, value: U) {
        self.buffer.queue_update(gpu, &[value]);
    }
}
