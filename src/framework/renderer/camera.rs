use crate::framework::{self, gpu};

/// Camera data as seen by shaders, bound at group 0 of every scene pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_projection: glam::Mat4,
    pub position: glam::Vec4,
}

impl From<&framework::camera::Camera> for CameraUniform {
    fn from(camera: &framework::camera::Camera) -> Self {
        Self {
            view_projection: camera.view_projection_matrix(),
            position: camera.position.extend(1.0),
        }
    }
}

#[derive(Debug)]
pub struct Camera {
    pub camera: framework::camera::Camera,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub uniform: gpu::UniformBinding<CameraUniform>,
}

impl Camera {
    #[profiler::function]
    pub fn new(gpu: &gpu::Context) -> Self {
        let camera = framework::camera::Camera::default();
        let bind_group_layout = gpu::UniformBinding::<CameraUniform>::layout(
            &gpu.device,
            "Camera Bind Group Layout",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let uniform = gpu::UniformBinding::new(
            gpu,
            "Camera Uniform",
            &bind_group_layout,
            CameraUniform::from(&camera),
        );
        Self { camera, bind_group_layout, uniform }
    }

    #[profiler::function]
    pub fn update(&mut self, gpu: &gpu::Context, camera: &framework::camera::Camera) {
        self.camera = *camera;
        self.uniform.write(gpu, CameraUniform::from(camera));
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.uniform.bind_group
    }
}
