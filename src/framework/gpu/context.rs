use winit::window::Window;

use crate::{framework::Result, framework::Error, info};

#[derive(Debug)]
pub struct Context {
    pub surface: wgpu::Surface,
    pub adapter: wgpu::Adapter,
    pub device:  wgpu::Device,
    pub queue:   wgpu::Queue,
}

impl Context {

    #[profiler::function]
    pub async fn new(window: &Window) -> Result<Self> {
        let instance = {
            profiler::scope!("Creating instance");
            wgpu::Instance::new(wgpu::InstanceDescriptor {
                backends: wgpu::Backends::PRIMARY,
                ..Default::default()
            })
        };

        let surface = {
            profiler::scope!("Creating surface");
            unsafe { instance.create_surface(window) }?
        };

        let adapter = profiler::call!(
            instance.request_adapter(
                &wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::default(),
                    force_fallback_adapter: false,
                    compatible_surface: Some(&surface),
                }
            ).await
        ).ok_or(Error::NoAdapter)?;

        let info = adapter.get_info();
        info!("Using adapter '{}' ({:?} backend)", info.name, info.backend);

        let (device, queue) = Self::new_device_queue(&adapter).await?;

        Ok(Self {
            adapter,
            surface,
            device,
            queue,
        })
    }

    #[profiler::function]
    pub async fn new_device_queue(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue)> {
        let device_queue = adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Device"),
                features: wgpu::Features::PUSH_CONSTANTS, // compositor passes fill colors as push constants
                limits: wgpu::Limits {
                    max_push_constant_size: 128,
                    ..Default::default()
                },
            },
            None
        ).await?;
        Ok(device_queue)
    }

}
