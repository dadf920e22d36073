use winit::dpi::PhysicalSize;

#[derive(Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl Texture {
    /// Creates a 2D texture of `size` which can be rendered into.
    ///  - zero sized dimensions are bumped to one pixel, wgpu does not allow empty textures
    #[profiler::function]
    pub fn render_target(
        label: &str,
        device: &wgpu::Device,
        size: &PhysicalSize<u32>,
        format: wgpu::TextureFormat,
        sample_count: u32,
        usage: wgpu::TextureUsages,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | usage,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// A construction of depth buffer texture according to: https://sotrh.github.io/learn-wgpu/beginner/tutorial8-depth/#a-pixels-depth
#[derive(Debug)]
pub struct DepthStencilTexture {
    texture: Texture,
}

impl DepthStencilTexture {
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    pub fn new(label: &str, device: &wgpu::Device, size: &PhysicalSize<u32>, sample_count: u32) -> Self {
        Self {
            texture: Texture::render_target(
                label,
                device,
                size,
                Self::DEPTH_FORMAT,
                sample_count,
                wgpu::TextureUsages::empty(),
            ),
        }
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn stencil() -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format: Self::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }
}
