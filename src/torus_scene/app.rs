use std::{sync::Arc, time::Instant};

use winit_input_helper::WinitInputHelper;

use crate::framework::{
    gpu,
    host::{FrameHandle, Host, ListenerID, OutputID, SurfaceID},
    renderer::Renderer,
    Application,
    Context,
    Result,
};

use super::{
    define_renderer::define_renderer,
    mount::SceneMount,
    params::SceneParams,
    scene::Scene,
};

/// Application showing the torus scene in the host mount point.
pub struct TorusApp {
    gpu: Arc<gpu::Context>,
    params: SceneParams,
    mount: Option<SceneMount<Renderer<Scene>>>,
}

impl TorusApp {
    pub fn new(context: &Context, params: SceneParams) -> Self {
        Self {
            gpu: context.gpu.clone(),
            params,
            mount: None,
        }
    }
}

impl Application for TorusApp {
    fn mount(&mut self, context: &Context, host: &mut Host, surface: Option<SurfaceID>) -> Result<()> {
        if self.mount.is_some() {
            return Ok(());
        }
        let gpu = self.gpu.clone();
        let scale_factor = context.window.scale_factor();
        let params = &self.params;
        self.mount = SceneMount::open(host, surface, params, |size| {
            define_renderer(gpu, size, scale_factor, params)
        })?;
        Ok(())
    }

    fn unmount(&mut self, host: &mut Host) {
        if let Some(mount) = self.mount.take() {
            mount.close(host);
        }
    }

    fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    fn input(&mut self, host: &Host, input: &WinitInputHelper) {
        if let Some(mount) = self.mount.as_mut() {
            mount.input(host, input);
        }
    }

    fn frame(&mut self, host: &mut Host, handle: FrameHandle, input: &WinitInputHelper, time: Instant) {
        if let Some(mount) = self.mount.as_mut() {
            mount.frame(host, handle, input, time);
        }
    }

    fn resize(&mut self, host: &mut Host, listener: ListenerID, scale_factor: f64) {
        if let Some(mount) = self.mount.as_mut().filter(|mount| mount.resize_listener() == listener) {
            mount.handle_resize(host, scale_factor);
        }
    }

    fn output_view(&self, output: OutputID) -> Option<&wgpu::TextureView> {
        self.mount.as_ref()
            .filter(|mount| mount.output_id() == output)
            .map(|mount| mount.output().output_view())
    }
}
