use std::{sync::Arc, time::Instant};

use winit_input_helper::WinitInputHelper;
use winit::{
    dpi::PhysicalSize,
    event::{Event, VirtualKeyCode},
    platform::run_return::EventLoopExtRunReturn,
    window::{Window, WindowBuilder},
    event_loop::{EventLoop, ControlFlow},
};

use crate::{debug, info, warn, error};

use super::{
    gpu,
    host::{Compositor, Fill, FrameHandle, Host, Layer, ListenerID, OutputID, PageStyle, SplitLayout, SurfaceID},
    Error,
    Result,
};

#[derive(Clone, Debug)]
pub struct RunParams {
    pub window_name: &'static str,
    pub window_width: u32,
    pub window_height: u32,
    /// Share of the window width taken by the left page pane
    pub split: f32,
    pub vsync: bool,
    pub page_style: PageStyle,
}
impl Default for RunParams {
    fn default() -> Self {
        Self {
            window_name: "My App",
            window_width: 1280,
            window_height: 720,
            split: 0.5,
            vsync: !cfg!(feature = "no_vsync"),
            page_style: PageStyle::default(),
        }
    }
}

pub struct Context<'a> {
    pub params: &'a RunParams,
    pub window: &'a Window,
    pub gpu: Arc<gpu::Context>,
}

/// Content which is mounted into a host surface and driven by the host event loop.
pub trait Application {
    /// Mounts the content into `surface`, does nothing when the surface is not available.
    fn mount(&mut self, context: &Context, host: &mut Host, surface: Option<SurfaceID>) -> Result<()>;

    /// Releases everything registered in the host by `mount`, does nothing when not mounted.
    fn unmount(&mut self, host: &mut Host);

    fn is_mounted(&self) -> bool;

    /// Input accumulated since the last event loop iteration, pointer input belongs to the surfaces in `host`.
    fn input(&mut self, host: &Host, input: &WinitInputHelper);

    /// Serves a frame request made through the host frame scheduler.
    fn frame(&mut self, host: &mut Host, handle: FrameHandle, input: &WinitInputHelper, time: Instant);

    /// Window was resized, notification for a resize listener registered in the host.
    fn resize(&mut self, host: &mut Host, listener: ListenerID, scale_factor: f64);

    /// Texture holding the current content of an output created by this application.
    fn output_view(&self, output: OutputID) -> Option<&wgpu::TextureView>;
}

#[profiler::function]
pub async fn run<A, F>(create_app: F, params: RunParams) -> Result<()>
where
    A: Application,
    F: FnOnce(&Context) -> A,
{
    let mut event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(params.window_name)
        .with_inner_size(winit::dpi::LogicalSize::new(params.window_width, params.window_height))
        .build(&event_loop)?;
    let gpu = Arc::new(gpu::Context::new(&window).await?);

    let context = Context {
        params: &params,
        window: &window,
        gpu:    gpu.clone(),
    };

    // page
    let layout = SplitLayout::new(params.split);
    let mut compositor = Compositor::new(gpu.clone(), window.inner_size(), params.vsync);
    let mut host = Host::default();
    let (_, scene_pane) = layout.split(window.inner_size());
    let mount_point = host.add_surface(scene_pane);

    // init application specifics
    let mut app = create_app(&context);
    app.mount(&context, &mut host, Some(mount_point))?;

    // Execution control
    let mut input = WinitInputHelper::new();
    let mut needs_present = true;
    let mut loop_result = Ok(());

    event_loop.run_return(|event, _, control_flow| {
        profiler::scope!("Event incoming");
        *control_flow = ControlFlow::Wait;

        // Serve frame requests and present the page on display refresh
        if let Event::RedrawRequested(_) = event {
            profiler::scope!("Processing redraw request");

            // Request redraw immediately after frames are served, the event loop may not wake up on its own
            if serve_due_frames(&mut app, &mut host, &input, Instant::now()) {
                window.request_redraw();
            }

            let window_size = window.inner_size();
            if window_size.width > 0 && window_size.height > 0 {
                let (page_pane, _) = layout.split(compositor.size());
                let fills = [Fill { rect: page_pane, color: params.page_style.sidebar }];
                let layers: Vec<Layer> = host.surfaces()
                    .flat_map(|(_, surface)| {
                        surface.children().iter().map(move |output| (surface.rect(), *output))
                    })
                    .filter_map(|(rect, output)| app.output_view(output).map(|view| Layer { rect, view }))
                    .collect();

                match compositor.present(params.page_style.background, &fills, &layers) {
                    Ok(()) => needs_present = false,
                    // Reconfigure the surface if lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        debug!("Swap chain lost or outdated, reconfiguring");
                        compositor.reconfigure();
                        needs_present = true;
                    },
                    Err(wgpu::SurfaceError::Timeout) => {
                        warn!("Swap chain texture timed out, frame skipped");
                    },
                    // The system is out of memory, we should probably quit
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        app.unmount(&mut host);
                        loop_result = Err(Error::OutOfMemory);
                        *control_flow = ControlFlow::Exit;
                    },
                }
            }
        }

        // Let input helper process event to somewhat coherent input state and work with that.
        //   (input.update(..) returns true only on Event::MainEventsCleared)
        if !input.update(&event) {
            return;
        }

        if input.close_requested() || input.destroyed() {
            app.unmount(&mut host);
            *control_flow = ControlFlow::Exit;
            return;
        }

        let resized = if let Some(size) = input.window_resized() {
            Some((size, input.scale_factor().unwrap_or(window.scale_factor())))
        } else {
            input.scale_factor_changed().map(|scale_factor| (window.inner_size(), scale_factor))
        };
        if let Some((size, scale_factor)) = resized {
            profiler::scope!("Processing resize");
            resize_page(&mut compositor, &mut host, &layout, mount_point, size);
            for listener in host.resize_listeners() {
                app.resize(&mut host, listener, scale_factor);
            }
            needs_present = true;
        }

        if input.key_pressed(VirtualKeyCode::M) {
            if app.is_mounted() {
                app.unmount(&mut host);
                info!("Scene unmounted");
            } else if let Err(err) = app.mount(&context, &mut host, Some(mount_point)) {
                error!("Failed to mount scene: {}", err);
                loop_result = Err(err);
                *control_flow = ControlFlow::Exit;
                return;
            } else {
                info!("Scene mounted");
            }
            needs_present = true;
        }

        app.input(&host, &input);

        if needs_present || host.frames().has_pending() {
            window.request_redraw();
        }
    });

    // event loop may be left without close request
    app.unmount(&mut host);

    loop_result
}

/// Serves frame requests due at this display refresh, returns true while new frames are requested.
fn serve_due_frames<A: Application>(app: &mut A, host: &mut Host, input: &WinitInputHelper, time: Instant) -> bool {
    for handle in host.frames_mut().take_due() {
        app.frame(host, handle, input, time);
    }
    host.frames().has_pending()
}

/// Propagates new window size to the swap chain and the mount point surface.
fn resize_page(
    compositor: &mut Compositor,
    host: &mut Host,
    layout: &SplitLayout,
    mount_point: SurfaceID,
    size: PhysicalSize<u32>,
) {
    compositor.resize(size);
    let (_, scene_pane) = layout.split(size);
    if let Some(surface) = host.surface_mut(mount_point) {
        surface.set_rect(scene_pane);
    }
}
