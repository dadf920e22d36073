use std::time::Instant;

use winit::dpi::PhysicalSize;
use winit_input_helper::WinitInputHelper;

use crate::{
    debug,
    framework::{
        clock::FrameClock,
        host::{FrameHandle, Host, ListenerID, OutputID, Surface, SurfaceID},
        renderer::SceneOutput,
        updater::{ResizeContext, UpdateContext, Updater},
        Result,
    },
};

use super::{
    define_updater::define_updater,
    init_scene::init_scene,
    params::SceneParams,
    scene::Scene,
};

/// The torus scene mounted into a host surface.
///
/// Owns the scene, its controls and the output it renders into. Everything it registers in the
/// host (the child output of the surface, the resize listener, the pending frame request) is
/// released again by `close`.
pub struct SceneMount<O: SceneOutput<Scene>> {
    surface: SurfaceID,
    scene: Scene,
    updater: Updater<Scene>,
    output: O,
    output_id: OutputID,
    resize_listener: ListenerID,
    frame: Option<FrameHandle>,
    clock: FrameClock,
    /// Left button went down inside the surface and is still held.
    dragging: bool,
}

impl<O: SceneOutput<Scene>> SceneMount<O> {

    /// Builds the scene into `surface`, returns `None` when there is no surface to mount into.
    ///  - `create_output` is called with the surface size before anything is registered in the host
    #[profiler::function]
    pub fn open<F>(host: &mut Host, surface: Option<SurfaceID>, params: &SceneParams, create_output: F) -> Result<Option<Self>>
    where
        F: FnOnce(PhysicalSize<u32>) -> Result<O>,
    {
        let Some(surface) = surface else {
            debug!("No surface to mount the scene into");
            return Ok(None);
        };
        let Some(size) = host.surface(surface).map(Surface::size) else {
            debug!("Surface {:?} is not registered in host", surface);
            return Ok(None);
        };
        if size.width == 0 || size.height == 0 {
            debug!("Surface {:?} has no area, scene not mounted", surface);
            return Ok(None);
        }

        let scene = init_scene(params, size.width as f32 / size.height as f32);
        let updater = define_updater();
        let output = create_output(size)?;

        // register in host
        let output_id = host.create_output("torus scene");
        if let Some(surface) = host.surface_mut(surface) {
            surface.append_child(output_id);
        }
        let resize_listener = host.add_resize_listener();
        let frame = Some(host.frames_mut().request_frame());

        debug!("Scene mounted into {:?} with size {}x{}", surface, size.width, size.height);

        Ok(Some(Self {
            surface,
            scene,
            updater,
            output,
            output_id,
            resize_listener,
            frame,
            clock: FrameClock::new(Instant::now()),
            dragging: false,
        }))
    }

    /// Serves the frame request of this mount, stale handles are ignored.
    ///  - the next frame is requested before the scene is updated and rendered
    #[profiler::function]
    pub fn frame(&mut self, host: &mut Host, handle: FrameHandle, input: &WinitInputHelper, time: Instant) -> bool {
        if self.frame != Some(handle) {
            return false;
        }
        self.frame = Some(host.frames_mut().request_frame());

        let tick = self.clock.advance(time);
        self.updater.update(UpdateContext {
            scene: &mut self.scene,
            input,
            tick,
        });
        self.output.render(&self.scene);
        true
    }

    /// Forwards pointer input to the controls when it belongs to the mounted surface.
    ///  - a drag starts only inside the surface and stays captured until the button is released
    ///  - scrolling zooms only while the cursor is over the surface
    pub fn input(&mut self, host: &Host, input: &WinitInputHelper) {
        let inside = match (host.surface(self.surface), input.mouse()) {
            (Some(surface), Some(cursor)) => surface.rect().contains(cursor),
            _ => false,
        };
        if input.mouse_pressed(0) && inside {
            self.dragging = true;
        } else if !input.mouse_held(0) {
            self.dragging = false;
        }

        // a button held since outside the surface would orbit along with the zoom
        let zooming = inside && input.scroll_diff() != 0.0 && !input.mouse_held(0);
        if !self.dragging && !zooming {
            return;
        }
        self.updater.input(UpdateContext {
            scene: &mut self.scene,
            input,
            tick: self.clock.current_tick(),
        });
    }

    /// Synchronises the camera projection and the output with the current surface size.
    ///  - returns false when the surface is gone or has no area
    #[profiler::function]
    pub fn handle_resize(&mut self, host: &Host, scale_factor: f64) -> bool {
        let Some(size) = host.surface(self.surface).map(Surface::size) else {
            return false;
        };
        if size.width == 0 || size.height == 0 {
            return false;
        }

        self.output.resize(&size, scale_factor);
        self.updater.resize(ResizeContext {
            scene: &mut self.scene,
            size: &size,
            scale_factor,
        });
        true
    }

    /// Releases everything registered in the host, the output is dropped with the mount.
    #[profiler::function]
    pub fn close(mut self, host: &mut Host) {
        if let Some(frame) = self.frame.take() {
            host.frames_mut().cancel(frame);
        }
        host.remove_resize_listener(self.resize_listener);
        if let Some(surface) = host.surface_mut(self.surface) {
            surface.remove_child(self.output_id);
        }
        host.release_output(self.output_id);
        debug!("Scene unmounted from {:?}", self.surface);
    }
}

// Getters
impl<O: SceneOutput<Scene>> SceneMount<O> {
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_id(&self) -> OutputID {
        self.output_id
    }

    pub fn resize_listener(&self) -> ListenerID {
        self.resize_listener
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use crate::framework::{camera::CameraRig, host::Rect, math::Transform, Error};
    use crate::torus_scene::components::Name;
    use winit::{
        dpi::PhysicalPosition,
        event::{DeviceId, ElementState, ModifiersState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent},
    };

    use super::*;

    #[derive(Debug)]
    struct FakeOutput {
        size: PhysicalSize<u32>,
        scale_factor: f64,
        renders: usize,
    }

    impl SceneOutput<Scene> for FakeOutput {
        fn size(&self) -> PhysicalSize<u32> {
            self.size
        }

        fn resize(&mut self, size: &PhysicalSize<u32>, scale_factor: f64) {
            self.size = *size;
            self.scale_factor = scale_factor;
        }

        fn render(&mut self, _: &Scene) {
            self.renders += 1;
        }
    }

    fn host_with_surface(width: u32, height: u32) -> (Host, SurfaceID) {
        let mut host = Host::default();
        let surface = host.add_surface(Rect::new(640, 0, width, height));
        (host, surface)
    }

    fn open(host: &mut Host, surface: Option<SurfaceID>) -> Option<SceneMount<FakeOutput>> {
        SceneMount::open(host, surface, &SceneParams::default(), |size| {
            Ok(FakeOutput { size, scale_factor: 1.0, renders: 0 })
        }).unwrap()
    }

    fn aspect(mount: &SceneMount<FakeOutput>) -> f32 {
        mount.scene().camera.camera().aspect_ratio
    }

    #[allow(deprecated)]
    fn cursor_moved(x: f64, y: f64) -> WindowEvent<'static> {
        WindowEvent::CursorMoved {
            device_id: unsafe { DeviceId::dummy() },
            position: PhysicalPosition::new(x, y),
            modifiers: ModifiersState::empty(),
        }
    }

    #[allow(deprecated)]
    fn left_button(state: ElementState) -> WindowEvent<'static> {
        WindowEvent::MouseInput {
            device_id: unsafe { DeviceId::dummy() },
            state,
            button: MouseButton::Left,
            modifiers: ModifiersState::empty(),
        }
    }

    #[allow(deprecated)]
    fn wheel(lines: f32) -> WindowEvent<'static> {
        WindowEvent::MouseWheel {
            device_id: unsafe { DeviceId::dummy() },
            delta: MouseScrollDelta::LineDelta(0.0, lines),
            phase: TouchPhase::Moved,
            modifiers: ModifiersState::empty(),
        }
    }

    /// Feeds a left button drag through the mount, one input step per event group.
    fn drag(host: &Host, mount: &mut SceneMount<FakeOutput>, from: (f64, f64), to: (f64, f64)) {
        let mut input = WinitInputHelper::new();
        let steps = [
            vec![cursor_moved(from.0, from.1), left_button(ElementState::Pressed)],
            vec![cursor_moved(to.0, to.1)],
            vec![left_button(ElementState::Released)],
        ];
        for events in steps {
            input.step_with_window_events(&events);
            mount.input(host, &input);
        }
    }

    fn scroll_at(host: &Host, mount: &mut SceneMount<FakeOutput>, at: (f64, f64)) {
        let mut input = WinitInputHelper::new();
        input.step_with_window_events(&[cursor_moved(at.0, at.1), wheel(1.0)]);
        mount.input(host, &input);
    }

    fn serve_frames(host: &mut Host, mount: &mut SceneMount<FakeOutput>, input: &WinitInputHelper) {
        for handle in host.frames_mut().take_due() {
            mount.frame(host, handle, input, Instant::now());
        }
    }

    #[test]
    fn camera_aspect_follows_surface() {
        let (mut host, surface) = host_with_surface(800, 600);
        let mount = open(&mut host, Some(surface)).unwrap();

        assert_eq!(aspect(&mount), 800.0 / 600.0);
        assert_eq!(mount.output().size(), PhysicalSize::new(800, 600));
        assert_eq!(host.surface(surface).unwrap().children(), &[mount.output_id()]);
        assert!(host.has_resize_listener(mount.resize_listener()));
        assert_eq!(host.frames().pending_count(), 1);
    }

    #[test]
    fn resize_updates_aspect_and_output() {
        let (mut host, surface) = host_with_surface(800, 600);
        let mut mount = open(&mut host, Some(surface)).unwrap();

        host.surface_mut(surface).unwrap().set_rect(Rect::new(500, 0, 1000, 500));
        assert!(mount.handle_resize(&host, 2.0));

        assert_eq!(aspect(&mount), 2.0);
        assert_eq!(mount.output().size(), PhysicalSize::new(1000, 500));
        assert_eq!(mount.output().scale_factor, 2.0);
    }

    #[test]
    fn resize_of_collapsed_surface_is_ignored() {
        let (mut host, surface) = host_with_surface(800, 600);
        let mut mount = open(&mut host, Some(surface)).unwrap();

        host.surface_mut(surface).unwrap().set_rect(Rect::new(0, 0, 0, 600));
        assert!(!mount.handle_resize(&host, 1.0));

        host.remove_surface(surface);
        assert!(!mount.handle_resize(&host, 1.0));

        assert_eq!(aspect(&mount), 800.0 / 600.0);
        assert_eq!(mount.output().size(), PhysicalSize::new(800, 600));
    }

    #[test]
    fn scene_holds_five_entities_with_floor_below_torus() {
        let (mut host, surface) = host_with_surface(800, 600);
        let mount = open(&mut host, Some(surface)).unwrap();
        let world = &mount.scene().world;
        assert_eq!(world.len(), 5);

        let y_of = |name: &str| world.query::<(&Name, &Transform)>()
            .iter()
            .find(|(_, (n, _))| n.0 == name)
            .map(|(_, (_, t))| t.position.y);
        assert!(y_of("floor").unwrap() < y_of("torus").unwrap());
    }

    #[test]
    fn close_releases_host_registrations() {
        let (mut host, surface) = host_with_surface(800, 600);
        let mount = open(&mut host, Some(surface)).unwrap();
        let output = mount.output_id();

        mount.close(&mut host);

        assert!(host.surface(surface).unwrap().children().is_empty());
        assert!(host.resize_listeners().is_empty());
        assert!(!host.frames().has_pending());
        assert!(!host.has_output(output));
    }

    #[test]
    fn missing_surface_mounts_nothing() {
        let (mut host, surface) = host_with_surface(800, 600);
        assert!(open(&mut host, None).is_none());

        let collapsed = host.add_surface(Rect::new(0, 0, 800, 0));
        assert!(open(&mut host, Some(collapsed)).is_none());

        host.remove_surface(surface);
        assert!(open(&mut host, Some(surface)).is_none());

        assert_eq!(host.output_count(), 0);
        assert!(host.resize_listeners().is_empty());
        assert!(!host.frames().has_pending());
    }

    #[test]
    fn failed_output_leaves_host_untouched() {
        let (mut host, surface) = host_with_surface(800, 600);
        let result = SceneMount::<FakeOutput>::open(&mut host, Some(surface), &SceneParams::default(), |_| {
            Err(Error::NoAdapter)
        });

        assert!(matches!(result, Err(Error::NoAdapter)));
        assert_eq!(host.output_count(), 0);
        assert!(host.surface(surface).unwrap().children().is_empty());
        assert!(host.resize_listeners().is_empty());
        assert!(!host.frames().has_pending());
    }

    #[test]
    fn frame_requests_next_frame_and_renders() {
        let (mut host, surface) = host_with_surface(800, 600);
        let mut mount = open(&mut host, Some(surface)).unwrap();
        let input = WinitInputHelper::new();

        for _ in 0..3 {
            serve_frames(&mut host, &mut mount, &input);
        }

        assert_eq!(mount.output().renders, 3);
        assert_eq!(host.frames().pending_count(), 1);
        assert!(host.frames().is_pending(mount.pending_frame().unwrap()));
    }

    #[test]
    fn stale_frame_handle_is_ignored() {
        let (mut host, surface) = host_with_surface(800, 600);
        let mut mount = open(&mut host, Some(surface)).unwrap();
        let input = WinitInputHelper::new();

        let stale = host.frames_mut().take_due()[0];
        assert!(mount.frame(&mut host, stale, &input, Instant::now()));
        assert!(!mount.frame(&mut host, stale, &input, Instant::now()));

        assert_eq!(mount.output().renders, 1);
        assert_eq!(host.frames().pending_count(), 1);
    }

    #[test]
    fn remount_leaves_single_render_loop() {
        let (mut host, surface) = host_with_surface(800, 600);
        let input = WinitInputHelper::new();

        let mut first = open(&mut host, Some(surface)).unwrap();
        serve_frames(&mut host, &mut first, &input);
        first.close(&mut host);

        let mut second = open(&mut host, Some(surface)).unwrap();
        assert_eq!(host.frames().pending_count(), 1);
        assert_eq!(host.resize_listeners(), vec![second.resize_listener()]);
        assert_eq!(host.surface(surface).unwrap().children(), &[second.output_id()]);

        serve_frames(&mut host, &mut second, &input);
        assert_eq!(second.output().renders, 1);
        assert_eq!(host.frames().pending_count(), 1);
    }

    #[test]
    fn frames_advance_auto_rotation() {
        let (mut host, surface) = host_with_surface(800, 600);
        let mut mount = open(&mut host, Some(surface)).unwrap();
        let input = WinitInputHelper::new();
        let yaw = mount.scene().camera.yaw_degrees();

        let handle = host.frames_mut().take_due()[0];
        mount.frame(&mut host, handle, &input, Instant::now() + std::time::Duration::from_millis(100));

        assert!(mount.scene().camera.yaw_degrees() < yaw);
    }

    #[test]
    fn drag_outside_surface_does_not_orbit() {
        let (mut host, surface) = host_with_surface(800, 600);
        let mut mount = open(&mut host, Some(surface)).unwrap();
        let yaw = mount.scene().camera.yaw_degrees();

        drag(&host, &mut mount, (100.0, 300.0), (300.0, 300.0));
        drag(&host, &mut mount, (100.0, 300.0), (900.0, 300.0));

        assert_eq!(mount.scene().camera.yaw_degrees(), yaw);
    }

    #[test]
    fn drag_started_inside_surface_stays_captured() {
        let (mut host, surface) = host_with_surface(800, 600);
        let mut mount = open(&mut host, Some(surface)).unwrap();
        let yaw = mount.scene().camera.yaw_degrees();

        drag(&host, &mut mount, (1000.0, 300.0), (100.0, 300.0));

        assert_ne!(mount.scene().camera.yaw_degrees(), yaw);
    }

    #[test]
    fn scroll_zooms_only_over_surface() {
        let (mut host, surface) = host_with_surface(800, 600);
        let mut mount = open(&mut host, Some(surface)).unwrap();
        let distance = mount.scene().camera.distance();

        scroll_at(&host, &mut mount, (100.0, 300.0));
        assert_eq!(mount.scene().camera.distance(), distance);

        scroll_at(&host, &mut mount, (1000.0, 300.0));
        assert!(mount.scene().camera.distance() < distance);
    }
}
