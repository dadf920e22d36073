
use slotmap::{SlotMap, new_key_type};

use crate::debug;

mod surface;
pub use surface::*;

mod frames;
pub use frames::*;

mod layout;
pub use layout::*;

mod compositor;
pub use compositor::*;

new_key_type! { pub struct SurfaceID; }
new_key_type! { pub struct OutputID; }
new_key_type! { pub struct ListenerID; }

#[derive(Debug)]
struct OutputRecord {
    label: &'static str,
}

/// Environment scenes are mounted into.
///  - display surfaces which hold child outputs
///  - window resize subscriptions
///  - display refresh scheduler
#[derive(Debug, Default)]
pub struct Host {
    surfaces:  SlotMap<SurfaceID, Surface>,
    outputs:   SlotMap<OutputID, OutputRecord>,
    listeners: SlotMap<ListenerID, ()>,
    frames:    FrameScheduler,
}

// Surfaces
impl Host {
    pub fn add_surface(&mut self, rect: Rect) -> SurfaceID {
        self.surfaces.insert(Surface::new(rect))
    }

    pub fn remove_surface(&mut self, id: SurfaceID) -> Option<Surface> {
        self.surfaces.remove(id)
    }

    pub fn surface(&self, id: SurfaceID) -> Option<&Surface> {
        self.surfaces.get(id)
    }

    pub fn surface_mut(&mut self, id: SurfaceID) -> Option<&mut Surface> {
        self.surfaces.get_mut(id)
    }

    pub fn surfaces(&self) -> impl Iterator<Item = (SurfaceID, &Surface)> {
        self.surfaces.iter()
    }
}

// Outputs
impl Host {
    pub fn create_output(&mut self, label: &'static str) -> OutputID {
        let id = self.outputs.insert(OutputRecord { label });
        debug!("Output '{}' created: {:?}", label, id);
        id
    }

    /// Releases the output record, the output is also detached from any surface still holding it.
    pub fn release_output(&mut self, id: OutputID) -> bool {
        let Some(record) = self.outputs.remove(id) else {
            return false;
        };
        for surface in self.surfaces.values_mut() {
            surface.remove_child(id);
        }
        debug!("Output '{}' released: {:?}", record.label, id);
        true
    }

    pub fn has_output(&self, id: OutputID) -> bool {
        self.outputs.contains_key(id)
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }
}

// Resize listeners
impl Host {
    pub fn add_resize_listener(&mut self) -> ListenerID {
        self.listeners.insert(())
    }

    pub fn remove_resize_listener(&mut self, id: ListenerID) -> bool {
        self.listeners.remove(id).is_some()
    }

    pub fn has_resize_listener(&self, id: ListenerID) -> bool {
        self.listeners.contains_key(id)
    }

    /// Snapshot of current listeners, listeners may be added or removed while notifying them.
    pub fn resize_listeners(&self) -> Vec<ListenerID> {
        self.listeners.keys().collect()
    }
}

// Frames
impl Host {
    pub fn frames(&self) -> &FrameScheduler {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut FrameScheduler {
        &mut self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_surface_key_is_not_reused() {
        let mut host = Host::default();
        let old = host.add_surface(Rect::new(0, 0, 10, 10));
        host.remove_surface(old);
        let new = host.add_surface(Rect::new(0, 0, 20, 20));

        assert!(host.surface(old).is_none());
        assert_eq!(host.surface(new).map(|s| s.size().width), Some(20));
    }

    #[test]
    fn surface_children_keep_order() {
        let mut host = Host::default();
        let surface = host.add_surface(Rect::new(0, 0, 10, 10));
        let a = host.create_output("a");
        let b = host.create_output("b");

        let s = host.surface_mut(surface).unwrap();
        s.append_child(a);
        s.append_child(b);
        assert_eq!(s.children(), &[a, b]);

        s.append_child(a);
        assert_eq!(s.children(), &[b, a]);

        assert!(s.remove_child(b));
        assert!(!s.remove_child(b));
        assert_eq!(s.children(), &[a]);
    }

    #[test]
    fn releasing_output_detaches_it() {
        let mut host = Host::default();
        let surface = host.add_surface(Rect::new(0, 0, 10, 10));
        let output = host.create_output("scene");
        host.surface_mut(surface).unwrap().append_child(output);

        assert!(host.release_output(output));
        assert!(!host.release_output(output));
        assert!(!host.has_output(output));
        assert!(host.surface(surface).unwrap().children().is_empty());
    }

    #[test]
    fn resize_listeners_subscribe_and_unsubscribe() {
        let mut host = Host::default();
        let a = host.add_resize_listener();
        let b = host.add_resize_listener();
        assert_eq!(host.resize_listeners().len(), 2);

        assert!(host.remove_resize_listener(a));
        assert!(!host.remove_resize_listener(a));
        assert_eq!(host.resize_listeners(), vec![b]);
        assert!(host.has_resize_listener(b));
    }

    #[test]
    fn rect_contains_excludes_far_edges() {
        let rect = Rect::new(640, 0, 640, 720);
        assert!(rect.contains((640.0, 0.0)));
        assert!(rect.contains((1279.5, 719.5)));
        assert!(!rect.contains((639.9, 10.0)));
        assert!(!rect.contains((1280.0, 10.0)));
        assert!(!rect.contains((700.0, 720.0)));
    }
}
