use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle of a single requested frame callback, can be used to cancel the request.
    pub struct FrameHandle;
}

/// Display refresh scheduler.
///  - each request is served by exactly one following redraw
///  - a served or cancelled handle is stale and never matches a newer request
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: SlotMap<FrameHandle, ()>,
}

impl FrameScheduler {
    pub fn request_frame(&mut self) -> FrameHandle {
        self.pending.insert(())
    }

    /// Returns true when the request was still pending.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        self.pending.remove(handle).is_some()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains_key(handle)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Takes all requests due on this refresh, requests made while serving them wait for the next one.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        self.pending.drain().map(|(handle, _)| handle).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_due_drains_requests() {
        let mut frames = FrameScheduler::default();
        let a = frames.request_frame();
        let b = frames.request_frame();

        let mut due = frames.take_due();
        due.sort();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(due, expected);
        assert!(!frames.has_pending());
        assert!(frames.take_due().is_empty());
    }

    #[test]
    fn cancelled_request_is_not_due() {
        let mut frames = FrameScheduler::default();
        let a = frames.request_frame();
        let b = frames.request_frame();

        assert!(frames.cancel(a));
        assert!(!frames.cancel(a));
        assert_eq!(frames.take_due(), vec![b]);
    }

    #[test]
    fn served_handle_is_stale() {
        let mut frames = FrameScheduler::default();
        let first = frames.request_frame();
        frames.take_due();

        let second = frames.request_frame();
        assert_ne!(first, second);
        assert!(!frames.is_pending(first));
        assert!(frames.is_pending(second));
        assert!(!frames.cancel(first));
        assert_eq!(frames.pending_count(), 1);
    }
}
