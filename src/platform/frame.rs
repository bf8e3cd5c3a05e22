//! Animation frame scheduling
//!
//! At most one frame callback may be outstanding. Every re-arm cancels the
//! previous request first, so pause/resume spam never doubles the loop speed.

/// Opaque id returned by the host for a pending request
pub type FrameHandle = i32;

/// Something that can schedule one frame callback (requestAnimationFrame)
pub trait FrameHost {
    /// Schedule the next callback; `None` if the host refused
    fn request_frame(&mut self) -> Option<FrameHandle>;

    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Tracks the single pending frame request
#[derive(Debug, Default)]
pub struct FrameLoop {
    pending: Option<FrameHandle>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is pending, then request exactly one new callback
    pub fn arm<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        self.halt(host);
        self.pending = host.request_frame();
        if self.pending.is_none() {
            log::warn!("Frame request refused by host");
        }
    }

    pub fn halt<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
    }

    /// The pending callback is running now and no longer cancellable
    pub fn on_frame(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Default)]
    struct FakeHost {
        next: FrameHandle,
        outstanding: HashSet<FrameHandle>,
    }

    impl FrameHost for FakeHost {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            self.next += 1;
            self.outstanding.insert(self.next);
            Some(self.next)
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.outstanding.remove(&handle);
        }
    }

    #[test]
    fn test_repeated_arm_keeps_one_callback() {
        let mut host = FakeHost::default();
        let mut frames = FrameLoop::new();
        for _ in 0..5 {
            frames.arm(&mut host);
        }
        assert_eq!(host.outstanding.len(), 1);
        assert!(frames.is_pending());
    }

    #[test]
    fn test_halt_cancels_pending() {
        let mut host = FakeHost::default();
        let mut frames = FrameLoop::new();
        frames.arm(&mut host);
        frames.halt(&mut host);
        assert!(host.outstanding.is_empty());
        assert!(!frames.is_pending());
        // Halting twice is harmless
        frames.halt(&mut host);
    }

    #[test]
    fn test_on_frame_forgets_consumed_handle() {
        let mut host = FakeHost::default();
        let mut frames = FrameLoop::new();
        frames.arm(&mut host);
        // Host fires the callback
        host.outstanding.clear();
        frames.on_frame();
        frames.arm(&mut host);
        assert_eq!(host.outstanding.len(), 1);
    }
}
