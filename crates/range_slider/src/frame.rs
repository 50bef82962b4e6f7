//! Single-slot animation frame scheduling.

/// Handle for one requested frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRequest(u64);

impl FrameRequest {
    #[inline]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// At most one frame is ever pending. Requesting again replaces the pending
/// request, so a burst of moves between two frames collapses into one update.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Option<FrameRequest>,
    next_id: u64,
    replaced: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self) -> FrameRequest {
        if self.pending.is_some() {
            self.replaced += 1;
        }
        self.next_id += 1;
        let req = FrameRequest(self.next_id);
        self.pending = Some(req);
        req
    }

    /// Drop the pending request, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Claim the pending request for the current frame.
    pub fn take(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Requests that were superseded before their frame ran.
    #[inline]
    pub fn replaced(&self) -> u64 {
        self.replaced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bursts_collapse_into_the_latest_request() {
        let mut frames = FrameScheduler::new();
        frames.request();
        frames.request();
        let last = frames.request();
        assert_eq!(frames.take(), Some(last));
        assert_eq!(frames.take(), None);
        assert_eq!(frames.replaced(), 2);
    }

    #[test]
    fn cancel_clears_the_slot() {
        let mut frames = FrameScheduler::new();
        assert!(!frames.cancel());
        frames.request();
        assert!(frames.cancel());
        assert!(!frames.is_pending());
        assert_eq!(frames.take(), None);
    }
}
