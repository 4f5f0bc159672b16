//! Redraw gating for the editor loop.
//!
//! Frames are keyed by the grid snapshot fingerprint. A live drag redraws
//! every tick because the floating image follows the pointer; an idle editor
//! redraws only when the fingerprint changes, plus a slow refresh.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    idle_redraw_ms: u64,
    last_frame_ms: u64,
    /// `None` until the first frame, and after [`RenderThrottle::invalidate`].
    last_fingerprint: Option<u64>,
}

impl RenderThrottle {
    pub fn new(idle_redraw_ms: u64) -> Self {
        Self {
            idle_redraw_ms,
            last_frame_ms: 0,
            last_fingerprint: None,
        }
    }

    /// Whether to draw a frame at `now_ms`.
    ///
    /// `is_static` is false while a drag is in flight.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let changed = self.last_fingerprint != Some(fingerprint);
        let stale = now_ms.saturating_sub(self.last_frame_ms) >= self.idle_redraw_ms;
        if !(changed || stale || !is_static) {
            return false;
        }
        self.last_frame_ms = now_ms;
        self.last_fingerprint = Some(fingerprint);
        true
    }

    /// Force the next call to render (terminal resize).
    pub fn invalidate(&mut self) {
        self.last_fingerprint = None;
    }
}
