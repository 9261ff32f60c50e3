//! Frame scheduling bookkeeping.
//!
//! Hosts drive engines from a display-frame callback (`requestAnimationFrame`
//! on the web). [`FrameLoop`] owns the "is a callback pending" flag so an engine
//! can never be scheduled twice, and it turns raw millisecond timestamps into
//! clamped step sizes.

/// Tracks whether a frame is pending, whether the loop is suspended, and the
/// timestamp of the last frame actually stepped.
#[derive(Clone, Debug, Default)]
pub struct FrameLoop {
    scheduled: bool,
    suspended: bool,
    last_ms: Option<f64>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a frame. Returns `true` when the caller must schedule a callback now;
    /// `false` when one is already pending or the loop is suspended.
    pub fn request(&mut self) -> bool {
        if self.suspended || self.scheduled {
            return false;
        }
        self.scheduled = true;
        true
    }

    /// Enter a frame callback at `now_ms`. Consumes the pending flag and returns the
    /// step size in seconds, clamped to `[0, max_dt]`, or `None` while suspended.
    ///
    /// The first frame after construction, [`cancel`](Self::cancel),
    /// [`rebase`](Self::rebase) or [`resume`](Self::resume) only records the timestamp
    /// and yields `0.0`. A non-finite timestamp also yields `0.0` and leaves the
    /// baseline alone, so the chain keeps running.
    pub fn begin(&mut self, now_ms: f64, max_dt: f32) -> Option<f32> {
        self.scheduled = false;
        if self.suspended {
            return None;
        }
        if !now_ms.is_finite() {
            log::debug!("ignoring non-finite frame timestamp");
            return Some(0.0);
        }
        let dt = match self.last_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, max_dt),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        Some(dt)
    }

    /// Stop stepping until [`resume`](Self::resume). Pending callbacks become no-ops.
    pub fn suspend(&mut self) {
        if !self.suspended {
            log::debug!("frame loop suspended");
        }
        self.suspended = true;
    }

    /// Leave suspension. The next observed timestamp becomes the new baseline.
    /// Returns `true` when the caller must schedule a callback.
    pub fn resume(&mut self) -> bool {
        if self.suspended {
            log::debug!("frame loop resumed");
        }
        self.suspended = false;
        self.last_ms = None;
        self.request()
    }

    /// Forget the pending callback and the time baseline. Call only once the pending
    /// callback can no longer fire (the host cancelled it, or it is running now).
    pub fn cancel(&mut self) {
        self.scheduled = false;
        self.last_ms = None;
    }

    /// Forget the time baseline but keep any pending callback on the books, so a
    /// callback still in flight blocks a second one from being scheduled.
    pub fn rebase(&mut self) {
        self.last_ms = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_is_idempotent_until_frame_runs() {
        let mut fl = FrameLoop::new();
        assert!(fl.request());
        assert!(!fl.request());
        assert_eq!(fl.begin(10.0, 0.05), Some(0.0));
        assert!(fl.request());
    }

    #[test]
    fn dt_is_clamped_after_stall() {
        let mut fl = FrameLoop::new();
        fl.begin(0.0, 0.05);
        let dt = fl.begin(16.0, 0.05).unwrap();
        assert!((dt - 0.016).abs() < 1e-6);
        assert_eq!(fl.begin(2016.0, 0.05), Some(0.05));
    }

    #[test]
    fn backwards_timestamps_step_zero() {
        let mut fl = FrameLoop::new();
        fl.begin(100.0, 0.05);
        assert_eq!(fl.begin(90.0, 0.05), Some(0.0));
    }

    #[test]
    fn non_finite_timestamp_steps_zero_and_keeps_baseline() {
        let mut fl = FrameLoop::new();
        fl.begin(100.0, 1.0);
        assert!(fl.request());
        assert_eq!(fl.begin(f64::NAN, 1.0), Some(0.0));
        assert!(fl.request());
        let dt = fl.begin(120.0, 1.0).unwrap();
        assert!((dt - 0.02).abs() < 1e-6);
    }

    #[test]
    fn rebase_keeps_pending_callback() {
        let mut fl = FrameLoop::new();
        fl.begin(0.0, 1.0);
        assert!(fl.request());
        fl.rebase();
        assert!(fl.is_scheduled());
        assert!(!fl.request());
        assert_eq!(fl.begin(5_000.0, 1.0), Some(0.0));
    }

    #[test]
    fn suspended_loop_refuses_frames_and_resume_rebases() {
        let mut fl = FrameLoop::new();
        fl.begin(0.0, 1.0);
        fl.suspend();
        assert!(!fl.request());
        assert_eq!(fl.begin(500.0, 1.0), None);
        assert!(fl.resume());
        assert_eq!(fl.begin(10_000.0, 1.0), Some(0.0));
        let dt = fl.begin(10_020.0, 1.0).unwrap();
        assert!((dt - 0.02).abs() < 1e-6);
    }
}
