//! Pointer follower: an eased ring chasing the pointer, plus a raw dot.
//!
//! The loop only runs between the first pointer move and the next pointer leave.
//! On hybrid hosts (fine primary pointer plus a touch screen) the ring is also active
//! between touch start and end and snaps to the finger.
//!
//! Hosts never cancel a pending frame callback; a callback that finds the follower
//! stopped returns `None` and the chain ends there.

use serde::{Deserialize, Serialize};

use crate::config::{EaseShaping, FollowerConfig};
use crate::easing::{ease_in_out_quad, lerp_f32};
use crate::error::MotionError;
use crate::frame::FrameLoop;

/// Client-space position (px).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Platform preferences read once at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerEnvironment {
    pub reduced_motion: bool,
    /// Touch-primary device.
    pub coarse_pointer: bool,
}

impl PointerEnvironment {
    pub fn allows_follower(&self) -> bool {
        !(self.reduced_motion || self.coarse_pointer)
    }
}

/// Page regions that restyle the cursor, keyed by their `data-cursor` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorRegion {
    Plain,
    Solid,
}

impl CursorRegion {
    /// `"solid"` selects the filled style; any other value is a plain hover region.
    pub fn from_attr(value: &str) -> Self {
        if value == "solid" {
            CursorRegion::Solid
        } else {
            CursorRegion::Plain
        }
    }
}

/// Rendered positions for one follower frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FollowerFrame {
    /// Eased marker.
    pub ring: Point,
    /// Marker pinned to the raw pointer.
    pub dot: Point,
    pub reschedule: bool,
}

/// Target/current pair owned by one [`PointerFollower`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FollowerState {
    pub target: Point,
    pub current: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tracking {
    Idle,
    Pointer,
    Touch,
}

/// Eased cursor follower.
#[derive(Clone, Debug)]
pub struct PointerFollower {
    enabled: bool,
    factor: f32,
    touch_snap: bool,
    state: FollowerState,
    tracking: Tracking,
    frames: FrameLoop,
    hover: bool,
    solid: bool,
}

impl PointerFollower {
    /// Build a follower centred in `viewport` (width, height). When `env` asks for
    /// reduced motion or reports a coarse pointer, the follower is created disabled
    /// and every handler becomes a no-op.
    pub fn new(
        cfg: FollowerConfig,
        env: PointerEnvironment,
        viewport: Point,
    ) -> Result<Self, MotionError> {
        cfg.validate()?;
        if !viewport.is_finite() {
            return Err(MotionError::NonFinite { what: "viewport" });
        }
        let centre = Point::new(viewport.x / 2.0, viewport.y / 2.0);
        let enabled = env.allows_follower();
        if !enabled {
            log::debug!("pointer follower disabled by platform preferences");
        }
        Ok(Self {
            enabled,
            factor: ease_factor(&cfg),
            touch_snap: cfg.touch_snap,
            state: FollowerState {
                target: centre,
                current: centre,
            },
            tracking: Tracking::Idle,
            frames: FrameLoop::new(),
            hover: false,
            solid: false,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Per-frame fraction of the remaining distance covered.
    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn state(&self) -> &FollowerState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.tracking != Tracking::Idle
    }

    /// True while a touch span is live; hosts disable native touch gestures meanwhile.
    pub fn suppress_native_touch(&self) -> bool {
        self.tracking == Tracking::Touch
    }

    // ---- Mouse / pen -----------------------------------------------------

    /// Record a pointer sample. Returns `true` when the host must schedule a frame.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        if !self.enabled || !self.accept(x, y) {
            return false;
        }
        if self.tracking == Tracking::Idle {
            self.tracking = Tracking::Pointer;
        }
        self.frames.request()
    }

    /// Pointer left the document: stop the loop until the next move. A callback still
    /// in flight stays counted, so a quick re-entry reuses it instead of starting a
    /// second chain.
    pub fn pointer_leave(&mut self) {
        if self.tracking == Tracking::Pointer {
            self.stop();
        }
    }

    // ---- Touch -----------------------------------------------------------

    /// Finger down. Returns `true` when the host must schedule a frame.
    ///
    /// Coarse-pointer devices disable the follower at construction, so touch spans
    /// only reach an enabled follower on hybrid devices reporting a fine primary pointer.
    pub fn touch_start(&mut self, x: f32, y: f32) -> bool {
        if !self.enabled || !self.accept(x, y) {
            return false;
        }
        self.tracking = Tracking::Touch;
        if self.touch_snap {
            self.state.current = self.state.target;
        }
        self.frames.request()
    }

    /// Finger moved. Returns `true` when the host must schedule a frame.
    pub fn touch_move(&mut self, x: f32, y: f32) -> bool {
        if self.tracking != Tracking::Touch || !self.accept(x, y) {
            return false;
        }
        if self.touch_snap {
            self.state.current = self.state.target;
        }
        self.frames.request()
    }

    /// Touch end or cancel.
    pub fn touch_end(&mut self) {
        if self.tracking == Tracking::Touch {
            self.stop();
        }
    }

    // ---- Frames ----------------------------------------------------------

    /// Frame callback. Returns `None` when the loop was stopped in the meantime.
    pub fn frame(&mut self, now_ms: f64) -> Option<FollowerFrame> {
        if !self.enabled || self.tracking == Tracking::Idle {
            self.frames.cancel();
            return None;
        }
        self.frames.begin(now_ms, f32::MAX)?;
        self.step();
        let reschedule = self.frames.request();
        Some(FollowerFrame {
            ring: self.state.current,
            dot: self.state.target,
            reschedule,
        })
    }

    /// Move `current` one ease step toward `target` (snapping during touch).
    pub fn step(&mut self) -> Point {
        let FollowerState { target, current } = self.state;
        self.state.current = if self.tracking == Tracking::Touch && self.touch_snap {
            target
        } else {
            Point::new(
                lerp_f32(current.x, target.x, self.factor),
                lerp_f32(current.y, target.y, self.factor),
            )
        };
        self.state.current
    }

    // ---- Hover styling ---------------------------------------------------

    pub fn enter_region(&mut self, region: CursorRegion) {
        self.hover = true;
        if region == CursorRegion::Solid {
            self.solid = true;
        }
    }

    pub fn leave_region(&mut self, region: CursorRegion) {
        self.hover = false;
        if region == CursorRegion::Solid {
            self.solid = false;
        }
    }

    /// Modifier classes for the cursor element.
    pub fn classes(&self) -> Vec<&'static str> {
        let mut out = Vec::with_capacity(2);
        if self.hover {
            out.push("is-hover");
        }
        if self.solid {
            out.push("is-solid");
        }
        out
    }

    fn accept(&mut self, x: f32, y: f32) -> bool {
        let p = Point::new(x, y);
        if !p.is_finite() {
            log::debug!("dropping non-finite pointer sample");
            return false;
        }
        self.state.target = p;
        true
    }

    fn stop(&mut self) {
        self.tracking = Tracking::Idle;
        self.frames.rebase();
    }
}

/// CSS transform centring a marker on `p`.
pub fn marker_transform(p: Point) -> String {
    format!("translate(calc({}px - 50%), calc({}px - 50%))", p.x, p.y)
}

fn ease_factor(cfg: &FollowerConfig) -> f32 {
    match cfg.shaping {
        EaseShaping::Linear => cfg.ease,
        EaseShaping::EaseInOut => ease_in_out_quad(cfg.ease),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_parsing() {
        assert_eq!(CursorRegion::from_attr("solid"), CursorRegion::Solid);
        assert_eq!(CursorRegion::from_attr(""), CursorRegion::Plain);
        assert_eq!(CursorRegion::from_attr("link"), CursorRegion::Plain);
    }

    #[test]
    fn transform_format() {
        assert_eq!(
            marker_transform(Point::new(10.5, 20.0)),
            "translate(calc(10.5px - 50%), calc(20px - 50%))"
        );
    }

    #[test]
    fn shaped_factor_is_precomputed() {
        let f = ease_factor(&FollowerConfig::default());
        assert!((f - 0.0968).abs() < 1e-6);
    }
}
