//! Carousel motion engine: drift + momentum + seamless looping (v1).
//!
//! One scalar offset and one velocity, advanced once per display frame with an
//! explicit Euler step:
//!
//! 1. friction pulls injected velocity toward zero (skipped while dragging),
//! 2. expired wheel momentum gets a hard secondary brake,
//! 3. constant drift is added (suppressed while dragging),
//! 4. the offset integrates `(drift + velocity) * dt`,
//! 5. the offset wraps by one content cycle.
//!
//! Gesture handlers (wheel, pointer drag) perturb the state between frames.

use serde::{Deserialize, Serialize};

use crate::config::CarouselConfig;
use crate::easing::approach_zero;
use crate::error::MotionError;
use crate::frame::FrameLoop;
use crate::track::{wrap_offset, TrackLayout};

/// Origin of the current injected velocity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VelocitySource {
    None,
    /// Wheel momentum; once `deadline_ms` passes the glide is braked to a stop.
    Wheel { deadline_ms: f64 },
    /// Drag-release momentum; decays by friction alone.
    Drag,
}

/// Live drag bookkeeping, present only between pointer-down and release.
#[derive(Clone, Copy, Debug, PartialEq)]
struct DragAnchor {
    last_x: f32,
    last_ms: f64,
    /// Instantaneous velocity from the latest move (px/s).
    velocity: f32,
}

/// Mutable physics state owned by one [`CarouselEngine`].
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselState {
    /// Render offset of the strip (px).
    pub position: f32,
    /// Injected velocity (px/s), excluding drift.
    pub velocity: f32,
    pub source: VelocitySource,
    /// Measured extent of the duplicated strip (px).
    pub track_extent: f32,
    drag: Option<DragAnchor>,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            source: VelocitySource::None,
            track_extent: 0.0,
            drag: None,
        }
    }
}

impl CarouselState {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Wrap distance: half of the duplicated strip.
    #[inline]
    pub fn cycle(&self) -> f32 {
        self.track_extent / 2.0
    }
}

/// One wheel event as seen by the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelInput {
    pub delta_x: f32,
    pub delta_y: f32,
    /// Ctrl/Cmd held: the browser is zooming, leave it alone.
    pub zoom_modifier: bool,
    pub scroll_y: f32,
    pub viewport_height: f32,
    pub document_height: f32,
}

impl WheelInput {
    fn at_top(&self) -> bool {
        self.scroll_y == 0.0
    }

    fn at_bottom(&self) -> bool {
        (self.viewport_height + self.scroll_y - self.document_height).abs() < 2.0
    }
}

/// What the host should do with a wheel event after the engine saw it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WheelOutcome {
    /// Not a carousel gesture; let the page handle it.
    Ignored,
    /// Velocity was injected. `prevent_default` is set only when the page is
    /// already at the edge the gesture pushes against.
    Applied { prevent_default: bool },
}

/// Result of one frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarouselFrame {
    pub offset: f32,
    /// Whether the host must request another frame.
    pub reschedule: bool,
}

/// Cursor hint for the strip element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragCursor {
    Grab,
    Grabbing,
}

impl DragCursor {
    pub fn as_css(self) -> &'static str {
        match self {
            DragCursor::Grab => "grab",
            DragCursor::Grabbing => "grabbing",
        }
    }
}

/// Owns the carousel state, its constants and its frame loop.
#[derive(Clone, Debug)]
pub struct CarouselEngine {
    cfg: CarouselConfig,
    state: CarouselState,
    frames: FrameLoop,
}

impl CarouselEngine {
    /// Create an engine at offset 0 with no measured extent.
    pub fn new(cfg: CarouselConfig) -> Result<Self, MotionError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            state: CarouselState::default(),
            frames: FrameLoop::new(),
        })
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.cfg
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn offset(&self) -> f32 {
        self.state.position
    }

    /// CSS transform for the strip.
    pub fn transform(&self) -> String {
        format!("translateX({}px)", self.state.position)
    }

    pub fn cursor_style(&self) -> DragCursor {
        if self.state.is_dragging() {
            DragCursor::Grabbing
        } else {
            DragCursor::Grab
        }
    }

    /// Apply a fresh measurement (page ready, viewport resize). The current offset is
    /// re-wrapped against the new extent.
    pub fn set_layout(&mut self, layout: &TrackLayout) {
        let extent = if layout.extent.is_finite() {
            layout.extent.max(0.0)
        } else {
            0.0
        };
        log::debug!(
            "carousel extent {} -> {}",
            self.state.track_extent,
            extent
        );
        self.state.track_extent = extent;
        self.wrap();
    }

    // ---- Frame loop -------------------------------------------------------

    /// Ask to start the loop. Returns `true` when the host must schedule a frame.
    pub fn start(&mut self) -> bool {
        self.frames.request()
    }

    /// Frame callback at host timestamp `now_ms`. Returns `None` when suspended,
    /// in which case the host must not reschedule.
    pub fn frame(&mut self, now_ms: f64) -> Option<CarouselFrame> {
        let dt = self.frames.begin(now_ms, self.cfg.max_frame_dt)?;
        let offset = self.step(dt, now_ms);
        let reschedule = self.frames.request();
        Some(CarouselFrame { offset, reschedule })
    }

    /// Page visibility changed. Returns `true` when the host must schedule a frame.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        if visible {
            self.frames.resume()
        } else {
            self.frames.suspend();
            false
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.frames.is_suspended()
    }

    /// Advance the physics by `dt` seconds at time `now_ms`, returning the new offset.
    pub fn step(&mut self, dt: f32, now_ms: f64) -> f32 {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.cfg.max_frame_dt)
        } else {
            0.0
        };
        let dragging = self.state.is_dragging();

        if !dragging {
            self.state.velocity = approach_zero(self.state.velocity, self.cfg.friction * dt);
        }

        if let VelocitySource::Wheel { deadline_ms } = self.state.source {
            if now_ms > deadline_ms {
                self.state.velocity =
                    approach_zero(self.state.velocity, self.cfg.wheel_brake * dt);
                if self.state.velocity.abs() < self.cfg.wheel_stop_speed {
                    log::debug!("wheel momentum window expired");
                    self.state.velocity = 0.0;
                    self.state.source = VelocitySource::None;
                }
            }
        }

        if !dragging && self.state.velocity == 0.0 {
            self.state.source = VelocitySource::None;
        }

        let base = if dragging { 0.0 } else { self.cfg.drift_speed };
        self.state.position += (base + self.state.velocity) * dt;
        self.wrap();
        self.state.position
    }

    // ---- Wheel ------------------------------------------------------------

    /// Convert a vertical wheel gesture into momentum.
    pub fn on_wheel(&mut self, input: WheelInput, now_ms: f64) -> WheelOutcome {
        if input.zoom_modifier {
            return WheelOutcome::Ignored;
        }
        if !input.delta_y.is_finite() || !input.delta_x.is_finite() || !now_ms.is_finite() {
            log::debug!("dropping non-finite wheel sample");
            return WheelOutcome::Ignored;
        }
        if input.delta_y.abs() <= input.delta_x.abs() {
            return WheelOutcome::Ignored;
        }

        // Scrolling down (positive deltaY) pushes content left.
        self.state.velocity -= input.delta_y * self.cfg.wheel_scale;
        self.state.source = VelocitySource::Wheel {
            deadline_ms: now_ms + self.cfg.wheel_window_ms,
        };

        let prevent_default =
            (input.delta_y < 0.0 && input.at_top()) || (input.delta_y > 0.0 && input.at_bottom());
        WheelOutcome::Applied { prevent_default }
    }

    // ---- Drag -------------------------------------------------------------

    /// Pointer pressed on the strip: take direct control.
    pub fn pointer_down(&mut self, x: f32, now_ms: f64) {
        if !x.is_finite() || !now_ms.is_finite() {
            log::debug!("dropping non-finite pointer-down sample");
            return;
        }
        self.state.drag = Some(DragAnchor {
            last_x: x,
            last_ms: now_ms,
            velocity: 0.0,
        });
        log::debug!("carousel drag start at x={x}");
    }

    /// Pointer moved while pressed. Follows the pointer 1:1 and returns the new offset,
    /// or `None` when no drag is active.
    pub fn pointer_move(&mut self, x: f32, now_ms: f64) -> Option<f32> {
        let min_interval = self.cfg.min_drag_interval_ms;
        let anchor = self.state.drag.as_mut()?;
        if !x.is_finite() || !now_ms.is_finite() {
            log::debug!("dropping non-finite pointer-move sample");
            return Some(self.state.position);
        }
        let elapsed_ms = (now_ms - anchor.last_ms).max(min_interval);
        let dx = x - anchor.last_x;
        anchor.velocity = dx / (elapsed_ms / 1000.0) as f32;
        anchor.last_x = x;
        anchor.last_ms = now_ms;

        self.state.position += dx;
        self.wrap();
        Some(self.state.position)
    }

    /// Pointer released. Returns the injected momentum, or `None` when no drag was active.
    pub fn pointer_up(&mut self, _now_ms: f64) -> Option<f32> {
        self.release()
    }

    /// Pointer left the strip mid-drag (also covers lost pointer capture).
    pub fn pointer_leave(&mut self, _now_ms: f64) -> Option<f32> {
        self.release()
    }

    fn release(&mut self) -> Option<f32> {
        let anchor = self.state.drag.take()?;
        let injected = release_momentum(anchor.velocity, &self.cfg);
        self.state.velocity = injected;
        self.state.source = VelocitySource::Drag;
        log::debug!(
            "carousel drag release: last velocity {} px/s, injected {} px/s",
            anchor.velocity,
            injected
        );
        Some(injected)
    }

    fn wrap(&mut self) {
        self.state.position = wrap_offset(self.state.position, self.state.cycle());
    }
}

/// Momentum carried out of a drag: a fraction of the last velocity, capped, with
/// micro-releases treated as deliberate stops.
pub fn release_momentum(last_velocity: f32, cfg: &CarouselConfig) -> f32 {
    let injected = last_velocity * cfg.release_fraction;
    if injected.abs() > cfg.min_flick {
        injected.clamp(-cfg.release_cap, cfg.release_cap)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_momentum_thresholds() {
        let cfg = CarouselConfig::default();
        assert_eq!(release_momentum(40.0, &cfg), 10.0);
        assert_eq!(release_momentum(10.0, &cfg), 0.0);
        assert_eq!(release_momentum(20.0, &cfg), 0.0);
        assert_eq!(release_momentum(5_000.0, &cfg), 300.0);
        assert_eq!(release_momentum(-5_000.0, &cfg), -300.0);
    }

    #[test]
    fn cursor_follows_drag_state() {
        let mut eng = CarouselEngine::new(CarouselConfig::default()).unwrap();
        assert_eq!(eng.cursor_style().as_css(), "grab");
        eng.pointer_down(0.0, 0.0);
        assert_eq!(eng.cursor_style().as_css(), "grabbing");
        eng.pointer_up(5.0);
        assert_eq!(eng.cursor_style(), DragCursor::Grab);
    }
}
