//! wasm-bindgen surface for the drift motion engines.
//!
//! The JS host keeps the DOM: it looks up elements, listens for events, owns
//! `requestAnimationFrame`, and applies the strings returned here. Every method
//! that returns `bool` answers "must the host schedule a frame now?". Hosts never
//! cancel a pending frame: a callback that finds its engine stopped returns
//! undefined and the chain ends.

mod logging;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use drift_motion_core::{
    loop_sequence, marker_transform, relative_percent as core_relative_percent, CarouselConfig,
    CarouselEngine, CursorRegion, FollowerConfig, PillConfig, PillRotator, PillVariant, Point,
    PointerEnvironment, PointerFollower, Rect, TrackLayout, VelocitySource, WheelInput,
};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Deserialize an optional JS object, falling back to `T::default()`.
fn from_js_or_default<T>(v: JsValue, what: &str) -> Result<T, JsError>
where
    T: DeserializeOwned + Default,
{
    if jsvalue_is_undefined_or_null(&v) {
        Ok(T::default())
    } else {
        swb::from_value(v).map_err(|e| JsError::new(&format!("{what} error: {e}")))
    }
}

fn to_js<T: Serialize + ?Sized>(v: &T, what: &str) -> Result<JsValue, JsError> {
    swb::to_value(v).map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

#[derive(Serialize)]
struct CarouselSnapshot {
    position: f32,
    velocity: f32,
    source: VelocitySource,
    dragging: bool,
    track_extent: f32,
}

#[derive(Serialize)]
struct FollowerFrameJs {
    ring: Point,
    dot: Point,
    reschedule: bool,
    ring_transform: String,
    dot_transform: String,
}

/// Carousel strip driven by drift, wheel momentum and drag.
#[wasm_bindgen]
pub struct DriftCarousel {
    core: CarouselEngine,
}

#[wasm_bindgen]
impl DriftCarousel {
    /// Create a carousel. Pass a partial `CarouselConfig` object or undefined/null for defaults.
    /// Example:
    ///   new DriftCarousel({ friction: 90 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<DriftCarousel, JsError> {
        console_error_panic_hook::set_once();
        let cfg: CarouselConfig = from_js_or_default(config, "config")?;
        let core =
            CarouselEngine::new(cfg).map_err(|e| JsError::new(&format!("config error: {e}")))?;
        Ok(DriftCarousel { core })
    }

    /// Slot order for `n` items: originals then `aria-hidden` clones, as `[{ source, clone }]`.
    #[wasm_bindgen(js_name = loop_sequence)]
    pub fn loop_sequence(n: u32) -> Result<JsValue, JsError> {
        to_js(&loop_sequence(n as usize), "loop_sequence")
    }

    /// Re-measure from the rendered width of every slot (clones included) and the strip gap.
    pub fn measure(&mut self, widths: &[f32], gap: f32) {
        self.core.set_layout(&TrackLayout::measure(widths, gap));
    }

    pub fn start(&mut self) -> bool {
        self.core.start()
    }

    /// Frame callback. Returns `{ offset, reschedule }`, or undefined while suspended.
    pub fn frame(&mut self, now_ms: f64) -> Result<JsValue, JsError> {
        match self.core.frame(now_ms) {
            Some(frame) => to_js(&frame, "frame"),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    #[wasm_bindgen(js_name = set_visible)]
    pub fn set_visible(&mut self, visible: bool) -> bool {
        self.core.set_visible(visible)
    }

    /// Feed a wheel event (`WheelInput` shape). Returns `{ kind: "ignored" }` or
    /// `{ kind: "applied", prevent_default }`.
    pub fn wheel(&mut self, input: JsValue, now_ms: f64) -> Result<JsValue, JsError> {
        let input: WheelInput = from_js_or_default(input, "wheel input")?;
        to_js(&self.core.on_wheel(input, now_ms), "wheel outcome")
    }

    #[wasm_bindgen(js_name = pointer_down)]
    pub fn pointer_down(&mut self, x: f32, now_ms: f64) {
        self.core.pointer_down(x, now_ms);
    }

    #[wasm_bindgen(js_name = pointer_move)]
    pub fn pointer_move(&mut self, x: f32, now_ms: f64) -> Option<f32> {
        self.core.pointer_move(x, now_ms)
    }

    #[wasm_bindgen(js_name = pointer_up)]
    pub fn pointer_up(&mut self, now_ms: f64) -> Option<f32> {
        self.core.pointer_up(now_ms)
    }

    #[wasm_bindgen(js_name = pointer_leave)]
    pub fn pointer_leave(&mut self, now_ms: f64) -> Option<f32> {
        self.core.pointer_leave(now_ms)
    }

    pub fn offset(&self) -> f32 {
        self.core.offset()
    }

    pub fn transform(&self) -> String {
        self.core.transform()
    }

    /// `"grab"` or `"grabbing"`.
    pub fn cursor(&self) -> String {
        self.core.cursor_style().as_css().to_string()
    }

    /// Snapshot of the physics state for debugging overlays.
    pub fn debug_state(&self) -> Result<JsValue, JsError> {
        let s = self.core.state();
        to_js(
            &CarouselSnapshot {
                position: s.position,
                velocity: s.velocity,
                source: s.source,
                dragging: s.is_dragging(),
                track_extent: s.track_extent,
            },
            "debug_state",
        )
    }
}

/// Eased cursor ring plus raw dot.
#[wasm_bindgen]
pub struct DriftFollower {
    core: PointerFollower,
}

#[wasm_bindgen]
impl DriftFollower {
    /// `env` is `{ reduced_motion, coarse_pointer }` read from media queries once.
    /// When either is set the follower is disabled; check `enabled` and restore the
    /// native cursor.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        env: JsValue,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Result<DriftFollower, JsError> {
        console_error_panic_hook::set_once();
        let cfg: FollowerConfig = from_js_or_default(config, "config")?;
        let env: PointerEnvironment = from_js_or_default(env, "environment")?;
        let core = PointerFollower::new(cfg, env, Point::new(viewport_width, viewport_height))
            .map_err(|e| JsError::new(&format!("follower error: {e}")))?;
        Ok(DriftFollower { core })
    }

    #[wasm_bindgen(getter)]
    pub fn enabled(&self) -> bool {
        self.core.is_enabled()
    }

    #[wasm_bindgen(js_name = pointer_move)]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.core.pointer_move(x, y)
    }

    #[wasm_bindgen(js_name = pointer_leave)]
    pub fn pointer_leave(&mut self) {
        self.core.pointer_leave();
    }

    #[wasm_bindgen(js_name = touch_start)]
    pub fn touch_start(&mut self, x: f32, y: f32) -> bool {
        self.core.touch_start(x, y)
    }

    #[wasm_bindgen(js_name = touch_move)]
    pub fn touch_move(&mut self, x: f32, y: f32) -> bool {
        self.core.touch_move(x, y)
    }

    #[wasm_bindgen(js_name = touch_end)]
    pub fn touch_end(&mut self) {
        self.core.touch_end();
    }

    /// True while the host should set `touch-action: none` on the page.
    #[wasm_bindgen(js_name = suppress_native_touch)]
    pub fn suppress_native_touch(&self) -> bool {
        self.core.suppress_native_touch()
    }

    /// Frame callback. Returns `{ ring, dot, reschedule, ring_transform, dot_transform }`
    /// or undefined when the loop has stopped.
    pub fn frame(&mut self, now_ms: f64) -> Result<JsValue, JsError> {
        let Some(frame) = self.core.frame(now_ms) else {
            return Ok(JsValue::UNDEFINED);
        };
        to_js(
            &FollowerFrameJs {
                ring: frame.ring,
                dot: frame.dot,
                reschedule: frame.reschedule,
                ring_transform: marker_transform(frame.ring),
                dot_transform: marker_transform(frame.dot),
            },
            "frame",
        )
    }

    /// Pointer entered a `[data-cursor]` element; `variant` is the attribute value.
    #[wasm_bindgen(js_name = enter_region)]
    pub fn enter_region(&mut self, variant: &str) {
        self.core.enter_region(CursorRegion::from_attr(variant));
    }

    #[wasm_bindgen(js_name = leave_region)]
    pub fn leave_region(&mut self, variant: &str) {
        self.core.leave_region(CursorRegion::from_attr(variant));
    }

    /// Modifier classes for the cursor element, e.g. `["is-hover", "is-solid"]`.
    pub fn classes(&self) -> Result<JsValue, JsError> {
        to_js(&self.core.classes(), "classes")
    }
}

/// Rotating text pill.
#[wasm_bindgen]
pub struct DriftPill {
    core: PillRotator,
}

#[wasm_bindgen]
impl DriftPill {
    /// `variants` is an array of `{ text, font_family, font_style?, text_transform? }`.
    #[wasm_bindgen(constructor)]
    pub fn new(variants: JsValue, config: JsValue) -> Result<DriftPill, JsError> {
        console_error_panic_hook::set_once();
        let variants: Vec<PillVariant> = swb::from_value(variants)
            .map_err(|e| JsError::new(&format!("variants error: {e}")))?;
        let cfg: PillConfig = from_js_or_default(config, "config")?;
        let core = PillRotator::new(variants, cfg)
            .map_err(|e| JsError::new(&format!("pill error: {e}")))?;
        Ok(DriftPill { core })
    }

    pub fn current(&self) -> Result<JsValue, JsError> {
        to_js(self.core.current(), "variant")
    }

    /// Returns the new variant when it changed, otherwise undefined.
    pub fn tick(&mut self, now_ms: f64) -> Result<JsValue, JsError> {
        match self.core.tick(now_ms) {
            Some(v) => to_js(v, "variant"),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn index(&self) -> u32 {
        self.core.index() as u32
    }

    /// Pixel width to lock the pill to, from one measured width per variant.
    #[wasm_bindgen(js_name = fit_width)]
    pub fn fit_width(measured: &[f32]) -> Option<u32> {
        PillRotator::fit_width(measured)
    }
}

/// Pointer position as `[x%, y%]` within an element rect (`{ left, top, width, height }`),
/// or undefined for an empty rect.
#[wasm_bindgen(js_name = relative_percent)]
pub fn relative_percent(rect: JsValue, x: f32, y: f32) -> Result<JsValue, JsError> {
    let rect: Rect = from_js_or_default(rect, "rect")?;
    match core_relative_percent(rect, x, y) {
        Some((px, py)) => to_js(&[px, py], "relative_percent"),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Route `log` output to the browser console. `level` is one of
/// `off|error|warn|info|debug|trace` (default `warn`).
#[wasm_bindgen(js_name = init_logging)]
pub fn init_logging(level: Option<String>) -> Result<(), JsError> {
    let filter = match level {
        Some(s) => s
            .parse::<log::LevelFilter>()
            .map_err(|e| JsError::new(&format!("log level error: {e}")))?,
        None => log::LevelFilter::Warn,
    };
    logging::install(filter);
    Ok(())
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
