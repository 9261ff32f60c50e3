#![cfg(target_arch = "wasm32")]
use serde::Serialize;
use serde_json::json;
use serde_wasm_bindgen as swb;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use drift_motion_wasm::{
    abi_version, init_logging, relative_percent, DriftCarousel, DriftFollower, DriftPill,
};

wasm_bindgen_test_configure!(run_in_browser);

/// Plain JS objects (not `Map`s) from JSON literals.
fn js(v: serde_json::Value) -> JsValue {
    v.serialize(&swb::Serializer::json_compatible()).unwrap()
}

fn get(obj: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(obj, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn carousel_constructs_with_defaults_and_overrides() {
    assert!(DriftCarousel::new(JsValue::UNDEFINED).is_ok());
    let cfg = js(json!({ "friction": 90.0 }));
    assert!(DriftCarousel::new(cfg).is_ok());
    let bad = js(json!({ "max_frame_dt": -1.0 }));
    assert!(DriftCarousel::new(bad).is_err());
}

#[wasm_bindgen_test]
fn carousel_frames_drift_left() {
    let mut c = DriftCarousel::new(JsValue::NULL).unwrap();
    c.measure(&[200.0, 200.0, 200.0, 200.0], 0.0);
    assert!(c.start());
    let f0 = c.frame(0.0).unwrap();
    assert_eq!(get(&f0, "reschedule").as_bool(), Some(true));
    let f1 = c.frame(50.0).unwrap();
    let offset = get(&f1, "offset").as_f64().unwrap();
    assert!((offset + 1.0).abs() < 1e-5);
    assert_eq!(c.transform(), "translateX(-1px)");

    assert!(!c.set_visible(false));
    assert!(c.frame(66.0).unwrap().is_undefined());
    assert!(c.set_visible(true));
}

#[wasm_bindgen_test]
fn carousel_wheel_and_drag() {
    let mut c = DriftCarousel::new(JsValue::NULL).unwrap();
    c.measure(&[500.0, 500.0], 0.0);
    let input = js(json!({
        "delta_y": 100.0,
        "scroll_y": 0.0,
        "viewport_height": 800.0,
        "document_height": 800.0
    }));
    let out = c.wheel(input, 0.0).unwrap();
    assert_eq!(get(&out, "kind").as_string().as_deref(), Some("applied"));
    assert_eq!(get(&out, "prevent_default").as_bool(), Some(true));

    c.pointer_down(100.0, 0.0);
    assert_eq!(c.cursor(), "grabbing");
    assert!(c.pointer_move(99.0, 100.0).is_some());
    assert_eq!(c.pointer_up(100.0), Some(0.0));
    assert_eq!(c.cursor(), "grab");
    assert_eq!(c.pointer_leave(120.0), None);
}

#[wasm_bindgen_test]
fn loop_sequence_duplicates() {
    let seq = DriftCarousel::loop_sequence(2).unwrap();
    let arr = js_sys::Array::from(&seq);
    assert_eq!(arr.length(), 4);
    assert_eq!(get(&arr.get(3), "clone").as_bool(), Some(true));
}

#[wasm_bindgen_test]
fn follower_disabled_for_reduced_motion() {
    let env = js(json!({ "reduced_motion": true }));
    let mut f = DriftFollower::new(JsValue::UNDEFINED, env, 800.0, 600.0).unwrap();
    assert!(!f.enabled());
    assert!(!f.pointer_move(10.0, 10.0));
}

#[wasm_bindgen_test]
fn follower_frame_reports_transforms() {
    let cfg = js(json!({ "ease": 0.5, "shaping": "linear" }));
    let mut f = DriftFollower::new(cfg, JsValue::UNDEFINED, 0.0, 0.0).unwrap();
    assert!(f.pointer_move(100.0, 40.0));
    let frame = f.frame(16.0).unwrap();
    assert_eq!(
        get(&frame, "ring_transform").as_string().as_deref(),
        Some("translate(calc(50px - 50%), calc(20px - 50%))")
    );
    f.enter_region("solid");
    let classes = js_sys::Array::from(&f.classes().unwrap());
    assert_eq!(classes.length(), 2);
    f.pointer_leave();
    assert!(f.frame(32.0).unwrap().is_undefined());
}

#[wasm_bindgen_test]
fn pill_rotates() {
    let variants = js(json!([
        { "text": "Leader", "font_family": "Manrope" },
        { "text": "Human", "font_family": "Quicksand" }
    ]));
    let mut p = DriftPill::new(variants, JsValue::UNDEFINED).unwrap();
    assert!(p.tick(0.0).unwrap().is_undefined());
    let next = p.tick(1_000.0).unwrap();
    assert_eq!(get(&next, "text").as_string().as_deref(), Some("Human"));
    assert_eq!(p.index(), 1);
    assert_eq!(DriftPill::fit_width(&[10.2, 30.7]), Some(31));

    let empty = js(json!([]));
    assert!(DriftPill::new(empty, JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn relative_percent_maps_rect() {
    let rect = js(json!({ "left": 0.0, "top": 0.0, "width": 200.0, "height": 100.0 }));
    let out = js_sys::Array::from(&relative_percent(rect, 50.0, 25.0).unwrap());
    assert_eq!(out.get(0).as_f64(), Some(25.0));
    assert_eq!(out.get(1).as_f64(), Some(25.0));
}

#[wasm_bindgen_test]
fn logging_accepts_levels() {
    assert!(init_logging(Some("debug".into())).is_ok());
    assert!(init_logging(None).is_ok());
    assert!(init_logging(Some("loud".into())).is_err());
}
