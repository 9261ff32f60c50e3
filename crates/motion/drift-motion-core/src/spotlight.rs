//! Pointer-relative highlight coordinates for hover-glow tiles and the blur reveal.

use serde::{Deserialize, Serialize};

/// Client-space bounding box of an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Pointer position as percentages of `rect` (0 at the left/top edge, 100 at the
/// right/bottom edge; values outside the box are not clamped).
pub fn relative_percent(rect: Rect, x: f32, y: f32) -> Option<(f32, f32)> {
    if !(rect.width > 0.0 && rect.height > 0.0) || !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some((
        (x - rect.left) / rect.width * 100.0,
        (y - rect.top) / rect.height * 100.0,
    ))
}
