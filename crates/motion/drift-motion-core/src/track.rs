//! Seamless-loop layout for the carousel strip.
//!
//! The rendered strip holds the item sequence twice, back to back. Wrapping the
//! offset by half the measured extent then lands on an identical frame, so the
//! loop never shows a seam.

use serde::{Deserialize, Serialize};

/// One rendered slot of the duplicated strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopSlot {
    /// Index into the original item list.
    pub source: usize,
    /// Second copy; hosts mark these `aria-hidden`.
    pub clone: bool,
}

/// Slots for `n` items: each original once, then each original again as a clone.
pub fn loop_sequence(n: usize) -> Vec<LoopSlot> {
    let originals = (0..n).map(|source| LoopSlot {
        source,
        clone: false,
    });
    let clones = (0..n).map(|source| LoopSlot {
        source,
        clone: true,
    });
    originals.chain(clones).collect()
}

/// Measured size of the duplicated strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackLayout {
    /// Sum of `width + gap` over every rendered slot, clones included (px).
    pub extent: f32,
}

impl TrackLayout {
    /// Measure from the rendered widths of every slot and the strip's item gap.
    /// Unusable widths (negative, NaN, infinite) count as zero.
    pub fn measure(widths: &[f32], gap: f32) -> Self {
        let gap = if gap.is_finite() && gap > 0.0 { gap } else { 0.0 };
        let extent = widths
            .iter()
            .map(|&w| {
                if w.is_finite() && w >= 0.0 {
                    w
                } else {
                    log::warn!("ignoring unusable carousel item width {w}");
                    0.0
                }
            })
            .map(|w| w + gap)
            .sum();
        Self { extent }
    }

    /// Distance covered by one content cycle, which is also the wrap distance.
    #[inline]
    pub fn cycle(&self) -> f32 {
        self.extent / 2.0
    }
}

/// Fold `pos` into `[-cycle, 0]`. A non-positive or non-finite cycle leaves `pos` untouched.
pub fn wrap_offset(pos: f32, cycle: f32) -> f32 {
    if !(cycle.is_finite() && cycle > 0.0) {
        return pos;
    }
    if pos < -cycle || pos > 0.0 {
        -(-pos).rem_euclid(cycle)
    } else {
        pos
    }
}
