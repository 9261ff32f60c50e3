//! Rotating text pill.
//!
//! Cycles a label through a fixed list of typographic variants on a timer. The
//! pill width is locked to the widest variant so rotation never reflows the line.

use serde::{Deserialize, Serialize};

use crate::config::PillConfig;
use crate::error::MotionError;

/// One label and the font styling applied with it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillVariant {
    pub text: String,
    pub font_family: String,
    #[serde(default = "default_font_style")]
    pub font_style: String,
    #[serde(default = "default_text_transform")]
    pub text_transform: String,
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_text_transform() -> String {
    "none".to_string()
}

impl PillVariant {
    pub fn new(text: impl Into<String>, font_family: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_family: font_family.into(),
            font_style: default_font_style(),
            text_transform: default_text_transform(),
        }
    }
}

/// Timed rotation state.
#[derive(Clone, Debug)]
pub struct PillRotator {
    variants: Vec<PillVariant>,
    index: usize,
    interval_ms: f64,
    /// Start of the interval currently being shown.
    since_ms: Option<f64>,
}

impl PillRotator {
    pub fn new(variants: Vec<PillVariant>, cfg: PillConfig) -> Result<Self, MotionError> {
        cfg.validate()?;
        if variants.is_empty() {
            return Err(MotionError::EmptyPillVariants);
        }
        Ok(Self {
            variants,
            index: 0,
            interval_ms: cfg.interval_ms,
            since_ms: None,
        })
    }

    pub fn current(&self) -> &PillVariant {
        &self.variants[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn variants(&self) -> &[PillVariant] {
        &self.variants
    }

    /// Advance by however many whole intervals elapsed since the last change.
    /// Returns the new variant when the visible one changed.
    pub fn tick(&mut self, now_ms: f64) -> Option<&PillVariant> {
        if !now_ms.is_finite() {
            return None;
        }
        let since = match self.since_ms {
            Some(since) => since,
            None => {
                self.since_ms = Some(now_ms);
                return None;
            }
        };
        let elapsed = now_ms - since;
        if elapsed < self.interval_ms {
            return None;
        }
        let steps = (elapsed / self.interval_ms).floor();
        self.since_ms = Some(since + steps * self.interval_ms);
        let len = self.variants.len();
        let advance = (steps as u64 % len as u64) as usize;
        if advance == 0 {
            return None;
        }
        self.index = (self.index + advance) % len;
        Some(&self.variants[self.index])
    }

    /// Width (px, rounded up) that fits every variant, given one measured width per
    /// variant. `None` when nothing measurable was reported.
    pub fn fit_width(measured: &[f32]) -> Option<u32> {
        let max = measured
            .iter()
            .copied()
            .filter(|w| w.is_finite() && *w > 0.0)
            .fold(0.0_f32, f32::max);
        if max > 0.0 {
            Some(max.ceil() as u32)
        } else {
            None
        }
    }
}
