//! Tunable constants for the motion engines.
//!
//! Every section deserializes with `#[serde(default)]`, so hosts can pass a
//! partial JSON object and keep the stock feel for everything else.

use serde::{Deserialize, Serialize};

use crate::error::MotionError;

/// Top-level configuration bundle, one section per engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub carousel: CarouselConfig,
    pub follower: FollowerConfig,
    pub pill: PillConfig,
}

impl Config {
    /// Parse a JSON document and validate every section.
    pub fn from_json_str(s: &str) -> Result<Self, MotionError> {
        let cfg: Config = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), MotionError> {
        self.carousel.validate()?;
        self.follower.validate()?;
        self.pill.validate()
    }
}

/// Carousel physics constants. Units are px, seconds and milliseconds as named.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Constant background velocity (px/s). Negative drifts content left.
    pub drift_speed: f32,
    /// Deceleration applied to injected velocity when not dragging (px/s²).
    pub friction: f32,
    /// Wheel `deltaY` to velocity factor.
    pub wheel_scale: f32,
    /// Wheel momentum glide window before hard braking kicks in (ms).
    pub wheel_window_ms: f64,
    /// Secondary braking once the wheel window has elapsed (px/s²).
    pub wheel_brake: f32,
    /// Below this speed expired wheel momentum is zeroed (px/s).
    pub wheel_stop_speed: f32,
    /// Share of the last drag velocity carried into momentum on release.
    pub release_fraction: f32,
    /// Magnitude cap for drag-release momentum (px/s).
    pub release_cap: f32,
    /// Releases at or below this speed are treated as intentional stops (px/s).
    pub min_flick: f32,
    /// Upper bound for a single frame step (s).
    pub max_frame_dt: f32,
    /// Smallest interval used when estimating drag velocity (ms).
    pub min_drag_interval_ms: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            drift_speed: -20.0,
            friction: 120.0,
            wheel_scale: 0.75,
            wheel_window_ms: 5000.0,
            wheel_brake: 600.0,
            wheel_stop_speed: 1.0,
            release_fraction: 0.25,
            release_cap: 300.0,
            min_flick: 5.0,
            max_frame_dt: 0.05,
            min_drag_interval_ms: 1.0,
        }
    }
}

impl CarouselConfig {
    pub fn validate(&self) -> Result<(), MotionError> {
        finite("carousel.drift_speed", self.drift_speed)?;
        finite("carousel.wheel_scale", self.wheel_scale)?;
        non_negative("carousel.friction", self.friction)?;
        non_negative("carousel.wheel_brake", self.wheel_brake)?;
        non_negative("carousel.wheel_stop_speed", self.wheel_stop_speed)?;
        non_negative("carousel.release_fraction", self.release_fraction)?;
        non_negative("carousel.release_cap", self.release_cap)?;
        non_negative("carousel.min_flick", self.min_flick)?;
        positive("carousel.max_frame_dt", self.max_frame_dt)?;
        positive("carousel.wheel_window_ms", self.wheel_window_ms as f32)?;
        positive("carousel.min_drag_interval_ms", self.min_drag_interval_ms as f32)
    }
}

/// How the follower's fixed ease amount is turned into a per-frame factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EaseShaping {
    /// Use `ease` as the factor directly.
    Linear,
    /// Pass `ease` through the quadratic ease-in-out curve once.
    EaseInOut,
}

/// Pointer follower constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowerConfig {
    /// Ease amount in (0, 1].
    pub ease: f32,
    pub shaping: EaseShaping,
    /// Snap the ring onto the finger during a touch span.
    pub touch_snap: bool,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            ease: 0.22,
            shaping: EaseShaping::EaseInOut,
            touch_snap: true,
        }
    }
}

impl FollowerConfig {
    pub fn validate(&self) -> Result<(), MotionError> {
        finite("follower.ease", self.ease)?;
        if self.ease <= 0.0 || self.ease > 1.0 {
            return Err(MotionError::InvalidConfig {
                field: "follower.ease",
                reason: format!("{} is outside (0, 1]", self.ease),
            });
        }
        Ok(())
    }
}

/// Rotating pill constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PillConfig {
    pub interval_ms: f64,
}

impl Default for PillConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000.0,
        }
    }
}

impl PillConfig {
    pub fn validate(&self) -> Result<(), MotionError> {
        positive("pill.interval_ms", self.interval_ms as f32)
    }
}

fn finite(field: &'static str, v: f32) -> Result<(), MotionError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(MotionError::InvalidConfig {
            field,
            reason: format!("{v} is not finite"),
        })
    }
}

fn non_negative(field: &'static str, v: f32) -> Result<(), MotionError> {
    finite(field, v)?;
    if v < 0.0 {
        return Err(MotionError::InvalidConfig {
            field,
            reason: format!("{v} is negative"),
        });
    }
    Ok(())
}

fn positive(field: &'static str, v: f32) -> Result<(), MotionError> {
    finite(field, v)?;
    if v <= 0.0 {
        return Err(MotionError::InvalidConfig {
            field,
            reason: format!("{v} must be greater than zero"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = Config::from_json_str(r#"{ "carousel": { "friction": 80.0 } }"#).unwrap();
        assert_eq!(cfg.carousel.friction, 80.0);
        assert_eq!(cfg.carousel.drift_speed, -20.0);
        assert_eq!(cfg.follower, FollowerConfig::default());
    }

    #[test]
    fn rejects_out_of_range_ease() {
        let err = Config::from_json_str(r#"{ "follower": { "ease": 1.5 } }"#).unwrap_err();
        assert!(matches!(
            err,
            MotionError::InvalidConfig {
                field: "follower.ease",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_friction() {
        let cfg = CarouselConfig {
            friction: -1.0,
            ..CarouselConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn shaping_uses_snake_case() {
        let cfg: FollowerConfig = serde_json::from_str(r#"{ "shaping": "linear" }"#).unwrap();
        assert_eq!(cfg.shaping, EaseShaping::Linear);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            Config::from_json_str("{ carousel"),
            Err(MotionError::Parse(_))
        ));
    }
}
