//! Easing helpers:
//! - lerp_f32 (scalar interpolation)
//! - ease_in_out_quad (quadratic ease-in/ease-out)
//! - approach (move toward zero by a fixed amount without overshooting)

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Quadratic ease-in/ease-out: `2t²` below one half, `1 - (-2t + 2)² / 2` above.
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u / 2.0
    }
}

/// Reduce the magnitude of `v` by `amount`, clamping at zero so the sign never flips.
#[inline]
pub fn approach_zero(v: f32, amount: f32) -> f32 {
    if v > 0.0 {
        (v - amount).max(0.0)
    } else if v < 0.0 {
        (v + amount).min(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_in_out_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 1e-6);
        assert!((ease_in_out_quad(0.22) - 0.0968).abs() < 1e-6);
    }

    #[test]
    fn approach_zero_never_crosses() {
        assert_eq!(approach_zero(3.0, 5.0), 0.0);
        assert_eq!(approach_zero(-3.0, 5.0), 0.0);
        assert_eq!(approach_zero(10.0, 4.0), 6.0);
        assert_eq!(approach_zero(-10.0, 4.0), -6.0);
    }

    #[test]
    fn lerp_basic() {
        assert_eq!(lerp_f32(0.0, 100.0, 0.22), 22.0);
    }
}
