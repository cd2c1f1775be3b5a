//! Per-frame star motion: pointer parallax and twinkling.

use galaxy_core::Pointer;

use crate::generator::{Star, StarKind};

/// Twinkle period divisor in milliseconds.
const TWINKLE_PERIOD_MS: f64 = 700.0;
/// How far apart in phase stars can be.
const TWINKLE_PHASE_SCALE: f64 = 10.0;

/// Brightness/size multiplier for a star at the given time.
///
/// Always within `0.2..=1.2`.
pub fn twinkle(elapsed_ms: u64, phase: f32) -> f32 {
    let t = elapsed_ms as f64 / TWINKLE_PERIOD_MS + phase as f64 * TWINKLE_PHASE_SCALE;
    (0.7 + 0.5 * t.sin()) as f32
}

/// Parallax magnitude for a star: spiral stars sit "closer" and move more.
pub fn parallax_magnitude(kind: StarKind, size: f32) -> f32 {
    let depth = match kind {
        StarKind::Spiral => 18.0,
        StarKind::Field => 8.0,
    };
    depth * (size / 2.0)
}

/// Pixel offset applied to a star's base position for the pointer.
pub fn parallax_offset(star: &Star, pointer: Pointer) -> (f32, f32) {
    let magnitude = parallax_magnitude(star.kind, star.size);
    (
        (pointer.x - 0.5) * magnitude,
        (pointer.y - 0.5) * magnitude,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn star(kind: StarKind, size: f32) -> Star {
        Star {
            kind,
            x: 100.0,
            y: 100.0,
            base_x: 100.0,
            base_y: 100.0,
            size,
            twinkle: 0.0,
        }
    }

    #[test]
    fn test_twinkle_at_origin() {
        assert!((twinkle(0, 0.0) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_twinkle_phase_shift() {
        // Different phases must not pulse in lockstep.
        assert_ne!(twinkle(1_000, 0.1), twinkle(1_000, 0.6));
    }

    #[test]
    fn test_parallax_centered_pointer() {
        let s = star(StarKind::Spiral, 2.0);
        assert_eq!(parallax_offset(&s, Pointer::CENTER), (0.0, 0.0));
    }

    #[test]
    fn test_parallax_depth_cue() {
        let corner = Pointer { x: 1.0, y: 0.0 };
        let (sx, sy) = parallax_offset(&star(StarKind::Spiral, 2.0), corner);
        let (fx, fy) = parallax_offset(&star(StarKind::Field, 2.0), corner);
        assert_eq!((sx, sy), (9.0, -9.0));
        assert_eq!((fx, fy), (4.0, -4.0));
        assert!(sx.abs() > fx.abs());
    }

    #[test]
    fn test_parallax_scales_with_size() {
        assert_eq!(parallax_magnitude(StarKind::Field, 1.0), 4.0);
        assert_eq!(parallax_magnitude(StarKind::Field, 2.0), 8.0);
    }

    proptest! {
        #[test]
        fn twinkle_stays_in_bounds(elapsed_ms in any::<u64>(), phase in 0.0f32..1.0) {
            let value = twinkle(elapsed_ms, phase);
            prop_assert!((0.2..=1.2).contains(&value), "twinkle {value}");
        }
    }
}
