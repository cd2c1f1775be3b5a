//! Procedural star placement.
//!
//! Two populations are generated for a viewport: a dense multi-arm swirl
//! around the center and a sparser scatter of field stars kept outside the
//! swirl by rejection sampling.

use std::f32::consts::TAU;

use galaxy_core::Viewport;
use rand::Rng;

/// Number of stars in the galaxy swirl.
pub const SPIRAL_STAR_COUNT: usize = 420;
/// Number of stars scattered outside the swirl.
pub const FIELD_STAR_COUNT: usize = 180;
/// Total stars per generation.
pub const TOTAL_STAR_COUNT: usize = SPIRAL_STAR_COUNT + FIELD_STAR_COUNT;

/// Swirl radius as a fraction of the shorter viewport side.
pub const SWIRL_RADIUS_FACTOR: f32 = 0.32;
/// Number of spiral arms.
pub const SPIRAL_ARMS: u32 = 3;
/// Width of the random angular offset around each arm.
const ARM_JITTER: f32 = 0.3;
/// Radial exponent; values above 1 pack stars toward the core.
const RADIAL_BIAS: f32 = 1.7;
/// Field stars keep clear of the swirl by this factor.
const EXCLUSION_FACTOR: f32 = 1.1;

const SPIRAL_SIZE_MIN: f32 = 0.7;
const SPIRAL_SIZE_SPREAD: f32 = 1.7;
const FIELD_SIZE_MIN: f32 = 0.5;
const FIELD_SIZE_SPREAD: f32 = 1.2;

/// Which population a star belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarKind {
    /// Part of the galaxy swirl; drawn with stronger parallax.
    Spiral,
    /// Scattered outside the swirl.
    Field,
}

/// A single generated star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub kind: StarKind,
    /// Position at generation time, in device pixels.
    pub x: f32,
    pub y: f32,
    /// Anchor the parallax offset is applied to. Never changes.
    pub base_x: f32,
    pub base_y: f32,
    /// Radius in pixels.
    pub size: f32,
    /// Phase offset for twinkling, `0.0..1.0`.
    pub twinkle: f32,
}

impl Star {
    fn new(kind: StarKind, x: f32, y: f32, size: f32, twinkle: f32) -> Self {
        Self {
            kind,
            x,
            y,
            base_x: x,
            base_y: y,
            size,
            twinkle,
        }
    }
}

/// Outer radius of the swirl for a viewport.
pub fn swirl_radius(viewport: Viewport) -> f32 {
    SWIRL_RADIUS_FACTOR * viewport.min_side()
}

/// Distance from center that every field star must exceed.
pub fn exclusion_radius(viewport: Viewport) -> f32 {
    EXCLUSION_FACTOR * swirl_radius(viewport) / 2.0
}

/// Generate a full star collection for the viewport.
///
/// The viewport must be drawable; callers check [`Viewport::is_drawable`]
/// before asking for stars.
pub fn generate<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Vec<Star> {
    debug_assert!(viewport.is_drawable(), "generate called with {viewport:?}");

    let mut stars = Vec::with_capacity(TOTAL_STAR_COUNT);
    stars.extend((0..SPIRAL_STAR_COUNT).map(|_| spiral_star(viewport, rng)));
    stars.extend((0..FIELD_STAR_COUNT).map(|_| field_star(viewport, rng)));
    stars
}

/// Place one star in the galaxy swirl.
pub fn spiral_star<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Star {
    let (cx, cy) = viewport.center();

    let angle = rng.gen_range(0.0..TAU);
    let radius = rng.gen_range(0.0f32..1.0).powf(RADIAL_BIAS) * swirl_radius(viewport);
    let arm = (rng.gen_range(0.0f32..1.0) * SPIRAL_ARMS as f32).floor();
    let arm_offset = (rng.gen_range(0.0f32..1.0) - 0.5) * ARM_JITTER;
    let spiral_angle = angle + arm * (TAU / SPIRAL_ARMS as f32) + arm_offset;

    let x = cx + spiral_angle.cos() * radius;
    let y = cy + spiral_angle.sin() * radius;
    let size = SPIRAL_SIZE_MIN + rng.gen_range(0.0..SPIRAL_SIZE_SPREAD);

    Star::new(StarKind::Spiral, x, y, size, rng.gen_range(0.0..1.0))
}

/// Place one star uniformly outside the swirl's exclusion radius.
pub fn field_star<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Star {
    let (cx, cy) = viewport.center();
    let min_dist = exclusion_radius(viewport);

    // The exclusion circle always fits inside the viewport, so this ends.
    let (x, y) = loop {
        let x = rng.gen_range(0.0..viewport.width);
        let y = rng.gen_range(0.0..viewport.height);
        if (x - cx).hypot(y - cy) > min_dist {
            break (x, y);
        }
    };
    let size = FIELD_SIZE_MIN + rng.gen_range(0.0..FIELD_SIZE_SPREAD);

    Star::new(StarKind::Field, x, y, size, rng.gen_range(0.0..1.0))
}
