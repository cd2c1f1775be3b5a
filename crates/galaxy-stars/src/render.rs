//! Per-frame painting of the star field.

use galaxy_core::{Pointer, Theme, Viewport};
use rand::Rng;

use crate::canvas::{Canvas, Circle, RadialGradient};
use crate::generator::{SWIRL_RADIUS_FACTOR, Star};
use crate::motion::{parallax_offset, twinkle};
use crate::palette::Palette;

/// Extra glow radius beyond the swirl, as a fraction of the shorter side.
const GLOW_MARGIN: f32 = 0.13;

/// Inputs that change from frame to frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub theme: Theme,
    pub pointer: Pointer,
    /// Wall-clock milliseconds driving the twinkle.
    pub elapsed_ms: u64,
}

/// Galaxy glow gradient for a viewport and palette.
pub fn glow_gradient(viewport: Viewport, palette: &Palette) -> RadialGradient {
    RadialGradient {
        center: viewport.center(),
        radius: viewport.min_side() * (SWIRL_RADIUS_FACTOR + GLOW_MARGIN),
        stops: palette.glow.to_vec(),
    }
}

/// Paint one frame: background, galaxy glow, then every star.
///
/// `rng` only feeds the per-frame color jitter.
pub fn draw_frame<C, R>(canvas: &mut C, stars: &[Star], input: FrameInput, rng: &mut R)
where
    C: Canvas + ?Sized,
    R: Rng + ?Sized,
{
    let viewport = Viewport::new(canvas.width() as f32, canvas.height() as f32);
    let palette = Palette::for_theme(input.theme);

    canvas.clear();
    canvas.fill(palette.background);
    canvas.fill_radial_gradient(&glow_gradient(viewport, palette));

    for star in stars {
        let (dx, dy) = parallax_offset(star, input.pointer);
        let scale = twinkle(input.elapsed_ms, star.twinkle);
        canvas.fill_circle(&Circle {
            x: star.base_x + dx,
            y: star.base_y + dy,
            radius: star.size * scale,
            color: palette.star_color(rng),
            glow: palette.star_glow,
            blur: palette.star_blur(star.size),
        });
    }
}
