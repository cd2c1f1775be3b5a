//! Theme palettes for the star field.

use galaxy_core::Theme;
use rand::Rng;

use crate::color::Rgba;

/// A color stop along a radial gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Offset from the center, `0.0..=1.0` of the gradient radius.
    pub offset: f32,
    pub color: Rgba,
}

/// Per-theme colors used by the frame renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Solid fill painted first every frame.
    pub background: Rgba,
    /// Galaxy glow gradient stops.
    pub glow: [GradientStop; 3],
    /// Halo color around each star.
    pub star_glow: Rgba,
    /// Halo blur before the size term is added.
    pub base_blur: f32,
    /// Red channel range `(min, spread)`.
    pub star_red: (f32, f32),
    /// Green channel range `(min, spread)`.
    pub star_green: (f32, f32),
    /// Fixed blue channel.
    pub star_blue: u8,
    /// Star fill opacity.
    pub star_alpha: f32,
}

pub const DARK: Palette = Palette {
    background: Rgba::rgb(0x07, 0x09, 0x14),
    glow: [
        GradientStop {
            offset: 0.0,
            color: Rgba::rgba(80, 120, 255, 0.13),
        },
        GradientStop {
            offset: 0.5,
            color: Rgba::rgba(40, 30, 80, 0.06),
        },
        GradientStop {
            offset: 1.0,
            color: Rgba::rgba(7, 9, 20, 0.0),
        },
    ],
    star_glow: Rgba::rgb(0xb5, 0xcf, 0xff),
    base_blur: 8.0,
    star_red: (180.0, 40.0),
    star_green: (200.0, 30.0),
    star_blue: 255,
    star_alpha: 0.92,
};

pub const LIGHT: Palette = Palette {
    background: Rgba::rgb(0xf6, 0xf8, 0xfa),
    glow: [
        GradientStop {
            offset: 0.0,
            color: Rgba::rgba(120, 160, 255, 0.10),
        },
        GradientStop {
            offset: 0.5,
            color: Rgba::rgba(200, 210, 255, 0.05),
        },
        GradientStop {
            offset: 1.0,
            color: Rgba::rgba(246, 248, 250, 0.0),
        },
    ],
    star_glow: Rgba::rgb(0xb0, 0xb8, 0xd6),
    base_blur: 6.0,
    star_red: (90.0, 40.0),
    star_green: (120.0, 30.0),
    star_blue: 200,
    star_alpha: 0.82,
};

impl Palette {
    /// Palette for the given theme.
    pub fn for_theme(theme: Theme) -> &'static Palette {
        match theme {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }

    /// Pick a star fill color, jittered within the theme's hue range.
    ///
    /// Called once per star per frame, so colors shimmer slightly.
    pub fn star_color<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgba {
        let (r_min, r_spread) = self.star_red;
        let (g_min, g_spread) = self.star_green;
        let r = r_min + rng.gen_range(0.0..r_spread);
        let g = g_min + rng.gen_range(0.0..g_spread);
        Rgba::rgba(r as u8, g as u8, self.star_blue, self.star_alpha)
    }

    /// Halo blur for a star of the given size.
    pub fn star_blur(&self, size: f32) -> f32 {
        self.base_blur + size * 2.0
    }
}
