//! Drawing surface abstraction and a software raster implementation.

use crate::color::{Rgba, blend};
use crate::palette::GradientStop;

/// A radial gradient filling the whole surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: (f32, f32),
    pub radius: f32,
    pub stops: Vec<GradientStop>,
}

impl RadialGradient {
    /// Color at `t` (`0.0` center, `1.0` edge). Outside the stops the nearest
    /// stop color is used.
    pub fn color_at(&self, t: f32) -> Rgba {
        let Some(first) = self.stops.first() else {
            return Rgba::rgba(0, 0, 0, 0.0);
        };
        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = (b.offset - a.offset).max(f32::EPSILON);
                return a.color.lerp(b.color, (t - a.offset) / span);
            }
        }
        self.stops[self.stops.len() - 1].color
    }
}

/// A filled circle with a soft halo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: Rgba,
    pub glow: Rgba,
    /// Halo blur in pixels, the canvas-style shadow blur value.
    pub blur: f32,
}

/// A drawing context the star field paints into.
pub trait Canvas {
    /// Width in device pixels.
    fn width(&self) -> u32;
    /// Height in device pixels.
    fn height(&self) -> u32;
    /// Change the backing size. Contents are discarded.
    fn resize(&mut self, width: u32, height: u32);
    /// Reset every pixel to transparent black.
    fn clear(&mut self);
    /// Blend a solid color over the whole surface.
    fn fill(&mut self, color: Rgba);
    /// Blend a radial gradient over the whole surface.
    fn fill_radial_gradient(&mut self, gradient: &RadialGradient);
    /// Blend a circle and its halo.
    fn fill_circle(&mut self, circle: &Circle);
}

/// Software RGB raster.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 3]>,
}

impl PixelCanvas {
    /// Allocate a raster. Returns `None` for a zero-sized surface.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels: vec![[0.0; 3]; width as usize * height as usize],
        })
    }

    /// Pixel at `(x, y)` as an opaque color.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x, y).map(|i| {
            let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
            let [r, g, b] = self.pixels[i];
            Rgba::rgb(q(r), q(g), q(b))
        })
    }

    pub(crate) fn raw_pixel(&self, x: u32, y: u32) -> Option<[f32; 3]> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    /// Apply `f` to every pixel whose center lies in the given bounds.
    fn for_each_in(
        &mut self,
        min: (f32, f32),
        max: (f32, f32),
        mut f: impl FnMut(f32, f32, &mut [f32; 3]),
    ) {
        let x0 = min.0.floor().max(0.0) as u32;
        let y0 = min.1.floor().max(0.0) as u32;
        let x1 = (max.0.ceil().max(0.0) as u32).min(self.width);
        let y1 = (max.1.ceil().max(0.0) as u32).min(self.height);
        for y in y0..y1 {
            let row = (y * self.width) as usize;
            for x in x0..x1 {
                f(x as f32 + 0.5, y as f32 + 0.5, &mut self.pixels[row + x as usize]);
            }
        }
    }
}

impl Canvas for PixelCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![[0.0; 3]; width as usize * height as usize];
    }

    fn clear(&mut self) {
        self.pixels.fill([0.0; 3]);
    }

    fn fill(&mut self, color: Rgba) {
        let src = color.channels();
        for px in &mut self.pixels {
            blend(px, src, color.a);
        }
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        let (cx, cy) = gradient.center;
        let radius = gradient.radius.max(f32::EPSILON);
        let (w, h) = (self.width as f32, self.height as f32);
        self.for_each_in((0.0, 0.0), (w, h), |x, y, px| {
            let color = gradient.color_at((x - cx).hypot(y - cy) / radius);
            if color.a > 0.0 {
                blend(px, color.channels(), color.a);
            }
        });
    }

    fn fill_circle(&mut self, circle: &Circle) {
        if circle.radius <= 0.0 {
            return;
        }
        let radius = circle.radius;
        // Canvas shadow blur is twice the Gaussian sigma.
        let sigma = (circle.blur / 2.0).max(0.5);
        let reach = radius + sigma * 3.0;
        // Peak of a Gaussian carrying the disc's area, so tiny stars get a
        // faint halo rather than a bright blob.
        let glow_peak = (radius * radius / (2.0 * sigma * sigma)).min(1.0)
            * circle.glow.a
            * circle.color.a;
        let fill = circle.color.channels();
        let glow = circle.glow.channels();

        self.for_each_in(
            (circle.x - reach, circle.y - reach),
            (circle.x + reach, circle.y + reach),
            |x, y, px| {
                let d = (x - circle.x).hypot(y - circle.y);
                if d > reach {
                    return;
                }
                let halo = glow_peak * (-(d * d) / (2.0 * sigma * sigma)).exp();
                blend(px, glow, halo);

                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    blend(px, fill, coverage * circle.color.a);
                }
            },
        );
    }
}
