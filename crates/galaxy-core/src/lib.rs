//! Core types shared by the galaxy crates.

use serde::{Deserialize, Serialize};

/// Color theme supplied by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Toggle between dark and light.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Lowercase name as used in settings files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme '{other}' (expected 'dark' or 'light')")),
        }
    }
}

/// Drawing surface size in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether stars can be generated for this size.
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Center point in device pixels.
    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Length of the shorter side.
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// Last known pointer position, normalized to `0.0..=1.0` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Default for Pointer {
    fn default() -> Self {
        Self::CENTER
    }
}

impl Pointer {
    /// Pointer resting at the middle of the viewport (no parallax).
    pub const CENTER: Pointer = Pointer { x: 0.5, y: 0.5 };

    /// Normalize a raw position against the extent it was measured in.
    pub fn from_position(x: f32, y: f32, width: f32, height: f32) -> Self {
        let norm = |v: f32, extent: f32| {
            if extent > 0.0 {
                (v / extent).clamp(0.0, 1.0)
            } else {
                0.5
            }
        };
        Self {
            x: norm(x, width),
            y: norm(y, height),
        }
    }
}
