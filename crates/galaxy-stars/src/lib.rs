//! Animated star-field background.
//!
//! This crate generates a spiral galaxy of stars surrounded by a sparse
//! field, paints it frame by frame with pointer parallax and twinkling onto
//! any [`Canvas`], and manages the mount/teardown lifecycle of the frame loop.
//! A software raster ([`PixelCanvas`]) can be shown in a terminal as a
//! ratatui widget.

mod canvas;
mod color;
mod generator;
mod motion;
mod palette;
mod render;
mod scheduler;
mod state;
mod widget;

pub use canvas::{Canvas, Circle, PixelCanvas, RadialGradient};
pub use color::Rgba;
pub use generator::{
    FIELD_STAR_COUNT, SPIRAL_ARMS, SPIRAL_STAR_COUNT, SWIRL_RADIUS_FACTOR, Star, StarKind,
    TOTAL_STAR_COUNT, exclusion_radius, field_star, generate, spiral_star, swirl_radius,
};
pub use motion::{parallax_magnitude, parallax_offset, twinkle};
pub use palette::{GradientStop, Palette};
pub use render::{FrameInput, draw_frame, glow_gradient};
pub use scheduler::{Disposer, FrameLoop, FrameScheduler, LoopState};
pub use state::Starfield;
pub use widget::{PIXELS_PER_CELL, pixel_size};
