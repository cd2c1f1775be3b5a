//! Star-field component state.

use galaxy_core::{Pointer, Theme, Viewport};
use rand::Rng;
use rand::rngs::StdRng;

use crate::canvas::Canvas;
use crate::generator::{self, Star};
use crate::render::{FrameInput, draw_frame};
use crate::scheduler::{Disposer, FrameLoop, FrameScheduler};

/// A mounted star field: canvas, stars, pointer and loop, owned together.
#[derive(Debug)]
pub struct Starfield<C: Canvas, R: Rng = StdRng> {
    canvas: C,
    /// Current star collection; replaced wholesale, never edited.
    stars: Vec<Star>,
    /// Size the stars were generated for.
    viewport: Viewport,
    /// Last known pointer position.
    pointer: Pointer,
    theme: Theme,
    /// Freeze twinkle and parallax.
    reduced_motion: bool,
    rng: R,
    frame_loop: FrameLoop,
}

impl<C: Canvas, R: Rng> Starfield<C, R> {
    /// Mount onto a drawing surface and start the frame loop.
    ///
    /// Returns `None` without starting anything when no surface could be
    /// acquired. The star field is decorative, so that case is not an error.
    pub fn mount(canvas: Option<C>, theme: Theme, rng: R) -> Option<(Self, Disposer)> {
        let canvas = canvas?;
        let viewport = Viewport::new(canvas.width() as f32, canvas.height() as f32);
        if !viewport.is_drawable() {
            return None;
        }

        let (frame_loop, disposer) = FrameLoop::start();
        let mut starfield = Self {
            canvas,
            stars: Vec::new(),
            viewport,
            pointer: Pointer::CENTER,
            theme,
            reduced_motion: false,
            rng,
            frame_loop,
        };
        starfield.regenerate();
        log::debug!(
            "star field mounted at {}x{} ({theme})",
            viewport.width,
            viewport.height
        );
        Some((starfield, disposer))
    }

    /// Handle a surface resize. Stars are regenerated for the new size.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if !self.frame_loop.is_running() || width == 0 || height == 0 {
            return;
        }
        self.canvas.resize(width, height);
        self.viewport = Viewport::new(width as f32, height as f32);
        self.regenerate();
    }

    /// Handle pointer movement.
    pub fn on_pointer_move(&mut self, pointer: Pointer) {
        if self.frame_loop.is_running() {
            self.pointer = pointer;
        }
    }

    /// Switch theme. A new theme also gets a fresh set of stars.
    pub fn set_theme(&mut self, theme: Theme) {
        if theme == self.theme {
            return;
        }
        log::debug!("star field theme {} -> {theme}", self.theme);
        self.theme = theme;
        if self.frame_loop.is_running() {
            self.regenerate();
        }
    }

    /// Enable or disable reduced motion.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// Draw one frame and request the next, if the loop is still running.
    pub fn frame<S: FrameScheduler + ?Sized>(&mut self, elapsed_ms: u64, scheduler: &mut S) -> bool {
        let input = if self.reduced_motion {
            FrameInput {
                theme: self.theme,
                pointer: Pointer::CENTER,
                elapsed_ms: 0,
            }
        } else {
            FrameInput {
                theme: self.theme,
                pointer: self.pointer,
                elapsed_ms,
            }
        };

        let Self {
            canvas,
            stars,
            rng,
            frame_loop,
            ..
        } = self;
        frame_loop.tick(scheduler, || draw_frame(canvas, stars, input, rng))
    }

    /// Replace the star collection for the current viewport.
    fn regenerate(&mut self) {
        self.stars = generator::generate(self.viewport, &mut self.rng);
        log::debug!(
            "generated {} stars for {}x{}",
            self.stars.len(),
            self.viewport.width,
            self.viewport.height
        );
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// The surface frames are painted into.
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Frames drawn since mount.
    pub fn frames(&self) -> u64 {
        self.frame_loop.frames()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PixelCanvas;
    use crate::color::Rgba;
    use crate::generator::{StarKind, TOTAL_STAR_COUNT, exclusion_radius};
    use crate::render::tests::{Op, RecordingCanvas};
    use crate::scheduler::tests::CountingScheduler;
    use rand::SeedableRng;

    fn mount(width: u32, height: u32, theme: Theme) -> (Starfield<RecordingCanvas>, Disposer) {
        Starfield::mount(
            Some(RecordingCanvas::new(width, height)),
            theme,
            StdRng::seed_from_u64(21),
        )
        .unwrap()
    }

    #[test]
    fn test_mount_without_surface() {
        let mounted: Option<(Starfield<PixelCanvas>, Disposer)> =
            Starfield::mount(PixelCanvas::new(0, 0), Theme::Dark, StdRng::seed_from_u64(0));
        assert!(mounted.is_none());

        let zero = Starfield::mount(
            Some(RecordingCanvas::new(0, 10)),
            Theme::Dark,
            StdRng::seed_from_u64(0),
        );
        assert!(zero.is_none());
    }

    #[test]
    fn test_mount_generates_stars() {
        let (starfield, _disposer) = mount(800, 600, Theme::Dark);
        assert!(starfield.is_running());
        assert_eq!(starfield.stars().len(), TOTAL_STAR_COUNT);
        assert_eq!(starfield.pointer(), Pointer::CENTER);
        assert_eq!(starfield.viewport(), Viewport::new(800.0, 600.0));
    }

    #[test]
    fn test_frame_paints_theme_background() {
        let (mut starfield, _disposer) = mount(800, 600, Theme::Dark);
        let mut scheduler = CountingScheduler::default();
        assert!(starfield.frame(0, &mut scheduler));
        assert_eq!(
            starfield.canvas().ops[1],
            Op::Fill(Rgba::from_hex("#070914").unwrap())
        );

        starfield.set_theme(Theme::Light);
        starfield.frame(16, &mut scheduler);
        let last_fill = starfield
            .canvas()
            .ops
            .iter()
            .rev()
            .find(|op| matches!(op, Op::Fill(_)))
            .cloned();
        assert_eq!(last_fill, Some(Op::Fill(Rgba::from_hex("#f6f8fa").unwrap())));
        assert_eq!(scheduler.requests, 2);
    }

    #[test]
    fn test_resize_regenerates() {
        let (mut starfield, _disposer) = mount(800, 600, Theme::Dark);
        let before = starfield.stars().to_vec();

        starfield.on_resize(400, 1000);
        let viewport = Viewport::new(400.0, 1000.0);
        assert_eq!(starfield.viewport(), viewport);
        assert_eq!(starfield.stars().len(), TOTAL_STAR_COUNT);
        assert_ne!(starfield.stars(), before.as_slice());
        assert_eq!(starfield.canvas().width, 400);

        let min_dist = exclusion_radius(viewport);
        for star in starfield.stars() {
            assert!(star.base_x >= 0.0 && star.base_x <= 400.0);
            if star.kind == StarKind::Field {
                assert!((star.base_x - 200.0).hypot(star.base_y - 500.0) > min_dist);
            }
        }
    }

    #[test]
    fn test_zero_resize_is_ignored() {
        let (mut starfield, _disposer) = mount(800, 600, Theme::Dark);
        let before = starfield.stars().to_vec();
        starfield.on_resize(0, 600);
        assert_eq!(starfield.stars(), before.as_slice());
        assert_eq!(starfield.viewport(), Viewport::new(800.0, 600.0));
    }

    #[test]
    fn test_theme_change_regenerates() {
        let (mut starfield, _disposer) = mount(800, 600, Theme::Dark);
        let before = starfield.stars().to_vec();
        starfield.set_theme(Theme::Dark);
        assert_eq!(starfield.stars(), before.as_slice());
        starfield.set_theme(Theme::Light);
        assert_ne!(starfield.stars(), before.as_slice());
    }

    #[test]
    fn test_teardown_stops_everything() {
        let (mut starfield, disposer) = mount(800, 600, Theme::Dark);
        let mut scheduler = CountingScheduler::default();
        starfield.frame(0, &mut scheduler);
        let ops_before = starfield.canvas().ops.len();
        let stars_before = starfield.stars().to_vec();

        assert!(disposer.dispose());
        assert!(!disposer.dispose());

        assert!(!starfield.frame(16, &mut scheduler));
        assert_eq!(scheduler.requests, 1);
        assert_eq!(starfield.canvas().ops.len(), ops_before);
        assert_eq!(starfield.frames(), 1);

        starfield.on_resize(300, 300);
        starfield.on_pointer_move(Pointer { x: 0.0, y: 0.0 });
        assert_eq!(starfield.stars(), stars_before.as_slice());
        assert_eq!(starfield.pointer(), Pointer::CENTER);
    }

    #[test]
    fn test_pointer_moves_stars() {
        let (mut starfield, _disposer) = mount(800, 600, Theme::Dark);
        let mut scheduler = CountingScheduler::default();
        starfield.on_pointer_move(Pointer { x: 1.0, y: 0.5 });
        starfield.frame(0, &mut scheduler);

        let star = starfield.stars()[0].clone();
        let circle = starfield.canvas().circles()[0];
        assert!(circle.x > star.base_x);
        assert_eq!(circle.y, star.base_y);
    }

    #[test]
    fn test_reduced_motion_freezes_stars() {
        let (mut starfield, _disposer) = mount(800, 600, Theme::Dark);
        let mut scheduler = CountingScheduler::default();
        starfield.set_reduced_motion(true);
        starfield.on_pointer_move(Pointer { x: 1.0, y: 1.0 });

        starfield.frame(1_000, &mut scheduler);
        let first: Vec<_> = starfield.canvas().circles().iter().map(|c| (c.x, c.y, c.radius)).collect();
        starfield.frame(9_000, &mut scheduler);
        let all = starfield.canvas().circles();
        let second: Vec<_> = all[TOTAL_STAR_COUNT..].iter().map(|c| (c.x, c.y, c.radius)).collect();

        assert_eq!(first, second);
        let star = &starfield.stars()[0];
        assert_eq!((first[0].0, first[0].1), (star.base_x, star.base_y));
    }

    #[test]
    fn test_pixel_canvas_frame() {
        let (mut starfield, _disposer) = Starfield::mount(
            PixelCanvas::new(120, 80),
            Theme::Light,
            StdRng::seed_from_u64(5),
        )
        .unwrap();
        starfield.frame(0, &mut CountingScheduler::default());
        assert_eq!(starfield.frames(), 1);
        assert!(starfield.canvas().pixel(119, 79).is_some());
    }
}
