//! Terminal host for the star field.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use galaxy_config::Config;
use galaxy_core::Pointer;
use galaxy_stars::{Disposer, FrameScheduler, PixelCanvas, Starfield, pixel_size};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::Line,
};

/// Paces frame requests to the configured frame rate.
#[derive(Debug)]
pub struct TerminalScheduler {
    interval: Duration,
    /// When the next requested frame is due, if one was requested.
    due: Option<Instant>,
}

impl TerminalScheduler {
    /// Create a scheduler with the given frame interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            due: None,
        }
    }

    /// Make a frame due immediately.
    pub fn request_now(&mut self) {
        self.due = Some(Instant::now());
    }

    /// Consume the pending request if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                true
            }
            _ => false,
        }
    }

    /// How long to wait for input before the next frame is due.
    pub fn timeout(&self, now: Instant) -> Duration {
        self.due
            .map(|due| due.saturating_duration_since(now))
            .unwrap_or(self.interval)
    }
}

impl FrameScheduler for TerminalScheduler {
    fn request_frame(&mut self) {
        self.due = Some(Instant::now() + self.interval);
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Mounted star field; `None` if the terminal had no drawable area.
    starfield: Option<Starfield<PixelCanvas>>,
    /// Stops the star field's frame loop.
    disposer: Option<Disposer>,
    scheduler: TerminalScheduler,
    /// Terminal size in cells, for normalizing mouse positions.
    cells: (u16, u16),
    /// Settings file the theme is written back to, if any.
    settings_path: Option<PathBuf>,
}

impl App {
    /// Mount the star field for a terminal area of `area` cells.
    pub fn new(config: &Config, area: Rect, settings_path: Option<PathBuf>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (width, height) = pixel_size(area);
        let mounted = Starfield::mount(PixelCanvas::new(width, height), config.theme, rng);
        let (starfield, disposer) = match mounted {
            Some((mut starfield, disposer)) => {
                starfield.set_reduced_motion(config.reduced_motion);
                (Some(starfield), Some(disposer))
            }
            None => (None, None),
        };

        let mut scheduler = TerminalScheduler::new(config.frame_interval());
        scheduler.request_now();

        Self {
            running: true,
            starfield,
            disposer,
            scheduler,
            cells: (area.width, area.height),
            settings_path,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        while self.running {
            if self.scheduler.take_due(Instant::now()) {
                if let Some(starfield) = &mut self.starfield {
                    starfield.frame(wall_clock_ms(), &mut self.scheduler);
                }
                terminal.draw(|frame| self.render(frame))?;
            }
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        if let Some(starfield) = &self.starfield {
            frame.render_widget(starfield.canvas(), area);
        }

        let [_, help_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        let theme = self
            .starfield
            .as_ref()
            .map(|s| s.theme().name())
            .unwrap_or("-");
        let help = Line::from(vec![
            "q".bold(),
            " quit  ".dark_gray(),
            "t".bold(),
            format!(" theme ({theme})  ").dark_gray(),
            "m".bold(),
            " reduced motion".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, help_area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits no longer than the time until the next frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.scheduler.timeout(Instant::now()))? {
            self.on_event(event::read()?);
        }
        Ok(())
    }

    /// Dispatch a single terminal event.
    pub fn on_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(mouse) => self.on_mouse_event(mouse),
            Event::Resize(cols, rows) => self.on_resize(cols, rows),
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_theme(),
            (_, KeyCode::Char('m')) => self.toggle_reduced_motion(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return;
        }
        // First and last cell map to the edges, 0.0 and 1.0.
        let (cols, rows) = self.cells;
        let pointer = Pointer::from_position(
            mouse.column as f32,
            mouse.row as f32,
            cols.saturating_sub(1) as f32,
            rows.saturating_sub(1) as f32,
        );
        if let Some(starfield) = &mut self.starfield {
            starfield.on_pointer_move(pointer);
        }
    }

    fn on_resize(&mut self, cols: u16, rows: u16) {
        self.cells = (cols, rows);
        let (width, height) = pixel_size(Rect::new(0, 0, cols, rows));
        if let Some(starfield) = &mut self.starfield {
            starfield.on_resize(width, height);
        }
        self.scheduler.request_now();
    }

    /// Switch between the dark and light theme and remember the choice.
    fn toggle_theme(&mut self) {
        let Some(starfield) = &mut self.starfield else {
            return;
        };
        let theme = starfield.theme().toggle();
        starfield.set_theme(theme);

        if let Some(path) = &self.settings_path {
            // Only the theme changes; command-line overrides stay out of the file.
            let saved = Config::load(path).and_then(|mut stored| {
                stored.theme = theme;
                stored.save(path)
            });
            match saved {
                Ok(()) => log::debug!("saved theme {theme} to {}", path.display()),
                Err(e) => log::warn!("could not save theme: {e}"),
            }
        }
    }

    /// Toggle reduced motion.
    fn toggle_reduced_motion(&mut self) {
        if let Some(starfield) = &mut self.starfield {
            starfield.set_reduced_motion(!starfield.reduced_motion());
        }
    }

    /// Tear down the star field and stop the application.
    fn quit(&mut self) {
        if let Some(disposer) = &self.disposer {
            disposer.dispose();
        }
        self.running = false;
    }
}

/// Milliseconds since the Unix epoch.
fn wall_clock_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_core::Theme;
    use galaxy_stars::TOTAL_STAR_COUNT;

    fn app() -> App {
        let config = Config {
            seed: Some(3),
            ..Default::default()
        };
        App::new(&config, Rect::new(0, 0, 80, 24), None)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse_move(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_mounts_half_block_canvas() {
        let app = app();
        let starfield = app.starfield.as_ref().unwrap();
        assert_eq!(starfield.viewport().width, 80.0);
        assert_eq!(starfield.viewport().height, 48.0);
        assert_eq!(starfield.stars().len(), TOTAL_STAR_COUNT);
    }

    #[test]
    fn test_empty_terminal_mounts_nothing() {
        let mut app = App::new(&Config::default(), Rect::new(0, 0, 0, 0), None);
        assert!(app.starfield.is_none());
        app.on_event(key(KeyCode::Char('t')));
        app.on_event(key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_theme_toggle_key() {
        let mut app = app();
        app.on_event(key(KeyCode::Char('t')));
        assert_eq!(app.starfield.as_ref().unwrap().theme(), Theme::Light);
        app.on_event(key(KeyCode::Char('t')));
        assert_eq!(app.starfield.as_ref().unwrap().theme(), Theme::Dark);
    }

    #[test]
    fn test_theme_toggle_saves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "fps = 45\n").unwrap();

        // Command-line overrides in effect must not leak into the file.
        let config = Config {
            fps: 10,
            seed: Some(3),
            ..Default::default()
        };
        let mut app = App::new(&config, Rect::new(0, 0, 80, 24), Some(path.clone()));

        app.on_event(key(KeyCode::Char('t')));
        let saved = Config::load(&path).unwrap();
        assert_eq!(saved.theme, Theme::Light);
        assert_eq!(saved.fps, 45);
        assert_eq!(saved.seed, None);

        app.on_event(key(KeyCode::Char('t')));
        assert_eq!(Config::load(&path).unwrap().theme, Theme::Dark);
    }

    #[test]
    fn test_theme_toggle_creates_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("galaxy").join("config.toml");
        let config = Config {
            seed: Some(3),
            ..Default::default()
        };
        let mut app = App::new(&config, Rect::new(0, 0, 80, 24), Some(path.clone()));

        app.on_event(key(KeyCode::Char('t')));
        assert_eq!(Config::load(&path).unwrap().theme, Theme::Light);
    }

    #[test]
    fn test_theme_toggle_keeps_invalid_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "fps = \"fast\"").unwrap();
        let config = Config {
            seed: Some(3),
            ..Default::default()
        };
        let mut app = App::new(&config, Rect::new(0, 0, 80, 24), Some(path.clone()));

        app.on_event(key(KeyCode::Char('t')));
        assert_eq!(app.starfield.as_ref().unwrap().theme(), Theme::Light);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fps = \"fast\"");
    }

    #[test]
    fn test_reduced_motion_key() {
        let mut app = app();
        app.on_event(key(KeyCode::Char('m')));
        assert!(app.starfield.as_ref().unwrap().reduced_motion());
    }

    #[test]
    fn test_mouse_updates_pointer() {
        let mut app = app();
        app.on_event(mouse_move(79, 0));
        let pointer = app.starfield.as_ref().unwrap().pointer();
        assert_eq!(pointer, Pointer { x: 1.0, y: 0.0 });
    }

    #[test]
    fn test_mouse_reaches_both_edges() {
        let mut app = app();
        app.on_event(mouse_move(0, 23));
        assert_eq!(app.starfield.as_ref().unwrap().pointer(), Pointer { x: 0.0, y: 1.0 });

        app.on_event(Event::Resize(1, 1));
        app.on_event(mouse_move(0, 0));
        assert_eq!(app.starfield.as_ref().unwrap().pointer(), Pointer::CENTER);
    }

    #[test]
    fn test_resize_regenerates() {
        let mut app = app();
        app.on_event(Event::Resize(100, 30));
        let starfield = app.starfield.as_ref().unwrap();
        assert_eq!(starfield.viewport().width, 100.0);
        assert_eq!(starfield.viewport().height, 60.0);
        assert_eq!(app.cells, (100, 30));
    }

    #[test]
    fn test_quit_tears_down() {
        let mut app = app();
        app.on_event(key(KeyCode::Esc));
        assert!(!app.running);
        assert!(app.disposer.as_ref().unwrap().is_disposed());

        let starfield = app.starfield.as_mut().unwrap();
        assert!(!starfield.frame(0, &mut app.scheduler));
    }

    #[test]
    fn test_scheduler_pacing() {
        let mut scheduler = TerminalScheduler::new(Duration::from_millis(50));
        let now = Instant::now();
        assert!(!scheduler.take_due(now));
        assert_eq!(scheduler.timeout(now), Duration::from_millis(50));

        scheduler.request_now();
        assert!(scheduler.take_due(Instant::now()));
        assert!(!scheduler.take_due(Instant::now()));

        scheduler.request_frame();
        assert!(!scheduler.take_due(Instant::now()));
        assert!(scheduler.timeout(Instant::now()) <= Duration::from_millis(50));
    }
}
