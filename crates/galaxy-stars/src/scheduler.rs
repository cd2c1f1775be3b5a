//! Frame loop lifecycle.
//!
//! A loop is either running or stopped. The [`Disposer`] handed out at start
//! is the only way to stop it, and stopping is permanent.

use std::cell::Cell;
use std::rc::Rc;

/// Something that can run the next frame later (e.g. on the next display
/// refresh or the next tick of a terminal event loop).
pub trait FrameScheduler {
    /// Ask for one more frame.
    fn request_frame(&mut self);
}

/// Lifecycle state of a frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Shared running flag for one loop instance.
#[derive(Debug)]
pub struct FrameLoop {
    state: Rc<Cell<LoopState>>,
    frames: u64,
}

impl FrameLoop {
    /// Start a loop and return it with its disposer.
    pub fn start() -> (Self, Disposer) {
        let state = Rc::new(Cell::new(LoopState::Running));
        let disposer = Disposer {
            state: Rc::clone(&state),
        };
        (Self { state, frames: 0 }, disposer)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoopState {
        self.state.get()
    }

    /// Whether frames are still being produced.
    pub fn is_running(&self) -> bool {
        self.state() == LoopState::Running
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run `draw` and schedule the next frame, unless the loop was stopped.
    pub fn tick<S: FrameScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        draw: impl FnOnce(),
    ) -> bool {
        if !self.is_running() {
            return false;
        }
        draw();
        self.frames += 1;
        scheduler.request_frame();
        true
    }
}

/// Stops a [`FrameLoop`]. Disposing more than once has no further effect.
#[derive(Debug, Clone)]
pub struct Disposer {
    state: Rc<Cell<LoopState>>,
}

impl Disposer {
    /// Stop the loop. Returns `true` only on the call that stopped it.
    pub fn dispose(&self) -> bool {
        let was_running = self.state.replace(LoopState::Stopped) == LoopState::Running;
        if was_running {
            log::debug!("frame loop stopped");
        }
        was_running
    }

    /// Whether the loop has been stopped.
    pub fn is_disposed(&self) -> bool {
        self.state.get() == LoopState::Stopped
    }
}
