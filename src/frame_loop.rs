//! Run-until-stopped frame driver
//!
//! The browser calls back once per animation frame; the loop runs one step
//! and tells the host whether to schedule another. Everything happens on a
//! single thread, so the stop flag is a plain shared `Cell`.

use std::cell::Cell;
use std::rc::Rc;

/// Shared stop flag checked at the top of every frame
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    stopped: Rc<Cell<bool>>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the loop to stop. Idempotent.
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

/// Frame counter plus stop token
#[derive(Debug, Default)]
pub struct FrameLoop {
    token: StopToken,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for whoever tears the view down
    pub fn token(&self) -> StopToken {
        self.token.clone()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_stopped()
    }

    /// Run `step` once unless stopped. Returns true if another frame should
    /// be scheduled.
    pub fn frame<F: FnMut()>(&mut self, mut step: F) -> bool {
        if self.token.is_stopped() {
            return false;
        }
        step();
        self.frames += 1;
        !self.token.is_stopped()
    }

    /// Headless driver: up to `max_frames` frames, or until stopped
    pub fn run_for<F: FnMut(u64)>(&mut self, max_frames: u64, mut step: F) -> u64 {
        let start = self.frames;
        while self.frames - start < max_frames {
            let frame = self.frames;
            if !self.frame(|| step(frame)) {
                break;
            }
        }
        self.frames - start
    }
}
