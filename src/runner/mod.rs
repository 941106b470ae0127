//! Dino runner
//!
//! Jump over cacti scrolling in from the right. Speed creeps up every
//! hundred frames; the run ends on the first overlap.

pub mod state;
pub mod tick;

pub use state::{Dino, Obstacle, Rect, RunnerPhase, RunnerState};
pub use tick::{RunnerEvent, RunnerInput, tick};
