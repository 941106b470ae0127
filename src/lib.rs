//! Mini Arcade - a bundle of small browser toys
//!
//! Core modules:
//! - `slime`: Cursor-reactive particle field (the slime simulator)
//! - `runner`: Side-scrolling obstacle dodging game (the dino runner)
//! - `woodfish`: Click counter with local accounts and rankings
//! - `frame_loop`: Run-until-stopped frame driver
//! - `platform`: Browser/native storage and clock
//! - `settings` / `highscores`: Persisted preferences and the runner best score

pub mod error;
pub mod frame_loop;
pub mod highscores;
pub mod platform;
pub mod runner;
pub mod settings;
pub mod slime;
pub mod woodfish;

pub use error::{AccountError, StoreError, UnknownName};
pub use frame_loop::{FrameLoop, StopToken};
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Slime particle count at the default quality preset
    pub const SLIME_PARTICLE_COUNT: usize = 150;
    /// Cursor influence radius (pixels)
    pub const INFLUENCE_RADIUS: f32 = 100.0;
    /// Distance over which the cursor force falls off
    pub const FORCE_FALLOFF: f32 = 50.0;
    /// Cursor force gain per tick
    pub const FORCE_SCALE: f32 = 0.05;
    /// Below this separation the cursor direction is undefined
    pub const MIN_FORCE_DISTANCE: f32 = 1e-6;
    /// Default per-tick velocity damping
    pub const DEFAULT_VISCOSITY: f32 = 0.95;
    /// Default fraction of velocity kept on a wall bounce
    pub const DEFAULT_ELASTICITY: f32 = 0.8;
    /// Particles closer than this get a connecting line
    pub const LINK_DISTANCE: f32 = 50.0;
    /// Peak alpha of a connecting line
    pub const LINK_ALPHA: f32 = 0.2;
    /// Particle radius range
    pub const PARTICLE_RADIUS_MIN: f32 = 2.0;
    pub const PARTICLE_RADIUS_MAX: f32 = 5.0;

    /// Runner canvas defaults
    pub const RUNNER_WIDTH: f32 = 800.0;
    pub const RUNNER_HEIGHT: f32 = 200.0;
    /// Gap between the canvas bottom and the ground line
    pub const GROUND_MARGIN: f32 = 10.0;

    /// Dino body
    pub const DINO_X: f32 = 50.0;
    pub const DINO_WIDTH: f32 = 40.0;
    pub const DINO_HEIGHT: f32 = 50.0;
    pub const DINO_GRAVITY: f32 = 0.8;
    pub const DINO_JUMP_POWER: f32 = -15.0;

    /// Obstacles
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 20.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 50.0;
    /// Frames between spawns (and between speed-ups)
    pub const SPAWN_INTERVAL: u64 = 100;
    pub const START_SPEED: f32 = 5.0;
    pub const SPEED_STEP: f32 = 0.2;

    /// Knocks per wooden fish level
    pub const KNOCKS_PER_LEVEL: u64 = 10;
    /// Rows shown in a ranking
    pub const RANKING_SIZE: usize = 10;
}
