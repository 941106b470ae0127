//! Runner game state and entity types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::highscores::HighScore;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunnerPhase {
    /// Waiting for start
    Ready,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Hit an obstacle
    GameOver,
}

/// Axis-aligned box, `pos` is the top-left corner (screen coords, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dino {
    pub rect: Rect,
    pub jumping: bool,
    /// Vertical velocity (negative = up)
    pub jump_vel: f32,
}

impl Dino {
    pub fn new(ground_y: f32) -> Self {
        Self {
            rect: Rect::new(DINO_X, ground_y, DINO_WIDTH, DINO_HEIGHT),
            jumping: false,
            jump_vel: 0.0,
        }
    }

    /// Start a jump unless already airborne
    pub fn jump(&mut self) -> bool {
        if self.jumping {
            return false;
        }
        self.jumping = true;
        self.jump_vel = DINO_JUMP_POWER;
        true
    }

    /// Gravity step; lands on `ground_y`
    pub fn update(&mut self, ground_y: f32) {
        if !self.jumping {
            return;
        }
        self.rect.pos.y += self.jump_vel;
        self.jump_vel += DINO_GRAVITY;
        if self.rect.pos.y >= ground_y {
            self.rect.pos.y = ground_y;
            self.jumping = false;
        }
    }
}

/// A cactus sliding in from the right
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
}

/// Complete runner state
#[derive(Debug, Clone)]
pub struct RunnerState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub width: f32,
    pub height: f32,
    pub phase: RunnerPhase,
    pub dino: Dino,
    /// Active obstacles (oldest first)
    pub obstacles: Vec<Obstacle>,
    /// Obstacle scroll speed (pixels per frame)
    pub speed: f32,
    /// Obstacles cleared this run
    pub score: u64,
    /// Best score, raised when a run ends
    pub high_score: HighScore,
    /// Frames since the run started
    pub frame_count: u64,
    rng: Pcg32,
}

impl RunnerState {
    /// Default-sized canvas
    pub fn new(seed: u64) -> Self {
        Self::with_size(RUNNER_WIDTH, RUNNER_HEIGHT, seed)
    }

    pub fn with_size(width: f32, height: f32, seed: u64) -> Self {
        let ground_y = height - DINO_HEIGHT - GROUND_MARGIN;
        Self {
            seed,
            width,
            height,
            phase: RunnerPhase::Ready,
            dino: Dino::new(ground_y),
            obstacles: Vec::new(),
            speed: START_SPEED,
            score: 0,
            high_score: HighScore::default(),
            frame_count: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed the best score from storage
    pub fn with_high_score(mut self, high_score: HighScore) -> Self {
        self.high_score = high_score;
        self
    }

    /// Dino top edge when standing
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - DINO_HEIGHT - GROUND_MARGIN
    }

    /// Ground line height (y)
    #[inline]
    pub fn ground_line(&self) -> f32 {
        self.height - GROUND_MARGIN
    }

    /// Begin a fresh run (ignored while one is in progress)
    pub fn start(&mut self) -> bool {
        match self.phase {
            RunnerPhase::Running | RunnerPhase::Paused => false,
            RunnerPhase::Ready | RunnerPhase::GameOver => {
                self.reset();
                self.phase = RunnerPhase::Running;
                log::info!("Runner started");
                true
            }
        }
    }

    /// Running <-> Paused
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            RunnerPhase::Running => RunnerPhase::Paused,
            RunnerPhase::Paused => RunnerPhase::Running,
            other => other,
        };
    }

    /// Clear the board; an active run drops back to Ready
    pub fn reset(&mut self) {
        let ground_y = self.ground_y();
        self.dino = Dino::new(ground_y);
        self.obstacles.clear();
        self.score = 0;
        self.speed = START_SPEED;
        self.frame_count = 0;
        if matches!(self.phase, RunnerPhase::Running | RunnerPhase::Paused) {
            self.phase = RunnerPhase::Ready;
        }
    }

    /// Jump, only while running
    pub fn jump(&mut self) -> bool {
        self.phase == RunnerPhase::Running && self.dino.jump()
    }

    /// Add an obstacle at the right edge with a random height
    pub fn spawn_obstacle(&mut self) {
        let height = self
            .rng
            .random_range(OBSTACLE_MIN_HEIGHT..OBSTACLE_MAX_HEIGHT);
        let rect = Rect::new(
            self.width,
            self.ground_line() - height,
            OBSTACLE_WIDTH,
            height,
        );
        self.obstacles.push(Obstacle { rect });
    }

    /// Whether the dino overlaps any obstacle
    pub fn collides(&self) -> bool {
        self.obstacles
            .iter()
            .any(|o| self.dino.rect.overlaps(&o.rect))
    }
}
