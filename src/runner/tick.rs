//! Per-frame runner update
//!
//! One call per animation frame. Speed and spawn cadence are counted in
//! frames, so the game runs faster on faster displays.

use super::state::{RunnerPhase, RunnerState};
use crate::consts::{SPAWN_INTERVAL, SPEED_STEP};

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct RunnerInput {
    /// Space
    pub jump: bool,
    /// P
    pub pause: bool,
}

/// Things the host may want to react to (sound, HUD, storage)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerEvent {
    /// An obstacle left the screen; score is the new total
    ObstaclePassed { score: u64 },
    /// The dino hit an obstacle and the run ended
    Collided { score: u64 },
    /// The finished run beat the stored best; persist it
    NewHighScore { score: u64 },
}

/// Advance the runner by one frame
pub fn tick(state: &mut RunnerState, input: &RunnerInput) -> Vec<RunnerEvent> {
    let mut events = Vec::new();

    if input.pause {
        state.toggle_pause();
    }

    if state.phase != RunnerPhase::Running {
        return events;
    }

    if input.jump {
        state.jump();
    }

    let ground_y = state.ground_y();
    state.dino.update(ground_y);

    // Scroll obstacles, scoring the ones that leave
    let speed = state.speed;
    let before = state.obstacles.len();
    for obstacle in &mut state.obstacles {
        obstacle.rect.pos.x -= speed;
    }
    state.obstacles.retain(|o| o.rect.right() >= 0.0);
    for _ in state.obstacles.len()..before {
        state.score += 1;
        events.push(RunnerEvent::ObstaclePassed { score: state.score });
    }

    if state.collides() {
        state.phase = RunnerPhase::GameOver;
        let score = state.score;
        events.push(RunnerEvent::Collided { score });
        if state.high_score.submit(score) {
            events.push(RunnerEvent::NewHighScore { score });
        }
        log::info!("Runner over: score {} (best {})", score, state.high_score.best());
        return events;
    }

    // Difficulty ramps on the same cadence as spawning, checked before the
    // frame counter advances
    if state.frame_count % SPAWN_INTERVAL == 0 {
        state.speed += SPEED_STEP;
    }

    state.frame_count += 1;

    if state.frame_count % SPAWN_INTERVAL == 0 {
        state.spawn_obstacle();
    }

    events
}
