//! Slime simulator instance
//!
//! Bundles the field, its per-tick state and the pointer so a host only has
//! to forward input events and call `tick` once per frame.

use glam::Vec2;

use super::field::{FieldState, Link, ParticleField};
use super::pointer::PointerTracker;
use crate::consts::LINK_DISTANCE;
use crate::settings::Settings;

/// One running slime toy
#[derive(Debug, Clone)]
pub struct SlimeSim {
    pub state: FieldState,
    pub field: ParticleField,
    pub pointer: PointerTracker,
    /// Ticks since creation
    pub time_ticks: u64,
}

impl SlimeSim {
    /// Create a field sized `width` x `height` configured from `settings`
    pub fn new(width: f32, height: f32, settings: &Settings, seed: u64) -> Self {
        let mut state = FieldState::new(width, height);
        settings.apply_to(&mut state);
        let field = ParticleField::new(settings.particle_count(), width, height, seed);
        log::info!(
            "Slime field {}x{} with {} particles (seed {})",
            width,
            height,
            field.len(),
            seed
        );
        Self {
            state,
            field,
            pointer: PointerTracker::new(),
            time_ticks: 0,
        }
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        self.state.cursor = self.pointer.cursor();
        self.field.tick(&self.state);
        self.time_ticks += 1;
    }

    /// Container resized; particles stay where they are, clamped inside with
    /// outward motion stopped
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.width = width.max(0.0);
        self.state.height = height.max(0.0);
        self.field.contain(self.state.extent());
        log::debug!("Slime field resized to {}x{}", width, height);
    }

    /// Scatter all particles again, at rest
    pub fn reset(&mut self) {
        self.field.reset(self.state.width, self.state.height);
        log::info!("Slime reset");
    }

    /// Flip the cursor interaction; returns the new value
    pub fn toggle_physics(&mut self) -> bool {
        self.state.physics_enabled = !self.state.physics_enabled;
        log::info!("Physics enabled: {}", self.state.physics_enabled);
        self.state.physics_enabled
    }

    /// Replace the particle batch
    pub fn set_particle_count(&mut self, count: usize) {
        if count != self.field.len() {
            self.field
                .respawn(count, self.state.width, self.state.height);
            log::info!("Slime particle count set to {}", count);
        }
    }

    /// Re-read tunables (sliders, presets) without touching particle motion
    pub fn apply_settings(&mut self, settings: &Settings) {
        settings.apply_to(&mut self.state);
        self.set_particle_count(settings.particle_count());
    }

    pub fn press(&mut self, pos: Vec2) {
        self.pointer.press(pos);
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer.moved(pos);
    }

    pub fn release(&mut self) {
        self.pointer.release();
    }

    /// Connecting lines at the default link distance
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.field.links(LINK_DISTANCE)
    }
}
