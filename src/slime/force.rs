//! Cursor interaction force
//!
//! Pushes particles away from the pressed cursor. Strongest right at the
//! cursor, fading to nothing at the influence radius.

use glam::Vec2;

use crate::consts::{FORCE_FALLOFF, FORCE_SCALE, INFLUENCE_RADIUS, MIN_FORCE_DISTANCE};

/// Repulsive cursor force parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionForce {
    /// No effect at or beyond this distance
    pub radius: f32,
    pub falloff: f32,
    pub scale: f32,
}

impl Default for InteractionForce {
    fn default() -> Self {
        Self {
            radius: INFLUENCE_RADIUS,
            falloff: FORCE_FALLOFF,
            scale: FORCE_SCALE,
        }
    }
}

impl InteractionForce {
    /// Velocity change for a particle at `pos` with the cursor at `cursor`
    pub fn contribution(&self, pos: Vec2, cursor: Vec2) -> Vec2 {
        let d = pos - cursor;
        let dist = d.length();

        // Direction is undefined on top of the cursor
        if dist < MIN_FORCE_DISTANCE || dist >= self.radius {
            return Vec2::ZERO;
        }

        let strength = (self.radius - dist) / self.falloff;
        d * strength * self.scale
    }
}
