//! Slime particles and their render snapshot

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{PARTICLE_RADIUS_MAX, PARTICLE_RADIUS_MIN};

/// A single slime particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fixed at creation
    pub radius: f32,
    /// RGBA, 0-1 (render only)
    pub color: [f32; 4],
}

impl Particle {
    pub fn new(pos: Vec2, radius: f32, color: [f32; 4]) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            color,
        }
    }

    /// Spawn at rest somewhere inside a `width` x `height` field
    pub fn spawn<R: Rng>(rng: &mut R, width: f32, height: f32) -> Self {
        let pos = random_point(rng, width, height);
        let radius = rng.random_range(PARTICLE_RADIUS_MIN..PARTICLE_RADIUS_MAX);
        Self::new(pos, radius, slime_color(rng))
    }

    /// Speed magnitude
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Packed copy for a renderer
    pub fn instance(&self) -> ParticleInstance {
        ParticleInstance {
            position: self.pos.to_array(),
            radius: self.radius,
            _pad: 0.0,
            color: self.color,
        }
    }
}

/// Uniform point in [0,width) x [0,height)
pub fn random_point<R: Rng>(rng: &mut R, width: f32, height: f32) -> Vec2 {
    Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height)
}

/// Blue-cyan slime tint with slight translucency
fn slime_color<R: Rng>(rng: &mut R) -> [f32; 4] {
    let r = (50.0 + rng.random::<f32>() * 100.0).floor();
    let g = (150.0 + rng.random::<f32>() * 100.0).floor();
    let b = (200.0 + rng.random::<f32>() * 55.0).floor();
    let a = 0.7 + rng.random::<f32>() * 0.3;
    [r / 255.0, g / 255.0, b / 255.0, a]
}

/// GPU/canvas friendly particle snapshot
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 2],
    pub radius: f32,
    pub _pad: f32,
    pub color: [f32; 4],
}
