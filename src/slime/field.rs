//! Particle field and the per-tick motion update
//!
//! One tick, per particle in order:
//! 1. Cursor force (only when physics is on and a cursor is pressed)
//! 2. Boundary reflection
//! 3. Integration, re-checked against the walls
//! 4. Viscous damping

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boundary::BoundaryPolicy;
use super::force::InteractionForce;
use super::particle::{Particle, ParticleInstance, random_point};
use crate::consts::{DEFAULT_ELASTICITY, DEFAULT_VISCOSITY, LINK_ALPHA};

/// Per-tick snapshot of everything the update reads besides the particles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldState {
    pub width: f32,
    pub height: f32,
    /// Pressed pointer position, None when released
    pub cursor: Option<Vec2>,
    pub physics_enabled: bool,
    /// Velocity multiplier per tick, in (0, 1]
    pub viscosity: f32,
    /// Bounce restitution, in [0, 1]
    pub elasticity: f32,
}

impl FieldState {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            cursor: None,
            physics_enabled: true,
            viscosity: DEFAULT_VISCOSITY,
            elasticity: DEFAULT_ELASTICITY,
        }
    }

    #[inline]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Whether the configuration respects the physics preconditions
    pub fn is_valid(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
            && self.viscosity > 0.0
            && self.viscosity <= 1.0
            && (0.0..=1.0).contains(&self.elasticity)
            && self.cursor.is_none_or(|c| c.is_finite())
    }

    /// Cursor that should act this tick
    #[inline]
    pub fn active_cursor(&self) -> Option<Vec2> {
        if self.physics_enabled { self.cursor } else { None }
    }
}

/// Connecting line between two nearby particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    /// Line opacity, fading to 0 at the link distance
    pub alpha: f32,
}

/// Owns the particles and the RNG used to (re)scatter them
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    force: InteractionForce,
    rng: Pcg32,
}

impl ParticleField {
    /// Scatter `count` particles at rest over the field
    pub fn new(count: usize, width: f32, height: f32, seed: u64) -> Self {
        let mut field = Self {
            particles: Vec::with_capacity(count),
            force: InteractionForce::default(),
            rng: Pcg32::seed_from_u64(seed),
        };
        field.respawn(count, width, height);
        field
    }

    /// Wrap an existing particle set
    pub fn from_particles(particles: Vec<Particle>, seed: u64) -> Self {
        Self {
            particles,
            force: InteractionForce::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Advance every particle by one step
    pub fn tick(&mut self, state: &FieldState) {
        debug_assert!(state.is_valid(), "invalid field state: {:?}", state);

        let extent = state.extent();
        let cursor = state.active_cursor();
        let boundary = BoundaryPolicy::new(state.elasticity);

        for p in &mut self.particles {
            debug_assert!(p.pos.is_finite() && p.vel.is_finite() && p.radius >= 0.0);

            if let Some(c) = cursor {
                p.vel += self.force.contribution(p.pos, c);
            }

            boundary.apply(&mut p.pos, &mut p.vel, extent);

            p.pos += p.vel;
            boundary.apply(&mut p.pos, &mut p.vel, extent);

            p.vel *= state.viscosity;
        }
    }

    /// Re-scatter every particle and stop it
    pub fn reset(&mut self, width: f32, height: f32) {
        for p in &mut self.particles {
            p.pos = random_point(&mut self.rng, width, height);
            p.vel = Vec2::ZERO;
        }
    }

    /// Replace the whole batch with `count` fresh particles
    pub fn respawn(&mut self, count: usize, width: f32, height: f32) {
        self.particles.clear();
        self.particles
            .extend((0..count).map(|_| Particle::spawn(&mut self.rng, width, height)));
    }

    /// Pull every particle back inside a (possibly smaller) field
    pub fn contain(&mut self, extent: Vec2) {
        for p in &mut self.particles {
            BoundaryPolicy::clamp(&mut p.pos, &mut p.vel, extent);
        }
    }

    /// Pairs closer than `max_distance`, for the sticky line overlay
    pub fn links(&self, max_distance: f32) -> impl Iterator<Item = Link> + '_ {
        let particles = &self.particles;
        (0..particles.len()).flat_map(move |a| {
            (a + 1..particles.len()).filter_map(move |b| {
                let dist = particles[a].pos.distance(particles[b].pos);
                (dist < max_distance).then(|| Link {
                    a,
                    b,
                    alpha: LINK_ALPHA * (1.0 - dist / max_distance),
                })
            })
        })
    }

    /// Packed snapshot for a renderer
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.particles.iter().map(Particle::instance).collect()
    }

    /// Sum of 0.5 * |v|^2 over unit-mass particles
    pub fn kinetic_energy(&self) -> f32 {
        self.particles
            .iter()
            .map(|p| 0.5 * p.vel.length_squared())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LINK_DISTANCE;

    fn single(pos: Vec2, vel: Vec2) -> ParticleField {
        let mut p = Particle::new(pos, 3.0, [1.0; 4]);
        p.vel = vel;
        ParticleField::from_particles(vec![p], 1)
    }

    fn undamped(width: f32, height: f32, elasticity: f32) -> FieldState {
        FieldState {
            viscosity: 1.0,
            elasticity,
            ..FieldState::new(width, height)
        }
    }

    #[test]
    fn test_wall_hit_scenario() {
        let state = undamped(100.0, 100.0, 0.8);
        let mut field = single(Vec2::new(5.0, 5.0), Vec2::new(-10.0, 0.0));

        field.tick(&state);

        let p = &field.particles()[0];
        assert_eq!(p.pos.x, 0.0);
        assert!((p.vel.x - 10.0 * 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_wall_hit_is_then_damped() {
        let state = FieldState::new(100.0, 100.0);
        let mut field = single(Vec2::new(5.0, 5.0), Vec2::new(-10.0, 0.0));

        field.tick(&state);

        let p = &field.particles()[0];
        assert_eq!(p.pos.x, 0.0);
        let expected = 10.0 * DEFAULT_ELASTICITY * DEFAULT_VISCOSITY;
        assert!((p.vel.x - expected).abs() < 1e-5);
    }

    #[test]
    fn test_physics_disabled_ignores_cursor() {
        let mut state = FieldState::new(200.0, 200.0);
        state.physics_enabled = false;
        state.cursor = Some(Vec2::new(100.0, 100.0));
        let mut field = single(Vec2::new(110.0, 100.0), Vec2::ZERO);

        for _ in 0..10 {
            field.tick(&state);
        }

        let p = &field.particles()[0];
        assert_eq!(p.vel, Vec2::ZERO);
        assert_eq!(p.pos, Vec2::new(110.0, 100.0));
    }

    #[test]
    fn test_cursor_pushes_particle_away() {
        let mut state = FieldState::new(200.0, 200.0);
        state.cursor = Some(Vec2::new(100.0, 100.0));
        let mut field = single(Vec2::new(110.0, 100.0), Vec2::ZERO);

        field.tick(&state);

        let p = &field.particles()[0];
        assert!(p.vel.x > 0.0);
        assert!(p.pos.x > 110.0);
    }

    #[test]
    fn test_cursor_on_particle_stays_finite() {
        let mut state = FieldState::new(100.0, 100.0);
        state.cursor = Some(Vec2::new(50.0, 50.0));
        let mut field = single(Vec2::new(50.0, 50.0), Vec2::ZERO);

        field.tick(&state);

        let p = &field.particles()[0];
        assert!(p.vel.is_finite());
        assert!(p.pos.is_finite());
    }

    #[test]
    fn test_inelastic_comes_to_rest_at_wall() {
        let state = FieldState {
            elasticity: 0.0,
            ..FieldState::new(100.0, 100.0)
        };
        let mut field = single(Vec2::new(90.0, 50.0), Vec2::new(6.0, 0.0));

        for _ in 0..50 {
            field.tick(&state);
        }

        let p = &field.particles()[0];
        assert_eq!(p.pos.x, 100.0);
        assert_eq!(p.vel.x, 0.0);
    }

    #[test]
    fn test_elastic_undamped_conserves_speed() {
        let state = undamped(100.0, 80.0, 1.0);
        let mut field = single(Vec2::new(30.0, 20.0), Vec2::new(7.0, -3.0));
        let speed = field.particles()[0].speed();

        for _ in 0..2000 {
            field.tick(&state);
            let p = &field.particles()[0];
            assert!((p.speed() - speed).abs() < 1e-3);
        }
    }

    #[test]
    fn test_reset_zeroes_velocity() {
        let state = FieldState::new(300.0, 200.0);
        let mut field = ParticleField::new(40, 300.0, 200.0, 5);
        for p in field.particles_mut() {
            p.vel = Vec2::new(3.0, -2.0);
        }

        field.reset(state.width, state.height);

        assert_eq!(field.len(), 40);
        assert!(field.particles().iter().all(|p| p.vel == Vec2::ZERO));
        assert_eq!(field.kinetic_energy(), 0.0);
    }

    #[test]
    fn test_respawn_changes_count() {
        let mut field = ParticleField::new(10, 100.0, 100.0, 3);
        field.respawn(25, 100.0, 100.0);
        assert_eq!(field.len(), 25);
        field.respawn(0, 100.0, 100.0);
        assert!(field.is_empty());
    }

    #[test]
    fn test_contain_after_shrink() {
        let mut field = ParticleField::new(100, 400.0, 400.0, 9);

        field.contain(Vec2::new(100.0, 50.0));

        for p in field.particles() {
            assert!(p.pos.x <= 100.0 && p.pos.y <= 50.0);
        }
    }

    #[test]
    fn test_contain_stops_outward_motion() {
        let mut field = single(Vec2::new(390.0, 100.0), Vec2::new(5.0, 0.0));

        field.contain(Vec2::new(200.0, 300.0));

        let p = &field.particles()[0];
        assert_eq!(p.pos, Vec2::new(200.0, 100.0));
        assert_eq!(p.vel, Vec2::ZERO);
    }

    #[test]
    fn test_links_respect_distance() {
        let particles = vec![
            Particle::new(Vec2::new(0.0, 0.0), 2.0, [1.0; 4]),
            Particle::new(Vec2::new(25.0, 0.0), 2.0, [1.0; 4]),
            Particle::new(Vec2::new(200.0, 0.0), 2.0, [1.0; 4]),
        ];
        let field = ParticleField::from_particles(particles, 1);

        let links: Vec<Link> = field.links(LINK_DISTANCE).collect();
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].a, links[0].b), (0, 1));
        assert!((links[0].alpha - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_instances_follow_particles() {
        let field = ParticleField::new(12, 100.0, 100.0, 8);
        let instances = field.instances();
        assert_eq!(instances.len(), 12);
        for (instance, p) in instances.iter().zip(field.particles()) {
            assert_eq!(instance.position, p.pos.to_array());
            assert_eq!(instance.radius, p.radius);
        }
        assert_eq!(bytemuck::cast_slice::<_, u8>(&instances).len(), 12 * 32);
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = ParticleField::new(20, 100.0, 100.0, 42);
        let b = ParticleField::new(20, 100.0, 100.0, 42);
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.radius, pb.radius);
        }
    }
}
