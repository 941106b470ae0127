//! Wall reflection for the rectangular slime field

use glam::Vec2;

/// Clamp-and-reflect policy for the field edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPolicy {
    /// Fraction of velocity kept on a bounce (0 = stop, 1 = lossless)
    pub elasticity: f32,
}

impl BoundaryPolicy {
    pub fn new(elasticity: f32) -> Self {
        debug_assert!((0.0..=1.0).contains(&elasticity));
        Self { elasticity }
    }

    /// Keep `pos` inside `[0, extent]` on both axes, reflecting `vel` at walls.
    ///
    /// Returns true if either axis touched a wall.
    pub fn apply(&self, pos: &mut Vec2, vel: &mut Vec2, extent: Vec2) -> bool {
        let hit_x = self.resolve_axis(&mut pos.x, &mut vel.x, extent.x);
        let hit_y = self.resolve_axis(&mut pos.y, &mut vel.y, extent.y);
        hit_x || hit_y
    }

    /// Keep `pos` inside `[0, extent]`, zeroing any velocity that points out.
    ///
    /// Used when the field shrinks under a particle; nothing bounces.
    pub fn clamp(pos: &mut Vec2, vel: &mut Vec2, extent: Vec2) -> bool {
        let hit_x = clamp_axis(&mut pos.x, &mut vel.x, extent.x);
        let hit_y = clamp_axis(&mut pos.y, &mut vel.y, extent.y);
        hit_x || hit_y
    }

    fn resolve_axis(&self, pos: &mut f32, vel: &mut f32, extent: f32) -> bool {
        if *pos <= 0.0 {
            *pos = 0.0;
            // Inward velocity is already leaving the wall
            if *vel <= 0.0 {
                *vel = -*vel * self.elasticity;
            }
            true
        } else if *pos >= extent {
            *pos = extent;
            if *vel >= 0.0 {
                *vel = -*vel * self.elasticity;
            }
            true
        } else {
            false
        }
    }
}

fn clamp_axis(pos: &mut f32, vel: &mut f32, extent: f32) -> bool {
    if *pos <= 0.0 {
        *pos = 0.0;
        *vel = vel.max(0.0);
        true
    } else if *pos >= extent {
        *pos = extent;
        *vel = vel.min(0.0);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTENT: Vec2 = Vec2::new(100.0, 100.0);

    #[test]
    fn test_interior_untouched() {
        let policy = BoundaryPolicy::new(0.8);
        let mut pos = Vec2::new(50.0, 50.0);
        let mut vel = Vec2::new(-3.0, 2.0);
        assert!(!policy.apply(&mut pos, &mut vel, EXTENT));
        assert_eq!(pos, Vec2::new(50.0, 50.0));
        assert_eq!(vel, Vec2::new(-3.0, 2.0));
    }

    #[test]
    fn test_left_wall_reflects() {
        let policy = BoundaryPolicy::new(0.5);
        let mut pos = Vec2::new(-4.0, 50.0);
        let mut vel = Vec2::new(-10.0, 1.0);
        assert!(policy.apply(&mut pos, &mut vel, EXTENT));
        assert_eq!(pos.x, 0.0);
        assert_eq!(vel.x, 5.0);
        assert_eq!(vel.y, 1.0);
    }

    #[test]
    fn test_far_wall_reflects() {
        let policy = BoundaryPolicy::new(1.0);
        let mut pos = Vec2::new(50.0, 130.0);
        let mut vel = Vec2::new(0.0, 7.0);
        policy.apply(&mut pos, &mut vel, EXTENT);
        assert_eq!(pos.y, 100.0);
        assert_eq!(vel.y, -7.0);
    }

    #[test]
    fn test_inward_velocity_not_reflected_again() {
        let policy = BoundaryPolicy::new(0.8);
        let mut pos = Vec2::new(0.0, 50.0);
        let mut vel = Vec2::new(4.0, 0.0);
        policy.apply(&mut pos, &mut vel, EXTENT);
        assert_eq!(vel.x, 4.0);
    }

    #[test]
    fn test_inelastic_stops() {
        let policy = BoundaryPolicy::new(0.0);
        let mut pos = Vec2::new(105.0, 50.0);
        let mut vel = Vec2::new(9.0, 0.0);
        policy.apply(&mut pos, &mut vel, EXTENT);
        assert_eq!(pos.x, 100.0);
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn test_clamp_zeroes_outward_velocity() {
        let mut pos = Vec2::new(390.0, 100.0);
        let mut vel = Vec2::new(5.0, -2.0);
        assert!(BoundaryPolicy::clamp(&mut pos, &mut vel, Vec2::new(200.0, 150.0)));
        assert_eq!(pos, Vec2::new(200.0, 100.0));
        assert_eq!(vel, Vec2::new(0.0, -2.0));

        // Already heading back in
        let mut pos = Vec2::new(-3.0, 10.0);
        let mut vel = Vec2::new(1.5, 0.0);
        BoundaryPolicy::clamp(&mut pos, &mut vel, EXTENT);
        assert_eq!(pos.x, 0.0);
        assert_eq!(vel.x, 1.5);
    }
}
