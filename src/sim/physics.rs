//! Stateless 2D physics helpers for a rectangular field
//!
//! Everything here operates on circles: collision is circle overlap, boundary
//! handling is per-axis clamping of circle centers. Velocities are in field
//! units per frame.

use glam::Vec2;
use rand::Rng;

/// Velocity components below this are snapped to zero by friction
const REST_EPSILON: f32 = 0.01;

/// A spawn point on a field edge with an inward-biased travel direction
#[derive(Debug, Clone, Copy)]
pub struct WallSpawn {
    pub position: Vec2,
    /// Unit vector pointing into the field
    pub direction: Vec2,
}

/// Physics helper bound to a field's dimensions
#[derive(Debug, Clone, Copy)]
pub struct Physics {
    pub width: f32,
    pub height: f32,
}

impl Physics {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Circle overlap test. Tangent circles do not collide.
    pub fn circle_collision(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
        a_pos.distance(b_pos) < a_radius + b_radius
    }

    /// Clamp a circle center into `[padding + radius, dim - padding - radius]`
    /// on each axis independently, zeroing the velocity component on any axis
    /// that was clamped. Returns whether any clamp occurred.
    pub fn constrain_to_bounds(
        &self,
        position: &mut Vec2,
        velocity: &mut Vec2,
        radius: f32,
        padding: f32,
    ) -> bool {
        let min_x = padding + radius;
        let max_x = self.width - padding - radius;
        let min_y = padding + radius;
        let max_y = self.height - padding - radius;

        let mut clamped = false;

        if position.x < min_x {
            position.x = min_x;
            velocity.x = 0.0;
            clamped = true;
        } else if position.x > max_x {
            position.x = max_x;
            velocity.x = 0.0;
            clamped = true;
        }

        if position.y < min_y {
            position.y = min_y;
            velocity.y = 0.0;
            clamped = true;
        } else if position.y > max_y {
            position.y = max_y;
            velocity.y = 0.0;
            clamped = true;
        }

        clamped
    }

    /// Whether a circle center has drifted more than `margin` past any edge
    pub fn is_out_of_bounds(&self, position: Vec2, margin: f32) -> bool {
        position.x < -margin
            || position.x > self.width + margin
            || position.y < -margin
            || position.y > self.height + margin
    }

    /// Pick a uniform point on one of the four edges, `offset` units outside
    /// the field, with a normalized direction pointing inward (lateral
    /// deviation up to ±0.4 before normalization).
    pub fn random_wall_spawn<R: Rng>(&self, rng: &mut R, offset: f32) -> WallSpawn {
        let wall: u8 = rng.random_range(0..4);
        let deviation = (rng.random::<f32>() - 0.5) * 0.8;

        let (position, direction) = match wall {
            // top
            0 => (
                Vec2::new(rng.random_range(0.0..self.width), -offset),
                Vec2::new(deviation, 1.0),
            ),
            // right
            1 => (
                Vec2::new(self.width + offset, rng.random_range(0.0..self.height)),
                Vec2::new(-1.0, deviation),
            ),
            // bottom
            2 => (
                Vec2::new(rng.random_range(0.0..self.width), self.height + offset),
                Vec2::new(deviation, -1.0),
            ),
            // left
            _ => (
                Vec2::new(-offset, rng.random_range(0.0..self.height)),
                Vec2::new(1.0, deviation),
            ),
        };

        WallSpawn {
            position,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Uniform position at least `margin` from every edge
    pub fn random_position<R: Rng>(&self, rng: &mut R, margin: f32) -> Vec2 {
        Vec2::new(
            rng.random_range(margin..self.width - margin),
            rng.random_range(margin..self.height - margin),
        )
    }

    /// Scale velocity in place, snapping near-zero components to rest
    pub fn apply_friction(velocity: &mut Vec2, coefficient: f32) {
        *velocity *= coefficient;
        if velocity.x.abs() < REST_EPSILON {
            velocity.x = 0.0;
        }
        if velocity.y.abs() < REST_EPSILON {
            velocity.y = 0.0;
        }
    }

    /// Reflect a velocity about a unit normal: v - 2(v·n)n
    pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
        velocity - 2.0 * velocity.dot(normal) * normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn tangent_circles_do_not_collide() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert!(!Physics::circle_collision(a, 5.0, b, 5.0));
        assert!(Physics::circle_collision(a, 5.0, b, 5.01));
    }

    #[test]
    fn clamp_zeroes_only_the_clamped_axis() {
        let physics = Physics::new(600.0, 600.0);
        let mut pos = Vec2::new(-10.0, 300.0);
        let mut vel = Vec2::new(-4.0, 2.0);

        let clamped = physics.constrain_to_bounds(&mut pos, &mut vel, 25.0, 0.0);
        assert!(clamped);
        assert_eq!(pos.x, 25.0);
        assert_eq!(vel.x, 0.0);
        assert_eq!(vel.y, 2.0);
    }

    #[test]
    fn clamp_inside_bounds_is_a_no_op() {
        let physics = Physics::new(600.0, 600.0);
        let mut pos = Vec2::new(300.0, 300.0);
        let mut vel = Vec2::new(3.0, -3.0);

        assert!(!physics.constrain_to_bounds(&mut pos, &mut vel, 25.0, 0.0));
        assert_eq!(pos, Vec2::new(300.0, 300.0));
        assert_eq!(vel, Vec2::new(3.0, -3.0));
    }

    #[test]
    fn out_of_bounds_respects_margin() {
        let physics = Physics::new(600.0, 600.0);
        assert!(!physics.is_out_of_bounds(Vec2::new(-50.0, 300.0), 50.0));
        assert!(physics.is_out_of_bounds(Vec2::new(-50.1, 300.0), 50.0));
        assert!(physics.is_out_of_bounds(Vec2::new(300.0, 651.0), 50.0));
    }

    #[test]
    fn wall_spawns_start_outside_and_head_inward() {
        let physics = Physics::new(600.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(7);

        for _ in 0..200 {
            let spawn = physics.random_wall_spawn(&mut rng, 20.0);
            assert!(physics.is_out_of_bounds(spawn.position, 10.0));
            assert!((spawn.direction.length() - 1.0).abs() < 1e-4);

            // Direction always has a positive component toward the center.
            let to_center = Vec2::new(300.0, 300.0) - spawn.position;
            assert!(
                spawn.direction.dot(to_center) > 0.0,
                "spawn heads away from the field: {spawn:?}"
            );
        }
    }

    #[test]
    fn friction_snaps_small_components_to_rest() {
        let mut vel = Vec2::new(0.009, 2.0);
        Physics::apply_friction(&mut vel, 0.95);
        assert_eq!(vel.x, 0.0);
        assert!((vel.y - 1.9).abs() < 1e-5);
    }

    #[test]
    fn reflect_inverts_normal_component() {
        let reflected = Physics::reflect(Vec2::new(3.0, -4.0), Vec2::new(0.0, 1.0));
        assert_eq!(reflected, Vec2::new(3.0, 4.0));
    }

    proptest! {
        #[test]
        fn clamped_positions_always_land_in_bounds(
            x in -1000.0f32..1600.0,
            y in -1000.0f32..1600.0,
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
            radius in 1.0f32..60.0,
        ) {
            let physics = Physics::new(600.0, 600.0);
            let mut pos = Vec2::new(x, y);
            let mut vel = Vec2::new(vx, vy);

            physics.constrain_to_bounds(&mut pos, &mut vel, radius, 0.0);

            prop_assert!(pos.x >= radius && pos.x <= 600.0 - radius);
            prop_assert!(pos.y >= radius && pos.y <= 600.0 - radius);
        }

        #[test]
        fn clamp_is_idempotent(
            x in -1000.0f32..1600.0,
            y in -1000.0f32..1600.0,
            radius in 1.0f32..60.0,
        ) {
            let physics = Physics::new(600.0, 600.0);
            let mut pos = Vec2::new(x, y);
            let mut vel = Vec2::new(5.0, 5.0);

            physics.constrain_to_bounds(&mut pos, &mut vel, radius, 0.0);
            let settled = pos;
            let clamped_again = physics.constrain_to_bounds(&mut pos, &mut vel, radius, 0.0);

            prop_assert!(!clamped_again);
            prop_assert_eq!(settled, pos);
        }

        #[test]
        fn collision_is_symmetric(
            ax in 0.0f32..600.0, ay in 0.0f32..600.0,
            bx in 0.0f32..600.0, by in 0.0f32..600.0,
            ar in 1.0f32..50.0, br in 1.0f32..50.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(
                Physics::circle_collision(a, ar, b, br),
                Physics::circle_collision(b, br, a, ar)
            );
        }
    }
}
