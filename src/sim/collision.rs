//! Circle-circle collision detection
//!
//! Every entity is a circle. Two circles touch when the distance between
//! their centers is strictly less than the sum of their radii.

use glam::Vec2;

use super::state::Positioned;

/// Whether two circles overlap
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// First entity overlapping the circle at `center`, if any
pub fn check_collision<'a, T: Positioned>(
    center: Vec2,
    radius: f32,
    entities: &'a [T],
    entity_radius: f32,
) -> Option<&'a T> {
    entities
        .iter()
        .find(|e| circles_overlap(center, radius, e.pos(), entity_radius))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Booster, BoosterKind, Enemy, SpeedTier};
    use proptest::prelude::*;

    fn enemy_at(id: u32, x: f32, y: f32) -> Enemy {
        Enemy {
            id,
            pos: Vec2::new(x, y),
            speed_tier: SpeedTier::Medium,
            speed: 140.0,
            spawn_time: 0.0,
            jitter_angle: 0.0,
            last_jitter_update: 0.0,
        }
    }

    #[test]
    fn test_enemy_within_reach_collides() {
        let enemies = [enemy_at(1, 30.0, 0.0)];
        let hit = check_collision(Vec2::ZERO, 20.0, &enemies, 15.0);
        assert_eq!(hit.map(|e| e.id), Some(1));
    }

    #[test]
    fn test_enemy_out_of_reach_misses() {
        let enemies = [enemy_at(1, 40.0, 0.0)];
        assert!(check_collision(Vec2::ZERO, 20.0, &enemies, 15.0).is_none());
    }

    #[test]
    fn test_touching_circles_do_not_collide() {
        let enemies = [enemy_at(1, 35.0, 0.0)];
        assert!(check_collision(Vec2::ZERO, 20.0, &enemies, 15.0).is_none());
    }

    #[test]
    fn test_returns_first_match() {
        let enemies = [enemy_at(1, 500.0, 0.0), enemy_at(2, 10.0, 0.0), enemy_at(3, 0.0, 10.0)];
        let hit = check_collision(Vec2::ZERO, 20.0, &enemies, 15.0);
        assert_eq!(hit.map(|e| e.id), Some(2));
    }

    #[test]
    fn test_works_for_pickups() {
        let boosters = [Booster {
            id: 9,
            kind: BoosterKind::Plus,
            pos: Vec2::new(50.0, 50.0),
            spawn_time: 0.0,
        }];
        assert!(check_collision(Vec2::new(60.0, 60.0), 36.0, &boosters, 28.0).is_some());
        assert!(check_collision(Vec2::new(200.0, 60.0), 36.0, &boosters, 28.0).is_none());
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            ra in 0.0f32..100.0, rb in 0.0f32..100.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(circles_overlap(a, ra, b, rb), circles_overlap(b, rb, a, ra));
        }
    }
}
