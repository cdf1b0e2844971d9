//! Enemy steering and culling
//!
//! Enemies pursue the player directly with a slowly refreshed heading
//! offset, and despawn once they leave the screen or outlive their lifetime.

use glam::Vec2;
use rand::Rng;

use super::state::Enemy;
use crate::normalize_angle;
use crate::tuning::Tuning;

/// Redraw the heading offset once the refresh interval has elapsed
pub fn update_jitter<R: Rng>(enemy: &mut Enemy, rng: &mut R, now: f64, jitter_intensity: f64, interval: f64) {
    if now - enemy.last_jitter_update >= interval {
        let range = (jitter_intensity as f32).to_radians();
        enemy.jitter_angle = (rng.random::<f32>() - 0.5) * 2.0 * range;
        enemy.last_jitter_update = now;
    }
}

/// Advance an enemy toward `target` for `dt_ms` milliseconds
pub fn move_enemy(enemy: &mut Enemy, target: Vec2, dt_ms: f64) {
    let to_target = target - enemy.pos;
    let bearing = to_target.y.atan2(to_target.x);
    let heading = normalize_angle(bearing + enemy.jitter_angle);
    let distance = enemy.speed * (dt_ms / 1000.0) as f32;
    enemy.pos += Vec2::from_angle(heading) * distance;
}

pub fn is_offscreen(pos: Vec2, screen: Vec2, buffer: f32) -> bool {
    pos.x < -buffer || pos.x > screen.x + buffer || pos.y < -buffer || pos.y > screen.y + buffer
}

pub fn is_expired(enemy: &Enemy, now: f64, lifetime: f64) -> bool {
    now - enemy.spawn_time > lifetime
}

/// Steer, move and cull every enemy. Returns the number despawned.
#[allow(clippy::too_many_arguments)]
pub fn update_enemies<R: Rng>(
    enemies: &mut Vec<Enemy>,
    rng: &mut R,
    tuning: &Tuning,
    target: Vec2,
    screen: Vec2,
    dt_ms: f64,
    now: f64,
    jitter_intensity: f64,
) -> usize {
    for enemy in enemies.iter_mut() {
        update_jitter(enemy, rng, now, jitter_intensity, tuning.jitter_update_interval);
        move_enemy(enemy, target, dt_ms);
    }

    let before = enemies.len();
    enemies.retain(|e| {
        !is_offscreen(e.pos, screen, tuning.offscreen_buffer)
            && !is_expired(e, now, tuning.enemy_max_lifetime)
    });
    before - enemies.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SpeedTier;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn enemy(pos: Vec2, speed: f32, spawn_time: f64) -> Enemy {
        Enemy {
            id: 1,
            pos,
            speed_tier: SpeedTier::Slow,
            speed,
            spawn_time,
            jitter_angle: 0.0,
            last_jitter_update: spawn_time,
        }
    }

    #[test]
    fn test_moves_straight_without_jitter() {
        let mut e = enemy(Vec2::ZERO, 100.0, 0.0);
        move_enemy(&mut e, Vec2::new(500.0, 0.0), 500.0);
        assert!((e.pos.x - 50.0).abs() < 1e-3);
        assert!(e.pos.y.abs() < 1e-3);
    }

    #[test]
    fn test_jitter_refreshes_on_interval_only() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut e = enemy(Vec2::ZERO, 100.0, 0.0);

        update_jitter(&mut e, &mut rng, 199.0, 25.0, 200.0);
        assert_eq!(e.jitter_angle, 0.0);
        assert_eq!(e.last_jitter_update, 0.0);

        update_jitter(&mut e, &mut rng, 200.0, 25.0, 200.0);
        assert_eq!(e.last_jitter_update, 200.0);
        assert!(e.jitter_angle.abs() <= 25f32.to_radians());

        let angle = e.jitter_angle;
        update_jitter(&mut e, &mut rng, 300.0, 25.0, 200.0);
        assert_eq!(e.jitter_angle, angle);
    }

    #[test]
    fn test_jitter_stays_within_cone() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut e = enemy(Vec2::ZERO, 100.0, 0.0);
        for i in 1..500 {
            update_jitter(&mut e, &mut rng, i as f64 * 200.0, 10.0, 200.0);
            assert!(e.jitter_angle.abs() <= 10f32.to_radians() + 1e-6);
        }
    }

    #[test]
    fn test_offscreen_uses_buffer() {
        let screen = Vec2::new(400.0, 800.0);
        assert!(!is_offscreen(Vec2::new(-100.0, 0.0), screen, 100.0));
        assert!(is_offscreen(Vec2::new(-100.5, 0.0), screen, 100.0));
        assert!(is_offscreen(Vec2::new(200.0, 901.0), screen, 100.0));
    }

    #[test]
    fn test_update_enemies_culls_expired_and_offscreen() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(0);
        let screen = Vec2::new(400.0, 800.0);
        let target = Vec2::new(200.0, 400.0);
        let mut enemies = vec![
            enemy(Vec2::new(0.0, 0.0), 80.0, 0.0),
            enemy(Vec2::new(100.0, 100.0), 80.0, 5000.0),
            enemy(Vec2::new(-150.0, 400.0), 0.0, 5000.0),
        ];
        let removed = update_enemies(&mut enemies, &mut rng, &tuning, target, screen, 16.0, 5000.0, 10.0);
        assert_eq!(removed, 2);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].spawn_time, 5000.0);
    }
}
