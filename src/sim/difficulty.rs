//! Difficulty curve
//!
//! Pure functions of accumulated play time. Every parameter ramps linearly
//! from its initial to its final value and then holds.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Per-frame difficulty parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Minimum time between enemy spawns (ms)
    pub spawn_interval: f64,
    /// Concurrent enemy cap
    pub max_enemies: usize,
    /// Half-width of the steering noise cone (degrees)
    pub jitter_intensity: f64,
}

/// Where enemies may appear along the screen border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnZone {
    /// The four corners only
    Corner,
    /// Corners plus edge midpoints
    Edge,
    /// Anywhere on the perimeter
    Any,
}

/// Linear ramp from `start` to `end` over `duration`, clamped at both ends
#[inline]
pub fn lerp_clamped(start: f64, end: f64, elapsed: f64, duration: f64) -> f64 {
    let t = (elapsed / duration).clamp(0.0, 1.0);
    start + (end - start) * t
}

pub fn difficulty_params(tuning: &Tuning, play_time: f64) -> DifficultyParams {
    DifficultyParams {
        spawn_interval: lerp_clamped(
            tuning.initial_spawn_interval,
            tuning.min_spawn_interval,
            play_time,
            tuning.spawn_scale_duration,
        ),
        max_enemies: lerp_clamped(
            tuning.initial_max_enemies,
            tuning.final_max_enemies,
            play_time,
            tuning.max_enemies_scale_duration,
        )
        .floor()
        .max(0.0) as usize,
        jitter_intensity: lerp_clamped(
            tuning.initial_jitter,
            tuning.max_jitter,
            play_time,
            tuning.jitter_scale_duration,
        ),
    }
}

pub fn spawn_zone(tuning: &Tuning, play_time: f64) -> SpawnZone {
    if play_time < tuning.corners_only_until {
        SpawnZone::Corner
    } else if play_time < tuning.edges_until {
        SpawnZone::Edge
    } else {
        SpawnZone::Any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_params() {
        let tuning = Tuning::default();
        let p = difficulty_params(&tuning, 0.0);
        assert_eq!(p.spawn_interval, 2000.0);
        assert_eq!(p.max_enemies, 4);
        assert_eq!(p.jitter_intensity, 10.0);
    }

    #[test]
    fn test_params_reach_final_values() {
        let tuning = Tuning::default();
        let p = difficulty_params(&tuning, 60_000.0);
        assert_eq!(p.spawn_interval, 300.0);
        assert_eq!(p.max_enemies, 12);
        assert_eq!(p.jitter_intensity, 25.0);
    }

    #[test]
    fn test_params_clamp_past_duration() {
        let tuning = Tuning::default();
        let at_end = difficulty_params(&tuning, tuning.spawn_scale_duration);
        let twice = difficulty_params(&tuning, tuning.spawn_scale_duration * 2.0);
        assert_eq!(at_end.spawn_interval, tuning.min_spawn_interval);
        assert_eq!(at_end.spawn_interval, twice.spawn_interval);
        assert_eq!(at_end.jitter_intensity, twice.jitter_intensity);

        let at_end = difficulty_params(&tuning, tuning.max_enemies_scale_duration);
        let twice = difficulty_params(&tuning, tuning.max_enemies_scale_duration * 2.0);
        assert_eq!(at_end.max_enemies, 12);
        assert_eq!(at_end, twice);
    }

    #[test]
    fn test_max_enemies_is_floored() {
        let tuning = Tuning::default();
        // 4 + 8 * (7_000 / 60_000) = 4.93
        assert_eq!(difficulty_params(&tuning, 7_000.0).max_enemies, 4);
        // 4 + 8 * (7_500 / 60_000) = 5.0
        assert_eq!(difficulty_params(&tuning, 7_500.0).max_enemies, 5);
    }

    #[test]
    fn test_spawn_zone_progression() {
        let tuning = Tuning::default();
        assert_eq!(spawn_zone(&tuning, 0.0), SpawnZone::Corner);
        assert_eq!(spawn_zone(&tuning, 9_999.0), SpawnZone::Corner);
        assert_eq!(spawn_zone(&tuning, 10_000.0), SpawnZone::Edge);
        assert_eq!(spawn_zone(&tuning, 24_999.0), SpawnZone::Edge);
        assert_eq!(spawn_zone(&tuning, 25_000.0), SpawnZone::Any);
    }

    proptest! {
        #[test]
        fn prop_difficulty_is_monotonic(t1 in 0.0f64..200_000.0, dt in 0.0f64..200_000.0) {
            let tuning = Tuning::default();
            let a = difficulty_params(&tuning, t1);
            let b = difficulty_params(&tuning, t1 + dt);
            prop_assert!(b.spawn_interval <= a.spawn_interval);
            prop_assert!(b.max_enemies >= a.max_enemies);
            prop_assert!(b.jitter_intensity >= a.jitter_intensity);
        }

        #[test]
        fn prop_difficulty_is_pure(t in 0.0f64..200_000.0) {
            let tuning = Tuning::default();
            prop_assert_eq!(difficulty_params(&tuning, t), difficulty_params(&tuning, t));
        }
    }
}
