//! Despawn scoring
//!
//! Points are paid for every enemy the player outlasts. The payout grows
//! with play time and with how crowded the screen is.

use crate::tuning::Tuning;

/// Density bonus for the current live enemy count
pub fn enemy_count_multiplier(tuning: &Tuning, live_enemies: usize) -> f64 {
    if live_enemies >= tuning.count_threshold_high {
        tuning.count_multiplier_high
    } else if live_enemies >= tuning.count_threshold_medium {
        tuning.count_multiplier_medium
    } else {
        1.0
    }
}

/// +1.0 for every minute of unpaused play
pub fn time_multiplier(play_time: f64) -> f64 {
    1.0 + play_time / 60_000.0
}

/// Points paid per despawned enemy. `score_multiplier` is 1 unless the
/// multiplier booster is active.
pub fn points_per_enemy(tuning: &Tuning, play_time: f64, live_enemies: usize, score_multiplier: u64) -> u64 {
    let base = tuning.points_per_enemy as f64
        * time_multiplier(play_time)
        * enemy_count_multiplier(tuning, live_enemies);
    (base.floor() as u64) * score_multiplier
}

/// Total award for `removed` enemies despawned in one frame
pub fn despawn_award(
    tuning: &Tuning,
    removed: usize,
    play_time: f64,
    live_enemies: usize,
    score_multiplier: u64,
) -> u64 {
    removed as u64 * points_per_enemy(tuning, play_time, live_enemies, score_multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_award() {
        let tuning = Tuning::default();
        assert_eq!(despawn_award(&tuning, 3, 0.0, 2, 1), 30);
        assert_eq!(despawn_award(&tuning, 0, 0.0, 2, 1), 0);
    }

    #[test]
    fn test_time_multiplier_grows_per_minute() {
        let tuning = Tuning::default();
        assert_eq!(points_per_enemy(&tuning, 60_000.0, 0, 1), 20);
        // 10 * 1.5 = 15
        assert_eq!(points_per_enemy(&tuning, 30_000.0, 0, 1), 15);
        // 10 * 1.0999 floors to 10
        assert_eq!(points_per_enemy(&tuning, 5_999.0, 0, 1), 10);
    }

    #[test]
    fn test_density_tiers() {
        let tuning = Tuning::default();
        assert_eq!(enemy_count_multiplier(&tuning, 3), 1.0);
        assert_eq!(enemy_count_multiplier(&tuning, 4), 1.5);
        assert_eq!(enemy_count_multiplier(&tuning, 6), 1.5);
        assert_eq!(enemy_count_multiplier(&tuning, 7), 2.0);
        assert_eq!(points_per_enemy(&tuning, 0.0, 7, 1), 20);
    }

    #[test]
    fn test_multiplier_applies_after_floor() {
        let tuning = Tuning::default();
        // floor(10 * 1.05 * 1.5) = floor(15.75) = 15, then x3
        assert_eq!(points_per_enemy(&tuning, 3_000.0, 4, 3), 45);
    }
}
