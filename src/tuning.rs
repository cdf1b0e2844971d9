//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults match the shipped
//! balance; a JSON file can override any subset of fields.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating a tuning file
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot work with
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read tuning file: {e}"),
            Self::Parse(e) => write!(f, "failed to parse tuning JSON: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning field `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Gameplay constants. Times are milliseconds, speeds are pixels/second,
/// angles are degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Radii ===
    pub player_radius: f32,
    pub enemy_radius: f32,
    pub booster_radius: f32,
    pub debuff_radius: f32,

    // === Scoring ===
    /// Base points per despawned enemy
    pub points_per_enemy: u64,
    /// Live enemy count at which the medium density bonus applies
    pub count_threshold_medium: usize,
    /// Live enemy count at which the high density bonus applies
    pub count_threshold_high: usize,
    pub count_multiplier_medium: f64,
    pub count_multiplier_high: f64,

    // === Difficulty ramps ===
    pub initial_spawn_interval: f64,
    pub min_spawn_interval: f64,
    pub spawn_scale_duration: f64,
    pub initial_max_enemies: f64,
    pub final_max_enemies: f64,
    pub max_enemies_scale_duration: f64,
    pub initial_jitter: f64,
    pub max_jitter: f64,
    pub jitter_scale_duration: f64,
    pub jitter_update_interval: f64,

    // === Spawn zones ===
    pub corners_only_until: f64,
    pub edges_until: f64,
    /// Fraction of each screen dimension covered by the handedness exclusion zone
    pub exclusion_zone_percent: f32,
    /// Attempts when searching a random perimeter point
    pub spawn_attempts: u32,

    // === Enemy speed tiers ===
    pub speed_slow: f32,
    pub speed_medium: f32,
    pub speed_fast: f32,
    pub medium_unlock_time: f64,
    pub fast_unlock_time: f64,
    /// Window after the fast unlock over which tier weights keep ramping
    pub tier_ramp_duration: f64,

    // === Cleanup ===
    pub offscreen_buffer: f32,
    pub enemy_max_lifetime: f64,

    // === Boosters ===
    pub booster_spawn_interval: f64,
    pub booster_lifetime: f64,
    pub booster_plus_points: u64,
    pub booster_shield_duration: f64,
    pub booster_multiplier_duration: f64,
    pub booster_multiplier_value: u64,

    // === Debuffs ===
    pub debuff_spawn_interval: f64,
    pub debuff_lifetime: f64,
    pub debuff_unlock_time: f64,
    pub debuff_enlarge_duration: f64,
    pub debuff_enlarge_scale: f32,

    // === Pickup placement ===
    pub pickup_margin: f32,
    pub pickup_min_player_distance: f32,
    pub pickup_attempts: u32,

    // === Blast clears ===
    /// Extra radius cleared around the player when the shield absorbs a hit
    pub shield_blast_padding: f32,
    /// Extra radius cleared around the player on continue
    pub continue_clear_padding: f32,
    pub continue_shield_duration: f64,

    /// Largest frame delta the simulation will integrate in one update
    pub max_frame_delta: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_radius: 36.0,
            enemy_radius: 22.0,
            booster_radius: 28.0,
            debuff_radius: 28.0,

            points_per_enemy: 10,
            count_threshold_medium: 4,
            count_threshold_high: 7,
            count_multiplier_medium: 1.5,
            count_multiplier_high: 2.0,

            initial_spawn_interval: 2000.0,
            min_spawn_interval: 300.0,
            spawn_scale_duration: 45_000.0,
            initial_max_enemies: 4.0,
            final_max_enemies: 12.0,
            max_enemies_scale_duration: 60_000.0,
            initial_jitter: 10.0,
            max_jitter: 25.0,
            jitter_scale_duration: 45_000.0,
            jitter_update_interval: 200.0,

            corners_only_until: 10_000.0,
            edges_until: 25_000.0,
            exclusion_zone_percent: 0.4,
            spawn_attempts: 20,

            speed_slow: 80.0,
            speed_medium: 140.0,
            speed_fast: 220.0,
            medium_unlock_time: 15_000.0,
            fast_unlock_time: 35_000.0,
            tier_ramp_duration: 30_000.0,

            offscreen_buffer: 100.0,
            enemy_max_lifetime: 4000.0,

            booster_spawn_interval: 8000.0,
            booster_lifetime: 5000.0,
            booster_plus_points: 10,
            booster_shield_duration: 3000.0,
            booster_multiplier_duration: 5000.0,
            booster_multiplier_value: 3,

            debuff_spawn_interval: 12_000.0,
            debuff_lifetime: 5000.0,
            debuff_unlock_time: 30_000.0,
            debuff_enlarge_duration: 3000.0,
            debuff_enlarge_scale: 1.2,

            pickup_margin: 60.0,
            pickup_min_player_distance: 150.0,
            pickup_attempts: 20,

            shield_blast_padding: 50.0,
            continue_clear_padding: 100.0,
            continue_shield_duration: 2000.0,

            max_frame_delta: 100.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        let durations = [
            ("initial_spawn_interval", self.initial_spawn_interval),
            ("min_spawn_interval", self.min_spawn_interval),
            ("spawn_scale_duration", self.spawn_scale_duration),
            ("max_enemies_scale_duration", self.max_enemies_scale_duration),
            ("jitter_scale_duration", self.jitter_scale_duration),
            ("jitter_update_interval", self.jitter_update_interval),
            ("tier_ramp_duration", self.tier_ramp_duration),
            ("enemy_max_lifetime", self.enemy_max_lifetime),
            ("booster_spawn_interval", self.booster_spawn_interval),
            ("booster_lifetime", self.booster_lifetime),
            ("debuff_spawn_interval", self.debuff_spawn_interval),
            ("debuff_lifetime", self.debuff_lifetime),
            ("booster_shield_duration", self.booster_shield_duration),
            ("booster_multiplier_duration", self.booster_multiplier_duration),
            ("debuff_enlarge_duration", self.debuff_enlarge_duration),
            ("continue_shield_duration", self.continue_shield_duration),
            ("max_frame_delta", self.max_frame_delta),
        ];
        for (field, value) in durations {
            if value <= 0.0 || !value.is_finite() {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive duration",
                });
            }
        }

        let unlocks = [
            ("corners_only_until", self.corners_only_until),
            ("edges_until", self.edges_until),
            ("medium_unlock_time", self.medium_unlock_time),
            ("fast_unlock_time", self.fast_unlock_time),
            ("debuff_unlock_time", self.debuff_unlock_time),
        ];
        for (field, value) in unlocks {
            if value < 0.0 || !value.is_finite() {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be a non-negative play time",
                });
            }
        }

        let radii = [
            ("player_radius", self.player_radius),
            ("enemy_radius", self.enemy_radius),
            ("booster_radius", self.booster_radius),
            ("debuff_radius", self.debuff_radius),
        ];
        for (field, value) in radii {
            if value < 0.0 || !value.is_finite() {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be a non-negative radius",
                });
            }
        }

        if self.count_threshold_high < self.count_threshold_medium {
            return Err(TuningError::Invalid {
                field: "count_threshold_high",
                reason: "must not be below count_threshold_medium",
            });
        }
        if !(0.0..=1.0).contains(&self.exclusion_zone_percent) {
            return Err(TuningError::Invalid {
                field: "exclusion_zone_percent",
                reason: "must lie within [0, 1]",
            });
        }
        if self.fast_unlock_time < self.medium_unlock_time {
            return Err(TuningError::Invalid {
                field: "fast_unlock_time",
                reason: "must not precede medium_unlock_time",
            });
        }
        if self.edges_until < self.corners_only_until {
            return Err(TuningError::Invalid {
                field: "edges_until",
                reason: "must not precede corners_only_until",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "points_per_enemy": 25, "speed_fast": 300.0 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.points_per_enemy, 25);
        assert_eq!(tuning.speed_fast, 300.0);
        assert_eq!(tuning.player_radius, Tuning::default().player_radius);
    }

    #[test]
    fn test_rejects_zero_duration() {
        let err = Tuning::from_json(r#"{ "spawn_scale_duration": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "spawn_scale_duration",
                ..
            }
        ));
    }

    fn rejected_field(json: &str) -> &'static str {
        match Tuning::from_json(json) {
            Err(TuningError::Invalid { field, .. }) => field,
            other => panic!("expected {json} to be rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_positive_spawn_intervals() {
        assert_eq!(rejected_field(r#"{ "min_spawn_interval": -500.0 }"#), "min_spawn_interval");
        assert_eq!(
            rejected_field(r#"{ "initial_spawn_interval": 0.0 }"#),
            "initial_spawn_interval"
        );
    }

    #[test]
    fn test_rejects_non_positive_effect_durations() {
        for field in [
            "booster_shield_duration",
            "booster_multiplier_duration",
            "debuff_enlarge_duration",
            "continue_shield_duration",
        ] {
            assert_eq!(rejected_field(&format!(r#"{{ "{field}": 0.0 }}"#)), field);
            assert_eq!(rejected_field(&format!(r#"{{ "{field}": -1.0 }}"#)), field);
        }
    }

    #[test]
    fn test_unlock_times_must_be_non_negative() {
        assert_eq!(rejected_field(r#"{ "medium_unlock_time": -1.0 }"#), "medium_unlock_time");
        assert_eq!(rejected_field(r#"{ "debuff_unlock_time": -1.0 }"#), "debuff_unlock_time");
        // Unlocked from the first frame is fine
        let tuning = Tuning::from_json(
            r#"{ "medium_unlock_time": 0.0, "fast_unlock_time": 0.0, "debuff_unlock_time": 0.0 }"#,
        )
        .expect("zero unlocks");
        assert_eq!(tuning.fast_unlock_time, 0.0);
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let tuning = Tuning {
            count_threshold_medium: 8,
            count_threshold_high: 3,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_exclusion_percent() {
        let tuning = Tuning {
            exclusion_zone_percent: 1.5,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Tuning::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }
}
