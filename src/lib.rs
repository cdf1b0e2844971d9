//! Evade - a survival arcade game: keep your finger on the screen, dodge
//! the swarm, grab power-ups
//!
//! Core modules:
//! - `sim`: Deterministic simulation (difficulty, spawning, steering, collisions, scoring)
//! - `driver`: Fixed-step frame driver for hosts that want one
//! - `autopilot`: Evasive steering for headless play
//! - `tuning`: Data-driven game balance
//! - `settings`, `highscores`: Player-facing records kept by the host
//! - `persistence`: JSON files with atomic replace

pub mod autopilot;
pub mod driver;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Normalize an angle to (-π, π]
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle > PI {
        angle -= 2.0 * PI;
    }
    while angle <= -PI {
        angle += 2.0 * PI;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-5);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((normalize_angle(-2.5 * PI) + 0.5 * PI).abs() < 1e-5);
    }
}
