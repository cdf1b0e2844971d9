//! Idle/demo player
//!
//! Steers the player point away from nearby enemies and, when nothing is
//! close, toward the live booster. Used by the headless runner to play
//! full runs without a human.

use glam::Vec2;

use crate::sim::GameState;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Finger speed (pixels/second)
    pub max_speed: f32,
    /// Enemies closer than this push the player away
    pub danger_radius: f32,
    /// Keep this far from the screen border
    pub margin: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            max_speed: 420.0,
            danger_radius: 220.0,
            margin: 48.0,
        }
    }
}

impl Autopilot {
    /// Next player position after `dt_ms` of steering
    pub fn steer(&self, state: &GameState, tuning: &Tuning, dt_ms: f64) -> Vec2 {
        let player = state.player_pos;
        let screen = state.screen_size();

        let mut push = Vec2::ZERO;
        for enemy in &state.enemies {
            let away = player - enemy.pos;
            let dist = away.length();
            if dist < self.danger_radius {
                // Quadratic falloff: the closest enemy dominates
                let weight = 1.0 - dist / self.danger_radius;
                push += away.normalize_or(Vec2::Y) * weight * weight * 4.0;
            }
        }
        for debuff in &state.debuffs {
            let away = player - debuff.pos;
            let reach = tuning.player_radius + tuning.debuff_radius + 30.0;
            if away.length() < reach {
                push += away.normalize_or(Vec2::X);
            }
        }

        let threatened = push.length_squared() > 0.01;
        if !threatened {
            if let Some(booster) = state
                .boosters
                .iter()
                .min_by(|a, b| a.pos.distance_squared(player).total_cmp(&b.pos.distance_squared(player)))
            {
                push += (booster.pos - player).normalize_or_zero();
            }
        }

        // Walls push back so the player doesn't get cornered
        let lo = Vec2::splat(self.margin);
        let hi = screen - lo;
        let wall_band = self.margin * 2.0;
        if player.x < lo.x + wall_band {
            push.x += 1.0 - (player.x - lo.x).max(0.0) / wall_band;
        }
        if player.x > hi.x - wall_band {
            push.x -= 1.0 - (hi.x - player.x).max(0.0) / wall_band;
        }
        if player.y < lo.y + wall_band {
            push.y += 1.0 - (player.y - lo.y).max(0.0) / wall_band;
        }
        if player.y > hi.y - wall_band {
            push.y -= 1.0 - (hi.y - player.y).max(0.0) / wall_band;
        }

        let step = self.max_speed * (dt_ms / 1000.0) as f32;
        let next = player + push.clamp_length_max(1.0) * step;
        if hi.cmplt(lo).any() {
            // Screen smaller than the margins: hold the center
            return screen / 2.0;
        }
        next.clamp(lo, hi)
    }
}
