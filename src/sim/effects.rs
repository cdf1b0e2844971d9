//! Timed gameplay effects
//!
//! One slot per effect kind. Re-triggering an active effect restarts its
//! timer instead of stacking.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShieldEffect {
    pub active: bool,
    pub end_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierEffect {
    pub active: bool,
    pub end_time: f64,
    pub value: u64,
}

impl Default for MultiplierEffect {
    fn default() -> Self {
        Self {
            active: false,
            end_time: 0.0,
            value: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnlargeEffect {
    pub active: bool,
    pub end_time: f64,
    pub scale: f32,
}

impl Default for EnlargeEffect {
    fn default() -> Self {
        Self {
            active: false,
            end_time: 0.0,
            scale: 1.0,
        }
    }
}

/// The effect ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub shield: ShieldEffect,
    pub multiplier: MultiplierEffect,
    pub enlarge: EnlargeEffect,
}

impl ActiveEffects {
    pub fn activate_shield(&mut self, now: f64, duration: f64) {
        self.shield = ShieldEffect {
            active: true,
            end_time: now + duration,
        };
        log::debug!("Shield active until {:.0}", self.shield.end_time);
    }

    pub fn activate_multiplier(&mut self, now: f64, duration: f64, value: u64) {
        self.multiplier = MultiplierEffect {
            active: true,
            end_time: now + duration,
            value,
        };
        log::debug!("x{} multiplier active until {:.0}", value, self.multiplier.end_time);
    }

    pub fn activate_enlarge(&mut self, now: f64, duration: f64, scale: f32) {
        self.enlarge = EnlargeEffect {
            active: true,
            end_time: now + duration,
            scale,
        };
        log::debug!("Enlarge x{} active until {:.0}", scale, self.enlarge.end_time);
    }

    /// Deactivate every effect whose end time has passed (strictly)
    pub fn expire(&mut self, now: f64) {
        if self.shield.active && now > self.shield.end_time {
            self.shield.active = false;
            log::debug!("Shield expired");
        }
        if self.multiplier.active && now > self.multiplier.end_time {
            self.multiplier = MultiplierEffect::default();
            log::debug!("Multiplier expired");
        }
        if self.enlarge.active && now > self.enlarge.end_time {
            self.enlarge = EnlargeEffect::default();
            log::debug!("Enlarge expired");
        }
    }

    /// Spend the shield on a hit. Returns false if there was no shield.
    pub fn absorb_hit(&mut self) -> bool {
        if !self.shield.active {
            return false;
        }
        self.shield = ShieldEffect::default();
        true
    }

    /// Player hitbox radius against enemies, grown by an active enlarge
    pub fn player_radius(&self, base: f32) -> f32 {
        if self.enlarge.active {
            base * self.enlarge.scale
        } else {
            base
        }
    }

    /// Multiplier applied to despawn points (1 when inactive)
    pub fn score_multiplier(&self) -> u64 {
        if self.multiplier.active {
            self.multiplier.value
        } else {
            1
        }
    }
}
