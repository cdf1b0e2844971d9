//! Spawn policy
//!
//! Decides when enemies and pickups appear, where they are placed, and
//! which speed tier each new enemy gets. Randomness comes in through the
//! caller's RNG so runs are reproducible from a seed.

use glam::Vec2;
use rand::Rng;

use super::difficulty::{SpawnZone, lerp_clamped};
use super::state::{Booster, BoosterKind, Debuff, DebuffKind, Enemy, Handedness, SpeedTier};
use crate::tuning::Tuning;

/// Enemy spawn gate: room under the cap and the interval has elapsed
pub fn should_spawn(
    last_spawn_time: f64,
    now: f64,
    interval: f64,
    current_count: usize,
    max_count: usize,
) -> bool {
    current_count < max_count && now - last_spawn_time >= interval
}

/// At most one booster is alive at a time
pub fn should_spawn_booster(tuning: &Tuning, last_spawn_time: f64, now: f64, current_count: usize) -> bool {
    current_count < 1 && now - last_spawn_time >= tuning.booster_spawn_interval
}

/// Debuffs only appear once unlocked, then on their own interval
pub fn should_spawn_debuff(tuning: &Tuning, play_time: f64, last_spawn_time: f64, now: f64) -> bool {
    play_time >= tuning.debuff_unlock_time && now - last_spawn_time >= tuning.debuff_spawn_interval
}

/// The screen region a player's hand covers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExclusionZone {
    pub handedness: Handedness,
    /// Width and height of the covered corner
    pub size: Vec2,
    pub screen: Vec2,
}

impl ExclusionZone {
    /// Bottom corner on the steering hand's side, sized as a fraction of
    /// each screen dimension
    pub fn new(screen: Vec2, handedness: Handedness, percent: f32) -> Self {
        Self {
            handedness,
            size: screen * percent,
            screen,
        }
    }

    /// Points on the zone's inner boundary are still allowed
    pub fn contains(&self, p: Vec2) -> bool {
        let in_rows = p.y > self.screen.y - self.size.y;
        let in_cols = match self.handedness {
            Handedness::Right => p.x > self.screen.x - self.size.x,
            Handedness::Left => p.x < self.size.x,
        };
        in_rows && in_cols
    }
}

fn corner_points(screen: Vec2) -> [Vec2; 4] {
    [
        Vec2::ZERO,
        Vec2::new(screen.x, 0.0),
        Vec2::new(0.0, screen.y),
        screen,
    ]
}

fn edge_midpoints(screen: Vec2) -> [Vec2; 4] {
    [
        Vec2::new(screen.x / 2.0, 0.0),
        Vec2::new(screen.x / 2.0, screen.y),
        Vec2::new(0.0, screen.y / 2.0),
        Vec2::new(screen.x, screen.y / 2.0),
    ]
}

/// Spawn candidates for a zone policy, with excluded points filtered out.
/// `SpawnZone::Any` has no fixed candidates.
pub fn spawn_candidates(
    zone: SpawnZone,
    screen: Vec2,
    handedness: Handedness,
    exclusion_percent: f32,
) -> Vec<Vec2> {
    let exclusion = ExclusionZone::new(screen, handedness, exclusion_percent);
    let mut points = Vec::with_capacity(8);
    match zone {
        SpawnZone::Corner => points.extend(corner_points(screen)),
        SpawnZone::Edge => {
            points.extend(corner_points(screen));
            points.extend(edge_midpoints(screen));
        }
        SpawnZone::Any => {}
    }
    points.retain(|p| !exclusion.contains(*p));
    points
}

/// Random perimeter point outside the exclusion zone. Falls back to the
/// top-left corner when every attempt lands in the zone.
pub fn random_perimeter_point<R: Rng>(
    rng: &mut R,
    screen: Vec2,
    handedness: Handedness,
    exclusion_percent: f32,
    attempts: u32,
) -> Vec2 {
    let exclusion = ExclusionZone::new(screen, handedness, exclusion_percent);
    for _ in 0..attempts {
        let p = match rng.random_range(0..4u8) {
            0 => Vec2::new(rng.random::<f32>() * screen.x, 0.0),
            1 => Vec2::new(rng.random::<f32>() * screen.x, screen.y),
            2 => Vec2::new(0.0, rng.random::<f32>() * screen.y),
            _ => Vec2::new(screen.x, rng.random::<f32>() * screen.y),
        };
        if !exclusion.contains(p) {
            return p;
        }
    }
    log::warn!("No spawn point outside exclusion zone after {attempts} attempts, using top-left");
    Vec2::ZERO
}

/// Pick an enemy spawn point for the current zone policy
pub fn spawn_position<R: Rng>(
    rng: &mut R,
    tuning: &Tuning,
    zone: SpawnZone,
    screen: Vec2,
    handedness: Handedness,
) -> Vec2 {
    let candidates = spawn_candidates(zone, screen, handedness, tuning.exclusion_zone_percent);
    if candidates.is_empty() {
        return random_perimeter_point(
            rng,
            screen,
            handedness,
            tuning.exclusion_zone_percent,
            tuning.spawn_attempts,
        );
    }
    candidates[rng.random_range(0..candidates.len())]
}

/// Tier weights (slow, medium, fast) at a given play time
pub fn speed_tier_weights(tuning: &Tuning, play_time: f64) -> (f64, f64, f64) {
    if play_time < tuning.medium_unlock_time {
        return (1.0, 0.0, 0.0);
    }
    if play_time < tuning.fast_unlock_time {
        let medium = lerp_clamped(
            0.2,
            0.5,
            play_time - tuning.medium_unlock_time,
            tuning.fast_unlock_time - tuning.medium_unlock_time,
        );
        return (1.0 - medium, medium, 0.0);
    }
    let since_fast = play_time - tuning.fast_unlock_time;
    let slow = lerp_clamped(0.5, 0.2, since_fast, tuning.tier_ramp_duration);
    let medium = lerp_clamped(0.35, 0.4, since_fast, tuning.tier_ramp_duration);
    (slow, medium, (1.0 - slow - medium).max(0.0))
}

/// Draw a speed tier for a newly spawned enemy
pub fn pick_speed_tier<R: Rng>(rng: &mut R, tuning: &Tuning, play_time: f64) -> SpeedTier {
    let (slow, medium, _) = speed_tier_weights(tuning, play_time);
    let roll: f64 = rng.random();
    if roll < slow {
        SpeedTier::Slow
    } else if roll < slow + medium {
        SpeedTier::Medium
    } else {
        SpeedTier::Fast
    }
}

pub fn tier_speed(tuning: &Tuning, tier: SpeedTier) -> f32 {
    match tier {
        SpeedTier::Slow => tuning.speed_slow,
        SpeedTier::Medium => tuning.speed_medium,
        SpeedTier::Fast => tuning.speed_fast,
    }
}

pub fn create_enemy<R: Rng>(
    rng: &mut R,
    tuning: &Tuning,
    id: u32,
    pos: Vec2,
    now: f64,
    play_time: f64,
) -> Enemy {
    let speed_tier = pick_speed_tier(rng, tuning, play_time);
    Enemy {
        id,
        pos,
        speed_tier,
        speed: tier_speed(tuning, speed_tier),
        spawn_time: now,
        jitter_angle: 0.0,
        last_jitter_update: now,
    }
}

fn random_in_margins<R: Rng>(rng: &mut R, screen: Vec2, margin: f32) -> Vec2 {
    let span = (screen - Vec2::splat(margin * 2.0)).max(Vec2::ZERO);
    Vec2::new(
        margin + rng.random::<f32>() * span.x,
        margin + rng.random::<f32>() * span.y,
    )
}

/// Random pickup location away from the player. After the last attempt the
/// sample is kept even if it is too close.
pub fn booster_position<R: Rng>(rng: &mut R, tuning: &Tuning, screen: Vec2, player: Vec2) -> Vec2 {
    let mut pos = random_in_margins(rng, screen, tuning.pickup_margin);
    for _ in 1..tuning.pickup_attempts {
        if pos.distance(player) >= tuning.pickup_min_player_distance {
            break;
        }
        pos = random_in_margins(rng, screen, tuning.pickup_margin);
    }
    pos
}

/// Like [`booster_position`], also keeping clear of live boosters
pub fn debuff_position<R: Rng>(
    rng: &mut R,
    tuning: &Tuning,
    screen: Vec2,
    player: Vec2,
    boosters: &[Vec2],
) -> Vec2 {
    let clearance = tuning.booster_radius + tuning.debuff_radius;
    let acceptable = |p: Vec2| {
        p.distance(player) >= tuning.pickup_min_player_distance
            && boosters.iter().all(|b| p.distance(*b) >= clearance)
    };
    let mut pos = random_in_margins(rng, screen, tuning.pickup_margin);
    for _ in 1..tuning.pickup_attempts {
        if acceptable(pos) {
            break;
        }
        pos = random_in_margins(rng, screen, tuning.pickup_margin);
    }
    pos
}

pub fn create_booster<R: Rng>(rng: &mut R, id: u32, pos: Vec2, now: f64) -> Booster {
    let kind = BoosterKind::ALL[rng.random_range(0..BoosterKind::ALL.len())];
    Booster {
        id,
        kind,
        pos,
        spawn_time: now,
    }
}

pub fn create_debuff(id: u32, pos: Vec2, now: f64) -> Debuff {
    Debuff {
        id,
        kind: DebuffKind::Enlarge,
        pos,
        spawn_time: now,
    }
}

pub fn is_booster_expired(tuning: &Tuning, booster: &Booster, now: f64) -> bool {
    now - booster.spawn_time > tuning.booster_lifetime
}

pub fn is_debuff_expired(tuning: &Tuning, debuff: &Debuff, now: f64) -> bool {
    now - debuff.spawn_time > tuning.debuff_lifetime
}
