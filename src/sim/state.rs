//! Game state and core simulation types
//!
//! The engine owns one [`GameState`]; hosts read it through shared borrows
//! or cloned snapshots.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::ActiveEffects;

/// Which hand the player steers with. Enemies never spawn in the screen
/// corner that hand covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    #[default]
    Right,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Some(Handedness::Left),
            "right" | "r" => Some(Handedness::Right),
            _ => None,
        }
    }
}

/// Enemy archetype. Fixed at spawn; drives both speed and shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedTier {
    Slow,
    Medium,
    Fast,
}

/// A hostile entity chasing the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub speed_tier: SpeedTier,
    /// Pixels per second, taken from the tier when spawned
    pub speed: f32,
    pub spawn_time: f64,
    /// Current heading offset (radians)
    pub jitter_angle: f32,
    pub last_jitter_update: f64,
}

/// Beneficial pickup kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoosterKind {
    /// Flat score bonus
    Plus,
    /// Absorbs one enemy hit
    Shield,
    /// Multiplies despawn points
    Multiplier,
}

impl BoosterKind {
    pub const ALL: [BoosterKind; 3] = [BoosterKind::Plus, BoosterKind::Shield, BoosterKind::Multiplier];
}

/// A beneficial pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booster {
    pub id: u32,
    pub kind: BoosterKind,
    pub pos: Vec2,
    pub spawn_time: f64,
}

/// Detrimental pickup kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebuffKind {
    /// Grows the player's hitbox
    Enlarge,
}

/// A detrimental pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debuff {
    pub id: u32,
    pub kind: DebuffKind,
    pub pos: Vec2,
    pub spawn_time: f64,
}

/// Anything with a center point that can be hit-tested
pub trait Positioned {
    fn pos(&self) -> Vec2;
}

impl Positioned for Enemy {
    fn pos(&self) -> Vec2 {
        self.pos
    }
}

impl Positioned for Booster {
    fn pos(&self) -> Vec2 {
        self.pos
    }
}

impl Positioned for Debuff {
    fn pos(&self) -> Vec2 {
        self.pos
    }
}

/// Where a collision-caused death happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionInfo {
    pub position: Vec2,
    pub speed_tier: SpeedTier,
}

/// Payload of the game-over event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameOverData {
    pub score: u64,
    /// Absent when the run ended voluntarily (finger lifted)
    pub collision: Option<CollisionInfo>,
}

/// Events emitted to the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum GameEvent {
    GameOver(GameOverData),
    ScoreUpdate(u64),
    /// Host should re-read the state
    StateChange,
    BoosterCollected(BoosterKind),
    DebuffCollected(DebuffKind),
}

/// Authoritative simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub is_running: bool,
    pub is_paused: bool,
    pub is_game_over: bool,
    /// Set by the first resume of a run
    pub has_started: bool,
    pub score: u64,
    /// Accumulated unpaused play time (ms)
    pub play_time: f64,
    pub player_pos: Vec2,
    pub enemies: Vec<Enemy>,
    pub boosters: Vec<Booster>,
    pub debuffs: Vec<Debuff>,
    pub effects: ActiveEffects,
    pub start_time: f64,
    pub last_spawn_time: f64,
    pub last_booster_spawn_time: f64,
    pub last_debuff_spawn_time: f64,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh idle state for the given screen, player centered
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            is_running: false,
            is_paused: true,
            is_game_over: false,
            has_started: false,
            score: 0,
            play_time: 0.0,
            player_pos: Vec2::new(screen_width / 2.0, screen_height / 2.0),
            enemies: Vec::new(),
            boosters: Vec::new(),
            debuffs: Vec::new(),
            effects: ActiveEffects::default(),
            start_time: 0.0,
            last_spawn_time: 0.0,
            last_booster_spawn_time: 0.0,
            last_debuff_spawn_time: 0.0,
            screen_width,
            screen_height,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Remove every enemy whose center lies within `radius` of the player.
    /// Returns how many were removed.
    pub fn clear_enemies_near_player(&mut self, radius: f32) -> usize {
        let before = self.enemies.len();
        let player = self.player_pos;
        self.enemies.retain(|e| e.pos.distance(player) > radius);
        before - self.enemies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy_at(state: &mut GameState, x: f32, y: f32) {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos: Vec2::new(x, y),
            speed_tier: SpeedTier::Slow,
            speed: 80.0,
            spawn_time: 0.0,
            jitter_angle: 0.0,
            last_jitter_update: 0.0,
        });
    }

    #[test]
    fn test_new_state_is_idle_and_centered() {
        let state = GameState::new(400.0, 800.0);
        assert!(!state.is_running);
        assert!(state.is_paused);
        assert!(!state.is_game_over);
        assert_eq!(state.player_pos, Vec2::new(200.0, 400.0));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(100.0, 100.0);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_clear_enemies_near_player() {
        let mut state = GameState::new(400.0, 400.0);
        enemy_at(&mut state, 210.0, 200.0);
        enemy_at(&mut state, 390.0, 390.0);
        let removed = state.clear_enemies_near_player(50.0);
        assert_eq!(removed, 1);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos, Vec2::new(390.0, 390.0));
    }

    #[test]
    fn test_handedness_parse() {
        assert_eq!(Handedness::parse("LEFT"), Some(Handedness::Left));
        assert_eq!(Handedness::parse("r"), Some(Handedness::Right));
        assert_eq!(Handedness::parse("both"), None);
        assert_eq!(Handedness::Left.as_str(), "left");
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&GameEvent::ScoreUpdate(30)).expect("serialize");
        assert_eq!(json, r#"{"event":"scoreUpdate","data":30}"#);
        let json = serde_json::to_string(&GameEvent::BoosterCollected(BoosterKind::Shield))
            .expect("serialize");
        assert_eq!(json, r#"{"event":"boosterCollected","data":"shield"}"#);
    }
}
