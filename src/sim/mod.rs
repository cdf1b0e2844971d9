//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same seed, tuning, inputs and
//! frame timestamps, a run plays out identically:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod difficulty;
pub mod effects;
pub mod engine;
pub mod movement;
pub mod scoring;
pub mod spawn;
pub mod state;

pub use collision::{check_collision, circles_overlap};
pub use difficulty::{DifficultyParams, SpawnZone, difficulty_params, spawn_zone};
pub use effects::ActiveEffects;
pub use engine::{Clock, Engine, ManualClock, SystemClock};
pub use state::{
    Booster, BoosterKind, CollisionInfo, Debuff, DebuffKind, Enemy, GameEvent, GameOverData,
    GameState, Handedness, Positioned, SpeedTier,
};
