//! Game engine: owns the run state and advances it one host frame at a time
//!
//! The host drives [`Engine::frame`] from its display-refresh callback and
//! forwards input through the setters. Everything else happens inside
//! [`Engine::update`], in a fixed order:
//!
//! 1. accumulate play time
//! 2. refresh difficulty
//! 3. expire timed effects
//! 4. enemy collision (shield absorb or game over)
//! 5. booster collection
//! 6. debuff collection
//! 7. enemy spawn
//! 8. booster spawn
//! 9. debuff spawn
//! 10. booster expiry
//! 11. debuff expiry
//! 12. enemy movement and culling
//! 13. despawn scoring
//!
//! State-machine calls made in the wrong state are ignored.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::check_collision;
use super::difficulty::{DifficultyParams, difficulty_params, spawn_zone};
use super::movement::update_enemies;
use super::scoring::despawn_award;
use super::spawn::{
    booster_position, create_booster, create_debuff, create_enemy, debuff_position,
    is_booster_expired, is_debuff_expired, should_spawn, should_spawn_booster, should_spawn_debuff,
    spawn_position,
};
use super::state::{
    BoosterKind, CollisionInfo, DebuffKind, GameEvent, GameOverData, GameState, Handedness,
};
use crate::tuning::Tuning;

/// Millisecond time source for state-machine transitions
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<f64>>);

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self(Rc::new(Cell::new(start_ms)))
    }

    pub fn set(&self, ms: f64) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.0.get()
    }
}

type EventCallback = Box<dyn FnMut(&GameEvent)>;

/// The simulation engine
pub struct Engine<C: Clock = SystemClock> {
    state: GameState,
    tuning: Tuning,
    handedness: Handedness,
    difficulty: DifficultyParams,
    rng: Pcg32,
    clock: C,
    /// Timestamp of the previous frame, anchor for the next delta
    last_timestamp: f64,
    event_callback: Option<EventCallback>,
}

impl<C: Clock> Engine<C> {
    pub fn new(
        tuning: Tuning,
        screen_width: f32,
        screen_height: f32,
        handedness: Handedness,
        seed: u64,
        clock: C,
    ) -> Self {
        let validity = tuning.validate();
        if let Err(e) = &validity {
            log::warn!("Engine built with unchecked tuning: {e}");
        }
        debug_assert!(validity.is_ok(), "invalid tuning");
        let difficulty = difficulty_params(&tuning, 0.0);
        Self {
            state: GameState::new(screen_width, screen_height),
            tuning,
            handedness,
            difficulty,
            rng: Pcg32::seed_from_u64(seed),
            clock,
            last_timestamp: 0.0,
            event_callback: None,
        }
    }

    /// Register the host's event sink, replacing any previous one
    pub fn set_event_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.event_callback = Some(Box::new(callback));
    }

    fn emit(&mut self, event: GameEvent) {
        if let Some(callback) = self.event_callback.as_mut() {
            callback(&event);
        }
    }

    /// Read-only view of the current state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// Difficulty parameters used by the latest update
    pub fn difficulty(&self) -> DifficultyParams {
        self.difficulty
    }

    pub fn set_player_position(&mut self, x: f32, y: f32) {
        self.state.player_pos = Vec2::new(x, y);
    }

    /// Switch the spawn exclusion side without touching the run
    pub fn set_handedness(&mut self, handedness: Handedness) {
        self.handedness = handedness;
    }

    pub fn update_screen_size(&mut self, width: f32, height: f32) {
        self.state.screen_width = width;
        self.state.screen_height = height;
    }

    /// Begin a fresh run, paused until the first touch
    pub fn start(&mut self) {
        if self.state.is_running {
            log::debug!("start ignored: already running");
            return;
        }

        let now = self.clock.now_ms();
        let mut state = GameState::new(self.state.screen_width, self.state.screen_height);
        state.is_running = true;
        state.is_paused = true;
        state.start_time = now;
        state.last_spawn_time = now;
        state.last_booster_spawn_time = now;
        state.last_debuff_spawn_time = now;
        self.state = state;
        self.difficulty = difficulty_params(&self.tuning, 0.0);
        self.last_timestamp = now;

        log::info!(
            "Run started ({}x{}, {}-handed)",
            self.state.screen_width,
            self.state.screen_height,
            self.handedness.as_str()
        );
        self.emit(GameEvent::StateChange);
    }

    pub fn resume(&mut self) {
        if !self.state.is_running || !self.state.is_paused {
            log::debug!("resume ignored: not a paused run");
            return;
        }
        self.state.is_paused = false;
        self.state.has_started = true;
        // Re-anchor so the first frame after a pause has a small delta
        self.last_timestamp = self.clock.now_ms();
        self.emit(GameEvent::StateChange);
    }

    pub fn pause(&mut self) {
        if !self.state.is_running || self.state.is_paused {
            log::debug!("pause ignored: not an active run");
            return;
        }
        self.state.is_paused = true;
        self.emit(GameEvent::StateChange);
    }

    /// Halt the run. Frames delivered afterwards do nothing.
    pub fn stop(&mut self) {
        self.state.is_running = false;
        log::info!("Run stopped at score {}", self.state.score);
        self.emit(GameEvent::StateChange);
    }

    /// Voluntary end of run (e.g. the player lifted their finger)
    pub fn trigger_game_over(&mut self) {
        if !self.state.is_running || self.state.is_game_over {
            log::debug!("game over ignored: no live run");
            return;
        }
        self.end_run(None);
    }

    /// Resume a finished run behind a temporary shield
    pub fn continue_game(&mut self, shield_duration: f64) {
        if !self.state.is_game_over {
            log::debug!("continue ignored: run is not over");
            return;
        }

        let now = self.clock.now_ms();
        self.state.is_game_over = false;
        self.state.is_running = true;
        self.state.is_paused = true;
        self.state.effects.activate_shield(now, shield_duration);

        let clear_radius =
            self.tuning.player_radius + self.tuning.enemy_radius + self.tuning.continue_clear_padding;
        let cleared = self.state.clear_enemies_near_player(clear_radius);

        self.last_timestamp = now;
        log::info!(
            "Run continued at score {} ({} enemies cleared, shield {:.0}ms)",
            self.state.score,
            cleared,
            shield_duration
        );
        self.emit(GameEvent::StateChange);
    }

    fn end_run(&mut self, collision: Option<CollisionInfo>) {
        self.state.is_game_over = true;
        self.state.is_running = false;
        log::info!(
            "Game over: score {} after {:.1}s",
            self.state.score,
            self.state.play_time / 1000.0
        );
        let data = GameOverData {
            score: self.state.score,
            collision,
        };
        self.emit(GameEvent::GameOver(data));
    }

    /// Host tick. Runs an update when the run is live and re-anchors the
    /// frame delta either way.
    ///
    /// `timestamp` must be on the injected clock's timeline: `start`,
    /// `resume` and `continue_game` anchor deltas and shield expiry on
    /// `Clock::now_ms`. Hosts without their own timestamps use [`Engine::tick`].
    pub fn frame(&mut self, timestamp: f64) {
        let delta = timestamp - self.last_timestamp;
        self.step(timestamp, delta);
    }

    /// [`Engine::frame`] at the injected clock's current time
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        self.frame(now);
    }

    /// Advance by an explicit `delta` ending at `timestamp`, for hosts that
    /// own the timestep. Re-anchors the next frame delta on `timestamp`.
    pub fn step(&mut self, timestamp: f64, delta: f64) {
        if !self.state.is_running {
            return;
        }
        if !self.state.is_paused && !self.state.is_game_over {
            self.update(timestamp, delta);
        }
        self.last_timestamp = timestamp;
    }

    /// Advance the simulation by `delta` ms ending at `timestamp`
    pub fn update(&mut self, timestamp: f64, delta: f64) {
        if !self.state.is_running || self.state.is_paused || self.state.is_game_over {
            return;
        }

        let delta = if delta > self.tuning.max_frame_delta {
            log::warn!("Frame delta {delta:.0}ms clamped to {:.0}ms", self.tuning.max_frame_delta);
            self.tuning.max_frame_delta
        } else {
            delta.max(0.0)
        };

        // 1-2. Play time and difficulty
        self.state.play_time += delta;
        self.difficulty = difficulty_params(&self.tuning, self.state.play_time);

        // 3. Effects expire before they can protect
        self.state.effects.expire(timestamp);

        // 4. Enemy collision
        if self.resolve_enemy_collision() {
            return;
        }

        // 5-6. Pickups
        self.collect_booster(timestamp);
        self.collect_debuff(timestamp);

        // 7-9. Spawning
        self.try_spawn_enemy(timestamp);
        self.try_spawn_booster(timestamp);
        self.try_spawn_debuff(timestamp);

        // 10-11. Pickup lifetimes
        let tuning = &self.tuning;
        self.state
            .boosters
            .retain(|b| !is_booster_expired(tuning, b, timestamp));
        self.state
            .debuffs
            .retain(|d| !is_debuff_expired(tuning, d, timestamp));

        // 12. Movement and culling
        let screen = self.state.screen_size();
        let removed = update_enemies(
            &mut self.state.enemies,
            &mut self.rng,
            &self.tuning,
            self.state.player_pos,
            screen,
            delta,
            timestamp,
            self.difficulty.jitter_intensity,
        );

        // 13. Scoring
        if removed > 0 {
            let award = despawn_award(
                &self.tuning,
                removed,
                self.state.play_time,
                self.state.enemies.len(),
                self.state.effects.score_multiplier(),
            );
            self.state.score += award;
            self.emit(GameEvent::ScoreUpdate(self.state.score));
        }
    }

    /// Returns true when the collision ended the run
    fn resolve_enemy_collision(&mut self) -> bool {
        let radius = self.state.effects.player_radius(self.tuning.player_radius);
        let Some(hit) = check_collision(
            self.state.player_pos,
            radius,
            &self.state.enemies,
            self.tuning.enemy_radius,
        ) else {
            return false;
        };
        let info = CollisionInfo {
            position: hit.pos,
            speed_tier: hit.speed_tier,
        };

        if self.state.effects.absorb_hit() {
            let blast =
                self.tuning.player_radius + self.tuning.enemy_radius + self.tuning.shield_blast_padding;
            let cleared = self.state.clear_enemies_near_player(blast);
            log::debug!("Shield absorbed a {:?} enemy, cleared {}", info.speed_tier, cleared);
            return false;
        }

        self.end_run(Some(info));
        true
    }

    fn collect_booster(&mut self, now: f64) {
        let Some(booster) = check_collision(
            self.state.player_pos,
            self.tuning.player_radius,
            &self.state.boosters,
            self.tuning.booster_radius,
        ) else {
            return;
        };
        let (id, kind) = (booster.id, booster.kind);
        self.state.boosters.retain(|b| b.id != id);

        match kind {
            BoosterKind::Plus => {
                self.state.score += self.tuning.booster_plus_points;
                self.emit(GameEvent::ScoreUpdate(self.state.score));
            }
            BoosterKind::Shield => {
                self.state
                    .effects
                    .activate_shield(now, self.tuning.booster_shield_duration);
            }
            BoosterKind::Multiplier => {
                self.state.effects.activate_multiplier(
                    now,
                    self.tuning.booster_multiplier_duration,
                    self.tuning.booster_multiplier_value,
                );
            }
        }
        self.emit(GameEvent::BoosterCollected(kind));
    }

    fn collect_debuff(&mut self, now: f64) {
        let Some(debuff) = check_collision(
            self.state.player_pos,
            self.tuning.player_radius,
            &self.state.debuffs,
            self.tuning.debuff_radius,
        ) else {
            return;
        };
        let (id, kind) = (debuff.id, debuff.kind);
        self.state.debuffs.retain(|d| d.id != id);

        match kind {
            DebuffKind::Enlarge => {
                self.state.effects.activate_enlarge(
                    now,
                    self.tuning.debuff_enlarge_duration,
                    self.tuning.debuff_enlarge_scale,
                );
            }
        }
        self.emit(GameEvent::DebuffCollected(kind));
    }

    fn try_spawn_enemy(&mut self, now: f64) {
        if !should_spawn(
            self.state.last_spawn_time,
            now,
            self.difficulty.spawn_interval,
            self.state.enemies.len(),
            self.difficulty.max_enemies,
        ) {
            return;
        }
        let zone = spawn_zone(&self.tuning, self.state.play_time);
        let pos = spawn_position(
            &mut self.rng,
            &self.tuning,
            zone,
            self.state.screen_size(),
            self.handedness,
        );
        let id = self.state.next_entity_id();
        let enemy = create_enemy(&mut self.rng, &self.tuning, id, pos, now, self.state.play_time);
        log::debug!("Spawned {:?} enemy {} at {} ({:?})", enemy.speed_tier, id, pos, zone);
        self.state.enemies.push(enemy);
        self.state.last_spawn_time = now;
    }

    fn try_spawn_booster(&mut self, now: f64) {
        if !should_spawn_booster(
            &self.tuning,
            self.state.last_booster_spawn_time,
            now,
            self.state.boosters.len(),
        ) {
            return;
        }
        let pos = booster_position(
            &mut self.rng,
            &self.tuning,
            self.state.screen_size(),
            self.state.player_pos,
        );
        let id = self.state.next_entity_id();
        let booster = create_booster(&mut self.rng, id, pos, now);
        log::debug!("Spawned {:?} booster at {}", booster.kind, pos);
        self.state.boosters.push(booster);
        self.state.last_booster_spawn_time = now;
    }

    fn try_spawn_debuff(&mut self, now: f64) {
        if !should_spawn_debuff(
            &self.tuning,
            self.state.play_time,
            self.state.last_debuff_spawn_time,
            now,
        ) {
            return;
        }
        let boosters: Vec<Vec2> = self.state.boosters.iter().map(|b| b.pos).collect();
        let pos = debuff_position(
            &mut self.rng,
            &self.tuning,
            self.state.screen_size(),
            self.state.player_pos,
            &boosters,
        );
        let id = self.state.next_entity_id();
        log::debug!("Spawned debuff at {pos}");
        self.state.debuffs.push(create_debuff(id, pos, now));
        self.state.last_debuff_spawn_time = now;
    }
}
