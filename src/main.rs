//! Evade headless runner
//!
//! Plays full runs with the autopilot on a simulated clock, logging engine
//! events, and prints the result as JSON.

use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use serde::Serialize;

use evade::autopilot::Autopilot;
use evade::driver::FixedStepDriver;
use evade::sim::{Clock, Engine, GameEvent, Handedness, ManualClock};
use evade::{HighScores, Settings, Tuning};

/// Host frame interval (60 Hz display)
const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Debug, Parser)]
#[command(name = "evade", about = "Run Evade headlessly with an autopilot player")]
struct Args {
    /// Run seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Tuning overrides (JSON)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Settings file; its handedness is used unless --handedness is given
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Steering hand: left or right
    #[arg(long, value_parser = parse_handedness)]
    handedness: Option<Handedness>,

    /// Screen width in pixels
    #[arg(long, default_value_t = 400.0)]
    width: f32,

    /// Screen height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f32,

    /// Stop after this much simulated play time
    #[arg(long, default_value_t = 300.0)]
    max_seconds: f64,

    /// Continues granted after game over
    #[arg(long, default_value_t = 0)]
    continues: u32,

    /// Integrate with a fixed 120 Hz step instead of raw frame deltas
    #[arg(long)]
    fixed_step: bool,

    /// Leaderboard file to record the final score in
    #[arg(long)]
    highscores: Option<PathBuf>,
}

fn parse_handedness(s: &str) -> Result<Handedness, String> {
    Handedness::parse(s).ok_or_else(|| format!("expected `left` or `right`, got `{s}`"))
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    score: u64,
    play_time_ms: f64,
    continues_used: u32,
    boosters_collected: u32,
    debuffs_collected: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    rank: Option<usize>,
}

#[derive(Debug, Default)]
struct EventTally {
    game_overs: u32,
    boosters: u32,
    debuffs: u32,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match run(&args) {
        Ok(summary) => match serde_json::to_string(&summary) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to encode summary: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<RunSummary, Box<dyn std::error::Error>> {
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let handedness = args.handedness.unwrap_or(settings.handedness);
    let continue_shield = tuning.continue_shield_duration;

    let clock = ManualClock::new(0.0);
    let mut engine = Engine::new(tuning, args.width, args.height, handedness, args.seed, clock.clone());

    let tally = Rc::new(RefCell::new(EventTally::default()));
    let sink = Rc::clone(&tally);
    engine.set_event_callback(move |event| {
        let mut tally = sink.borrow_mut();
        match event {
            GameEvent::GameOver(data) => {
                tally.game_overs += 1;
                match data.collision {
                    Some(hit) => log::info!(
                        "Hit by {:?} enemy at {} with score {}",
                        hit.speed_tier,
                        hit.position,
                        data.score
                    ),
                    None => log::info!("Run ended with score {}", data.score),
                }
            }
            GameEvent::ScoreUpdate(score) => log::debug!("Score {score}"),
            GameEvent::BoosterCollected(kind) => {
                tally.boosters += 1;
                log::info!("Collected {kind:?} booster");
            }
            GameEvent::DebuffCollected(kind) => {
                tally.debuffs += 1;
                log::info!("Picked up {kind:?} debuff");
            }
            GameEvent::StateChange => {}
        }
    });

    let pilot = Autopilot::default();
    let mut driver = args.fixed_step.then(FixedStepDriver::default);
    let max_play_time = args.max_seconds * 1000.0;
    let mut continues_used = 0;

    engine.start();
    engine.resume();
    loop {
        let state = engine.state();
        if state.is_game_over {
            if continues_used >= args.continues {
                break;
            }
            continues_used += 1;
            engine.continue_game(continue_shield);
            engine.resume();
            if let Some(driver) = driver.as_mut() {
                driver.reset();
            }
            continue;
        }
        if state.play_time >= max_play_time {
            log::info!("Reached {}s of play, ending run", args.max_seconds);
            engine.trigger_game_over();
            break;
        }

        let next = pilot.steer(state, engine.tuning(), FRAME_MS);
        engine.set_player_position(next.x, next.y);

        clock.advance(FRAME_MS);
        let now = clock.now_ms();
        match driver.as_mut() {
            Some(driver) => {
                driver.frame(&mut engine, now);
            }
            None => engine.frame(now),
        }
    }

    let state = engine.snapshot();
    let rank = match &args.highscores {
        Some(path) => {
            let mut scores = HighScores::load(path)?;
            let rank = scores.add_score(state.score, unix_millis());
            scores.save(path)?;
            rank
        }
        None => None,
    };

    let tally = tally.borrow();
    log::info!(
        "Finished: score {}, {} game over(s), {:.1}s played",
        state.score,
        tally.game_overs,
        state.play_time / 1000.0
    );
    Ok(RunSummary {
        seed: args.seed,
        score: state.score,
        play_time_ms: state.play_time,
        continues_used,
        boosters_collected: tally.boosters,
        debuffs_collected: tally.debuffs,
        rank,
    })
}

fn unix_millis() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64() * 1000.0)
}
