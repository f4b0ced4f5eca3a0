//! Tower Climb headless runner
//!
//! Generates a seeded level and plays it with a simple scripted climber,
//! printing a JSON summary. Rendering frontends drive `sim::tick` the same way.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use serde::Serialize;

use tower_climb::audio::AudioManager;
use tower_climb::consts::*;
use tower_climb::input::{Key, KeyBindings};
use tower_climb::sim::{FrameClock, GameEvent, GameState, Scene, tick};
use tower_climb::{Settings, Tuning};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// RNG seed (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,
    /// Number of fixed ticks to simulate
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
    /// Tuning JSON file
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Start in the victory room
    #[arg(long)]
    victory: bool,
}

#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    ledges: usize,
    spikers: usize,
    max_gap: f32,
    jumps: u32,
    hazard_bounces: u32,
    hazard_hits: u32,
    /// Smallest y reached in the play scene (y grows downward)
    highest_y: f32,
    reached_goal: bool,
}

/// Walk under the next ledge, charge just enough, let go
///
/// Presses physical keys through the configured bindings, the same way a
/// keyboard frontend would.
#[derive(Debug, Default)]
struct Climber {
    charge_left: u32,
}

/// First physical key bound to an action, if any
fn press(keys: &[Key]) -> Vec<Key> {
    keys.first().copied().into_iter().collect()
}

impl Climber {
    fn held_keys(&mut self, state: &GameState, bindings: &KeyBindings) -> Vec<Key> {
        let body = &state.player_body;
        let player = &state.player;
        let tuning = player.tuning();

        if player.is_preparing_jump {
            if self.charge_left > 0 {
                self.charge_left -= 1;
                return press(&bindings.jump);
            }
            return Vec::new();
        }

        let tile = state.level.tile_size;
        let Some(target) = state
            .level
            .ledges
            .iter()
            .find(|l| l.y < body.pos.y - tile / 2.0)
        else {
            return Vec::new();
        };

        let target_x = target.start_x + target.len_tiles as f32 * tile / 2.0;
        let dx = target_x - body.pos.x;
        if dx.abs() > target.len_tiles as f32 * tile / 2.0 + tile {
            return if dx < 0.0 {
                press(&bindings.left)
            } else {
                press(&bindings.right)
            };
        }

        if player.is_on_ground {
            let rise = (body.pos.y - target.y) + tile;
            let force = (2.0 * tuning.gravity * rise).sqrt();
            let steps = ((force - tuning.jump_force_min) / tuning.jump_force_inc).ceil();
            self.charge_left = steps.max(0.0) as u32;
            return press(&bindings.jump);
        }
        Vec::new()
    }
}

fn run(cli: Cli) -> tower_climb::Result<RunSummary> {
    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let settings = cli
        .settings
        .as_ref()
        .map(Settings::load_or_default)
        .unwrap_or_default();
    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let mut audio = AudioManager::from_settings(&settings);
    let mut state = GameState::new(seed, tuning)?;
    if cli.victory {
        state.enter_scene(Scene::Victory, &mut audio)?;
    }

    let mut summary = RunSummary {
        seed,
        ledges: state.level.ledges.len(),
        spikers: state.level.spikers.len(),
        max_gap: state.level.max_vertical_gap(),
        highest_y: state.player_body.pos.y,
        ..Default::default()
    };

    let mut climber = Climber::default();
    let mut clock = FrameClock::new();
    while summary.ticks < cli.ticks {
        // Pretend the display runs at the sim rate
        for _ in 0..clock.advance(SIM_DT_MS) {
            let held = climber.held_keys(&state, &settings.bindings);
            let input = settings.bindings.snapshot_from(&held);
            tick(&mut state, &input, SIM_DT_MS, &mut audio)?;
            audio.update(SIM_DT_MS);
            summary.ticks += 1;

            for event in &state.events {
                log::debug!("tick {}: {:?}", state.time_ticks, event);
                match event {
                    GameEvent::Jumped => summary.jumps += 1,
                    GameEvent::HazardBounce => summary.hazard_bounces += 1,
                    GameEvent::HazardShove | GameEvent::HazardDeflect => summary.hazard_hits += 1,
                    GameEvent::GoalReached => summary.reached_goal = true,
                    GameEvent::SceneEntered(scene) => log::info!("Entered {:?}", scene),
                }
            }
            if state.scene == Scene::Play {
                summary.highest_y = summary.highest_y.min(state.player_body.pos.y);
            }
        }
    }
    Ok(summary)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Tower Climb (headless) starting...");

    match run(Cli::parse()) {
        Ok(summary) => {
            match serde_json::to_string_pretty(&summary) {
                Ok(json) => println!("{json}"),
                Err(err) => log::error!("failed to encode summary: {err}"),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
