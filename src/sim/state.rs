//! Game state and scene wiring
//!
//! A `GameState` owns one scene's worth of entities. Switching scenes throws
//! the old entities away and builds new ones from a fresh level.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::bounds::Boundaries;
use super::level::{Level, generate_level, generate_victory_level};
use super::player::Player;
use super::spiker::Spiker;
use crate::audio::{SoundEffect, SoundSink};
use crate::consts::*;
use crate::error::Result;
use crate::tuning::Tuning;

/// Which room is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scene {
    /// The generated climb
    Play,
    /// Win room reached through the goal
    Victory,
}

/// Things that happened during a tick, for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    HazardBounce,
    HazardShove,
    HazardDeflect,
    GoalReached,
    SceneEntered(Scene),
}

/// A spiker controller with its transform
#[derive(Debug, Clone)]
pub struct SpikerEntity {
    pub spiker: Spiker,
    pub body: Body,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub scene: Scene,
    pub bounds: Boundaries,
    pub level: Level,
    pub player: Player,
    pub player_body: Body,
    /// Ticked in spawn order
    pub spikers: Vec<SpikerEntity>,
    /// Simulation tick counter for the current scene
    pub time_ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Scene entry sounds wait for the first tick with an audio sink
    pub(crate) scene_audio_pending: bool,
}

impl GameState {
    /// Create a new game in the play scene
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self> {
        tuning.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let (bounds, level) = build_play_level(&tuning, &mut rng)?;
        let (player, player_body) = spawn_player(&bounds, &tuning, play_spawn(&bounds, &tuning));
        let spikers = spawn_spikers(&bounds, &level);

        log::info!("New game, seed {seed}");
        Ok(Self {
            seed,
            rng,
            tuning,
            scene: Scene::Play,
            bounds,
            level,
            player,
            player_body,
            spikers,
            time_ticks: 0,
            events: Vec::new(),
            scene_audio_pending: true,
        })
    }

    /// Load a scene now, replacing every entity
    pub fn enter_scene(&mut self, scene: Scene, audio: &mut dyn SoundSink) -> Result<()> {
        self.load_scene(scene)?;
        self.play_scene_audio(audio);
        Ok(())
    }

    /// Regenerate the play scene with fresh random draws
    pub fn restart(&mut self, audio: &mut dyn SoundSink) -> Result<()> {
        log::info!("Restarting level");
        self.enter_scene(Scene::Play, audio)
    }

    fn load_scene(&mut self, scene: Scene) -> Result<()> {
        let tile = self.tuning.level.tile_size;
        let (bounds, level, spawn) = match scene {
            Scene::Play => {
                let (bounds, level) = build_play_level(&self.tuning, &mut self.rng)?;
                let spawn = play_spawn(&bounds, &self.tuning);
                (bounds, level, spawn)
            }
            Scene::Victory => {
                let bounds = Boundaries::for_scene(VIEW_WIDTH, VICTORY_LEVEL_HEIGHT, tile)?;
                let level = generate_victory_level(&bounds, tile, VICTORY_LEVEL_HEIGHT);
                (bounds, level, Vec2::new(bounds.xmax * 0.35, 50.0))
            }
        };

        let (player, player_body) = spawn_player(&bounds, &self.tuning, spawn);
        self.spikers = spawn_spikers(&bounds, &level);
        self.player = player;
        self.player_body = player_body;
        self.bounds = bounds;
        self.level = level;
        self.scene = scene;
        self.time_ticks = 0;
        self.scene_audio_pending = true;

        log::info!("Entered {:?} scene", scene);
        Ok(())
    }

    pub(crate) fn play_scene_audio(&mut self, audio: &mut dyn SoundSink) {
        self.scene_audio_pending = false;
        match self.scene {
            Scene::Play => audio.play_once(SoundEffect::BackgroundMusic),
            Scene::Victory => audio.play_once(SoundEffect::Victory),
        };
    }
}

fn build_play_level(tuning: &Tuning, rng: &mut Pcg32) -> Result<(Boundaries, Level)> {
    let bounds = Boundaries::for_scene(VIEW_WIDTH, PLAY_LEVEL_HEIGHT, tuning.level.tile_size)?;
    let level = generate_level(&bounds, PLAY_LEVEL_HEIGHT, tuning, rng);
    Ok((bounds, level))
}

/// Just above the floor, mid-level
fn play_spawn(bounds: &Boundaries, tuning: &Tuning) -> Vec2 {
    Vec2::new(bounds.spawn_x(), bounds.ymax - tuning.level.tile_size)
}

fn spawn_player(bounds: &Boundaries, tuning: &Tuning, pos: Vec2) -> (Player, Body) {
    let player = Player::new(*bounds, tuning.player);
    let body = player.spawn_body(pos);
    (player, body)
}

fn spawn_spikers(bounds: &Boundaries, level: &Level) -> Vec<SpikerEntity> {
    level
        .spikers
        .iter()
        .map(|spawn| {
            let spiker = Spiker::new(*bounds, spawn.speed);
            let body = spiker.spawn_body(spawn.pos);
            SpikerEntity { spiker, body }
        })
        .collect()
}
