//! Tower Climb - a vertical-shaft platformer core
//!
//! Core modules:
//! - `sim`: Simulation (player, spikers, level generation, collisions, frame tick)
//! - `input`: Physical key bindings folded into a per-tick input snapshot
//! - `audio`: Keyed sound triggers with "is playing" tracking
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences persisted as JSON

pub mod audio;
pub mod error;
pub mod input;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use settings::Settings;
pub use tuning::{LevelTuning, PlayerTuning, Tuning};

/// Game configuration constants
///
/// Distances are in pixels, horizontal speeds in pixels per millisecond and
/// vertical velocities in pixels per second (arcade physics convention).
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const SIM_DT_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Downward acceleration applied to the player (px/s²)
    pub const GRAVITY: f32 = 2000.0;
    /// Vertical restitution when the player hits a platform
    pub const BOUNCINESS: f32 = 0.4;

    /// Jump impulse bounds and per-tick charge step
    pub const JUMP_FORCE_MIN: f32 = 300.0;
    pub const JUMP_FORCE_MAX: f32 = 1500.0;
    pub const JUMP_FORCE_INC: f32 = 50.0;
    /// Upward nudge applied on big jumps so the crouch reset doesn't clip
    pub const BIG_JUMP_NUDGE: f32 = 32.0;

    /// Horizontal speed ramp (px/ms)
    pub const MAX_SPEED: f32 = 0.75;
    pub const SPEED_INC: f32 = 0.01;
    /// Speed forced onto a grounded player shoved by a spiker
    pub const HAZARD_PUSH_SPEED: f32 = MAX_SPEED;

    /// Crouch squash while charging a jump
    pub const MIN_Y_SCALE: f32 = 0.5;
    pub const Y_SCALE_INC: f32 = 0.01;

    /// Debug ascend rate (px per tick)
    pub const DEBUG_ASCEND_STEP: f32 = 10.0;

    /// Spiker spin per tick is `speed / SPIKER_SPIN_DIVISOR`
    pub const SPIKER_SPIN_DIVISOR: f32 = 10.0;

    /// Level geometry
    pub const TILE_SIZE: f32 = 64.0;
    pub const VIEW_WIDTH: f32 = 1200.0;
    pub const PLAY_LEVEL_HEIGHT: f32 = 6000.0;
    pub const VICTORY_LEVEL_HEIGHT: f32 = 700.0;

    /// Collision box sizes
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;
    pub const SPIKER_SIZE: f32 = 56.0;
    pub const GOAL_WIDTH: f32 = 48.0;
    pub const GOAL_HEIGHT: f32 = 64.0;
}
