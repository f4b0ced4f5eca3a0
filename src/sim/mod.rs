//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed tick order (player, spikers, physics, collisions)
//! - Seeded RNG only, injected into level generation
//! - No rendering or platform dependencies

pub mod body;
pub mod bounds;
pub mod collision;
pub mod level;
pub mod physics;
pub mod player;
pub mod spiker;
pub mod state;
pub mod tick;

pub use body::{Body, Direction};
pub use bounds::Boundaries;
pub use collision::{Contact, ContactOutcome, resolve_contact};
pub use level::{
    Goal, Ledge, Level, Platform, PlatformKind, SpikerSpawn, build_shell, generate_level,
    generate_victory_level,
};
pub use physics::Aabb;
pub use player::{JumpPhase, Player};
pub use spiker::Spiker;
pub use state::{GameEvent, GameState, Scene, SpikerEntity};
pub use tick::{FrameClock, TickInput, tick};
