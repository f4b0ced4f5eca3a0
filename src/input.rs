//! Key bindings
//!
//! Each logical action can be bound to several physical keys; a frontend
//! reports which physical keys are held and gets back the immutable
//! [`TickInput`] snapshot the simulation consumes.

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Physical keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    A,
    D,
    W,
    Z,
}

/// Logical action -> physical keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<Key>,
    pub right: Vec<Key>,
    pub jump: Vec<Key>,
    /// Cheat: float straight up with gravity off
    pub debug_ascend: Vec<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: vec![Key::ArrowLeft, Key::A],
            right: vec![Key::ArrowRight, Key::D],
            jump: vec![Key::Space],
            debug_ascend: vec![Key::Z],
        }
    }
}

impl KeyBindings {
    /// Fold the currently held physical keys into a tick snapshot
    pub fn snapshot(&self, is_held: impl Fn(Key) -> bool) -> TickInput {
        let any = |keys: &[Key]| keys.iter().any(|&k| is_held(k));
        TickInput {
            left: any(&self.left),
            right: any(&self.right),
            jump: any(&self.jump),
            debug_ascend: any(&self.debug_ascend),
        }
    }

    /// Snapshot from a list of held keys
    pub fn snapshot_from(&self, held: &[Key]) -> TickInput {
        self.snapshot(|k| held.contains(&k))
    }
}
