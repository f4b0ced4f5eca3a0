//! Data-driven game balance
//!
//! Defaults mirror `crate::consts`. Tuning files are JSON and may be partial;
//! missing fields fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Player movement and jump tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Gravity applied while not debug-ascending (px/s²)
    pub gravity: f32,
    /// Vertical restitution against platforms
    pub bounciness: f32,
    pub jump_force_min: f32,
    pub jump_force_max: f32,
    pub jump_force_inc: f32,
    pub big_jump_nudge: f32,
    pub max_speed: f32,
    pub speed_inc: f32,
    pub hazard_push_speed: f32,
    pub min_y_scale: f32,
    pub y_scale_inc: f32,
    pub debug_ascend_step: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            bounciness: BOUNCINESS,
            jump_force_min: JUMP_FORCE_MIN,
            jump_force_max: JUMP_FORCE_MAX,
            jump_force_inc: JUMP_FORCE_INC,
            big_jump_nudge: BIG_JUMP_NUDGE,
            max_speed: MAX_SPEED,
            speed_inc: SPEED_INC,
            hazard_push_speed: HAZARD_PUSH_SPEED,
            min_y_scale: MIN_Y_SCALE,
            y_scale_inc: Y_SCALE_INC,
            debug_ascend_step: DEBUG_ASCEND_STEP,
        }
    }
}

impl PlayerTuning {
    /// Apex height of a fully charged jump from rest (px)
    pub fn max_jump_height(&self) -> f32 {
        self.jump_force_max * self.jump_force_max / (2.0 * self.gravity)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite(&[
            ("gravity", self.gravity),
            ("bounciness", self.bounciness),
            ("jump_force_min", self.jump_force_min),
            ("jump_force_max", self.jump_force_max),
            ("jump_force_inc", self.jump_force_inc),
            ("big_jump_nudge", self.big_jump_nudge),
            ("max_speed", self.max_speed),
            ("speed_inc", self.speed_inc),
            ("hazard_push_speed", self.hazard_push_speed),
            ("min_y_scale", self.min_y_scale),
            ("y_scale_inc", self.y_scale_inc),
            ("debug_ascend_step", self.debug_ascend_step),
        ])?;
        if self.gravity <= 0.0 {
            return Err(invalid("gravity must be positive"));
        }
        if !(0.0..=1.0).contains(&self.bounciness) {
            return Err(invalid("bounciness must be within [0, 1]"));
        }
        if self.jump_force_min <= 0.0 || self.jump_force_min > self.jump_force_max {
            return Err(invalid("jump force range must satisfy 0 < min <= max"));
        }
        if self.jump_force_inc < 0.0 || self.speed_inc < 0.0 || self.y_scale_inc < 0.0 {
            return Err(invalid("increments must not be negative"));
        }
        if self.max_speed <= 0.0 {
            return Err(invalid("max_speed must be positive"));
        }
        if !(0.0..=self.max_speed).contains(&self.hazard_push_speed) {
            return Err(invalid("hazard_push_speed must be within [0, max_speed]"));
        }
        if !(self.min_y_scale > 0.0 && self.min_y_scale <= 1.0) {
            return Err(invalid("min_y_scale must be within (0, 1]"));
        }
        Ok(())
    }
}

/// Procedural level generation tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    pub tile_size: f32,
    /// Mid-air platform length range, in tiles
    pub min_platform_len: u32,
    pub max_platform_len: u32,
    /// Vertical gap range between consecutive platforms (px)
    pub min_gap: f32,
    pub max_gap: f32,
    /// Lower the gap ceiling to the player's maximum jump height
    pub clamp_gaps_to_reach: bool,
    /// Hazard band as fractions of the level height (top, bottom)
    pub spiker_band_top: f32,
    pub spiker_band_bottom: f32,
    /// Hazard spacing is `band_bottom / divisor`
    pub spiker_min_spacing_divisor: f32,
    pub spiker_max_spacing_divisor: f32,
    /// Per-hazard speed range (px/ms)
    pub spiker_min_speed: f32,
    pub spiker_max_speed: f32,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            min_platform_len: 2,
            max_platform_len: 12,
            min_gap: 300.0,
            max_gap: 550.0,
            clamp_gaps_to_reach: true,
            spiker_band_top: 0.15,
            spiker_band_bottom: 0.75,
            spiker_min_spacing_divisor: 10.0,
            spiker_max_spacing_divisor: 6.0,
            spiker_min_speed: 0.05,
            spiker_max_speed: 0.55,
        }
    }
}

impl LevelTuning {
    pub fn avg_gap(&self) -> f32 {
        (self.min_gap + self.max_gap) / 2.0
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite(&[
            ("tile_size", self.tile_size),
            ("min_gap", self.min_gap),
            ("max_gap", self.max_gap),
            ("spiker_band_top", self.spiker_band_top),
            ("spiker_band_bottom", self.spiker_band_bottom),
            ("spiker_min_spacing_divisor", self.spiker_min_spacing_divisor),
            ("spiker_max_spacing_divisor", self.spiker_max_spacing_divisor),
            ("spiker_min_speed", self.spiker_min_speed),
            ("spiker_max_speed", self.spiker_max_speed),
        ])?;
        if self.tile_size <= 0.0 {
            return Err(invalid("tile_size must be positive"));
        }
        if self.min_platform_len == 0 || self.min_platform_len > self.max_platform_len {
            return Err(invalid("platform length range must satisfy 0 < min <= max"));
        }
        if self.min_gap <= 0.0 || self.min_gap > self.max_gap {
            return Err(invalid("gap range must satisfy 0 < min <= max"));
        }
        let band = 0.0..=1.0;
        if !band.contains(&self.spiker_band_top)
            || !band.contains(&self.spiker_band_bottom)
            || self.spiker_band_top >= self.spiker_band_bottom
        {
            return Err(invalid("spiker band must satisfy 0 <= top < bottom <= 1"));
        }
        // Larger divisor = smaller spacing
        if self.spiker_max_spacing_divisor <= 0.0
            || self.spiker_min_spacing_divisor < self.spiker_max_spacing_divisor
        {
            return Err(invalid(
                "spiker spacing divisors must satisfy min_divisor >= max_divisor > 0",
            ));
        }
        if self.spiker_min_speed <= 0.0 || self.spiker_min_speed > self.spiker_max_speed {
            return Err(invalid("spiker speed range must satisfy 0 < min <= max"));
        }
        Ok(())
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub level: LevelTuning,
}

impl Tuning {
    pub fn validate(&self) -> Result<()> {
        self.player.validate()?;
        self.level.validate()
    }

    /// Parse a tuning document; call [`Tuning::validate`] before use
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&text).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}

fn invalid(msg: &str) -> Error {
    Error::InvalidTuning(msg.to_string())
}

/// NaN slips through every ordering check, and JSON overflows parse as inf
fn ensure_finite(fields: &[(&str, f32)]) -> Result<()> {
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, value)) => Err(Error::InvalidTuning(format!(
            "{name} must be finite, got {value}"
        ))),
        None => Ok(()),
    }
}
