//! World-space travel limits shared by every entity in a level

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Rectangular travel limits for a level (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundaries {
    pub xmin: f32,
    pub xmax: f32,
    pub ymin: f32,
    pub ymax: f32,
}

impl Boundaries {
    /// Requires `xmin < xmax` and `ymin < ymax`
    pub fn new(xmin: f32, xmax: f32, ymin: f32, ymax: f32) -> Result<Self> {
        // NaN fails both comparisons
        if !(xmin < xmax && ymin < ymax) {
            return Err(Error::InvalidBounds {
                xmin,
                xmax,
                ymin,
                ymax,
            });
        }
        Ok(Self {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// Bounds of a scene of the given view width and level height, inset by
    /// one wall tile on either side
    pub fn for_scene(view_width: f32, level_height: f32, wall_tile: f32) -> Result<Self> {
        Self::new(wall_tile, view_width - wall_tile, 0.0, level_height)
    }

    /// Spawn column for the player and every spiker
    #[inline]
    pub fn spawn_x(&self) -> f32 {
        self.xmax / 2.0
    }

    #[inline]
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.xmin, self.xmax)
    }

    /// True when `x` sits on or past either horizontal limit
    #[inline]
    pub fn touches_x(&self, x: f32) -> bool {
        x <= self.xmin || x >= self.xmax
    }
}
