//! Engine-side transform handed to controllers each tick
//!
//! Controllers own their behavioral state; the body is the physics-facing
//! part (position, velocity, spin, squash, gravity) that the physics step and
//! the collision pass also touch.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Horizontal facing/travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    /// -1.0 for left, +1.0 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// 2D transform + arcade body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Center position (y grows downward)
    pub pos: Vec2,
    /// Velocity in px/s
    pub vel: Vec2,
    /// Rotation in radians, unbounded
    pub rotation: f32,
    pub scale: Vec2,
    /// Per-body gravity (px/s²); 0 for kinematic bodies
    pub gravity_y: f32,
}

impl Body {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            gravity_y: 0.0,
        }
    }

    pub fn with_gravity(mut self, gravity_y: f32) -> Self {
        self.gravity_y = gravity_y;
        self
    }
}
