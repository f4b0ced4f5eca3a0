//! Spiker controller: a kinematic hazard patrolling side to side and spinning

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Direction};
use super::bounds::Boundaries;
use crate::consts::SPIKER_SPIN_DIVISOR;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spiker {
    /// Patrol speed in px/ms, fixed at spawn
    speed: f32,
    pub direction: Direction,
    bounds: Boundaries,
}

impl Spiker {
    pub fn new(bounds: Boundaries, speed: f32) -> Self {
        debug_assert!(speed > 0.0, "spiker speed must be positive");
        Self {
            speed,
            direction: Direction::Right,
            bounds,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Kinematic body at `pos`
    pub fn spawn_body(&self, pos: Vec2) -> Body {
        Body::new(pos)
    }

    pub fn tick(&mut self, body: &mut Body, dt_ms: f32) {
        let step = self.speed * dt_ms;

        // Turn before moving so we never visibly poke through a wall
        let next_x = body.pos.x + step * self.direction.sign();
        if self.bounds.touches_x(next_x) {
            self.direction = self.direction.flipped();
        }
        body.pos.x = self
            .bounds
            .clamp_x(body.pos.x + step * self.direction.sign());

        body.rotation += self.speed / SPIKER_SPIN_DIVISOR * self.direction.sign();

        // Not pushable
        body.vel = Vec2::ZERO;
    }
}
