//! Player controller
//!
//! Owns the jump-charge state machine, the horizontal speed ramp and the
//! one-frame ground flag. Physics-facing state lives in the [`Body`] passed to
//! each call.

use serde::{Deserialize, Serialize};

use super::body::{Body, Direction};
use super::bounds::Boundaries;
use super::tick::TickInput;
use crate::audio::{SoundEffect, SoundSink};
use crate::tuning::PlayerTuning;

/// Jump charge state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpPhase {
    Idle,
    /// Jump key went down; force accumulates while it stays down
    Charging,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Horizontal speed in px/ms, within [0, max_speed]
    pub curr_x_speed: f32,
    pub direction: Direction,
    /// Set by the collision pass, cleared every tick
    pub is_on_ground: bool,
    pub is_preparing_jump: bool,
    /// Pending jump impulse, within [jump_force_min, jump_force_max]
    pub jump_force: f32,
    /// Crouch squash, within [min_y_scale, 1]
    pub scale_y: f32,
    bounds: Boundaries,
    tuning: PlayerTuning,
}

impl Player {
    pub fn new(bounds: Boundaries, tuning: PlayerTuning) -> Self {
        Self {
            curr_x_speed: 0.0,
            direction: Direction::Right,
            is_on_ground: false,
            is_preparing_jump: false,
            jump_force: tuning.jump_force_min,
            scale_y: 1.0,
            bounds,
            tuning,
        }
    }

    /// Body for a freshly spawned player at `pos`
    pub fn spawn_body(&self, pos: glam::Vec2) -> Body {
        Body::new(pos).with_gravity(self.tuning.gravity)
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    pub fn jump_phase(&self) -> JumpPhase {
        if self.is_preparing_jump {
            JumpPhase::Charging
        } else {
            JumpPhase::Idle
        }
    }

    /// Per-frame update. Returns true if a jump fired this tick.
    ///
    /// Ground state read here comes from the previous frame's collision pass;
    /// it is cleared before this frame's pass runs.
    pub fn tick(
        &mut self,
        body: &mut Body,
        input: &TickInput,
        dt_ms: f32,
        audio: &mut dyn SoundSink,
    ) -> bool {
        self.handle_horizontal_movement(body, input, dt_ms);
        let jumped = self.handle_jump_input(body, input, audio);

        self.is_on_ground = false;

        if input.debug_ascend {
            body.pos.y -= self.tuning.debug_ascend_step;
            body.gravity_y = 0.0;
        } else if body.gravity_y == 0.0 {
            // Only undo our own override
            body.gravity_y = self.tuning.gravity;
        }

        body.scale.y = self.scale_y;
        jumped
    }

    fn handle_jump_input(
        &mut self,
        body: &mut Body,
        input: &TickInput,
        audio: &mut dyn SoundSink,
    ) -> bool {
        match self.jump_phase() {
            JumpPhase::Idle => {
                if input.jump {
                    self.is_preparing_jump = true;
                }
                false
            }
            JumpPhase::Charging if input.jump => {
                self.jump_force =
                    (self.jump_force + self.tuning.jump_force_inc).min(self.tuning.jump_force_max);
                self.scale_y = (self.scale_y - self.tuning.y_scale_inc).max(self.tuning.min_y_scale);
                false
            }
            JumpPhase::Charging => {
                // Released in the air: keep the charge until we touch down
                if self.is_on_ground {
                    self.jump(body, false, audio);
                    true
                } else {
                    false
                }
            }
        }
    }

    fn handle_horizontal_movement(&mut self, body: &mut Body, input: &TickInput, dt_ms: f32) {
        if self.is_on_ground {
            let moving = input.left || input.right;
            let delta = if moving {
                self.tuning.speed_inc
            } else {
                -self.tuning.speed_inc
            };
            self.curr_x_speed = (self.curr_x_speed + delta).clamp(0.0, self.tuning.max_speed);

            let wanted = if input.right {
                Some(Direction::Right)
            } else if input.left {
                Some(Direction::Left)
            } else {
                None
            };
            if let Some(dir) = wanted {
                if dir != self.direction {
                    self.curr_x_speed = 0.0;
                }
                self.direction = dir;
            }
        }

        body.pos.x += self.curr_x_speed * dt_ms * self.direction.sign();
        self.keep_in_bounds(body);
    }

    fn keep_in_bounds(&mut self, body: &mut Body) {
        if self.bounds.touches_x(body.pos.x) {
            body.pos.x = self.bounds.clamp_x(body.pos.x);
            self.direction = self.direction.flipped();
        }
    }

    /// Fire the charged jump.
    ///
    /// The impulse stacks on the current vertical velocity. A hazard bounce
    /// while falling first turns the fall into a rise.
    pub fn jump(&mut self, body: &mut Body, from_hazard_bounce: bool, audio: &mut dyn SoundSink) {
        let mut vel_y = body.vel.y;
        if from_hazard_bounce && vel_y > 0.0 {
            vel_y = -vel_y;
        }
        body.vel.y = vel_y - self.jump_force;

        audio.play_once(SoundEffect::Jump);

        if self.jump_force > self.tuning.jump_force_max / 2.0 {
            body.pos.y -= self.tuning.big_jump_nudge;
        }

        log::debug!(
            "jump: force {:.0}, vy {:.0}, bounce {}",
            self.jump_force,
            body.vel.y,
            from_hazard_bounce
        );

        self.is_preparing_jump = false;
        self.is_on_ground = false;
        self.scale_y = 1.0;
        self.jump_force = self.tuning.jump_force_min;
        body.scale.y = 1.0;
    }

    /// Platform contact from the collision pass
    pub fn land(&mut self) {
        self.is_on_ground = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioManager;
    use glam::Vec2;

    fn setup() -> (Player, Body, AudioManager) {
        let bounds = Boundaries::new(0.0, 10_000.0, 0.0, 10_000.0).unwrap();
        let player = Player::new(bounds, PlayerTuning::default());
        let body = player.spawn_body(Vec2::new(5_000.0, 5_000.0));
        (player, body, AudioManager::new())
    }

    fn right() -> TickInput {
        TickInput {
            right: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_speed_ramps_while_grounded() {
        let (mut player, mut body, mut audio) = setup();
        for _ in 0..10 {
            player.land();
            player.tick(&mut body, &right(), 16.0, &mut audio);
        }
        assert!((player.curr_x_speed - 0.1).abs() < 1e-5);
        assert_eq!(player.direction, Direction::Right);
        assert!(body.pos.x > 5_000.0);
    }

    #[test]
    fn test_speed_frozen_while_airborne() {
        let (mut player, mut body, mut audio) = setup();
        player.curr_x_speed = 0.5;
        let x0 = body.pos.x;
        player.tick(&mut body, &TickInput::default(), 10.0, &mut audio);
        assert_eq!(player.curr_x_speed, 0.5);
        assert!((body.pos.x - (x0 + 5.0)).abs() < 1e-3);
    }

    #[test]
    fn test_reversal_resets_speed() {
        let (mut player, mut body, mut audio) = setup();
        player.curr_x_speed = 0.6;
        player.land();
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        player.tick(&mut body, &left, 16.0, &mut audio);
        assert_eq!(player.curr_x_speed, 0.0);
        assert_eq!(player.direction, Direction::Left);
    }

    #[test]
    fn test_speed_decays_without_input() {
        let (mut player, mut body, mut audio) = setup();
        player.curr_x_speed = 0.015;
        player.land();
        player.tick(&mut body, &TickInput::default(), 16.0, &mut audio);
        assert!((player.curr_x_speed - 0.005).abs() < 1e-6);
        player.land();
        player.tick(&mut body, &TickInput::default(), 16.0, &mut audio);
        assert_eq!(player.curr_x_speed, 0.0);
    }

    #[test]
    fn test_boundary_clamps_and_flips() {
        let bounds = Boundaries::new(0.0, 100.0, 0.0, 100.0).unwrap();
        let mut player = Player::new(bounds, PlayerTuning::default());
        let mut body = player.spawn_body(Vec2::new(99.0, 50.0));
        let mut audio = AudioManager::new();
        player.curr_x_speed = 0.75;
        player.tick(&mut body, &TickInput::default(), 16.0, &mut audio);
        assert_eq!(body.pos.x, 100.0);
        assert_eq!(player.direction, Direction::Left);
    }

    #[test]
    fn test_charge_then_release_on_ground() {
        let (mut player, mut body, mut audio) = setup();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        player.tick(&mut body, &jump, 16.0, &mut audio);
        assert_eq!(player.jump_phase(), JumpPhase::Charging);
        assert_eq!(player.jump_force, 300.0);

        for _ in 0..3 {
            player.tick(&mut body, &jump, 16.0, &mut audio);
        }
        assert_eq!(player.jump_force, 450.0);
        assert!((player.scale_y - 0.97).abs() < 1e-5);
        assert!((body.scale.y - 0.97).abs() < 1e-5);

        player.land();
        let jumped = player.tick(&mut body, &TickInput::default(), 16.0, &mut audio);
        assert!(jumped);
        assert_eq!(body.vel.y, -450.0);
        assert_eq!(player.jump_phase(), JumpPhase::Idle);
        assert_eq!(player.jump_force, 300.0);
        assert_eq!(player.scale_y, 1.0);
        assert!(audio.is_playing(SoundEffect::Jump));
    }

    #[test]
    fn test_release_in_air_defers_jump() {
        let (mut player, mut body, mut audio) = setup();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        player.tick(&mut body, &jump, 16.0, &mut audio);
        player.tick(&mut body, &jump, 16.0, &mut audio);
        let force = player.jump_force;

        for _ in 0..5 {
            assert!(!player.tick(&mut body, &TickInput::default(), 16.0, &mut audio));
            assert!(player.is_preparing_jump);
            assert_eq!(player.jump_force, force);
        }

        player.land();
        assert!(player.tick(&mut body, &TickInput::default(), 16.0, &mut audio));
        assert_eq!(body.vel.y, -force);
    }

    #[test]
    fn test_charge_clamps() {
        let (mut player, mut body, mut audio) = setup();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        for _ in 0..200 {
            player.tick(&mut body, &jump, 16.0, &mut audio);
        }
        assert_eq!(player.jump_force, 1500.0);
        assert_eq!(player.scale_y, 0.5);
    }

    #[test]
    fn test_jump_from_rest() {
        let (mut player, mut body, mut audio) = setup();
        player.is_preparing_jump = true;
        player.jump(&mut body, false, &mut audio);
        assert_eq!(body.vel.y, -300.0);
        assert!(!player.is_preparing_jump);
        assert_eq!(player.jump_force, 300.0);
        assert_eq!(body.pos.y, 5_000.0);
    }

    #[test]
    fn test_jump_stacks_on_velocity() {
        let (mut player, mut body, mut audio) = setup();
        body.vel.y = -200.0;
        player.jump(&mut body, false, &mut audio);
        assert_eq!(body.vel.y, -500.0);
    }

    #[test]
    fn test_hazard_bounce_inverts_fall() {
        let (mut player, mut body, mut audio) = setup();
        body.vel.y = 400.0;
        player.jump(&mut body, true, &mut audio);
        assert_eq!(body.vel.y, -700.0);

        body.vel.y = 400.0;
        player.jump(&mut body, false, &mut audio);
        assert_eq!(body.vel.y, 100.0);
    }

    #[test]
    fn test_big_jump_nudges_up() {
        let (mut player, mut body, mut audio) = setup();
        player.jump_force = 800.0;
        player.jump(&mut body, false, &mut audio);
        assert_eq!(body.pos.y, 5_000.0 - 32.0);
    }

    #[test]
    fn test_jump_sound_not_retriggered() {
        let (mut player, mut body, mut audio) = setup();
        player.jump(&mut body, false, &mut audio);
        player.jump(&mut body, false, &mut audio);
        assert_eq!(audio.voices().len(), 1);
    }

    #[test]
    fn test_debug_ascend_toggles_gravity() {
        let (mut player, mut body, mut audio) = setup();
        let cheat = TickInput {
            debug_ascend: true,
            ..Default::default()
        };
        player.tick(&mut body, &cheat, 16.0, &mut audio);
        assert_eq!(body.pos.y, 4_990.0);
        assert_eq!(body.gravity_y, 0.0);

        player.tick(&mut body, &TickInput::default(), 16.0, &mut audio);
        assert_eq!(body.gravity_y, 2000.0);
    }

    #[test]
    fn test_release_leaves_foreign_gravity_alone() {
        let (mut player, mut body, mut audio) = setup();
        body.gravity_y = 500.0;
        player.tick(&mut body, &TickInput::default(), 16.0, &mut audio);
        assert_eq!(body.gravity_y, 500.0);
    }

    #[test]
    fn test_ground_flag_cleared_each_tick() {
        let (mut player, mut body, mut audio) = setup();
        player.land();
        assert!(player.is_on_ground);
        player.tick(&mut body, &TickInput::default(), 16.0, &mut audio);
        assert!(!player.is_on_ground);
    }
}
