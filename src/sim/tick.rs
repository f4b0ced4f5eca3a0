//! Frame tick
//!
//! Fixed order every frame: player, spikers, physics integration, then one
//! collision pass over the final positions. Collision effects apply
//! immediately; nothing is queued across frames.

use super::collision::{Contact, ContactOutcome, resolve_contact};
use super::physics::{self, Aabb};
use super::state::{GameEvent, GameState, Scene};
use crate::audio::SoundSink;
use crate::consts::*;
use crate::error::Result;

/// Logical input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub debug_ascend: bool,
}

/// Advance the game state by one step of `dt_ms` milliseconds
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt_ms: f32,
    audio: &mut dyn SoundSink,
) -> Result<()> {
    state.events.clear();
    if state.scene_audio_pending {
        state.play_scene_audio(audio);
    }
    state.time_ticks += 1;

    if state
        .player
        .tick(&mut state.player_body, input, dt_ms, audio)
    {
        state.events.push(GameEvent::Jumped);
    }

    for entity in &mut state.spikers {
        entity.spiker.tick(&mut entity.body, dt_ms);
    }

    physics::integrate(&mut state.player_body, dt_ms);

    let goal_reached = resolve_collisions(state, audio);

    if goal_reached && state.scene == Scene::Play {
        state.enter_scene(Scene::Victory, audio)?;
        state.events.push(GameEvent::SceneEntered(Scene::Victory));
    }
    Ok(())
}

fn player_box(state: &GameState) -> Aabb {
    let size = glam::Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT * state.player.scale_y);
    Aabb::new(state.player_body.pos, size)
}

/// One collision pass; returns true if the goal was touched
fn resolve_collisions(state: &mut GameState, audio: &mut dyn SoundSink) -> bool {
    let mut goal_reached = false;

    if let Some(goal) = state.level.goal {
        let goal_box = Aabb::new(goal.pos, glam::Vec2::new(GOAL_WIDTH, GOAL_HEIGHT));
        if player_box(state).overlaps(&goal_box) {
            resolve_contact(
                &mut state.player,
                &mut state.player_body,
                Contact::Goal,
                audio,
            );
            state.events.push(GameEvent::GoalReached);
            goal_reached = true;
        }
    }

    let tile = state.level.tile_size;
    let bounciness = state.player.tuning().bounciness;
    for i in 0..state.level.platforms.len() {
        let tile_box = Aabb::square(state.level.platforms[i].pos, tile);
        let body_box = player_box(state);
        if let Some(mtv) = physics::push_out(&mut state.player_body, &body_box, &tile_box) {
            physics::rebound(&mut state.player_body, mtv, bounciness);
            resolve_contact(
                &mut state.player,
                &mut state.player_body,
                Contact::Platform,
                audio,
            );
        }
    }

    for i in 0..state.spikers.len() {
        let hazard_pos = state.spikers[i].body.pos;
        let hazard_box = Aabb::square(hazard_pos, SPIKER_SIZE);
        if !player_box(state).overlaps(&hazard_box) {
            continue;
        }

        let outcome = resolve_contact(
            &mut state.player,
            &mut state.player_body,
            Contact::Hazard { hazard_pos },
            audio,
        );
        // The spiker is immovable; only the player gets pushed out
        let body_box = player_box(state);
        physics::push_out(&mut state.player_body, &body_box, &hazard_box);
        state.spikers[i].body.vel = glam::Vec2::ZERO;

        state.events.push(match outcome {
            ContactOutcome::HazardBounce => GameEvent::HazardBounce,
            ContactOutcome::HazardShove => GameEvent::HazardShove,
            _ => GameEvent::HazardDeflect,
        });
    }

    goal_reached
}

/// Fixed-timestep accumulator: turns variable frame deltas into whole ticks
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator_ms: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame's elapsed time; returns how many fixed ticks to run
    pub fn advance(&mut self, frame_ms: f32) -> u32 {
        // Clamp long stalls (tab switch, debugger)
        self.accumulator_ms += frame_ms.clamp(0.0, 100.0);

        let mut substeps = 0;
        while self.accumulator_ms >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            self.accumulator_ms -= SIM_DT_MS;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog instead of spiralling
            self.accumulator_ms = self.accumulator_ms.min(SIM_DT_MS);
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioManager, SoundEffect};
    use crate::tuning::Tuning;

    fn settle(state: &mut GameState, audio: &mut AudioManager) {
        for _ in 0..30 {
            tick(state, &TickInput::default(), SIM_DT_MS, audio).unwrap();
        }
    }

    #[test]
    fn test_player_settles_on_floor() {
        let mut state = GameState::new(12345, Tuning::default()).unwrap();
        let mut audio = AudioManager::new();
        settle(&mut state, &mut audio);

        assert!(state.player.is_on_ground);
        assert_eq!(state.player_body.vel.y, 0.0);
        assert!((state.player_body.pos.y - 5936.0).abs() < 1.0);
        assert!(audio.is_playing(SoundEffect::BackgroundMusic));
    }

    #[test]
    fn test_charge_and_jump_from_floor() {
        let mut state = GameState::new(7, Tuning::default()).unwrap();
        let mut audio = AudioManager::new();
        settle(&mut state, &mut audio);

        let hold = TickInput {
            jump: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &hold, SIM_DT_MS, &mut audio).unwrap();
        }
        assert!(state.player.is_preparing_jump);
        let y0 = state.player_body.pos.y;

        let mut jumped = false;
        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), SIM_DT_MS, &mut audio).unwrap();
            if state.events.contains(&GameEvent::Jumped) {
                jumped = true;
                break;
            }
        }
        assert!(jumped);
        assert!(state.player_body.vel.y < 0.0);
        assert!(state.player_body.pos.y < y0);
        assert!(!state.player.is_preparing_jump);
    }

    #[test]
    fn test_spikers_tick_every_frame() {
        let mut state = GameState::new(3, Tuning::default()).unwrap();
        let mut audio = AudioManager::new();
        let before: Vec<_> = state.spikers.iter().map(|s| s.body.pos.x).collect();
        tick(&mut state, &TickInput::default(), SIM_DT_MS, &mut audio).unwrap();
        for (entity, x0) in state.spikers.iter().zip(before) {
            assert!(entity.body.pos.x != x0);
            assert!(entity.body.rotation != 0.0);
        }
    }

    #[test]
    fn test_goal_contact_switches_scene() {
        let mut state = GameState::new(11, Tuning::default()).unwrap();
        let mut audio = AudioManager::new();
        let goal = state.level.goal.unwrap();
        state.player_body.pos = goal.pos;
        state.player_body.gravity_y = 0.0;
        state.player_body.vel = glam::Vec2::ZERO;

        // Hold debug ascend so gravity stays off for this frame
        let input = TickInput {
            debug_ascend: true,
            ..Default::default()
        };
        state.player_body.pos.y += DEBUG_ASCEND_STEP;
        tick(&mut state, &input, SIM_DT_MS, &mut audio).unwrap();

        assert!(state.events.contains(&GameEvent::GoalReached));
        assert!(state.events.contains(&GameEvent::SceneEntered(Scene::Victory)));
        assert_eq!(state.scene, Scene::Victory);
        assert!(audio.is_playing(SoundEffect::Victory));
    }

    #[test]
    fn test_frame_clock_substeps() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(10.0), 0);
        assert_eq!(clock.advance(10.0), 1);
        assert_eq!(clock.advance(50.0), 3);
        // Long stall is clamped, then capped
        let mut clock = FrameClock::new();
        assert!(clock.advance(10_000.0) <= MAX_SUBSTEPS);
    }
}
