//! Collision response
//!
//! Stateless dispatch from "the player touched X" to player state changes.
//! Detection lives in `physics`; this module only decides what a contact
//! means.

use glam::Vec2;

use super::body::Body;
use super::player::Player;
use crate::audio::{SoundEffect, SoundSink};

/// What the player touched
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Any side of any platform tile
    Platform,
    Goal,
    Hazard { hazard_pos: Vec2 },
}

/// How a contact was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Landed,
    GoalReached,
    /// Came down on top of a spiker and jumped off it
    HazardBounce,
    /// Hit a spiker from the side while grounded
    HazardShove,
    /// Hit a spiker from the side while airborne
    HazardDeflect,
}

pub fn resolve_contact(
    player: &mut Player,
    body: &mut Body,
    contact: Contact,
    audio: &mut dyn SoundSink,
) -> ContactOutcome {
    match contact {
        // Deliberately permissive: no contact normal check
        Contact::Platform => {
            player.land();
            ContactOutcome::Landed
        }
        Contact::Goal => ContactOutcome::GoalReached,
        Contact::Hazard { hazard_pos } => {
            if body.pos.y < hazard_pos.y {
                player.jump(body, true, audio);
                return ContactOutcome::HazardBounce;
            }

            let outcome = if player.is_on_ground {
                player.curr_x_speed = player.tuning().hazard_push_speed;
                ContactOutcome::HazardShove
            } else {
                player.direction = player.direction.flipped();
                ContactOutcome::HazardDeflect
            };
            audio.play_once(SoundEffect::SpikerHit);
            log::debug!("spiker hit: {:?}", outcome);
            outcome
        }
    }
}
