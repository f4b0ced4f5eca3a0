//! Minimal arcade physics
//!
//! Just enough of an engine to run the game headless: gravity integration,
//! box overlap and push-out along the axis of least penetration.

use glam::Vec2;

use super::body::Body;

/// Below this rebound speed (px/s) a body comes to rest instead of bouncing
pub const REST_SPEED: f32 = 60.0;

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size / 2.0,
        }
    }

    pub fn square(center: Vec2, size: f32) -> Self {
        Self::new(center, Vec2::splat(size))
    }

    /// Strict overlap; boxes sharing an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }

    /// Smallest translation that moves `self` out of `other`
    pub fn penetration(&self, other: &Aabb) -> Option<Vec2> {
        if !self.overlaps(other) {
            return None;
        }
        let delta = self.center - other.center;
        let reach = self.half + other.half;
        let depth = reach - delta.abs();

        if depth.x < depth.y {
            let sign = if delta.x < 0.0 { -1.0 } else { 1.0 };
            Some(Vec2::new(depth.x * sign, 0.0))
        } else {
            // Ties resolve vertically: landing wins over wall-sliding
            let sign = if delta.y < 0.0 { -1.0 } else { 1.0 };
            Some(Vec2::new(0.0, depth.y * sign))
        }
    }
}

/// Apply gravity and velocity for one step
pub fn integrate(body: &mut Body, dt_ms: f32) {
    let dt = dt_ms / 1000.0;
    body.vel.y += body.gravity_y * dt;
    body.pos += body.vel * dt;
}

/// Push `body` out of `solid`; returns the applied translation
pub fn push_out(body: &mut Body, body_box: &Aabb, solid: &Aabb) -> Option<Vec2> {
    let mtv = body_box.penetration(solid)?;
    body.pos += mtv;
    Some(mtv)
}

/// Velocity response to a push-out
pub fn rebound(body: &mut Body, mtv: Vec2, bounciness: f32) {
    // Only cancel motion heading into the surface
    if mtv.y != 0.0 && mtv.y.signum() != body.vel.y.signum() && body.vel.y != 0.0 {
        let bounced = -body.vel.y * bounciness;
        body.vel.y = if bounced.abs() < REST_SPEED { 0.0 } else { bounced };
    }
    if mtv.x != 0.0 && mtv.x.signum() != body.vel.x.signum() && body.vel.x != 0.0 {
        body.vel.x = 0.0;
    }
}
