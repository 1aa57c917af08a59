//! Per-agent steering.
//!
//! Pure functions over an agent's [`Heading`]. The retarget timer splits each
//! agent's life into holding and retargeting phases: while holding, the desired
//! direction is kept; when the timer runs out a new one is computed from
//! pursuit, wander and separation. The current heading is low-pass filtered
//! toward the desired one every physics step.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use onslaught_core::components::{Heading, MoveSpeed};
use onslaught_core::constants::STEERING_EPSILON_SQ;
use onslaught_core::types::ArenaBounds;

use crate::profiles::SteeringProfile;

/// What an agent knows about the entity it chases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub position: Vec2,
    /// Present only when the target reports one.
    pub velocity: Option<Vec2>,
}

/// Initial heading for a freshly spawned agent. Call [`retarget`] right after.
pub fn initial_heading() -> Heading {
    Heading {
        desired: Vec2::X,
        current: Vec2::X,
        retarget_timer: 0.0,
    }
}

/// Count the retarget timer down by `dt`. Returns true when it expired.
pub fn tick_timer(heading: &mut Heading, dt: f32) -> bool {
    heading.retarget_timer -= dt;
    heading.retarget_timer <= 0.0
}

/// Draw a new hold duration and recompute the desired direction.
pub fn retarget<R: Rng + ?Sized>(
    heading: &mut Heading,
    profile: &SteeringProfile,
    position: Vec2,
    target: Option<&TargetInfo>,
    neighbors: &[Vec2],
    rng: &mut R,
) {
    heading.retarget_timer = hold_duration(profile, rng);
    heading.desired = desired_direction(profile, position, target, neighbors, rng);
}

/// Unit desired direction: weighted pursuit + wander + separation.
///
/// `neighbors` are positions of same-faction agents already filtered to the
/// separation radius, excluding the agent itself. A near-zero sum falls back
/// to a random unit vector.
pub fn desired_direction<R: Rng + ?Sized>(
    profile: &SteeringProfile,
    position: Vec2,
    target: Option<&TargetInfo>,
    neighbors: &[Vec2],
    rng: &mut R,
) -> Vec2 {
    let mut dir = Vec2::ZERO;

    if profile.chase_strength != 0.0 {
        if let Some(target) = target {
            dir += pursuit(profile, position, target) * profile.chase_strength;
        }
    }

    dir += random_unit(rng) * profile.wander_strength;

    if profile.separation_enabled() {
        dir += separation(position, neighbors) * profile.separation_strength;
    }

    if dir.length_squared() < STEERING_EPSILON_SQ {
        dir = random_unit(rng);
    }
    dir.normalize()
}

/// Unit vector toward the (optionally lead-predicted) target, or zero.
pub fn pursuit(profile: &SteeringProfile, position: Vec2, target: &TargetInfo) -> Vec2 {
    let mut to_target = target.position - position;
    if let (Some(lead), Some(velocity)) = (profile.lead_time_secs, target.velocity) {
        to_target += velocity * lead;
    }
    if to_target.length_squared() > STEERING_EPSILON_SQ {
        to_target.normalize()
    } else {
        Vec2::ZERO
    }
}

/// Unit vector away from the mean neighbor bearing, or zero.
pub fn separation(position: Vec2, neighbors: &[Vec2]) -> Vec2 {
    let mut away = Vec2::ZERO;
    let mut count = 0u32;
    for &other in neighbors {
        let diff = position - other;
        let d = diff.length();
        // Coincident neighbors have no bearing.
        if d < 1e-4 {
            continue;
        }
        away += diff / d;
        count += 1;
    }
    if count == 0 {
        return Vec2::ZERO;
    }
    away /= count as f32;
    if away.length_squared() > STEERING_EPSILON_SQ {
        away.normalize()
    } else {
        Vec2::ZERO
    }
}

/// Move the current heading toward the desired one by `1 - e^(-rate*dt)`.
pub fn smooth(heading: &mut Heading, rate: f32, dt: f32) {
    let t = 1.0 - (-rate * dt).exp();
    let blended = heading.current.lerp(heading.desired, t);
    heading.current = if blended.length_squared() < STEERING_EPSILON_SQ {
        Vec2::X
    } else {
        blended.normalize()
    };
}

/// `current heading * base speed * multiplier`.
pub fn velocity(heading: &Heading, speed: &MoveSpeed) -> Vec2 {
    heading.current * speed.base * speed.multiplier
}

/// Clamp `position` into `bounds` and point both headings back inward on any
/// axis that was exceeded. Returns true if the agent bounced.
pub fn reflect_off_bounds(position: &mut Vec2, heading: &mut Heading, bounds: &ArenaBounds) -> bool {
    let (left, right) = bounds.x_range();
    let (bottom, top) = bounds.y_range();
    let mut bounced = false;

    if position.x < left {
        position.x = left;
        heading.current.x = heading.current.x.abs();
        heading.desired.x = heading.desired.x.abs();
        bounced = true;
    } else if position.x > right {
        position.x = right;
        heading.current.x = -heading.current.x.abs();
        heading.desired.x = -heading.desired.x.abs();
        bounced = true;
    }

    if position.y < bottom {
        position.y = bottom;
        heading.current.y = heading.current.y.abs();
        heading.desired.y = heading.desired.y.abs();
        bounced = true;
    } else if position.y > top {
        position.y = top;
        heading.current.y = -heading.current.y.abs();
        heading.desired.y = -heading.desired.y.abs();
        bounced = true;
    }

    if bounced {
        heading.current = heading.current.try_normalize().unwrap_or(inward(position, bounds));
        heading.desired = heading.desired.try_normalize().unwrap_or(heading.current);
    }
    bounced
}

/// Uniform random unit vector.
pub fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::from_angle(rng.gen_range(0.0..TAU))
}

fn hold_duration<R: Rng + ?Sized>(profile: &SteeringProfile, rng: &mut R) -> f32 {
    let (min, max) = (profile.retarget_min_secs, profile.retarget_max_secs);
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Unit vector from `position` toward the bounds center.
fn inward(position: &Vec2, bounds: &ArenaBounds) -> Vec2 {
    let (left, right) = bounds.x_range();
    let (bottom, top) = bounds.y_range();
    let center = Vec2::new((left + right) * 0.5, (bottom + top) * 0.5);
    (center - *position).try_normalize().unwrap_or(Vec2::X)
}
