//! Steering system: retarget, smooth and set velocity for every live agent.
//!
//! Calls the pure steering functions from onslaught-steering, reading the
//! neighbor index built at the start of the physics step.

use glam::Vec2;
use hecs::World;
use rand::Rng;

use onslaught_core::components::{Dead, Heading, MoveSpeed};
use onslaught_core::enums::Faction;
use onslaught_core::types::{Position, Velocity};
use onslaught_steering::steering::{retarget, smooth, tick_timer, velocity};
use onslaught_steering::{SteeringProfile, TargetInfo};

use crate::spatial::NeighborhoodIndex;

/// Run one physics step of steering.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    profile: &SteeringProfile,
    target: Option<&TargetInfo>,
    index: &impl NeighborhoodIndex,
    dt: f32,
    rng: &mut R,
) {
    let mut neighbors: Vec<Vec2> = Vec::new();

    for (entity, (pos, vel, heading, speed, faction, dead)) in world.query_mut::<(
        &Position,
        &mut Velocity,
        &mut Heading,
        &MoveSpeed,
        &Faction,
        Option<&Dead>,
    )>() {
        if dead.is_some() {
            continue;
        }
        if tick_timer(heading, dt) {
            neighbors.clear();
            if profile.separation_enabled() {
                index.neighbor_positions(
                    pos.as_vec2(),
                    profile.separation_radius,
                    *faction,
                    Some(entity),
                    &mut neighbors,
                );
            }
            retarget(heading, profile, pos.as_vec2(), target, &neighbors, rng);
        }
        smooth(heading, profile.smoothing_rate, dt);
        *vel = Velocity::from(velocity(heading, speed));
    }
}
