//! Kinematic integration: position += velocity * dt.

use hecs::World;

use onslaught_core::components::Dead;
use onslaught_core::types::{Position, Velocity};

pub fn run(world: &mut World, dt: f32) {
    for (_entity, (pos, vel, dead)) in world.query_mut::<(&mut Position, &Velocity, Option<&Dead>)>() {
        if dead.is_some() {
            continue;
        }
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
    }
}
