//! View-edge bouncing, applied after movement.

use hecs::World;

use onslaught_core::components::{Dead, Heading, MoveSpeed};
use onslaught_core::types::{Position, Velocity, ViewRect};
use onslaught_steering::steering::{reflect_off_bounds, velocity};

/// Bounce every agent off the view shrunk by `padding`. Without a view there is
/// nothing to bounce off. Returns the number of agents that bounced.
pub fn run(world: &mut World, view: Option<&ViewRect>, padding: f32) -> usize {
    let Some(view) = view else {
        return 0;
    };
    let bounds = view.bounds(padding);
    let mut bounced = 0;

    for (_entity, (pos, vel, heading, speed, dead)) in world.query_mut::<(
        &mut Position,
        &mut Velocity,
        &mut Heading,
        &MoveSpeed,
        Option<&Dead>,
    )>() {
        if dead.is_some() {
            continue;
        }
        let mut p = pos.as_vec2();
        if reflect_off_bounds(&mut p, heading, &bounds) {
            *pos = Position::from(p);
            *vel = Velocity::from(velocity(heading, speed));
            bounced += 1;
        }
    }
    bounced
}
