//! Touch contact between agents and the target.

use glam::Vec2;
use hecs::{Entity, World};

use onslaught_core::components::{AgentId, Dead, TouchDamage};
use onslaught_core::events::DirectorEvent;
use onslaught_core::types::Position;

use super::health;

/// Emit `PlayerContact` once per entry into `radius` of the target. Agents
/// that self-destruct on touch are killed without awarding score.
pub fn run(
    world: &mut World,
    target: Option<Vec2>,
    radius: f32,
    events: &mut Vec<DirectorEvent>,
    kill_buffer: &mut Vec<Entity>,
) {
    kill_buffer.clear();

    for (entity, (id, pos, touch, dead)) in
        world.query_mut::<(&AgentId, &Position, &mut TouchDamage, Option<&Dead>)>()
    {
        if dead.is_some() {
            continue;
        }
        let touching = target.is_some_and(|t| pos.as_vec2().distance(t) <= radius);
        if touching && !touch.in_contact {
            events.push(DirectorEvent::PlayerContact {
                agent: *id,
                damage: touch.damage,
            });
            if touch.destroy_on_touch {
                kill_buffer.push(entity);
            }
        }
        touch.in_contact = touching;
    }

    for entity in kill_buffer.drain(..) {
        health::kill(world, entity, false);
    }
}
