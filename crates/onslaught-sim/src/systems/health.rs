//! Health interface: damage and kill requests from collaborators.
//!
//! Neither function despawns anything. A killed agent is tagged [`Dead`] and
//! the cleanup system turns it into events and score.

use hecs::{Entity, World};
use tracing::debug;

use onslaught_core::components::{AgentId, Dead, Health};

/// Find the live entity carrying `id`.
pub fn find_agent(world: &World, id: AgentId) -> Option<Entity> {
    world
        .query::<(&AgentId, Option<&Dead>)>()
        .iter()
        .find(|(_, (agent, dead))| **agent == id && dead.is_none())
        .map(|(entity, _)| entity)
}

/// Subtract `amount` (at least 1) from the agent's hp. Reaching zero kills it
/// with score awarded. Returns true if this call killed the agent.
pub fn apply_damage(world: &mut World, entity: Entity, amount: i32) -> bool {
    let Ok((health, dead)) = world.query_one_mut::<(&mut Health, Option<&Dead>)>(entity) else {
        return false;
    };
    if dead.is_some() {
        return false;
    }
    health.current = health.current.saturating_sub(amount.max(1));
    if health.current > 0 {
        return false;
    }
    health.current = 0;
    kill(world, entity, true)
}

/// Tag the agent dead. Returns false if it was already dead or missing.
pub fn kill(world: &mut World, entity: Entity, award_score: bool) -> bool {
    if !super::is_live(world, entity) {
        return false;
    }
    debug!(?entity, award_score, "agent killed");
    world.insert_one(entity, Dead { award_score }).is_ok()
}
