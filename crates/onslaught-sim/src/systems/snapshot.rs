//! Snapshot system: queries the ECS world and builds an ArenaSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::{Entity, World};

use onslaught_core::components::*;
use onslaught_core::enums::{AgentKind, GamePhase};
use onslaught_core::events::DirectorEvent;
use onslaught_core::state::{AgentView, ArenaSnapshot, BossView};
use onslaught_core::types::{Position, SimTime, Velocity};

use crate::score::ScoreState;

/// Session-level values that live outside the world.
pub struct SessionView<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: u32,
    pub time_scale: f64,
    pub score: &'a ScoreState,
    pub active_boss: Option<Entity>,
}

/// Build a complete ArenaSnapshot from the current world state.
pub fn build_snapshot(world: &World, session: &SessionView<'_>, events: Vec<DirectorEvent>) -> ArenaSnapshot {
    ArenaSnapshot {
        time: session.time,
        phase: session.phase,
        wave: session.wave,
        time_scale: session.time_scale,
        score: session.score.view(),
        agents: build_agents(world),
        boss: session.active_boss.and_then(|e| build_boss(world, e)),
        events,
    }
}

/// Every live agent, sorted by id.
fn build_agents(world: &World) -> Vec<AgentView> {
    let mut agents: Vec<AgentView> = world
        .query::<(
            &AgentId,
            &AgentKind,
            &Variant,
            &Position,
            &Velocity,
            &Heading,
            &Health,
            Option<&Dead>,
        )>()
        .iter()
        .filter(|(_, (.., dead))| dead.is_none())
        .map(|(_, (id, kind, variant, pos, vel, heading, health, _))| AgentView {
            id: *id,
            kind: *kind,
            variant: variant.name.clone(),
            position: *pos,
            velocity: *vel,
            desired_heading: heading.desired,
            current_heading: heading.current,
            hp: health.current,
        })
        .collect();
    agents.sort_by_key(|a| a.id);
    agents
}

fn build_boss(world: &World, entity: Entity) -> Option<BossView> {
    let mut query = world
        .query_one::<(&AgentId, &Boss, &Health, Option<&Dead>)>(entity)
        .ok()?;
    let (id, boss, health, dead) = query.get()?;
    if dead.is_some() {
        return None;
    }
    Some(BossView {
        id: *id,
        ordinal: boss.ordinal,
        label: boss.label.clone(),
        hp: health.current,
        max_hp: health.max,
    })
}
