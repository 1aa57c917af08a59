//! Regular spawn system: polls the spawn scheduler on the physics clock and
//! instantiates whatever batch it releases.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use onslaught_core::components::{AgentId, Dead};
use onslaught_core::config::VariantSpec;
use onslaught_core::enums::Faction;
use onslaught_core::events::DirectorEvent;
use onslaught_core::types::{Position, Velocity};
use onslaught_director::{SchedulerStatus, SpawnContext, SpawnRequest, SpawnScheduler};
use onslaught_steering::{SteeringProfile, TargetInfo};

use crate::spatial::{NeighborhoodIndex, UniformGrid};
use crate::world_setup::{self, AgentTemplate};

/// Shared inputs for instantiating agents this step.
pub struct SpawnEnv<'a> {
    pub profile: &'a SteeringProfile,
    pub target: Option<&'a TargetInfo>,
    pub grid: &'a UniformGrid,
}

/// Live hostile agents, boss included.
pub fn count_hostiles(world: &World) -> u32 {
    world
        .query::<(&Faction, Option<&Dead>)>()
        .iter()
        .filter(|(_, (_, dead))| dead.is_none())
        .count() as u32
}

/// Allocate the next agent id.
pub fn next_agent_id(next_id: &mut u32) -> AgentId {
    let id = AgentId(*next_id);
    *next_id += 1;
    id
}

/// Poll the scheduler and spawn the released batch.
#[allow(clippy::too_many_arguments)]
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    scheduler: &mut SpawnScheduler,
    ctx: &SpawnContext<'_>,
    variants: &[VariantSpec],
    env: &SpawnEnv<'_>,
    next_id: &mut u32,
    requests: &mut Vec<SpawnRequest>,
    rng: &mut R,
    events: &mut Vec<DirectorEvent>,
) -> SchedulerStatus {
    requests.clear();
    let status = scheduler.poll(ctx, rng, requests);

    for request in requests.drain(..) {
        let Some(spec) = variants.get(request.variant) else {
            continue;
        };
        let id = next_agent_id(next_id);
        let template = AgentTemplate::regular(id, request.variant, spec, request.speed_multiplier);
        let entity = world_setup::spawn_agent(world, template, request.position);
        orient(world, entity, request.position, env, rng);

        let velocity = world
            .get::<&Velocity>(entity)
            .map(|v| *v)
            .unwrap_or_default();
        events.push(DirectorEvent::AgentSpawned {
            agent: id,
            variant: spec.name.clone(),
            position: Position::from(request.position),
            velocity,
        });
    }
    status
}

/// Spawn-time retarget against the current neighborhood.
pub fn orient<R: Rng + ?Sized>(
    world: &mut World,
    entity: Entity,
    position: Vec2,
    env: &SpawnEnv<'_>,
    rng: &mut R,
) {
    let mut neighbors: Vec<Vec2> = Vec::new();
    if env.profile.separation_enabled() {
        env.grid.neighbor_positions(
            position,
            env.profile.separation_radius,
            Faction::Hostile,
            Some(entity),
            &mut neighbors,
        );
    }
    world_setup::orient_new_agent(world, entity, env.profile, env.target, &neighbors, rng);
}
