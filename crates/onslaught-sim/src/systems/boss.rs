//! Boss system: consults the boss cadence every frame, independent of the
//! regular spawn loop's sleeps.

use hecs::{Entity, World};
use rand::Rng;

use onslaught_core::config::VariantSpec;
use onslaught_core::events::DirectorEvent;
use onslaught_core::types::Position;
use onslaught_director::{BossCadence, BossSpawnContext};

use crate::score::ScoreState;
use crate::systems::is_live;
use crate::systems::spawning::{next_agent_id, orient, SpawnEnv};
use crate::world_setup::{self, AgentTemplate};

/// Try to spawn this wave's boss. Returns the new boss entity, if any.
#[allow(clippy::too_many_arguments)]
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    cadence: &mut BossCadence<Entity>,
    wave: u32,
    ctx: &BossSpawnContext<'_>,
    variants: &[VariantSpec],
    env: &SpawnEnv<'_>,
    next_id: &mut u32,
    score: &mut ScoreState,
    rng: &mut R,
    events: &mut Vec<DirectorEvent>,
) -> Option<Entity> {
    let boss_alive = cadence.active_boss().is_some_and(|e| is_live(world, e));

    let mut spawned_event = None;
    let entity = cadence.try_spawn(
        wave,
        ctx,
        |_| boss_alive,
        |plan| {
            // The cadence only plans variants below the count it was built with.
            let spec = &variants[plan.variant];
            let id = next_agent_id(next_id);
            spawned_event = Some(DirectorEvent::BossSpawned {
                agent: id,
                ordinal: plan.ordinal,
                label: plan.label.clone(),
                variant: spec.name.clone(),
                hp: plan.hp,
                score_value: plan.score_value,
                position: Position::from(plan.position),
                death_effect: plan.death_effect.clone(),
            });
            world_setup::spawn_agent(world, AgentTemplate::boss(id, plan, spec), plan.position)
        },
        rng,
    )?;

    let position = world
        .get::<&Position>(entity)
        .map(|p| p.as_vec2())
        .unwrap_or_default();
    orient(world, entity, position, env, rng);

    score.bosses_spawned += 1;
    events.extend(spawned_event);
    Some(entity)
}
