//! Cleanup system: turns dead agents into events and score, then despawns them.

use glam::Vec2;
use hecs::{Entity, World};
use tracing::info;

use onslaught_core::components::*;
use onslaught_core::enums::AgentKind;
use onslaught_core::events::DirectorEvent;
use onslaught_core::types::Position;
use onslaught_director::BossCadence;

use crate::score::ScoreState;

/// Score rules applied while cleaning up.
#[derive(Debug, Clone, Copy)]
pub struct ScoreRules {
    /// Kills only count while the session is running.
    pub awarding: bool,
    pub score_per_kill: u32,
}

struct Corpse {
    entity: Entity,
    id: AgentId,
    kind: AgentKind,
    position: Position,
    score_value: u32,
    award_score: bool,
    effect: Option<String>,
    offset: Vec2,
    scale: f32,
    boss_ordinal: Option<u32>,
}

/// Process every agent tagged [`Dead`], in id order.
/// Uses a pre-allocated buffer to avoid per-step allocation.
pub fn run(
    world: &mut World,
    bosses: &mut BossCadence<Entity>,
    score: &mut ScoreState,
    rules: ScoreRules,
    events: &mut Vec<DirectorEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let mut corpses: Vec<Corpse> = world
        .query::<(
            &AgentId,
            &AgentKind,
            &Position,
            &Bounty,
            &DeathPresentation,
            &Dead,
            Option<&Boss>,
        )>()
        .iter()
        .map(|(entity, (id, kind, pos, bounty, death, dead, boss))| Corpse {
            entity,
            id: *id,
            kind: *kind,
            position: *pos,
            score_value: bounty.score_value,
            award_score: dead.award_score,
            effect: death.effect.clone(),
            offset: death.offset,
            scale: death.scale,
            boss_ordinal: boss.map(|b| b.ordinal),
        })
        .collect();
    corpses.sort_by_key(|c| c.id);

    for corpse in corpses {
        let score_awarded = if corpse.award_score && rules.awarding {
            score.award(corpse.score_value, rules.score_per_kill)
        } else {
            0
        };
        events.push(DirectorEvent::AgentKilled {
            agent: corpse.id,
            kind: corpse.kind,
            score_awarded,
        });
        if let Some(effect) = corpse.effect {
            events.push(DirectorEvent::DeathEffect {
                effect,
                position: Position::from(corpse.position.as_vec2() + corpse.offset),
                scale: corpse.scale,
            });
        }
        if let Some(ordinal) = corpse.boss_ordinal {
            bosses.release(corpse.entity);
            score.bosses_defeated += 1;
            info!(ordinal, agent = corpse.id.0, score_awarded, "boss defeated");
            events.push(DirectorEvent::BossDefeated {
                agent: corpse.id,
                ordinal,
            });
        }
        despawn_buffer.push(corpse.entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
