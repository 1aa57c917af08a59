//! Entity spawn factories.
//!
//! Every component an agent needs is attached at creation; nothing is looked
//! up or discovered later.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use onslaught_core::components::*;
use onslaught_core::config::VariantSpec;
use onslaught_core::constants::MIN_DEATH_FX_SCALE;
use onslaught_core::enums::{AgentKind, Faction};
use onslaught_core::types::{Position, Velocity};
use onslaught_director::BossSpawnPlan;
use onslaught_steering::steering::{initial_heading, retarget, velocity};
use onslaught_steering::{SteeringProfile, TargetInfo};

/// Stats for one agent about to be spawned.
#[derive(Debug, Clone)]
pub struct AgentTemplate {
    pub id: AgentId,
    pub kind: AgentKind,
    pub variant: Variant,
    pub base_speed: f32,
    pub speed_multiplier: f32,
    pub hp: i32,
    pub score_value: u32,
    pub touch: TouchDamage,
    pub death: DeathPresentation,
    pub boss: Option<Boss>,
}

impl AgentTemplate {
    /// Regular agent straight from its variant.
    pub fn regular(id: AgentId, index: usize, spec: &VariantSpec, speed_multiplier: f32) -> Self {
        Self {
            id,
            kind: AgentKind::Regular,
            variant: Variant {
                index,
                name: spec.name.clone(),
            },
            base_speed: spec.base_speed,
            speed_multiplier,
            hp: spec.hp.max(1),
            score_value: spec.score_value,
            touch: touch_damage(spec),
            death: variant_death(spec),
            boss: None,
        }
    }

    /// Boss: the plan overrides hp, score, speed and (optionally) the death effect.
    pub fn boss(id: AgentId, plan: &BossSpawnPlan, spec: &VariantSpec) -> Self {
        let death = match &plan.death_effect {
            Some(fx) => DeathPresentation {
                effect: Some(fx.effect.clone()),
                offset: fx.offset,
                scale: fx.scale.max(MIN_DEATH_FX_SCALE),
            },
            None => variant_death(spec),
        };
        Self {
            id,
            kind: AgentKind::Boss,
            variant: Variant {
                index: plan.variant,
                name: spec.name.clone(),
            },
            base_speed: spec.base_speed,
            speed_multiplier: plan.speed_multiplier,
            hp: plan.hp,
            score_value: plan.score_value,
            touch: touch_damage(spec),
            death,
            boss: Some(Boss {
                ordinal: plan.ordinal,
                label: plan.label.clone(),
            }),
        }
    }
}

/// Give a freshly spawned agent its first desired direction and velocity.
pub fn orient_new_agent<R: Rng + ?Sized>(
    world: &mut World,
    entity: Entity,
    profile: &SteeringProfile,
    target: Option<&TargetInfo>,
    neighbors: &[Vec2],
    rng: &mut R,
) {
    if let Ok((pos, vel, heading, speed)) =
        world.query_one_mut::<(&Position, &mut Velocity, &mut Heading, &MoveSpeed)>(entity)
    {
        retarget(heading, profile, pos.as_vec2(), target, neighbors, rng);
        *vel = Velocity::from(velocity(heading, speed));
    }
}

/// Spawn a hostile agent at `position`, heading along +X until oriented.
pub fn spawn_agent(world: &mut World, template: AgentTemplate, position: Vec2) -> Entity {
    let heading = initial_heading();
    let speed = MoveSpeed {
        base: template.base_speed,
        multiplier: template.speed_multiplier,
    };
    let vel = velocity(&heading, &speed);

    let entity = world.spawn((
        template.id,
        template.kind,
        Faction::Hostile,
        template.variant,
        Position::from(position),
        Velocity::from(vel),
        heading,
        speed,
        Health {
            current: template.hp,
            max: template.hp,
        },
        Bounty {
            score_value: template.score_value,
        },
        template.touch,
        template.death,
    ));
    if let Some(boss) = template.boss {
        // Cannot fail: the entity was just spawned.
        let _ = world.insert_one(entity, boss);
    }
    entity
}

fn touch_damage(spec: &VariantSpec) -> TouchDamage {
    TouchDamage {
        damage: spec.touch_damage,
        destroy_on_touch: spec.destroy_on_touch,
        in_contact: false,
    }
}

fn variant_death(spec: &VariantSpec) -> DeathPresentation {
    DeathPresentation {
        effect: spec.death_effect.clone(),
        offset: spec.death_effect_offset,
        scale: 1.0,
    }
}
