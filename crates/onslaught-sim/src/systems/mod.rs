//! ECS systems that operate on the arena world.
//!
//! Systems are functions over `&mut World` (or `&World` for read-only). They do
//! not own state: per-agent state lives in components and session state lives
//! in the engine.

pub mod boss;
pub mod bounds;
pub mod cleanup;
pub mod contact;
pub mod health;
pub mod movement;
pub mod snapshot;
pub mod spawning;
pub mod steering;

use hecs::{Entity, World};

use onslaught_core::components::Dead;

/// Whether `entity` exists and has not been marked dead.
pub fn is_live(world: &World, entity: Entity) -> bool {
    world
        .entity(entity)
        .map(|e| !e.has::<Dead>())
        .unwrap_or(false)
}
