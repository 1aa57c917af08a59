//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems and in the steering/director crates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable external handle for an agent. Collaborators (health, presentation)
/// address agents by this id, never by ECS entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

/// Which configured skin this agent was spawned from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub index: usize,
    pub name: String,
}

/// Movement speed, fixed for the agent's lifetime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveSpeed {
    pub base: f32,
    /// Wave speed multiplier baked in at spawn time.
    pub multiplier: f32,
}

/// Steering state owned by one agent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Heading {
    /// Unit direction the agent wants to go.
    pub desired: Vec2,
    /// Unit direction the agent is actually going, smoothed toward `desired`.
    pub current: Vec2,
    /// Seconds until the desired direction is recomputed.
    pub retarget_timer: f32,
}

/// Hit points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

/// Score awarded per kill (multiplied by the session's score-per-kill).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounty {
    pub score_value: u32,
}

/// Contact damage dealt to the target on touch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TouchDamage {
    pub damage: i32,
    pub destroy_on_touch: bool,
    /// Whether the agent was touching the target last step (contact fires on entry).
    pub in_contact: bool,
}

/// How this agent's death is presented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeathPresentation {
    pub effect: Option<String>,
    pub offset: Vec2,
    pub scale: f32,
}

/// Marks an entity as a boss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub ordinal: u32,
    pub label: String,
}

/// Marks an agent as killed this frame; cleanup despawns it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Dead {
    pub award_score: bool,
}

// Position, Velocity and Faction are also used as components
// (defined in types.rs and enums.rs).
