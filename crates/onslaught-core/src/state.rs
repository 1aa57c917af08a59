//! Arena snapshot: the complete visible director state after each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::AgentId;
use crate::enums::*;
use crate::events::DirectorEvent;
use crate::types::{Position, SimTime, Velocity};

/// Everything a renderer, HUD or audio layer needs from the director.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: u32,
    pub time_scale: f64,
    pub score: ScoreView,
    /// Live agents, sorted by id.
    pub agents: Vec<AgentView>,
    /// The tracked boss, if one is alive.
    pub boss: Option<BossView>,
    pub events: Vec<DirectorEvent>,
}

/// One live agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentView {
    pub id: AgentId,
    pub kind: AgentKind,
    pub variant: String,
    pub position: Position,
    pub velocity: Velocity,
    pub desired_heading: Vec2,
    pub current_heading: Vec2,
    pub hp: i32,
}

/// Boss health for the on-screen indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub id: AgentId,
    pub ordinal: u32,
    pub label: String,
    pub hp: i32,
    pub max_hp: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u32,
    pub kills: u32,
    pub bosses_spawned: u32,
    pub bosses_defeated: u32,
}
