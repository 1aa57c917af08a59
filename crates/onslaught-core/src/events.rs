//! Events emitted by the director for presentation, audio and UI collaborators.

use serde::{Deserialize, Serialize};

use crate::components::AgentId;
use crate::config::DeathEffectOverride;
use crate::enums::AgentKind;
use crate::types::{Position, Velocity};

/// Everything observable that happened during one `advance` call, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DirectorEvent {
    /// The wave clock moved to a new wave.
    WaveChanged { wave: u32 },
    /// A regular agent was instantiated.
    AgentSpawned {
        agent: AgentId,
        variant: String,
        position: Position,
        velocity: Velocity,
    },
    /// A boss was instantiated.
    BossSpawned {
        agent: AgentId,
        ordinal: u32,
        label: String,
        variant: String,
        hp: i32,
        score_value: u32,
        position: Position,
        death_effect: Option<DeathEffectOverride>,
    },
    /// An agent died.
    AgentKilled {
        agent: AgentId,
        kind: AgentKind,
        /// Score added to the session (zero for self-destructs).
        score_awarded: u32,
    },
    /// The tracked boss died; the next boss wave may spawn again.
    BossDefeated { agent: AgentId, ordinal: u32 },
    /// A death visual to play.
    DeathEffect {
        effect: String,
        position: Position,
        scale: f32,
    },
    /// An agent touched the target.
    PlayerContact { agent: AgentId, damage: i32 },
}
