//! Commands sent to the director by the game shell and its collaborators.
//!
//! Commands are queued and processed at the next frame boundary.

use serde::{Deserialize, Serialize};

use crate::components::AgentId;
use crate::types::{Position, Velocity, ViewRect};

/// All inputs the director accepts from outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionCommand {
    // --- Session lifecycle ---
    /// Leave the start screen.
    StartGame,
    Pause,
    Resume,
    /// The player died. Freezes the session until a restart.
    GameOver,
    /// Tear down every agent and start a fresh session.
    Restart,
    /// Set the global time scale (0 freezes everything).
    SetTimeScale { scale: f64 },

    // --- View provider ---
    SetView { view: ViewRect },
    ClearView,

    // --- Target provider ---
    /// Update the pursued target. `velocity` enables lead prediction.
    SetTarget {
        position: Position,
        velocity: Option<Velocity>,
    },
    ClearTarget,

    // --- Health interface ---
    DamageAgent { agent: AgentId, amount: i32 },
    KillAgent { agent: AgentId, award_score: bool },
}
