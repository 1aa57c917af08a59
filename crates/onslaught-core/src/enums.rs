//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game phase (top-level session state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to press start. Time is frozen.
    #[default]
    StartScreen,
    Active,
    Paused,
    /// Player died. Time is frozen until a restart.
    GameOver,
}

impl GamePhase {
    /// Whether the clocks advance in this phase.
    pub fn is_running(self) -> bool {
        self == GamePhase::Active
    }
}

/// Which side an agent fights for. Separation only considers same-faction
/// neighbors; the director only spawns hostiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    #[default]
    Hostile,
}

/// How the next boss skin is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantOrder {
    /// A, B, C, ... then wrap around.
    #[default]
    Sequential,
    /// Uniform random pick each time.
    Random,
}

/// Kind of agent, for presentation and bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    #[default]
    Regular,
    Boss,
}
