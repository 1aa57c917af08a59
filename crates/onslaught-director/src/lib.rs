//! Wave director for ONSLAUGHT.
//!
//! Decides how many agents exist, where they appear and how dangerous they
//! are: the wave clock, the difficulty curve, spawn placement, boss cadence and
//! the cooperative spawn scheduler. No ECS here: everything works on plain data
//! and hands spawn decisions back to the caller.

pub mod boss;
pub mod clock;
pub mod difficulty;
pub mod placement;
pub mod scheduler;

pub use onslaught_core as core;

pub use boss::{BossCadence, BossSpawnContext, BossSpawnPlan};
pub use clock::WaveClock;
pub use difficulty::{DifficultyCurve, DifficultyParameters};
pub use placement::PlacementSolver;
pub use scheduler::{SchedulerStatus, SpawnContext, SpawnRequest, SpawnScheduler};
