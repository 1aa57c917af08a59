//! Agent steering for ONSLAUGHT.
//!
//! Pursuit with target lead, wander noise, neighbor separation, heading
//! smoothing and view-edge bouncing, as pure functions over plain data.

pub mod profiles;
pub mod steering;

pub use onslaught_core as core;

pub use profiles::SteeringProfile;
pub use steering::TargetInfo;
