//! Arena engine for ONSLAUGHT.
//!
//! Owns the hecs ECS world, drives the wave director and per-agent steering on
//! a frame clock and a fixed-step physics clock, and produces ArenaSnapshots
//! for the presentation layer.

pub mod engine;
pub mod score;
pub mod spatial;
pub mod systems;
pub mod world_setup;

pub use onslaught_core as core;
pub use engine::{ArenaEngine, SimConfig};

#[cfg(test)]
mod tests;
