//! Spawn placement by rejection sampling.
//!
//! Draw uniform points inside the view (shrunk by a margin) until one lies
//! outside the forbidden disk around the player, or the attempt budget runs
//! out. Running out is not an error: the caller skips the spawn and tries
//! again on its next cycle.

use glam::Vec2;
use rand::Rng;
use tracing::trace;

use onslaught_core::config::SpawnConfig;
use onslaught_core::constants::MIN_SAFE_RADIUS;
use onslaught_core::types::{ArenaBounds, ViewRect};

/// Placement rules shared by regular and boss spawns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementSolver {
    pub margin: f32,
    pub forbidden_radius: f32,
    pub safety_buffer: f32,
    pub max_attempts: u32,
}

impl PlacementSolver {
    pub fn from_config(spawning: &SpawnConfig) -> Self {
        Self {
            margin: spawning.margin,
            forbidden_radius: spawning.no_spawn_radius,
            safety_buffer: spawning.extra_safe_distance,
            max_attempts: spawning.max_attempts,
        }
    }

    /// Minimum distance a spawn keeps from the forbidden center.
    pub fn safe_radius(&self) -> f32 {
        (self.forbidden_radius + self.safety_buffer).max(MIN_SAFE_RADIUS)
    }

    /// Find a spawn point inside `view` away from `forbidden_center`.
    pub fn find<R: Rng + ?Sized>(
        &self,
        view: &ViewRect,
        forbidden_center: Option<Vec2>,
        rng: &mut R,
    ) -> Option<Vec2> {
        find_spawn_position(
            &view.bounds(self.margin),
            forbidden_center,
            self.safe_radius(),
            self.max_attempts,
            rng,
        )
    }
}

/// Rejection-sample a point in `bounds` at least `safe_radius` from
/// `forbidden_center`. With no forbidden center the first draw is accepted.
pub fn find_spawn_position<R: Rng + ?Sized>(
    bounds: &ArenaBounds,
    forbidden_center: Option<Vec2>,
    safe_radius: f32,
    max_attempts: u32,
    rng: &mut R,
) -> Option<Vec2> {
    for attempt in 0..max_attempts {
        let candidate = sample_uniform(bounds, rng);
        let Some(center) = forbidden_center else {
            return Some(candidate);
        };
        if candidate.distance(center) >= safe_radius {
            return Some(candidate);
        }
        trace!(attempt, "spawn candidate too close to player");
    }
    None
}

/// Uniform point inside `bounds`; degenerate axes collapse to their midpoint.
pub fn sample_uniform<R: Rng + ?Sized>(bounds: &ArenaBounds, rng: &mut R) -> Vec2 {
    let (left, right) = bounds.x_range();
    let (bottom, top) = bounds.y_range();
    Vec2::new(sample_axis(left, right, rng), sample_axis(bottom, top, rng))
}

fn sample_axis<R: Rng + ?Sized>(lo: f32, hi: f32, rng: &mut R) -> f32 {
    if lo < hi {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}
