//! Steering profiles.
//!
//! Consolidates the per-arena steering weights read by every agent.

use onslaught_core::config::SteeringConfig;
use onslaught_core::constants::SEPARATION_EPSILON;

/// Weights and timings for the steering controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringProfile {
    /// Pursuit weight; zero when chasing is disabled.
    pub chase_strength: f32,
    pub wander_strength: f32,
    /// Hold duration range between retargets (s).
    pub retarget_min_secs: f32,
    pub retarget_max_secs: f32,
    /// Exponential smoothing rate (1/s).
    pub smoothing_rate: f32,
    /// Dead-reckoning horizon applied to the target's velocity, if leading.
    pub lead_time_secs: Option<f32>,
    pub separation_radius: f32,
    pub separation_strength: f32,
    /// Inward padding from the view edge used for bouncing.
    pub padding: f32,
}

impl SteeringProfile {
    pub fn from_config(config: &SteeringConfig) -> Self {
        Self {
            chase_strength: if config.chase { config.chase_strength } else { 0.0 },
            wander_strength: config.wander_strength,
            retarget_min_secs: config.retarget_min_secs,
            retarget_max_secs: config.retarget_max_secs,
            smoothing_rate: config.smoothing_rate,
            lead_time_secs: config.lead_target.then_some(config.lead_time_secs),
            separation_radius: config.separation_radius,
            separation_strength: config.separation_strength,
            padding: config.padding,
        }
    }

    /// Separation only runs when both radius and weight are meaningful.
    pub fn separation_enabled(&self) -> bool {
        self.separation_radius > SEPARATION_EPSILON && self.separation_strength > SEPARATION_EPSILON
    }
}

impl Default for SteeringProfile {
    fn default() -> Self {
        Self::from_config(&SteeringConfig::default())
    }
}
