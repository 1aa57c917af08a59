//! Difficulty curve: wave index → spawn pacing, population cap and speed.
//!
//! Everything here is a pure function of the wave. The speed curve has two
//! regimes: aggressive geometric growth up to the cap wave, then either a hard
//! freeze or a slower geometric growth.

use onslaught_core::config::{DirectorConfig, SpawnConfig, SpeedCurveConfig};

/// Derived per-wave tuning. Never stored; recompute from the wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyParameters {
    pub spawn_interval_min: f64,
    pub spawn_interval_max: f64,
    pub max_alive: u32,
    pub agents_per_tick: u32,
    pub speed_multiplier: f32,
}

#[derive(Debug, Clone)]
pub struct DifficultyCurve {
    spawning: SpawnConfig,
    speed: SpeedCurveConfig,
}

impl DifficultyCurve {
    pub fn new(spawning: SpawnConfig, speed: SpeedCurveConfig) -> Self {
        Self { spawning, speed }
    }

    pub fn from_config(config: &DirectorConfig) -> Self {
        Self::new(config.spawning.clone(), config.speed.clone())
    }

    pub fn parameters(&self, wave: u32) -> DifficultyParameters {
        let (spawn_interval_min, spawn_interval_max) = self.interval(wave);
        DifficultyParameters {
            spawn_interval_min,
            spawn_interval_max,
            max_alive: self.max_alive(wave),
            agents_per_tick: self.agents_per_tick(wave),
            speed_multiplier: self.speed_multiplier(wave),
        }
    }

    /// Spawn wait bounds `(min, max)` in seconds. Each bound decays
    /// geometrically per wave and is floored independently.
    pub fn interval(&self, wave: u32) -> (f64, f64) {
        let s = &self.spawning;
        let decay = s.interval_decay.powi(exponent(wave));
        let min = (s.interval_min_start * decay).max(s.interval_min_floor);
        let max = (s.interval_max_start * decay).max(s.interval_max_floor);
        (min, max)
    }

    /// Population cap for the wave.
    pub fn max_alive(&self, wave: u32) -> u32 {
        let s = &self.spawning;
        s.max_alive_base
            .saturating_add((wave.max(1) - 1).saturating_mul(s.max_alive_per_wave))
            .max(1)
    }

    /// Agents spawned per scheduler wake, before headroom clamping.
    pub fn agents_per_tick(&self, wave: u32) -> u32 {
        let s = &self.spawning;
        let mut per_tick = s.per_tick_base;
        if s.per_tick_every_n_waves > 0 {
            per_tick = per_tick.saturating_add((wave.max(1) - 1) / s.per_tick_every_n_waves);
        }
        per_tick.clamp(1, s.per_tick_ceiling.max(1))
    }

    /// Speed multiplier baked into agents spawned during `wave`.
    pub fn speed_multiplier(&self, wave: u32) -> f32 {
        let sp = &self.speed;
        let wave = wave.max(1);
        if wave < sp.cap_wave {
            return sp.growth_per_wave.powi(exponent(wave));
        }

        let cap_wave = sp.cap_wave.saturating_sub(1).max(1);
        let at_cap = sp.growth_per_wave.powi(exponent(cap_wave));
        if sp.hard_cap {
            at_cap
        } else {
            // No ceiling here; bound it through growth_after_cap.
            at_cap * sp.growth_after_cap.powi(i32::try_from(wave - cap_wave).unwrap_or(i32::MAX))
        }
    }
}

/// `wave - 1` as a power exponent.
fn exponent(wave: u32) -> i32 {
    i32::try_from(wave.max(1) - 1).unwrap_or(i32::MAX)
}
