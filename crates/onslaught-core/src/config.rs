//! Director configuration.
//!
//! Every field has a default matching the shipped tuning, so a config file only
//! needs the values it overrides. Degenerate values are never an error: the
//! engine always runs on [`DirectorConfig::sanitized`] output.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::VariantOrder;

/// Errors raised while loading configuration from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Complete tuning for one arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorConfig {
    pub waves: WaveConfig,
    pub spawning: SpawnConfig,
    pub speed: SpeedCurveConfig,
    pub boss: BossConfig,
    pub steering: SteeringConfig,
    pub contact: ContactConfig,
    pub session: SessionConfig,
    /// Regular agent skins, cycled one per wave.
    pub enemy_variants: Vec<VariantSpec>,
    /// Boss skins.
    pub boss_variants: Vec<VariantSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub duration_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub interval_min_start: f64,
    pub interval_max_start: f64,
    pub interval_min_floor: f64,
    pub interval_max_floor: f64,
    /// Multiplier applied to both interval bounds per wave.
    pub interval_decay: f64,
    pub max_alive_base: u32,
    pub max_alive_per_wave: u32,
    pub per_tick_base: u32,
    /// Add one agent per tick every N waves. Zero disables the step.
    pub per_tick_every_n_waves: u32,
    pub per_tick_ceiling: u32,
    /// Inward margin from the view edge.
    pub margin: f32,
    pub no_spawn_radius: f32,
    pub extra_safe_distance: f32,
    pub max_attempts: u32,
    /// Keep spawning regular agents while a boss wave is running.
    pub minions_during_boss_wave: bool,
    /// Wait stretch applied to those minion spawns.
    pub boss_wave_minion_slowdown: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedCurveConfig {
    pub growth_per_wave: f32,
    /// First wave at which growth stops (hard cap) or slows.
    pub cap_wave: u32,
    pub hard_cap: bool,
    pub growth_after_cap: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    /// A boss arrives every N waves. Zero disables bosses.
    pub every_n_waves: u32,
    pub base_hp: i32,
    pub hp_per_boss: i32,
    pub score_value: u32,
    /// Extra speed factor on top of the wave multiplier.
    pub speed_factor: f32,
    pub variant_order: VariantOrder,
    /// When set, boss deaths use this presentation instead of the variant's own.
    pub death_effect_override: Option<DeathEffectOverride>,
}

/// Centrally controlled boss death presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeathEffectOverride {
    pub effect: String,
    pub offset: Vec2,
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Pursue the target at all.
    pub chase: bool,
    pub chase_strength: f32,
    pub wander_strength: f32,
    pub retarget_min_secs: f32,
    pub retarget_max_secs: f32,
    /// Exponential heading smoothing rate (1/s). Higher reacts faster.
    pub smoothing_rate: f32,
    pub lead_target: bool,
    pub lead_time_secs: f32,
    pub separation_radius: f32,
    pub separation_strength: f32,
    /// Inward padding from the view edge for bouncing.
    pub padding: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Begin on the start screen with time frozen.
    pub pause_until_start: bool,
    pub score_per_kill: u32,
}

/// One spawnable skin and its stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantSpec {
    pub name: String,
    pub base_speed: f32,
    pub hp: i32,
    pub score_value: u32,
    pub touch_damage: i32,
    /// Self-destruct (without awarding score) after touching the target.
    pub destroy_on_touch: bool,
    pub death_effect: Option<String>,
    pub death_effect_offset: Vec2,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            waves: WaveConfig::default(),
            spawning: SpawnConfig::default(),
            speed: SpeedCurveConfig::default(),
            boss: BossConfig::default(),
            steering: SteeringConfig::default(),
            contact: ContactConfig::default(),
            session: SessionConfig::default(),
            enemy_variants: (1..=10)
                .map(|i| VariantSpec::named(format!("enemy_{i:02}")))
                .collect(),
            boss_variants: ["boss_a", "boss_b", "boss_c", "boss_d"]
                .into_iter()
                .map(VariantSpec::named)
                .collect(),
        }
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            duration_secs: WAVE_DURATION_SECS,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval_min_start: SPAWN_INTERVAL_MIN_START,
            interval_max_start: SPAWN_INTERVAL_MAX_START,
            interval_min_floor: SPAWN_INTERVAL_MIN_FLOOR,
            interval_max_floor: SPAWN_INTERVAL_MAX_FLOOR,
            interval_decay: SPAWN_INTERVAL_DECAY_PER_WAVE,
            max_alive_base: MAX_ALIVE_BASE,
            max_alive_per_wave: MAX_ALIVE_PER_WAVE,
            per_tick_base: AGENTS_PER_TICK_BASE,
            per_tick_every_n_waves: AGENTS_PER_TICK_EVERY_N_WAVES,
            per_tick_ceiling: AGENTS_PER_TICK_CEILING,
            margin: SPAWN_MARGIN,
            no_spawn_radius: NO_SPAWN_RADIUS,
            extra_safe_distance: EXTRA_SAFE_DISTANCE,
            max_attempts: MAX_SPAWN_ATTEMPTS,
            minions_during_boss_wave: false,
            boss_wave_minion_slowdown: BOSS_WAVE_MINION_SLOWDOWN,
        }
    }
}

impl Default for SpeedCurveConfig {
    fn default() -> Self {
        Self {
            growth_per_wave: SPEED_GROWTH_PER_WAVE,
            cap_wave: SPEED_CAP_WAVE,
            hard_cap: true,
            growth_after_cap: SPEED_GROWTH_AFTER_CAP,
        }
    }
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            every_n_waves: BOSS_EVERY_N_WAVES,
            base_hp: BOSS_BASE_HP,
            hp_per_boss: BOSS_HP_PER_BOSS,
            score_value: BOSS_SCORE_VALUE,
            speed_factor: BOSS_SPEED_FACTOR,
            variant_order: VariantOrder::Sequential,
            death_effect_override: Some(DeathEffectOverride::default()),
        }
    }
}

impl Default for DeathEffectOverride {
    fn default() -> Self {
        Self {
            effect: "fx_boss_death".to_string(),
            offset: Vec2::ZERO,
            scale: BOSS_DEATH_FX_SCALE,
        }
    }
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            chase: true,
            chase_strength: CHASE_STRENGTH,
            wander_strength: WANDER_STRENGTH,
            retarget_min_secs: RETARGET_MIN_SECS,
            retarget_max_secs: RETARGET_MAX_SECS,
            smoothing_rate: DIRECTION_SMOOTHING,
            lead_target: true,
            lead_time_secs: LEAD_TIME_SECS,
            separation_radius: SEPARATION_RADIUS,
            separation_strength: SEPARATION_STRENGTH,
            padding: SCREEN_PADDING,
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            radius: CONTACT_RADIUS,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pause_until_start: true,
            score_per_kill: SCORE_PER_KILL,
        }
    }
}

impl Default for VariantSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_speed: AGENT_BASE_SPEED,
            hp: AGENT_HP,
            score_value: AGENT_SCORE_VALUE,
            touch_damage: AGENT_TOUCH_DAMAGE,
            destroy_on_touch: false,
            death_effect: Some("fx_enemy_death".to_string()),
            death_effect_offset: Vec2::ZERO,
        }
    }
}

impl VariantSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl DirectorConfig {
    /// Parse a (possibly partial) JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Clamp every degenerate value to its safe minimum.
    pub fn sanitized(mut self) -> Self {
        self.waves.duration_secs = finite_or(self.waves.duration_secs, WAVE_DURATION_SECS)
            .max(MIN_WAVE_DURATION_SECS);

        let s = &mut self.spawning;
        s.interval_min_start = positive_or(s.interval_min_start, SPAWN_INTERVAL_MIN_START);
        s.interval_max_start = positive_or(s.interval_max_start, SPAWN_INTERVAL_MAX_START)
            .max(s.interval_min_start);
        s.interval_min_floor = positive_or(s.interval_min_floor, SPAWN_INTERVAL_MIN_FLOOR);
        s.interval_max_floor = positive_or(s.interval_max_floor, SPAWN_INTERVAL_MAX_FLOOR)
            .max(s.interval_min_floor);
        s.interval_decay = positive_or(s.interval_decay, SPAWN_INTERVAL_DECAY_PER_WAVE).min(1.0);
        s.max_alive_base = s.max_alive_base.max(1);
        s.per_tick_ceiling = s.per_tick_ceiling.max(1);
        s.margin = finite_or(s.margin, SPAWN_MARGIN).max(0.0);
        s.no_spawn_radius = finite_or(s.no_spawn_radius, NO_SPAWN_RADIUS).max(0.0);
        s.extra_safe_distance = finite_or(s.extra_safe_distance, EXTRA_SAFE_DISTANCE).max(0.0);
        s.max_attempts = s.max_attempts.max(1);
        s.boss_wave_minion_slowdown =
            positive_or(s.boss_wave_minion_slowdown, BOSS_WAVE_MINION_SLOWDOWN);

        let sp = &mut self.speed;
        sp.growth_per_wave = finite_or(sp.growth_per_wave, SPEED_GROWTH_PER_WAVE).max(1.0);
        sp.growth_after_cap = finite_or(sp.growth_after_cap, SPEED_GROWTH_AFTER_CAP)
            .clamp(1.0, sp.growth_per_wave);

        let b = &mut self.boss;
        b.base_hp = b.base_hp.max(1);
        b.hp_per_boss = b.hp_per_boss.max(0);
        b.speed_factor = positive_or(b.speed_factor, BOSS_SPEED_FACTOR);
        if let Some(fx) = b.death_effect_override.as_mut() {
            fx.scale = finite_or(fx.scale, BOSS_DEATH_FX_SCALE).max(MIN_DEATH_FX_SCALE);
        }

        let st = &mut self.steering;
        st.chase_strength = finite_or(st.chase_strength, CHASE_STRENGTH).max(0.0);
        st.wander_strength = finite_or(st.wander_strength, WANDER_STRENGTH).max(0.0);
        st.retarget_min_secs = positive_or(st.retarget_min_secs, RETARGET_MIN_SECS);
        st.retarget_max_secs =
            positive_or(st.retarget_max_secs, RETARGET_MAX_SECS).max(st.retarget_min_secs);
        st.smoothing_rate = finite_or(st.smoothing_rate, DIRECTION_SMOOTHING).max(0.0);
        st.lead_time_secs = finite_or(st.lead_time_secs, LEAD_TIME_SECS).max(0.0);
        st.separation_radius = finite_or(st.separation_radius, SEPARATION_RADIUS).max(0.0);
        st.separation_strength = finite_or(st.separation_strength, SEPARATION_STRENGTH).max(0.0);
        st.padding = finite_or(st.padding, SCREEN_PADDING).max(0.0);

        self.contact.radius = finite_or(self.contact.radius, CONTACT_RADIUS).max(0.0);

        for variant in self
            .enemy_variants
            .iter_mut()
            .chain(self.boss_variants.iter_mut())
        {
            variant.base_speed = finite_or(variant.base_speed, AGENT_BASE_SPEED).max(0.0);
            variant.hp = variant.hp.max(1);
            variant.touch_damage = variant.touch_damage.max(0);
        }

        self
    }
}

fn finite_or<T: Float>(value: T, fallback: T) -> T {
    if value.is_finite_value() {
        value
    } else {
        fallback
    }
}

fn positive_or<T: Float>(value: T, fallback: T) -> T {
    if value.is_finite_value() && value.is_positive_value() {
        value
    } else {
        fallback
    }
}

/// The two float widths used by the config.
trait Float: Copy {
    fn is_finite_value(self) -> bool;
    fn is_positive_value(self) -> bool;
}

impl Float for f32 {
    fn is_finite_value(self) -> bool {
        self.is_finite()
    }
    fn is_positive_value(self) -> bool {
        self > 0.0
    }
}

impl Float for f64 {
    fn is_finite_value(self) -> bool {
        self.is_finite()
    }
    fn is_positive_value(self) -> bool {
        self > 0.0
    }
}
