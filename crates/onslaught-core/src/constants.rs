//! Simulation constants and default tuning parameters.
//!
//! Defaults mirror the shipped arena tuning. Everything tunable at runtime
//! lives in [`crate::config::DirectorConfig`]; these values seed it.

/// Fixed physics step rate (Hz).
pub const PHYSICS_RATE: u32 = 50;

/// Seconds per physics step.
pub const PHYSICS_DT: f64 = 1.0 / PHYSICS_RATE as f64;

/// Longest frame delta the engine accepts in one `advance` call (seconds).
pub const MAX_FRAME_DT: f64 = 1.0 / 3.0;

/// Upper bound for the session time scale.
pub const MAX_TIME_SCALE: f64 = 4.0;

// --- Waves ---

/// Length of one wave in seconds.
pub const WAVE_DURATION_SECS: f64 = 20.0;

/// Shortest wave duration accepted; shorter values are clamped.
pub const MIN_WAVE_DURATION_SECS: f64 = 1.0;

// --- Spawn timing ---

/// Spawn wait bounds at wave 1 (seconds).
pub const SPAWN_INTERVAL_MIN_START: f64 = 1.6;
pub const SPAWN_INTERVAL_MAX_START: f64 = 2.4;

/// Floors the spawn wait bounds decay towards (seconds).
pub const SPAWN_INTERVAL_MIN_FLOOR: f64 = 0.35;
pub const SPAWN_INTERVAL_MAX_FLOOR: f64 = 0.60;

/// Per-wave multiplicative decay of the spawn wait bounds.
pub const SPAWN_INTERVAL_DECAY_PER_WAVE: f64 = 0.90;

/// Re-check period while a boss wave holds regular spawning (seconds).
pub const BOSS_HOLD_RECHECK_SECS: f64 = 0.2;

/// Default wait stretch applied to minion spawns during boss waves.
pub const BOSS_WAVE_MINION_SLOWDOWN: f64 = 2.5;

// --- Population ---

pub const MAX_ALIVE_BASE: u32 = 10;
pub const MAX_ALIVE_PER_WAVE: u32 = 5;

pub const AGENTS_PER_TICK_BASE: u32 = 2;
pub const AGENTS_PER_TICK_EVERY_N_WAVES: u32 = 1;
pub const AGENTS_PER_TICK_CEILING: u32 = 8;

// --- Speed curve ---

/// Per-wave speed growth before the cap wave.
pub const SPEED_GROWTH_PER_WAVE: f32 = 1.10;

/// Wave from which speed growth stops or slows.
pub const SPEED_CAP_WAVE: u32 = 6;

/// Slower per-wave growth used after the cap when the hard cap is off.
pub const SPEED_GROWTH_AFTER_CAP: f32 = 1.03;

// --- Placement ---

/// Inward margin from the view edge for spawn positions (world units).
pub const SPAWN_MARGIN: f32 = 0.5;

/// Radius around the player where nothing may spawn (world units).
pub const NO_SPAWN_RADIUS: f32 = 3.0;

/// Extra buffer added on top of [`NO_SPAWN_RADIUS`].
pub const EXTRA_SAFE_DISTANCE: f32 = 0.25;

/// Smallest exclusion radius ever applied.
pub const MIN_SAFE_RADIUS: f32 = 0.1;

/// Placement attempts before giving up for this cycle.
pub const MAX_SPAWN_ATTEMPTS: u32 = 40;

// --- Boss ---

pub const BOSS_EVERY_N_WAVES: u32 = 3;
pub const BOSS_BASE_HP: i32 = 30;
pub const BOSS_HP_PER_BOSS: i32 = 10;
pub const BOSS_SCORE_VALUE: u32 = 25;
pub const BOSS_SPEED_FACTOR: f32 = 0.85;
pub const BOSS_DEATH_FX_SCALE: f32 = 1.8;

/// Smallest death effect scale multiplier applied to bosses.
pub const MIN_DEATH_FX_SCALE: f32 = 0.01;

// --- Agents ---

pub const AGENT_BASE_SPEED: f32 = 1.6;
pub const AGENT_HP: i32 = 1;
pub const AGENT_SCORE_VALUE: u32 = 1;
pub const AGENT_TOUCH_DAMAGE: i32 = 10;

// --- Steering ---

pub const CHASE_STRENGTH: f32 = 1.0;
pub const WANDER_STRENGTH: f32 = 0.18;
pub const RETARGET_MIN_SECS: f32 = 0.25;
pub const RETARGET_MAX_SECS: f32 = 0.55;
pub const DIRECTION_SMOOTHING: f32 = 10.0;
pub const LEAD_TIME_SECS: f32 = 0.15;
pub const SEPARATION_RADIUS: f32 = 0.55;
pub const SEPARATION_STRENGTH: f32 = 0.65;
pub const SCREEN_PADDING: f32 = 0.30;

/// Separation radius/weight at or below which the term is skipped.
pub const SEPARATION_EPSILON: f32 = 0.01;

/// Squared length below which a steering vector counts as zero.
pub const STEERING_EPSILON_SQ: f32 = 0.0001;

// --- Contact ---

/// Distance at which an agent counts as touching the target (world units).
pub const CONTACT_RADIUS: f32 = 0.45;

// --- Scoring ---

pub const SCORE_PER_KILL: u32 = 1;
