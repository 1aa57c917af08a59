//! Regular spawn loop as an explicit state machine.
//!
//! The loop has three suspension points: a randomized sleep drawn from the
//! wave's interval, a short hold while a boss wave forbids minions, and a stall
//! while there is no view or no variant to spawn. Wake times are absolute on the
//! caller's clock, so freezing that clock freezes the loop with nothing lost.

use glam::Vec2;
use rand::Rng;
use tracing::{debug, trace};

use onslaught_core::config::DirectorConfig;
use onslaught_core::constants::BOSS_HOLD_RECHECK_SECS;
use onslaught_core::types::ViewRect;

use crate::boss::is_boss_wave;
use crate::difficulty::DifficultyCurve;
use crate::placement::PlacementSolver;

/// One regular agent to instantiate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub variant: usize,
    pub position: Vec2,
    /// Baked into the agent for its whole lifetime.
    pub speed_multiplier: f32,
    pub wave: u32,
}

/// What the scheduler sees of the world on one poll.
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext<'a> {
    /// Current time on the clock that drives sleeps.
    pub now: f64,
    pub wave: u32,
    /// Live hostile agents, boss included.
    pub alive: u32,
    /// Paused or game over.
    pub halted: bool,
    pub view: Option<&'a ViewRect>,
    pub target: Option<Vec2>,
    pub variant_count: usize,
}

/// Where the loop is parked after a poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchedulerStatus {
    Halted,
    /// Waiting for a view or a variant list.
    Stalled,
    HoldingForBoss { until: f64 },
    Sleeping { until: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LoopState {
    Ready,
    Sleeping { wake_at: f64 },
    Holding { wake_at: f64 },
}

#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    curve: DifficultyCurve,
    placement: PlacementSolver,
    boss_interval: u32,
    minions_during_boss_wave: bool,
    boss_wave_slowdown: f64,
    state: LoopState,
}

impl SpawnScheduler {
    pub fn new(config: &DirectorConfig) -> Self {
        Self {
            curve: DifficultyCurve::from_config(config),
            placement: PlacementSolver::from_config(&config.spawning),
            boss_interval: config.boss.every_n_waves,
            minions_during_boss_wave: config.spawning.minions_during_boss_wave,
            boss_wave_slowdown: config.spawning.boss_wave_minion_slowdown,
            state: LoopState::Ready,
        }
    }

    pub fn curve(&self) -> &DifficultyCurve {
        &self.curve
    }

    pub fn placement(&self) -> &PlacementSolver {
        &self.placement
    }

    /// Absolute time of the next pending wake, if parked on a timer.
    pub fn next_wake(&self) -> Option<f64> {
        match self.state {
            LoopState::Ready => None,
            LoopState::Sleeping { wake_at } | LoopState::Holding { wake_at } => Some(wake_at),
        }
    }

    /// Drop any pending wait; the next poll starts a fresh cycle.
    pub fn reset(&mut self) {
        self.state = LoopState::Ready;
    }

    /// Advance the loop to `ctx.now`, pushing at most one batch into `out`.
    pub fn poll<R: Rng + ?Sized>(
        &mut self,
        ctx: &SpawnContext<'_>,
        rng: &mut R,
        out: &mut Vec<SpawnRequest>,
    ) -> SchedulerStatus {
        match self.state {
            LoopState::Sleeping { wake_at } if ctx.now < wake_at => {
                return SchedulerStatus::Sleeping { until: wake_at };
            }
            LoopState::Holding { wake_at } if ctx.now < wake_at => {
                return SchedulerStatus::HoldingForBoss { until: wake_at };
            }
            LoopState::Sleeping { .. } => {
                trace!(now = ctx.now, wave = ctx.wave, "spawn loop woke");
                self.state = LoopState::Ready;
                if !ctx.halted {
                    self.spawn_batch(ctx, rng, out);
                }
            }
            LoopState::Holding { .. } => self.state = LoopState::Ready,
            LoopState::Ready => {}
        }
        self.park(ctx, rng)
    }

    /// Decide the next suspension point from the ready state.
    fn park<R: Rng + ?Sized>(&mut self, ctx: &SpawnContext<'_>, rng: &mut R) -> SchedulerStatus {
        if ctx.halted {
            return SchedulerStatus::Halted;
        }
        if ctx.view.is_none() {
            return SchedulerStatus::Stalled;
        }

        let boss_wave = is_boss_wave(ctx.wave, self.boss_interval);
        if boss_wave && !self.minions_during_boss_wave {
            let wake_at = ctx.now + BOSS_HOLD_RECHECK_SECS;
            self.state = LoopState::Holding { wake_at };
            debug!(wave = ctx.wave, "holding regular spawns for boss wave");
            return SchedulerStatus::HoldingForBoss { until: wake_at };
        }
        if ctx.variant_count == 0 {
            return SchedulerStatus::Stalled;
        }

        let (mut min, mut max) = self.curve.interval(ctx.wave);
        if boss_wave {
            min *= self.boss_wave_slowdown;
            max *= self.boss_wave_slowdown;
        }
        let wait = if max > min { rng.gen_range(min..max) } else { min };
        let wake_at = ctx.now + wait;
        self.state = LoopState::Sleeping { wake_at };
        SchedulerStatus::Sleeping { until: wake_at }
    }

    fn spawn_batch<R: Rng + ?Sized>(
        &self,
        ctx: &SpawnContext<'_>,
        rng: &mut R,
        out: &mut Vec<SpawnRequest>,
    ) {
        let wave = ctx.wave;
        if is_boss_wave(wave, self.boss_interval) && !self.minions_during_boss_wave {
            return;
        }

        let max_alive = self.curve.max_alive(wave);
        if ctx.alive >= max_alive {
            debug!(wave, alive = ctx.alive, max_alive, "alive cap reached");
            return;
        }
        let to_spawn = self.curve.agents_per_tick(wave).min(max_alive - ctx.alive);

        let (Some(view), true) = (ctx.view, ctx.variant_count > 0) else {
            return;
        };
        let variant = (wave.max(1) - 1) as usize % ctx.variant_count;
        let speed_multiplier = self.curve.speed_multiplier(wave);

        let before = out.len();
        for _ in 0..to_spawn {
            let Some(position) = self.placement.find(view, ctx.target, rng) else {
                debug!(wave, "no safe spawn position, aborting batch");
                break;
            };
            out.push(SpawnRequest {
                variant,
                position,
                speed_multiplier,
                wave,
            });
        }
        debug!(wave, variant, spawned = out.len() - before, "spawn batch");
    }
}
