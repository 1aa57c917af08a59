//! Boss cadence: which waves get a boss, which skin it wears and how strong it is.
//!
//! At most one boss is tracked at a time. Every guard in [`BossCadence::try_spawn`]
//! is a silent no-op, so it is safe to call every frame.

use glam::Vec2;
use rand::Rng;
use tracing::{debug, info};

use onslaught_core::config::{BossConfig, DeathEffectOverride};
use onslaught_core::enums::VariantOrder;
use onslaught_core::types::ViewRect;

use crate::difficulty::DifficultyCurve;
use crate::placement::PlacementSolver;

/// `interval > 0 && wave % interval == 0`.
pub fn is_boss_wave(wave: u32, interval: u32) -> bool {
    interval > 0 && wave % interval == 0
}

/// Boss hp for the `ordinal`-th boss, floored at 1.
pub fn boss_hp(base_hp: i32, hp_per_boss: i32, ordinal: u32) -> i32 {
    let steps = i32::try_from(ordinal.max(1) - 1).unwrap_or(i32::MAX);
    base_hp
        .saturating_add(steps.saturating_mul(hp_per_boss))
        .max(1)
}

/// Everything needed to instantiate one boss.
#[derive(Debug, Clone, PartialEq)]
pub struct BossSpawnPlan {
    pub wave: u32,
    /// 1 for the first boss of the session.
    pub ordinal: u32,
    pub variant: usize,
    pub position: Vec2,
    pub hp: i32,
    pub score_value: u32,
    pub speed_multiplier: f32,
    pub label: String,
    /// Death presentation forced onto this boss, if the override is enabled.
    pub death_effect: Option<DeathEffectOverride>,
}

/// Inputs the cadence reads from the rest of the director.
pub struct BossSpawnContext<'a> {
    pub curve: &'a DifficultyCurve,
    pub placement: &'a PlacementSolver,
    pub view: Option<&'a ViewRect>,
    pub target: Option<Vec2>,
}

/// Boss bookkeeping for one session. `H` is the caller's handle type.
#[derive(Debug, Clone)]
pub struct BossCadence<H> {
    config: BossConfig,
    variant_count: usize,
    bosses_spawned: u32,
    last_boss_wave: Option<u32>,
    active: Option<H>,
}

impl<H: Copy + PartialEq> BossCadence<H> {
    pub fn new(config: BossConfig, variant_count: usize) -> Self {
        Self {
            config,
            variant_count,
            bosses_spawned: 0,
            last_boss_wave: None,
            active: None,
        }
    }

    pub fn is_boss_wave(&self, wave: u32) -> bool {
        is_boss_wave(wave, self.config.every_n_waves)
    }

    pub fn bosses_spawned(&self) -> u32 {
        self.bosses_spawned
    }

    pub fn last_boss_wave(&self) -> Option<u32> {
        self.last_boss_wave
    }

    pub fn active_boss(&self) -> Option<H> {
        self.active
    }

    /// Forget the tracked boss if it is `handle`.
    pub fn release(&mut self, handle: H) -> bool {
        if self.active == Some(handle) {
            self.active = None;
            true
        } else {
            false
        }
    }

    /// Spawn this wave's boss if every guard passes.
    ///
    /// `is_alive` reports whether a previously returned handle still exists;
    /// `instantiate` turns the plan into a live boss and returns its handle.
    pub fn try_spawn<R, A, I>(
        &mut self,
        wave: u32,
        ctx: &BossSpawnContext<'_>,
        is_alive: A,
        instantiate: I,
        rng: &mut R,
    ) -> Option<H>
    where
        R: Rng + ?Sized,
        A: Fn(H) -> bool,
        I: FnOnce(&BossSpawnPlan) -> H,
    {
        if !self.is_boss_wave(wave) || self.variant_count == 0 {
            return None;
        }
        if self.last_boss_wave == Some(wave) {
            return None;
        }
        if let Some(handle) = self.active {
            if is_alive(handle) {
                return None;
            }
            self.active = None;
        }

        let variant = self.choose_variant(rng);
        let view = ctx.view?;
        let Some(position) = ctx.placement.find(view, ctx.target, rng) else {
            debug!(wave, "no safe boss position this frame");
            return None;
        };

        let ordinal = self.bosses_spawned + 1;
        let hp = boss_hp(self.config.base_hp, self.config.hp_per_boss, ordinal);
        let plan = BossSpawnPlan {
            wave,
            ordinal,
            variant,
            position,
            hp,
            score_value: self.config.score_value,
            speed_multiplier: ctx.curve.speed_multiplier(wave) * self.config.speed_factor,
            label: format!("BOSS_{ordinal}_HP_{hp}"),
            death_effect: self.config.death_effect_override.clone(),
        };

        let handle = instantiate(&plan);
        self.active = Some(handle);
        self.last_boss_wave = Some(wave);
        self.bosses_spawned = ordinal;
        info!(wave, ordinal, hp, variant, "boss spawned");
        Some(handle)
    }

    fn choose_variant<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match self.config.variant_order {
            VariantOrder::Random => rng.gen_range(0..self.variant_count),
            VariantOrder::Sequential => self.bosses_spawned as usize % self.variant_count,
        }
    }
}
