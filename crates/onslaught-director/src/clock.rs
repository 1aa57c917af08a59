//! Wave clock: elapsed session time → wave index.

use onslaught_core::constants::MIN_WAVE_DURATION_SECS;

/// Buckets elapsed session time into waves of fixed length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveClock {
    duration_secs: f64,
}

impl WaveClock {
    /// Durations under one second are clamped to one second.
    pub fn new(duration_secs: f64) -> Self {
        let duration_secs = if duration_secs.is_finite() {
            duration_secs.max(MIN_WAVE_DURATION_SECS)
        } else {
            MIN_WAVE_DURATION_SECS
        };
        Self { duration_secs }
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Wave in progress at `elapsed_secs`. Always ≥ 1.
    pub fn wave_at(&self, elapsed_secs: f64) -> u32 {
        current_wave(elapsed_secs, self.duration_secs)
    }

    /// Session time at which `wave` begins.
    pub fn wave_start_secs(&self, wave: u32) -> f64 {
        f64::from(wave.max(1) - 1) * self.duration_secs
    }
}

/// `1 + floor(elapsed / max(1, duration))`.
pub fn current_wave(elapsed_secs: f64, wave_duration_secs: f64) -> u32 {
    let duration = wave_duration_secs.max(MIN_WAVE_DURATION_SECS);
    let elapsed = elapsed_secs.max(0.0);
    let completed = (elapsed / duration).floor();
    if completed >= f64::from(u32::MAX - 1) {
        u32::MAX
    } else {
        1 + completed as u32
    }
}
