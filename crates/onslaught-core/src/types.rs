//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D position in arena space (world units).
/// x = right, y = up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// 2D velocity in arena space (world units per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

/// Session time tracking for both clocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Frames advanced while the session was running.
    pub frame: u64,
    /// Fixed physics steps executed.
    pub physics_step: u64,
    /// Scaled session time on the frame clock (seconds). Drives the wave clock.
    pub elapsed_secs: f64,
    /// Scaled session time on the physics clock (seconds). Drives spawn waits.
    pub physics_secs: f64,
}

/// What the camera currently shows: a center and half-extents in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewRect {
    pub center: Position,
    pub half_width: f32,
    pub half_height: f32,
}

/// Axis-aligned rectangle derived from a [`ViewRect`] for a single query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for Position {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for Velocity {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl SimTime {
    /// Record one rendered frame of `scaled_dt` seconds.
    pub fn advance_frame(&mut self, scaled_dt: f64) {
        self.frame += 1;
        self.elapsed_secs += scaled_dt;
    }

    /// Record one fixed physics step of `dt` seconds.
    pub fn advance_physics(&mut self, dt: f64) {
        self.physics_step += 1;
        self.physics_secs += dt;
    }
}

impl ViewRect {
    pub fn new(center: Position, half_width: f32, half_height: f32) -> Self {
        Self {
            center,
            half_width: half_width.abs(),
            half_height: half_height.abs(),
        }
    }

    /// Bounds of the view shrunk inward by `margin` on every side.
    pub fn bounds(&self, margin: f32) -> ArenaBounds {
        ArenaBounds {
            left: self.center.x - self.half_width + margin,
            right: self.center.x + self.half_width - margin,
            bottom: self.center.y - self.half_height + margin,
            top: self.center.y + self.half_height - margin,
        }
    }
}

impl ArenaBounds {
    /// Horizontal sampling range; collapses to the midpoint if inverted.
    pub fn x_range(&self) -> (f32, f32) {
        ordered_or_midpoint(self.left, self.right)
    }

    /// Vertical sampling range; collapses to the midpoint if inverted.
    pub fn y_range(&self) -> (f32, f32) {
        ordered_or_midpoint(self.bottom, self.top)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let (l, r) = self.x_range();
        let (b, t) = self.y_range();
        p.x >= l && p.x <= r && p.y >= b && p.y <= t
    }
}

fn ordered_or_midpoint(lo: f32, hi: f32) -> (f32, f32) {
    if lo <= hi {
        (lo, hi)
    } else {
        let mid = (lo + hi) * 0.5;
        (mid, mid)
    }
}
