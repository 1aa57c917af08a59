//! Running session score.

use onslaught_core::state::ScoreView;

/// Score state tracked by the engine, reset on restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub score: u32,
    /// Deaths that awarded score.
    pub kills: u32,
    pub bosses_spawned: u32,
    pub bosses_defeated: u32,
}

impl ScoreState {
    /// Add `score_value * per_kill` and count the kill. Returns the points added.
    pub fn award(&mut self, score_value: u32, per_kill: u32) -> u32 {
        let points = score_value.saturating_mul(per_kill);
        self.score = self.score.saturating_add(points);
        self.kills += 1;
        points
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            score: self.score,
            kills: self.kills,
            bosses_spawned: self.bosses_spawned,
            bosses_defeated: self.bosses_defeated,
        }
    }
}
