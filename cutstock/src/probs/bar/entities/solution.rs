use crate::entities::Unplaced;
use crate::probs::bar::entities::Bar;
use std::time::Instant;

/// Snapshot of [`BarProblem`](crate::probs::bar::entities::BarProblem) at a specific moment.
#[derive(Debug, Clone)]
pub struct BarSolution {
    /// Bars in opening order
    pub bars: Vec<Bar>,
    pub unplaced: Vec<Unplaced>,
    /// Instant the solution was created
    pub time_stamp: Instant,
}

impl BarSolution {
    pub fn total_length(&self) -> f64 {
        self.bars.iter().map(|b| b.total_length).sum()
    }

    pub fn used_length(&self) -> f64 {
        self.bars.iter().map(|b| b.used()).sum()
    }

    /// Fraction of the length of all consumed bars which ended up in cuts
    pub fn utilization(&self) -> f64 {
        let total = self.total_length();
        match total > 0.0 {
            true => self.used_length() / total,
            false => 0.0,
        }
    }

    pub fn n_placed(&self) -> usize {
        self.bars.iter().map(|b| b.cuts.len()).sum()
    }
}
