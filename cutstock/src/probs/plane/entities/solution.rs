use crate::entities::Unplaced;
use crate::probs::plane::entities::Layout;
use std::time::Instant;

/// Snapshot of [`PlaneProblem`](crate::probs::plane::entities::PlaneProblem) at a specific moment.
#[derive(Debug, Clone)]
pub struct PlaneSolution {
    /// Layouts in opening order
    pub layouts: Vec<Layout>,
    pub unplaced: Vec<Unplaced>,
    /// Instant the solution was created
    pub time_stamp: Instant,
}

impl PlaneSolution {
    /// Sum of the area of the placed pieces divided by the sum of the area of the sheets
    pub fn density(&self) -> f64 {
        let total_area = self.layouts.iter().map(|l| l.area()).sum::<f64>();
        match total_area > 0.0 {
            true => self.layouts.iter().map(|l| l.placed_area()).sum::<f64>() / total_area,
            false => 0.0,
        }
    }

    pub fn n_placed(&self) -> usize {
        self.layouts.iter().map(|l| l.pieces.len()).sum()
    }
}
