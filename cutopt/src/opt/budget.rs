use crate::config::SolveBudget;
use std::time::{Duration, Instant};

/// Keeps track of how much of a [`SolveBudget`] has been consumed.
#[derive(Debug, Clone)]
pub struct BudgetTracker {
    budget: SolveBudget,
    start: Instant,
    n_considered: usize,
}

impl BudgetTracker {
    pub fn new(budget: SolveBudget, start: Instant) -> Self {
        Self {
            budget,
            start,
            n_considered: 0,
        }
    }

    /// Registers that one more item copy was considered.
    pub fn register(&mut self) {
        self.n_considered += 1;
    }

    pub fn n_considered(&self) -> usize {
        self.n_considered
    }

    /// Whether no further item copy may be considered.
    pub fn exhausted(&self) -> bool {
        let placements_exceeded = self
            .budget
            .max_placements
            .is_some_and(|max| self.n_considered >= max);
        let time_exceeded = self
            .budget
            .time_limit_ms
            .is_some_and(|ms| self.start.elapsed() >= Duration::from_millis(ms));
        placements_exceeded || time_exceeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_budget_runs_out() {
        let budget = SolveBudget {
            max_placements: Some(2),
            time_limit_ms: None,
        };
        let mut tracker = BudgetTracker::new(budget, Instant::now());
        assert!(!tracker.exhausted());
        tracker.register();
        tracker.register();
        assert!(tracker.exhausted());
    }

    #[test]
    fn zero_time_limit_is_immediately_exhausted() {
        let budget = SolveBudget {
            max_placements: None,
            time_limit_ms: Some(0),
        };
        assert!(BudgetTracker::new(budget, Instant::now()).exhausted());
        assert!(!BudgetTracker::new(SolveBudget::UNLIMITED, Instant::now()).exhausted());
    }
}
