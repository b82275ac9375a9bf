use crate::entities::UnplacedReason;
use crate::error::Result;
use crate::probs::bar::entities::{BarInstance, BarSolution, BarSource};
use crate::probs::bar::io::ext_repr::{
    ExtBarResult, ExtBarSolution, ExtBarSummary, ExtBarUnplaced, ExtStockUsage,
};
use crate::probs::bar::util::assertions::validate_solution;
use itertools::Itertools;
use log::info;
use std::time::Instant;

/// Exports a solution out of the library.
///
/// The solution is validated first: a solution violating any invariant is never exported,
/// a [`CutError::InvariantViolation`](crate::CutError::InvariantViolation) is returned instead.
pub fn export(instance: &BarInstance, solution: &BarSolution, start: Instant) -> Result<ExtBarSolution> {
    validate_solution(instance, solution)?;

    let loss = instance.loss;
    let plans = solution
        .bars
        .iter()
        .enumerate()
        .map(|(index, bar)| ExtBarResult {
            index,
            total_length: bar.total_length,
            cuts: bar.cuts.iter().map(|c| c.length).collect(),
            used: bar.used(),
            remaining: bar.remaining(loss),
        })
        .collect_vec();

    let unplaced = solution
        .unplaced
        .iter()
        .map(|u| {
            let item = instance.item(u.item_id);
            ExtBarUnplaced {
                label: item.label.clone(),
                length: item.length,
                reason: u.reason,
            }
        })
        .collect_vec();

    let stock_bars = instance
        .stocks
        .iter()
        .map(|stock| ExtStockUsage {
            length: stock.length,
            used: solution
                .bars
                .iter()
                .filter(|b| b.source == BarSource::Stock { stock_id: stock.id })
                .count(),
            available: stock.stock.as_count(),
        })
        .collect_vec();

    let total_length = solution.total_length();
    let used_length = solution.used_length();
    let kerf_length = solution.bars.iter().map(|b| b.kerf(loss)).sum::<f64>();

    let summary = ExtBarSummary {
        bars_used: solution.bars.len(),
        new_material_bars: solution
            .bars
            .iter()
            .filter(|b| b.source == BarSource::NewMaterial)
            .count(),
        stock_bars,
        total_length,
        used_length,
        kerf_length,
        waste_length: total_length - used_length - kerf_length,
        utilization: solution.utilization(),
        placed: solution.n_placed(),
        unplaced: unplaced.len(),
        run_time_ms: solution.time_stamp.saturating_duration_since(start).as_millis() as u64,
    };

    let n_budget = solution
        .unplaced
        .iter()
        .filter(|u| u.reason == UnplacedReason::BudgetExceeded)
        .count();
    info!(
        "[EXPORT] {} bars, utilization {:.3}%, {} unplaced ({} due to budget)",
        summary.bars_used,
        summary.utilization * 100.0,
        summary.unplaced,
        n_budget
    );

    Ok(ExtBarSolution {
        plans,
        summary,
        unplaced,
    })
}
