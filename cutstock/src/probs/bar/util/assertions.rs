//! Checks on the bar cutting problem.
//! The `bool` functions are used in `debug_assert!()` blocks, [`validate_solution`] runs on every export.

use crate::ensure_invariant;
use crate::error::{CutError, Result};
use crate::geometry::Interval;
use crate::geometry::geo_traits::{AlmostCollidesWith, AlmostEncloses};
use crate::probs::bar::entities::{
    Bar, BarInstance, BarItem, BarProblem, BarSolution, BarSource, Stock,
};

pub fn instance_item_stock_ids_correct(items: &[(BarItem, usize)], stocks: &[Stock]) -> bool {
    items.iter().enumerate().all(|(i, (item, _))| item.id == i)
        && stocks.iter().enumerate().all(|(i, stock)| stock.id == i)
}

pub fn problem_matches_solution(problem: &BarProblem, sol: &BarSolution) -> bool {
    assert_eq!(problem.bars, sol.bars);
    assert_eq!(problem.unplaced, sol.unplaced);
    assert_eq!(problem.utilization(), sol.utilization());
    true
}

/// Intervals occupied by each cut of `bar`, kerf excluded, in cutting order from the start of the bar.
pub fn cut_intervals(bar: &Bar, loss: f64) -> Result<Vec<Interval>> {
    let mut offset = 0.0;
    let mut intervals = Vec::with_capacity(bar.cuts.len());
    for cut in &bar.cuts {
        let interval = Interval::from_offset(offset, cut.length).map_err(|e| {
            CutError::InvariantViolation(format!("malformed cut of item {}: {e}", cut.item_id))
        })?;
        intervals.push(interval);
        offset = interval.end + loss;
    }
    Ok(intervals)
}

/// Re-checks every invariant a bar cutting solution has to satisfy before it is handed out.
pub fn validate_solution(instance: &BarInstance, sol: &BarSolution) -> Result<()> {
    let loss = instance.loss;
    let mut placed_qtys = vec![0; instance.items.len()];
    let mut stock_used_qtys = vec![0; instance.stocks.len()];

    for (idx, bar) in sol.bars.iter().enumerate() {
        let expected_length = match bar.source {
            BarSource::Stock { stock_id } => {
                ensure_invariant!(
                    stock_id < instance.stocks.len(),
                    "bar {idx} refers to unknown stock {stock_id}"
                );
                stock_used_qtys[stock_id] += 1;
                instance.stocks[stock_id].length
            }
            BarSource::NewMaterial => instance.new_material_length,
        };
        ensure_invariant!(
            bar.total_length == expected_length,
            "bar {idx} has length {} while its source has length {expected_length}",
            bar.total_length
        );
        ensure_invariant!(!bar.is_empty(), "bar {idx} was opened without any cut");

        let consumed = bar.consumed(loss);
        ensure_invariant!(
            consumed <= bar.total_length,
            "bar {idx} is over capacity: {consumed} consumed of {}",
            bar.total_length
        );

        let whole = Interval::try_new(0.0, bar.total_length)
            .map_err(|e| CutError::InvariantViolation(e.to_string()))?;
        let intervals = cut_intervals(bar, loss)?;
        for (i, interval) in intervals.iter().enumerate() {
            ensure_invariant!(
                whole.almost_encloses(interval),
                "cut {i} of bar {idx} extends beyond the bar: {interval:?}"
            );
            for (j, other) in intervals.iter().enumerate().skip(i + 1) {
                ensure_invariant!(
                    !interval.almost_collides_with(other),
                    "cuts {i} and {j} of bar {idx} overlap"
                );
            }
        }

        for cut in &bar.cuts {
            ensure_invariant!(
                cut.item_id < instance.items.len(),
                "bar {idx} contains unknown item {}",
                cut.item_id
            );
            ensure_invariant!(
                cut.length == instance.item(cut.item_id).length,
                "cut of item {} in bar {idx} has length {} instead of {}",
                cut.item_id,
                cut.length,
                instance.item(cut.item_id).length
            );
            placed_qtys[cut.item_id] += 1;
        }
    }

    for (stock, used) in instance.stocks.iter().zip(stock_used_qtys.iter()) {
        ensure_invariant!(
            stock.stock.permits(*used),
            "stock {} used {used} times, only {} available",
            stock.id,
            stock.stock.as_count()
        );
    }

    let mut unplaced_qtys = vec![0; instance.items.len()];
    for u in &sol.unplaced {
        ensure_invariant!(
            u.item_id < instance.items.len(),
            "unknown unplaced item {}",
            u.item_id
        );
        unplaced_qtys[u.item_id] += 1;
    }
    for (id, (_, qty)) in instance.items.iter().enumerate() {
        ensure_invariant!(
            placed_qtys[id] + unplaced_qtys[id] == *qty,
            "item {id} demanded {qty} times, but {} placed and {} unplaced",
            placed_qtys[id],
            unplaced_qtys[id]
        );
    }

    Ok(())
}
