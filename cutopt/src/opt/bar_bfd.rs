use std::cmp::Reverse;
use std::time::Instant;

use crate::config::CutOptConfig;
use crate::opt::budget::BudgetTracker;
use cutstock::entities::UnplacedReason;
use cutstock::probs::bar::entities::{
    BarInstance, BarPlacement, BarProblem, BarSolution, BarSource, BarTarget,
};
use itertools::Itertools;
use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use thousands::Separable;

/// Best-fit decreasing (BFD) optimizer for the bar cutting problem.
///
/// Pieces are cut longest first. Every piece goes into the open bar it leaves the least room in.
/// When no open bar can take it, a new bar is taken from the stock type that scores best on a
/// weighted mix of projected utilization and bar length, or from the new material pool if no stock fits.
///
/// The `utilization_weight` of the instance only enters that stock scoring. The choice between an open
/// bar and a new one is always best fit, so without stock types the weight has no effect.
pub struct BfdOptimizer {
    pub instance: BarInstance,
    pub problem: BarProblem,
    pub config: CutOptConfig,
}

impl BfdOptimizer {
    pub fn new(instance: BarInstance, config: CutOptConfig) -> Self {
        let problem = BarProblem::new(instance.clone());
        Self {
            instance,
            problem,
            config,
        }
    }

    pub fn solve(&mut self) -> BarSolution {
        let start = Instant::now();
        let mut budget = BudgetTracker::new(self.config.budget, start);

        let order = item_placement_order(&self.instance);
        for (i, &item_id) in order.iter().enumerate() {
            if budget.exhausted() {
                warn!(
                    "[BFD] budget exhausted after {} pieces, {} left unplaced",
                    budget.n_considered(),
                    order.len() - i
                );
                for &rem_id in &order[i..] {
                    self.problem
                        .register_unplaced(rem_id, UnplacedReason::BudgetExceeded);
                }
                break;
            }
            budget.register();

            match self.find_placement(item_id, &order[i + 1..]) {
                Ok(placement) => {
                    let bar_idx = self.problem.place_item(placement);
                    debug!(
                        "[BFD] cut piece {}/{} (item {}, length {}) from bar {} ({:?})",
                        i + 1,
                        order.len(),
                        item_id,
                        self.instance.item(item_id).length,
                        bar_idx,
                        self.problem.bars[bar_idx].source
                    );
                }
                Err(reason) => {
                    debug!(
                        "[BFD] piece {}/{} (item {}, length {}) unplaced: {reason}",
                        i + 1,
                        order.len(),
                        item_id,
                        self.instance.item(item_id).length
                    );
                    self.problem.register_unplaced(item_id, reason);
                }
            }
        }

        let solution = self.problem.save();

        info!(
            "[BFD] optimization finished in {:.3}ms ({} pieces considered)",
            start.elapsed().as_secs_f64() * 1000.0,
            budget.n_considered().separate_with_commas()
        );
        info!(
            "[BFD] solution uses {} bars for {} pieces with a utilization of {:.3}%, {} unplaced",
            solution.bars.len(),
            solution.n_placed().separate_with_commas(),
            solution.utilization() * 100.0,
            solution.unplaced.len()
        );

        solution
    }

    /// Decides where a piece of `item_id` is cut from.
    /// `upcoming` are the pieces still to be cut after this one, used to project the fill of new bars.
    fn find_placement(
        &self,
        item_id: usize,
        upcoming: &[usize],
    ) -> Result<BarPlacement, UnplacedReason> {
        let length = self.instance.item(item_id).length;
        let loss = self.instance.loss;
        let cost = length + loss;

        //best fit among the open bars, ties to the lowest index
        let best_open = self
            .problem
            .bars
            .iter()
            .enumerate()
            .filter(|(_, bar)| bar.fits(length, loss))
            .min_by_key(|(idx, bar)| (OrderedFloat(bar.remaining(loss) - cost), *idx))
            .map(|(idx, _)| idx);

        if let Some(idx) = best_open {
            return Ok(BarPlacement {
                target: BarTarget::Open(idx),
                item_id,
            });
        }

        //open a new bar from stock
        let candidates = self
            .instance
            .stocks
            .iter()
            .filter(|s| self.problem.stock_qtys[s.id].has_stock() && cost <= s.length)
            .collect_vec();

        if !candidates.is_empty() {
            let max_length = candidates.iter().map(|s| s.length).fold(0.0, f64::max);
            let upcoming_lengths = std::iter::once(length)
                .chain(upcoming.iter().map(|&id| self.instance.item(id).length))
                .collect_vec();
            let w = self.instance.utilization_weight;

            let best_stock = candidates
                .iter()
                .map(|s| {
                    let projected = projected_utilization(s.length, &upcoming_lengths, loss);
                    let score = w * (1.0 - projected) + (1.0 - w) * (1.0 - s.length / max_length);
                    (s.id, score)
                })
                .min_by_key(|(id, score)| (OrderedFloat(*score), *id))
                .map(|(id, _)| id);

            if let Some(stock_id) = best_stock {
                return Ok(BarPlacement {
                    target: BarTarget::New(BarSource::Stock { stock_id }),
                    item_id,
                });
            }
        }

        //fall back on the new material pool
        if cost <= self.instance.new_material_length {
            return Ok(BarPlacement {
                target: BarTarget::New(BarSource::NewMaterial),
                item_id,
            });
        }

        match self.instance.stocks.iter().any(|s| cost <= s.length) {
            true => Err(UnplacedReason::MaterialExhausted),
            false => Err(UnplacedReason::Infeasible),
        }
    }
}

/// Order in which the pieces are cut: every copy of every item, longest first.
/// Equal lengths keep the order in which the items were requested.
pub fn item_placement_order(instance: &BarInstance) -> Vec<usize> {
    instance
        .items
        .iter()
        .flat_map(|(item, qty)| std::iter::repeat_n(item.id, *qty))
        .sorted_by_key(|&id| Reverse(OrderedFloat(instance.item(id).length)))
        .collect()
}

/// Fraction of a bar of `bar_length` a first-fit decreasing fill with `lengths` (sorted descending) would use.
pub fn projected_utilization(bar_length: f64, lengths: &[f64], loss: f64) -> f64 {
    let mut consumed = 0.0;
    let mut used = 0.0;
    for &length in lengths {
        if consumed + length + loss <= bar_length {
            consumed += length + loss;
            used += length;
        }
        if bar_length - consumed < lengths[lengths.len() - 1] + loss {
            //not even the shortest piece fits anymore
            break;
        }
    }
    used / bar_length
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutstock::entities::Availability;
    use cutstock::probs::bar::entities::{BarItem, Stock};

    fn instance(items: &[(f64, usize)], stocks: &[(f64, usize)], nml: f64, loss: f64, w: f64) -> BarInstance {
        BarInstance::new(
            items
                .iter()
                .enumerate()
                .map(|(id, &(l, q))| (BarItem::new(id, None, l), q))
                .collect(),
            stocks
                .iter()
                .enumerate()
                .map(|(id, &(l, q))| Stock::new(id, l, Availability::from_count(q)))
                .collect(),
            nml,
            loss,
            w,
        )
        .unwrap()
    }

    #[test]
    fn pieces_are_cut_longest_first() {
        let instance = instance(&[(3.0, 1), (5.0, 2), (3.0, 1)], &[], 10.0, 0.0, 0.5);
        assert_eq!(item_placement_order(&instance), vec![1, 1, 0, 2]);
    }

    #[test]
    fn projected_utilization_is_first_fit() {
        assert_eq!(projected_utilization(10.0, &[6.0, 5.0, 4.0], 0.0), 1.0);
        assert_eq!(projected_utilization(10.0, &[6.0, 5.0], 0.0), 0.6);
        assert_eq!(projected_utilization(10.0, &[4.0, 4.0, 4.0], 1.0), 0.8);
    }

    #[test]
    fn open_bar_with_least_leftover_wins() {
        let instance = instance(&[(6.0, 1), (4.0, 1), (3.0, 1)], &[], 10.0, 0.0, 0.5);
        let mut opt = BfdOptimizer::new(instance, CutOptConfig::default());
        let sol = opt.solve();
        //6 and 4 fill the first bar exactly, 3 needs a second one
        assert_eq!(sol.bars.len(), 2);
        assert_eq!(sol.bars[0].cuts.len(), 2);
        assert_eq!(sol.bars[1].cuts[0].length, 3.0);
    }

    #[test]
    fn weight_shifts_between_long_bars_and_tight_fits() {
        //a 4.0 piece: the 4.0 stock fits it perfectly, the 10.0 stock is the longest
        let stocks = [(10.0, 0), (4.0, 0)];
        let waste_minded = instance(&[(4.0, 1)], &stocks, 10.0, 0.0, 1.0);
        let sol = BfdOptimizer::new(waste_minded, CutOptConfig::default()).solve();
        assert_eq!(sol.bars[0].source, BarSource::Stock { stock_id: 1 });

        let count_minded = instance(&[(4.0, 1)], &stocks, 10.0, 0.0, 0.0);
        let sol = BfdOptimizer::new(count_minded, CutOptConfig::default()).solve();
        assert_eq!(sol.bars[0].source, BarSource::Stock { stock_id: 0 });
    }

    #[test]
    fn exhausted_stock_is_reported_as_such() {
        let instance = instance(&[(8.0, 2)], &[(10.0, 1)], 5.0, 0.0, 0.5);
        let sol = BfdOptimizer::new(instance, CutOptConfig::default()).solve();
        assert_eq!(sol.bars.len(), 1);
        assert_eq!(sol.unplaced.len(), 1);
        assert_eq!(sol.unplaced[0].reason, UnplacedReason::MaterialExhausted);
    }
}
