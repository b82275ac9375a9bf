use crate::entities::{Availability, Unplaced, UnplacedReason};
use crate::probs::bar::entities::{Bar, BarInstance, BarSolution, BarSource, PlacedCut};
use crate::probs::bar::util::assertions::problem_matches_solution;
use itertools::Itertools;
use std::time::Instant;

/// Dynamic counterpart of [`BarInstance`].
#[derive(Clone)]
pub struct BarProblem {
    pub instance: BarInstance,
    /// Bars opened so far, in opening order
    pub bars: Vec<Bar>,
    pub item_demand_qtys: Vec<usize>,
    pub stock_qtys: Vec<Availability>,
    /// Item copies which were given up on
    pub unplaced: Vec<Unplaced>,
}

impl BarProblem {
    pub fn new(instance: BarInstance) -> Self {
        let item_demand_qtys = instance.items.iter().map(|(_, qty)| *qty).collect_vec();
        let stock_qtys = instance.stocks.iter().map(|s| s.stock).collect_vec();

        Self {
            instance,
            bars: vec![],
            item_demand_qtys,
            stock_qtys,
            unplaced: vec![],
        }
    }

    /// Cuts an item according to the provided [`BarPlacement`].
    /// Returns the index of the bar the item was cut from.
    pub fn place_item(&mut self, placement: BarPlacement) -> usize {
        let item = self.instance.item(placement.item_id);
        let length = item.length;
        let loss = self.instance.loss;

        let bar_idx = match placement.target {
            BarTarget::Open(idx) => idx,
            BarTarget::New(source) => self.open_bar(source),
        };
        let bar = &mut self.bars[bar_idx];
        assert!(
            bar.fits(length, loss),
            "item {} (length {length}) does not fit in bar {bar_idx}",
            placement.item_id
        );
        bar.cuts.push(PlacedCut {
            item_id: placement.item_id,
            length,
        });

        self.register_included_item(placement.item_id);

        bar_idx
    }

    /// Gives up on one copy of an item.
    pub fn register_unplaced(&mut self, item_id: usize, reason: UnplacedReason) {
        self.register_included_item(item_id);
        self.unplaced.push(Unplaced { item_id, reason });
    }

    /// Length of a bar taken from `source`.
    pub fn bar_length(&self, source: BarSource) -> f64 {
        match source {
            BarSource::Stock { stock_id } => self.instance.stocks[stock_id].length,
            BarSource::NewMaterial => self.instance.new_material_length,
        }
    }

    /// Creates a snapshot of the current state of the problem as a [`BarSolution`].
    pub fn save(&self) -> BarSolution {
        let solution = BarSolution {
            bars: self.bars.clone(),
            unplaced: self.unplaced.clone(),
            time_stamp: Instant::now(),
        };

        debug_assert!(problem_matches_solution(self, &solution));

        solution
    }

    /// Fraction of the length of all opened bars which ended up in cuts
    pub fn utilization(&self) -> f64 {
        let total: f64 = self.bars.iter().map(|b| b.total_length).sum();
        match total > 0.0 {
            true => self.bars.iter().map(|b| b.used()).sum::<f64>() / total,
            false => 0.0,
        }
    }

    fn open_bar(&mut self, source: BarSource) -> usize {
        if let BarSource::Stock { stock_id } = source {
            self.stock_qtys[stock_id].take();
        }
        let length = self.bar_length(source);
        self.bars.push(Bar::new(source, length));
        self.bars.len() - 1
    }

    fn register_included_item(&mut self, item_id: usize) {
        self.item_demand_qtys[item_id] -= 1;
    }
}

/// Encapsulates all required information to cut an item in a [`BarProblem`].
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct BarPlacement {
    pub target: BarTarget,
    pub item_id: usize,
}

/// Enum to distinguish between already opened bars and bars which still have to be taken from stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarTarget {
    /// An opened bar, identified by its index
    Open(usize),
    /// A bar which does not yet exist, but can be created by taking it from `source`
    New(BarSource),
}
