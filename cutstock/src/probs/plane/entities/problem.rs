use crate::entities::{Availability, Unplaced, UnplacedReason};
use crate::geometry::geo_enums::Orientation;
use crate::probs::plane::entities::{Layout, PlacedPiece, PlaneInstance, PlaneSolution};
use crate::probs::plane::util::assertions::problem_matches_solution;
use itertools::Itertools;
use std::time::Instant;

/// Dynamic counterpart of [`PlaneInstance`].
#[derive(Clone)]
pub struct PlaneProblem {
    pub instance: PlaneInstance,
    /// Opened sheets, in opening order
    pub layouts: Vec<Layout>,
    pub item_demand_qtys: Vec<usize>,
    pub material_stock_qtys: Vec<Availability>,
    /// Item copies which were given up on
    pub unplaced: Vec<Unplaced>,
}

impl PlaneProblem {
    pub fn new(instance: PlaneInstance) -> Self {
        let item_demand_qtys = instance.items.iter().map(|(_, qty)| *qty).collect_vec();
        let material_stock_qtys = instance.materials.iter().map(|m| m.stock).collect_vec();

        Self {
            instance,
            layouts: vec![],
            item_demand_qtys,
            material_stock_qtys,
            unplaced: vec![],
        }
    }

    /// Places an item according to the provided [`PlanePlacement`] in the problem.
    /// Returns the index of the layout the item was placed in.
    pub fn place_item(&mut self, p: PlanePlacement) -> usize {
        let item = self.instance.item(p.item_id);
        let (w, h) = p.orientation.apply(item.width, item.height);

        let l_idx = match p.target {
            LayoutTarget::Open(idx) => idx,
            LayoutTarget::Closed { material_id } => self.open_layout(material_id),
        };

        self.layouts[l_idx].pieces.push(PlacedPiece {
            item_id: p.item_id,
            x: p.x,
            y: p.y,
            w,
            h,
            orientation: p.orientation,
        });

        self.register_included_item(p.item_id);

        l_idx
    }

    /// Gives up on one copy of an item.
    pub fn register_unplaced(&mut self, item_id: usize, reason: UnplacedReason) {
        self.register_included_item(item_id);
        self.unplaced.push(Unplaced { item_id, reason });
    }

    /// Creates a snapshot of the current state of the problem as a [`PlaneSolution`].
    pub fn save(&self) -> PlaneSolution {
        let solution = PlaneSolution {
            layouts: self.layouts.clone(),
            unplaced: self.unplaced.clone(),
            time_stamp: Instant::now(),
        };

        debug_assert!(problem_matches_solution(self, &solution));

        solution
    }

    /// Ids of the materials of which a new sheet can still be opened
    pub fn materials_in_stock(&self) -> impl Iterator<Item = usize> {
        self.material_stock_qtys
            .iter()
            .enumerate()
            .filter(|(_, qty)| qty.has_stock())
            .map(|(id, _)| id)
    }

    pub fn density(&self) -> f64 {
        let total_area = self.layouts.iter().map(|l| l.area()).sum::<f64>();
        match total_area > 0.0 {
            true => self.layouts.iter().map(|l| l.placed_area()).sum::<f64>() / total_area,
            false => 0.0,
        }
    }

    fn open_layout(&mut self, material_id: usize) -> usize {
        self.material_stock_qtys[material_id].take();
        let material = self.instance.material(material_id);
        self.layouts
            .push(Layout::new(material_id, material.width, material.height));
        self.layouts.len() - 1
    }

    fn register_included_item(&mut self, item_id: usize) {
        self.item_demand_qtys[item_id] -= 1;
    }
}

/// Encapsulates all required information to place an item in a [`PlaneProblem`].
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct PlanePlacement {
    pub target: LayoutTarget,
    pub item_id: usize,
    /// Bottom-left corner of the placed piece
    pub x: f64,
    pub y: f64,
    pub orientation: Orientation,
}

/// Enum to distinguish between opened layouts and sheets which still have to be taken from stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutTarget {
    /// An opened layout, identified by its index
    Open(usize),
    /// A layout that does not yet exist, but can be created by opening a sheet of the material
    Closed { material_id: usize },
}
