use std::cmp::Reverse;
use std::time::Instant;

use crate::config::CutOptConfig;
use crate::opt::budget::BudgetTracker;
use crate::opt::free_space::{
    BestAreaFit, BestShortSideFit, Fit, FreeSpace, Guillotine, MaxRects, SheetSelection,
};
use cutstock::entities::UnplacedReason;
use cutstock::geometry::Rect;
use cutstock::geometry::geo_enums::Orientation;
use cutstock::probs::plane::entities::{
    LayoutTarget, Material, PackingStrategy, PlaneInstance, PlaneItem, PlanePlacement,
    PlaneProblem, PlaneSolution,
};
use cutstock::probs::plane::util::assertions::layout_is_collision_free;
use itertools::Itertools;
use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use thousands::Separable;

/// Solves a plane packing instance with the strategy it asks for, or the configured one if it does not.
/// Returns the solution and the strategy that was used.
pub fn solve(instance: PlaneInstance, config: CutOptConfig) -> (PlaneSolution, PackingStrategy) {
    let strategy = instance.strategy.unwrap_or(config.strategy);
    info!("[PLANE] solving with strategy {strategy}");
    let solution = match strategy {
        PackingStrategy::MaxRectsBestAreaFit => {
            PlaneOptimizer::<MaxRects<BestAreaFit>>::new(instance, config).solve()
        }
        PackingStrategy::MaxRectsBestShortSideFit => {
            PlaneOptimizer::<MaxRects<BestShortSideFit>>::new(instance, config).solve()
        }
        PackingStrategy::GuillotineBottomLeft => {
            PlaneOptimizer::<Guillotine>::new(instance, config).solve()
        }
    };
    (solution, strategy)
}

/// Greedy constructive optimizer for the plane packing problem.
///
/// Items are placed one by one, largest first. For every item, all open sheets and
/// one new sheet per material in stock are evaluated. The free space bookkeeping `F`
/// determines both the position within a sheet and how sheets are compared.
pub struct PlaneOptimizer<F: FreeSpace> {
    pub instance: PlaneInstance,
    pub problem: PlaneProblem,
    pub config: CutOptConfig,
    /// Free space of every open layout, same indices as `problem.layouts`
    free_spaces: Vec<F>,
}

impl<F: FreeSpace> PlaneOptimizer<F> {
    pub fn new(instance: PlaneInstance, config: CutOptConfig) -> Self {
        let problem = PlaneProblem::new(instance.clone());
        Self {
            instance,
            problem,
            config,
            free_spaces: vec![],
        }
    }

    pub fn solve(&mut self) -> PlaneSolution {
        let start = Instant::now();
        let mut budget = BudgetTracker::new(self.config.budget, start);

        let order = item_placement_order(&self.instance);
        for (i, &item_id) in order.iter().enumerate() {
            if budget.exhausted() {
                warn!(
                    "[PLANE] budget exhausted after {} items, {} left unplaced",
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

            match self.find_placement(item_id) {
                Ok(candidate) => {
                    let l_idx = self.place(item_id, candidate);
                    debug!(
                        "[PLANE] placed item {}/{} ({:?}) at ({}, {}) {:?} in bin {}",
                        i + 1,
                        order.len(),
                        self.instance.item(item_id).label,
                        candidate.fit.x,
                        candidate.fit.y,
                        candidate.orientation,
                        l_idx
                    );
                }
                Err(reason) => {
                    debug!(
                        "[PLANE] item {}/{} ({:?}) unplaced: {reason}",
                        i + 1,
                        order.len(),
                        self.instance.item(item_id).label
                    );
                    self.problem.register_unplaced(item_id, reason);
                }
            }
        }

        let solution = self.problem.save();

        info!(
            "[PLANE] optimization finished in {:.3}ms ({} items considered)",
            start.elapsed().as_secs_f64() * 1000.0,
            budget.n_considered().separate_with_commas()
        );
        info!(
            "[PLANE] solution contains {} items in {} bins with a density of {:.3}%, {} unplaced",
            solution.n_placed().separate_with_commas(),
            solution.layouts.len(),
            solution.density() * 100.0,
            solution.unplaced.len()
        );

        solution
    }

    /// Evaluates every open sheet and every material still in stock, returns the best placement.
    fn find_placement(&self, item_id: usize) -> Result<Candidate, UnplacedReason> {
        let item = self.instance.item(item_id);
        let orientations = item.orientations(self.instance.allow_rotation);

        let targets = (0..self.problem.layouts.len())
            .map(LayoutTarget::Open)
            .chain(
                self.problem
                    .materials_in_stock()
                    .map(|material_id| LayoutTarget::Closed { material_id }),
            )
            .collect_vec();

        let evaluate = |target: &LayoutTarget| -> Option<Candidate> {
            let fresh: F;
            let sheet_leftover: f64;
            let free_space = match *target {
                LayoutTarget::Open(idx) => {
                    sheet_leftover = 0.0;
                    &self.free_spaces[idx]
                }
                LayoutTarget::Closed { material_id } => {
                    let material = self.instance.material(material_id);
                    sheet_leftover = material.area() - item.area();
                    fresh = F::new(sheet_rect(material));
                    &fresh
                }
            };
            orientations
                .iter()
                .filter_map(|&orientation| {
                    let (w, h) = orientation.apply(item.width, item.height);
                    free_space.find_fit(w, h).map(|fit| Candidate {
                        target: *target,
                        fit,
                        orientation,
                        sheet_leftover: OrderedFloat(sheet_leftover),
                    })
                })
                .min_by_key(|c| (c.fit.score, c.fit.rect_idx, c.orientation))
        };

        let candidates: Vec<Candidate> = match self.config.parallel {
            true => targets.par_iter().filter_map(evaluate).collect(),
            false => targets.iter().filter_map(evaluate).collect(),
        };

        let best = match F::SELECTION {
            SheetSelection::GlobalBest => candidates
                .into_iter()
                .min_by_key(|c| (c.fit.score, c.target_rank(), c.fit.rect_idx, c.orientation)),
            SheetSelection::FirstFit => candidates.into_iter().min_by_key(|c| {
                let (kind, idx) = c.target_rank();
                (kind, c.sheet_leftover, idx, c.fit.score, c.fit.rect_idx, c.orientation)
            }),
        };

        best.ok_or_else(|| {
            let fits_some_material = self
                .instance
                .materials
                .iter()
                .any(|m| m.can_hold(item.width, item.height, orientations));
            match fits_some_material {
                true => UnplacedReason::MaterialExhausted,
                false => UnplacedReason::Infeasible,
            }
        })
    }

    /// Commits a placement to the problem and the free space of its layout.
    fn place(&mut self, item_id: usize, candidate: Candidate) -> usize {
        let l_idx = self.problem.place_item(PlanePlacement {
            target: candidate.target,
            item_id,
            x: candidate.fit.x,
            y: candidate.fit.y,
            orientation: candidate.orientation,
        });
        if l_idx == self.free_spaces.len() {
            //a new layout was opened
            self.free_spaces
                .push(F::new(self.problem.layouts[l_idx].bbox()));
        }

        let item = self.instance.item(item_id);
        let (w, h) = candidate.orientation.apply(item.width, item.height);
        self.free_spaces[l_idx].occupy(&candidate.fit, w, h);

        debug_assert!(layout_is_collision_free(&self.problem.layouts[l_idx]));

        l_idx
    }
}

/// A possible placement of an item.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    target: LayoutTarget,
    fit: Fit,
    orientation: Orientation,
    /// Area of a new sheet not covered by the item, `0.0` for open sheets
    sheet_leftover: OrderedFloat<f64>,
}

impl Candidate {
    /// Open sheets before new ones, then by index or material order
    fn target_rank(&self) -> (u8, usize) {
        match self.target {
            LayoutTarget::Open(idx) => (0, idx),
            LayoutTarget::Closed { material_id } => (1, material_id),
        }
    }
}

fn sheet_rect(material: &Material) -> Rect {
    Rect {
        x_min: 0.0,
        y_min: 0.0,
        x_max: material.width,
        y_max: material.height,
    }
}

/// Order in which the items are placed: every copy of every item, by decreasing area,
/// then decreasing longer side, then label. Remaining ties keep the order of the request.
pub fn item_placement_order(instance: &PlaneInstance) -> Vec<usize> {
    instance
        .items
        .iter()
        .flat_map(|(item, qty)| std::iter::repeat_n(item.id, *qty))
        .sorted_by(|&a, &b| {
            let (ia, ib) = (instance.item(a), instance.item(b));
            let key = |i: &PlaneItem| {
                (Reverse(OrderedFloat(i.area())), Reverse(OrderedFloat(i.longer_side())))
            };
            key(ia).cmp(&key(ib)).then_with(|| ia.label.cmp(&ib.label))
        })
        .collect()
}
