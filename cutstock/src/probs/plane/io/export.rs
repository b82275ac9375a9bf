use crate::entities::UnplacedReason;
use crate::error::Result;
use crate::probs::plane::entities::{PackingStrategy, PlaneInstance, PlaneSolution};
use crate::probs::plane::io::ext_repr::{
    ExtBinResult, ExtMaterialUsage, ExtPiece, ExtPlaneSolution, ExtPlaneSummary, ExtPlaneUnplaced,
};
use crate::probs::plane::util::assertions::validate_solution;
use itertools::Itertools;
use log::info;
use std::time::Instant;

/// Exports a solution out of the library.
///
/// Like its bar counterpart, the solution is validated first and never exported when it violates an invariant.
/// Utilization figures are recomputed from the placed pieces.
pub fn export(
    instance: &PlaneInstance,
    solution: &PlaneSolution,
    strategy: PackingStrategy,
    start: Instant,
) -> Result<ExtPlaneSolution> {
    validate_solution(instance, solution)?;

    let bins = solution
        .layouts
        .iter()
        .enumerate()
        .map(|(bin_id, layout)| {
            let material = instance.material(layout.material_id);
            ExtBinResult {
                bin_id,
                material_type: material.name.clone(),
                material_width: layout.width,
                material_height: layout.height,
                pieces: layout
                    .pieces
                    .iter()
                    .map(|p| ExtPiece {
                        label: instance.item(p.item_id).label.clone(),
                        x: p.x,
                        y: p.y,
                        w: p.w,
                        h: p.h,
                        rotated: p.orientation.is_rotated(),
                    })
                    .collect(),
                utilization: layout.utilization(),
            }
        })
        .collect_vec();

    let unplaced = solution
        .unplaced
        .iter()
        .map(|u| {
            let item = instance.item(u.item_id);
            ExtPlaneUnplaced {
                label: item.label.clone(),
                width: item.width,
                height: item.height,
                reason: u.reason,
            }
        })
        .collect_vec();

    let material_usage = instance
        .materials
        .iter()
        .map(|m| ExtMaterialUsage {
            name: m.name.clone(),
            width: m.width,
            height: m.height,
            used: solution
                .layouts
                .iter()
                .filter(|l| l.material_id == m.id)
                .count(),
            available: m.stock.as_count(),
        })
        .collect_vec();

    let total_area = solution.layouts.iter().map(|l| l.area()).sum::<f64>();
    let placed_area = solution.layouts.iter().map(|l| l.placed_area()).sum::<f64>();

    let summary = ExtPlaneSummary {
        bins_used: bins.len(),
        material_usage,
        total_area,
        placed_area,
        utilization: solution.density(),
        placed: solution.n_placed(),
        unplaced: unplaced.len(),
        strategy: strategy.name().to_string(),
        run_time_ms: solution.time_stamp.saturating_duration_since(start).as_millis() as u64,
    };

    let n_budget = solution
        .unplaced
        .iter()
        .filter(|u| u.reason == UnplacedReason::BudgetExceeded)
        .count();
    info!(
        "[EXPORT] {} bins ({}), utilization {:.3}%, {} unplaced ({} due to budget)",
        summary.bins_used,
        strategy,
        summary.utilization * 100.0,
        summary.unplaced,
        n_budget
    );

    Ok(ExtPlaneSolution {
        bins,
        summary,
        unplaced,
    })
}
