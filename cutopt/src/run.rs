use std::time::Instant;

use crate::config::CutOptConfig;
use crate::opt::bar_bfd::BfdOptimizer;
use cutstock::error::Result;
use cutstock::io::import::Importer;
use cutstock::probs::bar::entities::{BarInstance, BarSolution};
use cutstock::probs::bar::io::ext_repr::{ExtBarRequest, ExtBarSolution};
use cutstock::probs::plane::entities::{PackingStrategy, PlaneInstance, PlaneSolution};
use cutstock::probs::plane::io::ext_repr::{ExtPlaneRequest, ExtPlaneSolution};
use cutstock::probs::{bar, plane};

/// A completed bar cutting run: import, solve and (validated) export of a single request
pub struct BarRun {
    pub instance: BarInstance,
    pub solution: BarSolution,
    pub ext_solution: ExtBarSolution,
}

/// A completed plane packing run: import, solve and (validated) export of a single request
pub struct PlaneRun {
    pub instance: PlaneInstance,
    pub solution: PlaneSolution,
    pub strategy: PackingStrategy,
    pub ext_solution: ExtPlaneSolution,
}

/// Runs a `/cut/bar` request.
/// Fails on invalid input, or if the produced solution violates an invariant.
pub fn run_bar(ext_request: &ExtBarRequest, config: &CutOptConfig) -> Result<BarRun> {
    let start = Instant::now();
    let instance = bar::io::import(ext_request)?;
    let config = CutOptConfig {
        budget: config.budget.narrowed_by(ext_request.budget.as_ref()),
        ..*config
    };
    let solution = BfdOptimizer::new(instance.clone(), config).solve();
    let ext_solution = bar::io::export(&instance, &solution, start)?;
    Ok(BarRun {
        instance,
        solution,
        ext_solution,
    })
}

/// Runs a `/cut/plane` request.
/// Fails on invalid input, or if the produced solution violates an invariant.
pub fn run_plane(ext_request: &ExtPlaneRequest, config: &CutOptConfig) -> Result<PlaneRun> {
    let start = Instant::now();
    let importer = Importer::new(config.allow_rotation);
    let instance = plane::io::import(&importer, ext_request)?;
    let config = CutOptConfig {
        budget: config.budget.narrowed_by(ext_request.budget.as_ref()),
        ..*config
    };
    let (solution, strategy) = crate::opt::plane::solve(instance.clone(), config);
    let ext_solution = plane::io::export(&instance, &solution, strategy, start)?;
    Ok(PlaneRun {
        instance,
        solution,
        strategy,
        ext_solution,
    })
}
