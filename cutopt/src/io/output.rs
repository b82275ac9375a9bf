use crate::config::CutOptConfig;
use cutstock::probs::bar::io::ext_repr::{ExtBarRequest, ExtBarSolution};
use cutstock::probs::plane::io::ext_repr::{ExtPlaneRequest, ExtPlaneSolution};
use serde::{Deserialize, Serialize};

/// Everything needed to reproduce and audit a bar cutting run
#[derive(Serialize, Deserialize, Clone)]
pub struct BarOutput {
    pub request: ExtBarRequest,
    pub solution: ExtBarSolution,
    pub config: CutOptConfig,
}

/// Everything needed to reproduce and audit a plane packing run
#[derive(Serialize, Deserialize, Clone)]
pub struct PlaneOutput {
    pub request: ExtPlaneRequest,
    pub solution: ExtPlaneSolution,
    pub config: CutOptConfig,
}
