use crate::entities::UnplacedReason;
use crate::io::ext_repr::ExtSolveBudget;
use serde::{Deserialize, Serialize};

/// Plane packing request as it arrives on the wire (`POST /cut/plane`)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtPlaneRequest {
    pub items: Vec<ExtPlaneItem>,
    /// Candidate sheet types, if empty a single unlimited `width` x `height` sheet is used
    #[serde(default)]
    pub materials: Vec<ExtMaterial>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_rotation: Option<bool>,
    /// Optional bound on this solve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<ExtSolveBudget>,
}

/// A required rectangle (`Item` on the wire)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtPlaneItem {
    #[serde(default)]
    pub label: String,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<usize>,
}

/// Both schema variants of a candidate sheet type.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum ExtMaterial {
    /// `{name, width, height, availableCount?}`, a missing count means unlimited
    Named(ExtNamedMaterial),
    /// A plain dimensioned item, always unlimited
    Unnamed(ExtPlaneItem),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtNamedMaterial {
    pub name: String,
    pub width: f64,
    pub height: f64,
    /// `0` or absent = unlimited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_count: Option<usize>,
}

/// A placed rectangle (`Piece` on the wire)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtPiece {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub rotated: bool,
}

/// One opened sheet (`BinResult` on the wire)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtBinResult {
    /// Position in sheet-opening order, starting at 0
    pub bin_id: usize,
    pub material_type: String,
    pub material_width: f64,
    pub material_height: f64,
    pub pieces: Vec<ExtPiece>,
    /// Placed area divided by sheet area
    pub utilization: f64,
}

/// An item copy which was not placed
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtPlaneUnplaced {
    pub label: String,
    pub width: f64,
    pub height: f64,
    pub reason: UnplacedReason,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtMaterialUsage {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub used: usize,
    /// `0` = unlimited
    pub available: usize,
}

/// Aggregate statistics of a plane packing solution
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtPlaneSummary {
    pub bins_used: usize,
    pub material_usage: Vec<ExtMaterialUsage>,
    pub total_area: f64,
    pub placed_area: f64,
    /// `placed_area / total_area`
    pub utilization: f64,
    pub placed: usize,
    pub unplaced: usize,
    pub strategy: String,
    pub run_time_ms: u64,
}

/// Plane packing solution: the wire payload plus the audit information
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtPlaneSolution {
    pub bins: Vec<ExtBinResult>,
    pub summary: ExtPlaneSummary,
    pub unplaced: Vec<ExtPlaneUnplaced>,
}
