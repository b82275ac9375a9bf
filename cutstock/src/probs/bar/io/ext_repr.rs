use crate::entities::UnplacedReason;
use crate::io::ext_repr::ExtSolveBudget;
use serde::{Deserialize, Serialize};

/// Bar cutting request as it arrives on the wire (`POST /cut/bar`)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtBarRequest {
    /// Required lengths, repeated per quantity
    pub items: Vec<ExtBarEntry>,
    /// Available stock lengths, repeated per quantity
    #[serde(default)]
    pub materials: Vec<ExtStockEntry>,
    /// Length of a bar from the unlimited new material pool
    pub new_material_length: f64,
    /// Kerf: material consumed by every cut
    #[serde(default)]
    pub loss: f64,
    /// `0.0` favours using few bars, `1.0` favours leaving little waste
    #[serde(default = "default_utilization_weight")]
    pub utilization_weight: f64,
    /// Optional bound on this solve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<ExtSolveBudget>,
}

fn default_utilization_weight() -> f64 {
    0.5
}

/// A required length: either a raw number (one copy) or an explicit item with a quantity
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum ExtBarEntry {
    Length(f64),
    Item(ExtBarItem),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtBarItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub length: f64,
    pub quantity: usize,
}

/// An available stock bar: either a raw number (one copy) or a length with a quantity (`0` = unlimited)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum ExtStockEntry {
    Length(f64),
    Stock { length: f64, quantity: usize },
}

/// One consumed bar (`BarResult` on the wire)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtBarResult {
    /// Position in bar-opening order, starting at 0
    pub index: usize,
    pub total_length: f64,
    /// Cut lengths, in cutting order
    pub cuts: Vec<f64>,
    /// Sum of all cuts
    pub used: f64,
    /// `total_length - used - loss * cuts.len()`
    pub remaining: f64,
}

/// An item copy which was not cut
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtBarUnplaced {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub length: f64,
    pub reason: UnplacedReason,
}

/// Aggregate statistics of a bar cutting solution
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtBarSummary {
    pub bars_used: usize,
    /// Bars taken from the new material pool
    pub new_material_bars: usize,
    /// Bars used per stock type, in stock order
    pub stock_bars: Vec<ExtStockUsage>,
    pub total_length: f64,
    pub used_length: f64,
    pub kerf_length: f64,
    pub waste_length: f64,
    /// `used_length / total_length`
    pub utilization: f64,
    pub placed: usize,
    pub unplaced: usize,
    pub run_time_ms: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtStockUsage {
    pub length: f64,
    pub used: usize,
    /// `0` = unlimited
    pub available: usize,
}

/// Bar cutting solution: the wire payload plus the audit information
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtBarSolution {
    pub plans: Vec<ExtBarResult>,
    pub summary: ExtBarSummary,
    pub unplaced: Vec<ExtBarUnplaced>,
}
