use serde::{Deserialize, Serialize};

/// Bound a request puts on its own solve. It can only tighten the bound the optimizer is configured with.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtSolveBudget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_placements: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit_ms: Option<u64>,
}
