use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Why a (quantity-expanded) copy of an item did not end up in the solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnplacedReason {
    /// The item does not fit any stock or material type, not even an empty one.
    Infeasible,
    /// The item would fit an empty bin of a material type, but all copies of it are in use.
    MaterialExhausted,
    /// The solve budget ran out before the item was considered.
    BudgetExceeded,
}

impl UnplacedReason {
    /// Whether retrying the same request with a larger budget could place the item.
    pub fn is_retryable(&self) -> bool {
        matches!(self, UnplacedReason::BudgetExceeded)
    }
}

impl Display for UnplacedReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UnplacedReason::Infeasible => write!(f, "infeasible"),
            UnplacedReason::MaterialExhausted => write!(f, "material exhausted"),
            UnplacedReason::BudgetExceeded => write!(f, "budget exceeded"),
        }
    }
}

/// A single copy of an item which was not placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unplaced {
    /// Id of the item in the instance
    pub item_id: usize,
    pub reason: UnplacedReason,
}
