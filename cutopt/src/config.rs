use cutstock::io::ext_repr::ExtSolveBudget;
use cutstock::io::svg::SvgDrawOptions;
use cutstock::probs::plane::entities::PackingStrategy;
use serde::{Deserialize, Serialize};

/// Configuration of the optimizers
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct CutOptConfig {
    /// Bound on the work done by a single solve
    #[serde(default)]
    pub budget: SolveBudget,
    /// Evaluate candidate sheets in parallel. Does not change the result.
    pub parallel: bool,
    /// Packing strategy used when a request does not name one
    pub strategy: PackingStrategy,
    /// Whether items may be rotated when a request does not say
    pub allow_rotation: bool,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}

impl Default for CutOptConfig {
    fn default() -> Self {
        Self {
            budget: SolveBudget::default(),
            parallel: true,
            strategy: PackingStrategy::default(),
            allow_rotation: true,
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}

/// Bound of a solve, checked between placements.
/// The configured budget is the ceiling, a request may tighten it (see [`SolveBudget::narrowed_by`]).
/// Items not yet considered when the budget runs out are reported as unplaced.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SolveBudget {
    /// Maximum number of item copies considered (placed or given up on)
    pub max_placements: Option<usize>,
    /// Maximum wall clock time of the solve, in milliseconds
    pub time_limit_ms: Option<u64>,
}

impl SolveBudget {
    pub const UNLIMITED: SolveBudget = SolveBudget {
        max_placements: None,
        time_limit_ms: None,
    };

    /// The tighter of `self` and the bound a request asked for, per field.
    pub fn narrowed_by(self, requested: Option<&ExtSolveBudget>) -> SolveBudget {
        let Some(requested) = requested else {
            return self;
        };
        SolveBudget {
            max_placements: tighter(self.max_placements, requested.max_placements),
            time_limit_ms: tighter(self.time_limit_ms, requested.time_limit_ms),
        }
    }
}

fn tighter<T: Ord>(a: Option<T>, b: Option<T>) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
