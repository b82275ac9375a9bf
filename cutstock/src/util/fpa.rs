use std::cmp::Ordering;
use std::fmt::{Debug, Display};

use float_cmp::{ApproxEq, F64Margin};

/// Absolute tolerance used for all approximate comparisons
const EPSILON: f64 = 1e-9;
const ULPS: i64 = 8;

///Wrapper around [`float_cmp::ApproxEq`] for easy comparison of floats with a certain tolerance.
///Two FPAs are considered equal if they are within a certain tolerance of each other.
#[derive(Debug, Clone, Copy)]
pub struct FPA(pub f64);

impl<T> From<T> for FPA
where
    T: Into<f64>,
{
    fn from(n: T) -> Self {
        FPA(n.into())
    }
}

impl PartialEq<Self> for FPA {
    fn eq(&self, other: &Self) -> bool {
        self.0.approx_eq(
            other.0,
            F64Margin {
                epsilon: EPSILON,
                ulps: ULPS,
            },
        )
    }
}

impl PartialOrd<Self> for FPA {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.eq(other) {
            true => Some(Ordering::Equal),
            false => self.0.partial_cmp(&other.0),
        }
    }
}

impl Display for FPA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
