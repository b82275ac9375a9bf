use thiserror::Error;

/// Result type alias for fallible library operations.
pub type Result<T> = std::result::Result<T, CutError>;

/// Errors which can cross the boundary of the library.
///
/// Items which cannot be placed are not errors: they are reported as
/// [`Unplaced`](crate::entities::Unplaced) entries of a solution.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CutError {
    /// The request was rejected before solving started.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requested packing strategy is not supported.
    #[error("unknown packing strategy: {0:?}")]
    UnknownStrategy(String),

    /// A produced solution violates a geometric or capacity invariant.
    /// Always a defect of the engine, never of the request.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

impl CutError {
    /// Whether the error was caused by the caller (as opposed to the engine).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CutError::InvalidInput(_) | CutError::UnknownStrategy(_)
        )
    }
}

/// Returns early with a [`CutError::InvalidInput`] if the condition does not hold.
#[macro_export]
macro_rules! ensure_input {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::CutError::InvalidInput(format!($($arg)+)));
        }
    };
}

/// Returns early with a [`CutError::InvariantViolation`] if the condition does not hold.
#[macro_export]
macro_rules! ensure_invariant {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::CutError::InvariantViolation(format!($($arg)+)));
        }
    };
}
