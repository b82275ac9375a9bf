//! `cutstock`: problem model for one-dimensional cutting-stock and two-dimensional
//! multi-material rectangle packing.
//!
//! The crate contains no search heuristics itself. It defines the instances, the dynamic
//! problem state a heuristic mutates, the snapshots (solutions) it produces and the
//! export layer which validates a solution before it is turned into a response.

/// Entities shared by all problem variants
pub mod entities;

/// Error taxonomy of the library
pub mod error;

/// Geometric primitives and base algorithms
pub mod geometry;

/// Importing requests into and exporting solutions out of this library
pub mod io;

/// Problem variants supported by this library
pub mod probs;

/// Helper functions which do not belong to any specific module
pub mod util;

#[doc(inline)]
pub use error::CutError;
