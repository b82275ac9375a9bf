//! The bar cutting module: required lengths are cut from stock bars, every cut consumes a kerf.

/// Entities to model the bar cutting problem
pub mod entities;

/// Importing requests into and exporting solutions out of this library
pub mod io;

/// Invariant checks of bar cutting solutions
pub mod util;
