//! The plane module: rectangles are packed onto sheets of one or more material types.

/// Entities to model the plane packing problem
pub mod entities;

/// Importing requests into and exporting solutions out of this library
pub mod io;

/// Invariant checks of plane packing solutions
pub mod util;
