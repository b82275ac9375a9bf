/// Best-fit decreasing optimizer for the bar cutting problem
pub mod bar_bfd;

/// Tracking of the [`SolveBudget`](crate::config::SolveBudget) during a solve
pub mod budget;

/// Free space bookkeeping of a single sheet
pub mod free_space;

/// Greedy optimizer for the plane packing problem
pub mod plane;
