/// External representations shared by all request types
pub mod ext_repr;

/// Defaults applied while converting external requests into instances
pub mod import;

/// All logic for creating SVG from bins and bar plans
pub mod svg;
