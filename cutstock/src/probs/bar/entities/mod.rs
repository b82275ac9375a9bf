mod bar;
mod instance;
mod item;
mod problem;
mod solution;
mod stock;

#[doc(inline)]
pub use bar::Bar;
#[doc(inline)]
pub use bar::BarSource;
#[doc(inline)]
pub use bar::PlacedCut;
#[doc(inline)]
pub use instance::BarInstance;
#[doc(inline)]
pub use item::BarItem;
#[doc(inline)]
pub use problem::BarPlacement;
#[doc(inline)]
pub use problem::BarProblem;
#[doc(inline)]
pub use problem::BarTarget;
#[doc(inline)]
pub use solution::BarSolution;
#[doc(inline)]
pub use stock::Stock;
