mod instance;
mod item;
mod layout;
mod material;
mod problem;
mod solution;
mod strategy;

#[doc(inline)]
pub use instance::PlaneInstance;
#[doc(inline)]
pub use item::PlaneItem;
#[doc(inline)]
pub use layout::Layout;
#[doc(inline)]
pub use layout::PlacedPiece;
#[doc(inline)]
pub use material::Material;
#[doc(inline)]
pub use problem::LayoutTarget;
#[doc(inline)]
pub use problem::PlanePlacement;
#[doc(inline)]
pub use problem::PlaneProblem;
#[doc(inline)]
pub use solution::PlaneSolution;
#[doc(inline)]
pub use strategy::PackingStrategy;
