mod availability;
mod unplaced;

#[doc(inline)]
pub use availability::Availability;
#[doc(inline)]
pub use unplaced::Unplaced;
#[doc(inline)]
pub use unplaced::UnplacedReason;
