mod fpa;

#[doc(inline)]
pub use fpa::FPA;
