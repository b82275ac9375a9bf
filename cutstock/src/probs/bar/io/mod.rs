mod export;
mod import;

/// External (serializable) representations of bar cutting requests and results
pub mod ext_repr;

#[doc(inline)]
pub use export::export;
#[doc(inline)]
pub use import::import;
