mod export;
mod import;

/// External (serializable) representations of plane packing requests and results
pub mod ext_repr;

#[doc(inline)]
pub use export::export;
#[doc(inline)]
pub use import::import;
#[doc(inline)]
pub use import::DEFAULT_MATERIAL_NAME;
