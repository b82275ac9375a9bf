/// One-dimensional bar cutting (cutting-stock) problem
#[cfg(feature = "bar")]
pub mod bar;

/// Two-dimensional rectangle packing onto material sheets
#[cfg(feature = "plane")]
pub mod plane;
