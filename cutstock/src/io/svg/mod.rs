#[cfg(feature = "bar")]
mod bars_to_svg;
#[cfg(feature = "plane")]
mod layout_to_svg;
mod svg_util;

#[cfg(feature = "bar")]
#[doc(inline)]
pub use bars_to_svg::*;
#[cfg(feature = "plane")]
#[doc(inline)]
pub use layout_to_svg::*;

#[doc(inline)]
pub use svg_util::Color;
#[doc(inline)]
pub use svg_util::SvgDrawOptions;
#[doc(inline)]
pub use svg_util::SvgLayoutTheme;
