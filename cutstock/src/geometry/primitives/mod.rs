mod interval;
mod rect;

#[doc(inline)]
pub use interval::Interval;
#[doc(inline)]
pub use rect::Rect;
