/// Orientation of a rectangular piece relative to how it was requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    /// Width and height as requested
    Original,
    /// Turned by 90°: width and height swapped
    Rotated,
}

impl Orientation {
    pub fn is_rotated(self) -> bool {
        self == Orientation::Rotated
    }

    /// Dimensions `(w, h)` of a `width` x `height` piece in this orientation.
    pub fn apply(self, width: f64, height: f64) -> (f64, f64) {
        match self {
            Orientation::Original => (width, height),
            Orientation::Rotated => (height, width),
        }
    }
}
