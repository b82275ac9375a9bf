use crate::geometry::geo_enums::Orientation;

/// A rectangle which has to be placed on a sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneItem {
    /// Unique identifier, equal to the index in the instance
    pub id: usize,
    pub label: String,
    pub width: f64,
    pub height: f64,
}

impl PlaneItem {
    pub fn new(id: usize, label: String, width: f64, height: f64) -> Self {
        Self {
            id,
            label,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn longer_side(&self) -> f64 {
        f64::max(self.width, self.height)
    }

    /// Orientations worth trying for this item, original orientation first.
    /// Squares are never rotated.
    pub fn orientations(&self, allow_rotation: bool) -> &'static [Orientation] {
        match allow_rotation && self.width != self.height {
            true => &[Orientation::Original, Orientation::Rotated],
            false => &[Orientation::Original],
        }
    }
}
