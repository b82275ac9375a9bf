use crate::geometry::Rect;
use crate::geometry::geo_enums::Orientation;

/// A rectangle placed on a sheet, bottom-left corner at `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedPiece {
    pub item_id: usize,
    pub x: f64,
    pub y: f64,
    /// Width as placed (the item's height when rotated)
    pub w: f64,
    /// Height as placed (the item's width when rotated)
    pub h: f64,
    pub orientation: Orientation,
}

impl PlacedPiece {
    pub fn rect(&self) -> Rect {
        Rect {
            x_min: self.x,
            y_min: self.y,
            x_max: self.x + self.w,
            y_max: self.y + self.h,
        }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }
}

/// An opened sheet of some material and the pieces placed on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub material_id: usize,
    pub width: f64,
    pub height: f64,
    pub pieces: Vec<PlacedPiece>,
}

impl Layout {
    pub fn new(material_id: usize, width: f64, height: f64) -> Self {
        Self {
            material_id,
            width,
            height,
            pieces: vec![],
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn placed_area(&self) -> f64 {
        self.pieces.iter().map(|p| p.area()).sum()
    }

    /// Fraction of the sheet covered by pieces
    pub fn utilization(&self) -> f64 {
        self.placed_area() / self.area()
    }

    pub fn bbox(&self) -> Rect {
        Rect {
            x_min: 0.0,
            y_min: 0.0,
            x_max: self.width,
            y_max: self.height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}
