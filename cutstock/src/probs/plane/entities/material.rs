use crate::entities::Availability;
use crate::geometry::geo_enums::Orientation;
use crate::util::FPA;

/// A type of sheet onto which items can be packed.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Unique identifier, equal to the index in the instance
    pub id: usize,
    pub name: String,
    pub width: f64,
    pub height: f64,
    /// The number of sheets of this type available to be used
    pub stock: Availability,
}

impl Material {
    pub fn new(id: usize, name: String, width: f64, height: f64, stock: Availability) -> Self {
        Self {
            id,
            name,
            width,
            height,
            stock,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether an empty sheet of this material can hold a `width` x `height` rectangle in any of the `orientations`.
    pub fn can_hold(&self, width: f64, height: f64, orientations: &[Orientation]) -> bool {
        orientations.iter().any(|o| {
            let (w, h) = o.apply(width, height);
            FPA(w) <= FPA(self.width) && FPA(h) <= FPA(self.height)
        })
    }
}
