use crate::entities::Availability;

/// A type of raw bar from which items can be cut.
#[derive(Clone, Debug, PartialEq)]
pub struct Stock {
    /// Unique identifier, equal to the index in the instance
    pub id: usize,
    pub length: f64,
    /// The number of bars of this type available to be used
    pub stock: Availability,
}

impl Stock {
    pub fn new(id: usize, length: f64, stock: Availability) -> Self {
        Self { id, length, stock }
    }
}
