/// A length which has to be cut from the stock.
#[derive(Clone, Debug, PartialEq)]
pub struct BarItem {
    /// Unique identifier, equal to the index in the instance
    pub id: usize,
    pub label: Option<String>,
    pub length: f64,
}

impl BarItem {
    pub fn new(id: usize, label: Option<String>, length: f64) -> Self {
        Self { id, label, length }
    }
}
