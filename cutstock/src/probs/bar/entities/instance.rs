use crate::ensure_input;
use crate::error::Result;
use crate::probs::bar::entities::{BarItem, Stock};
use crate::probs::bar::util::assertions::instance_item_stock_ids_correct;

#[derive(Debug, Clone)]
/// Instance of the bar cutting problem: a multiset of lengths to be cut from stock bars.
pub struct BarInstance {
    /// The items to be cut and their demands
    pub items: Vec<(BarItem, usize)>,
    /// Stock bar types, in order of preference for tie-breaking
    pub stocks: Vec<Stock>,
    /// Length of a bar from the unlimited new material pool
    pub new_material_length: f64,
    /// Material consumed by every cut
    pub loss: f64,
    /// Trade-off between using few bars (`0.0`) and leaving little waste (`1.0`)
    pub utilization_weight: f64,
}

impl BarInstance {
    /// Creates a new instance, rejecting malformed input.
    pub fn new(
        items: Vec<(BarItem, usize)>,
        stocks: Vec<Stock>,
        new_material_length: f64,
        loss: f64,
        utilization_weight: f64,
    ) -> Result<Self> {
        assert!(instance_item_stock_ids_correct(&items, &stocks));

        for (item, qty) in &items {
            ensure_input!(
                item.length.is_finite() && item.length > 0.0,
                "item {} has a non-positive length: {}",
                item.id,
                item.length
            );
            ensure_input!(*qty >= 1, "item {} has a quantity of 0", item.id);
        }
        for stock in &stocks {
            ensure_input!(
                stock.length.is_finite() && stock.length > 0.0,
                "stock {} has a non-positive length: {}",
                stock.id,
                stock.length
            );
        }
        ensure_input!(
            new_material_length.is_finite() && new_material_length > 0.0,
            "new material length must be positive, got {new_material_length}"
        );
        ensure_input!(
            loss.is_finite() && loss >= 0.0,
            "loss must be non-negative, got {loss}"
        );
        ensure_input!(
            (0.0..=1.0).contains(&utilization_weight),
            "utilization weight must lie in [0, 1], got {utilization_weight}"
        );

        Ok(Self {
            items,
            stocks,
            new_material_length,
            loss,
            utilization_weight,
        })
    }

    pub fn item(&self, id: usize) -> &BarItem {
        &self.items[id].0
    }

    /// Length of the longest bar that could ever be opened
    pub fn max_bar_length(&self) -> f64 {
        self.stocks
            .iter()
            .map(|s| s.length)
            .fold(self.new_material_length, f64::max)
    }
}
