use crate::entities::Availability;
use crate::error::Result;
use crate::probs::bar::entities::{BarInstance, BarItem, Stock};
use crate::probs::bar::io::ext_repr::{ExtBarEntry, ExtBarRequest, ExtStockEntry};
use log::debug;
use ordered_float::OrderedFloat;
use std::collections::HashMap;

/// Imports a wire request into the library.
///
/// The flattened length lists are normalized into quantity-explicit multisets:
/// raw numbers of equal length are merged into one item (or stock type), explicit
/// entries are kept as they are. Order of first appearance is preserved.
pub fn import(ext_request: &ExtBarRequest) -> Result<BarInstance> {
    let items = {
        let mut items: Vec<(BarItem, usize)> = vec![];
        let mut raw_index: HashMap<OrderedFloat<f64>, usize> = HashMap::new();
        for entry in &ext_request.items {
            match entry {
                ExtBarEntry::Length(length) => match raw_index.get(&OrderedFloat(*length)) {
                    Some(&idx) => items[idx].1 += 1,
                    None => {
                        raw_index.insert(OrderedFloat(*length), items.len());
                        items.push((BarItem::new(items.len(), None, *length), 1));
                    }
                },
                ExtBarEntry::Item(ext_item) => {
                    let item = BarItem::new(items.len(), ext_item.label.clone(), ext_item.length);
                    items.push((item, ext_item.quantity));
                }
            }
        }
        items
    };

    let stocks = {
        //(length, availability) per stock type, raw entries are counted as they come in
        let mut entries: Vec<(f64, Availability)> = vec![];
        let mut raw_index: HashMap<OrderedFloat<f64>, usize> = HashMap::new();
        for entry in &ext_request.materials {
            match entry {
                ExtStockEntry::Length(length) => match raw_index.get(&OrderedFloat(*length)) {
                    Some(&idx) => entries[idx].1 = Availability::Limited(entries[idx].1.as_count() + 1),
                    None => {
                        raw_index.insert(OrderedFloat(*length), entries.len());
                        entries.push((*length, Availability::Limited(1)));
                    }
                },
                ExtStockEntry::Stock { length, quantity } => {
                    entries.push((*length, Availability::from_count(*quantity)));
                }
            }
        }
        entries
            .into_iter()
            .enumerate()
            .map(|(id, (length, stock))| Stock::new(id, length, stock))
            .collect::<Vec<_>>()
    };

    debug!(
        "[IMPORT] bar request: {} item entries -> {} item types, {} stock entries -> {} stock types",
        ext_request.items.len(),
        items.len(),
        ext_request.materials.len(),
        stocks.len()
    );

    BarInstance::new(
        items,
        stocks,
        ext_request.new_material_length,
        ext_request.loss,
        ext_request.utilization_weight,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CutError;

    fn request(items: Vec<ExtBarEntry>, materials: Vec<ExtStockEntry>) -> ExtBarRequest {
        ExtBarRequest {
            items,
            materials,
            new_material_length: 6000.0,
            loss: 3.0,
            utilization_weight: 0.5,
            budget: None,
        }
    }

    #[test]
    fn raw_lengths_are_grouped_in_order_of_appearance() {
        let req = request(
            [500.0, 1200.0, 500.0, 500.0]
                .into_iter()
                .map(ExtBarEntry::Length)
                .collect(),
            [6000.0, 4000.0, 6000.0]
                .into_iter()
                .map(ExtStockEntry::Length)
                .collect(),
        );
        let instance = import(&req).unwrap();
        assert_eq!(instance.items.len(), 2);
        assert_eq!(instance.items[0].0.length, 500.0);
        assert_eq!(instance.items[0].1, 3);
        assert_eq!(instance.items[1].1, 1);
        assert_eq!(instance.stocks.len(), 2);
        assert_eq!(instance.stocks[0].stock, Availability::Limited(2));
        assert_eq!(instance.stocks[1].length, 4000.0);
    }

    #[test]
    fn stock_with_zero_quantity_is_unlimited() {
        let req = request(
            vec![ExtBarEntry::Length(10.0)],
            vec![ExtStockEntry::Stock {
                length: 100.0,
                quantity: 0,
            }],
        );
        let instance = import(&req).unwrap();
        assert_eq!(instance.stocks[0].stock, Availability::Unlimited);
    }

    #[test]
    fn non_positive_lengths_are_rejected() {
        let req = request(vec![ExtBarEntry::Length(-1.0)], vec![]);
        assert!(matches!(import(&req), Err(CutError::InvalidInput(_))));

        let mut req = request(vec![ExtBarEntry::Length(1.0)], vec![]);
        req.utilization_weight = 1.5;
        assert!(matches!(import(&req), Err(CutError::InvalidInput(_))));
    }

    #[test]
    fn mixed_wire_entries_deserialize() {
        let json = r#"{
            "items": [1200, {"label": "post", "length": 800, "quantity": 2}],
            "materials": [6000, {"length": 3000, "quantity": 0}],
            "newMaterialLength": 6000,
            "loss": 2,
            "utilizationWeight": 0.3
        }"#;
        let req: ExtBarRequest = serde_json::from_str(json).unwrap();
        let instance = import(&req).unwrap();
        assert_eq!(instance.items[1].0.label.as_deref(), Some("post"));
        assert_eq!(instance.items[1].1, 2);
        assert_eq!(instance.stocks[1].stock, Availability::Unlimited);
        assert_eq!(instance.utilization_weight, 0.3);
    }
}
