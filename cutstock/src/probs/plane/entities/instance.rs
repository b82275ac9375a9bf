use crate::ensure_input;
use crate::error::Result;
use crate::probs::plane::entities::{Material, PackingStrategy, PlaneItem};
use crate::probs::plane::util::assertions::instance_item_material_ids_correct;

#[derive(Debug, Clone)]
/// Instance of the plane packing problem: rectangles to be packed onto sheets of one or more materials.
pub struct PlaneInstance {
    /// The items to be packed and their demands
    pub items: Vec<(PlaneItem, usize)>,
    /// Material types available, in order of preference for tie-breaking
    pub materials: Vec<Material>,
    /// Whether items may be turned by 90°
    pub allow_rotation: bool,
    /// Heuristic requested by the caller, if any
    pub strategy: Option<PackingStrategy>,
}

impl PlaneInstance {
    /// Creates a new instance, rejecting malformed input.
    pub fn new(
        items: Vec<(PlaneItem, usize)>,
        materials: Vec<Material>,
        allow_rotation: bool,
        strategy: Option<PackingStrategy>,
    ) -> Result<Self> {
        assert!(instance_item_material_ids_correct(&items, &materials));

        for (item, qty) in &items {
            ensure_input!(
                positive(item.width) && positive(item.height),
                "item {} ({:?}) has non-positive dimensions: {} x {}",
                item.id,
                item.label,
                item.width,
                item.height
            );
            ensure_input!(*qty >= 1, "item {} ({:?}) has a quantity of 0", item.id, item.label);
        }
        ensure_input!(!materials.is_empty(), "no material to pack onto");
        for material in &materials {
            ensure_input!(
                positive(material.width) && positive(material.height),
                "material {} ({:?}) has non-positive dimensions: {} x {}",
                material.id,
                material.name,
                material.width,
                material.height
            );
        }

        Ok(Self {
            items,
            materials,
            allow_rotation,
            strategy,
        })
    }

    pub fn item(&self, id: usize) -> &PlaneItem {
        &self.items[id].0
    }

    pub fn material(&self, id: usize) -> &Material {
        &self.materials[id]
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
