use crate::entities::Availability;
use crate::error::{CutError, Result};
use crate::io::import::Importer;
use crate::probs::plane::entities::{Material, PackingStrategy, PlaneInstance, PlaneItem};
use crate::probs::plane::io::ext_repr::{ExtMaterial, ExtPlaneRequest};
use itertools::Itertools;
use log::debug;

/// Name of the material used when a request lists no materials at all
pub const DEFAULT_MATERIAL_NAME: &str = "default";

/// Imports a wire request into the library
pub fn import(importer: &Importer, ext_request: &ExtPlaneRequest) -> Result<PlaneInstance> {
    let items = ext_request
        .items
        .iter()
        .enumerate()
        .map(|(id, ext_item)| {
            let item = PlaneItem::new(id, ext_item.label.clone(), ext_item.width, ext_item.height);
            (item, ext_item.quantity.unwrap_or(1))
        })
        .collect_vec();

    let materials = match ext_request.materials.is_empty() {
        true => {
            let (Some(width), Some(height)) = (ext_request.width, ext_request.height) else {
                return Err(CutError::InvalidInput(
                    "no materials given and no sheet width/height to fall back on".into(),
                ));
            };
            vec![Material::new(
                0,
                DEFAULT_MATERIAL_NAME.to_string(),
                width,
                height,
                Availability::Unlimited,
            )]
        }
        false => ext_request
            .materials
            .iter()
            .enumerate()
            .map(|(id, ext_material)| match ext_material {
                ExtMaterial::Named(m) => Material::new(
                    id,
                    m.name.clone(),
                    m.width,
                    m.height,
                    Availability::from_count(m.available_count.unwrap_or(0)),
                ),
                ExtMaterial::Unnamed(m) => {
                    let name = match m.label.trim().is_empty() {
                        true => format!("{}x{}", m.width, m.height),
                        false => m.label.clone(),
                    };
                    Material::new(id, name, m.width, m.height, Availability::Unlimited)
                }
            })
            .collect_vec(),
    };

    let strategy = match ext_request.strategy.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(name) => Some(name.parse::<PackingStrategy>()?),
    };

    let allow_rotation = ext_request
        .allow_rotation
        .unwrap_or(importer.allow_rotation);

    debug!(
        "[IMPORT] plane request: {} item types ({} copies), {} materials, strategy {:?}, rotation {}",
        items.len(),
        items.iter().map(|(_, qty)| qty).sum::<usize>(),
        materials.len(),
        strategy,
        allow_rotation
    );

    PlaneInstance::new(items, materials, allow_rotation, strategy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ExtPlaneRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn empty_materials_fall_back_to_sheet_size() {
        let req = parse(r#"{"items": [{"label": "a", "width": 2, "height": 3}], "width": 10, "height": 20}"#);
        let instance = import(&Importer::default(), &req).unwrap();
        assert_eq!(instance.materials.len(), 1);
        assert_eq!(instance.materials[0].name, DEFAULT_MATERIAL_NAME);
        assert_eq!(instance.materials[0].stock, Availability::Unlimited);
        assert_eq!(instance.items[0].1, 1);
        assert!(instance.allow_rotation);
        assert_eq!(instance.strategy, None);
    }

    #[test]
    fn empty_materials_without_sheet_size_are_rejected() {
        let req = parse(r#"{"items": [{"label": "a", "width": 2, "height": 3}]}"#);
        assert!(matches!(
            import(&Importer::default(), &req),
            Err(CutError::InvalidInput(_))
        ));
    }

    #[test]
    fn both_material_schemas_are_accepted() {
        let req = parse(
            r#"{
            "items": [{"label": "a", "width": 2, "height": 3, "quantity": 4}],
            "materials": [
                {"name": "oak", "width": 100, "height": 50, "availableCount": 2},
                {"name": "pine", "width": 80, "height": 40},
                {"label": "", "width": 60, "height": 30, "quantity": 5}
            ],
            "width": 0, "height": 0,
            "strategy": "shelf",
            "allowRotation": false
        }"#,
        );
        let instance = import(&Importer::default(), &req).unwrap();
        let m = &instance.materials;
        assert_eq!((m[0].name.as_str(), m[0].stock), ("oak", Availability::Limited(2)));
        assert_eq!((m[1].name.as_str(), m[1].stock), ("pine", Availability::Unlimited));
        assert_eq!((m[2].name.as_str(), m[2].stock), ("60x30", Availability::Unlimited));
        assert_eq!(instance.strategy, Some(PackingStrategy::GuillotineBottomLeft));
        assert!(!instance.allow_rotation);
        assert_eq!(instance.items[0].1, 4);
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let req = parse(r#"{"items": [], "width": 10, "height": 10, "strategy": "skyline"}"#);
        assert_eq!(
            import(&Importer::default(), &req).unwrap_err(),
            CutError::UnknownStrategy("skyline".into())
        );
    }

    #[test]
    fn blank_strategy_means_default() {
        let req = parse(r#"{"items": [], "width": 10, "height": 10, "strategy": "  "}"#);
        assert_eq!(import(&Importer::default(), &req).unwrap().strategy, None);
    }

    #[test]
    fn rotation_default_comes_from_importer() {
        let req = parse(r#"{"items": [], "width": 10, "height": 10}"#);
        let importer = Importer {
            allow_rotation: false,
        };
        assert!(!import(&importer, &req).unwrap().allow_rotation);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let req = parse(
            r#"{"items": [{"label": "a", "width": 2, "height": 3, "quantity": 0}], "width": 10, "height": 10}"#,
        );
        assert!(matches!(
            import(&Importer::default(), &req),
            Err(CutError::InvalidInput(_))
        ));
    }
}
