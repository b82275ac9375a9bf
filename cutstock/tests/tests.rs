#[cfg(test)]
mod tests {
    use std::time::Instant;

    use cutstock::CutError;
    use cutstock::entities::{Availability, UnplacedReason};
    use cutstock::geometry::geo_enums::Orientation;
    use cutstock::io::import::Importer;
    use cutstock::probs::bar;
    use cutstock::probs::bar::entities::{BarPlacement, BarProblem, BarSource, BarTarget};
    use cutstock::probs::bar::io::ext_repr::ExtBarRequest;
    use cutstock::probs::plane;
    use cutstock::probs::plane::entities::{
        LayoutTarget, PackingStrategy, PlacedPiece, PlanePlacement, PlaneProblem,
    };
    use cutstock::probs::plane::io::ext_repr::ExtPlaneRequest;
    use test_case::test_case;

    fn bar_request(json: &str) -> bar::entities::BarInstance {
        let ext: ExtBarRequest = serde_json::from_str(json).unwrap();
        bar::io::import(&ext).unwrap()
    }

    fn plane_request(json: &str) -> plane::entities::PlaneInstance {
        let ext: ExtPlaneRequest = serde_json::from_str(json).unwrap();
        plane::io::import(&Importer::default(), &ext).unwrap()
    }

    #[test]
    fn hand_made_bar_solution_exports() {
        let instance = bar_request(
            r#"{"items": [5, 5, 3], "materials": [10], "newMaterialLength": 10, "loss": 0}"#,
        );
        let mut problem = BarProblem::new(instance.clone());
        let stock = BarTarget::New(BarSource::Stock { stock_id: 0 });
        let first = problem.place_item(BarPlacement { target: stock, item_id: 0 });
        problem.place_item(BarPlacement { target: BarTarget::Open(first), item_id: 0 });
        problem.place_item(BarPlacement {
            target: BarTarget::New(BarSource::NewMaterial),
            item_id: 1,
        });

        let ext = bar::io::export(&instance, &problem.save(), Instant::now()).unwrap();
        assert_eq!(ext.plans.len(), 2);
        assert_eq!(ext.plans[0].cuts, vec![5.0, 5.0]);
        assert_eq!(ext.plans[0].remaining, 0.0);
        assert_eq!(ext.plans[1].index, 1);
        assert_eq!(ext.plans[1].remaining, 7.0);
        assert_eq!(ext.summary.new_material_bars, 1);
        assert_eq!(ext.summary.stock_bars[0].used, 1);
        assert_eq!(ext.summary.placed, 3);
        assert!((ext.summary.utilization - 13.0 / 20.0).abs() < 1e-12);
    }

    #[test]
    fn bar_solution_missing_items_is_not_exported() {
        let instance = bar_request(r#"{"items": [5, 3], "newMaterialLength": 10}"#);
        let mut problem = BarProblem::new(instance.clone());
        problem.place_item(BarPlacement {
            target: BarTarget::New(BarSource::NewMaterial),
            item_id: 0,
        });
        let err = bar::io::export(&instance, &problem.save(), Instant::now()).unwrap_err();
        assert!(matches!(err, CutError::InvariantViolation(_)));
        assert!(!err.is_validation());
    }

    #[test]
    fn over_capacity_bar_is_not_exported() {
        let instance = bar_request(r#"{"items": [6, 6], "newMaterialLength": 10}"#);
        let mut solution = BarProblem::new(instance.clone()).save();
        let mut bar = bar::entities::Bar::new(BarSource::NewMaterial, 10.0);
        for _ in 0..2 {
            bar.cuts.push(bar::entities::PlacedCut { item_id: 0, length: 6.0 });
        }
        solution.bars.push(bar);
        assert!(matches!(
            bar::io::export(&instance, &solution, Instant::now()),
            Err(CutError::InvariantViolation(_))
        ));
    }

    #[test]
    fn unplaced_bar_items_are_reported() {
        let instance = bar_request(r#"{"items": [12], "newMaterialLength": 10}"#);
        let mut problem = BarProblem::new(instance.clone());
        problem.register_unplaced(0, UnplacedReason::Infeasible);
        let ext = bar::io::export(&instance, &problem.save(), Instant::now()).unwrap();
        assert!(ext.plans.is_empty());
        assert_eq!(ext.unplaced.len(), 1);
        assert_eq!(ext.unplaced[0].reason, UnplacedReason::Infeasible);
        assert_eq!(ext.summary.utilization, 0.0);
    }

    #[test]
    fn hand_made_plane_solution_exports() {
        let instance = plane_request(
            r#"{"items": [{"label": "a", "width": 4, "height": 2, "quantity": 2}],
                "materials": [{"name": "oak", "width": 4, "height": 6, "availableCount": 1}]}"#,
        );
        let mut problem = PlaneProblem::new(instance.clone());
        let bin = problem.place_item(PlanePlacement {
            target: LayoutTarget::Closed { material_id: 0 },
            item_id: 0,
            x: 0.0,
            y: 0.0,
            orientation: Orientation::Original,
        });
        problem.place_item(PlanePlacement {
            target: LayoutTarget::Open(bin),
            item_id: 0,
            x: 0.0,
            y: 2.0,
            orientation: Orientation::Original,
        });
        assert_eq!(problem.materials_in_stock().count(), 0);

        let ext = plane::io::export(
            &instance,
            &problem.save(),
            PackingStrategy::default(),
            Instant::now(),
        )
        .unwrap();
        assert_eq!(ext.bins.len(), 1);
        assert_eq!(ext.bins[0].material_type, "oak");
        assert!((ext.bins[0].utilization - 16.0 / 24.0).abs() < 1e-12);
        assert_eq!(ext.summary.material_usage[0].used, 1);
        assert_eq!(ext.summary.material_usage[0].available, 1);
        assert_eq!(ext.summary.strategy, "maxrects");
    }

    #[test_case(0.0, 1.0, Orientation::Original; "overlapping pieces")]
    #[test_case(3.0, 0.0, Orientation::Original; "piece outside the sheet")]
    #[test_case(0.0, 2.0, Orientation::Rotated; "rotation while disabled")]
    #[test_case(-1.0, 2.0, Orientation::Original; "negative position")]
    #[test_case(2.0 + 1e-12, 2.0, Orientation::Original; "piece outside the sheet by rounding noise")]
    fn invalid_plane_solutions_are_not_exported(x: f64, y: f64, orientation: Orientation) {
        let instance = plane_request(
            r#"{"items": [{"label": "a", "width": 4, "height": 2, "quantity": 2}],
                "width": 6, "height": 6, "allowRotation": false}"#,
        );
        let mut solution = PlaneProblem::new(instance.clone()).save();
        let mut layout = plane::entities::Layout::new(0, 6.0, 6.0);
        layout.pieces.push(PlacedPiece {
            item_id: 0,
            x: 0.0,
            y: 0.0,
            w: 4.0,
            h: 2.0,
            orientation: Orientation::Original,
        });
        let (w, h) = orientation.apply(4.0, 2.0);
        layout.pieces.push(PlacedPiece {
            item_id: 0,
            x,
            y,
            w,
            h,
            orientation,
        });
        solution.layouts.push(layout);

        assert!(matches!(
            plane::io::export(&instance, &solution, PackingStrategy::default(), Instant::now()),
            Err(CutError::InvariantViolation(_))
        ));
    }

    #[test]
    fn exhausted_material_is_not_exported() {
        let instance = plane_request(
            r#"{"items": [{"label": "a", "width": 4, "height": 4, "quantity": 2}],
                "materials": [{"name": "oak", "width": 5, "height": 5, "availableCount": 1}]}"#,
        );
        assert_eq!(instance.materials[0].stock, Availability::Limited(1));
        let mut solution = PlaneProblem::new(instance.clone()).save();
        for _ in 0..2 {
            let mut layout = plane::entities::Layout::new(0, 5.0, 5.0);
            layout.pieces.push(PlacedPiece {
                item_id: 0,
                x: 0.0,
                y: 0.0,
                w: 4.0,
                h: 4.0,
                orientation: Orientation::Original,
            });
            solution.layouts.push(layout);
        }
        assert!(matches!(
            plane::io::export(&instance, &solution, PackingStrategy::default(), Instant::now()),
            Err(CutError::InvariantViolation(_))
        ));
    }

    #[test]
    fn wire_payload_uses_camel_case() {
        let instance = plane_request(
            r#"{"items": [{"label": "a", "width": 1, "height": 1}], "width": 2, "height": 2}"#,
        );
        let mut problem = PlaneProblem::new(instance.clone());
        problem.place_item(PlanePlacement {
            target: LayoutTarget::Closed { material_id: 0 },
            item_id: 0,
            x: 0.0,
            y: 0.0,
            orientation: Orientation::Original,
        });
        let ext = plane::io::export(
            &instance,
            &problem.save(),
            PackingStrategy::GuillotineBottomLeft,
            Instant::now(),
        )
        .unwrap();
        let json = serde_json::to_value(&ext.bins).unwrap();
        assert_eq!(json[0]["binId"], 0);
        assert_eq!(json[0]["materialType"], "default");
        assert_eq!(json[0]["materialWidth"], 2.0);
        assert_eq!(json[0]["pieces"][0]["rotated"], false);
    }
}
