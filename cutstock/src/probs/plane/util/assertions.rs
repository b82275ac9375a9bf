//! Checks on the plane packing problem.
//! The `bool` functions are used in `debug_assert!()` blocks, [`validate_solution`] runs on every export.

use crate::ensure_invariant;
use crate::error::Result;
use crate::geometry::geo_traits::{CollidesWith, Encloses};
use crate::probs::plane::entities::{
    Layout, Material, PlaneInstance, PlaneItem, PlaneProblem, PlaneSolution,
};

pub fn instance_item_material_ids_correct(
    items: &[(PlaneItem, usize)],
    materials: &[Material],
) -> bool {
    items.iter().enumerate().all(|(i, (item, _))| item.id == i)
        && materials.iter().enumerate().all(|(i, m)| m.id == i)
}

pub fn problem_matches_solution(problem: &PlaneProblem, sol: &PlaneSolution) -> bool {
    assert_eq!(problem.layouts, sol.layouts);
    assert_eq!(problem.unplaced, sol.unplaced);
    assert_eq!(problem.density(), sol.density());
    true
}

/// Whether no two pieces of the layout overlap (shared edges allowed).
pub fn layout_is_collision_free(layout: &Layout) -> bool {
    layout.pieces.iter().enumerate().all(|(i, p1)| {
        layout.pieces[i + 1..]
            .iter()
            .all(|p2| !p1.rect().collides_with(&p2.rect()))
    })
}

/// Re-checks every invariant a plane packing solution has to satisfy before it is handed out.
pub fn validate_solution(instance: &PlaneInstance, sol: &PlaneSolution) -> Result<()> {
    let mut placed_qtys = vec![0; instance.items.len()];
    let mut material_used_qtys = vec![0; instance.materials.len()];

    for (bin_id, layout) in sol.layouts.iter().enumerate() {
        ensure_invariant!(
            layout.material_id < instance.materials.len(),
            "bin {bin_id} refers to unknown material {}",
            layout.material_id
        );
        let material = instance.material(layout.material_id);
        ensure_invariant!(
            layout.width == material.width && layout.height == material.height,
            "bin {bin_id} is {} x {} while material {:?} is {} x {}",
            layout.width,
            layout.height,
            material.name,
            material.width,
            material.height
        );
        ensure_invariant!(!layout.is_empty(), "bin {bin_id} was opened without any piece");
        material_used_qtys[layout.material_id] += 1;

        let bbox = layout.bbox();
        for (i, piece) in layout.pieces.iter().enumerate() {
            ensure_invariant!(
                piece.item_id < instance.items.len(),
                "bin {bin_id} contains unknown item {}",
                piece.item_id
            );
            let item = instance.item(piece.item_id);
            let (w, h) = piece.orientation.apply(item.width, item.height);
            ensure_invariant!(
                piece.w == w && piece.h == h,
                "piece {i} in bin {bin_id} is {} x {}, item {:?} as {:?} is {w} x {h}",
                piece.w,
                piece.h,
                item.label,
                piece.orientation
            );
            ensure_invariant!(
                instance.allow_rotation || !piece.orientation.is_rotated(),
                "piece {i} in bin {bin_id} is rotated while rotation is disabled"
            );
            ensure_invariant!(
                piece.x >= 0.0 && piece.y >= 0.0,
                "piece {i} in bin {bin_id} has a negative position ({}, {})",
                piece.x,
                piece.y
            );
            ensure_invariant!(
                bbox.encloses(&piece.rect()),
                "piece {i} in bin {bin_id} lies outside the sheet: {:?}",
                piece.rect()
            );
            for (j, other) in layout.pieces.iter().enumerate().skip(i + 1) {
                ensure_invariant!(
                    !piece.rect().collides_with(&other.rect()),
                    "pieces {i} and {j} in bin {bin_id} overlap: {:?} and {:?}",
                    piece.rect(),
                    other.rect()
                );
            }
            placed_qtys[piece.item_id] += 1;
        }
    }

    for (material, used) in instance.materials.iter().zip(material_used_qtys.iter()) {
        ensure_invariant!(
            material.stock.permits(*used),
            "material {:?} used {used} times, only {} available",
            material.name,
            material.stock.as_count()
        );
    }

    let mut unplaced_qtys = vec![0; instance.items.len()];
    for u in &sol.unplaced {
        ensure_invariant!(
            u.item_id < instance.items.len(),
            "unknown unplaced item {}",
            u.item_id
        );
        unplaced_qtys[u.item_id] += 1;
    }
    for (id, (item, qty)) in instance.items.iter().enumerate() {
        ensure_invariant!(
            placed_qtys[id] + unplaced_qtys[id] == *qty,
            "item {:?} demanded {qty} times, but {} placed and {} unplaced",
            item.label,
            placed_qtys[id],
            unplaced_qtys[id]
        );
    }

    Ok(())
}
