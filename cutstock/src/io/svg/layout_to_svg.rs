use crate::geometry::Rect;
use crate::io::svg::svg_util;
use crate::io::svg::svg_util::SvgDrawOptions;
use crate::probs::plane::entities::{Layout, PlaneInstance};
use svg::Document;
use svg::node::element::{Group, Text, Title};

/// Draws a single sheet and the pieces on it.
/// Sheet coordinates have their origin at the bottom-left, the drawing is flipped accordingly.
pub fn layout_to_svg(
    layout: &Layout,
    instance: &PlaneInstance,
    options: SvgDrawOptions,
    title: &str,
) -> Document {
    let material = instance.material(layout.material_id);
    let bbox = layout.bbox();
    let vbox = {
        let margin = 0.05 * f64::max(bbox.width(), bbox.height());
        Rect {
            x_min: bbox.x_min - margin,
            y_min: bbox.y_min - 2.0 * margin,
            x_max: bbox.x_max + margin,
            y_max: bbox.y_max + margin,
        }
    };

    let theme = &options.theme;
    let stroke_width =
        f64::min(vbox.width(), vbox.height()) * 0.001 * theme.stroke_width_multiplier;

    //flip y: sheet coordinates grow upwards, svg coordinates grow downwards
    let to_svg = |r: Rect| Rect {
        x_min: r.x_min,
        y_min: bbox.y_max - r.y_max,
        x_max: r.x_max,
        y_max: bbox.y_max - r.y_min,
    };

    let label = {
        //print some information above the top left of the sheet
        let label_content = format!(
            "{} | width: {:.3} | height: {:.3} | utilization: {:.3}% | {}",
            material.name,
            bbox.width(),
            bbox.height(),
            layout.utilization() * 100.0,
            title,
        );
        let font_size = f64::min(bbox.width(), bbox.height()) * 0.025;
        Text::new(label_content)
            .set("x", bbox.x_min)
            .set("y", bbox.y_min - 0.5 * font_size)
            .set("font-size", font_size)
            .set("font-family", "monospace")
            .set("font-weight", "500")
    };

    let sheet_group = Group::new()
        .set("id", "sheet")
        .add(svg_util::data_to_path(
            svg_util::aa_rect_data(bbox),
            &[
                ("fill", &*format!("{}", theme.sheet_fill)),
                ("stroke", "black"),
                ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
            ],
        ))
        .add(Title::new(format!(
            "sheet, material: {}, width: {:.3}, height: {:.3}",
            material.name, layout.width, layout.height
        )));

    let pieces_group = {
        let mut pieces_group = Group::new().set("id", "pieces");
        for (i, piece) in layout.pieces.iter().enumerate() {
            let item = instance.item(piece.item_id);
            let rect = to_svg(piece.rect());
            let fill = match piece.orientation.is_rotated() {
                true => theme.rotated_piece_fill,
                false => theme.piece_fill,
            };
            let mut piece_group = Group::new()
                .set("id", format!("piece_{i}"))
                .add(svg_util::data_to_path(
                    svg_util::aa_rect_data(rect),
                    &[
                        ("fill", &*format!("{fill}")),
                        ("stroke-width", &*format!("{stroke_width}")),
                        ("stroke", &*format!("{}", svg_util::change_brightness(fill, 0.5))),
                        ("fill-opacity", "0.8"),
                    ],
                ))
                .add(Title::new(format!(
                    "piece {i}, item: {:?}, x: {:.3}, y: {:.3}, w: {:.3}, h: {:.3}, rotated: {}",
                    item.label,
                    piece.x,
                    piece.y,
                    piece.w,
                    piece.h,
                    piece.orientation.is_rotated()
                )));
            if options.labels && !item.label.is_empty() {
                piece_group = piece_group.add(svg_util::centered_text(item.label.clone(), rect));
            }
            pieces_group = pieces_group.add(piece_group);
        }
        pieces_group
    };

    Document::new()
        .set(
            "viewBox",
            (vbox.x_min, vbox.y_min, vbox.width(), vbox.height()),
        )
        .add(sheet_group)
        .add(pieces_group)
        .add(label)
}
