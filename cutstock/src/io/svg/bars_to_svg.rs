use crate::error::Result;
use crate::geometry::Rect;
use crate::io::svg::svg_util;
use crate::io::svg::svg_util::SvgDrawOptions;
use crate::probs::bar::entities::{Bar, BarInstance, BarSource};
use crate::probs::bar::util::assertions::cut_intervals;
use svg::Document;
use svg::node::element::{Group, Text, Title};

/// Relative height of a drawn bar compared to the longest bar
const BAR_THICKNESS: f64 = 0.04;

/// Draws all bars of a solution stacked on top of each other, cuts in cutting order from the left.
pub fn bars_to_svg(
    bars: &[Bar],
    instance: &BarInstance,
    options: SvgDrawOptions,
    title: &str,
) -> Result<Document> {
    let max_length = bars
        .iter()
        .map(|b| b.total_length)
        .fold(instance.max_bar_length(), f64::max);
    let thickness = BAR_THICKNESS * max_length;
    let spacing = 0.5 * thickness;
    let font_size = 0.6 * thickness;

    let theme = &options.theme;
    let stroke_width = thickness * 0.01 * theme.stroke_width_multiplier;

    let mut doc_group = Group::new().set("id", "bars");
    for (index, bar) in bars.iter().enumerate() {
        let y_min = index as f64 * (thickness + spacing);
        let bar_rect = Rect {
            x_min: 0.0,
            y_min,
            x_max: bar.total_length,
            y_max: y_min + thickness,
        };
        let source = match bar.source {
            BarSource::Stock { stock_id } => format!("stock {stock_id}"),
            BarSource::NewMaterial => "new material".to_string(),
        };

        let mut bar_group = Group::new()
            .set("id", format!("bar_{index}"))
            .add(svg_util::data_to_path(
                svg_util::aa_rect_data(bar_rect),
                &[
                    ("fill", &*format!("{}", theme.sheet_fill)),
                    ("stroke", "black"),
                    ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
                ],
            ))
            .add(Title::new(format!(
                "bar {index}, {source}, length: {:.3}, used: {:.3}, remaining: {:.3}",
                bar.total_length,
                bar.used(),
                bar.remaining(instance.loss)
            )));

        for (cut, interval) in bar.cuts.iter().zip(cut_intervals(bar, instance.loss)?) {
            let cut_rect = Rect {
                x_min: interval.start,
                y_min,
                x_max: interval.end,
                y_max: y_min + thickness,
            };
            bar_group = bar_group.add(svg_util::data_to_path(
                svg_util::aa_rect_data(cut_rect),
                &[
                    ("fill", &*format!("{}", theme.piece_fill)),
                    ("stroke", &*format!("{}", theme.kerf_fill)),
                    ("stroke-width", &*format!("{stroke_width}")),
                ],
            ));
            if instance.loss > 0.0 {
                let kerf_rect = Rect {
                    x_min: interval.end,
                    y_min,
                    x_max: f64::min(interval.end + instance.loss, bar.total_length),
                    y_max: y_min + thickness,
                };
                bar_group = bar_group.add(svg_util::data_to_path(
                    svg_util::aa_rect_data(kerf_rect),
                    &[("fill", &*format!("{}", theme.kerf_fill))],
                ));
            }
            if options.labels {
                let label = match &instance.item(cut.item_id).label {
                    Some(label) => format!("{label} ({})", cut.length),
                    None => format!("{}", cut.length),
                };
                bar_group = bar_group.add(svg_util::centered_text(label, cut_rect));
            }
        }

        let waste_start = bar.used() + bar.kerf(instance.loss);
        if options.highlight_waste && waste_start < bar.total_length {
            let waste_rect = Rect {
                x_min: waste_start,
                y_min,
                x_max: bar.total_length,
                y_max: y_min + thickness,
            };
            bar_group = bar_group.add(svg_util::data_to_path(
                svg_util::aa_rect_data(waste_rect),
                &[
                    ("fill", &*format!("{}", theme.waste_fill)),
                    ("fill-opacity", "0.3"),
                ],
            ));
        }
        doc_group = doc_group.add(bar_group);
    }

    let height = bars.len() as f64 * (thickness + spacing);
    let label = Text::new(format!("{} bars | {}", bars.len(), title))
        .set("x", 0.0)
        .set("y", -0.5 * font_size)
        .set("font-size", font_size)
        .set("font-family", "monospace")
        .set("font-weight", "500");

    Ok(Document::new()
        .set(
            "viewBox",
            (
                -spacing,
                -2.0 * font_size,
                max_length + 2.0 * spacing,
                height + 2.0 * font_size,
            ),
        )
        .add(doc_group)
        .add(label))
}
