use crate::geometry::Rect;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use svg::node::element::path::Data;
use svg::node::element::{Path, Text};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgLayoutTheme,
    ///Print the label of every piece (or cut) on top of it
    #[serde(default)]
    pub labels: bool,
    ///Hatch the unused part of bars
    #[serde(default)]
    pub highlight_waste: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgLayoutTheme::default(),
            labels: true,
            highlight_waste: true,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgLayoutTheme {
    pub stroke_width_multiplier: f64,
    pub sheet_fill: Color,
    pub piece_fill: Color,
    pub rotated_piece_fill: Color,
    pub kerf_fill: Color,
    pub waste_fill: Color,
}

impl Default for SvgLayoutTheme {
    fn default() -> Self {
        SvgLayoutTheme::EARTH_TONES
    }
}

impl SvgLayoutTheme {
    pub const EARTH_TONES: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.0,
        sheet_fill: Color(0xCC, 0x82, 0x4A),
        piece_fill: Color(0xFF, 0xC8, 0x79),
        rotated_piece_fill: Color(0xFF, 0xA5, 0x00),
        kerf_fill: Color(0x2D, 0x2D, 0x2D),
        waste_fill: Color(0xFF, 0x00, 0x00),
    };

    pub const GRAY: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.5,
        sheet_fill: Color(0xD3, 0xD3, 0xD3),
        piece_fill: Color(0x7A, 0x7A, 0x7A),
        rotated_piece_fill: Color(0x63, 0x63, 0x63),
        kerf_fill: Color(0x00, 0x00, 0x00),
        waste_fill: Color(0xD0, 0x00, 0x00),
    };
}

pub fn change_brightness(color: Color, fraction: f32) -> Color {
    let Color(r, g, b) = color;

    let r = (r as f32 * fraction) as u8;
    let g = (g as f32 * fraction) as u8;
    let b = (b as f32 * fraction) as u8;
    Color(r, g, b)
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Color(u8, u8, u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .ok_or_else(|| format!("invalid color: {s:?}"))
        };
        match hex.len() {
            6 => Ok(Color(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            _ => Err(format!("invalid color: {s:?}")),
        }
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{self}"))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as Deserializer<'de>>::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

pub fn aa_rect_data(rect: Rect) -> Data {
    Data::new()
        .move_to((rect.x_min, rect.y_min))
        .line_to((rect.x_max, rect.y_min))
        .line_to((rect.x_max, rect.y_max))
        .line_to((rect.x_min, rect.y_max))
        .close()
}

/// Text centered in `rect`, scaled down to fit its smaller side
pub fn centered_text(content: String, rect: Rect) -> Text {
    let font_size = f64::min(rect.width(), rect.height()) * 0.3;
    Text::new(content)
        .set("x", (rect.x_min + rect.x_max) / 2.0)
        .set("y", (rect.y_min + rect.y_max) / 2.0)
        .set("font-size", font_size)
        .set("font-family", "monospace")
        .set("text-anchor", "middle")
        .set("dominant-baseline", "middle")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex_round_trip() {
        let c: Color = "#CC824A".parse().unwrap();
        assert_eq!(c, SvgLayoutTheme::EARTH_TONES.sheet_fill);
        assert_eq!(c.to_string(), "#CC824A");
        assert!("#CC82".parse::<Color>().is_err());
        assert!("zzzzzz".parse::<Color>().is_err());
    }

    #[test]
    fn draw_options_deserialize_with_defaults() {
        let options: SvgDrawOptions = serde_json::from_str(r#"{"labels": false}"#).unwrap();
        assert!(!options.labels);
        assert_eq!(options.theme, SvgLayoutTheme::EARTH_TONES);
    }
}
