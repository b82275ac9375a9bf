use crate::error::CutError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Heuristic used to pack rectangles onto sheets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackingStrategy {
    /// Maximal free rectangles, placement leaving the least free area. Best placement over all sheets.
    #[default]
    MaxRectsBestAreaFit,
    /// Maximal free rectangles, placement leaving the shortest leftover side. Best placement over all sheets.
    MaxRectsBestShortSideFit,
    /// Guillotine-split free rectangles, bottom-left placement. First sheet that fits.
    GuillotineBottomLeft,
}

impl PackingStrategy {
    pub const ALL: [PackingStrategy; 3] = [
        PackingStrategy::MaxRectsBestAreaFit,
        PackingStrategy::MaxRectsBestShortSideFit,
        PackingStrategy::GuillotineBottomLeft,
    ];

    /// Name used on the wire
    pub fn name(&self) -> &'static str {
        match self {
            PackingStrategy::MaxRectsBestAreaFit => "maxrects",
            PackingStrategy::MaxRectsBestShortSideFit => "maxrects-bssf",
            PackingStrategy::GuillotineBottomLeft => "guillotine",
        }
    }
}

impl FromStr for PackingStrategy {
    type Err = CutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "maxrects" | "maxrects-baf" | "max-rects-best-area-fit" => {
                Ok(PackingStrategy::MaxRectsBestAreaFit)
            }
            "maxrects-bssf" | "max-rects-best-short-side-fit" => {
                Ok(PackingStrategy::MaxRectsBestShortSideFit)
            }
            "guillotine" | "guillotine-bl" | "shelf" | "guillotine-bottom-left" => {
                Ok(PackingStrategy::GuillotineBottomLeft)
            }
            _ => Err(CutError::UnknownStrategy(s.to_string())),
        }
    }
}

impl Display for PackingStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for s in PackingStrategy::ALL {
            assert_eq!(s.name().parse::<PackingStrategy>(), Ok(s));
        }
        assert_eq!("Shelf".parse(), Ok(PackingStrategy::GuillotineBottomLeft));
    }

    #[test]
    fn unknown_strategy_fails_fast() {
        assert_eq!(
            "skyline".parse::<PackingStrategy>(),
            Err(CutError::UnknownStrategy("skyline".into()))
        );
    }
}
