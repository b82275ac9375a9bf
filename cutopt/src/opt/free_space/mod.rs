use cutstock::geometry::Rect;
use cutstock::util::FPA;
use ordered_float::OrderedFloat;

mod guillotine;
mod max_rects;

#[doc(inline)]
pub use guillotine::Guillotine;
#[doc(inline)]
pub use max_rects::{BestAreaFit, BestShortSideFit, FitHeuristic, MaxRects};

/// Bookkeeping of the unoccupied part of a single sheet.
pub trait FreeSpace: Clone + Send + Sync {
    /// How the optimizer chooses between the sheets a piece fits in
    const SELECTION: SheetSelection;

    /// Free space of an empty sheet
    fn new(sheet: Rect) -> Self;

    /// Best position for a `w` x `h` rectangle, if it fits anywhere
    fn find_fit(&self, w: f64, h: f64) -> Option<Fit>;

    /// Marks a `w` x `h` rectangle placed according to `fit` as occupied.
    fn occupy(&mut self, fit: &Fit, w: f64, h: f64);

    fn free_rects(&self) -> &[Rect];
}

/// How a sheet is chosen among all sheets a piece fits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetSelection {
    /// The placement with the best [`FitScore`] over all open and openable sheets
    GlobalBest,
    /// The first open sheet the piece fits in, a new sheet only if none
    FirstFit,
}

/// A position in the free space of a sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
    /// Index of the free rectangle used
    pub rect_idx: usize,
    /// Bottom-left corner of the placement
    pub x: f64,
    pub y: f64,
    pub score: FitScore,
}

/// Lexicographic score of a [`Fit`], lower is better.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FitScore(pub OrderedFloat<f64>, pub OrderedFloat<f64>);

impl FitScore {
    pub fn new(primary: f64, secondary: f64) -> Self {
        FitScore(OrderedFloat(primary), OrderedFloat(secondary))
    }
}

/// Splits `free` into the (up to four) maximal rectangles which remain after `placed` is cut out of it.
/// Slivers thinner than the comparison tolerance are dropped.
pub fn maximal_remainders(free: &Rect, placed: &Rect) -> Vec<Rect> {
    let candidates = [
        (free.x_min, free.y_min, placed.x_min, free.y_max), //left
        (placed.x_max, free.y_min, free.x_max, free.y_max), //right
        (free.x_min, free.y_min, free.x_max, placed.y_min), //below
        (free.x_min, placed.y_max, free.x_max, free.y_max), //above
    ];
    candidates
        .into_iter()
        .filter_map(|(x_min, y_min, x_max, y_max)| non_degenerate(x_min, y_min, x_max, y_max))
        .collect()
}

/// A rectangle with the given bounds, unless it is (almost) empty.
pub fn non_degenerate(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Option<Rect> {
    match FPA(x_min) < FPA(x_max) && FPA(y_min) < FPA(y_max) {
        true => Some(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        }),
        false => None,
    }
}
