use crate::opt::free_space::{Fit, FitScore, FreeSpace, SheetSelection, non_degenerate};
use cutstock::geometry::Rect;

/// Guillotine free space: disjoint free rectangles, each placement splits its free rectangle
/// with one straight cut along the shorter leftover side. Pieces go to the lowest, then leftmost position.
#[derive(Clone, Debug)]
pub struct Guillotine {
    free: Vec<Rect>,
}

impl FreeSpace for Guillotine {
    const SELECTION: SheetSelection = SheetSelection::FirstFit;

    fn new(sheet: Rect) -> Self {
        Self { free: vec![sheet] }
    }

    fn find_fit(&self, w: f64, h: f64) -> Option<Fit> {
        self.free
            .iter()
            .enumerate()
            .filter(|(_, fr)| fr.fits_in_corner(w, h))
            .map(|(rect_idx, fr)| Fit {
                rect_idx,
                x: fr.x_min,
                y: fr.y_min,
                score: FitScore::new(fr.y_min, fr.x_min),
            })
            .min_by_key(|fit| (fit.score, fit.rect_idx))
    }

    fn occupy(&mut self, fit: &Fit, w: f64, h: f64) {
        let fr = self.free.remove(fit.rect_idx);
        let (x_cut, y_cut) = (fit.x + w, fit.y + h);

        let (right, top) = match fr.x_max - x_cut < fr.y_max - y_cut {
            //horizontal cut: the strip to the right only spans the piece's height
            true => (
                non_degenerate(x_cut, fr.y_min, fr.x_max, y_cut),
                non_degenerate(fr.x_min, y_cut, fr.x_max, fr.y_max),
            ),
            //vertical cut: the strip above only spans the piece's width
            false => (
                non_degenerate(x_cut, fr.y_min, fr.x_max, fr.y_max),
                non_degenerate(fr.x_min, y_cut, x_cut, fr.y_max),
            ),
        };
        self.free.extend(right);
        self.free.extend(top);
    }

    fn free_rects(&self) -> &[Rect] {
        &self.free
    }
}
