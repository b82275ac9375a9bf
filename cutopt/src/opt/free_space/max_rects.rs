use std::marker::PhantomData;

use crate::opt::free_space::{Fit, FitScore, FreeSpace, SheetSelection, maximal_remainders};
use cutstock::geometry::Rect;
use cutstock::geometry::geo_traits::{CollidesWith, Encloses};
use itertools::Itertools;

/// Scores a `w` x `h` placement in the bottom-left corner of a free rectangle.
pub trait FitHeuristic: Clone + Copy + Send + Sync {
    fn score(free: &Rect, w: f64, h: f64) -> FitScore;
}

/// Least leftover area, ties broken by the shortest leftover side
#[derive(Clone, Copy, Debug, Default)]
pub struct BestAreaFit;

impl FitHeuristic for BestAreaFit {
    fn score(free: &Rect, w: f64, h: f64) -> FitScore {
        let leftover_area = free.area() - w * h;
        let short_side = f64::min(free.width() - w, free.height() - h);
        FitScore::new(leftover_area, short_side)
    }
}

/// Shortest leftover side, ties broken by the longest leftover side
#[derive(Clone, Copy, Debug, Default)]
pub struct BestShortSideFit;

impl FitHeuristic for BestShortSideFit {
    fn score(free: &Rect, w: f64, h: f64) -> FitScore {
        let (dw, dh) = (free.width() - w, free.height() - h);
        FitScore::new(f64::min(dw, dh), f64::max(dw, dh))
    }
}

/// Maximal rectangles: the free space is the set of all maximal free rectangles,
/// which may overlap each other.
#[derive(Clone, Debug)]
pub struct MaxRects<H: FitHeuristic> {
    free: Vec<Rect>,
    heuristic: PhantomData<H>,
}

impl<H: FitHeuristic> FreeSpace for MaxRects<H> {
    const SELECTION: SheetSelection = SheetSelection::GlobalBest;

    fn new(sheet: Rect) -> Self {
        Self {
            free: vec![sheet],
            heuristic: PhantomData,
        }
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
                score: H::score(fr, w, h),
            })
            .min_by_key(|fit| (fit.score, fit.rect_idx))
    }

    fn occupy(&mut self, fit: &Fit, w: f64, h: f64) {
        let placed = Rect {
            x_min: fit.x,
            y_min: fit.y,
            x_max: fit.x + w,
            y_max: fit.y + h,
        };

        //every free rectangle overlapping the placed piece is replaced by its remainders
        let mut free = Vec::with_capacity(self.free.len() + 4);
        for fr in self.free.drain(..) {
            match fr.collides_with(&placed) {
                true => free.extend(maximal_remainders(&fr, &placed)),
                false => free.push(fr),
            }
        }

        self.free = prune_enclosed(free);
    }

    fn free_rects(&self) -> &[Rect] {
        &self.free
    }
}

/// Removes every rectangle enclosed by another one. Of identical rectangles, the last one is kept.
fn prune_enclosed(rects: Vec<Rect>) -> Vec<Rect> {
    let mut keep = vec![true; rects.len()];
    for i in 0..rects.len() {
        keep[i] = !(0..rects.len()).any(|j| j != i && keep[j] && rects[j].encloses(&rects[i]));
    }
    rects
        .into_iter()
        .zip(keep)
        .filter_map(|(r, k)| k.then_some(r))
        .collect_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(w: f64, h: f64) -> MaxRects<BestAreaFit> {
        MaxRects::new(Rect::from_dims(w, h).unwrap())
    }

    #[test]
    fn free_rects_stay_maximal_and_clear_of_pieces() {
        let mut fs = sheet(10.0, 10.0);
        let mut placed = vec![];
        for (w, h) in [(4.0, 3.0), (6.0, 3.0), (5.0, 5.0), (2.0, 7.0)] {
            let fit = fs.find_fit(w, h).unwrap();
            fs.occupy(&fit, w, h);
            placed.push(Rect::from_pos_dims(fit.x, fit.y, w, h).unwrap());
        }
        for fr in fs.free_rects() {
            assert!(placed.iter().all(|p| !p.collides_with(fr)));
            assert!(
                fs.free_rects()
                    .iter()
                    .filter(|other| other.encloses(fr))
                    .count()
                    == 1
            );
        }
    }

    #[test]
    fn best_area_fit_prefers_the_tightest_rect() {
        let mut fs = sheet(10.0, 10.0);
        let fit = fs.find_fit(10.0, 6.0).unwrap();
        fs.occupy(&fit, 10.0, 6.0);
        //free: [0,6]-[10,10]
        let fit = fs.find_fit(3.0, 4.0).unwrap();
        assert_eq!((fit.x, fit.y), (0.0, 6.0));
        assert_eq!(fs.find_fit(3.0, 5.0), None);
    }

    #[test]
    fn duplicates_are_pruned_to_one() {
        let r = Rect::from_dims(1.0, 1.0).unwrap();
        assert_eq!(prune_enclosed(vec![r, r, r]), vec![r]);
    }

    #[test]
    fn short_side_score() {
        let free = Rect::from_dims(10.0, 5.0).unwrap();
        assert_eq!(BestShortSideFit::score(&free, 9.0, 1.0), FitScore::new(1.0, 4.0));
        assert_eq!(BestAreaFit::score(&free, 9.0, 1.0), FitScore::new(41.0, 1.0));
    }
}
