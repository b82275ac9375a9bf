use crate::geometry::geo_traits::{AlmostCollidesWith, AlmostEncloses, CollidesWith, Encloses};
use crate::util::FPA;
use anyhow::Result;
use anyhow::ensure;
use serde::{Deserialize, Serialize};

///Axis-aligned rectangle
#[derive(Clone, Debug, PartialEq, Copy, Serialize, Deserialize)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    pub fn try_new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self> {
        ensure!(
            x_min < x_max && y_min < y_max,
            "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Rectangle with its bottom-left corner at `(x, y)` and the given dimensions.
    pub fn from_pos_dims(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        Rect::try_new(x, y, x + width, y + height)
    }

    /// Rectangle with its bottom-left corner in the origin.
    pub fn from_dims(width: f64, height: f64) -> Result<Self> {
        Rect::from_pos_dims(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        (self.x_max - self.x_min) * (self.y_max - self.y_min)
    }

    /// Whether a `width` x `height` rectangle anchored at the bottom-left corner of `self` stays inside it.
    /// Exact: the far edges are computed the same way a placed piece computes them.
    pub fn fits_in_corner(&self, width: f64, height: f64) -> bool {
        self.x_min + width <= self.x_max && self.y_min + height <= self.y_max
    }
}

impl CollidesWith<Rect> for Rect {
    /// Half-open overlap test on both axes: touching edges do not count.
    #[inline(always)]
    fn collides_with(&self, other: &Rect) -> bool {
        f64::max(self.x_min, other.x_min) < f64::min(self.x_max, other.x_max)
            && f64::max(self.y_min, other.y_min) < f64::min(self.y_max, other.y_max)
    }
}

impl AlmostCollidesWith<Rect> for Rect {
    #[inline(always)]
    fn almost_collides_with(&self, other: &Rect) -> bool {
        FPA(f64::max(self.x_min, other.x_min)) < FPA(f64::min(self.x_max, other.x_max))
            && FPA(f64::max(self.y_min, other.y_min)) < FPA(f64::min(self.y_max, other.y_max))
    }
}

impl Encloses<Rect> for Rect {
    #[inline(always)]
    fn encloses(&self, other: &Rect) -> bool {
        self.x_min <= other.x_min
            && self.y_min <= other.y_min
            && self.x_max >= other.x_max
            && self.y_max >= other.y_max
    }
}

impl AlmostEncloses<Rect> for Rect {
    #[inline(always)]
    fn almost_encloses(&self, other: &Rect) -> bool {
        FPA(self.x_min) <= FPA(other.x_min)
            && FPA(self.y_min) <= FPA(other.y_min)
            && FPA(self.x_max) >= FPA(other.x_max)
            && FPA(self.y_max) >= FPA(other.y_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::from_pos_dims(x, y, w, h).unwrap()
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = rect(0.0, 0.0, 5.0, 5.0);
        let b = rect(5.0, 0.0, 5.0, 5.0);
        let c = rect(0.0, 5.0, 5.0, 5.0);
        assert!(!a.collides_with(&b));
        assert!(!a.collides_with(&c));
    }

    #[test]
    fn overlapping_rects_collide() {
        let a = rect(0.0, 0.0, 5.0, 5.0);
        let b = rect(4.0, 4.0, 5.0, 5.0);
        assert!(a.collides_with(&b));
        assert!(b.collides_with(&a));
    }

    #[test]
    fn containment_includes_shared_edges() {
        let outer = rect(0.0, 0.0, 10.0, 10.0);
        let inner = rect(0.0, 0.0, 10.0, 4.0);
        assert!(outer.encloses(&inner));
        assert!(!inner.encloses(&outer));
        assert!(outer.almost_encloses(&inner));
    }

    #[test]
    fn almost_collision_ignores_rounding_noise() {
        let a = rect(0.0, 0.0, 0.1 + 0.2, 1.0);
        let b = rect(0.3, 0.0, 1.0, 1.0);
        assert!(a.collides_with(&b));
        assert!(!a.almost_collides_with(&b));
    }

    #[test]
    fn corner_fit_is_exact() {
        //0.6000000000000001 + 0.1 overshoots 0.7 by one ulp
        let free = Rect::try_new(0.4 + 0.2, 0.0, 0.7, 1.0).unwrap();
        assert!(!free.fits_in_corner(0.1, 1.0));
        assert!(free.fits_in_corner(0.09, 1.0));
        assert!(rect(0.0, 0.0, 4.0, 3.0).fits_in_corner(4.0, 3.0));
    }

    #[test]
    fn invalid_rect_is_rejected() {
        assert!(Rect::try_new(0.0, 0.0, 0.0, 1.0).is_err());
        assert!(Rect::from_dims(-1.0, 1.0).is_err());
    }
}
