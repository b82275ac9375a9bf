use crate::geometry::geo_traits::{AlmostCollidesWith, AlmostEncloses, CollidesWith, Encloses};
use crate::util::FPA;
use anyhow::Result;
use anyhow::ensure;
use serde::{Deserialize, Serialize};

/// Half-open interval `[start, end)` on a line, e.g. the stretch of a bar occupied by one cut.
#[derive(Clone, Debug, PartialEq, Copy, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn try_new(start: f64, end: f64) -> Result<Self> {
        ensure!(start < end, "invalid interval, start: {start}, end: {end}");
        Ok(Interval { start, end })
    }

    pub fn from_offset(start: f64, length: f64) -> Result<Self> {
        Interval::try_new(start, start + length)
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

impl CollidesWith<Interval> for Interval {
    #[inline(always)]
    fn collides_with(&self, other: &Interval) -> bool {
        f64::max(self.start, other.start) < f64::min(self.end, other.end)
    }
}

impl AlmostCollidesWith<Interval> for Interval {
    #[inline(always)]
    fn almost_collides_with(&self, other: &Interval) -> bool {
        FPA(f64::max(self.start, other.start)) < FPA(f64::min(self.end, other.end))
    }
}

impl Encloses<Interval> for Interval {
    #[inline(always)]
    fn encloses(&self, other: &Interval) -> bool {
        self.start <= other.start && self.end >= other.end
    }
}

impl AlmostEncloses<Interval> for Interval {
    #[inline(always)]
    fn almost_encloses(&self, other: &Interval) -> bool {
        FPA(self.start) <= FPA(other.start) && FPA(self.end) >= FPA(other.end)
    }
}
