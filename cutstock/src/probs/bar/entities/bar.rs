use serde::{Deserialize, Serialize};

/// Where a consumed bar came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BarSource {
    /// One of the stock types of the instance
    Stock { stock_id: usize },
    /// The unlimited pool of new material
    NewMaterial,
}

/// A single piece cut from a [`Bar`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedCut {
    pub item_id: usize,
    pub length: f64,
}

/// A consumed bar and the cuts made from it, in the order they were placed.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub source: BarSource,
    pub total_length: f64,
    pub cuts: Vec<PlacedCut>,
}

impl Bar {
    pub fn new(source: BarSource, total_length: f64) -> Self {
        Self {
            source,
            total_length,
            cuts: vec![],
        }
    }

    /// Sum of the lengths of all cuts
    pub fn used(&self) -> f64 {
        self.cuts.iter().map(|c| c.length).sum()
    }

    /// Material lost to kerf, one `loss` per cut
    pub fn kerf(&self, loss: f64) -> f64 {
        loss * self.cuts.len() as f64
    }

    /// Length consumed by cuts and their kerf
    pub fn consumed(&self, loss: f64) -> f64 {
        self.used() + self.kerf(loss)
    }

    /// Length still available for further cuts, never negative for a bar built through [`Bar::fits`]
    pub fn remaining(&self, loss: f64) -> f64 {
        self.total_length - self.consumed(loss)
    }

    /// Whether a piece of `length` (plus its kerf) can still be cut from this bar.
    /// The comparison is exact and evaluated in the same order as [`Bar::consumed`] after the cut.
    pub fn fits(&self, length: f64, loss: f64) -> bool {
        let used = self.used() + length;
        let kerf = loss * (self.cuts.len() + 1) as f64;
        used + kerf <= self.total_length
    }

    pub fn utilization(&self) -> f64 {
        self.used() / self.total_length
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar_with(total_length: f64, lengths: &[f64]) -> Bar {
        let mut bar = Bar::new(BarSource::NewMaterial, total_length);
        bar.cuts = lengths
            .iter()
            .map(|&length| PlacedCut { item_id: 0, length })
            .collect();
        bar
    }

    #[test]
    fn rounding_noise_does_not_fit() {
        //0.4 + 0.2 + 0.1 sums to 0.7000000000000001
        let bar = bar_with(0.7, &[0.4, 0.2]);
        assert!(!bar.fits(0.1, 0.0));
        assert!(bar.fits(0.09, 0.0));
    }

    #[test]
    fn accepted_cuts_never_overdraw() {
        let loss = 0.1;
        let mut bar = Bar::new(BarSource::NewMaterial, 2.3);
        for length in [0.7, 0.3, 0.3, 0.2, 0.2, 0.1, 0.1, 0.1] {
            if bar.fits(length, loss) {
                bar.cuts.push(PlacedCut { item_id: 0, length });
            }
            assert!(bar.used() + bar.kerf(loss) <= bar.total_length);
            assert!(bar.remaining(loss) >= 0.0);
        }
        assert!(!bar.is_empty());
    }
}
