use serde::{Deserialize, Serialize};

/// How many more copies of a stock bar or material sheet may be opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    Limited(usize),
    Unlimited,
}

impl Availability {
    /// Interprets a wire count, where `0` means unlimited.
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Availability::Unlimited,
            n => Availability::Limited(n),
        }
    }

    pub fn has_stock(&self) -> bool {
        match self {
            Availability::Limited(n) => *n > 0,
            Availability::Unlimited => true,
        }
    }

    /// Takes one copy out of stock.
    pub fn take(&mut self) {
        match self {
            Availability::Limited(n) => {
                assert!(*n > 0, "no stock left to take");
                *n -= 1;
            }
            Availability::Unlimited => {}
        }
    }

    /// Whether `used` copies stay within what was originally available.
    pub fn permits(&self, used: usize) -> bool {
        match self {
            Availability::Limited(n) => used <= *n,
            Availability::Unlimited => true,
        }
    }

    /// Wire representation, `0` for unlimited.
    pub fn as_count(&self) -> usize {
        match self {
            Availability::Limited(n) => *n,
            Availability::Unlimited => 0,
        }
    }
}
