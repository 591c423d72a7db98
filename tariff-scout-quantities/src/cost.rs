use std::fmt::{Debug, Display, Formatter};

use crate::Quantity;

pub type Cost = Quantity<0, 0, 1>;

impl Cost {
    /// Relative share of `self` in `total` in percent, or zero for a non-positive total.
    #[must_use]
    pub fn percent_of(self, total: Self) -> f64 {
        if total > Self::ZERO { (self / total).0 * 100.0 } else { 0.0 }
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} €", self.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}€", self.0)
    }
}
