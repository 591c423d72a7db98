use std::fmt::{Debug, Display, Formatter};

use chrono::TimeDelta;
use ordered_float::OrderedFloat;

use crate::Quantity;

pub type Hours = Quantity<0, 1, 0>;

impl Hours {
    pub const ONE: Self = Self(OrderedFloat(1.0));
    pub const QUARTER: Self = Self(OrderedFloat(0.25));
}

impl From<TimeDelta> for Hours {
    fn from(time_delta: TimeDelta) -> Self {
        Self(OrderedFloat(time_delta.as_seconds_f64() / 3600.0))
    }
}

impl Display for Hours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} h", self.0)
    }
}

impl Debug for Hours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}h", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_from_time_delta() {
        assert_abs_diff_eq!(Hours::from(TimeDelta::minutes(90)).0.0, 1.5);
        assert_eq!(Hours::from(TimeDelta::minutes(15)), Hours::QUARTER);
    }
}
