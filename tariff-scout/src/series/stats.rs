use average::Mean;
use itertools::{Itertools, MinMaxResult};
use tariff_scout_quantities::Quantity;

/// Mean, maximum, and minimum of a set of values.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Stats<V> {
    pub mean: V,
    pub max: V,
    pub min: V,
}

impl<const POWER: isize, const TIME: isize, const COST: isize> Stats<Quantity<POWER, TIME, COST>> {
    /// Calculate the statistics, or return [`None`] when there are no values.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Quantity<POWER, TIME, COST>>,
        I::IntoIter: Clone,
    {
        let values = values.into_iter();
        let estimate: Mean = values.clone().map(|value| value.0.0).collect();
        let (min, max) = match values.minmax() {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(value) => (value, value),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        Some(Self { mean: estimate.mean().into(), max, min })
    }
}
