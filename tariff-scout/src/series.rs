mod stats;
mod timestamp;

use std::ops::{Add, Div, Mul, RangeInclusive};

use chrono::{NaiveDateTime, TimeDelta};
use itertools::Itertools;
use tariff_scout_quantities::Quantity;

pub use self::{stats::Stats, timestamp::Timestamp};
use crate::{
    error::{Error, Result},
    window::AnalysisWindow,
};

pub type Sample<T, V> = (T, V);

/// Series as supplied by a data source, timestamps may carry an offset.
pub type RawSeries<V> = TimeSeries<Timestamp, V>;

/// Series in the common timezone-naive basis.
pub type NaiveSeries<V> = TimeSeries<NaiveDateTime, V>;

/// Chronologically ordered samples with finite values.
///
/// The samples are not required to be evenly spaced.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeSeries<T, V>(pub(crate) Vec<Sample<T, V>>);

impl<T, V> Default for TimeSeries<T, V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

pub trait Chronological: Copy {
    fn is_before(&self, other: &Self) -> bool;
}

impl Chronological for NaiveDateTime {
    fn is_before(&self, other: &Self) -> bool {
        self < other
    }
}

pub trait FiniteValue: Copy {
    fn is_finite(self) -> bool;
}

impl FiniteValue for f64 {
    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }
}

impl<const POWER: isize, const TIME: isize, const COST: isize> FiniteValue
    for Quantity<POWER, TIME, COST>
{
    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }
}

impl<T: Chronological, V: FiniteValue> TimeSeries<T, V> {
    pub fn try_from_samples(samples: Vec<Sample<T, V>>) -> Result<Self> {
        if let Some(index) = samples.iter().position(|(_, value)| !value.is_finite()) {
            return Err(Error::NonFiniteValue { index });
        }
        if let Some((index, _)) = samples
            .iter()
            .tuple_windows()
            .enumerate()
            .find(|(_, ((previous, _), (next, _)))| next.is_before(previous))
        {
            return Err(Error::UnorderedSeries { index: index + 1 });
        }
        Ok(Self(samples))
    }
}

impl<T, V> TimeSeries<T, V> {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample<T, V>] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample<T, V>> + Clone {
        self.0.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Sample<T, V>> {
        self.0.last()
    }

    /// The latest sample alone, or nothing for an empty series.
    #[must_use]
    pub fn latest(&self) -> &[Sample<T, V>] {
        &self.0[self.0.len().saturating_sub(1)..]
    }

    /// Multiply every value by the factor, for example to convert raw meter units into watts.
    pub fn scaled(&self, factor: f64) -> Self
    where
        T: Copy,
        V: Copy + Mul<f64, Output = V>,
    {
        Self(self.0.iter().map(|(timestamp, value)| (*timestamp, *value * factor)).collect())
    }
}

impl<V> NaiveSeries<V> {
    /// Closed range between the first and the last sample.
    #[must_use]
    pub fn span(&self) -> Option<RangeInclusive<NaiveDateTime>> {
        Some(self.0.first()?.0..=self.0.last()?.0)
    }

    /// Samples inside the half-open window.
    #[must_use]
    pub fn within(&self, window: &AnalysisWindow) -> &[Sample<NaiveDateTime, V>] {
        let start = self.0.partition_point(|(timestamp, _)| *timestamp < window.start());
        let end = self.0.partition_point(|(timestamp, _)| *timestamp < window.end());
        &self.0[start..end]
    }

    /// Samples within `(until - lookback, until]`.
    #[must_use]
    pub fn preceding(
        &self,
        until: NaiveDateTime,
        lookback: TimeDelta,
    ) -> &[Sample<NaiveDateTime, V>] {
        let since = until - lookback;
        let start = self.0.partition_point(|(timestamp, _)| *timestamp <= since);
        let end = self.0.partition_point(|(timestamp, _)| *timestamp <= until);
        &self.0[start..end.max(start)]
    }

    /// Value in force at the timestamp: the latest one at or before it, or the earliest one.
    #[must_use]
    pub fn value_at(&self, timestamp: NaiveDateTime) -> Option<V>
    where
        V: Copy,
    {
        let index = self.0.partition_point(|(sample_timestamp, _)| *sample_timestamp <= timestamp);
        self.0.get(index.saturating_sub(1)).map(|(_, value)| *value)
    }
}

impl<T, V> IntoIterator for TimeSeries<T, V> {
    type Item = Sample<T, V>;
    type IntoIter = std::vec::IntoIter<Sample<T, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Median of the values, averaging the two middle ones for an even count.
pub fn median<V>(values: impl IntoIterator<Item = V>) -> Option<V>
where
    V: Copy + Ord + Add<Output = V> + Div<f64, Output = V>,
{
    let mut values = values.into_iter().collect_vec();
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    let index = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[index])
    } else {
        Some((values[index - 1] + values[index]) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;
    use tariff_scout_quantities::power::Kilowatts;

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 11).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn series(samples: &[(u32, u32, f64)]) -> NaiveSeries<Kilowatts> {
        TimeSeries::try_from_samples(
            samples
                .iter()
                .map(|(hour, minute, watts)| (at(*hour, *minute), Kilowatts::from_watts(*watts)))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_unordered_series() {
        let result = TimeSeries::try_from_samples(vec![
            (at(10, 0), Kilowatts::from(1.0)),
            (at(9, 0), Kilowatts::from(1.0)),
        ]);
        assert!(matches!(result, Err(Error::UnorderedSeries { index: 1 })));
    }

    #[test]
    fn test_equal_timestamps_are_allowed() {
        let series = series(&[(10, 0, 100.0), (10, 0, 200.0)]);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_non_finite_value() {
        let result = TimeSeries::try_from_samples(vec![
            (at(9, 0), Kilowatts::from(1.0)),
            (at(10, 0), Kilowatts::from(f64::NAN)),
        ]);
        assert!(matches!(result, Err(Error::NonFiniteValue { index: 1 })));
    }

    #[test]
    fn test_within() {
        let series = series(&[(9, 0, 1.0), (10, 0, 2.0), (11, 0, 3.0), (12, 0, 4.0)]);
        let window = AnalysisWindow::try_new("test", at(10, 0), at(12, 0)).unwrap();
        let samples = series.within(&window);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].0, at(10, 0));
        assert_eq!(samples[1].0, at(11, 0));
    }

    #[test]
    fn test_preceding() {
        let series = series(&[(9, 0, 1.0), (9, 45, 2.0), (9, 50, 3.0), (10, 0, 4.0)]);
        let samples = series.preceding(at(10, 0), TimeDelta::minutes(15));
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].0, at(9, 50));
    }

    #[test]
    fn test_preceding_ignores_later_samples() {
        let series = series(&[(9, 0, 1.0), (9, 50, 2.0), (10, 0, 3.0), (11, 0, 4.0)]);
        let samples = series.preceding(at(10, 0), TimeDelta::minutes(15));
        assert_eq!(samples.iter().map(|(timestamp, _)| *timestamp).collect_vec(), [
            at(9, 50),
            at(10, 0)
        ]);
    }

    #[test]
    fn test_preceding_empty() {
        let series = series(&[(7, 0, 1.0), (11, 0, 4.0)]);
        assert!(series.preceding(at(10, 0), TimeDelta::minutes(15)).is_empty());
    }

    #[test]
    fn test_value_at() {
        let series = series(&[(9, 0, 100.0), (10, 0, 200.0)]);
        assert_eq!(series.value_at(at(8, 0)), Some(Kilowatts::from_watts(100.0)));
        assert_eq!(series.value_at(at(9, 59)), Some(Kilowatts::from_watts(100.0)));
        assert_eq!(series.value_at(at(10, 0)), Some(Kilowatts::from_watts(200.0)));
        assert_eq!(series.value_at(at(23, 0)), Some(Kilowatts::from_watts(200.0)));
        assert_eq!(NaiveSeries::<Kilowatts>::default().value_at(at(9, 0)), None);
    }

    #[test]
    fn test_latest() {
        let series = series(&[(9, 0, 1.0), (10, 0, 4.0)]);
        assert_eq!(series.latest(), &[(at(10, 0), Kilowatts::from_watts(4.0))]);
        assert!(NaiveSeries::<Kilowatts>::default().latest().is_empty());
    }

    #[test]
    fn test_span() {
        let series = series(&[(9, 0, 1.0), (11, 0, 3.0)]);
        assert_eq!(series.span(), Some(at(9, 0)..=at(11, 0)));
        assert_eq!(NaiveSeries::<Kilowatts>::default().span(), None);
    }

    #[test]
    fn test_scaled() {
        let series = series(&[(9, 0, 1.0)]).scaled(1000.0);
        assert_abs_diff_eq!(series.samples()[0].1.to_watts(), 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_median_odd() {
        let median = median([1, 0, 2].map(Kilowatts::from)).unwrap();
        assert_eq!(median, Kilowatts::from(1));
    }

    #[test]
    fn test_median_even() {
        let median = median([1, 0, 2, 3].map(Kilowatts::from)).unwrap();
        assert_eq!(median, Kilowatts::from(1.5));
    }
}
