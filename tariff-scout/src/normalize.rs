//! Reconciliation of independently sourced series into the common timezone-naive basis.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::{
    error::{Error, Result},
    series::{NaiveSeries, RawSeries, TimeSeries},
};

impl<V: Copy> RawSeries<V> {
    /// Drop the offsets while keeping the wall-clock readings.
    ///
    /// Offset changes (like the autumn DST switch) may repeat wall-clock readings,
    /// such samples are put back into order with a stable sort.
    pub fn to_naive(&self) -> NaiveSeries<V> {
        let mut samples: Vec<(NaiveDateTime, V)> =
            self.iter().map(|(timestamp, value)| (timestamp.naive_local(), *value)).collect();
        if !samples.is_sorted_by_key(|(timestamp, _)| *timestamp) {
            debug!(len = samples.len(), "re-ordering repeated wall-clock readings");
            samples.sort_by_key(|(timestamp, _)| *timestamp);
        }
        TimeSeries(samples)
    }
}

/// Normalize both series and make sure they overlap in time.
pub fn normalize_pair<L: Copy, R: Copy>(
    lhs: &RawSeries<L>,
    rhs: &RawSeries<R>,
) -> Result<(NaiveSeries<L>, NaiveSeries<R>)> {
    let lhs = lhs.to_naive();
    let rhs = rhs.to_naive();
    let lhs_span = lhs.span().ok_or(Error::InsufficientData("the first series is empty"))?;
    let rhs_span = rhs.span().ok_or(Error::InsufficientData("the second series is empty"))?;
    if lhs_span.start() <= rhs_span.end() && rhs_span.start() <= lhs_span.end() {
        Ok((lhs, rhs))
    } else {
        Err(Error::Alignment { lhs: lhs_span, rhs: rhs_span })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, TimeDelta, TimeZone};
    use tariff_scout_quantities::{power::Kilowatts, rate::KilowattHourRate};

    use super::*;
    use crate::series::Timestamp;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn naive_power(hours: impl IntoIterator<Item = u32>) -> RawSeries<Kilowatts> {
        TimeSeries::try_from_samples(
            hours.into_iter().map(|hour| (Timestamp::from(at(hour)), Kilowatts::from(0.5))).collect(),
        )
        .unwrap()
    }

    fn berlin_rates(hours: impl IntoIterator<Item = u32>) -> RawSeries<KilowattHourRate> {
        let offset = FixedOffset::east_opt(3600).unwrap();
        TimeSeries::try_from_samples(
            hours
                .into_iter()
                .map(|hour| {
                    let timestamp = offset.from_local_datetime(&at(hour)).unwrap();
                    (Timestamp::from(timestamp), KilowattHourRate::from(0.25))
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_naive_pair_is_unchanged() {
        let lhs = naive_power(0..24);
        let rhs = naive_power(6..12);
        let (normalized_lhs, normalized_rhs) = normalize_pair(&lhs, &rhs).unwrap();
        assert_eq!(
            normalized_lhs.samples(),
            lhs.iter().map(|(t, v)| (t.naive_local(), *v)).collect::<Vec<_>>().as_slice(),
        );
        assert_eq!(normalized_rhs.len(), rhs.len());
        assert_eq!(normalized_rhs.span(), Some(at(6)..=at(11)));
    }

    #[test]
    fn test_mixed_awareness_keeps_wall_clock() {
        let (consumption, rates) = normalize_pair(&naive_power(0..3), &berlin_rates(0..3)).unwrap();
        assert_eq!(consumption.span(), rates.span());
        assert_eq!(rates.samples()[0].0, at(0));
    }

    #[test]
    fn test_no_overlap() {
        let result = normalize_pair(&naive_power(0..3), &berlin_rates(5..8));
        assert!(matches!(result, Err(Error::Alignment { .. })));
    }

    #[test]
    fn test_touching_spans_overlap() {
        assert!(normalize_pair(&naive_power(0..4), &berlin_rates(3..8)).is_ok());
    }

    #[test]
    fn test_empty_series() {
        let result = normalize_pair(&naive_power([]), &berlin_rates(0..3));
        assert!(matches!(result, Err(Error::InsufficientData(_))));
    }

    #[test]
    fn test_repeated_wall_clock_is_reordered() {
        // 02:30 at +02:00 followed by 02:10 at +01:00 is the autumn switch.
        let summer = FixedOffset::east_opt(7200).unwrap();
        let winter = FixedOffset::east_opt(3600).unwrap();
        let first = summer.from_local_datetime(&(at(2) + TimeDelta::minutes(30))).unwrap();
        let second = winter.from_local_datetime(&(at(2) + TimeDelta::minutes(10))).unwrap();
        let series = TimeSeries::try_from_samples(vec![
            (Timestamp::from(first), Kilowatts::from(1.0)),
            (Timestamp::from(second), Kilowatts::from(2.0)),
        ])
        .unwrap();
        let naive = series.to_naive();
        assert_eq!(naive.samples()[0], (at(2) + TimeDelta::minutes(10), Kilowatts::from(2.0)));
    }
}
