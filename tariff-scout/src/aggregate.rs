//! Calendar bucketing of the consumption history.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime, Timelike};
use itertools::Itertools;
use tariff_scout_quantities::{
    cost::Cost,
    energy::KilowattHours,
    power::Kilowatts,
    rate::KilowattHourRate,
    time::Hours,
};
use tracing::{info, instrument, warn};

use crate::{
    config::AnalysisConfig,
    error::{Error, Result},
    integrate::Integration,
    series::{NaiveSeries, RawSeries, Sample, Stats},
    window::AnalysisWindow,
};

/// Energy and cost statistics of a single bucket, the cost is at the reference rate.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BucketRecord {
    pub total: KilowattHours,
    pub average: Kilowatts,
    pub max: Kilowatts,
    pub min: Kilowatts,
    pub cost: Cost,
    pub n_samples: usize,
}

impl BucketRecord {
    fn from_integration(integration: &Integration, rate: KilowattHourRate) -> Self {
        let total = integration.energy();
        Self {
            total,
            average: integration.power.mean,
            max: integration.power.max,
            min: integration.power.min,
            cost: total * rate,
            n_samples: integration.n_samples,
        }
    }
}

/// Bucket by calendar month labelled `YYYY-MM`, integrating each month on its own.
#[instrument(skip_all, fields(n_samples = consumption.len()))]
pub fn by_month(
    consumption: &RawSeries<Kilowatts>,
    config: &AnalysisConfig,
) -> Result<BTreeMap<String, BucketRecord>> {
    let power = prepare(consumption, config)?;
    let buckets: BTreeMap<_, _> = power
        .samples()
        .chunk_by(|(lhs, _), (rhs, _)| (lhs.year(), lhs.month()) == (rhs.year(), rhs.month()))
        .filter_map(|samples| {
            let (timestamp, _) = samples.first()?;
            let label = timestamp.format("%Y-%m").to_string();
            let record = integrate_bucket(&label, samples, config)?;
            Some((label, record))
        })
        .collect();
    info!(n_buckets = buckets.len(), "bucketed by month");
    Ok(buckets)
}

/// Bucket by clock hour, attributing every sample with a flat hour of energy.
#[instrument(skip_all, fields(n_samples = consumption.len()))]
pub fn by_hour_of_day(
    consumption: &RawSeries<Kilowatts>,
    config: &AnalysisConfig,
) -> Result<BTreeMap<u32, BucketRecord>> {
    let power = prepare(consumption, config)?;
    let buckets: BTreeMap<_, _> = power
        .iter()
        .into_group_map_by(|(timestamp, _)| timestamp.hour())
        .into_iter()
        .filter_map(|(hour, samples)| {
            let Some(stats) = Stats::from_values(samples.iter().map(|(_, power)| *power)) else {
                warn!(hour, "skipping an empty bucket");
                return None;
            };
            let total: KilowattHours = samples.iter().map(|(_, power)| *power * Hours::ONE).sum();
            let record = BucketRecord {
                total,
                average: stats.mean,
                max: stats.max,
                min: stats.min,
                cost: total * config.reference_rate,
                n_samples: samples.len(),
            };
            Some((hour, record))
        })
        .collect();
    info!(n_buckets = buckets.len(), "bucketed by hour of day");
    Ok(buckets)
}

/// Integrate each window separately, in the given order. Windows without samples are omitted.
#[instrument(skip_all, fields(n_samples = consumption.len(), n_windows = windows.len()))]
pub fn by_windows(
    consumption: &RawSeries<Kilowatts>,
    windows: &[AnalysisWindow],
    config: &AnalysisConfig,
) -> Result<Vec<(String, BucketRecord)>> {
    let power = prepare(consumption, config)?;
    let buckets = windows
        .iter()
        .filter_map(|window| {
            let record = integrate_bucket(window.label(), power.within(window), config)?;
            Some((window.label().to_owned(), record))
        })
        .collect_vec();
    info!(n_buckets = buckets.len(), "bucketed by windows");
    Ok(buckets)
}

/// Overview of the entire consumption history.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct ConsumptionSummary {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub n_samples: usize,
    pub total: KilowattHours,
    pub power: Stats<Kilowatts>,
    pub reference_cost: Cost,
}

#[instrument(skip_all, fields(n_samples = consumption.len()))]
pub fn summarize(
    consumption: &RawSeries<Kilowatts>,
    config: &AnalysisConfig,
) -> Result<ConsumptionSummary> {
    let power = prepare(consumption, config)?;
    let span = power.span().ok_or(Error::InsufficientData("the consumption series is empty"))?;
    let integration = Integration::measured(power.samples(), config.duration_floor)?;
    let total = integration.energy();
    let summary = ConsumptionSummary {
        start: *span.start(),
        end: *span.end(),
        n_samples: integration.n_samples,
        total,
        power: integration.power,
        reference_cost: total * config.reference_rate,
    };
    info!(total = %summary.total, reference_cost = %summary.reference_cost, "summarized");
    Ok(summary)
}

fn prepare(
    consumption: &RawSeries<Kilowatts>,
    config: &AnalysisConfig,
) -> Result<NaiveSeries<Kilowatts>> {
    config.validate()?;
    Ok(consumption.to_naive().scaled(config.scaling_factor))
}

fn integrate_bucket(
    label: &str,
    samples: &[Sample<NaiveDateTime, Kilowatts>],
    config: &AnalysisConfig,
) -> Option<BucketRecord> {
    match Integration::measured(samples, config.duration_floor) {
        Ok(integration) => Some(BucketRecord::from_integration(&integration, config.reference_rate)),
        Err(error) => {
            warn!(label, "skipping the bucket: {error:#}");
            None
        }
    }
}
