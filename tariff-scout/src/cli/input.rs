use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, de::DeserializeOwned};
use tariff_scout::{
    quantities::{power::Kilowatts, rate::KilowattHourRate},
    series::{FiniteValue, RawSeries, TimeSeries, Timestamp},
};

use crate::prelude::*;

#[derive(Deserialize)]
struct Record<V> {
    timestamp: Timestamp,
    value: V,
}

/// Read raw meter readings, the scaling factor is applied later by the analysis itself.
pub fn read_power(path: &Path) -> Result<RawSeries<Kilowatts>> {
    let samples = read_series::<f64>(path)?
        .into_iter()
        .map(|(timestamp, watts)| (timestamp, Kilowatts::from_watts(watts)))
        .collect();
    Ok(TimeSeries::try_from_samples(samples)?)
}

pub fn read_rates(path: &Path) -> Result<RawSeries<KilowattHourRate>> {
    read_series(path)
}

#[instrument(skip_all, fields(path = %path.display()))]
fn read_series<V: DeserializeOwned + FiniteValue>(path: &Path) -> Result<RawSeries<V>> {
    let file =
        File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
    let records: Vec<Record<V>> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse `{}`", path.display()))?;
    let series = TimeSeries::try_from_samples(
        records.into_iter().map(|record| (record.timestamp, record.value)).collect(),
    )
    .with_context(|| format!("malformed series in `{}`", path.display()))?;
    info!(len = series.len(), "loaded");
    Ok(series)
}
