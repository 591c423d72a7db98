//! Snapshot of the household energy flow across the metered sources.

use bon::Builder;
use tariff_scout_quantities::power::Kilowatts;
use tracing::{info, instrument};

use crate::{
    config::AnalysisConfig,
    error::Result,
    series::{RawSeries, Stats},
};

/// Power series of the metered sources, any of which may be unavailable.
#[must_use]
#[derive(Builder)]
pub struct MeterReadings<'a> {
    pub house: Option<&'a RawSeries<Kilowatts>>,
    pub solar: Option<&'a RawSeries<Kilowatts>>,
    pub battery: Option<&'a RawSeries<Kilowatts>>,
    pub grid: Option<&'a RawSeries<Kilowatts>>,
}

impl<'a> MeterReadings<'a> {
    /// Series to run the tariff analysis on: the grid import if metered, otherwise the house load.
    #[must_use]
    pub fn consumption(&self) -> Option<&'a RawSeries<Kilowatts>> {
        [self.grid, self.house].into_iter().flatten().find(|series| !series.is_empty())
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SourceSummary {
    pub latest: Kilowatts,
    pub average: Kilowatts,
    pub n_samples: usize,
}

impl SourceSummary {
    fn from_series(series: &RawSeries<Kilowatts>, scaling_factor: f64) -> Option<Self> {
        let series = series.scaled(scaling_factor);
        let (_, latest) = series.last()?;
        let stats = Stats::from_values(series.iter().map(|(_, power)| *power))?;
        Some(Self { latest: *latest, average: stats.mean, n_samples: series.len() })
    }
}

#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct EnergyFlow {
    pub house: Option<SourceSummary>,
    pub solar: Option<SourceSummary>,
    pub battery: Option<SourceSummary>,
    pub grid: Option<SourceSummary>,

    /// Share of the solar production consumed on site, when there is any production.
    pub self_consumption: Option<f64>,
}

impl EnergyFlow {
    #[instrument(skip_all)]
    pub fn summarize(readings: &MeterReadings<'_>, config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let summarize = |series: Option<&RawSeries<Kilowatts>>| {
            series.and_then(|series| SourceSummary::from_series(series, config.scaling_factor))
        };
        let house = summarize(readings.house);
        let solar = summarize(readings.solar);
        let grid = summarize(readings.grid);
        let self_consumption = match (house, solar, grid) {
            (Some(house), Some(solar), Some(grid)) if solar.average > Kilowatts::ZERO => {
                Some(((house.average - grid.average) / solar.average).0.max(0.0))
            }
            _ => None,
        };
        let flow = Self { house, solar, battery: summarize(readings.battery), grid, self_consumption };
        info!(self_consumption = ?flow.self_consumption, "summarized the energy flow");
        Ok(flow)
    }
}
