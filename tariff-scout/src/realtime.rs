//! Rolling short-horizon comparison against a single candidate tariff.

use chrono::{NaiveDateTime, TimeDelta};
use tariff_scout_quantities::{
    cost::Cost,
    energy::KilowattHours,
    power::Kilowatts,
    rate::KilowattHourRate,
    time::Hours,
};
use tracing::{debug, info, instrument};

use crate::{
    config::AnalysisConfig,
    error::{Error, Evaluation, Result},
    integrate::Integration,
    series::{NaiveSeries, RawSeries, Sample, Stats},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum Horizon {
    /// The latest sample, costed as if it lasted for an hour.
    #[display("now")]
    Instant,

    #[display("15 min")]
    QuarterHour,

    #[display("1 h")]
    Hour,
}

impl Horizon {
    /// Samples within this long before the latest consumption sample, the instant takes none.
    fn lookback(self) -> Option<TimeDelta> {
        match self {
            Self::Instant => None,
            Self::QuarterHour => Some(TimeDelta::minutes(15)),
            Self::Hour => Some(TimeDelta::hours(1)),
        }
    }

    const fn duration(self) -> Hours {
        match self {
            Self::Instant | Self::Hour => Hours::ONE,
            Self::QuarterHour => Hours::QUARTER,
        }
    }

    /// Rates published within the horizon, or the one in force at its end when there are none.
    fn rates(
        self,
        rates: &NaiveSeries<KilowattHourRate>,
        until: NaiveDateTime,
    ) -> Vec<KilowattHourRate> {
        let published = self.lookback().map_or(&[][..], |lookback| rates.preceding(until, lookback));
        if published.is_empty() {
            rates.value_at(until).into_iter().collect()
        } else {
            published.iter().map(|(_, rate)| *rate).collect()
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct HorizonReport {
    pub horizon: Horizon,
    pub consumption: Stats<Kilowatts>,
    pub energy: KilowattHours,
    pub rates: Stats<KilowattHourRate>,
    pub reference_cost: Cost,
    pub candidate_cost: Cost,

    /// Negative when the candidate is more expensive.
    pub savings: Cost,

    pub savings_percent: f64,
    pub n_power_samples: usize,
    pub n_rate_samples: usize,
}

#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum Recommendation {
    #[display("switch")]
    Switch,

    #[display("stay")]
    Stay,
}

#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct RealtimeReport {
    pub instant: HorizonReport,
    pub quarter_hour: HorizonReport,
    pub hour: HorizonReport,

    /// Derived from the instant horizon, a tie means staying.
    pub recommendation: Recommendation,
}

impl RealtimeReport {
    pub const fn horizons(&self) -> [&HorizonReport; 3] {
        [&self.instant, &self.quarter_hour, &self.hour]
    }
}

/// Compare the reference tariff with the candidate over the latest data.
///
/// Missing consumption or rates yield [`Evaluation::NoData`] rather than a verdict.
#[instrument(skip_all, fields(n_power_samples = consumption.len(), n_rate_samples = rates.len()))]
pub fn evaluate(
    consumption: &RawSeries<Kilowatts>,
    rates: &RawSeries<KilowattHourRate>,
    config: &AnalysisConfig,
) -> Evaluation<RealtimeReport> {
    let evaluation = Evaluation::from(try_evaluate(consumption, rates, config));
    match &evaluation {
        Evaluation::Evaluated(report) => {
            info!(
                recommendation = %report.recommendation,
                savings = %report.instant.savings,
                "evaluated",
            );
        }
        Evaluation::NoData => info!("no data to evaluate"),
        Evaluation::Failed(error) => info!("failed to evaluate: {error:#}"),
    }
    evaluation
}

fn try_evaluate(
    consumption: &RawSeries<Kilowatts>,
    rates: &RawSeries<KilowattHourRate>,
    config: &AnalysisConfig,
) -> Result<RealtimeReport> {
    config.validate()?;
    let power = consumption.to_naive().scaled(config.scaling_factor);
    let rates = rates.to_naive();

    let until = power
        .latest()
        .first()
        .map(|(timestamp, _)| *timestamp)
        .ok_or(Error::InsufficientData("no consumption"))?;

    let instant = evaluate_horizon(Horizon::Instant, &power, &rates, until, config)?;
    let quarter_hour = evaluate_horizon(Horizon::QuarterHour, &power, &rates, until, config)?;
    let hour = evaluate_horizon(Horizon::Hour, &power, &rates, until, config)?;
    let recommendation = if instant.savings > Cost::ZERO {
        Recommendation::Switch
    } else {
        Recommendation::Stay
    };
    Ok(RealtimeReport { instant, quarter_hour, hour, recommendation })
}

/// Evaluate the horizon ending at the latest consumption sample.
///
/// Each power sample is priced at the candidate rate in force at its own timestamp.
fn evaluate_horizon(
    horizon: Horizon,
    power: &NaiveSeries<Kilowatts>,
    rates: &NaiveSeries<KilowattHourRate>,
    until: NaiveDateTime,
    config: &AnalysisConfig,
) -> Result<HorizonReport> {
    let power_samples: &[Sample<NaiveDateTime, Kilowatts>] = match horizon.lookback() {
        None => power.latest(),
        Some(lookback) => power.preceding(until, lookback),
    };
    let horizon_rates = horizon.rates(rates, until);
    debug!(%horizon, n_power_samples = power_samples.len(), n_rate_samples = horizon_rates.len());

    let integration = Integration::nominal(power_samples, horizon.duration())?;
    let rate_stats = Stats::from_values(horizon_rates.iter().copied())
        .ok_or(Error::InsufficientData("no rates in force"))?;
    let priced_costs = power_samples
        .iter()
        .map(|(timestamp, power)| {
            rates.value_at(*timestamp).map(|rate| *power * horizon.duration() * rate)
        })
        .collect::<Option<Vec<Cost>>>()
        .ok_or(Error::InsufficientData("no rates to price the consumption"))?;
    let candidate_cost = Stats::from_values(priced_costs)
        .ok_or(Error::InsufficientData("no consumption in the window"))?
        .mean;

    let energy = integration.energy();
    let reference_cost = energy * config.reference_rate;
    let savings = reference_cost - candidate_cost;
    Ok(HorizonReport {
        horizon,
        consumption: integration.power,
        energy,
        rates: rate_stats,
        reference_cost,
        candidate_cost,
        savings,
        savings_percent: savings.percent_of(reference_cost),
        n_power_samples: integration.n_samples,
        n_rate_samples: horizon_rates.len(),
    })
}
