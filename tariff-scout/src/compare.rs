//! Multi-tariff cost comparison.

use tariff_scout_quantities::{cost::Cost, power::Kilowatts, time::Hours};
use tracing::{info, instrument};

use crate::{
    config::AnalysisConfig,
    error::{Error, Result},
    integrate::Integration,
    normalize::normalize_pair,
    series::RawSeries,
    tariff::{BestAlternative, CostResult, TariffSet},
};

/// Calculate the total consumption cost under the reference and every candidate tariff.
///
/// The reference cost is the integrated energy times the flat reference rate.
/// Candidate costs are summed per sample, at the rate in force at the sample timestamp.
#[instrument(skip_all, fields(n_samples = consumption.len(), n_tariffs = tariffs.len()))]
pub fn calculate_costs(
    consumption: &RawSeries<Kilowatts>,
    tariffs: &TariffSet,
    config: &AnalysisConfig,
) -> Result<CostResult> {
    config.validate()?;

    let power = consumption.to_naive().scaled(config.scaling_factor);
    let reference_energy = Integration::measured(power.samples(), config.duration_floor)?.energy();
    let mut costs = CostResult::new(&config.reference_name)
        .with(&config.reference_name, reference_energy * config.reference_rate);

    for (name, rates) in tariffs.iter() {
        if name == config.reference_name {
            return Err(Error::Configuration(format!(
                "tariff `{name}` clashes with the reference tariff",
            )));
        }
        let (power, rates) = normalize_pair(consumption, rates)?;
        let power = power.scaled(config.scaling_factor);
        let cost: Cost = power
            .iter()
            .map(|(timestamp, power)| {
                rates.value_at(*timestamp).map(|rate| *power * Hours::ONE * rate)
            })
            .sum::<Option<Cost>>()
            .ok_or(Error::InsufficientData("no rates to price the consumption"))?;
        costs.insert(name, cost);
    }

    info!(n_costs = costs.len(), %reference_energy, "calculated");
    Ok(costs)
}

/// Pick the cheapest non-reference tariff, the first inserted one wins a tie.
#[must_use]
pub fn find_best_alternative(costs: &CostResult) -> BestAlternative {
    let Some(reference_cost) = costs.reference_cost() else {
        return BestAlternative::NONE;
    };
    let Some((provider, best_cost)) = costs.alternatives().min_by_key(|(_, cost)| *cost) else {
        return BestAlternative::NONE;
    };
    let savings: Cost = reference_cost - best_cost;
    let best = BestAlternative {
        provider: Some(provider.to_owned()),
        savings,
        savings_percent: savings.percent_of(reference_cost),
    };
    info!(provider, %savings, savings_percent = best.savings_percent, "found the best alternative");
    best
}
