use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use tariff_scout::{
    calculate_costs,
    find_best_alternative,
    quantities::cost::Cost,
    tariff::TariffSet,
};

use crate::{
    cli::{analyze::ConsumptionArgs, input::read_rates},
    prelude::*,
    tables::build_costs_table,
};

#[derive(Parser)]
pub struct CompareArgs {
    #[clap(flatten)]
    pub consumption: ConsumptionArgs,

    /// Alternative tariff as `NAME=PATH` to a JSON file with its rates, may be repeated.
    #[clap(long = "tariff", value_name = "NAME=PATH", required = true)]
    pub tariffs: Vec<TariffSource>,
}

#[derive(Clone)]
pub struct TariffSource {
    name: String,
    path: PathBuf,
}

impl FromStr for TariffSource {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self> {
        let (name, path) = source.split_once('=').context("expected `NAME=PATH`")?;
        ensure!(!name.trim().is_empty(), "the tariff name is empty");
        Ok(Self { name: name.trim().to_owned(), path: path.into() })
    }
}

#[instrument(skip_all)]
pub fn compare(args: &CompareArgs) -> Result {
    let consumption = args.consumption.read_consumption()?;
    let mut tariffs = TariffSet::default();
    for source in &args.tariffs {
        tariffs.try_insert(&source.name, read_rates(&source.path)?)?;
    }
    let costs = calculate_costs(&consumption, &tariffs, &args.consumption.config.to_config())?;
    let best = find_best_alternative(&costs);
    println!("{}", build_costs_table(&costs, &best));
    match &best.provider {
        Some(provider) if best.savings > Cost::ZERO => {
            info!(provider, savings = %best.savings, "the alternative is cheaper");
        }
        Some(provider) => info!(provider, "the current tariff is the cheapest"),
        None => warn!("no alternatives to compare with"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tariff_source() {
        let source: TariffSource = "Tibber=data/tibber.json".parse().unwrap();
        assert_eq!(source.name, "Tibber");
        assert_eq!(source.path, PathBuf::from("data/tibber.json"));
    }

    #[test]
    fn test_parse_tariff_source_without_path() {
        assert!("Tibber".parse::<TariffSource>().is_err());
        assert!("=tibber.json".parse::<TariffSource>().is_err());
    }
}
