use std::path::PathBuf;

use clap::Parser;
use tariff_scout::{Evaluation, realtime::evaluate};

use crate::{
    cli::{analyze::ConsumptionArgs, input::read_rates},
    prelude::*,
    tables::build_realtime_table,
};

#[derive(Parser)]
pub struct RealtimeArgs {
    #[clap(flatten)]
    pub consumption: ConsumptionArgs,

    /// JSON file with the latest rates of the candidate tariff.
    #[clap(long = "rates", env = "CANDIDATE_RATES_FILE")]
    pub rates_path: PathBuf,
}

#[instrument(skip_all)]
pub fn realtime(args: &RealtimeArgs) -> Result {
    let consumption = args.consumption.read_consumption()?;
    let rates = read_rates(&args.rates_path)?;
    match evaluate(&consumption, &rates, &args.consumption.config.to_config()) {
        Evaluation::Evaluated(report) => {
            println!("{}", build_realtime_table(&report));
            println!("Recommendation: {}", report.recommendation);
        }
        Evaluation::NoData => {
            warn!("not enough recent data to recommend anything");
        }
        Evaluation::Failed(error) => {
            return Err(error).context("failed to evaluate the candidate tariff");
        }
    }
    Ok(())
}
