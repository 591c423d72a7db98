use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use clap::Parser;
use tariff_scout::{
    aggregate::{by_hour_of_day, by_month, by_windows, summarize},
    quantities::power::Kilowatts,
    series::RawSeries,
    window::CalendarPeriods,
};

use crate::{
    cli::{config::ConfigArgs, input::read_power},
    prelude::*,
    tables::{build_buckets_table, build_summary_table},
};

#[derive(Parser)]
pub struct ConsumptionArgs {
    #[clap(flatten)]
    pub config: ConfigArgs,

    /// JSON file with the consumption readings.
    #[clap(long = "consumption", env = "CONSUMPTION_FILE")]
    pub consumption_path: PathBuf,
}

impl ConsumptionArgs {
    pub fn read_consumption(&self) -> Result<RawSeries<Kilowatts>> {
        read_power(&self.consumption_path)
    }
}

#[derive(Parser)]
pub struct PeriodsArgs {
    #[clap(flatten)]
    pub consumption: ConsumptionArgs,

    /// Moment the periods are relative to, defaults to the current local time.
    #[clap(long)]
    pub now: Option<NaiveDateTime>,
}

#[instrument(skip_all)]
pub fn summary(args: &ConsumptionArgs) -> Result {
    let summary = summarize(&args.read_consumption()?, &args.config.to_config())?;
    println!("{}", build_summary_table(&summary));
    Ok(())
}

#[instrument(skip_all)]
pub fn monthly(args: &ConsumptionArgs) -> Result {
    let buckets = by_month(&args.read_consumption()?, &args.config.to_config())?;
    ensure!(!buckets.is_empty(), "no monthly data");
    println!("{}", build_buckets_table("Month", buckets));
    Ok(())
}

#[instrument(skip_all)]
pub fn hourly(args: &ConsumptionArgs) -> Result {
    let buckets = by_hour_of_day(&args.read_consumption()?, &args.config.to_config())?;
    ensure!(!buckets.is_empty(), "no hourly data");
    println!(
        "{}",
        build_buckets_table(
            "Hour",
            buckets.into_iter().map(|(hour, record)| (format!("{hour:02}:00"), record)),
        ),
    );
    Ok(())
}

#[instrument(skip_all)]
pub fn periods(args: &PeriodsArgs) -> Result {
    let now = args.now.unwrap_or_else(|| Local::now().naive_local());
    let windows = CalendarPeriods::at(now);
    let buckets = by_windows(
        &args.consumption.read_consumption()?,
        &windows,
        &args.consumption.config.to_config(),
    )?;
    if buckets.is_empty() {
        warn!(%now, "no data within any of the periods");
    }
    println!("{}", build_buckets_table("Period", buckets));
    Ok(())
}
