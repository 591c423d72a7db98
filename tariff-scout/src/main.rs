mod cli;
mod prelude;
mod tables;

use clap::{Parser, crate_version};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use crate::{
    cli::{Args, Command, compare, flow, hourly, monthly, periods, realtime, summary},
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_env_filter(
            EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy(),
        )
        .init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();

    match args.command {
        Command::Summary(args) => summary(&args)?,
        Command::Compare(args) => compare(&args)?,
        Command::Monthly(args) => monthly(&args)?,
        Command::Hourly(args) => hourly(&args)?,
        Command::Periods(args) => periods(&args)?,
        Command::Realtime(args) => realtime(&args)?,
        Command::Flow(args) => flow(&args)?,
    }

    info!("done!");
    Ok(())
}
