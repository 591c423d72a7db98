mod analyze;
mod compare;
mod config;
mod flow;
mod input;
mod realtime;

use clap::{Parser, Subcommand};

pub use self::{
    analyze::{ConsumptionArgs, PeriodsArgs, hourly, monthly, periods, summary},
    compare::{CompareArgs, compare},
    flow::{FlowArgs, flow},
    realtime::{RealtimeArgs, realtime},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Summarize the entire consumption history.
    #[clap(name = "summary")]
    Summary(Box<ConsumptionArgs>),

    /// Compare the total cost under the current tariff and the alternatives.
    #[clap(name = "compare")]
    Compare(Box<CompareArgs>),

    /// Break the consumption down by calendar month.
    #[clap(name = "monthly")]
    Monthly(Box<ConsumptionArgs>),

    /// Break the consumption down by hour of day.
    #[clap(name = "hourly")]
    Hourly(Box<ConsumptionArgs>),

    /// Break the consumption down by today, this week, last month, and so on.
    #[clap(name = "periods")]
    Periods(Box<PeriodsArgs>),

    /// Decide whether the candidate tariff is cheaper right now.
    #[clap(name = "realtime")]
    Realtime(Box<RealtimeArgs>),

    /// Show the latest energy flow between the house, solar panels, battery, and grid.
    #[clap(name = "flow")]
    Flow(Box<FlowArgs>),
}
