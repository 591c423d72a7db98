use std::path::{Path, PathBuf};

use clap::Parser;
use tariff_scout::{
    flow::{EnergyFlow, MeterReadings},
    quantities::power::Kilowatts,
    series::RawSeries,
};

use crate::{
    cli::{config::ConfigArgs, input::read_power},
    prelude::*,
    tables::build_flow_table,
};

#[derive(Parser)]
pub struct FlowArgs {
    #[clap(flatten)]
    pub config: ConfigArgs,

    #[clap(long = "house", env = "HOUSE_POWER_FILE")]
    pub house_path: Option<PathBuf>,

    #[clap(long = "solar", env = "SOLAR_POWER_FILE")]
    pub solar_path: Option<PathBuf>,

    #[clap(long = "battery", env = "BATTERY_POWER_FILE")]
    pub battery_path: Option<PathBuf>,

    #[clap(long = "grid", env = "GRID_POWER_FILE")]
    pub grid_path: Option<PathBuf>,
}

#[instrument(skip_all)]
pub fn flow(args: &FlowArgs) -> Result {
    let house = read_optional(args.house_path.as_deref())?;
    let solar = read_optional(args.solar_path.as_deref())?;
    let battery = read_optional(args.battery_path.as_deref())?;
    let grid = read_optional(args.grid_path.as_deref())?;
    let readings = MeterReadings::builder()
        .maybe_house(house.as_ref())
        .maybe_solar(solar.as_ref())
        .maybe_battery(battery.as_ref())
        .maybe_grid(grid.as_ref())
        .build();
    ensure!(readings.consumption().is_some(), "neither grid nor house readings are available");

    let flow = EnergyFlow::summarize(&readings, &args.config.to_config())?;
    println!("{}", build_flow_table(&flow));
    Ok(())
}

fn read_optional(path: Option<&Path>) -> Result<Option<RawSeries<Kilowatts>>> {
    path.map(read_power).transpose()
}
