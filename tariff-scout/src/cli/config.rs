use clap::Parser;
use tariff_scout::{
    AnalysisConfig,
    DurationFloor,
    config::DEFAULT_REFERENCE_NAME,
    quantities::rate::KilowattHourRate,
};

#[derive(Parser)]
pub struct ConfigArgs {
    /// Flat rate of the currently contracted tariff, per kilowatt-hour.
    #[clap(long = "reference-tariff", env = "REFERENCE_TARIFF")]
    reference_rate: KilowattHourRate,

    #[clap(
        long = "reference-tariff-name",
        env = "REFERENCE_TARIFF_NAME",
        default_value = DEFAULT_REFERENCE_NAME,
    )]
    reference_name: String,

    /// Multiplier converting the raw meter readings into watts.
    #[clap(long = "scaling-factor", env = "DATA_SCALING_FACTOR", default_value = "1")]
    scaling_factor: f64,

    #[clap(long, env = "DURATION_FLOOR", value_enum, default_value = "one-hour")]
    duration_floor: DurationFloor,
}

impl ConfigArgs {
    pub fn to_config(&self) -> AnalysisConfig {
        AnalysisConfig::builder()
            .reference_name(self.reference_name.as_str())
            .reference_rate(self.reference_rate)
            .scaling_factor(self.scaling_factor)
            .duration_floor(self.duration_floor)
            .build()
    }
}
