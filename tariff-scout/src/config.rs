use bon::Builder;
use serde::{Deserialize, Serialize};
use tariff_scout_quantities::rate::KilowattHourRate;

use crate::error::{Error, Result};

pub const DEFAULT_REFERENCE_NAME: &str = "Current tariff";

/// Explicit analysis parameters, passed into every entry point.
#[must_use]
#[derive(Clone, Debug, Builder, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Cost map key of the currently contracted tariff.
    #[builder(into, default = DEFAULT_REFERENCE_NAME.to_owned())]
    pub reference_name: String,

    /// Flat rate of the currently contracted tariff.
    pub reference_rate: KilowattHourRate,

    /// Raw meter value multiplier: `1.0` for watts, `1000.0` for kilowatts.
    #[builder(default = 1.0)]
    pub scaling_factor: f64,

    #[builder(default)]
    pub duration_floor: DurationFloor,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result {
        if self.reference_name.trim().is_empty() {
            return Err(Error::Configuration("the reference tariff name is empty".to_owned()));
        }
        if !self.reference_rate.is_finite() || self.reference_rate < KilowattHourRate::ZERO {
            return Err(Error::Configuration(format!(
                "invalid reference rate: {}",
                self.reference_rate,
            )));
        }
        if !self.scaling_factor.is_finite() || self.scaling_factor <= 0.0 {
            return Err(Error::Configuration(format!(
                "invalid scaling factor: {}",
                self.scaling_factor,
            )));
        }
        Ok(())
    }
}

/// Lower bound of the measured duration when integrating a window.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DurationFloor {
    /// Never integrate over less than an hour.
    #[default]
    OneHour,

    /// Never integrate over less than the median sampling interval.
    SamplingInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::builder().reference_rate(0.30.into()).build();
        assert_eq!(config.reference_name, DEFAULT_REFERENCE_NAME);
        assert_eq!(config.duration_floor, DurationFloor::OneHour);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_rate() {
        let config = AnalysisConfig::builder().reference_rate((-0.1).into()).build();
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_zero_scaling_factor() {
        let config =
            AnalysisConfig::builder().reference_rate(0.30.into()).scaling_factor(0.0).build();
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }
}
