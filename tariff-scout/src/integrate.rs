use chrono::NaiveDateTime;
use itertools::Itertools;
use tariff_scout_quantities::{energy::KilowattHours, power::Kilowatts, time::Hours};

use crate::{
    config::DurationFloor,
    error::{Error, Result},
    series::{Sample, Stats, median},
};

/// Power samples integrated over a duration.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct Integration {
    pub duration: Hours,
    pub power: Stats<Kilowatts>,
    pub n_samples: usize,
}

impl Integration {
    /// Integrate over the elapsed time between the first and the last sample,
    /// adjusted according to the floor policy.
    ///
    /// A lone sample is assumed to last for an hour.
    pub fn measured(
        samples: &[Sample<NaiveDateTime, Kilowatts>],
        floor: DurationFloor,
    ) -> Result<Self> {
        let duration = match samples {
            [] | [_] => Hours::ONE,
            [(first, _), .., (last, _)] => floor.apply(Hours::from(*last - *first), samples),
        };
        Self::nominal(samples, duration)
    }

    /// Integrate over the fixed duration regardless of the actual sample span.
    pub fn nominal(samples: &[Sample<NaiveDateTime, Kilowatts>], duration: Hours) -> Result<Self> {
        let power = Stats::from_values(samples.iter().map(|(_, power)| *power))
            .ok_or(Error::InsufficientData("no power samples in the window"))?;
        Ok(Self { duration, power, n_samples: samples.len() })
    }

    pub fn energy(&self) -> KilowattHours {
        self.power.mean * self.duration
    }
}

impl DurationFloor {
    fn apply(self, elapsed: Hours, samples: &[Sample<NaiveDateTime, Kilowatts>]) -> Hours {
        match self {
            Self::OneHour => elapsed.max(Hours::ONE),
            Self::SamplingInterval => median(
                samples
                    .iter()
                    .tuple_windows()
                    .map(|((previous, _), (next, _))| Hours::from(*next - *previous))
                    .filter(|interval| *interval > Hours::ZERO),
            )
            .map_or(Hours::ONE, |interval| elapsed + interval),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{NaiveDate, TimeDelta};

    use super::*;

    fn constant(watts: f64, n_samples: i32, step: TimeDelta) -> Vec<Sample<NaiveDateTime, Kilowatts>> {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        (0..n_samples).map(|i| (start + step * i, Kilowatts::from_watts(watts))).collect()
    }

    #[test]
    fn test_constant_power() {
        for (watts, n_samples, step) in [
            (500.0, 24, TimeDelta::hours(1)),
            (1200.0, 7, TimeDelta::hours(3)),
            (80.0, 2881, TimeDelta::minutes(1)),
        ] {
            let samples = constant(watts, n_samples, step);
            let integration = Integration::measured(&samples, DurationFloor::OneHour).unwrap();
            let hours = (step * (n_samples - 1)).as_seconds_f64() / 3600.0;
            assert_abs_diff_eq!(integration.energy().0.0, watts / 1000.0 * hours, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_elapsed_time_not_sample_count() {
        let samples = constant(500.0, 24, TimeDelta::hours(1));
        let integration = Integration::measured(&samples, DurationFloor::OneHour).unwrap();
        assert_abs_diff_eq!(integration.duration.0.0, 23.0);
        assert_abs_diff_eq!(integration.energy().0.0, 11.5, epsilon = 1e-9);
    }

    #[test]
    fn test_single_sample_lasts_an_hour() {
        let samples = constant(2000.0, 1, TimeDelta::hours(1));
        let integration = Integration::measured(&samples, DurationFloor::SamplingInterval).unwrap();
        assert_abs_diff_eq!(integration.energy().0.0, 2.0);
    }

    #[test]
    fn test_one_hour_floor() {
        let samples = constant(1000.0, 11, TimeDelta::minutes(1));
        let integration = Integration::measured(&samples, DurationFloor::OneHour).unwrap();
        assert_eq!(integration.duration, Hours::ONE);
        assert_abs_diff_eq!(integration.energy().0.0, 1.0);
    }

    #[test]
    fn test_sampling_interval_floor() {
        let samples = constant(1000.0, 11, TimeDelta::minutes(1));
        let integration =
            Integration::measured(&samples, DurationFloor::SamplingInterval).unwrap();
        assert_abs_diff_eq!(integration.duration.0.0, 11.0 / 60.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sampling_interval_floor_on_irregular_gaps() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let samples = [0, 1, 2, 3, 10, 40, 42]
            .map(|minute| (start + TimeDelta::minutes(minute), Kilowatts::from(1.0)));
        let integration =
            Integration::measured(&samples, DurationFloor::SamplingInterval).unwrap();

        // 42 minutes elapsed plus the median gap of 1.5 minutes for the last sample.
        assert_abs_diff_eq!(integration.duration.0.0, 43.5 / 60.0, epsilon = 1e-12);
        assert_abs_diff_eq!(integration.energy().0.0, 43.5 / 60.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sampling_interval_floor_on_repeated_timestamps() {
        let samples = constant(1000.0, 3, TimeDelta::zero());
        let integration =
            Integration::measured(&samples, DurationFloor::SamplingInterval).unwrap();
        assert_eq!(integration.duration, Hours::ONE);
    }

    #[test]
    fn test_nominal() {
        let samples = constant(800.0, 3, TimeDelta::minutes(1));
        let integration = Integration::nominal(&samples, Hours::QUARTER).unwrap();
        assert_abs_diff_eq!(integration.energy().0.0, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_window() {
        assert!(matches!(
            Integration::measured(&[], DurationFloor::OneHour),
            Err(Error::InsufficientData(_)),
        ));
    }
}
