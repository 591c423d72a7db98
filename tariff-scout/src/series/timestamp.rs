use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    str::FromStr,
};

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::{error::Error, series::Chronological};

/// Sample timestamp as reported by a data source: with or without a UTC offset.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, DeserializeFromStr, SerializeDisplay)]
pub enum Timestamp {
    Naive(NaiveDateTime),
    Aware(DateTime<FixedOffset>),
}

impl Timestamp {
    const NAIVE_FORMATS: [&'static str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    #[must_use]
    pub const fn is_aware(self) -> bool {
        matches!(self, Self::Aware(_))
    }

    /// Wall-clock reading with the offset dropped, the reading itself is not shifted.
    #[must_use]
    pub fn naive_local(self) -> NaiveDateTime {
        match self {
            Self::Naive(timestamp) => timestamp,
            Self::Aware(timestamp) => timestamp.naive_local(),
        }
    }
}

impl Chronological for Timestamp {
    /// Offset-aware pairs compare as instants, anything else compares by the wall clock.
    fn is_before(&self, other: &Self) -> bool {
        let ordering = match (self, other) {
            (Self::Aware(lhs), Self::Aware(rhs)) => lhs.cmp(rhs),
            _ => self.naive_local().cmp(&other.naive_local()),
        };
        ordering == Ordering::Less
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(timestamp: NaiveDateTime) -> Self {
        Self::Naive(timestamp)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(timestamp: DateTime<Tz>) -> Self {
        Self::Aware(timestamp.fixed_offset())
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::Aware(timestamp));
        }
        Self::NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
            .map(Self::Naive)
            .ok_or_else(|| Error::InvalidTimestamp(s.to_owned()))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Naive(timestamp) => write!(f, "{}", timestamp.format(Self::NAIVE_FORMATS[0])),
            Self::Aware(timestamp) => write!(f, "{}", timestamp.to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 11).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_aware() {
        let timestamp: Timestamp = "2025-10-11T12:00:00+02:00".parse().unwrap();
        assert!(timestamp.is_aware());
        assert_eq!(timestamp.naive_local(), noon());
    }

    #[test]
    fn test_parse_naive() {
        let timestamp: Timestamp = "2025-10-11 12:00:00".parse().unwrap();
        assert_eq!(timestamp, Timestamp::Naive(noon()));
        let timestamp: Timestamp = "2025-10-11T12:00:00.000".parse().unwrap();
        assert_eq!(timestamp, Timestamp::Naive(noon()));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!("yesterday".parse::<Timestamp>(), Err(Error::InvalidTimestamp(_))));
    }

    #[test]
    fn test_aware_ordering_uses_instants() {
        // 12:00+02:00 is 10:00 UTC, which is before 11:00 UTC despite the wall clock.
        let lhs: Timestamp = "2025-10-11T12:00:00+02:00".parse().unwrap();
        let rhs = Timestamp::from(noon().and_utc() - chrono::TimeDelta::hours(1));
        assert!(lhs.is_before(&rhs));
        assert!(!rhs.is_before(&lhs));
    }

    #[test]
    fn test_from_utc() {
        let timestamp = Timestamp::from(noon().and_local_timezone(Utc).unwrap());
        assert_eq!(timestamp.naive_local(), noon());
    }

    #[test]
    fn test_display_round_trip() {
        let timestamp: Timestamp = "2025-10-11T12:00:00+02:00".parse().unwrap();
        assert_eq!(timestamp.to_string().parse::<Timestamp>().unwrap(), timestamp);
    }
}
