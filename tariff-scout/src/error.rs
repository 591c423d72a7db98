use std::ops::RangeInclusive;

use chrono::NaiveDateTime;

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Empty series or a window without samples.
    #[error("insufficient data: {0}")]
    InsufficientData(&'static str),

    #[error("series do not overlap: {lhs:?} vs. {rhs:?}")]
    Alignment { lhs: RangeInclusive<NaiveDateTime>, rhs: RangeInclusive<NaiveDateTime> },

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("sample #{index} precedes the previous one")]
    UnorderedSeries { index: usize },

    #[error("sample #{index} is not a finite number")]
    NonFiniteValue { index: usize },

    #[error("`{start}` is not before `{end}` in window `{label}`")]
    EmptyWindow { label: String, start: NaiveDateTime, end: NaiveDateTime },

    #[error("invalid timestamp: `{0}`")]
    InvalidTimestamp(String),
}

/// Outcome of an evaluation that tells missing data apart from a failure.
#[must_use]
#[derive(Debug)]
pub enum Evaluation<T> {
    Evaluated(T),

    /// There is nothing to evaluate yet, which is not the same as a negative verdict.
    NoData,

    Failed(Error),
}

impl<T> Evaluation<T> {
    pub fn evaluated(self) -> Option<T> {
        match self {
            Self::Evaluated(value) => Some(value),
            Self::NoData | Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }

    /// Convert back into a [`Result`], mapping [`Evaluation::NoData`] onto [`None`].
    pub fn into_result(self) -> Result<Option<T>> {
        match self {
            Self::Evaluated(value) => Ok(Some(value)),
            Self::NoData => Ok(None),
            Self::Failed(error) => Err(error),
        }
    }
}

impl<T> From<Result<T>> for Evaluation<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Evaluated(value),
            Err(Error::InsufficientData(_)) => Self::NoData,
            Err(error) => Self::Failed(error),
        }
    }
}
