#![allow(clippy::doc_markdown)]
#![doc = include_str!("../../README.md")]

pub mod aggregate;
pub mod compare;
pub mod config;
pub mod error;
pub mod flow;
pub mod integrate;
pub mod normalize;
pub mod realtime;
pub mod series;
pub mod tariff;
pub mod window;

pub use tariff_scout_quantities as quantities;

pub use self::{
    compare::{calculate_costs, find_best_alternative},
    config::{AnalysisConfig, DurationFloor},
    error::{Error, Evaluation, Result},
};
