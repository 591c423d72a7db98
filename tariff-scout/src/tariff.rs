use tariff_scout_quantities::{cost::Cost, rate::KilowattHourRate};

use crate::{
    error::{Error, Result},
    series::RawSeries,
};

/// Candidate tariffs in insertion order, keyed by unique provider names.
///
/// The reference tariff is implicit: it comes from [`crate::config::AnalysisConfig`].
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct TariffSet(Vec<(String, RawSeries<KilowattHourRate>)>);

impl TariffSet {
    pub fn try_from_iter<I, S>(tariffs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, RawSeries<KilowattHourRate>)>,
        S: Into<String>,
    {
        let mut this = Self::default();
        for (name, rates) in tariffs {
            this.try_insert(name, rates)?;
        }
        Ok(this)
    }

    pub fn try_insert(
        &mut self,
        name: impl Into<String>,
        rates: RawSeries<KilowattHourRate>,
    ) -> Result {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(Error::Configuration(format!("duplicate tariff `{name}`")));
        }
        self.0.push((name, rates));
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RawSeries<KilowattHourRate>> {
        self.0.iter().find(|(key, _)| key == name).map(|(_, rates)| rates)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawSeries<KilowattHourRate>)> {
        self.0.iter().map(|(name, rates)| (name.as_str(), rates))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Total cost per tariff in insertion order, with one distinguished reference entry.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostResult {
    reference_name: String,
    entries: Vec<(String, Cost)>,
}

impl CostResult {
    pub fn new(reference_name: impl Into<String>) -> Self {
        Self { reference_name: reference_name.into(), entries: Vec::new() }
    }

    /// Insert or replace the entry, replacing keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, cost: Cost) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = cost,
            None => self.entries.push((name, cost)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, cost: Cost) -> Self {
        self.insert(name, cost);
        self
    }

    #[must_use]
    pub fn reference_name(&self) -> &str {
        &self.reference_name
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Cost> {
        self.entries.iter().find(|(key, _)| key == name).map(|(_, cost)| *cost)
    }

    #[must_use]
    pub fn reference_cost(&self) -> Option<Cost> {
        self.get(&self.reference_name)
    }

    /// Non-reference entries in insertion order.
    pub fn alternatives(&self) -> impl Iterator<Item = (&str, Cost)> {
        self.iter().filter(|(name, _)| *name != self.reference_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Cost)> {
        self.entries.iter().map(|(name, cost)| (name.as_str(), *cost))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cheapest alternative to the reference tariff.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct BestAlternative {
    /// [`None`] when there is nothing to compare against.
    pub provider: Option<String>,

    /// Reference cost minus the alternative cost, negative when the alternative is more expensive.
    pub savings: Cost,

    /// Savings relative to the reference cost, zero for a non-positive reference cost.
    pub savings_percent: f64,
}

impl BestAlternative {
    pub const NONE: Self = Self { provider: None, savings: Cost::ZERO, savings_percent: 0.0 };
}
