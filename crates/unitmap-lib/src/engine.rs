//! Session state for one map view.
//!
//! [`HighlightEngine`] owns the current unit batch and the last applied
//! [`RangeQuery`]. Both are replaced wholesale: a load swaps in a new batch
//! with every highlight cleared, and a query swaps in a freshly projected copy
//! of the current batch. Failed loads and failed queries leave the previous
//! state in place.
//!
//! Readers take a [`snapshot`](HighlightEngine::snapshot), an `Arc` of the
//! batch that later loads or queries never mutate.

use std::sync::Arc;

use tracing::{debug, info};

use crate::classify::{classify_with, ClassifierStrategy, InRangeSet};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::geo::distance_km;
use crate::highlight::{clear, project};
use crate::normalize::{ensure_unique_ids, normalize};
use crate::output::{HighlightSummary, Marker};
use crate::query::RangeQuery;
use crate::record::RawRecord;
use crate::unit::Unit;

/// Maximum number of suggestions attached to an unknown-id error.
const MAX_SUGGESTIONS: usize = 3;

/// Minimum Jaro-Winkler similarity for an id to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Owns the current batch and its highlight state.
#[derive(Debug, Clone)]
pub struct HighlightEngine {
    config: EngineConfig,
    strategy: ClassifierStrategy,
    units: Arc<[Unit]>,
    last_query: Option<RangeQuery>,
}

impl Default for HighlightEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl HighlightEngine {
    /// Create an engine with an empty batch.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            strategy: ClassifierStrategy::Auto,
            units: Arc::from(Vec::new()),
            last_query: None,
        }
    }

    /// Override the classification strategy.
    pub fn with_strategy(mut self, strategy: ClassifierStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn strategy(&self) -> ClassifierStrategy {
        self.strategy
    }

    /// Normalise `records` and install them as the current batch.
    ///
    /// Returns the number of units loaded. On error nothing changes.
    pub fn load(&mut self, records: &[RawRecord]) -> Result<usize> {
        let units = normalize(records)?;
        Ok(self.install(units))
    }

    /// Install already-normalised units as the current batch.
    ///
    /// Existing highlight flags on `units` are discarded.
    pub fn load_units(&mut self, units: Vec<Unit>) -> Result<usize> {
        ensure_unique_ids(&units)?;
        Ok(self.install(clear(&units)))
    }

    fn install(&mut self, units: Vec<Unit>) -> usize {
        let count = units.len();
        self.units = Arc::from(units);
        self.last_query = None;
        info!(units = count, "installed unit batch");
        count
    }

    /// Evaluate `query` over the current batch and install the projected result.
    ///
    /// Returns the ids found in range. On error the previous highlight state
    /// is kept.
    pub fn apply(&mut self, query: RangeQuery) -> Result<InRangeSet> {
        let snapshot = self.snapshot();
        let in_range = classify_with(&snapshot, &query, self.strategy, &self.config)?;
        let projected = project(&snapshot, &in_range);

        debug!(
            mode = %query.mode,
            radius_km = query.radius_km,
            in_range = in_range.len(),
            "applied range query"
        );

        self.units = Arc::from(projected);
        self.last_query = Some(query);
        Ok(in_range)
    }

    /// Immutable view of the current batch.
    pub fn snapshot(&self) -> Arc<[Unit]> {
        Arc::clone(&self.units)
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn last_query(&self) -> Option<&RangeQuery> {
        self.last_query.as_ref()
    }

    /// Lookup a unit by id, suggesting close matches on a miss.
    pub fn unit(&self, id: &str) -> Result<&Unit> {
        self.units
            .iter()
            .find(|unit| unit.id == id)
            .ok_or_else(|| Error::UnknownUnit {
                id: id.to_string(),
                suggestions: self.fuzzy_unit_matches(id, MAX_SUGGESTIONS),
            })
    }

    /// Ids in the current batch most similar to `query`, best first.
    pub fn fuzzy_unit_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .units
            .iter()
            .map(|unit| (strsim::jaro_winkler(query, &unit.id), unit.id.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, id)| id.to_string())
            .collect()
    }

    /// Great-circle distance in kilometres between two units of the batch.
    pub fn distance_between(&self, from: &str, to: &str) -> Result<f64> {
        let a = self.unit(from)?.coordinate;
        let b = self.unit(to)?.coordinate;
        Ok(distance_km(a, b)?)
    }

    /// Per-unit marker views of the current batch.
    pub fn markers(&self) -> Vec<Marker> {
        self.units.iter().map(Marker::from).collect()
    }

    /// Summary of the current batch and last applied query.
    pub fn summary(&self) -> HighlightSummary {
        HighlightSummary::from_units(&self.units, self.last_query)
    }
}
