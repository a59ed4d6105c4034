//! Engine configuration.

use tracing::warn;

/// Environment variable overriding [`EngineConfig::index_threshold`].
pub const INDEX_THRESHOLD_ENV: &str = "UNITMAP_INDEX_THRESHOLD";

/// Default batch size at which `Auto` classification switches to the KD-tree.
pub const DEFAULT_INDEX_THRESHOLD: usize = 128;

/// Tunables for range classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Batches with at least this many units use the indexed classifier in
    /// `Auto` mode.
    pub index_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            index_threshold: DEFAULT_INDEX_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Build a configuration from the process environment.
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(INDEX_THRESHOLD_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(value) => config.index_threshold = value,
                Err(err) => warn!(
                    variable = INDEX_THRESHOLD_ENV,
                    value = %raw,
                    error = %err,
                    "ignoring invalid index threshold"
                ),
            }
        }
        config
    }
}
