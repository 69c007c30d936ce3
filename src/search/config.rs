//! Configuration for the search server.

use serde::{Deserialize, Serialize};

use crate::error::{Result, XiphosError};

/// Default number of documents returned by a top-K query.
pub const DEFAULT_MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Default tolerance under which two relevances count as equal.
pub const DEFAULT_RELEVANCE_EPSILON: f64 = 1e-6;

/// Default number of shards of the parallel relevance accumulator.
pub const DEFAULT_SHARD_COUNT: usize = 10;

/// Selects the sequential or the parallel implementation of an operation.
///
/// Both paths produce the same results; the parallel one runs on the
/// current rayon thread pool (see [`rayon::ThreadPool::install`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Sequential,
    Parallel,
}

/// Tuning values owned by a [`SearchServer`](crate::search::SearchServer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of documents returned by a top-K query.
    pub max_result_document_count: usize,

    /// Relevances closer than this are ordered by rating instead.
    pub relevance_epsilon: f64,

    /// Number of independently locked shards used while ranking in parallel.
    pub shard_count: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_result_document_count: DEFAULT_MAX_RESULT_DOCUMENT_COUNT,
            relevance_epsilon: DEFAULT_RELEVANCE_EPSILON,
            shard_count: DEFAULT_SHARD_COUNT,
        }
    }
}

impl SearchConfig {
    pub fn with_max_result_document_count(mut self, count: usize) -> Self {
        self.max_result_document_count = count;
        self
    }

    pub fn with_relevance_epsilon(mut self, epsilon: f64) -> Self {
        self.relevance_epsilon = epsilon;
        self
    }

    pub fn with_shard_count(mut self, shard_count: usize) -> Self {
        self.shard_count = shard_count;
        self
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.shard_count == 0 {
            return Err(XiphosError::invalid_config("shard_count must be positive"));
        }
        if !self.relevance_epsilon.is_finite() || self.relevance_epsilon < 0.0 {
            return Err(XiphosError::invalid_config(
                "relevance_epsilon must be a non-negative finite number",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.max_result_document_count, 5);
        assert_eq!(config.relevance_epsilon, 1e-6);
        assert_eq!(config.shard_count, 10);
        assert!(config.validate().is_ok());
        assert_eq!(ExecutionMode::default(), ExecutionMode::Sequential);
    }

    #[test]
    fn test_config_builder() {
        let config = SearchConfig::default()
            .with_max_result_document_count(3)
            .with_relevance_epsilon(1e-3)
            .with_shard_count(4);

        assert_eq!(config.max_result_document_count, 3);
        assert_eq!(config.relevance_epsilon, 1e-3);
        assert_eq!(config.shard_count, 4);
    }

    #[test]
    fn test_invalid_config() {
        assert!(SearchConfig::default().with_shard_count(0).validate().is_err());
        assert!(
            SearchConfig::default()
                .with_relevance_epsilon(f64::NAN)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: SearchConfig = serde_json::from_str(r#"{"shard_count": 16}"#).unwrap();
        assert_eq!(config.shard_count, 16);
        assert_eq!(config.max_result_document_count, 5);
    }
}
