//! Parallel dispatch of many queries against one server.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, XiphosError};
use crate::index::document::{Document, DocumentStatus};
use crate::search::config::ExecutionMode;
use crate::search::engine::SearchServer;

/// Run every query on the current rayon pool.
///
/// The i-th result belongs to the i-th query. If any query is malformed
/// the whole batch fails with that query's error.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    run_batch(server, queries, ExecutionMode::Sequential)
}

/// Like [`process_queries`], concatenating the per-query results in query order.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?
        .into_iter()
        .flatten()
        .collect())
}

fn run_batch<S>(
    server: &SearchServer,
    queries: &[S],
    mode: ExecutionMode,
) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    let predicate = DocumentStatus::Actual.predicate();
    queries
        .par_iter()
        .map(|query| server.find_top_documents_with(mode, query.as_ref(), predicate))
        .collect()
}

/// Configuration of a [`QueryProcessor`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Worker threads of the dedicated pool.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,

    /// How each individual query is ranked.
    pub execution_mode: ExecutionMode,
}

/// Batch query runner owning its own thread pool.
pub struct QueryProcessor {
    config: BatchConfig,
    thread_pool: ThreadPool,
}

impl std::fmt::Debug for QueryProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryProcessor")
            .field("config", &self.config)
            .field("threads", &self.thread_pool.current_num_threads())
            .finish()
    }
}

impl QueryProcessor {
    pub fn new(config: BatchConfig) -> Result<Self> {
        let thread_pool_size = config.thread_pool_size.unwrap_or_else(num_cpus::get);
        if thread_pool_size == 0 {
            return Err(XiphosError::invalid_config("thread_pool_size must be positive"));
        }

        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(thread_pool_size)
            .thread_name(|i| format!("xiphos-query-{i}"))
            .build()
            .map_err(|e| XiphosError::other(format!("failed to create thread pool: {e}")))?;

        debug!(threads = thread_pool_size, mode = ?config.execution_mode, "query processor ready");
        Ok(QueryProcessor {
            config,
            thread_pool,
        })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Run `queries` on this processor's pool, one result list per query.
    pub fn process<S>(&self, server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
    where
        S: AsRef<str> + Sync,
    {
        let mode = self.config.execution_mode;
        self.thread_pool.install(|| run_batch(server, queries, mode))
    }

    /// Run `queries` on this processor's pool and concatenate the results.
    pub fn process_joined<S>(&self, server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
    where
        S: AsRef<str> + Sync,
    {
        Ok(self.process(server, queries)?.into_iter().flatten().collect())
    }
}
