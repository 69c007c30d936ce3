//! Sliding window over the most recent search requests.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{Result, XiphosError};
use crate::index::document::{DocId, Document, DocumentStatus};
use crate::search::engine::SearchServer;

/// Default window size: one request per minute over a day.
pub const DEFAULT_WINDOW_SIZE: usize = 1440;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestQueueConfig {
    /// Number of most recent requests kept.
    pub window_size: usize,
}

impl Default for RequestQueueConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl RequestQueueConfig {
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }
}

#[derive(Debug, Clone)]
struct QueryResult {
    documents: Vec<Document>,
}

/// Runs searches against a server and counts how many of the last
/// `window_size` requests found nothing.
///
/// Requests that fail are returned to the caller and not recorded.
#[derive(Debug)]
pub struct RequestQueue<'s> {
    server: &'s SearchServer,
    requests: VecDeque<QueryResult>,
    window_size: usize,
    no_result_requests: usize,
}

impl<'s> RequestQueue<'s> {
    pub fn new(server: &'s SearchServer) -> Self {
        Self::new_unchecked(server, DEFAULT_WINDOW_SIZE)
    }

    pub fn with_config(server: &'s SearchServer, config: RequestQueueConfig) -> Result<Self> {
        if config.window_size == 0 {
            return Err(XiphosError::invalid_config("window_size must be positive"));
        }
        Ok(Self::new_unchecked(server, config.window_size))
    }

    fn new_unchecked(server: &'s SearchServer, window_size: usize) -> Self {
        RequestQueue {
            server,
            requests: VecDeque::with_capacity(window_size.min(DEFAULT_WINDOW_SIZE)),
            window_size,
            no_result_requests: 0,
        }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let documents = self.server.find_top_documents(raw_query)?;
        Ok(self.record(documents))
    }

    pub fn add_find_request_by_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let documents = self.server.find_top_documents_by_status(raw_query, status)?;
        Ok(self.record(documents))
    }

    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let documents = self.server.find_top_documents_by(raw_query, predicate)?;
        Ok(self.record(documents))
    }

    /// Requests in the current window that returned no documents.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    /// Requests currently in the window.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Documents returned by the most recent recorded request.
    pub fn last_result(&self) -> Option<&[Document]> {
        self.requests.back().map(|request| request.documents.as_slice())
    }

    fn record(&mut self, documents: Vec<Document>) -> Vec<Document> {
        if self.requests.len() == self.window_size
            && let Some(evicted) = self.requests.pop_front()
            && evicted.documents.is_empty()
        {
            self.no_result_requests -= 1;
        }
        if documents.is_empty() {
            self.no_result_requests += 1;
        }
        self.requests.push_back(QueryResult {
            documents: documents.clone(),
        });
        documents
    }
}
