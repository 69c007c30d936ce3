//! # Xiphos
//!
//! An in-memory TF-IDF document search engine.
//!
//! ## Features
//!
//! - Plus/minus word queries with stop words
//! - Top-K ranking with caller-supplied document predicates
//! - Sequential and rayon-parallel ranking, matching and removal
//! - Sharded concurrent relevance accumulation
//! - Pagination, request tracking, duplicate removal and batch queries

pub mod analysis;
pub mod cli;
pub mod error;
pub mod index;
pub mod query;
pub mod search;
pub mod service;
pub mod util;

pub mod prelude {
    pub use crate::error::{Result, XiphosError};
    pub use crate::index::{DocId, Document, DocumentStatus};
    pub use crate::search::{ExecutionMode, SearchConfig, SearchServer};
    pub use crate::service::{RequestQueue, process_queries, process_queries_joined, remove_duplicates};
    pub use crate::util::paginate;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
