//! Services built on top of [`SearchServer`](crate::search::SearchServer).
//!
//! These only use the server's public API: a sliding-window request
//! tracker, a duplicate document remover and a parallel batch query
//! dispatcher.

pub mod batch;
pub mod duplicates;
pub mod request_queue;

pub use batch::{BatchConfig, QueryProcessor, process_queries, process_queries_joined};
pub use duplicates::remove_duplicates;
pub use request_queue::{RequestQueue, RequestQueueConfig};
