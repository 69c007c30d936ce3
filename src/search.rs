//! Search server: document management, ranking and matching.
//!
//! [`SearchServer`] owns the stop words, the document store and the
//! inverted index. Ranking computes TF-IDF relevance either sequentially
//! or in parallel (see [`ExecutionMode`]); both paths feed a
//! [`RelevanceAccumulator`] and return identical results.
//!
//! The server is not internally synchronized. Any number of ranking and
//! matching calls may run concurrently through `&SearchServer`; adding and
//! removing documents takes `&mut self` and therefore exclusive access.

pub mod accumulator;
pub mod config;
pub mod engine;
pub mod matcher;
pub mod ranking;

pub use accumulator::RelevanceAccumulator;
pub use config::{ExecutionMode, SearchConfig};
pub use engine::SearchServer;
pub use matcher::DocumentMatch;
pub use ranking::sort_documents;
