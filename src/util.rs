//! Utility types shared across the crate.

pub mod concurrent_map;
pub mod paginator;

pub use concurrent_map::{ConcurrentMap, ShardKey};
pub use paginator::{Page, Paginator, paginate};
