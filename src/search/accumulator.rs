//! Relevance accumulation strategies.
//!
//! The sequential path accumulates into a plain [`BTreeMap`]; the parallel
//! path shares a [`ConcurrentMap`] between workers. Ranking code is written
//! once against [`RelevanceAccumulator`] and used with either.

use std::collections::BTreeMap;

use crate::index::document::DocId;
use crate::util::concurrent_map::ConcurrentMap;

/// Running document relevance during one ranking call.
pub trait RelevanceAccumulator {
    /// Add `delta` to the relevance of `id`, starting from `delta` if absent.
    fn accumulate(&mut self, id: DocId, delta: f64);

    /// Drop `id` from the candidates.
    fn erase(&mut self, id: DocId);

    /// Final relevance per document, ordered by id.
    fn into_relevance(self) -> BTreeMap<DocId, f64>;
}

impl RelevanceAccumulator for BTreeMap<DocId, f64> {
    fn accumulate(&mut self, id: DocId, delta: f64) {
        *self.entry(id).or_insert(0.0) += delta;
    }

    fn erase(&mut self, id: DocId) {
        self.remove(&id);
    }

    fn into_relevance(self) -> BTreeMap<DocId, f64> {
        self
    }
}

/// Each worker holds its own copy of the shared reference.
impl RelevanceAccumulator for &ConcurrentMap<DocId, f64> {
    fn accumulate(&mut self, id: DocId, delta: f64) {
        ConcurrentMap::accumulate(*self, id, delta);
    }

    fn erase(&mut self, id: DocId) {
        ConcurrentMap::erase(*self, &id);
    }

    fn into_relevance(self) -> BTreeMap<DocId, f64> {
        self.flatten()
    }
}
