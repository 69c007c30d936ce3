//! TF-IDF ranking.
//!
//! For every plus word the inverse document frequency is
//! `ln(live documents / documents containing the word)`, and each posting
//! accepted by the predicate adds `tf * idf` to its document. Every document
//! containing a minus word is then dropped from the candidates. Only the
//! accumulation strategy differs between the sequential and parallel paths.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::trace;

use crate::error::Result;
use crate::index::document::{DocId, Document, DocumentStatus};
use crate::index::inverted::Postings;
use crate::query::Query;
use crate::search::accumulator::RelevanceAccumulator;
use crate::search::config::ExecutionMode;
use crate::search::engine::SearchServer;
use crate::util::concurrent_map::ConcurrentMap;

impl SearchServer {
    /// Top documents with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    /// Top documents with the given status.
    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, status.predicate())
    }

    pub fn find_top_documents_with_mode(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by_status_with(mode, raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status_with(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(mode, raw_query, status.predicate())
    }

    /// Top documents accepted by `predicate(id, status, rating)`.
    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with(ExecutionMode::Sequential, raw_query, predicate)
    }

    /// Rank, sort and truncate to the configured maximum result count.
    ///
    /// Results are ordered by relevance descending; relevances closer than
    /// the configured epsilon are ordered by rating descending.
    pub fn find_top_documents_with<P>(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let mut documents = self.find_all_documents(mode, raw_query, predicate)?;
        sort_documents(&mut documents, self.config.relevance_epsilon);
        documents.truncate(self.config.max_result_document_count);
        Ok(documents)
    }

    /// Every matching document in ascending id order, neither sorted by
    /// relevance nor truncated.
    pub fn find_all_documents<P>(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        // Duplicate plus words would count twice, so ranking always works on sets.
        let query = self.parse_query(raw_query)?.deduplicated();

        let relevance = match mode {
            ExecutionMode::Sequential => self.collect_relevance_sequential(&query, &predicate),
            ExecutionMode::Parallel => self.collect_relevance_parallel(&query, &predicate),
        };
        trace!(
            ?mode,
            plus_words = query.plus_words.len(),
            minus_words = query.minus_words.len(),
            candidates = relevance.len(),
            "ranked query"
        );

        Ok(relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                self.documents
                    .get(id)
                    .map(|data| Document::new(id, relevance, data.rating))
            })
            .collect())
    }

    fn collect_relevance_sequential<P>(&self, query: &Query<'_>, predicate: &P) -> BTreeMap<DocId, f64>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();
        for word in &query.plus_words {
            if let Some(postings) = self.index.postings(word) {
                let idf = self.inverse_document_freq(postings);
                for (&id, &term_freq) in postings {
                    self.score_posting(id, term_freq * idf, predicate, &mut relevance);
                }
            }
        }
        for word in &query.minus_words {
            if let Some(postings) = self.index.postings(word) {
                for &id in postings.keys() {
                    relevance.erase(id);
                }
            }
        }
        relevance.into_relevance()
    }

    fn collect_relevance_parallel<P>(&self, query: &Query<'_>, predicate: &P) -> BTreeMap<DocId, f64>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let relevance: ConcurrentMap<DocId, f64> =
            ConcurrentMap::new_unchecked(self.config.shard_count);

        query.plus_words.par_iter().for_each(|word| {
            if let Some(postings) = self.index.postings(word) {
                let idf = self.inverse_document_freq(postings);
                postings.par_iter().for_each(|(&id, &term_freq)| {
                    let mut accumulator = &relevance;
                    self.score_posting(id, term_freq * idf, predicate, &mut accumulator);
                });
            }
        });

        // Exclusion starts only after every plus word has been scored.
        query.minus_words.par_iter().for_each(|word| {
            if let Some(postings) = self.index.postings(word) {
                postings.par_iter().for_each(|(&id, _)| {
                    RelevanceAccumulator::erase(&mut &relevance, id);
                });
            }
        });

        (&relevance).into_relevance()
    }

    fn score_posting<P, A>(&self, id: DocId, score: f64, predicate: &P, accumulator: &mut A)
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
        A: RelevanceAccumulator,
    {
        if let Some(data) = self.documents.get(id)
            && predicate(id, data.status, data.rating)
        {
            accumulator.accumulate(id, score);
        }
    }

    fn inverse_document_freq(&self, postings: &Postings) -> f64 {
        (self.documents.len() as f64 / postings.len() as f64).ln()
    }
}

/// Sort by relevance descending, ordering near-equal relevances by rating.
///
/// Documents are first sorted by relevance. Each maximal run whose
/// neighbouring relevances differ by less than `epsilon` is then ordered by
/// rating descending, and by id ascending for equal ratings, so the order is
/// fully determined by the input set.
///
/// Runs are chained through neighbours, so two documents whose relevances
/// differ by more than `epsilon` may still be ordered by rating when the
/// documents between them link them into one run.
pub fn sort_documents(documents: &mut [Document], epsilon: f64) {
    documents.sort_by(|lhs, rhs| {
        rhs.relevance
            .total_cmp(&lhs.relevance)
            .then_with(|| by_rating_then_id(lhs, rhs))
    });

    let mut start = 0;
    while start < documents.len() {
        let mut end = start + 1;
        while end < documents.len()
            && (documents[end - 1].relevance - documents[end].relevance).abs() < epsilon
        {
            end += 1;
        }
        documents[start..end].sort_by(by_rating_then_id);
        start = end;
    }
}

fn by_rating_then_id(lhs: &Document, rhs: &Document) -> Ordering {
    rhs.rating.cmp(&lhs.rating).then_with(|| lhs.id.cmp(&rhs.id))
}
