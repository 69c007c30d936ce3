//! Bidirectional inverted index.
//!
//! Two owned mappings are kept symmetric: a posting `(term, id) -> tf`
//! exists iff the forward entry `(id, term) -> tf` exists. Both are only
//! ever updated together by [`InvertedIndex::insert_document`] and
//! [`InvertedIndex::remove_document`]. A term whose posting list becomes
//! empty is purged from the index and from the word dictionary.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::index::dictionary::{Term, WordDictionary};
use crate::index::document::DocId;
use crate::search::config::ExecutionMode;

/// Document id -> term frequency for one term.
pub type Postings = BTreeMap<DocId, f64>;

/// Term -> term frequency for one document.
pub type TermFrequencies = BTreeMap<Term, f64>;

#[derive(Debug, Default)]
pub struct InvertedIndex {
    dictionary: WordDictionary,
    word_to_document_freqs: BTreeMap<Term, Postings>,
    document_to_word_freqs: BTreeMap<DocId, TermFrequencies>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the already validated, stop-word-free `words` of document `id`.
    ///
    /// Every occurrence contributes `1 / words.len()` to the term frequency.
    /// A document without words still gets an (empty) forward mapping.
    pub fn insert_document(&mut self, id: DocId, words: &[&str]) {
        debug_assert!(!self.document_to_word_freqs.contains_key(&id));

        let mut frequencies = TermFrequencies::new();
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for word in words {
                let term = self.dictionary.intern(word);
                *self
                    .word_to_document_freqs
                    .entry(term.clone())
                    .or_default()
                    .entry(id)
                    .or_insert(0.0) += inv_word_count;
                *frequencies.entry(term).or_insert(0.0) += inv_word_count;
            }
        }
        self.document_to_word_freqs.insert(id, frequencies);
    }

    /// Remove every posting of document `id`, returning its forward mapping.
    ///
    /// Returns `None` without touching the index when `id` is not indexed.
    /// In parallel mode the terms left without postings are determined
    /// concurrently before the index is mutated on the calling thread.
    pub fn remove_document(&mut self, id: DocId, mode: ExecutionMode) -> Option<TermFrequencies> {
        let frequencies = self.document_to_word_freqs.remove(&id)?;

        let orphaned: Vec<Term> = match mode {
            ExecutionMode::Sequential => frequencies
                .keys()
                .filter(|term| self.is_sole_posting(term, id))
                .cloned()
                .collect(),
            ExecutionMode::Parallel => frequencies
                .par_iter()
                .filter(|(term, _)| self.is_sole_posting(term, id))
                .map(|(term, _)| term.clone())
                .collect(),
        };

        for term in frequencies.keys() {
            if let Some(postings) = self.word_to_document_freqs.get_mut(term) {
                postings.remove(&id);
            }
        }
        for term in &orphaned {
            self.word_to_document_freqs.remove(term);
            self.dictionary.remove(term);
        }

        Some(frequencies)
    }

    fn is_sole_posting(&self, term: &str, id: DocId) -> bool {
        self.word_to_document_freqs
            .get(term)
            .is_some_and(|postings| postings.len() == 1 && postings.contains_key(&id))
    }

    /// Forward term-frequency mapping of document `id`.
    pub fn word_frequencies(&self, id: DocId) -> Option<&TermFrequencies> {
        self.document_to_word_freqs.get(&id)
    }

    /// Posting list of `word`, if it is indexed.
    pub fn postings(&self, word: &str) -> Option<&Postings> {
        self.word_to_document_freqs.get(word)
    }

    /// The indexed term equal to `word` together with its posting list.
    pub fn term_postings(&self, word: &str) -> Option<(&Term, &Postings)> {
        self.word_to_document_freqs.get_key_value(word)
    }

    /// Whether document `id` contains `word`.
    pub fn contains(&self, word: &str, id: DocId) -> bool {
        self.postings(word)
            .is_some_and(|postings| postings.contains_key(&id))
    }

    /// Number of documents containing `word`.
    pub fn document_frequency(&self, word: &str) -> usize {
        self.postings(word).map_or(0, Postings::len)
    }

    pub fn term_count(&self) -> usize {
        self.word_to_document_freqs.len()
    }

    pub fn document_count(&self) -> usize {
        self.document_to_word_freqs.len()
    }

    pub fn dictionary(&self) -> &WordDictionary {
        &self.dictionary
    }

    /// Check that both mappings mirror each other, no posting list is empty
    /// and every indexed term is in the dictionary.
    pub fn is_consistent(&self) -> bool {
        let forward_ok = self.document_to_word_freqs.iter().all(|(id, terms)| {
            terms.iter().all(|(term, tf)| {
                self.word_to_document_freqs
                    .get(term)
                    .and_then(|postings| postings.get(id))
                    .is_some_and(|posting_tf| posting_tf == tf)
            })
        });
        let backward_ok = self.word_to_document_freqs.iter().all(|(term, postings)| {
            !postings.is_empty()
                && self.dictionary.contains(term)
                && postings.iter().all(|(id, tf)| {
                    self.document_to_word_freqs
                        .get(id)
                        .and_then(|terms| terms.get(term))
                        .is_some_and(|forward_tf| forward_tf == tf)
                })
        });
        forward_ok && backward_ok && self.dictionary.len() == self.word_to_document_freqs.len()
    }
}
