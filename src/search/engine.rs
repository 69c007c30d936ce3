//! The search server facade.

use tracing::debug;

use crate::analysis::{StopWords, is_valid_word, split_into_words};
use crate::error::{Result, XiphosError};
use crate::index::document::{
    DocId, DocumentData, DocumentIds, DocumentStatus, DocumentStore, compute_average_rating,
};
use crate::index::inverted::{InvertedIndex, TermFrequencies};
use crate::query::{Query, QueryParser};
use crate::search::config::{ExecutionMode, SearchConfig};

static EMPTY_FREQUENCIES: TermFrequencies = TermFrequencies::new();

/// An in-memory TF-IDF search server.
///
/// # Examples
///
/// ```
/// use xiphos::index::DocumentStatus;
/// use xiphos::search::SearchServer;
///
/// let mut server = SearchServer::from_stop_words_text("the").unwrap();
/// server.add_document(0, "the cat sat", DocumentStatus::Actual, &[5, 4, 3]).unwrap();
/// server.add_document(1, "the dog ran fast", DocumentStatus::Actual, &[1]).unwrap();
///
/// let results = server.find_top_documents("cat dog -fast").unwrap();
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].id, 0);
/// assert_eq!(results[0].rating, 4);
/// ```
#[derive(Debug)]
pub struct SearchServer {
    pub(crate) config: SearchConfig,
    pub(crate) stop_words: StopWords,
    pub(crate) index: InvertedIndex,
    pub(crate) documents: DocumentStore,
}

impl SearchServer {
    /// Create a server with the given stop words and the default configuration.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(StopWords::from_words(stop_words)?, SearchConfig::default())
    }

    /// Create a server from space-separated stop words.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Self::with_config(StopWords::from_text(text)?, SearchConfig::default())
    }

    pub fn with_config(stop_words: StopWords, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(SearchServer {
            config,
            stop_words,
            index: InvertedIndex::new(),
            documents: DocumentStore::new(),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// Add a document.
    ///
    /// Fails with InvalidArgument, leaving the server untouched, if `id` is
    /// negative, already live, or `text` contains a word with control
    /// characters. The rating is the truncated average of `ratings`.
    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(XiphosError::invalid_argument(format!(
                "document id {id} is negative"
            )));
        }
        if self.documents.contains(id) {
            return Err(XiphosError::invalid_argument(format!(
                "document id {id} is already in use"
            )));
        }

        let words = self.split_into_words_no_stop(text)?;
        self.index.insert_document(id, &words);
        self.documents.insert(
            id,
            DocumentData {
                rating: compute_average_rating(ratings),
                status,
            },
        );

        debug!(id, words = words.len(), %status, "document added");
        Ok(())
    }

    /// Remove a live document and all of its postings.
    pub fn remove_document(&mut self, id: DocId) -> Result<()> {
        self.remove_document_with(ExecutionMode::Sequential, id)
    }

    /// Remove a live document, choosing how orphaned terms are collected.
    ///
    /// Fails with NotFound, making no changes, if `id` is not live.
    pub fn remove_document_with(&mut self, mode: ExecutionMode, id: DocId) -> Result<()> {
        if !self.documents.contains(id) {
            return Err(XiphosError::not_found(format!("document id {id}")));
        }
        self.index.remove_document(id, mode);
        self.documents.remove(id);

        debug!(id, ?mode, "document removed");
        Ok(())
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Metadata of a live document.
    pub fn document(&self, id: DocId) -> Option<&DocumentData> {
        self.documents.get(id)
    }

    /// Term frequencies of document `id`; empty if `id` is not live.
    pub fn word_frequencies(&self, id: DocId) -> &TermFrequencies {
        self.index.word_frequencies(id).unwrap_or(&EMPTY_FREQUENCIES)
    }

    /// Live document ids in ascending order.
    pub fn iter(&self) -> DocumentIds<'_> {
        self.documents.ids()
    }

    pub(crate) fn parse_query<'a>(&self, raw_query: &'a str) -> Result<Query<'a>> {
        QueryParser::new(&self.stop_words).parse(raw_query)
    }

    /// Split, validate every word, then drop stop words.
    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if !is_valid_word(word) {
                return Err(XiphosError::invalid_argument(format!(
                    "word {word:?} contains control characters"
                )));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }
}

impl<'s> IntoIterator for &'s SearchServer {
    type Item = DocId;
    type IntoIter = DocumentIds<'s>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
