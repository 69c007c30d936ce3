//! Query-to-document matching.

use rayon::prelude::*;

use crate::error::{Result, XiphosError};
use crate::index::document::{DocId, DocumentStatus};
use crate::query::deduplicate_words;
use crate::search::config::ExecutionMode;
use crate::search::engine::SearchServer;

/// Plus words of a query found in a document, plus the document's status.
///
/// The words borrow from the server's dictionary and are sorted and
/// unique. They are empty whenever the document contains a minus word.
pub type DocumentMatch<'s> = (Vec<&'s str>, DocumentStatus);

impl SearchServer {
    /// Report which plus words of `raw_query` document `id` contains.
    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<DocumentMatch<'_>> {
        self.match_document_with(ExecutionMode::Sequential, raw_query, id)
    }

    /// Match with an explicit execution mode.
    ///
    /// Fails with InvalidArgument on a malformed query and with NotFound if
    /// `id` is not live. Minus words are checked first and the first hit
    /// short-circuits to an empty match.
    pub fn match_document_with(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        id: DocId,
    ) -> Result<DocumentMatch<'_>> {
        let query = self.parse_query(raw_query)?;
        let status = self
            .documents
            .get(id)
            .map(|data| data.status)
            .ok_or_else(|| XiphosError::not_found(format!("document id {id}")))?;

        match mode {
            ExecutionMode::Sequential => {
                // Deduplicated up front, so matches come out sorted and unique.
                let query = query.deduplicated();
                if query
                    .minus_words
                    .iter()
                    .any(|word| self.index.contains(word, id))
                {
                    return Ok((Vec::new(), status));
                }
                let matched = query
                    .plus_words
                    .iter()
                    .filter_map(|word| self.matched_term(word, id))
                    .collect();
                Ok((matched, status))
            }
            ExecutionMode::Parallel => {
                // Duplicates are left in the query and removed from the matches.
                if query
                    .minus_words
                    .par_iter()
                    .any(|word| self.index.contains(word, id))
                {
                    return Ok((Vec::new(), status));
                }
                let mut matched: Vec<&str> = query
                    .plus_words
                    .par_iter()
                    .filter_map(|word| self.matched_term(word, id))
                    .collect();
                deduplicate_words(&mut matched);
                Ok((matched, status))
            }
        }
    }

    /// The indexed copy of `word` if document `id` contains it.
    fn matched_term(&self, word: &str, id: DocId) -> Option<&str> {
        self.index
            .term_postings(word)
            .filter(|(_, postings)| postings.contains_key(&id))
            .map(|(term, _)| &**term)
    }
}
