//! Query parsing.
//!
//! A raw query is a space-separated list of words. A word prefixed with `-`
//! excludes every document containing it; any other word is required to
//! contribute relevance. Stop words are dropped from both lists.

pub mod parser;

pub use parser::{QueryParser, QueryWord};

/// A parsed query borrowing its words from the raw query string.
///
/// [`QueryParser::parse`] keeps words in query order, duplicates included.
/// Call sites that need sets call [`Query::deduplicate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'a> {
    pub plus_words: Vec<&'a str>,
    pub minus_words: Vec<&'a str>,
}

impl<'a> Query<'a> {
    /// Sort both word lists and drop repeated words.
    pub fn deduplicate(&mut self) {
        deduplicate_words(&mut self.plus_words);
        deduplicate_words(&mut self.minus_words);
    }

    /// Consuming form of [`Query::deduplicate`].
    pub fn deduplicated(mut self) -> Self {
        self.deduplicate();
        self
    }

    /// True when neither plus nor minus words remain.
    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}

/// Sort `words` and remove consecutive duplicates.
pub fn deduplicate_words(words: &mut Vec<&str>) {
    words.sort_unstable();
    words.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicate() {
        let query = Query {
            plus_words: vec!["dog", "cat", "dog"],
            minus_words: vec!["fast", "fast"],
        }
        .deduplicated();

        assert_eq!(query.plus_words, vec!["cat", "dog"]);
        assert_eq!(query.minus_words, vec!["fast"]);
        assert!(!query.is_empty());
        assert!(Query::default().is_empty());
    }
}
