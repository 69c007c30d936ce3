//! Query parser for converting raw query strings into [`Query`] values.

use crate::analysis::{StopWords, is_valid_word, split_into_words};
use crate::error::{Result, XiphosError};
use crate::query::Query;

/// One classified word of a raw query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWord<'a> {
    /// The word with any leading `-` stripped.
    pub data: &'a str,
    pub is_minus: bool,
    pub is_stop: bool,
}

/// Parses raw queries against a fixed stop word set.
#[derive(Debug, Clone, Copy)]
pub struct QueryParser<'s> {
    stop_words: &'s StopWords,
}

impl<'s> QueryParser<'s> {
    pub fn new(stop_words: &'s StopWords) -> Self {
        QueryParser { stop_words }
    }

    /// Parse `text` into plus and minus words, in query order.
    ///
    /// The result is not deduplicated. Fails with InvalidArgument on the
    /// first malformed word.
    ///
    /// # Examples
    ///
    /// ```
    /// use xiphos::analysis::StopWords;
    /// use xiphos::query::QueryParser;
    ///
    /// let stop_words = StopWords::from_text("the").unwrap();
    /// let query = QueryParser::new(&stop_words).parse("cat the dog -fast -the").unwrap();
    ///
    /// assert_eq!(query.plus_words, vec!["cat", "dog"]);
    /// assert_eq!(query.minus_words, vec!["fast"]);
    /// ```
    pub fn parse<'a>(&self, text: &'a str) -> Result<Query<'a>> {
        let mut query = Query::default();
        for word in split_into_words(text) {
            let query_word = self.parse_word(word)?;
            if query_word.is_stop {
                continue;
            }
            if query_word.is_minus {
                query.minus_words.push(query_word.data);
            } else {
                query.plus_words.push(query_word.data);
            }
        }
        Ok(query)
    }

    /// Classify a single query word.
    ///
    /// Rejects empty words, a bare `-`, a double `--` prefix and words with
    /// control characters.
    pub fn parse_word<'a>(&self, text: &'a str) -> Result<QueryWord<'a>> {
        if text.is_empty() {
            return Err(XiphosError::invalid_argument("query word is empty"));
        }
        let (data, is_minus) = match text.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (text, false),
        };
        if data.is_empty() || data.starts_with('-') || !is_valid_word(data) {
            return Err(XiphosError::invalid_argument(format!(
                "query word {text:?} is invalid"
            )));
        }
        Ok(QueryWord {
            data,
            is_minus,
            is_stop: self.stop_words.contains(data),
        })
    }
}
