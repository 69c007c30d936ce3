//! Stop word set.
//!
//! Stop words are dropped from documents before term frequencies are
//! computed and discarded from queries even when negated.

use std::fmt;

use ahash::AHashSet;

use crate::analysis::tokenizer::{is_valid_word, split_into_words};
use crate::error::{Result, XiphosError};

/// A validated, deduplicated set of stop words.
///
/// # Examples
///
/// ```
/// use xiphos::analysis::StopWords;
///
/// let stop_words = StopWords::from_text("in the  and").unwrap();
/// assert_eq!(stop_words.len(), 3);
/// assert!(stop_words.contains("the"));
/// assert!(!stop_words.contains("cat"));
/// ```
#[derive(Clone, Default)]
pub struct StopWords {
    words: AHashSet<String>,
}

impl StopWords {
    /// Create an empty stop word set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stop word set from a list of words.
    ///
    /// Empty strings are skipped and duplicates collapse. Fails with
    /// InvalidArgument if any word contains a control character.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = AHashSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(XiphosError::invalid_argument(format!(
                    "stop word {word:?} contains control characters"
                )));
            }
            set.insert(word.to_string());
        }
        Ok(StopWords { words: set })
    }

    /// Create a stop word set from space-separated text.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_words(split_into_words(text))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Debug for StopWords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
        words.sort_unstable();
        f.debug_set().entries(words).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_words_skips_empty_and_duplicates() {
        let stop_words = StopWords::from_words(["in", "", "the", "in"]).unwrap();
        assert_eq!(stop_words.len(), 2);
        assert!(stop_words.contains("in"));
        assert!(stop_words.contains("the"));
        assert!(!stop_words.contains(""));
    }

    #[test]
    fn test_invalid_stop_word_rejected() {
        let err = StopWords::from_words(["ok", "b\u{1}ad"]).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_from_text() {
        let stop_words = StopWords::from_text("  a  an the ").unwrap();
        assert_eq!(stop_words.len(), 3);
        assert!(StopWords::from_text("").unwrap().is_empty());
    }

    #[test]
    fn test_debug_is_sorted() {
        let stop_words = StopWords::from_words(["the", "and"]).unwrap();
        assert_eq!(format!("{stop_words:?}"), r#"{"and", "the"}"#);
    }
}
