//! Word dictionary with stable, shared term handles.

use std::sync::Arc;

use ahash::AHashSet;

/// Handle to an interned word.
///
/// Handles for the same text compare equal and hash identically, and stay
/// valid however the dictionary is mutated afterwards.
pub type Term = Arc<str>;

/// Canonical, deduplicated storage of indexed words.
///
/// Posting lists and per-document frequency maps hold [`Term`] handles
/// cloned from here instead of their own copies of the text.
#[derive(Debug, Default, Clone)]
pub struct WordDictionary {
    words: AHashSet<Term>,
}

impl WordDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for `word`, inserting it on first use.
    pub fn intern(&mut self, word: &str) -> Term {
        if let Some(term) = self.words.get(word) {
            return Arc::clone(term);
        }
        let term: Term = Arc::from(word);
        self.words.insert(Arc::clone(&term));
        term
    }

    /// Look up the handle for `word` without inserting.
    pub fn get(&self, word: &str) -> Option<&Term> {
        self.words.get(word)
    }

    /// Drop `word` from the dictionary. Outstanding handles stay valid.
    pub fn remove(&mut self, word: &str) -> bool {
        self.words.remove(word)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_idempotent() {
        let mut dictionary = WordDictionary::new();
        let first = dictionary.intern("cat");
        let second = dictionary.intern("cat");

        assert_eq!(first, second);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(dictionary.len(), 1);
    }

    #[test]
    fn test_handles_survive_mutation() {
        let mut dictionary = WordDictionary::new();
        let cat = dictionary.intern("cat");
        for i in 0..1000 {
            dictionary.intern(&format!("word{i}"));
        }
        assert!(dictionary.remove("cat"));
        assert_eq!(&*cat, "cat");
        assert!(!dictionary.contains("cat"));
        assert_eq!(dictionary.len(), 1000);
    }

    #[test]
    fn test_get_does_not_insert() {
        let dictionary = WordDictionary::new();
        assert!(dictionary.get("dog").is_none());
        assert!(dictionary.is_empty());
    }
}
