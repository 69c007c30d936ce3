//! Text analysis module for Xiphos.
//!
//! Splits document and query text into words, validates them and filters
//! stop words. There is no stemming or normalization: a word is indexed
//! exactly as it appears in the text.

pub mod stop_words;
pub mod tokenizer;

pub use stop_words::StopWords;
pub use tokenizer::{is_valid_word, split_into_words};
