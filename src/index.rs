//! In-memory index structures.
//!
//! - [`dictionary::WordDictionary`] owns one copy of every indexed word.
//! - [`document::DocumentStore`] keeps per-document metadata and the live ids.
//! - [`inverted::InvertedIndex`] keeps the term -> document and
//!   document -> term frequency mappings in sync.

pub mod dictionary;
pub mod document;
pub mod inverted;

pub use dictionary::{Term, WordDictionary};
pub use document::{DocId, Document, DocumentData, DocumentIds, DocumentStatus, DocumentStore};
pub use inverted::{InvertedIndex, Postings, TermFrequencies};
