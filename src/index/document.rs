//! Document records and the document store.

use std::collections::{BTreeMap, btree_map};
use std::fmt;
use std::iter::Copied;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, XiphosError};

/// Caller-supplied document identifier. Valid ids are non-negative.
pub type DocId = i32;

/// Caller-defined document tag. The engine never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl DocumentStatus {
    /// A ranking predicate accepting documents with exactly this status.
    pub fn predicate(self) -> impl Fn(DocId, DocumentStatus, i32) -> bool + Sync + Send + Copy {
        move |_, status, _| status == self
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Actual => "actual",
            DocumentStatus::Irrelevant => "irrelevant",
            DocumentStatus::Banned => "banned",
            DocumentStatus::Removed => "removed",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = XiphosError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "actual" => Ok(DocumentStatus::Actual),
            "irrelevant" => Ok(DocumentStatus::Irrelevant),
            "banned" => Ok(DocumentStatus::Banned),
            "removed" => Ok(DocumentStatus::Removed),
            _ => Err(XiphosError::invalid_argument(format!(
                "unknown document status: {s}"
            ))),
        }
    }
}

/// Metadata stored for every live document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
}

/// A ranked search result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl Document {
    pub fn new(id: DocId, relevance: f64, rating: i32) -> Self {
        Document {
            id,
            relevance,
            rating,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Integer average of `ratings`, truncated toward zero; 0 when empty.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}

/// Ascending iterator over live document ids.
pub type DocumentIds<'a> = Copied<btree_map::Keys<'a, DocId, DocumentData>>;

/// Per-document metadata keyed by live document id.
///
/// The keys double as the ordered set of live ids.
#[derive(Debug, Default, Clone)]
pub struct DocumentStore {
    documents: BTreeMap<DocId, DocumentData>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: DocId, data: DocumentData) -> Option<DocumentData> {
        self.documents.insert(id, data)
    }

    pub fn remove(&mut self, id: DocId) -> Option<DocumentData> {
        self.documents.remove(&id)
    }

    pub fn get(&self, id: DocId) -> Option<&DocumentData> {
        self.documents.get(&id)
    }

    pub fn contains(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Live ids in ascending order.
    pub fn ids(&self) -> DocumentIds<'_> {
        self.documents.keys().copied()
    }
}
