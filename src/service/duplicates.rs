//! Duplicate document removal.

use ahash::AHashSet;
use tracing::info;

use crate::error::Result;
use crate::index::dictionary::Term;
use crate::index::document::DocId;
use crate::search::engine::SearchServer;

/// Remove every document whose set of terms equals that of a document with
/// a lower id.
///
/// Term frequencies and statuses are ignored, only which words occur
/// matters. Returns the removed ids in ascending order.
pub fn remove_duplicates(server: &mut SearchServer) -> Result<Vec<DocId>> {
    let mut seen: AHashSet<Vec<Term>> = AHashSet::with_capacity(server.document_count());
    let mut duplicates = Vec::new();

    for id in server.iter() {
        // Forward mappings are BTreeMaps, so the key order is canonical.
        let terms: Vec<Term> = server.word_frequencies(id).keys().cloned().collect();
        if !seen.insert(terms) {
            duplicates.push(id);
        }
    }

    for &id in &duplicates {
        info!(id, "found duplicate document");
        server.remove_document(id)?;
    }
    Ok(duplicates)
}
