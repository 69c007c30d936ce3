//! Output formatting for CLI commands.

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::Serialize;

use crate::cli::args::{OutputFormat, XiphosArgs};
use crate::error::Result;
use crate::index::document::{DocId, Document, DocumentStatus};
use crate::util::paginator::paginate;

/// Plain-text rendering used for [`OutputFormat::Human`].
pub trait HumanReadable {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Result of the `search` command.
///
/// Built through [`SearchResults::new`], which rejects a zero page size.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    query: String,
    documents: Vec<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_size: Option<usize>,
}

impl SearchResults {
    pub fn new(query: String, documents: Vec<Document>, page_size: Option<usize>) -> Result<Self> {
        if let Some(page_size) = page_size {
            paginate(&documents, page_size)?;
        }
        Ok(SearchResults {
            query,
            documents,
            page_size,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }
}

/// Result of the `match` command.
#[derive(Debug, Serialize)]
pub struct MatchResult {
    pub id: DocId,
    pub status: DocumentStatus,
    pub words: Vec<String>,
}

/// Result of the `dedup` command.
#[derive(Debug, Serialize)]
pub struct DedupResult {
    pub removed: Vec<DocId>,
    pub remaining: usize,
}

/// Documents found for one query of a batch.
#[derive(Debug, Serialize)]
pub struct QueryResults {
    pub query: String,
    pub documents: Vec<Document>,
}

/// Result of the `batch` command.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchResults {
    PerQuery(Vec<QueryResults>),
    Joined(Vec<Document>),
}

/// Corpus statistics.
#[derive(Debug, Serialize)]
pub struct CorpusStats {
    pub documents: usize,
    pub terms: usize,
    pub statuses: BTreeMap<DocumentStatus, usize>,
    pub average_rating: f64,
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &XiphosArgs, out: &mut dyn Write) -> Result<()>
where
    T: Serialize + HumanReadable,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                writeln!(out, "{message}")?;
                writeln!(out)?;
            }
            result.write_human(out)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, result)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_documents(out: &mut dyn Write, documents: &[Document]) -> io::Result<()> {
    if documents.is_empty() {
        return writeln!(out, "No documents found.");
    }
    for document in documents {
        writeln!(out, "{document}")?;
    }
    Ok(())
}

impl HumanReadable for SearchResults {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        let Some(page_size) = self.page_size else {
            return write_documents(out, &self.documents);
        };
        if self.documents.is_empty() {
            return write_documents(out, &self.documents);
        }
        let pages = paginate(&self.documents, page_size).map_err(io::Error::other)?;
        for (number, page) in pages.iter().enumerate() {
            writeln!(out, "Page {}: {page}", number + 1)?;
        }
        Ok(())
    }
}

impl HumanReadable for MatchResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "{{ document_id = {}, status = {}, words = {} }}",
            self.id,
            self.status,
            self.words.join(" ")
        )
    }
}

impl HumanReadable for DedupResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        for id in &self.removed {
            writeln!(out, "Found duplicate document id {id}")?;
        }
        writeln!(
            out,
            "Removed {} documents, {} remaining",
            self.removed.len(),
            self.remaining
        )
    }
}

impl HumanReadable for BatchResults {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        match self {
            BatchResults::PerQuery(results) => {
                for result in results {
                    writeln!(out, "{} documents for query: {}", result.documents.len(), result.query)?;
                    for document in &result.documents {
                        writeln!(out, "  {document}")?;
                    }
                }
                Ok(())
            }
            BatchResults::Joined(documents) => write_documents(out, documents),
        }
    }
}

impl HumanReadable for CorpusStats {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Corpus Statistics:")?;
        writeln!(out, "  Documents: {}", self.documents)?;
        writeln!(out, "  Terms: {}", self.terms)?;
        writeln!(out, "  Average rating: {:.2}", self.average_rating)?;
        for (status, count) in &self.statuses {
            writeln!(out, "  {status}: {count}")?;
        }
        Ok(())
    }
}
