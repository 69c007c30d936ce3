//! Command implementations for the xiphos CLI.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::analysis::StopWords;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, XiphosError};
use crate::index::document::{DocId, DocumentStatus};
use crate::search::config::SearchConfig;
use crate::search::engine::SearchServer;
use crate::service::batch::{BatchConfig, QueryProcessor};
use crate::service::duplicates::remove_duplicates;

/// One line of a JSON Lines corpus.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CorpusDocument {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// Execute a CLI command, writing its result to `out`.
pub fn execute_command(args: &XiphosArgs, out: &mut dyn Write) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search_corpus(search_args, args, out),
        Command::Match(match_args) => match_document(match_args, args, out),
        Command::Dedup(corpus_args) => dedup_corpus(corpus_args, args, out),
        Command::Batch(batch_args) => run_batch(batch_args, args, out),
        Command::Stats(corpus_args) => show_stats(corpus_args, args, out),
    }
}

/// Read a JSON Lines corpus. Blank lines are skipped.
pub fn read_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<CorpusDocument>> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut documents = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let document = serde_json::from_str(&line).map_err(|e| {
            XiphosError::invalid_argument(format!("corpus line {}: {e}", line_num + 1))
        })?;
        documents.push(document);
    }
    Ok(documents)
}

/// Build a server from a JSON Lines corpus.
pub fn load_corpus<P: AsRef<Path>>(path: P, stop_words: &str) -> Result<SearchServer> {
    let path = path.as_ref();
    let mut server =
        SearchServer::with_config(StopWords::from_text(stop_words)?, SearchConfig::default())?;
    for document in read_corpus(path)? {
        server.add_document(
            document.id,
            &document.text,
            document.status,
            &document.ratings,
        )?;
    }

    debug!(path = %path.display(), documents = server.document_count(), "corpus loaded");
    Ok(server)
}

fn search_corpus(args: &SearchArgs, cli_args: &XiphosArgs, out: &mut dyn Write) -> Result<()> {
    let server = load_corpus(&args.corpus, &cli_args.stop_words)?;
    let documents = server.find_top_documents_by_status_with(
        cli_args.execution_mode(),
        &args.query,
        args.status,
    )?;
    let results = SearchResults::new(args.query.clone(), documents, args.page_size)?;

    output_result("Search results", &results, cli_args, out)
}

fn match_document(args: &MatchArgs, cli_args: &XiphosArgs, out: &mut dyn Write) -> Result<()> {
    let server = load_corpus(&args.corpus, &cli_args.stop_words)?;
    let (words, status) =
        server.match_document_with(cli_args.execution_mode(), &args.query, args.id)?;

    output_result(
        "Matched words",
        &MatchResult {
            id: args.id,
            status,
            words: words.into_iter().map(str::to_string).collect(),
        },
        cli_args,
        out,
    )
}

fn dedup_corpus(args: &CorpusArgs, cli_args: &XiphosArgs, out: &mut dyn Write) -> Result<()> {
    let mut server = load_corpus(&args.corpus, &cli_args.stop_words)?;
    let removed = remove_duplicates(&mut server)?;

    output_result(
        "Duplicate removal",
        &DedupResult {
            removed,
            remaining: server.document_count(),
        },
        cli_args,
        out,
    )
}

fn run_batch(args: &BatchArgs, cli_args: &XiphosArgs, out: &mut dyn Write) -> Result<()> {
    let server = load_corpus(&args.corpus, &cli_args.stop_words)?;
    let queries: Vec<String> = fs::read_to_string(&args.queries)?
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();

    let processor = QueryProcessor::new(BatchConfig {
        thread_pool_size: args.threads,
        execution_mode: cli_args.execution_mode(),
    })?;

    let results = if args.joined {
        BatchResults::Joined(processor.process_joined(&server, &queries)?)
    } else {
        BatchResults::PerQuery(
            queries
                .iter()
                .cloned()
                .zip(processor.process(&server, &queries)?)
                .map(|(query, documents)| QueryResults { query, documents })
                .collect(),
        )
    };

    output_result("Batch results", &results, cli_args, out)
}

fn show_stats(args: &CorpusArgs, cli_args: &XiphosArgs, out: &mut dyn Write) -> Result<()> {
    let server = load_corpus(&args.corpus, &cli_args.stop_words)?;

    let mut statuses = BTreeMap::new();
    let mut rating_sum = 0i64;
    for id in &server {
        if let Some(data) = server.document(id) {
            *statuses.entry(data.status).or_insert(0) += 1;
            rating_sum += i64::from(data.rating);
        }
    }
    let documents = server.document_count();
    let average_rating = if documents == 0 {
        0.0
    } else {
        rating_sum as f64 / documents as f64
    };

    output_result(
        "Corpus statistics",
        &CorpusStats {
            documents,
            terms: server.index().term_count(),
            statuses,
            average_rating,
        },
        cli_args,
        out,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    const CORPUS: &str = r#"{"id": 0, "text": "white cat and fancy collar", "ratings": [8, -3]}
{"id": 1, "text": "fluffy cat fluffy tail", "ratings": [7, 2, 7]}

{"id": 2, "text": "groomed dog expressive eyes", "status": "banned"}
{"id": 3, "text": "fluffy tail cat", "ratings": [1]}
"#;

    fn write_corpus(dir: &TempDir) -> String {
        let path = dir.path().join("corpus.jsonl");
        fs::write(&path, CORPUS).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn run(argv: &[&str]) -> Result<String> {
        let args = XiphosArgs::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        execute_command(&args, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_read_corpus_defaults() {
        let dir = TempDir::new().unwrap();
        let documents = read_corpus(write_corpus(&dir)).unwrap();

        assert_eq!(documents.len(), 4);
        assert_eq!(documents[0].status, DocumentStatus::Actual);
        assert_eq!(documents[2].status, DocumentStatus::Banned);
        assert!(documents[2].ratings.is_empty());
    }

    #[test]
    fn test_bad_corpus_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.jsonl");
        fs::write(&path, "{\"id\": 0, \"text\": \"cat\"}\nnot json\n").unwrap();

        let err = read_corpus(&path).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_search_command_json() {
        let dir = TempDir::new().unwrap();
        let corpus = write_corpus(&dir);
        let text = run(&[
            "xiphos", "--format", "json", "--stop-words", "and", "search", &corpus, "fluffy cat",
        ])
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let ids: Vec<i64> = value["documents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|document| document["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 3, 0]);
    }

    #[test]
    fn test_match_command() {
        let dir = TempDir::new().unwrap();
        let corpus = write_corpus(&dir);
        let text = run(&["xiphos", "--parallel", "match", &corpus, "1", "tail cat dog"]).unwrap();
        assert_eq!(text, "{ document_id = 1, status = actual, words = cat tail }\n");

        let err = run(&["xiphos", "match", &corpus, "7", "cat"]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_dedup_command() {
        let dir = TempDir::new().unwrap();
        let corpus = write_corpus(&dir);
        let text = run(&["xiphos", "-q", "dedup", &corpus]).unwrap();
        assert!(text.contains("Found duplicate document id 3"));
        assert!(text.contains("3 remaining"));
    }

    #[test]
    fn test_batch_command() {
        let dir = TempDir::new().unwrap();
        let corpus = write_corpus(&dir);
        let queries = dir.path().join("queries.txt");
        fs::write(&queries, "cat -collar\n\ngroomed\n").unwrap();
        let queries = queries.to_string_lossy().into_owned();

        let text = run(&[
            "xiphos", "-f", "json", "batch", &corpus, &queries, "--joined", "-t", "2",
        ])
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_stats_command() {
        let dir = TempDir::new().unwrap();
        let corpus = write_corpus(&dir);
        let text = run(&["xiphos", "--format", "json", "stats", &corpus]).unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["documents"], 4);
        assert_eq!(value["statuses"]["actual"], 3);
        assert_eq!(value["statuses"]["banned"], 1);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let dir = TempDir::new().unwrap();
        let corpus = write_corpus(&dir);
        let err = run(&["xiphos", "search", &corpus, "cat", "--page-size", "0"]).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
