//! Criterion benchmarks for the xiphos search engine.
//!
//! Compares the sequential and parallel paths of ranking, matching and
//! removal on a generated corpus.

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use xiphos::prelude::*;

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    let words = [
        "search", "engine", "full", "text", "index", "query", "document", "field", "term",
        "phrase", "boolean", "vector", "similarity", "relevance", "score", "analysis",
        "tokenization", "ranking", "filtering", "retrieval", "storage", "memory", "data",
        "structure", "performance", "optimization",
    ];

    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 10 + (i % 40);
        let mut doc_words = Vec::with_capacity(doc_length);
        for j in 0..doc_length {
            let word_idx = (i * 7 + j * 13 + i / words.len()) % words.len();
            doc_words.push(words[word_idx]);
        }
        documents.push(doc_words.join(" "));
    }
    documents
}

fn build_server(documents: &[String]) -> SearchServer {
    let mut server = SearchServer::from_stop_words_text("full text").unwrap();
    for (id, text) in documents.iter().enumerate() {
        server
            .add_document(id as DocId, text, DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
    }
    server
}

const QUERY: &str = "search engine relevance ranking -storage -memory";

fn bench_find_top_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_top_documents");
    let server = build_server(&generate_test_documents(10_000));

    for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
        group.bench_function(format!("{mode:?}").to_lowercase(), |b| {
            b.iter(|| {
                let results = server.find_top_documents_with_mode(mode, black_box(QUERY));
                black_box(results)
            })
        });
    }
    group.finish();
}

fn bench_match_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_document");
    let server = build_server(&generate_test_documents(1_000));

    group.throughput(Throughput::Elements(1_000));
    for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
        group.bench_function(format!("{mode:?}").to_lowercase(), |b| {
            b.iter(|| {
                for id in 0..1_000 {
                    let _ = black_box(server.match_document_with(mode, QUERY, id));
                }
            })
        });
    }
    group.finish();
}

fn bench_remove_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_document");
    group.sample_size(20);
    let documents = generate_test_documents(2_000);

    for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
        group.bench_function(format!("{mode:?}").to_lowercase(), |b| {
            b.iter_batched(
                || build_server(&documents),
                |mut server| {
                    for id in 0..100 {
                        server.remove_document_with(mode, id).unwrap();
                    }
                    server
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_batch_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_queries");
    let server = build_server(&generate_test_documents(5_000));
    let queries: Vec<String> = generate_test_documents(200)
        .into_iter()
        .map(|text| text.split(' ').take(4).collect::<Vec<_>>().join(" "))
        .collect();

    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("joined", |b| {
        b.iter(|| black_box(process_queries_joined(&server, &queries)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_find_top_documents,
    bench_match_document,
    bench_remove_document,
    bench_batch_queries
);
criterion_main!(benches);
