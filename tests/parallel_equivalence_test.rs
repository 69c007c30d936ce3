//! The sequential and parallel paths must agree on randomly generated corpora.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use xiphos::error::Result;
use xiphos::prelude::*;

const VOCABULARY: [&str; 24] = [
    "cat", "dog", "bird", "fish", "white", "black", "fluffy", "groomed", "tail", "collar",
    "eyes", "fancy", "big", "small", "curly", "hair", "rat", "pet", "funny", "nasty", "and",
    "with", "in", "on",
];

const STATUSES: [DocumentStatus; 4] = [
    DocumentStatus::Actual,
    DocumentStatus::Irrelevant,
    DocumentStatus::Banned,
    DocumentStatus::Removed,
];

fn random_text(rng: &mut StdRng, max_words: usize) -> String {
    let count = rng.random_range(1..=max_words);
    (0..count)
        .map(|_| VOCABULARY[rng.random_range(0..VOCABULARY.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

fn random_query(rng: &mut StdRng) -> String {
    let count = rng.random_range(1..=6);
    (0..count)
        .map(|_| {
            let word = VOCABULARY[rng.random_range(0..VOCABULARY.len())];
            if rng.random_bool(0.25) {
                format!("-{word}")
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn random_server(seed: u64, documents: i32) -> Result<SearchServer> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut server = SearchServer::from_stop_words_text("and with in on")?;
    for id in 0..documents {
        let text = random_text(&mut rng, 12);
        let status = STATUSES[rng.random_range(0..STATUSES.len())];
        let ratings: Vec<i32> = (0..rng.random_range(0..4))
            .map(|_| rng.random_range(-10..=10))
            .collect();
        server.add_document(id, &text, status, &ratings)?;
    }
    Ok(server)
}

fn assert_same_documents(mut lhs: Vec<Document>, mut rhs: Vec<Document>, epsilon: f64) {
    lhs.sort_by_key(|document| document.id);
    rhs.sort_by_key(|document| document.id);
    assert_eq!(lhs.len(), rhs.len());
    for (l, r) in lhs.iter().zip(&rhs) {
        assert_eq!(l.id, r.id);
        assert_eq!(l.rating, r.rating);
        assert!((l.relevance - r.relevance).abs() < epsilon);
    }
}

#[test]
fn test_ranking_paths_agree() -> Result<()> {
    let server = random_server(42, 400)?;
    let epsilon = server.config().relevance_epsilon;
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let raw_query = random_query(&mut rng);
        let sequential =
            server.find_all_documents(ExecutionMode::Sequential, &raw_query, |_, _, _| true)?;
        let parallel =
            server.find_all_documents(ExecutionMode::Parallel, &raw_query, |_, _, _| true)?;
        assert_same_documents(sequential, parallel, epsilon);

        let rated = |_: DocId, status: DocumentStatus, rating: i32| {
            status != DocumentStatus::Banned && rating >= 0
        };
        let sequential =
            server.find_all_documents(ExecutionMode::Sequential, &raw_query, rated)?;
        let parallel = server.find_all_documents(ExecutionMode::Parallel, &raw_query, rated)?;
        assert_same_documents(sequential, parallel, epsilon);
    }
    Ok(())
}

#[test]
fn test_top_documents_agree() -> Result<()> {
    let server = random_server(1234, 200)?;
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..30 {
        let raw_query = random_query(&mut rng);
        let sequential = server.find_top_documents_with_mode(ExecutionMode::Sequential, &raw_query)?;
        let parallel = server.find_top_documents_with_mode(ExecutionMode::Parallel, &raw_query)?;
        assert!(sequential.len() <= 5);
        assert_eq!(sequential.len(), parallel.len());
        let sequential_relevance: Vec<f64> = sequential.iter().map(|d| d.relevance).collect();
        let parallel_relevance: Vec<f64> = parallel.iter().map(|d| d.relevance).collect();
        for (l, r) in sequential_relevance.iter().zip(&parallel_relevance) {
            assert!((l - r).abs() < 1e-6);
        }
    }
    Ok(())
}

#[test]
fn test_matching_paths_agree() -> Result<()> {
    let server = random_server(5, 100)?;
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..50 {
        let raw_query = random_query(&mut rng);
        let id = rng.random_range(0..100);
        let sequential = server.match_document_with(ExecutionMode::Sequential, &raw_query, id)?;
        let parallel = server.match_document_with(ExecutionMode::Parallel, &raw_query, id)?;
        assert_eq!(sequential, parallel);
    }
    Ok(())
}

#[test]
fn test_removal_paths_agree() -> Result<()> {
    let mut sequential = random_server(77, 150)?;
    let mut parallel = random_server(77, 150)?;
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..60 {
        let id = rng.random_range(0..150);
        let lhs = sequential.remove_document_with(ExecutionMode::Sequential, id);
        let rhs = parallel.remove_document_with(ExecutionMode::Parallel, id);
        assert_eq!(lhs.is_ok(), rhs.is_ok());
    }

    assert_eq!(sequential.document_count(), parallel.document_count());
    assert_eq!(sequential.index().term_count(), parallel.index().term_count());
    assert!(sequential.index().is_consistent());
    assert!(parallel.index().is_consistent());
    for id in &sequential {
        assert_eq!(sequential.word_frequencies(id), parallel.word_frequencies(id));
    }
    Ok(())
}

#[test]
fn test_shared_server_across_threads() -> Result<()> {
    let server = random_server(9, 120)?;
    let expected = server.find_top_documents("cat fluffy -collar")?;

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let parallel = server
                    .find_top_documents_with_mode(ExecutionMode::Parallel, "cat fluffy -collar")
                    .unwrap();
                assert_same_documents(parallel, expected.clone(), 1e-6);
            });
        }
    });
    Ok(())
}
