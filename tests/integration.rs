//! End-to-end tests: build, persist, reload and query an index.

mod common;

use common::{init_tracing, naive_occurrences, repetitive_corpus, scan_matches};
use fxsa::{CorruptIndex, Error, Index, IndexConfig, Pattern, VerifyMode};
use std::fs;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::sync::Arc;
use std::thread;
use tempfile::tempdir;

#[test]
fn test_large_corpus_roundtrip_through_file() {
    init_tracing();
    // Above the default parallel threshold so verification splits work
    let corpus = repetitive_corpus(250_000);
    let index = Index::new(corpus.clone());

    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("large.fxsa");
    index.save(&path).unwrap();
    assert_eq!(
        fs::metadata(&path).unwrap().len() as usize,
        index.stats().encoded_size
    );

    let opened = Index::open(&path).unwrap();
    assert_eq!(opened, index);

    let mut hits = opened.lookup(b"abracadabrx", None);
    hits.sort_unstable();
    assert_eq!(hits, naive_occurrences(&corpus, b"abracadabrx"));
}

#[test]
fn test_corruption_in_large_file_detected() {
    init_tracing();
    let index = Index::new(repetitive_corpus(150_000));
    let mut bytes = index.to_bytes();

    // Swap two suffix array entries near the end
    let n = index.len();
    let sa_start = bytes.len() - n * 4;
    let (a, b) = (sa_start + (n - 2) * 4, sa_start + (n - 1) * 4);
    for k in 0..4 {
        bytes.swap(a + k, b + k);
    }

    let err = Index::from_bytes(&bytes).unwrap_err();
    assert!(
        matches!(err, Error::Corrupt(CorruptIndex::Unordered { .. })),
        "expected ordering failure, got {err:?}"
    );
}

#[test]
fn test_sampled_verification_still_checks_permutation() {
    let index = Index::new(repetitive_corpus(10_000));
    let mut bytes = index.to_bytes();
    let len = bytes.len();
    // Make the last entry equal the first
    let first = bytes[len - 10_000 * 4..len - 10_000 * 4 + 4].to_vec();
    bytes[len - 4..].copy_from_slice(&first);

    let config = IndexConfig {
        verify: VerifyMode::Sampled { stride: 1_000 },
        ..Default::default()
    };
    let err = Index::from_bytes_with(&bytes, &config).unwrap_err();
    assert!(matches!(err, Error::Corrupt(CorruptIndex::Duplicate { .. })));
}

#[test]
fn test_several_indexes_in_one_stream() {
    let first = Index::new(b"first corpus".to_vec());
    let second = Index::new(b"second corpus".to_vec());

    let mut stream = Cursor::new(Vec::new());
    first.write_to(&mut stream).unwrap();
    second.write_to(&mut stream).unwrap();
    stream.write_all(b"trailer").unwrap();
    stream.seek(SeekFrom::Start(0)).unwrap();

    assert_eq!(Index::read_from(&mut stream).unwrap(), first);
    assert_eq!(Index::read_from(&mut stream).unwrap(), second);

    let mut rest = Vec::new();
    stream.read_to_end(&mut rest).unwrap();
    assert_eq!(rest, b"trailer");
}

#[test]
fn test_concurrent_queries() {
    let corpus = repetitive_corpus(20_000);
    let index = Arc::new(Index::new(corpus.clone()));
    let pattern = Arc::new(Pattern::new("ab+ra").unwrap());
    let expected_hits = naive_occurrences(&corpus, b"cadab");
    let expected_matches = scan_matches(&corpus, "ab+ra");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let index = Arc::clone(&index);
            let pattern = Arc::clone(&pattern);
            thread::spawn(move || {
                let mut hits = index.lookup(b"cadab", None);
                hits.sort_unstable();
                (hits, index.find_all_index(pattern.as_ref(), None))
            })
        })
        .collect();

    for handle in handles {
        let (hits, matches) = handle.join().unwrap();
        assert_eq!(hits, expected_hits);
        assert_eq!(matches, expected_matches);
    }
}

#[test]
fn test_find_all_on_reloaded_index() {
    let text = b"error: disk full\nwarn: retry\nerror: timeout\nerror: disk full\n";
    let index = Index::from_bytes(&Index::new(text.to_vec()).to_bytes()).unwrap();

    let pattern = Pattern::new(r"error: [a-z ]+").unwrap();
    let all = index.find_all_index(&pattern, None);
    assert_eq!(all, scan_matches(text, r"error: [a-z ]+"));
    assert_eq!(all.len(), 3);

    let two = index.find_all_index(&pattern, Some(2));
    assert_eq!(two.len(), 2);
    for m in &two {
        assert!(all.contains(m));
    }
}
