//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::ops::Range;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Route `tracing` output to the test harness, filtered by `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Every offset where `pattern` occurs, by brute force
pub fn naive_occurrences(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|&i| text[i..].starts_with(pattern))
        .collect()
}

/// Suffix array by sorting every suffix
pub fn naive_suffix_array(text: &[u8]) -> Vec<usize> {
    let mut sa: Vec<usize> = (0..text.len()).collect();
    sa.sort_by(|&a, &b| text[a..].cmp(&text[b..]));
    sa
}

/// Leftmost-first non-overlapping matches, as one pass of the regex finds them
pub fn scan_matches(text: &[u8], pattern: &str) -> Vec<Range<usize>> {
    let regex = regex::bytes::Regex::new(pattern).unwrap();
    regex.find_iter(text).map(|m| m.range()).collect()
}

/// A corpus with long repeats and a small alphabet
pub fn repetitive_corpus(len: usize) -> Vec<u8> {
    let unit = b"abracadabra abracadabrx ";
    unit.iter().copied().cycle().take(len).collect()
}
