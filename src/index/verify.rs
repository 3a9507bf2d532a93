//! Validation of decoded suffix arrays
//!
//! A decoded array is only trusted after it has been shown to be a
//! permutation of `[0, n)` in suffix order. Full verification is linear:
//! with `rank` the inverse permutation, an adjacent pair `(a, b)` is in
//! order iff `text[a] < text[b]`, or the first bytes are equal and
//! `rank[a + 1] < rank[b + 1]` (the empty suffix ranking lowest). If every
//! adjacent pair passes, the whole array is sorted. Sampled verification
//! builds the same ranks but checks only every `stride`-th pair.

use super::types::{IndexConfig, SuffixOffset, VerifyMode};
use crate::error::CorruptIndex;
use std::cmp::Ordering;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Check that `sa` is the suffix array of `text`
pub fn verify_suffix_array<O: SuffixOffset>(
    text: &[u8],
    sa: &[O],
    config: &IndexConfig,
) -> Result<(), CorruptIndex> {
    let parallel = text.len() > config.parallel_threshold;
    debug!(
        corpus_len = text.len(),
        mode = ?config.verify,
        parallel,
        "verifying suffix array"
    );

    check_range(text.len(), sa)?;

    match config.verify {
        VerifyMode::Full => verify_order(text, sa, 1, parallel),
        VerifyMode::Sampled { stride } => verify_order(text, sa, stride.max(1), parallel),
    }
}

/// Every entry must be a corpus offset
fn check_range<O: SuffixOffset>(len: usize, sa: &[O]) -> Result<(), CorruptIndex> {
    match sa.iter().position(|&p| p.to_u64() >= len as u64) {
        Some(position) => Err(CorruptIndex::OutOfRange {
            position,
            value: sa[position].to_u64(),
            len,
        }),
        None => Ok(()),
    }
}

/// Check the permutation, then every `stride`-th adjacent pair.
///
/// Each pair costs O(1) through the rank array, so verification is linear
/// in `n` whatever the stride or the repetitiveness of the corpus.
fn verify_order<O: SuffixOffset>(
    text: &[u8],
    sa: &[O],
    stride: usize,
    parallel: bool,
) -> Result<(), CorruptIndex> {
    let n = text.len();

    // Inverse permutation; a second write to a slot is a duplicate
    let mut rank = vec![O::EMPTY; n];
    for (i, &p) in sa.iter().enumerate() {
        let p = p.to_usize();
        if rank[p] != O::EMPTY {
            return Err(CorruptIndex::Duplicate { position: i, value: p });
        }
        rank[p] = O::from_usize(i);
    }

    if n < 2 {
        return Ok(());
    }

    let next_rank = |p: usize| -> Option<usize> { (p + 1 < n).then(|| rank[p + 1].to_usize()) };
    let in_order = |i: usize| -> bool {
        let (a, b) = (sa[i].to_usize(), sa[i + 1].to_usize());
        match text[a].cmp(&text[b]) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => next_rank(a) < next_rank(b),
        }
    };

    match first_failure(n - 1, stride, parallel, in_order) {
        Some(position) => Err(CorruptIndex::Unordered { position }),
        None => Ok(()),
    }
}

/// Smallest `i` in `(0..count).step_by(stride)` for which `check` fails
fn first_failure<F>(count: usize, stride: usize, parallel: bool, check: F) -> Option<usize>
where
    F: Fn(usize) -> bool + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return (0..count)
                .into_par_iter()
                .step_by(stride)
                .find_first(|&i| !check(i));
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    (0..count).step_by(stride).find(|&i| !check(i))
}
