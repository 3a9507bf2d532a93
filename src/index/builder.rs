//! Suffix array builder
//!
//! Sorts all suffixes of the corpus with SA-IS (induced sorting), which runs
//! in O(n) time and O(n) extra space. The end of the text acts as a virtual
//! sentinel smaller than every byte, so corpora containing `0x00` need no
//! escaping.
//!
//! ```text
//! text:  b a n a n a
//! type:  L S L S L L      (S: suffix smaller than its successor)
//! LMS:     1   3          (S-type preceded by L-type)
//!
//! sorted suffixes: a, ana, anana, banana, na, nana
//! suffix array:    [5, 3, 1, 0, 4, 2]
//! ```
//!
//! LMS substrings are sorted by one induced pass, named, and, when names
//! repeat, sorted recursively on the reduced string. A second induced pass
//! seeded with the LMS order yields the final array.

use super::types::{MAX_NARROW_LEN, OffsetWidth, Offsets, SuffixOffset};
use std::time::Instant;
use tracing::debug;

/// Inputs shorter than this are sorted by comparing slices directly
const NAIVE_THRESHOLD: usize = 10;

/// Largest byte value, the alphabet bound for the top-level text
const BYTE_UPPER: usize = u8::MAX as usize;

/// Build the suffix array of `text`
///
/// Entries are u32 unless the corpus is too long for them or the caller
/// asks for u64.
pub fn build_suffix_array(text: &[u8], width: OffsetWidth) -> Offsets {
    let start = Instant::now();
    let wide = width == OffsetWidth::Wide || text.len() > MAX_NARROW_LEN;

    let offsets = if wide {
        Offsets::Wide(sais::<u8, u64>(text, BYTE_UPPER))
    } else {
        Offsets::Narrow(sais::<u8, u32>(text, BYTE_UPPER))
    };

    debug!(
        corpus_len = text.len(),
        wide,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "built suffix array"
    );

    offsets
}

/// A character of the text being sorted
trait Symbol: Copy + Ord {
    /// Bucket index of this character
    fn rank(self) -> usize;
}

impl Symbol for u8 {
    #[inline]
    fn rank(self) -> usize {
        self as usize
    }
}

impl Symbol for u32 {
    #[inline]
    fn rank(self) -> usize {
        self as usize
    }
}

impl Symbol for u64 {
    #[inline]
    fn rank(self) -> usize {
        self as usize
    }
}

/// SA-IS over `s`, whose characters all rank in `[0, upper]`
fn sais<S: Symbol, O: SuffixOffset + Symbol>(s: &[S], upper: usize) -> Vec<O> {
    let n = s.len();
    match n {
        0 => return Vec::new(),
        1 => return vec![O::from_usize(0)],
        2 => {
            return if s[0] < s[1] {
                vec![O::from_usize(0), O::from_usize(1)]
            } else {
                vec![O::from_usize(1), O::from_usize(0)]
            };
        }
        _ if n < NAIVE_THRESHOLD => return sort_naive(s),
        _ => {}
    }

    // is_s[i]: suffix i is S-type. The last suffix is L-type because the
    // virtual sentinel after it is smaller than any character.
    let mut is_s = vec![false; n];
    for i in (0..n - 1).rev() {
        is_s[i] = if s[i] == s[i + 1] {
            is_s[i + 1]
        } else {
            s[i] < s[i + 1]
        };
    }

    // bucket_l[c]: first slot of bucket c (where L-types go)
    // bucket_s[c]: first slot of the S-type part of bucket c
    // An S-type character always has a larger character after it, so
    // `rank + 1 <= upper` holds wherever bucket_l is indexed by it.
    let mut bucket_l = vec![0usize; upper + 1];
    let mut bucket_s = vec![0usize; upper + 1];
    for i in 0..n {
        if is_s[i] {
            bucket_l[s[i].rank() + 1] += 1;
        } else {
            bucket_s[s[i].rank()] += 1;
        }
    }
    for c in 0..=upper {
        bucket_s[c] += bucket_l[c];
        if c < upper {
            bucket_l[c + 1] += bucket_s[c];
        }
    }

    let mut lms_index = vec![O::EMPTY; n + 1];
    let mut lms: Vec<O> = Vec::new();
    for i in 1..n {
        if !is_s[i - 1] && is_s[i] {
            lms_index[i] = O::from_usize(lms.len());
            lms.push(O::from_usize(i));
        }
    }
    let m = lms.len();

    let buckets = Buckets {
        l: &bucket_l,
        s: &bucket_s,
    };
    let mut sa = vec![O::EMPTY; n];
    induce(s, &is_s, &buckets, &lms, &mut sa);

    if m == 0 {
        return sa;
    }

    // LMS positions in the order of their LMS substrings
    let sorted_lms: Vec<O> = sa
        .iter()
        .copied()
        .filter(|&v| v != O::EMPTY && lms_index[v.to_usize()] != O::EMPTY)
        .collect();

    // End (inclusive) of the LMS substring starting at `pos`
    let lms_end = |pos: usize| -> usize {
        let next = lms_index[pos].to_usize() + 1;
        if next < m { lms[next].to_usize() } else { n }
    };

    // Name LMS substrings; equal substrings share a name
    let mut reduced = vec![O::from_usize(0); m];
    let mut name = 0usize;
    for pair in sorted_lms.windows(2) {
        let (mut l, mut r) = (pair[0].to_usize(), pair[1].to_usize());
        let (end_l, end_r) = (lms_end(l), lms_end(r));

        let same = end_l - l == end_r - r && {
            while l < end_l && s[l] == s[r] {
                l += 1;
                r += 1;
            }
            l < n && r < n && s[l] == s[r]
        };
        if !same {
            name += 1;
        }
        reduced[lms_index[pair[1].to_usize()].to_usize()] = O::from_usize(name);
    }

    // Order of the LMS suffixes; recursion only matters when names repeat,
    // but the reduced problem is small either way
    let reduced_sa: Vec<O> = sais::<O, O>(&reduced, name);
    let seeds: Vec<O> = reduced_sa.iter().map(|&i| lms[i.to_usize()]).collect();

    induce(s, &is_s, &buckets, &seeds, &mut sa);
    sa
}

struct Buckets<'a> {
    l: &'a [usize],
    s: &'a [usize],
}

/// Induced sort seeded with `lms`, in the given order
fn induce<S: Symbol, O: SuffixOffset>(
    s: &[S],
    is_s: &[bool],
    buckets: &Buckets<'_>,
    lms: &[O],
    sa: &mut [O],
) {
    let n = s.len();
    sa.fill(O::EMPTY);

    let mut heads = buckets.s.to_vec();
    for &pos in lms {
        let c = s[pos.to_usize()].rank();
        sa[heads[c]] = pos;
        heads[c] += 1;
    }

    // L-type suffixes, left to right. The last suffix is induced by the
    // virtual sentinel, so it goes first.
    heads.copy_from_slice(buckets.l);
    let c = s[n - 1].rank();
    sa[heads[c]] = O::from_usize(n - 1);
    heads[c] += 1;
    for i in 0..n {
        let v = sa[i];
        if v == O::EMPTY {
            continue;
        }
        let v = v.to_usize();
        if v >= 1 && !is_s[v - 1] {
            let c = s[v - 1].rank();
            sa[heads[c]] = O::from_usize(v - 1);
            heads[c] += 1;
        }
    }

    // S-type suffixes, right to left, filling each bucket from its end
    let mut tails = buckets.l.to_vec();
    for i in (0..n).rev() {
        let v = sa[i];
        if v == O::EMPTY {
            continue;
        }
        let v = v.to_usize();
        if v >= 1 && is_s[v - 1] {
            let c = s[v - 1].rank() + 1;
            tails[c] -= 1;
            sa[tails[c]] = O::from_usize(v - 1);
        }
    }
}

/// Comparison sort for tiny inputs
fn sort_naive<S: Symbol, O: SuffixOffset>(s: &[S]) -> Vec<O> {
    let mut sa: Vec<usize> = (0..s.len()).collect();
    sa.sort_unstable_by(|&a, &b| s[a..].cmp(&s[b..]));
    sa.into_iter().map(O::from_usize).collect()
}
