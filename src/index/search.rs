//! Substring lookup over the suffix array
//!
//! All suffixes starting with a pattern occupy one contiguous run of the
//! suffix array, found with two binary searches in O(m log n).

use super::Index;
use super::types::MatchRange;

impl Index {
    /// Find the range `[lo, hi)` of suffix array positions whose suffixes
    /// start with `pattern`
    pub(crate) fn search(&self, pattern: &[u8]) -> MatchRange {
        if pattern.is_empty() || self.sa.is_empty() {
            return MatchRange::EMPTY;
        }

        let lo = self.lower_bound(pattern);
        let hi = self.upper_bound(pattern, lo);
        MatchRange { lo, hi }
    }

    /// First index whose suffix is not less than `pattern` when both are
    /// cut to the shorter length
    fn lower_bound(&self, pattern: &[u8]) -> usize {
        let mut lo = 0;
        let mut hi = self.sa.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let suffix = self.suffix(mid);

            let cmp_len = pattern.len().min(suffix.len());
            if &suffix[..cmp_len] < pattern {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        lo
    }

    /// First index at or after `start` whose suffix does NOT start with
    /// `pattern`
    fn upper_bound(&self, pattern: &[u8], start: usize) -> usize {
        let mut lo = start;
        let mut hi = self.sa.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.suffix(mid).starts_with(pattern) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        lo
    }

    /// Suffix starting at the corpus offset stored in suffix array slot `i`
    #[inline]
    fn suffix(&self, i: usize) -> &[u8] {
        &self.data[self.sa.get(i)..]
    }

    /// Offsets at which `pattern` occurs in the corpus.
    ///
    /// With `limit == None` every occurrence is returned; otherwise at most
    /// `limit`. The empty pattern matches nothing. Offsets come back in
    /// suffix order, not corpus order.
    ///
    /// ```
    /// let index = fxsa::Index::new(b"banana".to_vec());
    /// let mut hits = index.lookup(b"ana", None);
    /// hits.sort_unstable();
    /// assert_eq!(hits, vec![1, 3]);
    /// ```
    pub fn lookup(&self, pattern: &[u8], limit: Option<usize>) -> Vec<usize> {
        if limit == Some(0) {
            return Vec::new();
        }

        let range = self.search(pattern);
        let hi = match limit {
            Some(limit) => range.lo + limit.min(range.len()),
            None => range.hi,
        };

        self.sa.slice_to_vec(range.lo, hi)
    }

    /// Number of occurrences of `pattern`, without collecting offsets
    pub fn count(&self, pattern: &[u8]) -> usize {
        self.search(pattern).len()
    }

    /// Check if `pattern` occurs anywhere in the corpus
    pub fn contains(&self, pattern: &[u8]) -> bool {
        !self.search(pattern).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut offsets: Vec<usize>) -> Vec<usize> {
        offsets.sort_unstable();
        offsets
    }

    fn naive_occurrences(text: &[u8], pattern: &[u8]) -> Vec<usize> {
        if pattern.is_empty() || pattern.len() > text.len() {
            return Vec::new();
        }
        (0..=text.len() - pattern.len())
            .filter(|&i| &text[i..i + pattern.len()] == pattern)
            .collect()
    }

    #[test]
    fn test_search_banana() {
        let index = Index::new(b"banana".to_vec());

        assert_eq!(sorted(index.lookup(b"ana", None)), vec![1, 3]);
        assert_eq!(sorted(index.lookup(b"na", None)), vec![2, 4]);
        assert_eq!(sorted(index.lookup(b"a", None)), vec![1, 3, 5]);
        assert_eq!(index.lookup(b"banana", None), vec![0]);
        assert!(index.lookup(b"bananas", None).is_empty());
        assert!(index.lookup(b"x", None).is_empty());
    }

    #[test]
    fn test_search_range() {
        let index = Index::new(b"banana".to_vec());

        // a, ana, anana, banana, na, nana
        assert_eq!(index.search(b"a"), MatchRange { lo: 0, hi: 3 });
        assert_eq!(index.search(b"ana"), MatchRange { lo: 1, hi: 3 });
        assert_eq!(index.search(b"n"), MatchRange { lo: 4, hi: 6 });
        assert!(index.search(b"c").is_empty());
        assert!(index.search(b"").is_empty());
    }

    #[test]
    fn test_empty_pattern_and_zero_limit() {
        let index = Index::new(b"aaaa".to_vec());

        assert!(index.lookup(b"", None).is_empty());
        assert!(index.lookup(b"", Some(3)).is_empty());
        assert!(index.lookup(b"a", Some(0)).is_empty());
        assert_eq!(index.count(b""), 0);
        assert!(!index.contains(b""));
    }

    #[test]
    fn test_limit() {
        let index = Index::new(b"abababab".to_vec());

        assert_eq!(index.lookup(b"ab", None).len(), 4);
        assert_eq!(index.lookup(b"ab", Some(2)).len(), 2);
        assert_eq!(index.lookup(b"ab", Some(100)).len(), 4);

        // Limited results are a subset of the full set
        let all = index.lookup(b"ab", None);
        for offset in index.lookup(b"ab", Some(3)) {
            assert!(all.contains(&offset));
        }
    }

    #[test]
    fn test_limit_near_integer_bound() {
        let index = Index::new(b"banana".to_vec());

        // "na" starts past the first slot, so lo + limit would overflow
        for limit in [usize::MAX, usize::MAX - 1, usize::MAX - 5] {
            assert_eq!(sorted(index.lookup(b"na", Some(limit))), vec![2, 4]);
            assert_eq!(sorted(index.lookup(b"a", Some(limit))), vec![1, 3, 5]);
        }
        assert_eq!(index.lookup(b"na", Some(usize::MAX)), index.lookup(b"na", None));
    }

    #[test]
    fn test_count_matches() {
        let text = b"the quick brown fox jumps over the lazy dog; the end";
        let index = Index::new(text.to_vec());

        assert_eq!(index.count(b"the"), 3);
        assert_eq!(index.count(b"o"), 4);
        assert_eq!(index.count(b"xyz123"), 0);
        assert!(index.contains(b"lazy"));
        assert!(!index.contains(b"lazier"));
    }

    #[test]
    fn test_overlapping_occurrences() {
        let index = Index::new(b"aaaaa".to_vec());

        assert_eq!(sorted(index.lookup(b"aa", None)), vec![0, 1, 2, 3]);
        assert_eq!(index.count(b"aaaaa"), 1);
        assert_eq!(index.count(b"aaaaaa"), 0);
    }

    #[test]
    fn test_against_naive_scan() {
        let text = b"GATTACAGATTACACATTAGGATTACA\x00\x00GAT\xffTACA";
        let index = Index::new(text.to_vec());

        for len in 1..6 {
            for start in 0..text.len() - len {
                let pattern = &text[start..start + len];
                let expected = naive_occurrences(text, pattern);
                assert_eq!(sorted(index.lookup(pattern, None)), expected);
                assert_eq!(index.count(pattern), expected.len());
            }
        }
    }

    #[test]
    fn test_empty_corpus() {
        let index = Index::new(Vec::new());

        assert!(index.lookup(b"a", None).is_empty());
        assert_eq!(index.count(b"a"), 0);
    }
}
