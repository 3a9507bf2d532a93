//! Regex scans over an index
//!
//! Patterns without a literal prefix are matched by a single left-to-right
//! pass over the corpus. Patterns with one start from the offsets the
//! suffix array reports for that prefix, so a limited scan only touches the
//! neighborhood of candidate matches.

use crate::index::Index;
use crate::query::planner::Matcher;
use std::ops::Range;
use tracing::trace;

impl Index {
    /// Non-overlapping matches of `pattern` in the corpus, sorted by start.
    ///
    /// With `limit == None` the result is exactly what one leftmost-first
    /// scan of the corpus produces. With `Some(n)` at most `n` matches are
    /// returned; each is a true, non-overlapping match, but they need not be
    /// the first `n` a scan would find.
    ///
    /// ```
    /// use fxsa::{Index, Pattern};
    ///
    /// let index = Index::new(b"banana".to_vec());
    /// let pattern = Pattern::new("ana").unwrap();
    /// assert_eq!(index.find_all_index(&pattern, None), vec![1..4]);
    /// ```
    pub fn find_all_index<M: Matcher>(&self, pattern: &M, limit: Option<usize>) -> Vec<Range<usize>> {
        if limit == Some(0) {
            return Vec::new();
        }

        let prefix = pattern.literal_prefix();
        if prefix.is_empty() {
            trace!(?limit, "no literal prefix, scanning corpus");
            let matches = pattern.find_iter(self.bytes());
            return match limit {
                Some(n) => matches.take(n).collect(),
                None => matches.collect(),
            };
        }

        if prefix.complete {
            let len = prefix.bytes.len();
            self.collect_candidates(prefix.bytes, limit, |start| Some(start + len))
        } else {
            self.collect_candidates(prefix.bytes, limit, |start| {
                pattern.match_at(self.bytes(), start)
            })
        }
    }

    /// Turn prefix occurrences into non-overlapping matches.
    ///
    /// Overlap elimination can leave fewer than `limit` matches even though
    /// more exist. When the lookup was cut off at its limit, it is repeated
    /// with a larger one until enough matches are found or the lookup
    /// returns everything.
    fn collect_candidates<F>(&self, prefix: &[u8], limit: Option<usize>, match_at: F) -> Vec<Range<usize>>
    where
        F: Fn(usize) -> Option<usize>,
    {
        let mut lookup_limit = limit;
        loop {
            let mut starts = self.lookup(prefix, lookup_limit);
            if starts.is_empty() {
                return Vec::new();
            }
            starts.sort_unstable();

            let mut matches = Vec::new();
            let mut prev_end = 0;
            for start in starts.iter().copied() {
                if limit == Some(matches.len()) {
                    break;
                }
                if start < prev_end {
                    continue;
                }
                if let Some(end) = match_at(start) {
                    matches.push(start..end);
                    prev_end = end;
                }
            }

            let (Some(limit), Some(looked_up)) = (limit, lookup_limit) else {
                return matches;
            };
            if matches.len() >= limit || starts.len() < looked_up {
                return matches;
            }

            let next = looked_up.saturating_add((limit - matches.len()).saturating_mul(2));
            trace!(found = matches.len(), limit, next, "widening candidate lookup");
            lookup_limit = Some(next);
        }
    }
}
