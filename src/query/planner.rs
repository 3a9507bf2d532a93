//! Literal prefix analysis for regex patterns
//!
//! A pattern whose every match begins with the same literal bytes can be
//! narrowed with a suffix array lookup before any regex runs. When the
//! pattern is exactly that literal, no regex needs to run at all.

use regex::bytes::{Regex, RegexBuilder};
use regex_syntax::ParserBuilder;
use regex_syntax::hir::Hir;
use regex_syntax::hir::literal::{ExtractKind, Extractor};
use std::ops::Range;

/// Literal bytes that begin every match of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralPrefix<'a> {
    /// Common prefix of all matches; empty when none is known
    pub bytes: &'a [u8],
    /// The pattern matches exactly `bytes` and nothing else
    pub complete: bool,
}

impl LiteralPrefix<'_> {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Match-finding capability needed to scan an index.
///
/// Implementations must agree with each other: every match reported by
/// `find_iter` or `match_at` starts with `literal_prefix().bytes`.
pub trait Matcher {
    /// Bytes every match starts with
    fn literal_prefix(&self) -> LiteralPrefix<'_>;

    /// Successive non-overlapping leftmost matches over `haystack`
    fn find_iter<'h>(&'h self, haystack: &'h [u8]) -> impl Iterator<Item = Range<usize>> + 'h;

    /// End of the match that starts exactly at `at`, if there is one
    fn match_at(&self, haystack: &[u8], at: usize) -> Option<usize>;
}

/// A compiled regular expression prepared for index scans
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    /// Same expression, only matching at the start of the haystack
    anchored: Regex,
    prefix: Vec<u8>,
    complete: bool,
}

impl Pattern {
    /// Compile `pattern` with the default byte-regex settings.
    ///
    /// Flags must be written inline (`(?i)`, `(?-u)`, ...) so that the
    /// prefix analysis sees the same expression the regex engine runs.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        let anchored = RegexBuilder::new(&format!(r"\A(?:{pattern})")).build()?;
        let (prefix, complete) = extract_literal_prefix(pattern);

        Ok(Self {
            regex,
            anchored,
            prefix,
            complete,
        })
    }

    /// The underlying regex
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Matcher for Pattern {
    fn literal_prefix(&self) -> LiteralPrefix<'_> {
        LiteralPrefix {
            bytes: &self.prefix,
            complete: self.complete,
        }
    }

    fn find_iter<'h>(&'h self, haystack: &'h [u8]) -> impl Iterator<Item = Range<usize>> + 'h {
        self.regex.find_iter(haystack).map(|m| m.range())
    }

    fn match_at(&self, haystack: &[u8], at: usize) -> Option<usize> {
        self.anchored.find(&haystack[at..]).map(|m| at + m.end())
    }
}

/// Extract the literal prefix shared by all matches of `pattern`.
///
/// Returns the prefix and whether the pattern is exactly that literal.
/// Patterns with look-around assertions get no prefix: checking a match at
/// a candidate offset without the surrounding bytes could accept matches
/// that `^`, `$` or `\b` would reject in context.
fn extract_literal_prefix(pattern: &str) -> (Vec<u8>, bool) {
    let hir = match ParserBuilder::new().utf8(false).build().parse(pattern) {
        Ok(hir) => hir,
        Err(_) => return (Vec::new(), false),
    };

    if !hir.properties().look_set().is_empty() {
        return (Vec::new(), false);
    }

    prefix_of(&hir)
}

fn prefix_of(hir: &Hir) -> (Vec<u8>, bool) {
    let seq = Extractor::new().kind(ExtractKind::Prefix).extract(hir);

    let Some(literals) = seq.literals() else {
        return (Vec::new(), false);
    };
    let Some(common) = seq.longest_common_prefix() else {
        return (Vec::new(), false);
    };

    let complete = literals.len() == 1 && literals[0].is_exact();
    (common.to_vec(), complete)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix(pattern: &str) -> (Vec<u8>, bool) {
        extract_literal_prefix(pattern)
    }

    #[test]
    fn test_extract_regex_prefix() {
        assert_eq!(prefix("hello.*world"), (b"hello".to_vec(), false));
        assert_eq!(prefix("ana"), (b"ana".to_vec(), true));
        assert_eq!(prefix("ab[cd]"), (b"ab".to_vec(), false));
        assert_eq!(prefix(r"foo\d+"), (b"foo".to_vec(), false));
    }

    #[test]
    fn test_escaped_literal_is_complete() {
        assert_eq!(prefix(r"a\.b"), (b"a.b".to_vec(), true));
        assert_eq!(prefix(r"(?-u)\x00\xff"), (vec![0x00, 0xff], true));
        // Without (?-u), \xff is U+00FF and matches its UTF-8 encoding
        assert_eq!(prefix(r"\xff"), (vec![0xc3, 0xbf], true));
    }

    #[test]
    fn test_alternation_common_prefix() {
        assert_eq!(prefix("abc|abd"), (b"ab".to_vec(), false));
        assert_eq!(prefix("abc|xyz").0, Vec::<u8>::new());
    }

    #[test]
    fn test_no_prefix() {
        assert_eq!(prefix(".*"), (Vec::new(), false));
        assert_eq!(prefix("a*b"), (Vec::new(), false));
        assert_eq!(prefix("(?i)hello").0, Vec::<u8>::new());
        assert_eq!(prefix("[a-z]+"), (Vec::new(), false));
    }

    #[test]
    fn test_look_around_disables_prefix() {
        assert_eq!(prefix("^foo"), (Vec::new(), false));
        assert_eq!(prefix("foo$"), (Vec::new(), false));
        assert_eq!(prefix(r"\bfoo\b"), (Vec::new(), false));
    }

    #[test]
    fn test_pattern_matcher() {
        let pattern = Pattern::new("an+a").unwrap();
        assert_eq!(pattern.literal_prefix().bytes, b"an");
        assert!(!pattern.literal_prefix().complete);

        let hay = b"bannana";
        assert_eq!(pattern.match_at(hay, 1), Some(5));
        assert_eq!(pattern.match_at(hay, 0), None);
        assert_eq!(pattern.match_at(hay, 2), None);
        assert_eq!(pattern.match_at(hay, 4), Some(7));
        assert_eq!(pattern.find_iter(hay).collect::<Vec<_>>(), vec![1..5]);
    }

    #[test]
    fn test_anchoring_respects_alternation() {
        // Without grouping, "\Aab|cd" would let "cd" match anywhere
        let pattern = Pattern::new("ab|cd").unwrap();
        assert_eq!(pattern.match_at(b"xxcd", 0), None);
        assert_eq!(pattern.match_at(b"xxcd", 2), Some(4));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(Pattern::new("(unclosed").is_err());
    }
}
