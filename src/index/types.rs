//! Types for suffix array indexing
//!
//! This module defines the offset representations, configuration and
//! metadata shared by construction, search and persistence.

use serde::{Deserialize, Serialize};

/// Magic number for serialized indexes
pub const SA_MAGIC: u32 = 0x41535846; // "FXSA" in little-endian

/// Current version of the serialized format
pub const SA_VERSION: u32 = 1;

/// Header flag: suffix array entries are stored as u64
pub const FLAG_WIDE_OFFSETS: u32 = 0x1;

/// Header for a serialized index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexHeader {
    /// Magic number (SA_MAGIC)
    pub magic: u32,
    /// Version number
    pub version: u32,
    /// Flags (FLAG_WIDE_OFFSETS, remaining bits reserved)
    pub flags: u32,
}

impl IndexHeader {
    /// Size of header in bytes
    pub const SIZE: usize = 4 + 4 + 4; // 12 bytes

    pub fn new(wide: bool) -> Self {
        Self {
            magic: SA_MAGIC,
            version: SA_VERSION,
            flags: if wide { FLAG_WIDE_OFFSETS } else { 0 },
        }
    }

    pub fn is_wide(&self) -> bool {
        self.flags & FLAG_WIDE_OFFSETS != 0
    }
}

/// Integer type used to store suffix array entries.
///
/// `EMPTY` doubles as the "unset" marker during construction, so it must
/// never be a valid offset.
pub trait SuffixOffset: Copy + Ord + Send + Sync + std::fmt::Debug + 'static {
    const EMPTY: Self;
    /// Bytes per entry in the serialized format
    const WIDTH: usize;

    fn from_usize(value: usize) -> Self;
    fn to_usize(self) -> usize;
    fn to_u64(self) -> u64;
    fn write_le(self, buf: &mut Vec<u8>);
    fn read_le(bytes: &[u8]) -> Self;
}

impl SuffixOffset for u32 {
    const EMPTY: Self = u32::MAX;
    const WIDTH: usize = 4;

    #[inline]
    fn from_usize(value: usize) -> Self {
        debug_assert!(value < u32::MAX as usize);
        value as u32
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }

    #[inline]
    fn to_u64(self) -> u64 {
        self as u64
    }

    #[inline]
    fn write_le(self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&bytes[..4]);
        u32::from_le_bytes(raw)
    }
}

impl SuffixOffset for u64 {
    const EMPTY: Self = u64::MAX;
    const WIDTH: usize = 8;

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as u64
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }

    #[inline]
    fn to_u64(self) -> u64 {
        self
    }

    #[inline]
    fn write_le(self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&bytes[..8]);
        u64::from_le_bytes(raw)
    }
}

/// Largest corpus that can use u32 entries (u32::MAX itself is `EMPTY`)
pub const MAX_NARROW_LEN: usize = u32::MAX as usize - 1;

/// The sorted suffix array, stored at the narrowest width that fits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Offsets {
    Narrow(Vec<u32>),
    Wide(Vec<u64>),
}

impl Offsets {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Offsets::Narrow(sa) => sa.len(),
            Offsets::Wide(sa) => sa.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Corpus offset stored at suffix array position `i`
    #[inline]
    pub fn get(&self, i: usize) -> usize {
        match self {
            Offsets::Narrow(sa) => sa[i] as usize,
            Offsets::Wide(sa) => sa[i] as usize,
        }
    }

    pub fn is_wide(&self) -> bool {
        matches!(self, Offsets::Wide(_))
    }

    /// Bytes per entry
    pub fn width(&self) -> usize {
        match self {
            Offsets::Narrow(_) => u32::WIDTH,
            Offsets::Wide(_) => u64::WIDTH,
        }
    }

    /// Copy positions `[lo, hi)` out as corpus offsets
    pub fn slice_to_vec(&self, lo: usize, hi: usize) -> Vec<usize> {
        match self {
            Offsets::Narrow(sa) => sa[lo..hi].iter().map(|&p| p as usize).collect(),
            Offsets::Wide(sa) => sa[lo..hi].iter().map(|&p| p as usize).collect(),
        }
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.slice_to_vec(0, self.len())
    }
}

/// Half-open range `[lo, hi)` of suffix array positions whose suffixes
/// share a prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MatchRange {
    pub lo: usize,
    pub hi: usize,
}

impl MatchRange {
    pub const EMPTY: MatchRange = MatchRange { lo: 0, hi: 0 };

    #[inline]
    pub fn len(&self) -> usize {
        self.hi - self.lo
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lo >= self.hi
    }
}

/// How much of a decoded suffix array is checked before it is trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerifyMode {
    /// Permutation plus every adjacent pair, in linear time
    #[default]
    Full,
    /// Permutation plus every `stride`-th adjacent pair, compared directly
    Sampled { stride: usize },
}

/// Entry width selection for construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OffsetWidth {
    /// u32 when the corpus fits, u64 otherwise
    #[default]
    Auto,
    /// Always u64
    Wide,
}

/// Configuration for building and loading indexes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Verification applied when decoding (default: full)
    pub verify: VerifyMode,
    /// Corpus size above which verification runs in parallel
    pub parallel_threshold: usize,
    /// Suffix array entry width for newly built indexes
    pub offset_width: OffsetWidth,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            verify: VerifyMode::Full,
            parallel_threshold: 100_000,
            offset_width: OffsetWidth::Auto,
        }
    }
}

/// Statistics about an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Corpus length in bytes (also the number of suffixes)
    pub corpus_len: usize,
    /// Bytes per suffix array entry
    pub offset_width: usize,
    /// Size of the serialized form
    pub encoded_size: usize,
    /// Heap bytes held by corpus and suffix array
    pub heap_size: usize,
}
