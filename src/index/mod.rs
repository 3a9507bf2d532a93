//! Suffix array index over an immutable byte corpus
//!
//! This module provides O(m log n) exact substring search using a suffix
//! array kept next to the corpus it was built from.
//!
//! ## Architecture
//!
//! - `builder`: SA-IS construction of the suffix array
//! - `search`: binary search for the range of suffixes sharing a prefix
//! - `writer`: serializes the corpus and suffix array
//! - `reader`: decodes and validates a serialized index
//! - `verify`: checks that a decoded array is a sorted permutation
//! - `types`: offsets, configuration and format constants
//!
//! ## File Format
//!
//! A single stream: a 12-byte header (magic, version, flags), the corpus
//! length as a varint, the corpus bytes, then one little-endian u32 or u64
//! per suffix array entry.

pub mod builder;
pub mod reader;
pub mod search;
pub mod types;
pub mod verify;
pub mod writer;

pub use types::{IndexConfig, IndexStats, OffsetWidth, Offsets, VerifyMode};

use crate::utils::varint_len;
use std::fmt;

/// A byte corpus together with its sorted suffix array.
///
/// Immutable once built or decoded, so a shared reference can be handed to
/// any number of threads.
#[derive(Clone, PartialEq, Eq)]
pub struct Index {
    /// The indexed bytes
    data: Vec<u8>,
    /// Corpus offsets in suffix order
    sa: Offsets,
}

impl Index {
    /// Build an index over `data` with the default configuration
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self::with_config(data, &IndexConfig::default())
    }

    /// Build an index over `data`
    pub fn with_config(data: impl Into<Vec<u8>>, config: &IndexConfig) -> Self {
        let data = data.into();
        let sa = builder::build_suffix_array(&data, config.offset_width);
        Self { data, sa }
    }

    /// Assemble an index from parts that have already been validated
    pub(crate) fn from_parts(data: Vec<u8>, sa: Offsets) -> Self {
        debug_assert_eq!(data.len(), sa.len());
        Self { data, sa }
    }

    /// The indexed corpus
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// The suffix array
    pub fn offsets(&self) -> &Offsets {
        &self.sa
    }

    /// Corpus length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Give the corpus back, dropping the suffix array
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Get statistics about this index
    pub fn stats(&self) -> IndexStats {
        let n = self.data.len();
        IndexStats {
            corpus_len: n,
            offset_width: self.sa.width(),
            encoded_size: types::IndexHeader::SIZE
                + varint_len(n as u64)
                + n
                + n * self.sa.width(),
            heap_size: self.data.capacity() + n * self.sa.width(),
        }
    }
}

impl fmt::Debug for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("len", &self.data.len())
            .field("wide", &self.sa.is_wide())
            .finish()
    }
}
