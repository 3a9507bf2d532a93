//! Error types for building, persisting and loading an index.

use std::io;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the index codec
#[derive(Debug, Error)]
pub enum Error {
    /// The caller's stream failed; passed through untouched
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Persisted data does not describe a valid index
    #[error("corrupt index: {0}")]
    Corrupt(#[from] CorruptIndex),
}

impl Error {
    /// True when the input was readable but not a valid index.
    ///
    /// Callers typically respond by rebuilding from the source data.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Error::Corrupt(_))
    }
}

/// Reasons a persisted index is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorruptIndex {
    #[error("bad magic number {0:#010x}")]
    BadMagic(u32),

    #[error("unsupported format version {0}")]
    UnsupportedVersion(u32),

    #[error("unknown header flags {0:#x}")]
    UnknownFlags(u32),

    #[error("malformed corpus length")]
    BadLength,

    #[error("corpus length {0} does not fit the offset width")]
    TooLarge(u64),

    #[error("truncated {section}: expected {expected} bytes, found {found}")]
    Truncated {
        section: &'static str,
        expected: u64,
        found: u64,
    },

    #[error("{0} trailing bytes after suffix array")]
    TrailingBytes(usize),

    #[error("suffix array entry {value} at position {position} is outside [0, {len})")]
    OutOfRange { position: usize, value: u64, len: usize },

    #[error("offset {value} appears more than once (again at position {position})")]
    Duplicate { position: usize, value: usize },

    #[error("suffixes at positions {position} and {next} are out of order", next = .position + 1)]
    Unordered { position: usize },
}
