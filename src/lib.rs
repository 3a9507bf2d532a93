//! # FXSA - Suffix Array Substring Index
//!
//! FXSA builds a suffix array over an immutable byte corpus and answers
//! substring queries against it in O(m log n): every offset where a
//! pattern occurs, and non-overlapping regex matches narrowed by the
//! pattern's literal prefix.
//!
//! ## Architecture
//!
//! - [`index`] - SA-IS construction, lookups, serialization and validation
//! - [`query`] - Regex prefix analysis and match collection
//! - [`error`] - Error types for decoding and I/O
//! - [`utils`] - Varint and little-endian encoding helpers
//!
//! ## Quick Start
//!
//! ```
//! use fxsa::{Index, Pattern};
//!
//! let index = Index::new(b"banana".to_vec());
//!
//! let mut offsets = index.lookup(b"ana", None);
//! offsets.sort_unstable();
//! assert_eq!(offsets, vec![1, 3]);
//!
//! let pattern = Pattern::new("an+").unwrap();
//! assert_eq!(index.find_all_index(&pattern, None), vec![1..3, 3..5]);
//!
//! // Serialized indexes are checked before they are trusted
//! let decoded = Index::from_bytes(&index.to_bytes()).unwrap();
//! assert_eq!(decoded, index);
//! ```
//!
//! ## Features
//!
//! - `parallel` (default) - verify large decoded indexes with rayon

pub mod error;
pub mod index;
pub mod query;
pub mod utils;

pub use error::{CorruptIndex, Error, Result};
pub use index::{Index, IndexConfig, IndexStats, OffsetWidth, Offsets, VerifyMode};
pub use query::{LiteralPrefix, Matcher, Pattern};
