//! Utility functions shared by the index codec.
//!
//! - [`encoding`] - Variable-length integers and little-endian fields

pub mod encoding;

pub use encoding::*;
