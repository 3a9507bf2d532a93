//! Regex scans over an index.
//!
//! - [`planner`] - Literal prefix analysis and the [`Matcher`] seam
//! - [`executor`] - Non-overlapping match collection on [`crate::Index`]

pub mod executor;
pub mod planner;

pub use planner::{LiteralPrefix, Matcher, Pattern};
