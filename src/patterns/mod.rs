//! Lockable pattern matching.
//!
//! - [`Glob`] compiles an attribute wildcard into tokens and matches it against
//!   the start of a canonical path.
//! - [`PatternCache`] holds the lockable subset of the attribute paths, together
//!   with their compiled globs, until it is invalidated.

mod cache;
mod glob;


pub use cache::{LockablePatterns, PatternCache};
pub use glob::Glob;
