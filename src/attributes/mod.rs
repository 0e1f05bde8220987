//! Attribute configuration for lockable.
//!
//! Lockable patterns come from attribute files (`.gitattributes` and
//! `.git/info/attributes`). This module defines the [`AttributeSource`] seam the
//! pattern cache reads through, and [`GitAttributes`], the default source that
//! reads attribute files from a working tree.

mod gitattributes;


pub use gitattributes::{GitAttributes, parse_attributes};

/// One pattern line from an attribute file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributePath {
    /// The wildcard pattern, relative to the repository root.
    pub path: String,

    /// Whether the line carries the `lockable` attribute.
    pub lockable: bool,
}

impl AttributePath {
    /// Create a new attribute path entry.
    pub fn new(path: impl Into<String>, lockable: bool) -> Self {
        Self {
            path: path.into(),
            lockable,
        }
    }
}

/// Supplies the attribute paths tracked by the repository.
///
/// Implementations return entries in the order they were declared. Sources are
/// shared with the pattern cache across threads.
pub trait AttributeSource: Send + Sync {
    /// List every tracked attribute path, lockable or not.
    fn list_attribute_paths(&self) -> Vec<AttributePath>;
}

impl<T: AttributeSource + ?Sized> AttributeSource for std::sync::Arc<T> {
    fn list_attribute_paths(&self) -> Vec<AttributePath> {
        (**self).list_attribute_paths()
    }
}
