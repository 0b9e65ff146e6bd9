//! Opaque registry entry identifier.

use std::fmt;

/// Name of a registry entry.
///
/// Opaque newtype over an owned string. Keys are compared by value; a
/// registry never holds two entries with the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryId(Box<str>);

impl EntryId {
    /// Create an id from a name.
    #[must_use]
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Self(name.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for EntryId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
