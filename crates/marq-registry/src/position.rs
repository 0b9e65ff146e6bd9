//! Insertion positions within a registry.

use std::str::FromStr;

use crate::EntryId;

/// Where to place an entry within a registry's order.
///
/// `Before`/`After` resolve to an index at insertion time and fail with
/// [`RegistryError::MissingAnchor`](crate::RegistryError::MissingAnchor) if
/// the named anchor entry is absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    /// First position.
    Begin,
    /// Last position (the default).
    #[default]
    End,
    /// Immediately before the named entry.
    Before(EntryId),
    /// Immediately after the named entry.
    After(EntryId),
}

impl Position {
    /// `Before` the named entry.
    #[must_use]
    pub fn before(anchor: impl Into<EntryId>) -> Self {
        Self::Before(anchor.into())
    }

    /// `After` the named entry.
    #[must_use]
    pub fn after(anchor: impl Into<EntryId>) -> Self {
        Self::After(anchor.into())
    }
}

/// Error parsing the legacy position syntax.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized position syntax: {0:?}")]
pub struct PositionParseError(pub String);

impl FromStr for Position {
    type Err = PositionParseError;

    /// Parse the legacy wire syntax: `_begin`, `_end`, `<anchor`, `>anchor`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "_begin" => Ok(Self::Begin),
            "_end" => Ok(Self::End),
            _ => match s.split_at_checked(1) {
                Some(("<", anchor)) if !anchor.is_empty() => Ok(Self::before(anchor)),
                Some((">", anchor)) if !anchor.is_empty() => Ok(Self::after(anchor)),
                _ => Err(PositionParseError(s.to_owned())),
            },
        }
    }
}
