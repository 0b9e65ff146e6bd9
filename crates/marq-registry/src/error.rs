//! Registry error types.

use crate::EntryId;

/// Error from a registry operation on a bad key.
///
/// These indicate a programming error in an extension (registering under a
/// taken name, anchoring on an entry that was never registered), not a
/// recoverable input condition. Callers surface them to the integrator
/// immediately.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// An entry with this id is already registered.
    #[error("duplicate registry key: {0}")]
    DuplicateKey(EntryId),

    /// No entry with this id exists.
    #[error("registry key not found: {0}")]
    KeyNotFound(EntryId),

    /// A `Before`/`After` position referenced an absent entry.
    #[error("missing anchor entry: {0}")]
    MissingAnchor(EntryId),
}
