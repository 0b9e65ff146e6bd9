//! Engine error types.

use marq_parser::ParseError;
use marq_registry::RegistryError;

/// Error from a conversion run or extension registration.
///
/// A failed conversion yields no document; there is no partial-output mode.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Block parsing failed (handler error, missing fallback, or a leaked
    /// state label).
    #[error("parse failed")]
    Parse(#[from] ParseError),

    /// An extension misused a registry.
    #[error("registry error")]
    Registry(#[from] RegistryError),
}
