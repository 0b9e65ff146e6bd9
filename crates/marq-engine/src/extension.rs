//! Extension integration point.

use marq_registry::RegistryError;

use crate::Engine;

/// A third-party extension.
///
/// The engine invokes [`extend`](Extension::extend) once at registration
/// time, handing the extension mutable access to every pipeline registry.
/// Extensions interject by inserting entries at positions relative to
/// existing ones (`Before`/`After` named entries), so independently
/// authored extensions compose without coordinating absolute order.
///
/// Resolving extensions from string names (imports, config parsing) is the
/// caller's concern, not this trait's.
pub trait Extension {
    /// Wire this extension into the engine's registries.
    ///
    /// # Errors
    ///
    /// A [`RegistryError`] (duplicate id, missing anchor) indicates a
    /// programming error in the extension and is surfaced to the
    /// integrator unmodified.
    fn extend(&self, engine: &mut Engine) -> Result<(), RegistryError>;
}
