//! Parse error types.

use marq_registry::RegistryError;

/// Error from the block parsing loop.
///
/// All variants are fatal to the parse in progress; there is no
/// partial-document recovery. Callers wanting resilience wrap the whole
/// [`parse_document`](crate::BlockParser::parse_document) call.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// No registered handler matched a block. The mandatory always-matching
    /// fallback handler is missing — a configuration error, not an input
    /// error.
    #[error("no handler matched block (missing fallback handler): {block:?}")]
    NoMatchingHandler {
        /// The block nothing claimed.
        block: String,
    },

    /// The state stack was not empty when the parse finished: some handler
    /// pushed a label it never popped.
    #[error("state stack not empty after parse, leaked labels: {labels:?}")]
    DanglingState {
        /// Leaked labels, outermost first.
        labels: Vec<String>,
    },

    /// A handler failed while processing a block.
    #[error("block handler {handler:?} failed: {message}")]
    Handler {
        /// Registry id of the failing handler.
        handler: String,
        /// Handler-supplied description.
        message: String,
    },

    /// Handler registration failed.
    #[error("handler registration failed")]
    Registry(#[from] RegistryError),
}

impl ParseError {
    /// Convenience constructor for handler-internal failures.
    #[must_use]
    pub fn handler(handler: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Handler {
            handler: handler.into(),
            message: message.into(),
        }
    }
}
