//! Postprocessors: rewrite the serialized output text.

/// An output-text rewriting pass, run after serialization in registry order.
pub trait Postprocessor {
    /// Rewrite the output.
    fn run(&self, output: String) -> String;
}
