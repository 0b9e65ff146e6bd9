//! Line preprocessors: run over source lines before block parsing.

/// A source-line rewriting pass.
///
/// Preprocessors run in registry order; each receives the previous pass's
/// output.
pub trait Preprocessor {
    /// Rewrite the source lines.
    fn run(&self, lines: Vec<String>) -> Vec<String>;
}

/// Default preprocessor: expands tabs to four spaces and strips trailing
/// whitespace, so downstream patterns see a normalized source.
pub struct NormalizeWhitespace;

impl Preprocessor for NormalizeWhitespace {
    fn run(&self, lines: Vec<String>) -> Vec<String> {
        lines
            .into_iter()
            .map(|line| line.trim_end().replace('\t', "    "))
            .collect()
    }
}
