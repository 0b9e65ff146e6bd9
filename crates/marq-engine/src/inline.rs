//! Inline rules: text rewrites applied to tree text nodes.
//!
//! Rules run in registry order inside the inline tree processor
//! ([`InlineTreeprocessor`](crate::InlineTreeprocessor)). By the time a rule
//! runs, the text has already been HTML-escaped, so rules emit markup
//! directly.

use std::sync::LazyLock;

use regex::Regex;

/// A text-node rewriting rule.
pub trait InlineRule {
    /// Rewrite `text`, returning the result.
    fn apply(&self, text: &str) -> String;
}

static STRONG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(?P<inner>[^*]+)\*\*").unwrap());

static EM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(?P<inner>[^*]+)\*").unwrap());

static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(?P<inner>[^`]+)`").unwrap());

/// `**strong**` and `*emphasis*`.
pub struct EmphasisRule;

impl InlineRule for EmphasisRule {
    fn apply(&self, text: &str) -> String {
        let strong = STRONG_RE.replace_all(text, "<strong>$inner</strong>");
        EM_RE.replace_all(&strong, "<em>$inner</em>").into_owned()
    }
}

/// `` `code` `` spans.
pub struct CodeSpanRule;

impl InlineRule for CodeSpanRule {
    fn apply(&self, text: &str) -> String {
        CODE_RE.replace_all(text, "<code>$inner</code>").into_owned()
    }
}
