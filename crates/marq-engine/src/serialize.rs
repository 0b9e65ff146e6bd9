//! Tree serialization.

use std::fmt::Write;

use marq_tree::Element;

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img"];

/// Renders a finished document tree to output text.
pub trait Serializer {
    /// Serialize the tree below `root`. The root element itself is a
    /// synthetic wrapper and is not emitted.
    fn serialize(&self, root: &Element) -> String;
}

/// Plain HTML serializer.
///
/// Attribute values are escaped here. Text content is emitted verbatim: the
/// default pipeline's inline stage escapes source text before rewriting it
/// into markup, so text nodes reaching the serializer already carry markup.
pub struct HtmlSerializer;

impl Serializer for HtmlSerializer {
    fn serialize(&self, root: &Element) -> String {
        let mut output = String::new();
        for child in &root.children {
            render(child, &mut output);
            output.push('\n');
        }
        output
    }
}

fn render(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attrs {
        // write! on String cannot fail
        let _ = write!(out, r#" {name}="{}""#, escape_html(value));
    }
    out.push('>');

    if VOID_TAGS.contains(&el.tag.as_str()) {
        return;
    }

    if let Some(text) = &el.text {
        out.push_str(text);
    }
    for child in &el.children {
        render(child, out);
    }

    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
