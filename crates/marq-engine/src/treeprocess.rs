//! Tree processors: rewrite the document tree in place after block parsing.

use marq_registry::Registry;
use marq_tree::Element;

use crate::serialize::escape_html;
use crate::InlineRule;

/// Read-only engine context handed to tree processors.
pub struct TreeContext<'a> {
    /// The engine's inline rule registry, in application order.
    pub inline_rules: &'a Registry<Box<dyn InlineRule>>,
}

/// An in-place tree rewriting pass.
///
/// Processors run in registry order and mutate the tree they are handed;
/// they never replace the root.
pub trait Treeprocessor {
    /// Rewrite the tree below `root`.
    fn run(&self, root: &mut Element, cx: &TreeContext<'_>);
}

/// The inline stage: escapes every text node, then applies the inline rule
/// registry to it in order.
///
/// Extensions that need to see raw (unescaped) source text register a tree
/// processor before this one; processors registered after it see
/// markup-bearing text.
pub struct InlineTreeprocessor;

impl Treeprocessor for InlineTreeprocessor {
    fn run(&self, root: &mut Element, cx: &TreeContext<'_>) {
        root.for_each_text_mut(&mut |text| {
            let mut rewritten = escape_html(text);
            for (_, rule) in cx.inline_rules.iter() {
                rewritten = rule.apply(&rewritten);
            }
            *text = rewritten;
        });
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{CodeSpanRule, EmphasisRule};

    fn default_rules() -> Registry<Box<dyn InlineRule>> {
        let mut rules: Registry<Box<dyn InlineRule>> = Registry::new();
        rules.set("code-span", Box::new(CodeSpanRule));
        rules.set("emphasis", Box::new(EmphasisRule));
        rules
    }

    #[test]
    fn test_inline_stage_escapes_then_rewrites() {
        let mut root = Element::new("div");
        root.append(Element::new("p").with_text("a < b and **c**"));

        let rules = default_rules();
        let cx = TreeContext {
            inline_rules: &rules,
        };
        InlineTreeprocessor.run(&mut root, &cx);

        assert_eq!(
            root.children[0].text.as_deref(),
            Some("a &lt; b and <strong>c</strong>")
        );
    }

    #[test]
    fn test_inline_stage_visits_nested_elements() {
        let mut root = Element::new("div");
        let quote = root.append(Element::new("blockquote"));
        quote.append(Element::new("p").with_text("*deep*"));

        let rules = default_rules();
        let cx = TreeContext {
            inline_rules: &rules,
        };
        InlineTreeprocessor.run(&mut root, &cx);

        assert_eq!(
            root.children[0].children[0].text.as_deref(),
            Some("<em>deep</em>")
        );
    }
}
