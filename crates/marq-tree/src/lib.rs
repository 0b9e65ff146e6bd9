//! Document tree types for marq.
//!
//! The conversion pipeline builds an [`Element`] tree: block handlers attach
//! children to a caller-supplied parent, tree processors rewrite the tree in
//! place, and a serializer walks it to produce output text.
//!
//! Mutation is strictly in-place. A handler never replaces the root it was
//! handed; it only appends to (or edits) the subtree below its parent. This
//! keeps parent references valid across recursive sub-parses.

/// A node in the document tree.
///
/// An element has a tag name, optional text content, a list of attributes,
/// and an ordered list of children. Attribute order is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    /// Tag name (e.g., `p`, `h2`, `blockquote`).
    pub tag: String,
    /// Text content, rendered before any children.
    pub text: Option<String>,
    /// Attributes in insertion order.
    pub attrs: Vec<(String, String)>,
    /// Child elements in document order.
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: None,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the text content (builder style).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set or replace an attribute.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if let Some(existing) = self.attrs.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = value.into();
        } else {
            self.attrs.push((name, value.into()));
        }
    }

    /// Look up an attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Append a child and return a mutable reference to it.
    pub fn append(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        // Just pushed, so the vec is non-empty.
        let idx = self.children.len() - 1;
        &mut self.children[idx]
    }

    /// Append to the text content, inserting a newline between chunks.
    pub fn append_text(&mut self, text: &str) {
        match &mut self.text {
            Some(existing) => {
                existing.push('\n');
                existing.push_str(text);
            }
            None => self.text = Some(text.to_owned()),
        }
    }

    /// Mutable reference to the most recently appended child.
    pub fn last_child_mut(&mut self) -> Option<&mut Element> {
        self.children.last_mut()
    }

    /// First descendant (depth-first, self included) with the given tag.
    #[must_use]
    pub fn find(&self, tag: &str) -> Option<&Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(tag))
    }

    /// Apply `f` to the text content of this element and every descendant.
    pub fn for_each_text_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut String),
    {
        if let Some(text) = self.text.as_mut() {
            f(text);
        }
        for child in &mut self.children {
            child.for_each_text_mut(f);
        }
    }
}
