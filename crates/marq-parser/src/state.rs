//! Parser state stack.

/// Push-down stack of state labels tracking nested parsing context
/// (e.g., "inside a blockquote") across recursive block dispatch.
///
/// One stack exists per document parse: empty at the start, required to be
/// empty at the end. Every label pushed while processing a block must be
/// popped before the handler that pushed it returns; a leaked label
/// misclassifies unrelated later blocks and is reported at the end of the
/// parse as [`ParseError::DanglingState`](crate::ParseError::DanglingState).
///
/// Prefer [`enter`](StateStack::enter) (or
/// [`ParseContext::with_state`](crate::ParseContext::with_state)), which
/// make the push/pop symmetry structural.
#[derive(Debug, Default)]
pub struct StateStack {
    labels: Vec<Box<str>>,
}

impl StateStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a state label. The caller must pop it before returning.
    pub fn push(&mut self, label: &str) {
        self.labels.push(label.into());
    }

    /// Pop the most recent label.
    pub fn pop(&mut self) -> Option<Box<str>> {
        self.labels.pop()
    }

    /// Push a label and return a guard that pops it on drop.
    pub fn enter(&mut self, label: &str) -> StateGuard<'_> {
        self.push(label);
        StateGuard { stack: self }
    }

    /// Whether the given label is anywhere on the stack.
    #[must_use]
    pub fn is_within(&self, label: &str) -> bool {
        self.labels.iter().any(|l| &**l == label)
    }

    /// The innermost label, if any.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.labels.last().map(|l| &**l)
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.labels.len()
    }

    /// Whether the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Snapshot of the labels, outermost first.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.labels.iter().map(|l| String::from(&**l)).collect()
    }
}

/// Scoped handle to a pushed state label; dropping it pops the label.
#[derive(Debug)]
pub struct StateGuard<'a> {
    stack: &'a mut StateStack,
}

impl StateGuard<'_> {
    /// The underlying stack, for queries and nested `enter` calls.
    pub fn stack(&mut self) -> &mut StateStack {
        self.stack
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        self.stack.labels.pop();
    }
}
