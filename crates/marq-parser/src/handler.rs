//! Block handler trait and per-parse context.

use marq_tree::Element;

use crate::{BlockParser, Blocks, ParseError, StateStack};

/// Mutable context for one document parse.
///
/// Owns the [`StateStack`]. Created fresh by
/// [`BlockParser::parse_document`] and threaded by reference through every
/// recursive dispatch, so nested sub-parses share the same nesting context.
#[derive(Debug, Default)]
pub struct ParseContext {
    /// Nesting state for the current parse.
    pub state: StateStack,
}

impl ParseContext {
    /// Create a context with an empty state stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with `label` pushed onto the state stack, popping it after
    /// `f` returns — on the error path as well as on success.
    ///
    /// This is the scoped form of the push/pop contract for handlers that
    /// recurse into nested content. A panic inside `f` skips the pop, but a
    /// panic aborts the parse wholesale anyway.
    pub fn with_state<T>(&mut self, label: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        self.state.push(label);
        let result = f(self);
        self.state.pop();
        result
    }
}

/// A block-level transformation step: a predicate plus an action.
///
/// Handlers are registered in the parser's ordered registry; the first
/// handler whose [`matches`](BlockHandler::matches) accepts a block is
/// invoked. Handlers are stateless or own only configuration — per-parse
/// state belongs on the [`ParseContext`].
pub trait BlockHandler {
    /// Whether this handler wants the block, given the parent node the
    /// output would attach to. Must not mutate anything.
    fn matches(&self, cx: &ParseContext, parent: &Element, block: &str) -> bool;

    /// Process the front of `blocks`, attaching output to `parent` in place.
    ///
    /// The matched block is at the front of `blocks` when this is called.
    /// The handler must consume (pop) at least that block; it may push
    /// derived blocks back onto the front for re-dispatch, and may recurse
    /// into [`BlockParser::parse_blocks`] for nested containers — pushing a
    /// state label around the recursion via
    /// [`ParseContext::with_state`].
    ///
    /// # Errors
    ///
    /// Any error is fatal to the whole parse; the loop does not catch it.
    fn apply(
        &self,
        parser: &BlockParser,
        cx: &mut ParseContext,
        parent: &mut Element,
        blocks: &mut Blocks,
    ) -> Result<(), ParseError>;
}
