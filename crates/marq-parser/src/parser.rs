//! The block parsing loop.

use marq_registry::Registry;
use marq_tree::Element;

use crate::blocks::split_blocks;
use crate::builtin::{BlockquoteHandler, HashHeadingHandler, ParagraphHandler};
use crate::{BlockHandler, Blocks, ParseContext, ParseError};

/// Tag of the synthetic document root element.
const ROOT_TAG: &str = "div";

/// Drives block-level parsing: dispatches each block to the first matching
/// registered handler until the block queue is empty.
///
/// The parser owns its handler registry; extensions interject via
/// [`handlers_mut`](BlockParser::handlers_mut) using position-relative
/// insertion. Handlers run in registry order, so the always-matching
/// fallback must sit last.
pub struct BlockParser {
    handlers: Registry<Box<dyn BlockHandler>>,
}

impl BlockParser {
    /// Create a parser with no handlers registered.
    ///
    /// A parser without an always-matching fallback cannot parse anything;
    /// see [`with_default_handlers`](BlockParser::with_default_handlers).
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Registry::new(),
        }
    }

    /// Create a parser with the built-in handler set: hash headings,
    /// blockquotes, and the paragraph fallback (last).
    #[must_use]
    pub fn with_default_handlers() -> Self {
        let mut parser = Self::new();
        let handlers = &mut parser.handlers;
        handlers.set("hash-heading", Box::new(HashHeadingHandler) as Box<dyn BlockHandler>);
        handlers.set("blockquote", Box::new(BlockquoteHandler));
        handlers.set("paragraph", Box::new(ParagraphHandler));
        parser
    }

    /// The handler registry.
    #[must_use]
    pub fn handlers(&self) -> &Registry<Box<dyn BlockHandler>> {
        &self.handlers
    }

    /// The handler registry, for registration and reordering.
    pub fn handlers_mut(&mut self) -> &mut Registry<Box<dyn BlockHandler>> {
        &mut self.handlers
    }

    /// Parse a whole document into an element tree rooted at a `div`.
    ///
    /// Splits `source` into blocks, runs the dispatch loop with a fresh
    /// [`ParseContext`], and verifies that the state stack unwound.
    ///
    /// # Errors
    ///
    /// [`ParseError::NoMatchingHandler`] if a block matched no handler,
    /// [`ParseError::DanglingState`] if a handler leaked a state label, or
    /// any error a handler returned (fatal, unmodified).
    pub fn parse_document(&self, source: &str) -> Result<Element, ParseError> {
        let mut cx = ParseContext::new();
        let mut root = Element::new(ROOT_TAG);
        let mut blocks = split_blocks(source);

        self.parse_blocks(&mut cx, &mut root, &mut blocks)?;

        if !cx.state.is_empty() {
            return Err(ParseError::DanglingState {
                labels: cx.state.labels(),
            });
        }
        Ok(root)
    }

    /// Run the dispatch loop over `blocks`, attaching output to `parent`.
    ///
    /// One step: pop the front block, test it against each handler's
    /// `matches` in registry order, re-prepend it, and invoke the first
    /// match's `apply`. Container handlers re-invoke this method on their
    /// inner blocks (recursive descent), sharing the same context.
    ///
    /// # Errors
    ///
    /// [`ParseError::NoMatchingHandler`] if no handler claims a block;
    /// handler errors propagate unmodified.
    pub fn parse_blocks(
        &self,
        cx: &mut ParseContext,
        parent: &mut Element,
        blocks: &mut Blocks,
    ) -> Result<(), ParseError> {
        while let Some(block) = blocks.pop_front() {
            let matched = self
                .handlers
                .iter()
                .find(|(_, handler)| handler.matches(cx, parent, &block));
            let Some((id, handler)) = matched else {
                return Err(ParseError::NoMatchingHandler { block });
            };
            tracing::debug!(
                handler = %id,
                depth = cx.state.depth(),
                "dispatching block"
            );
            // Re-prepend so the handler controls consumption.
            blocks.push_front(block);
            handler.apply(self, cx, parent, blocks)?;
        }
        Ok(())
    }
}

impl Default for BlockParser {
    fn default() -> Self {
        Self::with_default_handlers()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;

    /// Fallback that counts its invocations and records dispatch order.
    struct CountingFallback {
        calls: Rc<Cell<usize>>,
    }

    impl BlockHandler for CountingFallback {
        fn matches(&self, _cx: &ParseContext, _parent: &Element, _block: &str) -> bool {
            true
        }

        fn apply(
            &self,
            _parser: &BlockParser,
            _cx: &mut ParseContext,
            parent: &mut Element,
            blocks: &mut Blocks,
        ) -> Result<(), ParseError> {
            let Some(block) = blocks.pop_front() else {
                return Ok(());
            };
            self.calls.set(self.calls.get() + 1);
            parent.append(Element::new("p").with_text(block));
            Ok(())
        }
    }

    /// Pushes a state label and "forgets" to pop it.
    struct LeakyHandler;

    impl BlockHandler for LeakyHandler {
        fn matches(&self, _cx: &ParseContext, _parent: &Element, block: &str) -> bool {
            block.starts_with("leak")
        }

        fn apply(
            &self,
            _parser: &BlockParser,
            cx: &mut ParseContext,
            _parent: &mut Element,
            blocks: &mut Blocks,
        ) -> Result<(), ParseError> {
            blocks.pop_front();
            cx.state.push("leaked");
            Ok(())
        }
    }

    /// Fails while processing its block.
    struct FailingHandler;

    impl BlockHandler for FailingHandler {
        fn matches(&self, _cx: &ParseContext, _parent: &Element, block: &str) -> bool {
            block.starts_with("boom")
        }

        fn apply(
            &self,
            _parser: &BlockParser,
            _cx: &mut ParseContext,
            _parent: &mut Element,
            blocks: &mut Blocks,
        ) -> Result<(), ParseError> {
            blocks.pop_front();
            Err(ParseError::handler("failing", "deliberate failure"))
        }
    }

    fn parser_with_fallback(calls: &Rc<Cell<usize>>) -> BlockParser {
        let mut parser = BlockParser::new();
        parser.handlers_mut().set(
            "fallback",
            Box::new(CountingFallback {
                calls: Rc::clone(calls),
            }) as Box<dyn BlockHandler>,
        );
        parser
    }

    #[test]
    fn test_fallback_invoked_once_per_block() {
        let calls = Rc::new(Cell::new(0));
        let parser = parser_with_fallback(&calls);

        let root = parser.parse_document("a\n\nb").unwrap();

        assert_eq!(calls.get(), 2);
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].text.as_deref(), Some("a"));
        assert_eq!(root.children[1].text.as_deref(), Some("b"));
    }

    #[test]
    fn test_empty_document_invokes_nothing() {
        let calls = Rc::new(Cell::new(0));
        let parser = parser_with_fallback(&calls);

        let root = parser.parse_document("\n\n  \n").unwrap();

        assert_eq!(calls.get(), 0);
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_missing_fallback_is_a_configuration_error() {
        let parser = BlockParser::new();
        let err = parser.parse_document("orphan block").unwrap_err();
        assert!(matches!(
            err,
            ParseError::NoMatchingHandler { ref block } if block == "orphan block"
        ));
    }

    #[test]
    fn test_leaked_state_label_detected() {
        let calls = Rc::new(Cell::new(0));
        let mut parser = parser_with_fallback(&calls);
        parser
            .handlers_mut()
            .insert(
                "leaky",
                Box::new(LeakyHandler) as Box<dyn BlockHandler>,
                marq_registry::Position::Begin,
            )
            .unwrap();

        let err = parser.parse_document("leak this\n\nnormal").unwrap_err();
        assert!(matches!(
            err,
            ParseError::DanglingState { ref labels } if labels == &["leaked".to_owned()]
        ));
    }

    #[test]
    fn test_handler_error_is_fatal() {
        let calls = Rc::new(Cell::new(0));
        let mut parser = parser_with_fallback(&calls);
        parser
            .handlers_mut()
            .insert(
                "failing",
                Box::new(FailingHandler) as Box<dyn BlockHandler>,
                marq_registry::Position::before("fallback"),
            )
            .unwrap();

        let err = parser.parse_document("fine\n\nboom\n\nnever reached").unwrap_err();
        assert!(matches!(err, ParseError::Handler { .. }));
        // The block before the failure was processed, the one after was not
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_first_match_wins_in_registry_order() {
        struct Tagger(&'static str);

        impl BlockHandler for Tagger {
            fn matches(&self, _cx: &ParseContext, _parent: &Element, _block: &str) -> bool {
                true
            }

            fn apply(
                &self,
                _parser: &BlockParser,
                _cx: &mut ParseContext,
                parent: &mut Element,
                blocks: &mut Blocks,
            ) -> Result<(), ParseError> {
                blocks.pop_front();
                parent.append(Element::new(self.0));
                Ok(())
            }
        }

        let mut parser = BlockParser::new();
        parser
            .handlers_mut()
            .set("second", Box::new(Tagger("b")) as Box<dyn BlockHandler>);
        parser
            .handlers_mut()
            .insert(
                "first",
                Box::new(Tagger("a")) as Box<dyn BlockHandler>,
                marq_registry::Position::before("second"),
            )
            .unwrap();

        let root = parser.parse_document("x").unwrap();
        assert_eq!(root.children[0].tag, "a");
    }
}
