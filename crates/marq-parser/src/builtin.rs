//! Built-in block handlers.
//!
//! Three handlers ship with the parser, exercising each shape a handler can
//! take: consume exactly one block ([`ParagraphHandler`]), split a block and
//! push the remainder back ([`HashHeadingHandler`]), and recurse into nested
//! content under a state label ([`BlockquoteHandler`]).

use std::sync::LazyLock;

use regex::Regex;

use marq_tree::Element;

use crate::blocks::split_blocks;
use crate::{BlockHandler, BlockParser, Blocks, ParseContext, ParseError};

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<level>#{1,6})\s+(?P<title>.*?)(?:\s+#+)?\s*$").unwrap());

static QUOTE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^ {0,3}> ?").unwrap());

fn first_line(block: &str) -> &str {
    block.lines().next().unwrap_or("")
}

/// Fallback handler: wraps any block in a paragraph element.
///
/// Matches every block, so it must be registered last; it is what guarantees
/// the dispatch loop makes progress.
pub struct ParagraphHandler;

impl BlockHandler for ParagraphHandler {
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
        parent.append(Element::new("p").with_text(block));
        Ok(())
    }
}

/// `#`-style headings (`#` through `######`).
///
/// Consumes only the heading line; any remaining lines of the block are
/// pushed back onto the front of the queue for re-dispatch, so one physical
/// block can carry a heading followed by a paragraph.
pub struct HashHeadingHandler;

impl BlockHandler for HashHeadingHandler {
    fn matches(&self, _cx: &ParseContext, _parent: &Element, block: &str) -> bool {
        HEADING_RE.is_match(first_line(block))
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
        let (first, rest) = match block.split_once('\n') {
            Some((first, rest)) => (first, Some(rest)),
            None => (block.as_str(), None),
        };
        let heading = HEADING_RE
            .captures(first)
            .map(|caps| (caps["level"].len(), caps["title"].to_owned()));
        match heading {
            Some((level, title)) => {
                parent.append(Element::new(format!("h{level}")).with_text(title));
                if let Some(rest) = rest {
                    if !rest.trim().is_empty() {
                        blocks.push_front(rest.to_owned());
                    }
                }
            }
            // matches() uses the same pattern, so the first line must
            // capture; keep the arm total rather than panic.
            None => {
                parent.append(Element::new("p").with_text(block));
            }
        }
        Ok(())
    }
}

/// `>`-quoted container blocks.
///
/// Strips the quote marker from each line and recursively parses the inner
/// text into a `blockquote` element, under a `blockquote` state label so
/// nested dispatch can see its context.
pub struct BlockquoteHandler;

impl BlockHandler for BlockquoteHandler {
    fn matches(&self, _cx: &ParseContext, _parent: &Element, block: &str) -> bool {
        QUOTE_MARKER_RE.is_match(first_line(block))
    }

    fn apply(
        &self,
        parser: &BlockParser,
        cx: &mut ParseContext,
        parent: &mut Element,
        blocks: &mut Blocks,
    ) -> Result<(), ParseError> {
        let Some(block) = blocks.pop_front() else {
            return Ok(());
        };
        let inner: Vec<_> = block
            .lines()
            .map(|line| QUOTE_MARKER_RE.replace(line, ""))
            .collect();
        let inner = inner.join("\n");

        let quote = parent.append(Element::new("blockquote"));
        let mut inner_blocks = split_blocks(&inner);
        cx.with_state("blockquote", |cx| {
            parser.parse_blocks(cx, quote, &mut inner_blocks)
        })
    }
}
