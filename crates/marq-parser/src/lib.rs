//! Block-level parsing loop for marq.
//!
//! Source text is split into blocks (maximal runs of non-blank lines) and
//! each block is dispatched, in registry order, to the first registered
//! [`BlockHandler`] whose `matches` predicate accepts it. The matched block
//! is re-prepended to the remaining-blocks queue before `apply` runs, so the
//! handler itself controls consumption: it may take exactly one block, push
//! derived blocks back for re-dispatch, or recurse into
//! [`BlockParser::parse_blocks`] for nested containers.
//!
//! # Architecture
//!
//! - [`BlockParser`] owns the handler [`Registry`](marq_registry::Registry)
//!   and drives the loop. A paragraph-style fallback handler that matches
//!   every block must be registered (last) for the loop to make progress;
//!   its absence is a configuration error surfaced as
//!   [`ParseError::NoMatchingHandler`].
//! - [`ParseContext`] carries the per-parse [`StateStack`]. Handlers that
//!   recurse into nested content push a state label around the recursion so
//!   inner dispatch can see its context; a parse that ends with a non-empty
//!   stack fails with [`ParseError::DanglingState`].
//! - Handlers mutate the caller-supplied parent [`Element`](marq_tree::Element)
//!   in place and never return a new root.
//!
//! Handler errors are fatal to the whole parse; there is no partial-document
//! recovery.
//!
//! # Example
//!
//! ```
//! use marq_parser::BlockParser;
//!
//! let parser = BlockParser::with_default_handlers();
//! let root = parser.parse_document("# Title\n\n> quoted\n\nplain").unwrap();
//! assert_eq!(root.children[0].tag, "h1");
//! assert_eq!(root.children[1].tag, "blockquote");
//! assert_eq!(root.children[2].tag, "p");
//! ```

mod blocks;
mod builtin;
mod error;
mod handler;
mod parser;
mod state;

pub use blocks::{Blocks, split_blocks};
pub use builtin::{BlockquoteHandler, HashHeadingHandler, ParagraphHandler};
pub use error::ParseError;
pub use handler::{BlockHandler, ParseContext};
pub use parser::BlockParser;
pub use state::{StateGuard, StateStack};
