//! Extensible text-to-HTML conversion engine.
//!
//! [`Engine`] wires the conversion pipeline together: preprocessors rewrite
//! source lines, the block parser builds the document tree, tree processors
//! rewrite the tree (including the inline stage, which applies the inline
//! rule registry to text nodes), the serializer renders it, and
//! postprocessors rewrite the output text.
//!
//! Every stage lives in an ordered
//! [`Registry`](marq_registry::Registry), so third-party [`Extension`]s can
//! interject at a fixed point of the pipeline using only relative entry
//! names — no absolute indices.
//!
//! # Example
//!
//! ```
//! use marq_engine::Engine;
//!
//! let engine = Engine::new();
//! let html = engine.convert("# Title\n\nSome **bold** text.").unwrap();
//! assert!(html.contains("<h1>Title</h1>"));
//! assert!(html.contains("<strong>bold</strong>"));
//! ```

mod engine;
mod error;
mod extension;
mod inline;
mod postprocess;
mod preprocess;
mod serialize;
mod treeprocess;

pub use engine::Engine;
pub use error::ConvertError;
pub use extension::Extension;
pub use inline::{CodeSpanRule, EmphasisRule, InlineRule};
pub use postprocess::Postprocessor;
pub use preprocess::{NormalizeWhitespace, Preprocessor};
pub use serialize::{HtmlSerializer, Serializer, escape_html};
pub use treeprocess::{InlineTreeprocessor, TreeContext, Treeprocessor};
