//! Ordered, position-addressable registry for marq pipeline stages.
//!
//! Every pluggable stage of the conversion pipeline (preprocessors, block
//! handlers, inline rules, tree processors, postprocessors) lives in a
//! [`Registry`]: a key-unique, order-significant collection whose iteration
//! order is the application order of the stage.
//!
//! Entries are addressed by an opaque [`EntryId`] and inserted at a
//! [`Position`] relative to an existing entry (`Before`/`After`) or at either
//! end. Relative addressing lets independently authored extensions interject
//! into a fixed point of someone else's ordering without knowing absolute
//! indices.
//!
//! # Example
//!
//! ```
//! use marq_registry::{Position, Registry};
//!
//! let mut registry = Registry::new();
//! registry.push("one", 1).unwrap();
//! registry.push("three", 3).unwrap();
//! registry.insert("two", 2, Position::after("one")).unwrap();
//!
//! let keys: Vec<_> = registry.keys().map(|k| k.as_str()).collect();
//! assert_eq!(keys, ["one", "two", "three"]);
//! ```

mod error;
mod id;
mod position;
mod registry;

pub use error::RegistryError;
pub use id::EntryId;
pub use position::{Position, PositionParseError};
pub use registry::Registry;
