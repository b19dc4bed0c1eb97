//! Purpose: Define the stable public Rust API boundary for attrjson.
//! Exports: Entry points, transformer, options, input tree, and error types.
//! Role: Public, additive-only surface used by the CLI and integration tests.
//! Invariants: Entry points are pure; no I/O happens behind this module.
//! Invariants: Free functions use `TransformOptions::default()`.
use serde_json::{Map, Value};

pub use crate::core::coerce::{to_boolean, to_null, to_number, to_string};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::node::{Node, NodeMap};
pub use crate::core::options::{DEFAULT_MAX_DEPTH, TagSelection, TransformOptions};
pub use crate::core::transform::{Tag, Transformer, Typed};

/// Transforms a decoded document, which must be an object of tagged values.
pub fn parse_input(input: &Value) -> Result<Value, Error> {
    Transformer::default().parse_input(input)
}

/// Transforms an attribute set the caller already holds as an object.
pub fn parse_attributes(attributes: &Map<String, Value>) -> Result<Value, Error> {
    Transformer::default().parse_attributes(attributes)
}
