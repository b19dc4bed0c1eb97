//! Purpose: Decode raw text into the generic JSON tree consumed by the transformer.
//! Exports: `from_str`, `from_reader`, `decode_error`.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Invariants: Errors carry the line/column reported by serde_json, never the payload.
use std::io::Read;

use serde::de::DeserializeOwned;

use crate::core::error::{Error, ErrorKind};

pub fn from_str<T: DeserializeOwned>(input: &str, context: &str) -> Result<T, Error> {
    serde_json::from_str(input).map_err(|err| decode_error(err, context))
}

pub fn from_reader<T: DeserializeOwned, R: Read>(reader: R, context: &str) -> Result<T, Error> {
    serde_json::from_reader(reader).map_err(|err| decode_error(err, context))
}

pub fn decode_error(err: serde_json::Error, context: &str) -> Error {
    if err.is_io() {
        return Error::new(ErrorKind::Io)
            .with_message(format!("failed to read {context}"))
            .with_source(err);
    }
    let category = match err.classify() {
        serde_json::error::Category::Eof => "unexpected end of input",
        serde_json::error::Category::Syntax => "syntax error",
        serde_json::error::Category::Data => "unexpected data shape",
        serde_json::error::Category::Io => "i/o error",
    };
    Error::new(ErrorKind::Usage)
        .with_message(format!("invalid JSON in {context}: {category}"))
        .with_hint(format!("line {}, column {}", err.line(), err.column()))
        .with_source(err)
}
