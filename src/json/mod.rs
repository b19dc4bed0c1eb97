//! Purpose: JSON decoding boundary shared by the CLI and library callers.
//! Exports: `parse` module with decode helpers.
//! Role: Single seam for parser usage so callsites avoid ad hoc decode logic.
//! Invariants: Decode failures map to `ErrorKind::Usage` with location hints.

pub mod parse;
