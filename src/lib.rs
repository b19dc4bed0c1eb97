//! Purpose: Library crate turning tagged attribute-value JSON into plain JSON.
//! Exports: `api` (entry points, transformer, errors), `json` (decode seam), `sample`.
//! Role: Backs the `attrjson` binary and integration tests.
//! Invariants: Transformation is pure and synchronous; callers own all I/O.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
mod core;
pub mod json;
pub mod sample;
