//! Deterministic JSON serialization for exported files.
//!
//! Produces stable output so repeated exports are byte-identical:
//! - Object keys kept in document order
//! - 2-space indentation
//! - Trailing newline
//! - UTF-8 encoding without BOM

mod json;

pub use json::*;
