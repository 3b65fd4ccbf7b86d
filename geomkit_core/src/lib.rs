//! Byte-level building blocks shared by the geomkit crates.
//!
//! Contains byte-order aware value readers and writers, the [`Blob`] byte container,
//! and a small byte iterator for hand-written text parsers.

pub mod byte_iterator;
pub mod io;
pub mod types;

pub use types::*;
