//! This module provides utilities for byte-level iteration over text input.
//! It re-exports the `basics` and `iterator` modules for use in hand-written parsers.

mod basics;
mod iterator;

pub use basics::*;
pub use iterator::*;
