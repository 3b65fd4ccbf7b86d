#![allow(clippy::module_inception)]

mod address;
mod edit;
pub(crate) mod geometry;
mod types;

pub use address::*;
pub use geometry::*;
pub use types::*;
