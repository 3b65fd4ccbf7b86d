//! The WKB type algebra: geometry kinds, dimension flags and the pure combinators over them.

#![allow(clippy::module_inception)]

mod kind;
mod wkb_type;

pub use kind::*;
pub use wkb_type::*;
