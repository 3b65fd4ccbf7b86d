//! Planar math used by the geometry model: ring areas and circular arc helpers.

mod area;
mod circle;

pub use area::*;
pub use circle::*;
