//! Vector geometries with vertex-level editing and a WKT/WKB codec.
//!
//! A [`Geometry`] is a tree of [`Part`]s whose interpretation is governed by its [`WkbType`].
//! Vertices are addressed by a flat ordinal across all parts and rings, and every edit either
//! succeeds with all structural invariants intact or fails without changing the geometry.
//!
//! ```
//! use geomkit_geometry::Geometry;
//!
//! let mut polygon = Geometry::from_wkt("POLYGON ((0 0, 1 0, 1 1, 0 1, 0 0))").unwrap();
//! polygon.delete_vertex(0).unwrap();
//! assert_eq!(polygon.to_wkt().unwrap(), "Polygon ((1 0, 1 1, 0 1, 1 0))");
//! ```

mod error;
mod geo;
pub mod math;
mod wkb;
mod wkb_type;
mod wkt;

pub use error::GeometryError;
pub use geo::*;
pub use wkb::*;
pub use wkb_type::*;
pub use wkt::*;
