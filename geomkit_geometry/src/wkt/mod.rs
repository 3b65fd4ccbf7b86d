//! Well-known text (WKT) reading and writing.
//!
//! ```
//! use geomkit_geometry::{Geometry, WktOptions};
//!
//! let geometry = Geometry::from_wkt("POLYGON Z ((0 0 1, 4 0 1, 4 4 1, 0 0 1))").unwrap();
//! assert_eq!(geometry.to_wkt().unwrap(), "PolygonZ ((0 0 1, 4 0 1, 4 4 1, 0 0 1))");
//!
//! let options = WktOptions { precision: Some(2) };
//! let point = Geometry::new_point([1.23456, 2.0]).unwrap();
//! assert_eq!(point.to_wkt_with(&options).unwrap(), "Point (1.23 2)");
//! ```

mod reader;
mod writer;

use crate::{Geometry, error::into_invalid};
use anyhow::{Context, Result};

/// Options for writing well-known text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WktOptions {
	/// Number of decimals. Trailing zeros are trimmed. `None` writes the shortest text that reads
	/// back to the same number.
	pub precision: Option<usize>,
}

impl Geometry {
	/// Parses well-known text.
	///
	/// Keywords are case-insensitive and may carry the dimension as suffix (`POINTZ`) or as
	/// separate tokens (`POINT Z M`). Coordinates with more ordinates than declared upgrade the
	/// type. Malformed text fails with [`GeometryError::InvalidInput`](crate::GeometryError).
	pub fn from_wkt(text: &str) -> Result<Geometry> {
		reader::parse_wkt(text)
			.map_err(into_invalid)
			.context("while parsing WKT")
	}

	/// Writes well-known text with the shortest number representation.
	pub fn to_wkt(&self) -> Result<String> {
		self.to_wkt_with(&WktOptions::default())
	}

	pub fn to_wkt_with(&self, options: &WktOptions) -> Result<String> {
		writer::write_wkt(self, options)
	}
}
