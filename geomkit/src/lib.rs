//! # geomkit
//!
//! Reading, writing and editing vector geometries in well-known text and well-known binary.
//!
//! The kernel lives in [`geometry`], the byte-level helpers it is built on in [`core`].
//!
//! ```rust
//! use geomkit::{geometry::WkbOptions, read_geometry};
//!
//! let mut geometry = read_geometry("MULTIPOINT ((5 5))").unwrap();
//! geometry.insert_vertex([4, 4], 0).unwrap();
//! assert_eq!(geometry.to_wkt().unwrap(), "MultiPoint ((4 4),(5 5))");
//!
//! let hex = geometry.to_wkb_hex(&WkbOptions::default()).unwrap();
//! assert_eq!(read_geometry(&hex).unwrap(), geometry);
//! ```

pub use geomkit_core as core;
pub use geomkit_geometry as geometry;

use anyhow::{Context, Result};
use geomkit_geometry::Geometry;
use log::debug;

/// Input encodings understood by [`read_geometry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
	Wkt,
	WkbHex,
}

impl Encoding {
	/// Hex WKB is recognized by consisting of an even number of hex digits only.
	#[must_use]
	pub fn detect(input: &str) -> Encoding {
		let input = input.trim();
		if !input.is_empty() && input.len().is_multiple_of(2) && input.bytes().all(|byte| byte.is_ascii_hexdigit()) {
			Encoding::WkbHex
		} else {
			Encoding::Wkt
		}
	}
}

/// Reads a geometry from WKT or hex encoded WKB, whichever `input` looks like.
pub fn read_geometry(input: &str) -> Result<Geometry> {
	let encoding = Encoding::detect(input);
	debug!("reading {encoding:?} input of {} bytes", input.len());
	match encoding {
		Encoding::Wkt => Geometry::from_wkt(input),
		Encoding::WkbHex => Geometry::from_wkb_hex(input),
	}
	.with_context(|| format!("could not read geometry from {encoding:?} input"))
}
