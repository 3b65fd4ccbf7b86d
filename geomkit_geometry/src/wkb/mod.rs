//! Well-known binary (WKB) encoding and decoding.
//!
//! Type codes follow ISO SQL/MM: the classic code plus 1000 for Z, 2000 for M and 3000 for ZM.
//! The legacy 2.5D types set the high bit instead. Every geometry and every member starts with its
//! own byte order marker, so members of one container may use different byte orders.

mod reader;
mod writer;

use crate::{Geometry, error::into_invalid};
use anyhow::{Context, Result};
use byteorder::{BigEndian, LittleEndian};
use geomkit_core::Blob;
use writer::WkbWriter;

/// Byte order of written WKB.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Endianness {
	BigEndian,
	#[default]
	LittleEndian,
}

impl Endianness {
	/// The byte order marker written in front of every geometry.
	#[must_use]
	pub fn marker(self) -> u8 {
		match self {
			Endianness::BigEndian => 0,
			Endianness::LittleEndian => 1,
		}
	}
}

/// Options for writing well-known binary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WkbOptions {
	pub byte_order: Endianness,
}

impl Geometry {
	/// Decodes well-known binary. Unknown type codes, members that do not fit their container and
	/// trailing bytes fail with an invalid input error.
	pub fn from_wkb(data: &[u8]) -> Result<Geometry> {
		reader::parse_wkb(data)
			.map_err(into_invalid)
			.context("while decoding WKB")
	}

	/// Decodes hex encoded well-known binary, as commonly used in text formats and databases.
	pub fn from_wkb_hex(text: &str) -> Result<Geometry> {
		let blob = Blob::from_hex(text).map_err(into_invalid)?;
		Geometry::from_wkb(blob.as_slice())
	}

	pub fn to_wkb(&self, options: &WkbOptions) -> Result<Blob> {
		match options.byte_order {
			Endianness::LittleEndian => {
				let mut writer = WkbWriter::<LittleEndian>::new(options.byte_order.marker());
				writer.write_geometry(self)?;
				Ok(writer.into_blob())
			}
			Endianness::BigEndian => {
				let mut writer = WkbWriter::<BigEndian>::new(options.byte_order.marker());
				writer.write_geometry(self)?;
				Ok(writer.into_blob())
			}
		}
	}

	/// Encodes as lowercase hex.
	pub fn to_wkb_hex(&self, options: &WkbOptions) -> Result<String> {
		Ok(self.to_wkb(options)?.to_hex())
	}
}
