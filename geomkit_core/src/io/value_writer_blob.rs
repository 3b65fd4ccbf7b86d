//! This module provides the `ValueWriterBlob` struct for writing values to an in-memory [`Blob`].
//!
//! # Examples
//!
//! ```rust
//! use geomkit_core::io::{ValueWriter, ValueWriterBlob};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut writer = ValueWriterBlob::new_le();
//!     writer.write_u8(1)?;
//!     writer.write_u32(1)?;
//!     assert_eq!(writer.into_blob().into_vec(), vec![1, 1, 0, 0, 0]);
//!     Ok(())
//! }
//! ```

use super::ValueWriter;
use crate::types::Blob;
use anyhow::Result;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::io::{Cursor, Write};
use std::marker::PhantomData;

/// Writes values to an in-memory buffer using the byte order `E`.
pub struct ValueWriterBlob<E: ByteOrder> {
	_phantom: PhantomData<E>,
	cursor: Cursor<Vec<u8>>,
}

impl<E: ByteOrder> ValueWriterBlob<E> {
	#[must_use]
	pub fn new() -> ValueWriterBlob<E> {
		ValueWriterBlob {
			_phantom: PhantomData,
			cursor: Cursor::new(Vec::new()),
		}
	}

	/// Converts the written data into a `Blob`.
	#[must_use]
	pub fn into_blob(self) -> Blob {
		Blob::from(self.cursor.into_inner())
	}
}

impl ValueWriterBlob<LittleEndian> {
	/// Creates a writer with little-endian byte order.
	#[must_use]
	pub fn new_le() -> ValueWriterBlob<LittleEndian> {
		ValueWriterBlob::new()
	}
}

impl ValueWriterBlob<BigEndian> {
	/// Creates a writer with big-endian byte order.
	#[must_use]
	pub fn new_be() -> ValueWriterBlob<BigEndian> {
		ValueWriterBlob::new()
	}
}

impl<E: ByteOrder> ValueWriter<E> for ValueWriterBlob<E> {
	fn get_writer(&mut self) -> &mut dyn Write {
		&mut self.cursor
	}

	fn position(&mut self) -> Result<u64> {
		Ok(self.cursor.position())
	}
}

impl<E: ByteOrder> Default for ValueWriterBlob<E> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn write_u8() -> Result<()> {
		let mut writer = ValueWriterBlob::<LittleEndian>::new();
		assert!(writer.is_empty()?);
		writer.write_u8(255)?;
		assert!(!writer.is_empty()?);
		assert_eq!(writer.into_blob().into_vec(), vec![0xFF]);
		Ok(())
	}

	#[test]
	fn write_u32_orders() -> Result<()> {
		let mut le = ValueWriterBlob::new_le();
		le.write_u32(1001)?;
		assert_eq!(le.into_blob().into_vec(), vec![0xE9, 0x03, 0x00, 0x00]);

		let mut be = ValueWriterBlob::new_be();
		be.write_u32(1001)?;
		assert_eq!(be.into_blob().into_vec(), vec![0x00, 0x00, 0x03, 0xE9]);
		Ok(())
	}

	#[test]
	fn write_f64() -> Result<()> {
		let mut writer = ValueWriterBlob::<LittleEndian>::new();
		writer.write_f64(1.0)?;
		assert_eq!(
			writer.into_blob().into_vec(),
			vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F]
		);
		Ok(())
	}

	#[test]
	fn write_count_and_slice() -> Result<()> {
		let mut writer = ValueWriterBlob::<BigEndian>::new();
		writer.write_count(2)?;
		writer.write_slice(&[7, 8])?;
		assert_eq!(writer.position()?, 6);
		assert_eq!(writer.into_blob().into_vec(), vec![0, 0, 0, 2, 7, 8]);
		Ok(())
	}
}
