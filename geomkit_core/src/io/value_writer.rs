//! This module defines the `ValueWriter` trait for writing primitive values to a destination.
//!
//! Implementations expose the underlying [`std::io::Write`] and a position; the typed writes are
//! provided by the trait and use the byte order `E`.
//!
//! # Examples
//!
//! ```rust
//! use geomkit_core::io::{ValueWriter, ValueWriterBlob};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut writer = ValueWriterBlob::new_be();
//!     writer.write_u32(1)?;
//!     assert_eq!(writer.into_blob().into_vec(), vec![0, 0, 0, 1]);
//!     Ok(())
//! }
//! ```

use anyhow::Result;
use byteorder::{ByteOrder, WriteBytesExt};
use std::io::Write;

/// A trait for writing values with a fixed byte order.
pub trait ValueWriter<E: ByteOrder> {
	/// Returns a mutable reference to the underlying writer.
	fn get_writer(&mut self) -> &mut dyn Write;

	/// Returns the current write position.
	///
	/// # Errors
	/// Returns an error if the position cannot be determined.
	fn position(&mut self) -> Result<u64>;

	/// Returns `true` if nothing has been written yet.
	///
	/// # Errors
	/// Returns an error if the position cannot be determined.
	fn is_empty(&mut self) -> Result<bool> {
		Ok(self.position()? == 0)
	}

	/// Writes an 8-bit unsigned integer.
	///
	/// # Errors
	/// Returns an error if writing to the underlying writer fails.
	fn write_u8(&mut self, value: u8) -> Result<()> {
		Ok(self.get_writer().write_u8(value)?)
	}

	/// Writes a 32-bit unsigned integer using the byte order `E`.
	///
	/// # Errors
	/// Returns an error if writing to the underlying writer fails.
	fn write_u32(&mut self, value: u32) -> Result<()> {
		Ok(self.get_writer().write_u32::<E>(value)?)
	}

	/// Writes a 64-bit floating-point value using the byte order `E`.
	///
	/// # Errors
	/// Returns an error if writing to the underlying writer fails.
	fn write_f64(&mut self, value: f64) -> Result<()> {
		Ok(self.get_writer().write_f64::<E>(value)?)
	}

	/// Writes a collection length as `u32`.
	///
	/// # Errors
	/// Returns an error if the length does not fit into 32 bits or writing fails.
	fn write_count(&mut self, count: usize) -> Result<()> {
		let count = u32::try_from(count)?;
		self.write_u32(count)
	}

	/// Writes a slice of bytes unchanged.
	///
	/// # Errors
	/// Returns an error if writing to the underlying writer fails.
	fn write_slice(&mut self, buf: &[u8]) -> Result<()> {
		self.get_writer().write_all(buf)?;
		Ok(())
	}
}
