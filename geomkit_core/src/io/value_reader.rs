//! This module defines the `ValueReader` trait for reading primitive values from a byte source.
//!
//! # Overview
//!
//! The `ValueReader` trait provides an interface for reading integers and floating-point numbers with a
//! byte order fixed at compile time. Implementations such as `ValueReaderSlice` only need to expose the
//! underlying reader and the position bookkeeping; all typed reads are provided by the trait.
//!
//! # Examples
//!
//! ```rust
//! use geomkit_core::io::{ValueReader, ValueReaderSlice};
//!
//! let data = &[0x01, 0x02, 0x03, 0x04];
//!
//! let mut reader_le = ValueReaderSlice::new_le(data);
//! assert_eq!(reader_le.read_u32().unwrap(), 0x04030201);
//!
//! let mut reader_be = ValueReaderSlice::new_be(data);
//! assert_eq!(reader_be.read_u32().unwrap(), 0x01020304);
//! ```

use anyhow::{Context, Result};
use byteorder::{ByteOrder, ReadBytesExt};
use std::io::{Read, Seek};

/// A simple alias for types implementing both `Seek` and `Read`, used for convenience.
pub trait SeekRead: Seek + Read {}

/// A trait for reading values from a byte source with a fixed byte order.
pub trait ValueReader<'a, E: ByteOrder + 'a> {
	/// Returns the underlying reader to access raw bytes.
	fn get_reader(&mut self) -> &mut dyn SeekRead;

	/// Returns the total length of the readable data.
	fn len(&self) -> u64;

	/// Returns the current position within the readable data.
	fn position(&mut self) -> u64;

	/// Sets the current position. Seeking to the very end is allowed.
	///
	/// # Errors
	/// Returns an error if the position lies beyond the end of the data.
	fn set_position(&mut self, position: u64) -> Result<()>;

	/// Checks if there is no data to read.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the number of bytes remaining to be read.
	fn remaining(&mut self) -> u64 {
		self.len() - self.position()
	}

	/// Checks if there are any bytes remaining to be read.
	fn has_remaining(&mut self) -> bool {
		self.remaining() > 0
	}

	/// Reads an unsigned 8-bit integer.
	///
	/// # Errors
	/// Returns an error if the data is exhausted.
	fn read_u8(&mut self) -> Result<u8> {
		Ok(self.get_reader().read_u8()?)
	}

	/// Reads an unsigned 32-bit integer.
	///
	/// # Errors
	/// Returns an error if fewer than 4 bytes remain.
	fn read_u32(&mut self) -> Result<u32> {
		Ok(self.get_reader().read_u32::<E>()?)
	}

	/// Reads a 64-bit floating point number.
	///
	/// # Errors
	/// Returns an error if fewer than 8 bytes remain.
	fn read_f64(&mut self) -> Result<f64> {
		Ok(self.get_reader().read_f64::<E>()?)
	}

	/// Reads a `u32` element count and checks that at least `count * min_item_size` bytes remain.
	///
	/// Guards against allocating huge vectors for corrupt counts.
	///
	/// # Errors
	/// Returns an error if the count cannot be read or the data is too short for it.
	fn read_count(&mut self, min_item_size: u64) -> Result<usize> {
		let count = self.read_u32().context("Failed to read element count")?;
		let needed = u64::from(count) * min_item_size;
		let remaining = self.remaining();
		anyhow::ensure!(
			needed <= remaining,
			"element count {count} needs at least {needed} bytes, but only {remaining} remain"
		);
		Ok(count as usize)
	}
}

#[cfg(test)]
mod tests {
	use super::super::ValueReaderSlice;
	use super::*;

	#[test]
	fn is_empty() {
		assert!(ValueReaderSlice::new_le(&[]).is_empty());
		assert!(!ValueReaderSlice::new_le(&[0]).is_empty());
	}

	#[test]
	fn remaining_tracks_reads() {
		let mut reader = ValueReaderSlice::new_le(&[1, 2, 3, 4, 5]);
		assert_eq!(reader.remaining(), 5);
		reader.read_u8().unwrap();
		assert_eq!(reader.remaining(), 4);
		reader.read_u32().unwrap();
		assert!(!reader.has_remaining());
	}

	#[test]
	fn read_count_ok() {
		let mut reader = ValueReaderSlice::new_le(&[2, 0, 0, 0, 9, 9]);
		assert_eq!(reader.read_count(1).unwrap(), 2);
	}

	#[test]
	fn read_count_rejects_oversized() {
		let mut reader = ValueReaderSlice::new_le(&[0xff, 0xff, 0xff, 0x7f, 0]);
		let error = reader.read_count(16).unwrap_err().to_string();
		assert!(error.starts_with("element count 2147483647"), "{error}");
	}
}
