//! This module provides the [`Blob`] struct, a wrapper around [`Vec<u8>`] used to pass encoded
//! geometries (WKB) between the codec and its callers.
//!
//! # Examples
//!
//! ```rust
//! use geomkit_core::Blob;
//!
//! let blob = Blob::from(vec![0x01, 0x01, 0x00, 0x00, 0x00]);
//! assert_eq!(blob.len(), 5);
//! assert_eq!(blob.to_hex(), "0101000000");
//! assert_eq!(Blob::from_hex("0101000000").unwrap(), blob);
//! ```

use anyhow::{Result, bail, ensure};
use std::fmt::Debug;

/// A simple wrapper around [`Vec<u8>`] with helpers for hex conversion.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Blob(Vec<u8>);

impl Blob {
	/// Creates an empty `Blob`.
	#[must_use]
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	/// Returns the underlying bytes.
	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	/// Consumes the blob and returns the underlying vector.
	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	/// Returns the number of bytes.
	#[must_use]
	pub fn len(&self) -> u64 {
		self.0.len() as u64
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns the bytes as a contiguous lowercase hex string, the usual textual form of WKB.
	#[must_use]
	pub fn to_hex(&self) -> String {
		self.0.iter().map(|byte| format!("{byte:02x}")).collect()
	}

	/// Returns a hex dump with each byte separated by a space, used in debug output.
	#[must_use]
	pub fn as_hex(&self) -> String {
		self
			.0
			.iter()
			.map(|byte| format!("{byte:02x}"))
			.collect::<Vec<_>>()
			.join(" ")
	}

	/// Parses a hex string. Upper and lower case digits are accepted, surrounding whitespace is ignored.
	///
	/// # Errors
	/// Returns an error on odd length input or on characters that are not hex digits.
	pub fn from_hex(text: &str) -> Result<Blob> {
		let text = text.trim().as_bytes();
		ensure!(text.len() % 2 == 0, "hex string must have an even number of digits");

		fn nibble(c: u8) -> Result<u8> {
			Ok(match c {
				b'0'..=b'9' => c - b'0',
				b'a'..=b'f' => c - b'a' + 10,
				b'A'..=b'F' => c - b'A' + 10,
				_ => bail!("invalid hex digit '{}'", c as char),
			})
		}

		let bytes = text
			.chunks_exact(2)
			.map(|pair| Ok((nibble(pair[0])? << 4) | nibble(pair[1])?))
			.collect::<Result<Vec<u8>>>()?;
		Ok(Blob(bytes))
	}
}

impl From<Vec<u8>> for Blob {
	fn from(value: Vec<u8>) -> Self {
		Blob(value)
	}
}

impl From<&[u8]> for Blob {
	fn from(value: &[u8]) -> Self {
		Blob(value.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Blob {
	fn from(value: &[u8; N]) -> Self {
		Blob(value.to_vec())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Blob({}): {}", self.0.len(), self.as_hex())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn empty() {
		let blob = Blob::new_empty();
		assert!(blob.is_empty());
		assert_eq!(blob.len(), 0);
		assert_eq!(blob.to_hex(), "");
	}

	#[test]
	fn hex_round_trip() {
		let blob = Blob::from(&[0xde, 0xad, 0xbe, 0xef]);
		assert_eq!(blob.to_hex(), "deadbeef");
		assert_eq!(blob.as_hex(), "de ad be ef");
		assert_eq!(Blob::from_hex("DEADbeef").unwrap(), blob);
	}

	#[test]
	fn from_hex_trims_whitespace() {
		assert_eq!(Blob::from_hex("  0a0b\n").unwrap().into_vec(), vec![0x0a, 0x0b]);
	}

	#[rstest]
	#[case("abc")]
	#[case("zz")]
	#[case("0x01")]
	fn from_hex_rejects(#[case] text: &str) {
		assert!(Blob::from_hex(text).is_err());
	}

	#[test]
	fn debug_format() {
		assert_eq!(format!("{:?}", Blob::from(&[1, 2])), "Blob(2): 01 02");
	}
}
