//! Small parsing helpers built on top of [`ByteIterator`](super::iterator::ByteIterator).
//!
//! These functions cover the token grammar of well-known text:
//! - `parse_tag` for matching fixed ASCII tags
//! - `parse_word` for alphanumeric keywords such as `LineString` or `EMPTY`
//! - `parse_number_as_string` and `parse_number_as<T>` for decimal numbers with optional exponent
//! - `parse_parenthesized_entries` to iterate over a comma separated list in `( ... )`
//!
//! Parsing functions consume only as much as needed and leave the iterator positioned at the
//! next token (e.g. right after a closing `)`).

use super::iterator::ByteIterator;
use anyhow::{Context, Error, Result, bail};
use std::str::FromStr;

/// Match a fixed ASCII tag at the current iterator position.
///
/// # Errors
/// Returns an error if the upcoming bytes do not exactly match `tag` or if the input ends early.
///
/// # Example
/// ```
/// # use geomkit_core::byte_iterator::{ByteIterator, parse_tag};
/// let mut it = ByteIterator::from_text("EMPTY");
/// parse_tag(&mut it, "EMPTY").unwrap();
/// ```
pub fn parse_tag(iter: &mut ByteIterator, tag: &str) -> Result<()> {
	for c in tag.bytes() {
		if iter.expect_next_byte().with_context(|| format!("while parsing tag '{tag}'"))? != c {
			return Err(iter.format_error(&format!("unexpected character while parsing tag '{tag}'")));
		}
	}
	Ok(())
}

/// Read a keyword made of ASCII letters, digits and underscores.
///
/// Leading whitespace is skipped. Returns an empty string if the next byte cannot start a word.
///
/// # Example
/// ```
/// # use geomkit_core::byte_iterator::{ByteIterator, parse_word};
/// let mut it = ByteIterator::from_text("  PointZM (1 2 3 4)");
/// assert_eq!(parse_word(&mut it), "PointZM");
/// ```
pub fn parse_word(iter: &mut ByteIterator) -> String {
	iter.skip_whitespace();
	let mut word = String::new();
	while let Some(byte) = iter.peek() {
		if !(byte.is_ascii_alphanumeric() || byte == b'_') {
			break;
		}
		word.push(char::from(byte));
		iter.advance();
	}
	word
}

/// Parse a decimal number and return its textual representation.
///
/// Accepts an optional sign, digits with an optional decimal point (`1`, `1.5`, `.5` and `1.` are
/// all valid, at least one digit is required) and an optional exponent with at least one digit.
///
/// Leaves the iterator at the first byte that is not part of the number.
///
/// # Errors
/// Returns an error if digits are missing or the number contains a second decimal point.
///
/// # Example
/// ```
/// # use geomkit_core::byte_iterator::{ByteIterator, parse_number_as_string};
/// let mut it = ByteIterator::from_text("-12.3e+4,");
/// assert_eq!(parse_number_as_string(&mut it).unwrap(), "-12.3e+4");
/// ```
pub fn parse_number_as_string(iter: &mut ByteIterator) -> Result<String> {
	let mut number = Vec::with_capacity(16);

	if let Some(b'+' | b'-') = iter.peek() {
		number.push(iter.expect_next_byte()?);
	}

	let mut has_digits = false;
	while let Some(b'0'..=b'9') = iter.peek() {
		has_digits = true;
		number.push(iter.expect_next_byte()?);
	}

	if let Some(b'.') = iter.peek() {
		number.push(iter.expect_next_byte()?);
		while let Some(b'0'..=b'9') = iter.peek() {
			has_digits = true;
			number.push(iter.expect_next_byte()?);
		}
		if let Some(b'.') = iter.peek() {
			return Err(iter.format_error("unexpected '.' in number"));
		}
	}

	if !has_digits {
		return Err(iter.format_error("expected digits in number"));
	}

	if let Some(b'e' | b'E') = iter.peek() {
		number.push(iter.expect_next_byte()?);
		if let Some(b'+' | b'-') = iter.peek() {
			number.push(iter.expect_next_byte()?);
		}
		let mut exponent_digits = false;
		while let Some(b'0'..=b'9') = iter.peek() {
			exponent_digits = true;
			number.push(iter.expect_next_byte()?);
		}
		if !exponent_digits {
			return Err(iter.format_error("expected digits after exponent"));
		}
	}

	String::from_utf8(number).map_err(Error::from)
}

/// Parse a number and convert it to a concrete type `R`.
///
/// # Errors
/// Returns an error if number parsing fails or if `R::from_str` rejects the text.
///
/// # Example
/// ```
/// # use geomkit_core::byte_iterator::{ByteIterator, parse_number_as};
/// let mut it = ByteIterator::from_text("42");
/// let n: f64 = parse_number_as(&mut it).unwrap();
/// assert_eq!(n, 42.0);
/// ```
pub fn parse_number_as<R: FromStr>(iter: &mut ByteIterator) -> Result<R> {
	parse_number_as_string(iter)?
		.parse::<R>()
		.map_err(|_| iter.format_error("invalid number"))
}

/// Iterate over the comma separated entries of a `( ... )` list, collecting the results of `parse_value`.
///
/// Whitespace is allowed between all tokens. The closure is called with the iterator positioned
/// at the first non-whitespace byte of each entry. An empty list `()` is rejected because
/// well-known text writes empty geometries as `EMPTY`.
///
/// # Errors
/// Returns an error on a missing bracket or comma, or if `parse_value` fails.
///
/// # Example
/// ```
/// # use geomkit_core::byte_iterator::{ByteIterator, parse_parenthesized_entries, parse_number_as};
/// let mut it = ByteIterator::from_text("(1, 2,3)");
/// let nums: Vec<i32> = parse_parenthesized_entries(&mut it, parse_number_as).unwrap();
/// assert_eq!(nums, vec![1, 2, 3]);
/// ```
pub fn parse_parenthesized_entries<R>(
	iter: &mut ByteIterator,
	mut parse_value: impl FnMut(&mut ByteIterator) -> Result<R>,
) -> Result<Vec<R>> {
	iter.skip_whitespace();
	if iter.expect_next_byte()? != b'(' {
		bail!(iter.format_error("expected '('"));
	}

	let mut result = Vec::new();
	loop {
		iter.skip_whitespace();
		result.push(parse_value(iter)?);
		iter.skip_whitespace();
		match iter.expect_next_byte()? {
			b')' => break,
			b',' => {}
			_ => return Err(iter.format_error("expected ',' or ')'")),
		}
	}
	Ok(result)
}
