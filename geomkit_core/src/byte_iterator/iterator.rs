//! A byte-level cursor over a reader or string source, used by the text parsers.
//!
//! `ByteIterator` keeps exactly one byte of lookahead. Parsers [`peek`](ByteIterator::peek) to decide
//! what comes next and [`consume`](ByteIterator::consume) once they commit. Errors produced through
//! [`format_error`](ByteIterator::format_error) carry the byte offset of the lookahead, and in debug
//! mode the last few bytes of input so the failure can be located.

use anyhow::{Error, Result, anyhow};
use std::io::{Cursor, Read};

const DEBUG_RING_BUFFER_SIZE: usize = 16;
const BUFFER_SIZE: usize = 4096;

/// An iterator over bytes with single-byte lookahead and positioned error messages.
pub struct ByteIterator<'a> {
	buffer: [u8; BUFFER_SIZE],
	buffer_len: usize,
	buffer_pos: usize,
	source: Box<dyn Read + 'a>,
	peeked_byte: Option<u8>,
	// offset of `peeked_byte` in the stream
	position: usize,
	is_debug_enabled: bool,
	debug_buffer: [u8; DEBUG_RING_BUFFER_SIZE],
}

impl<'a> ByteIterator<'a> {
	/// Creates a new `ByteIterator` reading from `reader`.
	///
	/// With `debug` enabled a ring buffer of recently read bytes is kept and appended to error messages.
	pub fn from_reader(reader: impl Read + 'a, debug: bool) -> Self {
		let mut instance = ByteIterator {
			buffer: [0; BUFFER_SIZE],
			buffer_len: 0,
			buffer_pos: 0,
			source: Box::new(reader),
			peeked_byte: None,
			position: 0,
			is_debug_enabled: debug,
			debug_buffer: [0; DEBUG_RING_BUFFER_SIZE],
		};
		instance.fill_buffer();
		instance.peeked_byte = instance.next_byte();
		instance.record_debug();
		instance
	}

	/// Creates a new `ByteIterator` over a string slice, with debug output enabled.
	#[must_use]
	pub fn from_text(text: &'a str) -> Self {
		Self::from_reader(Cursor::new(text.as_bytes()), true)
	}

	#[inline]
	fn fill_buffer(&mut self) {
		self.buffer_len = self.source.read(&mut self.buffer).unwrap_or(0);
		self.buffer_pos = 0;
	}

	#[inline]
	fn next_byte(&mut self) -> Option<u8> {
		if self.buffer_pos >= self.buffer_len {
			self.fill_buffer();
			if self.buffer_len == 0 {
				return None;
			}
		}
		let byte = self.buffer[self.buffer_pos];
		self.buffer_pos += 1;
		Some(byte)
	}

	#[inline]
	fn record_debug(&mut self) {
		if self.is_debug_enabled
			&& let Some(byte) = self.peeked_byte
		{
			self.debug_buffer[self.position % DEBUG_RING_BUFFER_SIZE] = byte;
		}
	}

	/// Builds an error containing `msg` and the offset of the current lookahead byte.
	///
	/// In debug mode the bytes read so far (at most the last 16) are appended, with `<EOF>` marking
	/// the end of the input.
	#[must_use]
	pub fn format_error(&self, msg: &str) -> Error {
		if !self.is_debug_enabled {
			return anyhow!("{msg} at position {}", self.position);
		}

		let length = self.position.min(DEBUG_RING_BUFFER_SIZE - 1);
		let start_index = (self.position + DEBUG_RING_BUFFER_SIZE - length) % DEBUG_RING_BUFFER_SIZE;
		let snapshot: Vec<u8> = self
			.debug_buffer
			.iter()
			.cycle()
			.skip(start_index)
			.take(length)
			.copied()
			.collect();

		let mut context = String::from_utf8_lossy(&snapshot).into_owned();
		if self.peeked_byte.is_none() {
			context.push_str("<EOF>");
		}
		anyhow!("{msg} at position {}: {context}", self.position)
	}

	/// Returns the offset of the lookahead byte.
	#[inline]
	#[must_use]
	pub fn position(&self) -> usize {
		self.position
	}

	/// Returns the lookahead byte, or `None` at the end of the input.
	#[inline]
	#[must_use]
	pub fn peek(&self) -> Option<u8> {
		self.peeked_byte
	}

	/// Drops the lookahead byte and loads the next one.
	#[inline]
	pub fn advance(&mut self) {
		if self.peeked_byte.is_none() {
			return;
		}
		self.peeked_byte = self.next_byte();
		self.position += 1;
		self.record_debug();
	}

	/// Returns the lookahead byte and advances.
	#[inline]
	pub fn consume(&mut self) -> Option<u8> {
		let current_byte = self.peeked_byte;
		self.advance();
		current_byte
	}

	/// Returns the lookahead byte and advances.
	///
	/// # Errors
	/// Returns an error at the end of the input.
	#[inline]
	pub fn expect_next_byte(&mut self) -> Result<u8> {
		if let Some(current_byte) = self.peeked_byte {
			self.advance();
			Ok(current_byte)
		} else {
			Err(self.format_error("unexpected end"))
		}
	}

	/// Returns the lookahead byte without advancing.
	///
	/// # Errors
	/// Returns an error at the end of the input.
	#[inline]
	pub fn expect_peeked_byte(&self) -> Result<u8> {
		self.peeked_byte.ok_or_else(|| self.format_error("unexpected end"))
	}

	/// Skips ASCII whitespace.
	pub fn skip_whitespace(&mut self) {
		while let Some(byte) = self.peek() {
			if !byte.is_ascii_whitespace() {
				break;
			}
			self.advance();
		}
	}

	/// Returns `true` once every byte has been consumed.
	#[must_use]
	pub fn is_at_end(&self) -> bool {
		self.peeked_byte.is_none()
	}

	/// Consumes all remaining bytes and collects them into a UTF-8 `String`.
	///
	/// # Errors
	/// Returns an error if the collected bytes are not valid UTF-8.
	pub fn into_string(mut self) -> Result<String> {
		let mut result = Vec::new();
		while let Some(byte) = self.consume() {
			result.push(byte);
		}
		String::from_utf8(result).map_err(Error::from)
	}
}
