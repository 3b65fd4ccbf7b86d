//! Defines [`GeometryError`], the typed root cause of every failure reported by this crate.
//!
//! Functions return `anyhow::Result`. Codec boundaries add `.context(...)` layers on top, the
//! `GeometryError` stays reachable through [`GeometryError::find`] or `anyhow::Error::downcast_ref`.

use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GeometryError {
	/// Malformed text or binary input, or an argument that makes no sense for the geometry.
	#[error("invalid input: {0}")]
	InvalidInput(String),

	/// A vertex ordinal or part/ring index outside the geometry.
	#[error("index {index} is out of range, the geometry has {count}")]
	OutOfRange { index: usize, count: usize },

	/// A part whose kind the container does not accept.
	#[error("a {part} part cannot be added to a {container}")]
	IncompatiblePart { part: String, container: String },

	/// An edit that would break a structural invariant and cannot be repaired.
	#[error("structural violation: {0}")]
	StructuralViolation(String),
}

impl GeometryError {
	pub fn invalid(message: impl Into<String>) -> GeometryError {
		GeometryError::InvalidInput(message.into())
	}

	pub fn structural(message: impl Into<String>) -> GeometryError {
		GeometryError::StructuralViolation(message.into())
	}

	/// `true` for errors caused by the caller's input, `false` for structural violations.
	#[must_use]
	pub fn is_invalid_input(&self) -> bool {
		!matches!(self, GeometryError::StructuralViolation(_))
	}

	/// Finds the `GeometryError` in the chain of an `anyhow::Error`, if there is one.
	#[must_use]
	pub fn find(error: &anyhow::Error) -> Option<&GeometryError> {
		error.chain().find_map(|cause| cause.downcast_ref::<GeometryError>())
	}
}

/// Turns an untyped decoding error into `InvalidInput`, keeping errors that already carry a
/// `GeometryError`.
pub(crate) fn into_invalid(error: anyhow::Error) -> anyhow::Error {
	if GeometryError::find(&error).is_some() {
		error
	} else {
		GeometryError::invalid(format!("{error:#}")).into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use anyhow::{Context, Result};

	fn fail() -> Result<()> {
		Err(GeometryError::OutOfRange { index: 7, count: 5 }.into())
	}

	#[test]
	fn messages() {
		assert_eq!(
			GeometryError::OutOfRange { index: 7, count: 5 }.to_string(),
			"index 7 is out of range, the geometry has 5"
		);
		assert_eq!(
			GeometryError::IncompatiblePart {
				part: "Point".into(),
				container: "MultiPolygon".into()
			}
			.to_string(),
			"a Point part cannot be added to a MultiPolygon"
		);
	}

	#[test]
	fn categories() {
		assert!(GeometryError::invalid("x").is_invalid_input());
		assert!(GeometryError::OutOfRange { index: 0, count: 0 }.is_invalid_input());
		assert!(!GeometryError::structural("x").is_invalid_input());
	}

	#[test]
	fn found_below_context() {
		let error = fail().context("while moving a vertex").unwrap_err();
		assert_eq!(error.to_string(), "while moving a vertex");
		assert_eq!(
			GeometryError::find(&error),
			Some(&GeometryError::OutOfRange { index: 7, count: 5 })
		);
	}
}
