//! In-place edits of a [`Geometry`].
//!
//! Every edit works on a copy that is verified before it replaces the original, so a failed edit
//! leaves the geometry untouched.

mod dimensions;
mod parts;
mod rings;
mod transform;
mod vertex;

use super::Geometry;
use anyhow::Result;

impl Geometry {
	/// Applies `edit` to a copy and keeps the copy only if the edit succeeds and the result
	/// verifies.
	pub(crate) fn transact(&mut self, edit: impl FnOnce(&mut Geometry) -> Result<()>) -> Result<()> {
		let mut draft = self.clone();
		edit(&mut draft)?;
		draft.verify()?;
		*self = draft;
		Ok(())
	}
}
