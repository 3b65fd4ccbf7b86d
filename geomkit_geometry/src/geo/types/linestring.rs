use super::{GeometryTrait, Vertex, vertex_bounds};
use crate::GeometryError;
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// A sequence of vertices connected by straight segments.
#[derive(Clone, Default, PartialEq)]
pub struct LineString(pub Vec<Vertex>);

impl LineString {
	/// `true` if there are at least two vertices and the first equals the last in x, y and z.
	#[must_use]
	pub fn is_closed(&self) -> bool {
		match (self.0.first(), self.0.last()) {
			(Some(first), Some(last)) if self.0.len() > 1 => first.same_xy(last) && first.z == last.z,
			_ => false,
		}
	}

	/// Inserts `vertex` before position `index`; `index == len` appends.
	pub fn insert_vertex(&mut self, index: usize, vertex: Vertex) -> Result<()> {
		if index > self.0.len() {
			return Err(out_of_range(index, self.0.len() + 1));
		}
		self.0.insert(index, vertex);
		Ok(())
	}

	/// Removes the vertex at `index`. A line left with a single vertex is cleared.
	pub fn delete_vertex(&mut self, index: usize) -> Result<()> {
		if index >= self.0.len() {
			return Err(out_of_range(index, self.0.len()));
		}
		self.0.remove(index);
		if self.0.len() == 1 {
			self.0.clear();
		}
		Ok(())
	}
}

pub(crate) fn out_of_range(index: usize, count: usize) -> anyhow::Error {
	GeometryError::OutOfRange { index, count }.into()
}

impl GeometryTrait for LineString {
	/// A line has no area.
	fn area(&self) -> f64 {
		0.0
	}

	/// A standalone line must not be empty. Lines inside compound curves are checked there.
	fn verify(&self) -> Result<()> {
		ensure!(!self.0.is_empty(), GeometryError::structural("LineString must not be empty"));
		Ok(())
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		vertex_bounds(&self.0)
	}

	fn vertex_count(&self) -> usize {
		self.0.len()
	}

	fn for_each_vertex_mut(&mut self, f: &mut dyn FnMut(&mut Vertex)) {
		self.0.iter_mut().for_each(f);
	}
}

impl Debug for LineString {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(LineString, Vertex);
