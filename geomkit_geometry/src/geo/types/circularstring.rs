use super::{GeometryTrait, Vertex, linestring::out_of_range, merge_bounds, vertex_bounds};
use crate::{GeometryError, math};
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// A curve made of circular arcs, each given by start, intermediate and end point.
///
/// Consecutive arcs share their end and start point, so a valid string has an odd number of
/// vertices: 3 for one arc, 5 for two arcs and so on.
#[derive(Clone, Default, PartialEq)]
pub struct CircularString(pub Vec<Vertex>);

impl CircularString {
	/// Iterates over the arcs as `(start, intermediate, end)`.
	pub fn arcs(&self) -> impl Iterator<Item = (&Vertex, &Vertex, &Vertex)> {
		self.0.windows(3).step_by(2).map(|w| (&w[0], &w[1], &w[2]))
	}

	#[must_use]
	pub fn is_closed(&self) -> bool {
		match (self.0.first(), self.0.last()) {
			(Some(first), Some(last)) if self.0.len() > 1 => first.same_xy(last) && first.z == last.z,
			_ => false,
		}
	}

	/// Area between the chords and the arcs, to be added to the shoelace area of a ring.
	#[must_use]
	pub fn arc_segment_area(&self) -> f64 {
		self.arcs().map(|(a, b, c)| math::arc_segment_area(a, b, c)).sum()
	}

	/// Inserts `vertex` before position `index` and keeps the string made of whole arcs.
	///
	/// A second vertex is added on the circle of the affected arc. Inserting before the first
	/// vertex is not possible, `index == len` extends the string by a new arc.
	pub fn insert_vertex(&mut self, index: usize, vertex: Vertex) -> Result<()> {
		let len = self.0.len();
		if index > len {
			return Err(out_of_range(index, len + 1));
		}
		ensure!(
			index >= 1,
			GeometryError::structural("cannot insert a vertex before the start of a circular string")
		);
		ensure!(
			index < len || len >= 2,
			GeometryError::structural("cannot extend a circular string with fewer than two vertices")
		);

		self.0.insert(index, vertex);
		if index % 2 == 0 {
			self.insert_vertex_between(index - 2, index - 1, index);
		} else if index < len {
			self.insert_vertex_between(index, index + 1, index - 1);
		} else {
			self.insert_vertex_between(index - 1, index, index - 2);
		}
		Ok(())
	}

	fn insert_vertex_between(&mut self, after: usize, before: usize, on_circle: usize) {
		let point = math::point_between_on_circle(&self.0[after], &self.0[before], &self.0[on_circle]);
		self.0.insert(before, point);
	}

	/// Deletes the vertex at `index` together with a neighbour so the string stays made of arcs.
	///
	/// Strings with fewer than 4 vertices are cleared. Otherwise the vertex and its successor are
	/// removed, or for one of the last two vertices, the vertex and its predecessor.
	pub fn delete_vertex(&mut self, index: usize) -> Result<()> {
		let len = self.0.len();
		if len < 4 {
			self.0.clear();
			return Ok(());
		}
		if index >= len {
			return Err(out_of_range(index, len));
		}
		if index < len - 2 {
			self.0.drain(index..=index + 1);
		} else {
			self.0.drain(index - 1..=index);
		}
		Ok(())
	}
}

impl GeometryTrait for CircularString {
	fn area(&self) -> f64 {
		0.0
	}

	fn verify(&self) -> Result<()> {
		let len = self.0.len();
		ensure!(
			len >= 3 && len % 2 == 1,
			GeometryError::structural(format!(
				"CircularString must have an odd number of at least 3 vertices, found {len}"
			))
		);
		Ok(())
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		let bounds = vertex_bounds(&self.0)?;
		if self.0.len() < 3 {
			return Some(bounds);
		}
		let mut result = None;
		for (a, b, c) in self.arcs() {
			result = merge_bounds(result, Some(math::arc_bounds(a, b, c)));
		}
		if self.0.len() % 2 == 0 {
			result = merge_bounds(result, vertex_bounds(self.0.last()));
		}
		result
	}

	fn vertex_count(&self) -> usize {
		self.0.len()
	}

	fn for_each_vertex_mut(&mut self, f: &mut dyn FnMut(&mut Vertex)) {
		self.0.iter_mut().for_each(f);
	}
}

impl Debug for CircularString {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Arc").field(&self.0).finish()
	}
}

crate::impl_from_array!(CircularString, Vertex);
