use anyhow::Result;
use std::fmt::Debug;

/// Defines the basic interface shared by all geometry building blocks.
pub trait GeometryTrait: Debug + Clone + Sized {
	/// Returns the enclosed area. Points and curves enclose no area and return 0.
	fn area(&self) -> f64;

	/// Verifies the structural invariants, e.g. that rings are closed or that arcs have an odd
	/// number of points. Returns an error describing the first violation.
	fn verify(&self) -> Result<()>;

	/// Compute the bounding box.
	///
	/// Returns `Some([x_min, y_min, x_max, y_max])`, or `None` if there are no vertices. Circular
	/// arcs contribute their full extent, not just their control points.
	fn compute_bounds(&self) -> Option<[f64; 4]>;

	/// Number of vertices. Shared vertices (compound curve junctions) are counted once.
	fn vertex_count(&self) -> usize;

	/// Applies `f` to every stored vertex, including both copies of shared vertices.
	fn for_each_vertex_mut(&mut self, f: &mut dyn FnMut(&mut super::Vertex));
}

/// Merges two optional bounding boxes.
pub(crate) fn merge_bounds(a: Option<[f64; 4]>, b: Option<[f64; 4]>) -> Option<[f64; 4]> {
	match (a, b) {
		(Some(a), Some(b)) => Some([a[0].min(b[0]), a[1].min(b[1]), a[2].max(b[2]), a[3].max(b[3])]),
		(a, b) => a.or(b),
	}
}

/// Bounding box of the given vertices.
pub(crate) fn vertex_bounds<'a>(vertices: impl IntoIterator<Item = &'a super::Vertex>) -> Option<[f64; 4]> {
	let mut iter = vertices.into_iter();
	let first = iter.next()?;
	let mut bbox = [first.x, first.y, first.x, first.y];
	for v in iter {
		crate::math::extend_bounds(&mut bbox, v.x, v.y);
	}
	Some(bbox)
}
