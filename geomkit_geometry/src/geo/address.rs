//! Flat vertex ordinals and their mapping to `(part, ring, vertex)` locations.
//!
//! Ordinals count parts in order, then the rings of each part (exterior first), then the vertices
//! of each ring. Shared compound junctions count once, a ring's closing vertex counts as its own
//! vertex.

use super::{Geometry, Part};
use crate::Vertex;

/// Location of a vertex inside a geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VertexId {
	pub part: usize,
	pub ring: usize,
	pub vertex: usize,
}

impl VertexId {
	#[must_use]
	pub fn new(part: usize, ring: usize, vertex: usize) -> Self {
		Self { part, ring, vertex }
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct RingEntry {
	start: usize,
	part: usize,
	ring: usize,
	count: usize,
}

/// Prefix sums over the vertex counts of all rings, for resolving ordinals by binary search.
///
/// Derived from a geometry and invalid as soon as the geometry changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexIndex {
	rings: Vec<RingEntry>,
	total: usize,
}

impl VertexIndex {
	#[must_use]
	pub fn new(geometry: &Geometry) -> Self {
		let mut rings = Vec::new();
		let mut total = 0;
		for (part, item) in geometry.parts().iter().enumerate() {
			for (ring, count) in item.ring_vertex_counts().into_iter().enumerate() {
				if count == 0 {
					continue;
				}
				rings.push(RingEntry {
					start: total,
					part,
					ring,
					count,
				});
				total += count;
			}
		}
		Self { rings, total }
	}

	#[must_use]
	pub fn vertex_count(&self) -> usize {
		self.total
	}

	fn entry(&self, ordinal: usize) -> Option<&RingEntry> {
		if ordinal >= self.total {
			return None;
		}
		let position = self.rings.partition_point(|entry| entry.start <= ordinal);
		self.rings.get(position.checked_sub(1)?)
	}

	/// The location of vertex `ordinal`, `None` if it is out of range.
	#[must_use]
	pub fn resolve(&self, ordinal: usize) -> Option<VertexId> {
		let entry = self.entry(ordinal)?;
		Some(VertexId::new(entry.part, entry.ring, ordinal - entry.start))
	}

	/// The ordinal of `id`, `None` if there is no such vertex.
	#[must_use]
	pub fn ordinal(&self, id: VertexId) -> Option<usize> {
		let position = self
			.rings
			.binary_search_by(|entry| (entry.part, entry.ring).cmp(&(id.part, id.ring)))
			.ok()?;
		let entry = &self.rings[position];
		(id.vertex < entry.count).then(|| entry.start + id.vertex)
	}

	/// First ordinal and vertex count of the ring holding `ordinal`.
	#[must_use]
	pub fn ring_span(&self, ordinal: usize) -> Option<(usize, usize)> {
		self.entry(ordinal).map(|entry| (entry.start, entry.count))
	}
}

impl Geometry {
	#[must_use]
	pub fn vertex_index(&self) -> VertexIndex {
		VertexIndex::new(self)
	}

	/// Total number of vertices. Compound junctions count once.
	#[must_use]
	pub fn vertex_count(&self) -> usize {
		self.parts().iter().map(Part::vertex_count).sum()
	}

	#[must_use]
	pub fn vertex_id_from_vertex_nr(&self, ordinal: usize) -> Option<VertexId> {
		self.vertex_index().resolve(ordinal)
	}

	#[must_use]
	pub fn vertex_nr_from_vertex_id(&self, id: VertexId) -> Option<usize> {
		self.vertex_index().ordinal(id)
	}

	#[must_use]
	pub fn vertex_at(&self, ordinal: usize) -> Option<Vertex> {
		let id = self.vertex_id_from_vertex_nr(ordinal)?;
		self.parts()[id.part].vertex(id.ring, id.vertex)
	}

	/// Ordinals of the vertices before and after `ordinal`.
	///
	/// Open curves have no neighbour past their ends. Closed rings wrap around and skip the
	/// duplicated closing vertex. Points have no neighbours.
	#[must_use]
	pub fn adjacent_vertices(&self, ordinal: usize) -> (Option<usize>, Option<usize>) {
		let index = self.vertex_index();
		let (Some(id), Some((start, count))) = (index.resolve(ordinal), index.ring_span(ordinal)) else {
			return (None, None);
		};
		let Some(curve) = self.parts()[id.part].ring(id.ring) else {
			return (None, None);
		};

		if curve.is_closed() && count >= 4 {
			let last = start + count - 1;
			let previous = if ordinal == start { last - 1 } else { ordinal - 1 };
			let next = if ordinal == last { start + 1 } else { ordinal + 1 };
			return (Some(previous), Some(next));
		}
		let previous = (ordinal > start).then(|| ordinal - 1);
		let next = (ordinal + 1 < start + count).then_some(ordinal + 1);
		(previous, next)
	}

	/// The vertex closest to `(x, y)` as `(ordinal, squared distance)`. The first one wins ties.
	#[must_use]
	pub fn closest_vertex(&self, x: f64, y: f64) -> Option<(usize, f64)> {
		let mut best: Option<(usize, f64)> = None;
		let mut ordinal = 0;
		for part in self.parts() {
			part.for_each_vertex(&mut |vertex| {
				let distance = vertex.distance_squared(x, y);
				if best.is_none_or(|(_, d)| distance < d) {
					best = Some((ordinal, distance));
				}
				ordinal += 1;
			});
		}
		best
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{GeometryKind, WkbType};
	use approx::assert_relative_eq;
	use rstest::rstest;

	fn polygon_with_hole() -> Geometry {
		Geometry::new_polygon(vec![
			vec![[0, 0], [9, 0], [9, 3], [0, 3], [0, 0]],
			vec![[1, 1], [2, 1], [2, 2], [1, 2], [1, 1]],
		])
		.unwrap()
	}

	#[rstest]
	#[case(0, Some((0, 0, 0)))]
	#[case(4, Some((0, 0, 4)))]
	#[case(5, Some((0, 1, 0)))]
	#[case(9, Some((0, 1, 4)))]
	#[case(10, None)]
	fn resolve(#[case] ordinal: usize, #[case] expected: Option<(usize, usize, usize)>) {
		let geometry = polygon_with_hole();
		let id = geometry.vertex_id_from_vertex_nr(ordinal);
		assert_eq!(id, expected.map(|(p, r, v)| VertexId::new(p, r, v)));
		if let Some(id) = id {
			assert_eq!(geometry.vertex_nr_from_vertex_id(id), Some(ordinal));
		}
	}

	#[test]
	fn ordinal_of_missing_id() {
		let geometry = polygon_with_hole();
		assert_eq!(geometry.vertex_nr_from_vertex_id(VertexId::new(0, 1, 5)), None);
		assert_eq!(geometry.vertex_nr_from_vertex_id(VertexId::new(0, 2, 0)), None);
		assert_eq!(geometry.vertex_nr_from_vertex_id(VertexId::new(1, 0, 0)), None);
	}

	#[test]
	fn multi_point_parts() {
		let geometry = Geometry::new_multi_point(vec![[0, 0], [1, 1], [2, 2]]).unwrap();
		assert_eq!(geometry.vertex_count(), 3);
		assert_eq!(geometry.vertex_id_from_vertex_nr(2), Some(VertexId::new(2, 0, 0)));
		assert_eq!(geometry.vertex_at(1), Some(Vertex::new(1.0, 1.0)));
		assert_eq!(geometry.adjacent_vertices(1), (None, None));
	}

	#[test]
	fn empty_geometry_has_no_vertices() {
		let geometry = Geometry::new(WkbType::from(GeometryKind::LineString));
		assert_eq!(geometry.vertex_count(), 0);
		assert_eq!(geometry.vertex_id_from_vertex_nr(0), None);
		assert_eq!(geometry.closest_vertex(0.0, 0.0), None);
	}

	#[rstest]
	#[case(0, (None, Some(1)))]
	#[case(1, (Some(0), Some(2)))]
	#[case(2, (Some(1), None))]
	fn adjacent_on_open_line(#[case] ordinal: usize, #[case] expected: (Option<usize>, Option<usize>)) {
		let geometry = Geometry::new_line_string(vec![[0, 0], [1, 0], [2, 0]]).unwrap();
		assert_eq!(geometry.adjacent_vertices(ordinal), expected);
	}

	#[rstest]
	#[case(0, (Some(3), Some(1)))]
	#[case(4, (Some(3), Some(1)))]
	#[case(2, (Some(1), Some(3)))]
	#[case(5, (Some(8), Some(6)))]
	#[case(10, (None, None))]
	fn adjacent_on_rings(#[case] ordinal: usize, #[case] expected: (Option<usize>, Option<usize>)) {
		assert_eq!(polygon_with_hole().adjacent_vertices(ordinal), expected);
	}

	#[test]
	fn closest_vertex() {
		let geometry = polygon_with_hole();
		assert_eq!(geometry.closest_vertex(8.0, 2.0), Some((2, 2.0)));
		assert_eq!(geometry.closest_vertex(0.0, 0.0), Some((0, 0.0)));
		let (ordinal, distance) = geometry.closest_vertex(1.4, 1.6).unwrap();
		assert_eq!(ordinal, 8);
		assert_relative_eq!(distance, 0.32, epsilon = 1e-12);
	}

	#[test]
	fn nested_collections_are_flattened() {
		let inner = Geometry::new_multi_line_string(vec![vec![[0, 0], [1, 0]], vec![[5, 5], [6, 6], [7, 7]]]).unwrap();
		let geometry = Geometry::from_parts(
			WkbType::from(GeometryKind::GeometryCollection),
			vec![Part::Point(Vertex::new(9.0, 9.0)), Part::Collection(inner)],
		)
		.unwrap();
		assert_eq!(geometry.vertex_count(), 6);
		assert_eq!(geometry.vertex_id_from_vertex_nr(4), Some(VertexId::new(1, 1, 1)));
		assert_eq!(geometry.vertex_at(4), Some(Vertex::new(6.0, 6.0)));
		assert_eq!(geometry.ring_count(1), 2);
	}
}
