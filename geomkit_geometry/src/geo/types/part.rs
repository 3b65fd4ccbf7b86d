use super::{Curve, GeometryTrait, Polygon, Vertex, linestring::out_of_range, merge_bounds, vertex_bounds};
use crate::{Geometry, GeometryError, GeometryKind};
use anyhow::{Result, bail};
use std::fmt::Debug;

/// One element of a geometry.
///
/// Single geometries hold at most one part, multi geometries and collections any number.
/// `Collection` only appears inside a GeometryCollection and holds a nested multi geometry or
/// collection.
#[derive(Clone, PartialEq)]
pub enum Part {
	Point(Vertex),
	Curve(Curve),
	Polygon(Polygon),
	CurvePolygon(Polygon),
	Collection(Geometry),
}

impl Part {
	/// The flat kind of this part as a standalone geometry.
	#[must_use]
	pub fn kind(&self) -> GeometryKind {
		match self {
			Part::Point(_) => GeometryKind::Point,
			Part::Curve(curve) => curve.kind(),
			Part::Polygon(_) => GeometryKind::Polygon,
			Part::CurvePolygon(_) => GeometryKind::CurvePolygon,
			Part::Collection(geometry) => geometry.kind(),
		}
	}

	/// Vertex counts of the rings of this part. Points and curves have a single ring, nested
	/// collections list the rings of all their members.
	#[must_use]
	pub fn ring_vertex_counts(&self) -> Vec<usize> {
		match self {
			Part::Point(_) => vec![1],
			Part::Curve(curve) => vec![curve.vertex_count()],
			Part::Polygon(polygon) | Part::CurvePolygon(polygon) => {
				polygon.0.iter().map(Curve::vertex_count).collect()
			}
			Part::Collection(geometry) => geometry.parts().iter().flat_map(Part::ring_vertex_counts).collect(),
		}
	}

	#[must_use]
	pub fn ring_count(&self) -> usize {
		match self {
			Part::Point(_) | Part::Curve(_) => 1,
			Part::Polygon(polygon) | Part::CurvePolygon(polygon) => polygon.0.len(),
			Part::Collection(geometry) => geometry.parts().iter().map(Part::ring_count).sum(),
		}
	}

	/// `true` if the part has nothing left and should be dropped by its owner.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		match self {
			Part::Point(_) => false,
			Part::Curve(curve) => curve.is_empty(),
			Part::Polygon(polygon) | Part::CurvePolygon(polygon) => polygon.0.is_empty(),
			Part::Collection(geometry) => geometry.is_empty(),
		}
	}

	/// Returns the vertex at `index` of `ring`.
	#[must_use]
	pub fn vertex(&self, ring: usize, index: usize) -> Option<Vertex> {
		match self {
			Part::Point(point) => (ring == 0 && index == 0).then_some(*point),
			Part::Curve(curve) => (ring == 0).then(|| curve.vertex(index)).flatten(),
			Part::Polygon(polygon) | Part::CurvePolygon(polygon) => polygon.0.get(ring)?.vertex(index),
			Part::Collection(geometry) => {
				let (member, ring) = geometry.locate_ring(ring)?;
				geometry.parts()[member].vertex(ring, index)
			}
		}
	}

	/// The curve forming ring `ring`, if the part is made of curves.
	#[must_use]
	pub fn ring(&self, ring: usize) -> Option<&Curve> {
		match self {
			Part::Point(_) => None,
			Part::Curve(curve) => (ring == 0).then_some(curve),
			Part::Polygon(polygon) | Part::CurvePolygon(polygon) => polygon.0.get(ring),
			Part::Collection(geometry) => {
				let (member, ring) = geometry.locate_ring(ring)?;
				geometry.parts()[member].ring(ring)
			}
		}
	}

	pub(crate) fn insert_vertex(&mut self, ring: usize, index: usize, vertex: Vertex) -> Result<()> {
		match self {
			Part::Point(_) => bail!(GeometryError::structural("a point cannot take another vertex")),
			Part::Curve(curve) => {
				check_single_ring(ring)?;
				curve.insert_vertex(index, vertex)
			}
			Part::Polygon(polygon) | Part::CurvePolygon(polygon) => polygon.insert_vertex(ring, index, vertex),
			Part::Collection(geometry) => {
				let (member, ring) = nested_ring(geometry, ring)?;
				geometry.insert_in_part(member, ring, index, vertex)
			}
		}
	}

	/// Deletes a vertex. A curve left with fewer than 2 vertices is emptied, the caller drops the
	/// part once [`Part::is_empty`] reports it vanished.
	pub(crate) fn delete_vertex(&mut self, ring: usize, index: usize) -> Result<()> {
		match self {
			Part::Point(_) => {
				check_single_ring(ring)?;
				if index != 0 {
					return Err(out_of_range(index, 1));
				}
				bail!(GeometryError::structural("a point part is removed, not edited"))
			}
			Part::Curve(curve) => {
				check_single_ring(ring)?;
				curve.delete_vertex(index)?;
				if curve.vertex_count() < 2 {
					*curve = Curve::Line(super::LineString::default());
				}
				Ok(())
			}
			Part::Polygon(polygon) | Part::CurvePolygon(polygon) => polygon.delete_vertex(ring, index),
			Part::Collection(geometry) => {
				let (member, ring) = nested_ring(geometry, ring)?;
				geometry.delete_in_part(member, ring, index)
			}
		}
	}

	pub(crate) fn move_vertex(&mut self, ring: usize, index: usize, vertex: Vertex) -> Result<()> {
		match self {
			Part::Point(point) => {
				check_single_ring(ring)?;
				if index != 0 {
					return Err(out_of_range(index, 1));
				}
				*point = vertex;
				Ok(())
			}
			Part::Curve(curve) => {
				check_single_ring(ring)?;
				curve.set_vertex(index, vertex)
			}
			Part::Polygon(polygon) | Part::CurvePolygon(polygon) => polygon.move_vertex(ring, index, vertex),
			Part::Collection(geometry) => {
				let (member, ring) = nested_ring(geometry, ring)?;
				geometry.parts_mut()[member].move_vertex(ring, index, vertex)
			}
		}
	}

	pub(crate) fn verify(&self) -> Result<()> {
		match self {
			Part::Point(_) => Ok(()),
			Part::Curve(curve) => curve.verify(),
			Part::Polygon(polygon) => polygon.verify_rings(true),
			Part::CurvePolygon(polygon) => polygon.verify_rings(false),
			Part::Collection(geometry) => geometry.verify(),
		}
	}

	#[must_use]
	pub fn area(&self) -> f64 {
		match self {
			Part::Point(_) | Part::Curve(_) => 0.0,
			Part::Polygon(polygon) | Part::CurvePolygon(polygon) => polygon.area(),
			Part::Collection(geometry) => geometry.area(),
		}
	}

	#[must_use]
	pub fn compute_bounds(&self) -> Option<[f64; 4]> {
		match self {
			Part::Point(point) => vertex_bounds([point]),
			Part::Curve(curve) => curve.compute_bounds(),
			Part::Polygon(polygon) | Part::CurvePolygon(polygon) => polygon.compute_bounds(),
			Part::Collection(geometry) => geometry
				.parts()
				.iter()
				.fold(None, |bbox, part| merge_bounds(bbox, part.compute_bounds())),
		}
	}

	#[must_use]
	pub fn vertex_count(&self) -> usize {
		self.ring_vertex_counts().iter().sum()
	}

	pub(crate) fn for_each_vertex_mut(&mut self, f: &mut dyn FnMut(&mut Vertex)) {
		match self {
			Part::Point(point) => f(point),
			Part::Curve(curve) => curve.for_each_vertex_mut(f),
			Part::Polygon(polygon) | Part::CurvePolygon(polygon) => polygon.for_each_vertex_mut(f),
			Part::Collection(geometry) => {
				for part in geometry.parts_mut() {
					part.for_each_vertex_mut(f);
				}
			}
		}
	}

	/// Visits every vertex in ordinal order.
	pub fn for_each_vertex(&self, f: &mut dyn FnMut(&Vertex)) {
		match self {
			Part::Point(point) => f(point),
			Part::Curve(curve) => curve.points().iter().for_each(f),
			Part::Polygon(polygon) | Part::CurvePolygon(polygon) => {
				for ring in &polygon.0 {
					ring.points().iter().for_each(&mut *f);
				}
			}
			Part::Collection(geometry) => {
				for part in geometry.parts() {
					part.for_each_vertex(f);
				}
			}
		}
	}
}

fn check_single_ring(ring: usize) -> Result<()> {
	if ring == 0 { Ok(()) } else { Err(out_of_range(ring, 1)) }
}

fn nested_ring(geometry: &Geometry, ring: usize) -> Result<(usize, usize)> {
	geometry
		.locate_ring(ring)
		.ok_or_else(|| out_of_range(ring, geometry.parts().iter().map(Part::ring_count).sum()))
}

impl Debug for Part {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Part::Point(point) => point.fmt(f),
			Part::Curve(curve) => curve.fmt(f),
			Part::Polygon(polygon) => polygon.fmt(f),
			Part::CurvePolygon(polygon) => f.debug_tuple("Curved").field(polygon).finish(),
			Part::Collection(geometry) => geometry.fmt(f),
		}
	}
}

impl From<Vertex> for Part {
	fn from(value: Vertex) -> Self {
		Part::Point(value)
	}
}

impl From<Curve> for Part {
	fn from(value: Curve) -> Self {
		Part::Curve(value)
	}
}
