use super::{CircularString, CompoundCurve, GeometryTrait, LineString, Segment, Vertex, linestring::out_of_range};
use crate::{GeometryKind, math};
use anyhow::Result;
use std::fmt::Debug;

/// A curve of any flavour: the member type of multi curves and the ring type of curve polygons.
#[derive(Clone, PartialEq)]
pub enum Curve {
	Line(LineString),
	Arc(CircularString),
	Compound(CompoundCurve),
}

impl Curve {
	#[must_use]
	pub fn kind(&self) -> GeometryKind {
		match self {
			Curve::Line(_) => GeometryKind::LineString,
			Curve::Arc(_) => GeometryKind::CircularString,
			Curve::Compound(_) => GeometryKind::CompoundCurve,
		}
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.vertex_count() == 0
	}

	#[must_use]
	pub fn vertex(&self, index: usize) -> Option<Vertex> {
		match self {
			Curve::Line(line) => line.0.get(index).copied(),
			Curve::Arc(arc) => arc.0.get(index).copied(),
			Curve::Compound(compound) => compound.vertex(index).copied(),
		}
	}

	#[must_use]
	pub fn first(&self) -> Option<Vertex> {
		self.vertex(0)
	}

	#[must_use]
	pub fn last(&self) -> Option<Vertex> {
		self.vertex(self.vertex_count().checked_sub(1)?)
	}

	/// All vertices in order. Compound junctions appear once.
	#[must_use]
	pub fn points(&self) -> Vec<Vertex> {
		match self {
			Curve::Line(line) => line.0.clone(),
			Curve::Arc(arc) => arc.0.clone(),
			Curve::Compound(compound) => compound.points(),
		}
	}

	#[must_use]
	pub fn is_closed(&self) -> bool {
		match self {
			Curve::Line(line) => line.is_closed(),
			Curve::Arc(arc) => arc.is_closed(),
			Curve::Compound(compound) => compound.is_closed(),
		}
	}

	/// Signed area enclosed by the curve read as a ring, counter-clockwise positive.
	#[must_use]
	pub fn signed_area(&self) -> f64 {
		match self {
			Curve::Line(line) => math::signed_ring_area(&line.0),
			Curve::Arc(arc) => {
				let chords: Vec<Vertex> = arc.0.iter().step_by(2).copied().collect();
				math::signed_ring_area(&chords) + arc.arc_segment_area()
			}
			Curve::Compound(compound) => {
				math::signed_ring_area(&compound.chord_points()) + compound.arc_segment_area()
			}
		}
	}

	pub fn set_vertex(&mut self, index: usize, vertex: Vertex) -> Result<()> {
		let count = self.vertex_count();
		let slot = match self {
			Curve::Line(line) => line.0.get_mut(index),
			Curve::Arc(arc) => arc.0.get_mut(index),
			Curve::Compound(compound) => return compound.set_vertex(index, vertex),
		};
		match slot {
			Some(slot) => {
				*slot = vertex;
				Ok(())
			}
			None => Err(out_of_range(index, count)),
		}
	}

	pub fn insert_vertex(&mut self, index: usize, vertex: Vertex) -> Result<()> {
		match self {
			Curve::Line(line) => line.insert_vertex(index, vertex),
			Curve::Arc(arc) => arc.insert_vertex(index, vertex),
			Curve::Compound(compound) => compound.insert_vertex(index, vertex),
		}
	}

	pub fn delete_vertex(&mut self, index: usize) -> Result<()> {
		match self {
			Curve::Line(line) => line.delete_vertex(index),
			Curve::Arc(arc) => arc.delete_vertex(index),
			Curve::Compound(compound) => compound.delete_vertex(index),
		}
	}

	/// Makes the last vertex equal to the first one.
	pub fn close(&mut self) -> Result<()> {
		let count = self.vertex_count();
		match self.first() {
			Some(first) if count > 1 => self.set_vertex(count - 1, first),
			_ => Ok(()),
		}
	}

	/// Wraps the curve as a compound curve, the form used when curves are joined.
	#[must_use]
	pub fn into_segments(self) -> Vec<Segment> {
		match self {
			Curve::Line(line) => vec![Segment::Line(line)],
			Curve::Arc(arc) => vec![Segment::Arc(arc)],
			Curve::Compound(compound) => compound.0,
		}
	}
}

impl GeometryTrait for Curve {
	fn area(&self) -> f64 {
		0.0
	}

	fn verify(&self) -> Result<()> {
		match self {
			Curve::Line(line) => line.verify(),
			Curve::Arc(arc) => arc.verify(),
			Curve::Compound(compound) => compound.verify(),
		}
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		match self {
			Curve::Line(line) => line.compute_bounds(),
			Curve::Arc(arc) => arc.compute_bounds(),
			Curve::Compound(compound) => compound.compute_bounds(),
		}
	}

	fn vertex_count(&self) -> usize {
		match self {
			Curve::Line(line) => line.vertex_count(),
			Curve::Arc(arc) => arc.vertex_count(),
			Curve::Compound(compound) => compound.vertex_count(),
		}
	}

	fn for_each_vertex_mut(&mut self, f: &mut dyn FnMut(&mut Vertex)) {
		match self {
			Curve::Line(line) => line.for_each_vertex_mut(f),
			Curve::Arc(arc) => arc.for_each_vertex_mut(f),
			Curve::Compound(compound) => compound.for_each_vertex_mut(f),
		}
	}
}

impl Debug for Curve {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Curve::Line(line) => line.fmt(f),
			Curve::Arc(arc) => arc.fmt(f),
			Curve::Compound(compound) => compound.fmt(f),
		}
	}
}

impl From<LineString> for Curve {
	fn from(value: LineString) -> Self {
		Curve::Line(value)
	}
}

impl From<CircularString> for Curve {
	fn from(value: CircularString) -> Self {
		Curve::Arc(value)
	}
}

impl From<CompoundCurve> for Curve {
	fn from(value: CompoundCurve) -> Self {
		Curve::Compound(value)
	}
}
