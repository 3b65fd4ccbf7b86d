use super::types::*;
use crate::{Dimensions, GeometryError, GeometryKind, WkbType};
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// The root of a geometry tree.
///
/// The [`WkbType`] governs the interpretation of everything below it: the part shapes must match
/// its kind and every vertex carries exactly the ordinates of its dimensions. Single kinds hold at
/// most one part, an empty geometry holds none. `Geometry::default()` is the untyped geometry.
#[derive(Clone, Default, PartialEq)]
pub struct Geometry {
	wkb_type: WkbType,
	parts: Vec<Part>,
}

impl Geometry {
	/// An empty geometry of the given type.
	#[must_use]
	pub fn new(wkb_type: WkbType) -> Self {
		Self {
			wkb_type,
			parts: Vec::new(),
		}
	}

	/// Builds a geometry from parts, conforming every vertex to `wkb_type` and verifying the result.
	pub fn from_parts(wkb_type: WkbType, parts: Vec<Part>) -> Result<Self> {
		let mut geometry = Self { wkb_type, parts };
		geometry.conform();
		geometry.verify()?;
		Ok(geometry)
	}

	pub fn new_point<T>(value: T) -> Result<Self>
	where
		Vertex: From<T>,
	{
		let point = Vertex::from(value);
		Self::from_parts(typed(GeometryKind::Point, Some(&point)), vec![Part::Point(point)])
	}

	pub fn new_line_string<T>(value: Vec<T>) -> Result<Self>
	where
		Vertex: From<T>,
	{
		let line = LineString::from(value);
		let wkb_type = typed(GeometryKind::LineString, line.0.first());
		Self::from_parts(wkb_type, vec![Part::Curve(Curve::Line(line))])
	}

	pub fn new_polygon<T>(value: Vec<Vec<T>>) -> Result<Self>
	where
		Vertex: From<T>,
	{
		let polygon = Polygon::from(value);
		let wkb_type = typed(GeometryKind::Polygon, first_vertex(&polygon));
		Self::from_parts(wkb_type, vec![Part::Polygon(polygon)])
	}

	pub fn new_multi_point<T>(value: Vec<T>) -> Result<Self>
	where
		Vertex: From<T>,
	{
		let points: Vec<Vertex> = value.into_iter().map(Vertex::from).collect();
		let wkb_type = typed(GeometryKind::MultiPoint, points.first());
		Self::from_parts(wkb_type, points.into_iter().map(Part::Point).collect())
	}

	pub fn new_multi_line_string<T>(value: Vec<Vec<T>>) -> Result<Self>
	where
		Vertex: From<T>,
	{
		let lines: Vec<LineString> = value.into_iter().map(LineString::from).collect();
		let wkb_type = typed(GeometryKind::MultiLineString, lines.first().and_then(|l| l.0.first()));
		Self::from_parts(
			wkb_type,
			lines.into_iter().map(|line| Part::Curve(Curve::Line(line))).collect(),
		)
	}

	pub fn new_multi_polygon<T>(value: Vec<Vec<Vec<T>>>) -> Result<Self>
	where
		Vertex: From<T>,
	{
		let polygons: Vec<Polygon> = value.into_iter().map(Polygon::from).collect();
		let wkb_type = typed(GeometryKind::MultiPolygon, polygons.first().and_then(first_vertex));
		Self::from_parts(wkb_type, polygons.into_iter().map(Part::Polygon).collect())
	}

	#[must_use]
	pub fn wkb_type(&self) -> WkbType {
		self.wkb_type
	}

	#[must_use]
	pub fn kind(&self) -> GeometryKind {
		self.wkb_type.kind()
	}

	#[must_use]
	pub fn parts(&self) -> &[Part] {
		&self.parts
	}

	pub(crate) fn parts_mut(&mut self) -> &mut Vec<Part> {
		&mut self.parts
	}

	#[must_use]
	pub fn into_parts(self) -> Vec<Part> {
		self.parts
	}

	#[must_use]
	pub fn part(&self, index: usize) -> Option<&Part> {
		self.parts.get(index)
	}

	#[must_use]
	pub fn num_parts(&self) -> usize {
		self.parts.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.parts.is_empty()
	}

	#[must_use]
	pub fn has_z(&self) -> bool {
		self.wkb_type.has_z()
	}

	#[must_use]
	pub fn has_m(&self) -> bool {
		self.wkb_type.has_m()
	}

	/// Number of rings of part `part`, 0 if there is no such part.
	#[must_use]
	pub fn ring_count(&self, part: usize) -> usize {
		self.parts.get(part).map_or(0, Part::ring_count)
	}

	/// Enclosed area of all polygonal parts.
	#[must_use]
	pub fn area(&self) -> f64 {
		self.parts.iter().map(Part::area).sum()
	}

	/// `[x_min, y_min, x_max, y_max]` of all parts, `None` for an empty geometry.
	///
	/// Circular arcs contribute their full extent.
	#[must_use]
	pub fn bounding_box(&self) -> Option<[f64; 4]> {
		self
			.parts
			.iter()
			.fold(None, |bbox, part| merge_bounds(bbox, part.compute_bounds()))
	}

	/// Checks every structural invariant.
	///
	/// The part shapes must be accepted by the kind, single kinds hold at most one part, parts are
	/// not empty, rings are closed with at least 4 vertices, circular strings have an odd vertex
	/// count, compound segments are contiguous and every vertex carries the type's ordinates.
	pub fn verify(&self) -> Result<()> {
		let kind = self.kind();
		if kind.is_placeholder() {
			ensure!(
				self.parts.is_empty(),
				GeometryError::structural(format!("a {kind} geometry cannot hold parts"))
			);
			return Ok(());
		}
		ensure!(
			self.wkb_type.is_multi_type() || self.parts.len() <= 1,
			GeometryError::structural(format!(
				"a {} holds {} parts, but at most one is allowed",
				self.wkb_type,
				self.parts.len()
			))
		);

		let (has_z, has_m) = (self.has_z(), self.has_m());
		for (index, part) in self.parts.iter().enumerate() {
			ensure!(
				accepts_part(kind, part),
				GeometryError::structural(format!(
					"part {index} is a {}, which a {} cannot hold",
					part.kind(),
					self.wkb_type
				))
			);
			ensure!(
				!part.is_empty(),
				GeometryError::structural(format!("part {index} is empty"))
			);
			if let Part::Collection(inner) = part {
				ensure!(
					inner.has_z() == has_z && inner.has_m() == has_m,
					GeometryError::structural(format!(
						"member {} does not match the dimensions of {}",
						inner.wkb_type, self.wkb_type
					))
				);
			}
			part.verify()?;

			let mut conforming = true;
			part.for_each_vertex(&mut |vertex| {
				conforming &= vertex.z.is_some() == has_z && vertex.m.is_some() == has_m;
			});
			ensure!(
				conforming,
				GeometryError::structural(format!(
					"part {index} has vertices that do not match the dimensions of {}",
					self.wkb_type
				))
			);
		}
		Ok(())
	}

	/// Conforms all vertices and nested members to the dimensions of the own type.
	pub(crate) fn conform(&mut self) {
		self.set_dimensions(self.wkb_type.dimensions());
	}

	/// Changes the dimensions of the type and of every vertex below.
	pub(crate) fn set_dimensions(&mut self, dims: Dimensions) {
		self.wkb_type = WkbType::with_dimensions(self.kind(), dims);
		let (has_z, has_m) = (dims.has_z(), dims.has_m());
		for part in &mut self.parts {
			if let Part::Collection(inner) = part {
				inner.set_dimensions(dims);
			} else {
				part.for_each_vertex_mut(&mut |vertex| *vertex = vertex.conformed(has_z, has_m));
			}
		}
	}

	pub(crate) fn set_wkb_type(&mut self, wkb_type: WkbType) {
		self.wkb_type = wkb_type;
	}

	/// Maps ring `ring`, counted across all parts, to `(part, ring within part)`.
	#[must_use]
	pub(crate) fn locate_ring(&self, mut ring: usize) -> Option<(usize, usize)> {
		for (index, part) in self.parts.iter().enumerate() {
			let count = part.ring_count();
			if ring < count {
				return Some((index, ring));
			}
			ring -= count;
		}
		None
	}

	/// Deletes a vertex of part `part` and drops the part once nothing is left of it.
	pub(crate) fn delete_in_part(&mut self, part: usize, ring: usize, index: usize) -> Result<()> {
		let count = self.parts.len();
		let Some(target) = self.parts.get_mut(part) else {
			return Err(GeometryError::OutOfRange { index: part, count }.into());
		};
		if let Part::Point(_) = target {
			ensure!(
				ring == 0 && index == 0,
				GeometryError::OutOfRange { index, count: 1 }
			);
			self.parts.remove(part);
			return Ok(());
		}
		target.delete_vertex(ring, index)?;
		if target.is_empty() {
			self.parts.remove(part);
		}
		Ok(())
	}
}

/// Whether a container of `kind` can hold `part`.
pub(crate) fn accepts_part(kind: GeometryKind, part: &Part) -> bool {
	use GeometryKind as K;
	match (kind, part) {
		(K::Point | K::MultiPoint, Part::Point(_))
		| (K::LineString | K::MultiLineString, Part::Curve(Curve::Line(_)))
		| (K::CircularString, Part::Curve(Curve::Arc(_)))
		| (K::CompoundCurve, Part::Curve(Curve::Compound(_)))
		| (K::MultiCurve, Part::Curve(_))
		| (K::Polygon | K::MultiPolygon, Part::Polygon(_))
		| (K::CurvePolygon, Part::CurvePolygon(_))
		| (K::MultiSurface, Part::Polygon(_) | Part::CurvePolygon(_)) => true,
		(K::GeometryCollection, Part::Collection(inner)) => inner.wkb_type().is_multi_type(),
		(K::GeometryCollection, _) => true,
		_ => false,
	}
}

fn typed(kind: GeometryKind, first: Option<&Vertex>) -> WkbType {
	let (has_z, has_m) = first.map_or((false, false), |v| (v.z.is_some(), v.m.is_some()));
	WkbType::new(kind, has_z, has_m)
}

fn first_vertex(polygon: &Polygon) -> Option<&Vertex> {
	match polygon.0.first()? {
		Curve::Line(line) => line.0.first(),
		Curve::Arc(arc) => arc.0.first(),
		Curve::Compound(compound) => compound.0.first()?.first(),
	}
}

impl Debug for Geometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple(&self.wkb_type.display_string()).field(&self.parts).finish()
	}
}
