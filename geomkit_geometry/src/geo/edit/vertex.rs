use crate::{Curve, Geometry, GeometryError, GeometryKind, LineString, Part, Vertex, WkbType};
use anyhow::{Result, bail, ensure};
use log::debug;

impl Geometry {
	/// Inserts `vertex` before the vertex at `ordinal`; `ordinal == vertex_count()` appends to the
	/// last ring of the last part.
	///
	/// In a MultiPoint a new point part is inserted at index `ordinal`. An empty geometry of a kind
	/// that can be seeded from one vertex (Point, LineString and their multi forms) takes the
	/// vertex as its first part. Other empty or untyped geometries need [`Geometry::insert_vertex_as`].
	pub fn insert_vertex(&mut self, vertex: impl Into<Vertex>, ordinal: usize) -> Result<()> {
		let vertex = vertex.into();
		if self.is_empty() {
			ensure!(
				!self.kind().is_placeholder(),
				GeometryError::invalid(format!(
					"cannot insert a vertex into an untyped {} geometry without a target type",
					self.kind()
				))
			);
			return self.insert_vertex_as(vertex, ordinal, self.wkb_type());
		}

		let count = self.vertex_count();
		ensure!(ordinal <= count, GeometryError::OutOfRange { index: ordinal, count });
		debug!("insert {vertex:?} at vertex {ordinal} of {}", self.wkb_type());

		let vertex = vertex.conformed(self.has_z(), self.has_m());
		self.transact(|g| {
			if ordinal == count {
				let part = g.num_parts() - 1;
				let counts = g.parts()[part].ring_vertex_counts();
				let ring = counts.len().saturating_sub(1);
				let position = counts.last().copied().unwrap_or(0);
				g.insert_in_part(part, ring, position, vertex)
			} else {
				let Some(id) = g.vertex_id_from_vertex_nr(ordinal) else {
					bail!(GeometryError::OutOfRange { index: ordinal, count });
				};
				g.insert_in_part(id.part, id.ring, id.vertex, vertex)
			}
		})
	}

	/// Seeds an empty geometry with its first vertex, using `wkb_type` as the type of the result.
	///
	/// Only Point, MultiPoint, LineString and MultiLineString can be seeded. A seeded line holds a
	/// single vertex, below the usual minimum of two; this seed state verifies so that the next
	/// insertion can complete the line. On a non-empty geometry of the same kind this is a plain
	/// [`Geometry::insert_vertex`].
	pub fn insert_vertex_as(&mut self, vertex: impl Into<Vertex>, ordinal: usize, wkb_type: WkbType) -> Result<()> {
		let vertex = vertex.into();
		if !self.is_empty() {
			ensure!(
				wkb_type.kind() == self.kind(),
				GeometryError::invalid(format!(
					"the geometry is already a {}, not a {}",
					self.wkb_type(),
					wkb_type
				))
			);
			return self.insert_vertex(vertex, ordinal);
		}
		ensure!(ordinal == 0, GeometryError::OutOfRange { index: ordinal, count: 0 });

		let vertex = vertex.conformed(wkb_type.has_z(), wkb_type.has_m());
		let part = match wkb_type.kind() {
			GeometryKind::Point | GeometryKind::MultiPoint => Part::Point(vertex),
			GeometryKind::LineString | GeometryKind::MultiLineString => Part::Curve(Curve::Line(LineString(vec![vertex]))),
			kind => bail!(GeometryError::structural(format!(
				"a {kind} cannot be created from a single vertex"
			))),
		};
		debug!("seed {wkb_type} with {vertex:?}");
		self.transact(|g| {
			g.set_wkb_type(wkb_type);
			g.parts_mut().push(part);
			Ok(())
		})
	}

	/// Replaces the coordinates of the vertex at `ordinal`.
	///
	/// Ordinates that `vertex` carries beyond the geometry's type are ignored, ordinates it lacks
	/// keep their current value. The closing twin of a ring end and both copies of a compound
	/// junction move together.
	pub fn move_vertex(&mut self, vertex: impl Into<Vertex>, ordinal: usize) -> Result<()> {
		let vertex = vertex.into();
		let (Some(id), Some(current)) = (self.vertex_id_from_vertex_nr(ordinal), self.vertex_at(ordinal)) else {
			bail!(GeometryError::OutOfRange {
				index: ordinal,
				count: self.vertex_count()
			});
		};
		let moved = current.overwritten_by(&vertex);
		debug!("move vertex {ordinal} of {} to {moved:?}", self.wkb_type());
		self.transact(|g| g.parts_mut()[id.part].move_vertex(id.ring, id.vertex, moved))
	}

	/// Deletes the vertex at `ordinal`, repairing or dropping what it belonged to.
	///
	/// A point part is removed; a line left with fewer than 2 vertices is removed; a ring that
	/// would fall below 4 vertices is removed, promoting the first hole if it was the exterior;
	/// a polygon without rings is removed. Removing the last part leaves an empty geometry of the
	/// same type.
	pub fn delete_vertex(&mut self, ordinal: usize) -> Result<()> {
		let Some(id) = self.vertex_id_from_vertex_nr(ordinal) else {
			bail!(GeometryError::OutOfRange {
				index: ordinal,
				count: self.vertex_count()
			});
		};
		debug!("delete vertex {ordinal} ({id:?}) of {}", self.wkb_type());
		self.transact(|g| g.delete_in_part(id.part, id.ring, id.vertex))
	}

	/// Inserts into ring `ring` of part `part` before position `index`.
	///
	/// In a MultiPoint, position 0 inserts a new point before point `part` and position 1 after it.
	pub(crate) fn insert_in_part(&mut self, part: usize, ring: usize, index: usize, vertex: Vertex) -> Result<()> {
		let count = self.num_parts();
		if self.kind() == GeometryKind::MultiPoint {
			ensure!(
				part < count && ring == 0 && index <= 1,
				GeometryError::OutOfRange { index: part + index, count }
			);
			self.parts_mut().insert(part + index, Part::Point(vertex));
			return Ok(());
		}
		let Some(target) = self.parts_mut().get_mut(part) else {
			bail!(GeometryError::OutOfRange { index: part, count });
		};
		target.insert_vertex(ring, index, vertex)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{CircularString, CompoundCurve, Polygon, Segment};
	use pretty_assertions::assert_eq;

	fn polygon(rings: Vec<Vec<[f64; 2]>>) -> Geometry {
		Geometry::new_polygon(rings).unwrap()
	}

	fn square() -> Geometry {
		polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]])
	}

	fn out_of_range(error: &anyhow::Error) -> bool {
		matches!(GeometryError::find(error), Some(GeometryError::OutOfRange { .. }))
	}

	// ── insert ────────────────────────────────────────────────────────

	#[test]
	fn insert_into_multi_point_creates_part() -> Result<()> {
		let mut geometry = Geometry::new_multi_point(vec![[5, 5]])?;
		geometry.insert_vertex([4, 4], 0)?;
		assert_eq!(geometry, Geometry::new_multi_point(vec![[4, 4], [5, 5]])?);
		geometry.insert_vertex([6, 6], 2)?;
		assert_eq!(geometry, Geometry::new_multi_point(vec![[4, 4], [5, 5], [6, 6]])?);
		Ok(())
	}

	#[test]
	fn insert_into_point_fails() {
		let mut geometry = Geometry::new_point([1, 1]).unwrap();
		assert!(geometry.insert_vertex([2, 2], 0).is_err());
		assert!(geometry.insert_vertex([2, 2], 1).is_err());
		assert_eq!(geometry, Geometry::new_point([1, 1]).unwrap());
	}

	#[test]
	fn insert_into_line() -> Result<()> {
		let mut geometry = Geometry::new_line_string(vec![[0, 0], [2, 0]])?;
		geometry.insert_vertex([1, 0], 1)?;
		geometry.insert_vertex([3, 0], 3)?;
		assert_eq!(geometry, Geometry::new_line_string(vec![[0, 0], [1, 0], [2, 0], [3, 0]])?);
		Ok(())
	}

	#[test]
	fn insert_out_of_range_is_rejected() {
		let mut geometry = Geometry::new_line_string(vec![[0, 0], [2, 0]]).unwrap();
		let before = geometry.clone();
		let error = geometry.insert_vertex([9, 9], 3).unwrap_err();
		assert!(out_of_range(&error));
		assert_eq!(geometry, before);
	}

	#[test]
	fn insert_conforms_dimensions() -> Result<()> {
		let mut geometry = Geometry::new_line_string(vec![[0, 0, 5], [2, 0, 5]])?;
		geometry.insert_vertex(Vertex::new_m(1.0, 0.0, 7.0), 1)?;
		assert_eq!(geometry.vertex_at(1), Some(Vertex::new_z(1.0, 0.0, 0.0)));
		Ok(())
	}

	#[test]
	fn insert_into_interior_ring_start() -> Result<()> {
		let mut geometry = polygon(vec![
			vec![[0.0, 0.0], [9.0, 0.0], [9.0, 3.0], [0.0, 3.0], [0.0, 0.0]],
			vec![[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0], [1.0, 1.0]],
		]);
		geometry.insert_vertex([1.5, 0.5], 5)?;
		assert_eq!(
			geometry,
			polygon(vec![
				vec![[0.0, 0.0], [9.0, 0.0], [9.0, 3.0], [0.0, 3.0], [0.0, 0.0]],
				vec![[1.5, 0.5], [1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0], [1.5, 0.5]],
			])
		);
		Ok(())
	}

	#[test]
	fn insert_appends_to_last_ring() -> Result<()> {
		let mut geometry = square();
		geometry.insert_vertex([-1.0, -1.0], 5)?;
		assert_eq!(
			geometry,
			polygon(vec![vec![
				[-1.0, -1.0],
				[1.0, 0.0],
				[1.0, 1.0],
				[0.0, 1.0],
				[0.0, 0.0],
				[-1.0, -1.0]
			]])
		);
		Ok(())
	}

	#[test]
	fn insert_into_circular_string_start_fails() {
		let mut geometry = Geometry::from_parts(
			WkbType::from(GeometryKind::CircularString),
			vec![Part::Curve(Curve::Arc(CircularString::from(&[[0, 0], [1, 1], [2, 0]])))],
		)
		.unwrap();
		let before = geometry.clone();
		assert!(geometry.insert_vertex([-1, 0], 0).is_err());
		assert_eq!(geometry, before);
		geometry.insert_vertex([1.7, 0.7], 2).unwrap();
		assert_eq!(geometry.vertex_count(), 5);
	}

	// ── seeding ───────────────────────────────────────────────────────

	#[test]
	fn seed_untyped_geometry() -> Result<()> {
		let mut geometry = Geometry::default();
		assert!(geometry.insert_vertex([1, 2], 0).is_err());
		geometry.insert_vertex_as([1, 2], 0, WkbType::from(GeometryKind::LineString))?;
		assert_eq!(geometry.vertex_count(), 1);
		geometry.verify()?;
		geometry.insert_vertex([3, 4], 1)?;
		assert_eq!(geometry, Geometry::new_line_string(vec![[1, 2], [3, 4]])?);
		Ok(())
	}

	#[test]
	fn seed_typed_empty_geometry() -> Result<()> {
		let mut geometry = Geometry::new(WkbType::new(GeometryKind::MultiPoint, true, false));
		geometry.insert_vertex([1, 2], 0)?;
		assert_eq!(geometry.vertex_at(0), Some(Vertex::new_z(1.0, 2.0, 0.0)));
		assert_eq!(geometry.kind(), GeometryKind::MultiPoint);
		Ok(())
	}

	#[test]
	fn seed_rejects_surfaces_and_bad_ordinals() {
		let mut geometry = Geometry::new(WkbType::from(GeometryKind::Polygon));
		assert!(geometry.insert_vertex([1, 2], 0).is_err());
		let mut geometry = Geometry::default();
		assert!(
			geometry
				.insert_vertex_as([1, 2], 1, WkbType::from(GeometryKind::Point))
				.is_err()
		);
		assert_eq!(geometry, Geometry::default());
	}

	// ── move ──────────────────────────────────────────────────────────

	#[test]
	fn move_ring_start_moves_closing_vertex() -> Result<()> {
		let mut geometry = square();
		geometry.move_vertex([-1, -1], 0)?;
		assert_eq!(
			geometry,
			polygon(vec![vec![[-1.0, -1.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [-1.0, -1.0]]])
		);
		Ok(())
	}

	#[test]
	fn move_truncates_and_keeps_ordinates() -> Result<()> {
		let mut geometry = Geometry::new_line_string(vec![[0, 0, 5], [2, 0, 6]])?;
		geometry.move_vertex(Vertex::new_zm(7.0, 8.0, 9.0, 10.0), 0)?;
		geometry.move_vertex(Vertex::new(3.0, 3.0), 1)?;
		assert_eq!(geometry, Geometry::new_line_string(vec![[7, 8, 9], [3, 3, 6]])?);
		Ok(())
	}

	#[test]
	fn move_out_of_range_leaves_geometry_untouched() {
		let mut geometry = square();
		let before = geometry.clone();
		let error = geometry.move_vertex([5, 5], 5).unwrap_err();
		assert!(out_of_range(&error));
		assert_eq!(geometry, before);
	}

	#[test]
	fn move_compound_junction_moves_both_segments() -> Result<()> {
		let compound = CompoundCurve(vec![
			Segment::Line(LineString::from(&[[0, 0], [1, 0]])),
			Segment::Arc(CircularString::from(&[[1, 0], [2, 1], [3, 0]])),
		]);
		let mut geometry = Geometry::from_parts(
			WkbType::from(GeometryKind::CompoundCurve),
			vec![Part::Curve(Curve::Compound(compound))],
		)?;
		geometry.move_vertex([1, 5], 1)?;
		let Part::Curve(Curve::Compound(compound)) = &geometry.parts()[0] else {
			panic!("expected a compound curve");
		};
		assert_eq!(compound.0[0].last(), Some(&Vertex::new(1.0, 5.0)));
		assert_eq!(compound.0[1].first(), Some(&Vertex::new(1.0, 5.0)));
		Ok(())
	}

	// ── delete ────────────────────────────────────────────────────────

	#[test]
	fn delete_ring_start() -> Result<()> {
		let mut geometry = square();
		geometry.delete_vertex(0)?;
		assert_eq!(
			geometry,
			polygon(vec![vec![[1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [1.0, 0.0]]])
		);
		Ok(())
	}

	#[test]
	fn delete_exterior_promotes_interior() -> Result<()> {
		let mut geometry = polygon(vec![
			vec![[0.0, 0.0], [9.0, 0.0], [9.0, 3.0], [0.0, 3.0], [0.0, 0.0]],
			vec![[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0], [1.0, 1.0]],
		]);
		geometry.delete_vertex(1)?;
		geometry.delete_vertex(1)?;
		assert_eq!(
			geometry,
			polygon(vec![vec![[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0], [1.0, 1.0]]])
		);
		Ok(())
	}

	#[test]
	fn delete_last_ring_empties_polygon() -> Result<()> {
		let mut geometry = polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]);
		geometry.delete_vertex(2)?;
		assert!(geometry.is_empty());
		assert_eq!(geometry.kind(), GeometryKind::Polygon);
		Ok(())
	}

	#[test]
	fn delete_from_multi_polygon_drops_part() -> Result<()> {
		let mut geometry = Geometry::new_multi_polygon(vec![
			vec![vec![[0, 0], [1, 0], [1, 1], [0, 0]]],
			vec![vec![[5, 5], [6, 5], [6, 6], [5, 6], [5, 5]]],
		])?;
		geometry.delete_vertex(0)?;
		assert_eq!(
			geometry,
			Geometry::new_multi_polygon(vec![vec![vec![[5, 5], [6, 5], [6, 6], [5, 6], [5, 5]]]])?
		);
		Ok(())
	}

	#[test]
	fn delete_points_and_lines() -> Result<()> {
		let mut points = Geometry::new_multi_point(vec![[0, 0], [1, 1]])?;
		points.delete_vertex(0)?;
		points.delete_vertex(0)?;
		assert!(points.is_empty());
		assert_eq!(points.kind(), GeometryKind::MultiPoint);

		let mut lines = Geometry::new_multi_line_string(vec![vec![[0, 0], [1, 1]], vec![[2, 2], [3, 3], [4, 4]]])?;
		lines.delete_vertex(1)?;
		assert_eq!(lines, Geometry::new_multi_line_string(vec![vec![[2, 2], [3, 3], [4, 4]]])?);
		lines.delete_vertex(1)?;
		assert_eq!(lines, Geometry::new_multi_line_string(vec![vec![[2, 2], [4, 4]]])?);
		Ok(())
	}

	#[test]
	fn delete_curve_polygon_ring_start_recloses() -> Result<()> {
		let mut geometry =
			Geometry::from_wkt("CURVEPOLYGON(COMPOUNDCURVE(CIRCULARSTRING(0 0,1 1,2 0),(2 0,2 -2,0 -2,0 0)))")?;
		geometry.delete_vertex(0)?;
		assert_eq!(
			geometry.to_wkt()?,
			"CurvePolygon (CompoundCurve ((2 0, 2 -2, 0 -2, 2 0)))"
		);
		Ok(())
	}

	#[test]
	fn delete_compound_junction_bridges_gap() -> Result<()> {
		let mut geometry = Geometry::from_wkt("COMPOUNDCURVE(CIRCULARSTRING(0 0,1 1,2 0),(2 0,3 0))")?;
		geometry.delete_vertex(2)?;
		assert_eq!(geometry.to_wkt()?, "CompoundCurve ((0 0, 3 0))");
		Ok(())
	}

	#[test]
	fn delete_from_circular_string() -> Result<()> {
		let arc = CircularString::from(&[[0, 0], [1, 1], [2, 0], [3, -1], [4, 0]]);
		let mut geometry = Geometry::from_parts(
			WkbType::from(GeometryKind::CircularString),
			vec![Part::Curve(Curve::Arc(arc))],
		)?;
		geometry.delete_vertex(0)?;
		assert_eq!(
			geometry.parts()[0],
			Part::Curve(Curve::Arc(CircularString::from(&[[2, 0], [3, -1], [4, 0]])))
		);
		geometry.delete_vertex(1)?;
		assert!(geometry.is_empty());
		Ok(())
	}

	#[test]
	fn delete_in_curve_polygon_ring() -> Result<()> {
		let ring = CompoundCurve(vec![
			Segment::Arc(CircularString::from(&[[0, 0], [1, 1], [2, 0]])),
			Segment::Line(LineString::from(&[[2, 0], [2, -1], [0, -1], [0, 0]])),
		]);
		let mut geometry = Geometry::from_parts(
			WkbType::from(GeometryKind::CurvePolygon),
			vec![Part::CurvePolygon(Polygon(vec![Curve::Compound(ring)]))],
		)?;
		geometry.delete_vertex(3)?;
		let expected = CompoundCurve(vec![
			Segment::Arc(CircularString::from(&[[0, 0], [1, 1], [2, 0]])),
			Segment::Line(LineString::from(&[[2, 0], [0, -1], [0, 0]])),
		]);
		assert_eq!(
			geometry.parts()[0],
			Part::CurvePolygon(Polygon(vec![Curve::Compound(expected)]))
		);
		Ok(())
	}

	#[test]
	fn delete_out_of_range_is_rejected() {
		let mut geometry = square();
		let before = geometry.clone();
		assert!(out_of_range(&geometry.delete_vertex(5).unwrap_err()));
		assert_eq!(geometry, before);
	}

	#[test]
	fn edits_reach_into_nested_collections() -> Result<()> {
		let inner = Geometry::new_multi_point(vec![[1, 1], [2, 2]])?;
		let mut geometry = Geometry::from_parts(
			WkbType::from(GeometryKind::GeometryCollection),
			vec![
				Part::Curve(Curve::Line(LineString::from(&[[0, 0], [5, 0]]))),
				Part::Collection(inner),
			],
		)?;
		geometry.insert_vertex([3, 3], 4)?;
		assert_eq!(geometry.vertex_count(), 5);
		assert_eq!(geometry.vertex_at(4), Some(Vertex::new(3.0, 3.0)));

		geometry.move_vertex([7, 7], 2)?;
		assert_eq!(geometry.vertex_at(2), Some(Vertex::new(7.0, 7.0)));

		geometry.delete_vertex(2)?;
		geometry.delete_vertex(2)?;
		geometry.delete_vertex(2)?;
		assert_eq!(geometry.num_parts(), 1);
		Ok(())
	}
}
