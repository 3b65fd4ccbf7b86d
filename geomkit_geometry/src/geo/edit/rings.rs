use crate::{Curve, Geometry, GeometryError, GeometryKind, GeometryTrait, Part};
use anyhow::{Result, bail, ensure};
use log::debug;

impl Geometry {
	/// Adds `ring` as a new interior ring of a single Polygon or CurvePolygon.
	///
	/// The ring must be closed and have at least 4 vertices; a Polygon only takes line strings.
	pub fn add_ring(&mut self, ring: impl Into<Curve>) -> Result<()> {
		let ring = ring.into();
		let kind = self.kind();
		ensure!(
			matches!(kind, GeometryKind::Polygon | GeometryKind::CurvePolygon),
			GeometryError::invalid(format!("a ring can only be added to a polygon, not to a {kind}"))
		);
		ensure!(
			!self.is_empty(),
			GeometryError::invalid("a ring cannot be added to an empty polygon")
		);
		ensure!(
			kind == GeometryKind::CurvePolygon || matches!(ring, Curve::Line(_)),
			GeometryError::IncompatiblePart {
				part: ring.kind().to_string(),
				container: self.wkb_type().to_string(),
			}
		);
		ensure!(
			ring.is_closed() && ring.vertex_count() >= 4,
			GeometryError::invalid("a ring must be closed and have at least 4 vertices")
		);
		debug!("add ring with {} vertices to {}", ring.vertex_count(), self.wkb_type());

		self.transact(|g| {
			match &mut g.parts_mut()[0] {
				Part::Polygon(polygon) | Part::CurvePolygon(polygon) => polygon.0.push(ring),
				_ => bail!(GeometryError::structural("polygon geometry without a polygon part")),
			}
			g.conform();
			Ok(())
		})
	}

	/// Deletes ring `ring` of part `part`.
	///
	/// The exterior ring (0) cannot be deleted. Parts without rings to delete are left alone.
	pub fn delete_ring(&mut self, part: usize, ring: usize) -> Result<()> {
		let count = self.num_parts();
		let Some(target) = self.parts().get(part) else {
			bail!(GeometryError::OutOfRange { index: part, count });
		};
		let (Part::Polygon(polygon) | Part::CurvePolygon(polygon)) = target else {
			return Ok(());
		};
		ensure!(
			ring != 0,
			GeometryError::invalid("the exterior ring of a polygon cannot be deleted")
		);
		if polygon.0.len() == 1 {
			return Ok(());
		}
		debug!("delete ring {ring} of part {part}");
		self.transact(|g| match &mut g.parts_mut()[part] {
			Part::Polygon(polygon) | Part::CurvePolygon(polygon) => polygon.delete_ring(ring),
			_ => Ok(()),
		})
	}

	/// Removes the interior rings of all polygons, or with `min_area` only those enclosing less.
	pub fn remove_interior_rings(&mut self, min_area: Option<f64>) {
		for part in self.parts_mut() {
			match part {
				Part::Polygon(polygon) | Part::CurvePolygon(polygon) => polygon.remove_interior_rings(min_area),
				Part::Collection(inner) => inner.remove_interior_rings(min_area),
				Part::Point(_) | Part::Curve(_) => {}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{CircularString, LineString, WkbType};
	use pretty_assertions::assert_eq;

	fn with_holes() -> Geometry {
		Geometry::new_polygon(vec![
			vec![[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]],
			vec![[1, 1], [2, 1], [2, 2], [1, 2], [1, 1]],
			vec![[4, 4], [7, 4], [7, 7], [4, 7], [4, 4]],
		])
		.unwrap()
	}

	#[test]
	fn add_ring() -> Result<()> {
		let mut geometry = Geometry::new_polygon(vec![vec![[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]])?;
		geometry.add_ring(LineString::from(&[[1, 1], [2, 1], [2, 2], [1, 2], [1, 1]]))?;
		assert_eq!(geometry.ring_count(0), 2);

		assert!(geometry.add_ring(LineString::from(&[[1, 1], [2, 1], [2, 2], [1, 2]])).is_err());
		let arc = CircularString::from(&[[1, 1], [2, 2], [3, 1], [2, 0], [1, 1]]);
		assert!(geometry.add_ring(arc.clone()).is_err());
		assert_eq!(geometry.ring_count(0), 2);

		let mut curved = Geometry::new(WkbType::from(GeometryKind::CurvePolygon));
		assert!(curved.add_ring(arc).is_err());
		Ok(())
	}

	#[test]
	fn delete_ring() -> Result<()> {
		let mut geometry = with_holes();
		assert!(geometry.delete_ring(0, 0).is_err());
		assert!(geometry.delete_ring(0, 3).is_err());
		assert!(geometry.delete_ring(1, 1).is_err());
		geometry.delete_ring(0, 1)?;
		assert_eq!(geometry.ring_count(0), 2);
		geometry.delete_ring(0, 1)?;
		geometry.delete_ring(0, 1)?;
		assert_eq!(geometry.ring_count(0), 1);

		let mut line = Geometry::new_line_string(vec![[0, 0], [1, 1]])?;
		line.delete_ring(0, 1)?;
		assert_eq!(line.vertex_count(), 2);
		Ok(())
	}

	#[test]
	fn remove_interior_rings() {
		let mut geometry = with_holes();
		geometry.remove_interior_rings(Some(4.0));
		assert_eq!(geometry.ring_count(0), 2);
		assert_eq!(geometry.vertex_at(5), Some(crate::Vertex::new(4.0, 4.0)));
		geometry.remove_interior_rings(None);
		assert_eq!(geometry.ring_count(0), 1);
		assert_eq!(geometry.area(), 100.0);
	}
}
