use super::{Curve, GeometryTrait, Vertex, linestring::out_of_range};
use crate::GeometryError;
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// A surface bounded by rings. Ring 0 is the exterior, the others are holes.
///
/// The same type backs `Polygon` parts, where every ring is a [`Curve::Line`], and `CurvePolygon`
/// parts, which allow any curve.
#[derive(Clone, Default, PartialEq)]
pub struct Polygon(pub Vec<Curve>);

impl Polygon {
	#[must_use]
	pub fn exterior(&self) -> Option<&Curve> {
		self.0.first()
	}

	pub fn interiors(&self) -> impl Iterator<Item = &Curve> {
		self.0.iter().skip(1)
	}

	fn ring_mut(&mut self, ring: usize) -> Result<&mut Curve> {
		let count = self.0.len();
		self.0.get_mut(ring).ok_or_else(|| out_of_range(ring, count))
	}

	/// Inserts `vertex` into `ring` before position `index`.
	///
	/// Inserting at position 0 also replaces the closing vertex, appending after the closing vertex
	/// also moves the first vertex, so the ring stays closed.
	pub fn insert_vertex(&mut self, ring: usize, index: usize, vertex: Vertex) -> Result<()> {
		let curve = self.ring_mut(ring)?;
		let count = curve.vertex_count();
		curve.insert_vertex(index, vertex)?;
		if index == 0 {
			curve.set_vertex(curve.vertex_count() - 1, vertex)?;
		} else if index == count {
			curve.set_vertex(0, vertex)?;
		}
		Ok(())
	}

	/// Deletes vertex `index` of `ring`.
	///
	/// A ring with 4 or fewer vertices is removed as a whole. Removing the exterior promotes the
	/// first hole, so the polygon is empty once its last ring is gone. Deleting the first or last
	/// vertex re-closes the ring from the surviving end.
	pub fn delete_vertex(&mut self, ring: usize, index: usize) -> Result<()> {
		let curve = self.ring_mut(ring)?;
		let count = curve.vertex_count();
		if index >= count {
			return Err(out_of_range(index, count));
		}
		if count <= 4 {
			self.0.remove(ring);
			return Ok(());
		}

		curve.delete_vertex(index)?;
		let remaining = curve.vertex_count();
		if remaining > 0 {
			if index == 0 {
				if let Some(first) = curve.first() {
					curve.set_vertex(remaining - 1, first)?;
				}
			} else if index == count - 1
				&& let Some(last) = curve.last()
			{
				curve.set_vertex(0, last)?;
			}
		}

		if remaining < 4 {
			self.0.remove(ring);
		} else if !curve.is_closed() {
			curve.close()?;
		}
		Ok(())
	}

	/// Overwrites vertex `index` of `ring`; the first and last vertex move together.
	pub fn move_vertex(&mut self, ring: usize, index: usize, vertex: Vertex) -> Result<()> {
		let curve = self.ring_mut(ring)?;
		let count = curve.vertex_count();
		if index >= count {
			return Err(out_of_range(index, count));
		}
		curve.set_vertex(index, vertex)?;
		if index == 0 {
			curve.set_vertex(count - 1, vertex)?;
		} else if index == count - 1 {
			curve.set_vertex(0, vertex)?;
		}
		Ok(())
	}

	/// Removes an interior ring. The exterior ring cannot be removed this way.
	pub fn delete_ring(&mut self, ring: usize) -> Result<()> {
		ensure!(
			ring != 0,
			GeometryError::invalid("the exterior ring of a polygon cannot be deleted")
		);
		if ring >= self.0.len() {
			return Err(out_of_range(ring, self.0.len()));
		}
		self.0.remove(ring);
		Ok(())
	}

	/// Removes interior rings, all of them or only those whose area is below `min_area`.
	pub fn remove_interior_rings(&mut self, min_area: Option<f64>) {
		let mut index = 0;
		self.0.retain(|ring| {
			index += 1;
			index == 1 || min_area.is_some_and(|min| ring.signed_area().abs() >= min)
		});
	}

	/// Verifies that every ring is closed with at least 4 vertices. With `linear_only` every ring
	/// must be a straight line string.
	pub fn verify_rings(&self, linear_only: bool) -> Result<()> {
		ensure!(
			!self.0.is_empty(),
			GeometryError::structural("polygon must have an exterior ring")
		);
		for (index, ring) in self.0.iter().enumerate() {
			ensure!(
				!linear_only || matches!(ring, Curve::Line(_)),
				GeometryError::structural(format!("ring {index} of a Polygon must be a LineString"))
			);
			ring.verify()?;
			ensure!(
				ring.vertex_count() >= 4,
				GeometryError::structural(format!(
					"ring {index} must have at least 4 vertices, found {}",
					ring.vertex_count()
				))
			);
			ensure!(
				ring.is_closed(),
				GeometryError::structural(format!("ring {index} is not closed"))
			);
		}
		Ok(())
	}
}

impl GeometryTrait for Polygon {
	/// Exterior area minus the area of the holes.
	fn area(&self) -> f64 {
		let mut rings = self.0.iter().map(|ring| ring.signed_area().abs());
		let Some(exterior) = rings.next() else {
			return 0.0;
		};
		exterior - rings.sum::<f64>()
	}

	fn verify(&self) -> Result<()> {
		self.verify_rings(false)
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		self.exterior().and_then(Curve::compute_bounds)
	}

	fn vertex_count(&self) -> usize {
		self.0.iter().map(Curve::vertex_count).sum()
	}

	fn for_each_vertex_mut(&mut self, f: &mut dyn FnMut(&mut Vertex)) {
		for ring in &mut self.0 {
			ring.for_each_vertex_mut(f);
		}
	}
}

impl Debug for Polygon {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

impl<T> From<Vec<Vec<T>>> for Polygon
where
	Vertex: From<T>,
{
	fn from(value: Vec<Vec<T>>) -> Self {
		Self(
			value
				.into_iter()
				.map(|ring| Curve::Line(super::LineString::from(ring)))
				.collect(),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::geo::types::{CircularString, CompoundCurve, LineString, Segment};
	use pretty_assertions::assert_eq;

	fn square() -> Polygon {
		Polygon::from(vec![vec![[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]])
	}

	fn with_hole() -> Polygon {
		Polygon::from(vec![
			vec![[0, 0], [9, 0], [9, 3], [0, 3], [0, 0]],
			vec![[1, 1], [2, 1], [2, 2], [1, 2], [1, 1]],
		])
	}

	#[test]
	fn delete_first_vertex_recloses() -> Result<()> {
		let mut p = square();
		p.delete_vertex(0, 0)?;
		assert_eq!(p, Polygon::from(vec![vec![[1, 0], [1, 1], [0, 1], [1, 0]]]));
		Ok(())
	}

	#[test]
	fn delete_last_vertex_recloses() -> Result<()> {
		let mut p = square();
		p.delete_vertex(0, 4)?;
		assert_eq!(p, Polygon::from(vec![vec![[0, 1], [1, 0], [1, 1], [0, 1]]]));
		Ok(())
	}

	#[test]
	fn delete_from_minimal_ring_promotes_hole() -> Result<()> {
		let mut p = with_hole();
		p.delete_vertex(0, 1)?;
		p.delete_vertex(0, 1)?;
		assert_eq!(p, Polygon::from(vec![vec![[1, 1], [2, 1], [2, 2], [1, 2], [1, 1]]]));
		p.delete_vertex(0, 0)?;
		p.delete_vertex(0, 0)?;
		assert!(p.0.is_empty());
		Ok(())
	}

	#[test]
	fn delete_inside_circular_ring_removes_short_ring() -> Result<()> {
		let mut p = Polygon(vec![Curve::Arc(CircularString::from(&[
			[0, 0],
			[1, 1],
			[2, 0],
			[1, -1],
			[0, 0],
		]))]);
		p.delete_vertex(0, 1)?;
		assert!(p.0.is_empty());
		Ok(())
	}

	#[test]
	fn insert_at_ring_ends() -> Result<()> {
		let mut p = square();
		p.insert_vertex(0, 0, Vertex::new(-1.0, -1.0))?;
		assert_eq!(
			p,
			Polygon::from(vec![vec![[-1, -1], [0, 0], [1, 0], [1, 1], [0, 1], [-1, -1]]])
		);

		let mut p = square();
		p.insert_vertex(0, 5, Vertex::new(-1.0, -1.0))?;
		assert_eq!(
			p,
			Polygon::from(vec![vec![[-1, -1], [1, 0], [1, 1], [0, 1], [0, 0], [-1, -1]]])
		);
		Ok(())
	}

	#[test]
	fn move_first_moves_closing_vertex() -> Result<()> {
		let mut p = square();
		p.move_vertex(0, 0, Vertex::new(-1.0, -1.0))?;
		assert_eq!(p, Polygon::from(vec![vec![[-1, -1], [1, 0], [1, 1], [0, 1], [-1, -1]]]));
		assert!(p.move_vertex(0, 5, Vertex::new(0.0, 0.0)).is_err());
		assert!(p.move_vertex(1, 0, Vertex::new(0.0, 0.0)).is_err());
		Ok(())
	}

	#[test]
	fn delete_ring_rules() -> Result<()> {
		let mut p = with_hole();
		assert!(p.delete_ring(0).is_err());
		assert!(p.delete_ring(2).is_err());
		p.delete_ring(1)?;
		assert_eq!(p.0.len(), 1);
		Ok(())
	}

	#[test]
	fn remove_interior_rings_by_area() {
		let mut p = with_hole();
		p.remove_interior_rings(Some(2.0));
		assert_eq!(p.0.len(), 1);

		let mut p = with_hole();
		p.remove_interior_rings(Some(0.5));
		assert_eq!(p.0.len(), 2);

		p.remove_interior_rings(None);
		assert_eq!(p.0.len(), 1);
	}

	#[test]
	fn area_subtracts_holes() {
		assert_eq!(with_hole().area(), 26.0);
	}

	#[test]
	fn verify_rings() {
		assert!(with_hole().verify_rings(true).is_ok());
		assert!(Polygon::from(vec![vec![[0, 0], [1, 0], [0, 0]]]).verify().is_err());
		assert!(Polygon::from(vec![vec![[0, 0], [1, 0], [1, 1], [0, 1]]]).verify().is_err());
		assert!(Polygon::default().verify().is_err());

		let curved = Polygon(vec![Curve::Compound(CompoundCurve(vec![
			Segment::Arc(CircularString::from(&[[1, 0], [0, 1], [-1, 0]])),
			Segment::Line(LineString::from(&[[-1, 0], [1, 0]])),
		]))]);
		assert!(curved.verify().is_ok());
		assert!(curved.verify_rings(true).is_err());
	}
}
