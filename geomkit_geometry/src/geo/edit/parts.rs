use crate::{
	Curve, Geometry, GeometryError, GeometryKind, GeometryTrait, GeometryType, Part, Polygon, Vertex, WkbType,
	geo::geometry::accepts_part,
};
use anyhow::{Result, bail, ensure};
use log::debug;

impl Geometry {
	/// Adds a part. Its dimensions are taken from its first vertex.
	///
	/// See [`Geometry::add_part_geometry`] for the rules.
	pub fn add_part(&mut self, part: impl Into<Part>) -> Result<()> {
		let part = part.into();
		let other = match part {
			Part::Collection(geometry) => geometry,
			part => {
				let mut first = None;
				part.for_each_vertex(&mut |vertex| {
					first.get_or_insert(*vertex);
				});
				let (has_z, has_m) = first.map_or((false, false), |v: Vertex| (v.z.is_some(), v.m.is_some()));
				Geometry::from_parts(WkbType::new(part.kind(), has_z, has_m), vec![part])?
			}
		};
		self.add_part_geometry(&other)
	}

	/// Adds the parts of `other`, promoting a single geometry to its multi type first.
	///
	/// The container accepts: MultiPoint points, MultiLineString line strings, MultiPolygon
	/// polygons, MultiCurve any curve, MultiSurface polygons and curve polygons, and a
	/// GeometryCollection anything. A closed curve with at least 4 vertices offered to a surface
	/// container becomes the exterior of a new polygon. A multi geometry added to a collection
	/// becomes one nested member.
	///
	/// An untyped or empty geometry takes its kind and dimensions from `other`; otherwise the new
	/// parts are conformed to the container's dimensions.
	pub fn add_part_geometry(&mut self, other: &Geometry) -> Result<()> {
		ensure!(
			!other.is_empty(),
			GeometryError::invalid(format!("cannot add an empty {} as a part", other.wkb_type()))
		);
		debug!("add {} to {}", other.wkb_type(), self.wkb_type());

		self.transact(|g| {
			let adopt = g.kind().is_placeholder();
			if adopt {
				g.set_wkb_type(other.wkb_type().multi_type());
			} else {
				let container = g.wkb_type().multi_type();
				let dims = if g.is_empty() {
					other.wkb_type().dimensions()
				} else {
					container.dimensions()
				};
				g.set_wkb_type(WkbType::with_dimensions(container.kind(), dims));
			}

			let container = g.wkb_type();
			let incoming = if container.kind() == GeometryKind::GeometryCollection
				&& other.wkb_type().is_multi_type()
				&& !adopt
			{
				vec![Part::Collection(other.clone())]
			} else {
				other.parts().to_vec()
			};

			for part in incoming {
				let kind = part.kind();
				let Some(part) = coerce_part(container.kind(), part) else {
					bail!(GeometryError::IncompatiblePart {
						part: kind.to_string(),
						container: container.to_string(),
					});
				};
				g.parts_mut().push(part);
			}
			g.conform();
			Ok(())
		})
	}

	/// Builds a part from `points` and adds it.
	///
	/// `Point` adds every vertex as its own point, `Line` adds one line string and `Polygon` adds a
	/// polygon whose exterior ring is closed if needed.
	pub fn add_part_points<T>(&mut self, points: Vec<T>, geometry_type: GeometryType) -> Result<()>
	where
		Vertex: From<T>,
	{
		let mut points: Vec<Vertex> = points.into_iter().map(Vertex::from).collect();
		ensure!(!points.is_empty(), GeometryError::invalid("cannot add a part without vertices"));
		let other = match geometry_type {
			GeometryType::Point => Geometry::new_multi_point::<Vertex>(points)?,
			GeometryType::Line => {
				ensure!(
					points.len() >= 2,
					GeometryError::invalid("a line part needs at least 2 vertices")
				);
				Geometry::new_line_string::<Vertex>(points)?
			}
			GeometryType::Polygon => {
				if let (Some(first), Some(last)) = (points.first().copied(), points.last())
					&& !first.same_xy(last)
				{
					points.push(first);
				}
				ensure!(
					points.len() >= 4,
					GeometryError::invalid("a polygon part needs at least 3 distinct vertices")
				);
				Geometry::new_polygon::<Vertex>(vec![points])?
			}
			GeometryType::Unknown | GeometryType::Null => {
				bail!(GeometryError::invalid(format!(
					"cannot build a part of type {geometry_type:?}"
				)))
			}
		};
		self.add_part_geometry(&other)
	}

	/// Removes part `part`. Removing the only part of a single geometry leaves it empty.
	pub fn delete_part(&mut self, part: usize) -> Result<()> {
		let count = self.num_parts();
		ensure!(part < count, GeometryError::OutOfRange { index: part, count });
		debug!("delete part {part} of {}", self.wkb_type());
		self.transact(|g| {
			g.parts_mut().remove(part);
			Ok(())
		})
	}

	/// Turns a single geometry into its multi type. Multi geometries are left as they are.
	pub fn convert_to_multi_type(&mut self) -> Result<()> {
		ensure!(
			!self.kind().is_placeholder(),
			GeometryError::invalid(format!("a {} geometry has no multi type", self.kind()))
		);
		if self.wkb_type().is_multi_type() {
			return Ok(());
		}
		let multi = self.wkb_type().multi_type();
		self.transact(|g| {
			g.set_wkb_type(multi);
			Ok(())
		})
	}

	/// Turns a multi geometry with at most one part into the single type of that part.
	pub fn convert_to_single_type(&mut self) -> Result<()> {
		ensure!(
			!self.kind().is_placeholder(),
			GeometryError::invalid(format!("a {} geometry has no single type", self.kind()))
		);
		if !self.wkb_type().is_multi_type() {
			return Ok(());
		}
		ensure!(
			self.num_parts() <= 1,
			GeometryError::invalid(format!(
				"a {} with {} parts cannot become a single geometry",
				self.wkb_type(),
				self.num_parts()
			))
		);
		let single = match self.parts().first() {
			Some(Part::Collection(inner)) => bail!(GeometryError::invalid(format!(
				"a nested {} cannot become a single geometry",
				inner.wkb_type()
			))),
			Some(part) => self.wkb_type().with_kind(part.kind()),
			None => self.wkb_type().single_type(),
		};
		self.transact(|g| {
			g.set_wkb_type(single);
			Ok(())
		})
	}
}

/// Fits `part` into a container of `kind`, turning closed curves into polygons for surface
/// containers. `None` if the container cannot hold it.
fn coerce_part(kind: GeometryKind, part: Part) -> Option<Part> {
	if accepts_part(kind, &part) {
		return Some(part);
	}
	match (kind, part) {
		(GeometryKind::MultiPolygon, Part::Curve(ring @ Curve::Line(_))) if is_ring(&ring) => {
			Some(Part::Polygon(Polygon(vec![ring])))
		}
		(GeometryKind::MultiSurface, Part::Curve(ring)) if is_ring(&ring) => match ring {
			Curve::Line(_) => Some(Part::Polygon(Polygon(vec![ring]))),
			_ => Some(Part::CurvePolygon(Polygon(vec![ring]))),
		},
		_ => None,
	}
}

fn is_ring(curve: &Curve) -> bool {
	curve.is_closed() && curve.vertex_count() >= 4
}
