use crate::{Curve, Dimensions, Geometry, GeometryError, GeometryKind, Part, Polygon, Segment, Vertex, WkbType};
use anyhow::{Result, bail, ensure};
use byteorder::ByteOrder;
use geomkit_core::{
	Blob,
	io::{ValueWriter, ValueWriterBlob},
};
use log::trace;

/// Writes geometries with the byte order `E`, announcing it with `marker` in every header.
pub(super) struct WkbWriter<E: ByteOrder> {
	writer: ValueWriterBlob<E>,
	marker: u8,
}

impl<E: ByteOrder> WkbWriter<E> {
	pub(super) fn new(marker: u8) -> Self {
		WkbWriter {
			writer: ValueWriterBlob::new(),
			marker,
		}
	}

	pub(super) fn into_blob(self) -> Blob {
		self.writer.into_blob()
	}

	pub(super) fn write_geometry(&mut self, geometry: &Geometry) -> Result<()> {
		let wkb_type = geometry.wkb_type();
		ensure!(
			!wkb_type.kind().is_placeholder(),
			GeometryError::invalid(format!("a {} geometry has no binary representation", wkb_type.kind()))
		);
		let dims = wkb_type.dimensions();
		trace!("write {wkb_type} with {} parts", geometry.num_parts());

		if wkb_type.is_multi_type() {
			self.write_header(wkb_type)?;
			self.writer.write_count(geometry.num_parts())?;
			for part in geometry.parts() {
				self.write_part(part, dims)?;
			}
			return Ok(());
		}

		match geometry.parts().first() {
			Some(part) => self.write_part(part, dims),
			None => self.write_empty(wkb_type),
		}
	}

	/// An empty point has NaN ordinates, every other empty single geometry a zero count.
	fn write_empty(&mut self, wkb_type: WkbType) -> Result<()> {
		self.write_header(wkb_type)?;
		if wkb_type.kind() == GeometryKind::Point {
			for _ in 0..wkb_type.coord_dimensions() {
				self.writer.write_f64(f64::NAN)?;
			}
			Ok(())
		} else {
			self.writer.write_count(0)
		}
	}

	fn write_header(&mut self, wkb_type: WkbType) -> Result<()> {
		self.writer.write_u8(self.marker)?;
		self.writer.write_u32(wkb_type.code())
	}

	fn write_part(&mut self, part: &Part, dims: Dimensions) -> Result<()> {
		match part {
			Part::Point(vertex) => {
				self.write_header(WkbType::with_dimensions(GeometryKind::Point, dims))?;
				self.write_vertex(vertex)
			}
			Part::Curve(curve) => self.write_curve(curve, dims),
			Part::Polygon(polygon) => self.write_polygon(polygon, dims),
			Part::CurvePolygon(polygon) => self.write_curve_polygon(polygon, dims),
			Part::Collection(geometry) => self.write_geometry(geometry),
		}
	}

	fn write_curve(&mut self, curve: &Curve, dims: Dimensions) -> Result<()> {
		self.write_header(WkbType::with_dimensions(curve.kind(), dims))?;
		match curve {
			Curve::Line(line) => self.write_vertices(&line.0),
			Curve::Arc(arc) => self.write_vertices(&arc.0),
			Curve::Compound(compound) => {
				self.writer.write_count(compound.0.len())?;
				for segment in &compound.0 {
					let kind = match segment {
						Segment::Line(_) => GeometryKind::LineString,
						Segment::Arc(_) => GeometryKind::CircularString,
					};
					self.write_header(WkbType::with_dimensions(kind, dims))?;
					self.write_vertices(segment.vertices())?;
				}
				Ok(())
			}
		}
	}

	fn write_polygon(&mut self, polygon: &Polygon, dims: Dimensions) -> Result<()> {
		self.write_header(WkbType::with_dimensions(GeometryKind::Polygon, dims))?;
		self.writer.write_count(polygon.0.len())?;
		for ring in &polygon.0 {
			let Curve::Line(line) = ring else {
				bail!(GeometryError::structural("a polygon ring must be a line string"));
			};
			self.write_vertices(&line.0)?;
		}
		Ok(())
	}

	fn write_curve_polygon(&mut self, polygon: &Polygon, dims: Dimensions) -> Result<()> {
		self.write_header(WkbType::with_dimensions(GeometryKind::CurvePolygon, dims))?;
		self.writer.write_count(polygon.0.len())?;
		for ring in &polygon.0 {
			self.write_curve(ring, dims)?;
		}
		Ok(())
	}

	fn write_vertices(&mut self, vertices: &[Vertex]) -> Result<()> {
		self.writer.write_count(vertices.len())?;
		for vertex in vertices {
			self.write_vertex(vertex)?;
		}
		Ok(())
	}

	fn write_vertex(&mut self, vertex: &Vertex) -> Result<()> {
		for value in vertex.ordinates() {
			self.writer.write_f64(value)?;
		}
		Ok(())
	}
}
