use crate::{
	CircularString, CompoundCurve, Curve, Geometry, GeometryError, GeometryKind, LineString, Part, Polygon, Segment,
	Vertex, WkbType, geo::geometry::accepts_part,
};
use anyhow::{Context, Result, bail, ensure};
use byteorder::ByteOrder;
use geomkit_core::io::{ValueReader, ValueReaderSlice};
use log::trace;

/// Deeper nesting is rejected instead of risking the stack.
const MAX_DEPTH: usize = 64;

/// Smallest possible member: byte order marker and type code.
const MIN_MEMBER_SIZE: u64 = 5;

pub(super) fn parse_wkb(data: &[u8]) -> Result<Geometry> {
	let (geometry, used) = read_geometry(data, 0)?;
	ensure!(
		used == data.len(),
		GeometryError::invalid(format!(
			"{} trailing bytes after the geometry",
			data.len() - used
		))
	);
	Ok(geometry)
}

/// Decodes the geometry at the start of `data` and returns it with the number of bytes it used.
fn read_geometry(data: &[u8], depth: usize) -> Result<(Geometry, usize)> {
	ensure!(
		depth <= MAX_DEPTH,
		GeometryError::invalid("geometry is nested too deeply")
	);
	let Some((&marker, body)) = data.split_first() else {
		bail!(GeometryError::invalid("unexpected end of data"));
	};
	let (geometry, used) = match marker {
		0 => read_body(ValueReaderSlice::new_be(body), depth)?,
		1 => read_body(ValueReaderSlice::new_le(body), depth)?,
		_ => bail!(GeometryError::invalid(format!("invalid byte order marker {marker}"))),
	};
	Ok((geometry, used + 1))
}

fn read_body<'a, E: ByteOrder + 'a>(mut reader: ValueReaderSlice<'a, E>, depth: usize) -> Result<(Geometry, usize)> {
	let code = reader.read_u32().context("while reading the type code")?;
	let Some(wkb_type) = WkbType::from_code(code).filter(|t| !t.kind().is_placeholder()) else {
		bail!(GeometryError::invalid(format!("unknown geometry type code {code}")));
	};
	trace!("read {wkb_type} at depth {depth}");

	let kind = wkb_type.kind();
	let parts = match kind {
		GeometryKind::Point => {
			let vertex = read_vertex(&mut reader, wkb_type)?;
			if vertex.x.is_nan() && vertex.y.is_nan() {
				vec![]
			} else {
				vec![Part::Point(vertex)]
			}
		}
		GeometryKind::LineString => single(Curve::Line(LineString(read_vertices(&mut reader, wkb_type)?))),
		GeometryKind::CircularString => single(Curve::Arc(CircularString(read_vertices(&mut reader, wkb_type)?))),
		GeometryKind::Polygon => {
			let count = reader.read_count(4)?;
			let mut rings = Vec::with_capacity(count);
			for _ in 0..count {
				rings.push(Curve::Line(LineString(read_vertices(&mut reader, wkb_type)?)));
			}
			if rings.is_empty() {
				vec![]
			} else {
				vec![Part::Polygon(Polygon(rings))]
			}
		}
		GeometryKind::CompoundCurve => {
			let mut segments = Vec::new();
			for member in read_members(&mut reader, wkb_type, depth)? {
				match member.into_parts().pop() {
					Some(Part::Curve(Curve::Line(line))) => segments.push(Segment::Line(line)),
					Some(Part::Curve(Curve::Arc(arc))) => segments.push(Segment::Arc(arc)),
					Some(part) => bail!(incompatible(&part, wkb_type)),
					None => {}
				}
			}
			single(Curve::Compound(CompoundCurve(segments)))
		}
		GeometryKind::CurvePolygon => {
			let mut rings = Vec::new();
			for member in read_members(&mut reader, wkb_type, depth)? {
				match member.into_parts().pop() {
					Some(Part::Curve(curve)) => rings.push(curve),
					Some(part) => bail!(incompatible(&part, wkb_type)),
					None => {}
				}
			}
			if rings.is_empty() {
				vec![]
			} else {
				vec![Part::CurvePolygon(Polygon(rings))]
			}
		}
		_ => {
			let mut parts = Vec::new();
			for member in read_members(&mut reader, wkb_type, depth)? {
				if member.is_empty() {
					continue;
				}
				let part = if member.wkb_type().is_multi_type() {
					Part::Collection(member)
				} else {
					match member.into_parts().pop() {
						Some(part) => part,
						None => continue,
					}
				};
				ensure!(accepts_part(kind, &part), incompatible(&part, wkb_type));
				parts.push(part);
			}
			parts
		}
	};

	let used = reader.position() as usize;
	let geometry = Geometry::from_parts(wkb_type, parts)
		.map_err(|error| GeometryError::invalid(format!("{error:#}")))?;
	Ok((geometry, used))
}

fn single(curve: Curve) -> Vec<Part> {
	if curve.is_empty() {
		vec![]
	} else {
		vec![Part::Curve(curve)]
	}
}

fn incompatible(part: &Part, container: WkbType) -> GeometryError {
	GeometryError::IncompatiblePart {
		part: part.kind().to_string(),
		container: container.to_string(),
	}
}

/// Reads the members of a container. Each member carries its own byte order and must have the
/// same Z and M presence as the container.
fn read_members<'a, E: ByteOrder + 'a>(
	reader: &mut ValueReaderSlice<'a, E>,
	container: WkbType,
	depth: usize,
) -> Result<Vec<Geometry>> {
	let count = reader.read_count(MIN_MEMBER_SIZE)?;
	let mut members = Vec::with_capacity(count);
	for index in 0..count {
		let (member, used) = read_geometry(reader.rest(), depth + 1).with_context(|| format!("while reading member {index}"))?;
		ensure!(
			member.has_z() == container.has_z() && member.has_m() == container.has_m(),
			GeometryError::invalid(format!(
				"member {} does not match the dimensions of {container}",
				member.wkb_type()
			))
		);
		let position = reader.position();
		reader.set_position(position + used as u64)?;
		members.push(member);
	}
	Ok(members)
}

fn read_vertices<'a, E: ByteOrder + 'a>(reader: &mut ValueReaderSlice<'a, E>, wkb_type: WkbType) -> Result<Vec<Vertex>> {
	let count = reader.read_count(8 * u64::from(wkb_type.coord_dimensions()))?;
	let mut vertices = Vec::with_capacity(count);
	for _ in 0..count {
		vertices.push(read_vertex(reader, wkb_type)?);
	}
	Ok(vertices)
}

fn read_vertex<'a, E: ByteOrder + 'a>(reader: &mut ValueReaderSlice<'a, E>, wkb_type: WkbType) -> Result<Vertex> {
	let x = reader.read_f64()?;
	let y = reader.read_f64()?;
	let z = if wkb_type.has_z() { Some(reader.read_f64()?) } else { None };
	let m = if wkb_type.has_m() { Some(reader.read_f64()?) } else { None };
	Ok(Vertex { x, y, z, m })
}
