//! Well-known text parser.
//!
//! The keyword decides how the body is read. Coordinates may carry more ordinates than the keyword
//! declares: the observed ordinates upgrade the type of the whole geometry once parsing is done.

use crate::{
	CircularString, CompoundCurve, Curve, Dimensions, Geometry, GeometryError, GeometryKind, LineString, Part, Polygon,
	Segment, Vertex, WkbType,
};
use anyhow::{Result, bail};
use geomkit_core::byte_iterator::{ByteIterator, parse_number_as, parse_parenthesized_entries, parse_word};
use log::trace;

/// Dimensions seen so far.
#[derive(Default)]
struct Observed {
	has_z: bool,
	has_m: bool,
	/// A third ordinate is M, because the last explicit declaration was M only.
	m_only: bool,
}

pub(super) fn parse_wkt(text: &str) -> Result<Geometry> {
	let mut iter = ByteIterator::from_text(text);
	let mut observed = Observed::default();

	let mut geometry = parse_geometry(&mut iter, &mut observed)?;
	iter.skip_whitespace();
	if !iter.is_at_end() {
		bail!(iter.format_error("unexpected text after the geometry"));
	}

	let dims = if geometry.wkb_type().is_25d() && !observed.has_m {
		Dimensions::Xyz25D
	} else {
		Dimensions::from_flags(observed.has_z, observed.has_m)
	};
	geometry.set_dimensions(dims);
	geometry
		.verify()
		.map_err(|error| GeometryError::invalid(format!("{error:#}")))?;
	Ok(geometry)
}

/// Reads the keyword, separate dimension tokens such as `Z M` and an optional `EMPTY`.
fn parse_header(iter: &mut ByteIterator, observed: &mut Observed) -> Result<(WkbType, bool)> {
	let mut name = parse_word(iter);
	if name.is_empty() {
		bail!(iter.format_error("expected a geometry keyword"));
	}

	let mut empty = false;
	loop {
		iter.skip_whitespace();
		if !iter.peek().is_some_and(|byte| byte.is_ascii_alphabetic()) {
			break;
		}
		let word = parse_word(iter);
		if word.eq_ignore_ascii_case("empty") {
			empty = true;
			break;
		}
		name.push_str(&word);
	}

	let wkb_type = WkbType::parse(&name);
	if wkb_type.kind().is_placeholder() {
		bail!(iter.format_error(&format!("unknown geometry type '{name}'")));
	}
	if wkb_type.dimensions() != Dimensions::Xy {
		observed.has_z |= wkb_type.has_z();
		observed.has_m |= wkb_type.has_m();
		observed.m_only = wkb_type.has_m() && !wkb_type.has_z();
	}
	Ok((wkb_type, empty))
}

fn parse_geometry(iter: &mut ByteIterator, observed: &mut Observed) -> Result<Geometry> {
	let (wkb_type, empty) = parse_header(iter, observed)?;
	let mut geometry = Geometry::new(wkb_type);
	if empty {
		return Ok(geometry);
	}
	trace!("parse {wkb_type} at position {}", iter.position());
	*geometry.parts_mut() = parse_body(iter, observed, wkb_type.kind())?;
	Ok(geometry)
}

fn parse_body(iter: &mut ByteIterator, observed: &mut Observed, kind: GeometryKind) -> Result<Vec<Part>> {
	use GeometryKind as K;
	Ok(match kind {
		K::Point => vec![Part::Point(parse_point(iter, observed)?)],
		K::LineString => vec![Part::Curve(Curve::Line(LineString(parse_vertices(iter, observed)?)))],
		K::CircularString => vec![Part::Curve(Curve::Arc(CircularString(parse_vertices(iter, observed)?)))],
		K::CompoundCurve => vec![Part::Curve(Curve::Compound(parse_compound(iter, observed)?))],
		K::Polygon => vec![Part::Polygon(parse_polygon(iter, observed)?)],
		K::CurvePolygon => vec![Part::CurvePolygon(parse_curve_polygon(iter, observed)?)],
		K::MultiPoint => parse_parenthesized_entries(iter, |iter| {
			let point = if iter.peek() == Some(b'(') {
				parse_point(iter, observed)?
			} else {
				parse_vertex(iter, observed)?
			};
			Ok(Part::Point(point))
		})?,
		K::MultiLineString => parse_parenthesized_entries(iter, |iter| {
			Ok(Part::Curve(Curve::Line(LineString(parse_vertices(iter, observed)?))))
		})?,
		K::MultiPolygon => parse_parenthesized_entries(iter, |iter| Ok(Part::Polygon(parse_polygon(iter, observed)?)))?,
		K::MultiCurve => parse_parenthesized_entries(iter, |iter| Ok(Part::Curve(parse_curve(iter, observed)?)))?,
		K::MultiSurface => parse_parenthesized_entries(iter, |iter| parse_surface(iter, observed))?,
		K::GeometryCollection => parse_parenthesized_entries(iter, |iter| parse_member(iter, observed))?
			.into_iter()
			.flatten()
			.collect(),
		K::Unknown | K::NoGeometry => bail!(iter.format_error(&format!("a {kind} has no body"))),
	})
}

fn parse_vertex(iter: &mut ByteIterator, observed: &mut Observed) -> Result<Vertex> {
	let mut ordinates: Vec<f64> = Vec::with_capacity(4);
	loop {
		iter.skip_whitespace();
		if !matches!(iter.peek(), Some(b'0'..=b'9' | b'-' | b'+' | b'.')) {
			break;
		}
		if ordinates.len() == 4 {
			bail!(iter.format_error("a coordinate has at most 4 ordinates"));
		}
		ordinates.push(parse_number_as(iter)?);
	}

	match *ordinates.as_slice() {
		[x, y] => Ok(Vertex::new(x, y)),
		[x, y, m] if observed.m_only => {
			observed.has_m = true;
			Ok(Vertex::new_m(x, y, m))
		}
		[x, y, z] => {
			observed.has_z = true;
			Ok(Vertex::new_z(x, y, z))
		}
		[x, y, z, m] => {
			observed.has_z = true;
			observed.has_m = true;
			Ok(Vertex::new_zm(x, y, z, m))
		}
		_ => Err(iter.format_error("a coordinate needs at least 2 ordinates")),
	}
}

fn parse_point(iter: &mut ByteIterator, observed: &mut Observed) -> Result<Vertex> {
	let mut vertices = parse_vertices(iter, observed)?;
	if vertices.len() != 1 {
		bail!(iter.format_error("a point has exactly one coordinate"));
	}
	Ok(vertices.remove(0))
}

fn parse_vertices(iter: &mut ByteIterator, observed: &mut Observed) -> Result<Vec<Vertex>> {
	parse_parenthesized_entries(iter, |iter| parse_vertex(iter, observed))
}

fn parse_polygon(iter: &mut ByteIterator, observed: &mut Observed) -> Result<Polygon> {
	let rings = parse_parenthesized_entries(iter, |iter| Ok(Curve::Line(LineString(parse_vertices(iter, observed)?))))?;
	Ok(Polygon(rings))
}

fn parse_curve_polygon(iter: &mut ByteIterator, observed: &mut Observed) -> Result<Polygon> {
	Ok(Polygon(parse_parenthesized_entries(iter, |iter| parse_curve(iter, observed))?))
}

fn parse_compound(iter: &mut ByteIterator, observed: &mut Observed) -> Result<CompoundCurve> {
	let segments = parse_parenthesized_entries(iter, |iter| {
		if iter.peek() == Some(b'(') {
			return Ok(Segment::Line(LineString(parse_vertices(iter, observed)?)));
		}
		let kind = parse_member_header(iter, observed)?;
		let vertices = parse_vertices(iter, observed)?;
		match kind {
			GeometryKind::LineString => Ok(Segment::Line(LineString(vertices))),
			GeometryKind::CircularString => Ok(Segment::Arc(CircularString(vertices))),
			kind => Err(iter.format_error(&format!("a {kind} cannot be a segment of a compound curve"))),
		}
	})?;
	Ok(CompoundCurve(segments))
}

/// A bare coordinate list is a line string.
fn parse_curve(iter: &mut ByteIterator, observed: &mut Observed) -> Result<Curve> {
	if iter.peek() == Some(b'(') {
		return Ok(Curve::Line(LineString(parse_vertices(iter, observed)?)));
	}
	match parse_member_header(iter, observed)? {
		GeometryKind::LineString => Ok(Curve::Line(LineString(parse_vertices(iter, observed)?))),
		GeometryKind::CircularString => Ok(Curve::Arc(CircularString(parse_vertices(iter, observed)?))),
		GeometryKind::CompoundCurve => Ok(Curve::Compound(parse_compound(iter, observed)?)),
		kind => Err(iter.format_error(&format!("a {kind} is not a curve"))),
	}
}

/// A bare ring list is a polygon.
fn parse_surface(iter: &mut ByteIterator, observed: &mut Observed) -> Result<Part> {
	if iter.peek() == Some(b'(') {
		return Ok(Part::Polygon(parse_polygon(iter, observed)?));
	}
	match parse_member_header(iter, observed)? {
		GeometryKind::Polygon => Ok(Part::Polygon(parse_polygon(iter, observed)?)),
		GeometryKind::CurvePolygon => Ok(Part::CurvePolygon(parse_curve_polygon(iter, observed)?)),
		kind => Err(iter.format_error(&format!("a {kind} is not a surface"))),
	}
}

fn parse_member_header(iter: &mut ByteIterator, observed: &mut Observed) -> Result<GeometryKind> {
	let (wkb_type, empty) = parse_header(iter, observed)?;
	if empty {
		bail!(iter.format_error("empty members are not supported here"));
	}
	Ok(wkb_type.kind())
}

/// Collection members: single geometries contribute their part, multi geometries are nested.
/// Empty members are skipped.
fn parse_member(iter: &mut ByteIterator, observed: &mut Observed) -> Result<Option<Part>> {
	let member = parse_geometry(iter, observed)?;
	if member.is_empty() {
		trace!("skip empty {} member", member.wkb_type());
		return Ok(None);
	}
	if member.wkb_type().is_multi_type() {
		return Ok(Some(Part::Collection(member)));
	}
	Ok(member.into_parts().into_iter().next())
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	fn parse(text: &str) -> Geometry {
		parse_wkt(text).unwrap()
	}

	#[rstest]
	#[case("POINT (1 2)", "Point")]
	#[case("point(1 2)", "Point")]
	#[case("POINT Z (1 2 3)", "PointZ")]
	#[case("POINTZ(1 2 3)", "PointZ")]
	#[case("POINT M (1 2 3)", "PointM")]
	#[case("POINT Z M (1 2 3 4)", "PointZM")]
	#[case("POINT (1 2 3)", "PointZ")]
	#[case("POINT (1 2 3 4)", "PointZM")]
	#[case("  LineString  ( 0 0 ,1 1 ) ", "LineString")]
	#[case("POLYGON EMPTY", "Polygon")]
	#[case("MultiPolygon Z EMPTY", "MultiPolygonZ")]
	#[case("POINT25D (1 2 3)", "Point25D")]
	fn parsed_types(#[case] text: &str, #[case] expected: &str) {
		assert_eq!(parse(text).wkb_type().to_string(), expected);
	}

	#[test]
	fn observed_ordinates_upgrade_the_type() {
		let geometry = parse("LINESTRING (0 0, 1 1 5)");
		assert_eq!(geometry.wkb_type().to_string(), "LineStringZ");
		assert_eq!(geometry.vertex_at(0), Some(Vertex::new_z(0.0, 0.0, 0.0)));
		assert_eq!(geometry.vertex_at(1), Some(Vertex::new_z(1.0, 1.0, 5.0)));
	}

	#[test]
	fn multi_point_forms() {
		assert_eq!(parse("MULTIPOINT ((1 2),(3 4))"), parse("MULTIPOINT (1 2, 3 4)"));
		assert_eq!(parse("MULTIPOINT (1 2, 3 4)").num_parts(), 2);
	}

	#[test]
	fn curves() {
		let geometry = parse("COMPOUNDCURVE ((0 0, 1 0), CIRCULARSTRING (1 0, 2 1, 3 0))");
		assert_eq!(geometry.vertex_count(), 4);

		let geometry = parse("CURVEPOLYGON (CIRCULARSTRING (0 0, 2 2, 4 0, 2 -2, 0 0), (1 0, 1.5 0.5, 2 0, 1 0))");
		assert_eq!(geometry.ring_count(0), 2);

		let geometry = parse("MULTISURFACE (((0 0, 1 0, 1 1, 0 0)), CURVEPOLYGON ((5 5, 6 5, 6 6, 5 5)))");
		assert_eq!(geometry.parts()[0].kind(), GeometryKind::Polygon);
		assert_eq!(geometry.parts()[1].kind(), GeometryKind::CurvePolygon);

		let geometry = parse("MULTICURVE ((0 0, 1 1), CIRCULARSTRING (0 0, 1 1, 2 0))");
		assert_eq!(geometry.parts()[1].kind(), GeometryKind::CircularString);
	}

	#[test]
	fn collections() {
		let geometry = parse("GEOMETRYCOLLECTION (POINT (1 2), MULTIPOINT ((3 4)), POINT EMPTY)");
		assert_eq!(geometry.num_parts(), 2);
		assert!(matches!(geometry.parts()[1], Part::Collection(_)));
		assert_eq!(geometry.vertex_count(), 2);

		let geometry = parse("GEOMETRYCOLLECTION (POINT (1 2), LINESTRING Z (0 0 1, 1 1 1))");
		assert_eq!(geometry.wkb_type().to_string(), "GeometryCollectionZ");
		assert_eq!(geometry.vertex_at(0), Some(Vertex::new_z(1.0, 2.0, 0.0)));
	}

	#[rstest]
	#[case("")]
	#[case("POINT")]
	#[case("POINT (1)")]
	#[case("POINT (1 2 3 4 5)")]
	#[case("POINT (1 2")]
	#[case("POINT (1 2) x")]
	#[case("POINT (1 2, 3 4)")]
	#[case("TRIANGLE ((0 0, 1 0, 0 1, 0 0))")]
	#[case("POLYGON ((0 0, 1 0, 1 1))")]
	#[case("CIRCULARSTRING (0 0, 1 1)")]
	#[case("MULTIPOINT ()")]
	#[case("COMPOUNDCURVE (POINT (1 2))")]
	fn malformed_text_fails(#[case] text: &str) {
		assert!(parse_wkt(text).is_err());
	}

	#[test]
	fn errors_carry_the_position() {
		let error = parse_wkt("LINESTRING (0 0, 1 x)").unwrap_err();
		assert!(error.to_string().contains("position"), "{error}");
	}
}
