use super::WktOptions;
use crate::{Curve, Dimensions, Geometry, GeometryError, GeometryKind, Part, Polygon, Segment, Vertex, WkbType};
use anyhow::{Result, ensure};

pub(super) fn write_wkt(geometry: &Geometry, options: &WktOptions) -> Result<String> {
	let wkb_type = geometry.wkb_type();
	ensure!(
		!wkb_type.kind().is_placeholder(),
		GeometryError::invalid(format!("a {} geometry has no text representation", wkb_type.kind()))
	);

	let writer = WktWriter {
		options,
		dims: wkb_type.dimensions(),
	};
	let mut text = wkb_type.wkt_keyword();
	if geometry.is_empty() {
		text.push_str(" EMPTY");
	} else {
		text.push(' ');
		writer.write_body(&mut text, geometry);
	}
	Ok(text)
}

struct WktWriter<'a> {
	options: &'a WktOptions,
	dims: Dimensions,
}

impl WktWriter<'_> {
	fn keyword(&self, kind: GeometryKind) -> String {
		WkbType::with_dimensions(kind, self.dims).wkt_keyword()
	}

	fn write_body(&self, out: &mut String, geometry: &Geometry) {
		use GeometryKind as K;
		let kind = geometry.kind();
		if !geometry.wkb_type().is_multi_type() {
			if let Some(part) = geometry.parts().first() {
				self.write_part(out, part);
			}
			return;
		}

		out.push('(');
		for (index, part) in geometry.parts().iter().enumerate() {
			if index > 0 {
				out.push(',');
			}
			match (kind, part) {
				(K::GeometryCollection, part) => self.write_tagged(out, part),
				(K::MultiCurve, Part::Curve(curve)) => self.write_curve_member(out, curve),
				(K::MultiSurface, Part::CurvePolygon(_)) => self.write_tagged(out, part),
				(_, part) => self.write_part(out, part),
			}
		}
		out.push(')');
	}

	/// Writes a part without its keyword.
	fn write_part(&self, out: &mut String, part: &Part) {
		match part {
			Part::Point(vertex) => {
				out.push('(');
				self.write_vertex(out, vertex);
				out.push(')');
			}
			Part::Curve(curve) => self.write_curve(out, curve),
			Part::Polygon(polygon) => self.write_rings(out, polygon, false),
			Part::CurvePolygon(polygon) => self.write_rings(out, polygon, true),
			Part::Collection(geometry) => self.write_body(out, geometry),
		}
	}

	fn write_tagged(&self, out: &mut String, part: &Part) {
		out.push_str(&self.keyword(part.kind()));
		out.push(' ');
		self.write_part(out, part);
	}

	fn write_curve(&self, out: &mut String, curve: &Curve) {
		match curve {
			Curve::Line(line) => self.write_vertices(out, &line.0),
			Curve::Arc(arc) => self.write_vertices(out, &arc.0),
			Curve::Compound(compound) => {
				out.push('(');
				for (index, segment) in compound.0.iter().enumerate() {
					if index > 0 {
						out.push(',');
					}
					if let Segment::Arc(_) = segment {
						out.push_str(&self.keyword(GeometryKind::CircularString));
						out.push(' ');
					}
					self.write_vertices(out, segment.vertices());
				}
				out.push(')');
			}
		}
	}

	/// Line strings are written bare, other curves with their keyword.
	fn write_curve_member(&self, out: &mut String, curve: &Curve) {
		if !matches!(curve, Curve::Line(_)) {
			out.push_str(&self.keyword(curve.kind()));
			out.push(' ');
		}
		self.write_curve(out, curve);
	}

	fn write_rings(&self, out: &mut String, polygon: &Polygon, curved: bool) {
		out.push('(');
		for (index, ring) in polygon.0.iter().enumerate() {
			if index > 0 {
				out.push(',');
			}
			if curved {
				self.write_curve_member(out, ring);
			} else {
				self.write_curve(out, ring);
			}
		}
		out.push(')');
	}

	fn write_vertices(&self, out: &mut String, vertices: &[Vertex]) {
		out.push('(');
		for (index, vertex) in vertices.iter().enumerate() {
			if index > 0 {
				out.push_str(", ");
			}
			self.write_vertex(out, vertex);
		}
		out.push(')');
	}

	fn write_vertex(&self, out: &mut String, vertex: &Vertex) {
		let ordinates = vertex.ordinates();
		for (index, value) in ordinates.iter().enumerate() {
			if index > 0 {
				out.push(' ');
			}
			out.push_str(&self.format_number(*value));
		}
	}

	fn format_number(&self, value: f64) -> String {
		let mut text = match self.options.precision {
			None => format!("{value}"),
			Some(precision) => {
				let mut text = format!("{value:.precision$}");
				if text.contains('.') {
					text.truncate(text.trim_end_matches('0').trim_end_matches('.').len());
				}
				text
			}
		};
		if text == "-0" {
			text.remove(0);
		}
		text
	}
}
