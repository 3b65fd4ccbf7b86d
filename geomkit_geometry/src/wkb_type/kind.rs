use std::fmt::Display;

/// The shape family of a geometry, independent of its dimensionality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GeometryKind {
	#[default]
	Unknown,
	Point,
	LineString,
	Polygon,
	MultiPoint,
	MultiLineString,
	MultiPolygon,
	GeometryCollection,
	CircularString,
	CompoundCurve,
	CurvePolygon,
	MultiCurve,
	MultiSurface,
	NoGeometry,
}

impl GeometryKind {
	pub const ALL: [GeometryKind; 14] = [
		GeometryKind::Unknown,
		GeometryKind::Point,
		GeometryKind::LineString,
		GeometryKind::Polygon,
		GeometryKind::MultiPoint,
		GeometryKind::MultiLineString,
		GeometryKind::MultiPolygon,
		GeometryKind::GeometryCollection,
		GeometryKind::CircularString,
		GeometryKind::CompoundCurve,
		GeometryKind::CurvePolygon,
		GeometryKind::MultiCurve,
		GeometryKind::MultiSurface,
		GeometryKind::NoGeometry,
	];

	/// The classic (2D) WKB code of this kind.
	#[must_use]
	pub fn code(self) -> u32 {
		use GeometryKind::*;
		match self {
			Unknown => 0,
			Point => 1,
			LineString => 2,
			Polygon => 3,
			MultiPoint => 4,
			MultiLineString => 5,
			MultiPolygon => 6,
			GeometryCollection => 7,
			CircularString => 8,
			CompoundCurve => 9,
			CurvePolygon => 10,
			MultiCurve => 11,
			MultiSurface => 12,
			NoGeometry => 100,
		}
	}

	#[must_use]
	pub fn from_code(code: u32) -> Option<GeometryKind> {
		GeometryKind::ALL.into_iter().find(|kind| kind.code() == code)
	}

	#[must_use]
	pub fn name(self) -> &'static str {
		use GeometryKind::*;
		match self {
			Unknown => "Unknown",
			Point => "Point",
			LineString => "LineString",
			Polygon => "Polygon",
			MultiPoint => "MultiPoint",
			MultiLineString => "MultiLineString",
			MultiPolygon => "MultiPolygon",
			GeometryCollection => "GeometryCollection",
			CircularString => "CircularString",
			CompoundCurve => "CompoundCurve",
			CurvePolygon => "CurvePolygon",
			MultiCurve => "MultiCurve",
			MultiSurface => "MultiSurface",
			NoGeometry => "NoGeometry",
		}
	}

	/// `true` for the kinds that exist only as placeholders and never carry vertices.
	#[must_use]
	pub fn is_placeholder(self) -> bool {
		matches!(self, GeometryKind::Unknown | GeometryKind::NoGeometry)
	}

	/// `true` for the kinds of the original simple-features set that have a legacy 2.5D encoding.
	#[must_use]
	pub fn has_25d_form(self) -> bool {
		(1..=6).contains(&self.code())
	}
}

impl Display for GeometryKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// Coarse category of a geometry kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryType {
	Point,
	Line,
	Polygon,
	Unknown,
	Null,
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn codes_round_trip() {
		for kind in GeometryKind::ALL {
			assert_eq!(GeometryKind::from_code(kind.code()), Some(kind));
		}
		assert_eq!(GeometryKind::from_code(13), None);
		assert_eq!(GeometryKind::from_code(1001), None);
	}

	#[rstest]
	#[case(GeometryKind::Point, true)]
	#[case(GeometryKind::MultiPolygon, true)]
	#[case(GeometryKind::GeometryCollection, false)]
	#[case(GeometryKind::CircularString, false)]
	#[case(GeometryKind::Unknown, false)]
	fn legacy_kinds(#[case] kind: GeometryKind, #[case] expected: bool) {
		assert_eq!(kind.has_25d_form(), expected);
	}

	#[test]
	fn display_uses_name() {
		assert_eq!(GeometryKind::CompoundCurve.to_string(), "CompoundCurve");
	}
}
