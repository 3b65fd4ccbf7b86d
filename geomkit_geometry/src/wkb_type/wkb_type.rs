use super::{GeometryKind, GeometryType};
use std::fmt::{Debug, Display};

const CODE_25D: u32 = 0x8000_0000;

/// Which ordinates beyond x and y a vertex carries.
///
/// `Xyz25D` is the legacy form of `Xyz`. It carries the same ordinates but is encoded with the
/// high bit of the WKB code and can never be combined with a measure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dimensions {
	#[default]
	Xy,
	Xyz,
	Xym,
	Xyzm,
	Xyz25D,
}

impl Dimensions {
	#[must_use]
	pub fn from_flags(has_z: bool, has_m: bool) -> Dimensions {
		match (has_z, has_m) {
			(false, false) => Dimensions::Xy,
			(true, false) => Dimensions::Xyz,
			(false, true) => Dimensions::Xym,
			(true, true) => Dimensions::Xyzm,
		}
	}

	#[must_use]
	pub fn has_z(self) -> bool {
		matches!(self, Dimensions::Xyz | Dimensions::Xyzm | Dimensions::Xyz25D)
	}

	#[must_use]
	pub fn has_m(self) -> bool {
		matches!(self, Dimensions::Xym | Dimensions::Xyzm)
	}

	fn suffix(self) -> &'static str {
		match self {
			Dimensions::Xy => "",
			Dimensions::Xyz => "Z",
			Dimensions::Xym => "M",
			Dimensions::Xyzm => "ZM",
			Dimensions::Xyz25D => "25D",
		}
	}
}

/// A geometry kind combined with its dimension flags.
///
/// This is the single source of truth for how many ordinates each vertex of a geometry carries and
/// how it is laid out in WKB. All methods are pure. `Unknown` and `NoGeometry` never carry
/// dimension flags and are fixed points of every combinator.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WkbType {
	kind: GeometryKind,
	dims: Dimensions,
}

impl WkbType {
	pub const UNKNOWN: WkbType = WkbType {
		kind: GeometryKind::Unknown,
		dims: Dimensions::Xy,
	};
	pub const NO_GEOMETRY: WkbType = WkbType {
		kind: GeometryKind::NoGeometry,
		dims: Dimensions::Xy,
	};

	/// Creates a type from a kind and the Z/M flags.
	#[must_use]
	pub fn new(kind: GeometryKind, has_z: bool, has_m: bool) -> WkbType {
		WkbType::with_dimensions(kind, Dimensions::from_flags(has_z, has_m))
	}

	/// Creates a type from a kind and explicit dimensions.
	///
	/// Placeholder kinds drop their dimensions, and `Xyz25D` is only kept for kinds with a legacy
	/// encoding; other kinds fall back to plain `Xyz`.
	#[must_use]
	pub fn with_dimensions(kind: GeometryKind, dims: Dimensions) -> WkbType {
		let dims = if kind.is_placeholder() {
			Dimensions::Xy
		} else if dims == Dimensions::Xyz25D && !kind.has_25d_form() {
			Dimensions::Xyz
		} else {
			dims
		};
		WkbType { kind, dims }
	}

	#[must_use]
	pub fn kind(self) -> GeometryKind {
		self.kind
	}

	#[must_use]
	pub fn dimensions(self) -> Dimensions {
		self.dims
	}

	/// Same dimensions, different kind.
	#[must_use]
	pub fn with_kind(self, kind: GeometryKind) -> WkbType {
		WkbType::with_dimensions(kind, self.dims)
	}

	/// Strips all dimension flags.
	#[must_use]
	pub fn flat_type(self) -> WkbType {
		WkbType::from(self.kind)
	}

	/// The single-part partner of a multi kind, preserving dimensions.
	///
	/// `GeometryCollection` has no single partner and maps to `Unknown`.
	#[must_use]
	pub fn single_type(self) -> WkbType {
		use GeometryKind::*;
		let kind = match self.kind {
			MultiPoint => Point,
			MultiLineString => LineString,
			MultiPolygon => Polygon,
			MultiCurve => CompoundCurve,
			MultiSurface => CurvePolygon,
			GeometryCollection => Unknown,
			kind => kind,
		};
		self.with_kind(kind)
	}

	/// The multi-part container of a single kind, preserving dimensions.
	#[must_use]
	pub fn multi_type(self) -> WkbType {
		use GeometryKind::*;
		let kind = match self.kind {
			Point => MultiPoint,
			LineString => MultiLineString,
			Polygon => MultiPolygon,
			CircularString | CompoundCurve => MultiCurve,
			CurvePolygon => MultiSurface,
			kind => kind,
		};
		self.with_kind(kind)
	}

	#[must_use]
	pub fn geometry_type(self) -> GeometryType {
		use GeometryKind::*;
		match self.kind {
			Point | MultiPoint => GeometryType::Point,
			LineString | CircularString | CompoundCurve | MultiLineString | MultiCurve => GeometryType::Line,
			Polygon | CurvePolygon | MultiPolygon | MultiSurface => GeometryType::Polygon,
			GeometryCollection | Unknown => GeometryType::Unknown,
			NoGeometry => GeometryType::Null,
		}
	}

	/// Topological dimension: 0 for points, 1 for curves, 2 for surfaces. Collections and
	/// placeholders report 0.
	#[must_use]
	pub fn wkb_dimensions(self) -> u8 {
		match self.geometry_type() {
			GeometryType::Line => 1,
			GeometryType::Polygon => 2,
			GeometryType::Point | GeometryType::Unknown | GeometryType::Null => 0,
		}
	}

	/// Number of ordinates stored per vertex. Placeholder kinds carry no vertices and report 0.
	#[must_use]
	pub fn coord_dimensions(self) -> u8 {
		if self.kind.is_placeholder() {
			return 0;
		}
		2 + u8::from(self.has_z()) + u8::from(self.has_m())
	}

	#[must_use]
	pub fn is_multi_type(self) -> bool {
		use GeometryKind::*;
		matches!(
			self.kind,
			MultiPoint | MultiLineString | MultiPolygon | GeometryCollection | MultiCurve | MultiSurface
		)
	}

	#[must_use]
	pub fn is_single_type(self) -> bool {
		self.kind != GeometryKind::Unknown && !self.is_multi_type()
	}

	#[must_use]
	pub fn is_curved_type(self) -> bool {
		use GeometryKind::*;
		matches!(
			self.kind,
			CircularString | CompoundCurve | CurvePolygon | MultiCurve | MultiSurface
		)
	}

	#[must_use]
	pub fn has_z(self) -> bool {
		self.dims.has_z()
	}

	#[must_use]
	pub fn has_m(self) -> bool {
		self.dims.has_m()
	}

	#[must_use]
	pub fn is_25d(self) -> bool {
		self.dims == Dimensions::Xyz25D
	}

	/// Adds the Z flag. 25D types already carry Z and are returned unchanged.
	#[must_use]
	pub fn add_z(self) -> WkbType {
		let dims = match self.dims {
			Dimensions::Xy => Dimensions::Xyz,
			Dimensions::Xym => Dimensions::Xyzm,
			dims => dims,
		};
		WkbType::with_dimensions(self.kind, dims)
	}

	/// Adds the M flag. 25D types cannot carry M and are returned unchanged.
	#[must_use]
	pub fn add_m(self) -> WkbType {
		let dims = match self.dims {
			Dimensions::Xy => Dimensions::Xym,
			Dimensions::Xyz => Dimensions::Xyzm,
			dims => dims,
		};
		WkbType::with_dimensions(self.kind, dims)
	}

	#[must_use]
	pub fn drop_z(self) -> WkbType {
		let dims = match self.dims {
			Dimensions::Xyz | Dimensions::Xyz25D => Dimensions::Xy,
			Dimensions::Xyzm => Dimensions::Xym,
			dims => dims,
		};
		WkbType::with_dimensions(self.kind, dims)
	}

	#[must_use]
	pub fn drop_m(self) -> WkbType {
		let dims = match self.dims {
			Dimensions::Xym => Dimensions::Xy,
			Dimensions::Xyzm => Dimensions::Xyz,
			dims => dims,
		};
		WkbType::with_dimensions(self.kind, dims)
	}

	/// The flat type with exactly the requested flags. A 25D input yields the modern Z form.
	#[must_use]
	pub fn zm_type(self, has_z: bool, has_m: bool) -> WkbType {
		WkbType::new(self.kind, has_z, has_m)
	}

	/// Projects onto the legacy 2.5D form.
	///
	/// Kinds without a legacy encoding (curves, collections) yield `Unknown`; `NoGeometry` stays.
	#[must_use]
	pub fn to_25d(self) -> WkbType {
		if self.kind == GeometryKind::NoGeometry {
			return WkbType::NO_GEOMETRY;
		}
		if !self.kind.has_25d_form() {
			return WkbType::UNKNOWN;
		}
		WkbType::with_dimensions(self.kind, Dimensions::Xyz25D)
	}

	/// Canonical name, e.g. `"PolygonZM"` or `"Point25D"`.
	#[must_use]
	pub fn display_string(self) -> String {
		format!("{}{}", self.kind.name(), self.dims.suffix())
	}

	/// Keyword written in well-known text. 25D types are written as their Z form.
	#[must_use]
	pub fn wkt_keyword(self) -> String {
		let suffix = if self.is_25d() { "Z" } else { self.dims.suffix() };
		format!("{}{suffix}", self.kind.name())
	}

	/// Parses a type name.
	///
	/// Case and whitespace are ignored, so `"POINT Z M"` and `"pointzm"` both give `PointZM`.
	/// Anything from the first `(` on and a trailing `EMPTY` are ignored. Unrecognized text yields
	/// `Unknown`.
	#[must_use]
	pub fn parse(text: &str) -> WkbType {
		let head = text.split('(').next().unwrap_or_default();
		let mut name: String = head.chars().filter(|c| !c.is_whitespace()).collect();
		name.make_ascii_lowercase();
		if let Some(stripped) = name.strip_suffix("empty") {
			name = stripped.to_string();
		}

		for kind in GeometryKind::ALL {
			let Some(suffix) = name.strip_prefix(&kind.name().to_ascii_lowercase()) else {
				continue;
			};
			let dims = match suffix {
				"" => Dimensions::Xy,
				"z" => Dimensions::Xyz,
				"m" => Dimensions::Xym,
				"zm" => Dimensions::Xyzm,
				"25d" if kind.has_25d_form() => Dimensions::Xyz25D,
				_ => continue,
			};
			if kind.is_placeholder() && dims != Dimensions::Xy {
				continue;
			}
			return WkbType::with_dimensions(kind, dims);
		}
		WkbType::UNKNOWN
	}

	/// The integer type code used in WKB.
	#[must_use]
	pub fn code(self) -> u32 {
		let base = self.kind.code();
		match self.dims {
			Dimensions::Xy => base,
			Dimensions::Xyz => base + 1000,
			Dimensions::Xym => base + 2000,
			Dimensions::Xyzm => base + 3000,
			Dimensions::Xyz25D => CODE_25D | base,
		}
	}

	/// Decodes a WKB integer type code.
	///
	/// Returns `None` for unknown kinds, for the 25D flag on kinds without a legacy form and for
	/// any other flag bits (such as EWKB SRID flags).
	#[must_use]
	pub fn from_code(code: u32) -> Option<WkbType> {
		if code & CODE_25D != 0 {
			let kind = GeometryKind::from_code(code & !CODE_25D)?;
			return kind
				.has_25d_form()
				.then(|| WkbType::with_dimensions(kind, Dimensions::Xyz25D));
		}

		let dims = match code / 1000 {
			0 => Dimensions::Xy,
			1 => Dimensions::Xyz,
			2 => Dimensions::Xym,
			3 => Dimensions::Xyzm,
			_ => return None,
		};
		let kind = GeometryKind::from_code(code % 1000)?;
		if kind.is_placeholder() && dims != Dimensions::Xy {
			return None;
		}
		Some(WkbType { kind, dims })
	}
}

impl From<GeometryKind> for WkbType {
	fn from(kind: GeometryKind) -> Self {
		WkbType {
			kind,
			dims: Dimensions::Xy,
		}
	}
}

impl Display for WkbType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.display_string())
	}
}

impl Debug for WkbType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.display_string())
	}
}
