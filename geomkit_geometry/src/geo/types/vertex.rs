use std::fmt::Debug;

/// A single position with optional elevation (`z`) and measure (`m`).
///
/// Inside a geometry every vertex is conformed to the geometry's type: it carries `z` exactly when
/// the type has Z and `m` exactly when the type has M.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Vertex {
	pub x: f64,
	pub y: f64,
	pub z: Option<f64>,
	pub m: Option<f64>,
}

impl Vertex {
	#[must_use]
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y, z: None, m: None }
	}

	#[must_use]
	pub fn new_z(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z: Some(z), m: None }
	}

	#[must_use]
	pub fn new_m(x: f64, y: f64, m: f64) -> Self {
		Self { x, y, z: None, m: Some(m) }
	}

	#[must_use]
	pub fn new_zm(x: f64, y: f64, z: f64, m: f64) -> Self {
		Self {
			x,
			y,
			z: Some(z),
			m: Some(m),
		}
	}

	/// Returns a copy that carries exactly the requested ordinates.
	///
	/// Ordinates that are not wanted are dropped, missing ones are filled with `0.0`.
	#[must_use]
	pub fn conformed(&self, has_z: bool, has_m: bool) -> Self {
		Self {
			x: self.x,
			y: self.y,
			z: has_z.then(|| self.z.unwrap_or(0.0)),
			m: has_m.then(|| self.m.unwrap_or(0.0)),
		}
	}

	/// Returns `self` with the ordinates of `other` written over it.
	///
	/// `x` and `y` are always taken from `other`. `z` and `m` are only taken where both vertices
	/// carry them, so the result has the same shape as `self`.
	#[must_use]
	pub fn overwritten_by(&self, other: &Vertex) -> Self {
		Self {
			x: other.x,
			y: other.y,
			z: self.z.map(|z| other.z.unwrap_or(z)),
			m: self.m.map(|m| other.m.unwrap_or(m)),
		}
	}

	#[must_use]
	pub fn same_xy(&self, other: &Vertex) -> bool {
		self.x == other.x && self.y == other.y
	}

	/// Squared planar distance to `(x, y)`.
	#[must_use]
	pub fn distance_squared(&self, x: f64, y: f64) -> f64 {
		let dx = self.x - x;
		let dy = self.y - y;
		dx * dx + dy * dy
	}

	/// The ordinates in storage order: x, y, then z and m if present.
	#[must_use]
	pub fn ordinates(&self) -> Vec<f64> {
		let mut values = vec![self.x, self.y];
		values.extend(self.z);
		values.extend(self.m);
		values
	}
}

impl<T: Copy + Into<f64>> From<[T; 2]> for Vertex {
	fn from(value: [T; 2]) -> Self {
		Vertex::new(value[0].into(), value[1].into())
	}
}

impl<T: Copy + Into<f64>> From<&[T; 2]> for Vertex {
	fn from(value: &[T; 2]) -> Self {
		Vertex::from(*value)
	}
}

impl<T: Copy + Into<f64>> From<[T; 3]> for Vertex {
	fn from(value: [T; 3]) -> Self {
		Vertex::new_z(value[0].into(), value[1].into(), value[2].into())
	}
}

impl<T: Copy + Into<f64>> From<&[T; 3]> for Vertex {
	fn from(value: &[T; 3]) -> Self {
		Vertex::from(*value)
	}
}

impl<T: Copy + Into<f64>> From<[T; 4]> for Vertex {
	fn from(value: [T; 4]) -> Self {
		Vertex::new_zm(value[0].into(), value[1].into(), value[2].into(), value[3].into())
	}
}

impl<T: Copy + Into<f64>> From<&[T; 4]> for Vertex {
	fn from(value: &[T; 4]) -> Self {
		Vertex::from(*value)
	}
}

impl From<&Vertex> for Vertex {
	fn from(value: &Vertex) -> Self {
		*value
	}
}

impl Debug for Vertex {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut list = f.debug_list();
		list.entry(&self.x).entry(&self.y);
		if let Some(z) = self.z {
			list.entry(&format_args!("z={z}"));
		}
		if let Some(m) = self.m {
			list.entry(&format_args!("m={m}"));
		}
		list.finish()
	}
}
