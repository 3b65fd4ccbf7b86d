use crate::Geometry;
use log::trace;

impl Geometry {
	/// Shifts every vertex by the given offsets. `dz` and `dm` only apply where the geometry has
	/// the ordinate.
	pub fn translate(&mut self, dx: f64, dy: f64, dz: f64, dm: f64) {
		trace!("translate {} by ({dx}, {dy}, {dz}, {dm})", self.wkb_type());
		self.for_each_vertex_mut(&mut |vertex| {
			vertex.x += dx;
			vertex.y += dy;
			if let Some(z) = vertex.z.as_mut() {
				*z += dz;
			}
			if let Some(m) = vertex.m.as_mut() {
				*m += dm;
			}
		});
	}
}
