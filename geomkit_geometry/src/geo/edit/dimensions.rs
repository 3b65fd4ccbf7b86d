use crate::{Geometry, GeometryError, Vertex};
use anyhow::{Result, ensure};
use log::debug;

impl Geometry {
	/// Adds Z to the type and sets the Z of every vertex to `z`.
	pub fn add_z_value(&mut self, z: f64) -> Result<()> {
		self.check_typed("Z")?;
		ensure!(
			!self.has_z(),
			GeometryError::invalid(format!("{} already has Z values", self.wkb_type()))
		);
		let target = self.wkb_type().add_z();
		debug!("add z={z} to {}", self.wkb_type());
		self.transact(|g| {
			g.set_dimensions(target.dimensions());
			g.for_each_vertex_mut(&mut |vertex| vertex.z = Some(z));
			Ok(())
		})
	}

	/// Adds M to the type and sets the M of every vertex to `m`. Legacy 25D types cannot carry M.
	pub fn add_m_value(&mut self, m: f64) -> Result<()> {
		self.check_typed("M")?;
		ensure!(
			!self.has_m(),
			GeometryError::invalid(format!("{} already has M values", self.wkb_type()))
		);
		ensure!(
			!self.wkb_type().is_25d(),
			GeometryError::invalid(format!("{} cannot carry M values", self.wkb_type()))
		);
		let target = self.wkb_type().add_m();
		debug!("add m={m} to {}", self.wkb_type());
		self.transact(|g| {
			g.set_dimensions(target.dimensions());
			g.for_each_vertex_mut(&mut |vertex| vertex.m = Some(m));
			Ok(())
		})
	}

	/// Removes Z from the type and from every vertex.
	pub fn drop_z_value(&mut self) -> Result<()> {
		ensure!(
			self.has_z(),
			GeometryError::invalid(format!("{} has no Z values", self.wkb_type()))
		);
		let target = self.wkb_type().drop_z();
		self.transact(|g| {
			g.set_dimensions(target.dimensions());
			Ok(())
		})
	}

	/// Removes M from the type and from every vertex.
	pub fn drop_m_value(&mut self) -> Result<()> {
		ensure!(
			self.has_m(),
			GeometryError::invalid(format!("{} has no M values", self.wkb_type()))
		);
		let target = self.wkb_type().drop_m();
		self.transact(|g| {
			g.set_dimensions(target.dimensions());
			Ok(())
		})
	}

	fn check_typed(&self, ordinate: &str) -> Result<()> {
		ensure!(
			!self.kind().is_placeholder(),
			GeometryError::invalid(format!("cannot add {ordinate} values to a {} geometry", self.kind()))
		);
		Ok(())
	}

	/// Applies `f` to every stored vertex, including nested members.
	pub(crate) fn for_each_vertex_mut(&mut self, f: &mut dyn FnMut(&mut Vertex)) {
		for part in self.parts_mut() {
			part.for_each_vertex_mut(f);
		}
	}
}
