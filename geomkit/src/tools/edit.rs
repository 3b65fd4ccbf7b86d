use super::read_input;
use anyhow::{Context, Result};
use clap::Args;
use geomkit_geometry::{Geometry, Vertex, WktOptions};
use log::info;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// geometry as WKT or hex encoded WKB, "-" reads it from stdin
	#[arg(required = true)]
	input: String,

	#[command(subcommand)]
	operation: Operation,

	/// number of decimals in the WKT output
	#[arg(long, value_name = "N")]
	precision: Option<usize>,
}

#[derive(clap::Subcommand, Debug)]
enum Operation {
	/// Insert a vertex before the vertex with the given number
	InsertVertex(VertexArgs),

	/// Move the vertex with the given number
	MoveVertex(VertexArgs),

	/// Delete the vertex with the given number
	DeleteVertex {
		/// vertex number, counted over all parts and rings
		#[arg(long)]
		at: usize,
	},

	/// Add a Z ordinate with the given value to every vertex
	AddZ {
		#[arg(allow_negative_numbers = true)]
		value: f64,
	},

	/// Add an M ordinate with the given value to every vertex
	AddM {
		#[arg(allow_negative_numbers = true)]
		value: f64,
	},

	/// Remove all holes of polygons, or only those smaller than --min-area
	RemoveInteriorRings {
		#[arg(long)]
		min_area: Option<f64>,
	},

	/// Shift every vertex by the given offsets
	Translate {
		#[arg(allow_negative_numbers = true)]
		dx: f64,
		#[arg(allow_negative_numbers = true)]
		dy: f64,
		#[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
		dz: f64,
		#[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
		dm: f64,
	},
}

#[derive(Args, Debug)]
#[command(allow_negative_numbers = true)]
struct VertexArgs {
	x: f64,
	y: f64,
	z: Option<f64>,
	m: Option<f64>,

	/// vertex number, counted over all parts and rings
	#[arg(long)]
	at: usize,
}

impl VertexArgs {
	fn vertex(&self) -> Vertex {
		Vertex {
			x: self.x,
			y: self.y,
			z: self.z,
			m: self.m,
		}
	}
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	println!("{}", edit(arguments)?);
	Ok(())
}

fn edit(arguments: &Subcommand) -> Result<String> {
	let mut geometry = read_input(&arguments.input)?;
	info!("{:?} on {}", arguments.operation, geometry.wkb_type());
	apply(&mut geometry, &arguments.operation).context("while editing the geometry")?;
	geometry.to_wkt_with(&WktOptions {
		precision: arguments.precision,
	})
}

fn apply(geometry: &mut Geometry, operation: &Operation) -> Result<()> {
	match operation {
		Operation::InsertVertex(args) => geometry.insert_vertex(args.vertex(), args.at),
		Operation::MoveVertex(args) => geometry.move_vertex(args.vertex(), args.at),
		Operation::DeleteVertex { at } => geometry.delete_vertex(*at),
		Operation::AddZ { value } => geometry.add_z_value(*value),
		Operation::AddM { value } => geometry.add_m_value(*value),
		Operation::RemoveInteriorRings { min_area } => {
			geometry.remove_interior_rings(*min_area);
			Ok(())
		}
		Operation::Translate { dx, dy, dz, dm } => {
			geometry.translate(*dx, *dy, *dz, *dm);
			Ok(())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::run_command;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	fn vertex_args(x: f64, y: f64, at: usize) -> VertexArgs {
		VertexArgs {
			x,
			y,
			z: None,
			m: None,
			at,
		}
	}

	fn edited(text: &str, operation: Operation) -> Result<String> {
		let mut geometry = Geometry::from_wkt(text)?;
		apply(&mut geometry, &operation)?;
		geometry.to_wkt()
	}

	#[rstest]
	#[case(Operation::InsertVertex(vertex_args(5.0, 5.0, 1)), "LineString (0 0, 5 5, 10 0)")]
	#[case(Operation::InsertVertex(vertex_args(5.0, 5.0, 2)), "LineString (0 0, 10 0, 5 5)")]
	#[case(Operation::MoveVertex(vertex_args(-1.0, 2.0, 0)), "LineString (-1 2, 10 0)")]
	#[case(Operation::AddZ { value: 7.0 }, "LineStringZ (0 0 7, 10 0 7)")]
	#[case(Operation::AddM { value: -1.0 }, "LineStringM (0 0 -1, 10 0 -1)")]
	#[case(Operation::Translate { dx: 1.0, dy: -1.0, dz: 0.0, dm: 0.0 }, "LineString (1 -1, 11 -1)")]
	fn line_string(#[case] operation: Operation, #[case] expected: &str) -> Result<()> {
		assert_eq!(edited("LINESTRING (0 0, 10 0)", operation)?, expected);
		Ok(())
	}

	#[test]
	fn polygon() -> Result<()> {
		let square = "POLYGON ((0 0, 9 0, 9 9, 0 9, 0 0),(1 1, 2 1, 2 2, 1 1))";
		assert_eq!(
			edited(square, Operation::RemoveInteriorRings { min_area: None })?,
			"Polygon ((0 0, 9 0, 9 9, 0 9, 0 0))"
		);
		assert_eq!(
			edited(square, Operation::DeleteVertex { at: 0 })?,
			"Polygon ((9 0, 9 9, 0 9, 9 0),(1 1, 2 1, 2 2, 1 1))"
		);
		Ok(())
	}

	#[test]
	fn out_of_range_fails() {
		assert!(edited("POINT (1 2)", Operation::DeleteVertex { at: 3 }).is_err());
		assert!(edited("POINTZ (1 2 3)", Operation::AddZ { value: 1.0 }).is_err());
	}

	#[test]
	fn command() {
		run_command(vec!["geomkit", "edit", "LINESTRING (0 0, 1 1)", "insert-vertex", "5", "-5", "--at", "1"]).unwrap();
		run_command(vec!["geomkit", "edit", "POINT (0 0)", "add-m", "-3"]).unwrap();
		run_command(vec!["geomkit", "edit", "--precision", "2", "POINT (0 0)", "translate", "0.125", "1"]).unwrap();
		assert!(run_command(vec!["geomkit", "edit", "POINT (0 0)", "delete-vertex", "--at", "1"]).is_err());
	}
}
