use super::read_input;
use anyhow::Result;
use clap::Args;
use geomkit_geometry::{Geometry, GeometryType};

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// geometry as WKT or hex encoded WKB, "-" reads it from stdin
	#[arg(required = true)]
	input: String,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let geometry = read_input(&arguments.input)?;
	print!("{}", describe(&geometry));
	Ok(())
}

fn describe(geometry: &Geometry) -> String {
	let wkb_type = geometry.wkb_type();
	let category = match wkb_type.geometry_type() {
		GeometryType::Point => "point",
		GeometryType::Line => "line",
		GeometryType::Polygon => "polygon",
		GeometryType::Unknown => "unknown",
		GeometryType::Null => "null",
	};
	let bbox = match geometry.bounding_box() {
		Some([x_min, y_min, x_max, y_max]) => format!("{x_min} {y_min} {x_max} {y_max}"),
		None => String::from("none"),
	};

	let mut text = String::new();
	text.push_str(&format!("type: {wkb_type}\n"));
	text.push_str(&format!("flat type: {}\n", wkb_type.flat_type()));
	text.push_str(&format!("category: {category}\n"));
	text.push_str(&format!(
		"single: {}, multi: {}, curved: {}\n",
		wkb_type.is_single_type(),
		wkb_type.is_multi_type(),
		wkb_type.is_curved_type()
	));
	text.push_str(&format!("coordinate dimensions: {}\n", wkb_type.coord_dimensions()));
	text.push_str(&format!("parts: {}\n", geometry.num_parts()));
	text.push_str(&format!("vertices: {}\n", geometry.vertex_count()));
	text.push_str(&format!("area: {}\n", geometry.area()));
	text.push_str(&format!("bounding box: {bbox}\n"));
	text
}
