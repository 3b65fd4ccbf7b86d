pub mod convert;
pub mod edit;
pub mod probe;

use anyhow::{Context, Result};
use geomkit::read_geometry;
use geomkit_geometry::Geometry;

/// Reads the geometry given on the command line, or from stdin for `-`.
pub fn read_input(input: &str) -> Result<Geometry> {
	if input == "-" {
		let text = std::io::read_to_string(std::io::stdin()).context("could not read stdin")?;
		return read_geometry(&text);
	}
	read_geometry(input)
}
