use super::read_input;
use anyhow::Result;
use clap::{Args, ValueEnum};
use geomkit_geometry::{Endianness, Geometry, WkbOptions, WktOptions};
use log::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
	Wkt,
	Wkb,
}

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// geometry as WKT or hex encoded WKB, "-" reads it from stdin
	#[arg(required = true)]
	input: String,

	/// output format, by default the other one
	#[arg(long, value_enum)]
	to: Option<Format>,

	/// write WKB in big endian byte order
	#[arg(long)]
	big_endian: bool,

	/// number of decimals in WKT output
	#[arg(long, value_name = "N")]
	precision: Option<usize>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	println!("{}", convert(arguments)?);
	Ok(())
}

fn convert(arguments: &Subcommand) -> Result<String> {
	let geometry = read_input(&arguments.input)?;
	let format = arguments.to.unwrap_or(match geomkit::Encoding::detect(&arguments.input) {
		geomkit::Encoding::Wkt => Format::Wkb,
		geomkit::Encoding::WkbHex => Format::Wkt,
	});
	info!("convert {} to {format:?}", geometry.wkb_type());
	write(&geometry, format, arguments)
}

fn write(geometry: &Geometry, format: Format, arguments: &Subcommand) -> Result<String> {
	match format {
		Format::Wkt => geometry.to_wkt_with(&WktOptions {
			precision: arguments.precision,
		}),
		Format::Wkb => geometry.to_wkb_hex(&WkbOptions {
			byte_order: if arguments.big_endian {
				Endianness::BigEndian
			} else {
				Endianness::LittleEndian
			},
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::run_command;
	use pretty_assertions::assert_eq;

	fn subcommand(input: &str, to: Option<Format>, big_endian: bool, precision: Option<usize>) -> Subcommand {
		Subcommand {
			input: input.to_string(),
			to,
			big_endian,
			precision,
		}
	}

	#[test]
	fn wkt_to_wkb_by_default() -> Result<()> {
		assert_eq!(
			convert(&subcommand("POINT (1 2)", None, false, None))?,
			"0101000000000000000000f03f0000000000000040"
		);
		assert_eq!(
			convert(&subcommand("POINT (1 2)", None, true, None))?,
			"00000000013ff00000000000004000000000000000"
		);
		Ok(())
	}

	#[test]
	fn wkb_to_wkt_by_default() -> Result<()> {
		assert_eq!(
			convert(&subcommand("0101000000000000000000f03f0000000000000040", None, false, None))?,
			"Point (1 2)"
		);
		Ok(())
	}

	#[test]
	fn wkt_with_precision() -> Result<()> {
		assert_eq!(
			convert(&subcommand(
				"LINESTRING (0.123456 1, 2 3.98765)",
				Some(Format::Wkt),
				false,
				Some(2)
			))?,
			"LineString (0.12 1, 2 3.99)"
		);
		Ok(())
	}

	#[test]
	fn invalid_input_fails() {
		assert!(convert(&subcommand("POINT (1", None, false, None)).is_err());
	}

	#[test]
	fn command() {
		run_command(vec!["geomkit", "convert", "-q", "POINT (1 2)"]).unwrap();
		run_command(vec!["geomkit", "convert", "--to", "wkt", "--precision", "1", "POINT (1.25 2)"]).unwrap();
		assert!(run_command(vec!["geomkit", "convert", "--to", "svg", "POINT (1 2)"]).is_err());
	}
}
