mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	verbose: Verbosity<ErrorLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Convert a geometry between WKT and hex encoded WKB
	Convert(tools::convert::Subcommand),

	/// Show information about a geometry
	Probe(tools::probe::Subcommand),

	/// Apply an edit to a geometry and print the result as WKT
	Edit(tools::edit::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	match &cli.command {
		Commands::Convert(arguments) => tools::convert::run(arguments),
		Commands::Probe(arguments) => tools::probe::run(arguments),
		Commands::Edit(arguments) => tools::edit::run(arguments),
	}
}

#[cfg(test)]
mod tests {
	use crate::{Cli, run};
	use anyhow::Result;
	use clap::Parser;

	pub fn run_command(arg_vec: Vec<&str>) -> Result<String> {
		let cli = Cli::try_parse_from(arg_vec)?;
		let msg = format!("{cli:?}");
		run(cli)?;
		Ok(msg)
	}

	#[test]
	fn help() {
		let err = run_command(vec!["geomkit"]).unwrap_err().to_string();
		assert!(err.starts_with("A toolbox for reading, writing and editing vector geometries in WKT and WKB."));
		assert!(err.contains("\nUsage: geomkit [OPTIONS] <COMMAND>"));
	}

	#[test]
	fn version() {
		let err = run_command(vec!["geomkit", "-V"]).unwrap_err().to_string();
		assert!(err.starts_with("geomkit "));
	}

	#[test]
	fn subcommands() {
		let output = run_command(vec!["geomkit", "convert"]).unwrap_err().to_string();
		assert!(output.starts_with("Convert a geometry between WKT and hex encoded WKB"));
		let output = run_command(vec!["geomkit", "probe"]).unwrap_err().to_string();
		assert!(output.starts_with("Show information about a geometry"));
		let output = run_command(vec!["geomkit", "edit"]).unwrap_err().to_string();
		assert!(output.starts_with("Apply an edit to a geometry"));
	}
}
