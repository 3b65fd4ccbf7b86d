#![allow(unused)]

use assert_cmd::{Command, cargo};

#[cfg(windows)]
pub const BINARY_NAME: &str = "geomkit.exe";
#[cfg(not(windows))]
pub const BINARY_NAME: &str = "geomkit";

/// Helper to create a Command for the geomkit binary.
pub fn geomkit_cmd() -> Command {
	Command::new(cargo::cargo_bin!())
}

/// Runs geomkit with `args`, asserts success and returns stdout.
pub fn geomkit_stdout(args: &[&str]) -> String {
	let output = geomkit_cmd().args(args).assert().success().get_output().stdout.clone();
	String::from_utf8(output).unwrap()
}
