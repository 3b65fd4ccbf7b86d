mod test_utilities;
use predicates::str;
use pretty_assertions::assert_eq;
use test_utilities::*;

#[test]
fn wkt_to_wkb() {
	assert_eq!(
		geomkit_stdout(&["convert", "POINT (1 2)"]),
		"0101000000000000000000f03f0000000000000040\n"
	);
	assert_eq!(
		geomkit_stdout(&["convert", "--big-endian", "POINT (1 2)"]),
		"00000000013ff00000000000004000000000000000\n"
	);
}

#[test]
fn wkb_to_wkt() {
	assert_eq!(
		geomkit_stdout(&["convert", "0101000000000000000000f03f0000000000000040"]),
		"Point (1 2)\n"
	);
}

#[test]
fn normalize_wkt() {
	assert_eq!(
		geomkit_stdout(&[
			"convert",
			"--to",
			"wkt",
			"--precision",
			"1",
			"linestring z (0.04 0 1, 1.96 1 2)"
		]),
		"LineStringZ (0 0 1, 2 1 2)\n"
	);
}

#[test]
fn stdin() {
	geomkit_cmd()
		.args(["convert", "--to", "wkt", "-"])
		.write_stdin("MULTIPOINT (1 2, 3 4)\n")
		.assert()
		.success()
		.stdout("MultiPoint ((1 2),(3 4))\n");
}

#[test]
fn malformed_input() {
	geomkit_cmd()
		.args(["convert", "LINESTRING (0 0, 1)"])
		.assert()
		.failure()
		.stdout(str::is_empty())
		.stderr(str::contains("position"));
}
