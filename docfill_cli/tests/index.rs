use assert_cmd::Command;
use docfill_core::AnyEmptyResult;

#[test]
fn index_populates_line_entries() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("foo.md"), "{== some text ==}\n")?;
	let index = tmp.path().join("index.md");
	std::fs::write(&index, "# Index\n\n[Foo](foo.md) | \n")?;

	let mut cmd = Command::cargo_bin("docfill")?;
	cmd.env("NO_COLOR", "1")
		.arg("index")
		.arg(&index)
		.assert()
		.success()
		.stdout(predicates::str::contains("Populated 1 entry(s)"));

	let content = std::fs::read_to_string(&index)?;
	assert_eq!(content, "# Index\n\n[Foo](foo.md) | some text\n");

	Ok(())
}

#[test]
fn index_populates_paragraph_entries() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("bar.md"), "{== bar description ==}\n")?;
	let index = tmp.path().join("index.md");
	std::fs::write(&index, "#### [Bar](bar.md)\nstale\n\n# Next section\n")?;

	let mut cmd = Command::cargo_bin("docfill")?;
	cmd.env("NO_COLOR", "1")
		.arg("index")
		.arg(&index)
		.assert()
		.success();

	let content = std::fs::read_to_string(&index)?;
	assert_eq!(
		content,
		"#### [Bar](bar.md)\n\nbar description\n\n# Next section\n"
	);

	Ok(())
}

#[test]
fn index_missing_description_warns_but_succeeds() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("foo.md"), "no description block\n")?;
	let index = tmp.path().join("index.md");
	std::fs::write(&index, "[Foo](foo.md) | old\n")?;

	let mut cmd = Command::cargo_bin("docfill")?;
	cmd.env("NO_COLOR", "1")
		.arg("index")
		.arg(&index)
		.assert()
		.success()
		.stderr(predicates::str::contains("warning:"))
		.stderr(predicates::str::contains("no description block"));

	let content = std::fs::read_to_string(&index)?;
	assert_eq!(content, "[Foo](foo.md) | \n");

	Ok(())
}

#[test]
fn index_dry_run_does_not_write() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("foo.md"), "{== fresh ==}\n")?;
	let index = tmp.path().join("index.md");
	let original = "[Foo](foo.md) | stale\n";
	std::fs::write(&index, original)?;

	let mut cmd = Command::cargo_bin("docfill")?;
	cmd.env("NO_COLOR", "1")
		.arg("index")
		.arg("--dry-run")
		.arg(&index)
		.assert()
		.success()
		.stdout(predicates::str::contains("Dry run"));

	let content = std::fs::read_to_string(&index)?;
	assert_eq!(content, original);

	Ok(())
}

#[test]
fn index_json_format_reports_entries() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("foo.md"), "{== described ==}\n")?;
	let index = tmp.path().join("index.md");
	std::fs::write(&index, "[Foo](foo.md) | \n")?;

	let mut cmd = Command::cargo_bin("docfill")?;
	cmd.env("NO_COLOR", "1")
		.arg("index")
		.arg("--format")
		.arg("json")
		.arg(&index)
		.assert()
		.success()
		.stdout(predicates::str::contains("\"line_entries\":1"))
		.stdout(predicates::str::contains("\"changed\":true"));

	Ok(())
}

#[test]
fn index_missing_referenced_file_is_fatal() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let index = tmp.path().join("index.md");
	std::fs::write(&index, "[Gone](gone.md) | \n")?;

	let mut cmd = Command::cargo_bin("docfill")?;
	cmd.env("NO_COLOR", "1")
		.arg("index")
		.arg(&index)
		.assert()
		.failure()
		.stderr(predicates::str::contains("failed to access"));

	Ok(())
}
