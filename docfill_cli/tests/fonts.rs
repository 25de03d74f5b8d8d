use assert_cmd::Command;
use docfill_core::AnyEmptyResult;

#[test]
fn fonts_embeds_woff_as_data_uris() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir(tmp.path().join("fonts"))?;
	std::fs::write(tmp.path().join("fonts/main.woff"), b"woffbytes")?;

	let css = tmp.path().join("katex.min.css");
	std::fs::write(
		&css,
		"@font-face{src:url(fonts/main.woff) format(\"woff\"),url(fonts/main.woff2) \
		 format(\"woff2\"),url(fonts/main.ttf) format(\"truetype\");}\n",
	)?;
	let output = tmp.path().join("katex-embed-fonts.min.css");

	let mut cmd = Command::cargo_bin("docfill")?;
	cmd.env("NO_COLOR", "1")
		.arg("fonts")
		.arg(&css)
		.arg(&output)
		.assert()
		.success()
		.stdout(predicates::str::contains("Embedded 1 font(s)"));

	let embedded = std::fs::read_to_string(&output)?;
	assert!(embedded.contains("data:font/woff;charset=utf-8;base64,"));
	assert!(!embedded.contains("url(fonts/"));
	assert!(!embedded.contains("woff2"));
	assert!(!embedded.contains("truetype"));

	// The input stylesheet is left untouched.
	assert!(std::fs::read_to_string(&css)?.contains("url(fonts/main.woff)"));

	Ok(())
}

#[test]
fn fonts_missing_font_file_is_fatal() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let css = tmp.path().join("broken.css");
	std::fs::write(&css, "src:url(fonts/gone.woff) format(\"woff\");\n")?;

	let mut cmd = Command::cargo_bin("docfill")?;
	cmd.env("NO_COLOR", "1")
		.arg("fonts")
		.arg(&css)
		.arg(tmp.path().join("out.css"))
		.assert()
		.failure()
		.stderr(predicates::str::contains("font"));

	Ok(())
}
