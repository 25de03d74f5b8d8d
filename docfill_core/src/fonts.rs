use std::path::Path;
use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use regex::Regex;

use crate::DocfillError;
use crate::DocfillResult;

/// A `url(fonts/*.woff2|ttf) format("...")` source entry, with the comma
/// that glues it to its neighbors.
static ALTERNATE_SOURCE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#",?url\(fonts/[\w\-]+\.(?:woff2|ttf)\) format\("\w*"\),?"#)
		.expect("alternate source pattern is valid")
});

/// A relative woff font path inside a `url(...)` source entry.
static WOFF_PATH: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"fonts/[\w\-]+\.woff").expect("woff path pattern is valid")
});

/// Drop woff2 and ttf source entries from font-face rules, keeping only the
/// woff urls. Must run before [`inline_woff_sources`] so the woff path
/// pattern only ever sees plain `.woff` entries.
pub fn strip_alternate_sources(css: &str) -> String {
	ALTERNATE_SOURCE.replace_all(css, "").into_owned()
}

/// Replace each `fonts/*.woff` path with a base64 data URI of the font
/// file's bytes, resolved relative to `base_dir` (the stylesheet's
/// directory). Returns the rewritten css and the number of fonts embedded.
///
/// A missing or unreadable font file aborts the run: an embedded stylesheet
/// with a dangling font reference is not a useful artifact.
pub fn inline_woff_sources(base_dir: &Path, css: &str) -> DocfillResult<(String, usize)> {
	let mut out = String::with_capacity(css.len());
	let mut last = 0;
	let mut embedded = 0;

	for found in WOFF_PATH.find_iter(css) {
		let font_path = base_dir.join(found.as_str());
		let bytes = std::fs::read(&font_path).map_err(|e| {
			DocfillError::FontFile {
				path: font_path.display().to_string(),
				reason: e.to_string(),
			}
		})?;

		out.push_str(&css[last..found.start()]);
		out.push_str("data:font/woff;charset=utf-8;base64,");
		out.push_str(&BASE64.encode(bytes));
		last = found.end();
		embedded += 1;
	}

	out.push_str(&css[last..]);
	Ok((out, embedded))
}
