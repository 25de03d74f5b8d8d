use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::Document;
use crate::DocfillResult;
use crate::marker::MarkerPair;

/// Opening delimiter of a description block.
pub const DESCRIPTION_START: &str = "{==";
/// Closing delimiter of a description block.
pub const DESCRIPTION_END: &str = "==}";

/// A table-row index entry: `[label](path) | ...` at the start of a line.
static INDEX_LINE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?m)^\[(.*?)\]\((.*?)\)\s*\|.*$").expect("index line pattern is valid")
});

/// The header of a paragraph index entry: `#### [label](path)`.
static PARAGRAPH_HEAD: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"####\s*\[(.*?)\]\((.*?)\)").expect("paragraph head pattern is valid")
});

/// A `[label](path)` reference captured from an index entry, pointing at the
/// file whose description block feeds the composed output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
	pub label: String,
	pub path: String,
}

/// A non-fatal problem encountered while composing index entries. Warnings
/// never abort the rebuild; the affected entry gets an empty description and
/// every other entry is still composed.
#[derive(Debug, Clone, Serialize)]
pub struct ComposeWarning {
	/// The referenced file that has no description block.
	pub file: PathBuf,
	/// The label of the index entry the warning belongs to.
	pub label: String,
}

/// Report for one index-population pass.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ComposeReport {
	/// Number of table-row entries composed.
	pub line_entries: usize,
	/// Number of paragraph entries composed.
	pub paragraph_entries: usize,
	/// Referenced files that were missing a description block.
	pub warnings: Vec<ComposeWarning>,
}

/// Extract the description block from the file a reference points at,
/// resolved relative to `base_dir` (the referring document's directory).
///
/// A missing description block is `Ok(None)` — a warning-level outcome. An
/// unreadable file is an error: broken references abort the run.
pub fn extract_description(base_dir: &Path, reference: &Reference) -> DocfillResult<Option<String>> {
	let doc = Document::read(base_dir.join(&reference.path))?;
	let pair = MarkerPair::new(DESCRIPTION_START, DESCRIPTION_END);

	Ok(pair
		.find_first(doc.content())
		.map(|region| region.inner_text(doc.content()).trim().to_string()))
}

/// Populate every index entry in `source` with the description extracted
/// from the file it links to. Line entries are rewritten first, then
/// paragraph entries; each pass is a single left-to-right scan that never
/// revisits content it has already rewritten.
pub fn populate_index_content(
	base_dir: &Path,
	source: &str,
) -> DocfillResult<(String, ComposeReport)> {
	let mut report = ComposeReport::default();
	let lines = rewrite_line_entries(base_dir, source, &mut report)?;
	let paragraphs = rewrite_paragraph_entries(base_dir, &lines, &mut report)?;

	Ok((paragraphs, report))
}

/// Look up a reference's description, downgrading a missing block to an
/// empty string plus a recorded warning.
fn description_or_warn(
	base_dir: &Path,
	reference: &Reference,
	report: &mut ComposeReport,
) -> DocfillResult<String> {
	match extract_description(base_dir, reference)? {
		Some(description) => Ok(description),
		None => {
			let file = base_dir.join(&reference.path);
			tracing::warn!("no description block in {}", file.display());
			report.warnings.push(ComposeWarning {
				file,
				label: reference.label.clone(),
			});
			Ok(String::new())
		}
	}
}

fn capture_reference(caps: &regex::Captures<'_>) -> Reference {
	Reference {
		label: caps.get(1).map_or("", |m| m.as_str()).to_string(),
		path: caps.get(2).map_or("", |m| m.as_str()).to_string(),
	}
}

/// Rewrite every `[label](path) | ...` row to carry the referenced file's
/// description after the pipe.
fn rewrite_line_entries(
	base_dir: &Path,
	source: &str,
	report: &mut ComposeReport,
) -> DocfillResult<String> {
	let mut out = String::with_capacity(source.len());
	let mut last = 0;

	for caps in INDEX_LINE.captures_iter(source) {
		let Some(whole) = caps.get(0) else {
			continue;
		};
		let reference = capture_reference(&caps);
		let description = description_or_warn(base_dir, &reference, report)?;

		out.push_str(&source[last..whole.start()]);
		out.push_str(&format!(
			"[{}]({}) | {description}",
			reference.label, reference.path
		));
		last = whole.end();
		report.line_entries += 1;
	}

	out.push_str(&source[last..]);
	Ok(out)
}

/// Rewrite every `#### [label](path)` entry to a header followed by the
/// referenced file's description. The entry's region extends from the header
/// to the next `#` (usually the next heading) or to document end; a `####`
/// preceded by another `#` is a deeper heading, not an entry.
fn rewrite_paragraph_entries(
	base_dir: &Path,
	source: &str,
	report: &mut ComposeReport,
) -> DocfillResult<String> {
	let mut out = String::with_capacity(source.len());
	let mut last = 0;

	for caps in PARAGRAPH_HEAD.captures_iter(source) {
		let Some(whole) = caps.get(0) else {
			continue;
		};
		// Skip matches inside a region an earlier entry already consumed.
		if whole.start() < last {
			continue;
		}
		if source[..whole.start()].ends_with('#') {
			continue;
		}

		let region_end = source[whole.end()..]
			.find('#')
			.map_or(source.len(), |offset| whole.end() + offset);
		let reference = capture_reference(&caps);
		let description = description_or_warn(base_dir, &reference, report)?;

		out.push_str(&source[last..whole.start()]);
		out.push_str(&format!(
			"#### [{}]({})\n\n{description}\n\n",
			reference.label, reference.path
		));
		last = region_end;
		report.paragraph_entries += 1;
	}

	out.push_str(&source[last..]);
	Ok(out)
}
