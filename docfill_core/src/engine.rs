use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::DocfillError;
use crate::DocfillResult;
use crate::compose::ComposeReport;
use crate::compose::populate_index_content;
use crate::config::DocfillConfig;
use crate::document::Document;
use crate::fonts;
use crate::rewrite;
use crate::substitute::Substitution;
use crate::variant::VariantOutcome;
use crate::variant::VariantPlan;
use crate::variant::emit_variants;
use crate::variant::plan_variants;

/// Separator line marking the end of a previously inserted help block.
pub const HELP_SEPARATOR: &str = "% --8<--";

/// Front-matter anchor for heading insertion: a `title:` entry, the `---`
/// sentinel, and the opening of the description block. Once the heading is
/// inserted between the sentinel and the block, the anchor no longer
/// matches, so re-running is a no-op.
static HEADING_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"title:\s*([A-Za-z.]+)\s*---\s*\{==").expect("heading anchor pattern is valid")
});

const HEADING_TEMPLATE: &str = "title: ${1}\n---\n\n# `${1}`\n\n{==";

/// A comment-prefixed front-matter block at the start of help text.
static HELP_FRONT_MATTER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?s)\A% ---.*?% ---\s*").expect("front matter pattern is valid")
});

/// A computed update for one target file: the original buffer and the
/// rewritten buffer, not yet written to disk. Computing and writing are
/// separate steps so callers can diff or dry-run before committing.
#[derive(Debug, Clone)]
pub struct FileUpdate {
	pub file: PathBuf,
	pub original: String,
	pub updated: String,
}

impl FileUpdate {
	pub fn changed(&self) -> bool {
		self.original != self.updated
	}

	/// Write the updated buffer to the target path.
	pub fn write(&self) -> DocfillResult<()> {
		std::fs::write(&self.file, &self.updated).map_err(|source| {
			DocfillError::File {
				path: self.file.display().to_string(),
				source,
			}
		})
	}

	/// Write only when the buffer actually changed.
	pub fn write_if_changed(&self) -> DocfillResult<bool> {
		if !self.changed() {
			return Ok(false);
		}

		self.write()?;
		Ok(true)
	}
}

/// Outcome of a one-time insertion transform on a single file.
#[derive(Debug, Clone)]
pub struct InsertUpdate {
	pub update: FileUpdate,
	/// False when the anchor was absent and the file was left untouched.
	pub applied: bool,
}

/// Outcome of an index-population pass on a single index file.
#[derive(Debug, Clone)]
pub struct IndexUpdate {
	pub update: FileUpdate,
	pub report: ComposeReport,
}

/// Outcome of the assets pass: the rewritten template plus the planned
/// variant outputs derived from it.
#[derive(Debug, Clone)]
pub struct AssetsUpdate {
	pub update: FileUpdate,
	/// Number of build blocks that were found and replaced.
	pub rules_applied: usize,
	pub variants: Vec<VariantPlan>,
}

impl AssetsUpdate {
	/// Write the base template in place, then emit every variant. The base
	/// write is fatal on failure; variant writes are isolated from each
	/// other and reported per variant.
	pub fn write_all(&self) -> DocfillResult<Vec<VariantOutcome>> {
		self.update.write()?;
		Ok(emit_variants(&self.variants))
	}
}

/// Outcome of the font-embedding pass.
#[derive(Debug, Clone)]
pub struct FontUpdate {
	pub update: FileUpdate,
	/// Number of font files inlined as data URIs.
	pub embedded: usize,
}

fn file_update(doc: &Document, updated: String) -> FileUpdate {
	FileUpdate {
		file: doc.path().to_path_buf(),
		original: doc.content().to_string(),
		updated,
	}
}

/// Insert a generated H1 heading between a file's front-matter sentinel and
/// its description block. Fires at most once per file; a file without the
/// anchor (typically one that already carries its heading) is skipped.
pub fn compute_heading(path: &Path) -> DocfillResult<InsertUpdate> {
	let doc = Document::read(path)?;
	let rewrite = rewrite::insert_at_anchor(doc.content(), &HEADING_ANCHOR, HEADING_TEMPLATE);
	tracing::debug!(file = %path.display(), applied = rewrite.applied, "heading pass");

	Ok(InsertUpdate {
		update: file_update(&doc, rewrite.content),
		applied: rewrite.applied,
	})
}

/// Inject help text from `source` into `target` as a comment block. Any
/// previously inserted help (everything through the separator line) is
/// stripped first, so re-running converges after one pass.
pub fn compute_help(target: &Path, source: &Path) -> DocfillResult<FileUpdate> {
	let doc = Document::read(target)?;
	let help_doc = Document::read(source)?;
	let help = comment_help_text(help_doc.content());
	let stripped = rewrite::strip_through_separator(doc.content(), HELP_SEPARATOR);
	tracing::debug!(
		file = %target.display(),
		replaced_existing = stripped.applied,
		"help pass"
	);

	let mut content =
		String::with_capacity(help.len() + stripped.content.len() + HELP_SEPARATOR.len() + 16);
	content.push_str("%{\n");
	content.push_str(&help);
	content.push_str("%}\n");
	content.push_str(HELP_SEPARATOR);
	content.push_str("\n\n\n");
	content.push_str(&stripped.content);

	Ok(file_update(&doc, content))
}

/// Prefix every help line with `% ` and drop the front-matter block the
/// prefix pass turns into `% ---` fences.
fn comment_help_text(source: &str) -> String {
	let mut prefixed = String::with_capacity(source.len() + source.lines().count() * 2);

	for line in source.lines() {
		prefixed.push_str("% ");
		prefixed.push_str(line);
		prefixed.push('\n');
	}

	HELP_FRONT_MATTER.replace(&prefixed, "").into_owned()
}

/// Populate an index file's entries with descriptions extracted from the
/// files they link to. Reference paths resolve relative to the index file's
/// directory.
pub fn compute_index(path: &Path) -> DocfillResult<IndexUpdate> {
	let doc = Document::read(path)?;
	let (content, report) = populate_index_content(doc.dir(), doc.content())?;
	tracing::debug!(
		file = %path.display(),
		line_entries = report.line_entries,
		paragraph_entries = report.paragraph_entries,
		warnings = report.warnings.len(),
		"index pass"
	);

	Ok(IndexUpdate {
		update: file_update(&doc, content),
		report,
	})
}

/// Replace every configured build block in the template with its asset tag
/// and plan the variant outputs. A rule whose block is absent from the
/// template simply does not fire.
pub fn compute_assets(path: &Path, config: &DocfillConfig) -> DocfillResult<AssetsUpdate> {
	let doc = Document::read(path)?;
	let mut content = doc.content().to_string();
	let mut rules_applied = 0;

	for rule in &config.assets {
		if let Some(region) = rule.marker_pair().find_first(&content) {
			content = rewrite::replace_region(&content, &region, &rule.tag);
			rules_applied += 1;
		}
	}

	let variants = plan_variants(path, &content, &config.variants);
	tracing::debug!(file = %path.display(), rules_applied, "assets pass");

	Ok(AssetsUpdate {
		update: file_update(&doc, content),
		rules_applied,
		variants,
	})
}

/// Replace every occurrence of the version token with the supplied version
/// string.
pub fn compute_version(path: &Path, version: &str, token: &str) -> DocfillResult<FileUpdate> {
	let doc = Document::read(path)?;
	let content = Substitution::new(token, version).apply(doc.content());

	Ok(file_update(&doc, content))
}

/// Inline the stylesheet's woff fonts as base64 data URIs, dropping the
/// woff2/ttf source entries, and target the rewrite at `output`.
pub fn compute_font_embed(css: &Path, output: &Path) -> DocfillResult<FontUpdate> {
	let doc = Document::read(css)?;
	let stripped = fonts::strip_alternate_sources(doc.content());
	let (inlined, embedded) = fonts::inline_woff_sources(doc.dir(), &stripped)?;
	tracing::debug!(file = %css.display(), embedded, "font embed pass");

	Ok(FontUpdate {
		update: FileUpdate {
			file: output.to_path_buf(),
			original: String::new(),
			updated: inlined,
		},
		embedded,
	})
}
