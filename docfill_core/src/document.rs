use std::path::Path;
use std::path::PathBuf;

use crate::DocfillError;
use crate::DocfillResult;

/// A text document read whole into memory, transformed, and written back.
///
/// Documents have no intermediate persisted state: each pipeline run reads
/// the file once, rewrites the buffer in memory, and writes the result once.
/// File handles are scoped to the read or write call and never held across
/// transform steps.
#[derive(Debug, Clone)]
pub struct Document {
	path: PathBuf,
	content: String,
}

impl Document {
	/// Read a document from disk, normalizing CRLF line endings to LF.
	pub fn read(path: impl Into<PathBuf>) -> DocfillResult<Self> {
		let path = path.into();
		let raw = std::fs::read_to_string(&path).map_err(|source| {
			DocfillError::File {
				path: path.display().to_string(),
				source,
			}
		})?;

		Ok(Self {
			content: normalize_line_endings(&raw),
			path,
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn content(&self) -> &str {
		&self.content
	}

	/// The directory the document lives in, used to resolve relative
	/// references found inside it.
	pub fn dir(&self) -> &Path {
		self.path.parent().unwrap_or_else(|| Path::new(""))
	}

}

/// Normalize CRLF line endings to LF.
pub fn normalize_line_endings(content: &str) -> String {
	if content.contains('\r') {
		content.replace("\r\n", "\n").replace('\r', "\n")
	} else {
		content.to_string()
	}
}
