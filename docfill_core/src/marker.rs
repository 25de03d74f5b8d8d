use std::ops::Range;

/// A start/end delimiter pair identifying a rewritable region in a document.
///
/// Both delimiters are literal strings. Regions may span multiple lines; the
/// scan is a plain substring search, so the delimiters themselves carry no
/// pattern syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
	start: String,
	end: String,
}

/// A concrete match of a [`MarkerPair`] at a specific location.
///
/// Regions are transient: they are recomputed on every run and never cached,
/// which is what keeps re-running a pipeline idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
	/// Byte range covering the start marker through the end marker.
	pub span: Range<usize>,
	/// Byte range of the content between the two markers.
	pub inner: Range<usize>,
}

impl Region {
	/// The text between the markers.
	pub fn inner_text<'a>(&self, source: &'a str) -> &'a str {
		&source[self.inner.clone()]
	}
}

impl MarkerPair {
	pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
		Self {
			start: start.into(),
			end: end.into(),
		}
	}

	/// Find the first region delimited by this pair.
	///
	/// A start marker without a matching end marker (or vice versa) is a
	/// valid "no region found" outcome, never an error; the scan stops at
	/// document end.
	pub fn find_first(&self, source: &str) -> Option<Region> {
		self.find_at(source, 0)
	}

	/// Find every region delimited by this pair, in document order.
	///
	/// The scan resumes after each matched span, so a region's content is
	/// never revisited within the same pass.
	pub fn find_all(&self, source: &str) -> Vec<Region> {
		let mut regions = Vec::new();
		let mut at = 0;

		while let Some(region) = self.find_at(source, at) {
			at = region.span.end;
			regions.push(region);
		}

		regions
	}

	fn find_at(&self, source: &str, at: usize) -> Option<Region> {
		if at >= source.len() {
			return None;
		}

		let start = at + source[at..].find(&self.start)?;
		let inner_start = start + self.start.len();
		let inner_end = inner_start + source[inner_start..].find(&self.end)?;
		let span_end = inner_end + self.end.len();

		Some(Region {
			span: start..span_end,
			inner: inner_start..inner_end,
		})
	}
}
