use serde::Deserialize;
use serde::Serialize;

/// Default placeholder token replaced by the version substitution pass.
///
/// The token must be distinct enough not to collide with legitimate content;
/// that is an invariant on token design, not something checked at runtime.
pub const VERSION_TOKEN: &str = "#VERSION#";

/// A literal search/replace rule applied globally across a document.
///
/// Substitutions are pure and total: every occurrence is replaced, and
/// applying a set of rules does not depend on the order the occurrences
/// appear in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
	pub search: String,
	pub replace: String,
}

impl Substitution {
	pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Self {
		Self {
			search: search.into(),
			replace: replace.into(),
		}
	}

	/// Replace every occurrence of the search string.
	pub fn apply(&self, source: &str) -> String {
		source.replace(&self.search, &self.replace)
	}
}

/// Apply each rule in turn; every rule replaces all of its occurrences.
pub fn apply_all(source: &str, rules: &[Substitution]) -> String {
	let mut content = source.to_string();

	for rule in rules {
		content = rule.apply(&content);
	}

	content
}
