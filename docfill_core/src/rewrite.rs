use regex::Regex;

use crate::marker::Region;

/// Result of a rewrite pass over a document buffer.
///
/// A missing anchor or separator is a deliberate skip, not an error; callers
/// observe it through [`applied`](Rewrite::applied) instead of a swallowed
/// condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
	/// The rewritten buffer. Unchanged when `applied` is false.
	pub content: String,
	/// Whether the rewrite found its target and fired.
	pub applied: bool,
}

impl Rewrite {
	fn unchanged(source: &str) -> Self {
		Self {
			content: source.to_string(),
			applied: false,
		}
	}
}

/// Replace a region's full span (markers included) with `replacement`.
pub fn replace_region(source: &str, region: &Region, replacement: &str) -> String {
	let mut buf =
		String::with_capacity(source.len() - region.span.len() + replacement.len());
	buf.push_str(&source[..region.span.start]);
	buf.push_str(replacement);
	buf.push_str(&source[region.span.end..]);
	buf
}

/// Rewrite the first match of `anchor` using `template`, which may reference
/// capture groups as `${n}`. Fires at most once; when the anchor is absent
/// the buffer is returned untouched.
///
/// Templates re-emit the anchor text they need to keep, so an applied
/// rewrite breaks the anchor's shape and a second run is a no-op. That is
/// the idempotence contract for one-time insertions.
pub fn insert_at_anchor(source: &str, anchor: &Regex, template: &str) -> Rewrite {
	if !anchor.is_match(source) {
		return Rewrite::unchanged(source);
	}

	Rewrite {
		content: anchor.replacen(source, 1, template).into_owned(),
		applied: true,
	}
}

/// Strip everything from the start of the buffer through the final
/// occurrence of `separator`, plus any blank space that follows it.
///
/// This is the remove-then-insert half of idempotent block insertion: a
/// previously inserted block always ends at the separator, so removing
/// through it restores the pristine document before the new block goes in.
pub fn strip_through_separator(source: &str, separator: &str) -> Rewrite {
	let Some(at) = source.rfind(separator) else {
		return Rewrite::unchanged(source);
	};

	Rewrite {
		content: source[at + separator.len()..].trim_start().to_string(),
		applied: true,
	}
}
