use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::substitute::Substitution;
use crate::substitute::apply_all;

/// A named derivation of a base output document.
///
/// Variants share the base document's lifecycle but are independent output
/// artifacts: each is the base content with a small set of extra
/// substitutions applied, written to a suffixed sibling path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
	/// Filename suffix inserted before the extension, e.g. `-no-plotly`.
	pub suffix: String,
	/// Substitutions applied on top of the base output.
	pub substitutions: Vec<Substitution>,
}

/// A fully substituted variant ready to be written.
#[derive(Debug, Clone)]
pub struct VariantPlan {
	pub path: PathBuf,
	pub content: String,
}

/// Outcome of one variant write. Failures are isolated per variant: one
/// failed write never prevents the remaining variants from being written.
#[derive(Debug, Clone, Serialize)]
pub struct VariantOutcome {
	pub path: PathBuf,
	/// Present when writing this variant failed.
	pub error: Option<String>,
}

impl VariantOutcome {
	pub fn is_ok(&self) -> bool {
		self.error.is_none()
	}
}

/// Output path for a variant: the suffix lands before the file extension,
/// so `report-template.html` with suffix `-no-plotly` becomes
/// `report-template-no-plotly.html`.
pub fn variant_path(base: &Path, suffix: &str) -> PathBuf {
	let stem = base
		.file_stem()
		.map_or(String::new(), |s| s.to_string_lossy().into_owned());
	let name = match base.extension() {
		Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
		None => format!("{stem}{suffix}"),
	};

	base.with_file_name(name)
}

/// Compute the variant outputs for a base document's content.
pub fn plan_variants(base_path: &Path, base_content: &str, variants: &[Variant]) -> Vec<VariantPlan> {
	variants
		.iter()
		.map(|variant| {
			VariantPlan {
				path: variant_path(base_path, &variant.suffix),
				content: apply_all(base_content, &variant.substitutions),
			}
		})
		.collect()
}

/// Write each planned variant to its own path. Every write is a scoped
/// open-write-close; a failure is recorded in that variant's outcome and the
/// loop moves on to the next one.
pub fn emit_variants(plans: &[VariantPlan]) -> Vec<VariantOutcome> {
	plans
		.iter()
		.map(|plan| {
			let error = std::fs::write(&plan.path, &plan.content)
				.err()
				.map(|e| e.to_string());
			if let Some(reason) = &error {
				tracing::warn!("failed to write variant {}: {reason}", plan.path.display());
			}

			VariantOutcome {
				path: plan.path.clone(),
				error,
			}
		})
		.collect()
}
