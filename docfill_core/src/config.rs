use std::path::Path;

use serde::Deserialize;

use crate::DocfillError;
use crate::DocfillResult;
use crate::marker::MarkerPair;
use crate::substitute::Substitution;
use crate::variant::Variant;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["docfill.toml", ".docfill.toml", ".config/docfill.toml"];

/// One build-block replacement rule: the region delimited by
/// `<!-- build:name:kind -->` and `<!-- endbuild:name:kind -->` is replaced
/// (markers included) by `tag`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetRule {
	pub name: String,
	pub kind: String,
	pub tag: String,
}

impl AssetRule {
	pub fn new(name: &str, kind: &str, tag: &str) -> Self {
		Self {
			name: name.to_string(),
			kind: kind.to_string(),
			tag: tag.to_string(),
		}
	}

	/// The marker pair delimiting this rule's region in the template.
	pub fn marker_pair(&self) -> MarkerPair {
		MarkerPair::new(
			format!("<!-- build:{}:{} -->", self.name, self.kind),
			format!("<!-- endbuild:{}:{} -->", self.name, self.kind),
		)
	}
}

/// Configuration loaded from a `docfill.toml` file.
///
/// Every section is optional; an absent file (or section) falls back to the
/// built-in report bundle defaults.
///
/// ```toml
/// version_token = "#VERSION#"
///
/// [[assets]]
/// name = "vendor"
/// kind = "js"
/// tag = '<script inline src="lib/vendor.min.js"></script>'
///
/// [[variants]]
/// suffix = "-no-plotly"
/// substitutions = [
/// 	{ search = "lib/vendor.min.js", replace = "lib/vendor-no-plotly.min.js" },
/// ]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct DocfillConfig {
	/// Placeholder token replaced by the version substitution pass.
	#[serde(default = "default_version_token")]
	pub version_token: String,
	/// Build-block replacement rules for the assets pass.
	#[serde(default = "default_asset_rules")]
	pub assets: Vec<AssetRule>,
	/// Variant outputs emitted alongside the base assets output.
	#[serde(default = "default_variants")]
	pub variants: Vec<Variant>,
}

impl Default for DocfillConfig {
	fn default() -> Self {
		Self {
			version_token: default_version_token(),
			assets: default_asset_rules(),
			variants: default_variants(),
		}
	}
}

impl DocfillConfig {
	/// Load the config from the first candidate file found under `root`,
	/// falling back to the built-in defaults when none exists.
	pub fn load(root: &Path) -> DocfillResult<Self> {
		for candidate in CONFIG_FILE_CANDIDATES {
			let path = root.join(candidate);
			if !path.is_file() {
				continue;
			}

			let raw = std::fs::read_to_string(&path).map_err(|source| {
				DocfillError::File {
					path: path.display().to_string(),
					source,
				}
			})?;

			return toml::from_str(&raw).map_err(|e| DocfillError::ConfigParse(e.to_string()));
		}

		Ok(Self::default())
	}
}

fn default_version_token() -> String {
	crate::substitute::VERSION_TOKEN.to_string()
}

fn default_asset_rules() -> Vec<AssetRule> {
	vec![
		AssetRule::new(
			"vendor",
			"css",
			r#"<link rel="stylesheet" inline href="lib/vendor.min.css">"#,
		),
		AssetRule::new(
			"vendor",
			"js",
			r#"<script inline src="lib/vendor.min.js"></script>"#,
		),
		AssetRule::new(
			"report",
			"js",
			r#"<script inline src="lib/render.min.js"></script>"#,
		),
		AssetRule::new("data", "js", "<script>// report-data-script-here</script>"),
		AssetRule::new(
			"report",
			"css",
			r#"<link rel="stylesheet" inline href="lib/report.min.css">"#,
		),
		AssetRule::new(
			"user",
			"css",
			r#"<link rel="stylesheet" href="user-defined.css">"#,
		),
	]
}

fn default_variants() -> Vec<Variant> {
	vec![Variant {
		suffix: "-no-plotly".to_string(),
		substitutions: vec![Substitution::new(
			"lib/vendor.min.js",
			"lib/vendor-no-plotly.min.js",
		)],
	}]
}
