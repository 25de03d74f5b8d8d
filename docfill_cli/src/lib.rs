use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	disable_help_subcommand = true,
	about = "Build passes for documentation and report bundles.",
	long_about = "docfill rewrites marker-delimited regions in documentation and report \
	              files.\n\nEach subcommand is one build pass: generated headings and help blocks \
	              injected into source files, index pages populated with descriptions extracted \
	              from the files they link to, report templates assembled from asset rules, \
	              version tokens substituted, and web fonts inlined as data URIs.\n\nEvery pass is \
	              idempotent: re-running a pipeline produces the same output as running it once."
)]
pub struct DocfillCli {
	#[command(subcommand)]
	pub command: Commands,

	/// Directory searched for a docfill.toml configuration file. Defaults to
	/// the current directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Insert a generated H1 heading below each file's front matter.
	///
	/// Looks for a `title:` entry followed by the `---` sentinel and the
	/// opening of the description block, and inserts a backtick-quoted
	/// heading between them. Fires at most once per file; files without the
	/// anchor (typically ones that already carry their heading) are skipped
	/// silently.
	Heading {
		/// Files to rewrite in place.
		#[arg(required = true)]
		files: Vec<PathBuf>,
	},
	/// Inject help text into a source file as a comment block.
	///
	/// Prefixes every line of the help file with `% `, strips its front
	/// matter, removes any previously injected help block from the target
	/// (everything through the separator line), and prepends the fresh
	/// block. Re-running converges after one pass.
	Help {
		/// The file receiving the help block, rewritten in place.
		target: PathBuf,
		/// The markdown file the help text comes from.
		source: PathBuf,
	},
	/// Populate index entries with descriptions from the linked files.
	///
	/// Rewrites `[label](path) | ...` rows and `#### [label](path)` paragraph
	/// entries, folding in the `{== ... ==}` description block of each
	/// referenced file. Reference paths resolve relative to the index file's
	/// directory. Entries whose referenced file has no description block get
	/// an empty description and a warning; the rest of the index is still
	/// rebuilt.
	Index {
		/// Index files to rewrite in place.
		#[arg(required = true)]
		files: Vec<PathBuf>,

		/// Preview changes without writing files.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Show a unified diff of the pending changes.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for the pass report. Use `text` for human-readable
		/// output or `json` for programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Rewrite build placeholder blocks and emit variant outputs.
	///
	/// Replaces each `<!-- build:name:kind --> ... <!-- endbuild:name:kind -->`
	/// region with its configured asset tag, writes the template in place,
	/// and then writes every configured variant (e.g. a `-no-plotly` build)
	/// alongside it. A failed variant write never blocks the remaining
	/// variants.
	Assets {
		/// The HTML template to rewrite in place.
		template: PathBuf,

		/// Preview changes without writing files.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Show a unified diff of the pending changes.
		#[arg(long, default_value_t = false)]
		diff: bool,
	},
	/// Substitute the release version into each file's version token.
	Version {
		/// Release version of the bundle.
		version: String,

		/// Files to rewrite in place.
		#[arg(required = true)]
		files: Vec<PathBuf>,
	},
	/// Inline a stylesheet's web fonts as base64 data URIs.
	///
	/// Drops woff2/ttf source entries, keeps the woff urls, replaces each
	/// woff path with the base64-encoded font bytes, and writes the result
	/// to a separate output stylesheet. Font paths resolve relative to the
	/// input stylesheet's directory.
	Fonts {
		/// The stylesheet to read.
		css: PathBuf,
		/// Where to write the font-embedded stylesheet.
		output: PathBuf,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
