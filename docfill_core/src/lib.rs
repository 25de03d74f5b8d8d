//! `docfill_core` is the engine behind the [docfill](https://github.com/docfill/docfill)
//! documentation build pipeline. It scans marker-delimited regions in text
//! and markup files and rewrites them from structured rules: generated
//! headings and help text injected into source files, index pages populated
//! with descriptions extracted from the files they link to, and report
//! templates assembled by swapping placeholder blocks for asset references.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Target file(s)
//!   → Marker scanner (locates delimited regions, captures sub-groups)
//!   → Region rewriter / cross-file composer (produces new content)
//!   → Parameter substitution (applies externally supplied values)
//!   → Variant emitter (writes the base output and derived variants)
//! ```
//!
//! Every pass is idempotent: regions are recomputed from the document on
//! each run, and insertion passes strip their previous output (or skip when
//! their anchor is gone) before inserting.
//!
//! ## Key Types
//!
//! - [`MarkerPair`] / [`Region`] — paired-delimiter scanning.
//! - [`Rewrite`] — a rewritten buffer plus whether the rewrite fired.
//! - [`ComposeReport`] — per-pass index composition counts and warnings.
//! - [`Substitution`] / [`Variant`] — literal replacement rules and the
//!   derived outputs built from them.
//! - [`DocfillConfig`] — optional `docfill.toml` overriding the built-in
//!   asset rules, variants, and version token.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use docfill_core::DocfillConfig;
//! use docfill_core::compute_assets;
//! use docfill_core::compute_index;
//!
//! # fn main() -> docfill_core::DocfillResult<()> {
//! let index = compute_index(Path::new("docs/index.md"))?;
//! index.update.write_if_changed()?;
//!
//! let config = DocfillConfig::default();
//! let assets = compute_assets(Path::new("dist/report-template.html"), &config)?;
//! assets.write_all()?;
//! # Ok(())
//! # }
//! ```

pub use compose::*;
pub use config::*;
pub use document::*;
pub use engine::*;
pub use error::*;
pub use fonts::*;
pub use marker::*;
pub use rewrite::*;
pub use substitute::*;
pub use variant::*;

mod compose;
pub mod config;
mod document;
mod engine;
mod error;
mod fonts;
mod marker;
mod rewrite;
mod substitute;
mod variant;
