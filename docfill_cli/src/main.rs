use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use docfill_cli::Commands;
use docfill_cli::DocfillCli;
use docfill_cli::OutputFormat;
use docfill_core::AnyEmptyResult;
use docfill_core::ComposeWarning;
use docfill_core::DocfillConfig;
use docfill_core::VariantOutcome;
use docfill_core::compute_assets;
use docfill_core::compute_font_embed;
use docfill_core::compute_heading;
use docfill_core::compute_help;
use docfill_core::compute_index;
use docfill_core::compute_version;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = DocfillCli::parse();

	// Respect NO_COLOR, the --no-color flag, and non-tty output streams.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Commands::Heading { files } => run_heading(&args, files),
		Commands::Help { target, source } => run_help(target, source),
		Commands::Index {
			files,
			dry_run,
			diff,
			format,
		} => run_index(files, *dry_run, *diff, *format),
		Commands::Assets {
			template,
			dry_run,
			diff,
		} => run_assets(&args, template, *dry_run, *diff),
		Commands::Version { version, files } => run_version(&args, version, files),
		Commands::Fonts { css, output } => run_fonts(css, output),
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<docfill_core::DocfillError>() {
			Ok(docfill_err) => {
				let report: miette::Report = (*docfill_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Directory for config discovery. Target files stay explicit arguments;
/// only docfill.toml is looked up from here.
fn resolve_root(args: &DocfillCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run_heading(args: &DocfillCli, files: &[PathBuf]) -> AnyEmptyResult {
	let mut inserted = 0;
	let mut skipped = 0;

	for file in files {
		let outcome = compute_heading(file)?;
		if outcome.applied {
			outcome.update.write()?;
			inserted += 1;
			if args.verbose {
				println!("  inserted heading in {}", file.display());
			}
		} else {
			skipped += 1;
			if args.verbose {
				println!("  skipped {} (no front-matter anchor)", file.display());
			}
		}
	}

	println!("Inserted headings in {inserted} file(s), skipped {skipped}.");
	Ok(())
}

fn run_help(target: &Path, source: &Path) -> AnyEmptyResult {
	let update = compute_help(target, source)?;
	update.write()?;
	println!("Injected help into {}.", target.display());
	Ok(())
}

fn run_index(files: &[PathBuf], dry_run: bool, diff: bool, format: OutputFormat) -> AnyEmptyResult {
	let mut json_entries = Vec::new();
	let mut total_entries = 0;
	let mut updated_files = 0;

	for file in files {
		let index = compute_index(file)?;
		total_entries += index.report.line_entries + index.report.paragraph_entries;

		match format {
			OutputFormat::Text => {
				print_compose_warnings(&index.report.warnings);

				if dry_run {
					if index.update.changed() {
						println!("Dry run: would update {}", file.display());
						updated_files += 1;
					}
				} else if index.update.write_if_changed()? {
					updated_files += 1;
				}

				if diff && index.update.changed() {
					print_diff(&index.update.original, &index.update.updated);
				}
			}
			OutputFormat::Json => {
				if !dry_run {
					index.update.write_if_changed()?;
				}
				json_entries.push(serde_json::json!({
					"file": file.display().to_string(),
					"line_entries": index.report.line_entries,
					"paragraph_entries": index.report.paragraph_entries,
					"changed": index.update.changed(),
					"warnings": index.report.warnings,
				}));
			}
		}
	}

	match format {
		OutputFormat::Text => {
			if dry_run {
				println!("Dry run: {total_entries} entry(s) in {} file(s).", files.len());
			} else {
				println!("Populated {total_entries} entry(s), updated {updated_files} file(s).");
			}
		}
		OutputFormat::Json => {
			println!("{}", serde_json::Value::Array(json_entries));
		}
	}

	Ok(())
}

fn run_assets(args: &DocfillCli, template: &Path, dry_run: bool, diff: bool) -> AnyEmptyResult {
	let config = DocfillConfig::load(&resolve_root(args))?;
	let assets = compute_assets(template, &config)?;

	if diff && assets.update.changed() {
		print_diff(&assets.update.original, &assets.update.updated);
	}

	if dry_run {
		println!(
			"Dry run: would replace {} build block(s) in {}",
			assets.rules_applied,
			template.display()
		);
		for plan in &assets.variants {
			println!("  would write variant {}", plan.path.display());
		}
		return Ok(());
	}

	let outcomes = assets.write_all()?;
	let failed: Vec<&VariantOutcome> = outcomes.iter().filter(|o| !o.is_ok()).collect();

	println!(
		"Replaced {} build block(s) in {}.",
		assets.rules_applied,
		template.display()
	);
	for outcome in &outcomes {
		if outcome.is_ok() {
			println!("  wrote variant {}", outcome.path.display());
		}
	}
	for outcome in &failed {
		eprintln!(
			"{} failed to write variant {}: {}",
			colored!("error:", red),
			outcome.path.display(),
			outcome.error.as_deref().unwrap_or("unknown error")
		);
	}

	if !failed.is_empty() {
		return Err(format!("failed to write {} variant output(s)", failed.len()).into());
	}

	Ok(())
}

fn run_version(args: &DocfillCli, version: &str, files: &[PathBuf]) -> AnyEmptyResult {
	let config = DocfillConfig::load(&resolve_root(args))?;
	let mut updated = 0;

	for file in files {
		let update = compute_version(file, version, &config.version_token)?;
		if update.write_if_changed()? {
			updated += 1;
			if args.verbose {
				println!("  {}", file.display());
			}
		}
	}

	println!("Set version {version} in {updated} file(s).");
	Ok(())
}

fn run_fonts(css: &Path, output: &Path) -> AnyEmptyResult {
	let font = compute_font_embed(css, output)?;
	font.update.write()?;
	println!(
		"Embedded {} font(s) into {}.",
		font.embedded,
		output.display()
	);
	Ok(())
}

/// Print warnings about referenced files that have no description block.
fn print_compose_warnings(warnings: &[ComposeWarning]) {
	for warning in warnings {
		eprintln!(
			"{} no description block in {} (entry `{}`)",
			colored!("warning:", yellow),
			warning.file.display(),
			warning.label,
		);
	}
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				print!("   {change}");
			}
		}
	}
}
