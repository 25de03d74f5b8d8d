use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum DocfillError {
	#[error(transparent)]
	#[diagnostic(code(docfill::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to access `{path}`: {source}")]
	#[diagnostic(
		code(docfill::file),
		help("check that the file exists and is readable")
	)]
	File {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(docfill::config_parse),
		help("check that docfill.toml is valid TOML with [[assets]] and/or [[variants]] sections")
	)]
	ConfigParse(String),

	#[error("failed to load font file `{path}`: {reason}")]
	#[diagnostic(
		code(docfill::font_file),
		help("font paths are resolved relative to the stylesheet's directory")
	)]
	FontFile { path: String, reason: String },
}

pub type DocfillResult<T> = Result<T, DocfillError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
