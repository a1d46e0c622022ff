use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum RegenError {
	#[error(transparent)]
	#[diagnostic(code(regen::io_error))]
	Io(#[from] std::io::Error),

	#[error("missing end marker for `{marker}` opened on line {line}")]
	#[diagnostic(
		code(regen::missing_end_marker),
		help("close the region with a `{end}` line after the begin marker")
	)]
	MissingEndMarker {
		marker: String,
		end: String,
		line: usize,
	},

	#[error("empty directive argument in `{marker}` on line {line}")]
	#[diagnostic(
		code(regen::empty_directive_argument),
		help("follow the keyword with a glob pattern or URL, e.g. `{marker} src/**/*.cc`")
	)]
	EmptyDirectiveArgument { marker: String, line: usize },

	#[error("invalid glob pattern `{pattern}`: {reason}")]
	#[diagnostic(code(regen::invalid_glob_pattern))]
	InvalidGlobPattern { pattern: String, reason: String },

	#[error("invalid url `{url}`: {reason}")]
	#[diagnostic(
		code(regen::invalid_url),
		help("remote includes must use an absolute `http://` or `https://` url")
	)]
	InvalidUrl { url: String, reason: String },

	#[error("failed to fetch `{url}`: {reason}")]
	#[diagnostic(code(regen::fetch_failure))]
	FetchFailure { url: String, reason: String },

	#[error("cannot build http client: {0}")]
	#[diagnostic(
		code(regen::http_client),
		help("check the `[fetch]` section of regen.toml, e.g. that `user_agent` is a valid header value")
	)]
	HttpClient(String),

	#[error("cannot read host file `{}`: {source}", .path.display())]
	#[diagnostic(code(regen::host_file_unreadable))]
	HostFileUnreadable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("cannot write host file `{}`: {source}", .path.display())]
	#[diagnostic(code(regen::host_file_unwritable))]
	HostFileUnwritable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(regen::config_parse),
		help("check that regen.toml is valid TOML with [sources], [headers] and/or [fetch] sections")
	)]
	ConfigParse(String),

	#[error("invalid type name: `{0}`")]
	#[diagnostic(
		code(regen::invalid_type_name),
		help("use a C++ identifier, optionally qualified with `::`, e.g. `gfx::Texture`")
	)]
	InvalidTypeName(String),

	#[error("refusing to overwrite existing file `{}`", .0.display())]
	#[diagnostic(code(regen::scaffold_exists))]
	ScaffoldExists(PathBuf),
}

pub type RegenResult<T> = Result<T, RegenError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
