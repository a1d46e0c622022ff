use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::RegenError;
use crate::RegenResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["regen.toml", ".regen.toml", ".config/regen.toml"];

/// Indentation applied to source-list lines when no config overrides it.
pub const DEFAULT_SOURCE_INDENT: usize = 4;

/// Default timeout for remote include fetches, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Configuration loaded from a `regen.toml` file.
///
/// ```toml
/// [sources]
/// indent = 4
///
/// [headers]
/// indent = 0
///
/// [fetch]
/// timeout_secs = 30
/// user_agent = "regen"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegenConfig {
	/// Rendering options for `# include` source lists.
	#[serde(default)]
	pub sources: SourcesConfig,
	/// Rendering options for `// include` header aggregation.
	#[serde(default)]
	pub headers: HeadersConfig,
	/// Transport options for remote includes.
	#[serde(default)]
	pub fetch: FetchConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
	/// Number of spaces placed before each emitted path.
	#[serde(default = "default_source_indent")]
	pub indent: usize,
}

impl Default for SourcesConfig {
	fn default() -> Self {
		Self {
			indent: DEFAULT_SOURCE_INDENT,
		}
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadersConfig {
	/// Number of spaces placed before each `#include` line.
	#[serde(default)]
	pub indent: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
	/// Whole-request timeout handed to the HTTP transport.
	#[serde(default = "default_fetch_timeout_secs")]
	pub timeout_secs: u64,
	/// Overrides the `User-Agent` header sent with each fetch.
	#[serde(default)]
	pub user_agent: Option<String>,
}

impl Default for FetchConfig {
	fn default() -> Self {
		Self {
			timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
			user_agent: None,
		}
	}
}

impl FetchConfig {
	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}
}

fn default_source_indent() -> usize {
	DEFAULT_SOURCE_INDENT
}

fn default_fetch_timeout_secs() -> u64 {
	DEFAULT_FETCH_TIMEOUT_SECS
}

impl RegenConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no candidate exists.
	pub fn load(root: &Path) -> RegenResult<Option<RegenConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: RegenConfig =
			toml::from_str(&content).map_err(|e| RegenError::ConfigParse(e.to_string()))?;

		tracing::debug!(path = %config_path.display(), "loaded config");
		Ok(Some(config))
	}

	/// Load the discovered config, falling back to defaults when absent.
	pub fn load_or_default(root: &Path) -> RegenResult<RegenConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}
}
