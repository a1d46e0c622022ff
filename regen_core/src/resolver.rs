use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use crate::RegenResult;
use crate::fetch::Fetch;
use crate::glob::normalize_separators;
use crate::glob::resolve_glob;
use crate::scanner::MarkerGrammar;
use crate::splice::Replacement;

/// The strategy used to turn a directive argument into region content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
	/// Glob over source files, emitted as indented paths.
	SourceList,
	/// Glob over headers, emitted as `#include "<path>"` lines.
	IncludeList,
	/// Url whose body is inlined between provenance stamps.
	RemoteInclude,
}

impl RegionKind {
	/// The marker grammar recognised for this kind of host file.
	pub fn grammar(self) -> MarkerGrammar {
		match self {
			Self::SourceList => MarkerGrammar::HASH,
			Self::IncludeList => MarkerGrammar::SLASH,
			Self::RemoteInclude => MarkerGrammar::HASH_STAMPED,
		}
	}

	/// Host file regenerated when none is named on the command line.
	pub fn default_host_file(self) -> &'static str {
		match self {
			Self::SourceList => "CMakeLists.txt",
			Self::IncludeList => "target.cpp",
			Self::RemoteInclude => ".gitignore",
		}
	}
}

impl fmt::Display for RegionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::SourceList => "source list",
			Self::IncludeList => "include list",
			Self::RemoteInclude => "remote include",
		};
		f.write_str(name)
	}
}

/// A region resolver with everything its strategy needs bound in.
pub enum RegionResolver<'a> {
	SourceList {
		/// Directory globs are expanded from and paths are relative to.
		root: PathBuf,
		indent: usize,
	},
	IncludeList {
		/// Directory of the host file, so emitted includes are relative to it.
		dir: PathBuf,
		indent: usize,
	},
	RemoteInclude {
		fetcher: &'a dyn Fetch,
	},
}

impl fmt::Debug for RegionResolver<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::SourceList { root, indent } => {
				f.debug_struct("SourceList")
					.field("root", root)
					.field("indent", indent)
					.finish()
			}
			Self::IncludeList { dir, indent } => {
				f.debug_struct("IncludeList")
					.field("dir", dir)
					.field("indent", indent)
					.finish()
			}
			Self::RemoteInclude { .. } => f.debug_struct("RemoteInclude").finish_non_exhaustive(),
		}
	}
}

impl RegionResolver<'_> {
	pub fn kind(&self) -> RegionKind {
		match self {
			Self::SourceList { .. } => RegionKind::SourceList,
			Self::IncludeList { .. } => RegionKind::IncludeList,
			Self::RemoteInclude { .. } => RegionKind::RemoteInclude,
		}
	}

	pub fn grammar(&self) -> MarkerGrammar {
		self.kind().grammar()
	}

	/// Resolve a directive argument into the content of its region.
	pub fn resolve(&self, argument: &str) -> RegenResult<Replacement> {
		match self {
			Self::SourceList { root, indent } => {
				let paths = resolve_glob(argument, root)?;
				Ok(Replacement::lines(render_source_list(&paths, *indent)))
			}
			Self::IncludeList { dir, indent } => {
				let paths = resolve_glob(argument, dir)?;
				Ok(Replacement::lines(render_include_list(&paths, *indent)))
			}
			Self::RemoteInclude { fetcher } => {
				let body = fetcher.fetch(argument)?;
				Ok(render_remote_include(argument, &body))
			}
		}
	}
}

/// Host-file directory used as the glob base for a host path.
pub fn host_dir(host: &Path) -> PathBuf {
	match host.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
		_ => PathBuf::from("."),
	}
}

pub fn render_source_list(paths: &[String], indent: usize) -> Vec<String> {
	let pad = " ".repeat(indent);
	paths
		.iter()
		.map(|path| format!("{pad}{}", normalize_separators(path)))
		.collect()
}

pub fn render_include_list(paths: &[String], indent: usize) -> Vec<String> {
	let pad = " ".repeat(indent);
	paths
		.iter()
		.map(|path| format!("{pad}#include \"{}\"", normalize_separators(path)))
		.collect()
}

/// Wrap a fetched body in `# begin <url>` / `# end <url>` stamps.
pub fn render_remote_include(url: &str, body: &str) -> Replacement {
	let mut lines = Vec::with_capacity(body.lines().count() + 1);
	lines.push(format!("# begin {url}"));
	lines.extend(body.lines().map(str::to_string));

	Replacement {
		lines,
		end_marker: Some(format!("# end {url}")),
	}
}
