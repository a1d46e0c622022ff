//! Filesystem glob expansion with deterministic output.
//!
//! Patterns use `globset` syntax with `literal_separator` enabled, so `*`
//! stays within one path component and `**` crosses directories. Only regular
//! files (and symlinks to them) are returned.

use std::path::Component;
use std::path::Path;

use globset::GlobBuilder;
use globset::GlobMatcher;
use ignore::WalkBuilder;

use crate::RegenError;
use crate::RegenResult;

const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}', '\\'];

/// Compile a glob pattern into a matcher.
pub fn compile_glob(pattern: &str) -> RegenResult<GlobMatcher> {
	let glob = GlobBuilder::new(pattern)
		.literal_separator(true)
		.backslash_escape(true)
		.build()
		.map_err(|e| {
			RegenError::InvalidGlobPattern {
				pattern: pattern.to_string(),
				reason: e.kind().to_string(),
			}
		})?;

	Ok(glob.compile_matcher())
}

/// Expand `pattern` relative to `base_dir` and return the matching paths,
/// relative to `base_dir`, with `/` separators, sorted ordinally.
///
/// A pattern that matches nothing yields an empty list. Only the literal
/// directory prefix of the pattern is walked, so `src/**/*.cc` never visits
/// anything outside `src/`.
pub fn resolve_glob(pattern: &str, base_dir: &Path) -> RegenResult<Vec<String>> {
	let pattern = pattern.trim();
	let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
	let matcher = compile_glob(pattern)?;
	let prefix = literal_prefix(pattern);
	let walk_root = if prefix.is_empty() {
		base_dir.to_path_buf()
	} else {
		base_dir.join(prefix)
	};

	if !walk_root.is_dir() {
		tracing::trace!(root = %walk_root.display(), "glob root does not exist");
		return Ok(Vec::new());
	}

	let mut matches = Vec::new();
	let walker = WalkBuilder::new(&walk_root)
		.standard_filters(false)
		.follow_links(false)
		.build();

	for entry in walker {
		let entry = entry.map_err(|e| {
			let message = e.to_string();
			RegenError::Io(
				e.into_io_error()
					.unwrap_or_else(|| std::io::Error::other(message)),
			)
		})?;
		let path = entry.path();
		if !path.is_file() {
			continue;
		}

		let Ok(relative) = path.strip_prefix(&walk_root) else {
			continue;
		};
		let relative = to_slash(relative);
		let candidate = if prefix.is_empty() {
			relative
		} else {
			format!("{prefix}/{relative}")
		};

		if matcher.is_match(&candidate) {
			matches.push(candidate);
		}
	}

	matches.sort();
	matches.dedup();
	tracing::debug!(pattern, matched = matches.len(), "expanded glob");
	Ok(matches)
}

/// The leading directory components of `pattern` that contain no glob
/// syntax. The final component is never included since it names files.
fn literal_prefix(pattern: &str) -> &str {
	let mut end = 0;
	let mut offset = 0;

	for segment in pattern.split('/') {
		let segment_end = offset + segment.len();
		if segment_end >= pattern.len() || segment.contains(GLOB_META) {
			break;
		}
		end = segment_end;
		offset = segment_end + 1;
	}

	&pattern[..end]
}

/// Render a relative path with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
	let mut parts = Vec::new();
	for component in path.components() {
		match component {
			Component::Normal(part) => parts.push(part.to_string_lossy()),
			Component::ParentDir => parts.push("..".into()),
			Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
		}
	}
	parts.join("/")
}

/// Replace any `\` separators with `/`.
pub fn normalize_separators(path: &str) -> String {
	path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::literal_prefix;

	#[rstest]
	#[case("src/**/*.cc", "src")]
	#[case("*.hh", "")]
	#[case("src/main.cc", "src")]
	#[case("../include/kl/*.hh", "../include/kl")]
	#[case("a/b/{c,d}/*.cc", "a/b")]
	#[case("main.cc", "")]
	fn computes_literal_prefix(#[case] pattern: &str, #[case] expected: &str) {
		assert_eq!(literal_prefix(pattern), expected);
	}
}
