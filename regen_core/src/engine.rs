use std::path::Path;
use std::path::PathBuf;

use crate::RegenError;
use crate::RegenResult;
use crate::resolver::RegionResolver;
use crate::scanner::scan;
use crate::splice::detect_line_ending;
use crate::splice::splice;

/// The regenerated form of a document, computed but not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regeneration {
	/// Text as it was read.
	pub original: String,
	/// Text after every region has been resolved and spliced.
	pub content: String,
	/// Number of marker regions processed.
	pub regions: usize,
}

impl Regeneration {
	/// Returns true if regeneration changed the document.
	pub fn is_changed(&self) -> bool {
		self.original != self.content
	}
}

/// Result of regenerating a host file on disk.
#[derive(Debug, Clone)]
pub struct FileRegeneration {
	pub path: PathBuf,
	pub regeneration: Regeneration,
}

/// Resolve and splice every marker region in `text`.
///
/// Regions are handled strictly in document order. After each splice the
/// scan resumes just past the rewritten end marker, so content inserted for
/// one region is never rescanned in the same run. The first error aborts the
/// whole regeneration.
pub fn regenerate(text: &str, resolver: &RegionResolver<'_>) -> RegenResult<Regeneration> {
	let grammar = resolver.grammar();
	let line_ending = detect_line_ending(text);
	let mut content = text.to_string();
	let mut offset = 0;
	let mut regions = 0;

	while let Some(region) = scan(&content, offset, &grammar)? {
		let replacement = resolver.resolve(&region.argument)?;
		tracing::debug!(
			kind = %resolver.kind(),
			line = region.line,
			argument = %region.argument,
			lines = replacement.lines.len(),
			"resolved region"
		);

		let spliced = splice(&content, &region, &replacement, line_ending);
		content = spliced.text;
		offset = spliced.resume;
		regions += 1;
	}

	Ok(Regeneration {
		original: text.to_string(),
		content,
		regions,
	})
}

/// Read a host file and compute its regenerated content without writing.
pub fn regenerate_file(path: &Path, resolver: &RegionResolver<'_>) -> RegenResult<FileRegeneration> {
	let original = read_host(path)?;
	let regeneration = regenerate(&original, resolver)?;

	Ok(FileRegeneration {
		path: path.to_path_buf(),
		regeneration,
	})
}

/// Write a regenerated host file back to disk. Unchanged files are left
/// alone. Returns whether a write happened.
pub fn write_regeneration(result: &FileRegeneration) -> RegenResult<bool> {
	if !result.regeneration.is_changed() {
		return Ok(false);
	}

	write_host(&result.path, &result.regeneration.content)?;
	Ok(true)
}

pub fn read_host(path: &Path) -> RegenResult<String> {
	std::fs::read_to_string(path).map_err(|source| {
		RegenError::HostFileUnreadable {
			path: path.to_path_buf(),
			source,
		}
	})
}

/// Replace the host file's content through a sibling temporary file so the
/// original is never left half written.
pub fn write_host(path: &Path, content: &str) -> RegenResult<()> {
	let unwritable = |source: std::io::Error| {
		RegenError::HostFileUnwritable {
			path: path.to_path_buf(),
			source,
		}
	};

	let file_name = path
		.file_name()
		.map_or_else(|| "host".into(), |name| name.to_string_lossy());
	let temp_path = path.with_file_name(format!(
		".{file_name}.regen-tmp-{}",
		std::process::id()
	));

	std::fs::write(&temp_path, content).map_err(unwritable)?;
	if let Err(source) = std::fs::rename(&temp_path, path) {
		let _ = std::fs::remove_file(&temp_path);
		return Err(unwritable(source));
	}

	tracing::debug!(path = %path.display(), "wrote host file");
	Ok(())
}
