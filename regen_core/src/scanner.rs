use std::ops::Range;

use crate::RegenError;
use crate::RegenResult;

/// The begin/end marker tokens recognised in a host file.
///
/// A begin marker is a line whose first non-blank text is the `begin` keyword
/// followed by whitespace and a directive argument running to end-of-line.
/// An end marker is a line whose first non-blank text is the `end` token,
/// optionally followed by whitespace and a trailing stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerGrammar {
	pub begin: &'static str,
	pub end: &'static str,
	/// Provenance token written ahead of inlined remote content. Grammars
	/// with a stamp only treat `http(s)` urls as directive arguments, and a
	/// region already holding a `<stamp> <url>` line closes at `<end> <url>`.
	pub stamp: Option<&'static str>,
}

impl MarkerGrammar {
	/// `# include <arg>` … `# end`, used by build files.
	pub const HASH: Self = Self {
		begin: "# include",
		end: "# end",
		stamp: None,
	};
	/// `# include <url>` … `# end [<url>]`, used by ignore files.
	pub const HASH_STAMPED: Self = Self {
		begin: "# include",
		end: "# end",
		stamp: Some("# begin"),
	};
	/// `// include <arg>` … `// end`, used by C and C++ sources.
	pub const SLASH: Self = Self {
		begin: "// include",
		end: "// end",
		stamp: None,
	};

	/// Returns the directive argument if `line` (without its terminator) is a
	/// begin marker. The argument may be empty unless the grammar is stamped.
	fn match_begin<'a>(&self, line: &'a str) -> Option<&'a str> {
		let argument = keyword_tail(line.trim_start(), self.begin)?.trim();
		if self.stamp.is_some() && !is_url_argument(argument) {
			return None;
		}
		Some(argument)
	}

	/// Returns the trimmed trailing stamp if `line` is an end marker. A bare
	/// end marker has an empty stamp.
	fn match_end<'a>(&self, line: &'a str) -> Option<&'a str> {
		keyword_tail(line.trim_start(), self.end).map(str::trim)
	}
}

/// A single `http://` or `https://` token. Anything else after `# include`
/// in an ignore file is an ordinary comment.
fn is_url_argument(argument: &str) -> bool {
	(argument.starts_with("http://") || argument.starts_with("https://"))
		&& !argument.contains(char::is_whitespace)
}

/// `text` with `keyword` stripped, provided the keyword is followed by
/// whitespace or the end of the line.
fn keyword_tail<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
	let rest = text.strip_prefix(keyword)?;
	if rest.is_empty() || rest.starts_with(char::is_whitespace) {
		Some(rest)
	} else {
		None
	}
}

/// One begin/end delimited region discovered in a host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRegion {
	/// Byte span of the begin-marker line, from its keyword up to (not
	/// including) the line terminator.
	pub begin: Range<usize>,
	/// Byte span of the end-marker line, from its token up to (not including)
	/// the line terminator.
	pub end: Range<usize>,
	/// The glob pattern or url following the begin keyword, trimmed.
	pub argument: String,
	/// 1-indexed line number of the begin marker.
	pub line: usize,
}

/// A line of `text` located by byte offsets.
struct Line<'a> {
	/// Offset of the first byte of the line.
	start: usize,
	/// The line without its `\n` or `\r\n` terminator.
	content: &'a str,
}

impl Line<'_> {
	fn indent(&self) -> usize {
		self.content.len() - self.content.trim_start().len()
	}

	fn marker_span(&self) -> Range<usize> {
		self.start + self.indent()..self.start + self.content.len()
	}
}

fn lines_from(text: &str, from: usize) -> impl Iterator<Item = Line<'_>> {
	let mut start = from;
	text[from..].split_inclusive('\n').map(move |raw| {
		let line_start = start;
		start += raw.len();
		let content = raw.strip_suffix('\n').unwrap_or(raw);
		let content = content.strip_suffix('\r').unwrap_or(content);
		Line {
			start: line_start,
			content,
		}
	})
}

fn line_number(text: &str, offset: usize) -> usize {
	text.as_bytes()[..offset]
		.iter()
		.filter(|byte| **byte == b'\n')
		.count() + 1
}

/// Locate the end marker of a stamped region.
///
/// When the line after the directive is `<stamp> <url>` the region was
/// inlined by an earlier run and closes at the matching `<end> <url>`, so
/// inlined content may hold bare end markers or further directives. The url
/// on the stamp is used even if the directive has since been edited.
/// Otherwise the first end marker closes the region, whatever it carries,
/// and the search never runs past the next directive.
fn find_stamped_end<'a>(
	mut lines: impl Iterator<Item = Line<'a>>,
	grammar: &MarkerGrammar,
	stamp: &str,
) -> Option<Line<'a>> {
	let first = lines.next()?;
	let inlined = keyword_tail(first.content.trim_start(), stamp)
		.map(str::trim)
		.filter(|url| !url.is_empty());
	if let Some(url) = inlined {
		return lines.find(|candidate| grammar.match_end(candidate.content) == Some(url));
	}

	std::iter::once(first)
		.chain(lines)
		.take_while(|candidate| grammar.match_begin(candidate.content).is_none())
		.find(|candidate| grammar.match_end(candidate.content).is_some())
}

/// Find the next marker region starting at or after `from`.
///
/// Returns `Ok(None)` when no further begin marker exists. A begin marker
/// with an empty argument, or one that is never closed, is an error. An
/// offset inside a multi-byte character is moved forward to the next
/// character boundary.
pub fn scan(text: &str, from: usize, grammar: &MarkerGrammar) -> RegenResult<Option<MarkerRegion>> {
	let from = char_boundary_at_or_after(text, from);
	let mut lines = lines_from(text, from);

	let Some((begin_line, argument)) = lines
		.by_ref()
		.find_map(|line| grammar.match_begin(line.content).map(|arg| (line, arg)))
	else {
		return Ok(None);
	};

	let line = line_number(text, begin_line.start);
	if argument.is_empty() {
		return Err(RegenError::EmptyDirectiveArgument {
			marker: grammar.begin.to_string(),
			line,
		});
	}

	let end_line = match grammar.stamp {
		Some(stamp) => find_stamped_end(lines, grammar, stamp),
		None => lines.find(|candidate| grammar.match_end(candidate.content).is_some()),
	};
	let Some(end_line) = end_line else {
		return Err(RegenError::MissingEndMarker {
			marker: format!("{} {argument}", grammar.begin),
			end: grammar.end.to_string(),
			line,
		});
	};

	tracing::trace!(line, argument, "found marker region");
	Ok(Some(MarkerRegion {
		begin: begin_line.marker_span(),
		end: end_line.marker_span(),
		argument: argument.to_string(),
		line,
	}))
}

/// Lazily yields every marker region of an unchanging document in order.
///
/// Iteration stops after the first error.
#[derive(Debug, Clone)]
pub struct MarkerScanner<'a> {
	text: &'a str,
	grammar: MarkerGrammar,
	offset: usize,
}

impl<'a> MarkerScanner<'a> {
	pub fn new(text: &'a str, grammar: MarkerGrammar) -> Self {
		Self {
			text,
			grammar,
			offset: 0,
		}
	}
}

impl Iterator for MarkerScanner<'_> {
	type Item = RegenResult<MarkerRegion>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.offset >= self.text.len() {
			return None;
		}

		match scan(self.text, self.offset, &self.grammar) {
			Ok(Some(region)) => {
				self.offset = line_end(self.text, region.end.end);
				Some(Ok(region))
			}
			Ok(None) => {
				self.offset = self.text.len();
				None
			}
			Err(e) => {
				self.offset = self.text.len();
				Some(Err(e))
			}
		}
	}
}

/// Offset just past the line terminator following `offset`, or the end of
/// `text` when the line is the last one.
pub fn line_end(text: &str, offset: usize) -> usize {
	let offset = char_boundary_at_or_after(text, offset);
	text[offset..]
		.find('\n')
		.map_or(text.len(), |idx| offset + idx + 1)
}

fn char_boundary_at_or_after(text: &str, offset: usize) -> usize {
	let mut offset = offset.min(text.len());
	while !text.is_char_boundary(offset) {
		offset += 1;
	}
	offset
}
