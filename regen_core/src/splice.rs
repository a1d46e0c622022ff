use crate::scanner::MarkerRegion;
use crate::scanner::line_end;

/// The content to write between a region's markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacement {
	/// Lines placed between the begin and end markers, in order.
	pub lines: Vec<String>,
	/// When set, replaces the whole end-marker line.
	pub end_marker: Option<String>,
}

impl Replacement {
	pub fn lines(lines: Vec<String>) -> Self {
		Self {
			lines,
			end_marker: None,
		}
	}
}

/// The outcome of splicing one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
	pub text: String,
	/// Offset in `text` just past the rewritten end-marker line, where
	/// scanning resumes.
	pub resume: usize,
}

/// Detect the line terminator used by `text`, defaulting to `\n`.
pub fn detect_line_ending(text: &str) -> &'static str {
	match text.find('\n') {
		Some(idx) if idx > 0 && text.as_bytes()[idx - 1] == b'\r' => "\r\n",
		_ => "\n",
	}
}

/// Replace the interior of `region` with `replacement`.
///
/// Whitespace trailing the begin marker and any blank lines before the end
/// marker are dropped, so the interior becomes exactly one line per
/// replacement line. The end marker keeps its indentation. Nothing outside
/// the begin marker's line and the end marker is touched.
pub fn splice(
	text: &str,
	region: &MarkerRegion,
	replacement: &Replacement,
	line_ending: &str,
) -> Spliced {
	let head = text[..region.begin.end].trim_end();
	let end_line_start = text[..region.end.start].rfind('\n').map_or(0, |idx| idx + 1);
	let end_indent = &text[end_line_start..region.end.start];
	let end_marker = replacement
		.end_marker
		.as_deref()
		.unwrap_or(&text[region.end.clone()]);
	let tail = &text[region.end.end..];

	let interior_len: usize = replacement
		.lines
		.iter()
		.map(|line| line.len() + line_ending.len())
		.sum();
	let mut buf = String::with_capacity(
		head.len() + line_ending.len() + interior_len + end_indent.len() + end_marker.len()
			+ tail.len(),
	);

	buf.push_str(head);
	buf.push_str(line_ending);
	for line in &replacement.lines {
		buf.push_str(line);
		buf.push_str(line_ending);
	}
	buf.push_str(end_indent);
	let marker_start = buf.len();
	buf.push_str(end_marker);
	buf.push_str(tail);

	let resume = line_end(&buf, marker_start);
	Spliced { text: buf, resume }
}
