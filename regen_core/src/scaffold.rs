//! Small templating helpers that sit next to the regeneration engine: a
//! header/source pair generator for new C++ types and a binary-to-array
//! converter for embedding resources.

use std::path::Path;
use std::path::PathBuf;

use crate::RegenError;
use crate::RegenResult;

/// Whether the scaffolded type is declared with `class` or `struct`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeKeyword {
	#[default]
	Class,
	Struct,
}

impl TypeKeyword {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Class => "class",
			Self::Struct => "struct",
		}
	}
}

/// A namespace-qualified type name such as `kl::graphics::Texture`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
	pub namespace: Vec<String>,
	pub basename: String,
}

impl TypeName {
	pub fn parse(name: &str) -> RegenResult<Self> {
		let mut parts: Vec<String> = name.trim().split("::").map(str::to_string).collect();
		if !parts.iter().all(|part| is_identifier(part)) {
			return Err(RegenError::InvalidTypeName(name.to_string()));
		}

		let basename = parts
			.pop()
			.ok_or_else(|| RegenError::InvalidTypeName(name.to_string()))?;
		Ok(Self {
			namespace: parts,
			basename,
		})
	}

	/// The basename in `snake_case`, used for file names.
	pub fn file_stem(&self) -> String {
		to_snake_case(&self.basename)
	}

	/// `NS_OTHER_TYPE_NAME_HH`
	pub fn include_guard(&self) -> String {
		let mut parts: Vec<String> = self
			.namespace
			.iter()
			.map(|ns| ns.to_uppercase())
			.collect();
		parts.push(self.file_stem().to_uppercase());
		parts.push("HH".to_string());
		parts.join("_")
	}

	fn qualified_namespace(&self) -> Option<String> {
		(!self.namespace.is_empty()).then(|| self.namespace.join("::"))
	}
}

fn is_identifier(text: &str) -> bool {
	let mut chars = text.chars();
	chars
		.next()
		.is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `AClass` becomes `a_class` and `IOStream` becomes `io_stream`.
pub fn to_snake_case(name: &str) -> String {
	let chars: Vec<char> = name.chars().collect();

	// A lowercase letter or digit followed by an uppercase letter.
	let mut first = Vec::with_capacity(chars.len() + 4);
	for (idx, &c) in chars.iter().enumerate() {
		if idx > 0 {
			let prev = chars[idx - 1];
			if (prev.is_ascii_lowercase() || prev.is_ascii_digit()) && c.is_ascii_uppercase() {
				first.push('_');
			}
		}
		first.push(c);
	}

	// An uppercase run followed by a capitalised word.
	let mut second = String::with_capacity(first.len() + 4);
	for (idx, &c) in first.iter().enumerate() {
		second.push(c);
		let next = first.get(idx + 1).copied();
		let after = first.get(idx + 2).copied();
		if c.is_ascii_uppercase()
			&& next.is_some_and(|n| n.is_ascii_uppercase())
			&& after.is_some_and(|a| a.is_ascii_lowercase())
		{
			second.push('_');
		}
	}

	second.to_lowercase()
}

/// Generated header and source for a new type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffold {
	pub header_path: PathBuf,
	pub source_path: PathBuf,
	pub header: String,
	pub source: String,
}

/// Build the header/source pair for `name`. Paths are `<header_dir>/<ns>/…/
/// <snake>.hh` and `<src_dir>/<ns>/…/<snake>.cc`.
pub fn scaffold_type(
	name: &TypeName,
	keyword: TypeKeyword,
	src_dir: &Path,
	header_dir: &Path,
) -> Scaffold {
	let stem = name.file_stem();
	let mut header_path = header_dir.to_path_buf();
	let mut source_path = src_dir.to_path_buf();
	for ns in &name.namespace {
		header_path.push(ns);
		source_path.push(ns);
	}
	header_path.push(format!("{stem}.hh"));
	source_path.push(format!("{stem}.cc"));

	Scaffold {
		header_path,
		source_path,
		header: render_header(name, keyword),
		source: render_source(name),
	}
}

pub fn render_header(name: &TypeName, keyword: TypeKeyword) -> String {
	let guard = name.include_guard();
	let basename = &name.basename;
	let body = format!(
		"{keyword} {basename} {{\npublic:\n    {basename}() = default;\n    ~{basename}() = \
		 default;\n\nprivate:\n\n}};\n\n",
		keyword = keyword.as_str(),
	);
	let body = match name.qualified_namespace() {
		Some(ns) => format!("namespace {ns} {{\n{body}}} // namespace {ns}\n\n"),
		None => body,
	};

	format!("#ifndef {guard}\n#define {guard}\n\n{body}#endif // {guard}\n")
}

pub fn render_source(name: &TypeName) -> String {
	let body = format!("// Implement {} methods here\n\n", name.basename);
	match name.qualified_namespace() {
		Some(ns) => format!("namespace {ns} {{\n{body}}} // namespace {ns}\n"),
		None => body,
	}
}

/// Write a scaffold to disk, creating parent directories. Existing files are
/// never overwritten; both paths are checked before anything is written.
pub fn write_scaffold(scaffold: &Scaffold) -> RegenResult<()> {
	for path in [&scaffold.header_path, &scaffold.source_path] {
		if path.exists() {
			return Err(RegenError::ScaffoldExists(path.clone()));
		}
	}

	for (path, content) in [
		(&scaffold.header_path, &scaffold.header),
		(&scaffold.source_path, &scaffold.source),
	] {
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(path, content)?;
	}

	Ok(())
}

/// Render `bytes` as a `std::array<std::byte, N>` initialiser.
pub fn render_byte_array(bytes: &[u8]) -> String {
	let mut elements = String::with_capacity(bytes.len() * 15);
	for byte in bytes {
		elements.push_str("std::byte(");
		elements.push_str(&byte.to_string());
		elements.push_str("), ");
	}

	format!(
		"const std::array<std::byte, {}> data = {{\n{elements}}};\n",
		bytes.len()
	)
}
