use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use regen_core::RegionKind;
use regen_core::scaffold::TypeKeyword;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Regenerate marker-delimited regions of build files, sources, and ignore files.",
	long_about = "regen keeps derived regions of text files in sync with their source of \
	              truth.\n\nA region starts at an `# include <glob|url>` or `// include <glob>` \
	              line and ends at the next `# end` or `// end` line. Everything between the \
	              markers is rewritten; everything outside them is left untouched.\n\nQuick \
	              start:\n  regen sources    Refresh source lists in CMakeLists.txt\n  regen \
	              headers    Refresh #include lists in target.cpp\n  regen gitignore  Inline \
	              remote ignore templates into .gitignore"
)]
pub struct RegenCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Project directory searched for `regen.toml`. Defaults to the current
	/// directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output and debug logging.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Refresh `# include <glob>` source lists in a build file.
	///
	/// Each region is replaced with the sorted files matching the glob, one
	/// indented path per line, relative to the source root.
	Sources {
		#[command(flatten)]
		target: RegenerateArgs,

		/// Directory globs are expanded from. Defaults to the directory
		/// containing the host file.
		#[arg(long)]
		root: Option<PathBuf>,
	},
	/// Refresh `// include <glob>` header lists in a C or C++ source.
	///
	/// Each region is replaced with one `#include "<path>"` line per matching
	/// header, relative to the host file's directory.
	Headers {
		#[command(flatten)]
		target: RegenerateArgs,
	},
	/// Inline remote documents referenced by `# include <url>` lines.
	///
	/// The fetched body is written between `# begin <url>` and `# end <url>`
	/// stamps. Nested includes inside fetched content are not expanded.
	Gitignore {
		#[command(flatten)]
		target: RegenerateArgs,
	},
	/// Create a header and source file pair for a new type.
	///
	/// `kl::graphics::IOStream` produces `include/kl/graphics/io_stream.hh`
	/// and `src/kl/graphics/io_stream.cc`. Existing files are never
	/// overwritten.
	Class {
		/// The type name, optionally namespace-qualified with `::`.
		name: String,

		/// Declare the type with `class` or `struct`.
		#[arg(long = "type", short = 't', value_enum, default_value_t = ClassKind::Class)]
		kind: ClassKind,

		/// Directory receiving the source file.
		#[arg(long, short = 's', default_value = "src")]
		src_dir: PathBuf,

		/// Directory receiving the header file.
		#[arg(long, short = 'd', default_value = "include")]
		header_dir: PathBuf,
	},
	/// Print a binary file as a `std::array<std::byte, N>` initialiser.
	ToArray {
		/// The file to convert.
		file: PathBuf,
	},
}

#[derive(Debug, Clone, Args)]
pub struct RegenerateArgs {
	/// The host file to regenerate. Each subcommand has a conventional
	/// default.
	pub file: Option<PathBuf>,

	/// Compute the result and report it without writing.
	#[arg(long, default_value_t = false)]
	pub dry_run: bool,

	/// Exit with status 1 and print a diff when the file is out of date.
	/// Never writes.
	#[arg(long, default_value_t = false, conflicts_with = "dry_run")]
	pub check: bool,
}

impl RegenerateArgs {
	/// The named host file, or the conventional one for `kind`.
	pub fn host_file(&self, kind: RegionKind) -> PathBuf {
		self.file
			.clone()
			.unwrap_or_else(|| PathBuf::from(kind.default_host_file()))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClassKind {
	Class,
	Struct,
}

impl From<ClassKind> for TypeKeyword {
	fn from(value: ClassKind) -> Self {
		match value {
			ClassKind::Class => TypeKeyword::Class,
			ClassKind::Struct => TypeKeyword::Struct,
		}
	}
}
