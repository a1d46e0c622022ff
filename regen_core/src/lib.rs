//! `regen_core` keeps machine-generated regions of text files synchronized
//! with an external source of truth. A region is delimited by a begin marker
//! carrying a directive argument and an end marker:
//!
//! ```text
//! add_executable(app
//! # include src/**/*.cc
//!     src/main.cc
//! # end
//! )
//! ```
//!
//! Everything outside the markers is left byte-for-byte untouched, and
//! running the engine again over an unchanged tree is a no-op.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Host file
//!   → Scanner (finds the next begin/end marker pair and its argument)
//!   → Resolver (glob listing or remote fetch → replacement lines)
//!   → Splicer (rewrites the region interior, resumes after the end marker)
//!   → Host I/O (single atomic write once every region is resolved)
//! ```
//!
//! ## Region kinds
//!
//! - [`RegionKind::SourceList`]: `# include <glob>` … `# end`, emits
//!   indented paths relative to the project root.
//! - [`RegionKind::IncludeList`]: `// include <glob>` … `// end`, emits
//!   `#include "<path>"` lines relative to the host file.
//! - [`RegionKind::RemoteInclude`]: `# include <url>` … `# end`, inlines the
//!   fetched document between `# begin <url>` and `# end <url>` stamps.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use regen_core::RegionResolver;
//! use regen_core::regenerate_file;
//! use regen_core::write_regeneration;
//! use std::path::Path;
//!
//! let resolver = RegionResolver::SourceList {
//! 	root: ".".into(),
//! 	indent: 4,
//! };
//! let result = regenerate_file(Path::new("CMakeLists.txt"), &resolver).unwrap();
//! write_regeneration(&result).unwrap();
//! ```

pub use engine::*;
pub use error::*;
pub use fetch::*;
pub use resolver::*;
pub use scanner::*;
pub use splice::*;

pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
mod fetch;
pub mod glob;
mod resolver;
mod scanner;
pub mod scaffold;
mod splice;
