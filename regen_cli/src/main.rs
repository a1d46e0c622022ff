use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use regen_cli::ClassKind;
use regen_cli::Commands;
use regen_cli::RegenCli;
use regen_cli::RegenerateArgs;
use regen_core::HttpFetcher;
use regen_core::RegionKind;
use regen_core::RegionResolver;
use regen_core::config::RegenConfig;
use regen_core::host_dir;
use regen_core::regenerate_file;
use regen_core::scaffold::TypeName;
use regen_core::scaffold::render_byte_array;
use regen_core::scaffold::scaffold_type;
use regen_core::scaffold::write_scaffold;
use regen_core::write_regeneration;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = RegenCli::parse();

	// Respect NO_COLOR env var, --no-color flag, and terminal support.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stderr).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::Sources { target, root }) => {
			run_regenerate(&args, RegionKind::SourceList, target, root.as_deref())
		}
		Some(Commands::Headers { target }) => {
			run_regenerate(&args, RegionKind::IncludeList, target, None)
		}
		Some(Commands::Gitignore { target }) => {
			run_regenerate(&args, RegionKind::RemoteInclude, target, None)
		}
		Some(Commands::Class {
			name,
			kind,
			src_dir,
			header_dir,
		}) => run_class(name, *kind, src_dir, header_dir),
		Some(Commands::ToArray { file }) => run_to_array(file),
		None => {
			eprintln!("No subcommand specified. Run `regen --help` for usage.");
			process::exit(2);
		}
	};

	if let Err(e) = result {
		match e.downcast::<regen_core::RegenError>() {
			Ok(regen_err) if args.verbose => {
				let report: miette::Report = (*regen_err).into();
				eprintln!("{report:?}");
			}
			Ok(regen_err) => {
				eprintln!("{} {regen_err}", colored!("error:", red));
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn init_tracing(verbose: bool, use_color: bool) {
	let default_directives = if verbose { "regen_core=debug,regen=debug" } else { "warn" };
	let filter = EnvFilter::try_from_env("REGEN_LOG")
		.unwrap_or_else(|_| EnvFilter::new(default_directives));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn resolve_root(args: &RegenCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run_regenerate(
	args: &RegenCli,
	kind: RegionKind,
	target: &RegenerateArgs,
	source_root: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
	let host = target.host_file(kind);
	let config = RegenConfig::load_or_default(&resolve_root(args))?;

	let http;
	let resolver = match kind {
		RegionKind::SourceList => {
			RegionResolver::SourceList {
				root: source_root.map_or_else(|| host_dir(&host), Path::to_path_buf),
				indent: config.sources.indent,
			}
		}
		RegionKind::IncludeList => {
			RegionResolver::IncludeList {
				dir: host_dir(&host),
				indent: config.headers.indent,
			}
		}
		RegionKind::RemoteInclude => {
			http = HttpFetcher::new(&config.fetch)?;
			RegionResolver::RemoteInclude { fetcher: &http }
		}
	};

	if args.verbose {
		println!("Regenerating {} ({kind})", host.display());
	}

	let result = regenerate_file(&host, &resolver)?;
	let regions = result.regeneration.regions;
	let changed = result.regeneration.is_changed();

	if target.check {
		if changed {
			eprintln!(
				"{} {} is out of date ({regions} region(s))",
				colored!("stale:", yellow),
				host.display()
			);
			print_diff(&result.regeneration.original, &result.regeneration.content);
			process::exit(1);
		}
		println!("{} is up to date ({regions} region(s)).", host.display());
		return Ok(());
	}

	if !changed {
		println!("{} is already up to date ({regions} region(s)).", host.display());
		return Ok(());
	}

	if target.dry_run {
		println!(
			"Dry run: would update {} ({regions} region(s)).",
			host.display()
		);
		if args.verbose {
			print_diff(&result.regeneration.original, &result.regeneration.content);
		}
		return Ok(());
	}

	write_regeneration(&result)?;
	println!(
		"{} {} ({regions} region(s)).",
		colored!("Updated", green),
		host.display()
	);

	Ok(())
}

fn run_class(
	name: &str,
	kind: ClassKind,
	src_dir: &Path,
	header_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
	let name = TypeName::parse(name)?;
	let scaffold = scaffold_type(&name, kind.into(), src_dir, header_dir);
	write_scaffold(&scaffold)?;

	println!(
		"Created {} and {}",
		scaffold.header_path.display(),
		scaffold.source_path.display()
	);

	Ok(())
}

fn run_to_array(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
	let bytes = std::fs::read(file).map_err(regen_core::RegenError::from)?;
	print!("{}", render_byte_array(&bytes));

	Ok(())
}

fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}
