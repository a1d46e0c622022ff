mod common;

use regen_core::AnyEmptyResult;

fn write_tree(root: &std::path::Path, files: &[&str]) -> AnyEmptyResult {
	for file in files {
		let path = root.join(file);
		std::fs::create_dir_all(path.parent().ok_or("no parent")?)?;
		std::fs::write(path, "")?;
	}
	Ok(())
}

#[test]
fn sources_updates_default_host_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_tree(tmp.path(), &["src/a.cc", "src/b/c.cc"])?;
	std::fs::write(
		tmp.path().join("CMakeLists.txt"),
		"project(app)\nadd_executable(app\n# include src/**/*.cc\n# end\n)\n",
	)?;

	common::regen_cmd()
		.current_dir(tmp.path())
		.arg("sources")
		.assert()
		.success()
		.stdout(predicates::str::contains("Updated"));

	let content = std::fs::read_to_string(tmp.path().join("CMakeLists.txt"))?;
	assert_eq!(
		content,
		"project(app)\nadd_executable(app\n# include src/**/*.cc\n    src/a.cc\n    src/b/c.cc\n# \
		 end\n)\n"
	);

	Ok(())
}

#[test]
fn sources_second_run_is_a_noop() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_tree(tmp.path(), &["src/main.cc"])?;
	let host = tmp.path().join("CMakeLists.txt");
	std::fs::write(&host, "# include src/*.cc\n# end\n")?;

	common::regen_cmd()
		.arg("sources")
		.arg(&host)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();
	let first = std::fs::read(&host)?;

	common::regen_cmd()
		.arg("sources")
		.arg(&host)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already up to date"));
	assert_eq!(std::fs::read(&host)?, first);

	Ok(())
}

#[test]
fn sources_missing_end_marker_fails_without_writing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_tree(tmp.path(), &["src/main.cc"])?;
	let host = tmp.path().join("CMakeLists.txt");
	let original = "project(app)\n# include src/*.cc\n    old.cc\n";
	std::fs::write(&host, original)?;

	common::regen_cmd()
		.arg("sources")
		.arg(&host)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("missing end marker"))
		.stderr(predicates::str::contains("line 2"));

	assert_eq!(std::fs::read_to_string(&host)?, original);

	Ok(())
}

#[test]
fn sources_missing_host_file_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::regen_cmd()
		.current_dir(tmp.path())
		.arg("sources")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("cannot read host file"));

	Ok(())
}

#[test]
fn sources_invalid_glob_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let host = tmp.path().join("CMakeLists.txt");
	std::fs::write(&host, "# include src/[*.cc\n# end\n")?;

	common::regen_cmd()
		.arg("sources")
		.arg(&host)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("invalid glob pattern `src/[*.cc`"));

	Ok(())
}

#[test]
fn sources_respects_root_and_config_indent() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_tree(tmp.path(), &["project/lib/x.cc"])?;
	std::fs::create_dir_all(tmp.path().join("build"))?;
	std::fs::write(tmp.path().join("regen.toml"), "[sources]\nindent = 2\n")?;
	let host = tmp.path().join("build/sources.cmake");
	std::fs::write(&host, "# include lib/*.cc\n# end\n")?;

	common::regen_cmd()
		.arg("sources")
		.arg(&host)
		.arg("--root")
		.arg(tmp.path().join("project"))
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert_eq!(
		std::fs::read_to_string(&host)?,
		"# include lib/*.cc\n  lib/x.cc\n# end\n"
	);

	Ok(())
}

#[test]
fn sources_check_reports_stale_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_tree(tmp.path(), &["src/new.cc"])?;
	let host = tmp.path().join("CMakeLists.txt");
	let original = "# include src/*.cc\n    src/old.cc\n# end\n";
	std::fs::write(&host, original)?;

	common::regen_cmd()
		.arg("sources")
		.arg(&host)
		.arg("--check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("is out of date"))
		.stderr(predicates::str::contains("-    src/old.cc"))
		.stderr(predicates::str::contains("+    src/new.cc"));

	assert_eq!(std::fs::read_to_string(&host)?, original);

	Ok(())
}

#[test]
fn sources_dry_run_does_not_write() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_tree(tmp.path(), &["src/new.cc"])?;
	let host = tmp.path().join("CMakeLists.txt");
	let original = "# include src/*.cc\n# end\n";
	std::fs::write(&host, original)?;

	common::regen_cmd()
		.arg("sources")
		.arg(&host)
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("would update"));

	assert_eq!(std::fs::read_to_string(&host)?, original);

	Ok(())
}
