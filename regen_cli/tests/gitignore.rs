mod common;

use regen_core::AnyEmptyResult;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;

#[tokio::test(flavor = "multi_thread")]
async fn gitignore_inlines_fetched_template() -> AnyEmptyResult {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/C++.gitignore"))
		.respond_with(ResponseTemplate::new(200).set_body_string("*.o\n*.obj\n"))
		.mount(&server)
		.await;

	let url = format!("{}/C++.gitignore", server.uri());
	let tmp = tempfile::tempdir()?;
	let host = tmp.path().join(".gitignore");
	std::fs::write(&host, format!("/build\n# include {url}\n# end\n.cache/\n"))?;

	for _ in 0..2 {
		common::regen_cmd()
			.arg("gitignore")
			.arg(&host)
			.arg("--path")
			.arg(tmp.path())
			.assert()
			.success();
	}

	assert_eq!(
		std::fs::read_to_string(&host)?,
		format!("/build\n# include {url}\n# begin {url}\n*.o\n*.obj\n# end {url}\n.cache/\n")
	);

	Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn gitignore_fetch_failure_leaves_file_untouched() -> AnyEmptyResult {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.respond_with(ResponseTemplate::new(500))
		.mount(&server)
		.await;

	let tmp = tempfile::tempdir()?;
	let host = tmp.path().join(".gitignore");
	let original = format!("# include {}/broken\n# end\n", server.uri());
	std::fs::write(&host, &original)?;

	common::regen_cmd()
		.arg("gitignore")
		.arg(&host)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to fetch"));

	assert_eq!(std::fs::read_to_string(&host)?, original);

	Ok(())
}

#[test]
fn gitignore_leaves_plain_comments_alone() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let host = tmp.path().join(".gitignore");
	let original = "# include build outputs below\nbuild/\n# end of build outputs\n# include \
	                file:///etc/hosts\n";
	std::fs::write(&host, original)?;

	common::regen_cmd()
		.arg("gitignore")
		.arg(&host)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already up to date (0 region(s))"));

	assert_eq!(std::fs::read_to_string(&host)?, original);

	Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn gitignore_edited_url_keeps_following_rules() -> AnyEmptyResult {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.respond_with(ResponseTemplate::new(200).set_body_string("*.tmp\n"))
		.mount(&server)
		.await;

	let url = format!("{}/new", server.uri());
	let tmp = tempfile::tempdir()?;
	let host = tmp.path().join(".gitignore");
	std::fs::write(
		&host,
		format!("# include {url}\n# begin {url}x\nold\n# end {url}x\nkeep-me\n"),
	)?;

	common::regen_cmd()
		.arg("gitignore")
		.arg(&host)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert_eq!(
		std::fs::read_to_string(&host)?,
		format!("# include {url}\n# begin {url}\n*.tmp\n# end {url}\nkeep-me\n")
	);

	Ok(())
}
