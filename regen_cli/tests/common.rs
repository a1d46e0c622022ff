use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn regen_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("regen"));
	cmd.env("NO_COLOR", "1").env_remove("REGEN_LOG");
	cmd
}
