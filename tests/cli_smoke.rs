use predicates::str::contains;

mod support;

use support::tm_cmd;

#[test]
fn tm_help_works() {
    tm_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("TaskMaster"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = [
        "ui",
        "add",
        "list",
        "show",
        "edit",
        "done",
        "rm",
        "stats",
        "categories",
    ];

    for cmd in subcommands {
        tm_cmd().arg(cmd).arg("--help").assert().success();
    }
}

#[test]
fn version_flag_works() {
    tm_cmd().arg("--version").assert().success();
}

#[test]
fn unknown_subcommand_fails() {
    tm_cmd().arg("frobnicate").assert().failure();
}
