use tm::config::Config;
use tm::error::{exit_codes, Error};
use tm::task::Priority;

mod support;

use support::TestDir;

#[test]
fn missing_explicit_path_is_a_config_error() {
    let dir = TestDir::new();
    let err = Config::load(&dir.path().join("absent.toml")).expect_err("must fail");
    assert!(matches!(err, Error::InvalidConfig(_)));
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}

#[test]
fn full_file_round_trips() {
    let dir = TestDir::new();
    let path = dir.write_config(
        r#"
[tasks]
id_prefix = "todo"
id_min_len = 6
default_priority = "high"
seed = false

[categories]
defaults = ["Home", "Garden"]
"#,
    );

    let config = Config::load(&path).expect("load");
    assert_eq!(config.tasks.id_prefix, "todo");
    assert_eq!(config.tasks.id_min_len, 6);
    assert_eq!(config.tasks.default_priority, Priority::High);
    assert!(!config.tasks.seed);
    assert_eq!(config.categories.defaults, vec!["Home", "Garden"]);
}

#[test]
fn partial_file_keeps_defaults_for_the_rest() {
    let dir = TestDir::new();
    let path = dir.write_config("[categories]\ndefaults = [\"Solo\"]\n");

    let config = Config::load(&path).expect("load");
    assert_eq!(config.categories.defaults, vec!["Solo"]);
    assert_eq!(config.tasks.id_prefix, "task");
    assert!(config.tasks.seed);
}

#[test]
fn malformed_toml_is_rejected() {
    let dir = TestDir::new();
    let path = dir.write_config("[tasks\nid_prefix = ");

    let err = Config::load(&path).expect_err("must fail");
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn unknown_priority_is_rejected() {
    let dir = TestDir::new();
    let path = dir.write_config("[tasks]\ndefault_priority = \"urgent\"\n");

    let err = Config::load(&path).expect_err("must fail");
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn out_of_range_id_min_len_is_rejected() {
    let dir = TestDir::new();
    for contents in ["[tasks]\nid_min_len = 0\n", "[tasks]\nid_min_len = 99\n"] {
        let path = dir.write_config(contents);
        let err = Config::load(&path).expect_err("must fail");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
