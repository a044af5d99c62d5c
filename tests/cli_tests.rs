mod common;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use regex::Regex;
use tempfile::TempDir;

use common::{budget, page, write_fixture};

const BIN_NAME: &str = "check_budgets";

/// Command isolated from the caller's environment and config directory.
fn probe_command(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env_remove("CHECK_BUDGETS_BUDGET")
        .env_remove("CHECK_BUDGETS_SOURCE")
        .env_remove("CHECK_BUDGETS_CONFIG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path());
    cmd
}

#[test]
fn overspent_forecast_exits_critical() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = write_fixture(&page(vec![
        budget("infra", "100.0", "80.0", Some("120.0")),
        budget("dev", "50.0", "10.0", None),
    ]));

    probe_command(&home)
        .arg("--source")
        .arg(&path)
        .assert()
        .code(2)
        .stdout(
            "Budget forecast exceeds limit: infra(fcst:120.00;limit:100.00) \
             | 'infra'=80.0USD;100.0;100.0 'dev'=10.0USD;50.0;50.0\n",
        );
}

#[test]
fn named_budget_within_limit_exits_ok() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = write_fixture(&page(vec![
        budget("infra", "100.0", "80.0", Some("120.0")),
        budget("dev", "50.0", "10.0", None),
    ]));

    probe_command(&home)
        .args(["--budget", "dev", "--source"])
        .arg(&path)
        .assert()
        .code(0)
        .stdout("Budgets forecast within limit: dev(act:10.00;limit:50.00) | 'dev'=10.0USD;50.0;50.0\n");
}

#[test]
fn unknown_budget_exits_unknown() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = write_fixture(&page(vec![budget("infra", "1", "0", None)]));

    probe_command(&home)
        .args(["--budget", "ghost", "--source"])
        .arg(&path)
        .assert()
        .code(3)
        .stdout(contains("UNKNOWN - budget `ghost` not found").and(contains("|").not()));
}

#[test]
fn reads_budgets_from_stdin() {
    let home = TempDir::new().unwrap();

    probe_command(&home)
        .args(["--source", "-"])
        .write_stdin(page(Vec::new()))
        .assert()
        .code(0)
        .stdout("Budgets forecast within limit: |\n");
}

#[test]
fn missing_source_exits_unknown() {
    let home = TempDir::new().unwrap();

    probe_command(&home)
        .assert()
        .code(3)
        .stdout(contains("UNKNOWN - Configuration error"));
}

#[test]
fn config_file_supplies_source_and_budget() {
    let home = TempDir::new().unwrap();
    let (dir, path) = write_fixture(&page(vec![
        budget("infra", "100", "101", None),
        budget("dev", "50", "10", None),
    ]));
    let config = dir.path().join("probe.json");
    std::fs::write(
        &config,
        serde_json::json!({ "source": path, "budget": "dev" }).to_string(),
    )
    .unwrap();

    probe_command(&home)
        .arg("--config")
        .arg(&config)
        .assert()
        .code(0)
        .stdout(contains("dev(act:10.00;limit:50.00)"));
}

#[test]
fn environment_variables_select_budget() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = write_fixture(&page(vec![budget("infra", "100", "101", None)]));

    probe_command(&home)
        .env("CHECK_BUDGETS_SOURCE", &path)
        .env("CHECK_BUDGETS_BUDGET", "infra")
        .assert()
        .code(2)
        .stdout(contains("infra(act:101.00;limit:100.00)"));
}

#[test]
fn perfdata_tokens_are_single_fields() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = write_fixture(&page(vec![
        budget("Team's monthly spend", "10", "2.5", None),
        budget("ec2", "10", "1", None),
    ]));

    let output = probe_command(&home)
        .arg("--source")
        .arg(&path)
        .output()
        .expect("run probe");
    let stdout = String::from_utf8(output.stdout).unwrap();
    let perfdata = stdout.trim_end().split(" | ").nth(1).expect("perfdata block");

    let token = Regex::new(r"^'(?:[^']|'')+'=[0-9.]+[A-Za-z]*;[0-9.]+;[0-9.]+$").unwrap();
    let tokens: Vec<&str> = perfdata.split(" '").collect();
    assert_eq!(tokens.len(), 2);
    assert!(token.is_match(tokens[0]), "{}", tokens[0]);
    assert!(token.is_match(&format!("'{}", tokens[1])), "{}", tokens[1]);
    assert!(tokens[0].starts_with("'Team''s monthly spend'="));
}

#[test]
fn logs_stay_off_stdout() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = write_fixture(&page(vec![budget("infra", "100", "1", None)]));

    probe_command(&home)
        .arg("-vv")
        .arg("--source")
        .arg(&path)
        .assert()
        .code(0)
        .stdout("Budgets forecast within limit: infra(act:1.00;limit:100.00) | 'infra'=1USD;100;100\n")
        .stderr(contains("budget check finished"));
}

#[test]
fn invalid_arguments_exit_unknown() {
    let home = TempDir::new().unwrap();

    probe_command(&home).arg("--bogus").assert().code(3);
}

#[test]
fn version_flag_exits_ok() {
    let home = TempDir::new().unwrap();

    probe_command(&home)
        .arg("--version")
        .assert()
        .code(0)
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn rust_log_raises_crate_verbosity() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = write_fixture(&page(vec![budget("infra", "100", "1", None)]));

    probe_command(&home)
        .env("RUST_LOG", "budget_probe=info")
        .arg("--source")
        .arg(&path)
        .assert()
        .code(0)
        .stderr(contains("budget check finished"));
}

#[test]
fn empty_budget_name_checks_every_budget() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = write_fixture(&page(vec![
        budget("infra", "100", "1", None),
        budget("dev", "50", "60", None),
    ]));

    probe_command(&home)
        .args(["--budget", "", "--source"])
        .arg(&path)
        .assert()
        .code(2)
        .stdout(contains("dev(act:60.00;limit:50.00)").and(contains("'infra'=1USD;100;100")));
}
