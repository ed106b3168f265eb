//! End-to-end tests that invoke the compiled `wsconf` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use wsconf_test_utils::TestWorkspace;

/// A `wsconf` command with colors and the inherited prefix path disabled.
fn wsconf() -> Command {
    let mut cmd = Command::cargo_bin("wsconf").expect("Failed to find wsconf binary");
    cmd.env("NO_COLOR", "1").env_remove("CMAKE_PREFIX_PATH");
    cmd
}

fn init(ws: &TestWorkspace, extra: &[&str]) {
    wsconf()
        .args(["config", "--init", "-w", &ws.root_str()])
        .args(extra)
        .assert()
        .success();
}

// ============================================================================
// Help
// ============================================================================

#[test]
fn test_help_lists_commands() {
    wsconf()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("profile"));
}

#[test]
fn test_no_command_prints_hint() {
    wsconf()
        .assert()
        .success()
        .stdout(predicate::str::contains("wsconf --help"));
}

#[test]
fn test_conflicting_flags_are_usage_errors() {
    wsconf()
        .args(["config", "--install", "--no-install"])
        .assert()
        .code(2);
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_init_creates_record_and_prints_summary() {
    let ws = TestWorkspace::new();
    let root = ws.root_str();

    wsconf()
        .args(["config", "--init", "-w", &root])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Build Space:                  {root}/build"
        )))
        .stdout(predicate::str::contains("is not initialized").not());

    ws.assert_file_exists(".wsconf/profiles/default/config.toml");
}

#[test]
fn test_config_without_init_warns_and_writes_nothing() {
    let ws = TestWorkspace::new();

    wsconf()
        .args(["config", "-x", "_release", "-w", &ws.root_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Space Suffix:                 _release"))
        .stdout(predicate::str::contains("is not initialized. Use --init to initialize it."));

    ws.assert_file_not_exists(".wsconf");
}

#[test]
fn test_config_persists_between_invocations() {
    let ws = TestWorkspace::new();
    init(&ws, &["--install", "-x", "_dbg"]);

    wsconf()
        .args(["config", "-w", &ws.root_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Install Packages:             true"))
        .stdout(predicate::str::contains(format!(
            "Devel Space:                  {}/devel_dbg",
            ws.root_str()
        )));
}

#[test]
fn test_config_inside_build_space_is_rejected() {
    let ws = TestWorkspace::new();
    init(&ws, &[]);
    let build = ws.mkdir("build/pkg");

    wsconf()
        .args(["config", "-w"])
        .arg(&build)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nested-workspace"));
}

#[test]
fn test_config_json_output() {
    let ws = TestWorkspace::new();
    init(&ws, &[]);

    let output = wsconf()
        .args(["config", "--json", "-w", &ws.root_str()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["initialized"], serde_json::json!(true));
    assert_eq!(value["config"]["profile"], serde_json::json!("default"));
    assert_eq!(
        value["config"]["install_space"],
        serde_json::json!(format!("{}/install", ws.root_str()))
    );
}

#[test]
fn test_config_broken_extension_fails_without_saving() {
    let ws = TestWorkspace::new();
    let missing = ws.path("nowhere");

    wsconf()
        .args(["config", "--init", "-w", &ws.root_str(), "--extend"])
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("broken-extension"));

    ws.assert_file_not_exists(".wsconf/profiles/default/config.toml");
}

#[test]
fn test_config_extend_upstream_workspace() {
    let upstream = TestWorkspace::new();
    init(&upstream, &[]);
    upstream.mkdir("devel");
    let ws = TestWorkspace::new();
    let devel = format!("{}/devel", upstream.root_str());

    wsconf()
        .args(["config", "--init", "-w", &ws.root_str(), "--extend", &devel])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("[explicit] {devel}")))
        .stdout(predicate::str::contains(format!(
            "Extension Chain:              {devel}"
        )));
}

#[test]
fn test_config_reports_environment_prefix() {
    let ws = TestWorkspace::new();

    wsconf()
        .env("CMAKE_PREFIX_PATH", "/opt/ros/noetic")
        .args(["config", "-w", &ws.root_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("[env] /opt/ros/noetic"));
}

#[test]
fn test_config_cmake_args_are_stored() {
    let ws = TestWorkspace::new();
    init(
        &ws,
        &["--cmake-args", "-DCMAKE_BUILD_TYPE=Release", "-GNinja"],
    );

    assert!(ws.read_record("default").contains("-DCMAKE_BUILD_TYPE=Release"));

    wsconf()
        .args(["config", "-w", &ws.root_str(), "--no-cmake-args"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Additional CMake Args:        None"));
}

#[test]
fn test_config_mkdirs_creates_source_space() {
    let ws = TestWorkspace::new();

    wsconf()
        .args(["config", "--init", "--mkdirs", "-w", &ws.root_str()])
        .assert()
        .success();

    assert!(ws.path("src").is_dir());
}

// ============================================================================
// profile
// ============================================================================

#[test]
fn test_profile_list_and_set() {
    let ws = TestWorkspace::new();
    init(&ws, &[]);
    init(&ws, &["--profile", "release"]);

    wsconf()
        .args(["profile", "list", "-w", &ws.root_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("* default (active)"))
        .stdout(predicate::str::contains("  release"));

    wsconf()
        .args(["profile", "set", "release", "-w", &ws.root_str()])
        .assert()
        .success();

    wsconf()
        .args(["profile", "list", "-w", &ws.root_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("* release (active)"));
}

#[test]
fn test_profile_set_unknown_fails() {
    let ws = TestWorkspace::new();
    init(&ws, &[]);

    wsconf()
        .args(["profile", "set", "missing", "-w", &ws.root_str()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_profile_remove() {
    let ws = TestWorkspace::new();
    init(&ws, &[]);
    init(&ws, &["--profile", "release"]);

    wsconf()
        .args(["profile", "remove", "release", "-w", &ws.root_str()])
        .assert()
        .success();

    ws.assert_file_not_exists(".wsconf/profiles/release");
}

#[test]
fn test_profile_outside_workspace_fails() {
    let ws = TestWorkspace::new();

    wsconf()
        .args(["profile", "list", "-w", &ws.root_str()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No workspace found"));
}
