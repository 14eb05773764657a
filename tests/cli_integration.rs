//! Integration tests for the ammbuild binary
//!
//! Each test lays out a miniature AMM checkout in a temp directory and runs
//! the binary from there, the way CI invokes it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Helper to get the ammbuild binary path
fn ammbuild_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ammbuild"))
}

/// Helper to run ammbuild inside `dir` with no external config
fn run_ammbuild(dir: &Path, args: &[&str]) -> Output {
    Command::new(ammbuild_binary())
        .current_dir(dir)
        .env_remove("AMMBUILD_CONFIG")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute ammbuild")
}

/// Helper to run ammbuild inside `dir` with AMMBUILD_CONFIG pointing at `config`
fn run_ammbuild_with_env_config(dir: &Path, config: &Path, args: &[&str]) -> Output {
    Command::new(ammbuild_binary())
        .current_dir(dir)
        .env("AMMBUILD_CONFIG", config)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute ammbuild")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Create the default project layout: built package, loader template, server templates
fn create_project(dir: &Path) {
    let package = dir.join("build/taminomara-amm-ammcore/package");
    fs::create_dir_all(package.parent().unwrap()).unwrap();
    fs::write(&package, "local modules = { ammcore = {} }\n").unwrap();

    let template = dir.join("taminomara-amm-ammcore/_templates/bootstrap/bootstrap.lua");
    fs::create_dir_all(template.parent().unwrap()).unwrap();
    fs::write(&template, "-- bootstrap\n[[{ modules }]]\nreturn modules\n").unwrap();

    let server = dir.join("server_template");
    fs::create_dir_all(server.join("sub")).unwrap();
    fs::write(server.join("a.txt"), "hello").unwrap();
    fs::write(server.join("sub/b.txt"), "world").unwrap();
}

fn bootstrap_output(dir: &Path) -> PathBuf {
    dir.join("docs/_build/html/bootstrap.lua")
}

fn bundle_output(dir: &Path) -> PathBuf {
    dir.join("taminomara-amm-ammcore/_templates/server.json")
}

#[test]
fn test_no_arguments_runs_both_pipelines() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path());

    let output = run_ammbuild(temp.path(), &[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        fs::read_to_string(bootstrap_output(temp.path())).unwrap(),
        "-- bootstrap\nlocal modules = { ammcore = {} }\n\nreturn modules\n"
    );
    assert_eq!(
        fs::read_to_string(bundle_output(temp.path())).unwrap(),
        r#"{"a.txt":"hello","sub/b.txt":"world"}"#
    );
}

#[test]
fn test_bootstrap_subcommand_only_writes_bootstrap() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path());

    let output = run_ammbuild(temp.path(), &["bootstrap"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("bootstrap.lua"));

    assert!(bootstrap_output(temp.path()).exists());
    assert!(!bundle_output(temp.path()).exists());
    assert!(!temp.path().join("docs/_build/html/.nojekyll").exists());
}

#[test]
fn test_bootstrap_pages_layout_with_nojekyll() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path());

    let output = run_ammbuild(
        temp.path(),
        &["bootstrap", "--output", "build/docs/bootstrap.lua", "--nojekyll"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert!(temp.path().join("build/docs/bootstrap.lua").exists());
    assert!(temp.path().join("build/docs/.nojekyll").exists());
}

#[test]
fn test_bundle_subcommand_parses_back_to_tree() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path());

    let output = run_ammbuild(temp.path(), &["bundle", "--pretty"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json = fs::read_to_string(bundle_output(temp.path())).unwrap();
    assert!(json.contains('\n'));
    let parsed: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed["a.txt"], "hello");
    assert_eq!(parsed["sub/b.txt"], "world");
    assert!(!bootstrap_output(temp.path()).exists());
}

#[test]
fn test_empty_template_tree_yields_empty_object() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("server_template")).unwrap();

    let output = run_ammbuild(temp.path(), &["bundle"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(fs::read_to_string(bundle_output(temp.path())).unwrap(), "{}");
}

#[test]
fn test_rerun_is_byte_identical() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path());

    assert!(run_ammbuild(temp.path(), &["-q"]).status.success());
    let bootstrap_first = fs::read(bootstrap_output(temp.path())).unwrap();
    let bundle_first = fs::read(bundle_output(temp.path())).unwrap();

    assert!(run_ammbuild(temp.path(), &["-q"]).status.success());
    assert_eq!(bootstrap_first, fs::read(bootstrap_output(temp.path())).unwrap());
    assert_eq!(bundle_first, fs::read(bundle_output(temp.path())).unwrap());
}

#[test]
fn test_quiet_suppresses_summary() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path());

    let output = run_ammbuild(temp.path(), &["build", "--quiet"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_dry_run_touches_nothing() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path());

    let output = run_ammbuild(temp.path(), &["build", "--dry-run"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Would write"));

    assert!(!temp.path().join("docs").exists());
    assert!(!bundle_output(temp.path()).exists());
}

#[test]
fn test_missing_package_fails() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path());
    fs::remove_file(temp.path().join("build/taminomara-amm-ammcore/package")).unwrap();

    let output = run_ammbuild(temp.path(), &[]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Not found"));
    assert!(!bootstrap_output(temp.path()).exists());
    // The run aborts before the bundle step
    assert!(!bundle_output(temp.path()).exists());
}

#[test]
fn test_template_without_placeholder_fails() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path());
    fs::write(
        temp.path().join("taminomara-amm-ammcore/_templates/bootstrap/bootstrap.lua"),
        "return {}\n",
    )
    .unwrap();

    let output = run_ammbuild(temp.path(), &["bootstrap"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("does not contain placeholder"));
    assert!(!bootstrap_output(temp.path()).exists());
}

#[test]
fn test_binary_template_file_fails_bundle() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path());
    fs::write(temp.path().join("server_template/sub/icon.png"), [0x89, 0x50, 0xff, 0xfe]).unwrap();

    let output = run_ammbuild(temp.path(), &["bundle"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("not valid UTF-8"));
    assert!(!bundle_output(temp.path()).exists());
}

#[test]
fn test_missing_template_root_fails() {
    let temp = TempDir::new().unwrap();

    let output = run_ammbuild(temp.path(), &["bundle"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("server_template"));
}

#[test]
fn test_local_config_file_is_used() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path());
    fs::write(
        temp.path().join("ammbuild.yaml"),
        "bundle:\n  output: build/server.json\nbootstrap:\n  output: build/docs/bootstrap.lua\n  nojekyll: true\n",
    )
    .unwrap();

    let output = run_ammbuild(temp.path(), &[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert!(temp.path().join("build/server.json").exists());
    assert!(temp.path().join("build/docs/bootstrap.lua").exists());
    assert!(temp.path().join("build/docs/.nojekyll").exists());
    assert!(!bundle_output(temp.path()).exists());
}

#[test]
fn test_broken_local_config_is_reported() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path());
    fs::write(temp.path().join("ammbuild.yaml"), "bundle:\n  output: [broken").unwrap();

    let output = run_ammbuild(temp.path(), &["bundle"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let err = stderr(&output);
    assert!(err.contains("Ignoring local config"), "stderr: {}", err);
    assert!(err.contains("ammbuild.yaml"), "stderr: {}", err);
    assert!(bundle_output(temp.path()).exists());
}

#[test]
fn test_env_config_is_used() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path());
    let config = temp.path().join("ci").join("ammbuild-ci.yaml");
    fs::create_dir_all(config.parent().unwrap()).unwrap();
    fs::write(&config, "bundle:\n  output: build/env/server.json\n").unwrap();
    // A local config loses to AMMBUILD_CONFIG
    fs::write(temp.path().join("ammbuild.yaml"), "bundle:\n  output: build/local/server.json\n").unwrap();

    let output = run_ammbuild_with_env_config(temp.path(), &config, &["bundle"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert!(temp.path().join("build/env/server.json").exists());
    assert!(!temp.path().join("build/local/server.json").exists());
    assert!(!bundle_output(temp.path()).exists());
}

#[test]
fn test_broken_env_config_falls_back_to_local() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path());
    let config = temp.path().join("broken.yaml");
    fs::write(&config, "bundle: [broken").unwrap();
    fs::write(temp.path().join("ammbuild.yaml"), "bundle:\n  output: build/local/server.json\n").unwrap();

    let output = run_ammbuild_with_env_config(temp.path(), &config, &["bundle"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Ignoring AMMBUILD_CONFIG"));
    assert!(temp.path().join("build/local/server.json").exists());
}

#[test]
fn test_binary_template_fails_bootstrap() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path());
    fs::write(
        temp.path().join("taminomara-amm-ammcore/_templates/bootstrap/bootstrap.lua"),
        [0x2d, 0x2d, 0x20, 0xc3, 0x28, 0x0a],
    )
    .unwrap();

    let output = run_ammbuild(temp.path(), &["bootstrap"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("not valid UTF-8"), "stderr: {}", err);
    assert!(err.contains("bootstrap.lua"), "stderr: {}", err);
    assert!(!bootstrap_output(temp.path()).exists());
}

#[test]
fn test_explicit_missing_config_fails() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path());

    let output = run_ammbuild(temp.path(), &["--config", "nope.yaml"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load configuration"));
}

#[test]
fn test_check_reports_json() {
    let temp = TempDir::new().unwrap();
    create_project(temp.path());

    let output = run_ammbuild(temp.path(), &["check", "-o", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["ok"], true);
    assert_eq!(report["checks"].as_array().unwrap().len(), 3);
    assert!(!bootstrap_output(temp.path()).exists());
}

#[test]
fn test_check_fails_on_broken_inputs() {
    let temp = TempDir::new().unwrap();

    let output = run_ammbuild(temp.path(), &["check", "-o", "text"]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("✗"));
    assert!(stderr(&output).contains("3 check(s) failed"));
}

#[test]
fn test_config_show_yaml() {
    let temp = TempDir::new().unwrap();

    let output = run_ammbuild(temp.path(), &["config", "show", "-o", "yaml"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("server_template"));
    assert!(text.contains("[[{ modules }]]"));
}

#[test]
fn test_completions_generate() {
    let temp = TempDir::new().unwrap();

    let output = run_ammbuild(temp.path(), &["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("ammbuild"));
}
