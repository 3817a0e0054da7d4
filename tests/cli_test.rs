//! Command-line behavior of the ruleset-resolver binary

mod common;

use anyhow::Result;
use common::setup_project;
use std::path::Path;
use std::process::{Command, Output};

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ruleset-resolver"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run ruleset-resolver")
}

#[test]
fn test_cli_help() {
    let project = setup_project();
    let output = run(project.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Resolve refactoring rule sets"));
    assert!(stdout.contains("resolve"));
    assert!(stdout.contains("explain"));
    assert!(stdout.contains("list-sets"));
    assert!(stdout.contains("show-set"));
}

#[test]
fn test_resolve_discovers_project_file() {
    let project = setup_project();
    let output = run(project.path(), &["resolve"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Target paths (1):"));
    assert!(stdout.contains(r"Rector\DeadCode\Rector\Stmt\RemoveUnreachableStatementRector"));
    assert!(!stdout.contains(r"Rector\Php80\Rector\FunctionLike\UnionTypesRector"));
    assert!(stdout.contains("Fingerprint: sha256:"));
}

#[test]
fn test_resolve_json_output() -> Result<()> {
    let project = setup_project();
    let output = run(project.path(), &["resolve", "--format", "json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let rules = value["active_rules"].as_array().unwrap();
    assert!(rules.iter().any(|r| r == r"Rector\Php81\Rector\Property\ReadOnlyPropertyRector"));
    assert!(
        !rules
            .iter()
            .any(|r| r == r"Rector\Php81\Rector\FuncCall\NullToStrictStringFuncCallArgRector")
    );
    Ok(())
}

#[test]
fn test_unknown_set_exits_with_error() -> Result<()> {
    let project = setup_project();
    let config_path = project.path().join("broken.yml");
    std::fs::write(&config_path, "paths: [src]\nsets: [UnknownSet]\n")?;

    let output = run(project.path(), &["--config", "broken.yml", "resolve"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown rule set: UnknownSet"));
    Ok(())
}

#[test]
fn test_list_and_show_sets() {
    let project = setup_project();

    let listed = run(project.path(), &["list-sets"]);
    assert!(listed.status.success());
    let stdout = String::from_utf8_lossy(&listed.stdout);
    assert!(stdout.contains("TEAM_CLEANUP"));
    assert!(stdout.contains("UP_TO_PHP_81"));

    let shown = run(project.path(), &["show-set", "UP_TO_PHP_71"]);
    assert!(shown.status.success());
    let stdout = String::from_utf8_lossy(&shown.stdout);
    assert!(stdout.contains("UP_TO_PHP_71 expands to 4 rules:"));
}

#[test]
fn test_no_builtin_hides_shipped_sets() {
    let project = setup_project();
    let output = run(project.path(), &["--no-builtin", "show-set", "DEAD_CODE"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown rule set: DEAD_CODE"));
}
