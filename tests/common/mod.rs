// Common test utilities
#![allow(dead_code)]

use ruleset_resolver::{RuleId, RuleSetDefinition, RuleSetId, RuleSetRegistry};
use std::fs;
use tempfile::TempDir;

pub fn set(id: &str) -> RuleSetId {
    RuleSetId::new(id).unwrap()
}

pub fn rule(id: &str) -> RuleId {
    RuleId::new(id).unwrap()
}

/// Registry from the two-set scenario: DEAD_CODE = {RuleA, RuleC},
/// UP_TO_LEVEL_X = {RuleB, RuleD}.
pub fn scenario_registry() -> RuleSetRegistry {
    let mut builder = RuleSetRegistry::builder();
    builder.insert(
        RuleSetDefinition::new(set("DEAD_CODE"), [rule("RuleA"), rule("RuleC")]),
        "test",
    );
    builder.insert(
        RuleSetDefinition::new(set("UP_TO_LEVEL_X"), [rule("RuleB"), rule("RuleD")]),
        "test",
    );
    builder.build()
}

/// A project directory with a ruleset.yml and a local registry directory.
pub fn setup_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();

    fs::create_dir_all(temp_dir.path().join("src")).unwrap();
    fs::create_dir_all(temp_dir.path().join("sets")).unwrap();

    let sets = r#"
sets:
  - id: TEAM_CLEANUP
    description: Team-specific cleanup rules
    rules:
      - TeamRuleOne
      - TeamRuleTwo
    imports:
      - DEAD_CODE
"#;
    fs::write(temp_dir.path().join("sets").join("team.yaml"), sets).unwrap();

    let project = r#"
paths:
  - src
sets:
  - DEAD_CODE
  - UP_TO_PHP_81
skip:
  - 'Rector\Php80\Rector\FunctionLike\UnionTypesRector'
  - 'Rector\Php81\Rector\FuncCall\NullToStrictStringFuncCallArgRector'
registryDirs:
  - sets
"#;
    fs::write(temp_dir.path().join("ruleset.yml"), project).unwrap();

    temp_dir
}
