//! Rule sets shipped with the resolver, embedded from `sets/` at build time.

use super::parser::parse_rule_set_file;
use super::types::RuleSetDefinition;
use crate::errors::ResolverError;

/// Source label used when reporting where a built-in set came from
pub const BUILTIN_SOURCE: &str = "<builtin>";

const BUILTIN_FILES: &[(&str, &str)] = &[
    ("quality.yaml", include_str!("../../sets/quality.yaml")),
    ("php_levels.yaml", include_str!("../../sets/php_levels.yaml")),
];

pub fn builtin_definitions() -> Result<Vec<RuleSetDefinition>, ResolverError> {
    let mut definitions = Vec::new();
    for (name, content) in BUILTIN_FILES {
        let file = parse_rule_set_file(content).map_err(|e| {
            ResolverError::Internal(format!("Built-in rule set file {name} is invalid: {e}"))
        })?;
        definitions.extend(file.into_definitions());
    }
    Ok(definitions)
}
