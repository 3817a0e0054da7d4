use super::types::RuleSetFile;
use crate::errors::ResolverError;

pub fn parse_rule_set_file(content: &str) -> Result<RuleSetFile, ResolverError> {
    // Try parsing as YAML first
    let yaml_err = match serde_yaml::from_str::<RuleSetFile>(content) {
        Ok(file) => return Ok(file),
        Err(e) => e,
    };

    // Fall back to JSON
    if let Ok(file) = serde_json::from_str::<RuleSetFile>(content) {
        return Ok(file);
    }

    Err(ResolverError::ParserError(format!(
        "Rule set file must be valid YAML or JSON ({yaml_err})"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_definition() {
        let yaml = r#"
id: DEAD_CODE
description: Remove unreachable and unused code
rules:
  - RuleA
  - RuleC
"#;
        let definitions = parse_rule_set_file(yaml).unwrap().into_definitions();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].id.as_str(), "DEAD_CODE");
        assert_eq!(definitions[0].rules.len(), 2);
        assert!(definitions[0].imports.is_empty());
    }

    #[test]
    fn test_parse_set_list() {
        let yaml = r#"
sets:
  - id: PHP_80
    rules: [RuleB]
  - id: UP_TO_PHP_80
    imports: [PHP_80]
"#;
        let definitions = parse_rule_set_file(yaml).unwrap().into_definitions();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[1].imports[0].as_str(), "PHP_80");
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{"id": "CODE_QUALITY", "rules": ["RuleX"]}"#;
        let definitions = parse_rule_set_file(json).unwrap().into_definitions();
        assert_eq!(definitions[0].rules[0].as_str(), "RuleX");
    }

    #[test]
    fn test_parse_rejects_invalid_identifiers() {
        let yaml = r#"
id: not a valid id
rules: [RuleA]
"#;
        assert!(matches!(
            parse_rule_set_file(yaml),
            Err(ResolverError::ParserError(_))
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_rule_set_file("[[[").is_err());
    }
}
