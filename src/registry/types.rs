use crate::types::{RuleId, RuleSetId};
use serde::{Deserialize, Serialize};

/// A named group of rules as stored in a registry file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetDefinition {
    pub id: RuleSetId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rules contributed directly by this set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleId>,
    /// Other sets whose rules this set pulls in, recursively
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<RuleSetId>,
}

impl RuleSetDefinition {
    pub fn new(id: RuleSetId, rules: impl IntoIterator<Item = RuleId>) -> Self {
        Self {
            id,
            description: None,
            rules: rules.into_iter().collect(),
            imports: Vec::new(),
        }
    }

    pub fn with_imports(mut self, imports: impl IntoIterator<Item = RuleSetId>) -> Self {
        self.imports.extend(imports);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Contents of one registry file: either a `sets:` list or a single definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSetFile {
    Many { sets: Vec<RuleSetDefinition> },
    Single(RuleSetDefinition),
}

impl RuleSetFile {
    pub fn into_definitions(self) -> Vec<RuleSetDefinition> {
        match self {
            RuleSetFile::Many { sets } => sets,
            RuleSetFile::Single(definition) => vec![definition],
        }
    }
}
