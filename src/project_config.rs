//! # Project Configuration (ruleset.yml)
//!
//! Reading and discovery of the per-project file that names target paths,
//! included sets, individual rules, skipped rules and extra registry
//! directories.

use crate::errors::ResolverError;
use crate::types::{Configuration, RuleId, RuleSetId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG_FILE_NAMES: &[&str] = &["ruleset.yml", "ruleset.yaml"];

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectConfig {
    /// Directories or files handed to the refactoring engine
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<PathBuf>,

    /// Rule sets to include
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sets: Vec<RuleSetId>,

    /// Individual rules to include on top of the sets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleId>,

    /// Rules removed from the result no matter where they came from
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skip: Vec<RuleId>,

    /// Extra directories holding rule-set definitions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registry_dirs: Vec<PathBuf>,
}

impl ProjectConfig {
    /// Load configuration from a ruleset.yml file
    pub fn from_file(path: &Path) -> Result<Self, ResolverError> {
        if !path.exists() {
            return Err(ResolverError::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ResolverError> {
        serde_yaml::from_str(yaml).map_err(ResolverError::from)
    }

    /// Find a project file by traversing up the directory tree
    pub fn discover(start_dir: &Path) -> Result<Option<(PathBuf, Self)>, ResolverError> {
        for dir in start_dir.ancestors() {
            for name in PROJECT_CONFIG_FILE_NAMES {
                let config_path = dir.join(name);
                if config_path.is_file() {
                    let config = Self::from_file(&config_path)?;
                    return Ok(Some((config_path, config)));
                }
            }
        }

        Ok(None)
    }

    /// Resolve all relative paths in the configuration relative to the config file location
    pub fn resolve_paths(&mut self, config_dir: &Path) {
        self.paths = self
            .paths
            .iter()
            .map(|p| Self::resolve_path(config_dir, p))
            .collect();

        self.registry_dirs = self
            .registry_dirs
            .iter()
            .map(|p| Self::resolve_path(config_dir, p))
            .collect();
    }

    fn resolve_path(base: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        }
    }

    pub fn to_configuration(&self) -> Configuration {
        Configuration::new(
            self.paths.iter().cloned(),
            self.sets.iter().cloned(),
            self.skip.iter().cloned(),
        )
        .with_rules(self.rules.iter().cloned())
    }
}
