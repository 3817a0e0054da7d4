//! # Registry Loading
//!
//! Builds a [`RuleSetRegistry`] from rule-set files on disk plus the built-in
//! sets. Directories are read in the order given; within a directory files are
//! visited in sorted path order so the "first definition wins" rule is stable.

use super::builtin::{BUILTIN_SOURCE, builtin_definitions};
use super::parser::parse_rule_set_file;
use super::snapshot::{RegistryBuilder, RuleSetRegistry};
use super::types::RuleSetDefinition;
use crate::errors::ResolverError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const REGISTRY_FILE_GLOBS: &[&str] = &["*.yml", "*.yaml", "*.json"];

#[derive(Debug, Clone)]
pub struct RegistryLoader {
    directories: Vec<PathBuf>,
    include_builtin: bool,
}

impl RegistryLoader {
    pub fn new(directories: Vec<PathBuf>) -> Self {
        Self {
            directories,
            include_builtin: true,
        }
    }

    pub fn with_builtin(mut self, include_builtin: bool) -> Self {
        self.include_builtin = include_builtin;
        self
    }

    /// Load every configured source into a frozen registry.
    ///
    /// Directory definitions are inserted before built-ins, so a project can
    /// redefine a built-in set under the same name.
    pub fn load(&self) -> Result<RuleSetRegistry, ResolverError> {
        let matcher = registry_file_matcher()?;
        let mut builder = RuleSetRegistry::builder();

        for directory in &self.directories {
            self.load_directory(directory, &matcher, &mut builder)?;
        }

        if self.include_builtin {
            let added = builder.extend(builtin_definitions()?, BUILTIN_SOURCE);
            debug!("Registered {} built-in rule sets", added);
        }

        debug!("Registry holds {} rule sets", builder.len());
        Ok(builder.build())
    }

    fn load_directory(
        &self,
        directory: &Path,
        matcher: &GlobSet,
        builder: &mut RegistryBuilder,
    ) -> Result<usize, ResolverError> {
        if !directory.exists() {
            debug!("Skipping missing registry directory {}", directory.display());
            return Ok(0);
        }

        let mut loaded = 0;
        for entry in WalkDir::new(directory).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable registry entry in {}: {}", directory.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !matcher.is_match(entry.file_name()) {
                continue;
            }

            let path = entry.path();
            match load_rule_set_file(path) {
                Ok(definitions) => {
                    let source = path.display().to_string();
                    let added = builder.extend(definitions, &source);
                    debug!("Loaded {} rule sets from {}", added, source);
                    loaded += added;
                }
                Err(e) => warn!("Failed to load rule sets from {}: {}", path.display(), e),
            }
        }

        Ok(loaded)
    }
}

fn registry_file_matcher() -> Result<GlobSet, ResolverError> {
    let mut glob_builder = GlobSetBuilder::new();
    for pattern in REGISTRY_FILE_GLOBS {
        glob_builder.add(Glob::new(pattern)?);
    }
    Ok(glob_builder.build()?)
}

fn load_rule_set_file(path: &Path) -> Result<Vec<RuleSetDefinition>, ResolverError> {
    let content = fs::read_to_string(path)?;
    Ok(parse_rule_set_file(&content)?.into_definitions())
}
