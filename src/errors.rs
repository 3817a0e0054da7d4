//! # Error Types
//!
//! Error handling for rule-set resolution.
//! `UnknownRuleSet` is the one failure a caller must act on; the rest come from
//! loading registries and project files.

use crate::types::RuleSetId;
use std::fmt;
use std::path::PathBuf;

/// Error types that can occur while loading registries or resolving a configuration.
#[derive(Debug)]
pub enum ResolverError {
    /// A configuration or set import names a rule set the registry does not know
    UnknownRuleSet(RuleSetId),
    /// `resolve` was called without any target paths
    EmptyTargetPaths,
    /// Set imports loop back on themselves; carries the chain that closed the loop
    CyclicRuleSet(Vec<RuleSetId>),
    /// Identifier does not match the allowed syntax
    InvalidIdentifier(String),
    /// Registry or project file is neither valid YAML nor valid JSON
    ParserError(String),
    /// Explicitly requested project file does not exist
    ConfigNotFound(PathBuf),
    /// Internal error with custom message
    Internal(String),
    /// I/O error reading files
    Io(std::io::Error),
    /// Error walking registry directories
    WalkDir(walkdir::Error),
    /// Error parsing YAML documents
    SerdeYaml(serde_yaml::Error),
    /// Error parsing or emitting JSON
    SerdeJson(serde_json::Error),
    /// Glob pattern compilation error
    Glob(globset::Error),
}

impl fmt::Display for ResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverError::UnknownRuleSet(id) => write!(f, "Unknown rule set: {id}"),
            ResolverError::EmptyTargetPaths => {
                write!(f, "Configuration must name at least one target path")
            }
            ResolverError::CyclicRuleSet(chain) => {
                let chain: Vec<&str> = chain.iter().map(RuleSetId::as_str).collect();
                write!(f, "Cyclic rule set imports: {}", chain.join(" -> "))
            }
            ResolverError::InvalidIdentifier(id) => write!(f, "Invalid identifier: '{id}'"),
            ResolverError::ParserError(msg) => write!(f, "Parser error: {msg}"),
            ResolverError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ResolverError::Internal(msg) => write!(f, "Internal error: {msg}"),
            ResolverError::Io(err) => write!(f, "IO error: {err}"),
            ResolverError::WalkDir(err) => write!(f, "Directory traversal error: {err}"),
            ResolverError::SerdeYaml(err) => write!(f, "YAML parsing error: {err}"),
            ResolverError::SerdeJson(err) => write!(f, "JSON error: {err}"),
            ResolverError::Glob(err) => write!(f, "Glob error: {err}"),
        }
    }
}

impl std::error::Error for ResolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolverError::Io(err) => Some(err),
            ResolverError::WalkDir(err) => Some(err),
            ResolverError::SerdeYaml(err) => Some(err),
            ResolverError::SerdeJson(err) => Some(err),
            ResolverError::Glob(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ResolverError {
    fn from(err: std::io::Error) -> Self {
        ResolverError::Io(err)
    }
}

impl From<walkdir::Error> for ResolverError {
    fn from(err: walkdir::Error) -> Self {
        ResolverError::WalkDir(err)
    }
}

impl From<serde_yaml::Error> for ResolverError {
    fn from(err: serde_yaml::Error) -> Self {
        ResolverError::SerdeYaml(err)
    }
}

impl From<serde_json::Error> for ResolverError {
    fn from(err: serde_json::Error) -> Self {
        ResolverError::SerdeJson(err)
    }
}

impl From<globset::Error> for ResolverError {
    fn from(err: globset::Error) -> Self {
        ResolverError::Glob(err)
    }
}
