use crate::errors::ResolverError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Set names (`UP_TO_PHP_81`) and rule names, including namespaced ones
/// (`Rector\Php80\Rector\FunctionLike\UnionTypesRector`).
static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_.:\\-]*$").expect("identifier regex is valid")
});

fn validate_identifier(raw: &str) -> Result<(), ResolverError> {
    if IDENTIFIER_RE.is_match(raw) {
        Ok(())
    } else {
        Err(ResolverError::InvalidIdentifier(raw.to_string()))
    }
}

/// Name of a group of rules held by a registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleSetId(String);

impl RuleSetId {
    pub fn new(raw: impl Into<String>) -> Result<Self, ResolverError> {
        let raw = raw.into();
        validate_identifier(&raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Name of a single transformation rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleId(String);

impl RuleId {
    pub fn new(raw: impl Into<String>) -> Result<Self, ResolverError> {
        let raw = raw.into();
        validate_identifier(&raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! identifier_conversions {
    ($ty:ident) => {
        impl TryFrom<String> for $ty {
            type Error = ResolverError;

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                Self::new(raw)
            }
        }

        impl From<$ty> for String {
            fn from(id: $ty) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ResolverError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                Self::new(raw)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier_conversions!(RuleSetId);
identifier_conversions!(RuleId);

/// What to run and where: the input to a resolution.
///
/// Built once and never mutated afterwards. Use [`Configuration::new`] and
/// [`Configuration::with_rules`] to assemble one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    target_paths: Vec<PathBuf>,
    included_sets: BTreeSet<RuleSetId>,
    included_rules: BTreeSet<RuleId>,
    excluded_rules: BTreeSet<RuleId>,
}

impl Configuration {
    pub fn new(
        target_paths: impl IntoIterator<Item = impl Into<PathBuf>>,
        included_sets: impl IntoIterator<Item = RuleSetId>,
        excluded_rules: impl IntoIterator<Item = RuleId>,
    ) -> Self {
        Self {
            target_paths: target_paths.into_iter().map(Into::into).collect(),
            included_sets: included_sets.into_iter().collect(),
            included_rules: BTreeSet::new(),
            excluded_rules: excluded_rules.into_iter().collect(),
        }
    }

    /// Register individual rules on top of the included sets.
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = RuleId>) -> Self {
        self.included_rules.extend(rules);
        self
    }

    pub fn target_paths(&self) -> &[PathBuf] {
        &self.target_paths
    }

    pub fn included_sets(&self) -> &BTreeSet<RuleSetId> {
        &self.included_sets
    }

    pub fn included_rules(&self) -> &BTreeSet<RuleId> {
        &self.included_rules
    }

    pub fn excluded_rules(&self) -> &BTreeSet<RuleId> {
        &self.excluded_rules
    }
}

/// Result of a resolution, handed to the refactoring engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveConfiguration {
    pub target_paths: Vec<PathBuf>,
    pub active_rules: BTreeSet<RuleId>,
}

impl ActiveConfiguration {
    /// Stable digest of paths and rules, usable as a cache key by the host.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for path in &self.target_paths {
            hasher.update(b"path\0");
            hasher.update(path.to_string_lossy().as_bytes());
            hasher.update(b"\0");
        }
        for rule in &self.active_rules {
            hasher.update(b"rule\0");
            hasher.update(rule.as_str().as_bytes());
            hasher.update(b"\0");
        }
        format!("sha256:{}", hex::encode(hasher.finalize()))
    }

    pub fn is_active(&self, rule: &RuleId) -> bool {
        self.active_rules.contains(rule)
    }
}
