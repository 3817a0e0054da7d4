//! # Rule Set Resolution
//!
//! Turns a [`Configuration`] into the [`ActiveConfiguration`] the refactoring
//! engine runs with: every included set is expanded through the registry,
//! the results are unioned with individually registered rules, and excluded
//! rules are removed last.
//!
//! Resolution only reads the registry snapshot, so one resolver can be shared
//! between threads and called any number of times.

use crate::errors::ResolverError;
use crate::registry::RuleSetRegistry;
use crate::types::{ActiveConfiguration, Configuration, RuleId, RuleSetId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Where an active rule came from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSource {
    /// Contributed by an included rule set (possibly through its imports)
    Set(RuleSetId),
    /// Registered on its own in the configuration
    Direct,
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSource::Set(id) => write!(f, "{id}"),
            RuleSource::Direct => f.write_str("<rule>"),
        }
    }
}

/// A resolution together with the reasoning behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub active: ActiveConfiguration,
    /// Contributors of every active rule, sorted
    pub sources: BTreeMap<RuleId, Vec<RuleSource>>,
    /// Exclusions that removed a rule
    pub excluded: BTreeSet<RuleId>,
    /// Exclusions naming a rule nothing contributed
    pub ineffective_exclusions: BTreeSet<RuleId>,
}

#[derive(Debug, Clone, Copy)]
pub struct RuleSetResolver<'a> {
    registry: &'a RuleSetRegistry,
}

impl<'a> RuleSetResolver<'a> {
    pub fn new(registry: &'a RuleSetRegistry) -> Self {
        Self { registry }
    }

    pub fn resolve(&self, config: &Configuration) -> Result<ActiveConfiguration, ResolverError> {
        Ok(self.explain(config)?.active)
    }

    /// Resolve and keep track of which sets contributed which rules.
    pub fn explain(&self, config: &Configuration) -> Result<ResolutionReport, ResolverError> {
        // Unknown sets fail the whole resolution before anything else is looked at.
        if let Some(unknown) = config
            .included_sets()
            .iter()
            .find(|id| !self.registry.contains(id))
        {
            return Err(ResolverError::UnknownRuleSet(unknown.clone()));
        }

        if config.target_paths().is_empty() {
            return Err(ResolverError::EmptyTargetPaths);
        }

        let mut sources: BTreeMap<RuleId, Vec<RuleSource>> = BTreeMap::new();
        for set_id in config.included_sets() {
            for rule in self.registry.expand(set_id)? {
                sources
                    .entry(rule)
                    .or_default()
                    .push(RuleSource::Set(set_id.clone()));
            }
        }
        for rule in config.included_rules() {
            sources.entry(rule.clone()).or_default().push(RuleSource::Direct);
        }
        debug!(
            "Collected {} candidate rules from {} sets and {} direct rules",
            sources.len(),
            config.included_sets().len(),
            config.included_rules().len()
        );

        let mut excluded = BTreeSet::new();
        let mut ineffective_exclusions = BTreeSet::new();
        for rule in config.excluded_rules() {
            if sources.remove(rule).is_some() {
                excluded.insert(rule.clone());
            } else {
                warn!("Excluded rule '{}' is not part of any included set", rule);
                ineffective_exclusions.insert(rule.clone());
            }
        }

        for contributors in sources.values_mut() {
            contributors.sort();
            contributors.dedup();
        }

        let active = ActiveConfiguration {
            target_paths: config.target_paths().to_vec(),
            active_rules: sources.keys().cloned().collect(),
        };
        info!(
            "Resolved {} rule sets into {} active rules ({} excluded)",
            config.included_sets().len(),
            active.active_rules.len(),
            excluded.len()
        );

        Ok(ResolutionReport {
            active,
            sources,
            excluded,
            ineffective_exclusions,
        })
    }
}

/// One-shot resolution against `registry`.
pub fn resolve(
    registry: &RuleSetRegistry,
    target_paths: impl IntoIterator<Item = impl Into<PathBuf>>,
    included_sets: impl IntoIterator<Item = RuleSetId>,
    excluded_rules: impl IntoIterator<Item = RuleId>,
) -> Result<ActiveConfiguration, ResolverError> {
    let config = Configuration::new(target_paths, included_sets, excluded_rules);
    RuleSetResolver::new(registry).resolve(&config)
}
