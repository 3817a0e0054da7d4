//! # Rule Set Registry
//!
//! Immutable mapping from rule-set identifiers to their definitions.
//! A [`RegistryBuilder`] collects definitions from any number of sources and
//! freezes them into a [`RuleSetRegistry`] snapshot that resolvers read from.

use super::types::RuleSetDefinition;
use crate::errors::ResolverError;
use crate::types::{RuleId, RuleSetId};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::{debug, warn};

/// Read-only registry snapshot. Safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct RuleSetRegistry {
    sets: BTreeMap<RuleSetId, RuleSetDefinition>,
}

impl RuleSetRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn get(&self, id: &RuleSetId) -> Option<&RuleSetDefinition> {
        self.sets.get(id)
    }

    pub fn contains(&self, id: &RuleSetId) -> bool {
        self.sets.contains_key(id)
    }

    /// Registered identifiers in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &RuleSetId> {
        self.sets.keys()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &RuleSetDefinition> {
        self.sets.values()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// All rules a set stands for: its own rules plus those of every set it
    /// imports, followed transitively.
    pub fn expand(&self, id: &RuleSetId) -> Result<BTreeSet<RuleId>, ResolverError> {
        let mut rules = BTreeSet::new();
        let mut chain = Vec::new();
        let mut expanded = HashSet::new();
        self.expand_into(id, &mut chain, &mut expanded, &mut rules)?;
        debug!("Expanded rule set '{}' to {} rules", id, rules.len());
        Ok(rules)
    }

    fn expand_into(
        &self,
        id: &RuleSetId,
        chain: &mut Vec<RuleSetId>,
        expanded: &mut HashSet<RuleSetId>,
        rules: &mut BTreeSet<RuleId>,
    ) -> Result<(), ResolverError> {
        // Shared imports are walked once per expansion.
        if expanded.contains(id) {
            return Ok(());
        }

        if let Some(start) = chain.iter().position(|seen| seen == id) {
            let mut cycle = chain[start..].to_vec();
            cycle.push(id.clone());
            return Err(ResolverError::CyclicRuleSet(cycle));
        }

        let definition = self
            .get(id)
            .ok_or_else(|| ResolverError::UnknownRuleSet(id.clone()))?;

        chain.push(id.clone());
        rules.extend(definition.rules.iter().cloned());
        for import in &definition.imports {
            self.expand_into(import, chain, expanded, rules)?;
        }
        chain.pop();
        expanded.insert(id.clone());

        Ok(())
    }
}

/// Collects definitions before freezing them into a [`RuleSetRegistry`].
///
/// The first definition seen for an identifier wins; later ones are dropped
/// with a warning naming both sources.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    sets: BTreeMap<RuleSetId, RuleSetDefinition>,
    sources: HashMap<RuleSetId, String>,
}

impl RegistryBuilder {
    /// Returns `false` when the identifier was already registered.
    pub fn insert(&mut self, definition: RuleSetDefinition, source: &str) -> bool {
        if let Some(first_source) = self.sources.get(&definition.id) {
            warn!(
                "Duplicate rule set '{}' in {}; keeping the one from {}",
                definition.id, source, first_source
            );
            return false;
        }

        self.sources.insert(definition.id.clone(), source.to_string());
        self.sets.insert(definition.id.clone(), definition);
        true
    }

    pub fn extend(
        &mut self,
        definitions: impl IntoIterator<Item = RuleSetDefinition>,
        source: &str,
    ) -> usize {
        let mut inserted = 0;
        for definition in definitions {
            if self.insert(definition, source) {
                inserted += 1;
            }
        }
        inserted
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn build(self) -> RuleSetRegistry {
        RuleSetRegistry { sets: self.sets }
    }
}
