//! The per-language lexicon.
//!
//! Holds every list, rule-set and transformed list of one grammar. A lexicon is
//! validated when it is built and read-only afterwards. Lists whose values are
//! known at build time (including transformed lists rooted in them) are
//! resolved once and cached; lists rooted in a dynamic list are derived per
//! query from the provider's snapshot.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use parlance_foundation::{Error, Result};

use crate::list::{List, ListValue};
use crate::transform::{ResolvedValue, RuleSet, Transformer};
use crate::transformed::{Derivation, TransformedList};

/// Runtime storage for lists, rule-sets and transformed lists.
#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    /// Base lists by name
    lists: HashMap<String, List>,
    /// Rule-sets by name
    rule_sets: HashMap<String, RuleSet>,
    /// Transformed lists by name
    transformed: HashMap<String, TransformedList>,
    /// Flattened derivation of every list (base lists have no stages)
    derivations: HashMap<String, Derivation>,
    /// Resolved values of every list with a static root
    cache: HashMap<String, Arc<[ResolvedValue]>>,
}

impl Lexicon {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::default()
    }

    /// Returns true if `name` is a base list or a transformed list.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.derivations.contains_key(name)
    }

    /// Looks up a base list.
    #[must_use]
    pub fn list(&self, name: &str) -> Option<&List> {
        self.lists.get(name)
    }

    /// Looks up a rule-set.
    #[must_use]
    pub fn rule_set(&self, name: &str) -> Option<&RuleSet> {
        self.rule_sets.get(name)
    }

    /// Looks up a transformed list.
    #[must_use]
    pub fn transformed_list(&self, name: &str) -> Option<&TransformedList> {
        self.transformed.get(name)
    }

    /// Returns a transformer over this lexicon's rule-sets.
    #[must_use]
    pub fn transformer(&self) -> Transformer<'_> {
        Transformer::new(&self.rule_sets)
    }

    /// Returns how a list is derived from its base list.
    #[must_use]
    pub fn derivation(&self, name: &str) -> Option<&Derivation> {
        self.derivations.get(name)
    }

    /// Returns the slot name a reference to `name` binds by default.
    ///
    /// Base lists bind under their own name; transformed lists bind under the
    /// name of their base list, so `{le_name}` binds `name`.
    #[must_use]
    pub fn default_slot(&self, name: &str) -> Option<&str> {
        self.derivations.get(name).map(|d| d.root.as_str())
    }

    /// Returns true if the values of `name` are supplied at query time.
    #[must_use]
    pub fn is_dynamic(&self, name: &str) -> bool {
        self.derivations
            .get(name)
            .and_then(|d| self.lists.get(&d.root))
            .is_some_and(List::is_dynamic)
    }

    /// Returns the cached resolution of a list with a static root.
    #[must_use]
    pub fn cached(&self, name: &str) -> Option<Arc<[ResolvedValue]>> {
        self.cache.get(name).cloned()
    }

    /// Derives the values of `name` from a snapshot of its base list.
    ///
    /// # Errors
    /// Returns [`ErrorKind::UnresolvedList`](parlance_foundation::ErrorKind::UnresolvedList)
    /// if `name` is not in the lexicon.
    pub fn derive(&self, name: &str, root_values: &[ListValue]) -> Result<Vec<ResolvedValue>> {
        let derivation = self
            .derivations
            .get(name)
            .ok_or_else(|| Error::unresolved_list(name))?;
        if derivation.stages.is_empty() {
            return Ok(root_values.iter().map(ResolvedValue::from_list_value).collect());
        }
        self.transformer().apply_chain(&derivation.stages, root_values)
    }
}

/// Collects lexicon definitions and validates them into a [`Lexicon`].
#[derive(Clone, Debug, Default)]
pub struct LexiconBuilder {
    lists: Vec<List>,
    rule_sets: Vec<RuleSet>,
    transformed: Vec<TransformedList>,
}

impl LexiconBuilder {
    /// Adds a base list.
    #[must_use]
    pub fn list(mut self, list: List) -> Self {
        self.lists.push(list);
        self
    }

    /// Adds a rule-set.
    #[must_use]
    pub fn rule_set(mut self, rule_set: RuleSet) -> Self {
        self.rule_sets.push(rule_set);
        self
    }

    /// Adds a transformed list.
    #[must_use]
    pub fn transformed_list(mut self, transformed: TransformedList) -> Self {
        self.transformed.push(transformed);
        self
    }

    /// Validates the definitions and builds the lexicon.
    ///
    /// # Errors
    /// Returns a configuration error for duplicate names, transformed lists
    /// referencing unknown sources or rule-sets, and derivation cycles.
    pub fn build(self) -> Result<Lexicon> {
        let mut lexicon = Lexicon::default();

        for list in self.lists {
            if lexicon.lists.contains_key(&list.name) {
                return Err(Error::configuration(format!("duplicate list: {}", list.name)));
            }
            lexicon.lists.insert(list.name.clone(), list);
        }

        for rule_set in self.rule_sets {
            if lexicon.rule_sets.contains_key(rule_set.name()) {
                return Err(Error::configuration(format!(
                    "duplicate transformation: {}",
                    rule_set.name()
                )));
            }
            if !rule_set.has_catch_all() {
                debug!(
                    transformation = rule_set.name(),
                    "transformation has no catch-all rule, unmatched values are dropped"
                );
            }
            lexicon.rule_sets.insert(rule_set.name().to_string(), rule_set);
        }

        for transformed in self.transformed {
            if lexicon.lists.contains_key(&transformed.name)
                || lexicon.transformed.contains_key(&transformed.name)
            {
                return Err(Error::configuration(format!(
                    "duplicate list: {}",
                    transformed.name
                )));
            }
            if let Some(unknown) = transformed
                .transformations
                .iter()
                .find(|id| !lexicon.rule_sets.contains_key(*id))
            {
                return Err(Error::configuration(format!(
                    "transformed list {} references unknown transformation: {unknown}",
                    transformed.name
                )));
            }
            lexicon.transformed.insert(transformed.name.clone(), transformed);
        }

        for name in lexicon.lists.keys() {
            lexicon.derivations.insert(
                name.clone(),
                Derivation {
                    root: name.clone(),
                    stages: Vec::new(),
                },
            );
        }
        for name in lexicon.transformed.keys() {
            let derivation = flatten(name, &lexicon.lists, &lexicon.transformed)?;
            lexicon.derivations.insert(name.clone(), derivation);
        }

        let mut cache = HashMap::new();
        for (name, derivation) in &lexicon.derivations {
            let Some(root_values) = lexicon.lists[&derivation.root].static_values() else {
                continue;
            };
            let resolved = lexicon.derive(name, &root_values)?;
            cache.insert(name.clone(), Arc::from(resolved));
        }
        lexicon.cache = cache;

        debug!(
            lists = lexicon.lists.len(),
            transformations = lexicon.rule_sets.len(),
            transformed_lists = lexicon.transformed.len(),
            cached = lexicon.cache.len(),
            "built lexicon"
        );

        Ok(lexicon)
    }
}

/// Walks a transformed list back to its base list.
fn flatten(
    name: &str,
    lists: &HashMap<String, List>,
    transformed: &HashMap<String, TransformedList>,
) -> Result<Derivation> {
    let mut outer_to_inner: Vec<&[String]> = Vec::new();
    let mut seen = HashSet::new();
    let mut current = name;

    loop {
        if let Some(t) = transformed.get(current) {
            if !seen.insert(current) {
                return Err(Error::configuration(format!(
                    "transformed list {name} has a derivation cycle through {current}"
                )));
            }
            outer_to_inner.push(&t.transformations);
            current = &t.source;
        } else if lists.contains_key(current) {
            break;
        } else {
            return Err(Error::configuration(format!(
                "transformed list {name} references unknown source list: {current}"
            )));
        }
    }

    Ok(Derivation {
        root: current.to_string(),
        stages: outer_to_inner.into_iter().rev().flatten().cloned().collect(),
    })
}
