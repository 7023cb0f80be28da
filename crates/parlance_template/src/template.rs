//! Compiled sentence templates.
//!
//! A template is a sequence of [`Part`]s. Optionals and alternations nest
//! arbitrarily; slots reference lists by name and are resolved only when the
//! template is expanded.

use std::collections::HashMap;

/// A reference to a list from inside a template.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlotRef {
    /// Name of the referenced list.
    pub list: String,
    /// Explicit slot name from `{list:slot}`.
    pub slot: Option<String>,
}

impl SlotRef {
    /// Creates a reference that binds under the list's default slot name.
    #[must_use]
    pub fn new(list: impl Into<String>) -> Self {
        Self {
            list: list.into(),
            slot: None,
        }
    }

    /// Creates a reference with an explicit slot name.
    #[must_use]
    pub fn named(list: impl Into<String>, slot: impl Into<String>) -> Self {
        Self {
            list: list.into(),
            slot: Some(slot.into()),
        }
    }

    /// Returns the slot name this reference binds, given the list's default.
    #[must_use]
    pub fn binding_name<'a>(&'a self, default: &'a str) -> &'a str {
        self.slot.as_deref().unwrap_or(default)
    }
}

/// One element of a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Part {
    /// Text matched as-is (after normalization).
    Literal(String),
    /// A sequence that may be present or absent.
    Optional(Vec<Part>),
    /// Exactly one of several sequences.
    Alternation(Vec<Vec<Part>>),
    /// Any surface form of a list value.
    Slot(SlotRef),
}

impl Part {
    /// Creates a literal part.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Creates a slot part binding under the list's default name.
    #[must_use]
    pub fn slot(list: impl Into<String>) -> Self {
        Self::Slot(SlotRef::new(list))
    }
}

/// A compiled sentence template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    /// Text the template was compiled from.
    source: String,
    /// Top-level sequence.
    parts: Vec<Part>,
}

impl Template {
    /// Creates a template from already-built parts.
    #[must_use]
    pub fn new(source: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            source: source.into(),
            parts,
        }
    }

    /// Returns the text the template was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the top-level sequence.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Returns every slot reference in declaration order.
    #[must_use]
    pub fn slot_refs(&self) -> Vec<&SlotRef> {
        let mut refs = Vec::new();
        collect_refs(&self.parts, &mut refs);
        refs
    }

    /// Returns the names of every list the template references, deduplicated,
    /// in first-reference order.
    #[must_use]
    pub fn lists(&self) -> Vec<&str> {
        let mut lists: Vec<&str> = Vec::new();
        for slot in self.slot_refs() {
            if !lists.contains(&slot.list.as_str()) {
                lists.push(&slot.list);
            }
        }
        lists
    }

    /// Returns, per slot name, the largest number of times one expansion
    /// can bind it.
    ///
    /// `default_slot` maps a list name to the slot name it binds when the
    /// reference does not name one.
    #[must_use]
    pub fn max_bindings<'a, F>(&'a self, default_slot: F) -> HashMap<&'a str, usize>
    where
        F: Fn(&'a str) -> &'a str + Copy,
    {
        sequence_bindings(&self.parts, default_slot)
    }

    /// Returns true if the template contains no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

fn collect_refs<'a>(parts: &'a [Part], refs: &mut Vec<&'a SlotRef>) {
    for part in parts {
        match part {
            Part::Literal(_) => {}
            Part::Optional(inner) => collect_refs(inner, refs),
            Part::Alternation(alternatives) => {
                for alternative in alternatives {
                    collect_refs(alternative, refs);
                }
            }
            Part::Slot(slot) => refs.push(slot),
        }
    }
}

/// Bindings along a sequence add up.
fn sequence_bindings<'a, F>(parts: &'a [Part], default_slot: F) -> HashMap<&'a str, usize>
where
    F: Fn(&'a str) -> &'a str + Copy,
{
    let mut counts = HashMap::new();
    for part in parts {
        for (name, n) in part_bindings(part, default_slot) {
            *counts.entry(name).or_insert(0) += n;
        }
    }
    counts
}

/// Only one alternative is taken, so alternatives contribute their maximum.
fn part_bindings<'a, F>(part: &'a Part, default_slot: F) -> HashMap<&'a str, usize>
where
    F: Fn(&'a str) -> &'a str + Copy,
{
    match part {
        Part::Literal(_) => HashMap::new(),
        Part::Optional(inner) => sequence_bindings(inner, default_slot),
        Part::Alternation(alternatives) => {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for alternative in alternatives {
                for (name, n) in sequence_bindings(alternative, default_slot) {
                    let entry = counts.entry(name).or_insert(0);
                    *entry = (*entry).max(n);
                }
            }
            counts
        }
        Part::Slot(slot) => {
            HashMap::from([(slot.binding_name(default_slot(&slot.list)), 1)])
        }
    }
}
