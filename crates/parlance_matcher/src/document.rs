//! Grammar documents, the decoded form of a language's sentence files.
//!
//! A document is plain data. [`Grammar::from_document`](crate::Grammar::from_document)
//! validates it and compiles it. With the `serde` feature the types decode
//! from YAML or JSON in this shape:
//!
//! ```yaml
//! language: it
//! lists:
//!   color: { values: [rosso, { in: blu, out: blue }] }
//!   brightness: { range: { from: 0, to: 100 } }
//!   name: { dynamic: true }
//! transformations:
//!   de:
//!     - { match: "[aeiou]", outputs: ["dell'{value}", "{value}"] }
//!     - { outputs: ["del {value}", "{value}"] }
//! transformed_lists:
//!   le_name: { source: name, transformations: [de] }
//! intents:
//!   - name: HassTurnOn
//!     data:
//!       - sentences: ["(apri|chiudi) {le_name}"]
//!         domains: [cover]
//! ```

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::intent::CapabilityValue;

/// A complete grammar for one language.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrammarDocument {
    /// Language code.
    pub language: String,
    /// Base lists by name.
    pub lists: BTreeMap<String, ListDef>,
    /// Transformation rule-sets by name.
    pub transformations: BTreeMap<String, Vec<RuleDef>>,
    /// Transformed lists by name.
    pub transformed_lists: BTreeMap<String, TransformedListDef>,
    /// Intents in match priority order.
    pub intents: Vec<IntentDef>,
    /// Free-standing sentences matched as the trigger sentences intent.
    pub trigger_sentences: Vec<String>,
    /// Words dropped from user input before matching.
    pub skip_words: Vec<String>,
}

impl GrammarDocument {
    /// Creates an empty document for a language.
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    /// Layers `other` over this document.
    ///
    /// Lists, transformations and transformed lists merge by name with
    /// `other` winning. Data blocks of an intent already present are appended
    /// to it; new intents are appended in order. Trigger sentences and skip
    /// words accumulate.
    pub fn merge(&mut self, other: GrammarDocument) {
        if !other.language.is_empty() {
            self.language = other.language;
        }
        self.lists.extend(other.lists);
        self.transformations.extend(other.transformations);
        self.transformed_lists.extend(other.transformed_lists);

        for intent in other.intents {
            match self.intents.iter_mut().find(|i| i.name == intent.name) {
                Some(existing) => existing.data.extend(intent.data),
                None => self.intents.push(intent),
            }
        }

        self.trigger_sentences.extend(other.trigger_sentences);
        for word in other.skip_words {
            if !self.skip_words.contains(&word) {
                self.skip_words.push(word);
            }
        }
    }

    /// Builder method to add a list.
    #[must_use]
    pub fn with_list(mut self, name: impl Into<String>, list: ListDef) -> Self {
        self.lists.insert(name.into(), list);
        self
    }

    /// Builder method to add a transformation rule-set.
    #[must_use]
    pub fn with_transformation(mut self, name: impl Into<String>, rules: Vec<RuleDef>) -> Self {
        self.transformations.insert(name.into(), rules);
        self
    }

    /// Builder method to add a transformed list.
    #[must_use]
    pub fn with_transformed_list(
        mut self,
        name: impl Into<String>,
        transformed: TransformedListDef,
    ) -> Self {
        self.transformed_lists.insert(name.into(), transformed);
        self
    }

    /// Builder method to append an intent.
    #[must_use]
    pub fn with_intent(mut self, intent: IntentDef) -> Self {
        self.intents.push(intent);
        self
    }
}

/// A base list definition. Exactly one source must be given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ListDef {
    /// Declared values.
    pub values: Option<Vec<ListValueDef>>,
    /// Integer range.
    pub range: Option<RangeDef>,
    /// Values supplied at match time.
    pub dynamic: bool,
}

impl ListDef {
    /// A list of plain values.
    #[must_use]
    pub fn values<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self {
            values: Some(
                values
                    .into_iter()
                    .map(|v| ListValueDef::Text(v.into()))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// An integer range.
    #[must_use]
    pub fn range(from: i64, to: i64) -> Self {
        Self {
            range: Some(RangeDef { from, to, step: 1 }),
            ..Self::default()
        }
    }

    /// A dynamic list.
    #[must_use]
    pub fn dynamic() -> Self {
        Self {
            dynamic: true,
            ..Self::default()
        }
    }
}

/// One value of a list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ListValueDef {
    /// Matched and bound as written.
    Text(String),
    /// Matches `input`, binds `output`.
    Mapped {
        /// Surface text.
        #[cfg_attr(feature = "serde", serde(rename = "in"))]
        input: String,
        /// Bound value.
        #[cfg_attr(feature = "serde", serde(rename = "out"))]
        output: String,
    },
}

/// An inclusive integer range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangeDef {
    /// First value.
    pub from: i64,
    /// Last value (inclusive).
    pub to: i64,
    /// Increment.
    #[cfg_attr(feature = "serde", serde(default = "default_step"))]
    pub step: i64,
}

#[cfg(feature = "serde")]
const fn default_step() -> i64 {
    1
}

/// One transformation rule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RuleDef {
    /// Regular expression anchored at the start of the value; absent for a
    /// catch-all rule.
    #[cfg_attr(feature = "serde", serde(rename = "match", default))]
    pub pattern: Option<String>,
    /// Output templates, each with one `{value}`.
    pub outputs: Vec<String>,
}

impl RuleDef {
    /// A rule applying to values that start with `pattern`.
    #[must_use]
    pub fn matching<S: Into<String>>(
        pattern: impl Into<String>,
        outputs: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            pattern: Some(pattern.into()),
            outputs: outputs.into_iter().map(Into::into).collect(),
        }
    }

    /// A rule applying to every value.
    #[must_use]
    pub fn catch_all<S: Into<String>>(outputs: impl IntoIterator<Item = S>) -> Self {
        Self {
            pattern: None,
            outputs: outputs.into_iter().map(Into::into).collect(),
        }
    }
}

/// A transformed list definition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransformedListDef {
    /// Source list (base or transformed).
    pub source: String,
    /// Rule-sets applied in order.
    pub transformations: Vec<String>,
}

impl TransformedListDef {
    /// Creates a transformed list definition.
    #[must_use]
    pub fn new<S: Into<String>>(
        source: impl Into<String>,
        transformations: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            source: source.into(),
            transformations: transformations.into_iter().map(Into::into).collect(),
        }
    }
}

/// An intent definition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntentDef {
    /// Intent name.
    pub name: String,
    /// Data blocks in order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: Vec<IntentDataDef>,
}

impl IntentDef {
    /// Creates an intent definition.
    #[must_use]
    pub fn new(name: impl Into<String>, data: Vec<IntentDataDef>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// One data block of an intent definition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IntentDataDef {
    /// Template text.
    pub sentences: Vec<String>,
    /// Target domains.
    pub domains: Vec<String>,
    /// Capability requirements.
    pub requires: BTreeMap<String, CapabilityValue>,
    /// Free-form metadata.
    pub metadata: BTreeMap<String, CapabilityValue>,
}

impl IntentDataDef {
    /// Creates a data block from template text.
    #[must_use]
    pub fn sentences<S: Into<String>>(sentences: impl IntoIterator<Item = S>) -> Self {
        Self {
            sentences: sentences.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Builder method to set target domains.
    #[must_use]
    pub fn with_domains<S: Into<String>>(mut self, domains: impl IntoIterator<Item = S>) -> Self {
        self.domains = domains.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to add a capability requirement.
    #[must_use]
    pub fn with_requirement(
        mut self,
        name: impl Into<String>,
        value: impl Into<CapabilityValue>,
    ) -> Self {
        self.requires.insert(name.into(), value.into());
        self
    }
}
