//! Intents and their sentence data.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use parlance_template::Template;

/// Name of the intent trigger sentences are registered under.
pub const TRIGGER_SENTENCES_INTENT: &str = "TriggerSentences";

/// A capability requirement or metadata value.
///
/// Requirements are reported with a match, never checked against the home.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum CapabilityValue {
    /// `light_supports_brightness: true`
    Bool(bool),
    /// `min_color_temp: 2000`
    Int(i64),
    /// `device_class: garage`
    Text(String),
    /// `supported_features: [open, close]`
    List(Vec<String>),
}

impl fmt::Display for CapabilityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<bool> for CapabilityValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for CapabilityValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for CapabilityValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One block of an intent: templates that share domains and requirements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntentData {
    /// Compiled templates, in declaration order.
    pub templates: Vec<Template>,
    /// Entity domains the sentences target.
    pub domains: Vec<String>,
    /// Capability requirements reported with a match.
    pub requires: BTreeMap<String, CapabilityValue>,
    /// Free-form metadata reported with a match.
    pub metadata: BTreeMap<String, CapabilityValue>,
}

impl IntentData {
    /// Creates a data block from compiled templates.
    #[must_use]
    pub fn new(templates: Vec<Template>) -> Self {
        Self {
            templates,
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

    /// Builder method to add metadata.
    #[must_use]
    pub fn with_metadata(mut self, name: impl Into<String>, value: impl Into<CapabilityValue>) -> Self {
        self.metadata.insert(name.into(), value.into());
        self
    }
}

/// A named intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Intent {
    /// Intent name (`HassTurnOn`).
    pub name: String,
    /// Data blocks in declaration order.
    pub data: Vec<IntentData>,
}

impl Intent {
    /// Creates an intent.
    #[must_use]
    pub fn new(name: impl Into<String>, data: Vec<IntentData>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Returns every template of every data block, in order.
    pub fn templates(&self) -> impl Iterator<Item = &Template> {
        self.data.iter().flat_map(|d| d.templates.iter())
    }
}
