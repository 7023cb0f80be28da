//! Grammatical transformation rule-sets.
//!
//! A rule-set rewrites one value into the phrase variants a language needs for
//! agreement, e.g. Italian `armadio` → `dell'armadio`, `armadio`. Rules are
//! tried in declaration order and the first one that applies wins:
//!
//! ```text
//! de:
//!   ^[aeiouàèéìòù]  → dell'{value} | {value}
//!   ^s[^aeiou]      → dello {value} | {value}
//!   (catch-all)     → del {value}  | {value}
//! ```
//!
//! A value that matches no rule in a rule-set without a catch-all produces no
//! variants at all. That is how languages define special-case-only rules.

use std::collections::HashMap;
use std::fmt;

use regex::Regex;

use parlance_foundation::{Error, Result};

use crate::list::ListValue;

/// Placeholder substituted with the input value.
pub const VALUE_PLACEHOLDER: &str = "{value}";

/// An output template with exactly one `{value}` placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputTemplate {
    prefix: String,
    suffix: String,
}

impl OutputTemplate {
    /// Parses an output template.
    ///
    /// # Errors
    /// Returns a configuration error unless the template contains exactly one
    /// `{value}` placeholder.
    pub fn parse(template: &str) -> Result<Self> {
        match template.split_once(VALUE_PLACEHOLDER) {
            Some((prefix, suffix)) if !suffix.contains(VALUE_PLACEHOLDER) => Ok(Self {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            }),
            _ => Err(Error::configuration(format!(
                "output template \"{template}\" must contain exactly one {VALUE_PLACEHOLDER}, found {}",
                template.matches(VALUE_PLACEHOLDER).count()
            ))),
        }
    }

    /// Substitutes `value` for the placeholder.
    #[must_use]
    pub fn render(&self, value: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + value.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(value);
        out.push_str(&self.suffix);
        out
    }
}

impl fmt::Display for OutputTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{VALUE_PLACEHOLDER}{}", self.prefix, self.suffix)
    }
}

/// One rule: an optional pattern and the outputs it produces.
#[derive(Clone, Debug)]
pub struct Rule {
    /// Source of the pattern as written in the grammar.
    pattern_source: Option<String>,
    /// Pattern anchored at the start of the value.
    pattern: Option<Regex>,
    outputs: Vec<OutputTemplate>,
}

impl Rule {
    /// Creates a rule.
    ///
    /// The pattern is anchored at the start of the value: `[aeiou]` matches
    /// values that *begin* with a vowel. Matching is Unicode aware and case
    /// sensitive; accented characters must be listed explicitly.
    ///
    /// # Errors
    /// Returns a configuration error if the pattern does not compile or an
    /// output template is invalid.
    pub fn new<S: AsRef<str>>(pattern: Option<&str>, outputs: &[S]) -> Result<Self> {
        let compiled = pattern
            .map(|source| {
                Regex::new(&format!("^(?:{source})")).map_err(|e| {
                    Error::configuration(format!("invalid transformation pattern \"{source}\": {e}"))
                })
            })
            .transpose()?;
        let outputs = outputs
            .iter()
            .map(|o| OutputTemplate::parse(o.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            pattern_source: pattern.map(str::to_string),
            pattern: compiled,
            outputs,
        })
    }

    /// Creates a rule that applies to every value.
    ///
    /// # Errors
    /// Returns a configuration error if an output template is invalid.
    pub fn catch_all<S: AsRef<str>>(outputs: &[S]) -> Result<Self> {
        Self::new(None, outputs)
    }

    /// Returns true if this rule has no pattern.
    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        self.pattern.is_none()
    }

    /// Returns the pattern as written, if any.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern_source.as_deref()
    }

    /// Returns the output templates.
    #[must_use]
    pub fn outputs(&self) -> &[OutputTemplate] {
        &self.outputs
    }

    /// Returns true if this rule applies to `value`.
    #[must_use]
    pub fn applies_to(&self, value: &str) -> bool {
        self.pattern.as_ref().is_none_or(|p| p.is_match(value))
    }
}

/// An ordered set of transformation rules.
#[derive(Clone, Debug)]
pub struct RuleSet {
    name: String,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates a rule-set.
    #[must_use]
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Returns the rule-set identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns true if some rule applies to every value.
    #[must_use]
    pub fn has_catch_all(&self) -> bool {
        self.rules.iter().any(Rule::is_catch_all)
    }

    /// Selects the first rule that applies to `value`.
    #[must_use]
    pub fn select(&self, value: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.applies_to(value))
    }

    /// Transforms one value into its ordered variants.
    ///
    /// Returns an empty vector when no rule applies.
    #[must_use]
    pub fn apply(&self, value: &str) -> Vec<String> {
        self.select(value)
            .map(|rule| rule.outputs.iter().map(|o| o.render(value)).collect())
            .unwrap_or_default()
    }
}

/// A source value together with the surface variants derived from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedValue {
    /// Value bound to the slot.
    pub value: String,
    /// Surface strings that match this value, in order.
    pub surfaces: Vec<String>,
}

impl ResolvedValue {
    /// Creates a resolved value with a single surface.
    #[must_use]
    pub fn from_list_value(value: &ListValue) -> Self {
        Self {
            value: value.value.clone(),
            surfaces: vec![value.text.clone()],
        }
    }
}

/// Applies rule-sets to list values.
#[derive(Clone, Copy, Debug)]
pub struct Transformer<'a> {
    rule_sets: &'a HashMap<String, RuleSet>,
}

impl<'a> Transformer<'a> {
    /// Creates a transformer over a table of rule-sets keyed by identifier.
    #[must_use]
    pub fn new(rule_sets: &'a HashMap<String, RuleSet>) -> Self {
        Self { rule_sets }
    }

    fn rule_set(&self, id: &str) -> Result<&'a RuleSet> {
        self.rule_sets
            .get(id)
            .ok_or_else(|| Error::configuration(format!("unknown transformation: {id}")))
    }

    /// Applies one rule-set to each source value.
    ///
    /// The surface text of each value is transformed; the bound value is kept.
    /// Values no rule applies to are dropped.
    ///
    /// # Errors
    /// Returns a configuration error if the rule-set does not exist.
    pub fn apply(&self, rule_set: &str, values: &[ListValue]) -> Result<Vec<ResolvedValue>> {
        let rules = self.rule_set(rule_set)?;
        Ok(values
            .iter()
            .filter_map(|v| {
                let surfaces = rules.apply(&v.text);
                (!surfaces.is_empty()).then(|| ResolvedValue {
                    value: v.value.clone(),
                    surfaces,
                })
            })
            .collect())
    }

    /// Applies rule-sets in sequence.
    ///
    /// Every variant produced by stage *i* is fed to stage *i + 1*, so variant
    /// counts multiply. Nothing is deduplicated. Values left with no variants
    /// are dropped.
    ///
    /// # Errors
    /// Returns a configuration error if any rule-set does not exist.
    pub fn apply_chain<S: AsRef<str>>(
        &self,
        rule_sets: &[S],
        values: &[ListValue],
    ) -> Result<Vec<ResolvedValue>> {
        let stages = rule_sets
            .iter()
            .map(|id| self.rule_set(id.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(values
            .iter()
            .filter_map(|v| {
                let surfaces = stages.iter().fold(vec![v.text.clone()], |current, stage| {
                    current.iter().flat_map(|s| stage.apply(s)).collect()
                });
                (!surfaces.is_empty()).then(|| ResolvedValue {
                    value: v.value.clone(),
                    surfaces,
                })
            })
            .collect())
    }
}
