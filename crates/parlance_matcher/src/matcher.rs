//! Sentence recognition.
//!
//! A [`Matcher`] owns a grammar, its compiled program and the normalizer. Each
//! recognition call resolves every referenced list once through a fresh
//! [`LexiconResolver`], normalizes the input, and searches with the
//! configured backend. Both backends return the same results in the same
//! order.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::ops::ControlFlow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use parlance_foundation::{Error, ExpansionLimit, Normalizer, Result, SlotBinding, find_slot};
use parlance_lexicon::{LexiconResolver, ListResolver, ResolvedList, ValueProvider};
use parlance_template::Expansion;

use crate::config::{Backend, MatcherConfig};
use crate::grammar::Grammar;
use crate::intent::CapabilityValue;
use crate::program::Program;
use crate::vm::Vm;

/// A recognized sentence.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchResult {
    /// Intent name.
    pub intent: String,
    /// Domains of the matching data block.
    pub domains: Vec<String>,
    /// Capability requirements of the matching data block, unchecked.
    pub requires: BTreeMap<String, CapabilityValue>,
    /// Metadata of the matching data block.
    pub metadata: BTreeMap<String, CapabilityValue>,
    /// Slot bindings in template order.
    pub slots: Vec<SlotBinding>,
    /// Source text of the matching template.
    pub template: String,
    /// The input as it was compared, after normalization.
    pub text: String,
}

impl MatchResult {
    /// Looks up a slot binding by name.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&SlotBinding> {
        find_slot(&self.slots, name)
    }

    /// Returns the value bound to a slot.
    #[must_use]
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slot(name).map(|s| s.value.as_str())
    }
}

/// The outcome of recognizing one sentence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The first matching template in priority order.
    Match(MatchResult),
    /// Nothing in the grammar produces the input.
    NoMatch,
}

impl Outcome {
    /// Returns true for a match.
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match(_))
    }

    /// Returns the match, if any.
    #[must_use]
    pub fn as_match(&self) -> Option<&MatchResult> {
        match self {
            Self::Match(result) => Some(result),
            Self::NoMatch => None,
        }
    }

    /// Converts into the match, if any.
    #[must_use]
    pub fn into_match(self) -> Option<MatchResult> {
        match self {
            Self::Match(result) => Some(result),
            Self::NoMatch => None,
        }
    }
}

/// An accepted path: entry index and bindings.
struct Found {
    entry: usize,
    slots: Vec<SlotBinding>,
}

/// Recognizes sentences against a grammar.
#[derive(Debug)]
pub struct Matcher {
    grammar: Grammar,
    config: MatcherConfig,
    normalizer: Normalizer,
    program: Program,
    /// Normalized skip words, split into words
    skip_words: Vec<Vec<String>>,
}

impl Matcher {
    /// Creates a matcher, compiling the grammar's program.
    #[must_use]
    pub fn new(grammar: Grammar, config: MatcherConfig) -> Self {
        let normalizer = Normalizer::new(config.normalizer.clone());
        let program = Program::compile(&grammar);
        let skip_words = grammar
            .skip_words()
            .iter()
            .map(|w| {
                normalizer
                    .normalize(w)
                    .split(' ')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|words| !words.is_empty())
            .collect();

        debug!(
            language = grammar.language(),
            instructions = program.len(),
            backend = ?config.backend,
            "created matcher"
        );

        Self {
            grammar,
            config,
            normalizer,
            program,
            skip_words,
        }
    }

    /// Returns the grammar.
    #[must_use]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Returns the compiled program.
    #[must_use]
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Returns every word the grammar can produce, cased the way this
    /// matcher compares text.
    ///
    /// # Errors
    /// Returns `UnresolvedList` if a referenced dynamic list is not supplied.
    pub fn vocabulary(&self, provider: &dyn ValueProvider) -> Result<BTreeSet<String>> {
        self.grammar.vocabulary(provider, &self.normalizer)
    }

    /// Normalizes input the way it is compared: folded, collapsed, trailing
    /// punctuation stripped, skip words removed.
    #[must_use]
    pub fn normalize_input(&self, text: &str) -> String {
        let normalized = self.normalizer.normalize(text);
        if self.skip_words.is_empty() {
            return normalized;
        }

        let words: Vec<&str> = normalized.split(' ').collect();
        let mut kept = Vec::with_capacity(words.len());
        let mut i = 0;
        while i < words.len() {
            let rest = &words[i..];
            let skip = self.skip_words.iter().find(|skip| {
                skip.len() <= rest.len() && skip.iter().zip(rest).all(|(a, b)| a == b)
            });
            match skip {
                Some(skip) => i += skip.len(),
                None => {
                    kept.push(words[i]);
                    i += 1;
                }
            }
        }
        self.normalizer.normalize(&kept.join(" "))
    }

    /// Recognizes `text`, returning the first match in priority order.
    ///
    /// # Errors
    /// Returns `UnresolvedList` if the provider does not supply a dynamic list
    /// the grammar references, and `LimitExceeded` if the expansion backend
    /// runs past `max_phrases`.
    pub fn recognize(&self, text: &str, provider: &dyn ValueProvider) -> Result<Outcome> {
        let input = self.normalize_input(text);
        let found = self.search(&input, provider, true)?;

        let outcome = match found.into_iter().next() {
            Some(found) => Outcome::Match(self.result(found, &input)),
            None => Outcome::NoMatch,
        };
        match &outcome {
            Outcome::Match(result) => {
                debug!(input = %input, intent = %result.intent, template = %result.template, "matched");
            }
            Outcome::NoMatch => debug!(input = %input, "no match"),
        }
        Ok(outcome)
    }

    /// Recognizes `text`, returning every distinct match in priority order.
    ///
    /// Paths through the same template with equal bindings are reported
    /// once. Identical sentences in different data blocks are each reported.
    ///
    /// # Errors
    /// As for [`Matcher::recognize`].
    pub fn recognize_all(&self, text: &str, provider: &dyn ValueProvider) -> Result<Vec<MatchResult>> {
        let input = self.normalize_input(text);
        let found = self.search(&input, provider, false)?;

        let mut seen = HashSet::new();
        let mut results = Vec::new();
        for found in found {
            if seen.insert((found.entry, found.slots.clone())) {
                results.push(self.result(found, &input));
            }
        }

        debug!(input = %input, matches = results.len(), "matched all");
        Ok(results)
    }

    fn search(&self, input: &str, provider: &dyn ValueProvider, first: bool) -> Result<Vec<Found>> {
        let resolver = LexiconResolver::new(self.grammar.lexicon(), provider);
        for list in self.grammar.referenced_lists() {
            resolver.resolve(list)?;
        }

        trace!(input, backend = ?self.config.backend, first, "searching");
        match self.config.backend {
            Backend::Expansion => self.search_expansion(input, &resolver, first),
            Backend::Compiled => self.search_compiled(input, &resolver, first),
        }
    }

    fn search_expansion(
        &self,
        input: &str,
        resolver: &LexiconResolver<'_>,
        first: bool,
    ) -> Result<Vec<Found>> {
        let mut found = Vec::new();
        let mut tested = 0usize;

        for (entry, id) in self.grammar.entries().iter().enumerate() {
            let expansion = Expansion::new(self.grammar.template(*id), resolver)?;
            for phrase in &expansion {
                tested += 1;
                if let Some(limit) = self.config.max_phrases {
                    if tested > limit {
                        return Err(Error::limit_exceeded(ExpansionLimit::MaxPhrases { limit }));
                    }
                }
                if self.normalizer.normalize(&phrase.text) == input {
                    found.push(Found {
                        entry,
                        slots: phrase.slots,
                    });
                    if first {
                        return Ok(found);
                    }
                }
            }
        }

        trace!(tested, "expansion search finished");
        Ok(found)
    }

    fn search_compiled(
        &self,
        input: &str,
        resolver: &LexiconResolver<'_>,
        first: bool,
    ) -> Result<Vec<Found>> {
        let lists = self
            .program
            .lists()
            .iter()
            .map(|list| resolver.resolve(list))
            .collect::<Result<Vec<ResolvedList>>>()?;

        let mut found = Vec::new();
        Vm::new(&self.program, &lists).run(self.normalizer.cursor(input), |entry, slots| {
            found.push(Found {
                entry,
                slots: slots.to_vec(),
            });
            if first {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        Ok(found)
    }

    fn result(&self, found: Found, input: &str) -> MatchResult {
        let id = self.grammar.entries()[found.entry];
        let intent = self.grammar.intent(id);
        let data = self.grammar.data(id);
        MatchResult {
            intent: intent.name.clone(),
            domains: data.domains.clone(),
            requires: data.requires.clone(),
            metadata: data.metadata.clone(),
            slots: found.slots,
            template: self.grammar.template(id).source().to_string(),
            text: input.to_string(),
        }
    }
}
