//! Validated, compiled grammars.
//!
//! A [`Grammar`] is the read-only per-language state every match call works
//! from: the lexicon, the intents with their compiled templates, and the skip
//! words. It is built once, either directly or from a [`GrammarDocument`],
//! and can be shared across threads.

use std::collections::BTreeSet;

use tracing::debug;

use parlance_foundation::{Error, ErrorContext, Normalizer, Result};
use parlance_lexicon::{
    Lexicon, LexiconResolver, List, ListValue, RangeList, Rule, RuleSet, TransformedList,
    ValueProvider,
};
use parlance_template::{Expansion, Template, compile};

use crate::document::{GrammarDocument, IntentDataDef, ListDef, ListValueDef};
use crate::intent::{Intent, IntentData, TRIGGER_SENTENCES_INTENT};

/// Position of one template: intent, data block, template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId {
    /// Index into [`Grammar::intents`].
    pub intent: usize,
    /// Index into the intent's data blocks.
    pub data: usize,
    /// Index into the block's templates.
    pub template: usize,
}

/// A validated grammar for one language.
#[derive(Clone, Debug)]
pub struct Grammar {
    language: String,
    lexicon: Lexicon,
    intents: Vec<Intent>,
    skip_words: Vec<String>,
    /// Every template in match priority order
    entries: Vec<EntryId>,
    /// Every list a template references, in first-reference order
    lists: Vec<String>,
}

impl Grammar {
    /// Creates a grammar from a lexicon and compiled intents.
    ///
    /// # Errors
    /// Returns a configuration error if a template references a list the
    /// lexicon does not define, or can bind the same slot name twice.
    pub fn new(language: impl Into<String>, lexicon: Lexicon, intents: Vec<Intent>) -> Result<Self> {
        let language = language.into();
        validate(&language, &lexicon, &intents)?;

        let mut entries = Vec::new();
        let mut lists: Vec<String> = Vec::new();
        for (i, intent) in intents.iter().enumerate() {
            for (d, data) in intent.data.iter().enumerate() {
                for (t, template) in data.templates.iter().enumerate() {
                    entries.push(EntryId {
                        intent: i,
                        data: d,
                        template: t,
                    });
                    for list in template.lists() {
                        if !lists.iter().any(|l| l == list) {
                            lists.push(list.to_string());
                        }
                    }
                }
            }
        }

        debug!(
            language = %language,
            intents = intents.len(),
            templates = entries.len(),
            lists = lists.len(),
            "loaded grammar"
        );

        Ok(Self {
            language,
            lexicon,
            intents,
            skip_words: Vec::new(),
            entries,
            lists,
        })
    }

    /// Validates and compiles a grammar document.
    ///
    /// # Errors
    /// Returns a configuration error describing the first problem found. A
    /// malformed template is attached as the cause.
    pub fn from_document(document: &GrammarDocument) -> Result<Self> {
        let language = document.language.as_str();
        let context = || ErrorContext::new().with_language(language);

        let mut builder = Lexicon::builder();
        for (name, def) in &document.lists {
            let list = list_from_def(name, def).map_err(|e| e.with_context(context()))?;
            builder = builder.list(list);
        }
        for (name, rules) in &document.transformations {
            let rules = rules
                .iter()
                .map(|rule| Rule::new(rule.pattern.as_deref(), rule.outputs.as_slice()))
                .collect::<Result<Vec<_>>>()
                .map_err(|e| {
                    Error::configuration_caused_by(format!("invalid transformation {name}"), e)
                        .with_context(context())
                })?;
            builder = builder.rule_set(RuleSet::new(name, rules));
        }
        for (name, def) in &document.transformed_lists {
            builder = builder.transformed_list(TransformedList::new(
                name,
                &def.source,
                &def.transformations,
            ));
        }
        let lexicon = builder.build().map_err(|e| e.with_context(context()))?;

        let mut intents = Vec::with_capacity(document.intents.len() + 1);
        for def in &document.intents {
            let data = def
                .data
                .iter()
                .map(|block| compile_block(language, &def.name, block))
                .collect::<Result<Vec<_>>>()?;
            intents.push(Intent::new(&def.name, data));
        }
        if !document.trigger_sentences.is_empty() {
            let block = IntentDataDef::sentences(document.trigger_sentences.iter().cloned());
            let data = compile_block(language, TRIGGER_SENTENCES_INTENT, &block)?;
            intents.push(Intent::new(TRIGGER_SENTENCES_INTENT, vec![data]));
        }

        Ok(Self::new(language, lexicon, intents)?.with_skip_words(document.skip_words.iter().cloned()))
    }

    /// Builder method to set the words dropped from input before matching.
    #[must_use]
    pub fn with_skip_words<S: Into<String>>(mut self, words: impl IntoIterator<Item = S>) -> Self {
        self.skip_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the language code.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the lexicon.
    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Returns the intents in match priority order.
    #[must_use]
    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// Returns the skip words.
    #[must_use]
    pub fn skip_words(&self) -> &[String] {
        &self.skip_words
    }

    /// Returns every template position in match priority order.
    #[must_use]
    pub fn entries(&self) -> &[EntryId] {
        &self.entries
    }

    /// Returns every list referenced by a template.
    #[must_use]
    pub fn referenced_lists(&self) -> &[String] {
        &self.lists
    }

    /// Returns the intent of an entry.
    #[must_use]
    pub fn intent(&self, id: EntryId) -> &Intent {
        &self.intents[id.intent]
    }

    /// Returns the data block of an entry.
    #[must_use]
    pub fn data(&self, id: EntryId) -> &IntentData {
        &self.intents[id.intent].data[id.data]
    }

    /// Returns the template of an entry.
    #[must_use]
    pub fn template(&self, id: EntryId) -> &Template {
        &self.data(id).templates[id.template]
    }

    /// Returns every word the grammar can produce, sorted, cased and
    /// stripped of terminal punctuation by `normalizer`.
    ///
    /// Dynamic lists contribute the values `provider` supplies now.
    ///
    /// # Errors
    /// Returns `UnresolvedList` if a referenced dynamic list is not supplied.
    pub fn vocabulary(
        &self,
        provider: &dyn ValueProvider,
        normalizer: &Normalizer,
    ) -> Result<BTreeSet<String>> {
        let resolver = LexiconResolver::new(&self.lexicon, provider);
        let mut words = BTreeSet::new();

        for id in &self.entries {
            for phrase in &Expansion::new(self.template(*id), &resolver)? {
                for word in normalizer.normalize(&phrase.text).split(' ') {
                    let word = word.trim_matches(|c: char| normalizer.is_terminal_punctuation(c));
                    if !word.is_empty() && !words.contains(word) {
                        words.insert(word.to_string());
                    }
                }
            }
        }

        debug!(language = %self.language, words = words.len(), "extracted vocabulary");
        Ok(words)
    }
}

fn list_from_def(name: &str, def: &ListDef) -> Result<List> {
    match (&def.values, &def.range, def.dynamic) {
        (Some(values), None, false) => Ok(List::values(
            name,
            values.iter().map(|value| match value {
                ListValueDef::Text(text) => ListValue::literal(text),
                ListValueDef::Mapped { input, output } => ListValue::new(input, output),
            }),
        )),
        (None, Some(range), false) => RangeList::new(range.from, range.to, range.step)
            .map(|range| List::range(name, range))
            .map_err(|e| Error::configuration_caused_by(format!("invalid range list {name}"), e)),
        (None, None, true) => Ok(List::dynamic(name)),
        _ => Err(Error::configuration(format!(
            "list {name} must define exactly one of values, range or dynamic"
        ))),
    }
}

fn compile_block(language: &str, intent: &str, block: &IntentDataDef) -> Result<IntentData> {
    let templates = block
        .sentences
        .iter()
        .map(|sentence| {
            compile(sentence).map_err(|e| {
                Error::configuration_caused_by(format!("malformed template in intent {intent}"), e)
                    .with_context(
                        ErrorContext::new()
                            .with_language(language)
                            .with_intent(intent)
                            .with_template(sentence),
                    )
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let data = IntentData::new(templates).with_domains(block.domains.iter().cloned());
    let data = block
        .requires
        .iter()
        .fold(data, |data, (name, value)| data.with_requirement(name, value.clone()));
    Ok(block
        .metadata
        .iter()
        .fold(data, |data, (name, value)| data.with_metadata(name, value.clone())))
}

fn validate(language: &str, lexicon: &Lexicon, intents: &[Intent]) -> Result<()> {
    for intent in intents {
        for template in intent.templates() {
            let context = || {
                ErrorContext::new()
                    .with_language(language)
                    .with_intent(&intent.name)
                    .with_template(template.source())
            };

            if let Some(slot) = template
                .slot_refs()
                .into_iter()
                .find(|slot| !lexicon.contains(&slot.list))
            {
                return Err(Error::configuration(format!(
                    "template references undefined list {}",
                    slot.list
                ))
                .with_context(context()));
            }

            let repeated = template
                .max_bindings(|list| lexicon.default_slot(list).unwrap_or(list))
                .into_iter()
                .filter(|(_, count)| *count > 1)
                .map(|(name, _)| name)
                .min();
            if let Some(name) = repeated {
                return Err(Error::configuration(format!(
                    "slot {name} can be bound more than once"
                ))
                .with_context(context()));
            }
        }
    }
    Ok(())
}
