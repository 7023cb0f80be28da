//! Intent grammars and sentence matching for Parlance.
//!
//! This crate provides:
//! - [`GrammarDocument`] - Decoded sentence files, with layering via merge
//! - [`Grammar`] - A validated grammar: lexicon plus compiled intents
//! - [`Matcher`] - Recognition of user input against a grammar
//! - [`Program`] / [`Vm`] - The compiled backend
//!
//! # Example
//!
//! ```
//! use parlance_lexicon::Registry;
//! use parlance_matcher::{
//!     Grammar, GrammarDocument, IntentDataDef, IntentDef, ListDef, Matcher, MatcherConfig,
//!     RuleDef, TransformedListDef,
//! };
//!
//! let document = GrammarDocument::new("it")
//!     .with_list("name", ListDef::dynamic())
//!     .with_transformation(
//!         "de",
//!         vec![
//!             RuleDef::matching("[aeiou]", ["dell'{value}", "{value}"]),
//!             RuleDef::catch_all(["del {value}", "{value}"]),
//!         ],
//!     )
//!     .with_transformed_list("le_name", TransformedListDef::new("name", ["de"]))
//!     .with_intent(IntentDef::new(
//!         "HassTurnOn",
//!         vec![IntentDataDef::sentences(["(apri|chiudi) {le_name}"])],
//!     ));
//!
//! let matcher = Matcher::new(Grammar::from_document(&document)?, MatcherConfig::default());
//! let registry = Registry::new().with_entity("cover", ["armadio"]);
//!
//! let outcome = matcher.recognize("apri armadio", &registry)?;
//! let result = outcome.into_match().expect("matched");
//! assert_eq!(result.intent, "HassTurnOn");
//! assert_eq!(result.slot_value("name"), Some("armadio"));
//! # Ok::<(), parlance_foundation::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod document;
pub mod grammar;
pub mod intent;
pub mod matcher;
pub mod program;
pub mod vm;

pub use config::{Backend, MatcherConfig};
pub use document::{
    GrammarDocument, IntentDataDef, IntentDef, ListDef, ListValueDef, RangeDef, RuleDef,
    TransformedListDef,
};
pub use grammar::{EntryId, Grammar};
pub use intent::{CapabilityValue, Intent, IntentData, TRIGGER_SENTENCES_INTENT};
pub use matcher::{MatchResult, Matcher, Outcome};
pub use program::{Inst, Program, SlotOperand};
pub use vm::Vm;
