//! Parlance - Sentence-template grammar engine for spoken command recognition
//!
//! This crate re-exports all layers of the Parlance system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: parlance_matcher    - Intents, grammar loading, matching backends
//! Layer 2: parlance_template   - Template compiler, lazy expander
//! Layer 1: parlance_lexicon    - Lists, transformations, value providers
//! Layer 0: parlance_foundation - Errors, text normalization, slot bindings
//! ```

pub use parlance_foundation as foundation;
pub use parlance_lexicon as lexicon;
pub use parlance_matcher as matcher;
pub use parlance_template as template;

pub use parlance_foundation::{Error, Result};
pub use parlance_matcher::{Grammar, GrammarDocument, MatchResult, Matcher, MatcherConfig, Outcome};
