//! Word lists, grammatical transformations, and list resolution for Parlance.
//!
//! # Architecture
//!
//! ```text
//!  lists ──────────────┐
//!  (color, name, ...)  │
//!                      ▼
//!  transformations ─► TRANSFORMER ─► transformed lists (le_name = de(name))
//!                      │
//!                      ▼
//!  ValueProvider ───► RESOLVER ─► (slot name, [(value, [surface, ...]), ...])
//!  (live entity names)
//! ```
//!
//! # Modules
//!
//! - [`list`] - Base lists: declared values, integer ranges, dynamic lists
//! - [`transform`] - Rule-sets and the transformer
//! - [`transformed`] - Lists derived by transformation
//! - [`lexicon`] - Validated per-language storage
//! - [`provider`] - Query-time value providers
//! - [`resolver`] - List reference resolution

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod lexicon;
pub mod list;
pub mod provider;
pub mod resolver;
pub mod transform;
pub mod transformed;

pub use lexicon::{Lexicon, LexiconBuilder};
pub use list::{List, ListSource, ListValue, RangeList};
pub use provider::{NoValues, Registry, RegistryEntity, ValueProvider};
pub use resolver::{LexiconResolver, ListResolver, ResolvedList};
pub use transform::{OutputTemplate, ResolvedValue, Rule, RuleSet, Transformer};
pub use transformed::{Derivation, TransformedList};
