//! Error taxonomy, text normalization, and slot bindings for Parlance.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`Normalizer`] - Case folding, whitespace and punctuation handling
//! - [`Cursor`] - Incremental normalized comparison used by compiled matching
//! - [`SlotBinding`] - A slot name bound to a source value

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod slot;
pub mod text;

pub use error::{Error, ErrorContext, ErrorKind, ExpansionLimit};
pub use slot::{SlotBinding, find_slot};
pub use text::{Cursor, Normalizer, NormalizerConfig, WordCasing};

/// Result type alias using the Parlance error type.
pub type Result<T> = std::result::Result<T, Error>;
