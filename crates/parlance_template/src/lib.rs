//! Sentence template compiler and lazy expander for Parlance.
//!
//! This crate provides:
//! - [`Lexer`] - Tokenization of template text
//! - [`Parser`] / [`compile`] - Recursive-descent parsing into [`Template`]s
//! - [`Expansion`] / [`expand`] - Lazy enumeration of the [`Phrase`]s a
//!   template can produce
//!
//! # Template syntax
//!
//! ```text
//! (apri|chiudi) [il|lo] {le_name}   alternation, optional alternation, slot
//! set {percentage:brightness}       slot with an explicit slot name
//! 50\% \(approx\)                   '\' makes the next character literal
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod expander;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod span;
pub mod template;
pub mod token;

pub use expander::{Expansion, Phrase, Phrases, expand};
pub use lexer::Lexer;
pub use parser::{Parser, compile};
pub use span::Span;
pub use template::{Part, SlotRef, Template};
pub use token::{Token, TokenKind};
