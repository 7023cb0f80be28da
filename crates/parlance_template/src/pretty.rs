//! Rendering templates back to grammar text.
//!
//! The rendering is canonical: compiling it yields the same parts.

use std::fmt::{self, Display, Write};

use crate::template::{Part, SlotRef, Template};

const METACHARACTERS: &[char] = &['(', ')', '[', ']', '|', '{', '}', '\\'];

impl Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Some(slot) => write!(f, "{{{}:{slot}}}", self.list),
            None => write!(f, "{{{}}}", self.list),
        }
    }
}

impl Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => {
                for c in text.chars() {
                    if METACHARACTERS.contains(&c) {
                        f.write_char('\\')?;
                    }
                    f.write_char(c)?;
                }
                Ok(())
            }
            Self::Optional(inner) => {
                f.write_char('[')?;
                match inner.as_slice() {
                    [Self::Alternation(alternatives)] if alternatives.len() > 1 => {
                        write_alternatives(f, alternatives)?;
                    }
                    _ => write_sequence(f, inner)?,
                }
                f.write_char(']')
            }
            Self::Alternation(alternatives) => {
                f.write_char('(')?;
                write_alternatives(f, alternatives)?;
                f.write_char(')')
            }
            Self::Slot(slot) => slot.fmt(f),
        }
    }
}

impl Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, self.parts())
    }
}

fn write_sequence(f: &mut fmt::Formatter<'_>, parts: &[Part]) -> fmt::Result {
    parts.iter().try_for_each(|part| part.fmt(f))
}

fn write_alternatives(f: &mut fmt::Formatter<'_>, alternatives: &[Vec<Part>]) -> fmt::Result {
    for (i, alternative) in alternatives.iter().enumerate() {
        if i > 0 {
            f.write_char('|')?;
        }
        write_sequence(f, alternative)?;
    }
    Ok(())
}
