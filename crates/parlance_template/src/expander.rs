//! Lazy expansion of templates into phrases.
//!
//! Expansion is a cross product in declaration order: the first part varies
//! slowest, an optional yields its contents before its omission, and
//! alternatives and list values follow their declared order. Every list the
//! template references is resolved when the [`Expansion`] is created, so
//! iteration itself cannot fail and can be restarted or abandoned at will.

use std::iter;
use std::sync::Arc;

use parlance_foundation::{Result, SlotBinding};
use parlance_lexicon::{ListResolver, ResolvedList};

use crate::template::{Part, Template};

/// One concrete sentence produced by a template.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Phrase {
    /// Concatenated text, not yet normalized.
    pub text: String,
    /// Slots bound along the way, in template order.
    pub slots: Vec<SlotBinding>,
}

impl Phrase {
    fn literal(text: &str) -> Self {
        Self {
            text: text.to_string(),
            slots: Vec::new(),
        }
    }

    fn slot(name: &str, value: &str, surface: &str) -> Self {
        Self {
            text: surface.to_string(),
            slots: vec![SlotBinding::new(name, value, surface)],
        }
    }

    fn join(&self, tail: Phrase) -> Phrase {
        let mut text = String::with_capacity(self.text.len() + tail.text.len());
        text.push_str(&self.text);
        text.push_str(&tail.text);
        let mut slots = self.slots.clone();
        slots.extend(tail.slots);
        Phrase { text, slots }
    }
}

/// A template part with its slot lists resolved.
#[derive(Clone, Debug)]
enum Bound<'t> {
    Literal(&'t str),
    Optional(Vec<Bound<'t>>),
    Alternation(Vec<Vec<Bound<'t>>>),
    Slot { name: Arc<str>, list: ResolvedList },
}

impl<'t> Bound<'t> {
    fn bind_all<R: ListResolver + ?Sized>(parts: &'t [Part], resolver: &R) -> Result<Vec<Self>> {
        parts.iter().map(|part| Self::bind(part, resolver)).collect()
    }

    fn bind<R: ListResolver + ?Sized>(part: &'t Part, resolver: &R) -> Result<Self> {
        Ok(match part {
            Part::Literal(text) => Self::Literal(text),
            Part::Optional(inner) => Self::Optional(Self::bind_all(inner, resolver)?),
            Part::Alternation(alternatives) => Self::Alternation(
                alternatives
                    .iter()
                    .map(|alternative| Self::bind_all(alternative, resolver))
                    .collect::<Result<_>>()?,
            ),
            Part::Slot(slot) => {
                let list = resolver.resolve(&slot.list)?;
                let name = match &slot.slot {
                    Some(name) => Arc::from(name.as_str()),
                    None => Arc::clone(&list.slot),
                };
                Self::Slot { name, list }
            }
        })
    }
}

/// A template bound to resolved lists, ready to enumerate.
#[derive(Clone, Debug)]
pub struct Expansion<'t> {
    template: &'t Template,
    root: Vec<Bound<'t>>,
}

impl<'t> Expansion<'t> {
    /// Resolves every list `template` references.
    ///
    /// # Errors
    /// Returns `UnresolvedList` if the resolver cannot supply a referenced list.
    pub fn new<R: ListResolver + ?Sized>(template: &'t Template, resolver: &R) -> Result<Self> {
        Ok(Self {
            template,
            root: Bound::bind_all(template.parts(), resolver)?,
        })
    }

    /// Returns the template being expanded.
    #[must_use]
    pub fn template(&self) -> &'t Template {
        self.template
    }

    /// Returns a fresh lazy iterator over every phrase.
    #[must_use]
    pub fn iter(&self) -> Phrases<'_> {
        Phrases {
            inner: sequence(&self.root),
        }
    }

    /// Returns the number of phrases without producing them.
    ///
    /// Saturates at `u128::MAX`.
    #[must_use]
    pub fn count(&self) -> u128 {
        count_sequence(&self.root)
    }
}

impl<'e> IntoIterator for &'e Expansion<'_> {
    type Item = Phrase;
    type IntoIter = Phrases<'e>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over the phrases of an [`Expansion`].
pub struct Phrases<'e> {
    inner: Box<dyn Iterator<Item = Phrase> + 'e>,
}

impl Iterator for Phrases<'_> {
    type Item = Phrase;

    fn next(&mut self) -> Option<Phrase> {
        self.inner.next()
    }
}

impl std::fmt::Debug for Phrases<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Phrases").finish_non_exhaustive()
    }
}

/// Expands a template against a resolver.
///
/// # Errors
/// Returns `UnresolvedList` if the resolver cannot supply a referenced list.
pub fn expand<'t, R: ListResolver + ?Sized>(
    template: &'t Template,
    resolver: &R,
) -> Result<Expansion<'t>> {
    Expansion::new(template, resolver)
}

fn sequence<'e>(parts: &'e [Bound<'_>]) -> Box<dyn Iterator<Item = Phrase> + 'e> {
    match parts.split_first() {
        None => Box::new(iter::once(Phrase::default())),
        Some((head, [])) => part(head),
        Some((head, rest)) => Box::new(
            part(head).flat_map(move |prefix| sequence(rest).map(move |tail| prefix.join(tail))),
        ),
    }
}

fn part<'e>(bound: &'e Bound<'_>) -> Box<dyn Iterator<Item = Phrase> + 'e> {
    match bound {
        Bound::Literal(text) => Box::new(iter::once(Phrase::literal(text))),
        Bound::Optional(inner) => Box::new(sequence(inner).chain(iter::once(Phrase::default()))),
        Bound::Alternation(alternatives) => {
            Box::new(alternatives.iter().flat_map(|alternative| sequence(alternative)))
        }
        Bound::Slot { name, list } => Box::new(list.values.iter().flat_map(move |value| {
            value
                .surfaces
                .iter()
                .map(move |surface| Phrase::slot(name, &value.value, surface))
        })),
    }
}

fn count_sequence(parts: &[Bound<'_>]) -> u128 {
    parts.iter().map(count_part).fold(1, u128::saturating_mul)
}

fn count_part(bound: &Bound<'_>) -> u128 {
    match bound {
        Bound::Literal(_) => 1,
        Bound::Optional(inner) => count_sequence(inner).saturating_add(1),
        Bound::Alternation(alternatives) => alternatives
            .iter()
            .map(|alternative| count_sequence(alternative))
            .fold(0, u128::saturating_add),
        Bound::Slot { list, .. } => list.surface_count() as u128,
    }
}
