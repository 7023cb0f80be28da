//! Slot bindings captured during a match.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A slot bound to a concrete value.
///
/// `value` is always the *source* value of the list entry, never the surface
/// text that matched. For a transformed list the surface may carry an article
/// or elision (`dell'armadio`) while the value stays `armadio`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotBinding {
    /// Slot name.
    pub name: String,
    /// Source value of the matched list entry.
    pub value: String,
    /// Surface text that was matched.
    pub text: String,
}

impl SlotBinding {
    /// Creates a new slot binding.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for SlotBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Finds a binding by slot name.
#[must_use]
pub fn find_slot<'a>(slots: &'a [SlotBinding], name: &str) -> Option<&'a SlotBinding> {
    slots.iter().find(|slot| slot.name == name)
}
