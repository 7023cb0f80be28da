//! Named value lists.
//!
//! A list supplies the values a slot can take. Values are either declared in
//! the grammar, generated from an integer range, or supplied per query by a
//! [`ValueProvider`](crate::provider::ValueProvider).

use std::sync::Arc;

use parlance_foundation::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One entry of a list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ListValue {
    /// Surface text spoken by the user.
    pub text: String,
    /// Value bound to the slot when `text` matches.
    pub value: String,
}

impl ListValue {
    /// Creates a list value whose surface text differs from its bound value.
    #[must_use]
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }

    /// Creates a list value that binds its own surface text.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            value: text.clone(),
            text,
        }
    }
}

/// An inclusive integer range with a positive step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeList {
    from: i64,
    to: i64,
    step: i64,
}

impl RangeList {
    /// Most numbers a range may produce. Static lists are materialized at
    /// load, so a range is bounded like any declared list.
    pub const MAX_LEN: u64 = 100_000;

    /// Creates a range list.
    ///
    /// # Errors
    /// Returns a configuration error if `step` is not positive, `from > to`,
    /// or the range holds more than [`RangeList::MAX_LEN`] numbers.
    pub fn new(from: i64, to: i64, step: i64) -> Result<Self> {
        if step <= 0 {
            return Err(Error::configuration(format!(
                "range step must be positive, got {step}"
            )));
        }
        if from > to {
            return Err(Error::configuration(format!(
                "range start {from} is greater than end {to}"
            )));
        }
        let len = to.abs_diff(from) / step.unsigned_abs() + 1;
        if len > Self::MAX_LEN {
            return Err(Error::configuration(format!(
                "range {from}..={to} step {step} holds {len} numbers, more than {}",
                Self::MAX_LEN
            )));
        }
        Ok(Self { from, to, step })
    }

    /// Returns the first value.
    #[must_use]
    pub const fn from(&self) -> i64 {
        self.from
    }

    /// Returns the last value (inclusive bound).
    #[must_use]
    pub const fn to(&self) -> i64 {
        self.to
    }

    /// Returns the step.
    #[must_use]
    pub const fn step(&self) -> i64 {
        self.step
    }

    /// Iterates the numbers in the range.
    pub fn numbers(&self) -> impl Iterator<Item = i64> + use<> {
        let (from, to, step) = (self.from, self.to, self.step);
        std::iter::successors(Some(from), move |n| n.checked_add(step).filter(|next| *next <= to))
    }

    /// Materializes the range as list values.
    #[must_use]
    pub fn values(&self) -> Vec<ListValue> {
        self.numbers().map(|n| ListValue::literal(n.to_string())).collect()
    }
}

/// Where a list's values come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListSource {
    /// Values declared in the grammar.
    Values(Arc<[ListValue]>),
    /// Integers generated from a range.
    Range(RangeList),
    /// Values supplied per query by a value provider.
    Dynamic,
}

/// A named list of values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct List {
    /// List identifier.
    pub name: String,
    /// Value source.
    pub source: ListSource,
}

impl List {
    /// Creates a list of declared values.
    #[must_use]
    pub fn values(name: impl Into<String>, values: impl IntoIterator<Item = ListValue>) -> Self {
        Self {
            name: name.into(),
            source: ListSource::Values(values.into_iter().collect()),
        }
    }

    /// Creates a list whose values are their own surface text.
    #[must_use]
    pub fn literals<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self::values(name, values.into_iter().map(ListValue::literal))
    }

    /// Creates a range list.
    #[must_use]
    pub fn range(name: impl Into<String>, range: RangeList) -> Self {
        Self {
            name: name.into(),
            source: ListSource::Range(range),
        }
    }

    /// Creates a list supplied at query time.
    #[must_use]
    pub fn dynamic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: ListSource::Dynamic,
        }
    }

    /// Returns true if the values are supplied at query time.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        matches!(self.source, ListSource::Dynamic)
    }

    /// Returns the statically known values, or `None` for a dynamic list.
    #[must_use]
    pub fn static_values(&self) -> Option<Vec<ListValue>> {
        match &self.source {
            ListSource::Values(values) => Some(values.to_vec()),
            ListSource::Range(range) => Some(range.values()),
            ListSource::Dynamic => None,
        }
    }
}
