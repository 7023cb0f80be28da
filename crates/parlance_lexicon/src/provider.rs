//! Providers of list values known only at query time.

use std::collections::HashMap;

use crate::list::ListValue;

/// Supplies values for dynamic lists.
///
/// A provider must return the same snapshot for the duration of one
/// recognition call. The engine may ask for the same list more than once and
/// never caches answers across calls.
pub trait ValueProvider {
    /// Returns the current values of `list`, or `None` if this provider does
    /// not supply it.
    fn values(&self, list: &str) -> Option<Vec<ListValue>>;
}

impl<P: ValueProvider + ?Sized> ValueProvider for &P {
    fn values(&self, list: &str) -> Option<Vec<ListValue>> {
        (**self).values(list)
    }
}

impl ValueProvider for HashMap<String, Vec<ListValue>> {
    fn values(&self, list: &str) -> Option<Vec<ListValue>> {
        self.get(list).cloned()
    }
}

/// A provider that supplies nothing, for grammars without dynamic lists.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoValues;

impl ValueProvider for NoValues {
    fn values(&self, _list: &str) -> Option<Vec<ListValue>> {
        None
    }
}

/// A named device or service known to the home.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryEntity {
    /// Names the entity can be called by.
    pub names: Vec<String>,
    /// Domain of the entity (`light`, `cover`, ...).
    pub domain: String,
}

/// A snapshot of the home's entities, areas and floors.
///
/// Supplies the `name`, `area` and `floor` lists. Every name binds itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    /// Known entities.
    pub entities: Vec<RegistryEntity>,
    /// Names of each area.
    pub areas: Vec<Vec<String>>,
    /// Names of each floor.
    pub floors: Vec<Vec<String>>,
}

impl Registry {
    /// List supplied with entity names.
    pub const NAME_LIST: &'static str = "name";
    /// List supplied with area names.
    pub const AREA_LIST: &'static str = "area";
    /// List supplied with floor names.
    pub const FLOOR_LIST: &'static str = "floor";

    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add an entity.
    #[must_use]
    pub fn with_entity<S: Into<String>>(
        mut self,
        domain: impl Into<String>,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.entities.push(RegistryEntity {
            names: names.into_iter().map(Into::into).collect(),
            domain: domain.into(),
        });
        self
    }

    /// Builder method to add an area.
    #[must_use]
    pub fn with_area<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.areas.push(names.into_iter().map(Into::into).collect());
        self
    }

    /// Builder method to add a floor.
    #[must_use]
    pub fn with_floor<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.floors.push(names.into_iter().map(Into::into).collect());
        self
    }

    fn name_values<'a>(names: impl Iterator<Item = &'a String>) -> Vec<ListValue> {
        names
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(ListValue::literal)
            .collect()
    }
}

impl ValueProvider for Registry {
    fn values(&self, list: &str) -> Option<Vec<ListValue>> {
        match list {
            Self::NAME_LIST => Some(Self::name_values(
                self.entities.iter().flat_map(|e| e.names.iter()),
            )),
            Self::AREA_LIST => Some(Self::name_values(self.areas.iter().flatten())),
            Self::FLOOR_LIST => Some(Self::name_values(self.floors.iter().flatten())),
            _ => None,
        }
    }
}
