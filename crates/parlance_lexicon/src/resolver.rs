//! Resolution of list references to concrete values.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use tracing::trace;

use parlance_foundation::{Error, Result};

use crate::lexicon::Lexicon;
use crate::list::ListValue;
use crate::provider::ValueProvider;
use crate::transform::ResolvedValue;

/// A list reference resolved to values.
///
/// Cheap to clone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedList {
    /// Slot name a reference to this list binds by default.
    pub slot: Arc<str>,
    /// Values in list order.
    pub values: Arc<[ResolvedValue]>,
}

impl ResolvedList {
    /// Creates a resolved list.
    #[must_use]
    pub fn new(slot: impl Into<Arc<str>>, values: impl Into<Arc<[ResolvedValue]>>) -> Self {
        Self {
            slot: slot.into(),
            values: values.into(),
        }
    }

    /// Returns the total number of surface strings across all values.
    #[must_use]
    pub fn surface_count(&self) -> usize {
        self.values.iter().map(|v| v.surfaces.len()).sum()
    }
}

/// Resolves list names to values.
pub trait ListResolver {
    /// Resolves `list`.
    ///
    /// # Errors
    /// Returns [`ErrorKind::UnresolvedList`](parlance_foundation::ErrorKind::UnresolvedList)
    /// if the list cannot be supplied.
    fn resolve(&self, list: &str) -> Result<ResolvedList>;
}

impl<R: ListResolver + ?Sized> ListResolver for &R {
    fn resolve(&self, list: &str) -> Result<ResolvedList> {
        (**self).resolve(list)
    }
}

/// Resolves lists against a lexicon and a provider snapshot.
///
/// Scoped to a single recognition call: each dynamic root list is fetched
/// from the provider at most once per resolver, however many transformed
/// lists derive from it, and discarded with the resolver.
pub struct LexiconResolver<'a> {
    lexicon: &'a Lexicon,
    provider: &'a dyn ValueProvider,
    memo: RefCell<HashMap<String, ResolvedList>>,
    /// Provider answers by root list
    snapshots: RefCell<HashMap<String, Rc<[ListValue]>>>,
}

impl<'a> LexiconResolver<'a> {
    /// Creates a resolver for one recognition call.
    #[must_use]
    pub fn new(lexicon: &'a Lexicon, provider: &'a dyn ValueProvider) -> Self {
        Self {
            lexicon,
            provider,
            memo: RefCell::new(HashMap::new()),
            snapshots: RefCell::new(HashMap::new()),
        }
    }

    fn snapshot(&self, root: &str) -> Result<Rc<[ListValue]>> {
        if let Some(hit) = self.snapshots.borrow().get(root) {
            return Ok(Rc::clone(hit));
        }
        let values: Rc<[ListValue]> = self
            .provider
            .values(root)
            .ok_or_else(|| Error::unresolved_list(root))?
            .into();
        trace!(root, values = values.len(), "fetched dynamic list");
        self.snapshots
            .borrow_mut()
            .insert(root.to_string(), Rc::clone(&values));
        Ok(values)
    }

    fn resolve_uncached(&self, list: &str) -> Result<ResolvedList> {
        let derivation = self
            .lexicon
            .derivation(list)
            .ok_or_else(|| Error::unresolved_list(list))?;

        let values = if let Some(cached) = self.lexicon.cached(list) {
            cached
        } else {
            let snapshot = self.snapshot(&derivation.root)?;
            trace!(list, root = %derivation.root, "resolved dynamic list");
            Arc::from(self.lexicon.derive(list, &snapshot)?)
        };

        Ok(ResolvedList::new(derivation.root.as_str(), values))
    }
}

impl ListResolver for LexiconResolver<'_> {
    fn resolve(&self, list: &str) -> Result<ResolvedList> {
        if let Some(hit) = self.memo.borrow().get(list) {
            return Ok(hit.clone());
        }
        let resolved = self.resolve_uncached(list)?;
        self.memo
            .borrow_mut()
            .insert(list.to_string(), resolved.clone());
        Ok(resolved)
    }
}
