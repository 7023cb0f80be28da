//! Lists derived from other lists by transformation.

/// A list derived by applying rule-sets to a source list, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformedList {
    /// List identifier.
    pub name: String,
    /// Identifier of the source list (a base list or another transformed list).
    pub source: String,
    /// Rule-set identifiers applied in sequence.
    pub transformations: Vec<String>,
}

impl TransformedList {
    /// Creates a transformed list.
    #[must_use]
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        source: impl Into<String>,
        transformations: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            transformations: transformations.into_iter().map(Into::into).collect(),
        }
    }
}

/// A transformed list flattened down to its base list.
///
/// `le_name ← de(name)` and `al_le_name ← a(le_name)` flatten to
/// `root = name, stages = [de, a]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Derivation {
    /// The base list all values come from.
    pub root: String,
    /// Every rule-set from the root outwards.
    pub stages: Vec<String>,
}
