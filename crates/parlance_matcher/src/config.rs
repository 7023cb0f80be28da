//! Configuration for the matcher.

use parlance_foundation::{NormalizerConfig, WordCasing};

/// How sentences are tested against the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Expand every template into phrases and compare each one.
    Expansion,
    /// Run all templates as one compiled program, pruning on the first
    /// character that diverges from the input.
    #[default]
    Compiled,
}

/// Configuration for a [`Matcher`](crate::Matcher).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatcherConfig {
    /// Matching backend.
    pub backend: Backend,
    /// Normalization applied to input and phrases alike.
    pub normalizer: NormalizerConfig,
    /// Most phrases the expansion backend may test in one call.
    pub max_phrases: Option<usize>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Compiled,
            normalizer: NormalizerConfig::default(),
            max_phrases: None,
        }
    }
}

impl MatcherConfig {
    /// Creates a configuration using naive expansion, bounded to
    /// `max_phrases` phrases per call.
    #[must_use]
    pub fn expansion(max_phrases: usize) -> Self {
        Self {
            backend: Backend::Expansion,
            max_phrases: Some(max_phrases),
            ..Self::default()
        }
    }

    /// Creates a configuration that keeps case significant.
    #[must_use]
    pub fn case_sensitive() -> Self {
        Self {
            normalizer: NormalizerConfig::case_sensitive(),
            ..Self::default()
        }
    }

    /// Builder method to set the backend.
    #[must_use]
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Builder method to set the casing.
    #[must_use]
    pub fn with_casing(mut self, casing: WordCasing) -> Self {
        self.normalizer.casing = casing;
        self
    }

    /// Builder method to set the normalizer configuration.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: NormalizerConfig) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Builder method to set the phrase limit.
    #[must_use]
    pub fn with_max_phrases(mut self, max_phrases: Option<usize>) -> Self {
        self.max_phrases = max_phrases;
        self
    }
}
