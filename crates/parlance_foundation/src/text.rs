//! Text normalization.
//!
//! Both sides of a comparison (user input and expanded template phrases) go
//! through the same [`Normalizer`]:
//!
//! 1. case folding, one character at a time, per [`WordCasing`]
//! 2. whitespace runs collapsed to a single space, ends trimmed
//! 3. trailing punctuation (and any whitespace mixed into it) stripped
//!
//! [`Cursor`] performs the same normalization incrementally over a stream of
//! fragments and compares it against an already normalized target, so a
//! phrase can be rejected as soon as its normalized prefix diverges.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Casing applied to text before comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WordCasing {
    /// Compare text exactly as written.
    Keep,
    /// Fold everything to lowercase.
    #[default]
    Lower,
    /// Fold everything to uppercase.
    Upper,
}

/// Default characters stripped from the end of an utterance.
pub const DEFAULT_TERMINAL_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '…', '\u{037E}', '。', '？', '！', '،', '؟',
];

/// Configuration for text normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Case folding applied before comparison.
    pub casing: WordCasing,
    /// Characters removed from the end of the text.
    pub terminal_punctuation: Vec<char>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            casing: WordCasing::Lower,
            terminal_punctuation: DEFAULT_TERMINAL_PUNCTUATION.to_vec(),
        }
    }
}

impl NormalizerConfig {
    /// Creates a configuration that compares text case-sensitively.
    #[must_use]
    pub fn case_sensitive() -> Self {
        Self {
            casing: WordCasing::Keep,
            ..Self::default()
        }
    }

    /// Builder method to set the casing.
    #[must_use]
    pub fn with_casing(mut self, casing: WordCasing) -> Self {
        self.casing = casing;
        self
    }

    /// Builder method to replace the terminal punctuation set.
    #[must_use]
    pub fn with_terminal_punctuation(mut self, punctuation: impl IntoIterator<Item = char>) -> Self {
        self.terminal_punctuation = punctuation.into_iter().collect();
        self
    }
}

/// Normalizes text for whole-string comparison.
#[derive(Clone, Debug, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    /// Creates a normalizer from a configuration.
    #[must_use]
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Returns true if `c` is stripped when it ends an utterance.
    #[must_use]
    pub fn is_terminal_punctuation(&self, c: char) -> bool {
        self.config.terminal_punctuation.contains(&c)
    }

    /// Applies case folding one character at a time.
    ///
    /// Per-character folding (rather than `str::to_lowercase`) keeps the result
    /// independent of how the text is split into fragments.
    #[must_use]
    pub fn fold_case(&self, text: &str) -> String {
        match self.config.casing {
            WordCasing::Keep => text.to_string(),
            WordCasing::Lower => text.chars().flat_map(char::to_lowercase).collect(),
            WordCasing::Upper => text.chars().flat_map(char::to_uppercase).collect(),
        }
    }

    /// Normalizes text: folds case, collapses whitespace, strips trailing
    /// punctuation.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let folded = self.fold_case(text);
        let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");
        collapsed
            .trim_end_matches(|c: char| self.is_terminal_punctuation(c) || c.is_whitespace())
            .to_string()
    }

    /// Starts an incremental comparison against `target`, which must already
    /// be normalized by this normalizer.
    #[must_use]
    pub fn cursor<'t>(&'t self, target: &'t str) -> Cursor<'t> {
        Cursor {
            normalizer: self,
            target,
            position: 0,
            emitted: false,
            pending: String::new(),
        }
    }
}

/// Incremental normalized comparison.
///
/// Feeding fragments `a`, `b`, ... and then checking [`Cursor::is_complete`]
/// is equivalent to `normalize(a + b + ...) == target`. Cloning a cursor is
/// how callers backtrack.
#[derive(Clone, Debug)]
pub struct Cursor<'t> {
    normalizer: &'t Normalizer,
    target: &'t str,
    /// Byte offset of the next unmatched target character.
    position: usize,
    /// Whether any non-punctuation, non-whitespace character was emitted.
    emitted: bool,
    /// Whitespace and punctuation held back until it is known not to be
    /// trailing.
    pending: String,
}

impl Cursor<'_> {
    /// Feeds a fragment of raw text.
    ///
    /// Returns false as soon as the normalized text diverges from the target.
    /// A cursor that returned false must be discarded.
    pub fn feed(&mut self, fragment: &str) -> bool {
        for raw in fragment.chars() {
            let accepted = match self.normalizer.config.casing {
                WordCasing::Keep => self.push(raw),
                WordCasing::Lower => raw.to_lowercase().all(|c| self.push(c)),
                WordCasing::Upper => raw.to_uppercase().all(|c| self.push(c)),
            };
            if !accepted {
                return false;
            }
        }
        true
    }

    /// Returns true if everything fed so far normalizes to exactly the target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.position == self.target.len()
    }

    fn push(&mut self, c: char) -> bool {
        if c.is_whitespace() {
            let leading = self.pending.is_empty() && !self.emitted;
            if !leading && !self.pending.ends_with(' ') {
                self.pending.push(' ');
            }
            return true;
        }

        if self.normalizer.is_terminal_punctuation(c) {
            self.pending.push(c);
            return true;
        }

        let rest = &self.target[self.position..];
        let Some(after) = rest.strip_prefix(self.pending.as_str()) else {
            return false;
        };
        if !after.starts_with(c) {
            return false;
        }

        self.position += self.pending.len() + c.len_utf8();
        self.pending.clear();
        self.emitted = true;
        true
    }
}
