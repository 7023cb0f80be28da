//! Error types for the Parlance system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Failing to recognize an utterance is *not* an error; recognition returns
//! an outcome value for that. Errors here describe broken grammars and API
//! misuse.

use std::fmt;

use thiserror::Error;

/// The main error type for Parlance operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a configuration error with no underlying cause.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration {
            message: message.into(),
            cause: None,
        })
    }

    /// Creates a configuration error caused by another error.
    #[must_use]
    pub fn configuration_caused_by(message: impl Into<String>, cause: Error) -> Self {
        Self::new(ErrorKind::Configuration {
            message: message.into(),
            cause: Some(Box::new(cause)),
        })
    }

    /// Creates a malformed template error.
    #[must_use]
    pub fn malformed_template(
        message: impl Into<String>,
        line: u32,
        column: u32,
        template: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::MalformedTemplate {
            message: message.into(),
            line,
            column,
            template: template.into(),
        })
    }

    /// Creates an unresolved list error.
    #[must_use]
    pub fn unresolved_list(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedList(name.into()))
    }

    /// Creates a limit exceeded error.
    #[must_use]
    pub fn limit_exceeded(limit: ExpansionLimit) -> Self {
        Self::new(ErrorKind::LimitExceeded(limit))
    }

    /// Returns true if this is a load-time configuration error.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, ErrorKind::Configuration { .. })
    }

    /// Returns true if this is a malformed template error, either directly or
    /// as the cause of a configuration error.
    #[must_use]
    pub fn is_malformed_template(&self) -> bool {
        match &self.kind {
            ErrorKind::MalformedTemplate { .. } => true,
            ErrorKind::Configuration {
                cause: Some(cause), ..
            } => cause.is_malformed_template(),
            _ => false,
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The grammar is malformed or internally inconsistent.
    ///
    /// Raised at load time; the whole grammar for the language is rejected.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the inconsistency.
        message: String,
        /// The error that caused this one, if any.
        #[source]
        cause: Option<Box<Error>>,
    },

    /// A template has unbalanced or mismatched grammar syntax.
    #[error("malformed template at {line}:{column}: {message}")]
    MalformedTemplate {
        /// Description of the syntax problem.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The template source text.
        template: String,
    },

    /// A slot references a list the resolver cannot supply.
    #[error("unresolved list: {0}")]
    UnresolvedList(String),

    /// Expansion limit exceeded (kill switch triggered).
    #[error("limit exceeded: {0}")]
    LimitExceeded(ExpansionLimit),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Expansion limits (kill switches) that can be exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpansionLimit {
    /// Maximum phrases tested during a single recognition call exceeded.
    MaxPhrases {
        /// The configured limit.
        limit: usize,
    },
}

impl fmt::Display for ExpansionLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxPhrases { limit } => write!(f, "max phrases ({limit}) exceeded"),
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Grammar language.
    pub language: Option<String>,
    /// Intent being loaded.
    pub intent: Option<String>,
    /// Template source text.
    pub template: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the grammar language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the intent name.
    #[must_use]
    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    /// Sets the template source.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(language) = &self.language {
            write!(f, "language {language}")?;
            sep = ", ";
        }
        if let Some(intent) = &self.intent {
            write!(f, "{sep}intent {intent}")?;
            sep = ", ";
        }
        if let Some(template) = &self.template {
            write!(f, "{sep}template \"{template}\"")?;
        }
        Ok(())
    }
}
