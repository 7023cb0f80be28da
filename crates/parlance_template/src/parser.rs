//! Parser for the template grammar.
//!
//! ```text
//! template     := alternatives EOF
//! alternatives := sequence ('|' sequence)*
//! sequence     := (TEXT | SLOT | '(' alternatives ')' | '[' alternatives ']')*
//! ```
//!
//! A top-level `a|b` is an alternation of the whole template, and `[a|b]` is
//! an optional alternation.

use parlance_foundation::{Error, Result};

use crate::lexer::Lexer;
use crate::span::Span;
use crate::template::{Part, SlotRef, Template};
use crate::token::{Token, TokenKind};

/// Parser for template text.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Source text (for error messages).
    source: &'src str,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            source,
        }
    }

    /// Parses the whole source as one template.
    ///
    /// # Errors
    /// Returns a `MalformedTemplate` error if the source is not a valid template.
    pub fn parse(&mut self) -> Result<Template> {
        let alternatives = self.parse_alternatives()?;
        match self.current.kind {
            TokenKind::Eof => Ok(Template::new(self.source, flatten(alternatives))),
            ref kind => Err(self.error(&format!("unexpected {}", kind.name()))),
        }
    }

    /// Parses `|`-separated sequences.
    fn parse_alternatives(&mut self) -> Result<Vec<Vec<Part>>> {
        let mut alternatives = vec![self.parse_sequence()?];
        while self.current.kind == TokenKind::Pipe {
            self.advance();
            alternatives.push(self.parse_sequence()?);
        }
        Ok(alternatives)
    }

    /// Parses parts until a delimiter that ends the sequence.
    fn parse_sequence(&mut self) -> Result<Vec<Part>> {
        let mut parts = Vec::new();
        loop {
            match &self.current.kind {
                TokenKind::Text(text) => {
                    push_literal(&mut parts, text);
                    self.advance();
                }
                TokenKind::Slot { list, slot } => {
                    parts.push(Part::Slot(SlotRef {
                        list: list.clone(),
                        slot: slot.clone(),
                    }));
                    self.advance();
                }
                TokenKind::LParen => parts.push(self.parse_group()?),
                TokenKind::LBracket => parts.push(self.parse_optional()?),
                TokenKind::Error(message) => {
                    let message = message.clone();
                    return Err(self.error(&message));
                }
                TokenKind::Pipe | TokenKind::RParen | TokenKind::RBracket | TokenKind::Eof => {
                    break;
                }
            }
        }
        Ok(parts)
    }

    /// Parses `( alternatives )`.
    fn parse_group(&mut self) -> Result<Part> {
        let open = self.current.span;
        self.advance(); // consume '('
        let alternatives = self.parse_alternatives()?;
        self.close(&TokenKind::RParen, open, "alternation")?;
        Ok(Part::Alternation(alternatives))
    }

    /// Parses `[ alternatives ]`.
    fn parse_optional(&mut self) -> Result<Part> {
        let open = self.current.span;
        self.advance(); // consume '['
        let alternatives = self.parse_alternatives()?;
        self.close(&TokenKind::RBracket, open, "optional")?;
        Ok(Part::Optional(flatten(alternatives)))
    }

    /// Expects the closing delimiter of a construct opened at `open`.
    fn close(&mut self, expected: &TokenKind, open: Span, construct: &str) -> Result<()> {
        if self.current.kind == *expected {
            self.advance();
            return Ok(());
        }
        if self.current.kind == TokenKind::Eof {
            return Err(self.error_at(open, &format!("unterminated {construct}")));
        }
        Err(self.error(&format!(
            "expected {}, found {}",
            expected.name(),
            self.current.kind.name()
        )))
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Creates a parse error at the current position.
    fn error(&self, message: &str) -> Error {
        self.error_at(self.current.span, message)
    }

    /// Creates a parse error at a specific span.
    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::malformed_template(message, span.line, span.column, self.source)
    }
}

/// A single alternative is just a sequence.
fn flatten(mut alternatives: Vec<Vec<Part>>) -> Vec<Part> {
    if alternatives.len() == 1 {
        alternatives.pop().unwrap_or_default()
    } else {
        vec![Part::Alternation(alternatives)]
    }
}

/// Appends text, merging with a preceding literal.
fn push_literal(parts: &mut Vec<Part>, text: &str) {
    if let Some(Part::Literal(previous)) = parts.last_mut() {
        previous.push_str(text);
    } else {
        parts.push(Part::Literal(text.to_string()));
    }
}

/// Compiles template text.
///
/// # Errors
/// Returns a `MalformedTemplate` error with line and column if the text is not
/// a valid template.
pub fn compile(source: &str) -> Result<Template> {
    Parser::new(source).parse()
}
