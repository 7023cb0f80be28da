//! Lexer for the template grammar.
//!
//! The lexer converts template text into a stream of tokens. Whitespace is
//! content here: runs of it inside literal text collapse to a single space,
//! and `\` makes the following character literal.

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Lexer for template text.
pub struct Lexer<'src> {
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            rest: source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        let start = self.position;
        let start_line = self.line;
        let start_column = self.column;

        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some('(') => self.single(TokenKind::LParen),
            Some(')') => self.single(TokenKind::RParen),
            Some('[') => self.single(TokenKind::LBracket),
            Some(']') => self.single(TokenKind::RBracket),
            Some('|') => self.single(TokenKind::Pipe),
            Some('{') => self.scan_slot(),
            Some('}') => {
                self.advance();
                TokenKind::Error("unexpected '}' outside a slot reference".into())
            }
            Some(_) => self.scan_text(),
        };

        Token::new(
            kind,
            Span::new(start, self.position, start_line, start_column),
        )
    }

    /// Tokenizes all source and returns a vector of tokens ending in `Eof`.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Consumes one character and yields `kind`.
    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// Scans literal text up to the next metacharacter.
    fn scan_text(&mut self) -> TokenKind {
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            match c {
                '(' | ')' | '[' | ']' | '|' | '{' | '}' => break,
                '\\' => {
                    self.advance();
                    match self.peek_char() {
                        Some(escaped) => {
                            self.advance();
                            text.push(escaped);
                        }
                        None => {
                            return TokenKind::Error("dangling '\\' at end of template".into());
                        }
                    }
                }
                c if c.is_whitespace() => {
                    self.advance();
                    if !text.ends_with(' ') {
                        text.push(' ');
                    }
                }
                c => {
                    self.advance();
                    text.push(c);
                }
            }
        }
        TokenKind::Text(text)
    }

    /// Scans a slot reference starting with `{`.
    fn scan_slot(&mut self) -> TokenKind {
        self.advance(); // consume '{'
        let mut body = String::new();
        loop {
            match self.peek_char() {
                Some('}') => {
                    self.advance();
                    break;
                }
                Some('{') => {
                    return TokenKind::Error("nested '{' in slot reference".into());
                }
                Some(c) => {
                    self.advance();
                    body.push(c);
                }
                None => {
                    return TokenKind::Error("unterminated slot reference".into());
                }
            }
        }

        let (list, slot) = match body.split_once(':') {
            Some((list, slot)) => (list.trim(), Some(slot.trim())),
            None => (body.trim(), None),
        };
        if list.is_empty() {
            return TokenKind::Error("empty slot reference".into());
        }
        if slot.is_some_and(str::is_empty) {
            return TokenKind::Error(format!("empty slot name for list '{list}'"));
        }
        TokenKind::Slot {
            list: list.to_string(),
            slot: slot.map(str::to_string),
        }
    }
}
