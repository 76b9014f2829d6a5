use crate::ast::{OPERATOR_SYMBOLS, PUNCTUATION, Token, TokenKind};
use crate::source::{LineSource, StrSource};
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexError {
    #[error("line {line}: unexpected character '{ch}'")]
    UnexpectedCharacter { ch: char, line: usize },

    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: usize },

    #[error("failed to read source: {0}")]
    Io(#[from] io::Error),
}

/// Character classes. The alphabets are disjoint, so the first character of
/// a token decides its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Letter,
    Digit,
    Symbol,
    Quote,
    Space,
    Punctuation,
    Other,
}

fn classify(ch: char) -> CharClass {
    match ch {
        c if c.is_ascii_alphabetic() => CharClass::Letter,
        c if c.is_ascii_digit() => CharClass::Digit,
        '\'' => CharClass::Quote,
        ' ' | '\t' | '\n' => CharClass::Space,
        c if OPERATOR_SYMBOLS.contains(c) => CharClass::Symbol,
        c if PUNCTUATION.contains(c) => CharClass::Punctuation,
        _ => CharClass::Other,
    }
}

/// On-demand tokenizer over a [`LineSource`].
///
/// Only the unconsumed part of the current line is held; the next line is
/// pulled when the current one runs out.
pub struct Lexer<S> {
    source: S,
    line: Vec<char>,
    position: usize,
    line_number: usize,
}

impl<'a> Lexer<StrSource<'a>> {
    /// Lexer over an in-memory program text.
    pub fn from_text(text: &'a str) -> Self {
        Lexer::new(StrSource::new(text))
    }
}

impl<S: LineSource> Lexer<S> {
    pub fn new(source: S) -> Self {
        Lexer {
            source,
            line: Vec::new(),
            position: 0,
            line_number: 0,
        }
    }

    /// 1-based line of the most recently returned token.
    pub fn line(&self) -> usize {
        self.line_number
    }

    fn current_char(&self) -> Option<char> {
        self.line.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.line.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Pulls the next line into the buffer. Returns false when the source is
    /// exhausted.
    fn refill(&mut self) -> Result<bool, LexError> {
        match self.source.next_line()? {
            Some(text) => {
                self.line = text.chars().collect();
                self.position = 0;
                self.line_number += 1;
                Ok(true)
            }
            None => {
                self.line.clear();
                self.position = 0;
                Ok(false)
            }
        }
    }

    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if accept(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Scans a quoted literal. A backslash copies the character after it
    /// without looking at it; both are kept in the text.
    fn read_string(&mut self) -> Result<String, LexError> {
        let mut result = String::from('\'');
        self.advance(); // Consume opening quote

        loop {
            match self.current_char() {
                Some('\'') => {
                    result.push('\'');
                    self.advance();
                    return Ok(result);
                }
                Some('\\') => {
                    result.push('\\');
                    self.advance();
                    let escaped = self.current_char().ok_or(LexError::UnterminatedString {
                        line: self.line_number,
                    })?;
                    result.push(escaped);
                    self.advance();
                }
                Some(ch) => {
                    result.push(ch);
                    self.advance();
                }
                None => {
                    return Err(LexError::UnterminatedString {
                        line: self.line_number,
                    });
                }
            }
        }
    }

    /// Classifies and consumes one lexeme from the current line. Whitespace
    /// and comments come back as [`TokenKind::Discard`].
    fn scan(&mut self, ch: char) -> Result<Token, LexError> {
        let token = match classify(ch) {
            CharClass::Letter => Token::new(
                TokenKind::Identifier,
                self.read_while(|c| c.is_ascii_alphanumeric() || c == '_'),
            ),
            CharClass::Digit => {
                Token::new(TokenKind::Integer, self.read_while(|c| c.is_ascii_digit()))
            }
            CharClass::Symbol if ch == '/' && self.peek_char(1) == Some('/') => {
                // Comment runs to the end of the line
                self.position = self.line.len();
                Token::new(TokenKind::Discard, "")
            }
            CharClass::Symbol => Token::new(
                TokenKind::Operator,
                self.read_while(|c| OPERATOR_SYMBOLS.contains(c)),
            ),
            CharClass::Quote => Token::new(TokenKind::StringLiteral, self.read_string()?),
            CharClass::Space => {
                self.advance();
                Token::new(TokenKind::Discard, "")
            }
            CharClass::Punctuation => {
                self.advance();
                Token::new(TokenKind::Punctuation, ch.to_string())
            }
            CharClass::Other => {
                return Err(LexError::UnexpectedCharacter {
                    ch,
                    line: self.line_number,
                });
            }
        };
        Ok(token)
    }

    /// Returns the next substantive token, or an end-of-input token once the
    /// source is exhausted. Never returns [`TokenKind::Discard`].
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            let Some(ch) = self.current_char() else {
                if self.refill()? {
                    continue;
                }
                tracing::trace!(line = self.line_number, "end of input");
                return Ok(Token::eof());
            };

            let token = self.scan(ch)?;
            if token.kind != TokenKind::Discard {
                tracing::trace!(kind = %token.kind, text = %token.text, line = self.line_number, "token");
                return Ok(token);
            }
        }
    }
}

#[test]
fn test_keywords_stay_identifiers() {
    let mut lexer = Lexer::from_text("let in rec");
    for word in ["let", "in", "rec"] {
        let token = lexer.next_token().unwrap();
        assert_eq!(token, Token::new(TokenKind::Identifier, word));
        assert!(token.is_keyword());
    }
    assert!(lexer.next_token().unwrap().is_eof());
}

#[test]
fn test_comment_then_next_line() {
    let mut lexer = Lexer::from_text("x // ignored ( 'x\ny");
    assert_eq!(lexer.next_token().unwrap(), Token::new(TokenKind::Identifier, "x"));
    assert_eq!(lexer.next_token().unwrap(), Token::new(TokenKind::Identifier, "y"));
    assert_eq!(lexer.line(), 2);
    assert!(lexer.next_token().unwrap().is_eof());
}
