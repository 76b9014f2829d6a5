use std::fmt;

/// Words of the surface syntax that are never treated as identifier values.
pub const RESERVED_WORDS: [&str; 16] = [
    "let", "in", "fn", "where", "aug", "or", "not", "gr", "ge", "ls", "le", "eq", "ne", "within",
    "and", "rec",
];

/// Characters that make up operator tokens. A run of these is munched into a
/// single operator.
pub const OPERATOR_SYMBOLS: &str = "+-*<>&.@/:=~|$!#%^_[]{}\"`?";

/// Single-character punctuation. These never combine with neighbours.
pub const PUNCTUATION: &str = "();,";

/// Returns true if `word` belongs to [`RESERVED_WORDS`].
pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Letter followed by letters, digits or underscores
    ///
    /// # Examples
    /// ```text
    /// x
    /// Sum_2
    /// let
    /// ```
    Identifier,

    /// Run of decimal digits
    Integer,

    /// Single-quoted literal, quotes and escapes kept verbatim
    ///
    /// # Examples
    /// ```text
    /// 'hello'
    /// 'it\'s'
    /// ```
    StringLiteral,

    /// Maximal run of [`OPERATOR_SYMBOLS`]
    ///
    /// # Examples
    /// ```text
    /// ->
    /// **
    /// >=
    /// ```
    Operator,

    /// One of `( ) ; ,`
    Punctuation,

    /// Whitespace or a comment. Consumed inside the lexer and never handed
    /// to a caller of [`crate::Lexer::next_token`].
    Discard,

    /// No input left
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "<IDENTIFIER>",
            TokenKind::Integer => "<INTEGER>",
            TokenKind::StringLiteral => "<STRING>",
            TokenKind::Operator => "<OPERATOR>",
            TokenKind::Punctuation => "<PUNCTUATION>",
            TokenKind::Discard => "<DELETE>",
            TokenKind::EndOfInput => "<EOF>",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    pub fn eof() -> Self {
        Token::new(TokenKind::EndOfInput, "")
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }

    /// True for identifiers whose text is a reserved word.
    pub fn is_keyword(&self) -> bool {
        self.kind == TokenKind::Identifier && is_reserved(&self.text)
    }

    /// True for non-reserved identifiers.
    pub fn is_name(&self) -> bool {
        self.kind == TokenKind::Identifier && !is_reserved(&self.text)
    }

    /// Tagged leaf label for terminals that carry a value, `None` for
    /// keywords, operators and punctuation.
    pub fn leaf_label(&self) -> Option<String> {
        match self.kind {
            TokenKind::Identifier if !is_reserved(&self.text) => Some(format!("<ID:{}>", self.text)),
            TokenKind::Integer => Some(format!("<INT:{}>", self.text)),
            TokenKind::StringLiteral => Some(format!("<STR:{}>", self.text)),
            _ => None,
        }
    }

    /// Text used when the token shows up in a diagnostic.
    pub fn describe(&self) -> &str {
        if self.is_eof() { "<EOF>" } else { &self.text }
    }
}
