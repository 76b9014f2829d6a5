// tests/lexer_tests.rs

use rpal_ast::ast::{Token, TokenKind};
use rpal_ast::lexer::{LexError, Lexer};

fn tokens(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::from_text(input);
    let mut result = vec![];
    loop {
        let token = lexer.next_token().unwrap();
        if token.is_eof() {
            return result;
        }
        result.push(token);
    }
}

fn tok(kind: TokenKind, text: &str) -> Token {
    Token::new(kind, text)
}

// ============================================================================
// Identifiers and Integers
// ============================================================================

#[test]
fn test_identifiers() {
    let test_cases = vec!["x", "Sum", "a_b", "x1_2y", "ABC"];

    for input in test_cases {
        assert_eq!(
            tokens(input),
            vec![tok(TokenKind::Identifier, input)],
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_integer_then_identifier() {
    assert_eq!(
        tokens("12ab"),
        vec![tok(TokenKind::Integer, "12"), tok(TokenKind::Identifier, "ab")]
    );
}

#[test]
fn test_leading_underscore_is_operator() {
    assert_eq!(
        tokens("_x"),
        vec![tok(TokenKind::Operator, "_"), tok(TokenKind::Identifier, "x")]
    );
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_maximal_munch() {
    let test_cases = vec!["->", "**", ">=", "<=", "+", "|", ".", "@", "~=", "\"", "+//"];

    for input in test_cases {
        assert_eq!(
            tokens(input),
            vec![tok(TokenKind::Operator, input)],
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_operator_between_identifiers() {
    assert_eq!(
        tokens("x->y"),
        vec![
            tok(TokenKind::Identifier, "x"),
            tok(TokenKind::Operator, "->"),
            tok(TokenKind::Identifier, "y"),
        ]
    );
}

#[test]
fn test_single_slash_is_division() {
    assert_eq!(
        tokens("a/b"),
        vec![
            tok(TokenKind::Identifier, "a"),
            tok(TokenKind::Operator, "/"),
            tok(TokenKind::Identifier, "b"),
        ]
    );
    assert_eq!(tokens("/"), vec![tok(TokenKind::Operator, "/")]);
}

// ============================================================================
// Punctuation
// ============================================================================

#[test]
fn test_punctuation_never_munches() {
    assert_eq!(
        tokens("((;,"),
        vec![
            tok(TokenKind::Punctuation, "("),
            tok(TokenKind::Punctuation, "("),
            tok(TokenKind::Punctuation, ";"),
            tok(TokenKind::Punctuation, ","),
        ]
    );
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_keeps_quotes() {
    assert_eq!(tokens("'hello world'"), vec![tok(TokenKind::StringLiteral, "'hello world'")]);
    assert_eq!(tokens("''"), vec![tok(TokenKind::StringLiteral, "''")]);
}

#[test]
fn test_escaped_quote() {
    assert_eq!(
        tokens(r"'a\'b' x"),
        vec![
            tok(TokenKind::StringLiteral, r"'a\'b'"),
            tok(TokenKind::Identifier, "x"),
        ]
    );
}

#[test]
fn test_escaped_backslash_before_closing_quote() {
    assert_eq!(
        tokens(r"'a\\' b"),
        vec![
            tok(TokenKind::StringLiteral, r"'a\\'"),
            tok(TokenKind::Identifier, "b"),
        ]
    );
}

#[test]
fn test_reserved_word_inside_string_is_string() {
    assert_eq!(tokens("'let'"), vec![tok(TokenKind::StringLiteral, "'let'")]);
}

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::from_text("x\n'abc");
    assert_eq!(lexer.next_token().unwrap(), tok(TokenKind::Identifier, "x"));
    assert!(matches!(
        lexer.next_token(),
        Err(LexError::UnterminatedString { line: 2 })
    ));
}

#[test]
fn test_unterminated_after_backslash() {
    let mut lexer = Lexer::from_text(r"'abc\");
    assert!(matches!(
        lexer.next_token(),
        Err(LexError::UnterminatedString { line: 1 })
    ));
}

// ============================================================================
// Whitespace, Comments and Lines
// ============================================================================

#[test]
fn test_whitespace_and_blank_lines() {
    assert_eq!(
        tokens("  x\t\n\n   y  \n"),
        vec![tok(TokenKind::Identifier, "x"), tok(TokenKind::Identifier, "y")]
    );
}

#[test]
fn test_comments() {
    let source = "// header\nlet x = 1 // trailing\n// only a comment\nin x";
    let texts: Vec<String> = tokens(source).into_iter().map(|t| t.text).collect();
    assert_eq!(texts, ["let", "x", "=", "1", "in", "x"]);
}

#[test]
fn test_comment_at_end_of_input() {
    assert_eq!(tokens("x //"), vec![tok(TokenKind::Identifier, "x")]);
}

#[test]
fn test_empty_input() {
    let mut lexer = Lexer::from_text("");
    assert!(lexer.next_token().unwrap().is_eof());
    assert!(lexer.next_token().unwrap().is_eof());
}

#[test]
fn test_line_numbers() {
    let mut lexer = Lexer::from_text("a\n\n  b");
    lexer.next_token().unwrap();
    assert_eq!(lexer.line(), 1);
    lexer.next_token().unwrap();
    assert_eq!(lexer.line(), 3);
}

#[test]
fn test_never_returns_discard() {
    let source = "let  f x = x ** 2 // sq\n\tin f 'a' , ( 3 )";
    for token in tokens(source) {
        assert_ne!(token.kind, TokenKind::Discard);
    }
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unexpected_character() {
    let mut lexer = Lexer::from_text("x \\ y");
    assert_eq!(lexer.next_token().unwrap(), tok(TokenKind::Identifier, "x"));
    match lexer.next_token() {
        Err(LexError::UnexpectedCharacter { ch, line }) => {
            assert_eq!(ch, '\\');
            assert_eq!(line, 1);
        }
        other => panic!("Expected UnexpectedCharacter, got {:?}", other),
    }
}

#[test]
fn test_non_ascii_is_rejected() {
    let mut lexer = Lexer::from_text("é");
    assert!(matches!(
        lexer.next_token(),
        Err(LexError::UnexpectedCharacter { ch: 'é', .. })
    ));
}

// ============================================================================
// Token Helpers
// ============================================================================

#[test]
fn test_leaf_labels() {
    assert_eq!(tok(TokenKind::Identifier, "x").leaf_label().as_deref(), Some("<ID:x>"));
    assert_eq!(tok(TokenKind::Integer, "42").leaf_label().as_deref(), Some("<INT:42>"));
    assert_eq!(
        tok(TokenKind::StringLiteral, "'s'").leaf_label().as_deref(),
        Some("<STR:'s'>")
    );
    assert_eq!(tok(TokenKind::Identifier, "where").leaf_label(), None);
    assert_eq!(tok(TokenKind::Operator, "+").leaf_label(), None);
    assert_eq!(tok(TokenKind::Punctuation, "(").leaf_label(), None);
    assert_eq!(Token::eof().describe(), "<EOF>");
}
