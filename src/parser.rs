use crate::{
    ast::{Node, Token, TokenKind},
    builder::TreeBuilder,
    lexer::{LexError, Lexer},
    source::LineSource,
};
use std::mem;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: expected '{expected}' but found '{found}'")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: usize,
    },

    #[error("line {line}: expected an operand but found '{found}'")]
    ExpectedOperand { found: String, line: usize },

    #[error("line {line}: expected an identifier but found '{found}'")]
    ExpectedIdentifier { found: String, line: usize },

    #[error("line {line}: expected a definition but found '{found}'")]
    ExpectedDefinition { found: String, line: usize },

    #[error("line {line}: expected end of input but found '{found}'")]
    TrailingInput { found: String, line: usize },

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("internal error: '{label}' needs {arity} subtrees but only {depth} are built")]
    StackUnderflow {
        label: String,
        arity: usize,
        depth: usize,
    },

    #[error("internal error: parse finished with {depth} trees on the construction stack")]
    StackImbalance { depth: usize },
}

/// Comparison operators of `Bp`, keyword and symbol spellings alike, with
/// the label they reduce to.
const COMPARISONS: [(&str, &str); 10] = [
    ("gr", "gr"),
    (">", "gr"),
    ("ge", "ge"),
    (">=", "ge"),
    ("ls", "ls"),
    ("<", "ls"),
    ("le", "le"),
    ("<=", "le"),
    ("eq", "eq"),
    ("ne", "ne"),
];

/// LL(1) recursive-descent parser. Every reduction goes through a
/// [`TreeBuilder`]; nothing is passed between procedures except tokens.
pub struct Parser<S> {
    lexer: Lexer<S>,
    current_token: Token,
    line: usize,
    builder: TreeBuilder,
}

/// Parses a whole program held in memory.
pub fn parse_str(text: &str) -> Result<Node, ParseError> {
    Parser::new(Lexer::from_text(text))?.parse()
}

impl<S: LineSource> Parser<S> {
    pub fn new(mut lexer: Lexer<S>) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        let line = lexer.line();
        Ok(Parser {
            lexer,
            current_token,
            line,
            builder: TreeBuilder::new(),
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        self.line = self.lexer.line();
        Ok(())
    }

    fn found(&self) -> String {
        self.current_token.describe().to_string()
    }

    fn check(&self, text: &str) -> bool {
        self.current_token.kind != TokenKind::EndOfInput && self.current_token.text == text
    }

    /// Consumes the current token whatever it is. Value-carrying terminals
    /// become tagged leaves on the way.
    fn consume(&mut self) -> Result<(), ParseError> {
        let token = mem::replace(&mut self.current_token, Token::eof());
        if let Some(label) = token.leaf_label() {
            self.builder.leaf(label);
        }
        self.advance()
    }

    fn expect(&mut self, expected: &str) -> Result<(), ParseError> {
        if !self.check(expected) {
            return Err(ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: self.found(),
                line: self.line,
            });
        }
        self.consume()
    }

    fn expect_identifier(&mut self) -> Result<(), ParseError> {
        if !self.current_token.is_name() {
            return Err(ParseError::ExpectedIdentifier {
                found: self.found(),
                line: self.line,
            });
        }
        self.consume()
    }

    /// True when the current token can start an `Rn`.
    fn at_operand(&self) -> bool {
        self.current_token.leaf_label().is_some() || self.check("(")
    }

    fn at_var_binding(&self) -> bool {
        self.current_token.is_name() || self.check("(")
    }

    /// Parses a complete program. The lookahead must be at end of input
    /// afterwards and the construction stack must hold exactly one tree.
    pub fn parse(mut self) -> Result<Node, ParseError> {
        self.parse_expression()?;
        if !self.current_token.is_eof() {
            return Err(ParseError::TrailingInput {
                found: self.found(),
                line: self.line,
            });
        }
        self.builder.finish()
    }

    /// ```text
    /// E -> 'let' D 'in' E     => 'let'
    ///   -> 'fn' Vb+ '.' E     => 'lambda'
    ///   -> Ew
    /// ```
    fn parse_expression(&mut self) -> Result<(), ParseError> {
        if self.check("let") {
            self.expect("let")?;
            self.parse_definition()?;
            self.expect("in")?;
            self.parse_expression()?;
            self.builder.reduce("let", 2)
        } else if self.check("fn") {
            self.expect("fn")?;
            let mut count = 0;
            loop {
                self.parse_var_binding()?;
                count += 1;
                if !self.at_var_binding() {
                    break;
                }
            }
            self.expect(".")?;
            self.parse_expression()?;
            self.builder.reduce("lambda", count + 1)
        } else {
            self.parse_where()
        }
    }

    /// ```text
    /// Ew -> T 'where' Dr      => 'where'
    ///    -> T
    /// ```
    fn parse_where(&mut self) -> Result<(), ParseError> {
        self.parse_tuple()?;
        if self.check("where") {
            self.expect("where")?;
            self.parse_recursive()?;
            self.builder.reduce("where", 2)?;
        }
        Ok(())
    }

    /// ```text
    /// T -> Ta ( ',' Ta )+     => 'tau'
    ///   -> Ta
    /// ```
    fn parse_tuple(&mut self) -> Result<(), ParseError> {
        self.parse_aug()?;
        let mut count = 1;
        while self.check(",") {
            self.expect(",")?;
            self.parse_aug()?;
            count += 1;
        }
        if count > 1 {
            self.builder.reduce("tau", count)?;
        }
        Ok(())
    }

    /// ```text
    /// Ta -> Ta 'aug' Tc       => 'aug'
    ///    -> Tc
    /// ```
    fn parse_aug(&mut self) -> Result<(), ParseError> {
        self.parse_conditional()?;
        while self.check("aug") {
            self.expect("aug")?;
            self.parse_conditional()?;
            self.builder.reduce("aug", 2)?;
        }
        Ok(())
    }

    /// ```text
    /// Tc -> B '->' Tc '|' Tc  => '->'
    ///    -> B
    /// ```
    fn parse_conditional(&mut self) -> Result<(), ParseError> {
        self.parse_or()?;
        if self.check("->") {
            self.expect("->")?;
            self.parse_conditional()?;
            self.expect("|")?;
            self.parse_conditional()?;
            self.builder.reduce("->", 3)?;
        }
        Ok(())
    }

    /// ```text
    /// B -> B 'or' Bt          => 'or'
    ///   -> Bt
    /// ```
    fn parse_or(&mut self) -> Result<(), ParseError> {
        self.parse_and()?;
        while self.check("or") {
            self.expect("or")?;
            self.parse_and()?;
            self.builder.reduce("or", 2)?;
        }
        Ok(())
    }

    /// ```text
    /// Bt -> Bt '&' Bs         => '&'
    ///    -> Bs
    /// ```
    fn parse_and(&mut self) -> Result<(), ParseError> {
        self.parse_not()?;
        while self.check("&") {
            self.expect("&")?;
            self.parse_not()?;
            self.builder.reduce("&", 2)?;
        }
        Ok(())
    }

    /// ```text
    /// Bs -> 'not' Bp          => 'not'
    ///    -> Bp
    /// ```
    fn parse_not(&mut self) -> Result<(), ParseError> {
        if self.check("not") {
            self.expect("not")?;
            self.parse_comparison()?;
            self.builder.reduce("not", 1)
        } else {
            self.parse_comparison()
        }
    }

    /// ```text
    /// Bp -> A ( 'gr' | '>' ) A    => 'gr'
    ///    -> A ( 'ge' | '>=' ) A   => 'ge'
    ///    -> A ( 'ls' | '<' ) A    => 'ls'
    ///    -> A ( 'le' | '<=' ) A   => 'le'
    ///    -> A 'eq' A              => 'eq'
    ///    -> A 'ne' A              => 'ne'
    ///    -> A
    /// ```
    fn parse_comparison(&mut self) -> Result<(), ParseError> {
        self.parse_additive()?;

        if let Some((_, label)) = COMPARISONS
            .iter()
            .copied()
            .find(|(spelling, _)| self.check(spelling))
        {
            self.consume()?;
            self.parse_additive()?;
            self.builder.reduce(label, 2)?;
        }
        Ok(())
    }

    /// ```text
    /// A -> A '+' At           => '+'
    ///   -> A '-' At           => '-'
    ///   -> '+' At
    ///   -> '-' At             => 'neg'
    ///   -> At
    /// ```
    fn parse_additive(&mut self) -> Result<(), ParseError> {
        if self.check("+") {
            self.expect("+")?;
            self.parse_multiplicative()?;
        } else if self.check("-") {
            self.expect("-")?;
            self.parse_multiplicative()?;
            self.builder.reduce("neg", 1)?;
        } else {
            self.parse_multiplicative()?;
        }

        loop {
            let op = match self.current_token.text.as_str() {
                "+" => "+",
                "-" => "-",
                _ => break,
            };

            self.consume()?;
            self.parse_multiplicative()?;
            self.builder.reduce(op, 2)?;
        }
        Ok(())
    }

    /// ```text
    /// At -> At '*' Af         => '*'
    ///    -> At '/' Af         => '/'
    ///    -> Af
    /// ```
    fn parse_multiplicative(&mut self) -> Result<(), ParseError> {
        self.parse_power()?;

        loop {
            let op = match self.current_token.text.as_str() {
                "*" => "*",
                "/" => "/",
                _ => break,
            };

            self.consume()?;
            self.parse_power()?;
            self.builder.reduce(op, 2)?;
        }
        Ok(())
    }

    /// ```text
    /// Af -> Ap '**' Af        => '**'
    ///    -> Ap
    /// ```
    fn parse_power(&mut self) -> Result<(), ParseError> {
        self.parse_infix()?;
        if self.check("**") {
            self.expect("**")?;
            self.parse_power()?; // Right-associative
            self.builder.reduce("**", 2)?;
        }
        Ok(())
    }

    /// ```text
    /// Ap -> Ap '@' <identifier> R     => '@'
    ///    -> R
    /// ```
    fn parse_infix(&mut self) -> Result<(), ParseError> {
        self.parse_application()?;
        while self.check("@") {
            self.expect("@")?;
            self.expect_identifier()?;
            self.parse_application()?;
            self.builder.reduce("@", 3)?;
        }
        Ok(())
    }

    /// ```text
    /// R -> R Rn               => 'gamma'
    ///   -> Rn
    /// ```
    fn parse_application(&mut self) -> Result<(), ParseError> {
        self.parse_operand()?;
        while self.at_operand() {
            self.parse_operand()?;
            self.builder.reduce("gamma", 2)?;
        }
        Ok(())
    }

    /// ```text
    /// Rn -> <identifier> | <integer> | <string>
    ///    -> '(' E ')'
    /// ```
    fn parse_operand(&mut self) -> Result<(), ParseError> {
        if self.current_token.leaf_label().is_some() {
            self.consume()
        } else if self.check("(") {
            self.expect("(")?;
            self.parse_expression()?;
            self.expect(")")
        } else {
            Err(ParseError::ExpectedOperand {
                found: self.found(),
                line: self.line,
            })
        }
    }

    /// ```text
    /// D -> Da 'within' D      => 'within'
    ///   -> Da
    /// ```
    fn parse_definition(&mut self) -> Result<(), ParseError> {
        self.parse_simultaneous()?;
        if self.check("within") {
            self.expect("within")?;
            self.parse_definition()?;
            self.builder.reduce("within", 2)?;
        }
        Ok(())
    }

    /// ```text
    /// Da -> Dr ( 'and' Dr )+  => 'and'
    ///    -> Dr
    /// ```
    fn parse_simultaneous(&mut self) -> Result<(), ParseError> {
        self.parse_recursive()?;
        let mut count = 1;
        while self.check("and") {
            self.expect("and")?;
            self.parse_recursive()?;
            count += 1;
        }
        if count > 1 {
            self.builder.reduce("and", count)?;
        }
        Ok(())
    }

    /// ```text
    /// Dr -> 'rec' Db          => 'rec'
    ///    -> Db
    /// ```
    fn parse_recursive(&mut self) -> Result<(), ParseError> {
        if self.check("rec") {
            self.expect("rec")?;
            self.parse_binding()?;
            self.builder.reduce("rec", 1)
        } else {
            self.parse_binding()
        }
    }

    /// ```text
    /// Db -> Vl '=' E                  => '='
    ///    -> <identifier> Vb+ '=' E    => 'function_form'
    ///    -> '(' D ')'
    /// ```
    fn parse_binding(&mut self) -> Result<(), ParseError> {
        if self.current_token.is_name() {
            let names = self.parse_var_list()?;
            if names > 1 || self.check("=") {
                self.expect("=")?;
                self.parse_expression()?;
                return self.builder.reduce("=", 2);
            }

            let mut count = 0;
            while self.at_var_binding() {
                self.parse_var_binding()?;
                count += 1;
            }
            // With no parameters this reports the missing '='
            self.expect("=")?;
            self.parse_expression()?;
            self.builder.reduce("function_form", count + 2)
        } else if self.check("(") {
            self.expect("(")?;
            self.parse_definition()?;
            self.expect(")")
        } else {
            Err(ParseError::ExpectedDefinition {
                found: self.found(),
                line: self.line,
            })
        }
    }

    /// ```text
    /// Vb -> <identifier>
    ///    -> '(' Vl ')'
    ///    -> '(' ')'           => '()'
    /// ```
    fn parse_var_binding(&mut self) -> Result<(), ParseError> {
        if self.check("(") {
            self.expect("(")?;
            if self.check(")") {
                self.expect(")")?;
                self.builder.reduce("()", 0)
            } else {
                self.parse_var_list()?;
                self.expect(")")
            }
        } else {
            self.expect_identifier()
        }
    }

    /// ```text
    /// Vl -> <identifier> ( ',' <identifier> )+    => ','
    ///    -> <identifier>
    /// ```
    ///
    /// Returns how many names were read.
    fn parse_var_list(&mut self) -> Result<usize, ParseError> {
        self.expect_identifier()?;
        let mut count = 1;
        while self.check(",") {
            self.expect(",")?;
            self.expect_identifier()?;
            count += 1;
        }
        if count > 1 {
            self.builder.reduce(",", count)?;
        }
        Ok(count)
    }
}
