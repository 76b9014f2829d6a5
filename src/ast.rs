//! # RPAL Abstract Syntax Tree
//!
//! Data model shared by the lexer, the tree builder and the parser.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens, their kinds, and the fixed reserved-word
//!   and operator-alphabet tables
//! - **[node]** - AST nodes in first-child/next-sibling form
//!
//! ## Quick Start
//!
//! ```text
//! let x = 1 in x
//! ```
//!
//! parses into
//!
//! ```text
//! let
//! .=
//! ..<ID:x>
//! ..<INT:1>
//! .<ID:x>
//! ```
//!
//! ## Labels
//!
//! Interior nodes are labelled with the construct they stand for (`let`,
//! `lambda`, `gamma`, `tau`, `function_form`, operators such as `+` or `->`).
//! Leaves carry the terminal they were built from, tagged with its class:
//!
//! - `<ID:name>` for identifiers that are not reserved words
//! - `<INT:42>` for integers
//! - `<STR:'text'>` for string literals, quotes included
//!
//! Reserved words never become leaves.
pub mod node;
pub mod tokens;

pub use node::{Children, Node};
pub use tokens::{OPERATOR_SYMBOLS, PUNCTUATION, RESERVED_WORDS, Token, TokenKind, is_reserved};
