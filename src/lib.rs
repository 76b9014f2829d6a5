pub mod ast;
pub mod builder;
pub mod cli;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod source;

pub use ast::{Node, Token, TokenKind};
pub use builder::TreeBuilder;
pub use lexer::{LexError, Lexer};
pub use output::{to_json, to_json_pretty, to_preorder, write_preorder};
pub use parser::{ParseError, Parser, parse_str};
pub use source::{LineSource, ReaderSource, StrSource};
