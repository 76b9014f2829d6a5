//! Build and print the AST of a source file

use super::CliError;
use crate::{LexError, Lexer, Node, ParseError, Parser, ReaderSource, output::write_preorder};
use std::io::Write;
use std::path::Path;

/// Runs the tokenizer, parser and tree builder over the file at `path`.
///
/// A read failure part way through the file (including bytes that are not
/// UTF-8) is reported as [`CliError::SourceUnavailable`], not as a syntax
/// error.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn parse_file(path: &Path) -> Result<Node, CliError> {
    let source = ReaderSource::open(path).map_err(|source| CliError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let ast = Parser::new(Lexer::new(source))
        .and_then(Parser::parse)
        .map_err(|err| match err {
            ParseError::Lex(LexError::Io(source)) => CliError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            },
            other => CliError::Parse(other),
        })?;
    tracing::debug!(nodes = ast.size(), "parsed");
    Ok(ast)
}

/// Parses the file and writes its pre-order listing to `out`. Nothing is
/// written unless the whole program parses.
pub fn execute_ast<W: Write>(path: &Path, out: &mut W) -> Result<(), CliError> {
    let ast = parse_file(path)?;
    write_preorder(&ast, out)?;
    out.flush()?;
    Ok(())
}
