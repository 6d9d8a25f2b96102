pub mod ast;
pub mod error;
pub mod module;
pub mod parser;

use ast::Program;
use chumsky::Parser;
use chumsky::Stream;
use error::SourceError;
use module::{Module, ResolveError};

/// Lex and parse source text, keeping byte spans for diagnostics
pub fn parse_source(source: &str) -> Result<Program, SourceError> {
    let tokens = lexer::lex_spanned(source).map_err(SourceError::Lex)?;
    let eoi = source.len()..source.len();

    parser::parser()
        .parse(Stream::from_iter(eoi, tokens.into_iter()))
        .map_err(SourceError::Parse)
}

/// Failure of any frontend stage before constant evaluation
#[derive(Debug, Clone)]
pub enum FrontendError {
    Source(SourceError),
    Resolve(Vec<ResolveError>),
}

/// Parse source text and lower it into a resolved module
pub fn parse_module(source: &str) -> Result<Module, FrontendError> {
    let program = parse_source(source).map_err(FrontendError::Source)?;
    Module::lower(&program).map_err(FrontendError::Resolve)
}

#[cfg(test)]
mod tests;
