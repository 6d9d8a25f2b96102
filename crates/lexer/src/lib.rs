pub mod token;

use logos::Logos;
use std::fmt;
use std::ops::Range;
use token::Token;

/// Byte range of a token in the source text
pub type Span = Range<usize>;

/// Tokenize a source string and return a Vec of tokens
pub fn lex(source: &str) -> Vec<Token> {
    Token::lexer(source)
        .filter_map(|t| t.ok())
        .collect()
}

/// A character sequence no token matches
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub span: Span,
    pub text: String,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid character sequence '{}'", self.text)
    }
}

impl std::error::Error for LexError {}

/// Tokenize a source string keeping byte spans, failing on the first invalid input
pub fn lex_spanned(source: &str) -> Result<Vec<(Token, Span)>, LexError> {
    Token::lexer(source)
        .spanned()
        .map(|(token, span)| match token {
            Ok(token) => Ok((token, span)),
            Err(()) => Err(LexError {
                text: source.get(span.clone()).unwrap_or_default().to_string(),
                span,
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests;
