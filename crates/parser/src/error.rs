// Error reporting with Ariadne
//
// Lexing, parsing and name resolution failures rendered as source reports.

use crate::module::ResolveError;
use ariadne::{Color, Label, Report, ReportKind, Source};
use chumsky::error::{Simple, SimpleReason};
use lexer::LexError;
use lexer::token::Token;
use std::io;

/// Type alias for Chumsky parser errors
pub type ParseError = Simple<Token>;

/// Everything that can stop source text from becoming a `Program`
#[derive(Debug, Clone)]
pub enum SourceError {
    Lex(LexError),
    Parse(Vec<ParseError>),
}

/// Converts Chumsky errors to Ariadne reports
pub fn report_errors(filename: &str, source: &str, errors: &[ParseError]) -> io::Result<()> {
    for error in errors {
        let span = error.span();
        let msg = match error.reason() {
            SimpleReason::Custom(msg) => msg.clone(),
            _ => match error.found() {
                Some(token) => format!("Unexpected token '{}'", token),
                None => "Unexpected end of input".to_string(),
            },
        };

        let report = Report::build(ReportKind::Error, filename, span.start)
            .with_code("E001")
            .with_message("Parse Error")
            .with_label(
                Label::new((filename, span))
                    .with_message(msg)
                    .with_color(Color::Red),
            );

        // Add expected tokens if available (limit to 5 to avoid overwhelming output)
        let report = if error.expected().len() > 0 {
            let mut expected: Vec<String> = error.expected().map(format_expected).collect();
            expected.sort();

            let help_msg = if expected.len() > 5 {
                format!("Expected one of: {}, ...", expected[..5].join(", "))
            } else {
                format!("Expected: {}", expected.join(", "))
            };

            report.with_help(help_msg)
        } else {
            report
        };

        report
            .finish()
            .eprint((filename, Source::from(source)))?;
    }
    Ok(())
}

/// Report a character sequence the lexer could not match
pub fn report_lex_error(filename: &str, source: &str, error: &LexError) -> io::Result<()> {
    Report::build(ReportKind::Error, filename, error.span.start)
        .with_code("E000")
        .with_message("Lexical Error")
        .with_label(
            Label::new((filename, error.span.clone()))
                .with_message(error.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .eprint((filename, Source::from(source)))
}

/// Report duplicate and undefined names found while building the module
pub fn report_resolve_errors(
    filename: &str,
    source: &str,
    errors: &[ResolveError],
) -> io::Result<()> {
    for error in errors {
        let report = Report::build(ReportKind::Error, filename, error.span().start)
            .with_code(match error {
                ResolveError::DuplicateDeclaration { .. } => "E010",
                ResolveError::UndefinedIdentifier { .. } => "E011",
            })
            .with_message(error.to_string())
            .with_label(
                Label::new((filename, error.span().clone()))
                    .with_message(error.to_string())
                    .with_color(Color::Red),
            );

        let report = match error {
            ResolveError::DuplicateDeclaration { previous, .. } => report.with_label(
                Label::new((filename, previous.clone()))
                    .with_message("first declared here")
                    .with_color(Color::Yellow),
            ),
            ResolveError::UndefinedIdentifier { .. } => report,
        };

        report
            .finish()
            .eprint((filename, Source::from(source)))?;
    }
    Ok(())
}

/// Format expected token for human-readable output
fn format_expected(token: &Option<Token>) -> String {
    match token {
        Some(Token::Plus) => "'+'".to_string(),
        Some(Token::Minus) => "'-'".to_string(),
        Some(Token::Star) => "'*'".to_string(),
        Some(Token::Slash) => "'/'".to_string(),
        Some(Token::Percent) => "'%'".to_string(),
        Some(Token::Pow) => "'**'".to_string(),
        Some(Token::LParen) => "'('".to_string(),
        Some(Token::RParen) => "')'".to_string(),
        Some(Token::LBracket) => "'['".to_string(),
        Some(Token::RBracket) => "']'".to_string(),
        Some(Token::Comma) => "','".to_string(),
        Some(Token::Colon) => "':'".to_string(),
        Some(Token::Semicolon) => "';'".to_string(),
        Some(Token::Eq) => "'='".to_string(),
        Some(Token::DoubleEq) => "'=='".to_string(),
        Some(Token::NotEq) => "'!='".to_string(),
        Some(Token::Lt) => "'<'".to_string(),
        Some(Token::Gt) => "'>'".to_string(),
        Some(Token::LtEq) => "'<='".to_string(),
        Some(Token::GtEq) => "'>='".to_string(),
        Some(Token::Shl) => "'<<'".to_string(),
        Some(Token::Shr) => "'>>'".to_string(),
        Some(Token::ColonEq) => "':='".to_string(),
        Some(Token::And) => "'&&'".to_string(),
        Some(Token::Or) => "'||'".to_string(),
        Some(Token::Not) => "'!'".to_string(),
        Some(Token::Tilde) => "'~'".to_string(),
        Some(Token::Ampersand) => "'&'".to_string(),
        Some(Token::Pipe) => "'|'".to_string(),
        Some(Token::Caret) => "'^'".to_string(),
        Some(Token::Var) => "keyword 'var'".to_string(),
        Some(Token::Const) => "keyword 'const'".to_string(),
        Some(Token::True) => "'true'".to_string(),
        Some(Token::False) => "'false'".to_string(),
        Some(Token::Identifier(_)) => "identifier".to_string(),
        Some(Token::Int(_)) => "integer".to_string(),
        Some(Token::Decimal(_)) => "number".to_string(),
        Some(Token::String(_)) => "string".to_string(),
        None => "end of input".to_string(),
    }
}
