// Diagnostics raised while folding constants
//
// The evaluator decides when and what to report; rendering is left to
// `error_report`.

use parser::ast::Span;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Aborts the current node; the session continues
    Error,
    /// Aborts the whole evaluation request
    Fatal,
}

/// Stable error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DivisionByZero,
    IncompatibleOperator,
    CyclicConstant,
    NotConvertible,
    ValueOutOfRange,
    InternalError,
}

impl ErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::DivisionByZero => "E201",
            ErrorCode::IncompatibleOperator => "E202",
            ErrorCode::CyclicConstant => "E203",
            ErrorCode::NotConvertible => "E204",
            ErrorCode::ValueOutOfRange => "E205",
            ErrorCode::InternalError => "E299",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: ErrorCode,
    pub span: Span,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.severity {
            Severity::Error => "error",
            Severity::Fatal => "fatal error",
        };
        write!(f, "{}[{}]: {}", kind, self.code, self.message)
    }
}

/// Where the evaluator sends its diagnostics
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);

    fn type_error(&mut self, code: ErrorCode, span: Span, message: String) {
        self.report(Diagnostic {
            severity: Severity::Error,
            code,
            span,
            message,
        });
    }

    fn fatal_type_error(&mut self, code: ErrorCode, span: Span, message: String) {
        self.report(Diagnostic {
            severity: Severity::Fatal,
            code,
            span,
            message,
        });
    }
}

/// Collects diagnostics in the order they were raised
#[derive(Debug, Default, Clone)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn has_fatal(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Fatal)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl DiagnosticSink for ErrorReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
