pub mod constants;
pub mod diagnostic;
pub mod error_report;
pub mod evaluator;
pub mod memo;

pub use constants::{fold_constants, FoldedConstant, FoldedExpression, FoldedModule, SessionMode};
pub use diagnostic::{Diagnostic, DiagnosticSink, ErrorCode, ErrorReporter, Severity};
pub use error_report::{report_diagnostic, report_diagnostics, report_type_name_errors};
pub use evaluator::{evaluate, ConstantEvaluator, EvalError, EvalResult, MAX_RECURSION_DEPTH};
pub use memo::{EvaluationMap, TypedValue};

#[cfg(test)]
mod tests;
