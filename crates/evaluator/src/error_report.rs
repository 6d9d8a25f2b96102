// Error reporting with Ariadne for constant evaluation

use crate::diagnostic::{Diagnostic, Severity};
use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use std::io;
use types::TypeNameError;

/// Render one diagnostic to stderr
pub fn report_diagnostic(
    filename: &str,
    source: &str,
    diagnostic: &Diagnostic,
    color: bool,
) -> io::Result<()> {
    let (title, label_color) = match diagnostic.severity {
        Severity::Error => ("Type Error", Color::Yellow),
        Severity::Fatal => ("Fatal Type Error", Color::Red),
    };

    Report::build(ReportKind::Error, filename, diagnostic.span.start)
        .with_config(Config::default().with_color(color))
        .with_code(diagnostic.code.code())
        .with_message(title)
        .with_label(
            Label::new((filename, diagnostic.span.clone()))
                .with_message(&diagnostic.message)
                .with_color(label_color),
        )
        .finish()
        .eprint((filename, Source::from(source)))
}

/// Render every diagnostic in order
pub fn report_diagnostics(
    filename: &str,
    source: &str,
    diagnostics: &[Diagnostic],
    color: bool,
) -> io::Result<()> {
    for diagnostic in diagnostics {
        report_diagnostic(filename, source, diagnostic, color)?;
    }
    Ok(())
}

/// Report type annotations that name no known type
pub fn report_type_name_errors(
    filename: &str,
    source: &str,
    errors: &[TypeNameError],
) -> io::Result<()> {
    for error in errors {
        Report::build(ReportKind::Error, filename, error.span.start)
            .with_code("E020")
            .with_message("Unknown Type")
            .with_label(
                Label::new((filename, error.span.clone()))
                    .with_message(error.to_string())
                    .with_color(Color::Red),
            )
            .with_help("expected bool, string, int, uint, intN or uintN (N a multiple of 8 up to 256)")
            .finish()
            .eprint((filename, Source::from(source)))?;
    }
    Ok(())
}
