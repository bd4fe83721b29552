//! Error types and reporting

use crate::ast::Span;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, CompileError>;

/// Compile error
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Lexer error at {span:?}: {message}")]
    Lexer { message: String, span: Span },

    #[error("Parser error at {span:?}: {message}")]
    Parser { message: String, span: Span },

    /// Declaration errors reported by the type environment
    #[error("Type error at {span:?}: {message}")]
    Type { message: String, span: Span },

    /// Input outside the supported grammar; aborts the check immediately
    #[error("Malformed input at {span:?}: {message}")]
    Malformed { message: String, span: Span },

    /// Accumulated coverage diagnostics of one or more checks
    #[error("{} unresolved diagnostic(s)", .diagnostics.len())]
    Check { diagnostics: Vec<Diagnostic> },

    #[error("IO error: {message}")]
    Io { message: String },

    #[error("Config error: {message}")]
    Config { message: String },
}

impl CompileError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        Self::Lexer {
            message: message.into(),
            span,
        }
    }

    pub fn parser(message: impl Into<String>, span: Span) -> Self {
        Self::Parser {
            message: message.into(),
            span,
        }
    }

    pub fn type_error(message: impl Into<String>, span: Span) -> Self {
        Self::Type {
            message: message.into(),
            span,
        }
    }

    pub fn malformed(message: impl Into<String>, span: Span) -> Self {
        Self::Malformed {
            message: message.into(),
            span,
        }
    }

    pub fn check(diagnostics: Vec<Diagnostic>) -> Self {
        Self::Check { diagnostics }
    }

    pub fn io_error(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lexer { span, .. }
            | Self::Parser { span, .. }
            | Self::Type { span, .. }
            | Self::Malformed { span, .. } => Some(*span),
            Self::Check { diagnostics } => diagnostics.first().map(|d| d.span),
            Self::Io { .. } | Self::Config { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Lexer { message, .. }
            | Self::Parser { message, .. }
            | Self::Type { message, .. }
            | Self::Malformed { message, .. }
            | Self::Io { message }
            | Self::Config { message } => message,
            Self::Check { diagnostics } => diagnostics
                .first()
                .map(|d| d.message.as_str())
                .unwrap_or_default(),
        }
    }

    /// Coverage diagnostics carried by this error, empty for other kinds
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Check { diagnostics } => diagnostics,
            _ => &[],
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Self::Lexer { .. } => "Lexer",
            Self::Parser { .. } => "Parser",
            Self::Type { .. } => "Type",
            Self::Malformed { .. } => "Malformed input",
            Self::Check { .. } => "Check",
            Self::Io { .. } => "IO",
            Self::Config { .. } => "Config",
        }
    }
}

/// Diagnostic class of a failed check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A pattern or type is not part of the union
    Membership,
    /// One union does not cover another
    Containment,
    /// Union members matched by no clause
    Coverage,
    /// Counterexamples for a matched member
    Exhaustiveness,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::Membership => write!(f, "membership"),
            DiagnosticKind::Containment => write!(f, "containment"),
            DiagnosticKind::Coverage => write!(f, "coverage"),
            DiagnosticKind::Exhaustiveness => write!(f, "exhaustiveness"),
        }
    }
}

/// A single coverage failure anchored at a source position.
/// There is no warning level: every diagnostic fails the check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error at {}: {}", self.kind, self.span, self.message)
    }
}

/// Report error with ariadne
pub fn report_error(filename: &str, source: &str, error: &CompileError) -> std::io::Result<()> {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    if let CompileError::Check { diagnostics } = error {
        return report_diagnostics(filename, source, diagnostics);
    }

    let kind = error.kind_name();
    if let Some(span) = error.span() {
        Report::build(ReportKind::Error, (filename, span.start..span.end))
            .with_message(format!("{kind} error"))
            .with_label(
                Label::new((filename, span.start..span.end))
                    .with_message(error.message())
                    .with_color(Color::Red),
            )
            .finish()
            .eprint((filename, Source::from(source)))
    } else {
        // Errors without span (IO, Config)
        Report::build(ReportKind::Error, (filename, 0..0))
            .with_message(format!("{kind} error: {}", error.message()))
            .finish()
            .eprint((filename, Source::from(source)))
    }
}

/// Report every coverage diagnostic, one report each
pub fn report_diagnostics(
    filename: &str,
    source: &str,
    diagnostics: &[Diagnostic],
) -> std::io::Result<()> {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    for diagnostic in diagnostics {
        let range = diagnostic.span.start..diagnostic.span.end;
        Report::build(ReportKind::Error, (filename, range.clone()))
            .with_message(format!("{} error", diagnostic.kind))
            .with_label(
                Label::new((filename, range))
                    .with_message(&diagnostic.message)
                    .with_color(Color::Red),
            )
            .finish()
            .eprint((filename, Source::from(source)))?;
    }
    Ok(())
}
