//! Diagnostics collected during parsing.
//!
//! Parsing never aborts the script: every problem becomes a [`Diagnostic`]
//! and the parser recovers and continues. [`SyntaxError`] is the internal
//! error type threaded through `Result` inside the parser; the top level
//! converts it into a `Diagnostic` with a category.

use squill_ast::Span;
use thiserror::Error;

use crate::token::Token;

/// A parse failure at a specific source location.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{line}:{col}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
    pub line: u32,
    pub col: u32,
}

impl SyntaxError {
    #[must_use]
    pub(crate) fn at(message: impl Into<String>, token: Option<&Token>) -> Self {
        if let Some(t) = token {
            Self {
                message: message.into(),
                span: t.span,
                line: t.line,
                col: t.col,
            }
        } else {
            Self {
                message: message.into(),
                span: Span::ZERO,
                line: 0,
                col: 0,
            }
        }
    }
}

/// How serious a diagnostic is. Warnings never suppress the statement they
/// attach to; errors mean the statement (or token) could not be understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// What part of the pipeline produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Malformed token (unterminated literal, stray byte).
    Lex,
    /// Unparseable expression.
    Expression,
    /// Statement-level grammar violation.
    Syntax,
    /// A construct that requires `;` did not end with one (`MERGE`).
    MissingTerminator,
    /// Grammar accepted the input but it likely does not mean what it says
    /// (unterminated statement before a leading `WITH`).
    AmbiguousConstruct,
    /// A statement form outside the grammar, preserved as raw text.
    UnrecognizedStatement,
    /// Batch-separator misuse (trailing text on a `GO` line).
    BatchFormat,
}

/// One problem found in the script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub line: u32,
    pub col: u32,
}

impl Diagnostic {
    /// An error diagnostic from an internal parse failure.
    #[must_use]
    pub fn error(kind: DiagnosticKind, err: SyntaxError) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            message: err.message,
            span: err.span,
            line: err.line,
            col: err.col,
        }
    }

    /// A warning at an explicit location.
    #[must_use]
    pub fn warning(
        kind: DiagnosticKind,
        message: impl Into<String>,
        span: Span,
        line: u32,
        col: u32,
    ) -> Self {
        Self {
            kind,
            severity: Severity::Warning,
            message: message.into(),
            span,
            line,
            col,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sev = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}:{}: {sev}: {}", self.line, self.col, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::warning(
            DiagnosticKind::BatchFormat,
            "text after GO",
            Span::new(10, 12),
            3,
            4,
        );
        assert_eq!(d.to_string(), "3:4: warning: text after GO");
        assert!(!d.is_error());
    }

    #[test]
    fn test_error_from_syntax_error() {
        let e = SyntaxError {
            message: "expected expression".to_owned(),
            span: Span::new(5, 6),
            line: 2,
            col: 1,
        };
        assert_eq!(e.to_string(), "2:1: expected expression");
        let d = Diagnostic::error(DiagnosticKind::Expression, e);
        assert!(d.is_error());
        assert_eq!(d.span, Span::new(5, 6));
    }
}
