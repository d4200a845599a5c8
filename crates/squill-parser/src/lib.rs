//! T-SQL (SQL Server dialect) parser.
//!
//! The pipeline is lexer -> batch splitter -> statement parser: source text
//! is tokenized once, split into batches at line-leading `GO` separators,
//! and each batch is parsed independently so declarations never leak across
//! batch boundaries.
//!
//! Parsing is best-effort and never fails outright: every problem is
//! reported as a [`Diagnostic`] and the parser recovers at the next
//! statement boundary, so the caller always gets a [`ParseOutcome`] with
//! whatever could be understood.
//!
//! ```
//! let outcome = squill_parser::parse("SELECT 1\nGO\nSELECT 2\nGO 3\n");
//! assert_eq!(outcome.script.batches.len(), 2);
//! assert_eq!(outcome.script.batches[1].repeat, 3);
//! assert!(!outcome.has_errors());
//! ```

mod batch;
mod diag;
mod expr;
mod lexer;
mod parser;
mod token;

pub use diag::{Diagnostic, DiagnosticKind, Severity, SyntaxError};
pub use lexer::{Lexer, LexerOptions};
pub use parser::Parser;
pub use token::{Kw, Token, TokenKind};

pub use squill_ast as ast;

use squill_ast::{Batch, Script};
use tracing::debug;

/// The result of parsing one script: the best-effort AST plus everything
/// that went wrong along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub script: Script,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    /// True when at least one diagnostic is an error (warnings alone do not
    /// count).
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Parse a T-SQL script with default lexer options (`QUOTED_IDENTIFIER ON`).
#[must_use]
pub fn parse(source: &str) -> ParseOutcome {
    parse_with_options(source, LexerOptions::default())
}

/// Parse a T-SQL script with explicit lexer options.
#[must_use]
pub fn parse_with_options(source: &str, options: LexerOptions) -> ParseOutcome {
    let tokens = Lexer::tokenize_with(source, options);
    let mut diagnostics = Vec::new();
    let raw_batches = batch::split_batches(source, tokens, &mut diagnostics);

    let mut batches = Vec::with_capacity(raw_batches.len());
    for raw in raw_batches {
        let mut parser = Parser::new(raw.tokens, source);
        let (statements, mut diags) = parser.parse_statements();
        debug!(
            statements = statements.len(),
            diagnostics = diags.len(),
            repeat = raw.repeat,
            "parsed batch"
        );
        diagnostics.append(&mut diags);
        batches.push(Batch {
            statements,
            repeat: raw.repeat,
            span: raw.span,
        });
    }

    debug!(
        batches = batches.len(),
        diagnostics = diagnostics.len(),
        "parsed script"
    );
    ParseOutcome {
        script: Script { batches },
        diagnostics,
    }
}

/// Parse a string captured from a dynamic-SQL context (`EXEC ('...')`,
/// `sp_executesql` arguments). Dynamic SQL strings are kept opaque during
/// normal parsing; this is the explicit second pass, never invoked
/// implicitly.
#[must_use]
pub fn parse_dynamic_sql(source: &str) -> ParseOutcome {
    parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_batches_with_repeat() {
        let outcome = parse("SELECT 1\nGO\nSELECT 2\nGO 3\n");
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(outcome.script.batches.len(), 2);
        assert_eq!(outcome.script.batches[0].repeat, 1);
        assert_eq!(outcome.script.batches[1].repeat, 3);
    }

    #[test]
    fn test_parse_never_fails_on_garbage() {
        let outcome = parse("SELECT FROM WHERE ~~ ;;; !!");
        assert!(outcome.has_errors());
        // The script node is still produced.
        assert!(outcome.script.batches.len() <= 1);
    }

    #[test]
    fn test_quoted_identifier_off_makes_double_quotes_strings() {
        let on = parse(r#"SELECT "name" FROM t"#);
        assert!(!on.has_errors());

        let off = parse_with_options(
            r#"SELECT "name" FROM t"#,
            LexerOptions {
                quoted_identifier: false,
            },
        );
        assert!(!off.has_errors());
        // Same text, different lexical class: identifier vs string literal.
        assert_ne!(on.script, off.script);
    }

    #[test]
    fn test_parse_dynamic_sql_is_a_plain_parse() {
        let outcome = parse_dynamic_sql("UPDATE t SET n = 1 WHERE id = 2");
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(outcome.script.batches.len(), 1);
    }
}
