//! Script-level behavior: batching, recovery, and the diagnostics contract.

use pretty_assertions::assert_eq;
use squill_parser::ast::{Statement, StatementKind};
use squill_parser::{parse, Diagnostic, DiagnosticKind, Severity};

fn kinds_of(stmts: &[Statement]) -> Vec<&'static str> {
    stmts
        .iter()
        .map(|s| match &s.kind {
            StatementKind::Select(_) => "select",
            StatementKind::Insert(_) => "insert",
            StatementKind::Update(_) => "update",
            StatementKind::Delete(_) => "delete",
            StatementKind::Merge(_) => "merge",
            StatementKind::CreateTable(_) => "create_table",
            StatementKind::Unrecognized { .. } => "unrecognized",
            _ => "other",
        })
        .collect()
}

#[test]
fn test_batch_count_follows_go_separators() {
    let outcome = parse("SELECT 1\nGO\nSELECT 2\nGO 3\n");
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.script.batches.len(), 2);
    assert_eq!(outcome.script.batches[0].repeat, 1);
    assert_eq!(outcome.script.batches[1].repeat, 3);
}

#[test]
fn test_go_is_only_a_separator_at_line_start() {
    let outcome = parse("SELECT go FROM stops WHERE go > 1");
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.script.batches.len(), 1);
}

#[test]
fn test_trailing_text_after_go_is_a_batch_format_warning() {
    let outcome = parse("SELECT 1\nGO stray text\nSELECT 2");
    assert_eq!(outcome.script.batches.len(), 2);
    let warnings: Vec<&Diagnostic> = outcome
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::BatchFormat)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].severity, Severity::Warning);
    // The stray text is carried into the next batch, not dropped.
    assert_eq!(
        kinds_of(&outcome.script.batches[1].statements),
        ["unrecognized", "select"]
    );
}

#[test]
fn test_batches_are_independent_statement_lists() {
    let outcome = parse(
        "DECLARE @n INT = 1\nSELECT @n\nGO\nDECLARE @n INT = 2\nSELECT @n\nGO\n",
    );
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.script.batches.len(), 2);
    // Both batches re-declare @n; the model keeps them apart.
    for batch in &outcome.script.batches {
        assert_eq!(batch.statements.len(), 2);
        assert!(matches!(
            batch.statements[0].kind,
            StatementKind::Declare(_)
        ));
    }
}

#[test]
fn test_merge_without_terminator_is_an_error_but_parses() {
    let outcome = parse("MERGE t USING s ON t.id = s.id WHEN MATCHED THEN DELETE");
    assert_eq!(outcome.script.batches.len(), 1);
    assert_eq!(kinds_of(&outcome.script.batches[0].statements), ["merge"]);
    let diag = outcome
        .diagnostics
        .iter()
        .find(|d| d.kind == DiagnosticKind::MissingTerminator)
        .expect("missing-terminator diagnostic");
    assert!(diag.is_error());
    assert_eq!((diag.line, diag.col), (1, 1));
}

#[test]
fn test_leading_with_ambiguity_warns_but_keeps_cte_reading() {
    let outcome = parse("UPDATE t SET n = 1\nWITH c AS (SELECT 1 AS x) SELECT x FROM c");
    let stmts = &outcome.script.batches[0].statements;
    assert_eq!(kinds_of(stmts), ["update", "select"]);
    let diag = outcome
        .diagnostics
        .iter()
        .find(|d| d.kind == DiagnosticKind::AmbiguousConstruct)
        .expect("ambiguity warning");
    assert_eq!(diag.severity, Severity::Warning);
    // The warning points at the WITH on the second line.
    assert_eq!((diag.line, diag.col), (2, 1));

    // With the terminator present there is nothing to warn about.
    let clean = parse("UPDATE t SET n = 1;\nWITH c AS (SELECT 1 AS x) SELECT x FROM c");
    assert!(clean
        .diagnostics
        .iter()
        .all(|d| d.kind != DiagnosticKind::AmbiguousConstruct));
}

#[test]
fn test_unknown_statement_is_preserved_not_dropped() {
    let outcome = parse("GRANT SELECT ON dbo.t TO reporting_role;\nSELECT 1;");
    let stmts = &outcome.script.batches[0].statements;
    assert_eq!(kinds_of(stmts), ["unrecognized", "select"]);
    let StatementKind::Unrecognized { sql } = &stmts[0].kind else {
        unreachable!();
    };
    assert_eq!(sql, "GRANT SELECT ON dbo.t TO reporting_role");
    assert!(outcome
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::UnrecognizedStatement));
}

#[test]
fn test_statement_error_does_not_poison_the_rest_of_the_batch() {
    let outcome = parse("SELECT * FROM;\nINSERT INTO t (a) VALUES (1);\nSELECT a FROM t;");
    assert!(outcome.has_errors());
    let stmts = &outcome.script.batches[0].statements;
    assert_eq!(kinds_of(stmts), ["insert", "select"]);
}

#[test]
fn test_lexer_fault_becomes_lex_diagnostic() {
    let outcome = parse("SELECT 1;\n!\nSELECT 2;");
    assert!(outcome
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::Lex && d.is_error()));
    // Both real statements survive the bad token between them.
    assert_eq!(kinds_of(&outcome.script.batches[0].statements), ["select", "select"]);
}

#[test]
fn test_unterminated_block_comment_is_diagnosed() {
    let outcome = parse("SELECT 1 /* oops");
    assert!(outcome
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::Lex && d.is_error()));
    assert_eq!(kinds_of(&outcome.script.batches[0].statements), ["select"]);

    // Statements swallowed by the open comment are gone, but never silently.
    let outcome = parse("SELECT 1;\n/* truncated\nSELECT 2;\nSELECT 3;");
    assert!(outcome
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::Lex && d.is_error()));
    assert_eq!(kinds_of(&outcome.script.batches[0].statements), ["select"]);
}

#[test]
fn test_unterminated_string_does_not_hide_the_error() {
    let outcome = parse("SELECT 'unterminated\nGO\nSELECT 2");
    assert!(outcome.has_errors());
    // The script is still produced.
    assert!(!outcome.script.batches.is_empty());
}

#[test]
fn test_parse_terminates_on_arbitrary_input() {
    for src in [
        "",
        ";;;",
        "GO\nGO\nGO",
        ")(",
        "SELECT",
        "BEGIN",
        "CASE WHEN THEN END",
        "~!@#$%^&*",
    ] {
        let outcome = parse(src);
        // Never panics, always yields an outcome.
        let _ = outcome.script.batches.len();
    }
}

#[test]
fn test_diagnostics_carry_positions() {
    let outcome = parse("SELECT 1\nSELECT * FROM;");
    let err = outcome
        .diagnostics
        .iter()
        .find(|d| d.is_error())
        .expect("an error diagnostic");
    assert_eq!(err.line, 2);
    assert!(err.col > 0);
}

#[test]
fn test_statement_spans_cover_source_text() {
    let src = "SELECT 1;\nUPDATE t SET n = 2;";
    let outcome = parse(src);
    let stmts = &outcome.script.batches[0].statements;
    assert_eq!(stmts.len(), 2);
    let s0 = &stmts[0].span;
    assert_eq!(&src[s0.start as usize..s0.end as usize], "SELECT 1;");
    let s1 = &stmts[1].span;
    assert!(src[s1.start as usize..s1.end as usize].starts_with("UPDATE"));
}
