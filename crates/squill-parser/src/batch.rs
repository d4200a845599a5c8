//! `GO` batch splitting.
//!
//! `GO` is not T-SQL; it is a client-tool separator. It only counts when it
//! is the first token on its line, which is why splitting happens on the
//! token stream (comments already gone) with a peek back at the source text
//! to confirm a line boundary. `GO N` repeats the preceding batch N times.

use squill_ast::Span;

use crate::diag::{Diagnostic, DiagnosticKind};
use crate::token::{Token, TokenKind};

/// One pre-parse batch: the tokens between two `GO` separators.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBatch {
    pub tokens: Vec<Token>,
    /// `GO N` repeat count; 1 when absent.
    pub repeat: u32,
    pub span: Span,
}

/// Split a token stream into batches at `GO` separators.
///
/// Empty segments (consecutive `GO` lines, leading `GO`) produce no batch.
/// Trailing text on a `GO` line is reported as a `BatchFormat` warning and
/// flows into the following batch, so no source text is lost.
pub fn split_batches(
    source: &str,
    tokens: Vec<Token>,
    diags: &mut Vec<Diagnostic>,
) -> Vec<RawBatch> {
    let mut batches = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut iter = tokens.into_iter().peekable();
    // End offset of the previously consumed token, for the line-boundary
    // check. `current.last()` is not enough: the GO token itself and its
    // repeat count never enter `current`.
    let mut prev_end: Option<usize> = None;

    while let Some(tok) = iter.next() {
        let at_line_start = is_go(&tok, prev_end, source);
        prev_end = Some(tok.span.end as usize);
        if at_line_start {
            let go_line = tok.line;
            let mut repeat = 1u32;

            // Optional repeat count on the same line.
            if let Some(next) = iter.peek() {
                if next.line == go_line {
                    if let TokenKind::Int(n) = next.kind {
                        if let Some(count) = iter.next() {
                            prev_end = Some(count.span.end as usize);
                            match u32::try_from(n) {
                                Ok(n) if n >= 1 => repeat = n,
                                _ => diags.push(Diagnostic::warning(
                                    DiagnosticKind::BatchFormat,
                                    format!("GO count must be a positive integer, got {n}"),
                                    count.span,
                                    count.line,
                                    count.col,
                                )),
                            }
                        }
                    }
                }
            }

            // Anything else on the GO line is not valid separator syntax;
            // it joins the following batch rather than being dropped.
            if let Some(next) = iter.peek() {
                if next.line == go_line {
                    diags.push(Diagnostic::warning(
                        DiagnosticKind::BatchFormat,
                        "unexpected text after GO; it joins the following batch",
                        next.span,
                        next.line,
                        next.col,
                    ));
                }
            }

            flush(&mut current, repeat, &mut batches);
        } else {
            current.push(tok);
        }
    }

    flush(&mut current, 1, &mut batches);
    batches
}

fn flush(current: &mut Vec<Token>, repeat: u32, batches: &mut Vec<RawBatch>) {
    if current.is_empty() {
        return;
    }
    let tokens = std::mem::take(current);
    let span = tokens
        .first()
        .map(|t| t.span)
        .unwrap_or(Span::ZERO)
        .merge(tokens.last().map(|t| t.span).unwrap_or(Span::ZERO));
    batches.push(RawBatch {
        tokens,
        repeat,
        span,
    });
}

/// A token is a `GO` separator when it spells "go" and nothing but
/// whitespace precedes it on its line.
fn is_go(tok: &Token, prev_end: Option<usize>, source: &str) -> bool {
    if !matches!(&tok.kind, TokenKind::Ident(s) if s.eq_ignore_ascii_case("go")) {
        return false;
    }
    match prev_end {
        None => {
            // First token of the stream: only leading whitespace/comments
            // can precede it, but a line comment before it on the same line
            // is impossible (a comment runs to end of line).
            true
        }
        Some(end) => {
            let between = &source[end..tok.span.start as usize];
            between.contains('\n')
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::token::Kw;

    fn split(src: &str) -> (Vec<RawBatch>, Vec<Diagnostic>) {
        let tokens = Lexer::tokenize(src);
        let mut diags = Vec::new();
        let batches = split_batches(src, tokens, &mut diags);
        (batches, diags)
    }

    #[test]
    fn test_split_two_batches() {
        let (batches, diags) = split("SELECT 1\nGO\nSELECT 2\n");
        assert!(diags.is_empty());
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].repeat, 1);
        assert_eq!(batches[1].repeat, 1);
    }

    #[test]
    fn test_go_repeat_count() {
        let (batches, diags) = split("SELECT 1\nGO\nSELECT 2\nGO 3\n");
        assert!(diags.is_empty());
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].repeat, 1);
        assert_eq!(batches[1].repeat, 3);
    }

    #[test]
    fn test_go_mid_line_is_an_identifier() {
        // `go` as a column name must not split the batch
        let (batches, diags) = split("SELECT go FROM stops\n");
        assert!(diags.is_empty());
        assert_eq!(batches.len(), 1);
        assert!(batches[0]
            .tokens
            .iter()
            .any(|t| matches!(&t.kind, TokenKind::Ident(s) if s == "go")));
    }

    #[test]
    fn test_go_case_insensitive() {
        let (batches, _) = split("SELECT 1\ngo\nSELECT 2\nGo\nSELECT 3");
        assert_eq!(batches.len(), 3);
    }

    #[test]
    fn test_empty_segments_produce_no_batch() {
        let (batches, diags) = split("GO\nGO\nSELECT 1\nGO\n");
        assert!(diags.is_empty());
        assert_eq!(batches.len(), 1);
    }

    #[test]
    fn test_trailing_text_after_go_warns_and_joins_next_batch() {
        let (batches, diags) = split("SELECT 1\nGO SELECT 2\nSELECT 3");
        assert_eq!(batches.len(), 2);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::BatchFormat);
        // SELECT 2 flows into batch 2 ahead of SELECT 3; nothing is lost
        let kinds: Vec<&TokenKind> = batches[1].tokens.iter().map(|t| &t.kind).collect();
        assert_eq!(
            kinds,
            [
                &TokenKind::Keyword(Kw::Select),
                &TokenKind::Int(2),
                &TokenKind::Keyword(Kw::Select),
                &TokenKind::Int(3),
            ]
        );
    }

    #[test]
    fn test_text_after_go_count_also_joins_next_batch() {
        let (batches, diags) = split("SELECT 1\nGO 2 SELECT 9\nSELECT 3");
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].repeat, 2);
        assert_eq!(diags.len(), 1);
        assert_eq!(batches[1].tokens[1].kind, TokenKind::Int(9));
    }

    #[test]
    fn test_nonpositive_go_count_warns() {
        let (batches, diags) = split("SELECT 1\nGO 0\n");
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].repeat, 1);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::BatchFormat);
    }

    #[test]
    fn test_go_after_comment_still_splits() {
        let (batches, _) = split("SELECT 1 -- trailing comment\nGO\nSELECT 2");
        assert_eq!(batches.len(), 2);
    }

    #[test]
    fn test_batch_span_covers_tokens() {
        let (batches, _) = split("SELECT 1\nGO\nSELECT 2");
        assert_eq!(batches[0].span.start, 0);
        assert!(batches[0].span.end >= 8);
        assert!(batches[1].span.start > batches[0].span.end);
    }
}
