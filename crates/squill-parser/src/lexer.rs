//! T-SQL lexer.
//!
//! Converts script text into a stream of tokens. Uses memchr for accelerated
//! string scanning. Tracks line/column for diagnostics. Lexical errors become
//! `TokenKind::Error` tokens rather than aborting the scan, so a bad literal
//! never hides the rest of the script.

use memchr::memchr;
use squill_ast::{QuoteStyle, Span};

use crate::token::{Token, TokenKind};

/// Session-level settings that change how the lexer classifies input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerOptions {
    /// `SET QUOTED_IDENTIFIER` state. When true (the server default),
    /// `"..."` is an identifier; when false it is a string literal.
    pub quoted_identifier: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            quoted_identifier: true,
        }
    }
}

/// Lexer that produces a stream of tokens from T-SQL source text.
pub struct Lexer<'a> {
    /// The source bytes (UTF-8).
    src: &'a [u8],
    /// Current byte offset into src.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    col: u32,
    options: LexerOptions,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'a str, options: LexerOptions) -> Self {
        Self {
            src: source.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
            options,
        }
    }

    /// Tokenize the entire input with default options.
    #[must_use]
    pub fn tokenize(source: &'a str) -> Vec<Token> {
        Self::tokenize_with(source, LexerOptions::default())
    }

    /// Tokenize the entire input into a Vec of tokens.
    #[must_use]
    pub fn tokenize_with(source: &'a str, options: LexerOptions) -> Vec<Token> {
        let mut lexer = Self::new(source, options);
        let mut tokens = Vec::new();
        while let Some(tok) = lexer.next_token() {
            tokens.push(tok);
        }
        tokens
    }

    /// Produce the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        if let Some(err) = self.skip_whitespace_and_comments() {
            return Some(err);
        }

        if self.pos >= self.src.len() {
            return None;
        }

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.col;
        let ch = self.src[self.pos];

        let kind = match ch {
            // String literal (single-quoted)
            b'\'' => self.lex_string(false),

            // Unicode string literal N'...'
            b'N' | b'n' if self.peek_at(1) == Some(b'\'') => {
                self.advance(); // skip N
                self.lex_string(true)
            }

            // Double quote: identifier or string, per QUOTED_IDENTIFIER
            b'"' => {
                if self.options.quoted_identifier {
                    self.lex_double_quoted_id()
                } else {
                    self.lex_double_quoted_string()
                }
            }

            // Bracket-quoted identifier
            b'[' => self.lex_bracket_id(),

            // Numbers (hex, integer, decimal, scientific)
            b'0'..=b'9' => self.lex_number(),
            b'.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => self.lex_number(),

            // Identifiers and keywords (# for temp tables)
            b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'#' => self.lex_identifier(),

            // Variables and pseudo-columns
            b'@' => self.lex_at(),
            b'$' => self.lex_dollar(),

            // Single-char punctuation
            b',' => {
                self.advance();
                TokenKind::Comma
            }
            b';' => {
                self.advance();
                TokenKind::Semicolon
            }
            b'(' => {
                self.advance();
                TokenKind::LeftParen
            }
            b')' => {
                self.advance();
                TokenKind::RightParen
            }
            b'.' => {
                self.advance();
                TokenKind::Dot
            }
            b'&' => {
                self.advance();
                TokenKind::Ampersand
            }
            b'|' => {
                self.advance();
                TokenKind::Pipe
            }
            b'^' => {
                self.advance();
                TokenKind::Caret
            }
            b'~' => {
                self.advance();
                TokenKind::Tilde
            }

            // Operators that may be compound-assignment heads
            b'+' => self.lex_op_or_assign(TokenKind::Plus, TokenKind::PlusEq),
            b'-' => self.lex_op_or_assign(TokenKind::Minus, TokenKind::MinusEq),
            b'*' => self.lex_op_or_assign(TokenKind::Star, TokenKind::StarEq),
            b'/' => self.lex_op_or_assign(TokenKind::Slash, TokenKind::SlashEq),
            b'%' => self.lex_op_or_assign(TokenKind::PercentOp, TokenKind::PercentEq),

            // Multi-character operators
            b'<' => self.lex_lt(),
            b'>' => self.lex_gt(),
            b'=' => {
                self.advance();
                TokenKind::Eq
            }
            b'!' => self.lex_bang(),
            b':' => self.lex_colon(),

            _ => {
                self.advance();
                let s = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
                TokenKind::Error(format!("unexpected character: {s}"))
            }
        };

        let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        Some(Token {
            kind,
            text,
            span: Span::new(start as u32, self.pos as u32),
            line: start_line,
            col: start_col,
        })
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn advance(&mut self) -> u8 {
        let ch = self.src[self.pos];
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        ch
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Skip whitespace, line comments (`-- ...`), and block comments
    /// (`/* ... */`, which nest). An unterminated block comment yields an
    /// `Error` token covering the rest of the input.
    fn skip_whitespace_and_comments(&mut self) -> Option<Token> {
        loop {
            while self.pos < self.src.len() && self.src[self.pos].is_ascii_whitespace() {
                self.advance();
            }

            if self.pos >= self.src.len() {
                break;
            }

            // Line comment: `-- ...`
            if self.src[self.pos] == b'-' && self.peek_at(1) == Some(b'-') {
                self.advance(); // skip -
                self.advance(); // skip -
                while self.pos < self.src.len() && self.src[self.pos] != b'\n' {
                    self.advance();
                }
                continue;
            }

            // Block comment: `/* ... */` with nesting
            if self.src[self.pos] == b'/' && self.peek_at(1) == Some(b'*') {
                let start = self.pos;
                let start_line = self.line;
                let start_col = self.col;
                self.advance(); // skip /
                self.advance(); // skip *
                let mut depth = 1u32;
                while self.pos < self.src.len() && depth > 0 {
                    if self.src[self.pos] == b'/' && self.peek_at(1) == Some(b'*') {
                        self.advance();
                        self.advance();
                        depth += 1;
                    } else if self.src[self.pos] == b'*' && self.peek_at(1) == Some(b'/') {
                        self.advance();
                        self.advance();
                        depth -= 1;
                    } else {
                        self.advance();
                    }
                }
                if depth > 0 {
                    let text =
                        String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
                    return Some(Token {
                        kind: TokenKind::Error(format!(
                            "unterminated block comment starting at byte {start}"
                        )),
                        text,
                        span: Span::new(start as u32, self.pos as u32),
                        line: start_line,
                        col: start_col,
                    });
                }
                continue;
            }

            break;
        }
        None
    }

    // -----------------------------------------------------------------------
    // Literal tokenizers
    // -----------------------------------------------------------------------

    /// Lex a single-quoted string literal. Uses memchr for fast quote search;
    /// `''` inside the literal is an escaped quote.
    fn lex_string(&mut self, unicode: bool) -> TokenKind {
        let start = self.pos;
        self.advance(); // skip opening quote

        let mut value = String::new();
        loop {
            let remaining = &self.src[self.pos..];
            match memchr(b'\'', remaining) {
                Some(offset) => {
                    value.push_str(&String::from_utf8_lossy(
                        &self.src[self.pos..self.pos + offset],
                    ));
                    self.advance_by(offset);
                    self.advance(); // the quote itself

                    if self.peek() == Some(b'\'') {
                        value.push('\'');
                        self.advance();
                    } else {
                        return TokenKind::Str { value, unicode };
                    }
                }
                None => {
                    while self.pos < self.src.len() {
                        self.advance();
                    }
                    return TokenKind::Error(format!(
                        "unterminated string literal starting at byte {start}"
                    ));
                }
            }
        }
    }

    /// Lex a `"..."` identifier, with `""` doubled-quote escapes.
    fn lex_double_quoted_id(&mut self) -> TokenKind {
        let start = self.pos;
        self.advance(); // skip opening "

        let mut value = String::new();
        loop {
            let remaining = &self.src[self.pos..];
            match memchr(b'"', remaining) {
                Some(offset) => {
                    value.push_str(&String::from_utf8_lossy(
                        &self.src[self.pos..self.pos + offset],
                    ));
                    self.advance_by(offset);
                    self.advance(); // the quote

                    if self.peek() == Some(b'"') {
                        value.push('"');
                        self.advance();
                    } else {
                        return TokenKind::QuotedId(value, QuoteStyle::Double);
                    }
                }
                None => {
                    while self.pos < self.src.len() {
                        self.advance();
                    }
                    return TokenKind::Error(format!(
                        "unterminated double-quoted identifier at byte {start}"
                    ));
                }
            }
        }
    }

    /// `"..."` as a string literal (QUOTED_IDENTIFIER OFF).
    fn lex_double_quoted_string(&mut self) -> TokenKind {
        let start = self.pos;
        self.advance(); // skip opening "

        let mut value = String::new();
        loop {
            let remaining = &self.src[self.pos..];
            match memchr(b'"', remaining) {
                Some(offset) => {
                    value.push_str(&String::from_utf8_lossy(
                        &self.src[self.pos..self.pos + offset],
                    ));
                    self.advance_by(offset);
                    self.advance(); // the quote

                    if self.peek() == Some(b'"') {
                        value.push('"');
                        self.advance();
                    } else {
                        return TokenKind::Str {
                            value,
                            unicode: false,
                        };
                    }
                }
                None => {
                    while self.pos < self.src.len() {
                        self.advance();
                    }
                    return TokenKind::Error(format!(
                        "unterminated string literal starting at byte {start}"
                    ));
                }
            }
        }
    }

    /// Lex a bracket-quoted identifier `[name]`, with `]]` escapes.
    fn lex_bracket_id(&mut self) -> TokenKind {
        let start = self.pos;
        self.advance(); // skip [

        let mut value = String::new();
        loop {
            let remaining = &self.src[self.pos..];
            match memchr(b']', remaining) {
                Some(offset) => {
                    value.push_str(&String::from_utf8_lossy(
                        &self.src[self.pos..self.pos + offset],
                    ));
                    self.advance_by(offset);
                    self.advance(); // the bracket

                    if self.peek() == Some(b']') {
                        value.push(']');
                        self.advance();
                    } else {
                        return TokenKind::QuotedId(value, QuoteStyle::Bracket);
                    }
                }
                None => {
                    while self.pos < self.src.len() {
                        self.advance();
                    }
                    return TokenKind::Error(format!(
                        "unterminated bracket identifier at byte {start}"
                    ));
                }
            }
        }
    }

    /// Lex a number: hex (`0x...`), integer, decimal, or scientific.
    /// Non-integer forms keep their source text so they round-trip exactly.
    fn lex_number(&mut self) -> TokenKind {
        let start = self.pos;

        // Hex/binary literal: kept raw, digits unvalidated beyond the set
        if self.src[self.pos] == b'0' && self.peek_at(1).is_some_and(|c| c == b'x' || c == b'X') {
            self.advance(); // 0
            self.advance(); // x
            while self.pos < self.src.len() && self.src[self.pos].is_ascii_hexdigit() {
                self.advance();
            }
            let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
            return TokenKind::Hex(text);
        }

        let mut is_decimal = false;

        while self.pos < self.src.len() && self.src[self.pos].is_ascii_digit() {
            self.advance();
        }

        // Fractional part; `123.` alone is still a decimal, but `123.name`
        // is an integer followed by a member access.
        if self.pos < self.src.len()
            && self.src[self.pos] == b'.'
            && !self
                .peek_at(1)
                .is_some_and(|c| c.is_ascii_alphabetic() || c == b'_' || c == b'[' || c == b'"')
        {
            is_decimal = true;
            self.advance(); // skip dot
            while self.pos < self.src.len() && self.src[self.pos].is_ascii_digit() {
                self.advance();
            }
        }

        if self.src[start] == b'.' {
            is_decimal = true;
        }

        // Exponent
        if self.pos < self.src.len() && (self.src[self.pos] == b'e' || self.src[self.pos] == b'E') {
            let next = self.peek_at(1);
            let exp_digits = match next {
                Some(b'+' | b'-') => self.peek_at(2).is_some_and(|c| c.is_ascii_digit()),
                Some(c) => c.is_ascii_digit(),
                None => false,
            };
            if exp_digits {
                is_decimal = true;
                self.advance(); // skip e/E
                if matches!(self.peek(), Some(b'+' | b'-')) {
                    self.advance();
                }
                while self.pos < self.src.len() && self.src[self.pos].is_ascii_digit() {
                    self.advance();
                }
            }
        }

        let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        if is_decimal {
            TokenKind::Numeric(text)
        } else {
            match text.parse::<i64>() {
                Ok(v) => TokenKind::Int(v),
                // Out-of-range integers survive as numerics; the magnitude is
                // a semantic concern, not a lexical one.
                Err(_) => TokenKind::Numeric(text),
            }
        }
    }

    /// Lex an identifier or reserved keyword. `#temp` and `##global` names
    /// lex as ordinary identifiers with the hashes included.
    fn lex_identifier(&mut self) -> TokenKind {
        let start = self.pos;
        self.advance(); // first character already validated

        while self.pos < self.src.len() {
            let ch = self.src[self.pos];
            if ch.is_ascii_alphanumeric() || ch == b'_' || ch == b'#' || ch == b'$' {
                self.advance();
            } else {
                break;
            }
        }

        let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();

        if let Some(kw) = TokenKind::lookup_keyword(&text) {
            TokenKind::Keyword(kw)
        } else {
            TokenKind::Ident(text)
        }
    }

    /// Lex `@name` or `@@name`.
    fn lex_at(&mut self) -> TokenKind {
        self.advance(); // skip @
        let system = self.peek() == Some(b'@');
        if system {
            self.advance(); // skip second @
        }

        let name_start = self.pos;
        while self.pos < self.src.len() {
            let ch = self.src[self.pos];
            if ch.is_ascii_alphanumeric() || ch == b'_' {
                self.advance();
            } else {
                break;
            }
        }
        if self.pos == name_start {
            return TokenKind::Error("empty variable name after '@'".to_owned());
        }
        let name = String::from_utf8_lossy(&self.src[name_start..self.pos]).into_owned();
        if system {
            TokenKind::SysVariable(name)
        } else {
            TokenKind::Variable(name)
        }
    }

    /// Lex `$` forms: money literals (`$12.50`) and pseudo-columns
    /// (`$PARTITION`, `$IDENTITY`, `$ROWGUID`).
    fn lex_dollar(&mut self) -> TokenKind {
        let start = self.pos;
        self.advance(); // skip $

        match self.peek() {
            Some(c) if c.is_ascii_digit() || c == b'.' => {
                while self.pos < self.src.len()
                    && (self.src[self.pos].is_ascii_digit() || self.src[self.pos] == b'.')
                {
                    self.advance();
                }
                let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
                TokenKind::Numeric(text)
            }
            Some(c) if c.is_ascii_alphabetic() || c == b'_' => {
                let name_start = self.pos;
                while self.pos < self.src.len() {
                    let ch = self.src[self.pos];
                    if ch.is_ascii_alphanumeric() || ch == b'_' {
                        self.advance();
                    } else {
                        break;
                    }
                }
                let name = String::from_utf8_lossy(&self.src[name_start..self.pos]).into_owned();
                TokenKind::DollarIdent(name)
            }
            _ => TokenKind::Error("unexpected '$'".to_owned()),
        }
    }

    // -----------------------------------------------------------------------
    // Multi-character operator tokenizers
    // -----------------------------------------------------------------------

    /// Lex a single-char operator or its `op=` compound-assignment form.
    fn lex_op_or_assign(&mut self, plain: TokenKind, assign: TokenKind) -> TokenKind {
        self.advance(); // skip the operator char
        if self.peek() == Some(b'=') {
            self.advance();
            assign
        } else {
            plain
        }
    }

    /// Lex `<`, `<=`, or `<>`.
    fn lex_lt(&mut self) -> TokenKind {
        self.advance(); // skip <
        match self.peek() {
            Some(b'=') => {
                self.advance();
                TokenKind::Le
            }
            Some(b'>') => {
                self.advance();
                TokenKind::Ne
            }
            _ => TokenKind::Lt,
        }
    }

    /// Lex `>` or `>=`.
    fn lex_gt(&mut self) -> TokenKind {
        self.advance(); // skip >
        if self.peek() == Some(b'=') {
            self.advance();
            TokenKind::Ge
        } else {
            TokenKind::Gt
        }
    }

    /// Lex `!=`, `!<`, or `!>`.
    fn lex_bang(&mut self) -> TokenKind {
        self.advance(); // skip !
        match self.peek() {
            Some(b'=') => {
                self.advance();
                TokenKind::Ne
            }
            Some(b'<') => {
                self.advance();
                TokenKind::NotLt
            }
            Some(b'>') => {
                self.advance();
                TokenKind::NotGt
            }
            _ => TokenKind::Error("unexpected '!', did you mean '!='?".to_owned()),
        }
    }

    /// Lex `:` or `::`.
    fn lex_colon(&mut self) -> TokenKind {
        self.advance(); // skip :
        if self.peek() == Some(b':') {
            self.advance();
            TokenKind::DoubleColon
        } else {
            TokenKind::Colon
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Kw;

    fn lex(src: &str) -> Vec<Token> {
        Lexer::tokenize(src)
    }

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex(src).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_integer_and_hex_literals() {
        let tokens = kinds("42 0 0x1A2B");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Int(42),
                TokenKind::Int(0),
                TokenKind::Hex("0x1A2B".to_owned()),
            ]
        );
    }

    #[test]
    fn test_lex_numeric_literals_preserve_text() {
        let tokens = kinds("3.14 1.5E-3 .5 12. 2E10");
        assert_eq!(tokens[0], TokenKind::Numeric("3.14".to_owned()));
        assert_eq!(tokens[1], TokenKind::Numeric("1.5E-3".to_owned()));
        assert_eq!(tokens[2], TokenKind::Numeric(".5".to_owned()));
        assert_eq!(tokens[3], TokenKind::Numeric("12.".to_owned()));
        assert_eq!(tokens[4], TokenKind::Numeric("2E10".to_owned()));
    }

    #[test]
    fn test_lex_money_literal() {
        let tokens = kinds("$4.99 $10");
        assert_eq!(tokens[0], TokenKind::Numeric("$4.99".to_owned()));
        assert_eq!(tokens[1], TokenKind::Numeric("$10".to_owned()));
    }

    #[test]
    fn test_lex_huge_integer_survives_as_numeric() {
        let tokens = kinds("99999999999999999999");
        assert_eq!(
            tokens[0],
            TokenKind::Numeric("99999999999999999999".to_owned())
        );
    }

    #[test]
    fn test_lex_string_literals() {
        let tokens = kinds("'hello' 'it''s' '' N'unicode'");
        assert_eq!(
            tokens[0],
            TokenKind::Str {
                value: "hello".to_owned(),
                unicode: false
            }
        );
        assert_eq!(
            tokens[1],
            TokenKind::Str {
                value: "it's".to_owned(),
                unicode: false
            }
        );
        assert_eq!(
            tokens[2],
            TokenKind::Str {
                value: String::new(),
                unicode: false
            }
        );
        assert_eq!(
            tokens[3],
            TokenKind::Str {
                value: "unicode".to_owned(),
                unicode: true
            }
        );
    }

    #[test]
    fn test_lex_n_not_followed_by_quote_is_identifier() {
        let tokens = kinds("Name N");
        assert_eq!(tokens[0], TokenKind::Ident("Name".to_owned()));
        assert_eq!(tokens[1], TokenKind::Ident("N".to_owned()));
    }

    #[test]
    fn test_lex_quoted_identifiers() {
        let tokens = kinds("[Order Details] \"Quoted\" [a]]b]");
        assert_eq!(
            tokens[0],
            TokenKind::QuotedId("Order Details".to_owned(), QuoteStyle::Bracket)
        );
        assert_eq!(
            tokens[1],
            TokenKind::QuotedId("Quoted".to_owned(), QuoteStyle::Double)
        );
        assert_eq!(
            tokens[2],
            TokenKind::QuotedId("a]b".to_owned(), QuoteStyle::Bracket)
        );
    }

    #[test]
    fn test_lex_quoted_identifier_off_makes_strings() {
        let tokens: Vec<TokenKind> = Lexer::tokenize_with(
            "\"hello\"",
            LexerOptions {
                quoted_identifier: false,
            },
        )
        .into_iter()
        .map(|t| t.kind)
        .collect();
        assert_eq!(
            tokens[0],
            TokenKind::Str {
                value: "hello".to_owned(),
                unicode: false
            }
        );
    }

    #[test]
    fn test_lex_variables() {
        let tokens = kinds("@x @@ROWCOUNT @_1");
        assert_eq!(tokens[0], TokenKind::Variable("x".to_owned()));
        assert_eq!(tokens[1], TokenKind::SysVariable("ROWCOUNT".to_owned()));
        assert_eq!(tokens[2], TokenKind::Variable("_1".to_owned()));
    }

    #[test]
    fn test_lex_dollar_pseudo_columns() {
        let tokens = kinds("$PARTITION $IDENTITY $ROWGUID");
        assert_eq!(tokens[0], TokenKind::DollarIdent("PARTITION".to_owned()));
        assert_eq!(tokens[1], TokenKind::DollarIdent("IDENTITY".to_owned()));
        assert_eq!(tokens[2], TokenKind::DollarIdent("ROWGUID".to_owned()));
    }

    #[test]
    fn test_lex_temp_table_names() {
        let tokens = kinds("#temp ##global");
        assert_eq!(tokens[0], TokenKind::Ident("#temp".to_owned()));
        assert_eq!(tokens[1], TokenKind::Ident("##global".to_owned()));
    }

    #[test]
    fn test_lex_keywords_case_insensitive() {
        let tokens = kinds("SELECT from Where MERGE");
        assert_eq!(tokens[0], TokenKind::Keyword(Kw::Select));
        assert_eq!(tokens[1], TokenKind::Keyword(Kw::From));
        assert_eq!(tokens[2], TokenKind::Keyword(Kw::Where));
        assert_eq!(tokens[3], TokenKind::Keyword(Kw::Merge));
    }

    #[test]
    fn test_lex_keyword_token_keeps_raw_text() {
        let tokens = lex("Select");
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Kw::Select));
        assert_eq!(tokens[0].text, "Select");
    }

    #[test]
    fn test_lex_operators() {
        let tokens = kinds("+ - * / % & | ^ ~ = < <= > >= != <> !< !> += -= *= /= %= :: .");
        let expected = vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::PercentOp,
            TokenKind::Ampersand,
            TokenKind::Pipe,
            TokenKind::Caret,
            TokenKind::Tilde,
            TokenKind::Eq,
            TokenKind::Lt,
            TokenKind::Le,
            TokenKind::Gt,
            TokenKind::Ge,
            TokenKind::Ne,
            TokenKind::Ne,
            TokenKind::NotLt,
            TokenKind::NotGt,
            TokenKind::PlusEq,
            TokenKind::MinusEq,
            TokenKind::StarEq,
            TokenKind::SlashEq,
            TokenKind::PercentEq,
            TokenKind::DoubleColon,
            TokenKind::Dot,
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_lex_error_unterminated_string() {
        let tokens = kinds("'hello");
        assert!(matches!(tokens[0], TokenKind::Error(_)));
    }

    #[test]
    fn test_lex_error_unterminated_block_comment() {
        let tokens = lex("SELECT 1 /* oops");
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Kw::Select));
        let last = tokens.last().unwrap();
        assert!(matches!(last.kind, TokenKind::Error(_)));
        assert_eq!((last.line, last.col), (1, 10));

        // An unclosed inner comment leaves the whole construct unterminated.
        let tokens = kinds("a /* outer /* inner */");
        assert_eq!(tokens[0], TokenKind::Ident("a".to_owned()));
        assert!(matches!(tokens[1], TokenKind::Error(_)));
    }

    #[test]
    fn test_lex_line_column_tracking() {
        let tokens = lex("SELECT\n  a,\n  b");
        assert_eq!((tokens[0].line, tokens[0].col), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].col), (2, 3));
        assert_eq!((tokens[2].line, tokens[2].col), (2, 4));
        assert_eq!((tokens[3].line, tokens[3].col), (3, 3));
    }

    #[test]
    fn test_lex_comments_skipped_and_nested() {
        let tokens = kinds("SELECT -- comment\n a /* outer /* inner */ still */ FROM b");
        assert_eq!(tokens[0], TokenKind::Keyword(Kw::Select));
        assert_eq!(tokens[1], TokenKind::Ident("a".to_owned()));
        assert_eq!(tokens[2], TokenKind::Keyword(Kw::From));
        assert_eq!(tokens[3], TokenKind::Ident("b".to_owned()));
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn test_lex_integer_dot_identifier_is_member_access() {
        // `1.value` must not lex the dot into a numeric literal
        let tokens = kinds("col.value");
        assert_eq!(tokens[0], TokenKind::Ident("col".to_owned()));
        assert_eq!(tokens[1], TokenKind::Dot);
        assert_eq!(tokens[2], TokenKind::Ident("value".to_owned()));
    }

    #[test]
    fn test_lex_spans_are_byte_offsets() {
        let tokens = lex("SELECT a");
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(7, 8));
    }
}
