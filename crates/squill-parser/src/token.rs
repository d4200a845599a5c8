//! Token types produced by the lexer.
//!
//! Every token carries a discriminant, its raw source text, and a byte-offset
//! [`Span`]. Reserved keywords get their own [`Kw`] variant for O(1) matching
//! in the parser; contextual keywords (`MATCHED`, `APPLY`, `PARTITION`, ...)
//! lex as plain identifiers and are recognized positionally by the parser, so
//! they remain usable as object names.

use squill_ast::{QuoteStyle, Span};

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token discriminant.
    pub kind: TokenKind,
    /// The raw source text, original casing preserved.
    pub text: String,
    /// Byte-offset span into the original source.
    pub span: Span,
    /// Line number (1-based) at the start of the token.
    pub line: u32,
    /// Column number (1-based) at the start of the token.
    pub col: u32,
}

/// Token discriminant.
///
/// Organized by category: literals, identifiers, variables, keywords,
/// operators, and punctuation.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // === Literals ===
    /// Integer literal: `42`.
    Int(i64),
    /// Decimal, money, or scientific literal, as written: `12.50`, `$4.99`,
    /// `1.5E-3`.
    Numeric(String),
    /// String literal; `unicode` is true for the `N'...'` form.
    Str { value: String, unicode: bool },
    /// Hex/binary literal as written: `0x1A2B`.
    Hex(String),

    // === Identifiers ===
    /// Unquoted identifier that is not a reserved keyword.
    Ident(String),
    /// `[bracketed]` or `"double-quoted"` identifier, quoting characters
    /// stripped and inner escapes resolved.
    QuotedId(String, QuoteStyle),
    /// `@name` batch variable (sigil stripped).
    Variable(String),
    /// `@@name` system variable (sigils stripped).
    SysVariable(String),
    /// `$NAME` pseudo-column/function head: `$PARTITION`, `$IDENTITY`,
    /// `$ROWGUID`.
    DollarIdent(String),

    // === Keywords ===
    Keyword(Kw),

    // === Operators ===
    Plus,
    Minus,
    Star,
    Slash,
    PercentOp,
    Ampersand,
    Pipe,
    Caret,
    Tilde,
    Eq,
    /// `<>` or `!=`, normalized.
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// `!<`
    NotLt,
    /// `!>`
    NotGt,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,

    // === Punctuation ===
    Dot,
    Comma,
    Semicolon,
    Colon,
    /// `::` scope-resolution (CLR static calls).
    DoubleColon,
    LeftParen,
    RightParen,

    /// Lexical error (unterminated string/comment, stray byte); the payload
    /// is the error message. The parser turns these into diagnostics.
    Error(String),
}

/// Reserved T-SQL keywords.
///
/// Only words that are reserved in the dialect appear here; everything else
/// (cursor options, `MATCHED`, `APPLY`, window-frame words, ...) lexes as an
/// identifier and is matched by text in the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kw {
    Add,
    All,
    Alter,
    And,
    Any,
    As,
    Asc,
    Authorization,
    Backup,
    Begin,
    Between,
    Break,
    Bulk,
    By,
    Cascade,
    Case,
    Cast,
    Check,
    Close,
    Clustered,
    Collate,
    Column,
    Commit,
    Constraint,
    Continue,
    Convert,
    Create,
    Cross,
    Current,
    Cursor,
    Database,
    Deallocate,
    Declare,
    Default,
    Delete,
    Desc,
    Distinct,
    Distributed,
    Drop,
    Else,
    End,
    Escape,
    Except,
    Exec,
    Execute,
    Exists,
    Fetch,
    For,
    Foreign,
    From,
    Full,
    Function,
    Goto,
    Group,
    Having,
    Identity,
    If,
    In,
    Index,
    Inner,
    Insert,
    Intersect,
    Into,
    Is,
    Join,
    Key,
    Left,
    Like,
    Merge,
    Nocheck,
    Nonclustered,
    Not,
    Null,
    Of,
    Off,
    On,
    Open,
    Option,
    Or,
    Order,
    Outer,
    Over,
    Percent,
    Pivot,
    Primary,
    Print,
    Proc,
    Procedure,
    Raiserror,
    References,
    Restore,
    Return,
    Revert,
    Right,
    Rollback,
    Rowguidcol,
    Save,
    Schema,
    Select,
    Set,
    Some,
    Table,
    Then,
    To,
    Top,
    Tran,
    Transaction,
    Trigger,
    Truncate,
    Union,
    Unique,
    Unpivot,
    Update,
    Use,
    User,
    Values,
    View,
    Waitfor,
    When,
    Where,
    While,
    With,
}

impl TokenKind {
    /// Map an identifier-shaped word to its reserved-keyword variant, if any.
    /// Matching is ASCII case-insensitive.
    #[must_use]
    pub fn lookup_keyword(s: &str) -> Option<Kw> {
        let upper = s.to_ascii_uppercase();
        let kw = match upper.as_str() {
            "ADD" => Kw::Add,
            "ALL" => Kw::All,
            "ALTER" => Kw::Alter,
            "AND" => Kw::And,
            "ANY" => Kw::Any,
            "AS" => Kw::As,
            "ASC" => Kw::Asc,
            "AUTHORIZATION" => Kw::Authorization,
            "BACKUP" => Kw::Backup,
            "BEGIN" => Kw::Begin,
            "BETWEEN" => Kw::Between,
            "BREAK" => Kw::Break,
            "BULK" => Kw::Bulk,
            "BY" => Kw::By,
            "CASCADE" => Kw::Cascade,
            "CASE" => Kw::Case,
            "CAST" => Kw::Cast,
            "CHECK" => Kw::Check,
            "CLOSE" => Kw::Close,
            "CLUSTERED" => Kw::Clustered,
            "COLLATE" => Kw::Collate,
            "COLUMN" => Kw::Column,
            "COMMIT" => Kw::Commit,
            "CONSTRAINT" => Kw::Constraint,
            "CONTINUE" => Kw::Continue,
            "CONVERT" => Kw::Convert,
            "CREATE" => Kw::Create,
            "CROSS" => Kw::Cross,
            "CURRENT" => Kw::Current,
            "CURSOR" => Kw::Cursor,
            "DATABASE" => Kw::Database,
            "DEALLOCATE" => Kw::Deallocate,
            "DECLARE" => Kw::Declare,
            "DEFAULT" => Kw::Default,
            "DELETE" => Kw::Delete,
            "DESC" => Kw::Desc,
            "DISTINCT" => Kw::Distinct,
            "DISTRIBUTED" => Kw::Distributed,
            "DROP" => Kw::Drop,
            "ELSE" => Kw::Else,
            "END" => Kw::End,
            "ESCAPE" => Kw::Escape,
            "EXCEPT" => Kw::Except,
            "EXEC" => Kw::Exec,
            "EXECUTE" => Kw::Execute,
            "EXISTS" => Kw::Exists,
            "FETCH" => Kw::Fetch,
            "FOR" => Kw::For,
            "FOREIGN" => Kw::Foreign,
            "FROM" => Kw::From,
            "FULL" => Kw::Full,
            "FUNCTION" => Kw::Function,
            "GOTO" => Kw::Goto,
            "GROUP" => Kw::Group,
            "HAVING" => Kw::Having,
            "IDENTITY" => Kw::Identity,
            "IF" => Kw::If,
            "IN" => Kw::In,
            "INDEX" => Kw::Index,
            "INNER" => Kw::Inner,
            "INSERT" => Kw::Insert,
            "INTERSECT" => Kw::Intersect,
            "INTO" => Kw::Into,
            "IS" => Kw::Is,
            "JOIN" => Kw::Join,
            "KEY" => Kw::Key,
            "LEFT" => Kw::Left,
            "LIKE" => Kw::Like,
            "MERGE" => Kw::Merge,
            "NOCHECK" => Kw::Nocheck,
            "NONCLUSTERED" => Kw::Nonclustered,
            "NOT" => Kw::Not,
            "NULL" => Kw::Null,
            "OF" => Kw::Of,
            "OFF" => Kw::Off,
            "ON" => Kw::On,
            "OPEN" => Kw::Open,
            "OPTION" => Kw::Option,
            "OR" => Kw::Or,
            "ORDER" => Kw::Order,
            "OUTER" => Kw::Outer,
            "OVER" => Kw::Over,
            "PERCENT" => Kw::Percent,
            "PIVOT" => Kw::Pivot,
            "PRIMARY" => Kw::Primary,
            "PRINT" => Kw::Print,
            "PROC" => Kw::Proc,
            "PROCEDURE" => Kw::Procedure,
            "RAISERROR" => Kw::Raiserror,
            "REFERENCES" => Kw::References,
            "RESTORE" => Kw::Restore,
            "RETURN" => Kw::Return,
            "REVERT" => Kw::Revert,
            "RIGHT" => Kw::Right,
            "ROLLBACK" => Kw::Rollback,
            "ROWGUIDCOL" => Kw::Rowguidcol,
            "SAVE" => Kw::Save,
            "SCHEMA" => Kw::Schema,
            "SELECT" => Kw::Select,
            "SET" => Kw::Set,
            "SOME" => Kw::Some,
            "TABLE" => Kw::Table,
            "THEN" => Kw::Then,
            "TO" => Kw::To,
            "TOP" => Kw::Top,
            "TRAN" => Kw::Tran,
            "TRANSACTION" => Kw::Transaction,
            "TRIGGER" => Kw::Trigger,
            "TRUNCATE" => Kw::Truncate,
            "UNION" => Kw::Union,
            "UNIQUE" => Kw::Unique,
            "UNPIVOT" => Kw::Unpivot,
            "UPDATE" => Kw::Update,
            "USE" => Kw::Use,
            "USER" => Kw::User,
            "VALUES" => Kw::Values,
            "VIEW" => Kw::View,
            "WAITFOR" => Kw::Waitfor,
            "WHEN" => Kw::When,
            "WHERE" => Kw::Where,
            "WHILE" => Kw::While,
            "WITH" => Kw::With,
            _ => return None,
        };
        Some(kw)
    }

    /// Whether this token can begin a statement. Used by error recovery to
    /// find the next synchronization point.
    #[must_use]
    pub fn is_statement_start(&self) -> bool {
        let Self::Keyword(kw) = self else {
            return false;
        };
        matches!(
            kw,
            Kw::Select
                | Kw::Insert
                | Kw::Bulk
                | Kw::Update
                | Kw::Delete
                | Kw::Merge
                | Kw::Truncate
                | Kw::Create
                | Kw::Alter
                | Kw::Drop
                | Kw::Declare
                | Kw::Set
                | Kw::If
                | Kw::While
                | Kw::Begin
                | Kw::Commit
                | Kw::Rollback
                | Kw::Save
                | Kw::Goto
                | Kw::Break
                | Kw::Continue
                | Kw::Return
                | Kw::Waitfor
                | Kw::Open
                | Kw::Fetch
                | Kw::Close
                | Kw::Deallocate
                | Kw::Exec
                | Kw::Execute
                | Kw::Revert
                | Kw::Print
                | Kw::Raiserror
                | Kw::Use
                | Kw::Backup
                | Kw::Restore
                | Kw::With
        )
    }
}

impl Token {
    /// Whether the token is an identifier (quoted or not) or a reserved
    /// keyword whose raw text equals `word`, ASCII case-insensitively.
    /// This is how contextual keywords are recognized.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        match &self.kind {
            TokenKind::Ident(s) => s.eq_ignore_ascii_case(word),
            TokenKind::Keyword(_) => self.text.eq_ignore_ascii_case(word),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_keyword_case_insensitive() {
        assert_eq!(TokenKind::lookup_keyword("select"), Some(Kw::Select));
        assert_eq!(TokenKind::lookup_keyword("SELECT"), Some(Kw::Select));
        assert_eq!(TokenKind::lookup_keyword("SeLeCt"), Some(Kw::Select));
        assert_eq!(TokenKind::lookup_keyword("matched"), None);
        assert_eq!(TokenKind::lookup_keyword("apply"), None);
    }

    #[test]
    fn test_contextual_keywords_are_not_reserved() {
        for word in ["PARTITION", "MATCHED", "OUTPUT", "APPLY", "THROW", "TRY"] {
            assert_eq!(TokenKind::lookup_keyword(word), None, "{word}");
        }
    }

    #[test]
    fn test_is_statement_start() {
        assert!(TokenKind::Keyword(Kw::Select).is_statement_start());
        assert!(TokenKind::Keyword(Kw::Merge).is_statement_start());
        assert!(!TokenKind::Keyword(Kw::From).is_statement_start());
        assert!(!TokenKind::Ident("foo".to_owned()).is_statement_start());
    }

    #[test]
    fn test_is_word_matches_idents_and_keywords() {
        let tok = Token {
            kind: TokenKind::Ident("Matched".to_owned()),
            text: "Matched".to_owned(),
            span: Span::ZERO,
            line: 1,
            col: 1,
        };
        assert!(tok.is_word("MATCHED"));
        assert!(!tok.is_word("SOURCE"));
    }
}
