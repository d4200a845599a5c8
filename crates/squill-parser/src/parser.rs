//! Statement parsing.
//!
//! Hand-written recursive descent over one batch's token stream. Expression
//! parsing lives in expr.rs. Errors inside a statement are recorded as
//! diagnostics and recovery skips to the next statement boundary; statement
//! forms outside the grammar are preserved as [`StatementKind::Unrecognized`]
//! rather than discarded.

use squill_ast::{
    AlterTableAction, AlterTableStatement, AssignOp, Assignment, AssignmentTarget, BackupDevice,
    BackupDeviceKind, BackupStatement, BulkInsertStatement, ColumnConstraint, ColumnConstraintKind,
    ColumnDef, CreateFunctionStatement, CreateIndexStatement, CreatePartitionFunctionStatement,
    CreatePartitionSchemeStatement, CreateProcedureStatement, CreateSchemaStatement,
    CreateSecurityPolicyStatement, CreateSequenceStatement, CreateSynonymStatement,
    CreateTableStatement, CreateTriggerStatement, CreateTypeStatement, CreateViewStatement,
    CursorOptions, Cte, DeclareCursorStatement, DeclareStatement, DeclareType, DeleteStatement,
    DmlTarget, DropStatement, ExecuteArg, ExecuteAsStatement, ExecuteContext, ExecuteStatement,
    ExecuteTarget, Expr, FetchDirection, FetchStatement, FkAction, ForClause, ForeignKeyClause,
    FunctionBody, FunctionReturns, Ident, IfStatement, IndexColumn, InsertSource,
    InsertStatement, JoinKind, JsonMode, Literal, MergeAction, MergeClause, MergeInsertSource,
    MergeStatement, MergeWhen, ObjectName, ObjectType, OffsetFetch, OnClause, OptionState,
    OptionValue, OutputClause, RaiserrorStatement, RestoreKind, RestoreStatement,
    ResultSetsClause, RoutineParam, SchemaColumn, SecurityPredicate, SecurityPredicateKind,
    SelectBody, SelectCore, SelectItem, SelectStatement, SetOperator, SetOptionStatement,
    SetVariableStatement, Span, SqlOption, Statement, StatementKind, TableConstraint,
    TableConstraintKind, TableSource, ThrowArgs, TopClause, TriggerEvent, TriggerTiming,
    TryCatchStatement, TypeDefinition, UpdateStatement, VariableDeclaration, WaitforStatement,
    WhereClause, WhileStatement, WithClause, XmlMode,
};

use crate::diag::{Diagnostic, DiagnosticKind, Severity, SyntaxError};
use crate::lexer::Lexer;
use crate::token::{Kw, Token, TokenKind};

/// Statement parser over one batch's tokens.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Original script text, for `Unrecognized` raw slices.
    source: String,
    diags: Vec<Diagnostic>,
}

impl Parser {
    #[must_use]
    pub fn new(tokens: Vec<Token>, source: impl Into<String>) -> Self {
        Self {
            tokens,
            pos: 0,
            source: source.into(),
            diags: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_sql(sql: &str) -> Self {
        Self::new(Lexer::tokenize(sql), sql)
    }

    /// Parse every statement in the token stream. Never fails: problems
    /// surface as diagnostics alongside whatever parsed.
    pub fn parse_statements(&mut self) -> (Vec<Statement>, Vec<Diagnostic>) {
        let mut stmts: Vec<Statement> = Vec::new();
        while !self.at_end() {
            if self.eat(&TokenKind::Semicolon) {
                // A stray `;` terminates the statement before it.
                if let Some(last) = stmts.last_mut() {
                    last.terminated = true;
                }
                continue;
            }
            if let Some(TokenKind::Error(msg)) = self.peek_kind() {
                let msg = msg.clone();
                let tok = self.tokens[self.pos].clone();
                self.diags.push(Diagnostic {
                    kind: DiagnosticKind::Lex,
                    severity: Severity::Error,
                    message: msg,
                    span: tok.span,
                    line: tok.line,
                    col: tok.col,
                });
                self.pos += 1;
                continue;
            }
            match self.parse_statement() {
                Ok(stmt) => {
                    self.check_leading_with_ambiguity(&stmt, stmts.last());
                    stmts.push(stmt);
                }
                Err(e) => {
                    self.diags
                        .push(Diagnostic::error(DiagnosticKind::Syntax, e));
                    self.synchronize();
                }
            }
        }
        (stmts, std::mem::take(&mut self.diags))
    }

    /// Parse a single statement, including its optional `;` terminator.
    pub fn parse_statement(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current_span();
        let kind = self.parse_statement_kind()?;
        let terminated = self.eat(&TokenKind::Semicolon);
        let span = start.merge(self.prev_span());

        // MERGE requires the terminator; the statement is still kept.
        if matches!(kind, StatementKind::Merge(_)) && !terminated {
            let (line, col) = self.line_col_at(span.start);
            self.diags.push(Diagnostic {
                kind: DiagnosticKind::MissingTerminator,
                severity: Severity::Error,
                message: "MERGE statement must be terminated with a semicolon".to_owned(),
                span,
                line,
                col,
            });
        }

        Ok(Statement {
            kind,
            span,
            terminated,
        })
    }

    /// A statement starting with `WITH` directly after an unterminated
    /// statement is the classic CTE ambiguity.
    fn check_leading_with_ambiguity(&mut self, stmt: &Statement, prev: Option<&Statement>) {
        let starts_with_cte = matches!(
            &stmt.kind,
            StatementKind::Select(s) if s.with.is_some()
        );
        if !starts_with_cte {
            return;
        }
        if let Some(prev) = prev {
            if !prev.terminated {
                let (line, col) = self.line_col_at(stmt.span.start);
                self.diags.push(Diagnostic {
                    kind: DiagnosticKind::AmbiguousConstruct,
                    severity: Severity::Warning,
                    message:
                        "statement before WITH is not terminated; the CTE may bind unexpectedly"
                            .to_owned(),
                    span: stmt.span,
                    line,
                    col,
                });
            }
        }
    }

    /// 1-based line and column of a byte offset in the source.
    fn line_col_at(&self, offset: u32) -> (u32, u32) {
        let upto = &self.source[..(offset as usize).min(self.source.len())];
        let line = upto.bytes().filter(|&b| b == b'\n').count() as u32 + 1;
        let col = (upto.len() - upto.rfind('\n').map_or(0, |i| i + 1)) as u32 + 1;
        (line, col)
    }

    #[allow(clippy::too_many_lines)]
    fn parse_statement_kind(&mut self) -> Result<StatementKind, SyntaxError> {
        let Some(kind) = self.peek_kind() else {
            return Err(self.err_expected("statement"));
        };

        match kind {
            TokenKind::Keyword(Kw::Select) | TokenKind::Keyword(Kw::With) => {
                Ok(StatementKind::Select(self.parse_select_statement()?))
            }
            TokenKind::Keyword(Kw::Insert) => Ok(StatementKind::Insert(self.parse_insert()?)),
            TokenKind::Keyword(Kw::Bulk) => {
                Ok(StatementKind::BulkInsert(self.parse_bulk_insert()?))
            }
            TokenKind::Keyword(Kw::Update) => Ok(StatementKind::Update(self.parse_update()?)),
            TokenKind::Keyword(Kw::Delete) => Ok(StatementKind::Delete(self.parse_delete()?)),
            TokenKind::Keyword(Kw::Merge) => Ok(StatementKind::Merge(self.parse_merge()?)),
            TokenKind::Keyword(Kw::Truncate) => {
                self.advance();
                self.expect_kw(Kw::Table)?;
                Ok(StatementKind::Truncate(self.parse_object_name()?))
            }
            TokenKind::Keyword(Kw::Create) => self.parse_create(),
            TokenKind::Keyword(Kw::Alter) => self.parse_alter(),
            TokenKind::Keyword(Kw::Drop) => Ok(StatementKind::Drop(self.parse_drop()?)),
            TokenKind::Keyword(Kw::Declare) => self.parse_declare(),
            TokenKind::Keyword(Kw::Set) => self.parse_set(),
            TokenKind::Keyword(Kw::If) => Ok(StatementKind::If(self.parse_if()?)),
            TokenKind::Keyword(Kw::While) => Ok(StatementKind::While(self.parse_while()?)),
            TokenKind::Keyword(Kw::Begin) => self.parse_begin(),
            TokenKind::Keyword(Kw::Commit) => {
                self.advance();
                let _ = self.eat_kw(Kw::Tran) || self.eat_kw(Kw::Transaction);
                let name = self.try_ident();
                Ok(StatementKind::CommitTransaction { name })
            }
            TokenKind::Keyword(Kw::Rollback) => {
                self.advance();
                let _ = self.eat_kw(Kw::Tran) || self.eat_kw(Kw::Transaction);
                let name = self.try_ident();
                Ok(StatementKind::RollbackTransaction { name })
            }
            TokenKind::Keyword(Kw::Save) => {
                self.advance();
                if !(self.eat_kw(Kw::Tran) || self.eat_kw(Kw::Transaction)) {
                    return Err(self.err_expected("TRANSACTION"));
                }
                Ok(StatementKind::SaveTransaction(self.parse_ident()?))
            }
            TokenKind::Keyword(Kw::Goto) => {
                self.advance();
                Ok(StatementKind::Goto(self.parse_ident()?))
            }
            TokenKind::Keyword(Kw::Break) => {
                self.advance();
                Ok(StatementKind::Break)
            }
            TokenKind::Keyword(Kw::Continue) => {
                self.advance();
                Ok(StatementKind::Continue)
            }
            TokenKind::Keyword(Kw::Return) => {
                self.advance();
                let value = if self.at_statement_boundary() {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                Ok(StatementKind::Return(value))
            }
            TokenKind::Keyword(Kw::Waitfor) => {
                self.advance();
                if self.eat_word("DELAY") {
                    Ok(StatementKind::Waitfor(WaitforStatement::Delay(
                        self.parse_expr()?,
                    )))
                } else if self.eat_word("TIME") {
                    Ok(StatementKind::Waitfor(WaitforStatement::Time(
                        self.parse_expr()?,
                    )))
                } else {
                    Err(self.err_expected("DELAY or TIME"))
                }
            }
            TokenKind::Keyword(Kw::Open) => {
                self.advance();
                Ok(StatementKind::OpenCursor(self.parse_object_name()?))
            }
            TokenKind::Keyword(Kw::Fetch) => Ok(StatementKind::FetchCursor(self.parse_fetch()?)),
            TokenKind::Keyword(Kw::Close) => {
                self.advance();
                Ok(StatementKind::CloseCursor(self.parse_object_name()?))
            }
            TokenKind::Keyword(Kw::Deallocate) => {
                self.advance();
                Ok(StatementKind::DeallocateCursor(self.parse_object_name()?))
            }
            TokenKind::Keyword(Kw::Exec | Kw::Execute) => self.parse_exec(),
            TokenKind::Keyword(Kw::Revert) => {
                self.advance();
                Ok(StatementKind::Revert)
            }
            TokenKind::Keyword(Kw::Print) => {
                self.advance();
                Ok(StatementKind::Print(self.parse_expr()?))
            }
            TokenKind::Keyword(Kw::Raiserror) => {
                Ok(StatementKind::Raiserror(self.parse_raiserror()?))
            }
            TokenKind::Keyword(Kw::Use) => {
                self.advance();
                Ok(StatementKind::Use(self.parse_ident()?))
            }
            TokenKind::Keyword(Kw::Backup) => {
                Ok(StatementKind::BackupDatabase(self.parse_backup()?))
            }
            TokenKind::Keyword(Kw::Restore) => {
                Ok(StatementKind::RestoreDatabase(self.parse_restore()?))
            }
            TokenKind::Ident(s) if s.eq_ignore_ascii_case("THROW") => self.parse_throw(),
            TokenKind::Ident(_)
                if matches!(self.peek_nth_kind(1), Some(TokenKind::Colon)) =>
            {
                let label = self.parse_ident()?;
                self.expect(&TokenKind::Colon)?;
                Ok(StatementKind::Label(label))
            }
            _ => Ok(self.parse_unrecognized()),
        }
    }

    /// Consume an unsupported statement through its recovery point and keep
    /// the raw text.
    fn parse_unrecognized(&mut self) -> StatementKind {
        let start = self.current_span().start as usize;
        let mut end = start;
        let mut depth = 0u32;
        let first_line = self.tokens.get(self.pos).map_or(0, |t| t.line);
        let first_col = self.tokens.get(self.pos).map_or(0, |t| t.col);
        let first_span = self.current_span();
        let mut prev_line = first_line;

        while let Some(tok) = self.tokens.get(self.pos) {
            match &tok.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth = depth.saturating_sub(1),
                TokenKind::Semicolon if depth == 0 => break,
                // A statement keyword can legally appear inside the statement
                // (`GRANT SELECT ON ...`); only treat it as the start of the
                // next statement when it opens a new line.
                k if depth == 0
                    && k.is_statement_start()
                    && tok.span.start as usize > start
                    && tok.line > prev_line =>
                {
                    break;
                }
                _ => {}
            }
            end = tok.span.end as usize;
            prev_line = tok.line;
            self.pos += 1;
        }

        let sql = self.source[start..end].to_owned();
        self.diags.push(Diagnostic {
            kind: DiagnosticKind::UnrecognizedStatement,
            severity: Severity::Warning,
            message: format!(
                "unrecognized statement kept as raw text: {}",
                sql.split_whitespace().next().unwrap_or("")
            ),
            span: first_span,
            line: first_line,
            col: first_col,
        });
        StatementKind::Unrecognized { sql }
    }

    // -----------------------------------------------------------------------
    // Token navigation
    // -----------------------------------------------------------------------

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    pub(crate) fn peek_nth_kind(&self, n: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + n).map(|t| &t.kind)
    }

    pub(crate) fn peek_nth_token(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n)
    }

    pub(crate) fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    pub(crate) fn advance_token(&mut self) -> Result<Token, SyntaxError> {
        let Some(tok) = self.tokens.get(self.pos).cloned() else {
            return Err(self.err_expected("token"));
        };
        self.pos += 1;
        Ok(tok)
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind()
            .is_some_and(|k| std::mem::discriminant(k) == std::mem::discriminant(kind))
    }

    pub(crate) fn check_kw(&self, kw: Kw) -> bool {
        matches!(self.peek_kind(), Some(TokenKind::Keyword(k)) if *k == kw)
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_kw(&mut self, kw: Kw) -> bool {
        if self.check_kw(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> Result<Span, SyntaxError> {
        if self.check(kind) {
            let sp = self.current_span();
            self.advance();
            Ok(sp)
        } else {
            Err(self.err_expected(&format!("{kind:?}")))
        }
    }

    pub(crate) fn expect_kw(&mut self, kw: Kw) -> Result<Span, SyntaxError> {
        if self.check_kw(kw) {
            let sp = self.current_span();
            self.advance();
            Ok(sp)
        } else {
            Err(self.err_expected(&format!("{kw:?}").to_uppercase()))
        }
    }

    /// Contextual-keyword check: current token spells `word`.
    pub(crate) fn at_word(&self, word: &str) -> bool {
        self.tokens.get(self.pos).is_some_and(|t| t.is_word(word))
    }

    pub(crate) fn eat_word(&mut self, word: &str) -> bool {
        if self.at_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_word(&mut self, word: &str) -> Result<(), SyntaxError> {
        if self.eat_word(word) {
            Ok(())
        } else {
            Err(self.err_expected(word))
        }
    }

    pub(crate) fn current_span(&self) -> Span {
        self.tokens.get(self.pos).map_or(Span::ZERO, |t| t.span)
    }

    pub(crate) fn prev_span(&self) -> Span {
        if self.pos == 0 {
            return Span::ZERO;
        }
        self.tokens
            .get(self.pos - 1)
            .map_or(Span::ZERO, |t| t.span)
    }

    pub(crate) fn err_expected(&self, what: &str) -> SyntaxError {
        SyntaxError::at(format!("expected {what}"), self.tokens.get(self.pos))
    }

    pub(crate) fn err_msg(&self, msg: impl Into<String>) -> SyntaxError {
        SyntaxError::at(msg, self.tokens.get(self.pos))
    }

    fn at_statement_boundary(&self) -> bool {
        match self.peek_kind() {
            None => true,
            Some(TokenKind::Semicolon) => true,
            Some(k) => k.is_statement_start(),
        }
    }

    fn synchronize(&mut self) {
        loop {
            match self.peek_kind() {
                None => return,
                Some(TokenKind::Semicolon) => {
                    self.advance();
                    return;
                }
                Some(k) if k.is_statement_start() => return,
                _ => self.advance(),
            }
        }
    }

    // -----------------------------------------------------------------------
    // Identifiers and names
    // -----------------------------------------------------------------------

    pub(crate) fn parse_ident(&mut self) -> Result<Ident, SyntaxError> {
        match self.peek_kind() {
            Some(TokenKind::Ident(_)) => {
                let tok = self.advance_token()?;
                Ok(Ident::new(tok.text))
            }
            Some(TokenKind::QuotedId(value, quote)) => {
                let value = value.clone();
                let quote = *quote;
                self.advance();
                Ok(Ident {
                    value,
                    quote: Some(quote),
                })
            }
            _ => Err(self.err_expected("identifier")),
        }
    }

    fn try_ident(&mut self) -> Option<Ident> {
        if matches!(
            self.peek_kind(),
            Some(TokenKind::Ident(_) | TokenKind::QuotedId(..))
        ) {
            self.parse_ident().ok()
        } else {
            None
        }
    }

    pub(crate) fn parse_object_name(&mut self) -> Result<ObjectName, SyntaxError> {
        let mut parts = vec![self.parse_ident()?];
        while self.eat(&TokenKind::Dot) {
            parts.push(self.parse_ident()?);
        }
        Ok(ObjectName { parts })
    }

    pub(crate) fn parse_variable_name(&mut self) -> Result<String, SyntaxError> {
        match self.peek_kind() {
            Some(TokenKind::Variable(name)) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.err_expected("@variable")),
        }
    }

    pub(crate) fn parse_comma_sep<T>(
        &mut self,
        f: fn(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<Vec<T>, SyntaxError> {
        let mut items = vec![f(self)?];
        while self.eat(&TokenKind::Comma) {
            items.push(f(self)?);
        }
        Ok(items)
    }

    fn parse_paren_ident_list(&mut self) -> Result<Vec<Ident>, SyntaxError> {
        self.expect(&TokenKind::LeftParen)?;
        let idents = self.parse_comma_sep(Self::parse_ident)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(idents)
    }

    // -----------------------------------------------------------------------
    // SELECT
    // -----------------------------------------------------------------------

    pub(crate) fn at_select_start(&self) -> bool {
        matches!(
            self.peek_kind(),
            Some(TokenKind::Keyword(Kw::Select | Kw::With))
        )
    }

    pub(crate) fn parse_select_statement(&mut self) -> Result<SelectStatement, SyntaxError> {
        let with = if self.check_kw(Kw::With) {
            Some(self.parse_with_clause()?)
        } else {
            None
        };

        let body = self.parse_select_body()?;

        let mut order_by = Vec::new();
        if self.eat_kw(Kw::Order) {
            self.expect_kw(Kw::By)?;
            order_by = self.parse_comma_sep(Self::parse_order_by_item)?;
        }

        let offset_fetch = if self.at_word("OFFSET") {
            Some(self.parse_offset_fetch()?)
        } else {
            None
        };

        let for_clause = if self.check_kw(Kw::For)
            && self
                .peek_nth_token(1)
                .is_some_and(|t| t.is_word("XML") || t.is_word("JSON"))
        {
            self.advance();
            Some(self.parse_for_clause()?)
        } else {
            None
        };

        Ok(SelectStatement {
            with,
            body,
            order_by,
            offset_fetch,
            for_clause,
        })
    }

    fn parse_with_clause(&mut self) -> Result<WithClause, SyntaxError> {
        self.expect_kw(Kw::With)?;
        let ctes = self.parse_comma_sep(Self::parse_cte)?;
        Ok(WithClause { ctes })
    }

    fn parse_cte(&mut self) -> Result<Cte, SyntaxError> {
        let name = self.parse_ident()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_paren_ident_list()?
        } else {
            Vec::new()
        };
        self.expect_kw(Kw::As)?;
        self.expect(&TokenKind::LeftParen)?;
        let query = self.parse_select_statement()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Cte {
            name,
            columns,
            query,
        })
    }

    fn parse_select_body(&mut self) -> Result<SelectBody, SyntaxError> {
        let mut body = SelectBody::Core(Box::new(self.parse_select_core()?));
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Keyword(Kw::Union)) => {
                    self.advance();
                    SetOperator::Union {
                        all: self.eat_kw(Kw::All),
                    }
                }
                Some(TokenKind::Keyword(Kw::Except)) => {
                    self.advance();
                    SetOperator::Except
                }
                Some(TokenKind::Keyword(Kw::Intersect)) => {
                    self.advance();
                    SetOperator::Intersect
                }
                _ => break,
            };
            let right = SelectBody::Core(Box::new(self.parse_select_core()?));
            body = SelectBody::SetOp {
                left: Box::new(body),
                op,
                right: Box::new(right),
            };
        }
        Ok(body)
    }

    fn parse_select_core(&mut self) -> Result<SelectCore, SyntaxError> {
        self.expect_kw(Kw::Select)?;

        let top = if self.check_kw(Kw::Top) {
            Some(self.parse_top_clause()?)
        } else {
            None
        };

        let distinct = if self.eat_kw(Kw::Distinct) {
            true
        } else {
            let _ = self.eat_kw(Kw::All);
            false
        };

        let items = self.parse_comma_sep(Self::parse_select_item)?;

        let into = if self.eat_kw(Kw::Into) {
            Some(self.parse_object_name()?)
        } else {
            None
        };

        let from = if self.eat_kw(Kw::From) {
            self.parse_comma_sep(Self::parse_table_source)?
        } else {
            Vec::new()
        };

        let where_clause = if self.eat_kw(Kw::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let mut group_by = Vec::new();
        if self.eat_kw(Kw::Group) {
            self.expect_kw(Kw::By)?;
            group_by = self.parse_comma_sep(Self::parse_expr)?;
        }

        let having = if self.eat_kw(Kw::Having) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Ok(SelectCore {
            top,
            distinct,
            items,
            into,
            from,
            where_clause,
            group_by,
            having,
        })
    }

    fn parse_top_clause(&mut self) -> Result<TopClause, SyntaxError> {
        self.expect_kw(Kw::Top)?;
        let quantity = if self.eat(&TokenKind::LeftParen) {
            let e = self.parse_expr()?;
            self.expect(&TokenKind::RightParen)?;
            e
        } else {
            self.parse_expr_bp(crate::expr::bp::UNARY)?
        };
        let percent = self.eat_kw(Kw::Percent);
        let with_ties = if self.check_kw(Kw::With)
            && self.peek_nth_token(1).is_some_and(|t| t.is_word("TIES"))
        {
            self.advance();
            self.advance();
            true
        } else {
            false
        };
        Ok(TopClause {
            quantity,
            percent,
            with_ties,
        })
    }

    fn parse_select_item(&mut self) -> Result<SelectItem, SyntaxError> {
        if self.eat(&TokenKind::Star) {
            return Ok(SelectItem::Wildcard);
        }

        // `alias.*` requires lookahead past the dotted name.
        if matches!(
            self.peek_kind(),
            Some(TokenKind::Ident(_) | TokenKind::QuotedId(..))
        ) {
            let mut n = 1;
            while matches!(self.peek_nth_kind(n), Some(TokenKind::Dot)) {
                if matches!(self.peek_nth_kind(n + 1), Some(TokenKind::Star)) {
                    let mut parts = vec![self.parse_ident()?];
                    while self.check(&TokenKind::Dot)
                        && !matches!(self.peek_nth_kind(1), Some(TokenKind::Star))
                    {
                        self.advance();
                        parts.push(self.parse_ident()?);
                    }
                    self.expect(&TokenKind::Dot)?;
                    self.expect(&TokenKind::Star)?;
                    return Ok(SelectItem::QualifiedWildcard(ObjectName { parts }));
                }
                if matches!(
                    self.peek_nth_kind(n + 1),
                    Some(TokenKind::Ident(_) | TokenKind::QuotedId(..))
                ) {
                    n += 2;
                } else {
                    break;
                }
            }
        }

        let expr = self.parse_expr()?;
        let alias = if self.eat_kw(Kw::As) {
            Some(self.parse_ident()?)
        } else {
            self.try_ident()
        };
        Ok(SelectItem::Expr { expr, alias })
    }

    fn parse_offset_fetch(&mut self) -> Result<OffsetFetch, SyntaxError> {
        self.expect_word("OFFSET")?;
        let offset = self.parse_expr()?;
        if !(self.eat_word("ROWS") || self.eat_word("ROW")) {
            return Err(self.err_expected("ROWS"));
        }
        let fetch = if self.eat_kw(Kw::Fetch) {
            if !(self.eat_word("NEXT") || self.eat_word("FIRST")) {
                return Err(self.err_expected("NEXT or FIRST"));
            }
            let n = self.parse_expr()?;
            if !(self.eat_word("ROWS") || self.eat_word("ROW")) {
                return Err(self.err_expected("ROWS"));
            }
            self.expect_word("ONLY")?;
            Some(n)
        } else {
            None
        };
        Ok(OffsetFetch { offset, fetch })
    }

    fn parse_for_clause(&mut self) -> Result<ForClause, SyntaxError> {
        if self.eat_word("XML") {
            let mode = if self.eat_word("RAW") {
                XmlMode::Raw
            } else if self.eat_word("AUTO") {
                XmlMode::Auto
            } else if self.eat_word("PATH") {
                XmlMode::Path
            } else if self.eat_word("EXPLICIT") {
                XmlMode::Explicit
            } else {
                return Err(self.err_expected("RAW, AUTO, PATH, or EXPLICIT"));
            };
            // PATH('row') / RAW('x') element name argument.
            let element = if self.eat(&TokenKind::LeftParen) {
                let tok = self.advance_token()?;
                let TokenKind::Str { value, .. } = tok.kind else {
                    return Err(SyntaxError {
                        message: "expected element name string".to_owned(),
                        span: tok.span,
                        line: tok.line,
                        col: tok.col,
                    });
                };
                self.expect(&TokenKind::RightParen)?;
                Some(value)
            } else {
                None
            };
            let mut options = Vec::new();
            while self.eat(&TokenKind::Comma) {
                options.push(self.parse_for_option()?);
            }
            Ok(ForClause::Xml {
                mode,
                element,
                options,
            })
        } else {
            self.expect_word("JSON")?;
            let mode = if self.eat_word("AUTO") {
                JsonMode::Auto
            } else if self.eat_word("PATH") {
                JsonMode::Path
            } else {
                return Err(self.err_expected("AUTO or PATH"));
            };
            let mut options = Vec::new();
            while self.eat(&TokenKind::Comma) {
                options.push(self.parse_for_option()?);
            }
            Ok(ForClause::Json { mode, options })
        }
    }

    /// One `FOR XML/JSON` trailing option: a word, possibly with a string
    /// argument (`ROOT('rows')`). Kept as raw text.
    fn parse_for_option(&mut self) -> Result<String, SyntaxError> {
        let word = self.parse_ident()?;
        if self.eat(&TokenKind::LeftParen) {
            let tok = self.advance_token()?;
            let TokenKind::Str { value, .. } = tok.kind else {
                return Err(self.err_expected("string argument"));
            };
            self.expect(&TokenKind::RightParen)?;
            Ok(format!("{}('{}')", word.value, value.replace('\'', "''")))
        } else {
            Ok(word.value)
        }
    }

    // -----------------------------------------------------------------------
    // Table sources
    // -----------------------------------------------------------------------

    pub(crate) fn parse_table_source(&mut self) -> Result<TableSource, SyntaxError> {
        let mut source = self.parse_table_primary()?;
        loop {
            if let Some(kind) = self.peek_join_kind() {
                self.consume_join_words(kind);
                let right = self.parse_table_primary()?;
                let on = if kind == JoinKind::Cross {
                    None
                } else {
                    self.expect_kw(Kw::On)?;
                    Some(self.parse_expr()?)
                };
                source = TableSource::Join {
                    left: Box::new(source),
                    kind,
                    right: Box::new(right),
                    on,
                };
                continue;
            }

            if self.check_kw(Kw::Cross) && self.peek_nth_token(1).is_some_and(|t| t.is_word("APPLY"))
            {
                self.advance();
                self.advance();
                let right = self.parse_table_primary()?;
                source = TableSource::Apply {
                    left: Box::new(source),
                    outer: false,
                    right: Box::new(right),
                };
                continue;
            }
            if self.check_kw(Kw::Outer) && self.peek_nth_token(1).is_some_and(|t| t.is_word("APPLY"))
            {
                self.advance();
                self.advance();
                let right = self.parse_table_primary()?;
                source = TableSource::Apply {
                    left: Box::new(source),
                    outer: true,
                    right: Box::new(right),
                };
                continue;
            }

            if self.check_kw(Kw::Pivot) {
                source = self.parse_pivot(source)?;
                continue;
            }
            if self.check_kw(Kw::Unpivot) {
                source = self.parse_unpivot(source)?;
                continue;
            }

            break;
        }
        Ok(source)
    }

    fn peek_join_kind(&self) -> Option<JoinKind> {
        match self.peek_kind()? {
            TokenKind::Keyword(Kw::Join) => Some(JoinKind::Inner),
            TokenKind::Keyword(Kw::Inner) => Some(JoinKind::Inner),
            TokenKind::Keyword(Kw::Left) => Some(JoinKind::Left),
            TokenKind::Keyword(Kw::Right) => Some(JoinKind::Right),
            TokenKind::Keyword(Kw::Full) => Some(JoinKind::Full),
            TokenKind::Keyword(Kw::Cross)
                if matches!(
                    self.peek_nth_kind(1),
                    Some(TokenKind::Keyword(Kw::Join))
                ) =>
            {
                Some(JoinKind::Cross)
            }
            _ => None,
        }
    }

    fn consume_join_words(&mut self, kind: JoinKind) {
        match kind {
            JoinKind::Inner => {
                let _ = self.eat_kw(Kw::Inner);
            }
            JoinKind::Left | JoinKind::Right | JoinKind::Full => {
                self.advance(); // LEFT/RIGHT/FULL
                let _ = self.eat_kw(Kw::Outer);
            }
            JoinKind::Cross => {
                self.advance(); // CROSS
            }
        }
        let _ = self.eat_kw(Kw::Join);
    }

    #[allow(clippy::too_many_lines)]
    fn parse_table_primary(&mut self) -> Result<TableSource, SyntaxError> {
        // Derived table, VALUES constructor, or parenthesized join tree.
        if self.check(&TokenKind::LeftParen) {
            self.advance();
            if self.at_select_start() {
                let subquery = Box::new(self.parse_select_statement()?);
                self.expect(&TokenKind::RightParen)?;
                let (alias, columns) = self.parse_source_alias()?;
                return Ok(TableSource::Derived {
                    subquery,
                    alias,
                    columns,
                });
            }
            if self.check_kw(Kw::Values) {
                self.advance();
                let rows = self.parse_comma_sep(Self::parse_paren_expr_list)?;
                self.expect(&TokenKind::RightParen)?;
                let (alias, columns) = self.parse_source_alias()?;
                return Ok(TableSource::Values {
                    rows,
                    alias,
                    columns,
                });
            }
            let inner = self.parse_table_source()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(inner);
        }

        // Table variable, possibly a method-call rowset (`@x.nodes(...)`).
        if let Some(TokenKind::Variable(name)) = self.peek_kind() {
            let name = name.clone();
            let span = self.current_span();
            self.advance();
            if self.check(&TokenKind::Dot) {
                let target = Expr::Variable(name, span);
                return self.parse_method_source(target);
            }
            let (alias, _) = self.parse_source_alias()?;
            return Ok(TableSource::Variable { name, alias });
        }

        let name = self.parse_object_name()?;

        // Table-valued function.
        if self.check(&TokenKind::LeftParen) {
            self.advance();
            let args = if self.check(&TokenKind::RightParen) {
                Vec::new()
            } else {
                self.parse_comma_sep(Self::parse_expr)?
            };
            self.expect(&TokenKind::RightParen)?;

            let with_schema = if self.check_kw(Kw::With)
                && matches!(self.peek_nth_kind(1), Some(TokenKind::LeftParen))
            {
                self.advance();
                self.advance();
                let cols = self.parse_comma_sep(Self::parse_schema_column)?;
                self.expect(&TokenKind::RightParen)?;
                cols
            } else {
                Vec::new()
            };

            let (alias, columns) = self.parse_source_alias()?;
            return Ok(TableSource::Function {
                name,
                args,
                with_schema,
                alias,
                columns,
            });
        }

        // XML method on a column used as a rowset.
        if self.check(&TokenKind::Dot)
            && matches!(self.peek_nth_kind(1), Some(TokenKind::Ident(_)))
            && matches!(self.peek_nth_kind(2), Some(TokenKind::LeftParen))
        {
            let span = self.prev_span();
            let target = Expr::Column(name, span);
            return self.parse_method_source(target);
        }

        let (alias, _) = self.parse_source_alias()?;
        let hints = if self.check_kw(Kw::With)
            && matches!(self.peek_nth_kind(1), Some(TokenKind::LeftParen))
        {
            self.advance();
            self.advance();
            let hints = self.parse_comma_sep(Self::parse_hint)?;
            self.expect(&TokenKind::RightParen)?;
            hints
        } else {
            Vec::new()
        };

        Ok(TableSource::Named { name, alias, hints })
    }

    fn parse_method_source(&mut self, target: Expr) -> Result<TableSource, SyntaxError> {
        self.expect(&TokenKind::Dot)?;
        let method = self.parse_ident()?;
        self.expect(&TokenKind::LeftParen)?;
        let args = if self.check(&TokenKind::RightParen) {
            Vec::new()
        } else {
            self.parse_comma_sep(Self::parse_expr)?
        };
        self.expect(&TokenKind::RightParen)?;
        let (alias, columns) = self.parse_source_alias()?;
        Ok(TableSource::MethodCall {
            target: Box::new(target),
            method,
            args,
            alias,
            columns,
        })
    }

    fn parse_paren_expr_list(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        self.expect(&TokenKind::LeftParen)?;
        let exprs = self.parse_comma_sep(Self::parse_expr)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(exprs)
    }

    /// `[AS] alias [(col, ...)]` after a table source.
    fn parse_source_alias(&mut self) -> Result<(Option<Ident>, Vec<Ident>), SyntaxError> {
        let alias = if self.eat_kw(Kw::As) {
            Some(self.parse_ident()?)
        } else {
            self.try_ident()
        };
        let columns = if alias.is_some() && self.check(&TokenKind::LeftParen) {
            self.parse_paren_ident_list()?
        } else {
            Vec::new()
        };
        Ok((alias, columns))
    }

    /// One table hint, kept as raw text (`NOLOCK`, `INDEX(ix_name)`).
    fn parse_hint(&mut self) -> Result<String, SyntaxError> {
        let tok = self.advance_token()?;
        let head = match tok.kind {
            TokenKind::Ident(_) | TokenKind::Keyword(_) => tok.text,
            _ => {
                return Err(SyntaxError {
                    message: "expected table hint".to_owned(),
                    span: tok.span,
                    line: tok.line,
                    col: tok.col,
                })
            }
        };
        if self.eat(&TokenKind::LeftParen) {
            let arg = self.parse_ident()?;
            self.expect(&TokenKind::RightParen)?;
            Ok(format!("{head}({arg})"))
        } else {
            Ok(head)
        }
    }

    fn parse_schema_column(&mut self) -> Result<SchemaColumn, SyntaxError> {
        let name = self.parse_ident()?;
        let type_name = self.parse_type_name()?;
        let path = if let Some(TokenKind::Str { value, .. }) = self.peek_kind() {
            let value = value.clone();
            self.advance();
            Some(value)
        } else {
            None
        };
        Ok(SchemaColumn {
            name,
            type_name,
            path,
        })
    }

    fn parse_pivot(&mut self, source: TableSource) -> Result<TableSource, SyntaxError> {
        self.expect_kw(Kw::Pivot)?;
        self.expect(&TokenKind::LeftParen)?;
        let agg = self.parse_expr()?;
        let Expr::Function(aggregate) = agg else {
            return Err(self.err_msg("PIVOT requires an aggregate function call"));
        };
        self.expect_kw(Kw::For)?;
        let value_column = self.parse_ident()?;
        self.expect_kw(Kw::In)?;
        let in_list = self.parse_paren_expr_list()?;
        self.expect(&TokenKind::RightParen)?;
        let alias = if self.eat_kw(Kw::As) {
            Some(self.parse_ident()?)
        } else {
            self.try_ident()
        };
        Ok(TableSource::Pivot {
            source: Box::new(source),
            aggregate,
            value_column,
            in_list,
            alias,
        })
    }

    fn parse_unpivot(&mut self, source: TableSource) -> Result<TableSource, SyntaxError> {
        self.expect_kw(Kw::Unpivot)?;
        self.expect(&TokenKind::LeftParen)?;
        let value_column = self.parse_ident()?;
        self.expect_kw(Kw::For)?;
        let for_column = self.parse_ident()?;
        self.expect_kw(Kw::In)?;
        let in_columns = self.parse_paren_ident_list()?;
        self.expect(&TokenKind::RightParen)?;
        let alias = if self.eat_kw(Kw::As) {
            Some(self.parse_ident()?)
        } else {
            self.try_ident()
        };
        Ok(TableSource::Unpivot {
            source: Box::new(source),
            value_column,
            for_column,
            in_columns,
            alias,
        })
    }

    // -----------------------------------------------------------------------
    // INSERT / BULK INSERT
    // -----------------------------------------------------------------------

    fn parse_dml_target(&mut self) -> Result<DmlTarget, SyntaxError> {
        if let Some(TokenKind::Variable(name)) = self.peek_kind() {
            let name = name.clone();
            self.advance();
            Ok(DmlTarget::Variable(name))
        } else {
            Ok(DmlTarget::Table(self.parse_object_name()?))
        }
    }

    fn parse_insert(&mut self) -> Result<InsertStatement, SyntaxError> {
        self.expect_kw(Kw::Insert)?;
        let top = if self.check_kw(Kw::Top) {
            Some(self.parse_top_clause()?)
        } else {
            None
        };
        let _ = self.eat_kw(Kw::Into);
        let target = self.parse_dml_target()?;

        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_paren_ident_list()?
        } else {
            Vec::new()
        };

        let output = self.parse_optional_output()?;

        let source = if self.check_kw(Kw::Values) {
            self.advance();
            InsertSource::Values(self.parse_comma_sep(Self::parse_paren_expr_list)?)
        } else if self.at_select_start() {
            InsertSource::Select(Box::new(self.parse_select_statement()?))
        } else if self.check_kw(Kw::Exec) || self.check_kw(Kw::Execute) {
            InsertSource::Execute(Box::new(self.parse_execute_statement()?))
        } else if self.check_kw(Kw::Default) {
            self.advance();
            self.expect_kw(Kw::Values)?;
            InsertSource::DefaultValues
        } else {
            return Err(self.err_expected("VALUES, SELECT, EXEC, or DEFAULT VALUES"));
        };

        Ok(InsertStatement {
            top,
            target,
            columns,
            output,
            source,
        })
    }

    fn parse_optional_output(&mut self) -> Result<Option<OutputClause>, SyntaxError> {
        if !self.at_word("OUTPUT") {
            return Ok(None);
        }
        self.advance();
        let items = self.parse_comma_sep(Self::parse_select_item)?;
        let into = if self.eat_kw(Kw::Into) {
            let target = self.parse_dml_target()?;
            let columns = if self.check(&TokenKind::LeftParen) {
                self.parse_paren_ident_list()?
            } else {
                Vec::new()
            };
            Some((target, columns))
        } else {
            None
        };
        Ok(Some(OutputClause { items, into }))
    }

    fn parse_bulk_insert(&mut self) -> Result<BulkInsertStatement, SyntaxError> {
        self.expect_kw(Kw::Bulk)?;
        self.expect_kw(Kw::Insert)?;
        let target = self.parse_object_name()?;
        self.expect_kw(Kw::From)?;
        let tok = self.advance_token()?;
        let TokenKind::Str { value: file, .. } = tok.kind else {
            return Err(SyntaxError {
                message: "expected file path string".to_owned(),
                span: tok.span,
                line: tok.line,
                col: tok.col,
            });
        };
        let options = if self.eat_kw(Kw::With) {
            self.parse_paren_options()?
        } else {
            Vec::new()
        };
        Ok(BulkInsertStatement {
            target,
            file,
            options,
        })
    }

    // -----------------------------------------------------------------------
    // UPDATE / DELETE
    // -----------------------------------------------------------------------

    fn parse_where_clause(&mut self) -> Result<Option<WhereClause>, SyntaxError> {
        if !self.eat_kw(Kw::Where) {
            return Ok(None);
        }
        if self.check_kw(Kw::Current) {
            self.advance();
            self.expect_kw(Kw::Of)?;
            return Ok(Some(WhereClause::CurrentOf(self.parse_object_name()?)));
        }
        Ok(Some(WhereClause::Expr(self.parse_expr()?)))
    }

    fn parse_assignment(&mut self) -> Result<Assignment, SyntaxError> {
        let target = if let Some(TokenKind::Variable(name)) = self.peek_kind() {
            let name = name.clone();
            self.advance();
            AssignmentTarget::Variable(name)
        } else {
            AssignmentTarget::Column(self.parse_object_name()?)
        };
        let op = self.parse_assign_op()?;
        let value = self.parse_expr()?;
        Ok(Assignment { target, op, value })
    }

    fn parse_assign_op(&mut self) -> Result<AssignOp, SyntaxError> {
        let op = match self.peek_kind() {
            Some(TokenKind::Eq) => AssignOp::Assign,
            Some(TokenKind::PlusEq) => AssignOp::AddAssign,
            Some(TokenKind::MinusEq) => AssignOp::SubAssign,
            Some(TokenKind::StarEq) => AssignOp::MulAssign,
            Some(TokenKind::SlashEq) => AssignOp::DivAssign,
            Some(TokenKind::PercentEq) => AssignOp::ModAssign,
            _ => return Err(self.err_expected("assignment operator")),
        };
        self.advance();
        Ok(op)
    }

    fn parse_update(&mut self) -> Result<UpdateStatement, SyntaxError> {
        self.expect_kw(Kw::Update)?;
        let top = if self.check_kw(Kw::Top) {
            Some(self.parse_top_clause()?)
        } else {
            None
        };
        let target = self.parse_dml_target()?;
        self.expect_kw(Kw::Set)?;
        let assignments = self.parse_comma_sep(Self::parse_assignment)?;
        let output = self.parse_optional_output()?;
        let from = if self.eat_kw(Kw::From) {
            self.parse_comma_sep(Self::parse_table_source)?
        } else {
            Vec::new()
        };
        let where_clause = self.parse_where_clause()?;
        Ok(UpdateStatement {
            top,
            target,
            assignments,
            output,
            from,
            where_clause,
        })
    }

    fn parse_delete(&mut self) -> Result<DeleteStatement, SyntaxError> {
        self.expect_kw(Kw::Delete)?;
        let top = if self.check_kw(Kw::Top) {
            Some(self.parse_top_clause()?)
        } else {
            None
        };
        let _ = self.eat_kw(Kw::From);
        let target = self.parse_dml_target()?;
        let output = self.parse_optional_output()?;
        let from = if self.eat_kw(Kw::From) {
            self.parse_comma_sep(Self::parse_table_source)?
        } else {
            Vec::new()
        };
        let where_clause = self.parse_where_clause()?;
        Ok(DeleteStatement {
            top,
            target,
            output,
            from,
            where_clause,
        })
    }

    // -----------------------------------------------------------------------
    // MERGE
    // -----------------------------------------------------------------------

    fn parse_merge(&mut self) -> Result<MergeStatement, SyntaxError> {
        self.expect_kw(Kw::Merge)?;
        let top = if self.check_kw(Kw::Top) {
            Some(self.parse_top_clause()?)
        } else {
            None
        };
        let _ = self.eat_kw(Kw::Into);
        let target = self.parse_object_name()?;
        let target_alias = if self.eat_kw(Kw::As) {
            Some(self.parse_ident()?)
        } else if !self.at_word("USING") {
            self.try_ident()
        } else {
            None
        };
        self.expect_word("USING")?;
        let using = self.parse_table_source()?;
        self.expect_kw(Kw::On)?;
        let on = self.parse_expr()?;

        let mut clauses = Vec::new();
        while self.check_kw(Kw::When) {
            clauses.push(self.parse_merge_clause()?);
        }
        if clauses.is_empty() {
            return Err(self.err_expected("WHEN clause"));
        }

        let output = self.parse_optional_output()?;

        Ok(MergeStatement {
            top,
            target,
            target_alias,
            using,
            on,
            clauses,
            output,
        })
    }

    fn parse_merge_clause(&mut self) -> Result<MergeClause, SyntaxError> {
        self.expect_kw(Kw::When)?;
        let not = self.eat_kw(Kw::Not);
        self.expect_word("MATCHED")?;
        let when = if not {
            if self.eat_kw(Kw::By) {
                if self.eat_word("SOURCE") {
                    MergeWhen::NotMatchedBySource
                } else {
                    self.expect_word("TARGET")?;
                    MergeWhen::NotMatchedByTarget
                }
            } else {
                MergeWhen::NotMatchedByTarget
            }
        } else {
            MergeWhen::Matched
        };

        let condition = if self.eat_kw(Kw::And) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect_kw(Kw::Then)?;

        let action = if self.eat_kw(Kw::Update) {
            self.expect_kw(Kw::Set)?;
            MergeAction::Update(self.parse_comma_sep(Self::parse_assignment)?)
        } else if self.eat_kw(Kw::Delete) {
            MergeAction::Delete
        } else if self.eat_kw(Kw::Insert) {
            let columns = if self.check(&TokenKind::LeftParen) {
                self.parse_paren_ident_list()?
            } else {
                Vec::new()
            };
            let source = if self.check_kw(Kw::Default) {
                self.advance();
                self.expect_kw(Kw::Values)?;
                MergeInsertSource::DefaultValues
            } else {
                self.expect_kw(Kw::Values)?;
                MergeInsertSource::Values(self.parse_paren_expr_list()?)
            };
            MergeAction::Insert { columns, source }
        } else {
            return Err(self.err_expected("UPDATE, DELETE, or INSERT"));
        };

        Ok(MergeClause {
            when,
            condition,
            action,
        })
    }

    // -----------------------------------------------------------------------
    // CREATE dispatch
    // -----------------------------------------------------------------------

    #[allow(clippy::too_many_lines)]
    fn parse_create(&mut self) -> Result<StatementKind, SyntaxError> {
        self.expect_kw(Kw::Create)?;

        let or_alter = if self.check_kw(Kw::Or)
            && matches!(self.peek_nth_kind(1), Some(TokenKind::Keyword(Kw::Alter)))
        {
            self.advance();
            self.advance();
            true
        } else {
            false
        };

        match self.peek_kind() {
            Some(TokenKind::Keyword(Kw::Table)) => {
                self.advance();
                Ok(StatementKind::CreateTable(self.parse_create_table_body()?))
            }
            Some(TokenKind::Keyword(
                Kw::Unique | Kw::Clustered | Kw::Nonclustered | Kw::Index,
            )) => Ok(StatementKind::CreateIndex(self.parse_create_index()?)),
            Some(TokenKind::Keyword(Kw::View)) => {
                self.advance();
                Ok(StatementKind::CreateView(self.parse_create_view(or_alter)?))
            }
            Some(TokenKind::Keyword(Kw::Proc | Kw::Procedure)) => {
                self.advance();
                Ok(StatementKind::CreateProcedure(
                    self.parse_create_procedure(or_alter)?,
                ))
            }
            Some(TokenKind::Keyword(Kw::Function)) => {
                self.advance();
                Ok(StatementKind::CreateFunction(
                    self.parse_create_function(or_alter)?,
                ))
            }
            Some(TokenKind::Keyword(Kw::Trigger)) => {
                self.advance();
                Ok(StatementKind::CreateTrigger(
                    self.parse_create_trigger(or_alter)?,
                ))
            }
            Some(TokenKind::Keyword(Kw::Schema)) => {
                self.advance();
                let name = self.parse_ident()?;
                let authorization = if self.eat_kw(Kw::Authorization) {
                    Some(self.parse_ident()?)
                } else {
                    None
                };
                Ok(StatementKind::CreateSchema(CreateSchemaStatement {
                    name,
                    authorization,
                }))
            }
            Some(TokenKind::Ident(s)) if s.eq_ignore_ascii_case("SEQUENCE") => {
                self.advance();
                Ok(StatementKind::CreateSequence(self.parse_create_sequence()?))
            }
            Some(TokenKind::Ident(s)) if s.eq_ignore_ascii_case("TYPE") => {
                self.advance();
                Ok(StatementKind::CreateType(self.parse_create_type()?))
            }
            Some(TokenKind::Ident(s)) if s.eq_ignore_ascii_case("SYNONYM") => {
                self.advance();
                let name = self.parse_object_name()?;
                self.expect_kw(Kw::For)?;
                let target = self.parse_object_name()?;
                Ok(StatementKind::CreateSynonym(CreateSynonymStatement {
                    name,
                    target,
                }))
            }
            Some(TokenKind::Ident(s)) if s.eq_ignore_ascii_case("SECURITY") => {
                self.advance();
                self.expect_word("POLICY")?;
                Ok(StatementKind::CreateSecurityPolicy(
                    self.parse_create_security_policy()?,
                ))
            }
            Some(TokenKind::Ident(s)) if s.eq_ignore_ascii_case("PARTITION") => {
                self.advance();
                if self.eat_kw(Kw::Function) {
                    Ok(StatementKind::CreatePartitionFunction(
                        self.parse_create_partition_function()?,
                    ))
                } else {
                    self.expect_word("SCHEME")?;
                    Ok(StatementKind::CreatePartitionScheme(
                        self.parse_create_partition_scheme()?,
                    ))
                }
            }
            _ => Err(self.err_expected("object kind after CREATE")),
        }
    }

    // -----------------------------------------------------------------------
    // CREATE TABLE and column definitions
    // -----------------------------------------------------------------------

    fn parse_create_table_body(&mut self) -> Result<CreateTableStatement, SyntaxError> {
        let name = self.parse_object_name()?;
        self.expect(&TokenKind::LeftParen)?;

        let mut columns = Vec::new();
        let mut constraints = Vec::new();
        let mut period = None;
        loop {
            if self.at_table_constraint_start() {
                constraints.push(self.parse_table_constraint()?);
            } else if self.at_word("PERIOD") {
                self.advance();
                self.expect_kw(Kw::For)?;
                self.expect_word("SYSTEM_TIME")?;
                self.expect(&TokenKind::LeftParen)?;
                let start_col = self.parse_ident()?;
                self.expect(&TokenKind::Comma)?;
                let end_col = self.parse_ident()?;
                self.expect(&TokenKind::RightParen)?;
                period = Some((start_col, end_col));
            } else {
                columns.push(self.parse_column_def()?);
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)?;

        let on = self.parse_optional_on_clause()?;
        let options = if self.eat_kw(Kw::With) {
            self.parse_paren_options()?
        } else {
            Vec::new()
        };

        Ok(CreateTableStatement {
            name,
            columns,
            constraints,
            period,
            on,
            options,
        })
    }

    fn at_table_constraint_start(&self) -> bool {
        matches!(
            self.peek_kind(),
            Some(TokenKind::Keyword(
                Kw::Constraint | Kw::Primary | Kw::Unique | Kw::Foreign | Kw::Check
            ))
        )
    }

    fn parse_optional_on_clause(&mut self) -> Result<Option<OnClause>, SyntaxError> {
        if !self.check_kw(Kw::On) {
            return Ok(None);
        }
        self.advance();
        let name = self.parse_ident()?;
        if self.eat(&TokenKind::LeftParen) {
            let column = self.parse_ident()?;
            self.expect(&TokenKind::RightParen)?;
            Ok(Some(OnClause::PartitionScheme {
                scheme: name,
                column,
            }))
        } else {
            Ok(Some(OnClause::Filegroup(name)))
        }
    }

    pub(crate) fn parse_column_def(&mut self) -> Result<ColumnDef, SyntaxError> {
        let name = self.parse_ident()?;

        // Computed column.
        if self.check_kw(Kw::As) {
            self.advance();
            self.expect(&TokenKind::LeftParen)?;
            let expr = self.parse_expr()?;
            self.expect(&TokenKind::RightParen)?;
            let persisted = self.eat_word("PERSISTED");
            let constraints = self.parse_column_constraints()?;
            return Ok(ColumnDef {
                name,
                type_name: None,
                computed: Some(Box::new(expr)),
                persisted,
                collation: None,
                constraints,
            });
        }

        let type_name = Some(self.parse_type_name()?);
        let collation = if self.eat_kw(Kw::Collate) {
            Some(self.parse_ident()?)
        } else {
            None
        };
        let constraints = self.parse_column_constraints()?;

        Ok(ColumnDef {
            name,
            type_name,
            computed: None,
            persisted: false,
            collation,
            constraints,
        })
    }

    #[allow(clippy::too_many_lines)]
    fn parse_column_constraints(&mut self) -> Result<Vec<ColumnConstraint>, SyntaxError> {
        let mut constraints = Vec::new();
        loop {
            let name = if self.check_kw(Kw::Constraint) {
                self.advance();
                Some(self.parse_ident()?)
            } else {
                None
            };

            let kind = match self.peek_kind() {
                Some(TokenKind::Keyword(Kw::Not)) => {
                    self.advance();
                    self.expect_kw(Kw::Null)?;
                    ColumnConstraintKind::NotNull
                }
                Some(TokenKind::Keyword(Kw::Null)) => {
                    self.advance();
                    ColumnConstraintKind::Null
                }
                Some(TokenKind::Keyword(Kw::Primary)) => {
                    self.advance();
                    self.expect_kw(Kw::Key)?;
                    ColumnConstraintKind::PrimaryKey {
                        clustered: self.parse_optional_clustered(),
                    }
                }
                Some(TokenKind::Keyword(Kw::Unique)) => {
                    self.advance();
                    let _ = self.parse_optional_clustered();
                    ColumnConstraintKind::Unique
                }
                Some(TokenKind::Keyword(Kw::Default)) => {
                    self.advance();
                    ColumnConstraintKind::Default(
                        self.parse_expr_bp(crate::expr::bp::NOT_PREFIX)?,
                    )
                }
                Some(TokenKind::Keyword(Kw::Check)) => {
                    self.advance();
                    self.expect(&TokenKind::LeftParen)?;
                    let e = self.parse_expr()?;
                    self.expect(&TokenKind::RightParen)?;
                    ColumnConstraintKind::Check(e)
                }
                Some(TokenKind::Keyword(Kw::Foreign)) => {
                    self.advance();
                    self.expect_kw(Kw::Key)?;
                    ColumnConstraintKind::ForeignKey(self.parse_fk_clause()?)
                }
                Some(TokenKind::Keyword(Kw::References)) => {
                    ColumnConstraintKind::ForeignKey(self.parse_fk_clause()?)
                }
                Some(TokenKind::Keyword(Kw::Identity)) => {
                    self.advance();
                    let (seed, increment) = if self.eat(&TokenKind::LeftParen) {
                        let seed = self.parse_signed_int()?;
                        self.expect(&TokenKind::Comma)?;
                        let inc = self.parse_signed_int()?;
                        self.expect(&TokenKind::RightParen)?;
                        (seed, inc)
                    } else {
                        (1, 1)
                    };
                    ColumnConstraintKind::Identity { seed, increment }
                }
                Some(TokenKind::Keyword(Kw::Rowguidcol)) => {
                    self.advance();
                    ColumnConstraintKind::Rowguidcol
                }
                Some(TokenKind::Ident(s)) if s.eq_ignore_ascii_case("GENERATED") => {
                    self.advance();
                    self.expect_word("ALWAYS")?;
                    self.expect_kw(Kw::As)?;
                    self.expect_word("ROW")?;
                    let start = if self.eat_word("START") {
                        true
                    } else {
                        self.expect_word("END")?;
                        false
                    };
                    let hidden = self.eat_word("HIDDEN");
                    ColumnConstraintKind::GeneratedAlwaysRow { start, hidden }
                }
                _ => {
                    if let Some(name) = name {
                        return Err(self.err_msg(format!(
                            "constraint {} has no definition",
                            name.value
                        )));
                    }
                    break;
                }
            };

            constraints.push(ColumnConstraint { name, kind });
        }
        Ok(constraints)
    }

    fn parse_optional_clustered(&mut self) -> Option<bool> {
        if self.eat_kw(Kw::Clustered) {
            Some(true)
        } else if self.eat_kw(Kw::Nonclustered) {
            Some(false)
        } else {
            None
        }
    }

    fn parse_signed_int(&mut self) -> Result<i64, SyntaxError> {
        let negative = self.eat(&TokenKind::Minus);
        match self.peek_kind() {
            Some(TokenKind::Int(n)) => {
                let n = *n;
                self.advance();
                Ok(if negative { -n } else { n })
            }
            _ => Err(self.err_expected("integer")),
        }
    }

    fn parse_fk_clause(&mut self) -> Result<ForeignKeyClause, SyntaxError> {
        self.expect_kw(Kw::References)?;
        let table = self.parse_object_name()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_paren_ident_list()?
        } else {
            Vec::new()
        };
        let mut on_delete = None;
        let mut on_update = None;
        while self.check_kw(Kw::On) {
            self.advance();
            if self.eat_kw(Kw::Delete) {
                on_delete = Some(self.parse_fk_action()?);
            } else {
                self.expect_kw(Kw::Update)?;
                on_update = Some(self.parse_fk_action()?);
            }
        }
        Ok(ForeignKeyClause {
            table,
            columns,
            on_delete,
            on_update,
        })
    }

    fn parse_fk_action(&mut self) -> Result<FkAction, SyntaxError> {
        if self.eat_word("NO") {
            self.expect_word("ACTION")?;
            Ok(FkAction::NoAction)
        } else if self.eat_kw(Kw::Cascade) {
            Ok(FkAction::Cascade)
        } else if self.eat_kw(Kw::Set) {
            if self.eat_kw(Kw::Null) {
                Ok(FkAction::SetNull)
            } else {
                self.expect_kw(Kw::Default)?;
                Ok(FkAction::SetDefault)
            }
        } else {
            Err(self.err_expected("NO ACTION, CASCADE, SET NULL, or SET DEFAULT"))
        }
    }

    fn parse_table_constraint(&mut self) -> Result<TableConstraint, SyntaxError> {
        let name = if self.eat_kw(Kw::Constraint) {
            Some(self.parse_ident()?)
        } else {
            None
        };

        let kind = match self.peek_kind() {
            Some(TokenKind::Keyword(Kw::Primary)) => {
                self.advance();
                self.expect_kw(Kw::Key)?;
                let clustered = self.parse_optional_clustered();
                self.expect(&TokenKind::LeftParen)?;
                let columns = self.parse_comma_sep(Self::parse_index_column)?;
                self.expect(&TokenKind::RightParen)?;
                TableConstraintKind::PrimaryKey { clustered, columns }
            }
            Some(TokenKind::Keyword(Kw::Unique)) => {
                self.advance();
                let clustered = self.parse_optional_clustered();
                self.expect(&TokenKind::LeftParen)?;
                let columns = self.parse_comma_sep(Self::parse_index_column)?;
                self.expect(&TokenKind::RightParen)?;
                TableConstraintKind::Unique { clustered, columns }
            }
            Some(TokenKind::Keyword(Kw::Foreign)) => {
                self.advance();
                self.expect_kw(Kw::Key)?;
                let columns = self.parse_paren_ident_list()?;
                let clause = self.parse_fk_clause()?;
                TableConstraintKind::ForeignKey { columns, clause }
            }
            Some(TokenKind::Keyword(Kw::Check)) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let e = self.parse_expr()?;
                self.expect(&TokenKind::RightParen)?;
                TableConstraintKind::Check(e)
            }
            _ => return Err(self.err_expected("table constraint")),
        };

        Ok(TableConstraint { name, kind })
    }

    fn parse_index_column(&mut self) -> Result<IndexColumn, SyntaxError> {
        let name = self.parse_ident()?;
        let desc = if self.eat_kw(Kw::Desc) {
            true
        } else {
            let _ = self.eat_kw(Kw::Asc);
            false
        };
        Ok(IndexColumn { name, desc })
    }

    // -----------------------------------------------------------------------
    // WITH (...) option lists
    // -----------------------------------------------------------------------

    fn parse_paren_options(&mut self) -> Result<Vec<SqlOption>, SyntaxError> {
        self.expect(&TokenKind::LeftParen)?;
        let options = self.parse_comma_sep(Self::parse_sql_option)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(options)
    }

    /// `WITH` option lists appear with and without parens depending on the
    /// statement; accept both.
    fn parse_with_options(&mut self) -> Result<Vec<SqlOption>, SyntaxError> {
        if self.check(&TokenKind::LeftParen) {
            self.parse_paren_options()
        } else {
            self.parse_comma_sep(Self::parse_sql_option)
        }
    }

    fn parse_sql_option(&mut self) -> Result<SqlOption, SyntaxError> {
        let name = self.parse_option_name()?;
        if !self.eat(&TokenKind::Eq) {
            return Ok(SqlOption { name, value: None });
        }

        let value = match self.peek_kind() {
            Some(TokenKind::Keyword(Kw::On)) => {
                self.advance();
                if self.check(&TokenKind::LeftParen) {
                    OptionValue::OnWith(self.parse_paren_options()?)
                } else {
                    OptionValue::Ident(Ident::new("ON"))
                }
            }
            Some(TokenKind::Keyword(Kw::Off)) => {
                self.advance();
                OptionValue::Ident(Ident::new("OFF"))
            }
            Some(TokenKind::Int(n)) => {
                let n = *n;
                self.advance();
                OptionValue::Literal(Literal::Int(n))
            }
            Some(TokenKind::Numeric(text)) => {
                let text = text.clone();
                self.advance();
                OptionValue::Literal(Literal::Numeric(text))
            }
            Some(TokenKind::Str { value, unicode }) => {
                let lit = Literal::String {
                    value: value.clone(),
                    unicode: *unicode,
                };
                self.advance();
                OptionValue::Literal(lit)
            }
            Some(TokenKind::Ident(_) | TokenKind::QuotedId(..)) => {
                let name = self.parse_object_name()?;
                if name.parts.len() > 1 {
                    OptionValue::ObjectName(name)
                } else {
                    OptionValue::Ident(name.parts.into_iter().next().unwrap_or(Ident::new("")))
                }
            }
            _ => return Err(self.err_expected("option value")),
        };

        Ok(SqlOption {
            name,
            value: Some(value),
        })
    }

    /// Option names admit words that happen to be reserved (`LOG`, `INIT`).
    fn parse_option_name(&mut self) -> Result<Ident, SyntaxError> {
        match self.peek_kind() {
            Some(TokenKind::Ident(_) | TokenKind::Keyword(_)) => {
                let tok = self.advance_token()?;
                Ok(Ident::new(tok.text))
            }
            Some(TokenKind::QuotedId(..)) => self.parse_ident(),
            _ => Err(self.err_expected("option name")),
        }
    }

    // -----------------------------------------------------------------------
    // ALTER TABLE
    // -----------------------------------------------------------------------

    fn parse_alter(&mut self) -> Result<StatementKind, SyntaxError> {
        self.expect_kw(Kw::Alter)?;
        if !self.check_kw(Kw::Table) {
            // ALTER on other object kinds is outside the grammar.
            self.pos -= 1;
            return Ok(self.parse_unrecognized());
        }
        self.advance();
        let name = self.parse_object_name()?;
        let action = self.parse_alter_table_action()?;
        Ok(StatementKind::AlterTable(AlterTableStatement {
            name,
            action,
        }))
    }

    fn parse_alter_table_action(&mut self) -> Result<AlterTableAction, SyntaxError> {
        // WITH CHECK / WITH NOCHECK prefix of ADD CONSTRAINT.
        if self.check_kw(Kw::With)
            && matches!(
                self.peek_nth_kind(1),
                Some(TokenKind::Keyword(Kw::Check | Kw::Nocheck))
            )
        {
            self.advance();
            let with_check = Some(self.eat_kw(Kw::Check));
            if with_check == Some(false) {
                self.expect_kw(Kw::Nocheck)?;
            }
            self.expect_kw(Kw::Add)?;
            let constraints = self.parse_comma_sep(Self::parse_table_constraint)?;
            return Ok(AlterTableAction::AddConstraints {
                with_check,
                constraints,
            });
        }

        if self.eat_kw(Kw::Add) {
            if self.at_table_constraint_start() {
                let constraints = self.parse_comma_sep(Self::parse_table_constraint)?;
                return Ok(AlterTableAction::AddConstraints {
                    with_check: None,
                    constraints,
                });
            }
            let columns = self.parse_comma_sep(Self::parse_column_def)?;
            return Ok(AlterTableAction::AddColumns(columns));
        }

        if self.eat_kw(Kw::Alter) {
            self.expect_kw(Kw::Column)?;
            return Ok(AlterTableAction::AlterColumn(self.parse_column_def()?));
        }

        if self.eat_kw(Kw::Drop) {
            if self.eat_kw(Kw::Column) {
                return Ok(AlterTableAction::DropColumns(
                    self.parse_comma_sep(Self::parse_ident)?,
                ));
            }
            self.expect_kw(Kw::Constraint)?;
            return Ok(AlterTableAction::DropConstraints(
                self.parse_comma_sep(Self::parse_ident)?,
            ));
        }

        if self.eat_kw(Kw::Set) {
            return Ok(AlterTableAction::SetOptions(self.parse_paren_options()?));
        }

        if self.eat_word("SWITCH") {
            let source_partition = if self.eat_word("PARTITION") {
                Some(self.parse_expr()?)
            } else {
                None
            };
            self.expect_kw(Kw::To)?;
            let target = self.parse_object_name()?;
            let target_partition = if self.eat_word("PARTITION") {
                Some(self.parse_expr()?)
            } else {
                None
            };
            return Ok(AlterTableAction::SwitchPartition {
                source_partition,
                target,
                target_partition,
            });
        }

        if self.check_kw(Kw::Check) || self.check_kw(Kw::Nocheck) {
            let check = self.eat_kw(Kw::Check);
            if !check {
                self.expect_kw(Kw::Nocheck)?;
            }
            self.expect_kw(Kw::Constraint)?;
            let name = if self.eat_kw(Kw::All) {
                None
            } else {
                Some(self.parse_ident()?)
            };
            return Ok(AlterTableAction::CheckConstraint { check, name });
        }

        Err(self.err_expected("ALTER TABLE action"))
    }

    // -----------------------------------------------------------------------
    // Other CREATE forms
    // -----------------------------------------------------------------------

    fn parse_create_index(&mut self) -> Result<CreateIndexStatement, SyntaxError> {
        let unique = self.eat_kw(Kw::Unique);
        let clustered = self.parse_optional_clustered();
        let columnstore = self.eat_word("COLUMNSTORE");
        self.expect_kw(Kw::Index)?;
        let name = self.parse_ident()?;
        self.expect_kw(Kw::On)?;
        let table = self.parse_object_name()?;

        let columns = if self.check(&TokenKind::LeftParen) {
            self.advance();
            let cols = self.parse_comma_sep(Self::parse_index_column)?;
            self.expect(&TokenKind::RightParen)?;
            cols
        } else {
            Vec::new()
        };

        let include = if self.eat_word("INCLUDE") {
            self.parse_paren_ident_list()?
        } else {
            Vec::new()
        };

        let where_clause = if self.eat_kw(Kw::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let options = if self.check_kw(Kw::With)
            && matches!(self.peek_nth_kind(1), Some(TokenKind::LeftParen))
        {
            self.advance();
            self.parse_paren_options()?
        } else {
            Vec::new()
        };

        let on = self.parse_optional_on_clause()?;

        Ok(CreateIndexStatement {
            unique,
            clustered,
            columnstore,
            name,
            table,
            columns,
            include,
            where_clause,
            options,
            on,
        })
    }

    fn parse_create_view(&mut self, or_alter: bool) -> Result<CreateViewStatement, SyntaxError> {
        let name = self.parse_object_name()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_paren_ident_list()?
        } else {
            Vec::new()
        };
        let options = if self.check_kw(Kw::With)
            && !matches!(self.peek_nth_kind(1), Some(TokenKind::Keyword(Kw::Check)))
        {
            self.advance();
            self.parse_comma_sep(Self::parse_raw_word)?
        } else {
            Vec::new()
        };
        self.expect_kw(Kw::As)?;
        let query = self.parse_select_statement()?;
        let with_check_option = if self.check_kw(Kw::With)
            && matches!(self.peek_nth_kind(1), Some(TokenKind::Keyword(Kw::Check)))
        {
            self.advance();
            self.advance();
            self.expect_kw(Kw::Option)?;
            true
        } else {
            false
        };
        Ok(CreateViewStatement {
            or_alter,
            name,
            columns,
            options,
            query,
            with_check_option,
        })
    }

    fn parse_raw_word(&mut self) -> Result<String, SyntaxError> {
        match self.peek_kind() {
            Some(TokenKind::Ident(_) | TokenKind::Keyword(_)) => {
                let tok = self.advance_token()?;
                Ok(tok.text)
            }
            _ => Err(self.err_expected("option word")),
        }
    }

    /// One routine option word; `EXECUTE AS ctx` counts as a single option.
    fn parse_routine_option(&mut self) -> Result<String, SyntaxError> {
        let word = self.parse_raw_word()?;
        if word.eq_ignore_ascii_case("EXECUTE") || word.eq_ignore_ascii_case("EXEC") {
            self.expect_kw(Kw::As)?;
            let ctx = self.parse_raw_word()?;
            return Ok(format!("{word} AS {ctx}"));
        }
        Ok(word)
    }

    fn parse_routine_param(&mut self) -> Result<RoutineParam, SyntaxError> {
        let name = self.parse_variable_name()?;
        let type_name = self.parse_type_name()?;
        let default = if self.eat(&TokenKind::Eq) {
            Some(self.parse_expr_bp(crate::expr::bp::NOT_PREFIX)?)
        } else {
            None
        };
        let output = self.eat_word("OUTPUT") || self.eat_word("OUT");
        let readonly = self.eat_word("READONLY");
        Ok(RoutineParam {
            name,
            type_name,
            default,
            output,
            readonly,
        })
    }

    fn parse_routine_body(&mut self) -> Result<Vec<Statement>, SyntaxError> {
        // A `BEGIN ... END` body is one block statement; otherwise the body
        // runs to the end of the batch.
        if self.check_kw(Kw::Begin)
            && !matches!(
                self.peek_nth_kind(1),
                Some(TokenKind::Keyword(Kw::Tran | Kw::Transaction | Kw::Distributed))
            )
            && !self.peek_nth_token(1).is_some_and(|t| t.is_word("TRY"))
        {
            return Ok(vec![self.parse_statement()?]);
        }
        let mut body: Vec<Statement> = Vec::new();
        while !self.at_end() {
            if self.eat(&TokenKind::Semicolon) {
                if let Some(last) = body.last_mut() {
                    last.terminated = true;
                }
                continue;
            }
            body.push(self.parse_statement()?);
        }
        if body.is_empty() {
            return Err(self.err_expected("routine body"));
        }
        Ok(body)
    }

    fn parse_create_procedure(
        &mut self,
        or_alter: bool,
    ) -> Result<CreateProcedureStatement, SyntaxError> {
        let name = self.parse_object_name()?;

        let parens = self.eat(&TokenKind::LeftParen);
        let params = if matches!(self.peek_kind(), Some(TokenKind::Variable(_))) {
            self.parse_comma_sep(Self::parse_routine_param)?
        } else {
            Vec::new()
        };
        if parens {
            self.expect(&TokenKind::RightParen)?;
        }

        let options = if self.eat_kw(Kw::With) {
            self.parse_comma_sep(Self::parse_routine_option)?
        } else {
            Vec::new()
        };

        self.expect_kw(Kw::As)?;
        let body = self.parse_routine_body()?;

        Ok(CreateProcedureStatement {
            or_alter,
            name,
            params,
            options,
            body,
        })
    }

    fn parse_create_function(
        &mut self,
        or_alter: bool,
    ) -> Result<CreateFunctionStatement, SyntaxError> {
        let name = self.parse_object_name()?;
        self.expect(&TokenKind::LeftParen)?;
        let params = if self.check(&TokenKind::RightParen) {
            Vec::new()
        } else {
            self.parse_comma_sep(Self::parse_routine_param)?
        };
        self.expect(&TokenKind::RightParen)?;

        self.expect_word("RETURNS")?;
        let returns = if self.check_kw(Kw::Table) {
            self.advance();
            FunctionReturns::Table
        } else if let Some(TokenKind::Variable(name)) = self.peek_kind() {
            let name = name.clone();
            self.advance();
            self.expect_kw(Kw::Table)?;
            self.expect(&TokenKind::LeftParen)?;
            let columns = self.parse_comma_sep(Self::parse_column_def)?;
            self.expect(&TokenKind::RightParen)?;
            FunctionReturns::TableVariable { name, columns }
        } else {
            FunctionReturns::Scalar(self.parse_type_name()?)
        };

        let options = if self.eat_kw(Kw::With) {
            self.parse_comma_sep(Self::parse_routine_option)?
        } else {
            Vec::new()
        };

        self.expect_kw(Kw::As)?;
        let body = if self.check_kw(Kw::Return) {
            self.advance();
            let parens = self.eat(&TokenKind::LeftParen);
            let query = self.parse_select_statement()?;
            if parens {
                self.expect(&TokenKind::RightParen)?;
            }
            FunctionBody::Return(Box::new(query))
        } else {
            // Non-inline function bodies are always `BEGIN ... END`; store
            // the block's statements directly.
            let mut stmts = self.parse_routine_body()?;
            match stmts.pop() {
                Some(Statement {
                    kind: StatementKind::Block(inner),
                    ..
                }) if stmts.is_empty() => stmts = inner,
                Some(other) => stmts.push(other),
                None => {}
            }
            FunctionBody::Statements(stmts)
        };

        Ok(CreateFunctionStatement {
            or_alter,
            name,
            params,
            returns,
            options,
            body,
        })
    }

    fn parse_create_trigger(
        &mut self,
        or_alter: bool,
    ) -> Result<CreateTriggerStatement, SyntaxError> {
        let name = self.parse_object_name()?;
        self.expect_kw(Kw::On)?;
        let table = self.parse_object_name()?;

        let timing = if self.eat_word("AFTER") {
            TriggerTiming::After
        } else if self.eat_word("INSTEAD") {
            self.expect_kw(Kw::Of)?;
            TriggerTiming::InsteadOf
        } else if self.eat_kw(Kw::For) {
            TriggerTiming::For
        } else {
            return Err(self.err_expected("AFTER, INSTEAD OF, or FOR"));
        };

        let events = self.parse_comma_sep(Self::parse_trigger_event)?;
        self.expect_kw(Kw::As)?;
        let body = self.parse_routine_body()?;

        Ok(CreateTriggerStatement {
            or_alter,
            name,
            table,
            timing,
            events,
            body,
        })
    }

    fn parse_trigger_event(&mut self) -> Result<TriggerEvent, SyntaxError> {
        if self.eat_kw(Kw::Insert) {
            Ok(TriggerEvent::Insert)
        } else if self.eat_kw(Kw::Update) {
            Ok(TriggerEvent::Update)
        } else if self.eat_kw(Kw::Delete) {
            Ok(TriggerEvent::Delete)
        } else {
            Err(self.err_expected("INSERT, UPDATE, or DELETE"))
        }
    }

    fn parse_create_sequence(&mut self) -> Result<CreateSequenceStatement, SyntaxError> {
        let name = self.parse_object_name()?;
        let data_type = if self.eat_kw(Kw::As) {
            Some(self.parse_type_name()?)
        } else {
            None
        };

        let mut stmt = CreateSequenceStatement {
            name,
            data_type,
            start_with: None,
            increment_by: None,
            min_value: None,
            max_value: None,
            cycle: None,
            cache: None,
        };

        loop {
            if self.eat_word("START") {
                self.expect_kw(Kw::With)?;
                stmt.start_with = Some(self.parse_expr_bp(crate::expr::bp::UNARY)?);
            } else if self.eat_word("INCREMENT") {
                self.expect_kw(Kw::By)?;
                stmt.increment_by = Some(self.parse_expr_bp(crate::expr::bp::UNARY)?);
            } else if self.eat_word("MINVALUE") {
                stmt.min_value = Some(Some(self.parse_expr_bp(crate::expr::bp::UNARY)?));
            } else if self.eat_word("MAXVALUE") {
                stmt.max_value = Some(Some(self.parse_expr_bp(crate::expr::bp::UNARY)?));
            } else if self.eat_word("CYCLE") {
                stmt.cycle = Some(true);
            } else if self.eat_word("CACHE") {
                stmt.cache = Some(Some(self.parse_expr_bp(crate::expr::bp::UNARY)?));
            } else if self.eat_word("NO") {
                if self.eat_word("MINVALUE") {
                    stmt.min_value = Some(None);
                } else if self.eat_word("MAXVALUE") {
                    stmt.max_value = Some(None);
                } else if self.eat_word("CYCLE") {
                    stmt.cycle = Some(false);
                } else if self.eat_word("CACHE") {
                    stmt.cache = Some(None);
                } else {
                    return Err(self.err_expected("MINVALUE, MAXVALUE, CYCLE, or CACHE"));
                }
            } else {
                break;
            }
        }

        Ok(stmt)
    }

    fn parse_create_type(&mut self) -> Result<CreateTypeStatement, SyntaxError> {
        let name = self.parse_object_name()?;
        let definition = if self.eat_kw(Kw::From) {
            let base = self.parse_type_name()?;
            let not_null = if self.eat_kw(Kw::Not) {
                self.expect_kw(Kw::Null)?;
                true
            } else {
                false
            };
            TypeDefinition::Alias { base, not_null }
        } else {
            self.expect_kw(Kw::As)?;
            self.expect_kw(Kw::Table)?;
            self.expect(&TokenKind::LeftParen)?;
            let (columns, constraints) = self.parse_table_type_members()?;
            self.expect(&TokenKind::RightParen)?;
            TypeDefinition::Table {
                columns,
                constraints,
            }
        };
        Ok(CreateTypeStatement { name, definition })
    }

    fn parse_table_type_members(
        &mut self,
    ) -> Result<(Vec<ColumnDef>, Vec<TableConstraint>), SyntaxError> {
        let mut columns = Vec::new();
        let mut constraints = Vec::new();
        loop {
            if self.at_table_constraint_start() {
                constraints.push(self.parse_table_constraint()?);
            } else {
                columns.push(self.parse_column_def()?);
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok((columns, constraints))
    }

    fn parse_create_security_policy(
        &mut self,
    ) -> Result<CreateSecurityPolicyStatement, SyntaxError> {
        let name = self.parse_object_name()?;
        let mut predicates = vec![self.parse_security_predicate()?];
        while self.eat(&TokenKind::Comma) {
            predicates.push(self.parse_security_predicate()?);
        }
        let state = if self.check_kw(Kw::With) {
            self.advance();
            self.expect(&TokenKind::LeftParen)?;
            self.expect_word("STATE")?;
            self.expect(&TokenKind::Eq)?;
            let on = if self.eat_kw(Kw::On) {
                true
            } else {
                self.expect_kw(Kw::Off)?;
                false
            };
            self.expect(&TokenKind::RightParen)?;
            Some(on)
        } else {
            None
        };
        Ok(CreateSecurityPolicyStatement {
            name,
            predicates,
            state,
        })
    }

    fn parse_security_predicate(&mut self) -> Result<SecurityPredicate, SyntaxError> {
        self.expect_kw(Kw::Add)?;
        let kind = if self.eat_word("FILTER") {
            SecurityPredicateKind::Filter
        } else {
            self.expect_word("BLOCK")?;
            SecurityPredicateKind::Block
        };
        self.expect_word("PREDICATE")?;
        let function = self.parse_object_name()?;
        self.expect(&TokenKind::LeftParen)?;
        let args = if self.check(&TokenKind::RightParen) {
            Vec::new()
        } else {
            self.parse_comma_sep(Self::parse_expr)?
        };
        self.expect(&TokenKind::RightParen)?;
        self.expect_kw(Kw::On)?;
        let table = self.parse_object_name()?;

        let block_timing = if kind == SecurityPredicateKind::Block
            && (self.at_word("AFTER") || self.at_word("BEFORE"))
        {
            let timing = self.parse_raw_word()?;
            let event = self.parse_raw_word()?;
            Some(format!("{timing} {event}"))
        } else {
            None
        };

        Ok(SecurityPredicate {
            kind,
            function,
            args,
            table,
            block_timing,
        })
    }

    fn parse_create_partition_function(
        &mut self,
    ) -> Result<CreatePartitionFunctionStatement, SyntaxError> {
        let name = self.parse_ident()?;
        self.expect(&TokenKind::LeftParen)?;
        let input_type = self.parse_type_name()?;
        self.expect(&TokenKind::RightParen)?;
        self.expect_kw(Kw::As)?;
        self.expect_word("RANGE")?;
        let range_right = if self.eat_kw(Kw::Right) {
            true
        } else {
            self.expect_kw(Kw::Left)?;
            false
        };
        self.expect_kw(Kw::For)?;
        self.expect_kw(Kw::Values)?;
        let boundaries = self.parse_paren_expr_list()?;
        Ok(CreatePartitionFunctionStatement {
            name,
            input_type,
            range_right,
            boundaries,
        })
    }

    fn parse_create_partition_scheme(
        &mut self,
    ) -> Result<CreatePartitionSchemeStatement, SyntaxError> {
        let name = self.parse_ident()?;
        self.expect_kw(Kw::As)?;
        self.expect_word("PARTITION")?;
        let function = self.parse_ident()?;
        let all = self.eat_kw(Kw::All);
        self.expect_kw(Kw::To)?;
        let filegroups = self.parse_paren_ident_list()?;
        Ok(CreatePartitionSchemeStatement {
            name,
            function,
            all,
            filegroups,
        })
    }

    // -----------------------------------------------------------------------
    // DROP
    // -----------------------------------------------------------------------

    fn parse_drop(&mut self) -> Result<DropStatement, SyntaxError> {
        self.expect_kw(Kw::Drop)?;

        let object_type = match self.peek_kind() {
            Some(TokenKind::Keyword(Kw::Table)) => {
                self.advance();
                ObjectType::Table
            }
            Some(TokenKind::Keyword(Kw::View)) => {
                self.advance();
                ObjectType::View
            }
            Some(TokenKind::Keyword(Kw::Proc | Kw::Procedure)) => {
                self.advance();
                ObjectType::Procedure
            }
            Some(TokenKind::Keyword(Kw::Function)) => {
                self.advance();
                ObjectType::Function
            }
            Some(TokenKind::Keyword(Kw::Trigger)) => {
                self.advance();
                ObjectType::Trigger
            }
            Some(TokenKind::Keyword(Kw::Index)) => {
                self.advance();
                ObjectType::Index
            }
            Some(TokenKind::Keyword(Kw::Schema)) => {
                self.advance();
                ObjectType::Schema
            }
            Some(TokenKind::Keyword(Kw::Database)) => {
                self.advance();
                ObjectType::Database
            }
            Some(TokenKind::Ident(s)) if s.eq_ignore_ascii_case("SEQUENCE") => {
                self.advance();
                ObjectType::Sequence
            }
            Some(TokenKind::Ident(s)) if s.eq_ignore_ascii_case("TYPE") => {
                self.advance();
                ObjectType::Type
            }
            Some(TokenKind::Ident(s)) if s.eq_ignore_ascii_case("SYNONYM") => {
                self.advance();
                ObjectType::Synonym
            }
            Some(TokenKind::Ident(s)) if s.eq_ignore_ascii_case("SECURITY") => {
                self.advance();
                self.expect_word("POLICY")?;
                ObjectType::SecurityPolicy
            }
            Some(TokenKind::Ident(s)) if s.eq_ignore_ascii_case("PARTITION") => {
                self.advance();
                if self.eat_kw(Kw::Function) {
                    ObjectType::PartitionFunction
                } else {
                    self.expect_word("SCHEME")?;
                    ObjectType::PartitionScheme
                }
            }
            _ => return Err(self.err_expected("object kind after DROP")),
        };

        let if_exists = if self.check_kw(Kw::If) {
            self.advance();
            self.expect_kw(Kw::Exists)?;
            true
        } else {
            false
        };

        let names = self.parse_comma_sep(Self::parse_object_name)?;
        let on = if object_type == ObjectType::Index && self.eat_kw(Kw::On) {
            Some(self.parse_object_name()?)
        } else {
            None
        };

        Ok(DropStatement {
            object_type,
            if_exists,
            names,
            on,
        })
    }

    // -----------------------------------------------------------------------
    // DECLARE / SET
    // -----------------------------------------------------------------------

    fn parse_declare(&mut self) -> Result<StatementKind, SyntaxError> {
        self.expect_kw(Kw::Declare)?;

        if matches!(self.peek_kind(), Some(TokenKind::Variable(_))) {
            let declarations = self.parse_comma_sep(Self::parse_variable_declaration)?;
            return Ok(StatementKind::Declare(DeclareStatement { declarations }));
        }

        // DECLARE name CURSOR ...
        let name = self.parse_ident()?;
        self.expect_kw(Kw::Cursor)?;
        let options = self.parse_cursor_options();
        self.expect_kw(Kw::For)?;
        let query = self.parse_select_statement()?;
        let for_update_of = if self.check_kw(Kw::For) {
            self.advance();
            self.expect_kw(Kw::Update)?;
            if self.eat_kw(Kw::Of) {
                Some(self.parse_comma_sep(Self::parse_ident)?)
            } else {
                Some(Vec::new())
            }
        } else {
            None
        };

        Ok(StatementKind::DeclareCursor(DeclareCursorStatement {
            name,
            options,
            query,
            for_update_of,
        }))
    }

    fn parse_variable_declaration(&mut self) -> Result<VariableDeclaration, SyntaxError> {
        let name = self.parse_variable_name()?;
        let _ = self.eat_kw(Kw::As);

        let data_type = if self.check_kw(Kw::Table) {
            self.advance();
            self.expect(&TokenKind::LeftParen)?;
            let (columns, constraints) = self.parse_table_type_members()?;
            self.expect(&TokenKind::RightParen)?;
            DeclareType::Table {
                columns,
                constraints,
            }
        } else if self.check_kw(Kw::Cursor) {
            return Err(self.err_msg("cursor variables are not supported"));
        } else {
            DeclareType::Type(self.parse_type_name()?)
        };

        let init = if self.eat(&TokenKind::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Ok(VariableDeclaration {
            name,
            data_type,
            init,
        })
    }

    fn parse_cursor_options(&mut self) -> CursorOptions {
        let mut opts = CursorOptions::default();
        loop {
            if self.eat_word("LOCAL") {
                opts.local = true;
            } else if self.eat_word("GLOBAL") {
                opts.global = true;
            } else if self.eat_word("FORWARD_ONLY") {
                opts.forward_only = true;
            } else if self.eat_word("SCROLL") {
                opts.scroll = true;
            } else if self.eat_word("STATIC") {
                opts.static_ = true;
            } else if self.eat_word("KEYSET") {
                opts.keyset = true;
            } else if self.eat_word("DYNAMIC") {
                opts.dynamic = true;
            } else if self.eat_word("FAST_FORWARD") {
                opts.fast_forward = true;
            } else if self.eat_word("READ_ONLY") {
                opts.read_only = true;
            } else if self.eat_word("SCROLL_LOCKS") {
                opts.scroll_locks = true;
            } else if self.eat_word("OPTIMISTIC") {
                opts.optimistic = true;
            } else {
                break;
            }
        }
        opts
    }

    fn parse_set(&mut self) -> Result<StatementKind, SyntaxError> {
        self.expect_kw(Kw::Set)?;

        if matches!(self.peek_kind(), Some(TokenKind::Variable(_))) {
            let name = self.parse_variable_name()?;
            let op = self.parse_assign_op()?;
            let value = self.parse_expr()?;
            return Ok(StatementKind::SetVariable(SetVariableStatement {
                name,
                op,
                value,
            }));
        }

        // SET option: `SET NOCOUNT ON`, `SET TRANSACTION ISOLATION LEVEL ...`.
        let mut names = vec![self.parse_option_name()?];
        if names[0].matches("TRANSACTION") {
            self.expect_word("ISOLATION")?;
            self.expect_word("LEVEL")?;
            names.push(Ident::new("ISOLATION"));
            names.push(Ident::new("LEVEL"));
        }

        let value = if self.eat_kw(Kw::On) {
            OptionState::On
        } else if self.eat_kw(Kw::Off) {
            OptionState::Off
        } else {
            let mut words = Vec::new();
            while matches!(
                self.peek_kind(),
                Some(TokenKind::Ident(_) | TokenKind::Keyword(_))
            ) && !self.at_statement_boundary()
            {
                words.push(Ident::new(self.advance_token()?.text));
            }
            if words.is_empty() {
                return Err(self.err_expected("ON, OFF, or option value"));
            }
            OptionState::Words(words)
        };

        Ok(StatementKind::SetOption(SetOptionStatement {
            names,
            value,
        }))
    }

    // -----------------------------------------------------------------------
    // Control flow
    // -----------------------------------------------------------------------

    fn parse_if(&mut self) -> Result<IfStatement, SyntaxError> {
        self.expect_kw(Kw::If)?;
        let condition = self.parse_expr()?;
        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.eat_kw(Kw::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(IfStatement {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_while(&mut self) -> Result<WhileStatement, SyntaxError> {
        self.expect_kw(Kw::While)?;
        let condition = self.parse_expr()?;
        let body = Box::new(self.parse_statement()?);
        Ok(WhileStatement { condition, body })
    }

    fn parse_begin(&mut self) -> Result<StatementKind, SyntaxError> {
        self.expect_kw(Kw::Begin)?;

        if self.eat_kw(Kw::Distributed) {
            if !(self.eat_kw(Kw::Tran) || self.eat_kw(Kw::Transaction)) {
                return Err(self.err_expected("TRANSACTION"));
            }
            let name = self.try_ident();
            return Ok(StatementKind::BeginTransaction {
                distributed: true,
                name,
            });
        }
        if self.eat_kw(Kw::Tran) || self.eat_kw(Kw::Transaction) {
            let name = self.try_ident();
            return Ok(StatementKind::BeginTransaction {
                distributed: false,
                name,
            });
        }
        if self.eat_word("TRY") {
            return Ok(StatementKind::TryCatch(self.parse_try_catch()?));
        }

        // Plain statement block.
        let mut stmts: Vec<Statement> = Vec::new();
        while !self.check_kw(Kw::End) {
            if self.at_end() {
                return Err(self.err_expected("END"));
            }
            if self.eat(&TokenKind::Semicolon) {
                if let Some(last) = stmts.last_mut() {
                    last.terminated = true;
                }
                continue;
            }
            stmts.push(self.parse_statement()?);
        }
        self.expect_kw(Kw::End)?;
        Ok(StatementKind::Block(stmts))
    }

    fn parse_try_catch(&mut self) -> Result<TryCatchStatement, SyntaxError> {
        let try_block = self.parse_block_until_end()?;
        self.expect_word("TRY")?;
        self.expect_kw(Kw::Begin)?;
        self.expect_word("CATCH")?;
        let catch_block = self.parse_block_until_end()?;
        self.expect_word("CATCH")?;
        Ok(TryCatchStatement {
            try_block,
            catch_block,
        })
    }

    /// Statements up to and including the matching `END` (not consumed past).
    fn parse_block_until_end(&mut self) -> Result<Vec<Statement>, SyntaxError> {
        let mut stmts: Vec<Statement> = Vec::new();
        while !self.check_kw(Kw::End) {
            if self.at_end() {
                return Err(self.err_expected("END"));
            }
            if self.eat(&TokenKind::Semicolon) {
                if let Some(last) = stmts.last_mut() {
                    last.terminated = true;
                }
                continue;
            }
            stmts.push(self.parse_statement()?);
        }
        self.expect_kw(Kw::End)?;
        Ok(stmts)
    }

    fn parse_fetch(&mut self) -> Result<FetchStatement, SyntaxError> {
        self.expect_kw(Kw::Fetch)?;

        let direction = if self.eat_word("NEXT") {
            FetchDirection::Next
        } else if self.eat_word("PRIOR") {
            FetchDirection::Prior
        } else if self.eat_word("FIRST") {
            FetchDirection::First
        } else if self.eat_word("LAST") {
            FetchDirection::Last
        } else if self.eat_word("ABSOLUTE") {
            FetchDirection::Absolute(self.parse_expr_bp(crate::expr::bp::UNARY)?)
        } else if self.eat_word("RELATIVE") {
            FetchDirection::Relative(self.parse_expr_bp(crate::expr::bp::UNARY)?)
        } else {
            FetchDirection::Next
        };

        let _ = self.eat_kw(Kw::From);
        let cursor = self.parse_object_name()?;

        let into = if self.eat_kw(Kw::Into) {
            self.parse_comma_sep(Self::parse_variable_name)?
        } else {
            Vec::new()
        };

        Ok(FetchStatement {
            direction,
            cursor,
            into,
        })
    }

    // -----------------------------------------------------------------------
    // EXEC / EXECUTE
    // -----------------------------------------------------------------------

    fn parse_exec(&mut self) -> Result<StatementKind, SyntaxError> {
        // EXECUTE AS is a context switch, not a procedure call.
        if matches!(self.peek_nth_kind(1), Some(TokenKind::Keyword(Kw::As))) {
            self.advance(); // EXEC
            return Ok(StatementKind::ExecuteAs(self.parse_execute_as()?));
        }
        Ok(StatementKind::Execute(self.parse_execute_statement()?))
    }

    pub(crate) fn parse_execute_statement(&mut self) -> Result<ExecuteStatement, SyntaxError> {
        if !(self.eat_kw(Kw::Exec) || self.eat_kw(Kw::Execute)) {
            return Err(self.err_expected("EXEC"));
        }
        self.parse_execute_tail()
    }

    fn parse_execute_tail(&mut self) -> Result<ExecuteStatement, SyntaxError> {
        // Dynamic SQL: EXEC ('...' + @tail). The string content is opaque.
        if self.check(&TokenKind::LeftParen) {
            self.advance();
            let parts = self.parse_comma_sep(Self::parse_expr)?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(ExecuteStatement {
                return_variable: None,
                target: ExecuteTarget::Strings(parts),
                args: Vec::new(),
                result_sets: None,
            });
        }

        // Return-status capture: EXEC @rc = proc.
        let return_variable = if matches!(self.peek_kind(), Some(TokenKind::Variable(_)))
            && matches!(self.peek_nth_kind(1), Some(TokenKind::Eq))
        {
            let name = self.parse_variable_name()?;
            self.expect(&TokenKind::Eq)?;
            Some(name)
        } else {
            None
        };

        let target = if matches!(self.peek_kind(), Some(TokenKind::Variable(_))) {
            ExecuteTarget::Variable(self.parse_variable_name()?)
        } else {
            ExecuteTarget::Procedure(self.parse_object_name()?)
        };

        let args = if self.at_exec_arg_start() {
            self.parse_comma_sep(Self::parse_execute_arg)?
        } else {
            Vec::new()
        };

        let result_sets = if self.check_kw(Kw::With)
            && self.peek_nth_token(1).is_some_and(|t| t.is_word("RESULT"))
        {
            self.advance();
            self.advance();
            self.expect_word("SETS")?;
            Some(self.parse_result_sets()?)
        } else {
            None
        };

        Ok(ExecuteStatement {
            return_variable,
            target,
            args,
            result_sets,
        })
    }

    fn at_exec_arg_start(&self) -> bool {
        match self.peek_kind() {
            None | Some(TokenKind::Semicolon) => false,
            Some(TokenKind::Keyword(Kw::With)) => false,
            Some(k) if k.is_statement_start() => false,
            Some(
                TokenKind::Variable(_)
                | TokenKind::Int(_)
                | TokenKind::Numeric(_)
                | TokenKind::Str { .. }
                | TokenKind::Hex(_)
                | TokenKind::Ident(_)
                | TokenKind::QuotedId(..)
                | TokenKind::Minus
                | TokenKind::Keyword(Kw::Null | Kw::Default),
            ) => true,
            _ => false,
        }
    }

    fn parse_execute_arg(&mut self) -> Result<ExecuteArg, SyntaxError> {
        let name = if matches!(self.peek_kind(), Some(TokenKind::Variable(_)))
            && matches!(self.peek_nth_kind(1), Some(TokenKind::Eq))
        {
            let name = self.parse_variable_name()?;
            self.expect(&TokenKind::Eq)?;
            Some(name)
        } else {
            None
        };
        let value = self.parse_expr()?;
        let output = self.eat_word("OUTPUT") || self.eat_word("OUT");
        Ok(ExecuteArg {
            name,
            value,
            output,
        })
    }

    fn parse_result_sets(&mut self) -> Result<ResultSetsClause, SyntaxError> {
        if self.eat_word("NONE") {
            return Ok(ResultSetsClause::None);
        }
        if self.eat_word("UNDEFINED") {
            return Ok(ResultSetsClause::Undefined);
        }
        self.expect(&TokenKind::LeftParen)?;
        let mut sets = Vec::new();
        loop {
            self.expect(&TokenKind::LeftParen)?;
            sets.push(self.parse_comma_sep(Self::parse_schema_column)?);
            self.expect(&TokenKind::RightParen)?;
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(ResultSetsClause::Defined(sets))
    }

    fn parse_execute_as(&mut self) -> Result<ExecuteAsStatement, SyntaxError> {
        self.expect_kw(Kw::As)?;
        let context = if self.eat_word("CALLER") {
            ExecuteContext::Caller
        } else if self.eat_word("SELF") {
            ExecuteContext::SelfUser
        } else if self.eat_word("OWNER") {
            ExecuteContext::Owner
        } else if self.eat_kw(Kw::User) {
            self.expect(&TokenKind::Eq)?;
            ExecuteContext::User(self.parse_expr()?)
        } else if self.eat_word("LOGIN") {
            self.expect(&TokenKind::Eq)?;
            ExecuteContext::Login(self.parse_expr()?)
        } else {
            return Err(self.err_expected("CALLER, SELF, OWNER, USER, or LOGIN"));
        };

        let no_revert = if self.check_kw(Kw::With)
            && self.peek_nth_token(1).is_some_and(|t| t.is_word("NO"))
        {
            self.advance();
            self.advance();
            self.expect_kw(Kw::Revert)?;
            true
        } else {
            false
        };

        Ok(ExecuteAsStatement { context, no_revert })
    }

    // -----------------------------------------------------------------------
    // Errors: RAISERROR / THROW
    // -----------------------------------------------------------------------

    fn parse_raiserror(&mut self) -> Result<RaiserrorStatement, SyntaxError> {
        self.expect_kw(Kw::Raiserror)?;
        self.expect(&TokenKind::LeftParen)?;
        let message = self.parse_expr()?;
        self.expect(&TokenKind::Comma)?;
        let severity = self.parse_expr()?;
        self.expect(&TokenKind::Comma)?;
        let state = self.parse_expr()?;
        let mut args = Vec::new();
        while self.eat(&TokenKind::Comma) {
            args.push(self.parse_expr()?);
        }
        self.expect(&TokenKind::RightParen)?;

        let options = if self.eat_kw(Kw::With) {
            self.parse_comma_sep(Self::parse_ident)?
        } else {
            Vec::new()
        };

        Ok(RaiserrorStatement {
            message,
            severity,
            state,
            args,
            options,
        })
    }

    fn parse_throw(&mut self) -> Result<StatementKind, SyntaxError> {
        self.advance(); // THROW
        if self.at_statement_boundary() {
            return Ok(StatementKind::Throw(None));
        }
        let error_number = self.parse_expr()?;
        self.expect(&TokenKind::Comma)?;
        let message = self.parse_expr()?;
        self.expect(&TokenKind::Comma)?;
        let state = self.parse_expr()?;
        Ok(StatementKind::Throw(Some(ThrowArgs {
            error_number,
            message,
            state,
        })))
    }

    // -----------------------------------------------------------------------
    // BACKUP / RESTORE
    // -----------------------------------------------------------------------

    fn parse_backup(&mut self) -> Result<BackupStatement, SyntaxError> {
        self.expect_kw(Kw::Backup)?;
        let log = if self.eat_kw(Kw::Database) {
            false
        } else {
            self.expect_word("LOG")?;
            true
        };
        let database = self.parse_ident()?;
        self.expect_kw(Kw::To)?;
        let to = self.parse_comma_sep(Self::parse_backup_device)?;
        let options = if self.eat_kw(Kw::With) {
            self.parse_with_options()?
        } else {
            Vec::new()
        };
        Ok(BackupStatement {
            log,
            database,
            to,
            options,
        })
    }

    fn parse_restore(&mut self) -> Result<RestoreStatement, SyntaxError> {
        self.expect_kw(Kw::Restore)?;
        let kind = if self.eat_kw(Kw::Database) {
            RestoreKind::Database
        } else if self.eat_word("LOG") {
            RestoreKind::Log
        } else if self.eat_word("VERIFYONLY") {
            RestoreKind::VerifyOnly
        } else if self.eat_word("HEADERONLY") {
            RestoreKind::HeaderOnly
        } else if self.eat_word("FILELISTONLY") {
            RestoreKind::FileListOnly
        } else {
            return Err(self.err_expected("DATABASE, LOG, VERIFYONLY, HEADERONLY, or FILELISTONLY"));
        };

        let database = if matches!(kind, RestoreKind::Database | RestoreKind::Log) {
            Some(self.parse_ident()?)
        } else {
            None
        };

        self.expect_kw(Kw::From)?;
        let from = self.parse_comma_sep(Self::parse_backup_device)?;
        let options = if self.eat_kw(Kw::With) {
            self.parse_with_options()?
        } else {
            Vec::new()
        };

        Ok(RestoreStatement {
            kind,
            database,
            from,
            options,
        })
    }

    fn parse_backup_device(&mut self) -> Result<BackupDevice, SyntaxError> {
        let kind = if self.eat_word("DISK") {
            BackupDeviceKind::Disk
        } else if self.eat_word("TAPE") {
            BackupDeviceKind::Tape
        } else if self.eat_word("URL") {
            BackupDeviceKind::Url
        } else {
            return Err(self.err_expected("DISK, TAPE, or URL"));
        };
        self.expect(&TokenKind::Eq)?;
        let tok = self.advance_token()?;
        let TokenKind::Str { value: path, .. } = tok.kind else {
            return Err(SyntaxError {
                message: "expected device path string".to_owned(),
                span: tok.span,
                line: tok.line,
                col: tok.col,
            });
        };
        Ok(BackupDevice { kind, path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_one(sql: &str) -> Statement {
        let mut p = Parser::from_sql(sql);
        let (stmts, diags) = p.parse_statements();
        assert!(
            diags.iter().all(|d| !d.is_error()),
            "unexpected errors: {diags:?}"
        );
        assert_eq!(stmts.len(), 1, "expected one statement: {stmts:?}");
        stmts.into_iter().next().unwrap()
    }

    #[test]
    fn test_select_core_clauses() {
        let stmt = parse_one(
            "SELECT TOP 10 a, b AS total FROM dbo.t WHERE a > 1 GROUP BY a HAVING COUNT(*) > 2 ORDER BY a DESC",
        );
        let StatementKind::Select(sel) = stmt.kind else {
            panic!("not a select: {stmt:?}");
        };
        let SelectBody::Core(core) = &sel.body else {
            panic!("not a core");
        };
        assert!(core.top.is_some());
        assert_eq!(core.items.len(), 2);
        assert!(core.where_clause.is_some());
        assert_eq!(core.group_by.len(), 1);
        assert!(core.having.is_some());
        assert_eq!(sel.order_by.len(), 1);
        assert!(sel.order_by[0].desc);
    }

    #[test]
    fn test_select_star_and_qualified_star() {
        let stmt = parse_one("SELECT *, t.* FROM t");
        let StatementKind::Select(sel) = stmt.kind else {
            panic!()
        };
        let SelectBody::Core(core) = &sel.body else {
            panic!()
        };
        assert_eq!(core.items[0], SelectItem::Wildcard);
        assert!(matches!(&core.items[1], SelectItem::QualifiedWildcard(n) if n.parts.len() == 1));
    }

    #[test]
    fn test_union_all_is_left_associative() {
        let stmt = parse_one("SELECT 1 UNION ALL SELECT 2 UNION SELECT 3");
        let StatementKind::Select(sel) = stmt.kind else {
            panic!()
        };
        let SelectBody::SetOp { left, op, .. } = &sel.body else {
            panic!("expected set op at top");
        };
        assert_eq!(*op, SetOperator::Union { all: false });
        assert!(matches!(**left, SelectBody::SetOp { .. }));
    }

    #[test]
    fn test_cte_select() {
        let stmt = parse_one("WITH cte (n) AS (SELECT 1) SELECT n FROM cte");
        let StatementKind::Select(sel) = stmt.kind else {
            panic!()
        };
        let with = sel.with.expect("with clause");
        assert_eq!(with.ctes.len(), 1);
        assert_eq!(with.ctes[0].name.value, "cte");
        assert_eq!(with.ctes[0].columns.len(), 1);
    }

    #[test]
    fn test_joins_and_apply() {
        let stmt = parse_one(
            "SELECT * FROM a LEFT JOIN b ON a.id = b.id CROSS APPLY dbo.fn(a.id) AS f",
        );
        let StatementKind::Select(sel) = stmt.kind else {
            panic!()
        };
        let SelectBody::Core(core) = &sel.body else {
            panic!()
        };
        let TableSource::Apply { left, outer, .. } = &core.from[0] else {
            panic!("expected apply at top: {:?}", core.from[0]);
        };
        assert!(!outer);
        assert!(matches!(
            **left,
            TableSource::Join {
                kind: JoinKind::Left,
                ..
            }
        ));
    }

    #[test]
    fn test_offset_fetch_paging() {
        let stmt = parse_one("SELECT a FROM t ORDER BY a OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY");
        let StatementKind::Select(sel) = stmt.kind else {
            panic!()
        };
        let of = sel.offset_fetch.expect("offset fetch");
        assert!(of.fetch.is_some());
    }

    #[test]
    fn test_for_xml_path_with_root() {
        let stmt = parse_one("SELECT a FROM t FOR XML PATH('row'), ROOT('rows')");
        let StatementKind::Select(sel) = stmt.kind else {
            panic!()
        };
        let Some(ForClause::Xml {
            mode,
            element,
            options,
        }) = sel.for_clause
        else {
            panic!("expected FOR XML");
        };
        assert_eq!(mode, XmlMode::Path);
        assert_eq!(element.as_deref(), Some("row"));
        assert_eq!(options, vec!["ROOT('rows')".to_owned()]);
    }

    #[test]
    fn test_insert_values_multi_row() {
        let stmt = parse_one("INSERT INTO dbo.t (a, b) VALUES (1, 2), (3, 4)");
        let StatementKind::Insert(ins) = stmt.kind else {
            panic!()
        };
        assert_eq!(ins.columns.len(), 2);
        let InsertSource::Values(rows) = ins.source else {
            panic!()
        };
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_insert_select_with_output() {
        let stmt = parse_one("INSERT t OUTPUT inserted.id INTO @ids SELECT a FROM s");
        let StatementKind::Insert(ins) = stmt.kind else {
            panic!()
        };
        let output = ins.output.expect("output clause");
        assert!(output.into.is_some());
        assert!(matches!(ins.source, InsertSource::Select(_)));
    }

    #[test]
    fn test_update_with_from_and_compound_assign() {
        let stmt = parse_one("UPDATE t SET t.n += 1 FROM t JOIN s ON t.id = s.id WHERE s.x = 0");
        let StatementKind::Update(upd) = stmt.kind else {
            panic!()
        };
        assert_eq!(upd.assignments[0].op, AssignOp::AddAssign);
        assert_eq!(upd.from.len(), 1);
        assert!(matches!(upd.where_clause, Some(WhereClause::Expr(_))));
    }

    #[test]
    fn test_delete_where_current_of() {
        let stmt = parse_one("DELETE FROM t WHERE CURRENT OF my_cursor");
        let StatementKind::Delete(del) = stmt.kind else {
            panic!()
        };
        assert!(matches!(del.where_clause, Some(WhereClause::CurrentOf(_))));
    }

    #[test]
    fn test_merge_clauses() {
        let stmt = parse_one(
            "MERGE INTO t AS tgt USING s AS src ON tgt.id = src.id \
             WHEN MATCHED AND src.del = 1 THEN DELETE \
             WHEN MATCHED THEN UPDATE SET tgt.v = src.v \
             WHEN NOT MATCHED THEN INSERT (id, v) VALUES (src.id, src.v);",
        );
        let StatementKind::Merge(m) = stmt.kind else {
            panic!()
        };
        assert_eq!(m.clauses.len(), 3);
        assert_eq!(m.clauses[0].when, MergeWhen::Matched);
        assert!(m.clauses[0].condition.is_some());
        assert_eq!(m.clauses[2].when, MergeWhen::NotMatchedByTarget);
        assert!(stmt.terminated);
    }

    #[test]
    fn test_merge_without_semicolon_diagnosed() {
        let mut p = Parser::from_sql("MERGE t USING s ON t.id = s.id WHEN MATCHED THEN DELETE");
        let (stmts, diags) = p.parse_statements();
        assert_eq!(stmts.len(), 1);
        assert!(diags
            .iter()
            .any(|d| d.kind == DiagnosticKind::MissingTerminator && d.is_error()));
    }

    #[test]
    fn test_leading_with_after_unterminated_statement_warns() {
        let mut p =
            Parser::from_sql("SELECT 1\nWITH cte AS (SELECT 2 AS n) SELECT n FROM cte");
        let (stmts, diags) = p.parse_statements();
        assert_eq!(stmts.len(), 2);
        assert!(diags
            .iter()
            .any(|d| d.kind == DiagnosticKind::AmbiguousConstruct));
    }

    #[test]
    fn test_create_table_constraints_and_identity() {
        let stmt = parse_one(
            "CREATE TABLE dbo.t (\
               id INT IDENTITY(1, 1) NOT NULL PRIMARY KEY,\
               name NVARCHAR(50) NOT NULL,\
               CONSTRAINT uq_name UNIQUE (name)\
             )",
        );
        let StatementKind::CreateTable(ct) = stmt.kind else {
            panic!()
        };
        assert_eq!(ct.columns.len(), 2);
        assert_eq!(ct.constraints.len(), 1);
        assert!(ct.columns[0]
            .constraints
            .iter()
            .any(|c| matches!(c.kind, ColumnConstraintKind::Identity { seed: 1, increment: 1 })));
    }

    #[test]
    fn test_create_table_temporal_period() {
        let stmt = parse_one(
            "CREATE TABLE t (\
               id INT NOT NULL,\
               vf DATETIME2 GENERATED ALWAYS AS ROW START,\
               vt DATETIME2 GENERATED ALWAYS AS ROW END,\
               PERIOD FOR SYSTEM_TIME (vf, vt)\
             ) WITH (SYSTEM_VERSIONING = ON (HISTORY_TABLE = dbo.t_hist))",
        );
        let StatementKind::CreateTable(ct) = stmt.kind else {
            panic!()
        };
        assert!(ct.period.is_some());
        assert!(matches!(
            ct.options[0].value,
            Some(OptionValue::OnWith(_))
        ));
    }

    #[test]
    fn test_alter_table_add_constraint_with_check() {
        let stmt = parse_one(
            "ALTER TABLE t WITH NOCHECK ADD CONSTRAINT fk FOREIGN KEY (sid) REFERENCES s (id) ON DELETE CASCADE",
        );
        let StatementKind::AlterTable(at) = stmt.kind else {
            panic!()
        };
        let AlterTableAction::AddConstraints {
            with_check,
            constraints,
        } = at.action
        else {
            panic!()
        };
        assert_eq!(with_check, Some(false));
        let TableConstraintKind::ForeignKey { clause, .. } = &constraints[0].kind else {
            panic!()
        };
        assert_eq!(clause.on_delete, Some(FkAction::Cascade));
    }

    #[test]
    fn test_create_filtered_index() {
        let stmt = parse_one(
            "CREATE UNIQUE NONCLUSTERED INDEX ix ON t (a DESC) INCLUDE (b) WHERE a IS NOT NULL",
        );
        let StatementKind::CreateIndex(ci) = stmt.kind else {
            panic!()
        };
        assert!(ci.unique);
        assert_eq!(ci.clustered, Some(false));
        assert!(ci.columns[0].desc);
        assert_eq!(ci.include.len(), 1);
        assert!(ci.where_clause.is_some());
    }

    #[test]
    fn test_create_or_alter_view() {
        let stmt = parse_one("CREATE OR ALTER VIEW v AS SELECT a FROM t");
        let StatementKind::CreateView(cv) = stmt.kind else {
            panic!()
        };
        assert!(cv.or_alter);
        assert!(!cv.with_check_option);
    }

    #[test]
    fn test_create_procedure_with_params() {
        let stmt = parse_one(
            "CREATE PROCEDURE dbo.p @a INT, @b NVARCHAR(10) = N'x' OUTPUT AS BEGIN SELECT @a END",
        );
        let StatementKind::CreateProcedure(cp) = stmt.kind else {
            panic!()
        };
        assert_eq!(cp.params.len(), 2);
        assert!(cp.params[1].output);
        assert!(cp.params[1].default.is_some());
        assert_eq!(cp.body.len(), 1);
    }

    #[test]
    fn test_create_inline_table_function() {
        let stmt = parse_one(
            "CREATE FUNCTION dbo.f (@x INT) RETURNS TABLE AS RETURN (SELECT n FROM t WHERE n > @x)",
        );
        let StatementKind::CreateFunction(cf) = stmt.kind else {
            panic!()
        };
        assert!(matches!(cf.returns, FunctionReturns::Table));
        assert!(matches!(cf.body, FunctionBody::Return(_)));
    }

    #[test]
    fn test_create_trigger_after_events() {
        let stmt = parse_one(
            "CREATE TRIGGER trg ON dbo.t AFTER INSERT, UPDATE AS BEGIN SELECT 1 END",
        );
        let StatementKind::CreateTrigger(ct) = stmt.kind else {
            panic!()
        };
        assert_eq!(ct.timing, TriggerTiming::After);
        assert_eq!(ct.events, vec![TriggerEvent::Insert, TriggerEvent::Update]);
    }

    #[test]
    fn test_create_sequence_options() {
        let stmt = parse_one(
            "CREATE SEQUENCE dbo.seq AS BIGINT START WITH 100 INCREMENT BY 5 NO MAXVALUE CACHE 50",
        );
        let StatementKind::CreateSequence(cs) = stmt.kind else {
            panic!()
        };
        assert!(cs.start_with.is_some());
        assert_eq!(cs.max_value, Some(None));
        assert!(matches!(cs.cache, Some(Some(_))));
    }

    #[test]
    fn test_drop_if_exists_multiple() {
        let stmt = parse_one("DROP TABLE IF EXISTS a, dbo.b");
        let StatementKind::Drop(d) = stmt.kind else {
            panic!()
        };
        assert_eq!(d.object_type, ObjectType::Table);
        assert!(d.if_exists);
        assert_eq!(d.names.len(), 2);
    }

    #[test]
    fn test_drop_index_on_table() {
        let stmt = parse_one("DROP INDEX ix ON dbo.t");
        let StatementKind::Drop(d) = stmt.kind else {
            panic!()
        };
        assert_eq!(d.object_type, ObjectType::Index);
        assert!(d.on.is_some());
    }

    #[test]
    fn test_declare_variables_and_table() {
        let stmt = parse_one("DECLARE @n INT = 0, @t TABLE (id INT PRIMARY KEY)");
        let StatementKind::Declare(d) = stmt.kind else {
            panic!()
        };
        assert_eq!(d.declarations.len(), 2);
        assert!(d.declarations[0].init.is_some());
        assert!(matches!(d.declarations[1].data_type, DeclareType::Table { .. }));
    }

    #[test]
    fn test_declare_cursor_with_options() {
        let stmt = parse_one(
            "DECLARE c CURSOR LOCAL FAST_FORWARD FOR SELECT id FROM t FOR UPDATE OF id",
        );
        let StatementKind::DeclareCursor(dc) = stmt.kind else {
            panic!()
        };
        assert!(dc.options.local);
        assert!(dc.options.fast_forward);
        assert_eq!(dc.for_update_of, Some(vec![Ident::new("id")]));
    }

    #[test]
    fn test_cursor_lifecycle_statements() {
        let mut p = Parser::from_sql(
            "OPEN c; FETCH NEXT FROM c INTO @a, @b; CLOSE c; DEALLOCATE c;",
        );
        let (stmts, diags) = p.parse_statements();
        assert!(diags.is_empty());
        assert_eq!(stmts.len(), 4);
        let StatementKind::FetchCursor(f) = &stmts[1].kind else {
            panic!()
        };
        assert_eq!(f.direction, FetchDirection::Next);
        assert_eq!(f.into, vec!["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn test_set_variable_and_option() {
        let stmt = parse_one("SET @i += 2");
        let StatementKind::SetVariable(sv) = stmt.kind else {
            panic!()
        };
        assert_eq!(sv.op, AssignOp::AddAssign);

        let stmt = parse_one("SET NOCOUNT ON");
        let StatementKind::SetOption(so) = stmt.kind else {
            panic!()
        };
        assert_eq!(so.value, OptionState::On);

        let stmt = parse_one("SET TRANSACTION ISOLATION LEVEL READ COMMITTED");
        let StatementKind::SetOption(so) = stmt.kind else {
            panic!()
        };
        assert_eq!(so.names.len(), 3);
        assert!(matches!(so.value, OptionState::Words(ref w) if w.len() == 2));
    }

    #[test]
    fn test_if_else_and_block() {
        let stmt = parse_one("IF @n > 0 BEGIN SELECT 1; SELECT 2 END ELSE SELECT 3");
        let StatementKind::If(i) = stmt.kind else {
            panic!()
        };
        let StatementKind::Block(inner) = &i.then_branch.kind else {
            panic!()
        };
        assert_eq!(inner.len(), 2);
        assert!(inner[0].terminated);
        assert!(i.else_branch.is_some());
    }

    #[test]
    fn test_while_with_break() {
        let stmt = parse_one("WHILE @n < 10 BEGIN SET @n += 1; IF @n = 5 BREAK END");
        let StatementKind::While(w) = stmt.kind else {
            panic!()
        };
        assert!(matches!(w.body.kind, StatementKind::Block(_)));
    }

    #[test]
    fn test_try_catch_with_throw() {
        let stmt = parse_one(
            "BEGIN TRY SELECT 1 / 0 END TRY BEGIN CATCH THROW; END CATCH",
        );
        let StatementKind::TryCatch(tc) = stmt.kind else {
            panic!()
        };
        assert_eq!(tc.try_block.len(), 1);
        assert!(matches!(tc.catch_block[0].kind, StatementKind::Throw(None)));
    }

    #[test]
    fn test_transactions() {
        let mut p = Parser::from_sql("BEGIN TRAN t1; COMMIT TRANSACTION t1; ROLLBACK;");
        let (stmts, diags) = p.parse_statements();
        assert!(diags.is_empty());
        assert!(matches!(
            stmts[0].kind,
            StatementKind::BeginTransaction {
                distributed: false,
                name: Some(_)
            }
        ));
        assert!(matches!(
            stmts[2].kind,
            StatementKind::RollbackTransaction { name: None }
        ));
    }

    #[test]
    fn test_exec_procedure_named_args() {
        let stmt = parse_one("EXEC @rc = dbo.p @a = 1, @b = @v OUTPUT");
        let StatementKind::Execute(e) = stmt.kind else {
            panic!()
        };
        assert_eq!(e.return_variable, Some("rc".to_owned()));
        assert_eq!(e.args.len(), 2);
        assert_eq!(e.args[0].name, Some("a".to_owned()));
        assert!(e.args[1].output);
    }

    #[test]
    fn test_exec_dynamic_sql_string() {
        let stmt = parse_one("EXEC ('SELECT * FROM ' + @table)");
        let StatementKind::Execute(e) = stmt.kind else {
            panic!()
        };
        assert!(matches!(e.target, ExecuteTarget::Strings(_)));
    }

    #[test]
    fn test_execute_as_user() {
        let stmt = parse_one("EXECUTE AS USER = 'app_user'");
        let StatementKind::ExecuteAs(e) = stmt.kind else {
            panic!()
        };
        assert!(matches!(e.context, ExecuteContext::User(_)));
        assert!(!e.no_revert);
    }

    #[test]
    fn test_raiserror_with_nowait() {
        let stmt = parse_one("RAISERROR ('oops %d', 16, 1, @code) WITH NOWAIT");
        let StatementKind::Raiserror(r) = stmt.kind else {
            panic!()
        };
        assert_eq!(r.args.len(), 1);
        assert_eq!(r.options, vec![Ident::new("NOWAIT")]);
    }

    #[test]
    fn test_goto_and_label() {
        let mut p = Parser::from_sql("GOTO done; SELECT 1; done:");
        let (stmts, diags) = p.parse_statements();
        assert!(diags.is_empty());
        assert!(matches!(stmts[0].kind, StatementKind::Goto(_)));
        assert!(matches!(stmts[2].kind, StatementKind::Label(_)));
    }

    #[test]
    fn test_backup_and_restore() {
        let stmt = parse_one(
            "BACKUP DATABASE db TO DISK = 'C:\\b.bak' WITH INIT, NAME = 'full'",
        );
        let StatementKind::BackupDatabase(b) = stmt.kind else {
            panic!()
        };
        assert!(!b.log);
        assert_eq!(b.to[0].kind, BackupDeviceKind::Disk);
        assert_eq!(b.options.len(), 2);

        let stmt = parse_one("RESTORE HEADERONLY FROM DISK = 'C:\\b.bak'");
        let StatementKind::RestoreDatabase(r) = stmt.kind else {
            panic!()
        };
        assert_eq!(r.kind, RestoreKind::HeaderOnly);
        assert!(r.database.is_none());
    }

    #[test]
    fn test_unrecognized_statement_kept_as_raw_text() {
        let mut p = Parser::from_sql("GRANT SELECT ON t TO app_role; SELECT 1;");
        let (stmts, diags) = p.parse_statements();
        assert_eq!(stmts.len(), 2);
        let StatementKind::Unrecognized { sql } = &stmts[0].kind else {
            panic!("expected unrecognized: {stmts:?}");
        };
        assert_eq!(sql, "GRANT SELECT ON t TO app_role");
        assert!(diags
            .iter()
            .any(|d| d.kind == DiagnosticKind::UnrecognizedStatement));
        assert!(matches!(stmts[1].kind, StatementKind::Select(_)));
    }

    #[test]
    fn test_error_recovery_continues_at_next_statement() {
        let mut p = Parser::from_sql("SELECT FROM; SELECT 1;");
        let (stmts, diags) = p.parse_statements();
        assert!(diags.iter().any(Diagnostic::is_error));
        assert_eq!(stmts.len(), 1);
        assert!(matches!(stmts[0].kind, StatementKind::Select(_)));
    }

    #[test]
    fn test_pivot_source() {
        let stmt = parse_one(
            "SELECT * FROM sales PIVOT (SUM(amount) FOR quarter IN ([Q1], [Q2])) AS p",
        );
        let StatementKind::Select(sel) = stmt.kind else {
            panic!()
        };
        let SelectBody::Core(core) = &sel.body else {
            panic!()
        };
        let TableSource::Pivot {
            value_column,
            in_list,
            ..
        } = &core.from[0]
        else {
            panic!("expected pivot: {:?}", core.from[0]);
        };
        assert_eq!(value_column.value, "quarter");
        assert_eq!(in_list.len(), 2);
    }

    #[test]
    fn test_openjson_with_schema() {
        let stmt = parse_one(
            "SELECT j.a FROM OPENJSON(@doc) WITH (a INT '$.a', b NVARCHAR(50)) AS j",
        );
        let StatementKind::Select(sel) = stmt.kind else {
            panic!()
        };
        let SelectBody::Core(core) = &sel.body else {
            panic!()
        };
        let TableSource::Function { with_schema, .. } = &core.from[0] else {
            panic!()
        };
        assert_eq!(with_schema.len(), 2);
        assert_eq!(with_schema[0].path.as_deref(), Some("$.a"));
        assert!(with_schema[1].path.is_none());
    }

    #[test]
    fn test_nodes_method_rowset() {
        let stmt = parse_one("SELECT n.c.value('.', 'INT') FROM @doc.nodes('/r/i') AS n(c)");
        let StatementKind::Select(sel) = stmt.kind else {
            panic!()
        };
        let SelectBody::Core(core) = &sel.body else {
            panic!()
        };
        let TableSource::MethodCall {
            method, columns, ..
        } = &core.from[0]
        else {
            panic!()
        };
        assert_eq!(method.value, "nodes");
        assert_eq!(columns.len(), 1);
    }
}
