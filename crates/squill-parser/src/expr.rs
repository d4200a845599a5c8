//! Expression parsing (Pratt / precedence-climbing).
//!
//! Statement-level parsing lives in parser.rs; everything that produces an
//! [`Expr`] lives here. Binding powers encode the T-SQL precedence table:
//! unary tightest, then multiplicative, additive, bitwise, comparison,
//! `NOT`, `AND`, `OR` loosest. Method-call postfix (`col.value(...)`) and
//! `COLLATE` bind above everything else.

use squill_ast::{
    BinaryOp, Expr, FrameBound, FrameUnits, FunctionArgs, FunctionCall, Ident, InSet, Literal,
    ObjectName, OrderByItem, PseudoFunction, Quantifier, Span, TypeName, UnaryOp, WindowFrame,
    WindowSpec,
};

use crate::diag::SyntaxError;
use crate::parser::Parser;
use crate::token::{Kw, TokenKind};

/// Binding powers, `(left, right)` pairs for infix operators. Higher binds
/// tighter.
pub(crate) mod bp {
    pub const OR: (u8, u8) = (1, 2);
    pub const AND: (u8, u8) = (3, 4);
    pub const NOT_PREFIX: u8 = 5;
    /// Comparisons, `IN`, `LIKE`, `BETWEEN`, `IS [NOT] NULL`.
    pub const COMPARISON: (u8, u8) = (7, 8);
    pub const BITWISE: (u8, u8) = (9, 10);
    pub const ADD: (u8, u8) = (11, 12);
    pub const MUL: (u8, u8) = (13, 14);
    pub const UNARY: u8 = 15;
    pub const COLLATE: u8 = 17;
    pub const METHOD: u8 = 19;
}

/// XML/JSON accessor methods; a dotted call with one of these names is a
/// method on a value, anything else is a schema-qualified function.
const VALUE_METHODS: &[&str] = &["value", "query", "exist", "modify", "nodes"];

impl Parser {
    /// Parse a full expression.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_expr_bp(0)
    }

    pub(crate) fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr, SyntaxError> {
        let mut lhs = self.parse_prefix()?;

        loop {
            // Postfix method call: `.name(args)`.
            if self.check(&TokenKind::Dot) && bp::METHOD >= min_bp && self.peek_is_method_call() {
                lhs = self.parse_method_postfix(lhs)?;
                continue;
            }

            // COLLATE postfix.
            if self.check_kw(Kw::Collate) && bp::COLLATE >= min_bp {
                self.advance();
                let collation = self.parse_ident()?;
                let span = lhs.span();
                lhs = Expr::Collate {
                    expr: Box::new(lhs),
                    collation,
                    span,
                };
                continue;
            }

            // IS [NOT] NULL.
            if self.check_kw(Kw::Is) && bp::COMPARISON.0 >= min_bp {
                self.advance();
                let not = self.eat_kw(Kw::Not);
                self.expect_kw(Kw::Null)?;
                let span = lhs.span().merge(self.prev_span());
                lhs = Expr::IsNull {
                    expr: Box::new(lhs),
                    not,
                    span,
                };
                continue;
            }

            // [NOT] BETWEEN / IN / LIKE.
            if bp::COMPARISON.0 >= min_bp {
                let negated = self.check_kw(Kw::Not)
                    && matches!(
                        self.peek_nth_kind(1),
                        Some(TokenKind::Keyword(Kw::Between | Kw::In | Kw::Like))
                    );
                if negated {
                    self.advance(); // NOT
                }
                if self.check_kw(Kw::Between) {
                    lhs = self.parse_between(lhs, negated)?;
                    continue;
                }
                if self.check_kw(Kw::In) {
                    lhs = self.parse_in(lhs, negated)?;
                    continue;
                }
                if self.check_kw(Kw::Like) {
                    lhs = self.parse_like(lhs, negated)?;
                    continue;
                }
                debug_assert!(!negated);
            }

            let Some((op, l_bp, r_bp)) = self.peek_infix_op() else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            self.advance(); // the operator

            // Quantified comparison: `op ALL|ANY|SOME (subquery)`.
            if op.is_comparison() {
                if let Some(quantifier) = self.peek_quantifier() {
                    self.advance(); // the quantifier
                    self.expect(&TokenKind::LeftParen)?;
                    let subquery = self.parse_select_statement()?;
                    self.expect(&TokenKind::RightParen)?;
                    let span = lhs.span().merge(self.prev_span());
                    lhs = Expr::Quantified {
                        left: Box::new(lhs),
                        op,
                        quantifier,
                        subquery: Box::new(subquery),
                        span,
                    };
                    continue;
                }
            }

            let rhs = self.parse_expr_bp(r_bp)?;
            let span = lhs.span().merge(rhs.span());
            lhs = Expr::BinaryOp {
                left: Box::new(lhs),
                op,
                right: Box::new(rhs),
                span,
            };
        }

        Ok(lhs)
    }

    fn peek_infix_op(&self) -> Option<(BinaryOp, u8, u8)> {
        let kind = self.peek_kind()?;
        let (op, (l, r)) = match kind {
            TokenKind::Keyword(Kw::Or) => (BinaryOp::Or, bp::OR),
            TokenKind::Keyword(Kw::And) => (BinaryOp::And, bp::AND),
            TokenKind::Eq => (BinaryOp::Eq, bp::COMPARISON),
            TokenKind::Ne => (BinaryOp::Ne, bp::COMPARISON),
            TokenKind::Lt => (BinaryOp::Lt, bp::COMPARISON),
            TokenKind::Le => (BinaryOp::Le, bp::COMPARISON),
            TokenKind::Gt => (BinaryOp::Gt, bp::COMPARISON),
            TokenKind::Ge => (BinaryOp::Ge, bp::COMPARISON),
            TokenKind::NotLt => (BinaryOp::NotLt, bp::COMPARISON),
            TokenKind::NotGt => (BinaryOp::NotGt, bp::COMPARISON),
            TokenKind::Ampersand => (BinaryOp::BitAnd, bp::BITWISE),
            TokenKind::Pipe => (BinaryOp::BitOr, bp::BITWISE),
            TokenKind::Caret => (BinaryOp::BitXor, bp::BITWISE),
            TokenKind::Plus => (BinaryOp::Add, bp::ADD),
            TokenKind::Minus => (BinaryOp::Subtract, bp::ADD),
            TokenKind::Star => (BinaryOp::Multiply, bp::MUL),
            TokenKind::Slash => (BinaryOp::Divide, bp::MUL),
            TokenKind::PercentOp => (BinaryOp::Modulo, bp::MUL),
            _ => return None,
        };
        Some((op, l, r))
    }

    fn peek_quantifier(&self) -> Option<Quantifier> {
        let q = match self.peek_kind()? {
            TokenKind::Keyword(Kw::All) => Quantifier::All,
            TokenKind::Keyword(Kw::Any) => Quantifier::Any,
            TokenKind::Keyword(Kw::Some) => Quantifier::Some,
            _ => return None,
        };
        matches!(self.peek_nth_kind(1), Some(TokenKind::LeftParen)).then_some(q)
    }

    /// `.name(` after an expression.
    fn peek_is_method_call(&self) -> bool {
        matches!(
            self.peek_nth_kind(1),
            Some(TokenKind::Ident(_) | TokenKind::QuotedId(..))
        ) && matches!(self.peek_nth_kind(2), Some(TokenKind::LeftParen))
    }

    fn parse_method_postfix(&mut self, target: Expr) -> Result<Expr, SyntaxError> {
        self.expect(&TokenKind::Dot)?;
        let method = self.parse_ident()?;
        self.expect(&TokenKind::LeftParen)?;
        let args = self.parse_call_args()?;
        self.expect(&TokenKind::RightParen)?;
        let span = target.span().merge(self.prev_span());

        // `dbo.fn(x)` is a schema-qualified function call, not a method on
        // the value `dbo`. Only the known accessor methods bind to columns.
        if let Expr::Column(name, _) = &target {
            if !VALUE_METHODS
                .iter()
                .any(|m| method.value.eq_ignore_ascii_case(m))
            {
                let mut parts = name.parts.clone();
                parts.push(method);
                return self.finish_function_call(ObjectName { parts }, args, span);
            }
        }

        // Value methods take a plain argument list; `*` and `DISTINCT` have
        // no meaning here.
        let args = match args {
            FunctionArgs::List {
                distinct: false,
                args,
            } => args,
            FunctionArgs::List { distinct: true, .. } | FunctionArgs::Star => {
                return Err(self.err_msg(format!(
                    "{} takes an ordinary argument list",
                    method.value
                )));
            }
        };

        Ok(Expr::MethodCall {
            target: Box::new(target),
            method,
            args,
            span,
        })
    }

    // -----------------------------------------------------------------------
    // Prefix forms
    // -----------------------------------------------------------------------

    fn parse_prefix(&mut self) -> Result<Expr, SyntaxError> {
        let Some(kind) = self.peek_kind().cloned() else {
            return Err(self.err_expected("expression"));
        };
        let span = self.current_span();

        match kind {
            TokenKind::Int(n) => {
                self.advance();
                Ok(Expr::Literal(Literal::Int(n), span))
            }
            TokenKind::Numeric(text) => {
                self.advance();
                Ok(Expr::Literal(Literal::Numeric(text), span))
            }
            TokenKind::Hex(text) => {
                self.advance();
                Ok(Expr::Literal(Literal::Hex(text), span))
            }
            TokenKind::Str { value, unicode } => {
                self.advance();
                Ok(Expr::Literal(Literal::String { value, unicode }, span))
            }
            TokenKind::Keyword(Kw::Null) => {
                self.advance();
                Ok(Expr::Literal(Literal::Null, span))
            }
            TokenKind::Keyword(Kw::Default) => {
                self.advance();
                Ok(Expr::Default(span))
            }
            TokenKind::Variable(name) => {
                self.advance();
                Ok(Expr::Variable(name, span))
            }
            TokenKind::SysVariable(name) => {
                self.advance();
                Ok(Expr::SystemVariable(name, span))
            }
            TokenKind::DollarIdent(name) => self.parse_pseudo_function(&name, span),

            TokenKind::Minus => {
                self.advance();
                let expr = self.parse_expr_bp(bp::UNARY)?;
                let span = span.merge(expr.span());
                Ok(Expr::UnaryOp {
                    op: UnaryOp::Negate,
                    expr: Box::new(expr),
                    span,
                })
            }
            TokenKind::Plus => {
                self.advance();
                let expr = self.parse_expr_bp(bp::UNARY)?;
                let span = span.merge(expr.span());
                Ok(Expr::UnaryOp {
                    op: UnaryOp::Plus,
                    expr: Box::new(expr),
                    span,
                })
            }
            TokenKind::Tilde => {
                self.advance();
                let expr = self.parse_expr_bp(bp::UNARY)?;
                let span = span.merge(expr.span());
                Ok(Expr::UnaryOp {
                    op: UnaryOp::BitNot,
                    expr: Box::new(expr),
                    span,
                })
            }
            TokenKind::Keyword(Kw::Not) => {
                self.advance();
                if self.check_kw(Kw::Exists) {
                    return self.parse_exists(true, span);
                }
                let expr = self.parse_expr_bp(bp::NOT_PREFIX)?;
                let span = span.merge(expr.span());
                Ok(Expr::UnaryOp {
                    op: UnaryOp::Not,
                    expr: Box::new(expr),
                    span,
                })
            }
            TokenKind::Keyword(Kw::Exists) => self.parse_exists(false, span),
            TokenKind::Keyword(Kw::Case) => self.parse_case_expr(span),
            TokenKind::Keyword(Kw::Cast) => {
                self.advance();
                self.parse_cast_body(false, span)
            }
            TokenKind::Keyword(Kw::Convert) => {
                self.advance();
                self.parse_convert_body(false, span)
            }

            TokenKind::LeftParen => {
                self.advance();
                if self.at_select_start() {
                    let subquery = self.parse_select_statement()?;
                    self.expect(&TokenKind::RightParen)?;
                    let span = span.merge(self.prev_span());
                    Ok(Expr::Subquery(Box::new(subquery), span))
                } else {
                    // Grouping parens produce no AST node.
                    let inner = self.parse_expr()?;
                    self.expect(&TokenKind::RightParen)?;
                    Ok(inner)
                }
            }

            // LEFT(s, n) / RIGHT(s, n) are reserved words but valid builtins.
            TokenKind::Keyword(Kw::Left | Kw::Right)
                if matches!(self.peek_nth_kind(1), Some(TokenKind::LeftParen)) =>
            {
                let tok = self.advance_token()?;
                let name = ObjectName::bare(tok.text);
                self.expect(&TokenKind::LeftParen)?;
                let args = self.parse_call_args()?;
                self.expect(&TokenKind::RightParen)?;
                let span = span.merge(self.prev_span());
                self.finish_function_call(name, args, span)
            }

            TokenKind::Ident(_) | TokenKind::QuotedId(..) => self.parse_name_prefix(span),

            _ => Err(self.err_expected("expression")),
        }
    }

    /// Identifier-headed prefix: `TRY_CAST`/`TRY_CONVERT`, `NEXT VALUE FOR`,
    /// function calls, and plain (dotted) column references.
    fn parse_name_prefix(&mut self, span: Span) -> Result<Expr, SyntaxError> {
        if self.at_word("TRY_CAST")
            && matches!(self.peek_nth_kind(1), Some(TokenKind::LeftParen))
        {
            self.advance();
            return self.parse_cast_body(true, span);
        }
        if self.at_word("TRY_CONVERT")
            && matches!(self.peek_nth_kind(1), Some(TokenKind::LeftParen))
        {
            self.advance();
            return self.parse_convert_body(true, span);
        }
        if self.at_word("NEXT")
            && self
                .peek_nth_token(1)
                .is_some_and(|t| t.is_word("VALUE"))
            && matches!(self.peek_nth_kind(2), Some(TokenKind::Keyword(Kw::For)))
        {
            self.advance(); // NEXT
            self.advance(); // VALUE
            self.advance(); // FOR
            let sequence = self.parse_object_name()?;
            let span = span.merge(self.prev_span());
            return Ok(Expr::NextValueFor { sequence, span });
        }

        let mut parts = vec![self.parse_ident()?];
        loop {
            if !self.check(&TokenKind::Dot) {
                break;
            }
            // Leave `.name(` for the postfix pass so accessor methods chain.
            if self.peek_is_method_call() {
                break;
            }
            self.advance(); // the dot
            parts.push(self.parse_ident()?);
        }
        let name = ObjectName { parts };

        if self.check(&TokenKind::LeftParen) {
            self.advance();
            let args = self.parse_call_args()?;
            self.expect(&TokenKind::RightParen)?;
            let span = span.merge(self.prev_span());
            return self.finish_function_call(name, args, span);
        }

        let span = span.merge(self.prev_span());
        Ok(Expr::Column(name, span))
    }

    fn parse_pseudo_function(&mut self, name: &str, span: Span) -> Result<Expr, SyntaxError> {
        if name.eq_ignore_ascii_case("IDENTITY") {
            self.advance();
            return Ok(Expr::Pseudo(PseudoFunction::Identity, span));
        }
        if name.eq_ignore_ascii_case("ROWGUID") {
            self.advance();
            return Ok(Expr::Pseudo(PseudoFunction::Rowguid, span));
        }
        if name.eq_ignore_ascii_case("PARTITION") {
            self.advance();
            self.expect(&TokenKind::Dot)?;
            let function = self.parse_ident()?;
            self.expect(&TokenKind::LeftParen)?;
            let args = self.parse_comma_sep(Self::parse_expr)?;
            self.expect(&TokenKind::RightParen)?;
            let span = span.merge(self.prev_span());
            return Ok(Expr::Pseudo(
                PseudoFunction::Partition { function, args },
                span,
            ));
        }
        Err(self.err_msg(format!("unknown pseudo-column ${name}")))
    }

    fn parse_exists(&mut self, not: bool, span: Span) -> Result<Expr, SyntaxError> {
        self.expect_kw(Kw::Exists)?;
        self.expect(&TokenKind::LeftParen)?;
        let subquery = self.parse_select_statement()?;
        self.expect(&TokenKind::RightParen)?;
        let span = span.merge(self.prev_span());
        Ok(Expr::Exists {
            subquery: Box::new(subquery),
            not,
            span,
        })
    }

    fn parse_case_expr(&mut self, span: Span) -> Result<Expr, SyntaxError> {
        self.expect_kw(Kw::Case)?;
        let operand = if self.check_kw(Kw::When) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };

        let mut whens = Vec::new();
        while self.eat_kw(Kw::When) {
            let when = self.parse_expr()?;
            self.expect_kw(Kw::Then)?;
            let then = self.parse_expr()?;
            whens.push((when, then));
        }
        if whens.is_empty() {
            return Err(self.err_expected("WHEN"));
        }

        let else_expr = if self.eat_kw(Kw::Else) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_kw(Kw::End)?;
        let span = span.merge(self.prev_span());
        Ok(Expr::Case {
            operand,
            whens,
            else_expr,
            span,
        })
    }

    fn parse_cast_body(&mut self, try_cast: bool, span: Span) -> Result<Expr, SyntaxError> {
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        self.expect_kw(Kw::As)?;
        let type_name = self.parse_type_name()?;
        self.expect(&TokenKind::RightParen)?;
        let span = span.merge(self.prev_span());
        Ok(Expr::Cast {
            expr: Box::new(expr),
            type_name,
            try_cast,
            span,
        })
    }

    fn parse_convert_body(&mut self, try_convert: bool, span: Span) -> Result<Expr, SyntaxError> {
        self.expect(&TokenKind::LeftParen)?;
        let type_name = self.parse_type_name()?;
        self.expect(&TokenKind::Comma)?;
        let expr = self.parse_expr()?;
        let style = if self.eat(&TokenKind::Comma) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect(&TokenKind::RightParen)?;
        let span = span.merge(self.prev_span());
        Ok(Expr::Convert {
            type_name,
            expr: Box::new(expr),
            style,
            try_convert,
            span,
        })
    }

    // -----------------------------------------------------------------------
    // Predicates
    // -----------------------------------------------------------------------

    fn parse_between(&mut self, lhs: Expr, not: bool) -> Result<Expr, SyntaxError> {
        self.expect_kw(Kw::Between)?;
        // Bounds bind above AND so the separator is not consumed.
        let low = self.parse_expr_bp(bp::NOT_PREFIX)?;
        self.expect_kw(Kw::And)?;
        let high = self.parse_expr_bp(bp::NOT_PREFIX)?;
        let span = lhs.span().merge(high.span());
        Ok(Expr::Between {
            expr: Box::new(lhs),
            low: Box::new(low),
            high: Box::new(high),
            not,
            span,
        })
    }

    fn parse_in(&mut self, lhs: Expr, not: bool) -> Result<Expr, SyntaxError> {
        self.expect_kw(Kw::In)?;
        self.expect(&TokenKind::LeftParen)?;
        let set = if self.at_select_start() {
            InSet::Subquery(Box::new(self.parse_select_statement()?))
        } else {
            InSet::List(self.parse_comma_sep(Self::parse_expr)?)
        };
        self.expect(&TokenKind::RightParen)?;
        let span = lhs.span().merge(self.prev_span());
        Ok(Expr::In {
            expr: Box::new(lhs),
            set,
            not,
            span,
        })
    }

    fn parse_like(&mut self, lhs: Expr, not: bool) -> Result<Expr, SyntaxError> {
        self.expect_kw(Kw::Like)?;
        let pattern = self.parse_expr_bp(bp::COMPARISON.1)?;
        let escape = if self.eat_kw(Kw::Escape) {
            Some(Box::new(self.parse_expr_bp(bp::COMPARISON.1)?))
        } else {
            None
        };
        let span = lhs.span().merge(self.prev_span());
        Ok(Expr::Like {
            expr: Box::new(lhs),
            pattern: Box::new(pattern),
            escape,
            not,
            span,
        })
    }

    // -----------------------------------------------------------------------
    // Function calls and windows
    // -----------------------------------------------------------------------

    /// Argument list between parens: `*`, or `[DISTINCT|ALL] expr, ...`.
    fn parse_call_args(&mut self) -> Result<FunctionArgs, SyntaxError> {
        if self.check(&TokenKind::RightParen) {
            return Ok(FunctionArgs::List {
                distinct: false,
                args: Vec::new(),
            });
        }
        if self.check(&TokenKind::Star)
            && matches!(self.peek_nth_kind(1), Some(TokenKind::RightParen))
        {
            self.advance();
            return Ok(FunctionArgs::Star);
        }
        let distinct = self.eat_kw(Kw::Distinct);
        if !distinct {
            let _ = self.eat_kw(Kw::All);
        }
        let args = self.parse_comma_sep(Self::parse_expr)?;
        Ok(FunctionArgs::List { distinct, args })
    }

    fn finish_function_call(
        &mut self,
        name: ObjectName,
        args: FunctionArgs,
        span: Span,
    ) -> Result<Expr, SyntaxError> {
        let over = if self.eat_kw(Kw::Over) {
            self.expect(&TokenKind::LeftParen)?;
            let spec = self.parse_window_spec()?;
            self.expect(&TokenKind::RightParen)?;
            Some(spec)
        } else {
            None
        };
        let span = span.merge(self.prev_span());
        Ok(Expr::Function(FunctionCall {
            name,
            args,
            over,
            span,
        }))
    }

    fn parse_window_spec(&mut self) -> Result<WindowSpec, SyntaxError> {
        let mut partition_by = Vec::new();
        if self.at_word("PARTITION") {
            self.advance();
            self.expect_kw(Kw::By)?;
            partition_by = self.parse_comma_sep(Self::parse_expr)?;
        }

        let mut order_by = Vec::new();
        if self.eat_kw(Kw::Order) {
            self.expect_kw(Kw::By)?;
            order_by = self.parse_comma_sep(Self::parse_order_by_item)?;
        }

        let frame = if self.at_word("ROWS") || self.at_word("RANGE") {
            Some(self.parse_window_frame()?)
        } else {
            None
        };

        Ok(WindowSpec {
            partition_by,
            order_by,
            frame,
        })
    }

    pub(crate) fn parse_order_by_item(&mut self) -> Result<OrderByItem, SyntaxError> {
        let expr = self.parse_expr()?;
        let desc = if self.eat_kw(Kw::Desc) {
            true
        } else {
            let _ = self.eat_kw(Kw::Asc);
            false
        };
        Ok(OrderByItem { expr, desc })
    }

    fn parse_window_frame(&mut self) -> Result<WindowFrame, SyntaxError> {
        let units = if self.at_word("ROWS") {
            FrameUnits::Rows
        } else {
            FrameUnits::Range
        };
        self.advance();

        if self.eat_kw(Kw::Between) {
            let start = self.parse_frame_bound()?;
            self.expect_kw(Kw::And)?;
            let end = self.parse_frame_bound()?;
            Ok(WindowFrame {
                units,
                start,
                end: Some(end),
            })
        } else {
            let start = self.parse_frame_bound()?;
            Ok(WindowFrame {
                units,
                start,
                end: None,
            })
        }
    }

    fn parse_frame_bound(&mut self) -> Result<FrameBound, SyntaxError> {
        if self.at_word("UNBOUNDED") {
            self.advance();
            if self.at_word("PRECEDING") {
                self.advance();
                return Ok(FrameBound::UnboundedPreceding);
            }
            if self.at_word("FOLLOWING") {
                self.advance();
                return Ok(FrameBound::UnboundedFollowing);
            }
            return Err(self.err_expected("PRECEDING or FOLLOWING"));
        }
        if self.check_kw(Kw::Current) {
            self.advance();
            if !self.at_word("ROW") {
                return Err(self.err_expected("ROW"));
            }
            self.advance();
            return Ok(FrameBound::CurrentRow);
        }
        let expr = self.parse_expr_bp(bp::UNARY)?;
        if self.at_word("PRECEDING") {
            self.advance();
            Ok(FrameBound::Preceding(Box::new(expr)))
        } else if self.at_word("FOLLOWING") {
            self.advance();
            Ok(FrameBound::Following(Box::new(expr)))
        } else {
            Err(self.err_expected("PRECEDING or FOLLOWING"))
        }
    }

    // -----------------------------------------------------------------------
    // Types
    // -----------------------------------------------------------------------

    /// `INT`, `NVARCHAR(MAX)`, `DECIMAL(10, 2)`, `dbo.MyType`. Arguments are
    /// kept as raw text so `MAX` survives round-trips.
    pub(crate) fn parse_type_name(&mut self) -> Result<TypeName, SyntaxError> {
        let mut parts = vec![self.parse_type_ident()?];
        while self.eat(&TokenKind::Dot) {
            parts.push(self.parse_type_ident()?);
        }
        let name = ObjectName { parts };

        let mut args = Vec::new();
        if self.check(&TokenKind::LeftParen) {
            self.advance();
            loop {
                let tok = self.advance_token()?;
                match tok.kind {
                    TokenKind::Int(_) | TokenKind::Numeric(_) | TokenKind::Ident(_) => {
                        args.push(tok.text);
                    }
                    _ => {
                        return Err(SyntaxError {
                            message: "expected type argument".to_owned(),
                            span: tok.span,
                            line: tok.line,
                            col: tok.col,
                        })
                    }
                }
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RightParen)?;
        }

        Ok(TypeName { name, args })
    }

    /// Type-name parts allow a few reserved words (`NATIONAL CHARACTER` is
    /// out of scope; `IDENTITY` never is a type), so this stays narrow.
    fn parse_type_ident(&mut self) -> Result<Ident, SyntaxError> {
        self.parse_ident()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use pretty_assertions::assert_eq;

    fn expr(src: &str) -> Expr {
        let mut p = Parser::from_sql(src);
        p.parse_expr().expect("expression should parse")
    }

    fn expr_sql(src: &str) -> String {
        expr(src).to_string()
    }

    #[test]
    fn test_precedence_mul_over_add() {
        assert_eq!(expr_sql("1 + 2 * 3"), "1 + (2 * 3)");
        assert_eq!(expr_sql("(1 + 2) * 3"), "(1 + 2) * 3");
    }

    #[test]
    fn test_precedence_and_over_or() {
        assert_eq!(expr_sql("a = 1 OR b = 2 AND c = 3"), "(a = 1) OR ((b = 2) AND (c = 3))");
    }

    #[test]
    fn test_not_binds_looser_than_comparison() {
        let e = expr("NOT a = 1");
        let Expr::UnaryOp { op, expr: inner, .. } = e else {
            panic!("expected unary NOT, got {e:?}");
        };
        assert_eq!(op, UnaryOp::Not);
        assert!(matches!(*inner, Expr::BinaryOp { op: BinaryOp::Eq, .. }));
    }

    #[test]
    fn test_string_concat_is_plus() {
        let e = expr("'a' + 'b'");
        assert!(matches!(e, Expr::BinaryOp { op: BinaryOp::Add, .. }));
    }

    #[test]
    fn test_between_does_not_eat_following_and() {
        let e = expr("x BETWEEN 1 AND 10 AND y = 2");
        let Expr::BinaryOp { op: BinaryOp::And, left, .. } = e else {
            panic!("expected top-level AND");
        };
        assert!(matches!(*left, Expr::Between { .. }));
    }

    #[test]
    fn test_not_between() {
        let e = expr("x NOT BETWEEN 1 AND 2");
        assert!(matches!(e, Expr::Between { not: true, .. }));
    }

    #[test]
    fn test_in_list_and_subquery() {
        let e = expr("x IN (1, 2, 3)");
        let Expr::In { set: InSet::List(items), not: false, .. } = e else {
            panic!("expected IN list");
        };
        assert_eq!(items.len(), 3);

        let e = expr("x NOT IN (SELECT id FROM t)");
        assert!(matches!(e, Expr::In { set: InSet::Subquery(_), not: true, .. }));
    }

    #[test]
    fn test_like_with_escape() {
        let e = expr("name LIKE '%x!%%' ESCAPE '!'");
        let Expr::Like { escape: Some(_), not: false, .. } = e else {
            panic!("expected LIKE with ESCAPE");
        };
    }

    #[test]
    fn test_is_null_and_is_not_null() {
        assert!(matches!(expr("x IS NULL"), Expr::IsNull { not: false, .. }));
        assert!(matches!(expr("x IS NOT NULL"), Expr::IsNull { not: true, .. }));
    }

    #[test]
    fn test_quantified_comparison() {
        let e = expr("amount > ALL (SELECT amount FROM orders)");
        let Expr::Quantified { op, quantifier, .. } = e else {
            panic!("expected quantified comparison");
        };
        assert_eq!(op, BinaryOp::Gt);
        assert_eq!(quantifier, Quantifier::All);
    }

    #[test]
    fn test_any_without_subquery_is_error() {
        // ANY not followed by ( is not a quantifier position
        let mut p = Parser::from_sql("x = ANY y");
        assert!(p.parse_expr().is_err());
    }

    #[test]
    fn test_case_searched_and_simple() {
        let e = expr("CASE WHEN a = 1 THEN 'one' ELSE 'other' END");
        let Expr::Case { operand: None, whens, else_expr: Some(_), .. } = e else {
            panic!("expected searched CASE");
        };
        assert_eq!(whens.len(), 1);

        let e = expr("CASE status WHEN 1 THEN 'open' WHEN 2 THEN 'closed' END");
        let Expr::Case { operand: Some(_), whens, else_expr: None, .. } = e else {
            panic!("expected simple CASE");
        };
        assert_eq!(whens.len(), 2);
    }

    #[test]
    fn test_nested_case() {
        let e = expr("CASE WHEN a = 1 THEN CASE WHEN b = 2 THEN 1 ELSE 0 END ELSE 9 END");
        let Expr::Case { whens, .. } = e else {
            panic!("expected CASE");
        };
        assert!(matches!(whens[0].1, Expr::Case { .. }));
    }

    #[test]
    fn test_cast_and_try_cast() {
        let e = expr("CAST(x AS DECIMAL(10, 2))");
        let Expr::Cast { try_cast: false, type_name, .. } = e else {
            panic!("expected CAST");
        };
        assert_eq!(type_name.args, vec!["10".to_owned(), "2".to_owned()]);

        assert!(matches!(
            expr("TRY_CAST(x AS INT)"),
            Expr::Cast { try_cast: true, .. }
        ));
    }

    #[test]
    fn test_convert_with_style() {
        let e = expr("CONVERT(VARCHAR(10), created_at, 112)");
        let Expr::Convert { style: Some(_), try_convert: false, .. } = e else {
            panic!("expected CONVERT with style");
        };
        assert!(matches!(
            expr("TRY_CONVERT(INT, s)"),
            Expr::Convert { try_convert: true, .. }
        ));
    }

    #[test]
    fn test_nvarchar_max_round_trips() {
        let e = expr("CAST(x AS NVARCHAR(MAX))");
        assert_eq!(e.to_string(), "CAST(x AS NVARCHAR(MAX))");
    }

    #[test]
    fn test_function_call_star_and_distinct() {
        let e = expr("COUNT(*)");
        let Expr::Function(call) = &e else {
            panic!("expected function");
        };
        assert_eq!(call.args, FunctionArgs::Star);

        let e = expr("COUNT(DISTINCT customer_id)");
        let Expr::Function(call) = &e else {
            panic!("expected function");
        };
        assert!(matches!(call.args, FunctionArgs::List { distinct: true, .. }));
    }

    #[test]
    fn test_schema_qualified_function_call() {
        let e = expr("dbo.fn_total(@id)");
        let Expr::Function(call) = &e else {
            panic!("expected function, got {e:?}");
        };
        assert_eq!(call.name.parts.len(), 2);
        assert_eq!(call.name.parts[0].value, "dbo");
    }

    #[test]
    fn test_xml_method_call_on_column() {
        let e = expr("props.value('(/a/b)[1]', 'INT')");
        let Expr::MethodCall { target, method, args, .. } = &e else {
            panic!("expected method call, got {e:?}");
        };
        assert!(matches!(**target, Expr::Column(..)));
        assert_eq!(method.value, "value");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_chained_method_calls() {
        let e = expr("doc.query('/r').value('.', 'NVARCHAR(40)')");
        let Expr::MethodCall { target, method, .. } = &e else {
            panic!("expected outer method call");
        };
        assert_eq!(method.value, "value");
        assert!(matches!(**target, Expr::MethodCall { .. }));
    }

    #[test]
    fn test_method_call_on_variable() {
        let e = expr("@doc.exist('/root')");
        let Expr::MethodCall { target, .. } = &e else {
            panic!("expected method call");
        };
        assert!(matches!(**target, Expr::Variable(..)));
    }

    #[test]
    fn test_method_call_rejects_star_argument() {
        let mut p = Parser::from_sql("@doc.value(*)");
        assert!(p.parse_expr().is_err());
    }

    #[test]
    fn test_window_function() {
        let e = expr("ROW_NUMBER() OVER (PARTITION BY dept ORDER BY salary DESC)");
        let Expr::Function(call) = &e else {
            panic!("expected function");
        };
        let over = call.over.as_ref().expect("window spec");
        assert_eq!(over.partition_by.len(), 1);
        assert_eq!(over.order_by.len(), 1);
        assert!(over.order_by[0].desc);
    }

    #[test]
    fn test_window_frame() {
        let e = expr(
            "SUM(x) OVER (ORDER BY d ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)",
        );
        let Expr::Function(call) = &e else {
            panic!("expected function");
        };
        let frame = call.over.as_ref().unwrap().frame.as_ref().expect("frame");
        assert_eq!(frame.units, FrameUnits::Rows);
        assert_eq!(frame.start, FrameBound::UnboundedPreceding);
        assert_eq!(frame.end, Some(FrameBound::CurrentRow));
    }

    #[test]
    fn test_collate_postfix() {
        let e = expr("name COLLATE Latin1_General_CI_AS");
        let Expr::Collate { collation, .. } = &e else {
            panic!("expected COLLATE");
        };
        assert_eq!(collation.value, "Latin1_General_CI_AS");
    }

    #[test]
    fn test_next_value_for() {
        let e = expr("NEXT VALUE FOR dbo.OrderNumbers");
        let Expr::NextValueFor { sequence, .. } = &e else {
            panic!("expected NEXT VALUE FOR");
        };
        assert_eq!(sequence.parts.len(), 2);
    }

    #[test]
    fn test_dollar_pseudo_functions() {
        let e = expr("$PARTITION.pf_range(order_date)");
        assert!(matches!(e, Expr::Pseudo(PseudoFunction::Partition { .. }, _)));
        assert!(matches!(
            expr("$IDENTITY"),
            Expr::Pseudo(PseudoFunction::Identity, _)
        ));
        assert!(matches!(
            expr("$ROWGUID"),
            Expr::Pseudo(PseudoFunction::Rowguid, _)
        ));
    }

    #[test]
    fn test_exists_and_not_exists() {
        assert!(matches!(
            expr("EXISTS (SELECT 1 FROM t)"),
            Expr::Exists { not: false, .. }
        ));
        assert!(matches!(
            expr("NOT EXISTS (SELECT 1 FROM t)"),
            Expr::Exists { not: true, .. }
        ));
    }

    #[test]
    fn test_scalar_subquery() {
        let e = expr("(SELECT MAX(id) FROM t)");
        assert!(matches!(e, Expr::Subquery(..)));
    }

    #[test]
    fn test_variables_in_expressions() {
        let e = expr("@total + @@ROWCOUNT");
        let Expr::BinaryOp { left, right, .. } = e else {
            panic!("expected binary op");
        };
        assert!(matches!(*left, Expr::Variable(..)));
        assert!(matches!(*right, Expr::SystemVariable(..)));
    }

    #[test]
    fn test_expr_span_covers_whole_expression() {
        let e = expr("1 + 2");
        assert_eq!(e.span(), Span::new(0, 5));
    }

    #[test]
    fn test_bitwise_precedence_between_comparison_and_add() {
        // a + b & c  =>  (a + b) & c
        assert_eq!(expr_sql("a + b & c"), "(a + b) & c");
        // a & b = c  =>  (a & b) = c
        assert_eq!(expr_sql("a & b = c"), "(a & b) = c");
    }
}
