//! SQL re-serialization via `fmt::Display` for AST nodes.
//!
//! Every AST type implements `Display` to reconstruct valid T-SQL text. This
//! enables the round-trip property: re-parsing `node.to_string()` yields a
//! structurally equal node. Compound sub-expressions are parenthesized on
//! output; grouping parentheses do not create AST nodes, so the extra parens
//! are structurally invisible to the re-parse.

#[allow(clippy::wildcard_imports)]
use crate::*;
use std::fmt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn comma_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn word_list(f: &mut fmt::Formatter<'_>, items: &[String]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(item)?;
    }
    Ok(())
}

fn write_string_literal(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    write!(f, "'{}'", value.replace('\'', "''"))
}

/// Wrap compound operands in parentheses so precedence survives the
/// print → re-parse trip and adjacent operators never merge.
fn paren_if_compound(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    if matches!(
        expr,
        Expr::BinaryOp { .. }
            | Expr::UnaryOp { .. }
            | Expr::Quantified { .. }
            | Expr::Between { .. }
            | Expr::In { .. }
            | Expr::Like { .. }
            | Expr::IsNull { .. }
            | Expr::Collate { .. }
    ) {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

fn statement_list(f: &mut fmt::Formatter<'_>, stmts: &[Statement]) -> fmt::Result {
    for stmt in stmts {
        writeln!(f, "{stmt}")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Identifiers and names
// ---------------------------------------------------------------------------

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quote {
            Some(QuoteStyle::Bracket) => write!(f, "[{}]", self.value.replace(']', "]]")),
            Some(QuoteStyle::Double) => write!(f, "\"{}\"", self.value.replace('"', "\"\"")),
            None => f.write_str(&self.value),
        }
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Script, batch, statement
// ---------------------------------------------------------------------------

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, batch) in self.batches.iter().enumerate() {
            write!(f, "{batch}")?;
            // GO follows the batch it repeats; a bare separator is only
            // needed between batches.
            if batch.repeat > 1 {
                writeln!(f, "GO {}", batch.repeat)?;
            } else if i + 1 < self.batches.len() {
                f.write_str("GO\n")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        statement_list(f, &self.statements)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if self.terminated {
            f.write_str(";")?;
        }
        Ok(())
    }
}

impl fmt::Display for StatementKind {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(s) => write!(f, "{s}"),
            Self::Insert(s) => write!(f, "{s}"),
            Self::BulkInsert(s) => write!(f, "{s}"),
            Self::Update(s) => write!(f, "{s}"),
            Self::Delete(s) => write!(f, "{s}"),
            Self::Merge(s) => write!(f, "{s}"),
            Self::Truncate(name) => write!(f, "TRUNCATE TABLE {name}"),
            Self::CreateTable(s) => write!(f, "{s}"),
            Self::AlterTable(s) => write!(f, "{s}"),
            Self::CreateIndex(s) => write!(f, "{s}"),
            Self::CreateView(s) => write!(f, "{s}"),
            Self::CreateProcedure(s) => write!(f, "{s}"),
            Self::CreateFunction(s) => write!(f, "{s}"),
            Self::CreateTrigger(s) => write!(f, "{s}"),
            Self::CreateSequence(s) => write!(f, "{s}"),
            Self::CreateSchema(s) => write!(f, "{s}"),
            Self::CreateType(s) => write!(f, "{s}"),
            Self::CreateSynonym(s) => write!(f, "{s}"),
            Self::CreateSecurityPolicy(s) => write!(f, "{s}"),
            Self::CreatePartitionFunction(s) => write!(f, "{s}"),
            Self::CreatePartitionScheme(s) => write!(f, "{s}"),
            Self::Drop(s) => write!(f, "{s}"),
            Self::Declare(s) => write!(f, "{s}"),
            Self::DeclareCursor(s) => write!(f, "{s}"),
            Self::SetVariable(s) => write!(f, "{s}"),
            Self::SetOption(s) => write!(f, "{s}"),
            Self::If(s) => write!(f, "{s}"),
            Self::While(s) => write!(f, "{s}"),
            Self::Block(stmts) => {
                f.write_str("BEGIN\n")?;
                statement_list(f, stmts)?;
                f.write_str("END")
            }
            Self::Goto(label) => write!(f, "GOTO {label}"),
            Self::Label(name) => write!(f, "{name}:"),
            Self::TryCatch(s) => write!(f, "{s}"),
            Self::Break => f.write_str("BREAK"),
            Self::Continue => f.write_str("CONTINUE"),
            Self::Return(None) => f.write_str("RETURN"),
            Self::Return(Some(e)) => write!(f, "RETURN {e}"),
            Self::Waitfor(s) => write!(f, "{s}"),
            Self::OpenCursor(name) => write!(f, "OPEN {name}"),
            Self::FetchCursor(s) => write!(f, "{s}"),
            Self::CloseCursor(name) => write!(f, "CLOSE {name}"),
            Self::DeallocateCursor(name) => write!(f, "DEALLOCATE {name}"),
            Self::Execute(s) => write!(f, "{s}"),
            Self::ExecuteAs(s) => write!(f, "{s}"),
            Self::Revert => f.write_str("REVERT"),
            Self::Print(e) => write!(f, "PRINT {e}"),
            Self::Raiserror(s) => write!(f, "{s}"),
            Self::Throw(None) => f.write_str("THROW"),
            Self::Throw(Some(args)) => write!(
                f,
                "THROW {}, {}, {}",
                args.error_number, args.message, args.state
            ),
            Self::Use(db) => write!(f, "USE {db}"),
            Self::BeginTransaction { distributed, name } => {
                f.write_str("BEGIN ")?;
                if *distributed {
                    f.write_str("DISTRIBUTED ")?;
                }
                f.write_str("TRANSACTION")?;
                if let Some(n) = name {
                    write!(f, " {n}")?;
                }
                Ok(())
            }
            Self::CommitTransaction { name } => {
                f.write_str("COMMIT TRANSACTION")?;
                if let Some(n) = name {
                    write!(f, " {n}")?;
                }
                Ok(())
            }
            Self::RollbackTransaction { name } => {
                f.write_str("ROLLBACK TRANSACTION")?;
                if let Some(n) = name {
                    write!(f, " {n}")?;
                }
                Ok(())
            }
            Self::SaveTransaction(name) => write!(f, "SAVE TRANSACTION {name}"),
            Self::BackupDatabase(s) => write!(f, "{s}"),
            Self::RestoreDatabase(s) => write!(f, "{s}"),
            Self::Unrecognized { sql } => f.write_str(sql),
        }
    }
}

// ---------------------------------------------------------------------------
// Literals and operators
// ---------------------------------------------------------------------------

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Numeric(text) | Self::Hex(text) => f.write_str(text),
            Self::String { value, unicode } => {
                if *unicode {
                    f.write_str("N")?;
                }
                write_string_literal(f, value)
            }
            Self::Null => f.write_str("NULL"),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::NotLt => "!<",
            Self::NotGt => "!>",
            Self::And => "AND",
            Self::Or => "OR",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
        })
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Not => "NOT",
            Self::Negate => "-",
            Self::Plus => "+",
            Self::BitNot => "~",
        })
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "ALL",
            Self::Any => "ANY",
            Self::Some => "SOME",
        })
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
        })
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

impl fmt::Display for Expr {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(lit, _) => write!(f, "{lit}"),
            Self::Variable(name, _) => write!(f, "@{name}"),
            Self::SystemVariable(name, _) => write!(f, "@@{name}"),
            Self::Column(name, _) => write!(f, "{name}"),
            Self::Default(_) => f.write_str("DEFAULT"),
            Self::UnaryOp { op, expr, .. } => {
                if *op == UnaryOp::Not {
                    f.write_str("NOT ")?;
                } else {
                    write!(f, "{op}")?;
                }
                paren_if_compound(f, expr)
            }
            Self::BinaryOp {
                left, op, right, ..
            } => {
                paren_if_compound(f, left)?;
                write!(f, " {op} ")?;
                paren_if_compound(f, right)
            }
            Self::Quantified {
                left,
                op,
                quantifier,
                subquery,
                ..
            } => {
                paren_if_compound(f, left)?;
                write!(f, " {op} {quantifier} ({subquery})")
            }
            Self::Between {
                expr,
                low,
                high,
                not,
                ..
            } => {
                paren_if_compound(f, expr)?;
                if *not {
                    f.write_str(" NOT")?;
                }
                f.write_str(" BETWEEN ")?;
                paren_if_compound(f, low)?;
                f.write_str(" AND ")?;
                paren_if_compound(f, high)
            }
            Self::In { expr, set, not, .. } => {
                paren_if_compound(f, expr)?;
                if *not {
                    f.write_str(" NOT")?;
                }
                f.write_str(" IN (")?;
                match set {
                    InSet::List(items) => comma_list(f, items)?,
                    InSet::Subquery(q) => write!(f, "{q}")?,
                }
                f.write_str(")")
            }
            Self::Like {
                expr,
                pattern,
                escape,
                not,
                ..
            } => {
                paren_if_compound(f, expr)?;
                if *not {
                    f.write_str(" NOT")?;
                }
                f.write_str(" LIKE ")?;
                paren_if_compound(f, pattern)?;
                if let Some(esc) = escape {
                    f.write_str(" ESCAPE ")?;
                    paren_if_compound(f, esc)?;
                }
                Ok(())
            }
            Self::IsNull { expr, not, .. } => {
                paren_if_compound(f, expr)?;
                if *not {
                    f.write_str(" IS NOT NULL")
                } else {
                    f.write_str(" IS NULL")
                }
            }
            Self::Exists { subquery, not, .. } => {
                if *not {
                    f.write_str("NOT ")?;
                }
                write!(f, "EXISTS ({subquery})")
            }
            Self::Subquery(q, _) => write!(f, "({q})"),
            Self::Case {
                operand,
                whens,
                else_expr,
                ..
            } => {
                f.write_str("CASE")?;
                if let Some(op) = operand {
                    write!(f, " {op}")?;
                }
                for (when, then) in whens {
                    write!(f, " WHEN {when} THEN {then}")?;
                }
                if let Some(e) = else_expr {
                    write!(f, " ELSE {e}")?;
                }
                f.write_str(" END")
            }
            Self::Cast {
                expr,
                type_name,
                try_cast,
                ..
            } => {
                if *try_cast {
                    f.write_str("TRY_")?;
                }
                write!(f, "CAST({expr} AS {type_name})")
            }
            Self::Convert {
                type_name,
                expr,
                style,
                try_convert,
                ..
            } => {
                if *try_convert {
                    f.write_str("TRY_")?;
                }
                write!(f, "CONVERT({type_name}, {expr}")?;
                if let Some(s) = style {
                    write!(f, ", {s}")?;
                }
                f.write_str(")")
            }
            Self::Function(call) => write!(f, "{call}"),
            Self::MethodCall {
                target,
                method,
                args,
                ..
            } => {
                paren_if_compound(f, target)?;
                write!(f, ".{method}(")?;
                comma_list(f, args)?;
                f.write_str(")")
            }
            Self::Collate {
                expr, collation, ..
            } => {
                paren_if_compound(f, expr)?;
                write!(f, " COLLATE {collation}")
            }
            Self::NextValueFor { sequence, .. } => write!(f, "NEXT VALUE FOR {sequence}"),
            Self::Pseudo(pseudo, _) => write!(f, "{pseudo}"),
        }
    }
}

impl fmt::Display for PseudoFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Partition { function, args } => {
                write!(f, "$PARTITION.{function}(")?;
                comma_list(f, args)?;
                f.write_str(")")
            }
            Self::Identity => f.write_str("$IDENTITY"),
            Self::Rowguid => f.write_str("$ROWGUID"),
        }
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        match &self.args {
            FunctionArgs::Star => f.write_str("*")?,
            FunctionArgs::List { distinct, args } => {
                if *distinct {
                    f.write_str("DISTINCT ")?;
                }
                comma_list(f, args)?;
            }
        }
        f.write_str(")")?;
        if let Some(over) = &self.over {
            write!(f, " OVER ({over})")?;
        }
        Ok(())
    }
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut need_space = false;
        if !self.partition_by.is_empty() {
            f.write_str("PARTITION BY ")?;
            comma_list(f, &self.partition_by)?;
            need_space = true;
        }
        if !self.order_by.is_empty() {
            if need_space {
                f.write_str(" ")?;
            }
            f.write_str("ORDER BY ")?;
            comma_list(f, &self.order_by)?;
            need_space = true;
        }
        if let Some(frame) = &self.frame {
            if need_space {
                f.write_str(" ")?;
            }
            write!(f, "{frame}")?;
        }
        Ok(())
    }
}

impl fmt::Display for WindowFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.units {
            FrameUnits::Rows => f.write_str("ROWS ")?,
            FrameUnits::Range => f.write_str("RANGE ")?,
        }
        if let Some(end) = &self.end {
            write!(f, "BETWEEN {} AND {end}", self.start)
        } else {
            write!(f, "{}", self.start)
        }
    }
}

impl fmt::Display for FrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundedPreceding => f.write_str("UNBOUNDED PRECEDING"),
            Self::Preceding(e) => write!(f, "{e} PRECEDING"),
            Self::CurrentRow => f.write_str("CURRENT ROW"),
            Self::Following(e) => write!(f, "{e} FOLLOWING"),
            Self::UnboundedFollowing => f.write_str("UNBOUNDED FOLLOWING"),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            f.write_str("(")?;
            word_list(f, &self.args)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SELECT
// ---------------------------------------------------------------------------

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{with} ")?;
        }
        write!(f, "{}", self.body)?;
        if !self.order_by.is_empty() {
            f.write_str(" ORDER BY ")?;
            comma_list(f, &self.order_by)?;
        }
        if let Some(of) = &self.offset_fetch {
            write!(f, " {of}")?;
        }
        if let Some(fc) = &self.for_clause {
            write!(f, " {fc}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core(core) => write!(f, "{core}"),
            Self::SetOp { left, op, right } => write!(f, "{left} {op} {right}"),
        }
    }
}

impl fmt::Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Union { all: true } => f.write_str("UNION ALL"),
            Self::Union { all: false } => f.write_str("UNION"),
            Self::Except => f.write_str("EXCEPT"),
            Self::Intersect => f.write_str("INTERSECT"),
        }
    }
}

impl fmt::Display for SelectCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT")?;
        if let Some(top) = &self.top {
            write!(f, " {top}")?;
        }
        if self.distinct {
            f.write_str(" DISTINCT")?;
        }
        f.write_str(" ")?;
        comma_list(f, &self.items)?;
        if let Some(into) = &self.into {
            write!(f, " INTO {into}")?;
        }
        if !self.from.is_empty() {
            f.write_str(" FROM ")?;
            comma_list(f, &self.from)?;
        }
        if let Some(w) = &self.where_clause {
            write!(f, " WHERE {w}")?;
        }
        if !self.group_by.is_empty() {
            f.write_str(" GROUP BY ")?;
            comma_list(f, &self.group_by)?;
        }
        if let Some(h) = &self.having {
            write!(f, " HAVING {h}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str("*"),
            Self::QualifiedWildcard(name) => write!(f, "{name}.*"),
            Self::Expr { expr, alias } => {
                write!(f, "{expr}")?;
                if let Some(a) = alias {
                    write!(f, " AS {a}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for TopClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TOP ({})", self.quantity)?;
        if self.percent {
            f.write_str(" PERCENT")?;
        }
        if self.with_ties {
            f.write_str(" WITH TIES")?;
        }
        Ok(())
    }
}

impl fmt::Display for OffsetFetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OFFSET {} ROWS", self.offset)?;
        if let Some(fetch) = &self.fetch {
            write!(f, " FETCH NEXT {fetch} ROWS ONLY")?;
        }
        Ok(())
    }
}

impl fmt::Display for ForClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml {
                mode,
                element,
                options,
            } => {
                f.write_str("FOR XML ")?;
                f.write_str(match mode {
                    XmlMode::Raw => "RAW",
                    XmlMode::Auto => "AUTO",
                    XmlMode::Path => "PATH",
                    XmlMode::Explicit => "EXPLICIT",
                })?;
                if let Some(element) = element {
                    write!(f, "('{}')", element.replace('\'', "''"))?;
                }
                for opt in options {
                    write!(f, ", {opt}")?;
                }
                Ok(())
            }
            Self::Json { mode, options } => {
                f.write_str("FOR JSON ")?;
                f.write_str(match mode {
                    JsonMode::Auto => "AUTO",
                    JsonMode::Path => "PATH",
                })?;
                for opt in options {
                    write!(f, ", {opt}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for WithClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WITH ")?;
        comma_list(f, &self.ctes)
    }
}

impl fmt::Display for Cte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            comma_list(f, &self.columns)?;
            f.write_str(")")?;
        }
        write!(f, " AS ({})", self.query)
    }
}

impl fmt::Display for OrderByItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if self.desc {
            f.write_str(" DESC")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Table sources
// ---------------------------------------------------------------------------

fn write_alias_columns(
    f: &mut fmt::Formatter<'_>,
    alias: Option<&Ident>,
    columns: &[Ident],
) -> fmt::Result {
    if let Some(a) = alias {
        write!(f, " AS {a}")?;
        if !columns.is_empty() {
            f.write_str(" (")?;
            comma_list(f, columns)?;
            f.write_str(")")?;
        }
    }
    Ok(())
}

impl fmt::Display for TableSource {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, alias, hints } => {
                write!(f, "{name}")?;
                if let Some(a) = alias {
                    write!(f, " AS {a}")?;
                }
                if !hints.is_empty() {
                    f.write_str(" WITH (")?;
                    word_list(f, hints)?;
                    f.write_str(")")?;
                }
                Ok(())
            }
            Self::Derived {
                subquery,
                alias,
                columns,
            } => {
                write!(f, "({subquery})")?;
                write_alias_columns(f, alias.as_ref(), columns)
            }
            Self::Function {
                name,
                args,
                with_schema,
                alias,
                columns,
            } => {
                write!(f, "{name}(")?;
                comma_list(f, args)?;
                f.write_str(")")?;
                if !with_schema.is_empty() {
                    f.write_str(" WITH (")?;
                    comma_list(f, with_schema)?;
                    f.write_str(")")?;
                }
                write_alias_columns(f, alias.as_ref(), columns)
            }
            Self::Variable { name, alias } => {
                write!(f, "@{name}")?;
                if let Some(a) = alias {
                    write!(f, " AS {a}")?;
                }
                Ok(())
            }
            Self::Values {
                rows,
                alias,
                columns,
            } => {
                f.write_str("(VALUES ")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str("(")?;
                    comma_list(f, row)?;
                    f.write_str(")")?;
                }
                f.write_str(")")?;
                write_alias_columns(f, alias.as_ref(), columns)
            }
            Self::MethodCall {
                target,
                method,
                args,
                alias,
                columns,
            } => {
                write!(f, "{target}.{method}(")?;
                comma_list(f, args)?;
                f.write_str(")")?;
                write_alias_columns(f, alias.as_ref(), columns)
            }
            Self::Join {
                left,
                kind,
                right,
                on,
            } => {
                write!(f, "{left} ")?;
                f.write_str(match kind {
                    JoinKind::Inner => "INNER JOIN",
                    JoinKind::Left => "LEFT OUTER JOIN",
                    JoinKind::Right => "RIGHT OUTER JOIN",
                    JoinKind::Full => "FULL OUTER JOIN",
                    JoinKind::Cross => "CROSS JOIN",
                })?;
                write!(f, " {right}")?;
                if let Some(cond) = on {
                    write!(f, " ON {cond}")?;
                }
                Ok(())
            }
            Self::Apply { left, outer, right } => {
                write!(f, "{left} ")?;
                f.write_str(if *outer { "OUTER APPLY" } else { "CROSS APPLY" })?;
                write!(f, " {right}")
            }
            Self::Pivot {
                source,
                aggregate,
                value_column,
                in_list,
                alias,
            } => {
                write!(f, "{source} PIVOT ({aggregate} FOR {value_column} IN (")?;
                comma_list(f, in_list)?;
                f.write_str("))")?;
                if let Some(a) = alias {
                    write!(f, " AS {a}")?;
                }
                Ok(())
            }
            Self::Unpivot {
                source,
                value_column,
                for_column,
                in_columns,
                alias,
            } => {
                write!(f, "{source} UNPIVOT ({value_column} FOR {for_column} IN (")?;
                comma_list(f, in_columns)?;
                f.write_str("))")?;
                if let Some(a) = alias {
                    write!(f, " AS {a}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for SchemaColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.type_name)?;
        if let Some(path) = &self.path {
            f.write_str(" ")?;
            write_string_literal(f, path)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// DML
// ---------------------------------------------------------------------------

impl fmt::Display for DmlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(name) => write!(f, "{name}"),
            Self::Variable(name) => write!(f, "@{name}"),
        }
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("INSERT")?;
        if let Some(top) = &self.top {
            write!(f, " {top}")?;
        }
        write!(f, " INTO {}", self.target)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            comma_list(f, &self.columns)?;
            f.write_str(")")?;
        }
        if let Some(output) = &self.output {
            write!(f, " {output}")?;
        }
        match &self.source {
            InsertSource::Values(rows) => {
                f.write_str(" VALUES ")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str("(")?;
                    comma_list(f, row)?;
                    f.write_str(")")?;
                }
                Ok(())
            }
            InsertSource::Select(q) => write!(f, " {q}"),
            InsertSource::Execute(e) => write!(f, " {e}"),
            InsertSource::DefaultValues => f.write_str(" DEFAULT VALUES"),
        }
    }
}

impl fmt::Display for OutputClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OUTPUT ")?;
        comma_list(f, &self.items)?;
        if let Some((target, columns)) = &self.into {
            write!(f, " INTO {target}")?;
            if !columns.is_empty() {
                f.write_str(" (")?;
                comma_list(f, columns)?;
                f.write_str(")")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for BulkInsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BULK INSERT {} FROM ", self.target)?;
        write_string_literal(f, &self.file)?;
        if !self.options.is_empty() {
            f.write_str(" WITH (")?;
            comma_list(f, &self.options)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr(e) => write!(f, "WHERE {e}"),
            Self::CurrentOf(cursor) => write!(f, "WHERE CURRENT OF {cursor}"),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.target, self.op, self.value)
    }
}

impl fmt::Display for AssignmentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(name) => write!(f, "{name}"),
            Self::Variable(name) => write!(f, "@{name}"),
        }
    }
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UPDATE")?;
        if let Some(top) = &self.top {
            write!(f, " {top}")?;
        }
        write!(f, " {} SET ", self.target)?;
        comma_list(f, &self.assignments)?;
        if let Some(output) = &self.output {
            write!(f, " {output}")?;
        }
        if !self.from.is_empty() {
            f.write_str(" FROM ")?;
            comma_list(f, &self.from)?;
        }
        if let Some(w) = &self.where_clause {
            write!(f, " {w}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DELETE")?;
        if let Some(top) = &self.top {
            write!(f, " {top}")?;
        }
        write!(f, " FROM {}", self.target)?;
        if let Some(output) = &self.output {
            write!(f, " {output}")?;
        }
        if !self.from.is_empty() {
            f.write_str(" FROM ")?;
            comma_list(f, &self.from)?;
        }
        if let Some(w) = &self.where_clause {
            write!(f, " {w}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MERGE
// ---------------------------------------------------------------------------

impl fmt::Display for MergeStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MERGE")?;
        if let Some(top) = &self.top {
            write!(f, " {top}")?;
        }
        write!(f, " INTO {}", self.target)?;
        if let Some(a) = &self.target_alias {
            write!(f, " AS {a}")?;
        }
        write!(f, " USING {} ON {}", self.using, self.on)?;
        for clause in &self.clauses {
            write!(f, " {clause}")?;
        }
        if let Some(output) = &self.output {
            write!(f, " {output}")?;
        }
        Ok(())
    }
}

impl fmt::Display for MergeClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.when {
            MergeWhen::Matched => "WHEN MATCHED",
            MergeWhen::NotMatchedByTarget => "WHEN NOT MATCHED BY TARGET",
            MergeWhen::NotMatchedBySource => "WHEN NOT MATCHED BY SOURCE",
        })?;
        if let Some(cond) = &self.condition {
            write!(f, " AND {cond}")?;
        }
        write!(f, " THEN {}", self.action)
    }
}

impl fmt::Display for MergeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update(assignments) => {
                f.write_str("UPDATE SET ")?;
                comma_list(f, assignments)
            }
            Self::Delete => f.write_str("DELETE"),
            Self::Insert { columns, source } => {
                f.write_str("INSERT")?;
                if !columns.is_empty() {
                    f.write_str(" (")?;
                    comma_list(f, columns)?;
                    f.write_str(")")?;
                }
                match source {
                    MergeInsertSource::Values(values) => {
                        f.write_str(" VALUES (")?;
                        comma_list(f, values)?;
                        f.write_str(")")
                    }
                    MergeInsertSource::DefaultValues => f.write_str(" DEFAULT VALUES"),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// DDL: tables
// ---------------------------------------------------------------------------

impl fmt::Display for CreateTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE TABLE {} (", self.name)?;
        comma_list(f, &self.columns)?;
        for constraint in &self.constraints {
            write!(f, ", {constraint}")?;
        }
        if let Some((start, end)) = &self.period {
            write!(f, ", PERIOD FOR SYSTEM_TIME ({start}, {end})")?;
        }
        f.write_str(")")?;
        if let Some(on) = &self.on {
            write!(f, " {on}")?;
        }
        if !self.options.is_empty() {
            f.write_str(" WITH (")?;
            comma_list(f, &self.options)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for OnClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filegroup(fg) => write!(f, "ON {fg}"),
            Self::PartitionScheme { scheme, column } => write!(f, "ON {scheme}({column})"),
        }
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(t) = &self.type_name {
            write!(f, " {t}")?;
        }
        if let Some(expr) = &self.computed {
            write!(f, " AS ({expr})")?;
            if self.persisted {
                f.write_str(" PERSISTED")?;
            }
        }
        if let Some(c) = &self.collation {
            write!(f, " COLLATE {c}")?;
        }
        for constraint in &self.constraints {
            write!(f, " {constraint}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ColumnConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {name} ")?;
        }
        write!(f, "{}", self.kind)
    }
}

fn write_clustered(f: &mut fmt::Formatter<'_>, clustered: Option<bool>) -> fmt::Result {
    match clustered {
        Some(true) => f.write_str(" CLUSTERED"),
        Some(false) => f.write_str(" NONCLUSTERED"),
        None => Ok(()),
    }
}

impl fmt::Display for ColumnConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryKey { clustered } => {
                f.write_str("PRIMARY KEY")?;
                write_clustered(f, *clustered)
            }
            Self::Unique => f.write_str("UNIQUE"),
            Self::NotNull => f.write_str("NOT NULL"),
            Self::Null => f.write_str("NULL"),
            Self::Default(e) => write!(f, "DEFAULT {e}"),
            Self::Check(e) => write!(f, "CHECK ({e})"),
            Self::ForeignKey(clause) => write!(f, "{clause}"),
            Self::Identity { seed, increment } => write!(f, "IDENTITY({seed}, {increment})"),
            Self::Rowguidcol => f.write_str("ROWGUIDCOL"),
            Self::GeneratedAlwaysRow { start, hidden } => {
                f.write_str("GENERATED ALWAYS AS ROW ")?;
                f.write_str(if *start { "START" } else { "END" })?;
                if *hidden {
                    f.write_str(" HIDDEN")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {name} ")?;
        }
        write!(f, "{}", self.kind)
    }
}

impl fmt::Display for TableConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryKey { clustered, columns } => {
                f.write_str("PRIMARY KEY")?;
                write_clustered(f, *clustered)?;
                f.write_str(" (")?;
                comma_list(f, columns)?;
                f.write_str(")")
            }
            Self::Unique { clustered, columns } => {
                f.write_str("UNIQUE")?;
                write_clustered(f, *clustered)?;
                f.write_str(" (")?;
                comma_list(f, columns)?;
                f.write_str(")")
            }
            Self::ForeignKey { columns, clause } => {
                f.write_str("FOREIGN KEY (")?;
                comma_list(f, columns)?;
                write!(f, ") {clause}")
            }
            Self::Check(e) => write!(f, "CHECK ({e})"),
        }
    }
}

impl fmt::Display for ForeignKeyClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REFERENCES {}", self.table)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            comma_list(f, &self.columns)?;
            f.write_str(")")?;
        }
        if let Some(action) = self.on_delete {
            write!(f, " ON DELETE {action}")?;
        }
        if let Some(action) = self.on_update {
            write!(f, " ON UPDATE {action}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoAction => "NO ACTION",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        })
    }
}

impl fmt::Display for IndexColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.desc {
            f.write_str(" DESC")?;
        }
        Ok(())
    }
}

impl fmt::Display for SqlOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(value) = &self.value {
            write!(f, " = {value}")?;
        }
        Ok(())
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(i) => write!(f, "{i}"),
            Self::Literal(l) => write!(f, "{l}"),
            Self::OnWith(options) => {
                f.write_str("ON (")?;
                comma_list(f, options)?;
                f.write_str(")")
            }
            Self::ObjectName(n) => write!(f, "{n}"),
        }
    }
}

impl fmt::Display for AlterTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER TABLE {} {}", self.name, self.action)
    }
}

impl fmt::Display for AlterTableAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddColumns(columns) => {
                f.write_str("ADD ")?;
                comma_list(f, columns)
            }
            Self::AddConstraints {
                with_check,
                constraints,
            } => {
                match with_check {
                    Some(true) => f.write_str("WITH CHECK ")?,
                    Some(false) => f.write_str("WITH NOCHECK ")?,
                    None => {}
                }
                f.write_str("ADD ")?;
                comma_list(f, constraints)
            }
            Self::AlterColumn(column) => write!(f, "ALTER COLUMN {column}"),
            Self::DropColumns(columns) => {
                f.write_str("DROP COLUMN ")?;
                comma_list(f, columns)
            }
            Self::DropConstraints(names) => {
                f.write_str("DROP CONSTRAINT ")?;
                comma_list(f, names)
            }
            Self::SetOptions(options) => {
                f.write_str("SET (")?;
                comma_list(f, options)?;
                f.write_str(")")
            }
            Self::SwitchPartition {
                source_partition,
                target,
                target_partition,
            } => {
                f.write_str("SWITCH")?;
                if let Some(p) = source_partition {
                    write!(f, " PARTITION {p}")?;
                }
                write!(f, " TO {target}")?;
                if let Some(p) = target_partition {
                    write!(f, " PARTITION {p}")?;
                }
                Ok(())
            }
            Self::CheckConstraint { check, name } => {
                f.write_str(if *check { "CHECK" } else { "NOCHECK" })?;
                f.write_str(" CONSTRAINT ")?;
                match name {
                    Some(n) => write!(f, "{n}"),
                    None => f.write_str("ALL"),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// DDL: other objects
// ---------------------------------------------------------------------------

impl fmt::Display for CreateIndexStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.unique {
            f.write_str("UNIQUE ")?;
        }
        match self.clustered {
            Some(true) => f.write_str("CLUSTERED ")?,
            Some(false) => f.write_str("NONCLUSTERED ")?,
            None => {}
        }
        if self.columnstore {
            f.write_str("COLUMNSTORE ")?;
        }
        write!(f, "INDEX {} ON {}", self.name, self.table)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            comma_list(f, &self.columns)?;
            f.write_str(")")?;
        }
        if !self.include.is_empty() {
            f.write_str(" INCLUDE (")?;
            comma_list(f, &self.include)?;
            f.write_str(")")?;
        }
        if let Some(w) = &self.where_clause {
            write!(f, " WHERE {w}")?;
        }
        if !self.options.is_empty() {
            f.write_str(" WITH (")?;
            comma_list(f, &self.options)?;
            f.write_str(")")?;
        }
        if let Some(on) = &self.on {
            write!(f, " {on}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CreateViewStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.or_alter {
            f.write_str("OR ALTER ")?;
        }
        write!(f, "VIEW {}", self.name)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            comma_list(f, &self.columns)?;
            f.write_str(")")?;
        }
        if !self.options.is_empty() {
            f.write_str(" WITH ")?;
            word_list(f, &self.options)?;
        }
        write!(f, " AS {}", self.query)?;
        if self.with_check_option {
            f.write_str(" WITH CHECK OPTION")?;
        }
        Ok(())
    }
}

impl fmt::Display for RoutineParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{} {}", self.name, self.type_name)?;
        if let Some(d) = &self.default {
            write!(f, " = {d}")?;
        }
        if self.output {
            f.write_str(" OUTPUT")?;
        }
        if self.readonly {
            f.write_str(" READONLY")?;
        }
        Ok(())
    }
}

impl fmt::Display for CreateProcedureStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.or_alter {
            f.write_str("OR ALTER ")?;
        }
        write!(f, "PROCEDURE {}", self.name)?;
        if !self.params.is_empty() {
            f.write_str(" ")?;
            comma_list(f, &self.params)?;
        }
        if !self.options.is_empty() {
            f.write_str(" WITH ")?;
            word_list(f, &self.options)?;
        }
        f.write_str(" AS\n")?;
        statement_list(f, &self.body)
    }
}

impl fmt::Display for CreateFunctionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.or_alter {
            f.write_str("OR ALTER ")?;
        }
        write!(f, "FUNCTION {} (", self.name)?;
        comma_list(f, &self.params)?;
        f.write_str(") RETURNS ")?;
        match &self.returns {
            FunctionReturns::Scalar(t) => write!(f, "{t}")?,
            FunctionReturns::Table => f.write_str("TABLE")?,
            FunctionReturns::TableVariable { name, columns } => {
                write!(f, "@{name} TABLE (")?;
                comma_list(f, columns)?;
                f.write_str(")")?;
            }
        }
        if !self.options.is_empty() {
            f.write_str(" WITH ")?;
            word_list(f, &self.options)?;
        }
        f.write_str(" AS ")?;
        match &self.body {
            FunctionBody::Return(q) => write!(f, "RETURN ({q})"),
            FunctionBody::Statements(stmts) => {
                f.write_str("BEGIN\n")?;
                statement_list(f, stmts)?;
                f.write_str("END")
            }
        }
    }
}

impl fmt::Display for CreateTriggerStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.or_alter {
            f.write_str("OR ALTER ")?;
        }
        write!(f, "TRIGGER {} ON {} ", self.name, self.table)?;
        f.write_str(match self.timing {
            TriggerTiming::After => "AFTER",
            TriggerTiming::InsteadOf => "INSTEAD OF",
            TriggerTiming::For => "FOR",
        })?;
        f.write_str(" ")?;
        for (i, event) in self.events.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(match event {
                TriggerEvent::Insert => "INSERT",
                TriggerEvent::Update => "UPDATE",
                TriggerEvent::Delete => "DELETE",
            })?;
        }
        f.write_str(" AS\n")?;
        statement_list(f, &self.body)
    }
}

impl fmt::Display for CreateSequenceStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE SEQUENCE {}", self.name)?;
        if let Some(t) = &self.data_type {
            write!(f, " AS {t}")?;
        }
        if let Some(e) = &self.start_with {
            write!(f, " START WITH {e}")?;
        }
        if let Some(e) = &self.increment_by {
            write!(f, " INCREMENT BY {e}")?;
        }
        match &self.min_value {
            Some(Some(e)) => write!(f, " MINVALUE {e}")?,
            Some(None) => f.write_str(" NO MINVALUE")?,
            None => {}
        }
        match &self.max_value {
            Some(Some(e)) => write!(f, " MAXVALUE {e}")?,
            Some(None) => f.write_str(" NO MAXVALUE")?,
            None => {}
        }
        match self.cycle {
            Some(true) => f.write_str(" CYCLE")?,
            Some(false) => f.write_str(" NO CYCLE")?,
            None => {}
        }
        match &self.cache {
            Some(Some(e)) => write!(f, " CACHE {e}")?,
            Some(None) => f.write_str(" NO CACHE")?,
            None => {}
        }
        Ok(())
    }
}

impl fmt::Display for CreateSchemaStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE SCHEMA {}", self.name)?;
        if let Some(auth) = &self.authorization {
            write!(f, " AUTHORIZATION {auth}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CreateTypeStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE TYPE {} ", self.name)?;
        match &self.definition {
            TypeDefinition::Alias { base, not_null } => {
                write!(f, "FROM {base}")?;
                if *not_null {
                    f.write_str(" NOT NULL")?;
                }
                Ok(())
            }
            TypeDefinition::Table {
                columns,
                constraints,
            } => {
                f.write_str("AS TABLE (")?;
                comma_list(f, columns)?;
                for c in constraints {
                    write!(f, ", {c}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for CreateSynonymStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE SYNONYM {} FOR {}", self.name, self.target)
    }
}

impl fmt::Display for CreateSecurityPolicyStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE SECURITY POLICY {}", self.name)?;
        for (i, predicate) in self.predicates.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {predicate}")?;
        }
        match self.state {
            Some(true) => f.write_str(" WITH (STATE = ON)")?,
            Some(false) => f.write_str(" WITH (STATE = OFF)")?,
            None => {}
        }
        Ok(())
    }
}

impl fmt::Display for SecurityPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ADD ")?;
        f.write_str(match self.kind {
            SecurityPredicateKind::Filter => "FILTER",
            SecurityPredicateKind::Block => "BLOCK",
        })?;
        write!(f, " PREDICATE {}(", self.function)?;
        comma_list(f, &self.args)?;
        write!(f, ") ON {}", self.table)?;
        if let Some(timing) = &self.block_timing {
            write!(f, " {timing}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CreatePartitionFunctionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE PARTITION FUNCTION {} ({}) AS RANGE {} FOR VALUES (",
            self.name,
            self.input_type,
            if self.range_right { "RIGHT" } else { "LEFT" }
        )?;
        comma_list(f, &self.boundaries)?;
        f.write_str(")")
    }
}

impl fmt::Display for CreatePartitionSchemeStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE PARTITION SCHEME {} AS PARTITION {} ",
            self.name, self.function
        )?;
        if self.all {
            f.write_str("ALL ")?;
        }
        f.write_str("TO (")?;
        comma_list(f, &self.filegroups)?;
        f.write_str(")")
    }
}

impl fmt::Display for DropStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP {}", self.object_type)?;
        if self.if_exists {
            f.write_str(" IF EXISTS")?;
        }
        f.write_str(" ")?;
        comma_list(f, &self.names)?;
        if let Some(on) = &self.on {
            write!(f, " ON {on}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Procedure => "PROCEDURE",
            Self::Function => "FUNCTION",
            Self::Trigger => "TRIGGER",
            Self::Index => "INDEX",
            Self::Sequence => "SEQUENCE",
            Self::Schema => "SCHEMA",
            Self::Type => "TYPE",
            Self::Synonym => "SYNONYM",
            Self::SecurityPolicy => "SECURITY POLICY",
            Self::PartitionFunction => "PARTITION FUNCTION",
            Self::PartitionScheme => "PARTITION SCHEME",
            Self::Database => "DATABASE",
        })
    }
}

// ---------------------------------------------------------------------------
// Procedural statements
// ---------------------------------------------------------------------------

impl fmt::Display for DeclareStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DECLARE ")?;
        comma_list(f, &self.declarations)
    }
}

impl fmt::Display for VariableDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{} ", self.name)?;
        match &self.data_type {
            DeclareType::Type(t) => write!(f, "{t}")?,
            DeclareType::Table {
                columns,
                constraints,
            } => {
                f.write_str("TABLE (")?;
                comma_list(f, columns)?;
                for c in constraints {
                    write!(f, ", {c}")?;
                }
                f.write_str(")")?;
            }
        }
        if let Some(init) = &self.init {
            write!(f, " = {init}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CursorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words = Vec::new();
        if self.local {
            words.push("LOCAL");
        }
        if self.global {
            words.push("GLOBAL");
        }
        if self.forward_only {
            words.push("FORWARD_ONLY");
        }
        if self.scroll {
            words.push("SCROLL");
        }
        if self.static_ {
            words.push("STATIC");
        }
        if self.keyset {
            words.push("KEYSET");
        }
        if self.dynamic {
            words.push("DYNAMIC");
        }
        if self.fast_forward {
            words.push("FAST_FORWARD");
        }
        if self.read_only {
            words.push("READ_ONLY");
        }
        if self.scroll_locks {
            words.push("SCROLL_LOCKS");
        }
        if self.optimistic {
            words.push("OPTIMISTIC");
        }
        f.write_str(&words.join(" "))
    }
}

impl fmt::Display for DeclareCursorStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DECLARE {} CURSOR", self.name)?;
        let options = self.options.to_string();
        if !options.is_empty() {
            write!(f, " {options}")?;
        }
        write!(f, " FOR {}", self.query)?;
        if let Some(columns) = &self.for_update_of {
            f.write_str(" FOR UPDATE")?;
            if !columns.is_empty() {
                f.write_str(" OF ")?;
                comma_list(f, columns)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for FetchStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FETCH ")?;
        match &self.direction {
            FetchDirection::Next => f.write_str("NEXT")?,
            FetchDirection::Prior => f.write_str("PRIOR")?,
            FetchDirection::First => f.write_str("FIRST")?,
            FetchDirection::Last => f.write_str("LAST")?,
            FetchDirection::Absolute(e) => write!(f, "ABSOLUTE {e}")?,
            FetchDirection::Relative(e) => write!(f, "RELATIVE {e}")?,
        }
        write!(f, " FROM {}", self.cursor)?;
        if !self.into.is_empty() {
            f.write_str(" INTO ")?;
            for (i, name) in self.into.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "@{name}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SetVariableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SET @{} {} {}", self.name, self.op, self.value)
    }
}

impl fmt::Display for SetOptionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SET ")?;
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}")?;
        }
        match &self.value {
            OptionState::On => f.write_str(" ON"),
            OptionState::Off => f.write_str(" OFF"),
            OptionState::Words(words) => {
                for word in words {
                    write!(f, " {word}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for IfStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF {} {}", self.condition, self.then_branch)?;
        if let Some(else_branch) = &self.else_branch {
            write!(f, " ELSE {else_branch}")?;
        }
        Ok(())
    }
}

impl fmt::Display for WhileStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WHILE {} {}", self.condition, self.body)
    }
}

impl fmt::Display for TryCatchStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BEGIN TRY\n")?;
        statement_list(f, &self.try_block)?;
        f.write_str("END TRY\nBEGIN CATCH\n")?;
        statement_list(f, &self.catch_block)?;
        f.write_str("END CATCH")
    }
}

impl fmt::Display for WaitforStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delay(e) => write!(f, "WAITFOR DELAY {e}"),
            Self::Time(e) => write!(f, "WAITFOR TIME {e}"),
        }
    }
}

impl fmt::Display for ExecuteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EXEC")?;
        if let Some(ret) = &self.return_variable {
            write!(f, " @{ret} =")?;
        }
        match &self.target {
            ExecuteTarget::Procedure(name) => write!(f, " {name}")?,
            ExecuteTarget::Strings(parts) => {
                f.write_str(" (")?;
                comma_list(f, parts)?;
                f.write_str(")")?;
            }
            ExecuteTarget::Variable(name) => write!(f, " @{name}")?,
        }
        if !self.args.is_empty() {
            f.write_str(" ")?;
            comma_list(f, &self.args)?;
        }
        if let Some(rs) = &self.result_sets {
            write!(f, " WITH RESULT SETS {rs}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ExecuteArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "@{name} = ")?;
        }
        write!(f, "{}", self.value)?;
        if self.output {
            f.write_str(" OUTPUT")?;
        }
        Ok(())
    }
}

impl fmt::Display for ResultSetsClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("NONE"),
            Self::Undefined => f.write_str("UNDEFINED"),
            Self::Defined(sets) => {
                f.write_str("(")?;
                for (i, set) in sets.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str("(")?;
                    comma_list(f, set)?;
                    f.write_str(")")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for ExecuteAsStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EXECUTE AS ")?;
        match &self.context {
            ExecuteContext::Caller => f.write_str("CALLER")?,
            ExecuteContext::SelfUser => f.write_str("SELF")?,
            ExecuteContext::Owner => f.write_str("OWNER")?,
            ExecuteContext::User(e) => write!(f, "USER = {e}")?,
            ExecuteContext::Login(e) => write!(f, "LOGIN = {e}")?,
        }
        if self.no_revert {
            f.write_str(" WITH NO REVERT")?;
        }
        Ok(())
    }
}

impl fmt::Display for RaiserrorStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RAISERROR({}, {}, {}",
            self.message, self.severity, self.state
        )?;
        for arg in &self.args {
            write!(f, ", {arg}")?;
        }
        f.write_str(")")?;
        if !self.options.is_empty() {
            f.write_str(" WITH ")?;
            comma_list(f, &self.options)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// BACKUP / RESTORE
// ---------------------------------------------------------------------------

impl fmt::Display for BackupStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.log {
            "BACKUP LOG "
        } else {
            "BACKUP DATABASE "
        })?;
        write!(f, "{} TO ", self.database)?;
        comma_list(f, &self.to)?;
        if !self.options.is_empty() {
            f.write_str(" WITH (")?;
            comma_list(f, &self.options)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for RestoreStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RESTORE ")?;
        f.write_str(match self.kind {
            RestoreKind::Database => "DATABASE",
            RestoreKind::Log => "LOG",
            RestoreKind::VerifyOnly => "VERIFYONLY",
            RestoreKind::HeaderOnly => "HEADERONLY",
            RestoreKind::FileListOnly => "FILELISTONLY",
        })?;
        if let Some(db) = &self.database {
            write!(f, " {db}")?;
        }
        f.write_str(" FROM ")?;
        comma_list(f, &self.from)?;
        if !self.options.is_empty() {
            f.write_str(" WITH (")?;
            comma_list(f, &self.options)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for BackupDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.kind {
            BackupDeviceKind::Disk => "DISK",
            BackupDeviceKind::Tape => "TAPE",
            BackupDeviceKind::Url => "URL",
        })?;
        f.write_str(" = ")?;
        write_string_literal(f, &self.path)
    }
}
