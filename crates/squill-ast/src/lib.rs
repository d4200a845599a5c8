//! Abstract syntax tree node types for the squill T-SQL parser.
//!
//! This crate defines the complete AST type hierarchy for the SQL Server
//! dialect surface: one tagged variant per statement form, expression nodes
//! with operator/quantifier tags, and the relation-typed table sources that
//! `FROM`, `JOIN`, and `APPLY` accept. Every node carries a [`Span`] pointing
//! back into the original script for diagnostics.
//!
//! Nodes are built once by `squill-parser` and never mutated afterwards; all
//! downstream tools (formatters, linters, analyzers) consume them read-only.

mod display;

use std::fmt;

// ---------------------------------------------------------------------------
// Span: source location tracking
// ---------------------------------------------------------------------------

/// A byte-offset range into the original script text.
///
/// Every AST node that represents user-written syntax carries a `Span` so
/// diagnostics and downstream tooling can point at the exact source location.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the first character (inclusive).
    pub start: u32,
    /// Byte offset one past the last character (exclusive).
    pub end: u32,
}

impl Span {
    /// Create a new span from start (inclusive) to end (exclusive) offsets.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// A zero-length span at position 0, used as a placeholder.
    pub const ZERO: Self = Self { start: 0, end: 0 };

    /// Merge two spans into one that covers both.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    /// Whether the span is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// How an identifier was quoted in source, preserved for round-tripping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteStyle {
    /// `[Name With Spaces]`
    Bracket,
    /// `"Name"` (QUOTED_IDENTIFIER mode)
    Double,
}

/// A single identifier part with its original casing and quoting.
///
/// Identifier equality in T-SQL is case-insensitive by default; use
/// [`Ident::matches`] for grammar-level comparisons. The derived `PartialEq`
/// is exact (casing and quoting included) and is what tree-shape tests use.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    /// The identifier text without quoting characters.
    pub value: String,
    /// The quoting style, if the identifier was quoted.
    pub quote: Option<QuoteStyle>,
}

impl Ident {
    /// Create an unquoted identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote: None,
        }
    }

    /// Create a bracket-quoted identifier.
    #[must_use]
    pub fn bracketed(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote: Some(QuoteStyle::Bracket),
        }
    }

    /// Case-insensitive comparison against a bare name.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.value.eq_ignore_ascii_case(name)
    }
}

/// A possibly multi-part object name like `dbo.Orders` or
/// `Server.Db.Schema.Table`, each part independently quoted or not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectName {
    pub parts: Vec<Ident>,
}

impl ObjectName {
    /// Create a single-part name.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            parts: vec![Ident::new(name)],
        }
    }

    /// The final (object) part of the name, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Ident> {
        self.parts.last()
    }
}

impl From<Ident> for ObjectName {
    fn from(ident: Ident) -> Self {
        Self { parts: vec![ident] }
    }
}

// ---------------------------------------------------------------------------
// Script and batches
// ---------------------------------------------------------------------------

/// A whole parsed script: an ordered sequence of `GO`-delimited batches.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub batches: Vec<Batch>,
}

/// One batch: an independent compilation unit.
///
/// Declarations (variables, temp tables) never persist across batch
/// boundaries, so each batch owns its statements outright. `repeat` carries
/// the `GO N` count (default 1).
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub statements: Vec<Statement>,
    /// The `GO N` repeat count for this batch; 1 when absent.
    pub repeat: u32,
    /// Source region covered by the batch, excluding the `GO` line itself.
    pub span: Span,
}

/// A single parsed statement together with its source span and whether it
/// carried an explicit `;` terminator (meaningful for `MERGE` and for the
/// leading-`WITH` ambiguity rule).
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
    /// True when the statement ended with an explicit semicolon.
    pub terminated: bool,
}

/// The tagged union over every statement form in the grammar.
///
/// Constructs the parser does not understand become [`StatementKind::Unrecognized`]
/// carrying the raw source slice; they never abort the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    // === DML ===
    Select(SelectStatement),
    Insert(InsertStatement),
    BulkInsert(BulkInsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    Merge(MergeStatement),
    Truncate(ObjectName),

    // === DDL ===
    CreateTable(CreateTableStatement),
    AlterTable(AlterTableStatement),
    CreateIndex(CreateIndexStatement),
    CreateView(CreateViewStatement),
    CreateProcedure(CreateProcedureStatement),
    CreateFunction(CreateFunctionStatement),
    CreateTrigger(CreateTriggerStatement),
    CreateSequence(CreateSequenceStatement),
    CreateSchema(CreateSchemaStatement),
    CreateType(CreateTypeStatement),
    CreateSynonym(CreateSynonymStatement),
    CreateSecurityPolicy(CreateSecurityPolicyStatement),
    CreatePartitionFunction(CreatePartitionFunctionStatement),
    CreatePartitionScheme(CreatePartitionSchemeStatement),
    Drop(DropStatement),

    // === Procedural ===
    Declare(DeclareStatement),
    DeclareCursor(DeclareCursorStatement),
    SetVariable(SetVariableStatement),
    SetOption(SetOptionStatement),
    If(IfStatement),
    While(WhileStatement),
    /// `BEGIN ... END` statement block.
    Block(Vec<Statement>),
    Goto(Ident),
    /// `name:`, a GOTO target. Plain node; control-flow graphs are a
    /// downstream concern.
    Label(Ident),
    TryCatch(TryCatchStatement),
    Break,
    Continue,
    Return(Option<Expr>),
    Waitfor(WaitforStatement),
    OpenCursor(ObjectName),
    FetchCursor(FetchStatement),
    CloseCursor(ObjectName),
    DeallocateCursor(ObjectName),
    Execute(ExecuteStatement),
    ExecuteAs(ExecuteAsStatement),
    Revert,
    Print(Expr),
    Raiserror(RaiserrorStatement),
    /// `THROW` or `THROW error_number, message, state`.
    Throw(Option<ThrowArgs>),
    Use(Ident),

    // === Transactions and administration ===
    BeginTransaction {
        distributed: bool,
        name: Option<Ident>,
    },
    CommitTransaction {
        name: Option<Ident>,
    },
    RollbackTransaction {
        name: Option<Ident>,
    },
    SaveTransaction(Ident),
    BackupDatabase(BackupStatement),
    RestoreDatabase(RestoreStatement),

    /// Anything the grammar does not cover: the raw source slice, bounded by
    /// a deterministic recovery point.
    Unrecognized {
        sql: String,
    },
}

// ---------------------------------------------------------------------------
// Literals and operators
// ---------------------------------------------------------------------------

/// A literal value in SQL source.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Plain integer literal.
    Int(i64),
    /// Decimal, money, or scientific-notation literal, preserved as written
    /// (`12.50`, `$4.99`, `1.5E-3`).
    Numeric(String),
    /// String literal; `unicode` is true for the `N'...'` form.
    String { value: String, unicode: bool },
    /// Hex literal preserved as written (`0x1A2B`).
    Hex(String),
    /// The keyword `NULL`.
    Null,
}

/// Binary operators, arithmetic through logical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// `!<`
    NotLt,
    /// `!>`
    NotGt,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
}

impl BinaryOp {
    /// Whether this operator is a comparison (and may take an
    /// `ALL`/`ANY`/`SOME` quantifier).
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::Ne
                | Self::Lt
                | Self::Le
                | Self::Gt
                | Self::Ge
                | Self::NotLt
                | Self::NotGt
        )
    }
}

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Negate,
    Plus,
    BitNot,
}

/// Subquery quantifier on a comparison: `= ALL (...)`, `> ANY (...)`.
///
/// The truth value over an empty subquery (`ALL` = true, `ANY`/`SOME` =
/// false) is a semantic note for downstream consumers, not computed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    All,
    Any,
    Some,
}

/// Assignment operators used by `SET` and `UPDATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// The tagged union over scalar expression forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal, Span),
    /// Batch variable `@name` (name stored without the sigil).
    Variable(String, Span),
    /// Session/system variable `@@name`.
    SystemVariable(String, Span),
    /// Column or other multi-part reference (`a`, `t.a`, `db.s.t.a`).
    Column(ObjectName, Span),
    /// The `DEFAULT` keyword in a values/assignment position.
    Default(Span),
    UnaryOp {
        op: UnaryOp,
        expr: Box<Expr>,
        span: Span,
    },
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
        span: Span,
    },
    /// Quantified comparison: `expr op ALL|ANY|SOME (subquery)`.
    Quantified {
        left: Box<Expr>,
        op: BinaryOp,
        quantifier: Quantifier,
        subquery: Box<SelectStatement>,
        span: Span,
    },
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        not: bool,
        span: Span,
    },
    In {
        expr: Box<Expr>,
        set: InSet,
        not: bool,
        span: Span,
    },
    Like {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape: Option<Box<Expr>>,
        not: bool,
        span: Span,
    },
    IsNull {
        expr: Box<Expr>,
        not: bool,
        span: Span,
    },
    Exists {
        subquery: Box<SelectStatement>,
        not: bool,
        span: Span,
    },
    /// Scalar subquery `(SELECT ...)`.
    Subquery(Box<SelectStatement>, Span),
    Case {
        /// `CASE operand WHEN ...` (simple form) vs. `CASE WHEN ...`.
        operand: Option<Box<Expr>>,
        whens: Vec<(Expr, Expr)>,
        else_expr: Option<Box<Expr>>,
        span: Span,
    },
    /// `CAST(expr AS type)` / `TRY_CAST(expr AS type)`.
    Cast {
        expr: Box<Expr>,
        type_name: TypeName,
        try_cast: bool,
        span: Span,
    },
    /// `CONVERT(type, expr [, style])` / `TRY_CONVERT(...)`.
    Convert {
        type_name: TypeName,
        expr: Box<Expr>,
        style: Option<Box<Expr>>,
        try_convert: bool,
        span: Span,
    },
    Function(FunctionCall),
    /// XML/JSON accessor method call: `col.value('xpath', 'type')`,
    /// `@doc.exist(...)`, chained as needed.
    MethodCall {
        target: Box<Expr>,
        method: Ident,
        args: Vec<Expr>,
        span: Span,
    },
    /// `expr COLLATE collation_name`.
    Collate {
        expr: Box<Expr>,
        collation: Ident,
        span: Span,
    },
    /// `NEXT VALUE FOR sequence`.
    NextValueFor {
        sequence: ObjectName,
        span: Span,
    },
    /// `$PARTITION.fn(expr)`, `$IDENTITY`, `$ROWGUID`.
    Pseudo(PseudoFunction, Span),
}

impl Expr {
    /// The source span of this expression.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(_, s)
            | Self::Variable(_, s)
            | Self::SystemVariable(_, s)
            | Self::Column(_, s)
            | Self::Default(s)
            | Self::Subquery(_, s)
            | Self::Pseudo(_, s)
            | Self::UnaryOp { span: s, .. }
            | Self::BinaryOp { span: s, .. }
            | Self::Quantified { span: s, .. }
            | Self::Between { span: s, .. }
            | Self::In { span: s, .. }
            | Self::Like { span: s, .. }
            | Self::IsNull { span: s, .. }
            | Self::Exists { span: s, .. }
            | Self::Case { span: s, .. }
            | Self::Cast { span: s, .. }
            | Self::Convert { span: s, .. }
            | Self::MethodCall { span: s, .. }
            | Self::Collate { span: s, .. }
            | Self::NextValueFor { span: s, .. } => *s,
            Self::Function(call) => call.span,
        }
    }
}

/// The right-hand side of an `IN` predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum InSet {
    List(Vec<Expr>),
    Subquery(Box<SelectStatement>),
}

/// A function call, optionally windowed with `OVER (...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: ObjectName,
    pub args: FunctionArgs,
    pub over: Option<WindowSpec>,
    pub span: Span,
}

/// Function argument forms.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionArgs {
    /// `COUNT(*)`
    Star,
    /// Ordinary argument list; `distinct` covers `COUNT(DISTINCT x)`.
    List { distinct: bool, args: Vec<Expr> },
}

/// The `$PARTITION` / `$IDENTITY` / `$ROWGUID` pseudo-function family.
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoFunction {
    /// `$PARTITION.partition_fn(expr)`
    Partition { function: Ident, args: Vec<Expr> },
    /// `$IDENTITY`
    Identity,
    /// `$ROWGUID`
    Rowguid,
}

/// An `OVER (...)` window specification.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<OrderByItem>,
    pub frame: Option<WindowFrame>,
}

/// A `ROWS`/`RANGE` window frame.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFrame {
    pub units: FrameUnits,
    pub start: FrameBound,
    /// Present for the `BETWEEN ... AND ...` form.
    pub end: Option<FrameBound>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameUnits {
    Rows,
    Range,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding(Box<Expr>),
    CurrentRow,
    Following(Box<Expr>),
    UnboundedFollowing,
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A data type name as written (`INT`, `NVARCHAR(MAX)`, `DECIMAL(10, 2)`,
/// `dbo.MyTableType`). Arguments are preserved as raw text so `MAX` and
/// numeric sizes round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    pub name: ObjectName,
    pub args: Vec<String>,
}

impl TypeName {
    /// A type with no arguments.
    #[must_use]
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: ObjectName::bare(name),
            args: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// SELECT
// ---------------------------------------------------------------------------

/// A full `SELECT` statement: optional CTE prologue, a set-operation body,
/// ordering, paging, and an optional `FOR XML`/`FOR JSON` tail.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub with: Option<WithClause>,
    pub body: SelectBody,
    pub order_by: Vec<OrderByItem>,
    pub offset_fetch: Option<OffsetFetch>,
    pub for_clause: Option<ForClause>,
}

/// The body of a select: a single core or a set operation over two bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectBody {
    Core(Box<SelectCore>),
    SetOp {
        left: Box<SelectBody>,
        op: SetOperator,
        right: Box<SelectBody>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    Union { all: bool },
    Except,
    Intersect,
}

/// One `SELECT ... FROM ... WHERE ...` core.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectCore {
    pub top: Option<TopClause>,
    pub distinct: bool,
    pub items: Vec<SelectItem>,
    /// `SELECT ... INTO target` creates and fills a new table.
    pub into: Option<ObjectName>,
    pub from: Vec<TableSource>,
    pub where_clause: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
}

/// One projection item.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    /// `*`
    Wildcard,
    /// `alias.*`
    QualifiedWildcard(ObjectName),
    Expr {
        expr: Expr,
        alias: Option<Ident>,
    },
}

/// `TOP (n) [PERCENT] [WITH TIES]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TopClause {
    pub quantity: Expr,
    pub percent: bool,
    pub with_ties: bool,
}

/// `OFFSET n ROWS [FETCH NEXT m ROWS ONLY]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetFetch {
    pub offset: Expr,
    pub fetch: Option<Expr>,
}

/// `FOR XML ...` / `FOR JSON ...` output shaping.
#[derive(Debug, Clone, PartialEq)]
pub enum ForClause {
    Xml {
        mode: XmlMode,
        /// The row element name argument (`PATH('row')`, `RAW('x')`).
        element: Option<String>,
        /// Trailing options (`ELEMENTS`, `ROOT('x')`, ...) kept as raw text.
        options: Vec<String>,
    },
    Json {
        mode: JsonMode,
        options: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlMode {
    Raw,
    Auto,
    Path,
    Explicit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonMode {
    Auto,
    Path,
}

/// `WITH name [(cols)] AS (...) , ...`, the CTE prologue.
#[derive(Debug, Clone, PartialEq)]
pub struct WithClause {
    pub ctes: Vec<Cte>,
}

/// One common table expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Cte {
    pub name: Ident,
    pub columns: Vec<Ident>,
    pub query: SelectStatement,
}

/// One `ORDER BY` term.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByItem {
    pub expr: Expr,
    pub desc: bool,
}

// ---------------------------------------------------------------------------
// Table sources
// ---------------------------------------------------------------------------

/// A relation-typed primary: anything valid where a table source is expected
/// (`FROM`, `JOIN`, `APPLY`, `USING`).
#[derive(Debug, Clone, PartialEq)]
pub enum TableSource {
    /// Named table or view with optional alias and `WITH (...)` hints.
    Named {
        name: ObjectName,
        alias: Option<Ident>,
        hints: Vec<String>,
    },
    /// Derived table `(SELECT ...) AS alias [(cols)]`.
    Derived {
        subquery: Box<SelectStatement>,
        alias: Option<Ident>,
        columns: Vec<Ident>,
    },
    /// Table-valued function call: `OPENJSON(...)`, `STRING_SPLIT(...)`,
    /// `CONTAINSTABLE(...)`, `OPENXML(...)`, `OPENROWSET(...)`, user TVFs.
    Function {
        name: ObjectName,
        args: Vec<Expr>,
        /// `WITH (col type ['path'], ...)` schema clause (OPENJSON/OPENXML).
        with_schema: Vec<SchemaColumn>,
        alias: Option<Ident>,
        columns: Vec<Ident>,
    },
    /// `@var` used as a table source (table variables).
    Variable {
        name: String,
        alias: Option<Ident>,
    },
    /// `(VALUES (...), (...)) AS alias (cols)` row constructor.
    Values {
        rows: Vec<Vec<Expr>>,
        alias: Option<Ident>,
        columns: Vec<Ident>,
    },
    /// An XML `.nodes('xpath')` (or similar) method yielding a rowset:
    /// `@doc.nodes('/a/b') AS t(c)`.
    MethodCall {
        target: Box<Expr>,
        method: Ident,
        args: Vec<Expr>,
        alias: Option<Ident>,
        columns: Vec<Ident>,
    },
    Join {
        left: Box<TableSource>,
        kind: JoinKind,
        right: Box<TableSource>,
        /// Absent for `CROSS JOIN`.
        on: Option<Expr>,
    },
    /// `CROSS APPLY` / `OUTER APPLY`.
    Apply {
        left: Box<TableSource>,
        outer: bool,
        right: Box<TableSource>,
    },
    Pivot {
        source: Box<TableSource>,
        aggregate: FunctionCall,
        value_column: Ident,
        in_list: Vec<Expr>,
        alias: Option<Ident>,
    },
    Unpivot {
        source: Box<TableSource>,
        value_column: Ident,
        for_column: Ident,
        in_columns: Vec<Ident>,
        alias: Option<Ident>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

/// One column of an `OPENJSON`/`OPENXML` `WITH (...)` schema clause.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaColumn {
    pub name: Ident,
    pub type_name: TypeName,
    /// The JSON path / XPath string, when given.
    pub path: Option<String>,
}

// ---------------------------------------------------------------------------
// INSERT / BULK INSERT
// ---------------------------------------------------------------------------

/// The target of a DML statement: a named table or a table variable.
#[derive(Debug, Clone, PartialEq)]
pub enum DmlTarget {
    Table(ObjectName),
    Variable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub top: Option<TopClause>,
    pub target: DmlTarget,
    pub columns: Vec<Ident>,
    pub output: Option<OutputClause>,
    pub source: InsertSource,
}

/// Where inserted rows come from.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    Values(Vec<Vec<Expr>>),
    Select(Box<SelectStatement>),
    Execute(Box<ExecuteStatement>),
    DefaultValues,
}

/// `OUTPUT inserted.* [, ...] [INTO target (cols)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputClause {
    pub items: Vec<SelectItem>,
    pub into: Option<(DmlTarget, Vec<Ident>)>,
}

/// `BULK INSERT target FROM 'file' [WITH (...)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkInsertStatement {
    pub target: ObjectName,
    pub file: String,
    pub options: Vec<SqlOption>,
}

// ---------------------------------------------------------------------------
// UPDATE / DELETE
// ---------------------------------------------------------------------------

/// `WHERE expr` or the cursor-positioned `WHERE CURRENT OF cursor`.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereClause {
    Expr(Expr),
    CurrentOf(ObjectName),
}

/// One `SET` assignment in `UPDATE` or a `MERGE` update action.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: AssignmentTarget,
    pub op: AssignOp,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentTarget {
    Column(ObjectName),
    Variable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub top: Option<TopClause>,
    pub target: DmlTarget,
    pub assignments: Vec<Assignment>,
    pub output: Option<OutputClause>,
    pub from: Vec<TableSource>,
    pub where_clause: Option<WhereClause>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub top: Option<TopClause>,
    pub target: DmlTarget,
    pub output: Option<OutputClause>,
    pub from: Vec<TableSource>,
    pub where_clause: Option<WhereClause>,
}

// ---------------------------------------------------------------------------
// MERGE
// ---------------------------------------------------------------------------

/// `MERGE [INTO] target USING source ON cond WHEN ... ;`
///
/// The terminating semicolon is mandatory for `MERGE`; the parser emits a
/// `MissingTerminator` diagnostic when it is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeStatement {
    pub top: Option<TopClause>,
    pub target: ObjectName,
    pub target_alias: Option<Ident>,
    pub using: TableSource,
    pub on: Expr,
    pub clauses: Vec<MergeClause>,
    pub output: Option<OutputClause>,
}

/// One `WHEN [NOT] MATCHED [BY TARGET|SOURCE] [AND cond] THEN action` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeClause {
    pub when: MergeWhen,
    pub condition: Option<Expr>,
    pub action: MergeAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeWhen {
    Matched,
    NotMatchedByTarget,
    NotMatchedBySource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MergeAction {
    Update(Vec<Assignment>),
    Delete,
    Insert {
        columns: Vec<Ident>,
        source: MergeInsertSource,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MergeInsertSource {
    Values(Vec<Expr>),
    DefaultValues,
}

// ---------------------------------------------------------------------------
// DDL: tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement {
    pub name: ObjectName,
    pub columns: Vec<ColumnDef>,
    pub constraints: Vec<TableConstraint>,
    /// `PERIOD FOR SYSTEM_TIME (start_col, end_col)` on temporal tables.
    pub period: Option<(Ident, Ident)>,
    /// `ON filegroup` or `ON scheme(column)`.
    pub on: Option<OnClause>,
    /// `WITH (...)` table options (`SYSTEM_VERSIONING = ON (...)`, ...).
    pub options: Vec<SqlOption>,
}

/// The `ON` placement clause of tables and indexes.
#[derive(Debug, Clone, PartialEq)]
pub enum OnClause {
    Filegroup(Ident),
    PartitionScheme { scheme: Ident, column: Ident },
}

/// One column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: Ident,
    /// Absent for computed columns.
    pub type_name: Option<TypeName>,
    /// `AS (expr)` computed column body.
    pub computed: Option<Box<Expr>>,
    pub persisted: bool,
    pub collation: Option<Ident>,
    pub constraints: Vec<ColumnConstraint>,
}

/// A column-level constraint, optionally named.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnConstraint {
    pub name: Option<Ident>,
    pub kind: ColumnConstraintKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnConstraintKind {
    PrimaryKey { clustered: Option<bool> },
    Unique,
    NotNull,
    Null,
    Default(Expr),
    Check(Expr),
    ForeignKey(ForeignKeyClause),
    Identity { seed: i64, increment: i64 },
    Rowguidcol,
    /// Temporal `GENERATED ALWAYS AS ROW START|END [HIDDEN]`.
    GeneratedAlwaysRow { start: bool, hidden: bool },
}

/// A table-level constraint, optionally named.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConstraint {
    pub name: Option<Ident>,
    pub kind: TableConstraintKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraintKind {
    PrimaryKey {
        clustered: Option<bool>,
        columns: Vec<IndexColumn>,
    },
    Unique {
        clustered: Option<bool>,
        columns: Vec<IndexColumn>,
    },
    ForeignKey {
        columns: Vec<Ident>,
        clause: ForeignKeyClause,
    },
    Check(Expr),
}

/// `REFERENCES table (cols) [ON DELETE action] [ON UPDATE action]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyClause {
    pub table: ObjectName,
    pub columns: Vec<Ident>,
    pub on_delete: Option<FkAction>,
    pub on_update: Option<FkAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FkAction {
    NoAction,
    Cascade,
    SetNull,
    SetDefault,
}

/// One key column with sort direction.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexColumn {
    pub name: Ident,
    pub desc: bool,
}

/// A generic `name [= value]` option inside a `WITH (...)` list, shared by
/// table DDL, indexes, `BULK INSERT`, `BACKUP`/`RESTORE`, and hints.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlOption {
    pub name: Ident,
    pub value: Option<OptionValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Ident(Ident),
    Literal(Literal),
    /// `ON (nested options)`, e.g. `SYSTEM_VERSIONING = ON (HISTORY_TABLE = ...)`.
    OnWith(Vec<SqlOption>),
    /// Object-valued option (`HISTORY_TABLE = dbo.History`).
    ObjectName(ObjectName),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlterTableStatement {
    pub name: ObjectName,
    pub action: AlterTableAction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlterTableAction {
    AddColumns(Vec<ColumnDef>),
    AddConstraints {
        /// `WITH CHECK` / `WITH NOCHECK` prefix.
        with_check: Option<bool>,
        constraints: Vec<TableConstraint>,
    },
    AlterColumn(ColumnDef),
    DropColumns(Vec<Ident>),
    DropConstraints(Vec<Ident>),
    /// `SET (...)`, e.g. `SET (SYSTEM_VERSIONING = OFF)`.
    SetOptions(Vec<SqlOption>),
    /// `SWITCH [PARTITION n] TO target [PARTITION m]`.
    SwitchPartition {
        source_partition: Option<Expr>,
        target: ObjectName,
        target_partition: Option<Expr>,
    },
    /// `CHECK|NOCHECK CONSTRAINT name|ALL`.
    CheckConstraint {
        check: bool,
        name: Option<Ident>,
    },
}

// ---------------------------------------------------------------------------
// DDL: other objects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndexStatement {
    pub unique: bool,
    pub clustered: Option<bool>,
    pub columnstore: bool,
    pub name: Ident,
    pub table: ObjectName,
    pub columns: Vec<IndexColumn>,
    pub include: Vec<Ident>,
    /// Filtered index predicate.
    pub where_clause: Option<Expr>,
    pub options: Vec<SqlOption>,
    pub on: Option<OnClause>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateViewStatement {
    pub or_alter: bool,
    pub name: ObjectName,
    pub columns: Vec<Ident>,
    /// `WITH SCHEMABINDING`, `WITH ENCRYPTION`, ... kept as raw words.
    pub options: Vec<String>,
    pub query: SelectStatement,
    pub with_check_option: bool,
}

/// One procedure or function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineParam {
    /// Name without the `@` sigil.
    pub name: String,
    pub type_name: TypeName,
    pub default: Option<Expr>,
    pub output: bool,
    pub readonly: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateProcedureStatement {
    pub or_alter: bool,
    pub name: ObjectName,
    pub params: Vec<RoutineParam>,
    /// `WITH RECOMPILE`, `WITH EXECUTE AS OWNER`, ... kept as raw text.
    pub options: Vec<String>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateFunctionStatement {
    pub or_alter: bool,
    pub name: ObjectName,
    pub params: Vec<RoutineParam>,
    pub returns: FunctionReturns,
    pub options: Vec<String>,
    pub body: FunctionBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionReturns {
    Scalar(TypeName),
    /// Inline table-valued function: `RETURNS TABLE`.
    Table,
    /// Multi-statement TVF: `RETURNS @t TABLE (...)`.
    TableVariable {
        name: String,
        columns: Vec<ColumnDef>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    /// Inline TVF: `RETURN (SELECT ...)`.
    Return(Box<SelectStatement>),
    /// Scalar / multi-statement: `BEGIN ... END`.
    Statements(Vec<Statement>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTriggerStatement {
    pub or_alter: bool,
    pub name: ObjectName,
    pub table: ObjectName,
    pub timing: TriggerTiming,
    pub events: Vec<TriggerEvent>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerTiming {
    After,
    InsteadOf,
    /// `FOR` (synonym of AFTER, preserved for round-tripping).
    For,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateSequenceStatement {
    pub name: ObjectName,
    pub data_type: Option<TypeName>,
    pub start_with: Option<Expr>,
    pub increment_by: Option<Expr>,
    pub min_value: Option<Option<Expr>>,
    pub max_value: Option<Option<Expr>>,
    pub cycle: Option<bool>,
    pub cache: Option<Option<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateSchemaStatement {
    pub name: Ident,
    pub authorization: Option<Ident>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTypeStatement {
    pub name: ObjectName,
    pub definition: TypeDefinition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinition {
    /// `FROM base_type [NOT NULL]`.
    Alias {
        base: TypeName,
        not_null: bool,
    },
    /// `AS TABLE (...)`.
    Table {
        columns: Vec<ColumnDef>,
        constraints: Vec<TableConstraint>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateSynonymStatement {
    pub name: ObjectName,
    pub target: ObjectName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateSecurityPolicyStatement {
    pub name: ObjectName,
    pub predicates: Vec<SecurityPredicate>,
    /// `WITH (STATE = ON|OFF)`.
    pub state: Option<bool>,
}

/// One `ADD FILTER|BLOCK PREDICATE fn(args) ON table [AFTER INSERT|...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityPredicate {
    pub kind: SecurityPredicateKind,
    pub function: ObjectName,
    pub args: Vec<Expr>,
    pub table: ObjectName,
    /// Block-predicate timing (`AFTER INSERT`, `BEFORE UPDATE`, ...).
    pub block_timing: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityPredicateKind {
    Filter,
    Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatePartitionFunctionStatement {
    pub name: Ident,
    pub input_type: TypeName,
    /// `RANGE LEFT` vs `RANGE RIGHT`.
    pub range_right: bool,
    pub boundaries: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatePartitionSchemeStatement {
    pub name: Ident,
    pub function: Ident,
    /// `ALL TO (fg)` form.
    pub all: bool,
    pub filegroups: Vec<Ident>,
}

/// `DROP <kind> [IF EXISTS] name [, ...] [ON table]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DropStatement {
    pub object_type: ObjectType,
    pub if_exists: bool,
    pub names: Vec<ObjectName>,
    /// `DROP INDEX name ON table`.
    pub on: Option<ObjectName>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Table,
    View,
    Procedure,
    Function,
    Trigger,
    Index,
    Sequence,
    Schema,
    Type,
    Synonym,
    SecurityPolicy,
    PartitionFunction,
    PartitionScheme,
    Database,
}

// ---------------------------------------------------------------------------
// Procedural statements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DeclareStatement {
    pub declarations: Vec<VariableDeclaration>,
}

/// One `@name type [= init]` or `@name TABLE (...)` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// Name without the `@` sigil.
    pub name: String,
    pub data_type: DeclareType,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclareType {
    Type(TypeName),
    Table {
        columns: Vec<ColumnDef>,
        constraints: Vec<TableConstraint>,
    },
}

/// `DECLARE name CURSOR [options] FOR select [FOR UPDATE [OF cols]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclareCursorStatement {
    pub name: Ident,
    pub options: CursorOptions,
    pub query: SelectStatement,
    /// `FOR UPDATE [OF col, ...]`; `Some(vec![])` when no column list.
    pub for_update_of: Option<Vec<Ident>>,
}

/// The cursor option set, one field per keyword so consumers pattern-match
/// instead of re-parsing strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorOptions {
    pub local: bool,
    pub global: bool,
    pub static_: bool,
    pub keyset: bool,
    pub dynamic: bool,
    pub forward_only: bool,
    pub scroll: bool,
    pub read_only: bool,
    pub scroll_locks: bool,
    pub optimistic: bool,
    pub fast_forward: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchStatement {
    pub direction: FetchDirection,
    pub cursor: ObjectName,
    /// `INTO @a, @b` variable names without sigils.
    pub into: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchDirection {
    Next,
    Prior,
    First,
    Last,
    Absolute(Expr),
    Relative(Expr),
}

/// `SET @x = expr` (including compound forms like `SET @x += 1`).
#[derive(Debug, Clone, PartialEq)]
pub struct SetVariableStatement {
    pub name: String,
    pub op: AssignOp,
    pub value: Expr,
}

/// `SET NOCOUNT ON`, `SET TRANSACTION ISOLATION LEVEL ...`, etc.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOptionStatement {
    pub names: Vec<Ident>,
    pub value: OptionState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionState {
    On,
    Off,
    /// Word-valued settings (`READ COMMITTED`, `LOW`, ...).
    Words(Vec<Ident>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expr,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expr,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryCatchStatement {
    pub try_block: Vec<Statement>,
    pub catch_block: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WaitforStatement {
    Delay(Expr),
    Time(Expr),
}

/// `EXEC[UTE]` in all its forms.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteStatement {
    /// `EXEC @status = proc` return-status capture (name without sigil).
    pub return_variable: Option<String>,
    pub target: ExecuteTarget,
    pub args: Vec<ExecuteArg>,
    pub result_sets: Option<ResultSetsClause>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteTarget {
    Procedure(ObjectName),
    /// `EXEC ('SELECT ' + @col)`: dynamic SQL, parsed only as expressions.
    Strings(Vec<Expr>),
    /// `EXEC @proc_name`.
    Variable(String),
}

/// One procedure argument, positional or named, optionally `OUTPUT`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteArg {
    /// `@param =` name for named arguments (without sigil).
    pub name: Option<String>,
    pub value: Expr,
    pub output: bool,
}

/// `WITH RESULT SETS ...`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultSetsClause {
    None,
    Undefined,
    Defined(Vec<Vec<SchemaColumn>>),
}

/// `EXECUTE AS CALLER|SELF|OWNER|USER = '...'|LOGIN = '...'`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteAsStatement {
    pub context: ExecuteContext,
    pub no_revert: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteContext {
    Caller,
    SelfUser,
    Owner,
    User(Expr),
    Login(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RaiserrorStatement {
    /// Message string or message id.
    pub message: Expr,
    pub severity: Expr,
    pub state: Expr,
    pub args: Vec<Expr>,
    /// `WITH NOWAIT`, `WITH LOG`, ...
    pub options: Vec<Ident>,
}

/// The argument triple of a parameterized `THROW`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowArgs {
    pub error_number: Expr,
    pub message: Expr,
    pub state: Expr,
}

// ---------------------------------------------------------------------------
// BACKUP / RESTORE
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BackupStatement {
    /// `BACKUP LOG` vs `BACKUP DATABASE`.
    pub log: bool,
    pub database: Ident,
    pub to: Vec<BackupDevice>,
    pub options: Vec<SqlOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestoreStatement {
    pub kind: RestoreKind,
    pub database: Option<Ident>,
    pub from: Vec<BackupDevice>,
    pub options: Vec<SqlOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreKind {
    Database,
    Log,
    VerifyOnly,
    HeaderOnly,
    FileListOnly,
}

/// One backup device: `DISK = 'path'`, `TAPE = '...'`, `URL = '...'`.
#[derive(Debug, Clone, PartialEq)]
pub struct BackupDevice {
    pub kind: BackupDeviceKind,
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupDeviceKind {
    Disk,
    Tape,
    Url,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_span_merge_covers_both() {
        let a = Span::new(5, 10);
        let b = Span::new(2, 7);
        assert_eq!(a.merge(b), Span::new(2, 10));
        assert_eq!(b.merge(a), Span::new(2, 10));
    }

    #[test]
    fn test_span_zero_is_empty() {
        assert!(Span::ZERO.is_empty());
        assert_eq!(Span::new(3, 8).len(), 5);
    }

    #[test]
    fn test_ident_matches_is_case_insensitive() {
        assert!(Ident::new("OrderID").matches("orderid"));
        assert!(Ident::bracketed("Order Details").matches("ORDER DETAILS"));
        assert!(!Ident::new("a").matches("b"));
    }

    #[test]
    fn test_ident_display_preserves_quoting() {
        assert_eq!(Ident::new("Orders").to_string(), "Orders");
        assert_eq!(Ident::bracketed("Order Details").to_string(), "[Order Details]");
        let dq = Ident {
            value: "Name".to_owned(),
            quote: Some(QuoteStyle::Double),
        };
        assert_eq!(dq.to_string(), "\"Name\"");
    }

    #[test]
    fn test_bracket_ident_escapes_closing_bracket() {
        assert_eq!(Ident::bracketed("a]b").to_string(), "[a]]b]");
    }

    #[test]
    fn test_object_name_display_dotted() {
        let name = ObjectName {
            parts: vec![Ident::new("dbo"), Ident::bracketed("Order Details")],
        };
        assert_eq!(name.to_string(), "dbo.[Order Details]");
        assert_eq!(name.last().unwrap().value, "Order Details");
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::Int(42).to_string(), "42");
        assert_eq!(Literal::Null.to_string(), "NULL");
        assert_eq!(Literal::Numeric("12.50".to_owned()).to_string(), "12.50");
        assert_eq!(Literal::Hex("0x1A2B".to_owned()).to_string(), "0x1A2B");
        let s = Literal::String {
            value: "it's".to_owned(),
            unicode: false,
        };
        assert_eq!(s.to_string(), "'it''s'");
        let n = Literal::String {
            value: "héllo".to_owned(),
            unicode: true,
        };
        assert_eq!(n.to_string(), "N'héllo'");
    }

    #[test]
    fn test_binary_expr_display_parenthesizes_compounds() {
        let a = Expr::Column(ObjectName::bare("a"), Span::ZERO);
        let b = Expr::Column(ObjectName::bare("b"), Span::ZERO);
        let c = Expr::Column(ObjectName::bare("c"), Span::ZERO);
        let inner = Expr::BinaryOp {
            left: Box::new(a),
            op: BinaryOp::Add,
            right: Box::new(b),
            span: Span::ZERO,
        };
        let outer = Expr::BinaryOp {
            left: Box::new(inner),
            op: BinaryOp::Multiply,
            right: Box::new(c),
            span: Span::ZERO,
        };
        assert_eq!(outer.to_string(), "(a + b) * c");
    }

    #[test]
    fn test_quantified_display() {
        let subquery = SelectStatement {
            with: None,
            body: SelectBody::Core(Box::new(SelectCore {
                top: None,
                distinct: false,
                items: vec![SelectItem::Expr {
                    expr: Expr::Column(ObjectName::bare("x"), Span::ZERO),
                    alias: None,
                }],
                into: None,
                from: vec![TableSource::Named {
                    name: ObjectName::bare("t"),
                    alias: None,
                    hints: vec![],
                }],
                where_clause: None,
                group_by: vec![],
                having: None,
            })),
            order_by: vec![],
            offset_fetch: None,
            for_clause: None,
        };
        let expr = Expr::Quantified {
            left: Box::new(Expr::Column(ObjectName::bare("a"), Span::ZERO)),
            op: BinaryOp::Gt,
            quantifier: Quantifier::All,
            subquery: Box::new(subquery),
            span: Span::ZERO,
        };
        assert_eq!(expr.to_string(), "a > ALL (SELECT x FROM t)");
    }

    #[test]
    fn test_statement_display_appends_terminator() {
        let stmt = Statement {
            kind: StatementKind::Use(Ident::new("master")),
            span: Span::ZERO,
            terminated: true,
        };
        assert_eq!(stmt.to_string(), "USE master;");
        let bare = Statement {
            kind: StatementKind::Break,
            span: Span::ZERO,
            terminated: false,
        };
        assert_eq!(bare.to_string(), "BREAK");
    }

    #[test]
    fn test_cursor_options_display_order() {
        let opts = CursorOptions {
            local: true,
            fast_forward: true,
            ..CursorOptions::default()
        };
        assert_eq!(opts.to_string(), "LOCAL FAST_FORWARD");
    }
}
