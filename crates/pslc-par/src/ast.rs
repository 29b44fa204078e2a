//! AST node definitions for a parsed program.
//!
//! Nodes are plain owned trees rather than arena-indexed: the parser builds
//! a program once and hands it straight to the semantic checker, so there is
//! no need for the back-reference cycles the arena-index machinery in
//! `pslc-util::index_vec` exists to break.

use pslc_util::{ParamMode, Span, Symbol};

#[derive(Debug, Clone)]
pub struct Program {
    pub name: Symbol,
    pub block: Block,
    pub span: Span,
}

#[derive(Debug, Clone, Default)]
pub struct Block {
    pub consts: Vec<ConstDecl>,
    pub types: Vec<TypeDecl>,
    pub vars: Vec<VarDecl>,
    pub subprograms: Vec<Subprogram>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct ConstDecl {
    pub name: Symbol,
    pub value: ConstValue,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ConstValue {
    Int(i64),
    Char(u8),
    /// A reference to a previously declared constant, resolved during
    /// semantic analysis rather than by the parser.
    Named(Symbol),
    /// A sign-prefixed reference to a previously declared constant, e.g.
    /// `CONST B = -A;`. Carried separately from `Named` because the sign
    /// forces the resolved value to an integer.
    NegNamed(Symbol),
}

#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: Symbol,
    pub denoter: TypeDenoter,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum TypeDenoter {
    Integer,
    Char,
    Array {
        size: ArrayBound,
        element: Box<TypeDenoter>,
    },
    /// A type named elsewhere, e.g. `VAR v: T`.
    Named(Symbol),
}

#[derive(Debug, Clone)]
pub enum ArrayBound {
    Literal(i64),
    /// A named integer constant used as the bound, e.g. `ARRAY[N] OF INTEGER`.
    Named(Symbol),
}

#[derive(Debug, Clone)]
pub struct VarDecl {
    pub names: Vec<Symbol>,
    pub denoter: TypeDenoter,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Subprogram {
    pub kind: SubprogramKind,
    pub name: Symbol,
    pub params: Vec<Param>,
    /// Present only for functions.
    pub return_type: Option<TypeDenoter>,
    pub block: Block,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubprogramKind {
    Function,
    Procedure,
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: Symbol,
    pub mode: ParamMode,
    /// Restricted to `BasicType` (`INTEGER` | `CHAR`) by the grammar, but
    /// kept as a full `TypeDenoter` since that's what name resolution
    /// already consumes elsewhere.
    pub denoter: TypeDenoter,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Assign {
        target: LValue,
        value: Expr,
        span: Span,
    },
    Call {
        name: Symbol,
        args: Vec<Expr>,
        span: Span,
    },
    Compound(Vec<Stmt>),
    If {
        cond: Condition,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Condition,
        body: Box<Stmt>,
    },
    For {
        var: Symbol,
        from: Expr,
        to: Expr,
        body: Box<Stmt>,
        span: Span,
    },
    Empty,
}

#[derive(Debug, Clone)]
pub struct LValue {
    pub name: Symbol,
    /// One subscript expression per `(. ... .)` group, in source order —
    /// `Indexes := { '(.' Expression '.)' }` is a repeated production, not
    /// an optional single one.
    pub indices: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Condition {
    pub left: Expr,
    pub op: Comparator,
    pub right: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone)]
pub enum Expr {
    /// The first term of an expression, with the optional leading `+`/`-`
    /// sign folded in — the grammar consumes that sign once, at the very
    /// start of the expression, not per-term or per-factor. `span` locates
    /// the expression's first token, used to report a negated non-`Int`
    /// operand at the right place.
    Leaf { neg: bool, term: Term, span: Span },
    BinOp {
        left: Box<Expr>,
        op: AddOp,
        right: Term,
        span: Span,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOp {
    Add,
    Sub,
}

#[derive(Debug, Clone)]
pub enum Term {
    Factor(Factor),
    BinOp {
        left: Box<Term>,
        op: MulOp,
        right: Factor,
        span: Span,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulOp {
    Mul,
    Div,
}

#[derive(Debug, Clone)]
pub enum Factor {
    Number(i64),
    CharLiteral(u8),
    Variable(LValue),
    Call { name: Symbol, args: Vec<Expr>, span: Span },
    /// `'(' Expression ')'`, grouping. Not part of the distilled grammar's
    /// `Factor` production but present in the original parser and harmless
    /// to keep: it lets `(a + b) * c` parse the way every other arithmetic
    /// expression in the source language's family does.
    Paren(Box<Expr>),
}
