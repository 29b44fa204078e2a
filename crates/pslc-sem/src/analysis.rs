//! Walks a parsed [`Program`](pslc_par::ast::Program), declaring every name
//! into a [`ScopeTree`] and checking every expression's structural type as
//! it goes. The checker is single-pass: declarations in a block are visible
//! to the statements and nested subprograms of that same block (Pascal's
//! usual forward-reference-within-a-block rule), but a block never sees
//! names declared in a sibling block.

use pslc_par::ast::*;
use pslc_util::error::messages;
use pslc_util::{CompileError, CompileResult, Interner, ParamMode, Span, Symbol};

use crate::scope::{Object, ObjectKind, ScopeId, ScopeTree};
use crate::types::{ConstantValue, Type};

pub struct Analyzer {
    scopes: ScopeTree,
    /// Names of the `Function`s whose body is currently being checked,
    /// innermost last. Assigning to the function's own name inside its
    /// body is how the source language writes "set the return value" —
    /// but only for the *nearest* enclosing function, not any function
    /// that merely lexically contains it.
    current_function: Vec<Symbol>,
}

impl Analyzer {
    pub fn new(interner: &mut Interner) -> Self {
        let mut analyzer = Self {
            scopes: ScopeTree::new(),
            current_function: Vec::new(),
        };
        analyzer.register_builtins(interner);
        analyzer
    }

    /// `READC`/`READI`/`WRITEC`/`WRITEI`/`WRITELN` are always in scope; they
    /// have no source declaration of their own. `READC`/`READI` are
    /// parameterless functions (they return the value read), the three
    /// `WRITE*` names are procedures.
    fn register_builtins(&mut self, interner: &mut Interner) {
        let root = self.scopes.root();
        let builtins = [
            (
                "READC",
                ObjectKind::Function {
                    params: vec![],
                    returns: Type::Char,
                },
            ),
            (
                "READI",
                ObjectKind::Function {
                    params: vec![],
                    returns: Type::Int,
                },
            ),
            (
                "WRITEC",
                ObjectKind::Procedure {
                    params: vec![(Type::Char, ParamMode::ByValue)],
                },
            ),
            (
                "WRITEI",
                ObjectKind::Procedure {
                    params: vec![(Type::Int, ParamMode::ByValue)],
                },
            ),
            ("WRITELN", ObjectKind::Procedure { params: vec![] }),
        ];
        for (name, kind) in builtins {
            let name = interner.intern(name);
            self.scopes.declare(root, Object { name, kind });
        }
    }

    pub fn check_program(&mut self, program: &Program) -> CompileResult<()> {
        let root = self.scopes.root();
        self.check_block(&program.block, root)
    }

    fn check_block(&mut self, block: &Block, scope: ScopeId) -> CompileResult<()> {
        for decl in &block.consts {
            let value = self.resolve_const_value(&decl.value, scope, decl.span)?;
            self.declare(scope, decl.name, ObjectKind::Const(value), decl.span)?;
        }
        for decl in &block.types {
            let ty = self.resolve_type_denoter(&decl.denoter, scope, decl.span)?;
            self.declare(scope, decl.name, ObjectKind::Type(ty), decl.span)?;
        }
        for decl in &block.vars {
            let ty = self.resolve_type_denoter(&decl.denoter, scope, decl.span)?;
            for name in &decl.names {
                self.declare(scope, *name, ObjectKind::Var(ty.clone()), decl.span)?;
            }
        }
        for sub in &block.subprograms {
            self.check_subprogram(sub, scope)?;
        }
        for stmt in &block.body {
            self.check_stmt(stmt, scope)?;
        }
        Ok(())
    }

    fn check_subprogram(&mut self, sub: &Subprogram, scope: ScopeId) -> CompileResult<()> {
        let mut param_types = Vec::new();
        for param in &sub.params {
            let ty = self.resolve_type_denoter(&param.denoter, scope, sub.span)?;
            param_types.push((ty, param.mode));
        }
        let return_type = sub
            .return_type
            .as_ref()
            .map(|t| self.resolve_type_denoter(t, scope, sub.span))
            .transpose()?;

        let kind = match sub.kind {
            SubprogramKind::Function => ObjectKind::Function {
                params: param_types.clone(),
                returns: return_type
                    .clone()
                    .expect("function always has a return type"),
            },
            SubprogramKind::Procedure => ObjectKind::Procedure {
                params: param_types.clone(),
            },
        };
        self.declare(scope, sub.name, kind, sub.span)?;

        let body_scope = self.scopes.push_child(scope);
        for (param, (ty, mode)) in sub.params.iter().zip(param_types) {
            self.declare(body_scope, param.name, ObjectKind::Param(ty, mode), sub.span)?;
        }

        let pushed_self = sub.kind == SubprogramKind::Function;
        if pushed_self {
            self.current_function.push(sub.name);
        }
        let result = self.check_block(&sub.block, body_scope);
        if pushed_self {
            self.current_function.pop();
        }
        result
    }

    fn declare(
        &mut self,
        scope: ScopeId,
        name: Symbol,
        kind: ObjectKind,
        span: Span,
    ) -> CompileResult<()> {
        if self.scopes.declare(scope, Object { name, kind }) {
            Ok(())
        } else {
            Err(CompileError::new(span, messages::DUPLICATE_IDENT))
        }
    }

    /// `declaredConstant(name)`: not found → `UNDECLARED_CONSTANT`; found
    /// but not a `Constant` → `INVALID_CONSTANT` (the same message the
    /// parser raises for a malformed `Constant` production).
    fn resolve_constant(&self, name: Symbol, scope: ScopeId, span: Span) -> CompileResult<ConstantValue> {
        match self.scopes.lookup(scope, name) {
            Some(Object {
                kind: ObjectKind::Const(value),
                ..
            }) => Ok(*value),
            Some(_) => Err(CompileError::new(span, messages::INVALID_CONSTANT)),
            None => Err(CompileError::new(span, messages::UNDECLARED_CONSTANT)),
        }
    }

    /// As [`Self::resolve_constant`], but additionally requires the
    /// constant to be `Int`-valued — used wherever the constant is about to
    /// stand in for a bare integer (array bounds, a sign-negated reference).
    fn resolve_int_constant(&self, name: Symbol, scope: ScopeId, span: Span) -> CompileResult<i64> {
        match self.resolve_constant(name, scope, span)? {
            ConstantValue::Int(n) => Ok(n),
            ConstantValue::Char(_) => Err(CompileError::new(span, messages::UNDECLARED_INT_CONSTANT)),
        }
    }

    fn resolve_const_value(
        &self,
        value: &ConstValue,
        scope: ScopeId,
        span: Span,
    ) -> CompileResult<ConstantValue> {
        match value {
            ConstValue::Int(n) => Ok(ConstantValue::Int(*n)),
            ConstValue::Char(c) => Ok(ConstantValue::Char(*c)),
            ConstValue::Named(name) => self.resolve_constant(*name, scope, span),
            ConstValue::NegNamed(name) => {
                Ok(ConstantValue::Int(-self.resolve_int_constant(*name, scope, span)?))
            }
        }
    }

    fn resolve_type_denoter(
        &self,
        denoter: &TypeDenoter,
        scope: ScopeId,
        span: Span,
    ) -> CompileResult<Type> {
        match denoter {
            TypeDenoter::Integer => Ok(Type::Int),
            TypeDenoter::Char => Ok(Type::Char),
            TypeDenoter::Array { size, element } => {
                let size = match size {
                    ArrayBound::Literal(n) => *n,
                    ArrayBound::Named(name) => self.resolve_int_constant(*name, scope, span)?,
                };
                let element = self.resolve_type_denoter(element, scope, span)?;
                Ok(Type::array(size, element))
            }
            TypeDenoter::Named(name) => match self.scopes.lookup(scope, *name) {
                Some(Object {
                    kind: ObjectKind::Type(ty),
                    ..
                }) => Ok(ty.clone()),
                Some(_) => Err(CompileError::new(span, messages::INVALID_TYPE)),
                None => Err(CompileError::new(span, messages::UNDECLARED_TYPE)),
            },
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt, scope: ScopeId) -> CompileResult<()> {
        match stmt {
            Stmt::Empty => Ok(()),
            Stmt::Compound(stmts) => {
                for s in stmts {
                    self.check_stmt(s, scope)?;
                }
                Ok(())
            }
            Stmt::Assign { target, value, span } => {
                let target_ty = self.check_lvalue(target, scope)?;
                let value_ty = self.infer_expr(value, scope)?;
                if target_ty != value_ty {
                    return Err(CompileError::new(*span, messages::TYPE_INCONSISTENCY));
                }
                Ok(())
            }
            Stmt::Call { name, args, span } => {
                self.check_call(CallKind::Procedure, *name, args, scope, *span)
                    .map(|_| ())
            }
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.check_condition(cond, scope)?;
                self.check_stmt(then_branch, scope)?;
                if let Some(else_branch) = else_branch {
                    self.check_stmt(else_branch, scope)?;
                }
                Ok(())
            }
            Stmt::While { cond, body } => {
                self.check_condition(cond, scope)?;
                self.check_stmt(body, scope)
            }
            Stmt::For {
                var,
                from,
                to,
                body,
                span,
            } => {
                let var_ty = self.lookup_plain_variable(*var, scope, *span)?;
                let from_ty = self.infer_expr(from, scope)?;
                let to_ty = self.infer_expr(to, scope)?;
                if from_ty != var_ty || to_ty != var_ty {
                    return Err(CompileError::new(*span, messages::TYPE_INCONSISTENCY));
                }
                self.check_stmt(body, scope)
            }
        }
    }

    /// Both sides of a condition must be of a basic type (`Int` or `Char`,
    /// never an array) and structurally equal.
    fn check_condition(&self, cond: &Condition, scope: ScopeId) -> CompileResult<()> {
        let left = self.infer_expr(&cond.left, scope)?;
        let right = self.infer_expr(&cond.right, scope)?;
        if !matches!(left, Type::Int | Type::Char) || left != right {
            return Err(CompileError::new(cond.span, messages::TYPE_INCONSISTENCY));
        }
        Ok(())
    }

    /// An L-value's base identifier, followed by zero or more subscripts
    /// that each narrow the type by one array dimension.
    fn check_lvalue(&self, lvalue: &LValue, scope: ScopeId) -> CompileResult<Type> {
        let mut ty = self.lookup_lvalue(lvalue.name, scope, lvalue.span, messages::INVALID_LVALUE)?;
        for index in &lvalue.indices {
            let idx_ty = self.infer_expr(index, scope)?;
            if idx_ty != Type::Int {
                return Err(CompileError::new(lvalue.span, messages::TYPE_INCONSISTENCY));
            }
            match ty {
                Type::Array { element, .. } => ty = *element,
                _ => return Err(CompileError::new(lvalue.span, messages::INVALID_LVALUE)),
            }
        }
        Ok(ty)
    }

    /// `declaredLValueIdent(name)`: must be a `Variable`, a `Parameter`, or
    /// the Function whose body is currently being checked (self-assignment
    /// to the return value). `wrong_kind` is the message raised when the
    /// name resolves to something else — callers outside an assignment
    /// context (plain variable reads) pass a different message than
    /// assignment targets do, since the source language's error catalog
    /// distinguishes "a variable expected" from "invalid lvalue".
    fn lookup_lvalue(
        &self,
        name: Symbol,
        scope: ScopeId,
        span: Span,
        wrong_kind: &'static str,
    ) -> CompileResult<Type> {
        match self.scopes.lookup(scope, name) {
            Some(Object {
                kind: ObjectKind::Var(ty) | ObjectKind::Param(ty, _),
                ..
            }) => Ok(ty.clone()),
            Some(Object {
                kind: ObjectKind::Function { returns, .. },
                ..
            }) if self.is_current_function(name) => Ok(returns.clone()),
            Some(_) => Err(CompileError::new(span, wrong_kind)),
            None => Err(CompileError::new(span, messages::UNDECLARED_VARIABLE)),
        }
    }

    /// The `For`-loop variable must be a plain declared variable — not a
    /// parameter, and not a function's self-assignment slot.
    fn lookup_plain_variable(&self, name: Symbol, scope: ScopeId, span: Span) -> CompileResult<Type> {
        match self.scopes.lookup(scope, name) {
            Some(Object {
                kind: ObjectKind::Var(ty),
                ..
            }) => Ok(ty.clone()),
            Some(_) => Err(CompileError::new(span, messages::INVALID_VARIABLE)),
            None => Err(CompileError::new(span, messages::UNDECLARED_VARIABLE)),
        }
    }

    fn is_current_function(&self, name: Symbol) -> bool {
        self.current_function.last() == Some(&name)
    }

    fn check_call(
        &self,
        kind: CallKind,
        name: Symbol,
        args: &[Expr],
        scope: ScopeId,
        span: Span,
    ) -> CompileResult<Option<Type>> {
        let (params, returns) = self.resolve_callee(kind, name, scope, span)?;

        if args.len() != params.len() {
            return Err(CompileError::new(span, messages::PARAMS_ARGS_INCONSISTENCY));
        }
        for (arg, (expected, mode)) in args.iter().zip(&params) {
            match mode {
                ParamMode::ByValue => {
                    let actual = self.infer_expr(arg, scope)?;
                    if actual != *expected {
                        return Err(CompileError::new(span, messages::TYPE_INCONSISTENCY));
                    }
                }
                ParamMode::ByReference => match expr_as_lvalue(arg) {
                    Some(lvalue) => {
                        let actual = self.check_lvalue(lvalue, scope)?;
                        if actual != *expected {
                            return Err(CompileError::new(span, messages::TYPE_INCONSISTENCY));
                        }
                    }
                    None => return Err(CompileError::new(span, messages::TYPE_INCONSISTENCY)),
                },
            }
        }
        Ok(returns)
    }

    fn resolve_callee(
        &self,
        kind: CallKind,
        name: Symbol,
        scope: ScopeId,
        span: Span,
    ) -> CompileResult<(Vec<(Type, ParamMode)>, Option<Type>)> {
        let found = self.scopes.lookup(scope, name);
        match (kind, found) {
            (
                CallKind::Procedure,
                Some(Object {
                    kind: ObjectKind::Procedure { params },
                    ..
                }),
            ) => Ok((params.clone(), None)),
            (
                CallKind::Function,
                Some(Object {
                    kind: ObjectKind::Function { params, returns },
                    ..
                }),
            ) => Ok((params.clone(), Some(returns.clone()))),
            (CallKind::Procedure, Some(_)) => Err(CompileError::new(span, messages::INVALID_PROCEDURE)),
            (CallKind::Function, Some(_)) => Err(CompileError::new(span, messages::INVALID_FUNCTION)),
            (CallKind::Procedure, None) => Err(CompileError::new(span, messages::UNDECLARED_PROCEDURE)),
            (CallKind::Function, None) => Err(CompileError::new(span, messages::UNDECLARED_FUNCTION)),
        }
    }

    fn infer_expr(&self, expr: &Expr, scope: ScopeId) -> CompileResult<Type> {
        match expr {
            Expr::Leaf { neg, term, span } => {
                let ty = self.infer_term(term, scope)?;
                if *neg && ty != Type::Int {
                    return Err(CompileError::new(*span, messages::TYPE_INCONSISTENCY));
                }
                Ok(ty)
            }
            Expr::BinOp { left, right, span, .. } => {
                let left_ty = self.infer_expr(left, scope)?;
                let right_ty = self.infer_term(right, scope)?;
                if left_ty != Type::Int || right_ty != Type::Int {
                    return Err(CompileError::new(*span, messages::TYPE_INCONSISTENCY));
                }
                Ok(Type::Int)
            }
        }
    }

    fn infer_term(&self, term: &Term, scope: ScopeId) -> CompileResult<Type> {
        match term {
            Term::Factor(factor) => self.infer_factor(factor, scope),
            Term::BinOp { left, right, span, .. } => {
                let left_ty = self.infer_term(left, scope)?;
                let right_ty = self.infer_factor(right, scope)?;
                if left_ty != Type::Int || right_ty != Type::Int {
                    return Err(CompileError::new(*span, messages::TYPE_INCONSISTENCY));
                }
                Ok(Type::Int)
            }
        }
    }

    fn infer_factor(&self, factor: &Factor, scope: ScopeId) -> CompileResult<Type> {
        match factor {
            Factor::Number(_) => Ok(Type::Int),
            Factor::CharLiteral(_) => Ok(Type::Char),
            Factor::Paren(expr) => self.infer_expr(expr, scope),
            Factor::Variable(lvalue) => {
                self.lookup_lvalue_as_factor(lvalue, scope)
            }
            Factor::Call { name, args, span } => {
                match self.check_call(CallKind::Function, *name, args, scope, *span)? {
                    Some(ty) => Ok(ty),
                    None => Err(CompileError::new(*span, messages::INVALID_FUNCTION)),
                }
            }
        }
    }

    /// Like `check_lvalue`, but read in a plain expression (rvalue)
    /// position — a wrong-kind identifier here is "a variable expected",
    /// not "invalid lvalue in assignment". Unlike an assignment target, a
    /// bare identifier here may also denote a constant (yielding its
    /// value's type) or a parameterless function call written without
    /// parentheses (yielding its return type) — `READI`/`READC` and any
    /// user-defined parameterless function are only reachable this way.
    fn lookup_lvalue_as_factor(&self, lvalue: &LValue, scope: ScopeId) -> CompileResult<Type> {
        if lvalue.indices.is_empty() {
            match self.scopes.lookup(scope, lvalue.name) {
                Some(Object {
                    kind: ObjectKind::Const(value),
                    ..
                }) => return Ok(value.ty()),
                Some(Object {
                    kind: ObjectKind::Function { params, returns },
                    ..
                }) if params.is_empty() && !self.is_current_function(lvalue.name) => {
                    return Ok(returns.clone());
                }
                _ => {}
            }
        }

        let mut ty = self.lookup_lvalue(lvalue.name, scope, lvalue.span, messages::INVALID_VARIABLE)?;
        for index in &lvalue.indices {
            let idx_ty = self.infer_expr(index, scope)?;
            if idx_ty != Type::Int {
                return Err(CompileError::new(lvalue.span, messages::TYPE_INCONSISTENCY));
            }
            match ty {
                Type::Array { element, .. } => ty = *element,
                _ => return Err(CompileError::new(lvalue.span, messages::INVALID_VARIABLE)),
            }
        }
        Ok(ty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallKind {
    Procedure,
    Function,
}

/// Whether `expr` is, syntactically, a bare L-value — no arithmetic, no
/// literal, no call wrapped around it. Required for by-reference argument
/// checking: `CALL Q(1+2)` can't bind to a `VAR` parameter even when `1+2`
/// type-checks, because there's no storage location to write back through.
fn expr_as_lvalue(expr: &Expr) -> Option<&LValue> {
    match expr {
        Expr::Leaf {
            neg: false,
            term: Term::Factor(Factor::Variable(lvalue)),
            ..
        } => Some(lvalue),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pslc_par::Parser;

    fn check(src: &str) -> CompileResult<()> {
        let mut interner = Interner::new();
        let program = Parser::new(src, &mut interner).unwrap().parse_program().unwrap();
        Analyzer::new(&mut interner).check_program(&program)
    }

    #[test]
    fn negating_a_char_constant_is_reported_at_the_sign() {
        let err = check("PROGRAM P; VAR x: INTEGER; BEGIN x := -'a' END.").unwrap_err();
        assert_eq!(err.message, messages::TYPE_INCONSISTENCY);
        // The `-` sits right after `x := `, not at the dummy 0-0 location.
        assert_eq!(err.span.line, 1);
        assert!(err.span.col > 0);
    }

    #[test]
    fn shadowing_inner_scope_does_not_leak_outward() {
        assert!(check(
            "PROGRAM P; VAR X: INTEGER; \
             PROCEDURE Q; VAR X: CHAR; BEGIN X := 'a' END; \
             BEGIN X := 1; CALL Q END.",
        )
        .is_ok());
    }

    #[test]
    fn for_loop_variable_must_be_a_plain_variable_not_a_parameter() {
        let err = check(
            "PROGRAM P; PROCEDURE Q(I: INTEGER); VAR J: INTEGER; \
             BEGIN FOR I := 0 TO 9 DO J := I END; BEGIN END.",
        )
        .unwrap_err();
        assert_eq!(err.message, messages::INVALID_VARIABLE);
    }

    #[test]
    fn array_bound_from_a_named_constant_resolves() {
        assert!(check(
            "PROGRAM P; CONST N = 5; VAR A: ARRAY (.N.) OF INTEGER; \
             BEGIN A(.0.) := 1 END.",
        )
        .is_ok());
    }

    #[test]
    fn function_self_assignment_sets_the_return_value() {
        assert!(check(
            "PROGRAM P; FUNCTION SQ(N: INTEGER): INTEGER; BEGIN SQ := N * N END; \
             VAR X: INTEGER; BEGIN X := SQ(3) END.",
        )
        .is_ok());
    }

    #[test]
    fn a_constant_identifier_is_a_valid_factor() {
        assert!(check("PROGRAM P; CONST N = 5; VAR X: INTEGER; BEGIN X := N END.").is_ok());
    }

    #[test]
    fn a_parameterless_builtin_function_is_called_without_parens() {
        assert!(check("PROGRAM P; VAR X: INTEGER; BEGIN X := READI END.").is_ok());
    }

    #[test]
    fn a_parameterless_user_function_is_called_without_parens() {
        assert!(check(
            "PROGRAM P; FUNCTION ANSWER: INTEGER; BEGIN ANSWER := 42 END; \
             VAR X: INTEGER; BEGIN X := ANSWER END.",
        )
        .is_ok());
    }

    #[test]
    fn for_loop_variable_may_be_char_typed() {
        assert!(check(
            "PROGRAM P; VAR C: CHAR; BEGIN FOR C := 'a' TO 'z' DO CALL WRITEC(C) END.",
        )
        .is_ok());
    }

    #[test]
    fn for_loop_bounds_must_still_match_the_variables_type() {
        let err = check(
            "PROGRAM P; VAR C: CHAR; BEGIN FOR C := 0 TO 9 DO CALL WRITEC(C) END.",
        )
        .unwrap_err();
        assert_eq!(err.message, messages::TYPE_INCONSISTENCY);
    }
}
