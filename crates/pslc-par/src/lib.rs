//! Recursive-descent parser over the token stream `pslc-lex` produces.
//!
//! One token of lookahead throughout; every `parse_*` method corresponds to
//! a single grammar production and consumes exactly the tokens that
//! production derives. Productions that may derive the empty string (an
//! absent `CONST`/`TYPE`/`VAR` section, an empty statement) are driven by
//! checking the current token against that production's FIRST set before
//! committing to it, so the lookahead token is never consumed speculatively.

pub mod ast;

use pslc_lex::{Lexer, Token, TokenKind};
use pslc_util::{CompileError, CompileResult, Interner, ParamMode, Span, Symbol};

use ast::*;

pub struct Parser<'src, 'i> {
    lexer: Lexer<'src>,
    current: Token,
    interner: &'i mut Interner,
}

impl<'src, 'i> Parser<'src, 'i> {
    pub fn new(source: &'src str, interner: &'i mut Interner) -> CompileResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            interner,
        })
    }

    pub fn parse_program(mut self) -> CompileResult<Program> {
        let start = self.span();
        self.expect(TokenKind::Program)?;
        let name = self.expect_ident()?;
        self.expect(TokenKind::Semicolon)?;
        let block = self.parse_block()?;
        self.expect(TokenKind::Period)?;
        Ok(Program {
            name,
            block,
            span: start,
        })
    }

    // ------------------------------------------------------------------
    // token plumbing
    // ------------------------------------------------------------------

    fn span(&self) -> Span {
        Span::new(self.current.line, self.current.col)
    }

    fn advance(&mut self) -> CompileResult<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn expect(&mut self, kind: TokenKind) -> CompileResult<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(CompileError::missing(self.span(), kind))
        }
    }

    fn expect_ident(&mut self) -> CompileResult<Symbol> {
        if self.current.kind != TokenKind::Ident {
            return Err(CompileError::missing(self.span(), TokenKind::Ident));
        }
        let sym = self.interner.intern(&self.current.lexeme);
        self.advance()?;
        Ok(sym)
    }

    // ------------------------------------------------------------------
    // block and declarations
    // ------------------------------------------------------------------

    fn parse_block(&mut self) -> CompileResult<Block> {
        let mut block = Block::default();

        if self.at(TokenKind::Const) {
            block.consts = self.parse_const_section()?;
        }
        if self.at(TokenKind::TypeKw) {
            block.types = self.parse_type_section()?;
        }
        if self.at(TokenKind::Var) {
            block.vars = self.parse_var_section()?;
        }
        while self.at(TokenKind::Function) || self.at(TokenKind::Procedure) {
            block.subprograms.push(self.parse_subprogram()?);
            self.expect(TokenKind::Semicolon)?;
        }
        block.body = self.parse_compound_statement()?;
        Ok(block)
    }

    fn parse_const_section(&mut self) -> CompileResult<Vec<ConstDecl>> {
        self.advance()?; // CONST
        let mut decls = Vec::new();
        loop {
            let span = self.span();
            let name = self.expect_ident()?;
            self.expect(TokenKind::Equal)?;
            let value = self.parse_const_value()?;
            decls.push(ConstDecl { name, value, span });
            self.expect(TokenKind::Semicolon)?;
            if !self.at(TokenKind::Ident) {
                break;
            }
        }
        Ok(decls)
    }

    /// `Constant := CHAR | '+' Const2 | '-' Const2 | Const2`.
    fn parse_const_value(&mut self) -> CompileResult<ConstValue> {
        match self.current.kind {
            TokenKind::Minus => {
                self.advance()?;
                self.parse_const2(true)
            }
            TokenKind::Plus => {
                self.advance()?;
                self.parse_const2(false)
            }
            TokenKind::CharLiteral => {
                let c = self.current.clone();
                self.advance()?;
                Ok(ConstValue::Char(c.numeric_value as u8))
            }
            TokenKind::Number | TokenKind::Ident => self.parse_const2(false),
            _ => Err(CompileError::new(
                self.span(),
                pslc_util::error::messages::INVALID_CONSTANT,
            )),
        }
    }

    /// `Const2 := IDENT | NUMBER`, under an already-consumed optional sign.
    fn parse_const2(&mut self, neg: bool) -> CompileResult<ConstValue> {
        match self.current.kind {
            TokenKind::Number => {
                let n = self.current.clone();
                self.advance()?;
                let value = if neg { -n.numeric_value } else { n.numeric_value };
                Ok(ConstValue::Int(value))
            }
            TokenKind::Ident => {
                let sym = self.interner.intern(&self.current.lexeme);
                self.advance()?;
                Ok(if neg {
                    ConstValue::NegNamed(sym)
                } else {
                    ConstValue::Named(sym)
                })
            }
            _ => Err(CompileError::new(
                self.span(),
                pslc_util::error::messages::INVALID_CONSTANT,
            )),
        }
    }

    fn parse_type_section(&mut self) -> CompileResult<Vec<TypeDecl>> {
        self.advance()?; // TYPE
        let mut decls = Vec::new();
        loop {
            let span = self.span();
            let name = self.expect_ident()?;
            self.expect(TokenKind::Equal)?;
            let denoter = self.parse_type_denoter()?;
            decls.push(TypeDecl {
                name,
                denoter,
                span,
            });
            self.expect(TokenKind::Semicolon)?;
            if !self.at(TokenKind::Ident) {
                break;
            }
        }
        Ok(decls)
    }

    fn parse_type_denoter(&mut self) -> CompileResult<TypeDenoter> {
        match self.current.kind {
            TokenKind::Integer => {
                self.advance()?;
                Ok(TypeDenoter::Integer)
            }
            TokenKind::CharKw => {
                self.advance()?;
                Ok(TypeDenoter::Char)
            }
            TokenKind::Array => {
                self.advance()?;
                self.expect(TokenKind::LSel)?;
                let size = self.parse_array_bound()?;
                self.expect(TokenKind::RSel)?;
                self.expect(TokenKind::Of)?;
                let element = Box::new(self.parse_type_denoter()?);
                Ok(TypeDenoter::Array { size, element })
            }
            TokenKind::Ident => {
                let sym = self.interner.intern(&self.current.lexeme);
                self.advance()?;
                Ok(TypeDenoter::Named(sym))
            }
            _ => Err(CompileError::new(
                self.span(),
                pslc_util::error::messages::INVALID_TYPE,
            )),
        }
    }

    fn parse_array_bound(&mut self) -> CompileResult<ArrayBound> {
        match self.current.kind {
            TokenKind::Number => {
                let n = self.current.clone();
                self.advance()?;
                Ok(ArrayBound::Literal(n.numeric_value))
            }
            TokenKind::Ident => {
                let sym = self.interner.intern(&self.current.lexeme);
                self.advance()?;
                Ok(ArrayBound::Named(sym))
            }
            _ => Err(CompileError::new(
                self.span(),
                pslc_util::error::messages::INVALID_CONSTANT,
            )),
        }
    }

    fn parse_var_section(&mut self) -> CompileResult<Vec<VarDecl>> {
        self.advance()?; // VAR
        let mut decls = Vec::new();
        loop {
            let span = self.span();
            let names = self.parse_ident_list()?;
            self.expect(TokenKind::Colon)?;
            let denoter = self.parse_type_denoter()?;
            decls.push(VarDecl {
                names,
                denoter,
                span,
            });
            self.expect(TokenKind::Semicolon)?;
            if !self.at(TokenKind::Ident) {
                break;
            }
        }
        Ok(decls)
    }

    fn parse_ident_list(&mut self) -> CompileResult<Vec<Symbol>> {
        let mut names = vec![self.expect_ident()?];
        while self.at(TokenKind::Comma) {
            self.advance()?;
            names.push(self.expect_ident()?);
        }
        Ok(names)
    }

    fn parse_subprogram(&mut self) -> CompileResult<Subprogram> {
        let span = self.span();
        let kind = if self.at(TokenKind::Function) {
            self.advance()?;
            SubprogramKind::Function
        } else {
            self.advance()?;
            SubprogramKind::Procedure
        };
        let name = self.expect_ident()?;

        let mut params = Vec::new();
        if self.at(TokenKind::LParen) {
            self.advance()?;
            if !self.at(TokenKind::RParen) {
                params = self.parse_param_list()?;
            }
            self.expect(TokenKind::RParen)?;
        }

        let return_type = if kind == SubprogramKind::Function {
            self.expect(TokenKind::Colon)?;
            Some(self.parse_basic_type()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon)?;
        let block = self.parse_block()?;

        Ok(Subprogram {
            kind,
            name,
            params,
            return_type,
            block,
            span,
        })
    }

    /// `Param := [VAR] IDENT ':' BasicType`, one per `;`-separated slot —
    /// unlike `VarDecl`, a single `Param` never shares a type across a
    /// comma-separated name list.
    fn parse_param_list(&mut self) -> CompileResult<Vec<Param>> {
        let mut params = Vec::new();
        loop {
            let mode = if self.at(TokenKind::Var) {
                self.advance()?;
                ParamMode::ByReference
            } else {
                ParamMode::ByValue
            };
            let name = self.expect_ident()?;
            self.expect(TokenKind::Colon)?;
            let denoter = self.parse_basic_type()?;
            params.push(Param { name, mode, denoter });
            if self.at(TokenKind::Semicolon) {
                self.advance()?;
            } else {
                break;
            }
        }
        Ok(params)
    }

    /// `BasicType := INTEGER | CHAR` — the only types permitted for
    /// parameters and function return values.
    fn parse_basic_type(&mut self) -> CompileResult<TypeDenoter> {
        match self.current.kind {
            TokenKind::Integer => {
                self.advance()?;
                Ok(TypeDenoter::Integer)
            }
            TokenKind::CharKw => {
                self.advance()?;
                Ok(TypeDenoter::Char)
            }
            _ => Err(CompileError::new(
                self.span(),
                pslc_util::error::messages::INVALID_BASIC_TYPE,
            )),
        }
    }

    // ------------------------------------------------------------------
    // statements
    // ------------------------------------------------------------------

    fn parse_compound_statement(&mut self) -> CompileResult<Vec<Stmt>> {
        self.expect(TokenKind::Begin)?;
        let mut stmts = vec![self.parse_statement()?];
        while self.at(TokenKind::Semicolon) {
            self.advance()?;
            stmts.push(self.parse_statement()?);
        }
        self.expect(TokenKind::End)?;
        Ok(stmts)
    }

    /// FOLLOW(Statement) is `{ ";", "END" }`; a statement with neither an
    /// assignment, call, nor control-flow keyword ahead derives empty.
    fn parse_statement(&mut self) -> CompileResult<Stmt> {
        match self.current.kind {
            TokenKind::Ident => self.parse_assignment(),
            TokenKind::Call => self.parse_call_statement(),
            TokenKind::Begin => Ok(Stmt::Compound(self.parse_compound_statement()?)),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Semicolon | TokenKind::End => Ok(Stmt::Empty),
            _ => Err(CompileError::new(
                self.span(),
                pslc_util::error::messages::INVALID_STATEMENT,
            )),
        }
    }

    fn parse_assignment(&mut self) -> CompileResult<Stmt> {
        let span = self.span();
        let target = self.parse_lvalue()?;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expression()?;
        Ok(Stmt::Assign {
            target,
            value,
            span,
        })
    }

    fn parse_lvalue(&mut self) -> CompileResult<LValue> {
        let span = self.span();
        let name = self.expect_ident()?;
        let indices = self.parse_indexes()?;
        Ok(LValue { name, indices, span })
    }

    /// `Indexes := { '(.' Expression '.)' }` — zero or more subscript
    /// groups, each narrowing the element type by one array dimension.
    fn parse_indexes(&mut self) -> CompileResult<Vec<Expr>> {
        let mut indices = Vec::new();
        while self.at(TokenKind::LSel) {
            self.advance()?;
            indices.push(self.parse_expression()?);
            self.expect(TokenKind::RSel)?;
        }
        Ok(indices)
    }

    fn parse_call_statement(&mut self) -> CompileResult<Stmt> {
        let span = self.span();
        self.advance()?; // CALL
        let name = self.expect_ident()?;
        let args = self.parse_arguments()?;
        Ok(Stmt::Call { name, args, span })
    }

    /// `Arguments := [ '(' Expression {',' Expression} ')' ]`. The absence
    /// of a `(` is only legal when the current token is in `Arguments`'s
    /// FOLLOW set — anything else is a malformed call.
    fn parse_arguments(&mut self) -> CompileResult<Vec<Expr>> {
        if self.at(TokenKind::LParen) {
            self.advance()?;
            let args = self.parse_arg_list()?;
            self.expect(TokenKind::RParen)?;
            Ok(args)
        } else if self.at_arguments_follow() {
            Ok(Vec::new())
        } else {
            Err(CompileError::new(
                self.span(),
                pslc_util::error::messages::INVALID_ARGUMENTS,
            ))
        }
    }

    fn parse_arg_list(&mut self) -> CompileResult<Vec<Expr>> {
        let mut args = vec![self.parse_expression()?];
        loop {
            if self.at(TokenKind::Comma) {
                self.advance()?;
                args.push(self.parse_expression()?);
            } else if self.at(TokenKind::RParen) {
                break;
            } else {
                return Err(CompileError::new(
                    self.span(),
                    pslc_util::error::messages::INVALID_ARGUMENTS,
                ));
            }
        }
        Ok(args)
    }

    // ------------------------------------------------------------------
    // FOLLOW sets
    //
    // `Expression3`/`Term2` stop (without error) on any token that can
    // legally follow an expression; any other token is a malformed
    // expression/term. `Arguments`/`Arguments2` reuse the same idea one
    // level up, with the arithmetic operators added back in since those
    // *do* continue a bare expression, just not an empty argument list.
    // ------------------------------------------------------------------

    fn at_expression_follow(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::To
                | TokenKind::Do
                | TokenKind::RParen
                | TokenKind::Comma
                | TokenKind::Equal
                | TokenKind::NotEqual
                | TokenKind::LessEqual
                | TokenKind::Less
                | TokenKind::GreaterEqual
                | TokenKind::Greater
                | TokenKind::RSel
                | TokenKind::Semicolon
                | TokenKind::End
                | TokenKind::Else
                | TokenKind::Then
        )
    }

    fn at_term_follow(&self) -> bool {
        self.at_expression_follow() || matches!(self.current.kind, TokenKind::Plus | TokenKind::Minus)
    }

    fn at_arguments_follow(&self) -> bool {
        self.at_term_follow() || matches!(self.current.kind, TokenKind::Star | TokenKind::Slash)
    }

    fn parse_if_statement(&mut self) -> CompileResult<Stmt> {
        self.advance()?; // IF
        let cond = self.parse_condition()?;
        self.expect(TokenKind::Then)?;
        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.at(TokenKind::Else) {
            self.advance()?;
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Stmt::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    fn parse_while_statement(&mut self) -> CompileResult<Stmt> {
        self.advance()?; // WHILE
        let cond = self.parse_condition()?;
        self.expect(TokenKind::Do)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::While { cond, body })
    }

    fn parse_for_statement(&mut self) -> CompileResult<Stmt> {
        let span = self.span();
        self.advance()?; // FOR
        let var = self.expect_ident()?;
        self.expect(TokenKind::Assign)?;
        let from = self.parse_expression()?;
        self.expect(TokenKind::To)?;
        let to = self.parse_expression()?;
        self.expect(TokenKind::Do)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::For {
            var,
            from,
            to,
            body,
            span,
        })
    }

    fn parse_condition(&mut self) -> CompileResult<Condition> {
        let span = self.span();
        let left = self.parse_expression()?;
        let op = match self.current.kind {
            TokenKind::Equal => Comparator::Eq,
            TokenKind::NotEqual => Comparator::Ne,
            TokenKind::Less => Comparator::Lt,
            TokenKind::LessEqual => Comparator::Le,
            TokenKind::Greater => Comparator::Gt,
            TokenKind::GreaterEqual => Comparator::Ge,
            _ => {
                return Err(CompileError::new(
                    self.span(),
                    pslc_util::error::messages::INVALID_COMPARATOR,
                ))
            }
        };
        self.advance()?;
        let right = self.parse_expression()?;
        Ok(Condition { left, op, right, span })
    }

    // ------------------------------------------------------------------
    // expressions
    // ------------------------------------------------------------------

    /// `Expression := ['+' | '-'] Term {('+'|'-') Term}`. The leading sign,
    /// if any, is consumed once, here, before the first term — not inside
    /// `parse_factor`.
    fn parse_expression(&mut self) -> CompileResult<Expr> {
        let span = self.span();
        let neg = if self.at(TokenKind::Minus) {
            self.advance()?;
            true
        } else if self.at(TokenKind::Plus) {
            self.advance()?;
            false
        } else {
            false
        };
        let mut expr = Expr::Leaf {
            neg,
            term: self.parse_term()?,
            span,
        };
        loop {
            let op = match self.current.kind {
                TokenKind::Plus => AddOp::Add,
                TokenKind::Minus => AddOp::Sub,
                _ if self.at_expression_follow() => break,
                _ => {
                    return Err(CompileError::new(
                        self.span(),
                        pslc_util::error::messages::INVALID_EXPRESSION,
                    ))
                }
            };
            let span = self.span();
            self.advance()?;
            let right = self.parse_term()?;
            expr = Expr::BinOp {
                left: Box::new(expr),
                op,
                right,
                span,
            };
        }
        Ok(expr)
    }

    fn parse_term(&mut self) -> CompileResult<Term> {
        let mut term = Term::Factor(self.parse_factor()?);
        loop {
            let op = match self.current.kind {
                TokenKind::Star => MulOp::Mul,
                TokenKind::Slash => MulOp::Div,
                _ if self.at_term_follow() => break,
                _ => {
                    return Err(CompileError::new(
                        self.span(),
                        pslc_util::error::messages::INVALID_TERM,
                    ))
                }
            };
            let span = self.span();
            self.advance()?;
            let right = self.parse_factor()?;
            term = Term::BinOp {
                left: Box::new(term),
                op,
                right,
                span,
            };
        }
        Ok(term)
    }

    /// `Factor := NUMBER | CHAR | IDENT [Indexes | Arguments]`, plus a
    /// parenthesized-expression case carried over from the original parser
    /// (see `Factor::Paren`).
    fn parse_factor(&mut self) -> CompileResult<Factor> {
        match self.current.kind {
            TokenKind::Number => {
                let n = self.current.clone();
                self.advance()?;
                Ok(Factor::Number(n.numeric_value))
            }
            TokenKind::CharLiteral => {
                let c = self.current.clone();
                self.advance()?;
                Ok(Factor::CharLiteral(c.numeric_value as u8))
            }
            TokenKind::LParen => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(Factor::Paren(Box::new(expr)))
            }
            TokenKind::Ident => {
                let span = self.span();
                let name = self.expect_ident()?;
                if self.at(TokenKind::LSel) {
                    let indices = self.parse_indexes()?;
                    Ok(Factor::Variable(LValue { name, indices, span }))
                } else if self.at(TokenKind::LParen) {
                    let args = self.parse_arguments()?;
                    Ok(Factor::Call { name, args, span })
                } else {
                    Ok(Factor::Variable(LValue {
                        name,
                        indices: Vec::new(),
                        span,
                    }))
                }
            }
            _ => Err(CompileError::new(
                self.span(),
                pslc_util::error::messages::INVALID_FACTOR,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> CompileResult<Program> {
        let mut interner = Interner::new();
        Parser::new(src, &mut interner)?.parse_program()
    }

    #[test]
    fn minimal_program() {
        let program = parse("PROGRAM P; BEGIN END.").unwrap();
        assert!(program.block.body.len() == 1);
        assert!(matches!(program.block.body[0], Stmt::Empty));
    }

    #[test]
    fn const_and_var_sections() {
        let program = parse(
            "PROGRAM P; CONST N = 10; VAR X, Y: INTEGER; BEGIN X := Y + N END.",
        )
        .unwrap();
        assert_eq!(program.block.consts.len(), 1);
        assert_eq!(program.block.vars[0].names.len(), 2);
    }

    #[test]
    fn array_and_if_while_for() {
        let src = "PROGRAM P; \
            TYPE V = ARRAY (. 10 .) OF INTEGER; \
            VAR A: V; I: INTEGER; \
            BEGIN \
              FOR I := 0 TO 9 DO A(.I.) := I; \
              IF A(.0.) = 0 THEN I := 1 ELSE I := 2; \
              WHILE I < 10 DO I := I + 1 \
            END.";
        let program = parse(src).unwrap();
        assert_eq!(program.block.types.len(), 1);
        assert_eq!(program.block.body.len(), 3);
    }

    #[test]
    fn missing_end_reports_missing_token() {
        let err = parse("PROGRAM P; BEGIN").unwrap_err();
        assert!(err.message.starts_with("Missing"));
    }

    #[test]
    fn function_and_procedure_declarations() {
        let src = "PROGRAM P; \
            FUNCTION SQ(N: INTEGER): INTEGER; BEGIN SQ := N * N END; \
            PROCEDURE SHOW(N: INTEGER); BEGIN CALL WRITEI(N) END; \
            BEGIN CALL SHOW(SQ(3)) END.";
        let program = parse(src).unwrap();
        assert_eq!(program.block.subprograms.len(), 2);
    }

    #[test]
    fn by_reference_parameter_requires_var_keyword() {
        let program = parse(
            "PROGRAM P; PROCEDURE Q(VAR X: INTEGER; Y: CHAR); BEGIN END; BEGIN END.",
        )
        .unwrap();
        let params = &program.block.subprograms[0].params;
        assert_eq!(params[0].mode, ParamMode::ByReference);
        assert_eq!(params[1].mode, ParamMode::ByValue);
    }

    #[test]
    fn multi_dimensional_subscript_chains() {
        let program = parse(
            "PROGRAM P; VAR A: ARRAY (.3.) OF ARRAY (.4.) OF INTEGER; \
             BEGIN A(.0.)(.1.) := 5 END.",
        )
        .unwrap();
        let Stmt::Assign { target, .. } = &program.block.body[0] else {
            panic!("expected an assignment");
        };
        assert_eq!(target.indices.len(), 2);
    }

    #[test]
    fn leading_sign_on_expression() {
        let program = parse("PROGRAM P; VAR X: INTEGER; BEGIN X := -1 + 2 END.").unwrap();
        let Stmt::Assign { value, .. } = &program.block.body[0] else {
            panic!("expected an assignment");
        };
        // The outermost node is the `+`; its left operand carries the sign.
        let Expr::BinOp { left, .. } = value else {
            panic!("expected a binary expression");
        };
        assert!(matches!(**left, Expr::Leaf { neg: true, .. }));
    }

    #[test]
    fn signed_named_constant() {
        let program = parse("PROGRAM P; CONST N = 5; M = -N; BEGIN END.").unwrap();
        assert!(matches!(program.block.consts[1].value, ConstValue::NegNamed(_)));
    }

    #[test]
    fn garbage_after_expression_is_invalid_expression_not_missing_token() {
        let err = parse("PROGRAM P; VAR X: INTEGER; BEGIN X := 1 2 END.").unwrap_err();
        assert_eq!(err.message, pslc_util::error::messages::INVALID_EXPRESSION);
    }

    #[test]
    fn call_with_no_parens_and_no_args_is_accepted() {
        let program = parse(
            "PROGRAM P; PROCEDURE Q; BEGIN END; BEGIN CALL Q END.",
        )
        .unwrap();
        let Stmt::Call { args, .. } = &program.block.body[0] else {
            panic!("expected a call statement");
        };
        assert!(args.is_empty());
    }

    #[test]
    fn parenthesized_factor_groups_arithmetic() {
        let program = parse("PROGRAM P; VAR X: INTEGER; BEGIN X := (1 + 2) * 3 END.").unwrap();
        let Stmt::Assign { value, .. } = &program.block.body[0] else {
            panic!("expected an assignment");
        };
        let Expr::Leaf { term, .. } = value else {
            panic!("expected a single-term expression");
        };
        let Term::BinOp { left, .. } = term else {
            panic!("expected `* 3` at the top of the term");
        };
        assert!(matches!(
            **left,
            Term::Factor(Factor::Paren(_))
        ));
    }
}
