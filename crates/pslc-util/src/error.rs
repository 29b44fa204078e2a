//! The single fault type propagated by every layer of the front end.
//!
//! Every detection site — reader, scanner, parser, semantic checker —
//! raises exactly one `CompileError` and returns it up the call stack with
//! `?`; there is no recovery and no second diagnostic. The top-level
//! boundary in `pslc-drv` is the only place that prints and exits (see
//! the "Exit-on-error control flow" design note this crate follows).

use crate::span::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}-{}:{}", span.line, span.col, message)]
pub struct CompileError {
    pub span: Span,
    pub message: String,
}

impl CompileError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    /// A missing expected token: `L-C:Missing <token-name>`.
    pub fn missing(span: Span, token_name: impl std::fmt::Display) -> Self {
        Self::new(span, format!("Missing {token_name}"))
    }
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;

/// The fixed English messages enumerated by the error-handling design.
///
/// Wording follows the original teaching-compiler source verbatim where the
/// two diverge (e.g. `IDENT_TOO_LONG` reads "Identification too long!", not
/// the looser "Identifier too long" prose) — see `DESIGN.md`.
pub mod messages {
    pub const END_OF_COMMENT: &str = "End of comment expected!";
    pub const IDENT_TOO_LONG: &str = "Identification too long!";
    pub const NUM_LITERAL_TOO_LONG: &str = "Numeric literal too long!";
    pub const INVALID_CHAR_CONSTANT: &str = "Invalid const char!";
    pub const INVALID_SYMBOL: &str = "Invalid symbol!";
    pub const INTERNAL_ERROR: &str = "Internal error!";

    pub const INVALID_CONSTANT: &str = "Invalid constant!";
    pub const INVALID_TYPE: &str = "Invalid type!";
    pub const INVALID_BASIC_TYPE: &str = "Invalid basic type!";
    pub const INVALID_PARAMETER: &str = "Invalid parameter!";
    pub const INVALID_STATEMENT: &str = "Invalid statement!";
    pub const INVALID_ARGUMENTS: &str = "Invalid arguments!";
    pub const INVALID_COMPARATOR: &str = "Invalid comparator!";
    pub const INVALID_EXPRESSION: &str = "Invalid expression!";
    pub const INVALID_TERM: &str = "Invalid term!";
    pub const INVALID_FACTOR: &str = "Invalid factor!";

    pub const INVALID_VARIABLE: &str = "A variable expected.";
    pub const INVALID_FUNCTION: &str = "A function identifier expected.";
    pub const INVALID_PROCEDURE: &str = "A procedure identifier expected.";
    pub const INVALID_LVALUE: &str = "Invalid lvalue in assignment.";

    pub const UNDECLARED_IDENT: &str = "Undeclared identifier.";
    pub const UNDECLARED_CONSTANT: &str = "Undeclared constant.";
    pub const UNDECLARED_INT_CONSTANT: &str = "Undeclared integer constant.";
    pub const UNDECLARED_TYPE: &str = "Undeclared type.";
    pub const UNDECLARED_VARIABLE: &str = "Undeclared variable.";
    pub const UNDECLARED_FUNCTION: &str = "Undeclared function.";
    pub const UNDECLARED_PROCEDURE: &str = "Undeclared procedure.";

    pub const DUPLICATE_IDENT: &str = "Duplicate identifier.";
    pub const TYPE_INCONSISTENCY: &str = "Type inconsistency";
    pub const PARAMS_ARGS_INCONSISTENCY: &str =
        "The number of arguments and the number of parameters are inconsistent.";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_line_col_message() {
        let err = CompileError::new(Span::new(3, 7), messages::INVALID_SYMBOL);
        assert_eq!(err.to_string(), "3-7:Invalid symbol!");
    }

    #[test]
    fn missing_formats_token_name() {
        let err = CompileError::missing(Span::new(1, 0), "END");
        assert_eq!(err.to_string(), "1-0:Missing END");
    }
}
