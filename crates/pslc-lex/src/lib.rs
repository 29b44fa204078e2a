//! Lexical analysis: turns source text into a stream of [`Token`]s.
//!
//! Identifiers are case-folded to upper case as they are scanned, numeric
//! and identifier lexemes are bounded ([`MAX_IDENT_LEN`], [`MAX_NUM_LEN`]),
//! and block/line comments are consumed transparently by [`Lexer::next_token`].

pub mod cursor;
pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind, MAX_IDENT_LEN, MAX_NUM_LEN};
