//! The `Lexer` struct and its main scan dispatch.
//!
//! `scan_one` recognizes one lexical unit, returning [`TokenKind::None_`] for
//! recognizers that consume input but yield nothing (comments).
//! [`Lexer::next_token`] loops past those until a real token, or EOF, comes
//! out — the same shape as the reference scanner's outer `getToken` loop
//! that keeps rescanning past comments.

use pslc_util::error::messages;
use pslc_util::{CompileError, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

pub struct Lexer<'a> {
    pub(super) cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    fn err(&self, line: u32, col: u32, message: impl Into<String>) -> CompileError {
        CompileError::new(Span::new(line, col), message)
    }

    /// Scans the next real token, silently passing over comments.
    pub fn next_token(&mut self) -> Result<Token, CompileError> {
        loop {
            let token = self.scan_one()?;
            if token.kind != TokenKind::None_ {
                return Ok(token);
            }
        }
    }

    fn scan_one(&mut self) -> Result<Token, CompileError> {
        self.skip_blanks();
        let line = self.cursor.line();
        let col = self.cursor.col();

        let Some(b) = self.cursor.current() else {
            return Ok(Token::new(TokenKind::Eof, line, col));
        };

        match b {
            b'A'..=b'Z' | b'a'..=b'z' => self.read_identifier_or_keyword(line, col),
            b'0'..=b'9' => self.read_number(line, col),
            b'\'' => self.read_char_literal(line, col),
            b'+' => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::Plus, line, col))
            }
            b'-' => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::Minus, line, col))
            }
            b'*' => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::Star, line, col))
            }
            b'/' => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::Slash, line, col))
            }
            b'=' => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::Equal, line, col))
            }
            b',' => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::Comma, line, col))
            }
            b';' => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::Semicolon, line, col))
            }
            b')' => {
                self.cursor.advance();
                Ok(Token::new(TokenKind::RParen, line, col))
            }
            b'<' => {
                self.cursor.advance();
                if self.cursor.current() == Some(b'=') {
                    self.cursor.advance();
                    Ok(Token::new(TokenKind::LessEqual, line, col))
                } else {
                    Ok(Token::new(TokenKind::Less, line, col))
                }
            }
            b'>' => {
                self.cursor.advance();
                if self.cursor.current() == Some(b'=') {
                    self.cursor.advance();
                    Ok(Token::new(TokenKind::GreaterEqual, line, col))
                } else {
                    Ok(Token::new(TokenKind::Greater, line, col))
                }
            }
            b'!' => {
                self.cursor.advance();
                if self.cursor.current() == Some(b'=') {
                    self.cursor.advance();
                    Ok(Token::new(TokenKind::NotEqual, line, col))
                } else {
                    Err(self.err(line, col, messages::INVALID_SYMBOL))
                }
            }
            b':' => {
                self.cursor.advance();
                if self.cursor.current() == Some(b'=') {
                    self.cursor.advance();
                    Ok(Token::new(TokenKind::Assign, line, col))
                } else {
                    Ok(Token::new(TokenKind::Colon, line, col))
                }
            }
            b'.' => {
                self.cursor.advance();
                if self.cursor.current() == Some(b')') {
                    self.cursor.advance();
                    Ok(Token::new(TokenKind::RSel, line, col))
                } else {
                    Ok(Token::new(TokenKind::Period, line, col))
                }
            }
            b'(' => {
                self.cursor.advance();
                match self.cursor.current() {
                    Some(b'.') => {
                        self.cursor.advance();
                        Ok(Token::new(TokenKind::LSel, line, col))
                    }
                    Some(b'*') => {
                        self.cursor.advance();
                        self.skip_block_comment(line, col)?;
                        Ok(Token::new(TokenKind::None_, line, col))
                    }
                    _ => Ok(Token::new(TokenKind::LParen, line, col)),
                }
            }
            b'"' => {
                self.skip_line_comment();
                Ok(Token::new(TokenKind::None_, line, col))
            }
            _ => {
                self.cursor.advance();
                Err(self.err(line, col, messages::INVALID_SYMBOL))
            }
        }
    }

    fn skip_blanks(&mut self) {
        while matches!(self.cursor.current(), Some(b) if b.is_ascii_whitespace()) {
            self.cursor.advance();
        }
    }

    /// Consumes up to and including the closing `*)`. `line`/`col` locate the
    /// opening `(*` for the "End of comment expected!" diagnostic.
    fn skip_block_comment(&mut self, line: u32, col: u32) -> Result<(), CompileError> {
        loop {
            match self.cursor.current() {
                None => return Err(self.err(line, col, messages::END_OF_COMMENT)),
                Some(b'*') => {
                    self.cursor.advance();
                    if self.cursor.current() == Some(b')') {
                        self.cursor.advance();
                        return Ok(());
                    }
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// A `"`-introduced comment runs to end of line; the newline itself is
    /// left for `skip_blanks` to consume.
    fn skip_line_comment(&mut self) {
        self.cursor.advance();
        loop {
            match self.cursor.current() {
                None | Some(b'\n') => return,
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().expect("no lex error");
            let done = tok.kind == TokenKind::Eof;
            out.push(tok.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn scans_assignment_and_punctuation() {
        assert_eq!(
            kinds("X := 1;"),
            vec![
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn two_char_comparators_are_greedy() {
        assert_eq!(
            kinds("<= >= !="),
            vec![
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::NotEqual,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn array_selector_brackets() {
        assert_eq!(
            kinds("(. 1 .)"),
            vec![
                TokenKind::LSel,
                TokenKind::Number,
                TokenKind::RSel,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn block_comment_is_skipped() {
        assert_eq!(
            kinds("A (* skip me *) B"),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        let mut lexer = Lexer::new("A (* never closes");
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.message, messages::END_OF_COMMENT);
    }

    #[test]
    fn line_comment_runs_to_newline() {
        assert_eq!(
            kinds("A \" trailing remark\nB"),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn bang_without_equals_is_invalid() {
        let mut lexer = Lexer::new("!");
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.message, messages::INVALID_SYMBOL);
    }
}
