//! Identifier/keyword, number, and char-literal recognizers.

use pslc_util::error::messages;
use pslc_util::{CompileError, Span};

use super::core::Lexer;
use crate::token::{Token, TokenKind, MAX_IDENT_LEN, MAX_NUM_LEN};

impl<'a> Lexer<'a> {
    /// Accumulates letters/digits, upper-casing as it goes (identifiers are
    /// case-insensitive), then checks the keyword table before falling back
    /// to a plain `Ident` token.
    pub(super) fn read_identifier_or_keyword(
        &mut self,
        line: u32,
        col: u32,
    ) -> Result<Token, CompileError> {
        let mut text = String::new();
        while let Some(b) = self.cursor.current() {
            if b.is_ascii_alphanumeric() {
                text.push((b as char).to_ascii_uppercase());
                self.cursor.advance();
            } else {
                break;
            }
        }

        if text.len() > MAX_IDENT_LEN {
            return Err(CompileError::new(Span::new(line, col), messages::IDENT_TOO_LONG));
        }

        if let Some(kind) = TokenKind::keyword_from_str(&text) {
            return Ok(Token::new(kind, line, col));
        }

        let mut token = Token::new(TokenKind::Ident, line, col);
        token.lexeme = text;
        Ok(token)
    }

    /// Accumulates a run of digits into a decimal value.
    pub(super) fn read_number(&mut self, line: u32, col: u32) -> Result<Token, CompileError> {
        let mut text = String::new();
        while let Some(b) = self.cursor.current() {
            if b.is_ascii_digit() {
                text.push(b as char);
                self.cursor.advance();
            } else {
                break;
            }
        }

        if text.len() > MAX_NUM_LEN {
            return Err(CompileError::new(
                Span::new(line, col),
                messages::NUM_LITERAL_TOO_LONG,
            ));
        }

        let value: i64 = text.parse().expect("only ascii digits were accumulated");
        let mut token = Token::new(TokenKind::Number, line, col);
        token.lexeme = text;
        token.numeric_value = value;
        Ok(token)
    }

    /// `'c'` where `c` is any printable ASCII byte (0x20-0x7E).
    pub(super) fn read_char_literal(
        &mut self,
        line: u32,
        col: u32,
    ) -> Result<Token, CompileError> {
        self.cursor.advance(); // opening quote
        let invalid = || CompileError::new(Span::new(line, col), messages::INVALID_CHAR_CONSTANT);

        let byte = match self.cursor.current() {
            Some(b) if (0x20..=0x7e).contains(&b) => b,
            _ => return Err(invalid()),
        };
        self.cursor.advance();

        if self.cursor.current() != Some(b'\'') {
            return Err(invalid());
        }
        self.cursor.advance();

        let mut token = Token::new(TokenKind::CharLiteral, line, col);
        token.lexeme = (byte as char).to_string();
        token.numeric_value = byte as i64;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::Lexer;
    use crate::token::TokenKind;

    #[test]
    fn keywords_are_recognized_case_insensitively() {
        let mut lexer = Lexer::new("begin BEGIN BeGiN");
        for _ in 0..3 {
            assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Begin);
        }
    }

    #[test]
    fn identifiers_are_upper_cased() {
        let tok = Lexer::new("fooBar").next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Ident);
        assert_eq!(tok.lexeme, "FOOBAR");
    }

    #[test]
    fn identifier_over_the_limit_is_an_error() {
        let long = "A".repeat(16);
        let err = Lexer::new(&long).next_token().unwrap_err();
        assert_eq!(err.message, "Identification too long!");
    }

    #[test]
    fn number_literal_is_parsed() {
        let tok = Lexer::new("12345").next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Number);
        assert_eq!(tok.numeric_value, 12345);
    }

    #[test]
    fn number_literal_over_the_limit_is_an_error() {
        let long = "1".repeat(13);
        let err = Lexer::new(&long).next_token().unwrap_err();
        assert_eq!(err.message, "Numeric literal too long!");
    }

    #[test]
    fn char_literal_holds_its_byte_value() {
        let tok = Lexer::new("'x'").next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::CharLiteral);
        assert_eq!(tok.numeric_value, b'x' as i64);
    }

    #[test]
    fn unterminated_char_literal_is_an_error() {
        let err = Lexer::new("'xy").next_token().unwrap_err();
        assert_eq!(err.message, "Invalid const char!");
    }
}
