//! Stateful scanner over a single source buffer. `next_token` skips
//! whitespace and `#...` line comments, then emits exactly one token.

pub mod token;
pub mod token_kind;

pub use token::Token;
pub use token_kind::TokenKind;

pub struct Lexer<'src> {
    source: &'src str,
    bytes: &'src [u8],
    start: usize,
    current: usize,
    line: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            bytes: source.as_bytes(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.bytes.len()
    }

    fn peek(&self) -> u8 {
        self.bytes.get(self.current).copied().unwrap_or(0)
    }

    fn peek_next(&self) -> u8 {
        self.bytes.get(self.current + 1).copied().unwrap_or(0)
    }

    fn advance(&mut self) -> u8 {
        let byte = self.bytes[self.current];
        self.current += 1;
        byte
    }

    fn matches(&mut self, expected: u8) -> bool {
        if self.is_at_end() || self.peek() != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn lexeme(&self) -> &'src str {
        &self.source[self.start..self.current]
    }

    fn make_token(&self, kind: TokenKind) -> Token<'src> {
        Token::new(kind, self.lexeme(), self.line)
    }

    fn error_token(&self, message: &'static str) -> Token<'src> {
        Token::new(TokenKind::Error, message, self.line)
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                b' ' | b'\r' | b'\t' => {
                    self.advance();
                }
                b'\n' => {
                    self.line += 1;
                    self.advance();
                }
                b'#' => {
                    while self.peek() != b'\n' && !self.is_at_end() {
                        self.advance();
                    }
                }
                _ => return,
            }
        }
    }

    fn string(&mut self) -> Token<'src> {
        while self.peek() != b'"' {
            if self.peek() == b'\n' || self.is_at_end() {
                return self.error_token("Unterminated String");
            }
            self.advance();
        }
        self.advance();
        self.make_token(TokenKind::String)
    }

    fn number(&mut self) -> Token<'src> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        // The dot is consumed unconditionally once any digit has been seen,
        // with no lookahead for a digit after it - `1.` lexes as `1.0`,
        // matching the original scanner's `strtod`-backed behavior.
        if self.peek() == b'.' {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }
        self.make_token(TokenKind::Number)
    }

    fn identifier_or_keyword(&mut self) -> Token<'src> {
        while self.peek().is_ascii_alphanumeric() || self.peek() == b'_' {
            self.advance();
        }
        self.make_token(keyword_kind(self.lexeme()))
    }

    pub fn next_token(&mut self) -> Token<'src> {
        self.skip_whitespace();
        self.start = self.current;

        if self.is_at_end() {
            return self.make_token(TokenKind::Eof);
        }

        let c = self.advance();

        if c == b'"' {
            return self.string();
        }
        if c.is_ascii_alphabetic() || c == b'_' {
            return self.identifier_or_keyword();
        }
        if c.is_ascii_digit() {
            return self.number();
        }

        match c {
            b'+' => self.make_token(if self.matches(b'=') {
                TokenKind::PlusEqual
            } else {
                TokenKind::Plus
            }),
            b'-' => self.make_token(if self.matches(b'=') {
                TokenKind::MinusEqual
            } else {
                TokenKind::Minus
            }),
            b'*' => self.make_token(if self.matches(b'=') {
                TokenKind::StarEqual
            } else {
                TokenKind::Star
            }),
            b'/' => self.make_token(if self.matches(b'=') {
                TokenKind::SlashEqual
            } else {
                TokenKind::Slash
            }),
            b'=' => self.make_token(if self.matches(b'=') {
                TokenKind::EqualEqual
            } else {
                TokenKind::Equal
            }),
            b'<' => self.make_token(if self.matches(b'=') {
                TokenKind::LessEqual
            } else {
                TokenKind::Less
            }),
            b'>' => self.make_token(if self.matches(b'=') {
                TokenKind::GreaterEqual
            } else {
                TokenKind::Greater
            }),
            b'!' => self.make_token(if self.matches(b'=') {
                TokenKind::BangEqual
            } else {
                TokenKind::Bang
            }),
            b'[' => self.make_token(TokenKind::LeftSqrParen),
            b']' => self.make_token(TokenKind::RightSqrParen),
            b'(' => self.make_token(TokenKind::LeftParen),
            b')' => self.make_token(TokenKind::RightParen),
            b'{' => self.make_token(TokenKind::LeftBrace),
            b'}' => self.make_token(TokenKind::RightBrace),
            b',' => self.make_token(TokenKind::Comma),
            b';' => self.make_token(TokenKind::Semicolon),
            _ => self.error_token("Unexpected Character"),
        }
    }
}

fn keyword_kind(lexeme: &str) -> TokenKind {
    match lexeme {
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "true" => TokenKind::True,
        "null" => TokenKind::Null,
        "return" => TokenKind::Return,
        "let" => TokenKind::Let,
        "false" => TokenKind::False,
        "for" => TokenKind::For,
        "print" => TokenKind::Print,
        "proc" => TokenKind::Proc,
        _ => TokenKind::Identifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenKind::Eof;
            out.push(token.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn recognizes_keywords_and_identifiers() {
        assert_eq!(
            kinds("let forward = 1;"),
            vec![
                TokenKind::Let,
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn distinguishes_prefix_keywords_from_longer_identifiers() {
        assert_eq!(kinds("for").first(), Some(&TokenKind::For));
        assert_eq!(kinds("forward").first(), Some(&TokenKind::Identifier));
        assert_eq!(kinds("false").first(), Some(&TokenKind::False));
        assert_eq!(kinds("falsetto").first(), Some(&TokenKind::Identifier));
        assert_eq!(kinds("print").first(), Some(&TokenKind::Print));
        assert_eq!(kinds("proc").first(), Some(&TokenKind::Proc));
    }

    #[test]
    fn compound_operator_lookahead() {
        assert_eq!(
            kinds("+ += - -= * *= / /= = == < <= > >= ! !="),
            vec![
                TokenKind::Plus,
                TokenKind::PlusEqual,
                TokenKind::Minus,
                TokenKind::MinusEqual,
                TokenKind::Star,
                TokenKind::StarEqual,
                TokenKind::Slash,
                TokenKind::SlashEqual,
                TokenKind::Equal,
                TokenKind::EqualEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Bang,
                TokenKind::BangEqual,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn skips_line_comments() {
        assert_eq!(kinds("# a comment\n1"), vec![TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn unterminated_string_is_an_error_token() {
        let mut lexer = Lexer::new("\"abc");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Error);
        assert_eq!(token.lexeme, "Unterminated String");
    }

    #[test]
    fn newline_inside_string_is_an_error_token() {
        let mut lexer = Lexer::new("\"abc\ndef\"");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Error);
        assert_eq!(token.lexeme, "Unterminated String");
    }

    #[test]
    fn unexpected_character_is_an_error_token() {
        let mut lexer = Lexer::new("@");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Error);
        assert_eq!(token.lexeme, "Unexpected Character");
    }

    #[test]
    fn number_accepts_optional_fraction() {
        assert_eq!(kinds("12.5"), vec![TokenKind::Number, TokenKind::Eof]);
        assert_eq!(kinds("12"), vec![TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn trailing_dot_with_no_digits_after_is_still_consumed() {
        let mut lexer = Lexer::new("1.;");
        let number = lexer.next_token();
        assert_eq!(number.kind, TokenKind::Number);
        assert_eq!(number.lexeme, "1.");
        assert_eq!(lexer.next_token().kind, TokenKind::Semicolon);
    }
}
