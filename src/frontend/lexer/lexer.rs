use crate::common::error::ParseError;
use crate::common::source::Span;
use super::token::{Token, TokenKind};

/// C lexer that tokenizes source input with source locations.
pub struct Lexer {
    input: Vec<u8>,
    pos: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.bytes().collect(),
            pos: 0,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let is_eof = tok.is_eof();
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace_and_comments();

        if self.pos >= self.input.len() {
            return Ok(Token::new(TokenKind::Eof, self.span_from(self.pos)));
        }

        let start = self.pos;
        let ch = self.input[self.pos];

        // Number literals (including `.5` style floats)
        if ch.is_ascii_digit() || (ch == b'.' && self.peek_next().is_some_and(|c| c.is_ascii_digit())) {
            return Ok(self.lex_number(start));
        }

        if ch == b'"' {
            return self.lex_string(start);
        }

        if ch == b'\'' {
            return self.lex_char(start);
        }

        if ch == b'_' || ch.is_ascii_alphabetic() {
            return Ok(self.lex_identifier(start));
        }

        self.lex_punctuation(start)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.pos < self.input.len() && self.input[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }

            if self.pos >= self.input.len() {
                return;
            }

            // Line comments
            if self.pos + 1 < self.input.len() && self.input[self.pos] == b'/' && self.input[self.pos + 1] == b'/' {
                while self.pos < self.input.len() && self.input[self.pos] != b'\n' {
                    self.pos += 1;
                }
                continue;
            }

            // Block comments
            if self.pos + 1 < self.input.len() && self.input[self.pos] == b'/' && self.input[self.pos + 1] == b'*' {
                self.pos += 2;
                while self.pos + 1 < self.input.len() {
                    if self.input[self.pos] == b'*' && self.input[self.pos + 1] == b'/' {
                        self.pos += 2;
                        break;
                    }
                    self.pos += 1;
                }
                continue;
            }

            break;
        }
    }

    fn peek_next(&self) -> Option<u8> {
        if self.pos + 1 < self.input.len() {
            Some(self.input[self.pos + 1])
        } else {
            None
        }
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start as u32, self.pos as u32)
    }

    fn lex_number(&mut self, start: usize) -> Token {
        // Hex integers
        if self.pos + 1 < self.input.len()
            && self.input[self.pos] == b'0'
            && (self.input[self.pos + 1] == b'x' || self.input[self.pos + 1] == b'X')
        {
            self.pos += 2;
            let hex_start = self.pos;
            while self.pos < self.input.len() && self.input[self.pos].is_ascii_hexdigit() {
                self.pos += 1;
            }
            let text = std::str::from_utf8(&self.input[hex_start..self.pos]).unwrap_or("");
            // Out-of-range literals wrap; suffixes are consumed and ignored
            let value = u64::from_str_radix(text, 16).unwrap_or(0) as i64;
            self.skip_int_suffix();
            return Token::new(TokenKind::IntLiteral(value), self.span_from(start));
        }

        // Scan the integer part, then decide int vs float
        while self.pos < self.input.len() && self.input[self.pos].is_ascii_digit() {
            self.pos += 1;
        }

        let is_float = self.pos < self.input.len()
            && (self.input[self.pos] == b'.'
                || self.input[self.pos] == b'e'
                || self.input[self.pos] == b'E');

        if is_float {
            if self.input[self.pos] == b'.' {
                self.pos += 1;
                while self.pos < self.input.len() && self.input[self.pos].is_ascii_digit() {
                    self.pos += 1;
                }
            }
            if self.pos < self.input.len() && (self.input[self.pos] == b'e' || self.input[self.pos] == b'E') {
                self.pos += 1;
                if self.pos < self.input.len() && (self.input[self.pos] == b'+' || self.input[self.pos] == b'-') {
                    self.pos += 1;
                }
                while self.pos < self.input.len() && self.input[self.pos].is_ascii_digit() {
                    self.pos += 1;
                }
            }
            // Keep any suffix letters in the lexeme; the translator decides
            // which suffixes mean anything.
            while self.pos < self.input.len() && self.input[self.pos].is_ascii_alphabetic() {
                self.pos += 1;
            }
            let lexeme = String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();
            return Token::new(TokenKind::FloatLiteral(lexeme), self.span_from(start));
        }

        let text = std::str::from_utf8(&self.input[start..self.pos]).unwrap_or("0");
        let value = if text.len() > 1 && text.starts_with('0') {
            // Octal
            u64::from_str_radix(&text[1..], 8).unwrap_or(0) as i64
        } else {
            text.parse::<u64>().unwrap_or(0) as i64
        };
        self.skip_int_suffix();
        Token::new(TokenKind::IntLiteral(value), self.span_from(start))
    }

    /// Consume integer suffix letters (u/U/l/L in any combination). All
    /// integer literals translate as `int` regardless of suffix.
    fn skip_int_suffix(&mut self) {
        while self.pos < self.input.len() && matches!(self.input[self.pos], b'u' | b'U' | b'l' | b'L') {
            self.pos += 1;
        }
    }

    fn lex_string(&mut self, start: usize) -> Result<Token, ParseError> {
        self.pos += 1; // opening quote
        let mut content = String::new();
        while self.pos < self.input.len() && self.input[self.pos] != b'"' {
            let c = self.lex_escaped_char()?;
            content.push(c);
        }
        if self.pos >= self.input.len() {
            return Err(ParseError::new("unterminated string literal", self.span_from(start)));
        }
        self.pos += 1; // closing quote
        Ok(Token::new(TokenKind::StringLiteral(content), self.span_from(start)))
    }

    fn lex_char(&mut self, start: usize) -> Result<Token, ParseError> {
        self.pos += 1; // opening quote
        if self.pos >= self.input.len() || self.input[self.pos] == b'\'' {
            return Err(ParseError::new("empty character literal", self.span_from(start)));
        }
        let c = self.lex_escaped_char()?;
        if self.pos >= self.input.len() || self.input[self.pos] != b'\'' {
            return Err(ParseError::new("unterminated character literal", self.span_from(start)));
        }
        self.pos += 1; // closing quote
        Ok(Token::new(TokenKind::CharLiteral(c), self.span_from(start)))
    }

    fn lex_escaped_char(&mut self) -> Result<char, ParseError> {
        let c = self.input[self.pos];
        if c != b'\\' {
            self.pos += 1;
            return Ok(c as char);
        }
        self.pos += 1;
        if self.pos >= self.input.len() {
            return Err(ParseError::new("unterminated escape sequence", self.span_from(self.pos)));
        }
        let e = self.input[self.pos];
        self.pos += 1;
        let decoded = match e {
            b'n' => '\n',
            b't' => '\t',
            b'r' => '\r',
            b'0' => '\0',
            b'\\' => '\\',
            b'\'' => '\'',
            b'"' => '"',
            other => {
                return Err(ParseError::new(
                    format!("unknown escape sequence '\\{}'", other as char),
                    self.span_from(self.pos - 1),
                ));
            }
        };
        Ok(decoded)
    }

    fn lex_identifier(&mut self, start: usize) -> Token {
        while self.pos < self.input.len()
            && (self.input[self.pos] == b'_' || self.input[self.pos].is_ascii_alphanumeric())
        {
            self.pos += 1;
        }
        let text = String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();
        let kind = TokenKind::from_keyword(&text).unwrap_or(TokenKind::Identifier(text));
        Token::new(kind, self.span_from(start))
    }

    fn lex_punctuation(&mut self, start: usize) -> Result<Token, ParseError> {
        let ch = self.input[self.pos];
        let next = self.peek_next();
        let next2 = if self.pos + 2 < self.input.len() { Some(self.input[self.pos + 2]) } else { None };

        // Three-character operators first
        let three = match (ch, next, next2) {
            (b'<', Some(b'<'), Some(b'=')) => Some(TokenKind::LessLessAssign),
            (b'>', Some(b'>'), Some(b'=')) => Some(TokenKind::GreaterGreaterAssign),
            (b'.', Some(b'.'), Some(b'.')) => Some(TokenKind::Ellipsis),
            _ => None,
        };
        if let Some(kind) = three {
            self.pos += 3;
            return Ok(Token::new(kind, self.span_from(start)));
        }

        let two = match (ch, next) {
            (b'+', Some(b'+')) => Some(TokenKind::PlusPlus),
            (b'-', Some(b'-')) => Some(TokenKind::MinusMinus),
            (b'+', Some(b'=')) => Some(TokenKind::PlusAssign),
            (b'-', Some(b'=')) => Some(TokenKind::MinusAssign),
            (b'*', Some(b'=')) => Some(TokenKind::StarAssign),
            (b'/', Some(b'=')) => Some(TokenKind::SlashAssign),
            (b'%', Some(b'=')) => Some(TokenKind::PercentAssign),
            (b'&', Some(b'=')) => Some(TokenKind::AmpAssign),
            (b'|', Some(b'=')) => Some(TokenKind::PipeAssign),
            (b'^', Some(b'=')) => Some(TokenKind::CaretAssign),
            (b'<', Some(b'<')) => Some(TokenKind::LessLess),
            (b'>', Some(b'>')) => Some(TokenKind::GreaterGreater),
            (b'=', Some(b'=')) => Some(TokenKind::EqualEqual),
            (b'!', Some(b'=')) => Some(TokenKind::BangEqual),
            (b'<', Some(b'=')) => Some(TokenKind::LessEqual),
            (b'>', Some(b'=')) => Some(TokenKind::GreaterEqual),
            (b'&', Some(b'&')) => Some(TokenKind::AmpAmp),
            (b'|', Some(b'|')) => Some(TokenKind::PipePipe),
            _ => None,
        };
        if let Some(kind) = two {
            self.pos += 2;
            return Ok(Token::new(kind, self.span_from(start)));
        }

        let one = match ch {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b';' => TokenKind::Semicolon,
            b',' => TokenKind::Comma,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'&' => TokenKind::Amp,
            b'|' => TokenKind::Pipe,
            b'^' => TokenKind::Caret,
            b'~' => TokenKind::Tilde,
            b'!' => TokenKind::Bang,
            b'=' => TokenKind::Assign,
            b'<' => TokenKind::Less,
            b'>' => TokenKind::Greater,
            b'?' => TokenKind::Question,
            b':' => TokenKind::Colon,
            other => {
                return Err(ParseError::new(
                    format!("unexpected character '{}'", other as char),
                    self.span_from(start),
                ));
            }
        };
        self.pos += 1;
        Ok(Token::new(one, self.span_from(start)))
    }
}
