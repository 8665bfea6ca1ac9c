//! HPL/SQL tokenizer.

use super::{Keyword, Position, Span, Token, TokenKind};

/// A lexer that tokenizes HPL/SQL input.
///
/// Whitespace and comments are dropped. Every other character ends up in
/// exactly one token, and malformed input becomes a [`TokenKind::Error`]
/// token rather than aborting the scan.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Line/column of the current byte position.
    cursor: Position,
    /// Line/column of the start of the current token.
    start_position: Position,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            cursor: Position::new(1, 1),
            start_position: Position::new(1, 1),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.cursor.line += 1;
            self.cursor.column = 1;
        } else {
            self.cursor.column += 1;
        }
        Some(c)
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    /// Skips whitespace and `--`, `//` and `/* */` comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.advance_while(char::is_whitespace);

            let line_comment = matches!(
                (self.peek(), self.peek_nth(1)),
                (Some('-'), Some('-')) | (Some('/'), Some('/'))
            );
            if line_comment {
                self.advance_while(|c| c != '\n');
                continue;
            }

            if self.peek() == Some('/') && self.peek_nth(1) == Some('*') {
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    fn text(&self) -> &'a str {
        &self.input[self.start..self.pos]
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            self.text(),
            Span::new(self.start, self.pos),
            self.start_position,
        )
    }

    fn error(&self, message: impl Into<String>) -> Token {
        self.make_token(TokenKind::Error(message.into()))
    }

    const fn is_identifier_start(c: char) -> bool {
        c.is_ascii_alphabetic() || matches!(c, '_' | '@' | '#' | '$')
    }

    fn is_identifier_char(c: char) -> bool {
        c.is_alphanumeric() || matches!(c, '_' | '@' | '#' | '$')
    }

    /// Scans an identifier, keyword, label or file path.
    fn scan_word(&mut self) -> Token {
        self.advance_while(Self::is_identifier_char);

        // `c:\dir\file` or `dir\file`
        let drive_letter = self.pos - self.start == 1
            && self.peek() == Some(':')
            && self.peek_nth(1) == Some('\\');
        if drive_letter || self.peek() == Some('\\') {
            self.advance_while(|c| !c.is_whitespace() && c != ';');
            return self.make_token(TokenKind::FilePath(self.text().to_string()));
        }

        let word = self.text();

        if self.peek() == Some(':') && !matches!(self.peek_nth(1), Some('=' | ':')) {
            self.advance();
            return self.make_token(TokenKind::Label(word.to_string()));
        }

        match Keyword::from_str(word) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier(word.to_string())),
        }
    }

    /// Scans `:name` host variables.
    fn scan_host_variable(&mut self) -> Token {
        self.advance(); // :
        self.advance_while(Self::is_identifier_char);
        self.make_token(TokenKind::Identifier(self.text().to_string()))
    }

    /// Scans a `[name]` or `` `name` `` quoted identifier.
    fn scan_quoted_identifier(&mut self, close: char) -> Token {
        self.advance(); // opening quote
        let content_start = self.pos;
        loop {
            match self.peek() {
                Some(c) if c == close => break,
                Some('\n') | None => return self.error("Unterminated quoted identifier"),
                Some(_) => {
                    self.advance();
                }
            }
        }
        let content = self.input[content_start..self.pos].to_string();
        self.advance(); // closing quote
        self.make_token(TokenKind::Identifier(content))
    }

    /// Scans a number: integers become `Integer`, everything else keeps its text.
    fn scan_number(&mut self) -> Token {
        let mut is_decimal = false;

        self.advance_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            is_decimal = true;
            self.advance();
            self.advance_while(|c| c.is_ascii_digit());
        }

        let exponent = match (self.peek(), self.peek_nth(1), self.peek_nth(2)) {
            (Some('e' | 'E'), Some(d), _) if d.is_ascii_digit() => true,
            (Some('e' | 'E'), Some('+' | '-'), Some(d)) => d.is_ascii_digit(),
            _ => false,
        };
        if exponent {
            is_decimal = true;
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            self.advance_while(|c| c.is_ascii_digit());
        }

        let text = self.text();
        if is_decimal {
            return self.make_token(TokenKind::Decimal(text.to_string()));
        }
        match text.parse::<i64>() {
            Ok(i) => self.make_token(TokenKind::Integer(i)),
            // Too large for i64; keep the digits.
            Err(_) => self.make_token(TokenKind::Decimal(text.to_string())),
        }
    }

    /// Scans a quoted string. A doubled quote or a backslash escapes the next character.
    fn scan_string(&mut self, quote: char) -> Token {
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        value.push(quote);
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some('\\') => match self.advance() {
                    Some(escaped) => value.push(escaped),
                    None => return self.error("Unterminated string literal"),
                },
                Some(c) => value.push(c),
                None => return self.error("Unterminated string literal"),
            }
        }

        if quote == '"' {
            self.make_token(TokenKind::DoubleQuotedString(value))
        } else {
            self.make_token(TokenKind::String(value))
        }
    }

    /// Returns `kind` after consuming the next character, if it equals `next`.
    fn either(&mut self, next: char, kind: TokenKind, otherwise: TokenKind) -> Token {
        if self.peek() == Some(next) {
            self.advance();
            self.make_token(kind)
        } else {
            self.make_token(otherwise)
        }
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.start = self.pos;
        self.start_position = self.cursor;

        let Some(c) = self.peek() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            '\'' | '"' => return self.scan_string(c),
            '`' => return self.scan_quoted_identifier('`'),
            '[' if self.bracket_closes_on_line() => return self.scan_quoted_identifier(']'),
            ':' if self.peek_nth(1).is_some_and(|n| n.is_ascii_alphabetic()) => {
                return self.scan_host_variable();
            }
            c if c.is_ascii_digit() => return self.scan_number(),
            c if Self::is_identifier_start(c) || c.is_alphabetic() => return self.scan_word(),
            _ => {}
        }

        self.advance();
        match c {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '[' => self.make_token(TokenKind::LeftBracket),
            ']' => self.make_token(TokenKind::RightBracket),
            '{' => self.make_token(TokenKind::LeftBrace),
            '}' => self.make_token(TokenKind::RightBrace),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            ':' => self.make_token(TokenKind::Colon),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '+' => self.make_token(TokenKind::Plus),
            '-' => self.make_token(TokenKind::Minus),
            '%' => self.make_token(TokenKind::Percent),
            '.' => self.either('.', TokenKind::DotDot, TokenKind::Dot),
            '|' => self.either('|', TokenKind::Concat, TokenKind::Pipe),
            '!' => self.either('=', TokenKind::BangEq, TokenKind::Bang),
            '>' => self.either('=', TokenKind::GtEq, TokenKind::Gt),
            '=' => match self.peek() {
                Some('=') => self.either('=', TokenKind::EqEq, TokenKind::Eq),
                Some('>') => self.either('>', TokenKind::Arrow, TokenKind::Eq),
                _ => self.make_token(TokenKind::Eq),
            },
            '<' => match self.peek() {
                Some('=') => self.either('=', TokenKind::LtEq, TokenKind::Lt),
                Some('>') => self.either('>', TokenKind::NotEq, TokenKind::Lt),
                _ => self.make_token(TokenKind::Lt),
            },
            _ => self.error(format!("Unexpected character: {c}")),
        }
    }

    /// Returns true if a `]` closes the `[` at the cursor before the end of the line.
    fn bracket_closes_on_line(&self) -> bool {
        let rest = &self.input[self.pos + 1..];
        let line = rest.split('\n').next().unwrap_or_default();
        line.find(']').is_some_and(|end| {
            let inner = &line[..end];
            !inner.is_empty() && inner.chars().next().is_some_and(char::is_alphabetic)
        })
    }

    /// Tokenizes the entire input. The result always ends with an `Eof` token.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}
