use crate::error::SyntaxError;
use std::fmt;

/// The eight type keywords of SCL.
///
/// In type position (right after `::`) they select how the value block is
/// parsed. Anywhere else they are ordinary parameter names.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TypeKeyword {
    Bool,
    Str,
    Num,
    Fl,
    Ml,
    Class,
    List,
    Dynamic,
}

impl TypeKeyword {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "bool" => Some(Self::Bool),
            "str" => Some(Self::Str),
            "num" => Some(Self::Num),
            "fl" => Some(Self::Fl),
            "ml" => Some(Self::Ml),
            "class" => Some(Self::Class),
            "list" => Some(Self::List),
            "dynamic" => Some(Self::Dynamic),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Str => "str",
            Self::Num => "num",
            Self::Fl => "fl",
            Self::Ml => "ml",
            Self::Class => "class",
            Self::List => "list",
            Self::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for TypeKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents the different kinds of tokens that the lexer can produce.
#[derive(Debug, PartialEq, Clone)]
pub enum TokenKind {
    // == Special Tokens ==
    /// End of the input.
    Eof,
    /// A `\n` character. Newlines are significant to the lexer only.
    Newline,
    /// A comment enclosed in `[` and `]`, with the content trimmed.
    Comment(String),

    // == Names and Keywords ==
    /// A bare name: letters, digits, `_` and `-`, e.g. `port`, `max-size`, `123abc`.
    Identifier(String),
    /// One of the type keywords, e.g. `class`.
    Keyword(TypeKeyword),

    // == Literals ==
    /// A double-quoted string with escapes already resolved.
    String(String),
    /// A single-quoted string, taken verbatim.
    MultilineString(String),
    /// An integer literal.
    Number(i64),
    /// A literal containing a `.`.
    Float(f64),
    /// `true`/`yes` or `false`/`no`.
    Boolean(bool),

    // == Punctuation ==
    /// Double Colon: `::`
    DoubleColon,
    /// Left Brace: `{`
    LBrace,
    /// Right Brace: `}`
    RBrace,
    /// Left Parenthesis: `(`
    LParen,
    /// Right Parenthesis: `)`
    RParen,
    /// Comma: `,`
    Comma,
}

impl TokenKind {
    /// The payload of the token rendered back as text.
    pub fn text(&self) -> String {
        match self {
            TokenKind::Eof => String::new(),
            TokenKind::Newline => "\n".to_string(),
            TokenKind::Comment(s)
            | TokenKind::Identifier(s)
            | TokenKind::String(s)
            | TokenKind::MultilineString(s) => s.clone(),
            TokenKind::Keyword(k) => k.as_str().to_string(),
            TokenKind::Number(n) => n.to_string(),
            TokenKind::Float(f) => f.to_string(),
            TokenKind::Boolean(b) => b.to_string(),
            TokenKind::DoubleColon => "::".to_string(),
            TokenKind::LBrace => "{".to_string(),
            TokenKind::RBrace => "}".to_string(),
            TokenKind::LParen => "(".to_string(),
            TokenKind::RParen => ")".to_string(),
            TokenKind::Comma => ",".to_string(),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Eof => "EOF",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Comment(_) => "COMMENT",
            TokenKind::Identifier(_) => "IDENTIFIER",
            TokenKind::Keyword(k) => k.as_str(),
            TokenKind::String(_) => "STRING",
            TokenKind::MultilineString(_) => "MULTILINE_STRING",
            TokenKind::Number(_) => "NUMBER",
            TokenKind::Float(_) => "FLOAT",
            TokenKind::Boolean(_) => "BOOLEAN",
            TokenKind::DoubleColon => "::",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Comma => ",",
        };
        f.write_str(name)
    }
}

/// A token with its kind and position.
///
/// `line` and `column` are 1-based and count characters; `pos_start` and
/// `pos_end` are byte offsets into the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
    pub pos_start: usize,
    pub pos_end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize, column: usize, pos_start: usize, pos_end: usize) -> Token {
        Token {
            kind,
            line,
            column,
            pos_start,
            pos_end,
        }
    }
}

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Lexes the whole input. The returned tokens always end with [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        log::trace!("lexed {} tokens", tokens.len());
        Ok(tokens)
    }

    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_blanks();

        let (line, column, start) = (self.line, self.column, self.position);
        let Some(c) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, line, column, start, start));
        };

        let kind = match c {
            '[' => self.read_comment()?,
            '\n' => {
                self.advance();
                TokenKind::Newline
            }
            ':' if self.peek_nth(1) == Some(':') => {
                self.advance();
                self.advance();
                TokenKind::DoubleColon
            }
            '{' | '}' | '(' | ')' | ',' => {
                self.advance();
                match c {
                    '{' => TokenKind::LBrace,
                    '}' => TokenKind::RBrace,
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    _ => TokenKind::Comma,
                }
            }
            '"' => self.read_string()?,
            '\'' => self.read_multiline_string()?,
            '-' => self.read_number()?,
            c if c.is_ascii_digit() => {
                if self.digits_lead_identifier() {
                    self.read_identifier()
                } else {
                    self.read_number()?
                }
            }
            c if c.is_alphabetic() || c == '_' => self.read_identifier(),
            other => {
                return Err(self.error_here(format!("Unexpected character: {other}")));
            }
        };

        Ok(Token::new(kind, line, column, start, self.position))
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error_here(&self, message: impl Into<String>) -> SyntaxError {
        let len = self.peek().map_or(0, char::len_utf8);
        SyntaxError::at(message, self.line, self.column, self.position, len)
    }

    fn skip_blanks(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.advance();
        }
    }

    fn read_comment(&mut self) -> Result<TokenKind, SyntaxError> {
        self.advance(); // Consume the '['
        let start = self.position;
        loop {
            match self.peek() {
                Some(']') => break,
                Some(_) => {
                    self.advance();
                }
                None => return Err(self.error_here("Unclosed comment")),
            }
        }
        let text = self.input[start..self.position].trim().to_string();
        self.advance(); // Consume the ']'
        Ok(TokenKind::Comment(text))
    }

    fn read_string(&mut self) -> Result<TokenKind, SyntaxError> {
        self.advance(); // Consume the opening quote
        let mut value = String::new();
        loop {
            match self.peek() {
                Some('"') => {
                    self.advance();
                    return Ok(TokenKind::String(value));
                }
                Some('\\') => {
                    self.advance();
                    let Some(escaped) = self.advance() else {
                        return Err(self.error_here("Unexpected end of string after backslash"));
                    };
                    match escaped {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        // `\"`, `\\` and any unknown escape keep the character alone.
                        other => value.push(other),
                    }
                }
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
                None => return Err(self.error_here("Unclosed string")),
            }
        }
    }

    fn read_multiline_string(&mut self) -> Result<TokenKind, SyntaxError> {
        self.advance(); // Consume the opening quote
        let start = self.position;
        loop {
            match self.peek() {
                Some('\'') => break,
                Some(_) => {
                    self.advance();
                }
                None => return Err(self.error_here("Unclosed multiline string")),
            }
        }
        let value = self.input[start..self.position].to_string();
        self.advance();
        Ok(TokenKind::MultilineString(value))
    }

    /// A run of digits followed by a letter or `_` is a name such as `123abc`.
    fn digits_lead_identifier(&self) -> bool {
        self.rest()
            .chars()
            .find(|c| !c.is_ascii_digit())
            .is_some_and(|c| c.is_alphabetic() || c == '_')
    }

    fn read_number(&mut self) -> Result<TokenKind, SyntaxError> {
        let (line, column, start) = (self.line, self.column, self.position);

        if self.peek() == Some('-') {
            self.advance();
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(SyntaxError::at("Expected digit after '-'", line, column, start, 1));
            }
        }

        let mut has_dot = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.input[start..self.position];
        let len = self.position - start;
        if has_dot {
            text.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(TokenKind::Float)
                .ok_or_else(|| SyntaxError::at("Invalid float format", line, column, start, len))
        } else {
            text.parse::<i64>()
                .map(TokenKind::Number)
                .map_err(|_| SyntaxError::at("Invalid number format", line, column, start, len))
        }
    }

    fn read_identifier(&mut self) -> TokenKind {
        let start = self.position;
        while let Some(c) = self.peek() {
            if is_name_char(c) {
                self.advance();
            } else {
                break;
            }
        }

        let ident = &self.input[start..self.position];
        if let Some(keyword) = TypeKeyword::from_word(ident) {
            return TokenKind::Keyword(keyword);
        }
        match ident {
            "true" | "yes" => TokenKind::Boolean(true),
            "false" | "no" => TokenKind::Boolean(false),
            _ => TokenKind::Identifier(ident.to_string()),
        }
    }
}

pub(crate) fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}
