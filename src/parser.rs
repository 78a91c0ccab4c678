use crate::ast::{Config, ElementType, Value};
use crate::error::SyntaxError;
use crate::lexer::{Lexer, Token, TokenKind, TypeKeyword};

/// How many `class` blocks may enclose one another.
///
/// Parsing and serializing recurse once per level, so deeper documents are
/// rejected with an error instead of exhausting the stack.
pub const MAX_DEPTH: usize = 128;

/// A recursive descent parser for SCL.
///
/// The parser owns its token buffer and a cursor into it. It is consumed by
/// one call to [`Parser::parse_config`] and stops at the first error.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    /// Builds a parser over already-lexed tokens. Comments and newlines are dropped.
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|t| !matches!(t.kind, TokenKind::Newline | TokenKind::Comment(_)))
            .collect();

        if tokens.last().map_or(true, |t| t.kind != TokenKind::Eof) {
            let (line, column, end) = tokens
                .last()
                .map_or((1, 1, 0), |t| (t.line, t.column, t.pos_end));
            tokens.push(Token::new(TokenKind::Eof, line, column, end, end));
        }

        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Lexes `source_text` and builds a parser over the result.
    pub fn from_source(source_text: &str) -> Result<Self, SyntaxError> {
        Ok(Self::new(Lexer::new(source_text).tokenize()?))
    }

    // === Main Parsing Methods ===

    /// Config ::= { Parameter }
    pub fn parse_config(&mut self) -> Result<Config, SyntaxError> {
        let mut config = Config::new();
        while !self.check(&TokenKind::Eof) {
            let (name, value) = self.parse_parameter()?;
            config.insert(name, value);
        }
        log::trace!("parsed {} top-level parameters", config.len());
        Ok(config)
    }

    /// Parameter ::= Name "::" TypedValue
    fn parse_parameter(&mut self) -> Result<(String, Value), SyntaxError> {
        let name = self.parse_name()?;
        self.expect(TokenKind::DoubleColon)?;
        let value = self.parse_typed_value()?;
        Ok((name, value))
    }

    /// Name ::= Identifier | TypeKeyword | Number | String
    fn parse_name(&mut self) -> Result<String, SyntaxError> {
        let token = self.current_token();
        let name = match &token.kind {
            TokenKind::Identifier(s) | TokenKind::String(s) => s.clone(),
            TokenKind::Keyword(k) => k.as_str().to_string(),
            TokenKind::Number(n) => n.to_string(),
            other => {
                return Err(self.error(format!("Expected identifier or keyword, got {other}")));
            }
        };
        self.advance();
        Ok(name)
    }

    /// TypedValue ::= TypeKeyword ValueBlock
    fn parse_typed_value(&mut self) -> Result<Value, SyntaxError> {
        let TokenKind::Keyword(keyword) = self.current_token().kind else {
            let text = self.current_token().kind.text();
            return Err(self.error(format!("Unknown type: {text}")));
        };
        self.advance();

        match keyword {
            TypeKeyword::Bool => self.parse_braced(Self::parse_boolean),
            TypeKeyword::Str => self.parse_braced(Self::parse_string),
            TypeKeyword::Num => self.parse_braced(Self::parse_integer),
            TypeKeyword::Fl => self.parse_braced(Self::parse_float),
            TypeKeyword::Ml => self.parse_braced(Self::parse_multiline),
            TypeKeyword::Class => self.parse_class(),
            TypeKeyword::List => self.parse_list(),
            TypeKeyword::Dynamic => self.parse_braced(Self::parse_scalar),
        }
    }

    /// "{" <inner> "}"
    fn parse_braced(
        &mut self,
        inner: fn(&mut Self) -> Result<Value, SyntaxError>,
    ) -> Result<Value, SyntaxError> {
        self.expect(TokenKind::LBrace)?;
        let value = inner(self)?;
        self.expect(TokenKind::RBrace)?;
        Ok(value)
    }

    /// Class ::= "{" { Parameter } "}"
    fn parse_class(&mut self) -> Result<Value, SyntaxError> {
        if self.depth == MAX_DEPTH {
            return Err(self.error(format!(
                "Nesting too deep: more than {MAX_DEPTH} nested classes"
            )));
        }
        self.expect(TokenKind::LBrace)?;
        self.depth += 1;
        let mut members = Config::new();
        while !self.check(&TokenKind::RBrace) {
            let (name, value) = self.parse_parameter()?;
            members.insert(name, value);
        }
        self.expect(TokenKind::RBrace)?;
        self.depth -= 1;
        Ok(Value::Class(members))
    }

    /// List ::= "(" ElemKeyword ")" "{" [ Elem { "," Elem } ] "}"
    fn parse_list(&mut self) -> Result<Value, SyntaxError> {
        self.expect(TokenKind::LParen)?;
        let element_type = match self.current_token().kind {
            TokenKind::Keyword(TypeKeyword::Num) => ElementType::Num,
            TokenKind::Keyword(TypeKeyword::Fl) => ElementType::Fl,
            TokenKind::Keyword(TypeKeyword::Bool) => ElementType::Bool,
            TokenKind::Keyword(TypeKeyword::Str) => ElementType::Str,
            ref other => {
                let text = other.text();
                return Err(self.error(format!("Unsupported list element type: {text}")));
            }
        };
        self.advance();
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::LBrace)?;

        let mut elements = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            elements.push(self.parse_element(element_type)?);
            if self.check(&TokenKind::Comma) {
                self.advance();
                if self.check(&TokenKind::RBrace) {
                    return Err(self.error("Expected list element, got }"));
                }
            } else if !self.check(&TokenKind::RBrace) {
                return Err(self.error("Expected comma or closing brace"));
            }
        }

        self.expect(TokenKind::RBrace)?;
        Ok(Value::List(elements))
    }

    fn parse_element(&mut self, element_type: ElementType) -> Result<Value, SyntaxError> {
        match element_type {
            ElementType::Num => self.parse_integer(),
            ElementType::Fl => self.parse_float(),
            ElementType::Bool => self.parse_boolean(),
            ElementType::Str => self.parse_string(),
        }
    }

    // === Literal Rules ===

    fn parse_boolean(&mut self) -> Result<Value, SyntaxError> {
        match self.current_token().kind {
            TokenKind::Boolean(b) => {
                self.advance();
                Ok(Value::Boolean(b))
            }
            ref other => Err(self.unexpected("BOOLEAN", other)),
        }
    }

    fn parse_integer(&mut self) -> Result<Value, SyntaxError> {
        match self.current_token().kind {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Value::Integer(n))
            }
            ref other => Err(self.unexpected("NUMBER", other)),
        }
    }

    /// Float ::= Float | Number (promoted)
    fn parse_float(&mut self) -> Result<Value, SyntaxError> {
        match self.current_token().kind {
            TokenKind::Float(f) => {
                self.advance();
                Ok(Value::Float(f))
            }
            TokenKind::Number(n) => {
                self.advance();
                Ok(Value::Float(n as f64))
            }
            _ => Err(self.error("Expected float or number")),
        }
    }

    fn parse_string(&mut self) -> Result<Value, SyntaxError> {
        match &self.current_token().kind {
            TokenKind::String(s) => {
                let value = Value::String(s.clone());
                self.advance();
                Ok(value)
            }
            other => Err(self.unexpected("STRING", other)),
        }
    }

    fn parse_multiline(&mut self) -> Result<Value, SyntaxError> {
        match &self.current_token().kind {
            TokenKind::MultilineString(s) => {
                let value = Value::String(s.clone());
                self.advance();
                Ok(value)
            }
            other => Err(self.unexpected("MULTILINE_STRING", other)),
        }
    }

    /// Scalar ::= Number | Float | Boolean | String | MultilineString
    fn parse_scalar(&mut self) -> Result<Value, SyntaxError> {
        let value = match &self.current_token().kind {
            TokenKind::Number(n) => Value::Integer(*n),
            TokenKind::Float(f) => Value::Float(*f),
            TokenKind::Boolean(b) => Value::Boolean(*b),
            TokenKind::String(s) | TokenKind::MultilineString(s) => Value::String(s.clone()),
            _ => {
                return Err(
                    self.error("dynamic supports only base types (bool, str, num, fl, ml)")
                );
            }
        };
        self.advance();
        Ok(value)
    }

    // === Token Helper Methods ===

    /// The token under the cursor; past the end this is the trailing `Eof`.
    fn current_token(&self) -> &Token {
        let index = self.position.min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current_token().kind) == std::mem::discriminant(kind)
    }

    fn expect(&mut self, expected: TokenKind) -> Result<(), SyntaxError> {
        if self.check(&expected) {
            self.advance();
            Ok(())
        } else {
            let found = &self.current_token().kind;
            Err(self.unexpected(&expected.to_string(), found))
        }
    }

    fn unexpected(&self, expected: &str, found: &TokenKind) -> SyntaxError {
        self.error(format!("Expected {expected}, got {found}"))
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        let token = self.current_token();
        SyntaxError::at(
            message,
            token.line,
            token.column,
            token.pos_start,
            token.pos_end - token.pos_start,
        )
    }
}
