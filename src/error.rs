use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum SclError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Serialize(#[from] SerializeError),
}

impl From<std::io::Error> for SclError {
    fn from(err: std::io::Error) -> Self {
        SclError::Parse(ParseError::new(err.to_string()))
    }
}

/// A failure raised while lexing or parsing SCL text.
///
/// Lexer and parser errors always carry the 1-based line and column of the
/// offending character or token. The byte span is filled in as well so that
/// a `miette` report can underline the exact region once the source text is
/// attached with [`SyntaxError::with_source`].
#[derive(Error, Debug, Diagnostic, Clone)]
#[error("{}", describe(.message, .line, .column))]
#[diagnostic(code(scl::syntax))]
pub struct SyntaxError {
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
    #[label("{message}")]
    pub span: Option<SourceSpan>,
    #[source_code]
    pub src: Option<NamedSource<String>>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, line: Option<usize>, column: Option<usize>) -> Self {
        Self {
            message: message.into(),
            line,
            column,
            span: None,
            src: None,
        }
    }

    pub(crate) fn at(message: impl Into<String>, line: usize, column: usize, offset: usize, len: usize) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
            column: Some(column),
            span: Some((offset, len).into()),
            src: None,
        }
    }

    /// Attaches the source text so the error renders with a labelled snippet.
    #[must_use]
    pub fn with_source(mut self, name: impl AsRef<str>, source: &str) -> Self {
        self.src = Some(NamedSource::new(name, source.to_string()));
        self
    }
}

fn describe(message: &str, line: &Option<usize>, column: &Option<usize>) -> String {
    match (line, column) {
        (Some(line), Some(column)) => {
            format!("Syntax error at line {line}, column {column}: {message}")
        }
        _ => format!("Syntax error: {message}"),
    }
}

/// A plain failure with no source position, raised outside the lexer and parser.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
#[error("Parse error: {message}")]
#[diagnostic(code(scl::parse))]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum SerializeError {
    #[error("Mixed types in list for key '{key}': expected all {expected}, found {found}")]
    #[diagnostic(
        code(serializer::mixed_list),
        help("Every element of a list must share the type of its first element.")
    )]
    MixedList {
        key: String,
        expected: String,
        found: String,
    },

    #[error("Unsupported list element type for key '{key}': {found}")]
    #[diagnostic(
        code(serializer::unsupported_list_element),
        help("Lists may only hold bool, num, fl or str elements.")
    )]
    UnsupportedListElement { key: String, found: String },

    #[error("Float value for key '{key}' is not finite")]
    #[diagnostic(
        code(serializer::non_finite_float),
        help("NaN and infinities have no literal form in SCL.")
    )]
    NonFiniteFloat { key: String },

    #[error("Class for key '{key}' is nested more than {limit} levels deep")]
    #[diagnostic(
        code(serializer::nesting_too_deep),
        help("The parser rejects deeper nesting, so the text could not be read back.")
    )]
    NestingTooDeep { key: String, limit: usize },
}
