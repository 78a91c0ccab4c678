use crate::ast::Config;
use crate::error::{ParseError, SclError};
use crate::parser::Parser;
use crate::serializer::Serializer;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Parses SCL source text into a [`Config`].
///
/// This is the primary entry point. Lexing and parsing stop at the first
/// malformed construct; the returned [`SclError::Syntax`] carries its line
/// and column.
///
/// # Errors
///
/// Returns a `SclError` if the text is not valid SCL.
pub fn parse_text(text: &str) -> Result<Config, SclError> {
    log::debug!("parsing {} bytes of SCL", text.len());
    let mut parser = Parser::from_source(text)?;
    let config = parser.parse_config()?;
    log::debug!("parsed {} top-level parameters", config.len());
    Ok(config)
}

/// Like [`parse_text`], but syntax errors carry the source under `file_name`
/// so a `miette::Report` renders the offending snippet.
///
/// # Errors
///
/// Returns a `SclError` if the text is not valid SCL.
pub fn parse_text_named(text: &str, file_name: &str) -> Result<Config, SclError> {
    parse_text(text).map_err(|err| match err {
        SclError::Syntax(syntax) => SclError::Syntax(syntax.with_source(file_name, text)),
        other => other,
    })
}

/// Serializes a [`Config`] to SCL text. An `indent` of zero means the default of four spaces.
///
/// # Errors
///
/// Returns a `SclError::Serialize` for a list whose elements disagree in
/// type, a list holding classes or lists, or a non-finite float.
pub fn serialize_config(config: &Config, indent: usize) -> Result<String, SclError> {
    let serializer = Serializer::new(indent);
    log::debug!(
        "serializing {} top-level parameters with indent {}",
        config.len(),
        serializer.indent()
    );
    Ok(serializer.serialize(config)?)
}

/// Reads UTF-8 SCL text from `reader` and parses it.
///
/// # Errors
///
/// Returns a `SclError::Parse` if reading fails or the bytes are not UTF-8,
/// and a `SclError::Syntax` if the text is not valid SCL.
pub fn from_reader<R: Read>(mut reader: R) -> Result<Config, SclError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8(bytes)
        .map_err(|err| ParseError::new(format!("source is not valid UTF-8: {err}")))?;
    parse_text(&text)
}

/// Serializes `config` and writes the text to `writer`.
///
/// # Errors
///
/// Returns a `SclError` if serialization or writing fails.
pub fn to_writer<W: Write>(config: &Config, mut writer: W, indent: usize) -> Result<(), SclError> {
    let text = serialize_config(config, indent)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Reads and parses the SCL file at `path`.
///
/// # Errors
///
/// Returns a `SclError` if the file cannot be read or is not valid SCL.
/// Syntax errors carry the file's contents for rendering.
pub fn load(path: impl AsRef<Path>) -> Result<Config, SclError> {
    let path = path.as_ref();
    log::debug!("loading {}", path.display());
    let mut text = String::new();
    File::open(path)?.read_to_string(&mut text)?;
    parse_text_named(&text, &path.to_string_lossy())
}

/// Serializes `config` into the file at `path`, replacing its contents.
///
/// # Errors
///
/// Returns a `SclError` if serialization fails or the file cannot be written.
pub fn dump(config: &Config, path: impl AsRef<Path>, indent: usize) -> Result<(), SclError> {
    let path = path.as_ref();
    log::debug!("dumping to {}", path.display());
    to_writer(config, File::create(path)?, indent)
}

/// Converts a parsed config into a pretty-printed JSON string.
///
/// # Errors
/// Returns a `serde_json::Error` if serialization fails.
pub fn to_json(config: &Config) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(config)
}

/// Converts a parsed config into a YAML string.
///
/// # Errors
/// Returns a `serde_yaml::Error` if serialization fails.
pub fn to_yaml(config: &Config) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Value;

    #[test]
    fn test_parse_to_json() {
        let source = r#"
            name :: str { "My App" }
            version :: fl { 1.5 }
            is_enabled :: bool { true }
            features :: list(str) { "a", "b", "c" }
            config :: class {
                host :: str { "localhost" }
                port :: num { 8080 }
            }
        "#;

        let expected_json = serde_json::json!({
            "name": "My App",
            "version": 1.5,
            "is_enabled": true,
            "features": ["a", "b", "c"],
            "config": {
                "host": "localhost",
                "port": 8080,
            }
        });

        let config = parse_text(source).unwrap();
        let result_json: serde_json::Value = serde_json::from_str(&to_json(&config).unwrap()).unwrap();
        assert_eq!(result_json, expected_json);
    }

    #[test]
    fn test_parse_to_yaml_keeps_order() {
        let source = r#"
            zeta :: str { "last letter" }
            alpha :: num { 1 }
        "#;
        let config = parse_text(source).unwrap();
        assert_eq!(to_yaml(&config).unwrap(), "zeta: last letter\nalpha: 1\n");
    }

    #[test]
    fn test_reader_writer_round_trip() {
        let mut config = Config::new();
        config.insert("count", 3_i64);
        config.insert("title", "example");

        let mut buffer = Vec::new();
        to_writer(&config, &mut buffer, 0).unwrap();
        assert!(buffer.ends_with(b"\n"));
        assert_eq!(from_reader(buffer.as_slice()).unwrap(), config);
    }

    #[test]
    fn test_reader_rejects_invalid_utf8() {
        let err = from_reader(&[0xff_u8, 0xfe][..]).unwrap_err();
        assert!(matches!(err, SclError::Parse(_)));
    }

    #[test]
    fn test_named_source_is_attached() {
        match parse_text_named("x :: num { true }", "broken.scl") {
            Err(SclError::Syntax(err)) => {
                assert!(err.src.is_some());
                assert_eq!(err.span.map(|s| (s.offset(), s.len())), Some((11, 4)));
            }
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_serialize_error_surfaces() {
        let mut config = Config::new();
        config.insert("xs", Value::List(vec![Value::Boolean(true), Value::Integer(1)]));
        assert!(matches!(
            serialize_config(&config, 4),
            Err(SclError::Serialize(_))
        ));
    }
}
