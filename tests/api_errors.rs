// API error path tests
// These test error handling, conversions, and the file helpers

use scl_core::{dump, load, parse_text, serialize_config, Config, SclError, SerializeError, Value};
use std::io::Write;

#[test]
fn test_api_parse_error_is_syntax() {
    let result = parse_text("x :: num { true }");
    assert!(matches!(result, Err(SclError::Syntax(_))));
}

#[test]
fn test_api_error_display() {
    let err = parse_text("x :: str { \"abc").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Syntax error at line 1, column 16: Unclosed string"
    );
}

#[test]
fn test_api_unpositioned_syntax_error_display() {
    let err = scl_core::SyntaxError::new("something broke", None, None);
    assert_eq!(err.to_string(), "Syntax error: something broke");
}

#[test]
fn test_api_serialize_mixed_list() {
    let mut config = Config::new();
    config.insert("xs", Value::List(vec![Value::from("a"), Value::Boolean(true)]));
    match serialize_config(&config, 4) {
        Err(SclError::Serialize(SerializeError::MixedList { key, expected, found })) => {
            assert_eq!((key.as_str(), expected.as_str(), found.as_str()), ("xs", "str", "bool"));
        }
        other => panic!("expected a mixed list error, got {other:?}"),
    }
}

#[test]
fn test_api_serialize_list_of_classes() {
    let mut config = Config::new();
    config.insert("xs", Value::List(vec![Value::Class(Config::new())]));
    let err = serialize_config(&config, 4).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unsupported list element type for key 'xs': class"
    );
}

#[test]
fn test_api_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = load(dir.path().join("missing.scl"));
    assert!(matches!(result, Err(SclError::Parse(_))));
}

#[test]
fn test_api_load_reports_file_source() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "ok :: num {{ 1 }}\nbad :: num {{ \"one\" }}\n").unwrap();

    match load(file.path()) {
        Err(SclError::Syntax(err)) => {
            assert_eq!(err.line, Some(2));
            assert!(err.src.is_some());
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn test_api_dump_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.scl");

    let mut config = Config::new();
    config.insert("title", "demo");
    config.insert("values", vec![10_i64, 20]);
    config.insert("active", false);

    dump(&config, &path, 2).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "title :: str { \"demo\" }\nvalues :: list(num) { 10, 20 }\nactive :: bool { false }\n"
    );
    assert_eq!(load(&path).unwrap(), config);
}
