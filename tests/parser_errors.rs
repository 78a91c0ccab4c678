// Parser error path tests
// Every malformed construct aborts the whole parse with one positioned error

use scl_core::{parse_text, SclError};

fn assert_syntax_error(source: &str, message: &str) {
    match parse_text(source) {
        Err(SclError::Syntax(err)) => {
            assert_eq!(err.message, message, "wrong message for {source:?}");
            assert!(err.line.is_some() && err.column.is_some());
        }
        other => panic!("{source:?} should fail with {message:?}, got {other:?}"),
    }
}

#[test]
fn test_parser_error_missing_double_colon() {
    assert_syntax_error("x num { 1 }", "Expected ::, got num");
}

#[test]
fn test_parser_error_single_colon() {
    assert_syntax_error("x : num { 1 }", "Unexpected character: :");
}

#[test]
fn test_parser_error_missing_type() {
    assert_syntax_error("x :: { 1 }", "Unknown type: {");
}

#[test]
fn test_parser_error_missing_value() {
    assert_syntax_error("x :: num { }", "Expected NUMBER, got }");
}

#[test]
fn test_parser_error_missing_closing_brace() {
    assert_syntax_error("x :: num { 1", "Expected }, got EOF");
}

#[test]
fn test_parser_error_two_values() {
    assert_syntax_error("x :: num { 1 2 }", "Expected }, got NUMBER");
}

#[test]
fn test_parser_error_float_in_num() {
    assert_syntax_error("x :: num { 1.5 }", "Expected NUMBER, got FLOAT");
}

#[test]
fn test_parser_error_fl_rejects_string() {
    assert_syntax_error("x :: fl { \"1.5\" }", "Expected float or number");
}

#[test]
fn test_parser_error_bool_rejects_number() {
    assert_syntax_error("x :: bool { 1 }", "Expected BOOLEAN, got NUMBER");
}

#[test]
fn test_parser_error_ml_rejects_double_quotes() {
    assert_syntax_error("x :: ml { \"text\" }", "Expected MULTILINE_STRING, got STRING");
}

#[test]
fn test_parser_error_list_without_element_type() {
    assert_syntax_error("x :: list { 1 }", "Expected (, got {");
}

#[test]
fn test_parser_error_list_of_lists() {
    assert_syntax_error("x :: list(list) { }", "Unsupported list element type: list");
}

#[test]
fn test_parser_error_list_double_comma() {
    assert_syntax_error("x :: list(num) { 1,, 2 }", "Expected NUMBER, got ,");
}

#[test]
fn test_parser_error_list_leading_comma() {
    assert_syntax_error("x :: list(str) { , \"a\" }", "Expected STRING, got ,");
}

#[test]
fn test_parser_error_mixed_list() {
    assert_syntax_error("x :: list(num) { 1, \"a\" }", "Expected NUMBER, got STRING");
    assert_syntax_error("x :: list(bool) { true, 1 }", "Expected BOOLEAN, got NUMBER");
}

#[test]
fn test_parser_error_dynamic_list() {
    assert_syntax_error(
        "x :: dynamic { list(num) { 1 } }",
        "dynamic supports only base types (bool, str, num, fl, ml)",
    );
}

#[test]
fn test_parser_error_boolean_name() {
    assert_syntax_error("true :: num { 1 }", "Expected identifier or keyword, got BOOLEAN");
}

#[test]
fn test_parser_error_float_name() {
    assert_syntax_error("1.5 :: num { 1 }", "Expected identifier or keyword, got FLOAT");
}

#[test]
fn test_parser_error_stray_closing_brace() {
    assert_syntax_error("x :: num { 1 } }", "Expected identifier or keyword, got }");
}

#[test]
fn test_parser_error_position_on_later_line() {
    match parse_text("a :: num { 1 }\n\n   b :: num { no }") {
        Err(SclError::Syntax(err)) => {
            assert_eq!((err.line, err.column), (Some(3), Some(15)));
            assert_eq!(
                err.to_string(),
                "Syntax error at line 3, column 15: Expected NUMBER, got BOOLEAN"
            );
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn test_parser_error_lone_minus() {
    assert_syntax_error("x :: num { - }", "Expected digit after '-'");
}

#[test]
fn test_parser_error_float_out_of_range() {
    let source = format!("x :: fl {{ 1{}.0 }}", "0".repeat(400));
    assert_syntax_error(&source, "Invalid float format");
}

#[test]
fn test_parser_error_nesting_too_deep() {
    let levels = scl_core::MAX_DEPTH + 1;
    let source = format!("{}{}", "a :: class {\n".repeat(levels), "}\n".repeat(levels));
    assert_syntax_error(
        &source,
        &format!("Nesting too deep: more than {} nested classes", scl_core::MAX_DEPTH),
    );
}
