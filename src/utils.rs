use crate::lexer::is_name_char;

/// Escapes `\` and `"` for a double-quoted string literal.
///
/// Newlines and tabs are left as they are; the serializer never sends a
/// string containing a newline down this path.
pub fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Whether `name` lexes back as a single identifier or type keyword token.
pub fn is_bare_name(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return false;
    };

    if first.is_ascii_digit() {
        // `123abc` is a name, `123` is a number.
        let after_digits = name.chars().find(|c| !c.is_ascii_digit());
        if !after_digits.is_some_and(|c| c.is_alphabetic() || c == '_') {
            return false;
        }
    } else if !(first.is_alphabetic() || first == '_') {
        return false;
    }

    if !name.chars().all(is_name_char) {
        return false;
    }

    // Boolean words lex as literals, not names.
    !matches!(name, "true" | "false" | "yes" | "no")
}

/// Renders a parameter name so the parser reads back exactly `name`.
pub fn render_name(name: &str) -> String {
    if is_bare_name(name) {
        name.to_string()
    } else {
        let escaped = escape_string(name)
            .replace('\n', "\\n")
            .replace('\t', "\\t");
        format!("\"{escaped}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_names() {
        for name in ["port", "_x", "max-size", "123abc", "9_lives", "class", "list"] {
            assert!(is_bare_name(name), "{name} should be bare");
        }
        for name in ["", "42", "-x", "with space", "true", "no", "a.b", "1.5x"] {
            assert!(!is_bare_name(name), "{name:?} should be quoted");
        }
    }

    #[test]
    fn test_render_name() {
        assert_eq!(render_name("port"), "port");
        assert_eq!(render_name("42"), "\"42\"");
        assert_eq!(render_name("say \"hi\""), r#""say \"hi\"""#);
        assert_eq!(render_name("a\nb"), r#""a\nb""#);
    }
}
