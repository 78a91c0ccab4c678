use crate::ast::{Config, ElementType, Value};
use crate::error::SerializeError;
use crate::parser::MAX_DEPTH;
use crate::utils::{escape_string, render_name};

/// Indent width used when the caller asks for zero.
pub const DEFAULT_INDENT: usize = 4;

/// Writes a [`Config`] back out as SCL text.
///
/// Every parameter goes on its own line, nested classes are indented one
/// step per level, and the output ends with a newline. Entries are emitted
/// in the config's insertion order.
#[derive(Debug, Clone, Copy)]
pub struct Serializer {
    indent: usize,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl Serializer {
    pub fn new(indent: usize) -> Self {
        Self {
            indent: if indent == 0 { DEFAULT_INDENT } else { indent },
        }
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn serialize(&self, config: &Config) -> Result<String, SerializeError> {
        let mut out = String::new();
        self.write_level(&mut out, config, 0)?;
        Ok(out)
    }

    fn write_level(&self, out: &mut String, config: &Config, level: usize) -> Result<(), SerializeError> {
        let pad = self.pad(level);
        for (name, value) in config.iter() {
            out.push_str(&pad);
            out.push_str(&render_name(name));
            out.push_str(" :: ");
            self.write_value(out, name, value, level)?;
            out.push('\n');
        }
        Ok(())
    }

    fn write_value(
        &self,
        out: &mut String,
        name: &str,
        value: &Value,
        level: usize,
    ) -> Result<(), SerializeError> {
        match value {
            Value::Boolean(b) => out.push_str(&format!("bool {{ {b} }}")),
            Value::Integer(n) => out.push_str(&format!("num {{ {n} }}")),
            Value::Float(f) => {
                let literal = format_float(*f).ok_or_else(|| SerializeError::NonFiniteFloat {
                    key: name.to_string(),
                })?;
                out.push_str(&format!("fl {{ {literal} }}"));
            }
            Value::String(s) if s.contains('\n') => {
                // No escape exists inside '...', so a `'` in `s` ends the block early.
                let pad = self.pad(level);
                let inner = self.pad(level + 1);
                out.push_str(&format!("ml {{\n{inner}'{s}'\n{pad}}}"));
            }
            Value::String(s) => out.push_str(&format!("str {{ \"{}\" }}", escape_string(s))),
            Value::Class(members) => {
                if level + 1 > MAX_DEPTH {
                    return Err(SerializeError::NestingTooDeep {
                        key: name.to_string(),
                        limit: MAX_DEPTH,
                    });
                }
                out.push_str("class {\n");
                self.write_level(out, members, level + 1)?;
                out.push_str(&self.pad(level));
                out.push('}');
            }
            Value::List(items) => out.push_str(&render_list(name, items)?),
        }
        Ok(())
    }

    fn pad(&self, level: usize) -> String {
        " ".repeat(self.indent * level)
    }
}

/// `list(<type>) { a, b, c }`, typed by the first element.
fn render_list(name: &str, items: &[Value]) -> Result<String, SerializeError> {
    let Some(first) = items.first() else {
        return Ok("list(str) { }".to_string());
    };
    let element_type = ElementType::of(first).ok_or_else(|| SerializeError::UnsupportedListElement {
        key: name.to_string(),
        found: first.type_name().to_string(),
    })?;

    let mixed = |item: &Value| SerializeError::MixedList {
        key: name.to_string(),
        expected: element_type.to_string(),
        found: item.type_name().to_string(),
    };

    let mut literals = Vec::with_capacity(items.len());
    for item in items {
        let literal = match item {
            _ if !element_type.admits(item) => return Err(mixed(item)),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(f) => format_float(*f).ok_or_else(|| SerializeError::NonFiniteFloat {
                key: name.to_string(),
            })?,
            Value::String(s) => format!("\"{}\"", escape_string(s)),
            Value::Class(_) | Value::List(_) => return Err(mixed(item)),
        };
        literals.push(literal);
    }

    Ok(format!("list({element_type}) {{ {} }}", literals.join(", ")))
}

/// Shortest decimal form of `f` that lexes back to the same float.
///
/// Whole values print without a fraction (`5`), which `fl` accepts. A whole
/// value too large for an integer literal keeps a `.0` so it lexes as a float.
fn format_float(f: f64) -> Option<String> {
    if !f.is_finite() {
        return None;
    }
    let text = f.to_string();
    if text.contains('.') || text.parse::<i64>().is_ok() {
        Some(text)
    } else {
        Some(format!("{text}.0"))
    }
}
