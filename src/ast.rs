use std::fmt;

/// A parsed SCL value.
///
/// `str` and `ml` blocks both parse into [`Value::String`]; the serializer
/// picks the block form from the content. `dynamic` blocks parse into
/// whichever scalar variant matches their literal and keep no trace of the
/// `dynamic` keyword.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Class(Config),
    /// Homogeneous elements of one [`ElementType`]. The element type itself is
    /// not stored, so an empty list has none.
    List(Vec<Value>),
}

impl Value {
    /// The type keyword the serializer emits for this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "bool",
            Value::Integer(_) => "num",
            Value::Float(_) => "fl",
            Value::String(s) if s.contains('\n') => "ml",
            Value::String(_) => "str",
            Value::Class(_) => "class",
            Value::List(_) => "list",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Floats, and integers widened to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&Config> {
        match self {
            Value::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Config> for Value {
    fn from(c: Config) -> Self {
        Value::Class(c)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// The element types a `list(...)` may declare.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ElementType {
    Num,
    Fl,
    Bool,
    Str,
}

impl ElementType {
    /// The element type a list would be serialized with, judged by its first element.
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(_) => Some(Self::Bool),
            Value::Integer(_) => Some(Self::Num),
            Value::Float(_) => Some(Self::Fl),
            Value::String(_) => Some(Self::Str),
            Value::Class(_) | Value::List(_) => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Num => "num",
            Self::Fl => "fl",
            Self::Bool => "bool",
            Self::Str => "str",
        }
    }

    /// Whether `value` may appear in a list of this element type.
    /// Float lists also hold integers.
    pub fn admits(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Num, Value::Integer(_))
                | (Self::Fl, Value::Float(_) | Value::Integer(_))
                | (Self::Bool, Value::Boolean(_))
                | (Self::Str, Value::String(_))
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An insertion-ordered mapping from parameter names to values.
///
/// This is both the top level of an SCL document and the body of every
/// `class` block. Inserting a name that already exists replaces its value
/// but keeps its original position.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Config {
    entries: Vec<(String, Value)>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Looks up a dotted path such as `server.tls.enabled` through nested classes.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.get(parts.next()?)?;
        for part in parts {
            current = current.as_class()?.get(part)?;
        }
        Some(current)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Config {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = Config::new();
        for (name, value) in iter {
            config.insert(name, value);
        }
        config
    }
}

impl IntoIterator for Config {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
