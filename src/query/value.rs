//! Structured values produced by the literal parser.
//!
//! A `Value` is the parsed form of one shell-literal argument. Objects keep
//! their keys in insertion order so that re-rendering a command shows the
//! fields the way the user typed them.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::SyntaxError;

/// An insertion-ordered object body.
pub type Document = IndexMap<String, Value>;

/// Length of the hexadecimal form of an object identifier.
pub const OBJECT_ID_HEX_LEN: usize = 24;

/// A 12-byte document identifier written as 24 hexadecimal characters.
///
/// The hex text is kept exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(String);

impl ObjectId {
    /// Validates and wraps a 24-character hexadecimal string.
    pub fn parse_str(hex: &str) -> Result<Self, SyntaxError> {
        if hex.len() != OBJECT_ID_HEX_LEN {
            return Err(SyntaxError::new(format!(
                "ObjectId must be {OBJECT_ID_HEX_LEN} hex characters, got {}",
                hex.len()
            )));
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SyntaxError::new(format!(
                "ObjectId contains non-hex characters: {hex}"
            )));
        }
        Ok(Self(hex.to_string()))
    }

    /// Returns the hex text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the hex text lowercased, for comparisons across spellings.
    pub fn to_lower_hex(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl FromStr for ObjectId {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId(\"{}\")", self.0)
    }
}

/// A parsed shell-literal value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// `null`.
    #[default]
    Null,

    /// `true` or `false`.
    Bool(bool),

    /// Integer literal that fits in an i64.
    Int(i64),

    /// Any other numeric literal.
    Float(f64),

    /// Quoted string.
    String(String),

    /// `[ ... ]`.
    Array(Vec<Value>),

    /// `{ ... }`.
    Object(Document),

    /// `ObjectId("...")`.
    ObjectId(ObjectId),
}

impl Value {
    /// Returns an empty object, the default for omitted arguments.
    pub fn empty_object() -> Self {
        Value::Object(Document::new())
    }

    /// Returns true if this value is `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this is an object with no keys.
    pub fn is_empty_object(&self) -> bool {
        matches!(self, Value::Object(doc) if doc.is_empty())
    }

    /// Returns the object body if this is an object.
    pub fn as_object(&self) -> Option<&Document> {
        match self {
            Value::Object(doc) => Some(doc),
            _ => None,
        }
    }

    /// Returns the elements if this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the string contents if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns any numeric value as a float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the identifier if this is an ObjectId.
    pub fn as_object_id(&self) -> Option<&ObjectId> {
        match self {
            Value::ObjectId(oid) => Some(oid),
            _ => None,
        }
    }

    /// Looks up a key if this is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|doc| doc.get(key))
    }

    /// Returns a short name for the kind of value, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::ObjectId(_) => "ObjectId",
        }
    }

    /// Converts to JSON, writing ObjectIds as extended JSON `{"$oid": ...}`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::String(s) => Json::String(s.clone()),
            Value::Array(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Object(doc) => Json::Object(
                doc.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            Value::ObjectId(oid) => {
                let mut map = serde_json::Map::new();
                map.insert("$oid".to_string(), Json::String(oid.as_str().to_string()));
                Json::Object(map)
            }
        }
    }
}

/// Returns true if `key` can be written without quotes.
pub(crate) fn is_bare_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(is_key_char)
}

/// Characters allowed in an unquoted object key.
pub(crate) fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

/// Renders the canonical shell-literal form. Parsing the output yields an
/// equal value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            // Debug keeps a fraction or exponent, so the text re-parses as a float.
            Value::Float(x) => write!(f, "{x:?}"),
            Value::String(s) => write_quoted(f, s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(doc) if doc.is_empty() => f.write_str("{}"),
            Value::Object(doc) => {
                f.write_str("{ ")?;
                for (i, (key, value)) in doc.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if is_bare_key(key) {
                        f.write_str(key)?;
                    } else {
                        write_quoted(f, key)?;
                    }
                    write!(f, ": {value}")?;
                }
                f.write_str(" }")
            }
            Value::ObjectId(oid) => write!(f, "{oid}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<ObjectId> for Value {
    fn from(v: ObjectId) -> Self {
        Value::ObjectId(v)
    }
}

impl From<Document> for Value {
    fn from(v: Document) -> Self {
        Value::Object(v)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}
