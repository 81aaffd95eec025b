//! Decoded bencode values
//!
//! [`Value`] is the dynamic tree the parser produces. It is also what an
//! open-ended destination field receives when it should hold "whatever the
//! wire carried" instead of a fixed shape.

use bytes::Bytes;
use std::collections::BTreeMap;

/// Dictionary type used by [`Value::Dict`]
pub type Dict = BTreeMap<Bytes, Value>;

/// A decoded bencode value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// Absence marker, produced for a NUL byte in token position
    #[default]
    Nothing,
    /// A signed 64-bit integer
    Integer(i64),
    /// A raw byte string, not necessarily UTF-8
    Bytes(Bytes),
    /// An ordered list of values
    List(Vec<Value>),
    /// A dictionary keyed by byte strings
    Dict(Dict),
}

impl Value {
    /// Create a byte string value from a UTF-8 string
    pub fn string(s: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }

    /// Human-readable name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nothing => "nothing",
            Value::Integer(_) => "integer",
            Value::Bytes(_) => "byte string",
            Value::List(_) => "list",
            Value::Dict(_) => "dictionary",
        }
    }

    /// Check if this is the absence marker
    pub fn is_nothing(&self) -> bool {
        matches!(self, Value::Nothing)
    }

    /// Get the value as an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as raw bytes
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get the value as UTF-8 text.
    ///
    /// Returns `None` for non-string values and for byte strings that are not
    /// valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Get the value as a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Get the value as a dictionary
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Look up a key if this is a dictionary
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }

    /// Render the value as JSON for inspection.
    ///
    /// Byte strings that are not valid UTF-8 (piece hashes, compact peer
    /// lists) are rendered as `{"hex": "..."}`. JSON object keys must be
    /// strings, so non-UTF-8 dictionary keys become `<hex:...>` instead, which
    /// keeps distinct binary keys apart.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Nothing => serde_json::Value::Null,
            Value::Integer(i) => serde_json::Value::from(*i),
            Value::Bytes(b) => match std::str::from_utf8(b) {
                Ok(s) => serde_json::Value::String(s.to_string()),
                Err(_) => serde_json::json!({ "hex": hex::encode(b) }),
            },
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Dict(dict) => {
                let object = dict
                    .iter()
                    .map(|(k, v)| (json_key(k), v.to_json()))
                    .collect::<serde_json::Map<_, _>>();
                serde_json::Value::Object(object)
            }
        }
    }
}

fn json_key(key: &[u8]) -> String {
    match std::str::from_utf8(key) {
        Ok(s) => s.to_string(),
        Err(_) => format!("<hex:{}>", hex::encode(key)),
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<Dict> for Value {
    fn from(d: Dict) -> Self {
        Value::Dict(d)
    }
}
