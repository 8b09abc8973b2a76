/// A decoded bencode value.
///
/// Dictionaries keep their entries in the order they appeared in the input;
/// lookups go by key. A key repeated in the input keeps its first position
/// and its last value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A signed integer of any width, as its validated decimal digits.
    Integer(String),
    /// A byte string (may or may not be valid UTF-8).
    Bytes(Vec<u8>),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A dictionary with byte string keys, in input order.
    Dict(Vec<(Vec<u8>, Value)>),
}

impl Value {
    /// Returns the value as an integer, if it is one that fits in an `i64`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(digits) => digits.parse().ok(),
            _ => None,
        }
    }

    /// Returns the value as a byte string, if it is one.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as a UTF-8 string, if it is a valid UTF-8 byte string.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Returns the value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the dictionary entries, if the value is a dictionary.
    pub fn as_dict(&self) -> Option<&[(Vec<u8>, Value)]> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up a key in this value if it is a dictionary.
    ///
    /// Returns `None` if the value is not a dictionary or the key is absent.
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?
            .iter()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, v)| v)
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Bytes(_) => "byte string",
            Value::List(_) => "list",
            Value::Dict(_) => "dictionary",
        }
    }
}
