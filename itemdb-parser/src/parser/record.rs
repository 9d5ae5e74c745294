use core::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap};

/// A decoded attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(u64),
    Text(String),
    #[serde(serialize_with = "hex_bytes")]
    Bytes(Vec<u8>),
}

fn hex_bytes<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&hex::encode(bytes))
}

impl Value {
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Bytes(b) => f.write_str(&hex::encode(b)),
        }
    }
}

/// One decoded item: attribute name to value, in schema order.
///
/// Attributes whose field is newer than the stream are present with a `None` value.
/// Ignored fields never appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    attributes: Vec<(String, Option<Value>)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            attributes: Vec::with_capacity(n),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Option<Value>) {
        self.attributes.push((name.into(), value));
    }

    /// Decoded value, or `None` when the attribute is absent or unknown.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.iter().any(|(n, _)| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> + '_ {
        self.attributes
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(self.attributes.len()))?;
        for (name, value) in &self.attributes {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn absent_and_unknown_both_read_as_none() {
        let mut r = Record::new();
        r.insert("id", Some(Value::Int(3)));
        r.insert("pet_name", None);
        assert_eq!(r.get("id"), Some(&Value::Int(3)));
        assert_eq!(r.get("pet_name"), None);
        assert!(r.contains("pet_name"));
        assert_eq!(r.get("nope"), None);
        assert!(!r.contains("nope"));
    }

    #[test]
    fn serializes_as_ordered_object() {
        let mut r = Record::new();
        r.insert("z", Some(Value::Int(1)));
        r.insert("a", Some(Value::Text("Dirt".into())));
        r.insert("m", Some(Value::Bytes(vec![0xde, 0xad])));
        r.insert("n", None);
        assert_eq!(
            serde_json::to_string(&r).unwrap(),
            r#"{"z":1,"a":"Dirt","m":"dead","n":null}"#
        );
    }
}
