//! Ordered header multi-map.
//!
//! HTTP allows a header name to appear more than once (`Set-Cookie` being the
//! usual example), so descriptors keep every `(name, value)` pair in the order
//! it was seen. The JSON wire form is a flat object; when flattening, the last
//! value for a name wins while the name keeps the position of its first
//! occurrence.

use std::fmt;

use serde::{
    de::{self, MapAccess, SeqAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::Value;

/// Sequence of header name/value pairs, duplicates allowed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderList {
    entries: Vec<(String, String)>,
}

impl HeaderList {
    /// Create an empty header list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header, keeping any earlier value with the same name
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Last value recorded for `name` (case-sensitive)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().rev().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    /// Every value recorded for `name`, in insertion order
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries.iter().filter(move |(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    /// Whether a header with this name exists, ignoring ASCII case
    pub fn contains_ignore_case(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collapse duplicates: one entry per name, last value wins
    pub fn flattened(&self) -> Vec<(&str, &str)> {
        let mut flat: Vec<(&str, &str)> = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match flat.iter_mut().find(|(existing, _)| *existing == key.as_str()) {
                Some(slot) => slot.1 = value.as_str(),
                None => flat.push((key.as_str(), value.as_str())),
            }
        }
        flat
    }
}

impl<K, V> FromIterator<(K, V)> for HeaderList
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (key, value) in iter {
            headers.append(key, value);
        }
        headers
    }
}

impl IntoIterator for HeaderList {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for HeaderList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let flat = self.flattened();
        let mut map = serializer.serialize_map(Some(flat.len()))?;
        for (key, value) in flat {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Header values arrive as strings, but numbers and booleans are accepted
/// in their JSON spelling. `null` drops the header.
fn header_value<E: de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        Value::Null => Ok(None),
        Value::Array(_) | Value::Object(_) => {
            Err(E::custom("header values must be strings, numbers or booleans"))
        }
    }
}

struct HeaderListVisitor;

impl<'de> Visitor<'de> for HeaderListVisitor {
    type Value = HeaderList;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a header object or a list of [name, value] pairs")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut headers = HeaderList::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            if let Some(value) = header_value(value)? {
                headers.append(key, value);
            }
        }
        Ok(headers)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut headers = HeaderList::new();
        while let Some((key, value)) = access.next_element::<(String, Value)>()? {
            if let Some(value) = header_value(value)? {
                headers.append(key, value);
            }
        }
        Ok(headers)
    }
}

impl<'de> Deserialize<'de> for HeaderList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(HeaderListVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_last_value() {
        let headers: HeaderList =
            [("Set-Cookie", "a=1"), ("Accept", "*/*"), ("Set-Cookie", "b=2")].into_iter().collect();

        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("Set-Cookie"), Some("b=2"));
        assert_eq!(headers.get_all("Set-Cookie").collect::<Vec<_>>(), vec!["a=1", "b=2"]);
        assert_eq!(headers.get("set-cookie"), None);
        assert!(headers.contains_ignore_case("set-cookie"));
    }

    #[test]
    fn test_flatten_keeps_first_position() {
        let headers: HeaderList =
            [("A", "1"), ("B", "2"), ("A", "3")].into_iter().collect();

        assert_eq!(headers.flattened(), vec![("A", "3"), ("B", "2")]);
        assert_eq!(serde_json::to_string(&headers).unwrap(), r#"{"A":"3","B":"2"}"#);
    }

    #[test]
    fn test_deserialize_object_and_pairs() {
        let from_object: HeaderList = serde_json::from_str(r#"{"X-One":"1","X-Two":"2"}"#).unwrap();
        assert_eq!(from_object.get("X-Two"), Some("2"));

        let from_pairs: HeaderList =
            serde_json::from_str(r#"[["Set-Cookie","a=1"],["Set-Cookie","b=2"]]"#).unwrap();
        assert_eq!(from_pairs.len(), 2);
    }

    #[test]
    fn test_scalar_values_become_strings() {
        let headers: HeaderList =
            serde_json::from_str(r#"{"X-Num": 1, "X-Ratio": 0.5, "X-On": true, "X-Gone": null}"#)
                .unwrap();

        assert_eq!(headers.get("X-Num"), Some("1"));
        assert_eq!(headers.get("X-Ratio"), Some("0.5"));
        assert_eq!(headers.get("X-On"), Some("true"));
        assert_eq!(headers.len(), 3);

        assert!(serde_json::from_str::<HeaderList>(r#"{"X-Bad": {"a": 1}}"#).is_err());
    }
}
