//! Normalized decoding of schema column maps.
//!
//! The backend serializes `column_map` inconsistently: some endpoints return
//! a JSON object, others a JSON-encoded string containing that object. This
//! module owns the single typed decode for both shapes; nothing downstream
//! re-checks the wire shape.

use std::collections::BTreeMap;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A confirmed `source column -> target field` map.
///
/// Keys are normalized into sorted order on decode; callers must not rely on
/// backend iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap(BTreeMap<String, String>);

impl ColumnMap {
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self(entries.into_iter().collect())
    }

    pub fn get(&self, source_column: &str) -> Option<&str> {
        self.0.get(source_column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for ColumnMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ColumnMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Object(BTreeMap<String, String>),
            Encoded(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Object(map) => Ok(ColumnMap(map)),
            Wire::Encoded(raw) => serde_json::from_str::<BTreeMap<String, String>>(&raw)
                .map(ColumnMap)
                .map_err(|e| D::Error::custom(format!("column_map string payload: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_object_shape() {
        let map: ColumnMap =
            serde_json::from_str(r#"{"Col A": "line_id", "Col B": "style_id"}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("Col A"), Some("line_id"));
    }

    #[test]
    fn decodes_string_encoded_shape() {
        let map: ColumnMap =
            serde_json::from_str(r#""{\"Col A\": \"line_id\", \"Col B\": \"style_id\"}""#)
                .unwrap();
        assert_eq!(map.get("Col B"), Some("style_id"));
    }

    #[test]
    fn both_shapes_decode_identically() {
        let object: ColumnMap = serde_json::from_str(r#"{"Units": "units_produced"}"#).unwrap();
        let encoded: ColumnMap =
            serde_json::from_str(r#""{\"Units\": \"units_produced\"}""#).unwrap();
        assert_eq!(object, encoded);
    }

    #[test]
    fn rejects_garbage_string_payload() {
        let result: Result<ColumnMap, _> = serde_json::from_str(r#""not json at all""#);
        assert!(result.is_err());
    }
}
