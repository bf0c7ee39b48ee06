//! The stored item: a free-form JSON object keyed by `postId`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RequestError;

/// Name of the primary-key attribute.
pub const POST_ID_FIELD: &str = "postId";

/// One stored post.
///
/// Any field may hold any JSON value. The only structural requirement is a
/// text `postId`, and even that is only checked where a key is needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a request body into a record.
    ///
    /// An absent or blank body, or a literal `null`, yields an empty record.
    pub fn parse_body(body: Option<&str>) -> Result<Self, RequestError> {
        let Some(body) = body.filter(|b| !b.trim().is_empty()) else {
            return Ok(Self::new());
        };

        let value: Value =
            serde_json::from_str(body).map_err(|e| RequestError::MalformedBody(e.to_string()))?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(RequestError::NotAnObject(json_type_name(&other))),
        }
    }

    /// Returns the primary key when present as text.
    pub fn post_id(&self) -> Option<&str> {
        self.0.get(POST_ID_FIELD).and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    /// Iterates fields in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_or_blank_body_is_empty_record() {
        assert_eq!(Record::parse_body(None), Ok(Record::new()));
        assert_eq!(Record::parse_body(Some("")), Ok(Record::new()));
        assert_eq!(Record::parse_body(Some("  \n")), Ok(Record::new()));
        assert_eq!(Record::parse_body(Some("null")), Ok(Record::new()));
    }

    #[test]
    fn test_parse_object_body() {
        let record =
            Record::parse_body(Some(r#"{"postId":"p1","title":"Hello","tags":["a"]}"#)).unwrap();

        assert_eq!(record.post_id(), Some("p1"));
        assert_eq!(record.get("title"), Some(&json!("Hello")));
        assert_eq!(record.get("tags"), Some(&json!(["a"])));
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_malformed_body_is_rejected() {
        let result = Record::parse_body(Some("{not json"));
        assert!(matches!(result, Err(RequestError::MalformedBody(_))));
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        assert_eq!(
            Record::parse_body(Some("[1, 2]")),
            Err(RequestError::NotAnObject("array"))
        );
        assert_eq!(
            Record::parse_body(Some("\"text\"")),
            Err(RequestError::NotAnObject("string"))
        );
    }

    #[test]
    fn test_post_id_must_be_text() {
        let record = Record::parse_body(Some(r#"{"postId": 7}"#)).unwrap();
        assert_eq!(record.post_id(), None);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let mut record = Record::new();
        record.insert("postId", json!("p1"));
        record.insert("views", json!(3));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"postId": "p1", "views": 3}));
    }
}
