//! Storage-native ("DynamoDB JSON") encoding of records.
//!
//! Each value is wrapped in a single-key object naming its type, e.g.
//! `"hi"` becomes `{"S": "hi"}` and `[1, true]` becomes
//! `{"L": [{"N": "1"}, {"BOOL": true}]}`.

use serde_json::{json, Map, Value};

use crate::record::Record;

/// Encodes a whole record as an attribute map.
pub fn marshall(record: &Record) -> Value {
    Value::Object(marshall_map(record.as_map()))
}

/// Encodes one JSON value as a typed attribute.
pub fn marshall_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "NULL": true }),
        Value::Bool(b) => json!({ "BOOL": b }),
        Value::Number(n) => json!({ "N": n.to_string() }),
        Value::String(s) => json!({ "S": s }),
        Value::Array(items) => json!({ "L": items.iter().map(marshall_value).collect::<Vec<_>>() }),
        Value::Object(map) => json!({ "M": marshall_map(map) }),
    }
}

fn marshall_map(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(k, v)| (k.clone(), marshall_value(v)))
        .collect()
}
