//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and records.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Map, Number, Value};

use posts_core::storage::{RepositoryError, StoredRecord};
use posts_core::{Record, POST_ID_FIELD};

/// A DynamoDB item or key.
pub type Item = HashMap<String, AttributeValue>;

// ============================================================================
// Record -> DynamoDB
// ============================================================================

/// Convert a JSON value to an attribute.
pub fn value_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(value_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), value_to_attribute(v)))
                .collect(),
        ),
    }
}

/// Convert a record to a DynamoDB item.
pub fn record_to_item(record: &Record) -> Item {
    record
        .fields()
        .map(|(k, v)| (k.clone(), value_to_attribute(v)))
        .collect()
}

/// The primary key of a post.
pub fn post_key(post_id: &str) -> Item {
    HashMap::from([(
        POST_ID_FIELD.to_string(),
        AttributeValue::S(post_id.to_string()),
    )])
}

// ============================================================================
// DynamoDB -> Record
// ============================================================================

/// Convert an attribute to a plain JSON value.
///
/// Sets become arrays and binary values become base64 text.
pub fn attribute_to_value(attr: &AttributeValue) -> Result<Value, RepositoryError> {
    Ok(match attr {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::B(blob) => Value::String(encode_blob(blob)),
        AttributeValue::L(items) => Value::Array(
            items
                .iter()
                .map(attribute_to_value)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| attribute_to_value(v).map(|v| (k.clone(), v)))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::Ss(items) => json!(items),
        AttributeValue::Ns(items) => Value::Array(
            items
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::Bs(blobs) => json!(blobs.iter().map(encode_blob).collect::<Vec<_>>()),
        other => return Err(unsupported_attribute(other)),
    })
}

/// Convert an attribute to its DynamoDB JSON wire form, e.g. `{"S": "text"}`.
pub fn attribute_to_raw(attr: &AttributeValue) -> Result<Value, RepositoryError> {
    Ok(match attr {
        AttributeValue::S(s) => json!({ "S": s }),
        AttributeValue::N(n) => json!({ "N": n }),
        AttributeValue::Bool(b) => json!({ "BOOL": b }),
        AttributeValue::Null(b) => json!({ "NULL": b }),
        AttributeValue::B(blob) => json!({ "B": encode_blob(blob) }),
        AttributeValue::L(items) => {
            let items: Vec<Value> = items.iter().map(attribute_to_raw).collect::<Result<_, _>>()?;
            json!({ "L": items })
        }
        AttributeValue::M(map) => {
            let map = item_to_raw(map)?;
            json!({ "M": map })
        }
        AttributeValue::Ss(items) => json!({ "SS": items }),
        AttributeValue::Ns(items) => json!({ "NS": items }),
        AttributeValue::Bs(blobs) => {
            json!({ "BS": blobs.iter().map(encode_blob).collect::<Vec<_>>() })
        }
        other => return Err(unsupported_attribute(other)),
    })
}

/// Convert a DynamoDB item to a record.
pub fn item_to_record(item: &Item) -> Result<Record, RepositoryError> {
    item.iter()
        .map(|(k, v)| attribute_to_value(v).map(|v| (k.clone(), v)))
        .collect()
}

/// Convert a DynamoDB item to its wire form.
pub fn item_to_raw(item: &Item) -> Result<Value, RepositoryError> {
    item.iter()
        .map(|(k, v)| attribute_to_raw(v).map(|v| (k.clone(), v)))
        .collect::<Result<Map<_, _>, _>>()
        .map(Value::Object)
}

pub fn item_to_stored(item: &Item) -> Result<StoredRecord, RepositoryError> {
    Ok(StoredRecord {
        record: item_to_record(item)?,
        raw: item_to_raw(item)?,
    })
}

/// Extract the `postId` from a key map such as `LastEvaluatedKey`.
pub fn key_to_post_id(key: &Item) -> Result<String, RepositoryError> {
    match key.get(POST_ID_FIELD) {
        Some(AttributeValue::S(id)) => Ok(id.clone()),
        Some(other) => Err(RepositoryError::InvalidData(format!(
            "Key attribute {POST_ID_FIELD} is not a string: {other:?}"
        ))),
        None => Err(RepositoryError::InvalidData(format!(
            "Key is missing attribute {POST_ID_FIELD}"
        ))),
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_number(n: &str) -> Result<Number, RepositoryError> {
    if let Ok(i) = n.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = n.parse::<u64>() {
        return Ok(Number::from(u));
    }
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| RepositoryError::InvalidData(format!("Invalid number: {n}")))
}

fn encode_blob(blob: &Blob) -> String {
    STANDARD.encode(blob.as_ref())
}

fn unsupported_attribute(attr: &AttributeValue) -> RepositoryError {
    RepositoryError::InvalidData(format!("Unsupported attribute type: {attr:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_record_to_item() {
        let item = record_to_item(&record(json!({
            "postId": "p1",
            "views": 12,
            "draft": false,
            "editor": null,
            "tags": ["a", 2],
            "meta": {"lang": "en"}
        })));

        assert_eq!(item["postId"], AttributeValue::S("p1".to_string()));
        assert_eq!(item["views"], AttributeValue::N("12".to_string()));
        assert_eq!(item["draft"], AttributeValue::Bool(false));
        assert_eq!(item["editor"], AttributeValue::Null(true));
        assert_eq!(
            item["tags"],
            AttributeValue::L(vec![
                AttributeValue::S("a".to_string()),
                AttributeValue::N("2".to_string())
            ])
        );
        assert_eq!(
            item["meta"],
            AttributeValue::M(HashMap::from([(
                "lang".to_string(),
                AttributeValue::S("en".to_string())
            )]))
        );
    }

    #[test]
    fn test_item_round_trip_preserves_record() {
        let original = record(json!({
            "postId": "p1",
            "score": 4.5,
            "big": 18446744073709551615u64,
            "nested": {"list": [true, null, -3]}
        }));

        let decoded = item_to_record(&record_to_item(&original)).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_sets_and_binary_decode_to_arrays_and_base64() {
        let item: Item = HashMap::from([
            (
                "ss".to_string(),
                AttributeValue::Ss(vec!["x".to_string(), "y".to_string()]),
            ),
            (
                "ns".to_string(),
                AttributeValue::Ns(vec!["1".to_string(), "2.5".to_string()]),
            ),
            ("b".to_string(), AttributeValue::B(Blob::new(b"hi".to_vec()))),
        ]);

        let decoded = item_to_record(&item).unwrap();

        assert_eq!(decoded.get("ss"), Some(&json!(["x", "y"])));
        assert_eq!(decoded.get("ns"), Some(&json!([1, 2.5])));
        assert_eq!(decoded.get("b"), Some(&json!("aGk=")));
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let result = attribute_to_value(&AttributeValue::N("twelve".to_string()));
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[test]
    fn test_item_to_raw() {
        let item: Item = HashMap::from([
            ("postId".to_string(), AttributeValue::S("p1".to_string())),
            (
                "tags".to_string(),
                AttributeValue::L(vec![AttributeValue::N("1".to_string())]),
            ),
            (
                "labels".to_string(),
                AttributeValue::Ss(vec!["a".to_string()]),
            ),
        ]);

        assert_eq!(
            item_to_raw(&item).unwrap(),
            json!({
                "postId": {"S": "p1"},
                "tags": {"L": [{"N": "1"}]},
                "labels": {"SS": ["a"]}
            })
        );
    }

    #[test]
    fn test_stored_record_raw_covers_nested_attributes() {
        let item: Item = HashMap::from([
            ("postId".to_string(), AttributeValue::S("p1".to_string())),
            (
                "meta".to_string(),
                AttributeValue::M(HashMap::from([(
                    "scores".to_string(),
                    AttributeValue::L(vec![
                        AttributeValue::N("1.5".to_string()),
                        AttributeValue::Null(true),
                    ]),
                )])),
            ),
            (
                "blobs".to_string(),
                AttributeValue::Bs(vec![Blob::new(b"hi".to_vec())]),
            ),
        ]);

        let stored = item_to_stored(&item).unwrap();

        assert_eq!(stored.record.get("meta"), Some(&json!({"scores": [1.5, null]})));
        assert_eq!(
            stored.raw,
            json!({
                "postId": {"S": "p1"},
                "meta": {"M": {"scores": {"L": [{"N": "1.5"}, {"NULL": true}]}}},
                "blobs": {"BS": ["aGk="]}
            })
        );
    }

    #[test]
    fn test_raw_matches_core_codec_for_json_values() {
        let original = record(json!({"postId": "p1", "n": 1, "m": {"x": [false]}}));

        assert_eq!(
            item_to_raw(&record_to_item(&original)).unwrap(),
            posts_core::codec::marshall(&original)
        );
    }

    #[test]
    fn test_key_to_post_id() {
        assert_eq!(key_to_post_id(&post_key("p9")), Ok("p9".to_string()));

        let numeric: Item = HashMap::from([(
            "postId".to_string(),
            AttributeValue::N("9".to_string()),
        )]);
        assert!(matches!(
            key_to_post_id(&numeric),
            Err(RepositoryError::InvalidData(_))
        ));
        assert!(matches!(
            key_to_post_id(&HashMap::new()),
            Err(RepositoryError::InvalidData(_))
        ));
    }
}
