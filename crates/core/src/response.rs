//! Outbound response envelope.
//!
//! Every invocation answers with `{ statusCode, body }` where `body` is the
//! serialized [`ResponseBody`]: either a success carrying the operation's
//! payload, or a failure carrying diagnostics.

use serde::Serialize;
use serde_json::{json, Value};

use crate::operation::Operation;
use crate::record::Record;
use crate::storage::{StoredRecord, WriteAck};

/// Result payload of a successful operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Item {
        data: Record,
        #[serde(rename = "rawData", skip_serializing_if = "Option::is_none")]
        raw_data: Option<Value>,
    },
    Items {
        data: Vec<Record>,
        #[serde(rename = "rawData")]
        raw_data: Vec<Value>,
    },
    Created {
        #[serde(rename = "createResult")]
        create_result: WriteAck,
    },
    Updated {
        #[serde(rename = "updateResult")]
        update_result: WriteAck,
    },
    Deleted {
        #[serde(rename = "deleteResult")]
        delete_result: WriteAck,
    },
}

impl Payload {
    /// A single lookup result. Absence becomes an empty record.
    pub fn item(stored: Option<StoredRecord>) -> Self {
        match stored {
            Some(StoredRecord { record, raw }) => Payload::Item {
                data: record,
                raw_data: Some(raw),
            },
            None => Payload::Item {
                data: Record::new(),
                raw_data: None,
            },
        }
    }

    pub fn items(stored: Vec<StoredRecord>) -> Self {
        let (data, raw_data) = stored.into_iter().map(|s| (s.record, s.raw)).unzip();
        Payload::Items { data, raw_data }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessBody {
    pub message: String,
    #[serde(flatten)]
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureBody {
    pub message: String,
    pub error_msg: String,
    pub error_stack: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Success(SuccessBody),
    Failure(FailureBody),
}

/// The `{ statusCode, body }` envelope returned by every invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    pub fn success(operation: Operation, payload: Payload) -> Self {
        Self::from_body(
            200,
            &ResponseBody::Success(SuccessBody {
                message: operation.success_message().to_string(),
                payload,
            }),
        )
    }

    pub fn failure(
        operation: Operation,
        status_code: u16,
        error_msg: impl Into<String>,
        error_stack: impl Into<String>,
    ) -> Self {
        Self::from_body(
            status_code,
            &ResponseBody::Failure(FailureBody {
                message: operation.failure_message().to_string(),
                error_msg: error_msg.into(),
                error_stack: error_stack.into(),
            }),
        )
    }

    fn from_body(status_code: u16, body: &ResponseBody) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self { status_code, body },
            Err(err) => Self {
                status_code: 500,
                body: json!({
                    "message": "Failed to serialize response.",
                    "errorMsg": err.to_string(),
                    "errorStack": format!("{err:?}"),
                })
                .to_string(),
            },
        }
    }

    /// Parses the body back into JSON.
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_found_item_includes_raw_data() {
        let stored = StoredRecord {
            record: record(json!({"postId": "p1"})),
            raw: json!({"postId": {"S": "p1"}}),
        };

        let response = HandlerResponse::success(Operation::Get, Payload::item(Some(stored)));

        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.body_json().unwrap(),
            json!({
                "message": "Successfully retrieved post.",
                "data": {"postId": "p1"},
                "rawData": {"postId": {"S": "p1"}}
            })
        );
    }

    #[test]
    fn test_missing_item_is_empty_data_without_raw() {
        let response = HandlerResponse::success(Operation::Get, Payload::item(None));

        assert_eq!(
            response.body_json().unwrap(),
            json!({"message": "Successfully retrieved post.", "data": {}})
        );
    }

    #[test]
    fn test_items_keep_scan_order() {
        let stored = vec![
            StoredRecord {
                record: record(json!({"postId": "a"})),
                raw: json!({"postId": {"S": "a"}}),
            },
            StoredRecord {
                record: record(json!({"postId": "b"})),
                raw: json!({"postId": {"S": "b"}}),
            },
        ];

        let body = HandlerResponse::success(Operation::List, Payload::items(stored))
            .body_json()
            .unwrap();

        assert_eq!(body["data"], json!([{"postId": "a"}, {"postId": "b"}]));
        assert_eq!(
            body["rawData"],
            json!([{"postId": {"S": "a"}}, {"postId": {"S": "b"}}])
        );
    }

    #[test]
    fn test_write_results_use_operation_keys() {
        let ack = WriteAck {
            request_id: Some("req-1".to_string()),
            ..WriteAck::default()
        };

        let created = HandlerResponse::success(
            Operation::Create,
            Payload::Created {
                create_result: ack.clone(),
            },
        );
        let deleted = HandlerResponse::success(
            Operation::Delete,
            Payload::Deleted { delete_result: ack },
        );

        assert_eq!(
            created.body_json().unwrap(),
            json!({
                "message": "Successfully created post.",
                "createResult": {"requestId": "req-1"}
            })
        );
        assert_eq!(
            deleted.body_json().unwrap()["deleteResult"],
            json!({"requestId": "req-1"})
        );
    }

    #[test]
    fn test_failure_body_shape() {
        let response =
            HandlerResponse::failure(Operation::Update, 500, "boom", "boom\n\nCaused by: io");

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body_json().unwrap(),
            json!({
                "message": "Failed to update post.",
                "errorMsg": "boom",
                "errorStack": "boom\n\nCaused by: io"
            })
        );
    }

    #[test]
    fn test_envelope_serializes_camel_case() {
        let response = HandlerResponse {
            status_code: 200,
            body: "{}".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"statusCode": 200, "body": "{}"})
        );
    }
}
