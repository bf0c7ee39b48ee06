use serde::Serialize;
use serde_json::Value;

use crate::record::Record;

/// A record as read from storage, alongside its storage-native encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub record: Record,
    pub raw: Value,
}

/// One page of a full-table scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanPage {
    pub items: Vec<StoredRecord>,
    /// `postId` to resume after, or `None` when the scan is complete.
    pub last_evaluated_key: Option<String>,
}

/// Acknowledgment of a write, reported back to the caller verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteAck {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity_units: Option<f64>,
    /// Item attributes after the write, when the backend returns them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Record>,
}
