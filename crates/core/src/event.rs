//! Inbound request envelope.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::record::{Record, POST_ID_FIELD};

/// The event a single invocation receives.
///
/// Mirrors the proxy-integration event shape: `pathParameters` may be
/// `null` or missing, and `body` is the raw request text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostEvent {
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

impl PostEvent {
    pub fn with_post_id(mut self, post_id: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert(POST_ID_FIELD.to_string(), post_id.into());
        self
    }

    /// Sets the body. An empty string counts as no body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.body = (!body.is_empty()).then_some(body);
        self
    }

    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }

    /// The `postId` path parameter.
    pub fn post_id(&self) -> Result<&str, RequestError> {
        self.path_parameter(POST_ID_FIELD)
            .ok_or(RequestError::MissingPathParameter(POST_ID_FIELD))
    }

    /// The body parsed as a record.
    pub fn record(&self) -> Result<Record, RequestError> {
        Record::parse_body(self.body.as_deref())
    }
}
