//! DynamoDB repository implementation.
//!
//! Implements [`PostRepository`] with one SDK call per operation.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::RequestId;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnConsumedCapacity, ReturnValue};
use aws_sdk_dynamodb::Client;

use posts_core::storage::{PostRepository, Result, ScanPage, StoredRecord, WriteAck};
use posts_core::{Record, UpdatePlan};

use super::client::shared_client;
use super::conversions::{
    item_to_record, item_to_stored, key_to_post_id, post_key, record_to_item, value_to_attribute,
};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error,
    map_update_item_error,
};
use crate::config::Config;

/// DynamoDB-based repository implementation.
///
/// Holds only configuration; the SDK client is the process-wide one,
/// created lazily by the first call.
#[derive(Debug, Clone)]
pub struct DynamoDbRepository {
    config: Config,
}

impl DynamoDbRepository {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.config.table_name
    }

    async fn client(&self) -> &'static Client {
        shared_client(&self.config).await
    }
}

#[async_trait]
impl PostRepository for DynamoDbRepository {
    async fn get_post(&self, post_id: &str) -> Result<Option<StoredRecord>> {
        let output = self
            .client()
            .await
            .get_item()
            .table_name(self.table_name())
            .set_key(Some(post_key(post_id)))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, self.table_name()))?;

        output.item.as_ref().map(item_to_stored).transpose()
    }

    async fn put_post(&self, record: &Record) -> Result<WriteAck> {
        let output = self
            .client()
            .await
            .put_item()
            .table_name(self.table_name())
            .set_item(Some(record_to_item(record)))
            .return_consumed_capacity(ReturnConsumedCapacity::Total)
            .send()
            .await
            .map_err(|e| map_put_item_error(e, self.table_name()))?;

        Ok(WriteAck {
            request_id: output.request_id().map(str::to_string),
            consumed_capacity_units: output.consumed_capacity().and_then(|c| c.capacity_units()),
            attributes: None,
        })
    }

    async fn update_post(&self, post_id: &str, plan: &UpdatePlan) -> Result<WriteAck> {
        let names: HashMap<String, String> = plan.attribute_names().into_iter().collect();
        let values: HashMap<String, AttributeValue> = plan
            .attribute_values()
            .iter()
            .map(|(placeholder, value)| (placeholder.clone(), value_to_attribute(value)))
            .collect();

        let output = self
            .client()
            .await
            .update_item()
            .table_name(self.table_name())
            .set_key(Some(post_key(post_id)))
            .update_expression(plan.expression())
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .return_values(ReturnValue::AllNew)
            .return_consumed_capacity(ReturnConsumedCapacity::Total)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, self.table_name()))?;

        Ok(WriteAck {
            request_id: output.request_id().map(str::to_string),
            consumed_capacity_units: output.consumed_capacity().and_then(|c| c.capacity_units()),
            attributes: output.attributes.as_ref().map(item_to_record).transpose()?,
        })
    }

    async fn delete_post(&self, post_id: &str) -> Result<WriteAck> {
        let output = self
            .client()
            .await
            .delete_item()
            .table_name(self.table_name())
            .set_key(Some(post_key(post_id)))
            .return_consumed_capacity(ReturnConsumedCapacity::Total)
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, self.table_name()))?;

        Ok(WriteAck {
            request_id: output.request_id().map(str::to_string),
            consumed_capacity_units: output.consumed_capacity().and_then(|c| c.capacity_units()),
            attributes: None,
        })
    }

    async fn scan_posts(&self, exclusive_start_key: Option<&str>) -> Result<ScanPage> {
        let output = self
            .client()
            .await
            .scan()
            .table_name(self.table_name())
            .set_exclusive_start_key(exclusive_start_key.map(post_key))
            .send()
            .await
            .map_err(|e| map_scan_error(e, self.table_name()))?;

        let last_evaluated_key = output
            .last_evaluated_key
            .as_ref()
            .map(key_to_post_id)
            .transpose()?;

        let items = output
            .items
            .unwrap_or_default()
            .iter()
            .map(item_to_stored)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            table = %self.table_name(),
            count = items.len(),
            has_more = last_evaluated_key.is_some(),
            "Scanned page"
        );

        Ok(ScanPage {
            items,
            last_evaluated_key,
        })
    }
}
