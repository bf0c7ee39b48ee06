use async_trait::async_trait;

use crate::record::Record;
use crate::update::UpdatePlan;

use super::{RepositoryError, Result, ScanPage, StoredRecord, WriteAck};

/// Single-table key-value access for posts, keyed by `postId`.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Gets a post by its key. Absence is `Ok(None)`.
    async fn get_post(&self, post_id: &str) -> Result<Option<StoredRecord>>;

    /// Writes a post unconditionally, replacing any post with the same key.
    async fn put_post(&self, record: &Record) -> Result<WriteAck>;

    /// Applies a partial update, creating the post if it does not exist.
    async fn update_post(&self, post_id: &str, plan: &UpdatePlan) -> Result<WriteAck>;

    /// Deletes a post. Deleting an absent key succeeds.
    async fn delete_post(&self, post_id: &str) -> Result<WriteAck>;

    /// Reads one page of the table, resuming after `exclusive_start_key`.
    async fn scan_posts(&self, exclusive_start_key: Option<&str>) -> Result<ScanPage>;

    /// Reads the whole table, following continuation keys until exhausted.
    async fn scan_all_posts(&self) -> Result<Vec<StoredRecord>> {
        let mut items = Vec::new();
        let mut start_key: Option<String> = None;

        loop {
            let page = self.scan_posts(start_key.as_deref()).await?;
            items.extend(page.items);

            match page.last_evaluated_key {
                Some(next) if start_key.as_deref() == Some(next.as_str()) => {
                    return Err(RepositoryError::QueryFailed(format!(
                        "Scan did not advance past key {next}"
                    )));
                }
                Some(next) => start_key = Some(next),
                None => return Ok(items),
            }
        }
    }
}
