//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use posts_core::codec::marshall;
use posts_core::storage::{
    PostRepository, RepositoryError, Result, ScanPage, StoredRecord, WriteAck,
};
use posts_core::{Record, UpdatePlan, POST_ID_FIELD};

const DEFAULT_SCAN_PAGE_SIZE: usize = 100;

/// In-memory storage backend for testing.
///
/// Data is not persisted and will be lost when the repository is dropped.
/// Clones share the same data.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    posts: Arc<RwLock<BTreeMap<String, Record>>>,
    scan_page_size: usize,
    fault: Option<RepositoryError>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            posts: Arc::new(RwLock::new(BTreeMap::new())),
            scan_page_size: DEFAULT_SCAN_PAGE_SIZE,
            fault: None,
        }
    }

    /// Limits how many posts a single scan page returns.
    #[cfg(test)]
    pub fn with_scan_page_size(mut self, size: usize) -> Self {
        self.scan_page_size = size.max(1);
        self
    }

    /// Makes every call fail with `error`.
    #[cfg(test)]
    pub fn with_fault(mut self, error: RepositoryError) -> Self {
        self.fault = Some(error);
        self
    }

    fn check_fault(&self) -> Result<()> {
        match &self.fault {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn stored(record: &Record) -> StoredRecord {
    StoredRecord {
        record: record.clone(),
        raw: marshall(record),
    }
}

#[async_trait]
impl PostRepository for InMemoryRepository {
    async fn get_post(&self, post_id: &str) -> Result<Option<StoredRecord>> {
        self.check_fault()?;
        let posts = self.posts.read().await;
        Ok(posts.get(post_id).map(stored))
    }

    async fn put_post(&self, record: &Record) -> Result<WriteAck> {
        self.check_fault()?;
        let post_id = record.post_id().ok_or_else(|| {
            RepositoryError::Validation(format!(
                "One of the required keys was not given a value: {POST_ID_FIELD}"
            ))
        })?;

        let mut posts = self.posts.write().await;
        posts.insert(post_id.to_string(), record.clone());
        Ok(WriteAck::default())
    }

    async fn update_post(&self, post_id: &str, plan: &UpdatePlan) -> Result<WriteAck> {
        self.check_fault()?;
        if plan.touches(POST_ID_FIELD) {
            return Err(RepositoryError::Validation(format!(
                "Cannot update attribute {POST_ID_FIELD}. This attribute is part of the key"
            )));
        }

        let mut posts = self.posts.write().await;
        let record = posts.entry(post_id.to_string()).or_insert_with(|| {
            let mut record = Record::new();
            record.insert(POST_ID_FIELD, post_id.into());
            record
        });
        plan.apply_to(record);

        Ok(WriteAck {
            attributes: Some(record.clone()),
            ..WriteAck::default()
        })
    }

    async fn delete_post(&self, post_id: &str) -> Result<WriteAck> {
        self.check_fault()?;
        let mut posts = self.posts.write().await;
        posts.remove(post_id);
        Ok(WriteAck::default())
    }

    async fn scan_posts(&self, exclusive_start_key: Option<&str>) -> Result<ScanPage> {
        self.check_fault()?;
        let posts = self.posts.read().await;

        let lower = match exclusive_start_key {
            Some(key) => Bound::Excluded(key),
            None => Bound::Unbounded,
        };
        let mut remaining = posts.range::<str, _>((lower, Bound::Unbounded));

        let items: Vec<StoredRecord> = remaining
            .by_ref()
            .take(self.scan_page_size)
            .map(|(_, record)| stored(record))
            .collect();

        let last_evaluated_key = match remaining.next() {
            Some(_) => items
                .last()
                .and_then(|s| s.record.post_id())
                .map(str::to_string),
            None => None,
        };

        Ok(ScanPage {
            items,
            last_evaluated_key,
        })
    }
}
