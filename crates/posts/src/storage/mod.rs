//! Storage backend implementations.
//!
//! This module provides concrete implementations of the
//! [`PostRepository`](posts_core::storage::PostRepository) trait:
//!
//! - [`dynamodb`]: the deployed backend, using `aws-sdk-dynamodb`
//! - [`inmemory`]: a `BTreeMap` behind a lock, for tests and local runs

pub mod dynamodb;
pub mod inmemory;

pub use dynamodb::DynamoDbRepository;
pub use inmemory::InMemoryRepository;
