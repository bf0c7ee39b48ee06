//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the repository trait
//! using `aws-sdk-dynamodb`. The table has a single string partition key,
//! `postId`, and no sort key.

mod client;
mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbRepository;
