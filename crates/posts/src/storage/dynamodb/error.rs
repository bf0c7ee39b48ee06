//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `posts_core::storage`.

use std::error::Error;
use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use posts_core::storage::RepositoryError;

/// Map a GetItem SDK error to RepositoryError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
    table_name: &str,
) -> RepositoryError {
    if let Some(mapped) = map_transport_error(&err) {
        return mapped;
    }
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(e) => {
            RepositoryError::TableNotFound(format!("{table_name} ({e})"))
        }
        GetItemError::ProvisionedThroughputExceededException(e) => {
            RepositoryError::Throttled(e.to_string())
        }
        GetItemError::RequestLimitExceeded(e) => RepositoryError::Throttled(e.to_string()),
        GetItemError::InternalServerError(e) => RepositoryError::QueryFailed(e.to_string()),
        err => map_unmodeled_error(err, "GetItem"),
    }
}

/// Map a PutItem SDK error to RepositoryError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table_name: &str,
) -> RepositoryError {
    if let Some(mapped) = map_transport_error(&err) {
        return mapped;
    }
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(e) => {
            RepositoryError::TableNotFound(format!("{table_name} ({e})"))
        }
        PutItemError::ProvisionedThroughputExceededException(e) => {
            RepositoryError::Throttled(e.to_string())
        }
        PutItemError::RequestLimitExceeded(e) => RepositoryError::Throttled(e.to_string()),
        PutItemError::ItemCollectionSizeLimitExceededException(e) => {
            RepositoryError::QueryFailed(e.to_string())
        }
        PutItemError::TransactionConflictException(e) => {
            RepositoryError::QueryFailed(e.to_string())
        }
        PutItemError::InternalServerError(e) => RepositoryError::QueryFailed(e.to_string()),
        err => map_unmodeled_error(err, "PutItem"),
    }
}

/// Map an UpdateItem SDK error to RepositoryError.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    table_name: &str,
) -> RepositoryError {
    if let Some(mapped) = map_transport_error(&err) {
        return mapped;
    }
    match err.into_service_error() {
        UpdateItemError::ResourceNotFoundException(e) => {
            RepositoryError::TableNotFound(format!("{table_name} ({e})"))
        }
        UpdateItemError::ProvisionedThroughputExceededException(e) => {
            RepositoryError::Throttled(e.to_string())
        }
        UpdateItemError::RequestLimitExceeded(e) => RepositoryError::Throttled(e.to_string()),
        UpdateItemError::ItemCollectionSizeLimitExceededException(e) => {
            RepositoryError::QueryFailed(e.to_string())
        }
        UpdateItemError::TransactionConflictException(e) => {
            RepositoryError::QueryFailed(e.to_string())
        }
        UpdateItemError::InternalServerError(e) => RepositoryError::QueryFailed(e.to_string()),
        err => map_unmodeled_error(err, "UpdateItem"),
    }
}

/// Map a DeleteItem SDK error to RepositoryError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    table_name: &str,
) -> RepositoryError {
    if let Some(mapped) = map_transport_error(&err) {
        return mapped;
    }
    match err.into_service_error() {
        DeleteItemError::ResourceNotFoundException(e) => {
            RepositoryError::TableNotFound(format!("{table_name} ({e})"))
        }
        DeleteItemError::ProvisionedThroughputExceededException(e) => {
            RepositoryError::Throttled(e.to_string())
        }
        DeleteItemError::RequestLimitExceeded(e) => RepositoryError::Throttled(e.to_string()),
        DeleteItemError::ItemCollectionSizeLimitExceededException(e) => {
            RepositoryError::QueryFailed(e.to_string())
        }
        DeleteItemError::TransactionConflictException(e) => {
            RepositoryError::QueryFailed(e.to_string())
        }
        DeleteItemError::InternalServerError(e) => RepositoryError::QueryFailed(e.to_string()),
        err => map_unmodeled_error(err, "DeleteItem"),
    }
}

/// Map a Scan SDK error to RepositoryError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
    table_name: &str,
) -> RepositoryError {
    if let Some(mapped) = map_transport_error(&err) {
        return mapped;
    }
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(e) => {
            RepositoryError::TableNotFound(format!("{table_name} ({e})"))
        }
        ScanError::ProvisionedThroughputExceededException(e) => {
            RepositoryError::Throttled(e.to_string())
        }
        ScanError::RequestLimitExceeded(e) => RepositoryError::Throttled(e.to_string()),
        ScanError::InternalServerError(e) => RepositoryError::QueryFailed(e.to_string()),
        err => map_unmodeled_error(err, "Scan"),
    }
}

/// Requests that never got a service response.
fn map_transport_error<E, R>(err: &SdkError<E, R>) -> Option<RepositoryError>
where
    E: Error + 'static,
    R: Debug,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => Some(
            RepositoryError::ConnectionFailed(DisplayErrorContext(err).to_string()),
        ),
        _ => None,
    }
}

/// Service errors without a modeled variant, classified by error code.
fn map_unmodeled_error<E>(err: E, operation: &str) -> RepositoryError
where
    E: Error + ProvideErrorMetadata,
{
    let message = err.message().unwrap_or("no message").to_string();
    match err.code() {
        Some("ValidationException") => RepositoryError::Validation(message),
        Some("ThrottlingException") => RepositoryError::Throttled(message),
        _ => RepositoryError::QueryFailed(format!(
            "{operation} failed: {}",
            DisplayErrorContext(&err)
        )),
    }
}
