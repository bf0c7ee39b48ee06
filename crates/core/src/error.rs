use thiserror::Error;

use crate::storage::RepositoryError;

/// Errors caused by the caller's input, before any storage call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Missing path parameter: {0}")]
    MissingPathParameter(&'static str),
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Request body must be a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("Record is missing a text `postId` field")]
    MissingPostId,
    #[error("Update body must contain at least one field")]
    EmptyUpdate,
}

/// Failure of a single post operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PostError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_display() {
        assert_eq!(
            RequestError::MissingPathParameter("postId").to_string(),
            "Missing path parameter: postId"
        );
        assert_eq!(
            RequestError::NotAnObject("array").to_string(),
            "Request body must be a JSON object, found array"
        );
    }

    #[test]
    fn test_post_error_is_transparent() {
        let error: PostError = RepositoryError::TableNotFound("posts".to_string()).into();
        assert_eq!(error.to_string(), "Table not found: posts");

        let error: PostError = RequestError::EmptyUpdate.into();
        assert_eq!(
            error.to_string(),
            "Update body must contain at least one field"
        );
    }
}
