//! Pure functions for mapping operation errors to HTTP status codes.

use super::RepositoryError;
use crate::error::PostError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// Every backend fault is reported as 500, whatever its cause: the caller
/// cannot act differently on a throttled request than on a missing table.
///
/// # Examples
///
/// ```
/// use posts_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::TableNotFound("posts".to_string());
/// assert_eq!(repository_error_to_status_code(&error), 500);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::TableNotFound(_)
        | RepositoryError::ConnectionFailed(_)
        | RepositoryError::Throttled(_)
        | RepositoryError::Validation(_)
        | RepositoryError::QueryFailed(_)
        | RepositoryError::InvalidData(_) => 500,
    }
}

/// Maps a [`PostError`] to an HTTP status code.
///
/// - `Request` -> 400 (Bad Request)
/// - `Repository` -> see [`repository_error_to_status_code`]
pub fn post_error_to_status_code(error: &PostError) -> u16 {
    match error {
        PostError::Request(_) => 400,
        PostError::Repository(err) => repository_error_to_status_code(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RequestError;

    #[test]
    fn test_request_errors_map_to_400() {
        let errors = [
            RequestError::MissingPathParameter("postId"),
            RequestError::MalformedBody("EOF".to_string()),
            RequestError::NotAnObject("array"),
            RequestError::MissingPostId,
            RequestError::EmptyUpdate,
        ];
        for error in errors {
            assert_eq!(post_error_to_status_code(&error.into()), 400);
        }
    }

    #[test]
    fn test_repository_errors_map_to_500() {
        let errors = [
            RepositoryError::TableNotFound("posts".to_string()),
            RepositoryError::ConnectionFailed("refused".to_string()),
            RepositoryError::Throttled("slow down".to_string()),
            RepositoryError::Validation("bad key".to_string()),
            RepositoryError::QueryFailed("boom".to_string()),
            RepositoryError::InvalidData("bad number".to_string()),
        ];
        for error in errors {
            assert_eq!(post_error_to_status_code(&error.into()), 500);
        }
    }
}
