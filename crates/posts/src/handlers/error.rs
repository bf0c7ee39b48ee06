use posts_core::storage::post_error_to_status_code;
use posts_core::{HandlerResponse, Operation, PostError};

/// Renders a failed operation as its `{ statusCode, body }` envelope.
///
/// `errorMsg` is the error's own message. `errorStack` is the full report:
/// the message, every cause, and a backtrace when `RUST_BACKTRACE` is set.
pub fn failure_response(operation: Operation, err: PostError) -> HandlerResponse {
    let status_code = post_error_to_status_code(&err);
    let report = anyhow::Error::new(err);

    if status_code >= 500 {
        tracing::error!(%operation, status = status_code, error = %report, "Operation failed");
    } else {
        tracing::warn!(%operation, status = status_code, error = %report, "Rejected request");
    }

    HandlerResponse::failure(
        operation,
        status_code,
        report.to_string(),
        format!("{report:?}"),
    )
}
