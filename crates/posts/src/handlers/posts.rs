//! The five post operations.
//!
//! Each operation parses its event, makes its single repository call, and
//! returns the payload of the success body. [`handle`] wraps any of them into
//! the `{ statusCode, body }` envelope.

use posts_core::storage::PostRepository;
use posts_core::{
    HandlerResponse, Operation, Payload, PostError, PostEvent, RequestError, UpdatePlan,
};

use super::error::failure_response;

pub async fn get_post(repo: &dyn PostRepository, event: &PostEvent) -> Result<Payload, PostError> {
    let post_id = event.post_id()?;
    let stored = repo.get_post(post_id).await?;

    tracing::debug!(post_id, found = stored.is_some(), "Fetched post");

    Ok(Payload::item(stored))
}

pub async fn create_post(
    repo: &dyn PostRepository,
    event: &PostEvent,
) -> Result<Payload, PostError> {
    let record = event.record()?;
    let post_id = record.post_id().ok_or(RequestError::MissingPostId)?;

    let ack = repo.put_post(&record).await?;

    tracing::debug!(post_id, fields = record.len(), "Stored post");

    Ok(Payload::Created { create_result: ack })
}

pub async fn update_post(
    repo: &dyn PostRepository,
    event: &PostEvent,
) -> Result<Payload, PostError> {
    let post_id = event.post_id()?;
    let plan = UpdatePlan::from_record(&event.record()?)?;

    tracing::debug!(
        post_id,
        expression = %plan.expression(),
        fields = plan.clauses().len(),
        "Planned update"
    );

    let ack = repo.update_post(post_id, &plan).await?;

    Ok(Payload::Updated { update_result: ack })
}

pub async fn delete_post(
    repo: &dyn PostRepository,
    event: &PostEvent,
) -> Result<Payload, PostError> {
    let post_id = event.post_id()?;
    let ack = repo.delete_post(post_id).await?;

    tracing::debug!(post_id, "Deleted post");

    Ok(Payload::Deleted { delete_result: ack })
}

pub async fn list_posts(repo: &dyn PostRepository) -> Result<Payload, PostError> {
    let stored = repo.scan_all_posts().await?;

    tracing::debug!(count = stored.len(), "Listed posts");

    Ok(Payload::items(stored))
}

/// Runs `operation` against `event` and renders the response envelope.
pub async fn handle(
    repo: &dyn PostRepository,
    operation: Operation,
    event: PostEvent,
) -> HandlerResponse {
    let outcome = match operation {
        Operation::Get => get_post(repo, &event).await,
        Operation::Create => create_post(repo, &event).await,
        Operation::Update => update_post(repo, &event).await,
        Operation::Delete => delete_post(repo, &event).await,
        Operation::List => list_posts(repo).await,
    };

    match outcome {
        Ok(payload) => {
            tracing::info!(%operation, status = 200, "Operation succeeded");
            HandlerResponse::success(operation, payload)
        }
        Err(err) => failure_response(operation, err),
    }
}
