//! HTTP adapters for local development.
//!
//! Each route turns the axum request into the same [`PostEvent`] the
//! function receives when deployed, so both surfaces share one code path.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use posts_core::{HandlerResponse, Operation, PostEvent};

use super::posts::handle;
use crate::state::AppState;

/// GET /post/{postId}
pub async fn get_post(State(state): State<AppState>, Path(post_id): Path<String>) -> Response {
    respond(&state, Operation::Get, PostEvent::default().with_post_id(post_id)).await
}

/// POST /post
pub async fn create_post(State(state): State<AppState>, body: String) -> Response {
    respond(&state, Operation::Create, PostEvent::default().with_body(body)).await
}

/// PUT /post/{postId}
pub async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    body: String,
) -> Response {
    let event = PostEvent::default().with_post_id(post_id).with_body(body);
    respond(&state, Operation::Update, event).await
}

/// DELETE /post/{postId}
pub async fn delete_post(State(state): State<AppState>, Path(post_id): Path<String>) -> Response {
    respond(&state, Operation::Delete, PostEvent::default().with_post_id(post_id)).await
}

/// GET /posts
pub async fn list_posts(State(state): State<AppState>) -> Response {
    respond(&state, Operation::List, PostEvent::default()).await
}

async fn respond(state: &AppState, operation: Operation, event: PostEvent) -> Response {
    to_http_response(handle(state.repo.as_ref(), operation, event).await)
}

/// Converts the function envelope into an HTTP response.
pub fn to_http_response(response: HandlerResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        response.body,
    )
        .into_response()
}
