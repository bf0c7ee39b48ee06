use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::livez,
        http::{create_post, delete_post, get_post, list_posts, update_post},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/livez", get(livez))
        .route("/post", post(create_post))
        .route(
            "/post/{postId}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/posts", get(list_posts))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::storage::InMemoryRepository;
    use posts_core::storage::RepositoryError;

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_livez() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(Request::builder().uri("/livez").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_crud_over_http() {
        let app = create_app(AppState::default());

        let (status, body) = send(
            &app,
            Method::POST,
            "/post",
            Some(json!({"postId": "p1", "title": "First", "views": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Successfully created post.");

        let (status, body) = send(
            &app,
            Method::PUT,
            "/post/p1",
            Some(json!({"views": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Successfully updated post.");

        let (status, body) = send(&app, Method::GET, "/post/p1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"],
            json!({"postId": "p1", "title": "First", "views": 10})
        );

        let (status, body) = send(&app, Method::GET, "/posts", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (status, _) = send(&app, Method::DELETE, "/post/p1", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, "/post/p1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!({}));
    }

    #[tokio::test]
    async fn test_create_without_body_is_bad_request() {
        let app = create_app(AppState::default());

        let (status, body) = send(&app, Method::POST, "/post", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Failed to post post.");
    }

    #[tokio::test]
    async fn test_backend_fault_is_internal_server_error() {
        let repo = InMemoryRepository::new()
            .with_fault(RepositoryError::TableNotFound("posts".to_string()));
        let app = create_app(AppState::new(Arc::new(repo)));

        let (status, body) = send(&app, Method::GET, "/posts", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to retrieve all post.");
        assert_eq!(body["errorMsg"], "Table not found: posts");
    }
}
