//! Serverless entry point.
//!
//! One binary serves all five functions; each deployment picks its
//! operation. The platform invokes the handler once per request and may
//! reuse the process, together with its DynamoDB client, across invocations.

use std::sync::Arc;

use lambda_runtime::{service_fn, LambdaEvent};
use tracing::Instrument;

use posts_core::storage::PostRepository;
use posts_core::{HandlerResponse, Operation, PostEvent, POST_ID_FIELD};

use crate::handlers::handle;

/// Runs the invocation loop until the platform shuts the process down.
pub async fn run(
    repo: Arc<dyn PostRepository>,
    operation: Operation,
) -> Result<(), lambda_runtime::Error> {
    tracing::info!(%operation, "Starting function");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<PostEvent>| {
        let repo = Arc::clone(&repo);
        async move { invoke(repo.as_ref(), operation, event).await }
    }))
    .await
}

async fn invoke(
    repo: &dyn PostRepository,
    operation: Operation,
    event: LambdaEvent<PostEvent>,
) -> Result<HandlerResponse, lambda_runtime::Error> {
    let (payload, context) = event.into_parts();
    let span = tracing::info_span!("invocation", request_id = %context.request_id, %operation);

    async move {
        tracing::debug!(
            post_id = payload.path_parameter(POST_ID_FIELD),
            has_body = payload.body.is_some(),
            "Received event"
        );

        Ok(handle(repo, operation, payload).await)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::storage::InMemoryRepository;

    fn lambda_event(payload: serde_json::Value) -> LambdaEvent<PostEvent> {
        LambdaEvent::new(
            serde_json::from_value(payload).unwrap(),
            lambda_runtime::Context::default(),
        )
    }

    #[tokio::test]
    async fn test_invoke_with_proxy_event() {
        let repo = InMemoryRepository::new();

        let created = invoke(
            &repo,
            Operation::Create,
            lambda_event(json!({
                "pathParameters": null,
                "body": "{\"postId\":\"p1\",\"title\":\"Hi\"}"
            })),
        )
        .await
        .unwrap();
        assert_eq!(created.status_code, 200);

        let fetched = invoke(
            &repo,
            Operation::Get,
            lambda_event(json!({"pathParameters": {"postId": "p1"}})),
        )
        .await
        .unwrap();

        assert_eq!(fetched.status_code, 200);
        assert_eq!(
            fetched.body_json().unwrap()["data"],
            json!({"postId": "p1", "title": "Hi"})
        );
    }

    #[test]
    fn test_response_envelope_shape() {
        let response = HandlerResponse {
            status_code: 500,
            body: "{}".to_string(),
        };

        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({"statusCode": 500, "body": "{}"})
        );
    }
}
