mod common;

use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use common::{BoxedError, StubServer};
use frame_art_sdk::{
    openai::{OpenAIImageModel, OpenAIImageModelOptions},
    ImageGenerationInput, ImageModel, ServiceError,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

fn image_model(server: &StubServer) -> OpenAIImageModel {
    OpenAIImageModel::new(
        "dall-e-3",
        OpenAIImageModelOptions {
            base_url: Some(format!("{}/v1/", server.url())),
            api_key: "sk-test".to_string(),
            ..Default::default()
        },
    )
}

#[tokio::test]
async fn generate_requests_one_hd_image_and_returns_its_url() -> Result<(), BoxedError> {
    let captured: Arc<Mutex<Vec<(Option<String>, Value)>>> = Arc::default();
    let recorder = captured.clone();
    let router = Router::new().route(
        "/v1/images/generations",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|value| value.to_str().ok())
                    .map(ToString::to_string);
                recorder.lock().unwrap().push((auth, body));
                Json(json!({
                    "created": 1_700_000_000,
                    "data": [{
                        "url": "https://images.example.com/sunset.png",
                        "revised_prompt": "A sunset over the ocean, oil on canvas"
                    }]
                }))
            }
        }),
    );
    let server = StubServer::start(router).await?;

    let response = image_model(&server)
        .generate(ImageGenerationInput::hd("Sunset ocean, oil on canvas"))
        .await?;

    assert_eq!(response.images.len(), 1);
    assert_eq!(response.images[0].url, "https://images.example.com/sunset.png");
    assert_eq!(
        response.images[0].revised_prompt.as_deref(),
        Some("A sunset over the ocean, oil on canvas")
    );

    let captured = captured.lock().unwrap().clone();
    assert_eq!(captured.len(), 1);
    let (auth, body) = &captured[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(body["model"], "dall-e-3");
    assert_eq!(body["prompt"], "Sunset ocean, oil on canvas");
    assert_eq!(body["quality"], "hd");
    assert_eq!(body["n"], 1);

    server.stop().await
}

#[tokio::test]
async fn generate_surfaces_non_success_status() -> Result<(), BoxedError> {
    let router = Router::new().route(
        "/v1/images/generations",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": {"message": "content policy violation"}})),
            )
        }),
    );
    let server = StubServer::start(router).await?;

    let result = image_model(&server)
        .generate(ImageGenerationInput::hd("anything"))
        .await;

    match result {
        Err(ServiceError::StatusCode(status, body)) => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body.contains("content policy violation"));
        }
        other => panic!("expected status error, got {other:?}"),
    }

    server.stop().await
}

#[tokio::test]
async fn generate_rejects_response_without_images() -> Result<(), BoxedError> {
    let router = Router::new().route(
        "/v1/images/generations",
        post(|| async { Json(json!({"created": 1, "data": []})) }),
    );
    let server = StubServer::start(router).await?;

    let result = image_model(&server)
        .generate(ImageGenerationInput::hd("anything"))
        .await;

    assert!(matches!(result, Err(ServiceError::Invariant("openai", _))));

    server.stop().await
}
