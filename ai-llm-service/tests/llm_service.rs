use ai_llm_service::{
    AiLlmError, LlmModelConfig, LlmProvider, LlmService,
    error_handler::{ProviderError, ProviderErrorKind},
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn openai_cfg(server: &MockServer) -> LlmModelConfig {
    LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: "llama-3.3-70b-versatile".into(),
        endpoint: server.uri(),
        api_key: Some("gsk_test".into()),
        max_tokens: None,
        temperature: Some(0.7),
        top_p: None,
        timeout_secs: Some(5),
        json_mode: true,
    }
}

#[tokio::test]
async fn openai_generate_sends_json_mode_and_returns_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer gsk_test"))
        .and(body_partial_json(json!({
            "model": "llama-3.3-70b-versatile",
            "response_format": { "type": "json_object" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [ { "message": { "role": "assistant", "content": "{\"questions\":[\"Q1\"]}" } } ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let svc = LlmService::new(openai_cfg(&server), Some(2)).unwrap();
    let out = svc.generate("prompt", Some("system")).await.unwrap();
    assert_eq!(out, "{\"questions\":[\"Q1\"]}");
}

#[tokio::test]
async fn openai_non_success_maps_to_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let svc = LlmService::new(openai_cfg(&server), Some(2)).unwrap();
    let err = svc.generate("prompt", None).await.unwrap_err();
    match err {
        AiLlmError::Provider(ProviderError {
            kind: ProviderErrorKind::HttpStatus(http),
            ..
        }) => {
            assert_eq!(http.status.as_u16(), 429);
            assert_eq!(http.snippet, "rate limited");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn openai_empty_choices_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let svc = LlmService::new(openai_cfg(&server), Some(2)).unwrap();
    let err = svc.generate("prompt", None).await.unwrap_err();
    assert!(matches!(
        err,
        AiLlmError::Provider(ProviderError {
            kind: ProviderErrorKind::EmptyChoices,
            ..
        })
    ));
}

#[tokio::test]
async fn ollama_generate_uses_json_format() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({ "model": "qwen3:14b", "format": "json", "stream": false })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "{\"questions\":[]}", "done": true })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cfg = LlmModelConfig {
        provider: LlmProvider::Ollama,
        model: "qwen3:14b".into(),
        api_key: None,
        ..openai_cfg(&server)
    };
    let svc = LlmService::new(cfg, Some(2)).unwrap();
    assert_eq!(svc.generate("prompt", None).await.unwrap(), "{\"questions\":[]}");
}

#[tokio::test]
async fn health_reports_model_availability() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [ { "id": "llama-3.3-70b-versatile" }, { "id": "other" } ]
        })))
        .mount(&server)
        .await;

    let svc = LlmService::new(openai_cfg(&server), Some(2)).unwrap();
    let status = svc.health().await;
    assert!(status.ok);
    assert_eq!(status.provider, "OpenAI");
    assert_eq!(status.model.as_deref(), Some("llama-3.3-70b-versatile"));
}

#[tokio::test]
async fn health_never_fails_on_unreachable_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let svc = LlmService::new(openai_cfg(&server), Some(2)).unwrap();
    let status = svc.health().await;
    assert!(!status.ok);
    assert!(status.message.contains("503"));
}
