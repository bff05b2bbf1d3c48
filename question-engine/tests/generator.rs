use std::sync::Arc;

use ai_llm_service::{LlmModelConfig, LlmProvider, LlmService};
use question_engine::{AnswerType, DocumentError, QuestionEngineError, QuestionGenerator};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn generator(server: &MockServer) -> QuestionGenerator {
    let cfg = LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: "llama-3.3-70b-versatile".into(),
        endpoint: server.uri(),
        api_key: Some("gsk_test".into()),
        max_tokens: None,
        temperature: Some(0.7),
        top_p: None,
        timeout_secs: Some(5),
        json_mode: true,
    };
    QuestionGenerator::new(Arc::new(LlmService::new(cfg, Some(2)).unwrap()))
}

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [ { "message": { "role": "assistant", "content": content } } ]
    }))
}

#[tokio::test]
async fn topic_prompt_reaches_the_model_and_questions_come_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains(
            "Generate 3 Medium level Short Answer questions",
        ))
        .and(body_string_contains("Binary Search Trees"))
        .and(body_string_contains("Act as a strict teacher."))
        .respond_with(completion(
            r#"{"questions":["What is a BST?","Define tree height.","What is in-order traversal?"]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let questions = generator(&server)
        .from_topic("Binary Search Trees", 3, AnswerType::ShortAnswer)
        .await
        .unwrap();
    assert_eq!(
        questions,
        vec![
            "What is a BST?",
            "Define tree height.",
            "What is in-order traversal?"
        ]
    );
}

#[tokio::test]
async fn invalid_requests_never_call_the_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(completion(r#"{"questions":["Q"]}"#))
        .expect(0)
        .mount(&server)
        .await;

    let generator = generator(&server);
    let empty = generator
        .from_topic("   ", 5, AnswerType::ShortAnswer)
        .await
        .unwrap_err();
    assert!(matches!(empty, QuestionEngineError::InvalidRequest(_)));

    let too_many = generator
        .from_topic("Java Thread Lifecycle", 51, AnswerType::LongAnswer)
        .await
        .unwrap_err();
    assert!(matches!(too_many, QuestionEngineError::InvalidRequest(_)));

    let not_pdf = generator
        .from_document(b"plain text".to_vec(), 5, AnswerType::ShortAnswer)
        .await
        .unwrap_err();
    assert!(matches!(
        not_pdf,
        QuestionEngineError::Document(DocumentError::Parse(_))
    ));
}

#[tokio::test]
async fn unusable_model_answer_is_malformed_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(completion("I cannot help with that."))
        .mount(&server)
        .await;

    let err = generator(&server)
        .from_topic("Photosynthesis", 2, AnswerType::LongAnswer)
        .await
        .unwrap_err();
    assert!(matches!(err, QuestionEngineError::MalformedOutput(_)));
}

#[tokio::test]
async fn provider_failure_is_an_llm_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = generator(&server)
        .from_topic("Photosynthesis", 2, AnswerType::ShortAnswer)
        .await
        .unwrap_err();
    assert!(matches!(err, QuestionEngineError::Llm(_)));
}
