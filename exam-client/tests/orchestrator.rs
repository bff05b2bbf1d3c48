use std::time::Duration;

use exam_client::orchestrator::{GENERIC_ERROR_MESSAGE, MISSING_FILE_MESSAGE};
use exam_client::{
    AnswerType, DocumentUpload, ExamApiClient, InputMode, Phase, RequestOrchestrator,
    SubmitOutcome,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn orchestrator(server: &MockServer) -> RequestOrchestrator {
    RequestOrchestrator::new(ExamApiClient::new(server.uri()).unwrap())
}

fn questions(list: &[&str]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "questions": list }))
}

#[tokio::test]
async fn topic_submission_sends_one_json_post_and_renders_numbered_questions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "topic": "Binary Search Trees",
            "count": 3,
            "type": "Short Answer"
        })))
        .respond_with(questions(&["Q1", "Q2", "Q3"]))
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(&server);
    orch.set_topic("Binary Search Trees");
    orch.set_count(3);
    orch.set_answer_type(AnswerType::ShortAnswer);

    assert_eq!(orch.submit().await, SubmitOutcome::Populated);
    let state = orch.snapshot();
    assert_eq!(state.numbered(), vec!["1. Q1", "2. Q2", "3. Q3"]);
    assert_eq!(state.error, None);
    assert!(!state.loading);
    assert_eq!(state.phase(), Phase::Populated);
}

#[tokio::test]
async fn document_mode_without_file_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(questions(&["Q1"]))
        .expect(0)
        .mount(&server)
        .await;

    let orch = orchestrator(&server);
    orch.set_mode(InputMode::Document);

    assert_eq!(orch.submit().await, SubmitOutcome::MissingFile);
    let state = orch.snapshot();
    assert_eq!(state.error.as_deref(), Some(MISSING_FILE_MESSAGE));
    assert_eq!(state.error.as_deref(), Some("Please upload a PDF file here first."));
    assert!(state.questions.is_empty());
    assert!(!state.loading);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn document_submission_is_multipart_to_the_pdf_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-pdf"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"file\"; filename=\"notes.pdf\""))
        .and(body_string_contains("%PDF-1.4 fake body"))
        .and(body_string_contains("Long Answer"))
        .respond_with(questions(&["Explain the Krebs cycle."]))
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(&server);
    orch.set_mode(InputMode::Document);
    orch.select_file(DocumentUpload::new("notes.pdf", b"%PDF-1.4 fake body".to_vec()));
    orch.set_count(1);
    orch.set_answer_type(AnswerType::LongAnswer);

    assert_eq!(orch.submit().await, SubmitOutcome::Populated);
    assert_eq!(orch.snapshot().questions, vec!["Explain the Krebs cycle."]);
}

#[tokio::test]
async fn any_quiz_id_shape_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 42, "questions": ["Q1", "Q2"] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(&server);
    orch.set_topic("Binary Search Trees");

    assert_eq!(orch.submit().await, SubmitOutcome::Populated);
    let state = orch.snapshot();
    assert_eq!(state.questions, vec!["Q1", "Q2"]);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn non_ok_status_shows_generic_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(&server);
    orch.set_topic("Java Thread Lifecycle");

    assert_eq!(orch.submit().await, SubmitOutcome::Failed);
    let state = orch.snapshot();
    assert_eq!(state.error.as_deref(), Some(GENERIC_ERROR_MESSAGE));
    assert!(state.questions.is_empty());
    assert!(!state.loading);
    assert_eq!(state.phase(), Phase::Failed);
}

#[tokio::test]
async fn malformed_body_shows_generic_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let orch = orchestrator(&server);
    orch.set_topic("Photosynthesis");

    assert_eq!(orch.submit().await, SubmitOutcome::Failed);
    assert_eq!(orch.snapshot().error.as_deref(), Some(GENERIC_ERROR_MESSAGE));
}

#[tokio::test]
async fn unreachable_backend_shows_generic_error() {
    // Bind then drop to get a port nobody listens on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let orch = RequestOrchestrator::new(
        ExamApiClient::new(format!("http://127.0.0.1:{port}")).unwrap(),
    );
    orch.set_topic("Photosynthesis");

    assert_eq!(orch.submit().await, SubmitOutcome::Failed);
    let state = orch.snapshot();
    assert_eq!(state.error.as_deref(), Some(GENERIC_ERROR_MESSAGE));
    assert!(!state.loading);
}

#[tokio::test]
async fn mode_switch_keeps_results_until_next_submission() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(questions(&["Q1", "Q2"]))
        .mount(&server)
        .await;

    let orch = orchestrator(&server);
    orch.set_topic("Binary Search Trees");
    assert_eq!(orch.submit().await, SubmitOutcome::Populated);

    orch.set_mode(InputMode::Document);
    let state = orch.snapshot();
    assert_eq!(state.mode, InputMode::Document);
    assert_eq!(state.questions, vec!["Q1", "Q2"]);

    assert_eq!(orch.submit().await, SubmitOutcome::MissingFile);
    assert!(orch.snapshot().questions.is_empty());
}

#[tokio::test]
async fn next_submission_clears_previous_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(questions(&["Q1"]))
        .mount(&server)
        .await;

    let orch = orchestrator(&server);
    orch.set_topic("Binary Search Trees");
    assert_eq!(orch.submit().await, SubmitOutcome::Failed);
    assert_eq!(orch.submit().await, SubmitOutcome::Populated);

    let state = orch.snapshot();
    assert_eq!(state.error, None);
    assert_eq!(state.questions, vec!["Q1"]);
}

#[tokio::test]
async fn concurrent_submit_is_refused_while_one_is_in_flight() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(questions(&["Q1"]).set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&server)
        .await;

    let orch = orchestrator(&server);
    orch.set_topic("Binary Search Trees");

    let (first, (loading_seen, second)) = tokio::join!(orch.submit(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let loading = orch.snapshot().loading;
        (loading, orch.submit().await)
    });

    assert_eq!(first, SubmitOutcome::Populated);
    assert!(loading_seen);
    assert_eq!(second, SubmitOutcome::AlreadyInFlight);

    let state = orch.snapshot();
    assert!(!state.loading);
    assert_eq!(state.questions, vec!["Q1"]);
}
