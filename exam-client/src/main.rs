use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use exam_client::model::numbered;
use exam_client::{
    DocumentUpload, ExamApiClient, InputMode, RequestOrchestrator, SubmitOutcome, ViewState,
};
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::{Cli, Command, GenerationArgs};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let client = ExamApiClient::new(&cli.base_url)?;

    match cli.command {
        Command::Quiz { id } => {
            let quiz = client
                .fetch_quiz(&id)
                .await
                .with_context(|| format!("failed to fetch quiz {id}"))?;
            print_questions(&quiz.questions);
            Ok(ExitCode::SUCCESS)
        }
        Command::Topic { topic, options } => {
            let orchestrator = RequestOrchestrator::new(client);
            orchestrator.set_mode(InputMode::Topic);
            orchestrator.set_topic(topic);
            Ok(submit(&orchestrator, options).await)
        }
        Command::Document { path, options } => {
            let upload = DocumentUpload::read(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let orchestrator = RequestOrchestrator::new(client);
            orchestrator.set_mode(InputMode::Document);
            orchestrator.select_file(upload);
            Ok(submit(&orchestrator, options).await)
        }
    }
}

async fn submit(orchestrator: &RequestOrchestrator, options: GenerationArgs) -> ExitCode {
    orchestrator.set_count(options.count);
    orchestrator.set_answer_type(options.answer_type);

    let outcome = orchestrator.submit().await;
    let report = Report::new(outcome, orchestrator.snapshot());
    match &report.error {
        Some(message) => eprintln!("{}", message.red()),
        None => print_questions(&report.questions),
    }
    ExitCode::from(report.status)
}

/// What a finished submission prints, and the process status it ends with.
#[derive(Debug, PartialEq, Eq)]
struct Report {
    status: u8,
    questions: Vec<String>,
    error: Option<String>,
}

impl Report {
    fn new(outcome: SubmitOutcome, state: ViewState) -> Self {
        match outcome {
            SubmitOutcome::Populated => Self {
                status: 0,
                questions: state.questions,
                error: None,
            },
            SubmitOutcome::MissingFile | SubmitOutcome::Failed | SubmitOutcome::AlreadyInFlight => {
                Self {
                    status: 1,
                    questions: Vec::new(),
                    error: Some(state.error.unwrap_or_else(|| {
                        exam_client::orchestrator::GENERIC_ERROR_MESSAGE.to_string()
                    })),
                }
            }
        }
    }
}

fn print_questions(questions: &[String]) {
    if questions.is_empty() {
        println!("{}", "No questions returned.".yellow());
    }
    for line in numbered(questions) {
        println!("{line}");
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use exam_client::orchestrator::{GENERIC_ERROR_MESSAGE, MISSING_FILE_MESSAGE};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn missing_file_exits_with_failure() {
        // Nothing is sent, so the address is never dialed.
        let orch = RequestOrchestrator::new(ExamApiClient::new("http://127.0.0.1:9").unwrap());
        orch.set_mode(InputMode::Document);

        let outcome = orch.submit().await;
        let report = Report::new(outcome, orch.snapshot());
        assert_eq!(report.status, 1);
        assert_eq!(report.error.as_deref(), Some(MISSING_FILE_MESSAGE));
        assert!(report.questions.is_empty());
    }

    #[tokio::test]
    async fn failed_request_exits_with_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let orch = RequestOrchestrator::new(ExamApiClient::new(server.uri()).unwrap());
        orch.set_topic("Photosynthesis");

        let outcome = orch.submit().await;
        assert_eq!(
            Report::new(outcome, orch.snapshot()),
            Report {
                status: 1,
                questions: Vec::new(),
                error: Some(GENERIC_ERROR_MESSAGE.to_string()),
            }
        );
    }

    #[tokio::test]
    async fn populated_exits_with_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "questions": ["Q1"] })))
            .mount(&server)
            .await;

        let orch = RequestOrchestrator::new(ExamApiClient::new(server.uri()).unwrap());
        orch.set_topic("Photosynthesis");

        let outcome = orch.submit().await;
        let report = Report::new(outcome, orch.snapshot());
        assert_eq!(report.status, 0);
        assert_eq!(report.questions, vec!["Q1"]);
        assert_eq!(report.error, None);
    }
}
