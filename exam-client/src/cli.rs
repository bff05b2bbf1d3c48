//! CLI argument definitions for the exam client.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use exam_client::AnswerType;
use exam_client::orchestrator::DEFAULT_COUNT;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Parser)]
#[command(
    name = "exam-client",
    version,
    about = "Generate exam questions from a topic or a PDF document"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the generation service.
    #[arg(long, env = "EXAM_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate questions about a free-text topic.
    Topic {
        /// Subject, e.g. "Binary Search Trees".
        topic: String,
        #[command(flatten)]
        options: GenerationArgs,
    },

    /// Generate questions from a PDF document.
    Document {
        #[arg(value_name = "PATH")]
        path: PathBuf,
        #[command(flatten)]
        options: GenerationArgs,
    },

    /// Print a previously generated quiz.
    Quiz {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Args)]
pub struct GenerationArgs {
    /// Number of questions to ask for.
    #[arg(long, default_value_t = DEFAULT_COUNT)]
    pub count: u32,

    /// Answer type: short or long.
    #[arg(long = "type", value_name = "TYPE", default_value = "short")]
    pub answer_type: AnswerType,
}
