//! CLI support for groqd
//!
//! Provides programmatic access to the groqd CLI commands for embedding
//! in other tools.

mod check;
mod docs;

pub use check::{CheckOptions, execute_check, load_schema};
pub use docs::{DocTopic, get_doc_topic, get_docs_overview};

use std::io;

use thiserror::Error;

use crate::output::format_issues;
use crate::validate::ValidationError;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Schema descriptor or response is not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Response does not match the schema
    #[error("Response does not match schema:\n{}", format_issues(.0))]
    Validation(#[from] ValidationError),

    /// No input provided
    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    /// Unknown documentation topic
    #[error("Unknown topic: '{0}'\nRun 'groqd docs' to see available topics.")]
    UnknownTopic(String),
}
