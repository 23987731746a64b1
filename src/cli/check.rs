//! Validate JSON responses against schema descriptors

use std::fs;

use serde_json::Value;

use super::CliError;
use crate::schema::Schema;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Schema descriptor as JSON, or `@path` to a file holding it
    pub schema: String,
    /// JSON response to validate
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
}

/// Reads a schema descriptor given inline or as `@path`.
pub fn load_schema(arg: &str) -> Result<Schema, CliError> {
    let text = match arg.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)?,
        None => arg.to_string(),
    };
    Ok(serde_json::from_str(&text)?)
}

/// Validate the input against the schema, returning the parsed value
pub fn execute_check(options: &CheckOptions) -> Result<Value, CliError> {
    let schema = load_schema(&options.schema)?;
    let input = options.input.as_ref().ok_or(CliError::NoInput)?;
    let response: Value = serde_json::from_str(input)?;

    Ok(schema.parse(&response)?)
}
