//! Text output for parsed responses and validation reports.
//!
//! # Examples
//!
//! ```
//! use groqd::output::{to_json, to_json_pretty};
//! use serde_json::json;
//!
//! let value = json!({"title": "Alien"});
//!
//! assert_eq!(to_json(&value), r#"{"title":"Alien"}"#);
//! assert_eq!(to_json_pretty(&value), "{\n  \"title\": \"Alien\"\n}");
//! ```

use serde_json::Value;

use crate::validate::ValidationError;

/// Converts a value to compact JSON.
pub fn to_json(value: &Value) -> String {
    value.to_string()
}

/// Converts a value to JSON with 2-space indentation.
pub fn to_json_pretty(value: &Value) -> String {
    format!("{:#}", value)
}

/// One line per issue, `path: message`, in the order they were found.
///
/// ```
/// use groqd::Schema;
/// use groqd::output::format_issues;
/// use serde_json::json;
///
/// let schema = Schema::object([("title", Schema::string()), ("year", Schema::number())]);
/// let err = schema.parse(&json!({"year": "1979"})).unwrap_err();
///
/// assert_eq!(
///     format_issues(&err),
///     "title: required field is missing\nyear: expected number, received string"
/// );
/// ```
pub fn format_issues(error: &ValidationError) -> String {
    error
        .issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
