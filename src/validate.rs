//! Validation of query responses against a [`Schema`].
//!
//! Validation walks the response and the schema together and collects every
//! mismatch with the path it occurred at, rather than stopping at the first.
//! On success it returns the parsed value: unknown object keys stripped,
//! absent optional fields omitted and non-array safe arrays read as `[]`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::path::Path;
use crate::schema::Schema;

/// ISO-8601 date or date-time. Field ranges are checked; calendar validity
/// (February 30th) is not.
static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])",
        r"(T([01]\d|2[0-3]):[0-5]\d(:[0-5]\d(\.\d+)?)?(Z|[+-]([01]\d|2[0-3]):[0-5]\d)?)?$"
    ))
    .unwrap()
});

/// What went wrong at one location of a response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IssueKind {
    /// Value has the wrong JSON type
    #[error("expected {expected}, received {received}")]
    InvalidType {
        expected: &'static str,
        received: &'static str,
    },

    /// Value is not the expected literal
    #[error("expected literal {expected}, received {received}")]
    InvalidLiteral { expected: Value, received: Value },

    /// String is not an ISO-8601 date
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    /// Required object field is missing
    #[error("required field is missing")]
    Missing,

    /// None of a union's options matched
    #[error("value matches none of {options} union options")]
    InvalidUnion { options: usize },
}

/// One failing location of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub path: Path,
    pub kind: IssueKind,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// A response did not match its schema.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} validation issue(s): {}", .issues.len(), summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<Issue>,
}

fn summarize(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(Issue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Returns a human-readable type name for a JSON value
fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Schema {
    /// Validates a raw response value against this schema.
    ///
    /// # Examples
    ///
    /// ```
    /// use groqd::Schema;
    /// use serde_json::json;
    ///
    /// let schema = Schema::safe_array(Schema::object([("name", Schema::string())]));
    ///
    /// let parsed = schema.parse(&json!([{"name": "Ada", "extra": 1}])).unwrap();
    /// assert_eq!(parsed, json!([{"name": "Ada"}]));
    ///
    /// // Safe arrays read a missing array as empty
    /// assert_eq!(schema.parse(&json!(null)).unwrap(), json!([]));
    ///
    /// let err = schema.parse(&json!([{"name": 1}])).unwrap_err();
    /// assert_eq!(err.issues[0].path.to_string(), "[0].name");
    /// ```
    pub fn parse(&self, value: &Value) -> Result<Value, ValidationError> {
        let mut issues = Vec::new();
        let parsed = check(self, value, &Path::root(), &mut issues);

        if issues.is_empty() {
            Ok(parsed)
        } else {
            tracing::debug!(count = issues.len(), "response failed validation");
            Err(ValidationError { issues })
        }
    }
}

/// Records an issue and yields the placeholder kept in the partial output.
fn fail(issues: &mut Vec<Issue>, path: &Path, kind: IssueKind) -> Value {
    issues.push(Issue {
        path: path.clone(),
        kind,
    });
    Value::Null
}

fn check(schema: &Schema, value: &Value, path: &Path, issues: &mut Vec<Issue>) -> Value {
    match (schema, value) {
        (Schema::Unknown, v) => v.clone(),

        (Schema::String, Value::String(_))
        | (Schema::Number, Value::Number(_))
        | (Schema::Boolean, Value::Bool(_))
        | (Schema::Null, Value::Null) => value.clone(),

        (Schema::Date, Value::String(s)) => {
            if ISO_DATE.is_match(s) {
                value.clone()
            } else {
                fail(issues, path, IssueKind::InvalidDate(s.clone()))
            }
        }

        (Schema::Literal { value: expected }, v) => {
            if expected == v {
                v.clone()
            } else {
                fail(issues, path, IssueKind::InvalidLiteral {
                    expected: expected.clone(),
                    received: v.clone(),
                })
            }
        }

        (Schema::Nullable { .. }, Value::Null) => Value::Null,
        (Schema::Nullable { inner }, v) | (Schema::Optional { inner }, v) => {
            check(inner, v, path, issues)
        }

        (Schema::Object { fields }, Value::Object(obj)) => {
            let mut out = Map::new();
            for field in fields {
                let field_path = path.field(&field.name);
                match obj.get(&field.name) {
                    Some(v) => {
                        let parsed = check(&field.schema, v, &field_path, issues);
                        out.insert(field.name.clone(), parsed);
                    }
                    None if field.schema.is_optional() => {}
                    None => {
                        fail(issues, &field_path, IssueKind::Missing);
                    }
                }
            }
            Value::Object(out)
        }

        (Schema::Array { element }, Value::Array(items))
        | (Schema::SafeArray { element }, Value::Array(items)) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| check(element, item, &path.index(i), issues))
                .collect(),
        ),

        // Lenient by definition: whatever came back instead of an array reads as empty
        (Schema::SafeArray { .. }, _) => Value::Array(Vec::new()),

        (Schema::Union { options }, v) => {
            // Closest option: fewest issues among those that got past the union's own level
            let mut closest: Option<Vec<Issue>> = None;
            for option in options {
                let mut scratch = Vec::new();
                let parsed = check(option, v, path, &mut scratch);
                if scratch.is_empty() {
                    return parsed;
                }

                let nested = scratch
                    .iter()
                    .any(|issue| issue.path.segments().len() > path.segments().len());
                if nested && closest.as_ref().is_none_or(|c| scratch.len() < c.len()) {
                    closest = Some(scratch);
                }
            }

            match closest {
                Some(nested) => {
                    issues.extend(nested);
                    Value::Null
                }
                None => fail(issues, path, IssueKind::InvalidUnion {
                    options: options.len(),
                }),
            }
        }

        (expected, v) => fail(issues, path, IssueKind::InvalidType {
            expected: expected.type_name(),
            received: json_type_name(v),
        }),
    }
}
