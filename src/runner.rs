//! Running built queries through a caller-supplied fetch function.

use serde_json::Value;
use thiserror::Error;

use crate::query::{Query, Shape};
use crate::validate::ValidationError;

/// Errors that can occur while running a query.
#[derive(Debug, Error)]
pub enum RunError<E> {
    /// The fetch function failed
    #[error("fetch failed: {0}")]
    Fetch(#[source] E),

    /// The response did not match the query's schema
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Sends query text with `fetch` and validates every response it returns.
///
/// The runner owns no transport of its own: `fetch` receives the finished
/// query text and hands back the raw JSON result.
///
/// # Examples
///
/// ```
/// use groqd::{Schema, SafeQueryRunner, pipe};
/// use serde_json::json;
///
/// let runner = SafeQueryRunner::new(|query: &str| {
///     assert_eq!(query, "*[_type == 'movie'].title");
///     Ok::<_, std::io::Error>(json!(["Alien", "Heat"]))
/// });
///
/// let titles = pipe("*")
///     .filter("_type == 'movie'")
///     .grab_one("title", Schema::string());
///
/// assert_eq!(runner.run(&titles).unwrap(), json!(["Alien", "Heat"]));
/// ```
pub struct SafeQueryRunner<F> {
    fetch: F,
}

impl<F> SafeQueryRunner<F> {
    pub fn new(fetch: F) -> Self {
        SafeQueryRunner { fetch }
    }

    pub fn run<K, E>(&self, query: &Query<K>) -> Result<Value, RunError<E>>
    where
        K: Shape,
        F: Fn(&str) -> Result<Value, E>,
    {
        tracing::debug!(query = query.query(), "running query");
        let response = (self.fetch)(query.query()).map_err(RunError::Fetch)?;
        Ok(query.parse(&response)?)
    }
}
