//! Projections: turning a selection of fields into `{...}` query text and the
//! object schema it returns.

use serde_json::Value;

use crate::query::{Query, Shape};
use crate::schema::{Field, Schema};
use crate::validate::ValidationError;

/// How one selected field is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// The document's own field of the same name
    ///
    /// # Examples
    /// - `title` → `title`
    Field(Schema),

    /// An arbitrary sub-query, stored under the selected name
    ///
    /// # Examples
    /// - `("director", "director->name")` → `"director": director->name`
    /// - `("count", "count(items)")` → `"count": count(items)`
    Expr { query: String, schema: Schema },
}

/// The fields to project, in order.
///
/// # Examples
///
/// ```
/// use groqd::{Schema, Selection, q};
///
/// let selection = Selection::new()
///     .field("title", Schema::string())
///     .expr("director", "director->name", Schema::string().nullable());
///
/// let movies = q().filter("_type == 'movie'").grab(&selection);
/// assert_eq!(
///     movies.query(),
///     "[_type == 'movie']{title, \"director\": director->name}"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    entries: Vec<(String, Projection)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a field by its own name.
    pub fn field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.entries.push((name.into(), Projection::Field(schema)));
        self
    }

    /// Selects the result of `query` under `name`.
    pub fn expr(mut self, name: impl Into<String>, query: impl Into<String>, schema: Schema) -> Self {
        self.entries.push((
            name.into(),
            Projection::Expr {
                query: query.into(),
                schema,
            },
        ));
        self
    }

    /// Selects the result of a built sub-query under `name`, with its schema.
    pub fn sub<K: Shape>(self, name: impl Into<String>, query: &Query<K>) -> Self {
        self.expr(name, query.query(), query.schema())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn render(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(name, projection)| match projection {
                Projection::Field(_) => name.clone(),
                Projection::Expr { query, .. } => format!("\"{}\": {}", name, query),
            })
            .collect()
    }

    fn fields(&self) -> Vec<Field> {
        self.entries
            .iter()
            .map(|(name, projection)| match projection {
                Projection::Field(schema) | Projection::Expr { schema, .. } => {
                    Field::new(name.clone(), schema.clone())
                }
            })
            .collect()
    }
}

/// Extra fields projected only when a condition holds: `condition => {...}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionalSelections {
    branches: Vec<(String, Selection)>,
}

impl ConditionalSelections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a branch selecting `selection` when `condition` holds.
    pub fn when(mut self, condition: impl Into<String>, selection: Selection) -> Self {
        self.branches.push((condition.into(), selection));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

/// A projected query, ready to send and to validate the response of.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedQuery {
    pub query: String,
    pub schema: Schema,
}

impl ProjectedQuery {
    /// Validates a raw response against the projected schema.
    pub fn parse(&self, response: &Value) -> Result<Value, ValidationError> {
        self.schema.parse(response)
    }
}

/// Appends a projection to `query`.
///
/// When `schema` is a safe array the projection applies to every element and
/// the result stays a safe array; otherwise the result is the projected object.
pub fn project(
    query: &str,
    schema: &Schema,
    selection: &Selection,
    conditionals: Option<&ConditionalSelections>,
) -> ProjectedQuery {
    let (fragment, projected) = projection(selection, conditionals);
    let schema = if schema.is_safe_array() {
        Schema::safe_array(projected)
    } else {
        projected
    };

    ProjectedQuery {
        query: format!("{}{}", query, fragment),
        schema,
    }
}

/// The `{...}` fragment for a selection and the schema of one projected value.
pub(crate) fn projection(
    selection: &Selection,
    conditionals: Option<&ConditionalSelections>,
) -> (String, Schema) {
    let mut parts = selection.render();
    let base = selection.fields();

    let branches = conditionals.map(|c| c.branches.as_slice()).unwrap_or(&[]);
    tracing::debug!(
        fields = selection.len(),
        conditionals = branches.len(),
        "projecting selection"
    );

    if branches.is_empty() {
        return (
            format!("{{{}}}", parts.join(", ")),
            Schema::Object { fields: base },
        );
    }

    let mut options = Vec::with_capacity(branches.len() + 1);
    for (condition, branch) in branches {
        parts.push(format!("{} => {{{}}}", condition, branch.render().join(", ")));
        options.push(Schema::Object {
            fields: merge_fields(&base, branch.fields()),
        });
    }
    options.push(Schema::Object { fields: base });

    (format!("{{{}}}", parts.join(", ")), Schema::Union { options })
}

/// Base fields overlaid with a branch's; a branch field replaces a base field of the same name.
fn merge_fields(base: &[Field], extra: Vec<Field>) -> Vec<Field> {
    let mut merged = base.to_vec();
    for field in extra {
        match merged.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => merged.push(field),
        }
    }
    merged
}
