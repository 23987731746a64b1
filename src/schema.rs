use serde::{Deserialize, Serialize};

/// A description of the shape a query is expected to return.
///
/// Schemas travel alongside the query text while a query is built, and are
/// used afterwards to validate the raw JSON the document store sends back
/// (see [`Schema::parse`]).
///
/// # Safe arrays
///
/// Every array a query builder produces is a [`Schema::SafeArray`]. It
/// validates its elements like [`Schema::Array`], but a response value that
/// is not an array at all (a `null` from an empty dereference, say) is read
/// as an empty array instead of failing.
///
/// # Examples
///
/// ```
/// use groqd::Schema;
///
/// let movie = Schema::object([
///     ("title", Schema::string()),
///     ("year", Schema::number().nullable()),
/// ]);
///
/// let movies = Schema::safe_array(movie.clone());
/// assert_eq!(movies.element(), Some(&movie));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Schema {
    /// Any value; not validated
    Unknown,

    /// JSON string
    String,

    /// JSON number (integer or float)
    Number,

    /// JSON boolean
    Boolean,

    /// JSON null
    Null,

    /// ISO-8601 date or date-time string
    Date,

    /// Exactly this JSON value
    Literal { value: serde_json::Value },

    /// Object with the listed fields; other keys are dropped
    Object { fields: Vec<Field> },

    /// Array whose every element matches `element`
    Array { element: Box<Schema> },

    /// Like `Array`, but a non-array value reads as `[]`
    SafeArray { element: Box<Schema> },

    /// `inner` or null
    Nullable { inner: Box<Schema> },

    /// `inner`, or absent when used as an object field
    Optional { inner: Box<Schema> },

    /// The first of `options` that matches
    Union { options: Vec<Schema> },
}

/// A named field of an object schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
}

impl Field {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Field {
            name: name.into(),
            schema,
        }
    }
}

impl Schema {
    pub fn unknown() -> Self {
        Schema::Unknown
    }

    pub fn string() -> Self {
        Schema::String
    }

    pub fn number() -> Self {
        Schema::Number
    }

    pub fn boolean() -> Self {
        Schema::Boolean
    }

    pub fn null() -> Self {
        Schema::Null
    }

    pub fn date() -> Self {
        Schema::Date
    }

    pub fn literal(value: impl Into<serde_json::Value>) -> Self {
        Schema::Literal {
            value: value.into(),
        }
    }

    /// Builds an object schema from `(name, schema)` pairs, keeping their order.
    pub fn object<N, I>(fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Schema)>,
    {
        Schema::Object {
            fields: fields
                .into_iter()
                .map(|(name, schema)| Field::new(name, schema))
                .collect(),
        }
    }

    pub fn array(element: Schema) -> Self {
        Schema::Array {
            element: Box::new(element),
        }
    }

    pub fn safe_array(element: Schema) -> Self {
        Schema::SafeArray {
            element: Box::new(element),
        }
    }

    pub fn union(options: impl IntoIterator<Item = Schema>) -> Self {
        Schema::Union {
            options: options.into_iter().collect(),
        }
    }

    /// Wraps this schema so that null is also accepted.
    pub fn nullable(self) -> Self {
        Schema::Nullable {
            inner: Box::new(self),
        }
    }

    /// Wraps this schema so that, as an object field, it may be missing.
    pub fn optional(self) -> Self {
        Schema::Optional {
            inner: Box::new(self),
        }
    }

    /// The element schema of an array or safe array, if this is one.
    pub fn element(&self) -> Option<&Schema> {
        match self {
            Schema::Array { element } | Schema::SafeArray { element } => Some(element),
            _ => None,
        }
    }

    /// Whether an object field of this schema may be missing. Looks through
    /// `Nullable`, so `string().optional().nullable()` counts.
    pub fn is_optional(&self) -> bool {
        match self {
            Schema::Optional { .. } => true,
            Schema::Nullable { inner } => inner.is_optional(),
            _ => false,
        }
    }

    pub fn is_safe_array(&self) -> bool {
        matches!(self, Schema::SafeArray { .. })
    }

    /// Fields of an object schema; empty for anything else.
    pub fn fields(&self) -> &[Field] {
        match self {
            Schema::Object { fields } => fields,
            _ => &[],
        }
    }

    /// Short name used in validation messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Schema::Unknown => "unknown",
            Schema::String => "string",
            Schema::Number => "number",
            Schema::Boolean => "boolean",
            Schema::Null => "null",
            Schema::Date => "date",
            Schema::Literal { .. } => "literal",
            Schema::Object { .. } => "object",
            Schema::Array { .. } | Schema::SafeArray { .. } => "array",
            Schema::Nullable { inner } | Schema::Optional { inner } => inner.type_name(),
            Schema::Union { .. } => "union",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_of_arrays() {
        let inner = Schema::string();
        assert_eq!(Schema::array(inner.clone()).element(), Some(&inner));
        assert_eq!(Schema::safe_array(inner.clone()).element(), Some(&inner));
        assert_eq!(inner.element(), None);
    }

    #[test]
    fn test_object_keeps_field_order() {
        let schema = Schema::object([("b", Schema::number()), ("a", Schema::string())]);
        let names: Vec<_> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_descriptor_json_form() {
        let schema = Schema::safe_array(Schema::object([("title", Schema::string().nullable())]));
        let json = serde_json::to_value(&schema).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "safe_array",
                "element": {
                    "type": "object",
                    "fields": [
                        {"name": "title", "schema": {"type": "nullable", "inner": {"type": "string"}}}
                    ]
                }
            })
        );

        let back: Schema = serde_json::from_value(json).unwrap();
        assert_eq!(back, schema);
    }

    #[test]
    fn test_literal_descriptor() {
        let schema: Schema =
            serde_json::from_str(r#"{"type": "literal", "value": "movie"}"#).unwrap();
        assert_eq!(schema, Schema::literal("movie"));
    }

    #[test]
    fn test_optional_through_nullable() {
        assert!(Schema::string().optional().is_optional());
        assert!(Schema::string().optional().nullable().is_optional());
        assert!(!Schema::string().nullable().is_optional());
        assert!(!Schema::string().is_optional());
    }

    #[test]
    fn test_wrapper_type_names() {
        assert_eq!(Schema::string().optional().type_name(), "string");
        assert_eq!(Schema::safe_array(Schema::null()).type_name(), "array");
    }
}
