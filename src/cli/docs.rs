//! Reference text for the groqd CLI

use super::CliError;

/// Available documentation topics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocTopic {
    Chain,
    Slicing,
    Schemas,
    Grab,
}

impl DocTopic {
    /// Parse topic name from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "chain" | "chains" | "builder" => Some(Self::Chain),
            "slicing" | "slice" => Some(Self::Slicing),
            "schemas" | "schema" | "types" => Some(Self::Schemas),
            "grab" | "projection" | "projections" => Some(Self::Grab),
            _ => None,
        }
    }
}

/// Get the docs overview (topic listing)
pub fn get_docs_overview() -> &'static str {
    r#"GROQD DOCUMENTATION

groqd builds GROQ query text together with the schema of its result, and
validates store responses against that schema.

DOCUMENTATION TOPICS

  chain             Query shapes and the operations each one offers
  slicing           Index and range slices
  schemas           Schema descriptors and how responses are validated
  grab              Projections and conditional selections

QUICK REFERENCE

  .field            grab_one
  [predicate]       filter
  ->                deref
  |order(f dir)     order
  [i]  [a..b]       slice, slice_range
  {...}             grab

Run 'groqd doc <topic>' for detailed documentation.
"#
}

/// Get documentation for a specific topic
pub fn get_doc_topic(name: &str) -> Result<&'static str, CliError> {
    match DocTopic::parse(name) {
        Some(DocTopic::Chain) => Ok(CHAIN_DOC),
        Some(DocTopic::Slicing) => Ok(SLICING_DOC),
        Some(DocTopic::Schemas) => Ok(SCHEMAS_DOC),
        Some(DocTopic::Grab) => Ok(GRAB_DOC),
        None => Err(CliError::UnknownTopic(name.to_string())),
    }
}

const CHAIN_DOC: &str = r#"CHAIN - Query Shapes

Every query starts at q() (empty text) or pipe("*"), as an unknown entity.

  unknown entity   filter -> unknown array, deref, grab_one, grab
  entity           grab_one, grab
  unknown array    deref, plus everything an array offers
  array            filter, order, grab_one, grab, slice, slice_range

Text is only ever appended, in call order:

  q().filter("").grab_one("name", string).slice(0)
    => [].name[0]

  q().deref().grab_one("title", string)
    => ->.title
"#;

const SLICING_DOC: &str = r#"SLICING - Index and Range Slices

  slice(i)                    [i]        one element, the result is an entity
  slice_range(a, b)           [a..b]     elements a through b, inclusive
  slice_range_exclusive(a, b) [a...b]    elements a up to b, b excluded

Negative indices count from the end: slice(-1) => [-1]
"#;

const SCHEMAS_DOC: &str = r#"SCHEMAS - Descriptors and Validation

Descriptors are JSON objects tagged by "type":

  {"type": "string"}   {"type": "number"}   {"type": "boolean"}
  {"type": "null"}     {"type": "date"}     {"type": "unknown"}
  {"type": "literal", "value": "movie"}
  {"type": "object", "fields": [{"name": "title", "schema": {...}}]}
  {"type": "array", "element": {...}}
  {"type": "safe_array", "element": {...}}
  {"type": "nullable", "inner": {...}}
  {"type": "optional", "inner": {...}}
  {"type": "union", "options": [{...}, ...]}

Every failing path is reported, e.g. items[1].price.
A safe_array reads any non-array value (such as null) as [].
Unknown object keys are dropped from the parsed output.

  groqd check '{"type": "safe_array", "element": {"type": "string"}}' \
      --input 'null'
  => []
"#;

const GRAB_DOC: &str = r#"GRAB - Projections

  Selection::new()
      .field("title", string)                     title
      .expr("director", "director->name", string) "director": director->name

Conditional branches follow the base fields:

  ConditionalSelections::new()
      .when("_type == 'movie'", Selection::new().field("year", number))

  => {title, _type == 'movie' => {year}}

With branches, the result is the union of each branch merged with the
base fields, followed by the base fields alone.
"#;
