//! # Fluent GROQ query builder
//!
//! A [`Query`] carries two things that grow together: the query text sent to
//! the document store, and the [`Schema`] of what that text returns. Every
//! chained call appends one fragment to the text and adjusts the schema to
//! match, so the pair always describes the same value.
//!
//! ## Shapes
//!
//! The type parameter of a query records what its text currently yields:
//!
//! | Alias                 | Type                          | Yields                      |
//! |-----------------------|-------------------------------|-----------------------------|
//! | [`UnknownQuery`]      | `Query<EntityOf<Unknown>>`    | one value of unknown shape  |
//! | [`EntityQuery`]       | `Query<EntityOf<Known>>`      | one value of the schema     |
//! | [`UnknownArrayQuery`] | `Query<ArrayOf<Unknown>>`     | an array, elements unknown  |
//! | [`ArrayQuery`]        | `Query<ArrayOf<Known>>`       | an array of the schema      |
//!
//! Operations exist only on the shapes they make sense for, so a chain like
//! ordering a single entity does not compile.
//!
//! ## Fragments
//!
//! ```text
//! .field          grab_one
//! [predicate]     filter
//! ->              deref
//! |order(f dir)   order
//! [index]         slice
//! [min..max]      slice_range            (inclusive)
//! [min...max]     slice_range_exclusive
//! {...}           grab
//! ```
//!
//! ## Example
//!
//! ```
//! use groqd::{Order, Schema, q};
//!
//! let items = q()
//!     .filter("")
//!     .grab_one("items", Schema::object([("price", Schema::number())]))
//!     .slice_range(1, 3)
//!     .order([Order::desc("price")]);
//!
//! assert_eq!(items.query(), "[].items[1..3]|order(price desc)");
//! ```
//!
//! ## Chains that do not compile
//!
//! A single entity cannot be ordered:
//!
//! ```compile_fail
//! use groqd::{Order, Schema, q};
//!
//! let title = q().grab_one("title", Schema::string());
//! title.order([Order::asc("title")]);
//! ```
//!
//! or sliced:
//!
//! ```compile_fail
//! use groqd::{Schema, q};
//!
//! let title = q().grab_one("title", Schema::string());
//! title.slice(0);
//! ```
//!
//! A typed entity can no longer be filtered into an array:
//!
//! ```compile_fail
//! use groqd::{Schema, q};
//!
//! let author = q().grab_one("author", Schema::unknown());
//! author.filter("");
//! ```
//!
//! Only unknown shapes can be dereferenced:
//!
//! ```compile_fail
//! use groqd::{Schema, q};
//!
//! let author = q().grab_one("author", Schema::unknown());
//! author.deref();
//! ```
//!
//! ```compile_fail
//! use groqd::{Schema, q};
//!
//! let authors = q().filter("").grab_one("author", Schema::unknown());
//! authors.deref();
//! ```
//!
//! A slice of an unknown array is a typed entity, so it cannot be dereferenced
//! either:
//!
//! ```compile_fail
//! use groqd::q;
//!
//! q().filter("").slice(0).deref();
//! ```
//!
//! The same chains on the right shapes compile:
//!
//! ```
//! use groqd::{Order, Schema, q};
//!
//! let movies = q().filter("_type == 'movie'").deref();
//! let sorted = movies
//!     .grab_one("title", Schema::string())
//!     .order([Order::asc("title")]);
//! let first = sorted.slice(0);
//! let author = q().deref().filter("").deref();
//!
//! assert_eq!(first.query(), "[_type == 'movie']->.title|order(title asc)[0]");
//! assert_eq!(author.query(), "->[]->");
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde_json::Value;

use crate::grab::{self, ConditionalSelections, Selection};
use crate::schema::Schema;
use crate::validate::ValidationError;

mod sealed {
    pub trait Sealed {}
}

/// Whether the values a query yields have a known schema yet.
pub trait Knowledge: sealed::Sealed {}

/// Values have a concrete schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Known {}

/// Values have not been described yet; only reachable from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unknown {}

impl sealed::Sealed for Known {}
impl sealed::Sealed for Unknown {}
impl Knowledge for Known {}
impl Knowledge for Unknown {}

/// The query yields exactly one value.
pub struct EntityOf<U: Knowledge>(PhantomData<U>);

/// The query yields an array of values.
pub struct ArrayOf<U: Knowledge>(PhantomData<U>);

/// Maps the schema of a single yielded value to the schema of the whole result.
pub trait Shape: sealed::Sealed {
    fn describe(element: &Schema) -> Schema;
}

impl<U: Knowledge> sealed::Sealed for EntityOf<U> {}
impl<U: Knowledge> sealed::Sealed for ArrayOf<U> {}

impl<U: Knowledge> Shape for EntityOf<U> {
    fn describe(element: &Schema) -> Schema {
        element.clone()
    }
}

impl<U: Knowledge> Shape for ArrayOf<U> {
    fn describe(element: &Schema) -> Schema {
        Schema::safe_array(element.clone())
    }
}

pub type UnknownQuery = Query<EntityOf<Unknown>>;
pub type EntityQuery = Query<EntityOf<Known>>;
pub type UnknownArrayQuery = Query<ArrayOf<Unknown>>;
pub type ArrayQuery = Query<ArrayOf<Known>>;

/// An owned copy of a query's text and result schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    pub query: String,
    pub schema: Schema,
}

/// A query under construction.
///
/// Queries are values: every operation borrows the query and returns a new
/// one, so a shared prefix can be branched without one branch seeing the
/// other's fragments.
pub struct Query<K: Shape> {
    query: String,
    /// Schema of a single yielded value; array shapes wrap it on the way out
    element: Schema,
    shape: PhantomData<K>,
}

/// Starts a query at the root, with empty text and an unknown result.
pub fn q() -> UnknownQuery {
    pipe("")
}

/// Starts a query from an initial expression such as `*`.
pub fn pipe(start: impl Into<String>) -> UnknownQuery {
    Query::new(start.into(), Schema::Unknown)
}

impl<K: Shape> Query<K> {
    fn new(query: String, element: Schema) -> Self {
        Query {
            query,
            element,
            shape: PhantomData,
        }
    }

    /// Appends `fragment`, producing a query of shape `T` whose values are `element`.
    fn extend<T: Shape>(&self, fragment: &str, element: Schema) -> Query<T> {
        tracing::trace!(base = %self.query, fragment, "extending query");
        let mut query = String::with_capacity(self.query.len() + fragment.len());
        query.push_str(&self.query);
        query.push_str(fragment);
        Query::new(query, element)
    }

    /// The query text built so far.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The schema of the complete result of this query.
    pub fn schema(&self) -> Schema {
        K::describe(&self.element)
    }

    /// Snapshot of the text and schema, detached from this query.
    pub fn value(&self) -> Payload {
        Payload {
            query: self.query.clone(),
            schema: self.schema(),
        }
    }

    /// Validates a raw response to this query against its schema.
    pub fn parse(&self, response: &Value) -> Result<Value, ValidationError> {
        self.schema().parse(response)
    }
}

impl<U: Knowledge> Query<EntityOf<U>> {
    /// Narrows into a named field: `.name`.
    pub fn grab_one(&self, name: &str, schema: Schema) -> EntityQuery {
        self.extend(&format!(".{}", name), schema)
    }

    /// Projects the selected fields: `{...}`.
    pub fn grab(&self, selection: &Selection) -> EntityQuery {
        let (fragment, element) = grab::projection(selection, None);
        self.extend(&fragment, element)
    }

    /// Projects the selected fields plus conditional branches.
    pub fn grab_with(
        &self,
        selection: &Selection,
        conditionals: &ConditionalSelections,
    ) -> EntityQuery {
        let (fragment, element) = grab::projection(selection, Some(conditionals));
        self.extend(&fragment, element)
    }
}

impl UnknownQuery {
    /// Filters into an array: `[predicate]`. An empty predicate yields `[]`,
    /// every element.
    pub fn filter(&self, predicate: &str) -> UnknownArrayQuery {
        self.extend(&format!("[{}]", predicate), Schema::Unknown)
    }

    /// Follows a reference to the document it points at: `->`.
    pub fn deref(&self) -> UnknownQuery {
        self.extend("->", Schema::Unknown)
    }
}

impl<U: Knowledge> Query<ArrayOf<U>> {
    /// Keeps the elements matching `predicate`: `[predicate]`.
    pub fn filter(&self, predicate: &str) -> Self {
        self.extend(&format!("[{}]", predicate), self.element.clone())
    }

    /// Narrows every element into a named field: `.name`.
    pub fn grab_one(&self, name: &str, schema: Schema) -> ArrayQuery {
        self.extend(&format!(".{}", name), schema)
    }

    /// Projects the selected fields of every element: `{...}`.
    pub fn grab(&self, selection: &Selection) -> ArrayQuery {
        let (fragment, element) = grab::projection(selection, None);
        self.extend(&fragment, element)
    }

    /// Projects the selected fields plus conditional branches of every element.
    pub fn grab_with(
        &self,
        selection: &Selection,
        conditionals: &ConditionalSelections,
    ) -> ArrayQuery {
        let (fragment, element) = grab::projection(selection, Some(conditionals));
        self.extend(&fragment, element)
    }

    /// Sorts the elements: `|order(field dir, ...)`.
    pub fn order(&self, orderings: impl IntoIterator<Item = Order>) -> Self {
        let orderings: Vec<String> = orderings.into_iter().map(|o| o.to_string()).collect();
        self.extend(
            &format!("|order({})", orderings.join(", ")),
            self.element.clone(),
        )
    }

    /// Picks one element: `[index]`. The result is a single entity.
    pub fn slice(&self, index: i64) -> EntityQuery {
        self.extend(&format!("[{}]", index), self.element.clone())
    }

    /// Keeps elements `min` through `max`, both included: `[min..max]`.
    pub fn slice_range(&self, min: i64, max: i64) -> Self {
        self.extend(&format!("[{}..{}]", min, max), self.element.clone())
    }

    /// Keeps elements from `min` up to but excluding `max`: `[min...max]`.
    pub fn slice_range_exclusive(&self, min: i64, max: i64) -> Self {
        self.extend(&format!("[{}...{}]", min, max), self.element.clone())
    }
}

impl UnknownArrayQuery {
    /// Follows the reference in every element: `->`.
    pub fn deref(&self) -> UnknownArrayQuery {
        self.extend("->", Schema::Unknown)
    }
}

impl<K: Shape> Clone for Query<K> {
    fn clone(&self) -> Self {
        Query::new(self.query.clone(), self.element.clone())
    }
}

impl<K: Shape> PartialEq for Query<K> {
    fn eq(&self, other: &Self) -> bool {
        self.query == other.query && self.element == other.element
    }
}

impl<K: Shape> fmt::Debug for Query<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("query", &self.query)
            .field("schema", &self.schema())
            .finish()
    }
}

impl<K: Shape> fmt::Display for Query<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)
    }
}

/// Sort direction of an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => write!(f, "asc"),
            Direction::Desc => write!(f, "desc"),
        }
    }
}

/// One sort key of [`Query::order`], rendered as `field dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub field: String,
    pub direction: Direction,
}

impl Order {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Order {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Order::new(field, Direction::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Order::new(field, Direction::Desc)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction)
    }
}
