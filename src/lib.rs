pub mod cli;
pub mod grab;
pub mod output;
pub mod path;
pub mod query;
pub mod runner;
pub mod schema;
pub mod validate;

pub use grab::{ConditionalSelections, ProjectedQuery, Projection, Selection, project};
pub use path::{Path, PathSegment};
pub use query::{
    ArrayOf, ArrayQuery, Direction, EntityOf, EntityQuery, Known, Order, Payload, Query, Shape,
    Unknown, UnknownArrayQuery, UnknownQuery, pipe, q,
};
pub use runner::{RunError, SafeQueryRunner};
pub use schema::{Field, Schema};
pub use validate::{Issue, IssueKind, ValidationError};
