use std::fmt;

/// A segment in the location of a value inside a query response.
///
/// Paths are built up while a response is validated against a schema, so
/// that every failure can point at the exact value that did not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object field access by name
    ///
    /// # Examples
    /// - `{"title": ...}` → `Field("title")`
    /// - `{"author": {"name": ...}}` → `[Field("author"), Field("name")]`
    Field(String),

    /// Array element access by index
    ///
    /// # Examples
    /// - `[..., ...]` second element → `Index(1)`
    Index(usize),
}

/// A sequence of path segments from the response root to a nested value.
///
/// # Examples
///
/// For the second item's price in `{"items": [{..}, {"price": "x"}]}`:
/// - `PathSegment::Field("items")`
/// - `PathSegment::Index(1)`
/// - `PathSegment::Field("price")`
///
/// which renders as `items[1].price`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// The empty path, pointing at the response root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path extended by a field segment.
    pub fn field(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(name.to_string()));
        Path(segments)
    }

    /// Returns a new path extended by an index segment.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Path(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }

        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
