//! Decode paths locating a value inside a nested payload.
//!
//! A [`DecodePath`] is threaded through every codec during a decode so that
//! each [`DecodeError`](crate::DecodeError) carries the exact location of the
//! offending value, e.g. `expression[0].type`.

use std::fmt::{self, Display};

/// One step into a nested payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key (e.g. `expression`, `targetId`)
    Key(String),
    /// An array position (e.g. `[0]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a key segment.
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }

    /// Creates an index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// The location of a value relative to the decode root.
///
/// Paths are immutable: `push_key` and `push_index` return a new path so a
/// parent path can be reused for every child it visits.
///
/// # Example
///
/// ```rust
/// use adshape::DecodePath;
///
/// let path = DecodePath::root()
///     .push_key("targets")
///     .push_index(2)
///     .push_key("expression");
///
/// assert_eq!(path.to_string(), "targets[2].expression");
/// assert_eq!(path.to_pointer(), "/targets/2/expression");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DecodePath {
    segments: Vec<PathSegment>,
}

impl DecodePath {
    /// The empty path, pointing at the decoded value itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from a sequence of segments.
    pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Returns a new path with an object key appended.
    pub fn push_key(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(name.into()));
        Self { segments }
    }

    /// Returns a new path with an array index appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the last segment, or `None` at the root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Returns true if `self` equals `prefix` or lies underneath it.
    pub fn starts_with(&self, prefix: &DecodePath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Renders the path as an RFC 6901 JSON Pointer.
    ///
    /// The root renders as the empty string. `~` and `/` inside keys are
    /// escaped as `~0` and `~1`.
    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                PathSegment::Key(name) => out.push_str(&name.replace('~', "~0").replace('/', "~1")),
                PathSegment::Index(idx) => out.push_str(&idx.to_string()),
            }
        }
        out
    }
}

impl Display for DecodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
