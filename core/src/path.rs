//! Hierarchical command paths.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::segment::Segment;

/// Ordered, non-empty sequence of command name segments.
///
/// Displayed as `/root/seg1/seg2`. Equality and hashing use the lowercased
/// form, so `/Remote/Add` and `/remote/add` name the same route.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::Path;
///
/// let mut path = Path::new("remote").unwrap();
/// path.add_segment("add").unwrap();
/// assert_eq!(path.to_string(), "/remote/add");
/// assert_eq!("/remote/add".parse::<Path>().unwrap(), path);
/// assert_eq!("Remote Add".parse::<Path>().unwrap(), path);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Creates a single-segment path.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidPathSegment`] when `root` is empty or
    /// contains whitespace or `/`.
    pub fn new(root: impl Into<String>) -> Result<Self> {
        let root = root.into();
        check_segment(&root)?;
        Ok(Self {
            segments: vec![root],
        })
    }

    /// Parses `/a/b`, `a/b` or `a b` forms.
    pub fn parse(text: &str) -> Result<Self> {
        let mut parts = text
            .split(|c: char| c == '/' || c.is_whitespace())
            .filter(|part| !part.is_empty());
        let root = parts
            .next()
            .ok_or_else(|| ParseError::InvalidPathSegment(text.to_string()))?;
        let mut path = Self::new(root)?;
        for part in parts {
            path.add_segment(part)?;
        }
        Ok(path)
    }

    /// Appends a sub-segment.
    pub fn add_segment(&mut self, segment: impl Into<String>) -> Result<&mut Self> {
        let segment = segment.into();
        check_segment(&segment)?;
        self.segments.push(segment);
        Ok(self)
    }

    pub fn root(&self) -> &str {
        &self.segments[0]
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; present for symmetry with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Lowercased `/root/seg` form used for equality and hashing.
    pub fn normalized(&self) -> String {
        self.to_string().to_lowercase()
    }
}

fn check_segment(segment: &str) -> Result<()> {
    if segment.is_empty() || segment.chars().any(|c| c == '/' || c.is_whitespace()) {
        return Err(ParseError::InvalidPathSegment(segment.to_string()));
    }
    Ok(())
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl FromStr for Path {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Path {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.to_string()
    }
}

/// Takes the command path off the front of a segment list.
pub struct PathExtractor;

impl PathExtractor {
    /// Builds a [`Path`] from the leading run of segments that start with a
    /// letter.
    ///
    /// # Errors
    ///
    /// - [`ParseError::MissingCommand`] when there are no segments, or the
    ///   first one starts with a dash, digit or symbol.
    /// - [`ParseError::QuotedCommandName`] when the first segment is quoted.
    pub fn extract(segments: &[Segment]) -> Result<Path> {
        let first = segments
            .first()
            .ok_or(ParseError::MissingCommand { offset: 0 })?;
        if first.is_quoted() {
            return Err(ParseError::QuotedCommandName {
                offset: first.begin_offset,
            });
        }

        let mut run = segments.iter().take_while(|segment| {
            segment
                .value
                .chars()
                .next()
                .is_some_and(char::is_alphabetic)
        });

        let root = run.next().ok_or(ParseError::MissingCommand {
            offset: first.begin_offset,
        })?;
        let mut path = Path::new(root.value.as_str())?;
        for segment in run {
            path.add_segment(segment.value.as_str())?;
        }
        Ok(path)
    }
}
