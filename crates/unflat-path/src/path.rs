//! Wildcard-normalized paths used as registry lookup keys.

use std::fmt;

use crate::segment::is_index;

/// One normalized component of a path.
///
/// Index segments lose their literal value: any all-digit segment, and the
/// explicit `*` spelling, normalize to [`Segment::Index`] so that behaviors
/// registered for one list element match every element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A named segment, compared by its literal text.
    Literal(String),
    /// A list-index segment; any index matches any other.
    Index,
}

impl Segment {
    /// Normalize one raw segment.
    pub fn normalize(raw: &str) -> Self {
        if raw == "*" || is_index(raw) {
            Segment::Index
        } else {
            Segment::Literal(raw.to_string())
        }
    }
}

/// A path normalized for registry lookup.
///
/// Equality and hashing are derived over the segment vector, which gives
/// the wildcard semantics directly: `Countries_0_Name`, `Countries_7_Name`
/// and `Countries_*_Name` are one and the same key, while
/// `Countries_Name` (different segment count) and `Country_0_Name`
/// (different literal) are not.
///
/// The empty path has zero segments and is its own distinct key; it denotes
/// the root of the structure.
///
/// # Example
///
/// ```
/// use unflat_path::NormalizedPath;
///
/// let a = NormalizedPath::parse("Countries_0_Name", '_');
/// let b = NormalizedPath::parse("Countries_7_Name", '_');
/// let c = NormalizedPath::parse("Countries_Name", '_');
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedPath {
    segments: Vec<Segment>,
}

impl NormalizedPath {
    /// The empty path denoting the root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Split `path` on `delimiter` and normalize every segment.
    ///
    /// The empty string parses to the root path.
    pub fn parse(path: &str, delimiter: char) -> Self {
        if path.is_empty() {
            return Self::root();
        }
        Self {
            segments: path.split(delimiter).map(Segment::normalize).collect(),
        }
    }

    /// Append one raw segment, normalizing it.
    pub fn push(&mut self, raw: &str) {
        self.segments.push(Segment::normalize(raw));
    }

    /// The normalized segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Wildcard-aware prefix test: true when `prefix`'s segments are the
    /// leading segments of `self`. Every path starts with the root path and
    /// with itself.
    pub fn starts_with(&self, prefix: &NormalizedPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for NormalizedPath {
    /// Joins segments with `_` and writes index segments as `*`. Intended
    /// for diagnostics; the original delimiter is not retained.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("_")?;
            }
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Index => f.write_str("*")?,
            }
        }
        Ok(())
    }
}
