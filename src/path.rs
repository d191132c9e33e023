//! Colon-delimited key paths.
//!
//! A path such as `Logging:LogLevel:Default` names a leaf in a nested settings
//! document. The colon is a reserved separator and is never escaped, so a
//! segment can not contain one.

use std::fmt;

/// Separator between path segments (the .NET configuration convention).
pub const SEPARATOR: char = ':';

/// A non-empty sequence of key segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Split a colon-joined string into a path.
    ///
    /// Every string yields at least one segment; `""` is a single empty key.
    pub fn parse(joined: &str) -> Self {
        Self {
            segments: joined.split(SEPARATOR).map(str::to_string).collect(),
        }
    }

    /// Path with one more segment appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments (always at least one).
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Colon-joined string form of the first `len` segments.
    pub fn prefix_string(&self, len: usize) -> String {
        let end = len.min(self.segments.len());
        self.segments[..end].join(SEPARATOR.to_string().as_str())
    }

    /// Whether `self` is a strict prefix of `other`.
    pub fn is_strict_prefix_of(&self, other: &KeyPath) -> bool {
        self.segments.len() < other.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl From<&str> for KeyPath {
    fn from(joined: &str) -> Self {
        KeyPath::parse(joined)
    }
}
