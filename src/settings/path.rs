//! Dotted key paths (`tab.group.field`) into a settings tree.

use std::fmt;

use serde::{Serialize, Serializer};

/// Path separator between tab, group and field keys.
pub const SEPARATOR: char = '.';

/// A key path addressing one node in a settings tree.
///
/// Paths are built by joining Tab, Group and Field keys with `.`, e.g.
/// `normal.colors.text` or `content.title`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// The empty (root) path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted path. Empty segments (`a..b`, leading or trailing dots) are dropped.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split(SEPARATOR)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Build a path from individual segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Return a new path with `key` appended.
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.to_owned());
        Self { segments }
    }

    /// Return a new path with all of `other`'s segments appended.
    pub fn join(&self, other: &KeyPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// The path without its last segment, or `None` for the root path.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// The last segment, if any.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// All segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` for the root path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, "{SEPARATOR}")?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for KeyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let path = KeyPath::parse("normal.colors.text");
        assert_eq!(path.len(), 3);
        assert_eq!(path.to_string(), "normal.colors.text");
    }

    #[test]
    fn test_parse_drops_empty_segments() {
        let path = KeyPath::parse(".a..b.");
        assert_eq!(path.segments(), &["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn test_child_and_parent() {
        let group = KeyPath::parse("content");
        let field = group.child("title");
        assert_eq!(field.to_string(), "content.title");
        assert_eq!(field.parent(), Some(group));
        assert_eq!(KeyPath::root().parent(), None);
    }

    #[test]
    fn test_join() {
        let base = KeyPath::parse("normal.colors");
        let rel = KeyPath::parse("text");
        assert_eq!(base.join(&rel).to_string(), "normal.colors.text");
    }

    #[test]
    fn test_root_is_empty() {
        assert!(KeyPath::root().is_empty());
        assert_eq!(KeyPath::root().to_string(), "");
        assert_eq!(KeyPath::root().last(), None);
    }
}
