//! Tag domain type
//!
//! A tag is a `(name, type)` pair. Identity is defined over the
//! lowercased, trimmed form of both fields: two tags with the same name
//! but different types are distinct entities (e.g. "transformer" as an
//! algorithm vs. as a tool).

use serde::{Deserialize, Serialize};

/// A candidate or selected tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name
    pub name: String,
    /// Tag type (free-form category; empty when the source did not assign one)
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Tag {
    /// Create a tag without normalization
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }

    /// Create a tag with both fields lowercased and trimmed
    #[must_use]
    pub fn normalized(name: &str, kind: &str) -> Self {
        Self {
            name: name.trim().to_lowercase(),
            kind: kind.trim().to_lowercase(),
        }
    }

    /// Identity key: `(lowercase(trim(name)), lowercase(trim(type)))`
    #[must_use]
    pub fn identity(&self) -> (String, String) {
        (
            self.name.trim().to_lowercase(),
            self.kind.trim().to_lowercase(),
        )
    }

    /// Whether either field is empty after trimming
    #[inline]
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.name.trim().is_empty() || self.kind.trim().is_empty()
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}
