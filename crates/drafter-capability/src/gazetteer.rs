//! Gazetteer dictionary matching
//!
//! A fixed `(term, type)` table scanned against the input text with
//! word-boundary, case-insensitive patterns. The table is loaded once at
//! construction; a term whose pattern fails to compile is skipped with a
//! warning rather than failing the whole table.

use drafter_state::{CapabilityError, Tag};
use regex::Regex;

/// One gazetteer entry with its compiled pattern
#[derive(Debug, Clone)]
struct Entry {
    term: String,
    kind: String,
    pattern: Regex,
}

/// Immutable gazetteer lookup table
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    entries: Vec<Entry>,
}

impl Gazetteer {
    /// Build a gazetteer from `(term, type)` pairs
    ///
    /// Entry order is preserved; match output follows table order, not
    /// position in the text.
    #[must_use]
    pub fn new<I, S, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut compiled = Vec::new();
        for (term, kind) in entries {
            let term = term.into();
            let kind = kind.into();
            let source = format!(r"(?i)\b{}\b", regex::escape(&term));
            match Regex::new(&source) {
                Ok(pattern) => compiled.push(Entry {
                    term,
                    kind,
                    pattern,
                }),
                Err(e) => {
                    tracing::warn!(term = %term, error = %e, "skipping gazetteer term");
                }
            }
        }
        Self { entries: compiled }
    }

    /// Load a gazetteer from a YAML mapping of `term: type`
    ///
    /// # Errors
    /// `CapabilityError::Prompt` is not used here; YAML parse failures are
    /// reported as `MalformedResponse` since the table is external data.
    pub fn from_yaml(yaml: &str) -> Result<Self, CapabilityError> {
        let mapping: serde_yaml::Mapping = serde_yaml::from_str(yaml)
            .map_err(|e| CapabilityError::MalformedResponse(e.to_string()))?;

        let entries = mapping.into_iter().filter_map(|(key, value)| {
            match (key.as_str(), value.as_str()) {
                (Some(term), Some(kind)) => Some((term.to_string(), kind.to_string())),
                _ => None,
            }
        });
        Ok(Self::new(entries))
    }

    /// Number of usable entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Scan text for gazetteer terms
    ///
    /// Returns one normalized tag per matching entry, deduplicated by
    /// `(lowercase(term), type)`, in table order.
    #[must_use]
    pub fn matches(&self, text: &str) -> Vec<Tag> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut seen = std::collections::HashSet::new();
        let mut tags = Vec::new();
        for entry in &self.entries {
            if entry.pattern.is_match(text) {
                // Same identity rule the aggregator uses downstream.
                let key = Tag::normalized(&entry.term, &entry.kind).identity();
                if seen.insert(key) {
                    tags.push(Tag::new(
                        entry.term.trim().to_lowercase(),
                        entry.kind.trim(),
                    ));
                }
            }
        }
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Gazetteer {
        Gazetteer::new(vec![
            ("PyTorch", "tool-or-framework"),
            ("GAN", "algorithm"),
            ("scikit-learn", "tool-or-framework"),
        ])
    }

    #[test]
    fn matches_are_case_insensitive() {
        let tags = sample().matches("We trained a gan using pytorch.");
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["pytorch", "gan"]);
    }

    #[test]
    fn matches_respect_word_boundaries() {
        // "organ" contains "gan" but not on a word boundary
        let tags = sample().matches("The organ music was lovely.");
        assert!(tags.is_empty());
    }

    #[test]
    fn matches_escape_regex_metacharacters_in_terms() {
        let tags = sample().matches("Models built with scikit-learn.");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "scikit-learn");
    }

    #[test]
    fn matches_empty_text_returns_nothing() {
        assert!(sample().matches("   ").is_empty());
    }

    #[test]
    fn matches_deduplicate_repeated_terms() {
        let tags = sample().matches("GAN here, gan there, GAN everywhere.");
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn matches_deduplicate_whitespace_variant_entries() {
        let gazetteer = Gazetteer::new(vec![
            (" GAN ", "algorithm"),
            ("GAN", "Algorithm"),
        ]);
        let tags = gazetteer.matches("A GAN was trained.");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "gan");
    }

    #[test]
    fn from_yaml_builds_table() {
        let gazetteer = Gazetteer::from_yaml("PyTorch: tool-or-framework\nGAN: algorithm\n").unwrap();
        assert_eq!(gazetteer.len(), 2);
        assert_eq!(gazetteer.matches("GAN").len(), 1);
    }

    #[test]
    fn from_yaml_rejects_non_mapping() {
        assert!(Gazetteer::from_yaml("- just\n- a\n- list\n").is_err());
    }
}
