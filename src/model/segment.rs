use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A parsed, tagged span of AI-produced text.
///
/// Offsets are byte positions into the original input string and cover the whole tagged span, opening marker
/// included, so `start_offset < end_offset` always holds even for an empty tag body.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(debug_assertions, derive(Debug))]
pub struct TaggedSegment {
    /// The tag name, always a member of the vocabulary the parser was given
    pub tag: String,
    /// The tag body, trimmed of leading and trailing whitespace
    pub content: String,
    /// Byte offset where the tagged span starts in the original input
    pub start_offset: usize,
    /// Byte offset where the tagged span ends in the original input
    pub end_offset: usize,
}

/// The outcome of parsing a complete AI response
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(debug_assertions, derive(Debug))]
pub struct ParseResult {
    /// The input with every recognized tag span removed and whitespace collapsed
    pub clean_content: String,
    /// The extracted segments, ordered by start offset
    pub segments: Vec<TaggedSegment>,
}

/// The closed set of tag names the parser recognizes as meaningful.
///
/// The vocabulary is shared with the detector through the registry: it holds the derived tag name of every known
/// trigger. Tag-shaped text outside this set is treated as ordinary literal content, so hallucinated tags never
/// surface as segments.
#[derive(Clone, Default)]
#[cfg_attr(debug_assertions, derive(Debug))]
pub struct TagVocabulary {
    tags: HashSet<String>,
}

impl TagVocabulary {
    /// Checks whether a candidate string has the shape of a tag name (`[a-zA-Z_][a-zA-Z0-9_]*`)
    pub fn is_valid_tag_name(candidate: &str) -> bool {
        /// Regex to match a full tag name
        static TAG_NAME_REGEX: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap());

        TAG_NAME_REGEX.is_match(candidate)
    }

    /// Whether the vocabulary recognizes the given tag name
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// The number of known tags
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TagVocabulary {
    /// Builds a vocabulary from tag names, silently dropping anything that isn't a valid tag name
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        TagVocabulary {
            tags: iter
                .into_iter()
                .map(Into::into)
                .filter(|t| Self::is_valid_tag_name(t))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tag_names() {
        assert!(TagVocabulary::is_valid_tag_name("reason"));
        assert!(TagVocabulary::is_valid_tag_name("deep_research"));
        assert!(TagVocabulary::is_valid_tag_name("_private"));
        assert!(TagVocabulary::is_valid_tag_name("v2"));
    }

    #[test]
    fn test_invalid_tag_names() {
        assert!(!TagVocabulary::is_valid_tag_name(""));
        assert!(!TagVocabulary::is_valid_tag_name("2fast"));
        assert!(!TagVocabulary::is_valid_tag_name("with space"));
        assert!(!TagVocabulary::is_valid_tag_name("dash-ed"));
    }

    #[test]
    fn test_from_iter_drops_invalid_names() {
        let vocab: TagVocabulary = ["reason", "not valid", "plan"].into_iter().collect();
        assert_eq!(vocab.len(), 2);
        assert!(vocab.contains("reason"));
        assert!(vocab.contains("plan"));
        assert!(!vocab.contains("not valid"));
    }
}
