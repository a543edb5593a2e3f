use regex::Regex;
use tracing::{debug, instrument};

use crate::model::{DetectedTrigger, TriggerDefinition};

/// Scans the user input for enabled trigger keywords.
///
/// Matching is independent per definition and presence-based: a keyword appearing several times still yields a
/// single detection, and the result order follows the definitions order, not position in the text. Disabled
/// definitions are ignored. An empty result is a normal outcome; any fallback wording for it belongs to the
/// caller.
#[instrument(skip_all, fields(definitions = definitions.len()))]
pub fn detect(text: &str, definitions: &[TriggerDefinition]) -> Vec<DetectedTrigger> {
    let detections: Vec<DetectedTrigger> = definitions
        .iter()
        .filter(|d| d.enabled && keyword_matches(text, &d.keyword))
        .map(DetectedTrigger::from_definition)
        .collect();
    debug!("Detected {} trigger(s)", detections.len());
    detections
}

/// Checks whether the keyword occurs in the text as a whole word or phrase, case-insensitively.
///
/// Single-token keywords use boundary-anchored regex matching, so "plan" never matches inside "explained".
/// Keywords carrying whitespace or punctuation use literal containment with non-alphanumeric boundary checks
/// instead, since `\b` anchors misbehave next to non-word characters.
fn keyword_matches(text: &str, keyword: &str) -> bool {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return false;
    }

    if keyword.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword))) {
            Ok(regex) => regex.is_match(text),
            Err(_) => false,
        };
    }

    let haystack = text.to_lowercase();
    let needle = keyword.to_lowercase();
    let mut from = 0;
    while let Some(rel) = haystack[from..].find(&needle) {
        let at = from + rel;
        let end = at + needle.len();
        let boundary_before = haystack[..at].chars().next_back().is_none_or(|c| !c.is_alphanumeric());
        let boundary_after = haystack[end..].chars().next().is_none_or(|c| !c.is_alphanumeric());
        if boundary_before && boundary_after {
            return true;
        }
        from = end;
    }
    false
}
