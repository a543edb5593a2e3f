use std::sync::LazyLock;

use regex::Regex;
use unidecode::unidecode;

/// Derives the canonical tag name for a trigger keyword.
///
/// This uses the [unidecode] crate to approximate non-ASCII characters with their closest ASCII equivalents, and then
/// converts the entire string to lowercase. Internal whitespace is replaced by a single underscore and any remaining
/// character outside `[a-z0-9_]` is stripped.
///
/// The resulting name is the XML-like delimiter the AI is instructed to use, so two keywords deriving to the same tag
/// would make detection ambiguous. That uniqueness is enforced when registering triggers, not here.
///
/// # Examples
///
/// ```rust
/// # use trigger_engine::utils::derive_tag_name;
/// assert_eq!(derive_tag_name("reason"), "reason");
/// assert_eq!(derive_tag_name("Deep  Research"), "deep_research");
/// assert_eq!(derive_tag_name("fact-check!"), "factcheck");
/// ```
pub fn derive_tag_name(keyword: impl AsRef<str>) -> String {
    /// Regex to match consecutive whitespaces
    static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
    /// Regex to match any non-allowed character on the derived tag name
    static TAG_FORBIDDEN_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9_]").unwrap());

    // Unidecode and lowercase
    let decoded = unidecode(keyword.as_ref()).to_lowercase();

    // Internal whitespace becomes a single underscore
    let underscored = WHITESPACE_REGEX.replace_all(decoded.trim(), "_");

    // Keep only allowed characters
    TAG_FORBIDDEN_CHARS.replace_all(&underscored, "").to_string()
}

/// Collapses runs of three or more consecutive newlines into exactly two and trims the surrounding whitespace.
///
/// Stripping tag spans out of a response tends to leave large vertical gaps behind; this normalizes the remaining
/// text to at most one blank line between paragraphs.
///
/// # Examples
///
/// ```rust
/// # use trigger_engine::utils::collapse_excess_newlines;
/// let text = "first\n\n\n\nsecond\n";
/// assert_eq!(collapse_excess_newlines(text), "first\n\nsecond");
/// ```
pub fn collapse_excess_newlines(text: impl AsRef<str>) -> String {
    /// Regex to match three or more consecutive newlines
    static EXCESS_NEWLINES_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

    EXCESS_NEWLINES_REGEX
        .replace_all(text.as_ref(), "\n\n")
        .trim()
        .to_string()
}
