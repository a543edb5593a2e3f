use std::{ops::Range, sync::LazyLock};

use regex::Regex;
use tracing::{debug, instrument};

use crate::{
    model::{ParseResult, TagVocabulary, TaggedSegment},
    utils::collapse_excess_newlines,
};

/// Regex to match fenced code blocks, so tag-like text inside them is never mistaken for trigger tags.
///
/// Only complete marker pairs form a fence; a lone trailing marker leaves the remainder unmasked.
static CODE_FENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());

/// Regex to match an opening tag marker, capturing the tag name
static OPEN_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<([a-zA-Z_][a-zA-Z0-9_]*)>").unwrap());

/// Regex to match any tag marker, opening or closing, capturing the tag name
static TAG_MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?([a-zA-Z_][a-zA-Z0-9_]*)>").unwrap());

/// An opening tag with no matching closing marker anywhere after it
struct UnclosedOpening {
    tag: String,
    /// Byte offset of the `<` of the opening marker
    start: usize,
    /// Byte offset right after the opening marker
    body_start: usize,
}

/// Extracts the tagged segments from a complete AI response.
///
/// The response is processed in four fixed stages: fenced code blocks are masked out, properly paired
/// vocabulary tags are extracted non-greedily in document order, a single trailing unclosed tag is recovered as
/// a best effort against truncated output, and finally every consumed span plus any stray vocabulary marker is
/// stripped from the visible text. Tag-shaped text outside the vocabulary stays literal.
///
/// This never fails: malformed input degrades to zero segments with the text passed through as clean content.
#[instrument(skip_all, fields(len = content.len()))]
pub fn parse(content: &str, vocabulary: &TagVocabulary) -> ParseResult {
    let masked = fenced_spans(content);

    let mut segments: Vec<TaggedSegment> = Vec::new();
    let mut removals: Vec<Range<usize>> = Vec::new();

    // Paired extraction: leftmost-first, non-overlapping, each opening bound to the nearest closing marker.
    // Nested same-name tags are deliberately not special-cased, so an inner pair ends up as literal text that
    // the cleanup stage strips as stray markers.
    let mut cursor = 0;
    for captures in OPEN_TAG_REGEX.captures_iter(content) {
        let opening = captures.get(0).unwrap();
        if opening.start() < cursor || within(&masked, opening.start()) {
            continue;
        }
        let tag = captures.get(1).unwrap().as_str();
        if !vocabulary.contains(tag) {
            continue;
        }
        if let Some(close_start) = find_closing(content, tag, opening.end(), &masked) {
            let end = close_start + tag.len() + 3;
            segments.push(TaggedSegment {
                tag: tag.to_owned(),
                content: content[opening.end()..close_start].trim().to_owned(),
                start_offset: opening.start(),
                end_offset: end,
            });
            removals.push(opening.start()..end);
            cursor = end;
        }
    }

    // Trailing-unclosed recovery: only the last tag left open is salvageable, earlier unclosed openings are
    // assumed superseded and discarded. Recovery is skipped when that tag already produced a paired segment.
    let unclosed = unclosed_openings(content, vocabulary, &masked);
    if let Some((ix, last)) = unclosed.iter().enumerate().next_back()
        && !segments.iter().any(|s| s.tag == last.tag)
    {
        let body_end = unclosed.get(ix + 1).map(|next| next.start).unwrap_or(content.len());
        debug!("Recovering unclosed trailing tag '{}'", last.tag);
        segments.push(TaggedSegment {
            tag: last.tag.clone(),
            content: content[last.body_start..body_end].trim().to_owned(),
            start_offset: last.start,
            end_offset: body_end,
        });
        removals.push(last.start..body_end);
    }

    // Cleanup: besides the consumed spans, strip stray vocabulary markers that resolved into no segment.
    // Anything inside a code fence stays verbatim, and so do unknown tags.
    for captures in TAG_MARKER_REGEX.captures_iter(content) {
        let marker = captures.get(0).unwrap();
        if within(&masked, marker.start()) || removals.iter().any(|r| r.contains(&marker.start())) {
            continue;
        }
        if vocabulary.contains(captures.get(1).unwrap().as_str()) {
            removals.push(marker.range());
        }
    }

    let clean_content = collapse_excess_newlines(remove_spans(content, removals));
    segments.sort_by_key(|s| s.start_offset);

    ParseResult { clean_content, segments }
}

/// Returns the spans of all fenced code blocks in the content
fn fenced_spans(content: &str) -> Vec<Range<usize>> {
    CODE_FENCE_REGEX.find_iter(content).map(|m| m.range()).collect()
}

/// Whether the given byte offset falls inside any of the spans
fn within(spans: &[Range<usize>], offset: usize) -> bool {
    spans.iter().any(|s| s.contains(&offset))
}

/// Finds the start offset of the nearest unmasked `</tag>` marker at or after `from`
fn find_closing(content: &str, tag: &str, from: usize, masked: &[Range<usize>]) -> Option<usize> {
    let closing = format!("</{tag}>");
    let mut search = from;
    while let Some(rel) = content[search..].find(&closing) {
        let at = search + rel;
        if within(masked, at) {
            search = at + closing.len();
            continue;
        }
        return Some(at);
    }
    None
}

/// Collects every unmasked, vocabulary-valid opening tag with no matching closing marker after it, in document
/// order
fn unclosed_openings(content: &str, vocabulary: &TagVocabulary, masked: &[Range<usize>]) -> Vec<UnclosedOpening> {
    OPEN_TAG_REGEX
        .captures_iter(content)
        .filter_map(|captures| {
            let opening = captures.get(0).unwrap();
            let tag = captures.get(1).unwrap().as_str();
            if within(masked, opening.start())
                || !vocabulary.contains(tag)
                || content[opening.end()..].contains(&format!("</{tag}>"))
            {
                return None;
            }
            Some(UnclosedOpening {
                tag: tag.to_owned(),
                start: opening.start(),
                body_start: opening.end(),
            })
        })
        .collect()
}

/// Builds a new string from the parts of the text not covered by the removal spans.
///
/// Spans may overlap (a recovered tail can swallow a paired segment inside it), so they are merged first.
fn remove_spans(text: &str, mut spans: Vec<Range<usize>>) -> String {
    spans.sort_by_key(|r| r.start);

    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;
    for span in spans {
        if span.start > last_end {
            result.push_str(&text[last_end..span.start]);
        }
        last_end = last_end.max(span.end);
    }
    result.push_str(&text[last_end..]);
    result
}
