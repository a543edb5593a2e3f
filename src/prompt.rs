use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::model::DetectedTrigger;

/// Fallback directive wording hosts can use when no trigger was detected.
///
/// The synthesizer itself never emits it: an empty detection list yields an empty directive, and whoever builds
/// the outgoing request decides the default.
pub const DEFAULT_INSTRUCTION: &str = "Respond helpfully, truthfully, and concisely.";

/// Heading that delimits the auxiliary context block inside a synthesized directive.
///
/// Consumers showing directive text to an end user must strip everything from this heading onwards; the block is
/// internal context for the model, never meant for display.
pub const CONTEXT_HEADING: &str = "[context]";

/// A memory item a host wants the model to be aware of, attached to the enhanced prompt
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(debug_assertions, derive(Debug))]
pub struct MemoryItem {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<String>,
}

/// Assembles the directive text to prepend to the AI request.
///
/// One line per detection, in detection order, stating the trigger name and its instruction template verbatim.
/// The auxiliary context, when given, is appended under the [`CONTEXT_HEADING`] delimiter. Pure string
/// concatenation: no validation, no category deduplication, and byte-identical output for identical inputs.
pub fn synthesize(detections: &[DetectedTrigger], auxiliary_context: Option<&str>) -> String {
    if detections.is_empty() {
        return String::new();
    }

    let mut directive = detections
        .iter()
        .map(|d| format!("{} means {}", d.name, d.instruction))
        .join("\n");

    if let Some(context) = auxiliary_context
        && !context.trim().is_empty()
    {
        directive.push_str("\n\n");
        directive.push_str(CONTEXT_HEADING);
        directive.push('\n');
        directive.push_str(context);
    }

    directive
}

/// Builds the long-form, structured system prompt for a set of active triggers.
///
/// Compared to [`synthesize`], this adds a configuration header with counts and categories, one section per
/// trigger, the internal memory sentence and selected memory items, and closing response guidelines. Like the
/// plain directive, everything past the per-trigger sections is internal context and not meant for display.
pub fn build_enhanced_prompt(
    detections: &[DetectedTrigger],
    memory_sentence: Option<&str>,
    memories: &[MemoryItem],
) -> String {
    if detections.is_empty() {
        return String::new();
    }

    let mut lines: Vec<String> = Vec::new();

    lines.push("## ACTIVE TRIGGER CONFIGURATION\n".into());
    lines.push(format!("Active Triggers: {}", detections.len()));
    let categories = detections.iter().map(|d| d.category.to_string()).unique().join(", ");
    lines.push(format!("Categories: {categories}\n"));

    for (ix, detection) in detections.iter().enumerate() {
        lines.push(format!("### Trigger {}: {}", ix + 1, detection.name));
        lines.push(format!("Instruction: {}", detection.instruction));
        lines.push(String::new());
    }

    if let Some(sentence) = memory_sentence
        && !sentence.trim().is_empty()
    {
        lines.push("## INTERNAL MEMORY CONTEXT".into());
        lines.push(sentence.to_owned());
        lines.push(String::new());
    }

    if !memories.is_empty() {
        lines.push("## RELEVANT MEMORIES".into());
        for memory in memories {
            let importance = memory
                .importance
                .as_deref()
                .map(|i| format!(" [{}]", i.to_uppercase()))
                .unwrap_or_default();
            lines.push(format!("- **{}**{importance}: {}", memory.key, memory.value));
        }
        lines.push(String::new());
    }

    lines.push("## RESPONSE GUIDELINES".into());
    lines.push("- Provide comprehensive, in-depth responses".into());
    lines.push("- Use structured thinking with tags".into());
    lines.push("- Maintain awareness of all active triggers".into());
    lines.push("- Prioritize clarity and thoroughness".into());

    lines.join("\n")
}
