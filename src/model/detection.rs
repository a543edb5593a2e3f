use serde::{Deserialize, Serialize};

use super::{TriggerCategory, TriggerDefinition};

/// One detection result: a trigger whose keyword showed up in the user input
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(debug_assertions, derive(Debug))]
pub struct DetectedTrigger {
    /// The trigger keyword as defined in the registry
    pub name: String,
    /// The canonical tag name the AI is instructed to wrap its output with
    pub tag: String,
    /// Category of the matched trigger
    pub category: TriggerCategory,
    /// The directive text for this trigger, verbatim from its definition
    pub instruction: String,
    /// Informational context about the detection, never re-parsed downstream
    pub metadata: DetectionMetadata,
}

/// Free-form context carried along a detection for logging and display purposes
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(debug_assertions, derive(Debug))]
pub struct DetectionMetadata {
    /// The keyword that matched in the source text
    pub matched_keyword: String,
    /// Human-readable statement of what the detection activates
    pub purpose: String,
}

impl DetectedTrigger {
    /// Builds the detection record for a matched definition
    pub fn from_definition(definition: &TriggerDefinition) -> Self {
        DetectedTrigger {
            name: definition.keyword.clone(),
            tag: definition.tag(),
            category: definition.category,
            instruction: definition.instruction.clone(),
            metadata: DetectionMetadata {
                matched_keyword: definition.keyword.to_lowercase(),
                purpose: format!(
                    "Activate the \"{}\" directive ({})",
                    definition.keyword, definition.category
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_detection_from_definition() {
        let def = TriggerDefinition::custom("Deep Research", TriggerCategory::Research, "dig deep");
        let detection = DetectedTrigger::from_definition(&def);
        assert_eq!(detection.name, "Deep Research");
        assert_eq!(detection.tag, "deep_research");
        assert_eq!(detection.instruction, "dig deep");
        assert_eq!(detection.metadata.matched_keyword, "deep research");
        assert_eq!(
            detection.metadata.purpose,
            "Activate the \"Deep Research\" directive (Research & Information)"
        );
    }
}
