use serde::{Deserialize, Serialize};

use crate::model::{DetectedTrigger, TaggedSegment};

/// Why a trigger is, or isn't, surfaced by the host UI
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(debug_assertions, derive(Debug))]
#[serde(rename_all = "snake_case")]
pub enum VisibilityReason {
    /// User-defined trigger, always surfaced
    Custom,
    /// Built-in trigger the user promoted to visible
    Registered,
    /// Built-in trigger, used internally but not surfaced
    HiddenBuiltin,
}

impl VisibilityReason {
    pub fn is_visible(self) -> bool {
        !matches!(self, VisibilityReason::HiddenBuiltin)
    }
}

/// Classifies a trigger name against the custom and registered sets, case-insensitively.
///
/// Built-in triggers drive the AI response format but stay invisible by default; only user-defined triggers and
/// built-ins explicitly promoted into the registered set get a collapsible bar in the chat.
pub fn visibility_of(name: &str, custom: &[String], registered: &[String]) -> VisibilityReason {
    if contains_ci(custom, name) {
        VisibilityReason::Custom
    } else if contains_ci(registered, name) {
        VisibilityReason::Registered
    } else {
        VisibilityReason::HiddenBuiltin
    }
}

/// Whether a trigger bar should be shown for the given trigger name
pub fn should_show(name: &str, custom: &[String], registered: &[String]) -> bool {
    visibility_of(name, custom, registered).is_visible()
}

/// Keeps only the detections the host UI should surface
pub fn filter_visible_detections<'a>(
    detections: &'a [DetectedTrigger],
    custom: &[String],
    registered: &[String],
) -> Vec<&'a DetectedTrigger> {
    detections.iter().filter(|d| should_show(&d.name, custom, registered)).collect()
}

/// Keeps only the parsed segments the host UI should surface, matching on the tag name
pub fn filter_visible_segments<'a>(
    segments: &'a [TaggedSegment],
    custom_tags: &[String],
    registered_tags: &[String],
) -> Vec<&'a TaggedSegment> {
    segments.iter().filter(|s| should_show(&s.tag, custom_tags, registered_tags)).collect()
}

/// Promotes a built-in trigger into the registered set, making it visible; idempotent
pub fn promote(name: &str, registered: &mut Vec<String>) {
    if !contains_ci(registered, name) {
        registered.push(name.to_owned());
    }
}

/// Demotes a registered trigger back to hidden
pub fn demote(name: &str, registered: &mut Vec<String>) {
    registered.retain(|r| !r.eq_ignore_ascii_case(name));
}

fn contains_ci(names: &[String], name: &str) -> bool {
    names.iter().any(|n| n.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{TriggerCategory, TriggerDefinition};

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_visibility_classification() {
        let custom = names(&["galaxy brain"]);
        let registered = names(&["reason"]);
        assert_eq!(visibility_of("Galaxy Brain", &custom, &registered), VisibilityReason::Custom);
        assert_eq!(visibility_of("REASON", &custom, &registered), VisibilityReason::Registered);
        assert_eq!(visibility_of("plan", &custom, &registered), VisibilityReason::HiddenBuiltin);
        assert!(!VisibilityReason::HiddenBuiltin.is_visible());
    }

    #[test]
    fn test_filter_visible_detections() {
        let defs = vec![
            TriggerDefinition::custom("reason", TriggerCategory::Reasoning, "a"),
            TriggerDefinition::custom("galaxy brain", TriggerCategory::Creative, "b"),
        ];
        let detections: Vec<_> = defs.iter().map(crate::model::DetectedTrigger::from_definition).collect();

        let visible = filter_visible_detections(&detections, &names(&["galaxy brain"]), &[]);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "galaxy brain");
    }

    #[test]
    fn test_filter_visible_segments_by_tag() {
        let segments = vec![
            TaggedSegment {
                tag: "reason".into(),
                content: "hidden".into(),
                start_offset: 0,
                end_offset: 10,
            },
            TaggedSegment {
                tag: "galaxy_brain".into(),
                content: "shown".into(),
                start_offset: 10,
                end_offset: 20,
            },
        ];
        let visible = filter_visible_segments(&segments, &names(&["galaxy_brain"]), &[]);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].content, "shown");
    }

    #[test]
    fn test_promote_and_demote() {
        let mut registered = Vec::new();
        promote("reason", &mut registered);
        promote("Reason", &mut registered);
        assert_eq!(registered, vec!["reason".to_string()]);

        demote("REASON", &mut registered);
        assert!(registered.is_empty());
    }
}
