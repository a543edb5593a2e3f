use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::utils::derive_tag_name;

/// Category a trigger belongs to, used by hosts to group triggers and pick display styles
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[cfg_attr(debug_assertions, derive(Debug))]
pub enum TriggerCategory {
    #[serde(rename = "Reasoning & Analysis")]
    #[strum(serialize = "Reasoning & Analysis")]
    Reasoning,
    #[serde(rename = "Research & Information")]
    #[strum(serialize = "Research & Information")]
    Research,
    #[serde(rename = "Planning & Organization")]
    #[strum(serialize = "Planning & Organization")]
    Planning,
    #[serde(rename = "Communication & Style")]
    #[strum(serialize = "Communication & Style")]
    Communication,
    #[serde(rename = "Coding & Development")]
    #[strum(serialize = "Coding & Development")]
    Coding,
    #[serde(rename = "Creative & Writing")]
    #[strum(serialize = "Creative & Writing")]
    Creative,
    #[serde(rename = "Data & Analytics")]
    #[strum(serialize = "Data & Analytics")]
    Data,
    #[serde(rename = "Business & Strategy")]
    #[strum(serialize = "Business & Strategy")]
    Business,
    #[serde(rename = "Education & Learning")]
    #[strum(serialize = "Education & Learning")]
    Education,
}

/// Provenance of a trigger definition
#[derive(Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(debug_assertions, derive(Debug))]
pub enum TriggerOrigin {
    /// Shipped with the engine
    #[default]
    BuiltIn,
    /// Defined by the user
    Custom,
}

/// A named rule activating a directive when its keyword shows up in the user input.
///
/// The serialized field names are part of the persisted overlay format, so previously exported trigger sets
/// keep loading.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(debug_assertions, derive(Debug))]
pub struct TriggerDefinition {
    /// The phrase that activates the trigger, may contain spaces (e.g. "deep research")
    #[serde(rename = "trigger")]
    pub keyword: String,
    /// Category the trigger belongs to
    pub category: TriggerCategory,
    /// Directive text telling the AI how to use the corresponding tag
    #[serde(rename = "system_instruction")]
    pub instruction: String,
    /// Short usage hint shown to the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Whether detection considers this trigger
    pub enabled: bool,
    /// Provenance of the definition
    #[serde(rename = "custom", default, with = "origin_as_bool")]
    pub origin: TriggerOrigin,
}

impl TriggerDefinition {
    /// Creates a new user-defined trigger, enabled by default
    pub fn custom(
        keyword: impl Into<String>,
        category: TriggerCategory,
        instruction: impl Into<String>,
    ) -> Self {
        TriggerDefinition {
            keyword: keyword.into(),
            category,
            instruction: instruction.into(),
            example: None,
            enabled: true,
            origin: TriggerOrigin::Custom,
        }
    }

    /// The canonical tag name derived from the keyword
    pub fn tag(&self) -> String {
        derive_tag_name(&self.keyword)
    }

    /// Whether this definition was created by the user
    pub fn is_custom(&self) -> bool {
        self.origin == TriggerOrigin::Custom
    }

    /// Checks if this definition is identified by the given keyword, case-insensitively
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.keyword.eq_ignore_ascii_case(keyword.trim())
    }
}

/// The overlay format persists provenance as an optional `custom` boolean
mod origin_as_bool {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TriggerOrigin;

    pub fn serialize<S: Serializer>(origin: &TriggerOrigin, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(*origin == TriggerOrigin::Custom)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TriggerOrigin, D::Error> {
        let custom = Option::<bool>::deserialize(deserializer)?.unwrap_or_default();
        Ok(if custom { TriggerOrigin::Custom } else { TriggerOrigin::BuiltIn })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_category_display_round_trip() {
        use std::str::FromStr;
        let rendered = TriggerCategory::Reasoning.to_string();
        assert_eq!(rendered, "Reasoning & Analysis");
        assert_eq!(TriggerCategory::from_str(&rendered).unwrap(), TriggerCategory::Reasoning);
    }

    #[test]
    fn test_definition_tag_derivation() {
        let def = TriggerDefinition::custom("Deep Research", TriggerCategory::Research, "dig in");
        assert_eq!(def.tag(), "deep_research");
    }

    #[test]
    fn test_definition_keyword_match_is_case_insensitive() {
        let def = TriggerDefinition::custom("reason", TriggerCategory::Reasoning, "think");
        assert!(def.matches_keyword("Reason"));
        assert!(def.matches_keyword("  REASON "));
        assert!(!def.matches_keyword("reasoning"));
    }

    #[test]
    fn test_definition_json_field_names() {
        let def = TriggerDefinition::custom("reason", TriggerCategory::Reasoning, "think step by step");
        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(json["trigger"], "reason");
        assert_eq!(json["category"], "Reasoning & Analysis");
        assert_eq!(json["system_instruction"], "think step by step");
        assert_eq!(json["custom"], true);
    }

    #[test]
    fn test_definition_json_defaults_to_builtin() {
        let json = r#"{
            "trigger": "plan",
            "category": "Planning & Organization",
            "system_instruction": "lay out the steps",
            "enabled": true
        }"#;
        let def: TriggerDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.origin, TriggerOrigin::BuiltIn);
        assert_eq!(def.example, None);
    }
}
