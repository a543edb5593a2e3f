use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::model::{DetectedTrigger, TriggerCategory};

/// Maximum number of usage records the tracker keeps
const MAX_HISTORY: usize = 100;

/// One trigger activation, recorded after a request completed
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(debug_assertions, derive(Debug))]
pub struct TriggerUsage {
    pub name: String,
    pub tag: String,
    pub category: TriggerCategory,
    pub custom: bool,
    pub at: DateTime<Utc>,
}

impl TriggerUsage {
    /// Builds a usage record for a detection, stamped with the current time
    pub fn now(detection: &DetectedTrigger, custom: bool) -> Self {
        TriggerUsage {
            name: detection.name.clone(),
            tag: detection.tag.clone(),
            category: detection.category,
            custom,
            at: Utc::now(),
        }
    }
}

/// In-memory history of trigger activations, most recent first.
///
/// Its main product is the memory sentence: a short internal summary of recent trigger habits that callers pass
/// to the synthesizer as auxiliary context. The sentence is never shown to the user.
#[derive(Clone, Default)]
#[cfg_attr(debug_assertions, derive(Debug))]
pub struct UsageTracker {
    history: VecDeque<TriggerUsage>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a trigger activation, dropping the oldest record once the cap is reached
    pub fn record(&mut self, usage: TriggerUsage) {
        self.history.push_front(usage);
        self.history.truncate(MAX_HISTORY);
    }

    /// The recorded activations, most recent first
    pub fn history(&self) -> impl Iterator<Item = &TriggerUsage> {
        self.history.iter()
    }

    /// How many times the given trigger was activated, case-insensitively
    pub fn usage_count(&self, name: &str) -> usize {
        self.history.iter().filter(|u| u.name.eq_ignore_ascii_case(name)).count()
    }

    /// The most used trigger names with their counts, most frequent first
    pub fn frequent(&self, limit: usize) -> Vec<(String, usize)> {
        self.history
            .iter()
            .counts_by(|u| u.name.to_lowercase())
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
            .take(limit)
            .collect()
    }

    /// Builds the internal memory sentence over the most recent activations.
    ///
    /// Empty when nothing was recorded; otherwise lists the distinct custom and built-in trigger names used and
    /// closes with the most recent one and its category.
    pub fn memory_sentence(&self, limit: usize) -> String {
        let recent: Vec<&TriggerUsage> = self.history.iter().take(limit).collect();
        if recent.is_empty() {
            return String::new();
        }

        let custom_names: Vec<&str> = recent.iter().filter(|u| u.custom).map(|u| u.name.as_str()).unique().collect();
        let builtin_names: Vec<&str> =
            recent.iter().filter(|u| !u.custom).map(|u| u.name.as_str()).unique().collect();

        let mut sentence = String::new();
        if !custom_names.is_empty() {
            sentence.push_str(&format!("User employed custom triggers: {}", custom_names.join(", ")));
        }
        if !builtin_names.is_empty() {
            if !sentence.is_empty() {
                sentence.push_str("; ");
            }
            sentence.push_str(&format!("with built-in triggers: {}", builtin_names.join(", ")));
        }

        let last = recent[0];
        sentence.push_str(&format!(". Last trigger: \"{}\" ({}).", last.name, last.category));
        sentence
    }

    /// Clears the whole history
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::TriggerDefinition;

    fn usage(name: &str, custom: bool) -> TriggerUsage {
        let def = TriggerDefinition::custom(name, TriggerCategory::Reasoning, "x");
        TriggerUsage::now(&DetectedTrigger::from_definition(&def), custom)
    }

    #[test]
    fn test_empty_tracker_has_empty_sentence() {
        let tracker = UsageTracker::new();
        assert_eq!(tracker.memory_sentence(10), "");
        assert_eq!(tracker.frequent(5), vec![]);
    }

    #[test]
    fn test_memory_sentence_format() {
        let mut tracker = UsageTracker::new();
        tracker.record(usage("summarize", false));
        tracker.record(usage("galaxy brain", true));

        assert_eq!(
            tracker.memory_sentence(10),
            "User employed custom triggers: galaxy brain; with built-in triggers: summarize. \
             Last trigger: \"galaxy brain\" (Reasoning & Analysis)."
        );
    }

    #[test]
    fn test_memory_sentence_builtin_only() {
        let mut tracker = UsageTracker::new();
        tracker.record(usage("reason", false));
        assert_eq!(
            tracker.memory_sentence(10),
            "with built-in triggers: reason. Last trigger: \"reason\" (Reasoning & Analysis)."
        );
    }

    #[test]
    fn test_memory_sentence_deduplicates_names() {
        let mut tracker = UsageTracker::new();
        tracker.record(usage("reason", false));
        tracker.record(usage("reason", false));
        tracker.record(usage("reason", false));
        assert_eq!(
            tracker.memory_sentence(10),
            "with built-in triggers: reason. Last trigger: \"reason\" (Reasoning & Analysis)."
        );
    }

    #[test]
    fn test_history_is_capped() {
        let mut tracker = UsageTracker::new();
        for _ in 0..(MAX_HISTORY + 20) {
            tracker.record(usage("reason", false));
        }
        assert_eq!(tracker.history().count(), MAX_HISTORY);
        assert_eq!(tracker.usage_count("reason"), MAX_HISTORY);
    }

    #[test]
    fn test_frequent_orders_by_count() {
        let mut tracker = UsageTracker::new();
        tracker.record(usage("reason", false));
        tracker.record(usage("plan", false));
        tracker.record(usage("reason", false));
        tracker.record(usage("Reason", false));

        let frequent = tracker.frequent(2);
        assert_eq!(frequent, vec![("reason".to_string(), 3), ("plan".to_string(), 1)]);
    }
}
