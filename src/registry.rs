use tracing::{debug, instrument};

use crate::{
    builtins::BUILT_IN_TRIGGERS,
    errors::{RemoveError, UpdateError, UpsertError},
    model::{TagVocabulary, TriggerDefinition, TriggerOrigin},
};

/// An ordered collection of trigger definitions: the built-in catalog with a mutable user overlay on top.
///
/// The registry itself is a plain value. Reads produce a fresh merged snapshot, so handing clones of the merged
/// view to other tasks is always safe; only `upsert`/`remove`/`set_enabled` mutate the overlay, and serializing
/// those writes is the responsibility of whoever owns the registry (see [`crate::storage::TriggerStore`]).
#[derive(Clone, Default)]
#[cfg_attr(debug_assertions, derive(Debug))]
pub struct TriggerRegistry {
    /// User-defined entries, in insertion order; wins over builtins on case-insensitive keyword identity
    overlay: Vec<TriggerDefinition>,
}

impl TriggerRegistry {
    /// Creates a registry with an empty overlay, exposing just the built-in catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry from a previously persisted overlay
    pub fn with_overlay(overlay: Vec<TriggerDefinition>) -> Self {
        TriggerRegistry { overlay }
    }

    /// The built-in trigger catalog, without any user overlay applied
    pub fn builtins() -> &'static [TriggerDefinition] {
        &BUILT_IN_TRIGGERS
    }

    /// The user overlay entries, as persisted
    pub fn overlay(&self) -> &[TriggerDefinition] {
        &self.overlay
    }

    /// Returns the merged view: every built-in definition with overlay entries replacing them in place on
    /// case-insensitive keyword identity, and overlay-only entries appended in insertion order
    pub fn load(&self) -> Vec<TriggerDefinition> {
        let mut merged: Vec<TriggerDefinition> = BUILT_IN_TRIGGERS.clone();
        for entry in &self.overlay {
            match merged.iter_mut().find(|d| d.matches_keyword(&entry.keyword)) {
                Some(existing) => *existing = entry.clone(),
                None => merged.push(entry.clone()),
            }
        }
        merged
    }

    /// Returns the merged definitions detection should consider
    pub fn enabled(&self) -> Vec<TriggerDefinition> {
        self.load().into_iter().filter(|d| d.enabled).collect()
    }

    /// Finds a definition on the merged view by its keyword, case-insensitively
    pub fn find(&self, keyword: &str) -> Option<TriggerDefinition> {
        self.load().into_iter().find(|d| d.matches_keyword(keyword))
    }

    /// The closed set of tag names derived from every known trigger, shared with the parser.
    ///
    /// Disabled triggers contribute their tag too: a tag emitted by the AI for a trigger the user has since
    /// disabled should still be stripped from the visible reply rather than rendered as literal markup.
    pub fn vocabulary(&self) -> TagVocabulary {
        self.load().iter().map(|d| d.tag()).collect()
    }

    /// Inserts or replaces a user-defined trigger as a whole-record replacement.
    ///
    /// Fails closed when the keyword is blank, when no valid tag name can be derived from it, or when the derived
    /// tag collides with the tag of a different keyword already present in the merged view.
    #[instrument(skip_all, fields(keyword = %definition.keyword))]
    pub fn upsert(&mut self, mut definition: TriggerDefinition) -> Result<(), UpsertError> {
        definition.keyword = definition.keyword.trim().to_owned();
        if definition.keyword.is_empty() {
            return Err(UpsertError::Invalid("The trigger keyword cannot be empty"));
        }
        if definition.instruction.trim().is_empty() {
            return Err(UpsertError::Invalid("The trigger instruction cannot be empty"));
        }
        let tag = definition.tag();
        if !TagVocabulary::is_valid_tag_name(&tag) {
            return Err(UpsertError::Invalid(
                "The trigger keyword must contain at least one alphanumeric character",
            ));
        }
        // Two keywords deriving to the same tag would make the parser output ambiguous
        if let Some(existing) = self
            .load()
            .into_iter()
            .find(|d| !d.matches_keyword(&definition.keyword) && d.tag() == tag)
        {
            return Err(UpsertError::TagCollision {
                tag,
                existing_keyword: existing.keyword,
            });
        }
        definition.origin = TriggerOrigin::Custom;

        debug!("Upserting '{}' into the overlay", definition.keyword);
        match self.overlay.iter_mut().find(|d| d.matches_keyword(&definition.keyword)) {
            Some(existing) => *existing = definition,
            None => self.overlay.push(definition),
        }
        Ok(())
    }

    /// Removes the overlay entry for the given keyword.
    ///
    /// Removing a built-in trigger that carries user state reverts it to its shipped definition; built-ins
    /// without user state are not removable, they can only be disabled.
    #[instrument(skip(self))]
    pub fn remove(&mut self, keyword: &str) -> Result<(), RemoveError> {
        if let Some(ix) = self.overlay.iter().position(|d| d.matches_keyword(keyword)) {
            self.overlay.remove(ix);
            return Ok(());
        }
        if BUILT_IN_TRIGGERS.iter().any(|d| d.matches_keyword(keyword)) {
            Err(RemoveError::NotRemovable)
        } else {
            Err(RemoveError::NotFound)
        }
    }

    /// Sets whether detection considers the given trigger.
    ///
    /// Built-in triggers get copied into the overlay with the flag flipped, keeping their built-in provenance.
    #[instrument(skip(self))]
    pub fn set_enabled(&mut self, keyword: &str, enabled: bool) -> Result<(), UpdateError> {
        if let Some(entry) = self.overlay.iter_mut().find(|d| d.matches_keyword(keyword)) {
            entry.enabled = enabled;
            return Ok(());
        }
        match BUILT_IN_TRIGGERS.iter().find(|d| d.matches_keyword(keyword)) {
            Some(builtin) => {
                let mut copy = builtin.clone();
                copy.enabled = enabled;
                self.overlay.push(copy);
                Ok(())
            }
            None => Err(UpdateError::NotFound),
        }
    }

    /// Flips the enabled flag of the given trigger
    pub fn toggle(&mut self, keyword: &str) -> Result<(), UpdateError> {
        let enabled = self.find(keyword).ok_or(UpdateError::NotFound)?.enabled;
        self.set_enabled(keyword, !enabled)
    }

    /// Discards the whole user overlay, reverting to the built-in catalog
    pub fn reset(&mut self) {
        self.overlay.clear();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::TriggerCategory;

    #[test]
    fn test_empty_overlay_loads_builtins() {
        let registry = TriggerRegistry::new();
        assert_eq!(registry.load().len(), TriggerRegistry::builtins().len());
        assert!(registry.find("reason").is_some());
    }

    #[test]
    fn test_custom_overrides_builtin_in_place() {
        let mut registry = TriggerRegistry::new();
        let builtin_pos = registry.load().iter().position(|d| d.matches_keyword("reason")).unwrap();

        let custom = TriggerDefinition::custom("Reason", TriggerCategory::Reasoning, "my own wording");
        registry.upsert(custom).unwrap();

        let merged = registry.load();
        assert_eq!(merged.len(), TriggerRegistry::builtins().len());
        assert_eq!(merged[builtin_pos].instruction, "my own wording");
        assert!(merged[builtin_pos].is_custom());

        let loaded = registry.find("reason").unwrap();
        assert_eq!(loaded.instruction, "my own wording");
    }

    #[test]
    fn test_upsert_appends_new_keywords() {
        let mut registry = TriggerRegistry::new();
        registry
            .upsert(TriggerDefinition::custom("galaxy brain", TriggerCategory::Creative, "go wild"))
            .unwrap();

        let merged = registry.load();
        assert_eq!(merged.len(), TriggerRegistry::builtins().len() + 1);
        assert_eq!(merged.last().unwrap().keyword, "galaxy brain");
        assert!(registry.vocabulary().contains("galaxy_brain"));
    }

    #[test]
    fn test_upsert_rejects_blank_and_symbol_only_keywords() {
        let mut registry = TriggerRegistry::new();
        assert!(matches!(
            registry.upsert(TriggerDefinition::custom("   ", TriggerCategory::Reasoning, "x")),
            Err(UpsertError::Invalid(_))
        ));
        assert!(matches!(
            registry.upsert(TriggerDefinition::custom("!!!", TriggerCategory::Reasoning, "x")),
            Err(UpsertError::Invalid(_))
        ));
        assert!(matches!(
            registry.upsert(TriggerDefinition::custom("okay", TriggerCategory::Reasoning, "  ")),
            Err(UpsertError::Invalid(_))
        ));
    }

    #[test]
    fn test_upsert_fails_closed_on_tag_collision() {
        let mut registry = TriggerRegistry::new();
        // The double space makes this a different keyword than the builtin, but it derives to the same tag
        let err = registry
            .upsert(TriggerDefinition::custom("deep  research ", TriggerCategory::Research, "x"))
            .err();
        match err {
            Some(UpsertError::TagCollision { tag, existing_keyword }) => {
                assert_eq!(tag, "deep_research");
                assert_eq!(existing_keyword, "deep research");
            }
            other => panic!("expected a tag collision, got {other:?}"),
        }
        // The merged view is untouched
        assert_eq!(registry.overlay().len(), 0);
    }

    #[test]
    fn test_remove_builtin_is_rejected() {
        let mut registry = TriggerRegistry::new();
        assert!(matches!(registry.remove("reason"), Err(RemoveError::NotRemovable)));
        assert!(matches!(registry.remove("no-such-trigger"), Err(RemoveError::NotFound)));
    }

    #[test]
    fn test_remove_reverts_overlaid_builtin() {
        let mut registry = TriggerRegistry::new();
        registry
            .upsert(TriggerDefinition::custom("reason", TriggerCategory::Reasoning, "custom wording"))
            .unwrap();
        registry.remove("REASON").unwrap();
        assert_eq!(registry.find("reason").unwrap().instruction, BUILT_IN_TRIGGERS[0].instruction);
    }

    #[test]
    fn test_set_enabled_copies_builtin_into_overlay() {
        let mut registry = TriggerRegistry::new();
        registry.set_enabled("plan", false).unwrap();

        let plan = registry.find("plan").unwrap();
        assert!(!plan.enabled);
        assert!(!plan.is_custom());
        assert_eq!(registry.overlay().len(), 1);
        assert!(!registry.enabled().iter().any(|d| d.matches_keyword("plan")));

        // The tag stays in the vocabulary even while disabled
        assert!(registry.vocabulary().contains("plan"));
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut registry = TriggerRegistry::new();
        registry.toggle("plan").unwrap();
        assert!(!registry.find("plan").unwrap().enabled);
        registry.toggle("plan").unwrap();
        assert!(registry.find("plan").unwrap().enabled);
        assert!(matches!(registry.toggle("missing"), Err(UpdateError::NotFound)));
    }

    #[test]
    fn test_reset_discards_overlay() {
        let mut registry = TriggerRegistry::new();
        registry
            .upsert(TriggerDefinition::custom("extra", TriggerCategory::Coding, "x"))
            .unwrap();
        registry.set_enabled("reason", false).unwrap();
        registry.reset();
        assert_eq!(registry.overlay().len(), 0);
        assert!(registry.find("reason").unwrap().enabled);
        assert!(registry.find("extra").is_none());
    }
}
