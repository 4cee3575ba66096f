use std::collections::HashMap;

use crate::catalog::TitleId;

/// Resolves a raw character code into a display name
///
/// Two-step lookup: title code table to canonical name (with the catalog's
/// safe fallback), then an optional user-supplied override keyed by the
/// canonical name. Blank overrides are ignored.
#[derive(Debug, Clone, Default)]
pub struct CharacterResolver {
    overrides: HashMap<String, String>,
}

impl CharacterResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Replace the override table (config hot reload)
    pub fn set_overrides(&mut self, overrides: HashMap<String, String>) {
        self.overrides = overrides;
    }

    /// Canonical name for a raw character code
    pub fn canonical(&self, title: TitleId, code: u8) -> &'static str {
        title.character_name(code)
    }

    /// Display name for a raw character code
    ///
    /// An override only applies if it is non-empty after trimming; a blank
    /// entry in the config must not blank out the character label.
    pub fn resolve(&self, title: TitleId, code: u8) -> String {
        let canonical = title.character_name(code);
        match self.overrides.get(canonical) {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => canonical.to_string(),
        }
    }
}
