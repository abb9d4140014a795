//! Local motivational message catalog.
//!
//! A pre-loaded table of template strings per category; picks uniformly at
//! random and substitutes `{placeholder}` keys from a supplied map. The
//! catalog is the offline counterpart of the remote generator and shares
//! its degrade-to-fixed-text behavior.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Fixed text used when a category has no templates.
pub const GENERIC_MOTIVATION: &str = "Stay motivated!";

/// Category of motivational message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum MotivationCategory {
    PreSession,
    MidSession,
    PostSession,
    HypeUp,
    GuiltTrip,
}

/// Per-category template lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MotivationCatalog {
    messages: HashMap<MotivationCategory, Vec<String>>,
}

impl MotivationCatalog {
    /// Parse a catalog from its JSON form:
    /// `{"preSession": ["...", ...], "hypeUp": [...], ...}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a catalog file. A missing or malformed file yields an empty
    /// catalog (every pick returns the generic fallback), never an error.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_json(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "malformed motivation catalog, using empty");
                Self::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "missing motivation catalog, using empty");
                Self::default()
            }
        }
    }

    /// Pick a random template for `category` and substitute `{key}`
    /// placeholders from `vars`.
    pub fn pick(&self, category: MotivationCategory, vars: &HashMap<String, String>) -> String {
        let Some(templates) = self.messages.get(&category).filter(|t| !t.is_empty()) else {
            return GENERIC_MOTIVATION.to_string();
        };
        let index = rand::thread_rng().gen_range(0..templates.len());
        let mut message = templates[index].clone();
        for (key, value) in vars {
            message = message.replace(&format!("{{{key}}}"), value);
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MotivationCatalog {
        MotivationCatalog::from_json(
            r#"{
                "preSession": ["Ready for {task}?", "Deep breath. {task} awaits."],
                "hypeUp": ["LET'S GO!"],
                "guiltTrip": []
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn picks_from_category_with_substitution() {
        let catalog = catalog();
        let vars = HashMap::from([("task".to_string(), "Outline".to_string())]);

        for _ in 0..16 {
            let message = catalog.pick(MotivationCategory::PreSession, &vars);
            assert!(
                message == "Ready for Outline?" || message == "Deep breath. Outline awaits.",
                "unexpected message: {message}"
            );
        }
    }

    #[test]
    fn empty_category_returns_generic_fallback() {
        let catalog = catalog();
        assert_eq!(
            catalog.pick(MotivationCategory::GuiltTrip, &HashMap::new()),
            GENERIC_MOTIVATION
        );
        assert_eq!(
            catalog.pick(MotivationCategory::MidSession, &HashMap::new()),
            GENERIC_MOTIVATION
        );
    }

    #[test]
    fn unknown_placeholders_are_left_in_place() {
        let catalog = catalog();
        let message = catalog.pick(MotivationCategory::HypeUp, &HashMap::new());
        assert_eq!(message, "LET'S GO!");
    }

    #[test]
    fn malformed_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("motivation_messages.json");
        std::fs::write(&path, "{broken").unwrap();

        let catalog = MotivationCatalog::load(&path);
        assert_eq!(
            catalog.pick(MotivationCategory::PreSession, &HashMap::new()),
            GENERIC_MOTIVATION
        );
    }
}
