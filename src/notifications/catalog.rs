//! Strategy description catalog
//!
//! Descriptions live in strategy_descriptions.yaml at the crate root and
//! are compiled into the binary. They only feed the notification footer,
//! so a broken catalog costs the footer, never the run.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;

const EMBEDDED: &str = include_str!("../../strategy_descriptions.yaml");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    strategies: HashMap<String, StrategyEntry>,
}

#[derive(Debug, Deserialize)]
struct StrategyEntry {
    #[serde(default)]
    descriptions: HashMap<String, String>,
}

pub struct StrategyCatalog {
    strategies: HashMap<String, StrategyEntry>,
}

impl StrategyCatalog {
    pub fn embedded() -> Self {
        Self::from_yaml(EMBEDDED)
    }

    fn from_yaml(raw: &str) -> Self {
        match serde_yaml::from_str::<CatalogFile>(raw) {
            Ok(file) => Self {
                strategies: file.strategies,
            },
            Err(e) => {
                warn!(error = %e, "strategy catalog failed to parse");
                Self {
                    strategies: HashMap::new(),
                }
            }
        }
    }

    /// Localized description for a strategy, falling back to English.
    /// Empty when the strategy is unknown.
    pub fn description(&self, strategy_key: &str, locale: &str) -> String {
        let Some(entry) = self.strategies.get(strategy_key) else {
            warn!(strategy = strategy_key, "strategy not in catalog");
            return String::new();
        };

        entry
            .descriptions
            .get(locale)
            .or_else(|| entry.descriptions.get("en"))
            .map(|text| text.trim().to_string())
            .unwrap_or_default()
    }
}
