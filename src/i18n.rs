//! JSON-based localization
//!
//! Locale tables are embedded at compile time, one JSON file per language
//! with nested keys addressed in dot notation ("summary.title"). The
//! binary runs from a bare checkout in CI, so nothing is read from disk.

use serde_json::Value;
use tracing::{error, info, warn};

const EN: &str = include_str!("i18n/locales/en.json");
const ZH_CN: &str = include_str!("i18n/locales/zh_CN.json");

pub struct Translator {
    locale: String,
    messages: Value,
}

impl Translator {
    /// Builds a translator for the locale, falling back to English when
    /// the locale has no table.
    pub fn new(locale: &str) -> Self {
        let (resolved, raw) = match locale {
            "en" => ("en", EN),
            "zh_CN" => ("zh_CN", ZH_CN),
            other => {
                warn!(locale = other, "no table for locale, falling back to en");
                ("en", EN)
            }
        };

        // The embedded tables are covered by tests; a parse failure here
        // degrades to [Missing: ...] markers instead of aborting the run.
        let messages = serde_json::from_str(raw).unwrap_or_else(|e| {
            error!(locale = resolved, error = %e, "locale table failed to parse");
            Value::Null
        });

        info!(locale = resolved, "translator ready");
        Self {
            locale: resolved.to_string(),
            messages,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Looks up a dot-notation key.
    pub fn get(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => {
                error!(key, "translation key not found");
                format!("[Missing: {key}]")
            }
        }
    }

    /// Like `get`, substituting `{name}` placeholders.
    pub fn get_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.get(key);
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        let mut value = &self.messages;
        for part in key.split('.') {
            value = value.get(part)?;
        }
        Some(value)
    }
}
