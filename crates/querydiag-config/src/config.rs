use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level diagnostics configuration.
///
/// Every field is optional; an empty file yields the built-in English phrases,
/// an empty resource table and the default line terminators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsConfig {
    /// Display words used when composing messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phrases: Option<PhrasesConfig>,

    /// Resource table used to resolve keyed context labels
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub strings: HashMap<String, String>,

    /// Characters the query lexer treats as line breaks.
    /// Each entry must be a single character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_terminators: Option<Vec<String>>,

    /// Per-locale overrides layered on top of `phrases` and `strings`
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub locales: HashMap<String, LocaleConfig>,
}

impl DiagnosticsConfig {
    /// Get a locale section by name
    #[must_use]
    pub fn locale(&self, name: &str) -> Option<&LocaleConfig> {
        self.locales.get(name)
    }

    /// Get all configured locale names, sorted
    #[must_use]
    pub fn locale_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Phrase overrides with the locale section (if any) applied on top.
    ///
    /// An unknown locale contributes nothing; callers that care should check
    /// [`DiagnosticsConfig::locale`] first.
    #[must_use]
    pub fn effective_phrases(&self, locale: Option<&str>) -> PhrasesConfig {
        let base = self.phrases.clone().unwrap_or_default();
        match locale.and_then(|name| self.locale(name)) {
            Some(LocaleConfig {
                phrases: Some(overrides),
                ..
            }) => base.overlay(overrides),
            _ => base,
        }
    }

    /// Resource strings with the locale section (if any) applied on top
    #[must_use]
    pub fn effective_strings(&self, locale: Option<&str>) -> HashMap<String, String> {
        let mut strings = self.strings.clone();
        if let Some(section) = locale.and_then(|name| self.locale(name)) {
            strings.extend(
                section
                    .strings
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone())),
            );
        }
        strings
    }
}

/// Overrides for the words "near", "line" and "column"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhrasesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub near: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl PhrasesConfig {
    /// Return a copy of `self` where every value set in `other` wins
    #[must_use]
    pub fn overlay(&self, other: &Self) -> Self {
        Self {
            near: other.near.clone().or_else(|| self.near.clone()),
            line: other.line.clone().or_else(|| self.line.clone()),
            column: other.column.clone().or_else(|| self.column.clone()),
        }
    }

    pub(crate) fn entries(&self) -> [(&'static str, Option<&str>); 3] {
        [
            ("near", self.near.as_deref()),
            ("line", self.line.as_deref()),
            ("column", self.column.as_deref()),
        ]
    }
}

/// Locale-specific section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phrases: Option<PhrasesConfig>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub strings: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn german() -> LocaleConfig {
        LocaleConfig {
            phrases: Some(PhrasesConfig {
                near: Some("nahe".to_string()),
                line: Some("Zeile".to_string()),
                column: None,
            }),
            strings: HashMap::from([("ctx.select".to_string(), "SELECT-Klausel".to_string())]),
        }
    }

    #[test]
    fn test_default_config_is_empty() {
        let config = DiagnosticsConfig::default();

        assert_eq!(config.phrases, None);
        assert!(config.strings.is_empty());
        assert_eq!(config.line_terminators, None);
        assert!(config.locale_names().is_empty());
        assert_eq!(config.effective_phrases(None), PhrasesConfig::default());
    }

    #[test]
    fn test_phrases_overlay() {
        let base = PhrasesConfig {
            near: Some("near".to_string()),
            line: Some("line".to_string()),
            column: Some("column".to_string()),
        };
        let overrides = PhrasesConfig {
            near: None,
            line: Some("ln".to_string()),
            column: None,
        };

        let merged = base.overlay(&overrides);
        assert_eq!(merged.near.as_deref(), Some("near"));
        assert_eq!(merged.line.as_deref(), Some("ln"));
        assert_eq!(merged.column.as_deref(), Some("column"));
    }

    #[test]
    fn test_effective_phrases_with_locale() {
        let config = DiagnosticsConfig {
            phrases: Some(PhrasesConfig {
                near: None,
                line: None,
                column: Some("col".to_string()),
            }),
            locales: HashMap::from([("de".to_string(), german())]),
            ..DiagnosticsConfig::default()
        };

        let phrases = config.effective_phrases(Some("de"));
        assert_eq!(phrases.near.as_deref(), Some("nahe"));
        assert_eq!(phrases.line.as_deref(), Some("Zeile"));
        assert_eq!(phrases.column.as_deref(), Some("col"));

        // Unknown locale falls back to the top-level section
        let phrases = config.effective_phrases(Some("fr"));
        assert_eq!(phrases.near, None);
        assert_eq!(phrases.column.as_deref(), Some("col"));
    }

    #[test]
    fn test_effective_strings_with_locale() {
        let config = DiagnosticsConfig {
            strings: HashMap::from([
                ("ctx.select".to_string(), "SELECT clause".to_string()),
                ("ctx.where".to_string(), "WHERE clause".to_string()),
            ]),
            locales: HashMap::from([("de".to_string(), german())]),
            ..DiagnosticsConfig::default()
        };

        let strings = config.effective_strings(Some("de"));
        assert_eq!(strings["ctx.select"], "SELECT-Klausel");
        assert_eq!(strings["ctx.where"], "WHERE clause");

        let strings = config.effective_strings(None);
        assert_eq!(strings["ctx.select"], "SELECT clause");
    }

    #[test]
    fn test_locale_names_sorted() {
        let config = DiagnosticsConfig {
            locales: HashMap::from([
                ("fr".to_string(), LocaleConfig::default()),
                ("de".to_string(), LocaleConfig::default()),
            ]),
            ..DiagnosticsConfig::default()
        };

        assert_eq!(config.locale_names(), vec!["de", "fr"]);
    }
}
