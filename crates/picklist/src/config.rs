//! Declarative autocomplete configuration.
//!
//! Everything about an autocomplete that is plain data can be loaded from
//! TOML or JSON. Callbacks (custom filters, row delegates, change handlers)
//! are attached in code afterwards.
//!
//! # Example
//!
//! ```
//! use picklist::config::AutocompleteConfig;
//!
//! let config = AutocompleteConfig::from_toml_str(r#"
//! label = "Sync search"
//! placeholder = "Type to begin searching"
//! multiple = true
//!
//! [[options]]
//! label = "Canada"
//! code = "CA"
//!
//! [[options]]
//! label = "France"
//! code = "FR"
//! "#).unwrap();
//!
//! assert!(config.multiple);
//! assert_eq!(config.options.len(), 2);
//! assert_eq!(config.debounce_ms, 600);
//! ```

use std::time::Duration;

use picklist_core::logging::targets;
use picklist_core::ConfigError;
use serde::{Deserialize, Serialize};

use crate::filter::{CaseSensitivity, MatchField, SubstringFilter};
use crate::option::PickOption;

/// Default quiet window for debounced input.
pub const DEFAULT_DEBOUNCE_MS: u64 = 600;

/// Default number of rows visible in the results panel.
pub const DEFAULT_MAX_VISIBLE_ITEMS: usize = 7;

/// Plain-data configuration of an autocomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteConfig {
    pub label: String,
    pub placeholder: String,
    pub description: String,
    /// Multi-select when true, single-select otherwise.
    pub multiple: bool,
    pub disabled: bool,
    /// Quiet window used by a `Debouncer` built from this config.
    pub debounce_ms: u64,
    pub max_visible_items: usize,
    pub case_sensitivity: CaseSensitivity,
    pub match_field: MatchField,
    pub options: Vec<PickOption>,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            placeholder: String::new(),
            description: String::new(),
            multiple: false,
            disabled: false,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_visible_items: DEFAULT_MAX_VISIBLE_ITEMS,
            case_sensitivity: CaseSensitivity::default(),
            match_field: MatchField::default(),
            options: Vec::new(),
        }
    }
}

impl AutocompleteConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.max_visible_items == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_visible_items",
                reason: "must be at least 1".into(),
            });
        }
        if self.debounce_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "debounce_ms",
                reason: "must be greater than zero".into(),
            });
        }
        tracing::debug!(
            target: targets::CONFIG,
            options = self.options.len(),
            multiple = self.multiple,
            "configuration loaded"
        );
        Ok(self)
    }

    /// The debounce window as a [`Duration`].
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// The substring filter described by `match_field` and `case_sensitivity`.
    pub fn filter(&self) -> SubstringFilter {
        SubstringFilter::new(self.match_field).with_case_sensitivity(self.case_sensitivity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = AutocompleteConfig::from_toml_str("").unwrap();
        assert_eq!(config, AutocompleteConfig::default());
        assert_eq!(config.debounce_delay(), Duration::from_millis(600));
        assert_eq!(config.filter(), SubstringFilter::default());
    }

    #[test]
    fn test_enum_fields() {
        let config = AutocompleteConfig::from_toml_str(
            r#"
            match_field = "code"
            case_sensitivity = "case_sensitive"
            options = ["Chile", { label = "Canada", code = "CA" }]
            "#,
        )
        .unwrap();

        assert_eq!(config.match_field, MatchField::Code);
        assert_eq!(config.case_sensitivity, CaseSensitivity::CaseSensitive);
        assert_eq!(
            config.options,
            vec![PickOption::text("Chile"), PickOption::labeled("Canada", "CA")]
        );
    }

    #[test]
    fn test_json() {
        let config =
            AutocompleteConfig::from_json_str(r#"{"multiple": true, "options": ["a", "b"]}"#)
                .unwrap();
        assert!(config.multiple);
        assert_eq!(config.options.len(), 2);
    }

    #[test]
    fn test_rejects_zero_rows() {
        let err = AutocompleteConfig::from_toml_str("max_visible_items = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "max_visible_items",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = AutocompleteConfig::from_toml_str("multiple = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AutocompleteConfig {
            label: "Countries".into(),
            options: vec![PickOption::labeled("France", "FR")],
            ..AutocompleteConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(AutocompleteConfig::from_toml_str(&text).unwrap(), config);
    }
}
