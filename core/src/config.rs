//! Typer options.
//!
//! Every field has a default so that an empty `[typer]` table, or none at
//! all, is a valid configuration.

use crate::event::{
    DEFAULT_LETTER_DELAY, DEFAULT_SLEEP, DEFAULT_TO_TYPE, RemoveConfig, SleepConfig, TypeConfig,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TyperOptions {
    /// Text shown before the first event runs.
    pub initial_text: String,
    /// Record a timeline of everything the typer does.
    pub record_timeline: bool,
    /// Fallback values for steps that leave a field out.
    pub defaults: Defaults,
}

impl Default for TyperOptions {
    fn default() -> Self {
        Self {
            initial_text: String::new(),
            record_timeline: false,
            defaults: Defaults::default(),
        }
    }
}

impl TyperOptions {
    pub fn with_initial_text(mut self, text: impl Into<String>) -> Self {
        self.initial_text = text.into();
        self
    }

    pub fn recording(mut self) -> Self {
        self.record_timeline = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Defaults {
    pub to_type: String,
    pub type_delay_ms: u64,
    pub remove_delay_ms: u64,
    pub sleep_ms: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            to_type: DEFAULT_TO_TYPE.to_string(),
            type_delay_ms: DEFAULT_LETTER_DELAY.as_millis() as u64,
            remove_delay_ms: DEFAULT_LETTER_DELAY.as_millis() as u64,
            sleep_ms: DEFAULT_SLEEP.as_millis() as u64,
        }
    }
}

impl Defaults {
    pub fn type_config(&self, text: Option<&str>, delay_ms: Option<u64>) -> TypeConfig {
        TypeConfig {
            to_type: text.unwrap_or(&self.to_type).to_string(),
            time_between_letter: Duration::from_millis(delay_ms.unwrap_or(self.type_delay_ms)),
        }
    }

    pub fn remove_config(&self, count: Option<usize>, delay_ms: Option<u64>) -> RemoveConfig {
        RemoveConfig {
            char_count: count,
            time_between_letter: Duration::from_millis(delay_ms.unwrap_or(self.remove_delay_ms)),
        }
    }

    pub fn sleep_config(&self, ms: Option<u64>) -> SleepConfig {
        SleepConfig::from_millis(ms.unwrap_or(self.sleep_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let options: TyperOptions = toml::from_str(
            r#"
            initial_text = "> "
            [defaults]
            sleep_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(options.initial_text, "> ");
        assert!(!options.record_timeline);
        assert_eq!(options.defaults.sleep_ms, 250);
        assert_eq!(options.defaults.type_delay_ms, 100);
    }

    #[test]
    fn test_defaults_fill_configs() {
        let defaults = Defaults {
            type_delay_ms: 40,
            ..Default::default()
        };
        let config = defaults.type_config(None, None);
        assert_eq!(config.to_type, DEFAULT_TO_TYPE);
        assert_eq!(config.time_between_letter, Duration::from_millis(40));

        let config = defaults.type_config(Some("abc"), Some(10));
        assert_eq!(config, TypeConfig::new("abc").with_delay(Duration::from_millis(10)));

        assert_eq!(defaults.sleep_config(None).ms, Duration::from_millis(1000));
        assert!(defaults.remove_config(None, None).removes_all());
    }
}
