//! Presentation configuration
//!
//! Defaults reproduce the birthday presentation. A JSON file can override any
//! field; missing fields keep their default.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::KeyAction;
use crate::{
    ENTRY_DELAY_MS, FUTURE_ITEMS, KEY_BACKWARD, KEY_CONFIRM, KEY_FORWARD, LETTER_TEXT,
    LIST_BASE_DELAY_MS, LIST_STAGGER_MS, REDUCED_VOLUME, TYPING_START_DELAY_MS, TYPING_TICK_MS,
};

/// Key names bound to each navigation action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: Vec<String>,
    pub confirm: Vec<String>,
    pub backward: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: vec![KEY_FORWARD.to_string()],
            confirm: vec![KEY_CONFIRM.to_string()],
            backward: vec![KEY_BACKWARD.to_string()],
        }
    }
}

impl KeyBindings {
    /// Look up the action bound to a key name
    pub fn action_for(&self, key: &str) -> Option<KeyAction> {
        if self.forward.iter().any(|k| k == key) {
            Some(KeyAction::Forward)
        } else if self.confirm.iter().any(|k| k == key) {
            Some(KeyAction::Confirm)
        } else if self.backward.iter().any(|k| k == key) {
            Some(KeyAction::Backward)
        } else {
            None
        }
    }
}

/// Timings, content and key bindings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub entry_delay_ms: u64,
    pub typing_start_delay_ms: u64,
    pub typing_tick_ms: u64,
    pub list_base_delay_ms: u64,
    pub list_stagger_ms: u64,
    pub reduced_volume: f32,
    pub letter: String,
    pub future_items: Vec<String>,
    pub keys: KeyBindings,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            entry_delay_ms: ENTRY_DELAY_MS,
            typing_start_delay_ms: TYPING_START_DELAY_MS,
            typing_tick_ms: TYPING_TICK_MS,
            list_base_delay_ms: LIST_BASE_DELAY_MS,
            list_stagger_ms: LIST_STAGGER_MS,
            reduced_volume: REDUCED_VOLUME,
            letter: LETTER_TEXT.to_string(),
            future_items: FUTURE_ITEMS.iter().map(|s| s.to_string()).collect(),
            keys: KeyBindings::default(),
        }
    }
}

impl PresentationConfig {
    /// Load from a JSON file and validate
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.typing_tick_ms == 0 {
            return Err(ConfigError::Invalid("typing_tick_ms must be > 0".to_string()));
        }
        if !(0.0..=1.0).contains(&self.reduced_volume) {
            return Err(ConfigError::Invalid(format!(
                "reduced_volume must be within 0.0..=1.0, got {}",
                self.reduced_volume
            )));
        }
        if self.letter.is_empty() {
            return Err(ConfigError::Invalid("letter must not be empty".to_string()));
        }
        Ok(())
    }

    /// Delay of future-list item `index` after the page is shown
    pub fn reveal_delay_ms(&self, index: usize) -> u64 {
        self.list_base_delay_ms
            .saturating_add((index as u64).saturating_mul(self.list_stagger_ms))
    }

    /// Time from entering the letter page until the letter is complete
    pub fn letter_duration_ms(&self) -> u64 {
        self.typing_start_delay_ms
            .saturating_add((self.letter.chars().count() as u64).saturating_mul(self.typing_tick_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let config = PresentationConfig::default();
        assert_eq!(config.entry_delay_ms, 600);
        assert_eq!(config.reveal_delay_ms(0), 300);
        assert_eq!(config.reveal_delay_ms(3), 300 + 3 * 180);
        assert_eq!(config.reduced_volume, 0.3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: PresentationConfig =
            serde_json::from_str(r#"{"typing_tick_ms": 10, "keys": {"forward": ["d"]}}"#).unwrap();
        assert_eq!(config.typing_tick_ms, 10);
        assert_eq!(config.entry_delay_ms, ENTRY_DELAY_MS);
        assert_eq!(config.keys.action_for("d"), Some(KeyAction::Forward));
        assert_eq!(config.keys.action_for(KEY_CONFIRM), Some(KeyAction::Confirm));
        assert_eq!(config.keys.action_for(KEY_FORWARD), None);
    }

    #[test]
    fn test_validate_rejects_zero_tick() {
        let config = PresentationConfig {
            typing_tick_ms: 0,
            ..PresentationConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_loud_volume() {
        let config = PresentationConfig {
            reduced_volume: 1.5,
            ..PresentationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = PresentationConfig::load("/nonexistent/keepsake.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
