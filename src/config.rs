//! Selector settings.
//!
//! Every field has a default, so a config file only needs the values it changes:
//!
//! ```toml
//! max_run = 10
//! week_start = "monday"
//! mode = "range"
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    CycleError, CycleLength, DEFAULT_CYCLE_LENGTH, DEFAULT_MAX_CYCLE_LENGTH, DEFAULT_MIN_CYCLE_LENGTH, MaxRun, Weekday,
};

/// How taps on the calendar build a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Each tap extends the run by one adjacent day.
    #[default]
    Extend,
    /// A first tap anchors, a second tap fills the span.
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_run must be at least 1")]
    ZeroMaxRun,

    #[error("Cycle length bounds are inverted: min {min} > max {max}")]
    InvertedBounds { min: u16, max: u16 },

    #[error("Default cycle length is invalid: {0}")]
    DefaultCycleLength(#[source] CycleError),

    #[error("Invalid TOML config: {0}")]
    Toml(String),

    #[error("Invalid JSON config: {0}")]
    Json(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Toml(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorConfig {
    /// Longest run of consecutive period days a user may select
    pub max_run: MaxRun,
    /// Lowest value offered by the cycle length picker
    pub min_cycle_length: u16,
    /// Highest value offered by the cycle length picker
    pub max_cycle_length: u16,
    /// Value the cycle length picker starts on
    pub default_cycle_length: u16,
    /// First column of the month grid
    pub week_start: Weekday,
    pub mode: SelectionMode,
    /// Whether days after today may be selected
    pub allow_future: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_run:              MaxRun::default(),
            min_cycle_length:     DEFAULT_MIN_CYCLE_LENGTH,
            max_cycle_length:     DEFAULT_MAX_CYCLE_LENGTH,
            default_cycle_length: DEFAULT_CYCLE_LENGTH,
            week_start:           Weekday::Sunday,
            mode:                 SelectionMode::Extend,
            allow_future:         false,
        }
    }
}

impl SelectorConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    /// Returns `ConfigError` if the document is malformed or fails [`Self::validate`].
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    /// Returns `ConfigError` if the document is malformed or fails [`Self::validate`].
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns `ConfigError` for inverted picker bounds or a default outside them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_cycle_length > self.max_cycle_length {
            return Err(ConfigError::InvertedBounds {
                min: self.min_cycle_length,
                max: self.max_cycle_length,
            });
        }
        self.default_cycle_length().map_err(ConfigError::DefaultCycleLength)?;
        Ok(())
    }

    /// Validates a picked value against this config's bounds.
    ///
    /// # Errors
    /// Returns `CycleError::CycleLengthOutOfRange` outside the bounds.
    pub const fn cycle_length(&self, value: u16) -> Result<CycleLength, CycleError> {
        CycleLength::new(value, self.min_cycle_length, self.max_cycle_length)
    }

    /// # Errors
    /// Returns `CycleError::CycleLengthOutOfRange` if the default lies outside the bounds.
    pub const fn default_cycle_length(&self) -> Result<CycleLength, CycleError> {
        self.cycle_length(self.default_cycle_length)
    }

    /// Values offered by the cycle length picker, in order.
    pub fn cycle_length_choices(&self) -> impl Iterator<Item = u16> {
        self.min_cycle_length..=self.max_cycle_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SelectorConfig::default();
        assert_eq!(config.max_run.get(), 7);
        assert_eq!(config.mode, SelectionMode::Extend);
        assert_eq!(config.week_start, Weekday::Sunday);
        assert_eq!(config.default_cycle_length().unwrap().get(), 28);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = SelectorConfig::from_toml_str(
            r#"
            max_run = 10
            week_start = "monday"
            mode = "range"
            "#,
        )
        .unwrap();
        assert_eq!(config.max_run.get(), 10);
        assert_eq!(config.week_start, Weekday::Monday);
        assert_eq!(config.mode, SelectionMode::Range);
        assert_eq!(config.min_cycle_length, 21);
        assert!(!config.allow_future);
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        assert_eq!(SelectorConfig::from_toml_str("").unwrap(), SelectorConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_zero_max_run() {
        let err = SelectorConfig::from_toml_str("max_run = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.to_string().contains("max_run must be at least 1"));
    }

    #[test]
    fn test_from_toml_rejects_unknown_field() {
        assert!(SelectorConfig::from_toml_str("max_days = 5").is_err());
    }

    #[test]
    fn test_validate_cases() {
        struct TestCase {
            min:         u16,
            max:         u16,
            default:     u16,
            valid:       bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                min:         21,
                max:         45,
                default:     28,
                valid:       true,
                description: "default inside bounds",
            },
            TestCase {
                min:         30,
                max:         20,
                default:     25,
                valid:       false,
                description: "inverted bounds",
            },
            TestCase {
                min:         21,
                max:         45,
                default:     50,
                valid:       false,
                description: "default above max",
            },
            TestCase {
                min:         28,
                max:         28,
                default:     28,
                valid:       true,
                description: "single choice",
            },
        ];

        for case in &cases {
            let config = SelectorConfig {
                min_cycle_length: case.min,
                max_cycle_length: case.max,
                default_cycle_length: case.default,
                ..SelectorConfig::default()
            };
            assert_eq!(config.validate().is_ok(), case.valid, "{}", case.description);
        }
    }

    #[test]
    fn test_from_json() {
        let config = SelectorConfig::from_json_str(r#"{"max_run": 5, "allow_future": true}"#).unwrap();
        assert_eq!(config.max_run.get(), 5);
        assert!(config.allow_future);
        assert!(matches!(
            SelectorConfig::from_json_str(r#"{"default_cycle_length": 10}"#),
            Err(ConfigError::DefaultCycleLength(_))
        ));
    }

    #[test]
    fn test_cycle_length_choices() {
        let choices: Vec<u16> = SelectorConfig::default().cycle_length_choices().collect();
        assert_eq!(choices.first(), Some(&21));
        assert_eq!(choices.last(), Some(&45));
        assert_eq!(choices.len(), 25);
    }
}
