use serde::{Deserialize, Serialize};

use crate::chart::{Color, Locale};

/// Padding added below the lowest and above the highest value
pub const DEFAULT_PADDING: f64 = 5.0;

/// Configuration for the sensor chart
///
/// Every field has a default, so a partial JSON object (or `{}`) is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Y padding around the data, in the sensor's unit
    pub padding: f64,
    /// Language for sensor labels
    pub locale: Locale,
    /// Colour for sensor types without a dedicated colour
    pub default_color: Color,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            locale: Locale::Arabic,
            default_color: Color::GREY,
        }
    }
}

impl ChartConfig {
    /// Load and validate a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ChartConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(ConfigError::InvalidPadding(self.padding));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Chart padding must be a finite, non-negative number, got {0}")]
    InvalidPadding(f64),

    #[error("Malformed chart configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChartConfig::default();
        assert_eq!(config.padding, 5.0);
        assert_eq!(config.locale, Locale::Arabic);
        assert_eq!(config.default_color, Color::GREY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_str_partial() {
        let config = ChartConfig::from_json_str(r#"{"locale": "en"}"#).unwrap();
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.padding, DEFAULT_PADDING);

        let config = ChartConfig::from_json_str(r#"{"default_color": 4278190080}"#).unwrap();
        assert_eq!(config.default_color, Color(0xFF00_0000));
    }

    #[test]
    fn test_from_json_str_rejects_negative_padding() {
        let result = ChartConfig::from_json_str(r#"{"padding": -1}"#);
        assert!(matches!(result, Err(ConfigError::InvalidPadding(p)) if p == -1.0));
    }

    #[test]
    fn test_from_json_str_malformed() {
        let result = ChartConfig::from_json_str(r#"{"locale": "fr"}"#);
        assert!(matches!(result, Err(ConfigError::Malformed(_))));
    }

    #[test]
    fn test_validate_rejects_nan_padding() {
        let config = ChartConfig {
            padding: f64::NAN,
            ..ChartConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
