//! # Marketplace Configuration
//!
//! Billing and review policy, loaded from YAML:
//!
//! ```yaml
//! billing:
//!   seconds_per_hour: 3600
//! reviews:
//!   min_rating: 1
//!   max_rating: 5
//!   one_per_booking: true
//! ```
//!
//! Every section and field is optional and falls back to the defaults shown.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use toolshare_core::{CoreError, SECONDS_PER_HOUR};

/// Errors loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The YAML did not match the configuration schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The values parsed but are inconsistent.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level marketplace configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketplaceConfig {
    /// Cost computation settings.
    pub billing: BillingConfig,
    /// Review acceptance policy.
    pub reviews: ReviewPolicy,
}

impl MarketplaceConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.billing.validate()?;
        self.reviews.validate()
    }
}

/// Cost computation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BillingConfig {
    /// Logical time units in one billed hour.
    pub seconds_per_hour: u64,
}

impl BillingConfig {
    /// Reject a zero-length billing hour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seconds_per_hour == 0 {
            return Err(ConfigError::Invalid(
                "billing.seconds_per_hour must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            seconds_per_hour: SECONDS_PER_HOUR,
        }
    }
}

/// Review acceptance policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewPolicy {
    /// Lowest accepted rating, inclusive.
    pub min_rating: u8,
    /// Highest accepted rating, inclusive.
    pub max_rating: u8,
    /// Reject a second review for the same booking.
    pub one_per_booking: bool,
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            min_rating: 1,
            max_rating: 5,
            one_per_booking: true,
        }
    }
}

impl ReviewPolicy {
    /// Reject inverted rating bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_rating > self.max_rating {
            return Err(ConfigError::Invalid(format!(
                "reviews.min_rating ({}) exceeds reviews.max_rating ({})",
                self.min_rating, self.max_rating
            )));
        }
        Ok(())
    }

    /// Check `rating` against the configured bounds.
    pub fn check_rating(&self, rating: u8) -> Result<(), CoreError> {
        if (self.min_rating..=self.max_rating).contains(&rating) {
            Ok(())
        } else {
            Err(CoreError::RatingOutOfRange {
                rating,
                min: self.min_rating,
                max: self.max_rating,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MarketplaceConfig::default();
        assert_eq!(config.billing.seconds_per_hour, 3600);
        assert_eq!(config.reviews.min_rating, 1);
        assert_eq!(config.reviews.max_rating, 5);
        assert!(config.reviews.one_per_booking);
    }

    #[test]
    fn test_full_document() {
        let config = MarketplaceConfig::from_yaml_str(
            "billing:\n  seconds_per_hour: 60\n\
             reviews:\n  min_rating: 0\n  max_rating: 10\n  one_per_booking: false\n",
        )
        .unwrap();
        assert_eq!(config.billing.seconds_per_hour, 60);
        assert_eq!(config.reviews.min_rating, 0);
        assert_eq!(config.reviews.max_rating, 10);
        assert!(!config.reviews.one_per_booking);
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let config =
            MarketplaceConfig::from_yaml_str("reviews:\n  one_per_booking: false\n").unwrap();
        assert_eq!(config.billing, BillingConfig::default());
        assert_eq!(config.reviews.max_rating, 5);
        assert!(!config.reviews.one_per_booking);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = MarketplaceConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, MarketplaceConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = MarketplaceConfig::from_yaml_str("billing:\n  secs_per_hour: 60\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_zero_billing_period_rejected() {
        let result = MarketplaceConfig::from_yaml_str("billing:\n  seconds_per_hour: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_inverted_rating_bounds_rejected() {
        let result =
            MarketplaceConfig::from_yaml_str("reviews:\n  min_rating: 5\n  max_rating: 1\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = MarketplaceConfig::load("/nonexistent/toolshare.yaml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_sections_validate_independently() {
        assert!(BillingConfig::default().validate().is_ok());
        assert!(ReviewPolicy::default().validate().is_ok());
        assert!(matches!(
            BillingConfig { seconds_per_hour: 0 }.validate(),
            Err(ConfigError::Invalid(_))
        ));
        let inverted = ReviewPolicy {
            min_rating: 5,
            max_rating: 1,
            ..ReviewPolicy::default()
        };
        assert!(matches!(inverted.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_deserialize_without_validation_keeps_bad_values() {
        // Only `from_yaml_str` and `load` validate; constructors re-check.
        let config: MarketplaceConfig =
            serde_yaml::from_str("billing:\n  seconds_per_hour: 0\n").unwrap();
        assert_eq!(config.billing.seconds_per_hour, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_check_rating_bounds() {
        let policy = ReviewPolicy::default();
        assert!(policy.check_rating(1).is_ok());
        assert!(policy.check_rating(5).is_ok());
        assert_eq!(
            policy.check_rating(0),
            Err(CoreError::RatingOutOfRange { rating: 0, min: 1, max: 5 })
        );
        assert!(policy.check_rating(6).is_err());
    }
}
