//! Tunables for pairing and ordering.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a configuration cannot produce a defined ordering
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidStrength { name: &'static str, value: f64 },

    /// With season >= recency the pairwise score stops being transitive
    #[error("season_bias ({season}) must be smaller than recency_bias ({recency})")]
    SeasonOutweighsRecency { recency: f64, season: f64 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration for a curation run.
///
/// ## Usage
/// ```ignore
/// let config = CurationConfig::default()
///     .with_pairing_window_secs(300)
///     .with_season_bias(0.3);
/// config.validate()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurationConfig {
    /// Two portraits taken at most this many seconds apart are paired
    pub pairing_window_secs: u64,
    /// Also pair portraits taken on the same local calendar day
    pub pair_same_day: bool,
    /// Score given to the group that was last seen longer ago
    pub recency_bias: f64,
    /// Score given to a group captured in this month of an earlier year
    pub season_bias: f64,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            pairing_window_secs: 2 * 60,
            pair_same_day: true,
            recency_bias: 0.8,
            season_bias: 0.5,
        }
    }
}

impl CurationConfig {
    pub fn with_pairing_window_secs(mut self, secs: u64) -> Self {
        self.pairing_window_secs = secs;
        self
    }

    pub fn with_pair_same_day(mut self, enabled: bool) -> Self {
        self.pair_same_day = enabled;
        self
    }

    pub fn with_recency_bias(mut self, strength: f64) -> Self {
        self.recency_bias = strength;
        self
    }

    pub fn with_season_bias(mut self, strength: f64) -> Self {
        self.season_bias = strength;
        self
    }

    /// Check that the bias strengths give a total order over seen groups.
    pub fn validate(&self) -> Result<()> {
        validate_strengths(self.recency_bias, self.season_bias)
    }
}

pub(crate) fn validate_strengths(recency: f64, season: f64) -> Result<()> {
    for (name, value) in [("recency_bias", recency), ("season_bias", season)] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidStrength { name, value });
        }
    }
    if season >= recency {
        return Err(ConfigError::SeasonOutweighsRecency { recency, season });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CurationConfig::default();
        assert_eq!(config.pairing_window_secs, 120);
        assert!(config.pair_same_day);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_strength_rejected() {
        let config = CurationConfig::default().with_recency_bias(-1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidStrength { name: "recency_bias", .. })
        ));

        let config = CurationConfig::default().with_season_bias(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidStrength { name: "season_bias", .. })
        ));
    }

    #[test]
    fn test_season_must_not_outweigh_recency() {
        let config = CurationConfig::default()
            .with_recency_bias(0.5)
            .with_season_bias(0.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SeasonOutweighsRecency { .. })
        ));
    }
}
