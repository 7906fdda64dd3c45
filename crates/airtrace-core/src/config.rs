//! Engine configuration - axis ceiling and plot floor
//!
//! The defaults match a signal chart in dBm: nothing is plotted below
//! `-100`, and vanishing series trail down to one unit above that floor.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Ceiling for the scan counter (and so for the points kept per series)
pub const MAX_SCAN_COUNT: u32 = 400;

/// Lowest level the chart plots
pub const MIN_Y: i32 = -100;

/// Offset above [`MIN_Y`] used for a vanishing series' terminal point
pub const MIN_Y_OFFSET: i32 = 1;

/// Configuration for the reconciliation engine
///
/// # Example
///
/// ```
/// use airtrace_core::EngineConfig;
///
/// let config = EngineConfig::from_ron_str("(max_scan_count: 60)").unwrap();
/// assert_eq!(config.max_scan_count, 60);
/// assert_eq!(config.floor(), -99);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ceiling at which the scan counter freezes
    pub max_scan_count: u32,
    /// Lowest level the chart plots
    pub min_y: i32,
    /// Offset above `min_y` for terminal points of vanishing series
    pub min_y_offset: i32,
}

impl EngineConfig {
    /// Parse and validate a configuration from RON
    pub fn from_ron_str(source: &str) -> Result<Self> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values are usable
    pub fn validate(&self) -> Result<()> {
        if self.max_scan_count == 0 {
            return Err(Error::InvalidConfig(
                "max_scan_count must be at least 1".to_string(),
            ));
        }
        if self.min_y_offset < 0 {
            return Err(Error::InvalidConfig(format!(
                "min_y_offset must not be negative, got {}",
                self.min_y_offset
            )));
        }
        Ok(())
    }

    /// Level at which vanishing series are drawn
    pub fn floor(&self) -> i32 {
        self.min_y.saturating_add(self.min_y_offset)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_scan_count: MAX_SCAN_COUNT,
            min_y: MIN_Y,
            min_y_offset: MIN_Y_OFFSET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_scan_count, MAX_SCAN_COUNT);
        assert_eq!(config.floor(), MIN_Y + MIN_Y_OFFSET);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = EngineConfig::from_ron_str("(min_y: -90)").unwrap();
        assert_eq!(config.min_y, -90);
        assert_eq!(config.max_scan_count, MAX_SCAN_COUNT);
        assert_eq!(config.min_y_offset, MIN_Y_OFFSET);
    }

    #[test]
    fn test_zero_scan_count_rejected() {
        let err = EngineConfig::from_ron_str("(max_scan_count: 0)").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_negative_offset_rejected() {
        let config = EngineConfig {
            min_y_offset: -1,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_ron() {
        let err = EngineConfig::from_ron_str("(max_scan_count: \"many\")").unwrap_err();
        assert!(matches!(err, Error::Ron(_)));
    }
}
