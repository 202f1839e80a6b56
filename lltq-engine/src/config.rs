//! Housekeeping configuration for the weekly driver.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{FINAL_WEEK, FLAG_TREMORS, SKIP_TRIGGER_WEEK, WEEKLY_GOLD_DRAIN};
use crate::resources::Resource;

const DEFAULT_SIMULATION_DATA: &str = include_str!("../data/simulation.json");

const MAX_WEEKLY_DRAIN: f64 = 1_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "SimulationConfig::default_final_week")]
    pub final_week: u8,
    #[serde(default)]
    pub weekly_drain: DrainCfg,
    #[serde(default)]
    pub skip_trigger: SkipTriggerCfg,
}

/// Resource charged at the end of every week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrainCfg {
    pub resource: Resource,
    pub amount: f64,
}

/// Flag and week that suppress the next week's free-choice phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkipTriggerCfg {
    pub flag: String,
    pub week: u8,
}

impl Default for DrainCfg {
    fn default() -> Self {
        Self {
            resource: Resource::Gold,
            amount: WEEKLY_GOLD_DRAIN,
        }
    }
}

impl Default for SkipTriggerCfg {
    fn default() -> Self {
        Self {
            flag: FLAG_TREMORS.to_string(),
            week: SKIP_TRIGGER_WEEK,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            final_week: Self::default_final_week(),
            weekly_drain: DrainCfg::default(),
            skip_trigger: SkipTriggerCfg::default(),
        }
    }
}

impl SimulationConfig {
    const fn default_final_week() -> u8 {
        FINAL_WEEK
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_SIMULATION_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_config() -> Self {
        Self::load_from_static()
    }

    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON and any error from
    /// [`SimulationConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=FINAL_WEEK).contains(&self.final_week) {
            return Err(ConfigError::RangeViolation {
                field: "final_week",
                min: 1.0,
                max: f64::from(FINAL_WEEK),
                value: f64::from(self.final_week),
            });
        }
        let amount = self.weekly_drain.amount;
        if !amount.is_finite() || !(0.0..=MAX_WEEKLY_DRAIN).contains(&amount) {
            return Err(ConfigError::RangeViolation {
                field: "weekly_drain.amount",
                min: 0.0,
                max: MAX_WEEKLY_DRAIN,
                value: amount,
            });
        }
        if self.skip_trigger.flag.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "skip_trigger.flag",
            });
        }
        if !(1..=FINAL_WEEK).contains(&self.skip_trigger.week) {
            return Err(ConfigError::RangeViolation {
                field: "skip_trigger.week",
                min: 1.0,
                max: f64::from(FINAL_WEEK),
                value: f64::from(self.skip_trigger.week),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("failed to parse simulation config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_matches_defaults() {
        let config = SimulationConfig::default_config();
        assert_eq!(config, SimulationConfig::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.skip_trigger.week, 36);
        assert_eq!(config.weekly_drain.resource, Resource::Gold);
    }

    #[test]
    fn missing_sections_fall_back() {
        let config = SimulationConfig::from_json(r#"{"final_week": 12}"#).unwrap();
        assert_eq!(config.final_week, 12);
        assert_eq!(config.skip_trigger.week, 36);
        assert!((config.weekly_drain.amount - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn shortened_run_keeps_a_late_trigger_week() {
        let config = SimulationConfig::from_json(
            r#"{"final_week": 20, "skip_trigger": {"flag": "Tremors", "week": 36}}"#,
        )
        .unwrap();
        assert_eq!(config.final_week, 20);
        assert_eq!(config.skip_trigger.week, 36);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = SimulationConfig::from_json(r#"{"final_week": 41}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RangeViolation { field: "final_week", .. }
        ));

        let err = SimulationConfig::from_json(
            r#"{"weekly_drain": {"resource": "G", "amount": -1.0}}"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "weekly_drain.amount must be between 0.00 and 1000.00 (got -1.00)"
        );

        let err = SimulationConfig::from_json(
            r#"{"final_week": 20, "skip_trigger": {"flag": "Tremors", "week": 41}}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RangeViolation { field: "skip_trigger.week", .. }
        ));

        let err = SimulationConfig::from_json(r#"{"skip_trigger": {"flag": " ", "week": 3}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyField { .. }));
    }

    #[test]
    fn rejects_unknown_resource() {
        let err = SimulationConfig::from_json(
            r#"{"weekly_drain": {"resource": "Gold", "amount": 1.0}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
