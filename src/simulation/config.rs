// src/simulation/config.rs

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::params::CostParameters;
use crate::strategy::exhaustive::DEFAULT_MAX_PATHS;
use crate::strategy::tabular::DEFAULT_MAX_TABLE_CELLS;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Ceilings applied before a solver allocates or starts searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverLimits {
    /// Largest `horizon * (max_inventory + 1)` the table and cache may cover.
    pub max_table_cells: usize,
    /// Largest `(max_inventory + 1)^horizon` the exhaustive solver may enumerate.
    pub max_exhaustive_paths: u64,
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self {
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
            max_exhaustive_paths: DEFAULT_MAX_PATHS,
        }
    }
}

/// How a forecast is derived from recorded consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of most recent records averaged.
    pub window: usize,
    /// Daily demand assumed when an item has no history.
    pub fallback_demand: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window: 7,
            fallback_demand: 1,
        }
    }
}

/// Top-level planner configuration, usually read from `planner.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub horizon_days: usize,
    pub costs: CostParameters,
    pub limits: SolverLimits,
    pub forecast: ForecastConfig,
    /// Where the plan schedule CSV is written.
    pub output_path: PathBuf,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            horizon_days: 7,
            costs: CostParameters::default(),
            limits: SolverLimits::default(),
            forecast: ForecastConfig::default(),
            output_path: PathBuf::from("plan_schedule.csv"),
        }
    }
}

impl PlannerConfig {
    /// Reads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon_days == 0 {
            return Err(ConfigError::Invalid(
                "horizon_days must be at least 1".to_string(),
            ));
        }
        if self.forecast.window == 0 {
            return Err(ConfigError::Invalid(
                "forecast.window must be at least 1".to_string(),
            ));
        }
        self.costs
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        // the forecast is allocated from horizon_days, so the state ceiling applies here too
        let states = self.horizon_days as u128 * (u128::from(self.costs.max_inventory) + 1);
        if states > self.limits.max_table_cells as u128 {
            return Err(ConfigError::Invalid(format!(
                "horizon_days * (max_inventory + 1) = {states} exceeds limits.max_table_cells = {}",
                self.limits.max_table_cells
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_parsing() {
        let toml = r#"
            horizon_days = 5
            output_path = "out/plan.csv"

            [costs]
            fixed_order_cost = 15.0
            max_inventory = 20

            [limits]
            max_exhaustive_paths = 1000
        "#;

        let config = PlannerConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.horizon_days, 5);
        assert_eq!(config.costs.fixed_order_cost, 15.0);
        assert_eq!(config.costs.max_inventory, 20);
        // unspecified fields keep their defaults
        assert_eq!(config.costs.shortage_penalty, 10.0);
        assert_eq!(config.limits.max_exhaustive_paths, 1000);
        assert_eq!(config.limits.max_table_cells, DEFAULT_MAX_TABLE_CELLS);
        assert_eq!(config.forecast, ForecastConfig::default());
        assert_eq!(config.output_path, PathBuf::from("out/plan.csv"));
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(
            PlannerConfig::from_toml_str("").unwrap(),
            PlannerConfig::default()
        );
    }

    #[test]
    fn test_invalid_costs_rejected() {
        let result = PlannerConfig::from_toml_str("[costs]\nholding_cost = -1.0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let result = PlannerConfig::from_toml_str("horizon_days = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_oversized_horizon_rejected_before_allocation() {
        let result = PlannerConfig::from_toml_str("horizon_days = 4611686018427387904\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        // 100_001 * 51 cells exceeds the default ceiling, 98_039 * 51 fits
        let result = PlannerConfig::from_toml_str("horizon_days = 100001\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        assert!(PlannerConfig::from_toml_str("horizon_days = 98039\n").is_ok());
    }

    #[test]
    fn test_state_ceiling_follows_configured_limit() {
        let toml = r#"
            horizon_days = 30

            [costs]
            max_inventory = 9

            [limits]
            max_table_cells = 299
        "#;
        assert!(matches!(
            PlannerConfig::from_toml_str(toml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = PlannerConfig::load("definitely/not/here/planner.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
