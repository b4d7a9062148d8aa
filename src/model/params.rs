// src/model/params.rs

use serde::{Deserialize, Serialize};

use crate::model::error::PlanningError;

/// Cost coefficients for one planning run.
///
/// All coefficients must be finite and non-negative; `max_inventory` bounds both the
/// inventory state and a single day's order (`order <= max_inventory - inventory`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostParameters {
    /// Charged once on any day with a positive order (K).
    pub fixed_order_cost: f64,
    /// Charged per unit ordered (c).
    pub unit_order_cost: f64,
    /// Charged per unit still on hand at the end of a day (h).
    pub holding_cost: f64,
    /// Charged per unit of demand that could not be served (p).
    pub shortage_penalty: f64,
    /// Largest representable inventory level (Smax).
    pub max_inventory: u32,
}

impl Default for CostParameters {
    fn default() -> Self {
        Self {
            fixed_order_cost: 20.0,
            unit_order_cost: 2.0,
            holding_cost: 0.5,
            shortage_penalty: 10.0,
            max_inventory: 50,
        }
    }
}

impl CostParameters {
    /// Checks every coefficient and the inventory cap.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::InvalidParameters`] naming the first offending field.
    pub fn validate(&self) -> Result<(), PlanningError> {
        let coefficients = [
            ("fixed_order_cost", self.fixed_order_cost),
            ("unit_order_cost", self.unit_order_cost),
            ("holding_cost", self.holding_cost),
            ("shortage_penalty", self.shortage_penalty),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(PlanningError::InvalidParameters {
                    reason: format!("{name} must be a finite value >= 0, got {value}"),
                });
            }
        }
        if self.max_inventory < 1 {
            return Err(PlanningError::InvalidParameters {
                reason: "max_inventory must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// A validated, non-empty sequence of daily demands. Index 0 is today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandForecast {
    days: Vec<u32>,
}

impl DemandForecast {
    /// Wraps a demand schedule, rejecting an empty one.
    pub fn new(days: Vec<u32>) -> Result<Self, PlanningError> {
        if days.is_empty() {
            return Err(PlanningError::InvalidForecast {
                reason: "forecast must cover at least one day".to_string(),
            });
        }
        Ok(Self { days })
    }

    /// Builds a forecast from signed input, as typed by a user or read from a file.
    ///
    /// # Errors
    ///
    /// Fails on an empty sequence, a negative value or a value that does not fit a `u32`.
    pub fn from_signed(values: &[i64]) -> Result<Self, PlanningError> {
        let days = values
            .iter()
            .enumerate()
            .map(|(day, &value)| {
                u32::try_from(value).map_err(|_| PlanningError::InvalidForecast {
                    reason: format!("demand on day {day} must be in [0, {}], got {value}", u32::MAX),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(days)
    }

    /// Number of planned days (T).
    pub fn horizon(&self) -> usize {
        self.days.len()
    }

    pub fn demand(&self, day: usize) -> Option<u32> {
        self.days.get(day).copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.days
    }
}

impl TryFrom<Vec<u32>> for DemandForecast {
    type Error = PlanningError;

    fn try_from(days: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}
