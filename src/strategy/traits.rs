// src/strategy/traits.rs

use std::fmt::Debug;

use crate::model::error::PlanningError;
use crate::model::params::{CostParameters, DemandForecast};

/// Minimum total cost and the ordering policy that achieves it.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    /// Sum of daily costs over the horizon, starting from zero inventory.
    pub cost: f64,
    /// Units to order on each day, one entry per forecast day.
    pub policy: Vec<u32>,
}

impl Plan {
    /// Average units ordered per day.
    pub fn average_order(&self) -> f64 {
        if self.policy.is_empty() {
            return 0.0;
        }
        let total: u64 = self.policy.iter().map(|&q| u64::from(q)).sum();
        total as f64 / self.policy.len() as f64
    }
}

/// Computes a minimum-cost replenishment plan.
///
/// Implementations are pure: all working state (recursion cache, cost table) lives inside
/// one `solve` call, so a solver can be shared across threads and called repeatedly.
///
/// Ties between equally cheap orders are broken the same way everywhere: order quantities
/// are tried in ascending order and the first one reaching the minimum is kept.
pub trait ReplenishmentSolver: Debug + Send + Sync {
    /// Short label used in logs and reports.
    fn name(&self) -> &'static str;

    /// Solves the horizon starting from day 0 with empty inventory.
    ///
    /// # Errors
    ///
    /// Returns a [`PlanningError`] for invalid parameters, when a resource guard trips,
    /// or when the recurrence leaves its domain.
    fn solve(
        &self,
        forecast: &DemandForecast,
        params: &CostParameters,
    ) -> Result<Plan, PlanningError>;
}
