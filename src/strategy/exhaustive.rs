// src/strategy/exhaustive.rs

use tracing::{debug, info};

use crate::model::error::PlanningError;
use crate::model::params::{CostParameters, DemandForecast};
use crate::model::recurrence::Recurrence;
use crate::strategy::traits::{Plan, ReplenishmentSolver};

/// Default ceiling on `(max_inventory + 1)^horizon`.
pub const DEFAULT_MAX_PATHS: u64 = 2_000_000;

/// Brute-force evaluation of the recurrence, kept as a correctness oracle.
///
/// Every state reached along a different path is evaluated again, so the run time grows
/// as `(max_inventory + 1)^horizon`. The solver refuses to start when that bound exceeds
/// `max_paths`. Recursion depth equals the horizon.
#[derive(Debug, Clone)]
pub struct ExhaustiveSolver {
    max_paths: u64,
}

impl ExhaustiveSolver {
    pub fn new(max_paths: u64) -> Self {
        Self { max_paths }
    }

    /// Worst-case number of order sequences for this instance, saturating at `u128::MAX`.
    pub fn path_bound(horizon: usize, max_inventory: u32) -> u128 {
        let branching = u128::from(max_inventory) + 1;
        (0..horizon).fold(1u128, |paths, _| paths.saturating_mul(branching))
    }
}

impl Default for ExhaustiveSolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PATHS)
    }
}

impl ReplenishmentSolver for ExhaustiveSolver {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn solve(
        &self,
        forecast: &DemandForecast,
        params: &CostParameters,
    ) -> Result<Plan, PlanningError> {
        let recurrence = Recurrence::new(forecast, params)?;

        let paths = Self::path_bound(recurrence.horizon(), recurrence.max_inventory());
        if paths > u128::from(self.max_paths) {
            return Err(PlanningError::ResourceLimitExceeded {
                resource: "exhaustive search paths",
                requested: paths,
                limit: u128::from(self.max_paths),
            });
        }

        info!(
            event = "solve_start",
            solver = self.name(),
            horizon = recurrence.horizon(),
            max_inventory = recurrence.max_inventory(),
            path_bound = %paths,
        );

        let mut visited = 0u64;
        let (cost, policy) = search(&recurrence, 0, 0, &mut visited)?;
        debug!(solver = self.name(), states_visited = visited);

        info!(event = "solve_end", solver = self.name(), cost);
        Ok(Plan { cost, policy })
    }
}

/// Minimum cost and policy from `(day, inventory)` to the end of the horizon.
fn search(
    recurrence: &Recurrence<'_>,
    day: usize,
    inventory: u32,
    visited: &mut u64,
) -> Result<(f64, Vec<u32>), PlanningError> {
    *visited += 1;
    if day == recurrence.horizon() {
        return Ok((0.0, Vec::new()));
    }

    let mut best_cost = f64::INFINITY;
    let mut best_policy = Vec::new();
    for order in recurrence.orders(inventory) {
        let step = recurrence.step(day, inventory, order)?;
        let (future_cost, future_policy) = search(recurrence, day + 1, step.next_inventory, visited)?;
        let total = step.day_cost + future_cost;
        // strict: the first order reaching the minimum is kept
        if total < best_cost {
            best_cost = total;
            best_policy = std::iter::once(order).chain(future_policy).collect();
        }
    }
    Ok((best_cost, best_policy))
}
