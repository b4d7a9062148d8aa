// src/strategy/tabular.rs

use tracing::{debug, info};

use crate::model::error::PlanningError;
use crate::model::params::{CostParameters, DemandForecast};
use crate::model::recurrence::Recurrence;
use crate::strategy::traits::{Plan, ReplenishmentSolver};

/// Default ceiling on `horizon * (max_inventory + 1)` table cells.
pub const DEFAULT_MAX_TABLE_CELLS: usize = 5_000_000;

/// Rejects instances whose state space exceeds `limit` before anything is allocated.
pub(crate) fn check_state_count(
    recurrence: &Recurrence<'_>,
    limit: usize,
    resource: &'static str,
) -> Result<(), PlanningError> {
    let states = recurrence.horizon() as u128 * (u128::from(recurrence.max_inventory()) + 1);
    if states > limit as u128 {
        return Err(PlanningError::ResourceLimitExceeded {
            resource,
            requested: states,
            limit: limit as u128,
        });
    }
    Ok(())
}

/// Bottom-up evaluation of the recurrence over the complete state table.
///
/// Runs in `O(T * Smax^2)` time and `O(T * Smax)` memory without recursion. This is the
/// solver meant for real horizons; the other two exist to cross-check it.
#[derive(Debug, Clone)]
pub struct TabularSolver {
    max_table_cells: usize,
}

impl TabularSolver {
    pub fn new(max_table_cells: usize) -> Self {
        Self { max_table_cells }
    }

    /// Fills the cost and decision tables for every state.
    pub fn build_table(
        &self,
        forecast: &DemandForecast,
        params: &CostParameters,
    ) -> Result<PolicyTable, PlanningError> {
        let recurrence = Recurrence::new(forecast, params)?;
        check_state_count(&recurrence, self.max_table_cells, "cost table cells")?;
        PolicyTable::fill(&recurrence)
    }
}

impl Default for TabularSolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TABLE_CELLS)
    }
}

/// Minimum cost-to-go and best order for every `(day, inventory)` state.
///
/// Both tables are stored row-major by day in flat vectors. `cost` has `T + 1` rows, the
/// last one being the all-zero terminal row; `decision` has `T` rows.
#[derive(Debug, Clone)]
pub struct PolicyTable {
    width: usize,
    horizon: usize,
    cost: Vec<f64>,
    decision: Vec<u32>,
}

impl PolicyTable {
    fn fill(recurrence: &Recurrence<'_>) -> Result<Self, PlanningError> {
        let horizon = recurrence.horizon();
        let width = recurrence.max_inventory() as usize + 1;
        let mut cost = vec![0.0; (horizon + 1) * width];
        let mut decision = vec![0u32; horizon * width];

        for day in (0..horizon).rev() {
            let (current, next) = cost.split_at_mut((day + 1) * width);
            let current = &mut current[day * width..];
            for inventory in 0..=recurrence.max_inventory() {
                let mut best_cost = f64::INFINITY;
                let mut best_order = 0;
                for order in recurrence.orders(inventory) {
                    let step = recurrence.step(day, inventory, order)?;
                    let total = step.day_cost + next[step.next_inventory as usize];
                    if total < best_cost {
                        best_cost = total;
                        best_order = order;
                    }
                }
                current[inventory as usize] = best_cost;
                decision[day * width + inventory as usize] = best_order;
            }
            debug!(day, "cost table row filled");
        }

        Ok(Self {
            width,
            horizon,
            cost,
            decision,
        })
    }

    /// Minimum cost from `(day, inventory)` to the end of the horizon.
    pub fn cost(&self, day: usize, inventory: u32) -> Option<f64> {
        if day > self.horizon || inventory as usize >= self.width {
            return None;
        }
        self.cost.get(day * self.width + inventory as usize).copied()
    }

    /// Order chosen in `(day, inventory)`; `None` for terminal or unrepresentable states.
    pub fn decision(&self, day: usize, inventory: u32) -> Option<u32> {
        if day >= self.horizon || inventory as usize >= self.width {
            return None;
        }
        self.decision.get(day * self.width + inventory as usize).copied()
    }

    /// Follows the recorded decisions forward from `(0, 0)`.
    fn reconstruct(&self, recurrence: &Recurrence<'_>) -> Result<Vec<u32>, PlanningError> {
        let mut policy = Vec::with_capacity(self.horizon);
        let mut inventory = 0;
        for day in 0..self.horizon {
            let order = self
                .decision(day, inventory)
                .ok_or_else(|| PlanningError::InfeasibleState {
                    day,
                    inventory: u64::from(inventory),
                    max_inventory: recurrence.max_inventory(),
                })?;
            policy.push(order);
            inventory = recurrence.step(day, inventory, order)?.next_inventory;
        }
        Ok(policy)
    }
}

impl ReplenishmentSolver for TabularSolver {
    fn name(&self) -> &'static str {
        "tabular"
    }

    fn solve(
        &self,
        forecast: &DemandForecast,
        params: &CostParameters,
    ) -> Result<Plan, PlanningError> {
        let recurrence = Recurrence::new(forecast, params)?;
        check_state_count(&recurrence, self.max_table_cells, "cost table cells")?;

        info!(
            event = "solve_start",
            solver = self.name(),
            horizon = recurrence.horizon(),
            max_inventory = recurrence.max_inventory(),
        );

        let table = PolicyTable::fill(&recurrence)?;
        let cost = table.cost(0, 0).ok_or_else(|| PlanningError::InfeasibleState {
            day: 0,
            inventory: 0,
            max_inventory: recurrence.max_inventory(),
        })?;
        let policy = table.reconstruct(&recurrence)?;

        info!(event = "solve_end", solver = self.name(), cost);
        Ok(Plan { cost, policy })
    }
}
