// src/strategy/memoized.rs

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::model::error::PlanningError;
use crate::model::params::{CostParameters, DemandForecast};
use crate::model::recurrence::Recurrence;
use crate::strategy::tabular::{check_state_count, DEFAULT_MAX_TABLE_CELLS};
use crate::strategy::traits::{Plan, ReplenishmentSolver};

/// Top-down evaluation of the recurrence with a per-call cache.
///
/// This is the lazy, hash-map backed counterpart of [`TabularSolver`](crate::strategy::tabular::TabularSolver):
/// only states reachable from `(0, 0)` are ever evaluated. Each cached state stores its
/// minimum cost and the first order reaching it; the policy is rebuilt by following
/// those decisions forward. Pending states are kept on a heap-allocated stack, so long
/// horizons cost memory but never overflow the call stack.
#[derive(Debug, Clone)]
pub struct MemoizedSolver {
    max_cached_states: usize,
}

impl MemoizedSolver {
    pub fn new(max_cached_states: usize) -> Self {
        Self { max_cached_states }
    }
}

impl Default for MemoizedSolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TABLE_CELLS)
    }
}

/// Cached result for one non-terminal state.
#[derive(Debug, Clone, Copy)]
struct Entry {
    cost: f64,
    order: u32,
}

/// A state whose orders are still being enumerated.
#[derive(Debug)]
struct Frame {
    day: usize,
    inventory: u32,
    next_order: u64,
    best: Entry,
}

impl Frame {
    fn new(day: usize, inventory: u32) -> Self {
        Self {
            day,
            inventory,
            next_order: 0,
            best: Entry {
                cost: f64::INFINITY,
                order: 0,
            },
        }
    }
}

struct Memo<'r, 'a> {
    recurrence: &'r Recurrence<'a>,
    cache: FxHashMap<(usize, u32), Entry>,
}

impl Memo<'_, '_> {
    fn cached_cost(&self, day: usize, inventory: u32) -> Option<f64> {
        if day == self.recurrence.horizon() {
            return Some(0.0);
        }
        self.cache.get(&(day, inventory)).map(|entry| entry.cost)
    }

    /// Minimum cost from `(day, inventory)`, evaluated top-down.
    ///
    /// Pending states live on an explicit stack, so a long horizon grows the heap rather
    /// than the call stack. A frame whose successor is not cached yet pushes that
    /// successor and retries the same order once it is resolved.
    fn cost(&mut self, day: usize, inventory: u32) -> Result<f64, PlanningError> {
        if let Some(cost) = self.cached_cost(day, inventory) {
            return Ok(cost);
        }

        let mut stack = vec![Frame::new(day, inventory)];
        while let Some(frame) = stack.last_mut() {
            let last_order = *self.recurrence.orders(frame.inventory).end();
            if frame.next_order > u64::from(last_order) {
                let done = (frame.day, frame.inventory, frame.best);
                stack.pop();
                self.cache.insert((done.0, done.1), done.2);
                continue;
            }

            // next_order <= last_order, which is a u32
            let order = u32::try_from(frame.next_order).unwrap_or(last_order);
            let step = self.recurrence.step(frame.day, frame.inventory, order)?;
            match self.cached_cost(frame.day + 1, step.next_inventory) {
                Some(future_cost) => {
                    let total = step.day_cost + future_cost;
                    // strict: the first order reaching the minimum is kept
                    if total < frame.best.cost {
                        frame.best = Entry { cost: total, order };
                    }
                    frame.next_order += 1;
                }
                None => {
                    let successor = Frame::new(frame.day + 1, step.next_inventory);
                    stack.push(successor);
                }
            }
        }

        self.cached_cost(day, inventory)
            .ok_or_else(|| PlanningError::InfeasibleState {
                day,
                inventory: u64::from(inventory),
                max_inventory: self.recurrence.max_inventory(),
            })
    }

    fn policy(&self) -> Result<Vec<u32>, PlanningError> {
        let horizon = self.recurrence.horizon();
        let mut policy = Vec::with_capacity(horizon);
        let mut inventory = 0;
        for day in 0..horizon {
            let entry = self
                .cache
                .get(&(day, inventory))
                .ok_or_else(|| PlanningError::InfeasibleState {
                    day,
                    inventory: u64::from(inventory),
                    max_inventory: self.recurrence.max_inventory(),
                })?;
            policy.push(entry.order);
            inventory = self.recurrence.step(day, inventory, entry.order)?.next_inventory;
        }
        Ok(policy)
    }
}

impl ReplenishmentSolver for MemoizedSolver {
    fn name(&self) -> &'static str {
        "memoized"
    }

    fn solve(
        &self,
        forecast: &DemandForecast,
        params: &CostParameters,
    ) -> Result<Plan, PlanningError> {
        let recurrence = Recurrence::new(forecast, params)?;
        check_state_count(&recurrence, self.max_cached_states, "memoization cache entries")?;

        info!(
            event = "solve_start",
            solver = self.name(),
            horizon = recurrence.horizon(),
            max_inventory = recurrence.max_inventory(),
        );

        let mut memo = Memo {
            recurrence: &recurrence,
            cache: FxHashMap::default(),
        };
        let cost = memo.cost(0, 0)?;
        debug!(solver = self.name(), cached_states = memo.cache.len());
        let policy = memo.policy()?;

        info!(event = "solve_end", solver = self.name(), cost);
        Ok(Plan { cost, policy })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::tabular::TabularSolver;

    #[test]
    fn zero_demand_orders_nothing() {
        let forecast = DemandForecast::new(vec![0; 6]).unwrap();
        let plan = MemoizedSolver::default()
            .solve(&forecast, &CostParameters::default())
            .unwrap();
        assert_eq!(plan.policy, vec![0; 6]);
        assert_eq!(plan.cost, 0.0);
    }

    #[test]
    fn handles_default_sized_instances() {
        // far beyond what the exhaustive oracle accepts
        let forecast = DemandForecast::new(vec![4, 4, 4, 4, 8, 8, 8]).unwrap();
        let plan = MemoizedSolver::default()
            .solve(&forecast, &CostParameters::default())
            .unwrap();
        assert_eq!(plan.policy.len(), 7);
        assert!(plan.cost > 0.0);
    }

    #[test]
    fn long_horizon_does_not_exhaust_the_call_stack() {
        let forecast = DemandForecast::new(vec![1; 200_000]).unwrap();
        let params = CostParameters {
            max_inventory: 1,
            ..CostParameters::default()
        };
        let memoized = MemoizedSolver::default().solve(&forecast, &params).unwrap();
        let tabular = TabularSolver::default().solve(&forecast, &params).unwrap();
        assert_eq!(memoized.policy.len(), 200_000);
        assert!((memoized.cost - tabular.cost).abs() < 1e-6);
        assert_eq!(memoized.policy, tabular.policy);
    }

    #[test]
    fn cache_guard_trips_before_solving() {
        let forecast = DemandForecast::new(vec![1; 10]).unwrap();
        let result = MemoizedSolver::new(100).solve(&forecast, &CostParameters::default());
        assert!(matches!(
            result,
            Err(PlanningError::ResourceLimitExceeded { requested: 510, limit: 100, .. })
        ));
    }
}
