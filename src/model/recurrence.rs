// src/model/recurrence.rs

use std::ops::RangeInclusive;

use crate::model::error::PlanningError;
use crate::model::params::{CostParameters, DemandForecast};

/// Outcome of taking one ordering decision in one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Ordering, shortage and holding cost incurred on this day.
    pub day_cost: f64,
    /// Demand that could not be served from stock plus the order.
    pub shortage: u32,
    /// Inventory carried into the next day.
    pub next_inventory: u32,
}

/// The single-item lot-sizing recurrence over a validated forecast.
///
/// A state is `(day, inventory)` with `day` in `[0, T]` and `inventory` in
/// `[0, max_inventory]`. Every solver evaluates states through [`Recurrence::step`],
/// so solvers differ only in how often they evaluate a state, never in the formula.
#[derive(Debug, Clone, Copy)]
pub struct Recurrence<'a> {
    demand: &'a [u32],
    params: CostParameters,
}

impl<'a> Recurrence<'a> {
    /// Validates the parameters and binds them to the forecast.
    pub fn new(forecast: &'a DemandForecast, params: &CostParameters) -> Result<Self, PlanningError> {
        params.validate()?;
        Ok(Self {
            demand: forecast.as_slice(),
            params: *params,
        })
    }

    /// Number of decision days (T). Day `T` is terminal and costs nothing.
    pub fn horizon(&self) -> usize {
        self.demand.len()
    }

    pub fn max_inventory(&self) -> u32 {
        self.params.max_inventory
    }

    /// Valid order quantities for a state, in the ascending order every solver enumerates.
    pub fn orders(&self, inventory: u32) -> RangeInclusive<u32> {
        0..=self.params.max_inventory.saturating_sub(inventory)
    }

    /// Applies `order` in state `(day, inventory)`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::InfeasibleState`] when the state or the order lies outside
    /// the representable domain. A correct solver never triggers this.
    pub fn step(&self, day: usize, inventory: u32, order: u32) -> Result<Step, PlanningError> {
        let max_inventory = self.params.max_inventory;
        let infeasible = |inventory: u64| PlanningError::InfeasibleState {
            day,
            inventory,
            max_inventory,
        };

        let demand = self
            .demand
            .get(day)
            .copied()
            .ok_or_else(|| infeasible(u64::from(inventory)))?;
        let demand = u64::from(demand);
        if inventory > max_inventory {
            return Err(infeasible(u64::from(inventory)));
        }
        let available = u64::from(inventory) + u64::from(order);
        if available > u64::from(max_inventory) {
            return Err(infeasible(available));
        }

        let shortage = demand.saturating_sub(available);
        let next = available.saturating_sub(demand);
        let next_inventory = u32::try_from(next)
            .ok()
            .filter(|&next| next <= max_inventory)
            .ok_or_else(|| infeasible(next))?;
        // shortage <= demand, which came from a u32
        let shortage = u32::try_from(shortage).map_err(|_| infeasible(next))?;

        let fixed = if order > 0 {
            self.params.fixed_order_cost
        } else {
            0.0
        };
        let day_cost = fixed
            + self.params.unit_order_cost * f64::from(order)
            + self.params.shortage_penalty * f64::from(shortage)
            + self.params.holding_cost * f64::from(next_inventory);

        Ok(Step {
            day_cost,
            shortage,
            next_inventory,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_params(max_inventory: u32) -> CostParameters {
        CostParameters {
            max_inventory,
            ..CostParameters::default()
        }
    }

    #[test]
    fn step_charges_fixed_unit_and_holding_cost() {
        let forecast = DemandForecast::new(vec![5]).unwrap();
        let recurrence = Recurrence::new(&forecast, &reference_params(10)).unwrap();

        let exact = recurrence.step(0, 0, 5).unwrap();
        assert_eq!(exact.day_cost, 30.0);
        assert_eq!(exact.next_inventory, 0);
        assert_eq!(exact.shortage, 0);

        let over = recurrence.step(0, 0, 6).unwrap();
        assert_eq!(over.day_cost, 20.0 + 12.0 + 0.5);
        assert_eq!(over.next_inventory, 1);
    }

    #[test]
    fn step_charges_shortage_without_order() {
        let forecast = DemandForecast::new(vec![5]).unwrap();
        let recurrence = Recurrence::new(&forecast, &reference_params(10)).unwrap();

        let idle = recurrence.step(0, 2, 0).unwrap();
        assert_eq!(idle.shortage, 3);
        assert_eq!(idle.next_inventory, 0);
        assert_eq!(idle.day_cost, 30.0);
    }

    #[test]
    fn order_range_respects_inventory_cap() {
        let forecast = DemandForecast::new(vec![1]).unwrap();
        let recurrence = Recurrence::new(&forecast, &reference_params(4)).unwrap();
        assert_eq!(recurrence.orders(0), 0..=4);
        assert_eq!(recurrence.orders(4), 0..=0);
    }

    #[test]
    fn oversized_order_is_infeasible() {
        let forecast = DemandForecast::new(vec![1]).unwrap();
        let recurrence = Recurrence::new(&forecast, &reference_params(4)).unwrap();
        assert!(matches!(
            recurrence.step(0, 3, 2),
            Err(PlanningError::InfeasibleState { inventory: 5, .. })
        ));
        assert!(matches!(
            recurrence.step(0, 9, 0),
            Err(PlanningError::InfeasibleState { .. })
        ));
        assert!(matches!(
            recurrence.step(1, 0, 0),
            Err(PlanningError::InfeasibleState { day: 1, .. })
        ));
    }

    #[test]
    fn rejects_invalid_parameters_before_evaluation() {
        let forecast = DemandForecast::new(vec![1]).unwrap();
        let params = CostParameters {
            unit_order_cost: -2.0,
            ..CostParameters::default()
        };
        assert!(matches!(
            Recurrence::new(&forecast, &params),
            Err(PlanningError::InvalidParameters { .. })
        ));
    }
}
