// src/simulation/engine.rs

use serde::Serialize;
use tracing::trace;

use crate::model::error::PlanningError;
use crate::model::params::{CostParameters, DemandForecast};
use crate::model::recurrence::Recurrence;

// Serialize so the schedule can be written to CSV
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRecord {
    pub day: usize,
    pub demand: u32,
    pub starting_inventory: u32,
    pub order: u32,
    pub shortage: u32,
    pub ending_inventory: u32,
    pub day_cost: f64,
}

/// Plays an ordering policy forward through the recurrence, one day at a time.
///
/// Starts at day 0 with empty inventory, exactly like the solvers, so the summed
/// day costs of an optimal policy equal the solver's reported cost.
#[derive(Debug)]
pub struct PlanSimulation<'a> {
    recurrence: Recurrence<'a>,
    demand: &'a DemandForecast,
    current_day: usize,
    inventory: u32,
    pub history: Vec<DayRecord>,
}

impl<'a> PlanSimulation<'a> {
    pub fn new(forecast: &'a DemandForecast, params: &CostParameters) -> Result<Self, PlanningError> {
        Ok(Self {
            recurrence: Recurrence::new(forecast, params)?,
            demand: forecast,
            current_day: 0,
            inventory: 0,
            history: Vec::with_capacity(forecast.horizon()),
        })
    }

    /// Replays `policy`, which must hold one order per forecast day.
    ///
    /// # Errors
    ///
    /// [`PlanningError::PolicyLengthMismatch`] for a policy of the wrong length, and
    /// [`PlanningError::InfeasibleState`] as soon as an order would push inventory past
    /// the cap.
    pub fn run(&mut self, policy: &[u32]) -> Result<(), PlanningError> {
        let expected = self.recurrence.horizon() - self.current_day;
        if policy.len() != expected {
            return Err(PlanningError::PolicyLengthMismatch {
                expected,
                actual: policy.len(),
            });
        }
        for &order in policy {
            self.step(order)?;
        }
        Ok(())
    }

    fn step(&mut self, order: u32) -> Result<(), PlanningError> {
        let day = self.current_day;
        let outcome = self.recurrence.step(day, self.inventory, order)?;

        trace!(
            day,
            order,
            inventory = outcome.next_inventory,
            cost = outcome.day_cost
        );
        self.history.push(DayRecord {
            day,
            demand: self.demand.demand(day).unwrap_or(0),
            starting_inventory: self.inventory,
            order,
            shortage: outcome.shortage,
            ending_inventory: outcome.next_inventory,
            day_cost: outcome.day_cost,
        });

        self.inventory = outcome.next_inventory;
        self.current_day += 1;
        Ok(())
    }

    /// Sum of day costs replayed so far.
    pub fn total_cost(&self) -> f64 {
        self.history.iter().map(|record| record.day_cost).sum()
    }

    pub fn total_shortage(&self) -> u64 {
        self.history
            .iter()
            .map(|record| u64::from(record.shortage))
            .sum()
    }
}

/// Replays a full policy and returns its day-by-day schedule.
pub fn replay_policy(
    forecast: &DemandForecast,
    params: &CostParameters,
    policy: &[u32],
) -> Result<Vec<DayRecord>, PlanningError> {
    let mut sim = PlanSimulation::new(forecast, params)?;
    sim.run(policy)?;
    Ok(sim.history)
}
