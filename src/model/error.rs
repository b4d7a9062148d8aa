// src/model/error.rs

use thiserror::Error;

/// Errors raised while validating inputs or evaluating the replenishment recurrence.
///
/// Every variant is deterministic: retrying with the same inputs yields the same failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanningError {
    /// The demand forecast is empty or holds a value that is not a valid demand.
    #[error("invalid demand forecast: {reason}")]
    InvalidForecast {
        /// What is wrong with the forecast
        reason: String,
    },

    /// A cost coefficient is negative or not finite, or the inventory cap is zero.
    #[error("invalid cost parameters: {reason}")]
    InvalidParameters {
        /// What is wrong with the parameters
        reason: String,
    },

    /// The recurrence produced a state outside `[0, max_inventory]`.
    ///
    /// This is a logic error and is never clamped away.
    #[error("infeasible state on day {day}: inventory {inventory} outside [0, {max_inventory}]")]
    InfeasibleState {
        /// Day on which the state was produced
        day: usize,
        /// Offending inventory (or available stock for an oversized order)
        inventory: u64,
        /// Inventory cap in force
        max_inventory: u32,
    },

    /// The working set a solver would need exceeds its configured ceiling.
    #[error("{resource} needs {requested} units, limit is {limit}")]
    ResourceLimitExceeded {
        /// Which resource tripped the guard
        resource: &'static str,
        /// Units the solve would require
        requested: u128,
        /// Configured ceiling
        limit: u128,
    },

    /// A policy handed to replay does not cover exactly the forecast horizon.
    #[error("policy covers {actual} days but the horizon is {expected} days")]
    PolicyLengthMismatch {
        /// Horizon length
        expected: usize,
        /// Policy length
        actual: usize,
    },
}
