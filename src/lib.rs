//! Minimum-cost replenishment planning for a single item over a finite horizon.
//!
//! Given a daily demand forecast and fixed, unit, holding and shortage costs, the planner
//! finds how many units to order each day. Three solvers evaluate the same recurrence:
//!
//! - [`TabularSolver`]: bottom-up over the full state table, the one to use in practice.
//! - [`MemoizedSolver`]: top-down with a per-call cache.
//! - [`ExhaustiveSolver`]: plain recursion, guarded, used as an oracle on small inputs.
//!
//! ```
//! use replenishment_planner::{CostParameters, DemandForecast, ReplenishmentSolver, TabularSolver};
//!
//! let forecast = DemandForecast::new(vec![5]).unwrap();
//! let params = CostParameters { max_inventory: 10, ..CostParameters::default() };
//! let plan = TabularSolver::default().solve(&forecast, &params).unwrap();
//! assert_eq!(plan.policy, vec![5]);
//! assert!((plan.cost - 30.0).abs() < 1e-9);
//! ```

pub mod io;
pub mod logging;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use model::error::PlanningError;
pub use model::params::{CostParameters, DemandForecast};
pub use model::recurrence::{Recurrence, Step};
pub use simulation::config::{PlannerConfig, SolverLimits};
pub use simulation::engine::{replay_policy, DayRecord, PlanSimulation};
pub use strategy::comparison::{compare_solvers, ComparisonReport, COST_TOLERANCE};
pub use strategy::exhaustive::ExhaustiveSolver;
pub use strategy::memoized::MemoizedSolver;
pub use strategy::tabular::{PolicyTable, TabularSolver};
pub use strategy::traits::{Plan, ReplenishmentSolver};
