// src/strategy/comparison.rs

use tracing::{info, warn};

use crate::model::error::PlanningError;
use crate::model::params::{CostParameters, DemandForecast};
use crate::simulation::config::SolverLimits;
use crate::strategy::exhaustive::ExhaustiveSolver;
use crate::strategy::memoized::MemoizedSolver;
use crate::strategy::tabular::TabularSolver;
use crate::strategy::traits::{Plan, ReplenishmentSolver};

/// Largest cost difference still reported as agreement.
pub const COST_TOLERANCE: f64 = 1e-6;

/// One solver's answer inside a [`ComparisonReport`].
#[derive(Debug, Clone)]
pub struct SolverOutcome {
    pub solver: &'static str,
    pub plan: Plan,
}

/// Side-by-side results of every solver on the same instance.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub tabular: SolverOutcome,
    pub memoized: SolverOutcome,
    /// `None` when the instance is too large for brute force.
    pub exhaustive: Option<SolverOutcome>,
}

impl ComparisonReport {
    pub fn outcomes(&self) -> impl Iterator<Item = &SolverOutcome> {
        [Some(&self.tabular), Some(&self.memoized), self.exhaustive.as_ref()]
            .into_iter()
            .flatten()
    }

    /// Every pair of solvers agrees on the minimum cost within [`COST_TOLERANCE`].
    pub fn costs_agree(&self) -> bool {
        let reference = self.tabular.plan.cost;
        self.outcomes()
            .all(|outcome| (outcome.plan.cost - reference).abs() < COST_TOLERANCE)
    }

    /// Every solver returned the same order sequence.
    pub fn policies_agree(&self) -> bool {
        let reference = &self.tabular.plan.policy;
        self.outcomes()
            .all(|outcome| &outcome.plan.policy == reference)
    }

    /// Explanation to show when costs match but the chosen policies do not.
    pub fn tie_note(&self) -> Option<&'static str> {
        if self.costs_agree() && !self.policies_agree() {
            Some("costs tie across several optimal policies; any of them is optimal")
        } else {
            None
        }
    }
}

fn run(
    solver: &dyn ReplenishmentSolver,
    forecast: &DemandForecast,
    params: &CostParameters,
) -> Result<SolverOutcome, PlanningError> {
    Ok(SolverOutcome {
        solver: solver.name(),
        plan: solver.solve(forecast, params)?,
    })
}

/// Runs all three solvers on one instance.
///
/// The exhaustive solver is skipped, with a warning, when its path guard trips; any other
/// failure aborts the comparison.
pub fn compare_solvers(
    forecast: &DemandForecast,
    params: &CostParameters,
    limits: &SolverLimits,
) -> Result<ComparisonReport, PlanningError> {
    let tabular = run(&TabularSolver::new(limits.max_table_cells), forecast, params)?;
    let memoized = run(&MemoizedSolver::new(limits.max_table_cells), forecast, params)?;

    let exhaustive = match run(
        &ExhaustiveSolver::new(limits.max_exhaustive_paths),
        forecast,
        params,
    ) {
        Ok(outcome) => Some(outcome),
        Err(PlanningError::ResourceLimitExceeded {
            requested, limit, ..
        }) => {
            warn!(
                paths = %requested,
                limit = %limit,
                "instance too large for exhaustive search, skipping it"
            );
            None
        }
        Err(other) => return Err(other),
    };

    let report = ComparisonReport {
        tabular,
        memoized,
        exhaustive,
    };
    info!(
        costs_agree = report.costs_agree(),
        policies_agree = report.policies_agree(),
        "solver comparison finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(solver: &'static str, cost: f64, policy: Vec<u32>) -> SolverOutcome {
        SolverOutcome {
            solver,
            plan: Plan { cost, policy },
        }
    }

    #[test]
    fn tie_note_only_when_costs_match_and_policies_differ() {
        let tied = ComparisonReport {
            tabular: outcome("tabular", 10.0, vec![2, 0]),
            memoized: outcome("memoized", 10.0 + 1e-9, vec![1, 1]),
            exhaustive: None,
        };
        assert!(tied.costs_agree());
        assert!(!tied.policies_agree());
        assert!(tied.tie_note().is_some());

        let diverged = ComparisonReport {
            exhaustive: Some(outcome("exhaustive", 11.0, vec![2, 0])),
            ..tied.clone()
        };
        assert!(!diverged.costs_agree());
        assert!(diverged.tie_note().is_none());
    }

    #[test]
    fn skips_exhaustive_on_large_instances() {
        let forecast = DemandForecast::new(vec![2; 7]).unwrap();
        let report =
            compare_solvers(&forecast, &CostParameters::default(), &SolverLimits::default()).unwrap();
        assert!(report.exhaustive.is_none());
        assert!(report.costs_agree());
        assert_eq!(report.outcomes().count(), 2);
    }

    #[test]
    fn all_three_agree_on_small_instance() {
        let forecast = DemandForecast::new(vec![3, 1, 4, 1]).unwrap();
        let params = CostParameters {
            max_inventory: 6,
            ..CostParameters::default()
        };
        let report = compare_solvers(&forecast, &params, &SolverLimits::default()).unwrap();
        assert!(report.exhaustive.is_some());
        assert!(report.costs_agree());
        assert!(report.policies_agree());
        assert!(report.tie_note().is_none());
    }

    #[test]
    fn invalid_parameters_abort_comparison() {
        let forecast = DemandForecast::new(vec![1]).unwrap();
        let params = CostParameters {
            fixed_order_cost: -1.0,
            ..CostParameters::default()
        };
        assert!(matches!(
            compare_solvers(&forecast, &params, &SolverLimits::default()),
            Err(PlanningError::InvalidParameters { .. })
        ));
    }
}
