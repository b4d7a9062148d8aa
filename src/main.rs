use std::env;
use std::error::Error;
use std::path::Path;

use replenishment_planner::io::{demand, history, reporting};
use replenishment_planner::simulation::config::PlannerConfig;
use replenishment_planner::{compare_solvers, logging, replay_policy};
use tracing::warn;

const USAGE: &str = "usage: replenishment-planner [config.toml] [history.csv item]";

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();
    println!("=== Replenishment Planner ===");

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() == 2 || args.len() > 3 {
        return Err(USAGE.into());
    }

    // 1. SETUP CONFIGURATION
    let config = match args.first() {
        Some(path) => PlannerConfig::load(path)?,
        None if Path::new("planner.toml").exists() => PlannerConfig::load("planner.toml")?,
        None => PlannerConfig::default(),
    };

    // 2. DERIVE FORECAST
    // Without a consumption log every day falls back to the configured demand.
    let consumption = match (args.get(1), args.get(2)) {
        (Some(path), Some(item)) => {
            let records = history::load_consumption_csv(path)?;
            let quantities = history::history_for(&records, item);
            if quantities.is_empty() {
                warn!(item = %item, "no consumption recorded, using fallback demand");
            }
            quantities
        }
        _ => Vec::new(),
    };
    let forecast = demand::forecast_from_history(&consumption, config.horizon_days, &config.forecast)?;
    println!("Demand forecast: {:?}", forecast.as_slice());
    let costs = &config.costs;
    println!(
        "Parameters: K={}, c={}, h={}, p={}, Smax={}",
        costs.fixed_order_cost,
        costs.unit_order_cost,
        costs.holding_cost,
        costs.shortage_penalty,
        costs.max_inventory
    );

    // 3. RUN AND COMPARE SOLVERS
    let report = compare_solvers(&forecast, costs, &config.limits)?;

    println!("\n=== Results ===");
    for outcome in report.outcomes() {
        println!(
            "{:<10}: cost={:.2}, policy={:?}",
            outcome.solver, outcome.plan.cost, outcome.plan.policy
        );
    }
    if report.exhaustive.is_none() {
        println!("exhaustive: skipped (instance too large)");
    }
    println!(
        "\nCosts agree: {}",
        if report.costs_agree() { "OK" } else { "DIFFERENT" }
    );
    println!(
        "Policies agree: {}",
        if report.policies_agree() {
            "OK"
        } else {
            "POSSIBLY DIFFERENT"
        }
    );
    if let Some(note) = report.tie_note() {
        println!("Note: {}", note);
    }

    // 4. EXPORT SCHEDULE
    let schedule = replay_policy(&forecast, costs, &report.tabular.plan.policy)?;
    reporting::write_plan_schedule(&config.output_path, &schedule)?;
    println!(
        "Success! Schedule written to {}",
        config.output_path.display()
    );

    Ok(())
}
