// src/io/demand.rs

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::model::error::PlanningError;
use crate::model::params::DemandForecast;
use crate::simulation::config::ForecastConfig;

/// Projects recorded consumption onto the planning horizon.
///
/// Averages the last `window` records (integer division, never below 1 unit) and repeats
/// that value for every day. An item without history is assumed to consume
/// `fallback_demand` units per day.
pub fn forecast_from_history(
    history: &[u32],
    horizon: usize,
    config: &ForecastConfig,
) -> Result<DemandForecast, PlanningError> {
    if history.is_empty() {
        return DemandForecast::new(generate_constant_demand(horizon, config.fallback_demand));
    }

    let window = config.window.clamp(1, history.len());
    let recent = &history[history.len() - window..];
    let sum: u64 = recent.iter().map(|&q| u64::from(q)).sum();
    // mean of u32 values always fits in a u32
    let mean = u32::try_from(sum / window as u64).unwrap_or(u32::MAX).max(1);

    DemandForecast::new(generate_constant_demand(horizon, mean))
}

/// Generates a demand schedule where every day has the exact same amount.
pub fn generate_constant_demand(days: usize, value: u32) -> Vec<u32> {
    vec![value; days]
}

/// Generates a "step" pattern: `low` until `step_day`, `high` from then on.
///
/// The sudden jump is a good stress case for batching decisions.
pub fn generate_step_demand(days: usize, step_day: usize, low: u32, high: u32) -> Vec<u32> {
    (0..days)
        .map(|day| if day < step_day { low } else { high })
        .collect()
}

/// Generates a demand schedule based on a Normal (Bell Curve) distribution.
///
/// Samples are rounded to the nearest integer and negative draws are clamped to 0.
///
/// # Arguments
/// * `days` - Length of the schedule.
/// * `mean` - The average daily demand (e.g., 10.0).
/// * `std_dev` - The standard deviation (volatility) (e.g., 2.0).
/// * `rng` - Source of randomness; pass a seeded RNG for reproducible scenarios.
pub fn generate_normal_demand<R: Rng + ?Sized>(
    days: usize,
    mean: f64,
    std_dev: f64,
    rng: &mut R,
) -> Result<Vec<u32>, PlanningError> {
    let normal = Normal::new(mean, std_dev).map_err(|e| PlanningError::InvalidForecast {
        reason: format!("cannot sample demand from N({mean}, {std_dev}): {e}"),
    })?;

    let schedule = (0..days)
        .map(|_| {
            let val = normal.sample(&mut *rng).round();
            if val <= 0.0 {
                0
            } else if val >= f64::from(u32::MAX) {
                u32::MAX
            } else {
                val as u32
            }
        })
        .collect();
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn empty_history_falls_back_to_one_unit_per_day() {
        let forecast = forecast_from_history(&[], 4, &ForecastConfig::default()).unwrap();
        assert_eq!(forecast.as_slice(), &[1, 1, 1, 1]);
    }

    #[test]
    fn averages_only_the_most_recent_window() {
        let history = [100, 100, 2, 3, 4, 5, 6, 7, 8];
        let forecast = forecast_from_history(&history, 3, &ForecastConfig::default()).unwrap();
        // (2 + 3 + 4 + 5 + 6 + 7 + 8) / 7 = 5
        assert_eq!(forecast.as_slice(), &[5, 5, 5]);
    }

    #[test]
    fn short_history_uses_floor_mean_of_everything() {
        let forecast = forecast_from_history(&[3, 4], 2, &ForecastConfig::default()).unwrap();
        assert_eq!(forecast.as_slice(), &[3, 3]);
    }

    #[test]
    fn zero_consumption_still_forecasts_one_unit() {
        let forecast = forecast_from_history(&[0, 0, 0], 2, &ForecastConfig::default()).unwrap();
        assert_eq!(forecast.as_slice(), &[1, 1]);
    }

    #[test]
    fn zero_horizon_is_rejected() {
        assert!(matches!(
            forecast_from_history(&[3], 0, &ForecastConfig::default()),
            Err(PlanningError::InvalidForecast { .. })
        ));
    }

    #[test]
    fn step_demand_switches_on_step_day() {
        assert_eq!(generate_step_demand(6, 4, 4, 8), vec![4, 4, 4, 4, 8, 8]);
    }

    #[test]
    fn normal_demand_is_reproducible_with_seed() {
        let first = generate_normal_demand(20, 10.0, 2.0, &mut StdRng::seed_from_u64(7)).unwrap();
        let second = generate_normal_demand(20, 10.0, 2.0, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 20);
    }

    #[test]
    fn normal_demand_rejects_invalid_deviation() {
        let result = generate_normal_demand(5, 10.0, -1.0, &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(PlanningError::InvalidForecast { .. })));
    }
}
