use serde::Serialize;

use super::engine::run_projection;
use super::types::ProjectionInput;

#[derive(Debug, Clone, Copy)]
pub struct GoalSolveConfig {
    pub initial_amount: f64,
    pub expected_return: f64,
    pub duration: i32,
    pub target_amount: f64,
    pub search_min: f64,
    pub search_max: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSolveIteration {
    pub iteration: u32,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub candidate_contribution: f64,
    pub final_amount: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSolveResult {
    pub target_amount: f64,
    pub search_min: f64,
    pub search_max: f64,
    pub tolerance: f64,
    pub solved_contribution: Option<f64>,
    pub achieved_final_amount: Option<f64>,
    pub iterations: Vec<GoalSolveIteration>,
    pub converged: bool,
    pub feasible: bool,
    pub message: String,
}

/// Bisects over the annual contribution for the smallest value whose
/// projection reaches `target_amount` by the final year. The final balance is
/// strictly increasing in the contribution for any valid base input, so the
/// search is sound.
pub fn solve_required_contribution(config: &GoalSolveConfig) -> Result<GoalSolveResult, String> {
    validate_config(config)?;

    let low_final = final_amount_for(config, config.search_min)?;
    let high_final = final_amount_for(config, config.search_max)?;

    let mut iterations = Vec::with_capacity(config.max_iterations as usize);
    let mut solved_contribution = None;
    let mut converged = false;
    let feasible;
    let message;

    if low_final + 1e-9 >= config.target_amount {
        solved_contribution = Some(config.search_min);
        converged = true;
        feasible = true;
        message = "Already meets target at the lower contribution bound.".to_string();
    } else if high_final + 1e-9 < config.target_amount {
        feasible = false;
        message = "No feasible contribution found within the search bounds.".to_string();
    } else {
        let mut lo = config.search_min;
        let mut hi = config.search_max;
        let mut it = 0;
        while it < config.max_iterations {
            it += 1;
            let mid = (lo + hi) * 0.5;
            let final_amount = final_amount_for(config, mid)?;
            iterations.push(GoalSolveIteration {
                iteration: it,
                lower_bound: lo,
                upper_bound: hi,
                candidate_contribution: mid,
                final_amount,
            });

            if final_amount + 1e-9 >= config.target_amount {
                hi = mid;
            } else {
                lo = mid;
            }

            if (hi - lo).abs() <= config.tolerance {
                converged = true;
                solved_contribution = Some(hi);
                break;
            }
        }
        if solved_contribution.is_none() {
            solved_contribution = Some(hi);
        }
        feasible = true;
        message = if converged {
            "Solved required contribution.".to_string()
        } else {
            "Reached max iterations before tolerance was met; returning best estimate.".to_string()
        };
    }

    let achieved_final_amount = match solved_contribution {
        Some(value) => Some(final_amount_for(config, value)?),
        None => None,
    };

    Ok(GoalSolveResult {
        target_amount: config.target_amount,
        search_min: config.search_min,
        search_max: config.search_max,
        tolerance: config.tolerance,
        solved_contribution,
        achieved_final_amount,
        iterations,
        converged,
        feasible,
        message,
    })
}

fn final_amount_for(config: &GoalSolveConfig, contribution: f64) -> Result<f64, String> {
    let input = ProjectionInput {
        initial_amount: config.initial_amount,
        annual_contribution: contribution,
        expected_return: config.expected_return,
        duration: config.duration,
    };
    let years = run_projection(&input)?;
    let last = years
        .last()
        .ok_or_else(|| "Projection produced no years.".to_string())?;
    Ok(last.total_amount)
}

fn validate_config(config: &GoalSolveConfig) -> Result<(), String> {
    if !config.target_amount.is_finite() || config.target_amount < 0.0 {
        return Err("target_amount must be >= 0".to_string());
    }
    if !config.search_min.is_finite() || !config.search_max.is_finite() {
        return Err("search bounds must be finite".to_string());
    }
    if config.search_max <= config.search_min {
        return Err("search_max must be greater than search_min".to_string());
    }
    if !config.tolerance.is_finite() || config.tolerance <= 0.0 {
        return Err("tolerance must be > 0".to_string());
    }
    if config.max_iterations == 0 {
        return Err("max_iterations must be > 0".to_string());
    }
    Ok(())
}
